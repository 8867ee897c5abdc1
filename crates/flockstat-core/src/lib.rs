//! Caption metric extraction and day-indexed series assembly.
//!
//! The pure half of flockstat: turn a batch of captioned uploads into the
//! subscriber/chicken series served by `flockstat-server`. Nothing in this
//! crate performs I/O apart from [`load_app_config`] reading the environment.

pub mod app_config;
pub mod config;
pub mod count;
pub mod error;
pub mod extract;
pub mod series;
pub mod types;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env, DEFAULT_YOUTUBE_BASE_URL};
pub use count::parse_count;
pub use error::ConfigError;
pub use extract::{extract_metrics, Metric};
pub use series::build_series;
pub use types::{CaptionedItem, ExtractedMetrics, SeriesEntry};
