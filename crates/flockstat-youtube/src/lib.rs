//! `YouTube` Data API v3 client that assembles the captioned-upload batch
//! consumed by [`flockstat_core::build_series`].

pub mod client;
pub mod error;
mod retry;
pub mod types;

pub use client::{YoutubeClient, YoutubeConfig};
pub use error::YoutubeError;
