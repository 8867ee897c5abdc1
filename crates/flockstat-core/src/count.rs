//! Parsing of the loosely-written counts found in caption metric lines.
//!
//! Captions are typed by hand, so the same number shows up as `214000`,
//! `214k`, `214.0k`, `~214k` or `214,000 (+2k!)`. [`parse_count`] reduces all
//! of these to one integer.

use std::sync::LazyLock;

use regex::Regex;

/// First number-looking run: optional approximation marker, digits with
/// optional thousands separators, optional decimal part, optional `k`/`m`.
static COUNT_TOKEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[~≈]?\s*[0-9][0-9,]*\.?[0-9]*\s*[km]?").expect("valid count token regex")
});

const THOUSAND: f64 = 1_000.0;
const MILLION: f64 = 1_000_000.0;

/// Parses a hand-written count into an integer.
///
/// Only the first number-looking token is considered, so trailing
/// annotations like `"(+10!)"` are ignored. `k` multiplies by one thousand,
/// `m` by one million. Results are rounded half away from zero
/// (`2.5` becomes `3`).
///
/// Returns `None` when the input holds no digits, or the value cannot be
/// represented as a `u64`.
///
/// ```
/// use flockstat_core::parse_count;
///
/// assert_eq!(parse_count("~214.5k (+1k!)"), Some(214_500));
/// assert_eq!(parse_count("12,345"), Some(12_345));
/// assert_eq!(parse_count("soon"), None);
/// ```
#[must_use]
pub fn parse_count(raw: &str) -> Option<u64> {
    let normalized = raw.trim().to_lowercase();
    if normalized.is_empty() {
        return None;
    }

    let found = COUNT_TOKEN.find(&normalized)?;
    let compact: String = found
        .as_str()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    let token = compact.trim_start_matches(['~', '≈']);

    let (number, multiplier) = if let Some(n) = token.strip_suffix('k') {
        (n, THOUSAND)
    } else if let Some(n) = token.strip_suffix('m') {
        (n, MILLION)
    } else {
        (token, 1.0)
    };

    let value = number.replace(',', "").parse::<f64>().ok()?;
    round_to_count(value * multiplier)
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn round_to_count(value: f64) -> Option<u64> {
    if !value.is_finite() || value < 0.0 {
        return None;
    }
    let rounded = value.round();
    // u64::MAX is not exactly representable; its f64 image is 2^64.
    if rounded >= u64::MAX as f64 {
        return None;
    }
    Some(rounded as u64)
}
