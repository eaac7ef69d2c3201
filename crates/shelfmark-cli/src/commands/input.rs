//! Field parsing for book forms.
//!
//! Range checks on year and rating happen here only; storage accepts any
//! value.

use shelfmark_core::model::{MAX_RATING, MAX_YEAR, MIN_YEAR};

/// clap value parser for `--year`.
pub fn parse_year(raw: &str) -> Result<i32, String> {
    let year: i32 = raw
        .trim()
        .parse()
        .map_err(|_| format!("'{raw}' is not a year"))?;
    if (MIN_YEAR..=MAX_YEAR).contains(&year) {
        Ok(year)
    } else {
        Err(format!("year must be between {MIN_YEAR} and {MAX_YEAR}"))
    }
}

/// clap value parser for `--rating`.
pub fn parse_rating(raw: &str) -> Result<f64, String> {
    let rating: f64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("'{raw}' is not a number"))?;
    if (0.0..=MAX_RATING).contains(&rating) {
        Ok(rating)
    } else {
        Err(format!("rating must be between 0.0 and {MAX_RATING:.1}"))
    }
}

/// Blank link fields are stored as absent.
pub fn optional_link(raw: Option<String>) -> Option<String> {
    raw.map(|link| link.trim().to_string())
        .filter(|link| !link.is_empty())
}
