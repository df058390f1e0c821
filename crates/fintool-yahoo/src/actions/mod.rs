//! Action handlers, one module per descriptor action
//!
//! Each handler takes the resolved parameters, fetches through the
//! [`crate::source::MarketDataSource`] seam, and builds the host response
//! with the formatted text the original plugin surface exposed.

pub mod chart;
pub mod financials;
pub mod history;
pub mod indices;
pub mod info;
pub mod news;
pub mod options;
pub mod quote;

/// Format a number with thousands separators, e.g. `1234567.5` -> `"1,234,567.50"`
pub(crate) fn thousands(value: f64, decimals: usize) -> String {
    let formatted = format!("{value:.decimals$}");
    let (sign, rest) = formatted
        .strip_prefix('-')
        .map_or(("", formatted.as_str()), |r| ("-", r));
    let (int_part, frac_part) = match rest.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (rest, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}
