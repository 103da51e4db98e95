#![forbid(unsafe_code)]

//! CSS length conversion.

/// Turn a host-supplied length into a CSS length string.
///
/// Bare numbers gain `unit` (`"300"` becomes `"300px"`); anything that does
/// not parse as a finite number is passed through untouched (`"50vh"`,
/// `"calc(100% - 64px)"`). Empty or absent input yields `None`, meaning "set no
/// style".
#[must_use]
pub fn convert_to_unit(value: Option<&str>, unit: &str) -> Option<String> {
    let value = value?;
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    match trimmed.parse::<f64>() {
        Ok(number) if number.is_finite() => Some(format!("{number}{unit}")),
        _ => Some(value.to_string()),
    }
}

/// Format a pixel length, e.g. for spacer heights.
#[must_use]
pub fn px(value: f64) -> String {
    format!("{value}px")
}
