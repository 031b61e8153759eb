// yaff-kit/src/utils.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Miscellaneous utilities for use in this crate.

use lazy_static::lazy_static;
use pathfinder_geometry::vector::Vector2I;
use regex::Regex;

lazy_static! {
    static ref PROPERTY_KEY: Regex = Regex::new(r"^[0-9A-Za-z_.\-]+$").unwrap();
    static ref SIZE: Regex = Regex::new(r"^\s*([0-9]+)\s*(?:[xX]|\s)\s*([0-9]+)\s*$").unwrap();
}

/// Canonicalizes a property key to lowercase, hyphen-separated words.
///
/// `shift_up`, `SHIFT-UP` and `shift.up` all become `shift-up`. Returns `None` if the key
/// contains characters that cannot appear in a property key.
pub(crate) fn normalize_key(key: &str) -> Option<String> {
    if !PROPERTY_KEY.is_match(key) {
        return None;
    }
    let words: Vec<String> = key
        .split(|c| c == '_' || c == '-' || c == '.')
        .filter(|word| !word.is_empty())
        .map(|word| word.to_ascii_lowercase())
        .collect();
    if words.is_empty() {
        None
    } else {
        Some(words.join("-"))
    }
}

/// Returns the value as a number if it only consists of digits, dots and minus signs.
pub(crate) fn numeric_value(value: &str) -> Option<f64> {
    let value = value.trim();
    if value.is_empty() || !value.chars().all(|c| c.is_ascii_digit() || c == '.' || c == '-') {
        return None;
    }
    value.parse().ok()
}

/// Returns the value as a whole number of pixels, rounding fractions to the nearest pixel.
pub(crate) fn pixel_value(value: &str) -> Option<i32> {
    let number = numeric_value(value)?.round();
    if number < i32::MIN as f64 || number > i32::MAX as f64 {
        return None;
    }
    Some(number as i32)
}

/// Parses a `WxH` or `W H` size. Both dimensions must be positive.
pub(crate) fn parse_size(value: &str) -> Option<Vector2I> {
    let captures = SIZE.captures(value)?;
    let width: i32 = captures.get(1)?.as_str().parse().ok()?;
    let height: i32 = captures.get(2)?.as_str().parse().ok()?;
    if width > 0 && height > 0 {
        Some(Vector2I::new(width, height))
    } else {
        None
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn normalize_property_keys() {
        assert_eq!(normalize_key("shift_up").as_deref(), Some("shift-up"));
        assert_eq!(normalize_key("DEFAULT-CHAR").as_deref(), Some("default-char"));
        assert_eq!(normalize_key("cell.size").as_deref(), Some("cell-size"));
        assert_eq!(normalize_key("bad key"), None);
        assert_eq!(normalize_key("__"), None);
    }

    #[test]
    fn classify_numbers() {
        assert_eq!(numeric_value("96"), Some(96.0));
        assert_eq!(numeric_value("-2"), Some(-2.0));
        assert_eq!(numeric_value("1.5"), Some(1.5));
        assert_eq!(numeric_value("96x96"), None);
        assert_eq!(numeric_value("-"), None);
        assert_eq!(pixel_value("-3"), Some(-3));
        assert_eq!(pixel_value("1.5"), Some(2));
        assert_eq!(pixel_value("-0.4"), Some(0));
        assert_eq!(pixel_value("1e99"), None);
        assert_eq!(pixel_value("99999999999"), None);
    }

    #[test]
    fn parse_sizes() {
        assert_eq!(parse_size("8x16"), Some(Vector2I::new(8, 16)));
        assert_eq!(parse_size("8 16"), Some(Vector2I::new(8, 16)));
        assert_eq!(parse_size("8X16"), Some(Vector2I::new(8, 16)));
        assert_eq!(parse_size("0x16"), None);
        assert_eq!(parse_size("8"), None);
        assert_eq!(parse_size("wide"), None);
    }
}
