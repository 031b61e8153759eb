// yaff-kit/src/label.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Glyph labels and the coercion of label text into typed values.
//!
//! A glyph can be addressed in four independent ways: by a code point in the font's own
//! encoding, by a Unicode scalar value, by a literal character, or by a symbolic tag. A
//! label that doesn't have the shape its kind requires is invalid; invalid labels are
//! dropped one at a time rather than failing the font.

use lazy_static::lazy_static;
use log::debug;
use regex::Regex;
use std::fmt::{self, Display, Formatter};

use crate::parse_tree::{RawCharacter, RawLabel};

lazy_static! {
    static ref DECIMAL: Regex = Regex::new(r"^[0-9]+$").unwrap();
    static ref HEXADECIMAL: Regex = Regex::new(r"^0[xX]([0-9A-Fa-f]+)$").unwrap();
    static ref OCTAL: Regex = Regex::new(r"^0[oO]([0-7]+)$").unwrap();
    static ref UNICODE_ESCAPE: Regex = Regex::new(r#"^"?[uU]\+([0-9A-Fa-f]+)"?$"#).unwrap();
}

/// A validated glyph label.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Label {
    /// Code point values in the font's encoding. Never empty; only the first value is used
    /// for lookup.
    CodePoint(Vec<u32>),
    /// A literal character.
    Character(char),
    /// A Unicode scalar value, written as a `U+` escape in the source.
    Unicode(u32),
    /// A symbolic name.
    Tag(String),
    /// Marks the glyph as the font's default glyph.
    Default,
}

impl Label {
    /// Validates a raw label.
    ///
    /// Returns `None` for labels that are malformed and for `missing` labels, which carry no
    /// addressing information.
    pub fn from_raw(raw: &RawLabel) -> Option<Label> {
        let label = match *raw {
            RawLabel::CodePoint { ref label } => {
                let values: Option<Vec<u32>> =
                    label.iter().map(|value| parse_code_point(value)).collect();
                match values {
                    Some(values) if !values.is_empty() => Some(Label::CodePoint(values)),
                    _ => None,
                }
            }
            RawLabel::Character { ref label } => match *label {
                RawCharacter::Text(ref text) => character_label(text),
                RawCharacter::Sequence(ref texts) if texts.len() == 1 => character_label(&texts[0]),
                RawCharacter::Sequence(_) => None,
            },
            RawLabel::Tag { ref label } => Some(Label::Tag(label.clone())),
            RawLabel::Default => Some(Label::Default),
            RawLabel::Missing => return None,
        };
        if label.is_none() {
            debug!("dropping malformed label {:?}", raw);
        }
        label
    }

    /// Returns the code point used to index this label, if it is a code point label.
    #[inline]
    pub fn code_point(&self) -> Option<u32> {
        match *self {
            Label::CodePoint(ref values) => values.first().cloned(),
            _ => None,
        }
    }

    /// Returns the Unicode scalar a tag spells out, for tags of the form `U+<hex>`.
    pub fn tag_unicode_scalar(&self) -> Option<u32> {
        match *self {
            Label::Tag(ref tag) => unicode_escape(tag, false),
            _ => None,
        }
    }
}

impl Display for Label {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match *self {
            Label::CodePoint(ref values) => {
                for (index, value) in values.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "0x{:02x}", value)?;
                }
                Ok(())
            }
            Label::Character(character) => write!(f, "'{}'", character),
            Label::Unicode(scalar) => write!(f, "U+{:04X}", scalar),
            Label::Tag(ref tag) => write!(f, "\"{}\"", tag),
            Label::Default => f.write_str("default"),
        }
    }
}

/// Parses a numeric code point: decimal digits, `0x` hexadecimal or `0o` octal.
pub fn parse_code_point(value: &str) -> Option<u32> {
    if DECIMAL.is_match(value) {
        return value.parse().ok();
    }
    if let Some(captures) = HEXADECIMAL.captures(value) {
        return u32::from_str_radix(captures.get(1)?.as_str(), 16).ok();
    }
    if let Some(captures) = OCTAL.captures(value) {
        return u32::from_str_radix(captures.get(1)?.as_str(), 8).ok();
    }
    None
}

/// Parses a Unicode escape such as `U+00E9` or `"u+e9"` into its scalar value.
pub fn parse_unicode_escape(value: &str) -> Option<u32> {
    unicode_escape(value, true)
}

/// Unwraps a character literal such as `'A'`. The quotes must hold exactly one character.
pub fn parse_character_literal(value: &str) -> Option<char> {
    let inner = value.strip_prefix('\'')?.strip_suffix('\'')?;
    let mut chars = inner.chars();
    match (chars.next(), chars.next()) {
        (Some(character), None) => Some(character),
        _ => None,
    }
}

fn unicode_escape(value: &str, allow_quotes: bool) -> Option<u32> {
    if !allow_quotes && value.contains('"') {
        return None;
    }
    let captures = UNICODE_ESCAPE.captures(value)?;
    // Reject unbalanced quotes such as `"U+41`.
    if value.starts_with('"') != value.ends_with('"') {
        return None;
    }
    u32::from_str_radix(captures.get(1)?.as_str(), 16).ok()
}

fn character_label(text: &str) -> Option<Label> {
    if let Some(scalar) = parse_unicode_escape(text) {
        return Some(Label::Unicode(scalar));
    }
    parse_character_literal(text).map(Label::Character)
}
