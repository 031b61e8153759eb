// yaff-kit/src/parse_tree.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! The untyped parse tree that a grammar engine produces from font source text.
//!
//! Nothing here has been validated yet. Entries, labels and glyph properties that don't have
//! the expected shape are kept as `None` so that the normalizer can drop them one by one
//! instead of failing the whole font.

use log::debug;
use serde::Deserialize;
use serde_json::Value;
use std::iter::FromIterator;
use thiserror::Error;

/// Turns font source text into an untyped parse tree.
///
/// The grammar of the font source format lives outside this crate. Any parser that produces
/// a [`ParseTree`] can be plugged in, including a plain closure.
pub trait Grammar {
    /// Parses the whole source text.
    fn parse(&self, source: &str) -> Result<ParseTree, SyntaxError>;
}

impl<F> Grammar for F
where
    F: Fn(&str) -> Result<ParseTree, SyntaxError>,
{
    #[inline]
    fn parse(&self, source: &str) -> Result<ParseTree, SyntaxError> {
        self(source)
    }
}

/// A grammar for sources that have already been parsed and serialized as JSON.
///
/// The JSON must be an array of entries in the grammar engine's output shape, e.g.
/// `{"type": "property", "key": "name", "val": "Fixed"}`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PreParsed;

impl Grammar for PreParsed {
    fn parse(&self, source: &str) -> Result<ParseTree, SyntaxError> {
        ParseTree::from_json(source).map_err(|error| SyntaxError {
            line: error.line(),
            column: error.column(),
            message: error.to_string(),
        })
    }
}

/// A grammar-level failure: the source text is not in the font source format at all.
#[derive(Clone, Debug, PartialEq, Error)]
#[error("line {line}, column {column}: {message}")]
pub struct SyntaxError {
    /// The 1-based line of the offending input.
    pub line: usize,
    /// The 1-based column of the offending input.
    pub column: usize,
    /// What the grammar engine expected.
    pub message: String,
}

/// The entries of a parsed font source, in document order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParseTree {
    /// One slot per entry. `None` marks a null or malformed entry.
    pub entries: Vec<Option<RawEntry>>,
}

impl ParseTree {
    /// Creates an empty parse tree.
    #[inline]
    pub fn new() -> ParseTree {
        ParseTree::default()
    }

    /// Reads a parse tree serialized as a JSON array.
    ///
    /// Only the outer array is required to be well-formed; entries of an unexpected shape
    /// become `None`.
    pub fn from_json(json: &str) -> Result<ParseTree, serde_json::Error> {
        let values: Vec<Value> = serde_json::from_str(json)?;
        Ok(ParseTree::from_values(values))
    }

    /// Builds a parse tree from already deserialized JSON values.
    pub fn from_values<I>(values: I) -> ParseTree
    where
        I: IntoIterator<Item = Value>,
    {
        ParseTree {
            entries: values.into_iter().map(RawEntry::from_value).collect(),
        }
    }

    /// Appends an entry.
    #[inline]
    pub fn push(&mut self, entry: RawEntry) -> &mut ParseTree {
        self.entries.push(Some(entry));
        self
    }
}

impl FromIterator<RawEntry> for ParseTree {
    fn from_iter<I>(iter: I) -> ParseTree
    where
        I: IntoIterator<Item = RawEntry>,
    {
        ParseTree {
            entries: iter.into_iter().map(Some).collect(),
        }
    }
}

/// A top-level entry: either a font property or a glyph.
#[derive(Clone, Debug, PartialEq)]
pub enum RawEntry {
    /// A `key: value` line at the top level.
    Property(RawProperty),
    /// A glyph definition. Glyphs are recognized by having an `ink` field.
    Glyph(RawGlyph),
}

impl RawEntry {
    /// Classifies one JSON value, returning `None` if it is neither a property nor a glyph.
    pub fn from_value(value: Value) -> Option<RawEntry> {
        let is_glyph = match value {
            Value::Object(ref object) => object.contains_key("ink"),
            Value::Null => return None,
            _ => {
                debug!("dropping parse tree entry that is not an object");
                return None;
            }
        };
        if is_glyph {
            return RawGlyph::from_value(value).map(RawEntry::Glyph);
        }
        RawProperty::from_value(value).map(RawEntry::Property)
    }

    /// Creates a property entry.
    pub fn property<K, V>(key: K, val: V) -> RawEntry
    where
        K: Into<String>,
        V: Into<String>,
    {
        RawEntry::Property(RawProperty::new(key, val))
    }
}

/// A `key: value` pair, as written in the source.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct RawProperty {
    /// The key, not yet normalized.
    pub key: String,
    /// The value text.
    pub val: String,
}

impl RawProperty {
    /// Creates a property.
    pub fn new<K, V>(key: K, val: V) -> RawProperty
    where
        K: Into<String>,
        V: Into<String>,
    {
        RawProperty {
            key: key.into(),
            val: val.into(),
        }
    }

    fn from_value(value: Value) -> Option<RawProperty> {
        #[derive(Deserialize)]
        struct Tagged {
            #[serde(rename = "type")]
            kind: String,
            #[serde(flatten)]
            property: RawProperty,
        }

        match serde_json::from_value::<Tagged>(value) {
            Ok(Tagged { kind, property }) if kind == "property" => Some(property),
            Ok(Tagged { kind, .. }) => {
                debug!("dropping entry of unknown type `{}`", kind);
                None
            }
            Err(error) => {
                debug!("dropping malformed property entry: {}", error);
                None
            }
        }
    }
}

/// A glyph definition: its labels, its ink and its per-glyph properties.
#[derive(Clone, Debug, PartialEq)]
pub struct RawGlyph {
    /// The labels in source order. `None` marks a label of unrecognized shape.
    pub labels: Vec<Option<RawLabel>>,
    /// The ink rows, or the no-ink sentinel.
    pub ink: RawInk,
    /// Per-glyph properties. `None` marks a malformed property.
    pub props: Vec<Option<RawProperty>>,
}

impl RawGlyph {
    /// Creates a glyph without per-glyph properties.
    pub fn new<L>(labels: L, ink: RawInk) -> RawGlyph
    where
        L: IntoIterator<Item = RawLabel>,
    {
        RawGlyph {
            labels: labels.into_iter().map(Some).collect(),
            ink,
            props: vec![],
        }
    }

    /// Adds a per-glyph property and returns this glyph for method chaining.
    pub fn prop<K, V>(mut self, key: K, val: V) -> RawGlyph
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.props.push(Some(RawProperty::new(key, val)));
        self
    }

    fn from_value(value: Value) -> Option<RawGlyph> {
        #[derive(Deserialize)]
        struct Fields {
            #[serde(default)]
            labels: Vec<Value>,
            ink: RawInk,
            #[serde(default)]
            props: Vec<Value>,
        }

        let fields: Fields = match serde_json::from_value(value) {
            Ok(fields) => fields,
            Err(error) => {
                debug!("dropping malformed glyph entry: {}", error);
                return None;
            }
        };
        Some(RawGlyph {
            labels: fields
                .labels
                .into_iter()
                .map(|label| serde_json::from_value(label).ok())
                .collect(),
            ink: fields.ink,
            props: fields
                .props
                .into_iter()
                .map(RawProperty::from_value)
                .collect(),
        })
    }
}

impl From<RawGlyph> for RawEntry {
    #[inline]
    fn from(glyph: RawGlyph) -> RawEntry {
        RawEntry::Glyph(glyph)
    }
}

/// A glyph label as the grammar engine recognized it.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RawLabel {
    /// One or more numeric code point values, e.g. `0x41` or `65, 66`.
    CodePoint {
        /// The values, not yet coerced.
        label: Vec<String>,
    },
    /// A quoted character such as `'A'`, or a Unicode escape such as `u+0041`.
    Character {
        /// The label text.
        label: RawCharacter,
    },
    /// A symbolic name.
    Tag {
        /// The tag text.
        label: String,
    },
    /// Marks the glyph used for unmapped characters.
    Default,
    /// Marks a label that should be ignored.
    Missing,
}

impl RawLabel {
    /// Creates a code point label.
    pub fn code_point<I, S>(values: I) -> RawLabel
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RawLabel::CodePoint {
            label: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Creates a character label from its source text, e.g. `'A'` or `u+0041`.
    pub fn character<S>(text: S) -> RawLabel
    where
        S: Into<String>,
    {
        RawLabel::Character {
            label: RawCharacter::Text(text.into()),
        }
    }

    /// Creates a tag label.
    pub fn tag<S>(tag: S) -> RawLabel
    where
        S: Into<String>,
    {
        RawLabel::Tag { label: tag.into() }
    }
}

/// The text of a character label. Grammar engines emit Unicode escapes either as a bare
/// string or as a one-element list.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawCharacter {
    /// A single string.
    Text(String),
    /// A list of strings.
    Sequence(Vec<String>),
}

/// The ink of a glyph: rows of `.` and `@`, or a single `-` for "no ink".
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawInk {
    /// Pixel rows, top to bottom.
    Rows(Vec<String>),
    /// A single token standing in for the whole raster.
    Sentinel(String),
}

impl RawInk {
    /// Creates ink from pixel rows.
    pub fn rows<I, S>(rows: I) -> RawInk
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        RawInk::Rows(rows.into_iter().map(Into::into).collect())
    }

    /// The "no ink" sentinel.
    #[inline]
    pub fn blank() -> RawInk {
        RawInk::Sentinel("-".to_owned())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_json::json;

    #[test]
    fn classify_entries() {
        let tree = ParseTree::from_values(vec![
            json!({"type": "property", "key": "name", "val": "Fixed"}),
            json!(null),
            json!({"type": "comment", "text": "hi"}),
            json!({"type": "glyph", "labels": [{"type": "default"}], "ink": "-"}),
            json!(42),
        ]);
        assert_eq!(
            tree.entries,
            vec![
                Some(RawEntry::property("name", "Fixed")),
                None,
                None,
                Some(RawEntry::Glyph(RawGlyph::new(vec![RawLabel::Default], RawInk::blank()))),
                None,
            ]
        );
    }

    #[test]
    fn glyphs_are_recognized_by_ink() {
        let entry = RawEntry::from_value(json!({
            "labels": [{"type": "tag", "label": "A"}],
            "ink": ["@."],
        }));
        assert_eq!(
            entry,
            Some(RawEntry::Glyph(RawGlyph::new(
                vec![RawLabel::tag("A")],
                RawInk::rows(vec!["@."]),
            )))
        );
    }

    #[test]
    fn malformed_labels_become_none() {
        let entry = RawEntry::from_value(json!({
            "type": "glyph",
            "labels": [
                {"type": "codePoint", "label": ["0x41"]},
                {"type": "codePoint", "label": 12},
                {"type": "character", "label": ["u+0041"]},
                {"type": "bogus"},
            ],
            "ink": ["@"],
            "props": [{"type": "property", "key": "shift-up", "val": "-1"}, {"key": "x"}],
        }));
        let glyph = match entry {
            Some(RawEntry::Glyph(glyph)) => glyph,
            other => panic!("expected a glyph, got {:?}", other),
        };
        assert_eq!(
            glyph.labels,
            vec![
                Some(RawLabel::code_point(vec!["0x41"])),
                None,
                Some(RawLabel::Character {
                    label: RawCharacter::Sequence(vec!["u+0041".to_owned()]),
                }),
                None,
            ]
        );
        assert_eq!(glyph.props, vec![Some(RawProperty::new("shift-up", "-1")), None]);
    }

    #[test]
    fn pre_parsed_reports_syntax_errors() {
        let error = PreParsed.parse("[{\"type\": ").unwrap_err();
        assert_eq!(error.line, 1);
        assert!(PreParsed.parse("{}").is_err());
        assert_eq!(PreParsed.parse("[]").unwrap(), ParseTree::new());
    }
}
