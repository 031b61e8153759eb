// yaff-kit/src/glyph_map.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Maps from the four kinds of glyph address to glyph IDs.
//!
//! A glyph ID is the index of a glyph in its font. Several keys, in any of the maps, may map
//! to the same glyph.

use std::collections::HashMap;

use crate::label::Label;

/// Lookup tables from code points, Unicode scalars, characters and tags to glyph IDs, plus
/// the default glyph.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GlyphMap {
    code_points: HashMap<u32, u32>,
    unicode: HashMap<u32, u32>,
    characters: HashMap<char, u32>,
    tags: HashMap<String, u32>,
    default: Option<u32>,
}

impl GlyphMap {
    /// Creates an empty map.
    #[inline]
    pub fn new() -> GlyphMap {
        GlyphMap::default()
    }

    /// Registers a glyph under one of its labels, replacing any glyph previously registered
    /// under the same key.
    ///
    /// A tag spelled like a Unicode escape (`U+0041`) is registered both as a tag and under
    /// its Unicode scalar.
    pub fn insert_label(&mut self, label: &Label, glyph_id: u32) {
        match *label {
            Label::Default => self.default = Some(glyph_id),
            Label::Unicode(scalar) => {
                self.unicode.insert(scalar, glyph_id);
            }
            Label::Character(character) => {
                self.characters.insert(character, glyph_id);
            }
            Label::CodePoint(_) => {
                if let Some(code_point) = label.code_point() {
                    self.code_points.insert(code_point, glyph_id);
                }
            }
            Label::Tag(ref tag) => {
                if let Some(scalar) = label.tag_unicode_scalar() {
                    self.unicode.insert(scalar, glyph_id);
                }
                self.tags.insert(tag.clone(), glyph_id);
            }
        }
    }

    /// Replaces the default glyph.
    #[inline]
    pub fn set_default(&mut self, glyph_id: Option<u32>) {
        self.default = glyph_id
    }

    /// Resolves text: by its first character, then by that character's scalar in the Unicode
    /// and code point maps, then by the whole text as a tag, and finally the default glyph.
    pub fn lookup_character(&self, text: &str) -> Option<u32> {
        let first = text.chars().next();
        first
            .and_then(|character| self.by_character(character))
            .or_else(|| first.and_then(|character| self.by_unicode(character as u32)))
            .or_else(|| first.and_then(|character| self.by_code_point(character as u32)))
            .or_else(|| self.by_tag(text))
            .or(self.default)
    }

    /// Resolves a numeric character code: through the code point map, then the Unicode map,
    /// and finally the default glyph. Tags are never consulted.
    pub fn lookup_char_code(&self, code: u32) -> Option<u32> {
        self.by_code_point(code)
            .or_else(|| self.by_unicode(code))
            .or(self.default)
    }

    /// Looks up a code point in the font's own encoding.
    #[inline]
    pub fn by_code_point(&self, code_point: u32) -> Option<u32> {
        self.code_points.get(&code_point).cloned()
    }

    /// Looks up a Unicode scalar value.
    #[inline]
    pub fn by_unicode(&self, scalar: u32) -> Option<u32> {
        self.unicode.get(&scalar).cloned()
    }

    /// Looks up a literal character.
    #[inline]
    pub fn by_character(&self, character: char) -> Option<u32> {
        self.characters.get(&character).cloned()
    }

    /// Looks up a tag.
    #[inline]
    pub fn by_tag(&self, tag: &str) -> Option<u32> {
        self.tags.get(tag).cloned()
    }

    /// Returns the default glyph, if any.
    #[inline]
    pub fn default_glyph(&self) -> Option<u32> {
        self.default
    }

    /// Returns true if and only if some glyph is registered for the space character, as a
    /// character, a Unicode scalar, a code point or a tag.
    pub fn maps_space(&self) -> bool {
        self.by_character(' ').is_some()
            || self.by_unicode(' ' as u32).is_some()
            || self.by_code_point(' ' as u32).is_some()
            || self.by_tag(" ").is_some()
    }
}
