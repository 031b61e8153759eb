// yaff-kit/src/error.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Various types of errors that `yaff-kit` can return.

use std::io;
use thiserror::Error;

use crate::parse_tree::SyntaxError;

/// Reasons why a font might fail to load.
///
/// Only problems that make the whole font unusable are reported here. Malformed labels,
/// glyphs and unknown properties are dropped during loading and never surface as errors.
#[derive(Debug, Error)]
pub enum FontLoadingError {
    /// The grammar engine rejected the font source text.
    #[error("syntax error: {0}")]
    Syntax(#[from] SyntaxError),

    /// The parse tree was well-formed but violated a structural constraint of the format.
    ///
    /// For example, a glyph whose ink rows have different lengths, or a `spacing` property
    /// whose value is not one of the known spacing kinds.
    #[error("invalid font source at {location}: {constraint}")]
    Validation {
        /// Where the violation was found, e.g. `property spacing` or `glyph 12 ink row 3`.
        location: String,
        /// The constraint that was violated.
        constraint: String,
    },

    /// A disk or similar I/O error occurred while attempting to read the font source.
    #[error("I/O error")]
    Io(#[from] io::Error),
}

impl FontLoadingError {
    pub(crate) fn validation<L, C>(location: L, constraint: C) -> FontLoadingError
    where
        L: Into<String>,
        C: Into<String>,
    {
        FontLoadingError::Validation {
            location: location.into(),
            constraint: constraint.into(),
        }
    }
}

/// Reasons why a font might fail to load a glyph.
#[derive(PartialEq, Debug, Error)]
pub enum GlyphLoadingError {
    /// The font didn't contain a glyph with that ID.
    #[error("no such glyph")]
    NoSuchGlyph,
}
