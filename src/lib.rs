// yaff-kit/src/lib.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! `yaff-kit` loads plain-text bitmap fonts and renders text with them.
//!
//! A font source is a list of properties (`name`, `spacing`, `cell-size`, …) and glyphs. Each
//! glyph has one or more labels and a raster of `.` (paper) and `@` (ink) rows, or `-` if it
//! has no ink. Labels address a glyph by code point (`0x41`), by Unicode escape (`u+0041`), by
//! character (`'A'`) or by tag (`"uni0041"`).
//!
//! Turning source text into an untyped [`ParseTree`](parse_tree::ParseTree) is the job of a
//! [`Grammar`](parse_tree::Grammar), which is supplied by the caller. From there, loading runs
//! in three stages:
//!
//! 1. [`FontDocument::from_parse_tree`](document::FontDocument::from_parse_tree) validates the
//!    tree, dropping malformed labels, glyphs and properties.
//! 2. Each [`GlyphSource`](document::GlyphSource) is compiled into an immutable
//!    [`Glyph`](glyph::Glyph).
//! 3. The [`Font`](font::Font) indexes its glyphs by every label and resolves its default
//!    glyph.
//!
//! To render, call [`Font::fill_text`](font::Font::fill_text) with a
//! [`Surface`](canvas::Surface) such as [`Canvas`](canvas::Canvas):
//!
//! ```
//! use pathfinder_geometry::vector::Vector2I;
//! use yaff_kit::canvas::{Canvas, ColorU, Format};
//! use yaff_kit::font::Font;
//! use yaff_kit::parse_tree::PreParsed;
//!
//! let source = r#"[
//!     {"type": "property", "key": "name", "val": "Tiny"},
//!     {"type": "glyph", "labels": [{"type": "character", "label": "'I'"}], "ink": ["@", "@"]}
//! ]"#;
//! let font = Font::load(source, &PreParsed).unwrap();
//! let mut canvas = Canvas::new(Vector2I::zero(), Format::Rgba32);
//! let bounds = font.fill_text("II", ColorU::black(), &mut canvas);
//! assert_eq!((bounds.width, bounds.height), (2, 2));
//! ```

#![warn(missing_docs)]

pub mod canvas;
pub mod document;
pub mod error;
pub mod font;
pub mod glyph;
pub mod glyph_map;
pub mod label;
pub mod layout;
pub mod parse_tree;
pub mod properties;

mod utils;
