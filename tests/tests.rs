// yaff-kit/tests/tests.rs
//
// Copyright © 2019 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

// General tests.

use pathfinder_geometry::vector::Vector2I;
use serde_json::json;
use std::fs::File;
use std::io::Read;
use std::ptr;

use yaff_kit::document::{GlyphProperties, GlyphSource, Ink, RasterInk};
use yaff_kit::error::FontLoadingError;
use yaff_kit::font::Font;
use yaff_kit::glyph::Glyph;
use yaff_kit::label::Label;
use yaff_kit::parse_tree::{
    Grammar, ParseTree, PreParsed, RawEntry, RawGlyph, RawInk, RawLabel, SyntaxError,
};
use yaff_kit::properties::{DefaultChar, Dpi, Spacing};

static TEST_FONT_FILE_PATH: &'static str = "resources/tests/fixed-4x6.json";
static TEST_FONT_NAME: &'static str = "Fixed 4x6";
static IRREGULAR_FONT_FILE_PATH: &'static str = "resources/tests/irregular.json";

fn load_test_font() -> Font {
    Font::from_path(TEST_FONT_FILE_PATH, &PreParsed).unwrap()
}

fn font_from_json(json: serde_json::Value) -> Result<Font, FontLoadingError> {
    let values = match json {
        serde_json::Value::Array(values) => values,
        other => panic!("expected an array, got {}", other),
    };
    Font::from_parse_tree(&ParseTree::from_values(values))
}

fn glyph_entry(label: serde_json::Value, ink: serde_json::Value) -> serde_json::Value {
    json!({"type": "glyph", "labels": [label], "ink": ink, "props": []})
}

#[test]
pub fn load_font_from_path() {
    let font = load_test_font();
    assert_eq!(font.full_name(), TEST_FONT_NAME);
    assert_eq!(font.family_name(), "Fixed");
    assert!(font.is_monospace());
}

#[test]
pub fn load_font_from_source_text() {
    let mut file = File::open(TEST_FONT_FILE_PATH).unwrap();
    let mut source = String::new();
    file.read_to_string(&mut source).unwrap();
    let font = Font::load(&source, &PreParsed).unwrap();
    assert_eq!(font.full_name(), TEST_FONT_NAME);
}

#[test]
pub fn load_font_with_custom_grammar() {
    let grammar = |source: &str| -> Result<ParseTree, SyntaxError> {
        if source.is_empty() {
            return Err(SyntaxError {
                line: 1,
                column: 1,
                message: "empty font".to_owned(),
            });
        }
        let mut tree = ParseTree::new();
        tree.push(RawEntry::property("name", source));
        tree.push(
            RawGlyph::new(vec![RawLabel::character("'x'")], RawInk::rows(vec!["@.@", ".@."]))
                .into(),
        );
        Ok(tree)
    };
    let font = Font::load("Custom", &grammar).unwrap();
    assert_eq!(font.full_name(), "Custom");
    assert_eq!(font.glyph_for_char('x').unwrap().raster_width, 3);

    match Font::load("", &grammar) {
        Err(FontLoadingError::Syntax(error)) => assert_eq!(error.message, "empty font"),
        other => panic!("expected a syntax error, got {:?}", other.map(|font| font.full_name())),
    }
}

#[test]
pub fn grammar_syntax_errors_are_fatal() {
    match Font::load("[{\"type\": \"property\",", &PreParsed) {
        Err(FontLoadingError::Syntax(_)) => {}
        other => panic!("expected a syntax error, got {:?}", other.map(|font| font.full_name())),
    }
    assert!(PreParsed.parse("not json").is_err());
}

#[test]
pub fn missing_file_is_an_io_error() {
    match Font::from_path("resources/tests/does-not-exist.json", &PreParsed) {
        Err(FontLoadingError::Io(_)) => {}
        other => panic!("expected an I/O error, got {:?}", other.map(|font| font.full_name())),
    }
}

#[test]
pub fn get_font_properties() {
    let font = load_test_font();
    let properties = font.properties();
    assert_eq!(properties.spacing, Some(Spacing::CharacterCell));
    assert_eq!(properties.shift_up, Some(-1));
    assert_eq!(properties.dpi, Some(Dpi::Number(96.0)));
    assert_eq!(properties.default_char, Some(DefaultChar::Missing));
    assert_eq!(font.default_cell_size(), Some(Vector2I::new(4, 6)));
}

#[test]
pub fn malformed_glyphs_are_dropped() {
    let font = load_test_font();
    // A, B, C, the middle dot and the missing glyph, plus a synthesized space.
    assert_eq!(font.glyph_count(), 6);
    let c = font.glyph_for_char('C').unwrap();
    assert_eq!(c.labels, vec![Label::Character('C')]);
    assert!(font.glyphs().iter().all(|glyph| !glyph
        .labels
        .iter()
        .any(|label| *label == Label::Character('x'))));
}

#[test]
pub fn glyph_inherits_global_shift_up() {
    let font = load_test_font();
    let a = font.glyph_for_char('A').unwrap();
    assert_eq!(a.shift_up, -1);
    assert_eq!(a.raster_size(), Vector2I::new(4, 6));
    assert_eq!(a.bounding_height, 7);

    let dot = font.glyph_by_name("middle dot").and_then(|id| font.glyph(id)).unwrap();
    assert_eq!(dot.shift_up, 2);
    assert_eq!(dot.left_bearing, 1);
    assert_eq!(dot.right_bearing, 2);
    assert_eq!(dot.bounding_width, 4);
}

#[test]
pub fn get_glyph_for_char_code() {
    let font = load_test_font();
    assert_eq!(font.glyph_id_for_char_code(0x41), Some(0));
    assert_eq!(font.glyph_id_for_char_code(66), Some(1));
    assert_eq!(font.glyph_id_for_char_code(0o177), Some(4));
    // The middle dot is only tagged `U+00B7`, which also registers it as a Unicode scalar.
    assert_eq!(font.glyph_id_for_char_code(0xb7), Some(3));
    assert_eq!(font.glyph_id_for_character("·"), Some(3));
}

#[test]
pub fn unresolved_characters_use_default_glyph() {
    let font = load_test_font();
    let missing = font.glyph_by_name("missing").unwrap();
    assert_eq!(font.glyph_id_for_character("Z"), Some(missing));
    assert_eq!(font.glyph_id_for_char_code(0x5a), Some(missing));
    assert!(ptr::eq(font.default_glyph().unwrap(), font.glyph(missing).unwrap()));
    assert_eq!(font.glyph_by_name("Z"), None);
}

#[test]
pub fn repeated_lookups_return_the_same_glyph() {
    let font = load_test_font();
    let first = font.glyph_for_char('A').unwrap();
    let second = font.glyph_for_character("A").unwrap();
    let third = font.glyph_for_char_code(0x41).unwrap();
    assert!(ptr::eq(first, second));
    assert!(ptr::eq(first, third));
}

#[test]
pub fn synthesized_space_glyph() {
    let font = font_from_json(json!([
        {"type": "property", "key": "cell-size", "val": "8x16"},
        glyph_entry(json!({"type": "character", "label": "'A'"}), json!(["@"])),
    ]))
    .unwrap();
    let by_char = font.glyph_for_char(' ').unwrap();
    let by_code = font.glyph_for_char_code(32).unwrap();
    let by_tag = font.glyph_by_name(" ").and_then(|id| font.glyph(id)).unwrap();
    assert!(ptr::eq(by_char, by_code));
    assert!(ptr::eq(by_char, by_tag));
    assert_eq!(by_char.raster_size(), Vector2I::new(8, 16));
    assert_eq!(by_char.image.size, Vector2I::new(8, 16));
    assert!(by_char.image.is_transparent());
    assert!(!by_char.blank);
}

#[test]
pub fn space_is_not_synthesized_when_mapped() {
    let font = font_from_json(json!([
        {"type": "property", "key": "cell-size", "val": "8x16"},
        glyph_entry(json!({"type": "tag", "label": " "}), json!("-")),
    ]))
    .unwrap();
    assert_eq!(font.glyph_count(), 1);
    assert!(font.glyph_for_char(' ').unwrap().blank);
}

#[test]
pub fn space_is_not_synthesized_when_mapped_by_code_point() {
    let font = font_from_json(json!([
        {"type": "property", "key": "cell-size", "val": "8x16"},
        glyph_entry(json!({"type": "codePoint", "label": ["0x20"]}), json!(["@@", "@@"])),
    ]))
    .unwrap();
    assert_eq!(font.glyph_count(), 1);
    assert_eq!(font.glyph_id_for_character(" "), Some(0));
    assert_eq!(font.glyph_id_for_char_code(32), Some(0));
}

#[test]
pub fn space_is_not_synthesized_without_cell_size() {
    let font = font_from_json(json!([
        {"type": "property", "key": "cell-size", "val": "big"},
        glyph_entry(json!({"type": "character", "label": "'A'"}), json!(["@"])),
    ]))
    .unwrap();
    assert_eq!(font.glyph_count(), 1);
    assert!(font.glyph_for_char(' ').is_none());
}

#[test]
pub fn blank_glyph_ignores_cell_size() {
    let font = font_from_json(json!([
        {"type": "property", "key": "cell-size", "val": "8x16"},
        {"type": "property", "key": "shift-up", "val": "-3"},
        glyph_entry(json!({"type": "character", "label": "'_'"}), json!("-")),
    ]))
    .unwrap();
    let glyph = font.glyph_for_char('_').unwrap();
    assert!(glyph.blank);
    assert_eq!(glyph.raster_size(), Vector2I::new(0, 0));
    assert_eq!(glyph.bounding_height, 3);
}

#[test]
pub fn irregular_raster_is_fatal() {
    match Font::from_path(IRREGULAR_FONT_FILE_PATH, &PreParsed) {
        Err(FontLoadingError::Validation { location, .. }) => {
            assert_eq!(location, "glyph 1 ink row 3")
        }
        other => panic!("expected a validation error, got {:?}", other.map(|font| font.full_name())),
    }
}

#[test]
pub fn uniform_raster_loads() {
    let font = font_from_json(json!([glyph_entry(
        json!({"type": "character", "label": "'A'"}),
        json!(["@.@", ".@.", "@.@"])
    )]))
    .unwrap();
    assert_eq!(font.glyph_for_char('A').unwrap().raster_size(), Vector2I::new(3, 3));
}

#[test]
pub fn character_map_beats_unicode_map() {
    let font = font_from_json(json!([
        glyph_entry(json!({"type": "character", "label": "'A'"}), json!(["@"])),
        glyph_entry(json!({"type": "character", "label": "u+0041"}), json!(["@@"])),
    ]))
    .unwrap();
    assert_eq!(font.glyph_id_for_character("A"), Some(0));
    // Numeric lookups don't use the character map.
    assert_eq!(font.glyph_id_for_char_code(0x41), Some(1));
}

#[test]
pub fn char_codes_never_resolve_tags() {
    let font = font_from_json(json!([glyph_entry(
        json!({"type": "tag", "label": "A"}),
        json!(["@"])
    )]))
    .unwrap();
    assert_eq!(font.glyph_id_for_character("A"), Some(0));
    assert_eq!(font.glyph_id_for_char_code(0x41), None);
}

#[test]
pub fn whole_string_resolves_tags() {
    let font = font_from_json(json!([glyph_entry(
        json!({"type": "tag", "label": "arrow"}),
        json!(["@"])
    )]))
    .unwrap();
    assert_eq!(font.glyph_id_for_character("arrow"), Some(0));
    assert_eq!(font.glyph_id_for_character("a"), None);
}

#[test]
pub fn later_glyphs_win_collisions() {
    let font = font_from_json(json!([
        glyph_entry(json!({"type": "codePoint", "label": ["65"]}), json!(["@"])),
        glyph_entry(json!({"type": "codePoint", "label": ["0x41", "0x61"]}), json!(["@@"])),
    ]))
    .unwrap();
    assert_eq!(font.glyph_id_for_char_code(65), Some(1));
    assert_eq!(font.glyph_id_for_char_code(0x61), None);
}

#[test]
pub fn numeric_default_char() {
    let font = font_from_json(json!([
        {"type": "property", "key": "default-char", "val": "0x3f"},
        glyph_entry(json!({"type": "character", "label": "'?'"}), json!(["@"])),
        glyph_entry(json!({"type": "default"}), json!(["@@"])),
    ]))
    .unwrap();
    assert_eq!(font.glyph_id_for_character("Z"), Some(0));
}

#[test]
pub fn default_label_is_kept_without_default_char() {
    let font = font_from_json(json!([
        glyph_entry(json!({"type": "character", "label": "'?'"}), json!(["@"])),
        glyph_entry(json!({"type": "default"}), json!(["@@"])),
    ]))
    .unwrap();
    assert_eq!(font.glyph_id_for_character("Z"), Some(1));
}

#[test]
pub fn unresolvable_default_char_keeps_default_label() {
    let font = font_from_json(json!([
        {"type": "property", "key": "default-char", "val": "missing"},
        glyph_entry(json!({"type": "default"}), json!(["@@"])),
    ]))
    .unwrap();
    assert_eq!(font.glyph_id_for_char_code(7), Some(0));
}

#[test]
pub fn unparsable_label_keeps_other_glyphs() {
    let font = font_from_json(json!([
        glyph_entry(json!({"type": "character", "label": "'A'"}), json!(["@"])),
        glyph_entry(json!({"type": "codePoint", "label": ["twelve"]}), json!(["@"])),
        glyph_entry(json!({"type": "character"}), json!(["@"])),
        glyph_entry(json!({"type": "character", "label": "'B'"}), json!(["@"])),
    ]))
    .unwrap();
    assert_eq!(font.glyph_count(), 2);
    assert!(font.glyph_for_char('A').is_some());
    assert!(font.glyph_for_char('B').is_some());
}

#[test]
pub fn property_coercion() {
    let font = font_from_json(json!([{"type": "property", "key": "dpi", "val": "96"}])).unwrap();
    assert_eq!(font.properties().dpi, Some(Dpi::Number(96.0)));

    match font_from_json(json!([{"type": "property", "key": "spacing", "val": "cursive"}])) {
        Err(FontLoadingError::Validation { location, .. }) => {
            assert_eq!(location, "property spacing")
        }
        other => panic!("expected a validation error, got {:?}", other.map(|font| font.full_name())),
    }
}

#[test]
pub fn font_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Font>();
}

#[test]
pub fn compile_glyph_from_public_raster() {
    let source = GlyphSource {
        labels: vec![Label::Tag("box".to_owned())],
        ink: Ink::Raster(RasterInk::transparent(3, 2)),
        props: GlyphProperties::default(),
    };
    let glyph = Glyph::compile(source, 1);
    assert_eq!(glyph.image.size, Vector2I::new(3, 2));
    assert_eq!(glyph.raster_size(), Vector2I::new(3, 2));
    assert!(glyph.image.is_transparent());
}
