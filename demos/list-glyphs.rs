// yaff-kit/demos/list-glyphs.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Lists all glyphs in a bitmap font.

extern crate clap;
extern crate env_logger;
extern crate prettytable;
extern crate yaff_kit;

use clap::{Arg, Command};
use prettytable::{Attr, Cell, Row, Table};
use std::process;
use yaff_kit::font::Font;
use yaff_kit::parse_tree::PreParsed;

fn main() {
    env_logger::init();
    let matches = Command::new("list-glyphs")
        .version("0.1")
        .author("The Pathfinder Project Developers")
        .about("Lists the glyphs of a font loaded with `yaff-kit`")
        .arg(
            Arg::new("FONT")
                .help("Path to a parsed font source, as JSON")
                .default_value("resources/tests/fixed-4x6.json")
                .index(1),
        )
        .get_matches();

    let path = matches.get_one::<String>("FONT").unwrap();
    let font = match Font::from_path(path, &PreParsed) {
        Ok(font) => font,
        Err(error) => {
            eprintln!("{}: {}", path, error);
            process::exit(1);
        }
    };

    let mut table = Table::new();
    table.set_format(*prettytable::format::consts::FORMAT_NO_BORDER_LINE_SEPARATOR);
    table.set_titles(Row::new(vec![
        Cell::new("ID").with_style(Attr::Bold),
        Cell::new("Labels").with_style(Attr::Bold),
        Cell::new("Raster").with_style(Attr::Bold),
        Cell::new("Left").with_style(Attr::Bold),
        Cell::new("Right").with_style(Attr::Bold),
        Cell::new("Shift Up").with_style(Attr::Bold),
        Cell::new("Default").with_style(Attr::Bold),
    ]));

    let default_glyph = font.glyph_map().default_glyph();
    for (glyph_id, glyph) in font.glyphs().iter().enumerate() {
        let labels: Vec<String> = glyph.labels.iter().map(|label| label.to_string()).collect();
        let raster = if glyph.blank {
            "-".to_owned()
        } else {
            format!("{}x{}", glyph.raster_width, glyph.raster_height)
        };
        let is_default = default_glyph == Some(glyph_id as u32);
        table.add_row(Row::new(vec![
            Cell::new(&glyph_id.to_string()),
            Cell::new(&labels.join(" ")),
            Cell::new(&raster),
            Cell::new(&glyph.left_bearing.to_string()),
            Cell::new(&glyph.right_bearing.to_string()),
            Cell::new(&glyph.shift_up.to_string()),
            Cell::new(if is_default { "*" } else { "" }),
        ]));
    }

    println!("{} ({} glyphs)", font.full_name(), font.glyph_count());
    table.printstd();
}
