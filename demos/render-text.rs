// yaff-kit/demos/render-text.rs
//
// Copyright © 2018 The Pathfinder Project Developers.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Renders a line of text with a bitmap font and prints it to the terminal.

extern crate clap;
extern crate colored;
extern crate env_logger;
extern crate pathfinder_geometry;
extern crate yaff_kit;

use clap::{Arg, ArgAction, ArgMatches, Command};
use colored::Colorize;
use pathfinder_geometry::vector::Vector2I;
use std::process;
use yaff_kit::canvas::{Canvas, ColorU, Format};
use yaff_kit::font::Font;
use yaff_kit::parse_tree::PreParsed;

static DEFAULT_FONT_PATH: &str = "resources/tests/fixed-4x6.json";

fn get_args() -> ArgMatches {
    let font_arg = Arg::new("FONT")
        .help("Path to a parsed font source, as JSON")
        .default_value(DEFAULT_FONT_PATH)
        .index(1);
    let text_arg = Arg::new("TEXT")
        .help("Text to render")
        .default_value("ABC")
        .index(2);
    let spacing_arg = Arg::new("spacing")
        .help("Extra pixels between glyphs")
        .short('s')
        .long("spacing")
        .value_parser(clap::value_parser!(i32))
        .default_value("0");
    let codes_arg = Arg::new("codes")
        .help("Treat TEXT as comma-separated character codes")
        .short('c')
        .long("codes")
        .action(ArgAction::SetTrue);
    let alpha_arg = Arg::new("alpha")
        .help("Render into an alpha-only canvas")
        .short('a')
        .long("alpha")
        .action(ArgAction::SetTrue);
    Command::new("render-text")
        .version("0.1")
        .author("The Pathfinder Project Developers")
        .about("Simple example tool to render text with `yaff-kit`")
        .arg(font_arg)
        .arg(text_arg)
        .arg(spacing_arg)
        .arg(codes_arg)
        .arg(alpha_arg)
        .get_matches()
}

fn main() {
    env_logger::init();
    let matches = get_args();

    let path = matches.get_one::<String>("FONT").unwrap();
    let text = matches.get_one::<String>("TEXT").unwrap();
    let spacing = *matches.get_one::<i32>("spacing").unwrap();
    let format = if matches.get_flag("alpha") {
        Format::A8
    } else {
        Format::Rgba32
    };

    let font = match Font::from_path(path, &PreParsed) {
        Ok(font) => font.with_character_spacing(spacing),
        Err(error) => {
            eprintln!("{}: {}", path, error);
            process::exit(1);
        }
    };

    let mut canvas = Canvas::new(Vector2I::zero(), format);
    let bounds = if matches.get_flag("codes") {
        let codes: Vec<u32> = text
            .split(',')
            .filter_map(|code| yaff_kit::label::parse_code_point(code.trim()))
            .collect();
        font.fill_text(&codes[..], ColorU::white(), &mut canvas)
    } else {
        font.fill_text(text, ColorU::white(), &mut canvas)
    };

    println!(
        "{} ({}x{}, baseline {}):",
        font.full_name().bold(),
        bounds.width,
        bounds.height,
        bounds.baseline
    );
    for y in 0..bounds.height {
        let mut line = String::new();
        for x in 0..bounds.width {
            let alpha = canvas.pixel(Vector2I::new(x, y)).map_or(0, |pixel| pixel.a);
            let shade = shade(alpha);
            line.push(shade);
            line.push(shade);
        }
        if y + 1 == bounds.baseline {
            println!("{}", line.underline());
        } else {
            println!("{}", line);
        }
    }
}

fn shade(value: u8) -> char {
    match value {
        0 => ' ',
        1..=84 => '░',
        85..=169 => '▒',
        170..=254 => '▓',
        _ => '█',
    }
}
