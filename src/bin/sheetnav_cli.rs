//! CLI tool for sheetnav - decodes saved provider responses and outputs JSON
//!
//! Usage:
//!   sheetnav_cli <response.json>                # Layout and button tree to stdout
//!   sheetnav_cli <response.json> --sheet        # First sheet as a dense grid
//!   sheetnav_cli <response.json> -o out.json    # Write to file

#![allow(clippy::exit)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::indexing_slicing)]

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::io::{self, Write};

use serde::Serialize;
use sheetnav::buttons::{build_button_forest, ButtonDef};
use sheetnav::grid::Grid;
use sheetnav::remote::{decode_data_response, extract_button_layout};
use sheetnav::sheet::{decode_sheet, LinkEntry};

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Summary {
    title: Option<String>,
    external_links: Vec<LinkEntry>,
    root_buttons: Vec<ButtonDef>,
    child_buttons_by_parent: BTreeMap<String, Vec<ButtonDef>>,
}

fn fail(message: &str) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}

fn main() {
    sheetnav::logging::init(log::LevelFilter::Warn);

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        fail("Usage: sheetnav_cli <response.json> [--sheet] [-o output.json]");
    }

    let input_path = &args[1];
    let sheet_mode = args.iter().skip(2).any(|a| a == "--sheet");
    let output_path = args
        .iter()
        .position(|a| a == "-o")
        .and_then(|i| args.get(i + 1));

    // Read input file
    let text = match fs::read_to_string(input_path) {
        Ok(t) => t,
        Err(e) => fail(&format!("Error reading {input_path}: {e}")),
    };
    let response: serde_json::Value = match serde_json::from_str(&text) {
        Ok(v) => v,
        Err(e) => fail(&format!("Error parsing JSON: {e}")),
    };

    let json = if sheet_mode {
        let grid = match decode_data_response(response) {
            Ok(g) => g,
            Err(e) => fail(&format!("Error decoding sheet: {e}")),
        };
        serde_json::to_string_pretty(&grid)
    } else {
        let cells = match extract_button_layout(response) {
            Ok(c) => c,
            Err(e) => fail(&format!("Error decoding configuration: {e}")),
        };
        let grid = match Grid::from_sparse(&cells) {
            Ok(g) => g,
            Err(e) => fail(&format!("Error decoding configuration: {e}")),
        };
        let layout = decode_sheet(&grid);
        let forest = match build_button_forest(&layout.table_data) {
            Ok(f) => f,
            Err(e) => fail(&format!("Error building buttons: {e}")),
        };
        serde_json::to_string_pretty(&Summary {
            title: layout.title,
            external_links: layout.external_links,
            root_buttons: forest.root_buttons,
            child_buttons_by_parent: forest.child_buttons_by_parent,
        })
    };
    let json = match json {
        Ok(j) => j,
        Err(e) => fail(&format!("Error serializing JSON: {e}")),
    };

    // Output
    match output_path {
        Some(path) => {
            if let Err(e) = fs::write(path, &json) {
                fail(&format!("Error writing {path}: {e}"));
            }
            eprintln!("Written: {path}");
        }
        None => {
            io::stdout().write_all(json.as_bytes()).unwrap();
            println!();
        }
    }
}
