//! Tests for configuration sheet decoding: title, top links and table data.
#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

mod common;
mod fixtures;

use common::layout_of;
use fixtures::SheetBuilder;
use sheetnav::grid::Grid;
use sheetnav::remote::extract_button_layout;
use sheetnav::sheet::{decode_sheet, LinkEntry};

#[test]
fn test_full_layout() {
    let layout = layout_of(fixtures::sample_layout());

    assert_eq!(layout.title.as_deref(), Some("Speedrun Boards"));
    assert_eq!(
        layout.external_links,
        [LinkEntry {
            label: "Rules".into(),
            link: "https://example.com/rules".into(),
            text_color: Some("black".into()),
            background_color: Some("yellow".into()),
        }]
    );
    assert_eq!(layout.table_data.header().unwrap(), fixtures::BUTTON_HEADER);
    assert_eq!(layout.table_data.height(), 6);
}

#[test]
fn test_column_a_is_never_decoded() {
    let layout = layout_of(
        SheetBuilder::new()
            .cell("A2", "not a title")
            .cell("A3", r#"{"label":"hidden","link":"x"}"#)
            .cell("A4", "row label")
            .table_row(0, &["Name"]),
    );
    assert_eq!(layout.title.as_deref(), Some(""));
    assert!(layout.external_links.is_empty());
    assert_eq!(layout.table_data, fixtures::grid(&[["Name"]]));
}

#[test]
fn test_bad_link_cells_are_dropped() {
    let layout = layout_of(
        SheetBuilder::new()
            .title("T")
            .raw_link(0, "not json")
            .link(1, "Good", "https://good", "white", "blue")
            .raw_link(2, r#"{"label":"no link"}"#)
            .raw_link(3, r#"{"label":"Bare","link":"https://bare"}"#),
    );
    let labels: Vec<&str> = layout
        .external_links
        .iter()
        .map(|l| l.label.as_str())
        .collect();
    assert_eq!(labels, ["Good", "Bare"]);
    assert_eq!(layout.external_links[1].text_color, None);
    assert_eq!(layout.external_links[1].background_color, None);
}

#[test]
fn test_short_grids_yield_empty_regions() {
    let layout = decode_sheet(&fixtures::grid(&[["a"]]));
    assert_eq!(layout.title, None);
    assert!(layout.external_links.is_empty());
    assert!(layout.table_data.is_empty());

    let layout = layout_of(SheetBuilder::new().title("Only a title"));
    assert_eq!(layout.title.as_deref(), Some("Only a title"));
    assert!(layout.table_data.is_empty());
}

#[test]
fn test_table_data_is_rows_from_four_without_column_a() {
    let builder = SheetBuilder::new()
        .title("T")
        .table_row(0, &["Name", "Score"])
        .table_row(1, &["Alice", "10"])
        .cell("A5", "ignored");
    let cells = builder.clone().build();
    let grid = Grid::from_sparse(&cells).unwrap();
    let layout = decode_sheet(&grid);

    for (r, row) in layout.table_data.rows().iter().enumerate() {
        assert_eq!(row.as_slice(), &grid.rows()[r + 3][1..]);
    }
    assert_eq!(
        layout.table_data,
        fixtures::grid(&[["Name", "Score"], ["Alice", "10"]])
    );
}

#[test]
fn test_layout_from_response() {
    let response = fixtures::sample_layout().button_layout_response();
    let cells = extract_button_layout(response).unwrap();
    let layout = decode_sheet(&Grid::from_sparse(&cells).unwrap());
    let json = serde_json::to_value(&layout).unwrap();
    assert_eq!(json["title"], "Speedrun Boards");
    assert_eq!(json["externalLinks"][0]["colour"], "yellow");
    assert_eq!(json["tableData"][0][0], "Button ID");
}
