//! Button hierarchy built from the configuration sheet's table region.
//!
//! The table's first row names its columns; the five required columns may
//! appear in any order and other columns are ignored.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{Result, SheetNavError};
use crate::grid::Grid;

pub const HEADER_BUTTON_ID: &str = "Button ID";
pub const HEADER_PARENT_ID: &str = "Parent ID";
pub const HEADER_BUTTON_LABEL: &str = "Button Label";
pub const HEADER_DATA: &str = "Data";
pub const HEADER_ACTION: &str = "Action";

/// Parent ID marking a top-level button (compared case-insensitively).
pub const ROOT_PARENT: &str = "ROOT";
/// Action that loads the sheet named by the button's data (case-insensitive).
pub const ACTION_LOAD_DATA: &str = "load data";

/// One configured button. All fields are trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonDef {
    #[serde(rename = "buttonID")]
    pub button_id: String,
    #[serde(rename = "parentID")]
    pub parent_id: String,
    pub button_label: String,
    pub data: String,
    pub action: String,
}

impl ButtonDef {
    pub fn is_root(&self) -> bool {
        self.parent_id.eq_ignore_ascii_case(ROOT_PARENT)
    }

    pub fn is_load_data(&self) -> bool {
        self.action.to_lowercase() == ACTION_LOAD_DATA
    }
}

/// Root buttons plus children grouped by parent ID, both in sheet order.
///
/// A parent ID that names no existing button leaves its bucket unreachable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ButtonForest {
    pub root_buttons: Vec<ButtonDef>,
    pub child_buttons_by_parent: BTreeMap<String, Vec<ButtonDef>>,
}

impl ButtonForest {
    /// Children of `button_id`, empty when it has none.
    pub fn children_of(&self, button_id: &str) -> &[ButtonDef] {
        self.child_buttons_by_parent
            .get(button_id)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Total number of buttons, reachable or not.
    pub fn len(&self) -> usize {
        self.root_buttons.len()
            + self
                .child_buttons_by_parent
                .values()
                .map(Vec::len)
                .sum::<usize>()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Column positions of the required headers.
struct HeaderIndex {
    button_id: usize,
    parent_id: usize,
    button_label: usize,
    data: usize,
    action: usize,
}

impl HeaderIndex {
    fn resolve(header: &[String]) -> Result<Self> {
        let find = |name: &str| header.iter().position(|h| h == name);
        let found = [
            (HEADER_BUTTON_ID, find(HEADER_BUTTON_ID)),
            (HEADER_PARENT_ID, find(HEADER_PARENT_ID)),
            (HEADER_BUTTON_LABEL, find(HEADER_BUTTON_LABEL)),
            (HEADER_DATA, find(HEADER_DATA)),
            (HEADER_ACTION, find(HEADER_ACTION)),
        ];

        match found {
            [(_, Some(button_id)), (_, Some(parent_id)), (_, Some(button_label)), (_, Some(data)), (_, Some(action))] => {
                Ok(Self {
                    button_id,
                    parent_id,
                    button_label,
                    data,
                    action,
                })
            }
            _ => Err(SheetNavError::MissingHeaders(
                found
                    .iter()
                    .filter(|(_, idx)| idx.is_none())
                    .map(|(name, _)| *name)
                    .collect(),
            )),
        }
    }

    fn button(&self, row: &[String]) -> Option<ButtonDef> {
        let field = |idx: usize| row.get(idx).map(|s| s.trim().to_string());
        Some(ButtonDef {
            button_id: field(self.button_id)?,
            parent_id: field(self.parent_id)?,
            button_label: field(self.button_label)?,
            data: field(self.data)?,
            action: field(self.action)?,
        })
    }
}

/// Build the button forest from table data whose first row is the header.
///
/// Fails with a configuration error when there is no button row or a
/// required header is absent. Rows shorter than the header are skipped.
pub fn build_button_forest(table: &Grid) -> Result<ButtonForest> {
    let header = match table.header() {
        Some(header) if table.height() >= 2 => header,
        _ => return Err(SheetNavError::NoButtonData),
    };
    let index = HeaderIndex::resolve(header)?;

    let mut forest = ButtonForest::default();
    for (i, row) in table.rows().iter().enumerate().skip(1) {
        if row.len() < header.len() {
            log::debug!("skipping short button row {i}");
            continue;
        }
        let Some(button) = index.button(row) else {
            continue;
        };
        if button.is_root() {
            forest.root_buttons.push(button);
        } else {
            forest
                .child_buttons_by_parent
                .entry(button.parent_id.clone())
                .or_default()
                .push(button);
        }
    }

    log::info!(
        "built button forest: {} root buttons, {} buttons total",
        forest.root_buttons.len(),
        forest.len()
    );
    Ok(forest)
}
