//! Common test utilities and assertion helpers.
//!
//! Provides a recording [`NavigationSurface`] so navigation can be driven and
//! inspected without a DOM, plus shortcuts from fixtures to decoded state.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::panic
)]

use std::collections::BTreeMap;

use sheetnav::app::{AppState, DatasetLoader};
use sheetnav::buttons::{build_button_forest, ButtonDef};
use sheetnav::config::SheetNavConfig;
use sheetnav::error::Result;
use sheetnav::grid::Grid;
use sheetnav::navigation::{NavigationController, NavigationSurface};
use sheetnav::sheet::{decode_sheet, SheetLayout};

// Re-export fixtures for convenience
pub use super::fixtures::*;

// ============================================================================
// Recording Surface
// ============================================================================

/// Everything the controller asked the surface to do, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceEvent {
    Rendered { level: usize, ids: Vec<String> },
    Discarded { level: usize },
    Selected { level: usize, index: usize },
}

/// [`NavigationSurface`] that keeps a log and a model of what is on screen.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub events: Vec<SurfaceEvent>,
    /// Button IDs of every visible level.
    pub visible: BTreeMap<usize, Vec<String>>,
    /// Selected index per visible level.
    pub selected: BTreeMap<usize, usize>,
}

impl RecordingSurface {
    /// Visible levels, shallowest first.
    pub fn levels(&self) -> Vec<usize> {
        self.visible.keys().copied().collect()
    }

    /// ID of the selected button at `level`.
    pub fn selected_id(&self, level: usize) -> Option<&str> {
        let index = *self.selected.get(&level)?;
        self.visible.get(&level)?.get(index).map(String::as_str)
    }

    pub fn discards(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, SurfaceEvent::Discarded { .. }))
            .count()
    }
}

impl NavigationSurface for RecordingSurface {
    type Handle = usize;

    fn render_level(&mut self, level: usize, buttons: &[ButtonDef]) -> Result<usize> {
        let ids: Vec<String> = buttons.iter().map(|b| b.button_id.clone()).collect();
        assert!(
            !self.visible.contains_key(&level),
            "level {level} rendered twice without a discard"
        );
        self.visible.insert(level, ids.clone());
        self.events.push(SurfaceEvent::Rendered { level, ids });
        Ok(level)
    }

    fn discard_level(&mut self, level: usize) {
        self.visible.remove(&level);
        self.selected.remove(&level);
        self.events.push(SurfaceEvent::Discarded { level });
    }

    fn mark_selected(&mut self, level: &usize, index: usize) {
        self.selected.insert(*level, index);
        self.events.push(SurfaceEvent::Selected {
            level: *level,
            index,
        });
    }
}

// ============================================================================
// Recording Loader
// ============================================================================

/// [`DatasetLoader`] that records every data key it was asked to load.
#[derive(Debug, Default)]
pub struct RecordingLoader {
    pub loads: Vec<String>,
}

impl DatasetLoader for RecordingLoader {
    fn begin_load(&mut self, data_key: &str) {
        self.loads.push(data_key.to_string());
    }
}

// ============================================================================
// Decoding Shortcuts
// ============================================================================

/// Decode a builder's cells as a configuration sheet.
pub fn layout_of(builder: SheetBuilder) -> SheetLayout {
    decode_sheet(&Grid::from_sparse(&builder.build()).expect("sheet should fit"))
}

/// Controller over the builder's button table with its root level rendered.
pub fn controller(builder: SheetBuilder) -> NavigationController<RecordingSurface> {
    let layout = layout_of(builder);
    let forest = build_button_forest(&layout.table_data).expect("button table should decode");
    let mut nav = NavigationController::new(forest, RecordingSurface::default());
    nav.render_root().expect("root level should render");
    nav
}

/// App state with the builder's buttons installed on a recording surface.
pub fn app_with(builder: SheetBuilder) -> AppState<RecordingSurface> {
    let layout = layout_of(builder);
    let mut app = AppState::new(SheetNavConfig::new("https://example.com/exec"));
    app.install_navigation(&layout.table_data, || Ok(RecordingSurface::default()))
        .expect("navigation should install");
    app
}
