//! Application state shared by the page's event handlers.
//!
//! Two slices are mutable for the page lifetime: the navigation levels and
//! the cached leaderboard grid. Each has exactly one update path here
//! ([`AppState::click_and_load`] / [`AppState::install_navigation`] and
//! [`AppState::store_leaderboard`]). Data loads are not sequenced: whichever
//! response resolves last is stored, even if it was requested first.

use crate::buttons::build_button_forest;
use crate::config::SheetNavConfig;
use crate::error::{Result, SheetNavError};
use crate::filter::LeaderboardCache;
use crate::grid::Grid;
use crate::navigation::{ClickOutcome, NavigationController, NavigationState, NavigationSurface};
use crate::remote::sheet_url;

/// Starts the data loads that leaf clicks ask for.
pub trait DatasetLoader {
    /// Begin loading the sheet named `data_key`. The pending state must be
    /// visible when this returns; the data itself may arrive later.
    fn begin_load(&mut self, data_key: &str);
}

pub struct AppState<S: NavigationSurface> {
    config: SheetNavConfig,
    navigation: Option<NavigationController<S>>,
    leaderboard: LeaderboardCache,
}

impl<S: NavigationSurface> AppState<S> {
    pub fn new(config: SheetNavConfig) -> Self {
        Self {
            config,
            navigation: None,
            leaderboard: LeaderboardCache::new(),
        }
    }

    pub fn config(&self) -> &SheetNavConfig {
        &self.config
    }

    /// Build the button forest from `table` and render its root level on the
    /// surface made by `attach`, replacing any previous navigation.
    ///
    /// The forest is built first: on a configuration error `attach` is never
    /// called, whatever is on screen stays, and the error is returned for the
    /// caller to log.
    pub fn install_navigation(
        &mut self,
        table: &Grid,
        attach: impl FnOnce() -> Result<S>,
    ) -> Result<()> {
        let forest = build_button_forest(table)?;
        if let Some(mut previous) = self.navigation.take() {
            previous.reset();
        }
        let mut navigation = NavigationController::new(forest, attach()?);
        navigation.render_root()?;
        self.navigation = Some(navigation);
        Ok(())
    }

    pub fn navigation(&self) -> Option<&NavigationController<S>> {
        self.navigation.as_ref()
    }

    pub fn navigation_state(&self) -> NavigationState {
        self.navigation
            .as_ref()
            .map_or(NavigationState::Idle, NavigationController::state)
    }

    /// Route a click on the `index`-th button of `level`.
    pub fn click(&mut self, level: usize, index: usize) -> Result<ClickOutcome> {
        let navigation = self
            .navigation
            .as_mut()
            .ok_or_else(|| SheetNavError::MissingContainer("navigation".to_string()))?;
        navigation.click_index(level, index)
    }

    /// Route a click and, when it lands on a "load data" leaf, start exactly
    /// one load of that button's data key.
    pub fn click_and_load<L: DatasetLoader>(
        &mut self,
        level: usize,
        index: usize,
        loader: &mut L,
    ) -> Result<ClickOutcome> {
        let outcome = self.click(level, index)?;
        if let ClickOutcome::LoadData(data_key) = &outcome {
            loader.begin_load(data_key);
        }
        Ok(outcome)
    }

    /// URL for loading `data_key` from the configured provider.
    pub fn data_url(&self, data_key: &str) -> String {
        sheet_url(self.config.base_url(), data_key)
    }

    /// Replace the cached leaderboard grid.
    pub fn store_leaderboard(&mut self, grid: Grid) {
        self.leaderboard.replace(grid);
    }

    pub fn leaderboard(&self) -> &LeaderboardCache {
        &self.leaderboard
    }

    /// Filter the cached leaderboard; `None` when nothing is loaded.
    pub fn filter(&self, keyword_string: &str) -> Option<Grid> {
        self.leaderboard.filter(keyword_string)
    }
}
