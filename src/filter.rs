//! Keyword filtering over the cached leaderboard grid.
//!
//! Keywords come from a comma-separated string. A data row survives when any
//! of its cells contains any keyword, case-insensitively and as a plain
//! substring. The header row (row 0) always survives.

use crate::grid::Grid;

/// Split, trim and lower-case a comma-separated keyword string, dropping
/// empty tokens.
pub fn parse_keywords(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(|k| k.trim().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect()
}

/// Header row plus the data rows matching any keyword.
///
/// With no keywords the grid is returned unchanged.
pub fn filter_rows(grid: &Grid, keywords: &[String]) -> Grid {
    if keywords.is_empty() {
        return grid.clone();
    }
    let mut rows = grid.rows().iter();
    let mut filtered: Vec<Vec<String>> = rows.next().cloned().into_iter().collect();
    filtered.extend(rows.filter(|row| row_matches(row, keywords)).cloned());
    Grid::from_rows(filtered)
}

fn row_matches(row: &[String], keywords: &[String]) -> bool {
    row.iter().any(|cell| {
        let cell = cell.to_lowercase();
        keywords.iter().any(|kw| cell.contains(kw.as_str()))
    })
}

/// The most recently loaded dataset.
///
/// Replaced wholesale on every successful load and never edited in place, so
/// filtering always starts from the loaded data rather than a previous
/// filter's output.
#[derive(Debug, Default)]
pub struct LeaderboardCache {
    grid: Grid,
}

impl LeaderboardCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the cached grid. The last call wins.
    pub fn replace(&mut self, grid: Grid) {
        self.grid = grid;
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }

    /// Filter the cached grid by a comma-separated keyword string.
    ///
    /// Returns `None` (and logs a warning) when nothing has been loaded yet.
    pub fn filter(&self, keyword_string: &str) -> Option<Grid> {
        if self.grid.is_empty() {
            log::warn!("No leaderboard data available to filter.");
            return None;
        }
        let keywords = parse_keywords(keyword_string);
        let filtered = filter_rows(&self.grid, &keywords);
        log::debug!(
            "filter {:?}: {} of {} data rows",
            keywords,
            filtered.height().saturating_sub(1),
            self.grid.height().saturating_sub(1)
        );
        Some(filtered)
    }
}
