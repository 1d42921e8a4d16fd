//! Multi-level button navigation.
//!
//! [`NavigationController`] walks a [`ButtonForest`] as the user drills into
//! it. Each rendered level is a container created through a
//! [`NavigationSurface`] and kept in a registry ordered by level:
//!
//! - clicking a button at level `L` discards every container deeper than `L`
//! - exactly one button per level is marked selected
//! - a button with children renders them as level `L + 1`; a leaf whose
//!   action is "load data" asks the host to load its data key
//!
//! The controller never touches a concrete UI; the page layer implements
//! [`NavigationSurface`] over DOM nodes and tests implement it over a log.

use crate::buttons::{ButtonDef, ButtonForest};
use crate::error::{Result, SheetNavError};

/// Level of the root buttons.
pub const ROOT_LEVEL: usize = 0;

/// Rendering collaborator for navigation levels.
pub trait NavigationSurface {
    /// Handle to one rendered level container.
    type Handle;

    /// Create a fresh container for `level` holding one button per entry of
    /// `buttons`, none of them selected.
    fn render_level(&mut self, level: usize, buttons: &[ButtonDef]) -> Result<Self::Handle>;

    /// Remove a container created by [`render_level`](Self::render_level).
    fn discard_level(&mut self, handle: Self::Handle);

    /// Clear the selected marker from every button in the container, then
    /// mark the button at `index`.
    fn mark_selected(&mut self, handle: &Self::Handle, index: usize);
}

/// What a click resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClickOutcome {
    /// Children were rendered as a new level.
    Expanded { level: usize, buttons: usize },
    /// Leaf button asking for the sheet named by this data key.
    LoadData(String),
    /// Leaf button with an unrecognised action.
    NoAction,
}

/// Observable navigation state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationState {
    /// Nothing rendered.
    Idle,
    /// `level` is the deepest rendered level; `selected` is the button ID
    /// selected there, if any.
    LevelRendered {
        level: usize,
        selected: Option<String>,
    },
}

struct RenderedLevel<H> {
    level: usize,
    buttons: Vec<ButtonDef>,
    selected: Option<usize>,
    handle: H,
}

/// Drives level rendering, selection and invalidation over a surface.
pub struct NavigationController<S: NavigationSurface> {
    forest: ButtonForest,
    surface: S,
    levels: Vec<RenderedLevel<S::Handle>>,
}

impl<S: NavigationSurface> NavigationController<S> {
    pub fn new(forest: ButtonForest, surface: S) -> Self {
        Self {
            forest,
            surface,
            levels: Vec::new(),
        }
    }

    pub fn forest(&self) -> &ButtonForest {
        &self.forest
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Discard everything and render the root buttons as level 0.
    pub fn render_root(&mut self) -> Result<()> {
        self.discard_deeper_than(None);
        let roots = self.forest.root_buttons.clone();
        self.render_level(ROOT_LEVEL, roots)
    }

    /// Discard every rendered level. Back to [`NavigationState::Idle`].
    pub fn reset(&mut self) {
        self.discard_deeper_than(None);
    }

    /// Click the first button with `button_id` at `level`.
    pub fn click(&mut self, level: usize, button_id: &str) -> Result<ClickOutcome> {
        let index = self
            .level_at(level)?
            .buttons
            .iter()
            .position(|b| b.button_id == button_id)
            .ok_or_else(|| SheetNavError::UnknownButton {
                level,
                button_id: button_id.to_string(),
            })?;
        self.click_index(level, index)
    }

    /// Click the button at position `index` within `level`.
    pub fn click_index(&mut self, level: usize, index: usize) -> Result<ClickOutcome> {
        let button = self
            .level_at(level)?
            .buttons
            .get(index)
            .cloned()
            .ok_or_else(|| SheetNavError::UnknownButton {
                level,
                button_id: format!("#{index}"),
            })?;

        // For a root click this clears every child level.
        self.discard_deeper_than(Some(level));

        if let Some(rendered) = self.levels.iter_mut().find(|l| l.level == level) {
            rendered.selected = Some(index);
            self.surface.mark_selected(&rendered.handle, index);
        }

        let children = self.forest.children_of(&button.button_id).to_vec();
        if !children.is_empty() {
            let count = children.len();
            self.render_level(level + 1, children)?;
            return Ok(ClickOutcome::Expanded {
                level: level + 1,
                buttons: count,
            });
        }

        if button.is_load_data() {
            return Ok(ClickOutcome::LoadData(button.data));
        }

        log::info!(
            "No recognized action for {}: {}",
            button.button_label,
            button.action
        );
        Ok(ClickOutcome::NoAction)
    }

    pub fn state(&self) -> NavigationState {
        match self.levels.last() {
            None => NavigationState::Idle,
            Some(deepest) => NavigationState::LevelRendered {
                level: deepest.level,
                selected: deepest
                    .selected
                    .and_then(|i| deepest.buttons.get(i))
                    .map(|b| b.button_id.clone()),
            },
        }
    }

    /// Selected buttons from the root down, stopping at the first level
    /// without a selection.
    pub fn selected_path(&self) -> Vec<&ButtonDef> {
        self.levels
            .iter()
            .map_while(|l| l.selected.and_then(|i| l.buttons.get(i)))
            .collect()
    }

    /// Number of rendered level containers.
    pub fn rendered_levels(&self) -> usize {
        self.levels.len()
    }

    /// Buttons rendered at `level`, if that level exists.
    pub fn buttons_at(&self, level: usize) -> Option<&[ButtonDef]> {
        self.levels
            .iter()
            .find(|l| l.level == level)
            .map(|l| l.buttons.as_slice())
    }

    fn level_at(&self, level: usize) -> Result<&RenderedLevel<S::Handle>> {
        self.levels
            .iter()
            .find(|l| l.level == level)
            .ok_or_else(|| SheetNavError::MissingContainer(format!("navigation level {level}")))
    }

    fn render_level(&mut self, level: usize, buttons: Vec<ButtonDef>) -> Result<()> {
        // A fresh container replaces any container already at this level.
        self.discard_deeper_than(level.checked_sub(1));
        let handle = self.surface.render_level(level, &buttons)?;
        self.levels.push(RenderedLevel {
            level,
            buttons,
            selected: None,
            handle,
        });
        Ok(())
    }

    /// Discard containers whose level exceeds `level`; `None` discards all.
    fn discard_deeper_than(&mut self, level: Option<usize>) {
        let keep = self
            .levels
            .iter()
            .position(|l| level.map_or(true, |max| l.level > max))
            .unwrap_or(self.levels.len());
        for rendered in self.levels.drain(keep..).rev() {
            self.surface.discard_level(rendered.handle);
        }
    }
}
