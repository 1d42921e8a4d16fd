//! `SheetNav` - the WASM-exported entry point for the page.
//!
//! Wires the DOM to [`AppState`]:
//! - fetches the button configuration and renders title, links and buttons
//! - turns button clicks into navigation updates and data loads
//! - renders loaded sheets as the ranked table and filters them on demand
//!
//! ```javascript
//! import init, { SheetNav } from 'sheetnav';
//! await init();
//! const nav = new SheetNav({ baseURL: "https://example.com/exec", defaultLeaderboard: "overall" });
//! await nav.start();
//! input.addEventListener("input", () => nav.filter(input.value));
//! ```

mod dom;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::{future_to_promise, spawn_local};
use web_sys::Document;

use crate::app::{AppState, DatasetLoader};
use crate::config::{SheetNavConfig, META_BASE_URL, META_DEFAULT_DATASET, META_LOG_LEVEL};
use crate::grid::Grid;
use crate::logging;
use crate::remote;
use crate::sheet::decode_sheet;
use crate::table::{TablePlaceholder, TableView};

use dom::{ClickHandler, DomSurface};

type SharedState = Rc<RefCell<AppState<DomSurface>>>;

fn document() -> Result<Document, JsValue> {
    web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document available"))
}

fn meta_content(document: &Document, name: &str) -> Option<String> {
    let meta = document
        .query_selector(&format!("meta[name=\"{name}\"]"))
        .ok()
        .flatten()?;
    let value = meta.get_attribute("content")?;
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn config_from_meta(document: &Document) -> Result<SheetNavConfig, JsValue> {
    let base_url = meta_content(document, META_BASE_URL).ok_or_else(|| {
        JsValue::from_str(&format!("no configuration given and no {META_BASE_URL} meta tag"))
    })?;
    Ok(SheetNavConfig {
        base_url,
        default_dataset: meta_content(document, META_DEFAULT_DATASET),
        log_level: meta_content(document, META_LOG_LEVEL),
    })
}

/// Page controller exported to JavaScript.
#[wasm_bindgen]
pub struct SheetNav {
    state: SharedState,
    document: Document,
}

#[wasm_bindgen]
impl SheetNav {
    /// Create a controller from a configuration object, or from the page's
    /// `sheetnav-*` meta tags when `config` is `undefined`/`null`.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<SheetNav, JsValue> {
        console_error_panic_hook::set_once();

        let document = document()?;
        let config: SheetNavConfig = if config.is_undefined() || config.is_null() {
            config_from_meta(&document)?
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsValue::from_str(&format!("Invalid configuration: {e}")))?
        };
        config.validate()?;
        logging::init(config.log_level());

        Ok(SheetNav {
            state: Rc::new(RefCell::new(AppState::new(config))),
            document,
        })
    }

    /// Fetch the button configuration, render the page chrome and buttons,
    /// then load the default dataset if one is configured.
    ///
    /// The returned promise always resolves; failures are logged.
    #[wasm_bindgen]
    pub fn start(&self) -> js_sys::Promise {
        let state = Rc::clone(&self.state);
        let document = self.document.clone();
        future_to_promise(async move {
            start_page(state, document).await;
            Ok(JsValue::UNDEFINED)
        })
    }

    /// Load the sheet named `data_key` into the table.
    #[wasm_bindgen]
    pub fn load_dataset(&self, data_key: &str) {
        PageLoader::new(&self.state, &self.document).begin_load(data_key);
    }

    /// Show only the rows of the loaded sheet matching any of the
    /// comma-separated keywords. Blank input shows the whole sheet.
    #[wasm_bindgen]
    pub fn filter(&self, keywords: &str) {
        let Some(filtered) = self.state.borrow().filter(keywords) else {
            return;
        };
        if let Err(e) = dom::render_table(&self.document, &TableView::from_grid(&filtered)) {
            log::error!("{e}");
        }
    }

    /// The loaded sheet as an array of rows.
    #[wasm_bindgen]
    pub fn leaderboard(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(self.state.borrow().leaderboard().grid())
            .map_err(|e| JsValue::from_str(&format!("Serialization error: {e}")))
    }

    /// IDs of the selected buttons from the root down.
    #[wasm_bindgen]
    pub fn selected_path(&self) -> Vec<String> {
        self.state
            .borrow()
            .navigation()
            .map(|nav| {
                nav.selected_path()
                    .into_iter()
                    .map(|b| b.button_id.clone())
                    .collect()
            })
            .unwrap_or_default()
    }
}

async fn start_page(state: SharedState, document: Document) {
    let base_url = state.borrow().config().base_url().to_string();
    let cells = match remote::fetch_button_layout(&base_url).await {
        Ok(cells) => cells,
        Err(e) => {
            log::error!("Error fetching button configuration: {e}");
            return;
        }
    };

    let grid = match Grid::from_sparse(&cells) {
        Ok(grid) => grid,
        Err(e) => {
            log::error!("Error decoding button configuration: {e}");
            return;
        }
    };
    let layout = decode_sheet(&grid);
    if let Some(title) = &layout.title {
        dom::update_page_title(&document, title);
    }
    if let Err(e) = dom::update_top_links(&document, &layout.external_links) {
        log::error!("{e}");
    }
    install_navigation(&state, &document, &layout.table_data);

    let default_dataset = state
        .borrow()
        .config()
        .default_dataset()
        .map(str::to_string);
    if let Some(data_key) = default_dataset {
        PageLoader::new(&state, &document).begin_load(&data_key);
    }
}

fn install_navigation(state: &SharedState, document: &Document, table: &Grid) {
    let weak = Rc::downgrade(state);
    let click_document = document.clone();
    let on_click: ClickHandler = Rc::new(move |level: usize, index: usize| {
        if let Some(state) = weak.upgrade() {
            handle_click(&state, &click_document, level, index);
        }
    });

    let attach = || DomSurface::attach(document.clone(), on_click);
    if let Err(e) = state.borrow_mut().install_navigation(table, attach) {
        log::error!("{e}");
    }
}

fn handle_click(state: &SharedState, document: &Document, level: usize, index: usize) {
    let mut loader = PageLoader::new(state, document);
    if let Err(e) = state.borrow_mut().click_and_load(level, index, &mut loader) {
        log::error!("{e}");
    }
}

/// Loads sheets into the page table.
///
/// Loads are not sequenced: when several are in flight, the one that
/// resolves last owns the table and the cached grid.
struct PageLoader {
    state: SharedState,
    document: Document,
    base_url: String,
}

impl PageLoader {
    /// Reads the base URL up front so `begin_load` never borrows the state
    /// while a click is still holding it.
    fn new(state: &SharedState, document: &Document) -> Self {
        Self {
            state: Rc::clone(state),
            document: document.clone(),
            base_url: state.borrow().config().base_url().to_string(),
        }
    }
}

impl DatasetLoader for PageLoader {
    /// Show the loading placeholder now, then fetch in the background.
    fn begin_load(&mut self, data_key: &str) {
        if let Err(e) = dom::show_placeholder(&self.document, &TablePlaceholder::Loading) {
            log::error!("{e}");
        }

        let state = Rc::clone(&self.state);
        let document = self.document.clone();
        let base_url = self.base_url.clone();
        let data_key = data_key.to_string();
        spawn_local(async move {
            match remote::fetch_sheet(&base_url, &data_key).await {
                Ok(grid) => {
                    let view = TableView::from_grid(&grid);
                    state.borrow_mut().store_leaderboard(grid);
                    if let Err(e) = dom::render_table(&document, &view) {
                        log::error!("{e}");
                    }
                }
                Err(e) => {
                    log::error!("Error loading {data_key:?}: {e}");
                    let placeholder = TablePlaceholder::Error(e.to_string());
                    if let Err(e) = dom::show_placeholder(&document, &placeholder) {
                        log::error!("{e}");
                    }
                }
            }
        });
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::buttons::{ButtonDef, ButtonForest};
    use crate::navigation::NavigationController;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn fresh_document() -> Document {
        let document = document().unwrap();
        let body = document.body().unwrap();
        body.set_inner_html(
            r#"<h1 class="page-title"></h1><div class="top-links"></div><table></table>"#,
        );
        document
    }

    fn def(id: &str, parent: &str, data: &str) -> ButtonDef {
        ButtonDef {
            button_id: id.into(),
            parent_id: parent.into(),
            button_label: format!("Button {id}"),
            data: data.into(),
            action: "load data".into(),
        }
    }

    #[wasm_bindgen_test]
    fn test_surface_levels_and_selection() {
        let document = fresh_document();
        let surface = DomSurface::attach(document.clone(), Rc::new(|_: usize, _: usize| {})).unwrap();
        let mut forest = ButtonForest::default();
        forest.root_buttons = vec![def("1", "ROOT", ""), def("2", "ROOT", "d2")];
        forest
            .child_buttons_by_parent
            .insert("1".into(), vec![def("11", "1", "d11")]);

        let mut nav = NavigationController::new(forest, surface);
        nav.render_root().unwrap();
        let roots = document.query_selector_all(".leaderboard-buttons button").unwrap();
        assert_eq!(roots.length(), 2);

        nav.click(0, "1").unwrap();
        assert_eq!(document.query_selector_all("[data-level]").unwrap().length(), 1);
        assert_eq!(document.query_selector_all("button.selected").unwrap().length(), 1);

        nav.click(0, "2").unwrap();
        assert_eq!(document.query_selector_all("[data-level]").unwrap().length(), 0);
        let selected = document.query_selector("button.selected").unwrap().unwrap();
        assert_eq!(selected.get_attribute("data-button-id").as_deref(), Some("2"));
    }

    #[wasm_bindgen_test]
    fn test_table_rendering() {
        let document = fresh_document();
        let grid = Grid::from_strs(&[["Name", "Video"], ["Alice", "https://v/1"]]);
        dom::render_table(&document, &TableView::from_grid(&grid)).unwrap();
        let headers = document.query_selector_all("th").unwrap();
        assert_eq!(headers.length(), 3);
        let anchor = document.query_selector("td a").unwrap().unwrap();
        assert_eq!(anchor.text_content().as_deref(), Some("Link"));
        assert_eq!(anchor.get_attribute("title").as_deref(), Some("https://v/1"));
    }

    fn shared_state() -> SharedState {
        Rc::new(RefCell::new(AppState::new(SheetNavConfig::new(
            "https://example.invalid/exec",
        ))))
    }

    fn button_table() -> Grid {
        Grid::from_strs(&[
            ["Button ID", "Parent ID", "Button Label", "Data", "Action"],
            ["1", "ROOT", "Overall", "overall", "load data"],
        ])
    }

    #[wasm_bindgen_test]
    fn test_leaf_click_shows_loading_before_fetch() {
        let document = fresh_document();
        let state = shared_state();
        install_navigation(&state, &document, &button_table());

        handle_click(&state, &document, 0, 0);
        let td = document.query_selector("td").unwrap().unwrap();
        assert_eq!(td.text_content().as_deref(), Some("Loading data..."));
        let selected = document.query_selector("button.selected").unwrap().unwrap();
        assert_eq!(selected.get_attribute("data-button-id").as_deref(), Some("1"));
    }

    #[wasm_bindgen_test]
    fn test_bad_configuration_keeps_existing_buttons() {
        let document = fresh_document();
        let state = shared_state();
        install_navigation(&state, &document, &button_table());

        install_navigation(&state, &document, &Grid::from_strs(&[["Button ID"], ["1"]]));
        let buttons = document.query_selector_all(".leaderboard-buttons button").unwrap();
        assert_eq!(buttons.length(), 1);
        assert!(state.borrow().navigation().is_some());
    }

    #[wasm_bindgen_test]
    fn test_placeholder_and_missing_table() {
        let document = fresh_document();
        dom::show_placeholder(&document, &TablePlaceholder::Loading).unwrap();
        let td = document.query_selector("td").unwrap().unwrap();
        assert_eq!(td.get_attribute("colspan").as_deref(), Some("100"));

        document.body().unwrap().set_inner_html("");
        assert!(dom::show_placeholder(&document, &TablePlaceholder::Loading).is_err());
        assert!(dom::update_top_links(&document, &[]).is_err());
    }
}
