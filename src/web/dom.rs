//! DOM rendering for the page: title, top links, navigation levels and the
//! ranked table.
//!
//! Expected page skeleton (missing pieces noted per function):
//!
//! ```html
//! <h1 class="page-title"></h1>
//! <div class="top-links"></div>
//! <div class="leaderboard-buttons"></div>
//! <table></table>
//! ```

use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, Element, HtmlAnchorElement, HtmlElement, MouseEvent};

use crate::buttons::ButtonDef;
use crate::error::{Result, SheetNavError};
use crate::navigation::{NavigationSurface, ROOT_LEVEL};
use crate::sheet::LinkEntry;
use crate::table::{TableCell, TablePlaceholder, TableView, PLACEHOLDER_COLSPAN};

pub(crate) const TITLE_SELECTOR: &str = "h1.page-title";
pub(crate) const TOP_LINKS_SELECTOR: &str = ".top-links";
pub(crate) const ROOT_CONTAINER_CLASS: &str = "leaderboard-buttons";
pub(crate) const CHILD_CONTAINER_ID: &str = "child-button-container";
pub(crate) const TABLE_SELECTOR: &str = "table";
const SELECTED_CLASS: &str = "selected";

/// Called with `(level, index)` when a navigation button is clicked.
pub(crate) type ClickHandler = Rc<dyn Fn(usize, usize)>;

fn render_err(err: JsValue) -> SheetNavError {
    SheetNavError::Render(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}

fn query(document: &Document, selector: &str) -> Option<Element> {
    document.query_selector(selector).ok().flatten()
}

fn create(document: &Document, tag: &str) -> Result<Element> {
    document.create_element(tag).map_err(render_err)
}

fn append(parent: &Element, child: &Element) -> Result<()> {
    parent.append_child(child).map(|_| ()).map_err(render_err)
}

/// Set the page heading text. Pages without a heading are left alone.
pub(crate) fn update_page_title(document: &Document, title: &str) {
    if let Some(heading) = query(document, TITLE_SELECTOR) {
        heading.set_text_content(Some(title));
    }
}

/// Replace the top-links region with one anchor per link.
pub(crate) fn update_top_links(document: &Document, links: &[LinkEntry]) -> Result<()> {
    let container = query(document, TOP_LINKS_SELECTOR)
        .ok_or_else(|| SheetNavError::MissingContainer(TOP_LINKS_SELECTOR.to_string()))?;
    container.set_inner_html("");

    for link in links {
        let anchor: HtmlAnchorElement = create(document, "a")?
            .dyn_into()
            .map_err(|_| SheetNavError::Render("<a> is not an anchor".to_string()))?;
        anchor.set_text_content(Some(&link.label));
        anchor.set_href(&link.link);
        let style = anchor.style();
        if let Some(colour) = &link.background_color {
            let _ = style.set_property("background-color", colour);
        }
        if let Some(text) = &link.text_color {
            let _ = style.set_property("color", text);
        }
        append(&container, &anchor)?;
    }
    Ok(())
}

/// Existing root button container, or a new one appended to `<body>`.
pub(crate) fn root_container(document: &Document) -> Result<Element> {
    if let Some(existing) = query(document, &format!(".{ROOT_CONTAINER_CLASS}")) {
        return Ok(existing);
    }
    let container = create(document, "div")?;
    container.set_class_name(ROOT_CONTAINER_CLASS);
    let body = document
        .body()
        .ok_or_else(|| SheetNavError::MissingContainer("body".to_string()))?;
    body.append_child(&container).map_err(render_err)?;
    Ok(container)
}

/// Existing child menu container, or a new one placed right after `root`.
pub(crate) fn child_container(document: &Document, root: &Element) -> Result<Element> {
    if let Some(existing) = document.get_element_by_id(CHILD_CONTAINER_ID) {
        return Ok(existing);
    }
    let container = create(document, "div")?;
    container.set_id(CHILD_CONTAINER_ID);
    if let Some(html) = container.dyn_ref::<HtmlElement>() {
        let _ = html.style().set_property("margin-top", "1rem");
    }
    let parent = root
        .parent_node()
        .ok_or_else(|| SheetNavError::MissingContainer("root container parent".to_string()))?;
    parent
        .insert_before(&container, root.next_sibling().as_ref())
        .map_err(render_err)?;
    Ok(container)
}

fn table_element(document: &Document) -> Result<Element> {
    query(document, TABLE_SELECTOR)
        .ok_or_else(|| SheetNavError::MissingContainer(TABLE_SELECTOR.to_string()))
}

/// Replace the table content with a single full-width message row.
pub(crate) fn show_placeholder(document: &Document, placeholder: &TablePlaceholder) -> Result<()> {
    let table = table_element(document)?;
    table.set_inner_html("");

    let tbody = create(document, "tbody")?;
    let tr = create(document, "tr")?;
    let td = create(document, "td")?;
    td.set_text_content(Some(&placeholder.message()));
    td.set_attribute("colspan", &PLACEHOLDER_COLSPAN.to_string())
        .map_err(render_err)?;
    if placeholder.is_error() {
        if let Some(cell) = td.dyn_ref::<HtmlElement>() {
            let _ = cell.style().set_property("color", "red");
        }
    }
    append(&tr, &td)?;
    append(&tbody, &tr)?;
    append(&table, &tbody)
}

/// Replace the table content with `view`.
pub(crate) fn render_table(document: &Document, view: &TableView) -> Result<()> {
    let table = table_element(document)?;
    table.set_inner_html("");

    let thead = create(document, "thead")?;
    let header_row = create(document, "tr")?;
    for header in &view.headers {
        let th = create(document, "th")?;
        th.set_text_content(Some(header));
        append(&header_row, &th)?;
    }
    append(&thead, &header_row)?;
    append(&table, &thead)?;

    let tbody = create(document, "tbody")?;
    for row in &view.rows {
        let tr = create(document, "tr")?;
        let rank = create(document, "td")?;
        rank.set_text_content(Some(&row.rank.to_string()));
        append(&tr, &rank)?;

        for cell in &row.cells {
            let td = create(document, "td")?;
            match cell {
                TableCell::Text { text } => td.set_text_content(Some(text)),
                TableCell::Link { url } => {
                    let anchor: HtmlAnchorElement = create(document, "a")?
                        .dyn_into()
                        .map_err(|_| SheetNavError::Render("<a> is not an anchor".to_string()))?;
                    anchor.set_href(url);
                    anchor.set_text_content(Some(cell.display_text()));
                    anchor.set_target("_blank");
                    anchor.set_title(url);
                    append(&td, &anchor)?;
                }
            }
            append(&tr, &td)?;
        }
        append(&tbody, &tr)?;
    }
    append(&table, &tbody)
}

/// One rendered navigation level.
pub(crate) struct LevelHandle {
    level: usize,
    container: Element,
    buttons: Vec<Element>,
    #[allow(dead_code)]
    closures: Vec<Closure<dyn FnMut(MouseEvent)>>,
}

/// [`NavigationSurface`] over the page's button containers.
///
/// Level 0 reuses the root container; deeper levels are `<div data-level>`
/// elements appended to the child container.
pub(crate) struct DomSurface {
    document: Document,
    root: Element,
    children: Element,
    on_click: ClickHandler,
}

impl DomSurface {
    /// Locate (or create) both containers and clear their content.
    pub(crate) fn attach(document: Document, on_click: ClickHandler) -> Result<Self> {
        let root = root_container(&document)?;
        root.set_inner_html("");
        let children = child_container(&document, &root)?;
        children.set_inner_html("");
        Ok(Self {
            document,
            root,
            children,
            on_click,
        })
    }

    fn button(
        &self,
        level: usize,
        index: usize,
        def: &ButtonDef,
    ) -> Result<(Element, Closure<dyn FnMut(MouseEvent)>)> {
        let button = create(&self.document, "button")?;
        button.set_text_content(Some(&def.button_label));
        button
            .set_attribute("data-button-id", &def.button_id)
            .map_err(render_err)?;
        let class = if level == ROOT_LEVEL { "root" } else { "child" };
        button.class_list().add_1(class).map_err(render_err)?;

        let on_click = Rc::clone(&self.on_click);
        let closure = Closure::wrap(Box::new(move |_event: MouseEvent| {
            on_click(level, index);
        }) as Box<dyn FnMut(MouseEvent)>);
        button
            .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
            .map_err(render_err)?;
        Ok((button, closure))
    }
}

impl NavigationSurface for DomSurface {
    type Handle = LevelHandle;

    fn render_level(&mut self, level: usize, buttons: &[ButtonDef]) -> Result<LevelHandle> {
        let container = if level == ROOT_LEVEL {
            self.root.set_inner_html("");
            self.root.clone()
        } else {
            let div = create(&self.document, "div")?;
            div.set_attribute("data-level", &level.to_string())
                .map_err(render_err)?;
            append(&self.children, &div)?;
            div
        };

        let mut elements = Vec::with_capacity(buttons.len());
        let mut closures = Vec::with_capacity(buttons.len());
        for (index, def) in buttons.iter().enumerate() {
            let (button, closure) = self.button(level, index, def)?;
            append(&container, &button)?;
            elements.push(button);
            closures.push(closure);
        }

        Ok(LevelHandle {
            level,
            container,
            buttons: elements,
            closures,
        })
    }

    fn discard_level(&mut self, handle: LevelHandle) {
        if handle.level == ROOT_LEVEL {
            handle.container.set_inner_html("");
        } else {
            handle.container.remove();
        }
    }

    fn mark_selected(&mut self, handle: &LevelHandle, index: usize) {
        for button in &handle.buttons {
            let _ = button.class_list().remove_1(SELECTED_CLASS);
        }
        if let Some(button) = handle.buttons.get(index) {
            let _ = button.class_list().add_1(SELECTED_CLASS);
        }
    }
}
