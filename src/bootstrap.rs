//! Bootstrap
//!
//! Wires store, views and controller together once the shell is on screen.
//! Element ids are resolved here and only here; views receive handles.

use std::cell::RefCell;
use std::rc::Rc;

use display_tree::{DisplayTree, DomTree, ElementHandle};
use wasm_bindgen::prelude::*;

use crate::config::AppConfig;
use crate::controller::Octopus;
use crate::error::{AppError, AppResult};
use crate::store::ItemStore;
use crate::views::{DetailView, EditFormView, FormElements, ListView, PageView};

pub type BrowserApp = Octopus<PageView<DomTree>>;

thread_local! {
    /// Live controller; keeps the view callbacks alive for the page lifetime
    static APP: RefCell<Option<BrowserApp>> = RefCell::new(None);
}

/// Build the controller and views over `tree`, resolving element ids with
/// `find`. Nothing is rendered until `init`.
pub fn assemble<D, F>(tree: Rc<D>, config: &AppConfig, find: F) -> AppResult<Octopus<PageView<D>>>
where
    D: DisplayTree + 'static,
    F: Fn(&str) -> Option<ElementHandle>,
{
    let ids = &config.elements;
    let resolve = |id: &str| find(id).ok_or_else(|| AppError::MissingElement(id.to_string()));

    let list = ListView::new(tree.clone(), resolve(&ids.item_list)?, config.list_label.clone());
    let detail = DetailView::new(tree.clone(), resolve(&ids.detail_container)?);
    let elements = FormElements {
        toggle: resolve(&ids.admin_toggle)?,
        container: resolve(&ids.form_container)?,
        form: resolve(&ids.form)?,
        name_input: resolve(&ids.name_input)?,
        url_input: resolve(&ids.url_input)?,
        counter_input: resolve(&ids.counter_input)?,
        save: resolve(&ids.save_button)?,
        cancel: resolve(&ids.cancel_button)?,
    };
    let form = EditFormView::new(tree, elements, config.hidden_class.clone());

    Ok(Octopus::new(
        ItemStore::new(config.seed.clone()),
        PageView::new(list, detail, Some(form)),
    ))
}

/// Auto-initialization after the shell is mounted; skipped when the test
/// marker element is present so a harness can drive the lifecycle itself
pub fn start(config: &AppConfig) -> AppResult<()> {
    let tree = DomTree::new().ok_or(AppError::HostUnavailable)?;
    if tree.has_element_id(&config.elements.test_marker) {
        log::info!("[BOOT] #{} present, skipping auto-init", config.elements.test_marker);
        return Ok(());
    }
    mount(config)
}

/// (Re)build and initialize the app in the current document
pub fn mount(config: &AppConfig) -> AppResult<()> {
    unmount();
    let tree = Rc::new(DomTree::new().ok_or(AppError::HostUnavailable)?);
    let app = assemble(tree.clone(), config, |id| tree.adopt_by_id(id))?;
    app.init()?;
    log::info!("[BOOT] mounted {} items", app.items().len());
    APP.with(|slot| *slot.borrow_mut() = Some(app));
    Ok(())
}

/// Release every binding of the live app, if any
pub fn unmount() {
    let app = APP.with(|slot| slot.borrow_mut().take());
    if let Some(app) = app {
        app.unmount();
    }
}

#[wasm_bindgen]
pub fn mount_cat_clicker() -> Result<(), JsValue> {
    AppConfig::load()
        .and_then(|config| mount(&config))
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

#[wasm_bindgen]
pub fn unmount_cat_clicker() {
    unmount();
}

/// Most recent buffered log lines, oldest first
#[wasm_bindgen]
pub fn cat_clicker_recent_logs() -> Vec<String> {
    rolling_logger::recent_logs()
}
