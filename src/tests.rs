//! Widget Integration Tests
//!
//! Whole-page scenarios: store, controller and views assembled from the
//! default configuration over an in-memory display tree.

use std::collections::HashMap;
use std::rc::Rc;

use display_tree::{DisplayTree, ElementHandle, ElementKind, MemoryTree};
use pretty_assertions::assert_eq;

use crate::bootstrap::assemble;
use crate::config::{seed_items, AppConfig};
use crate::controller::Octopus;
use crate::error::AppError;
use crate::views::{PageView, CONTROL_CLASS, COUNTER_CLASS, IMAGE_CLASS};

struct Page {
    tree: Rc<MemoryTree>,
    ids: HashMap<String, ElementHandle>,
    app: Octopus<PageView<MemoryTree>>,
}

impl Page {
    fn el(&self, id: &str) -> ElementHandle {
        self.ids[id]
    }

    fn list(&self) -> ElementHandle {
        self.el("catlist")
    }

    fn detail(&self) -> ElementHandle {
        self.el("cat-img-ctnr")
    }

    fn image(&self) -> ElementHandle {
        let images = self.tree.find_by_class(self.detail(), IMAGE_CLASS);
        assert_eq!(images.len(), 1, "exactly one detail image");
        images[0]
    }

    fn counter_text(&self) -> String {
        let texts = self.tree.find_by_class(self.detail(), COUNTER_CLASS);
        assert_eq!(texts.len(), 1, "exactly one counter text");
        self.tree.text(texts[0])
    }

    fn controls(&self) -> Vec<ElementHandle> {
        self.tree.find_by_class(self.list(), CONTROL_CLASS)
    }

    fn counters(&self) -> Vec<u64> {
        self.app.items().iter().map(|i| i.click_counter).collect()
    }
}

/// Static elements the shell would render, keyed by configured id
fn shell(tree: &MemoryTree, config: &AppConfig) -> HashMap<String, ElementHandle> {
    let ids = &config.elements;
    [
        (&ids.item_list, ElementKind::Container),
        (&ids.detail_container, ElementKind::Container),
        (&ids.admin_toggle, ElementKind::Button),
        (&ids.form_container, ElementKind::Container),
        (&ids.form, ElementKind::Form),
        (&ids.name_input, ElementKind::Input),
        (&ids.url_input, ElementKind::Input),
        (&ids.counter_input, ElementKind::Input),
        (&ids.save_button, ElementKind::Button),
        (&ids.cancel_button, ElementKind::Button),
    ]
    .into_iter()
    .map(|(id, kind)| (id.clone(), tree.create(kind)))
    .collect()
}

fn page_with(config: AppConfig) -> Page {
    let tree = Rc::new(MemoryTree::new());
    let ids = shell(&tree, &config);
    let app = assemble(tree.clone(), &config, |id| ids.get(id).copied()).expect("assemble");
    app.init().expect("init");
    Page { tree, ids, app }
}

fn page() -> Page {
    page_with(AppConfig::default())
}

#[test]
fn test_initial_render() {
    let page = page();
    assert_eq!(page.controls().len(), 5);
    assert_eq!(page.counter_text(), "0 click(s)");
    assert_eq!(
        page.tree.attribute(page.image(), "src").as_deref(),
        Some("./cat_picture1.jpg")
    );
    assert_eq!(*page.app.selected_item().unwrap(), seed_items()[0]);
    assert!(page.tree.has_class(page.el("cat-form-ctnr"), "d-none"));
}

#[test]
fn test_list_click_changes_detail() {
    let page = page();
    page.tree.click(page.controls()[1]);

    let items = page.app.items();
    assert!(Rc::ptr_eq(&page.app.selected_item().unwrap(), &items[1]));
    assert_eq!(page.tree.attribute(page.image(), "src").as_deref(), Some("./cat_picture2.jpeg"));
    assert_eq!(page.counter_text(), "0 click(s)");
}

#[test]
fn test_image_clicks_update_counter_text() {
    let page = page();
    let image = page.image();
    page.tree.click(image);
    page.tree.click(image);
    assert_eq!(page.counter_text(), "2 click(s)");
    // The image element is reused, not re-created
    assert_eq!(page.image(), image);
}

#[test]
fn test_select_then_increment_three_times() {
    let page = page();
    page.tree.click(page.controls()[2]);
    for _ in 0..3 {
        page.tree.click(page.image());
    }
    assert_eq!(page.app.selected_item().unwrap().click_counter, 3);
    assert_eq!(page.counters(), vec![0, 0, 3, 0, 0]);
    assert_eq!(page.counter_text(), "3 click(s)");
}

#[test]
fn test_counters_are_kept_per_item() {
    let page = page();
    page.tree.click(page.image());
    page.tree.click(page.controls()[4]);
    page.tree.click(page.image());
    page.tree.click(page.image());
    page.tree.click(page.controls()[0]);
    assert_eq!(page.counter_text(), "1 click(s)");
    assert_eq!(page.counters(), vec![1, 0, 0, 0, 2]);
}

#[test]
fn test_form_opens_with_selected_item() {
    let page = page();
    page.tree.click(page.controls()[3]);
    page.tree.click(page.el("adm-btn"));

    assert!(!page.tree.has_class(page.el("cat-form-ctnr"), "d-none"));
    assert_eq!(page.tree.value(page.el("cat-name-input")), "Cat 4");
    assert_eq!(page.tree.value(page.el("cat-img-url-input")), "./cat_picture4.jpeg");
    assert_eq!(page.tree.value(page.el("cat-click-input")), "0");
}

#[test]
fn test_form_edit_name_only() {
    let page = page();
    page.tree.click(page.image());
    page.tree.click(page.el("adm-btn"));
    page.tree.set_value(page.el("cat-name-input"), "Tom");
    page.tree.click(page.el("save-btn"));

    let item = page.app.selected_item().unwrap();
    assert_eq!(item.name.as_deref(), Some("Tom"));
    assert_eq!(item.url, "./cat_picture1.jpg");
    assert_eq!(item.click_counter, 1);
    assert!(page.tree.has_class(page.el("cat-form-ctnr"), "d-none"));
    assert_eq!(page.tree.value(page.el("cat-name-input")), "");
}

#[test]
fn test_form_save_rerenders_detail() {
    let page = page();
    page.tree.click(page.el("adm-btn"));
    page.tree.set_value(page.el("cat-name-input"), "New cat name");
    page.tree.set_value(page.el("cat-img-url-input"), "https://placehold.it/400x300");
    page.tree.set_value(page.el("cat-click-input"), "3");
    page.tree.click(page.el("save-btn"));

    assert_eq!(page.counter_text(), "3 click(s)");
    assert_eq!(
        page.tree.attribute(page.image(), "src").as_deref(),
        Some("https://placehold.it/400x300")
    );
}

#[test]
fn test_cancel_discards_edits() {
    let page = page();
    page.tree.click(page.el("adm-btn"));
    page.tree.set_value(page.el("cat-name-input"), "Ignored");
    page.tree.click(page.el("cancel-btn"));
    assert_eq!(page.app.selected_item().unwrap().name.as_deref(), Some("Cat 1"));
}

#[test]
fn test_unmount_twice_releases_everything() {
    let page = page();
    let stale_controls = page.controls();
    page.app.unmount();
    page.app.unmount();

    assert_eq!(page.tree.binding_count(), 0);
    assert!(page.tree.children(page.list()).is_empty());
    assert!(page.tree.children(page.detail()).is_empty());

    page.tree.click(stale_controls[2]);
    page.tree.click(page.el("adm-btn"));
    assert_eq!(page.app.selected_index(), 0);
    assert!(page.tree.has_class(page.el("cat-form-ctnr"), "d-none"));
}

#[test]
fn test_reinit_after_unmount_binds_fresh_controls() {
    let page = page();
    page.tree.click(page.controls()[1]);
    page.app.unmount();
    page.app.init().unwrap();

    // Each remount holds one binding per control, one image, four form bindings
    assert_eq!(page.tree.binding_count(), 5 + 1 + 4);
    page.tree.click(page.controls()[4]);
    assert_eq!(page.app.selected_index(), 4);
    assert_eq!(page.tree.attribute(page.image(), "src").as_deref(), Some("./cat_picture5.jpeg"));
}

#[test]
fn test_missing_element_is_reported() {
    let tree = Rc::new(MemoryTree::new());
    let config = AppConfig::default();
    let mut ids = shell(&tree, &config);
    ids.remove("save-btn");
    let err = assemble(tree.clone(), &config, |id| ids.get(id).copied())
        .err()
        .expect("missing element");
    assert!(matches!(err, AppError::MissingElement(id) if id == "save-btn"));
}

#[test]
fn test_empty_seed_cannot_init() {
    let config = AppConfig {
        seed: Vec::new(),
        ..AppConfig::default()
    };
    let tree = Rc::new(MemoryTree::new());
    let ids = shell(&tree, &config);
    let app = assemble(tree.clone(), &config, |id| ids.get(id).copied()).unwrap();
    assert!(app.init().err().expect("init fails").is_invalid_argument());
}

#[test]
fn test_custom_label() {
    let page = page_with(AppConfig {
        list_label: "Dog".into(),
        ..AppConfig::default()
    });
    let labels: Vec<String> = page.controls().iter().map(|c| page.tree.text(*c)).collect();
    assert_eq!(labels, vec!["Dog 1", "Dog 2", "Dog 3", "Dog 4", "Dog 5"]);
}
