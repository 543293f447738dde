//! Controller ("Octopus")
//!
//! The only component that sees both the [`ItemStore`] and the views.
//! Views report intents through [`ViewCallbacks`]; the controller mutates
//! the store, pushes the fresh item into the detail view and asks it to
//! re-render. Views never hold the store.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::error::{AppError, AppResult};
use crate::models::{EditSubmission, Item, ItemPatch};
use crate::store::{ItemList, ItemStore};

pub type SelectCallback = Rc<dyn Fn(usize) -> AppResult<()>>;
pub type SelectedItemCallback = Rc<dyn Fn() -> Option<Rc<Item>>>;
pub type IncrementCallback = Rc<dyn Fn() -> AppResult<()>>;
pub type SubmitEditCallback = Rc<dyn Fn(EditSubmission) -> AppResult<()>>;

/// Controller entry points handed to the views at `init`
#[derive(Clone)]
pub struct ViewCallbacks {
    pub select_item: SelectCallback,
    pub selected_item: SelectedItemCallback,
    pub increment_counter: IncrementCallback,
    pub submit_edit: SubmitEditCallback,
}

/// Data slot and renderer for the selected item
pub trait ItemDetail {
    fn set_item(&mut self, item: Rc<Item>);

    /// Image and counter
    fn render(&self);

    /// Counter text only; the image is left alone
    fn render_counter_only(&self);
}

/// The view aggregate driven by [`Octopus`]
pub trait AppView {
    type Detail: ItemDetail;

    fn init(&self, items: &[Rc<Item>], callbacks: ViewCallbacks) -> AppResult<()>;

    /// Release every binding the views created; safe to call twice
    fn unmount(&self);

    fn detail(&self) -> &RefCell<Self::Detail>;
}

#[derive(Clone, Copy, Debug)]
enum Render {
    Full,
    CounterOnly,
}

struct Inner<V> {
    store: RefCell<ItemStore>,
    view: V,
}

impl<V: AppView> Inner<V> {
    fn change_selection(&self, index: usize) -> AppResult<()> {
        let item = {
            let mut store = self.store.borrow_mut();
            store.set_selected_index(index)?;
            store.selected_item()
        };
        log::debug!("[OCTOPUS] selection -> {}", index);
        self.push(item, Render::Full)
    }

    fn increment_counter(&self) -> AppResult<()> {
        let item = self.store.borrow_mut().increase_click_counter()?;
        log::debug!("[OCTOPUS] counter -> {}", item.click_counter);
        self.push(Some(item), Render::CounterOnly)
    }

    fn submit_edit(&self, submission: EditSubmission, on_done: Option<Box<dyn FnOnce()>>) -> AppResult<()> {
        let item = {
            let mut store = self.store.borrow_mut();
            let index = store.selected_index();
            store.update(&ItemPatch::from(submission), index)?
        };
        log::debug!("[OCTOPUS] edited item -> {:?}", item);
        self.push(Some(item), Render::Full)?;
        if let Some(done) = on_done {
            done();
        }
        Ok(())
    }

    fn selected_item(&self) -> Option<Rc<Item>> {
        self.store.borrow().selected_item()
    }

    fn push(&self, item: Option<Rc<Item>>, render: Render) -> AppResult<()> {
        let item = item.ok_or_else(|| AppError::invalid("no item selected"))?;
        let mut detail = self.view.detail().borrow_mut();
        detail.set_item(item);
        match render {
            Render::Full => detail.render(),
            Render::CounterOnly => detail.render_counter_only(),
        }
        Ok(())
    }
}

/// Mediator between the item store and the view aggregate.
///
/// Cheap to clone; clones share the same store and views.
pub struct Octopus<V> {
    inner: Rc<Inner<V>>,
}

impl<V> Clone for Octopus<V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<V: AppView + 'static> Octopus<V> {
    pub fn new(store: ItemStore, view: V) -> Self {
        Self {
            inner: Rc::new(Inner {
                store: RefCell::new(store),
                view,
            }),
        }
    }

    /// Hand the items and the controller callbacks to the views
    pub fn init(&self) -> AppResult<&Self> {
        let items = self.items();
        log::info!("[OCTOPUS] init with {} items", items.len());
        self.inner.view.init(&items, self.callbacks())?;
        Ok(self)
    }

    pub fn change_selection(&self, index: usize) -> AppResult<()> {
        self.inner.change_selection(index)
    }

    /// Increment the counter of the currently selected item
    pub fn increment_counter(&self) -> AppResult<()> {
        self.inner.increment_counter()
    }

    /// Replace the selected item with the submitted fields, re-render, then
    /// run `on_done`
    pub fn submit_edit(&self, submission: EditSubmission, on_done: Option<Box<dyn FnOnce()>>) -> AppResult<()> {
        self.inner.submit_edit(submission, on_done)
    }

    pub fn unmount(&self) {
        log::info!("[OCTOPUS] unmount");
        self.inner.view.unmount();
    }

    pub fn items(&self) -> ItemList {
        self.inner.store.borrow().items()
    }

    pub fn selected_item(&self) -> Option<Rc<Item>> {
        self.inner.selected_item()
    }

    pub fn selected_index(&self) -> usize {
        self.inner.store.borrow().selected_index()
    }

    pub fn view(&self) -> &V {
        &self.inner.view
    }

    fn callbacks(&self) -> ViewCallbacks {
        let weak = Rc::downgrade(&self.inner);
        ViewCallbacks {
            select_item: {
                let weak = weak.clone();
                Rc::new(move |index: usize| with_inner(&weak, |inner| inner.change_selection(index)))
            },
            selected_item: {
                let weak = weak.clone();
                Rc::new(move || weak.upgrade().and_then(|inner| inner.selected_item()))
            },
            increment_counter: {
                let weak = weak.clone();
                Rc::new(move || with_inner(&weak, |inner| inner.increment_counter()))
            },
            submit_edit: Rc::new(move |submission: EditSubmission| with_inner(&weak, |inner| inner.submit_edit(submission, None))),
        }
    }
}

/// Run `f` if the controller is still alive; a dropped controller makes
/// every callback inert
fn with_inner<V>(weak: &Weak<Inner<V>>, f: impl FnOnce(&Inner<V>) -> AppResult<()>) -> AppResult<()> {
    match weak.upgrade() {
        Some(inner) => f(&inner),
        None => {
            log::debug!("[OCTOPUS] callback after controller was dropped");
            Ok(())
        }
    }
}
