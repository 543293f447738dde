//! Views
//!
//! Imperative view components over a [`DisplayTree`], plus the
//! [`PageView`] aggregate the controller drives.

mod detail_view;
mod edit_form_view;
mod list_view;

use std::cell::RefCell;
use std::rc::Rc;

use display_tree::DisplayTree;

use crate::controller::{AppView, ViewCallbacks};
use crate::error::AppResult;
use crate::models::Item;

pub use detail_view::{DetailView, COUNTER_CLASS, IMAGE_CLASS};
pub use edit_form_view::{EditFormView, FormElements, FormState};
pub use list_view::{ListView, CONTROL_CLASS};

/// List, detail and (optionally) the edit form of one page
pub struct PageView<D: DisplayTree> {
    list: RefCell<ListView<D>>,
    detail: RefCell<DetailView<D>>,
    form: Option<RefCell<EditFormView<D>>>,
}

impl<D: DisplayTree + 'static> PageView<D> {
    pub fn new(list: ListView<D>, detail: DetailView<D>, form: Option<EditFormView<D>>) -> Self {
        Self {
            list: RefCell::new(list),
            detail: RefCell::new(detail),
            form: form.map(RefCell::new),
        }
    }

    pub fn list(&self) -> &RefCell<ListView<D>> {
        &self.list
    }

    pub fn form(&self) -> Option<&RefCell<EditFormView<D>>> {
        self.form.as_ref()
    }
}

impl<D: DisplayTree + 'static> AppView for PageView<D> {
    type Detail = DetailView<D>;

    fn init(&self, items: &[Rc<Item>], callbacks: ViewCallbacks) -> AppResult<()> {
        self.list.borrow_mut().init(items, callbacks.select_item.clone());

        let selected = (callbacks.selected_item)();
        self.detail
            .borrow_mut()
            .init(selected, callbacks.increment_counter.clone())?;

        if let Some(form) = &self.form {
            form.borrow_mut()
                .init(callbacks.submit_edit.clone(), callbacks.selected_item.clone());
        }
        Ok(())
    }

    fn unmount(&self) {
        self.list.borrow_mut().unmount();
        self.detail.borrow_mut().unmount();
        if let Some(form) = &self.form {
            form.borrow_mut().reset();
        }
    }

    fn detail(&self) -> &RefCell<DetailView<D>> {
        &self.detail
    }
}
