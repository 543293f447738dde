//! Edit Form View
//!
//! Admin form for the selected item. Two states:
//!
//! - `Hidden` (initial): inputs blank, container carries the hidden class
//! - `Visible`: inputs populated from the selected item
//!
//! The admin toggle flips between them, cancel and a successful save hide
//! the form. Native form submission is always suppressed. The form's
//! elements are static, so `reset` (not unmount) releases the bindings.

use std::cell::Cell;
use std::rc::{Rc, Weak};

use display_tree::{BindingId, DisplayEvent, DisplayTree, ElementHandle, EventKind};

use crate::controller::{SelectedItemCallback, SubmitEditCallback};
use crate::error::{AppError, AppResult};
use crate::models::{EditSubmission, Item};

/// Pre-existing elements the form operates on
#[derive(Clone, Copy, Debug)]
pub struct FormElements {
    pub toggle: ElementHandle,
    pub container: ElementHandle,
    pub form: ElementHandle,
    pub name_input: ElementHandle,
    pub url_input: ElementHandle,
    pub counter_input: ElementHandle,
    pub save: ElementHandle,
    pub cancel: ElementHandle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormState {
    Hidden,
    Visible,
}

/// State shared with the bound handlers (they hold it weakly)
struct FormCore<D> {
    tree: Rc<D>,
    elements: FormElements,
    hidden_class: String,
    state: Cell<FormState>,
}

impl<D: DisplayTree> FormCore<D> {
    fn show(&self, item: Option<Rc<Item>>) -> AppResult<()> {
        let item = item.ok_or_else(|| AppError::invalid("edit form requires a selected item"))?;
        let el = &self.elements;
        self.tree.remove_class(el.container, &self.hidden_class);
        self.tree.set_value(el.name_input, item.name.as_deref().unwrap_or_default());
        self.tree.set_value(el.url_input, &item.url);
        self.tree.set_value(el.counter_input, &item.click_counter.to_string());
        self.state.set(FormState::Visible);
        Ok(())
    }

    fn hide(&self) {
        let el = &self.elements;
        for input in [el.name_input, el.url_input, el.counter_input] {
            self.tree.set_value(input, "");
        }
        self.tree.add_class(el.container, &self.hidden_class);
        self.state.set(FormState::Hidden);
    }

    fn toggle(&self, selected_item: &SelectedItemCallback) -> AppResult<()> {
        match self.state.get() {
            FormState::Hidden => self.show(selected_item()),
            FormState::Visible => {
                self.hide();
                Ok(())
            }
        }
    }

    fn read_submission(&self) -> EditSubmission {
        let el = &self.elements;
        EditSubmission {
            name: self.tree.value(el.name_input),
            url: self.tree.value(el.url_input),
            click_counter: parse_counter(&self.tree.value(el.counter_input)),
        }
    }

    /// Submit and hide; a failed submit leaves the form open
    fn save(&self, submit_edit: &SubmitEditCallback) -> AppResult<()> {
        if self.state.get() != FormState::Visible {
            return Ok(());
        }
        submit_edit(self.read_submission())?;
        self.hide();
        Ok(())
    }
}

/// Leading decimal digits of `raw`, 0 when there are none
fn parse_counter(raw: &str) -> u64 {
    let digits: String = raw.trim().chars().take_while(|c| c.is_ascii_digit()).collect();
    digits.parse().unwrap_or(0)
}

fn handler<D: DisplayTree + 'static>(
    core: &Rc<FormCore<D>>,
    action: impl Fn(&FormCore<D>, &DisplayEvent) -> AppResult<()> + 'static,
) -> display_tree::Handler {
    let core: Weak<FormCore<D>> = Rc::downgrade(core);
    Rc::new(move |ev: &DisplayEvent| {
        if let Some(core) = core.upgrade() {
            if let Err(e) = action(&core, ev) {
                log::error!("[FORM] {}", e);
            }
        }
    })
}

pub struct EditFormView<D: DisplayTree> {
    core: Rc<FormCore<D>>,
    bindings: Vec<BindingId>,
}

impl<D: DisplayTree + 'static> EditFormView<D> {
    pub fn new(tree: Rc<D>, elements: FormElements, hidden_class: impl Into<String>) -> Self {
        Self {
            core: Rc::new(FormCore {
                tree,
                elements,
                hidden_class: hidden_class.into(),
                state: Cell::new(FormState::Hidden),
            }),
            bindings: Vec::new(),
        }
    }

    /// Bind toggle, cancel, save and form-submit, then hide
    pub fn init(&mut self, submit_edit: SubmitEditCallback, selected_item: SelectedItemCallback) {
        self.unbind_all();
        let el = self.core.elements;
        let tree = self.core.tree.clone();

        let toggle = handler(&self.core, move |core, _ev| core.toggle(&selected_item));
        let cancel = handler(&self.core, |core, _ev| {
            core.hide();
            Ok(())
        });
        let save = handler(&self.core, move |core, ev| {
            ev.prevent_default();
            core.save(&submit_edit)
        });
        let submit = handler(&self.core, |_core, ev| {
            ev.prevent_default();
            Ok(())
        });

        self.bindings = vec![
            tree.bind(el.toggle, EventKind::Activate, toggle),
            tree.bind(el.cancel, EventKind::Activate, cancel),
            tree.bind(el.save, EventKind::Activate, save),
            tree.bind(el.form, EventKind::Submit, submit),
        ];
        self.core.hide();
    }

    /// Detach all bindings and force the hidden state; safe to repeat
    pub fn reset(&mut self) {
        self.unbind_all();
        self.core.hide();
    }

    pub fn show(&self, item: Option<Rc<Item>>) -> AppResult<()> {
        self.core.show(item)
    }

    pub fn hide(&self) {
        self.core.hide();
    }

    pub fn state(&self) -> FormState {
        self.core.state.get()
    }

    pub fn is_hidden(&self) -> bool {
        self.state() == FormState::Hidden
    }

    pub fn elements(&self) -> FormElements {
        self.core.elements
    }

    fn unbind_all(&mut self) {
        for binding in self.bindings.drain(..) {
            self.core.tree.unbind(binding);
        }
    }
}
