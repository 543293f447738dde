//! List View
//!
//! One button per item, labeled by 1-based position. Each button's handler
//! carries the index from the render pass that created it; a new `init`
//! tears the previous pass down first so no handler outlives its render.

use std::rc::Rc;

use display_tree::{BindingId, DisplayEvent, DisplayTree, ElementHandle, ElementKind, EventKind};

use crate::controller::SelectCallback;
use crate::models::Item;

pub const CONTROL_CLASS: &str = "btn";

struct Control {
    element: ElementHandle,
    binding: BindingId,
}

pub struct ListView<D: DisplayTree> {
    tree: Rc<D>,
    container: ElementHandle,
    label: String,
    controls: Vec<Control>,
}

impl<D: DisplayTree> ListView<D> {
    pub fn new(tree: Rc<D>, container: ElementHandle, label: impl Into<String>) -> Self {
        Self {
            tree,
            container,
            label: label.into(),
            controls: Vec::new(),
        }
    }

    /// Render one control per item, in order
    pub fn init(&mut self, items: &[Rc<Item>], on_select: SelectCallback) {
        self.unmount();
        for index in 0..items.len() {
            let button = self.tree.create(ElementKind::Button);
            self.tree.add_class(button, CONTROL_CLASS);
            self.tree.set_text(button, &format!("{} {}", self.label, index + 1));
            self.tree.set_attribute(button, "data-index", &index.to_string());

            let on_select = on_select.clone();
            let binding = self.tree.bind(
                button,
                EventKind::Activate,
                Rc::new(move |_ev: &DisplayEvent| {
                    if let Err(e) = on_select(index) {
                        log::error!("[LIST] select {} failed: {}", index, e);
                    }
                }),
            );
            self.tree.append(self.container, button);
            self.controls.push(Control { element: button, binding });
        }
        log::debug!("[LIST] rendered {} controls", self.controls.len());
    }

    /// Detach every binding and remove every control
    pub fn unmount(&mut self) {
        for control in self.controls.drain(..) {
            self.tree.unbind(control.binding);
            self.tree.remove(self.container, control.element);
            self.tree.release(control.element);
        }
    }

    /// Controls of the current render pass, in item order
    pub fn controls(&self) -> Vec<ElementHandle> {
        self.controls.iter().map(|c| c.element).collect()
    }
}
