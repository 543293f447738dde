//! Browser DOM Backend
//!
//! [`DisplayTree`] over `web-sys`. Handles map to live `web_sys::Element`s;
//! bindings own their `Closure` so unbinding removes the listener and frees
//! the closure instead of leaking it with `forget()`.

use std::cell::RefCell;
use std::collections::HashMap;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

use crate::{BindingId, DisplayEvent, DisplayTree, ElementHandle, ElementKind, EventKind, Handler};

struct DomBinding {
    element: web_sys::Element,
    event: &'static str,
    closure: Closure<dyn FnMut(web_sys::Event)>,
}

impl DomBinding {
    fn detach(&self) {
        if let Err(e) = self
            .element
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref())
        {
            log::warn!("[DOM] remove_event_listener({}) failed: {:?}", self.event, e);
        }
    }
}

#[derive(Default)]
struct DomState {
    next_element: u32,
    next_binding: u32,
    elements: HashMap<ElementHandle, web_sys::Element>,
    bindings: HashMap<BindingId, DomBinding>,
}

impl DomState {
    fn next_element(&mut self) -> ElementHandle {
        let handle = ElementHandle(self.next_element);
        self.next_element += 1;
        handle
    }

    fn next_binding(&mut self) -> BindingId {
        let id = BindingId(self.next_binding);
        self.next_binding += 1;
        id
    }
}

/// Display tree backed by the browser document
pub struct DomTree {
    document: web_sys::Document,
    state: RefCell<DomState>,
}

impl DomTree {
    /// Tree over the current window's document, if there is one
    pub fn new() -> Option<Self> {
        let document = web_sys::window()?.document()?;
        Some(Self::with_document(document))
    }

    pub fn with_document(document: web_sys::Document) -> Self {
        Self {
            document,
            state: RefCell::new(DomState::default()),
        }
    }

    /// Take a handle on an element that already exists in the document
    pub fn adopt(&self, element: web_sys::Element) -> ElementHandle {
        let mut state = self.state.borrow_mut();
        let handle = state.next_element();
        state.elements.insert(handle, element);
        handle
    }

    /// Adopt the element with the given id
    pub fn adopt_by_id(&self, id: &str) -> Option<ElementHandle> {
        self.document.get_element_by_id(id).map(|el| self.adopt(el))
    }

    pub fn has_element_id(&self, id: &str) -> bool {
        self.document.get_element_by_id(id).is_some()
    }

    fn element(&self, handle: ElementHandle) -> Option<web_sys::Element> {
        self.state.borrow().elements.get(&handle).cloned()
    }
}

impl DisplayTree for DomTree {
    fn create(&self, kind: ElementKind) -> ElementHandle {
        let created = self.document.create_element(kind.tag());
        let mut state = self.state.borrow_mut();
        let handle = state.next_element();
        match created {
            Ok(element) => {
                state.elements.insert(handle, element);
            }
            Err(e) => log::warn!("[DOM] create_element({}) failed: {:?}", kind.tag(), e),
        }
        handle
    }

    fn release(&self, element: ElementHandle) {
        let mut state = self.state.borrow_mut();
        let Some(released) = state.elements.remove(&element) else {
            return;
        };
        let stale: Vec<BindingId> = state
            .bindings
            .iter()
            .filter(|(_, b)| b.element == released)
            .map(|(id, _)| *id)
            .collect();
        for id in stale {
            if let Some(binding) = state.bindings.remove(&id) {
                binding.detach();
            }
        }
    }

    fn set_attribute(&self, element: ElementHandle, name: &str, value: &str) {
        if let Some(el) = self.element(element) {
            if let Err(e) = el.set_attribute(name, value) {
                log::warn!("[DOM] set_attribute({}) failed: {:?}", name, e);
            }
        }
    }

    fn attribute(&self, element: ElementHandle, name: &str) -> Option<String> {
        self.element(element).and_then(|el| el.get_attribute(name))
    }

    fn set_text(&self, element: ElementHandle, text: &str) {
        if let Some(el) = self.element(element) {
            el.set_text_content(Some(text));
        }
    }

    fn text(&self, element: ElementHandle) -> String {
        self.element(element)
            .and_then(|el| el.text_content())
            .unwrap_or_default()
    }

    fn set_value(&self, element: ElementHandle, value: &str) {
        if let Some(el) = self.element(element) {
            if let Some(input) = el.dyn_ref::<web_sys::HtmlInputElement>() {
                input.set_value(value);
            }
        }
    }

    fn value(&self, element: ElementHandle) -> String {
        self.element(element)
            .and_then(|el| el.dyn_ref::<web_sys::HtmlInputElement>().map(|input| input.value()))
            .unwrap_or_default()
    }

    fn add_class(&self, element: ElementHandle, class: &str) {
        if let Some(el) = self.element(element) {
            let _ = el.class_list().add_1(class);
        }
    }

    fn remove_class(&self, element: ElementHandle, class: &str) {
        if let Some(el) = self.element(element) {
            let _ = el.class_list().remove_1(class);
        }
    }

    fn has_class(&self, element: ElementHandle, class: &str) -> bool {
        self.element(element)
            .map(|el| el.class_list().contains(class))
            .unwrap_or(false)
    }

    fn append(&self, container: ElementHandle, child: ElementHandle) {
        if let (Some(parent), Some(child)) = (self.element(container), self.element(child)) {
            if let Err(e) = parent.append_child(&child) {
                log::warn!("[DOM] append_child failed: {:?}", e);
            }
        }
    }

    fn remove(&self, container: ElementHandle, child: ElementHandle) {
        if let (Some(parent), Some(child)) = (self.element(container), self.element(child)) {
            if child.parent_element().as_ref() == Some(&parent) {
                let _ = parent.remove_child(&child);
            }
        }
    }

    /// Must not be undone from inside the binding's own handler: unbinding
    /// drops the closure that is currently running.
    fn bind(&self, element: ElementHandle, kind: EventKind, handler: Handler) -> BindingId {
        let target = self.element(element);
        let mut state = self.state.borrow_mut();
        let id = state.next_binding();
        let Some(target) = target else {
            log::warn!("[DOM] bind on unknown element {:?}", element);
            return id;
        };

        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |ev: web_sys::Event| {
            let event = DisplayEvent::new(kind);
            handler(&event);
            if event.default_prevented() {
                ev.prevent_default();
            }
        });
        let event = kind.dom_name();
        if let Err(e) = target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref()) {
            log::warn!("[DOM] add_event_listener({}) failed: {:?}", event, e);
        }
        state.bindings.insert(
            id,
            DomBinding {
                element: target,
                event,
                closure,
            },
        );
        id
    }

    fn unbind(&self, binding: BindingId) {
        let removed = self.state.borrow_mut().bindings.remove(&binding);
        if let Some(binding) = removed {
            binding.detach();
        }
    }
}
