//! In-Memory Display Tree
//!
//! Headless [`DisplayTree`] with synthetic event dispatch. Used to drive
//! views and the controller in unit tests without a browser.

use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap};

use crate::{BindingId, DisplayEvent, DisplayTree, ElementHandle, ElementKind, EventKind, Handler};

struct Node {
    kind: ElementKind,
    attributes: BTreeMap<String, String>,
    text: String,
    value: String,
    classes: Vec<String>,
    children: Vec<ElementHandle>,
    parent: Option<ElementHandle>,
}

impl Node {
    fn new(kind: ElementKind) -> Self {
        Self {
            kind,
            attributes: BTreeMap::new(),
            text: String::new(),
            value: String::new(),
            classes: Vec::new(),
            children: Vec::new(),
            parent: None,
        }
    }
}

struct Binding {
    element: ElementHandle,
    kind: EventKind,
    handler: Handler,
}

#[derive(Default)]
struct State {
    next_element: u32,
    next_binding: u32,
    nodes: HashMap<ElementHandle, Node>,
    bindings: BTreeMap<BindingId, Binding>,
}

/// Display tree held entirely in memory
#[derive(Default)]
pub struct MemoryTree {
    state: RefCell<State>,
}

impl MemoryTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire `kind` on `element`, running every bound handler in bind order.
    ///
    /// No internal borrow is held while handlers run, so handlers may
    /// mutate the tree (including binding and unbinding).
    pub fn dispatch(&self, element: ElementHandle, kind: EventKind) -> DisplayEvent {
        let handlers: Vec<Handler> = self
            .state
            .borrow()
            .bindings
            .values()
            .filter(|b| b.element == element && b.kind == kind)
            .map(|b| b.handler.clone())
            .collect();
        let event = DisplayEvent::new(kind);
        for handler in handlers {
            handler(&event);
        }
        event
    }

    /// Shorthand for an activation dispatch
    pub fn click(&self, element: ElementHandle) -> DisplayEvent {
        self.dispatch(element, EventKind::Activate)
    }

    pub fn kind(&self, element: ElementHandle) -> Option<ElementKind> {
        self.state.borrow().nodes.get(&element).map(|n| n.kind)
    }

    pub fn contains(&self, element: ElementHandle) -> bool {
        self.state.borrow().nodes.contains_key(&element)
    }

    pub fn children(&self, container: ElementHandle) -> Vec<ElementHandle> {
        self.state
            .borrow()
            .nodes
            .get(&container)
            .map(|n| n.children.clone())
            .unwrap_or_default()
    }

    pub fn parent(&self, element: ElementHandle) -> Option<ElementHandle> {
        self.state.borrow().nodes.get(&element).and_then(|n| n.parent)
    }

    /// Descendants of `root` (depth-first, document order) carrying `class`
    pub fn find_by_class(&self, root: ElementHandle, class: &str) -> Vec<ElementHandle> {
        let state = self.state.borrow();
        let mut found = Vec::new();
        let mut stack: Vec<ElementHandle> = state
            .nodes
            .get(&root)
            .map(|n| n.children.iter().rev().copied().collect())
            .unwrap_or_default();
        while let Some(handle) = stack.pop() {
            if let Some(node) = state.nodes.get(&handle) {
                if node.classes.iter().any(|c| c == class) {
                    found.push(handle);
                }
                stack.extend(node.children.iter().rev().copied());
            }
        }
        found
    }

    /// Number of live bindings across the whole tree
    pub fn binding_count(&self) -> usize {
        self.state.borrow().bindings.len()
    }

    /// Number of live bindings on one element
    pub fn bindings_on(&self, element: ElementHandle) -> usize {
        self.state
            .borrow()
            .bindings
            .values()
            .filter(|b| b.element == element)
            .count()
    }

    fn with_node(&self, element: ElementHandle, f: impl FnOnce(&mut Node)) {
        if let Some(node) = self.state.borrow_mut().nodes.get_mut(&element) {
            f(node);
        }
    }
}

impl DisplayTree for MemoryTree {
    fn create(&self, kind: ElementKind) -> ElementHandle {
        let mut state = self.state.borrow_mut();
        let handle = ElementHandle(state.next_element);
        state.next_element += 1;
        state.nodes.insert(handle, Node::new(kind));
        handle
    }

    fn release(&self, element: ElementHandle) {
        let mut state = self.state.borrow_mut();
        if let Some(node) = state.nodes.remove(&element) {
            if let Some(parent) = node.parent.and_then(|p| state.nodes.get_mut(&p)) {
                parent.children.retain(|c| *c != element);
            }
            for child in node.children {
                if let Some(child) = state.nodes.get_mut(&child) {
                    child.parent = None;
                }
            }
        }
        state.bindings.retain(|_, b| b.element != element);
    }

    fn set_attribute(&self, element: ElementHandle, name: &str, value: &str) {
        self.with_node(element, |n| {
            n.attributes.insert(name.to_string(), value.to_string());
        });
    }

    fn attribute(&self, element: ElementHandle, name: &str) -> Option<String> {
        self.state
            .borrow()
            .nodes
            .get(&element)
            .and_then(|n| n.attributes.get(name).cloned())
    }

    fn set_text(&self, element: ElementHandle, text: &str) {
        self.with_node(element, |n| n.text = text.to_string());
    }

    fn text(&self, element: ElementHandle) -> String {
        self.state
            .borrow()
            .nodes
            .get(&element)
            .map(|n| n.text.clone())
            .unwrap_or_default()
    }

    fn set_value(&self, element: ElementHandle, value: &str) {
        self.with_node(element, |n| {
            if n.kind == ElementKind::Input {
                n.value = value.to_string();
            }
        });
    }

    fn value(&self, element: ElementHandle) -> String {
        self.state
            .borrow()
            .nodes
            .get(&element)
            .map(|n| n.value.clone())
            .unwrap_or_default()
    }

    fn add_class(&self, element: ElementHandle, class: &str) {
        self.with_node(element, |n| {
            if !n.classes.iter().any(|c| c == class) {
                n.classes.push(class.to_string());
            }
        });
    }

    fn remove_class(&self, element: ElementHandle, class: &str) {
        self.with_node(element, |n| n.classes.retain(|c| c != class));
    }

    fn has_class(&self, element: ElementHandle, class: &str) -> bool {
        self.state
            .borrow()
            .nodes
            .get(&element)
            .map(|n| n.classes.iter().any(|c| c == class))
            .unwrap_or(false)
    }

    fn append(&self, container: ElementHandle, child: ElementHandle) {
        let mut state = self.state.borrow_mut();
        if container == child || !state.nodes.contains_key(&container) {
            return;
        }
        let old_parent = match state.nodes.get(&child) {
            Some(node) => node.parent,
            None => return,
        };
        // Re-appending moves the node, as the DOM does
        if let Some(parent) = old_parent.and_then(|p| state.nodes.get_mut(&p)) {
            parent.children.retain(|c| *c != child);
        }
        if let Some(node) = state.nodes.get_mut(&child) {
            node.parent = Some(container);
        }
        if let Some(parent) = state.nodes.get_mut(&container) {
            parent.children.push(child);
        }
    }

    fn remove(&self, container: ElementHandle, child: ElementHandle) {
        let mut state = self.state.borrow_mut();
        let is_child = state
            .nodes
            .get(&child)
            .map(|n| n.parent == Some(container))
            .unwrap_or(false);
        if !is_child {
            return;
        }
        if let Some(parent) = state.nodes.get_mut(&container) {
            parent.children.retain(|c| *c != child);
        }
        if let Some(node) = state.nodes.get_mut(&child) {
            node.parent = None;
        }
    }

    fn bind(&self, element: ElementHandle, kind: EventKind, handler: Handler) -> BindingId {
        let mut state = self.state.borrow_mut();
        let id = BindingId(state.next_binding);
        state.next_binding += 1;
        state.bindings.insert(id, Binding { element, kind, handler });
        id
    }

    fn unbind(&self, binding: BindingId) {
        self.state.borrow_mut().bindings.remove(&binding);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn test_append_and_remove() {
        let tree = MemoryTree::new();
        let root = tree.create(ElementKind::Container);
        let a = tree.create(ElementKind::Button);
        let b = tree.create(ElementKind::Button);
        tree.append(root, a);
        tree.append(root, b);
        assert_eq!(tree.children(root), vec![a, b]);
        assert_eq!(tree.parent(a), Some(root));

        tree.remove(root, a);
        tree.remove(root, a);
        assert_eq!(tree.children(root), vec![b]);
        assert_eq!(tree.parent(a), None);
    }

    #[test]
    fn test_append_moves_between_containers() {
        let tree = MemoryTree::new();
        let left = tree.create(ElementKind::Container);
        let right = tree.create(ElementKind::Container);
        let child = tree.create(ElementKind::Text);
        tree.append(left, child);
        tree.append(right, child);
        assert!(tree.children(left).is_empty());
        assert_eq!(tree.children(right), vec![child]);
    }

    #[test]
    fn test_dispatch_runs_bound_handlers_until_unbound() {
        let tree = MemoryTree::new();
        let button = tree.create(ElementKind::Button);
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        let id = tree.bind(button, EventKind::Activate, Rc::new(move |_| counter.set(counter.get() + 1)));

        tree.click(button);
        tree.click(button);
        assert_eq!(hits.get(), 2);

        tree.unbind(id);
        tree.unbind(id);
        tree.click(button);
        assert_eq!(hits.get(), 2);
        assert_eq!(tree.binding_count(), 0);
    }

    #[test]
    fn test_submit_does_not_fire_activation_handlers() {
        let tree = MemoryTree::new();
        let form = tree.create(ElementKind::Form);
        let hits = Rc::new(Cell::new(0));
        let counter = hits.clone();
        tree.bind(form, EventKind::Activate, Rc::new(move |_| counter.set(counter.get() + 1)));
        tree.bind(form, EventKind::Submit, Rc::new(|ev| ev.prevent_default()));

        let ev = tree.dispatch(form, EventKind::Submit);
        assert!(ev.default_prevented());
        assert_eq!(hits.get(), 0);
    }

    #[test]
    fn test_handler_may_mutate_tree() {
        let tree = Rc::new(MemoryTree::new());
        let root = tree.create(ElementKind::Container);
        let button = tree.create(ElementKind::Button);
        tree.append(root, button);
        let inner = tree.clone();
        tree.bind(
            button,
            EventKind::Activate,
            Rc::new(move |_| {
                let text = inner.create(ElementKind::Text);
                inner.set_text(text, "added");
                inner.append(root, text);
            }),
        );
        tree.click(button);
        assert_eq!(tree.children(root).len(), 2);
    }

    #[test]
    fn test_classes_and_find_by_class() {
        let tree = MemoryTree::new();
        let root = tree.create(ElementKind::Container);
        let inner = tree.create(ElementKind::Container);
        let img = tree.create(ElementKind::Image);
        tree.append(root, inner);
        tree.append(inner, img);
        tree.add_class(img, "cat-img");
        tree.add_class(img, "cat-img");
        assert!(tree.has_class(img, "cat-img"));
        assert_eq!(tree.find_by_class(root, "cat-img"), vec![img]);

        tree.remove_class(img, "cat-img");
        assert!(tree.find_by_class(root, "cat-img").is_empty());
    }

    #[test]
    fn test_value_only_applies_to_inputs() {
        let tree = MemoryTree::new();
        let input = tree.create(ElementKind::Input);
        let text = tree.create(ElementKind::Text);
        tree.set_value(input, "abc");
        tree.set_value(text, "abc");
        assert_eq!(tree.value(input), "abc");
        assert_eq!(tree.value(text), "");
    }

    #[test]
    fn test_release_drops_node_and_bindings() {
        let tree = MemoryTree::new();
        let root = tree.create(ElementKind::Container);
        let img = tree.create(ElementKind::Image);
        tree.append(root, img);
        tree.bind(img, EventKind::Activate, Rc::new(|_| {}));
        tree.release(img);
        assert!(!tree.contains(img));
        assert!(tree.children(root).is_empty());
        assert_eq!(tree.binding_count(), 0);
        // Stale handle operations are ignored
        tree.set_text(img, "ignored");
        assert_eq!(tree.text(img), "");
    }
}
