//! Display Tree Adapter
//!
//! Narrow interface between imperative views and whatever hosts them.
//! Views create elements, set attributes and text, append them to
//! containers, and bind activation handlers through [`DisplayTree`];
//! they never touch `web_sys` directly.
//!
//! Two backends:
//! - [`DomTree`]: the browser DOM via `web-sys`
//! - [`MemoryTree`]: an in-memory tree with synthetic event dispatch, for tests

use std::cell::Cell;
use std::rc::Rc;

mod dom;
mod memory;

pub use dom::DomTree;
pub use memory::MemoryTree;

/// Opaque handle to an element owned by a [`DisplayTree`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementHandle(u32);

/// Opaque handle to an attached event binding
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BindingId(u32);

/// Element kinds a view may construct
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ElementKind {
    Button,
    Image,
    /// Paragraph of text
    Text,
    Form,
    Input,
    /// Generic block container
    Container,
}

impl ElementKind {
    /// HTML tag used by the DOM backend
    pub fn tag(&self) -> &'static str {
        match self {
            ElementKind::Button => "button",
            ElementKind::Image => "img",
            ElementKind::Text => "p",
            ElementKind::Form => "form",
            ElementKind::Input => "input",
            ElementKind::Container => "div",
        }
    }
}

/// Events a handler can be bound to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Click / tap
    Activate,
    /// Native form submission
    Submit,
}

impl EventKind {
    /// DOM event name
    pub fn dom_name(&self) -> &'static str {
        match self {
            EventKind::Activate => "click",
            EventKind::Submit => "submit",
        }
    }
}

/// Event delivered to a bound handler
#[derive(Debug)]
pub struct DisplayEvent {
    kind: EventKind,
    default_prevented: Cell<bool>,
}

impl DisplayEvent {
    pub fn new(kind: EventKind) -> Self {
        Self {
            kind,
            default_prevented: Cell::new(false),
        }
    }

    pub fn kind(&self) -> EventKind {
        self.kind
    }

    /// Suppress the host's default action (navigation on form submit)
    pub fn prevent_default(&self) {
        self.default_prevented.set(true);
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented.get()
    }
}

/// Event handler stored by a binding
pub type Handler = Rc<dyn Fn(&DisplayEvent)>;

/// Host display surface
///
/// All methods take `&self`; implementations use interior mutability so a
/// handler running inside a dispatch may call back into the tree.
/// Operations on unknown or released handles are no-ops.
pub trait DisplayTree {
    /// Construct a detached element
    fn create(&self, kind: ElementKind) -> ElementHandle;

    /// Forget an element handle; the element should already be detached
    fn release(&self, element: ElementHandle);

    fn set_attribute(&self, element: ElementHandle, name: &str, value: &str);

    fn attribute(&self, element: ElementHandle, name: &str) -> Option<String>;

    fn set_text(&self, element: ElementHandle, text: &str);

    fn text(&self, element: ElementHandle) -> String;

    /// Set the value of an input field
    fn set_value(&self, element: ElementHandle, value: &str);

    /// Current value of an input field (empty for non-inputs)
    fn value(&self, element: ElementHandle) -> String;

    fn add_class(&self, element: ElementHandle, class: &str);

    fn remove_class(&self, element: ElementHandle, class: &str);

    fn has_class(&self, element: ElementHandle, class: &str) -> bool;

    /// Append `child` as the last child of `container`
    fn append(&self, container: ElementHandle, child: ElementHandle);

    /// Detach `child` from `container`; no-op if it is not a child
    fn remove(&self, container: ElementHandle, child: ElementHandle);

    /// Attach `handler` for `kind` events on `element`
    fn bind(&self, element: ElementHandle, kind: EventKind, handler: Handler) -> BindingId;

    /// Detach a binding; detaching twice is a no-op
    fn unbind(&self, binding: BindingId);
}
