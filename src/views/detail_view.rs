//! Detail View
//!
//! Image of the selected item plus its click counter. Clicking the image
//! asks the controller to increment, then refreshes only the counter text so
//! the image is never reloaded by a click.

use std::cell::RefCell;
use std::rc::Rc;

use display_tree::{BindingId, DisplayEvent, DisplayTree, ElementHandle, ElementKind, EventKind};

use crate::controller::{IncrementCallback, ItemDetail};
use crate::error::{AppError, AppResult};
use crate::models::Item;

pub const COUNTER_CLASS: &str = "click-counter-text";
pub const IMAGE_CLASS: &str = "cat-img";

type ItemSlot = Rc<RefCell<Option<Rc<Item>>>>;

/// Elements created by one `init`
#[derive(Clone, Copy)]
struct Mounted {
    counter_text: ElementHandle,
    image: ElementHandle,
    binding: BindingId,
}

pub struct DetailView<D: DisplayTree> {
    tree: Rc<D>,
    container: ElementHandle,
    /// Shared with the image handler so it can re-render after a click
    current_item: ItemSlot,
    mounted: Option<Mounted>,
}

impl<D: DisplayTree + 'static> DetailView<D> {
    pub fn new(tree: Rc<D>, container: ElementHandle) -> Self {
        Self {
            tree,
            container,
            current_item: Rc::new(RefCell::new(None)),
            mounted: None,
        }
    }

    /// Build counter text and image, bind the image, and render `item`
    pub fn init(&mut self, item: Option<Rc<Item>>, on_increment: IncrementCallback) -> AppResult<()> {
        let item = item.ok_or_else(|| AppError::invalid("detail view requires an item"))?;
        self.unmount();

        let tree = &self.tree;
        let counter_text = tree.create(ElementKind::Text);
        tree.add_class(counter_text, COUNTER_CLASS);
        let image = tree.create(ElementKind::Image);
        tree.add_class(image, IMAGE_CLASS);

        let weak_tree = Rc::downgrade(tree);
        let slot = self.current_item.clone();
        let binding = tree.bind(
            image,
            EventKind::Activate,
            Rc::new(move |_ev: &DisplayEvent| {
                if let Err(e) = on_increment() {
                    log::error!("[DETAIL] increment failed: {}", e);
                    return;
                }
                if let Some(tree) = weak_tree.upgrade() {
                    render_counter(&*tree, counter_text, &slot);
                }
            }),
        );

        tree.append(self.container, counter_text);
        tree.append(self.container, image);
        self.mounted = Some(Mounted {
            counter_text,
            image,
            binding,
        });

        self.set_item(item);
        self.render();
        Ok(())
    }

    /// Detach the image binding, then remove both elements
    pub fn unmount(&mut self) {
        if let Some(mounted) = self.mounted.take() {
            self.tree.unbind(mounted.binding);
            for element in [mounted.counter_text, mounted.image] {
                self.tree.remove(self.container, element);
                self.tree.release(element);
            }
        }
    }

    pub fn current_item(&self) -> Option<Rc<Item>> {
        self.current_item.borrow().clone()
    }

    pub fn image(&self) -> Option<ElementHandle> {
        self.mounted.map(|m| m.image)
    }

    pub fn counter_text(&self) -> Option<ElementHandle> {
        self.mounted.map(|m| m.counter_text)
    }
}

impl<D: DisplayTree + 'static> ItemDetail for DetailView<D> {
    fn set_item(&mut self, item: Rc<Item>) {
        *self.current_item.borrow_mut() = Some(item);
    }

    /// Setting `src` reloads the image, so this only runs on a real
    /// selection change or edit
    fn render(&self) {
        let Some(mounted) = self.mounted else {
            return;
        };
        if let Some(item) = self.current_item.borrow().as_ref() {
            self.tree.set_attribute(mounted.image, "src", &item.url);
        }
        self.render_counter_only();
    }

    fn render_counter_only(&self) {
        if let Some(mounted) = self.mounted {
            render_counter(&*self.tree, mounted.counter_text, &self.current_item);
        }
    }
}

fn render_counter<D: DisplayTree + ?Sized>(tree: &D, counter_text: ElementHandle, slot: &RefCell<Option<Rc<Item>>>) {
    if let Some(item) = slot.borrow().as_ref() {
        tree.set_text(counter_text, &item.counter_label());
    }
}
