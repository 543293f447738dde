//! Item Store
//!
//! Owns the ordered item list and the selected index. The list is a shared
//! snapshot (`Rc<[Rc<Item>]>`): every update copies the sequence, replaces
//! one record, and keeps the untouched records shared. Anyone still holding
//! an old snapshot keeps seeing a consistent, unmodified list.

use std::rc::Rc;

use crate::error::{AppError, AppResult};
use crate::models::{Item, ItemPatch};

/// Immutable snapshot of the item list
pub type ItemList = Rc<[Rc<Item>]>;

#[derive(Debug, Clone)]
pub struct ItemStore {
    items: ItemList,
    selected_index: usize,
}

impl Default for ItemStore {
    /// A single blank item
    fn default() -> Self {
        Self::new(vec![Item::default()])
    }
}

impl ItemStore {
    pub fn new(items: Vec<Item>) -> Self {
        Self {
            items: items.into_iter().map(Rc::new).collect(),
            selected_index: 0,
        }
    }

    /// Current snapshot; later updates never change it
    pub fn items(&self) -> ItemList {
        self.items.clone()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn item(&self, index: usize) -> Option<Rc<Item>> {
        self.items.get(index).cloned()
    }

    /// `None` only when the store is empty
    pub fn selected_item(&self) -> Option<Rc<Item>> {
        self.item(self.selected_index)
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    /// Fails fast on an index that does not address an item
    pub fn set_selected_index(&mut self, index: usize) -> AppResult<()> {
        self.check_index(index)?;
        self.selected_index = index;
        Ok(())
    }

    /// Replace `items[index]` with `items[index]` merged with `patch`
    pub fn update(&mut self, patch: &ItemPatch, index: usize) -> AppResult<Rc<Item>> {
        self.check_index(index)?;
        let updated = Rc::new(self.items[index].merged(patch));
        self.items = self
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| if i == index { updated.clone() } else { item.clone() })
            .collect();
        Ok(updated)
    }

    pub fn increase_click_counter(&mut self) -> AppResult<Rc<Item>> {
        self.increase_click_counter_at(self.selected_index)
    }

    pub fn increase_click_counter_at(&mut self, index: usize) -> AppResult<Rc<Item>> {
        self.check_index(index)?;
        let next = self.items[index].click_counter.saturating_add(1);
        self.update(&ItemPatch::click_counter(next), index)
    }

    fn check_index(&self, index: usize) -> AppResult<()> {
        if index < self.items.len() {
            Ok(())
        } else {
            Err(AppError::invalid(format!(
                "index {} out of range for {} items",
                index,
                self.items.len()
            )))
        }
    }
}
