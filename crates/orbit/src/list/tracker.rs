use super::pitch::{ItemPitch, ScrollState};
use crate::error::Error;
use crate::item::{Item, ItemId, ensure_unique_ids};
use crate::settings::ListSettings;

/// Handle onto the host's scrollable list.
pub trait ScrollContainer {
    /// Rendered height of the first row, `None` while nothing is laid out.
    fn first_entry_height(&self) -> Option<f64>;

    /// Top edge of row `index` within the scrolled content.
    fn entry_top(&self, index: usize) -> Option<f64>;

    /// Moves the viewport to `offset` with the host's smooth interpolation.
    fn smooth_scroll_to(&mut self, offset: f64);
}

/// Keeps the row under the top of a scrolled list as the "now playing" item.
#[derive(Debug, Clone)]
pub struct ActiveItemTracker {
    items: Vec<Item>,
    active: Option<usize>,
    settings: ListSettings,
}

impl ActiveItemTracker {
    pub fn new(items: Vec<Item>, settings: ListSettings) -> Result<Self, Error> {
        settings.validate()?;
        ensure_unique_ids(&items)?;
        Ok(Self {
            active: (!items.is_empty()).then_some(0),
            items,
            settings,
        })
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn settings(&self) -> &ListSettings {
        &self.settings
    }

    pub fn active_index(&self) -> Option<usize> {
        self.active
    }

    pub fn active_item(&self) -> Option<&Item> {
        self.active.and_then(|i| self.items.get(i))
    }

    pub fn is_active(&self, id: ItemId) -> bool {
        self.active_item().is_some_and(|item| item.id == id)
    }

    /// Recomputes the active row for a new scroll offset.
    ///
    /// Returns the newly active item, or `None` when it did not change or the list could not be
    /// measured.
    pub fn on_scroll<C>(&mut self, offset: f64, container: &C) -> Option<&Item>
    where
        C: ScrollContainer + ?Sized,
    {
        let pitch = ItemPitch::new(container.first_entry_height()?, self.settings.gap)?;
        let index = ScrollState {
            offset,
            pitch,
            count: self.items.len(),
        }
        .index()?;

        let candidate = self.items[index].id;
        if self.active_item().is_some_and(|item| item.id == candidate) {
            return None;
        }

        log::debug!("active row {:?} -> {index} at offset {offset:.1}", self.active);
        self.active = Some(index);
        self.items.get(index)
    }

    /// Scrolls row `index` to the top of the viewport. `false` if the row can't be located.
    pub fn scroll_to_item<C>(&self, index: usize, container: &mut C) -> bool
    where
        C: ScrollContainer + ?Sized,
    {
        let Some(top) = self
            .items
            .get(index)
            .and_then(|_| container.entry_top(index))
        else {
            return false;
        };
        container.smooth_scroll_to(top + self.settings.scroll_margin);
        true
    }

    /// Replaces the list, keeping the active item if its id survives.
    pub fn set_items(&mut self, items: Vec<Item>, settings: ListSettings) -> Result<(), Error> {
        settings.validate()?;
        ensure_unique_ids(&items)?;

        let kept = self
            .active_item()
            .and_then(|current| items.iter().position(|item| item.id == current.id));
        self.active = kept.or((!items.is_empty()).then_some(0));
        self.items = items;
        self.settings = settings;
        Ok(())
    }
}
