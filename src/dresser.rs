//! Glamour dresser cache.
//!
//! The dresser is read from the host once per change: the host exposes a
//! change token (the dresser's used-slot count) and the cache only rebuilds
//! its item list when that token moves. The list is published as a shared
//! handle, so a snapshot taken by a reader never changes underneath it.

use crate::config::EngineSettings;
use crate::entry::{ItemId, StainId};
use std::sync::Arc;

/// Dresser slots at or above this index are padding, never real items.
pub const DEFAULT_DRESSER_SLOT_LIMIT: u32 = 800;

/// One item stored in the glamour dresser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DresserCachedItem {
    pub name: String,
    /// Slot index inside the dresser, used as the source id when applying.
    pub slot: u32,
    /// Item id as stored, possibly carrying a quality/variant offset.
    pub item_id: ItemId,
    pub icon_id: u32,
    pub stain1: StainId,
    pub stain2: StainId,
}

impl DresserCachedItem {
    /// An undyed item at dresser `slot`.
    pub fn new(slot: u32, item_id: ItemId) -> Self {
        Self {
            name: String::new(),
            slot,
            item_id,
            icon_id: 0,
            stain1: 0,
            stain2: 0,
        }
    }

    /// Set both stain channels.
    pub fn with_stains(mut self, stain1: StainId, stain2: StainId) -> Self {
        self.stain1 = stain1;
        self.stain2 = stain2;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// The item id with the variant offset removed.
    pub fn base_item_id(&self, item_modifier_mod: u32) -> ItemId {
        if item_modifier_mod == 0 {
            self.item_id
        } else {
            self.item_id % item_modifier_mod
        }
    }
}

/// Host-side view of the dresser.
pub trait DresserSource {
    /// The current change token, or `None` while the dresser has not been
    /// opened and its contents are unknown.
    fn change_token(&self) -> Option<u32>;

    /// Every raw dresser entry, padding included.
    fn items(&self) -> Vec<DresserCachedItem>;
}

/// A fixed dresser, for tools and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticDresser {
    pub token: Option<u32>,
    pub items: Vec<DresserCachedItem>,
}

impl StaticDresser {
    /// A dresser that reports `token` and holds `items`.
    pub fn new(token: u32, items: Vec<DresserCachedItem>) -> Self {
        Self {
            token: Some(token),
            items,
        }
    }
}

impl DresserSource for StaticDresser {
    fn change_token(&self) -> Option<u32> {
        self.token
    }

    fn items(&self) -> Vec<DresserCachedItem> {
        self.items.clone()
    }
}

/// Cached dresser contents, refreshed only when the change token moves.
///
/// # Examples
///
/// ```rust
/// use glamplate::dresser::{DresserCache, DresserCachedItem, StaticDresser};
///
/// let mut cache = DresserCache::new();
/// let source = StaticDresser::new(2, vec![
///     DresserCachedItem::new(0, 100),
///     DresserCachedItem::new(900, 101), // padding, never surfaced
/// ]);
///
/// assert!(cache.refresh(&source));
/// assert!(!cache.refresh(&source)); // token unchanged
/// assert_eq!(cache.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct DresserCache {
    items: Arc<[DresserCachedItem]>,
    last_token: Option<u32>,
    slot_limit: u32,
}

impl DresserCache {
    /// An empty cache using the default padding limit.
    pub fn new() -> Self {
        Self::with_slot_limit(DEFAULT_DRESSER_SLOT_LIMIT)
    }

    /// An empty cache using the padding limit from `settings`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use glamplate::dresser::{DresserCache, DresserCachedItem};
    /// use glamplate::EngineSettings;
    ///
    /// let settings = EngineSettings {
    ///     dresser_slot_limit: 500,
    ///     ..EngineSettings::default()
    /// };
    /// let mut cache = DresserCache::from_settings(&settings);
    /// cache.refresh_with(1, || vec![DresserCachedItem::new(600, 100)]);
    /// assert!(cache.is_empty());
    /// ```
    pub fn from_settings(settings: &EngineSettings) -> Self {
        Self::with_slot_limit(settings.dresser_slot_limit)
    }

    /// An empty cache treating slots at or above `slot_limit` as padding.
    pub fn with_slot_limit(slot_limit: u32) -> Self {
        Self {
            items: Arc::from(Vec::new()),
            last_token: None,
            slot_limit,
        }
    }

    /// Refresh from `source` if its change token moved.
    ///
    /// Returns whether the cached list was replaced.
    pub fn refresh<S: DresserSource + ?Sized>(&mut self, source: &S) -> bool {
        match source.change_token() {
            Some(token) => self.refresh_with(token, || source.items()),
            None => false,
        }
    }

    /// Refresh with an already-read token. `items` is only called when the
    /// token differs from the last observed one.
    pub fn refresh_with<F, I>(&mut self, token: u32, items: F) -> bool
    where
        F: FnOnce() -> I,
        I: IntoIterator<Item = DresserCachedItem>,
    {
        if self.last_token == Some(token) {
            return false;
        }

        let slot_limit = self.slot_limit;
        let fresh: Vec<DresserCachedItem> = items()
            .into_iter()
            .filter(|item| item.item_id != 0 && item.slot < slot_limit)
            .collect();

        tracing::debug!(
            "Dresser refreshed: {} items (token {:?} -> {})",
            fresh.len(),
            self.last_token,
            token
        );

        self.items = Arc::from(fresh);
        self.last_token = Some(token);
        true
    }

    /// A handle to the current contents, unaffected by later refreshes.
    pub fn contents(&self) -> Arc<[DresserCachedItem]> {
        Arc::clone(&self.items)
    }

    /// The current contents, borrowed.
    pub fn as_slice(&self) -> &[DresserCachedItem] {
        &self.items
    }

    /// Number of real items cached.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether nothing is cached, either because the dresser is empty or
    /// because it has not been read yet.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The change token of the last refresh.
    pub fn last_token(&self) -> Option<u32> {
        self.last_token
    }

    /// Whether `item_id` is stored in the dresser, in normal or high
    /// quality.
    pub fn owns(&self, item_id: ItemId, settings: &EngineSettings) -> bool {
        self.items
            .iter()
            .any(|item| settings.normal_quality(item.item_id) == item_id)
    }
}

impl Default for DresserCache {
    fn default() -> Self {
        Self::new()
    }
}
