//! Construction items.

use std::collections::HashMap;

/// Index of an interned [`Item`].
pub type ItemId = usize;

/// A parse position: `offset` bytes into segment `segment` of route `route`.
///
/// For variable segments the offset is only 0 (nothing consumed yet) or 1
/// (at least one byte consumed).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Item {
    pub route: usize,
    pub segment: usize,
    pub offset: usize,
}

impl Item {
    pub fn new(route: usize, segment: usize, offset: usize) -> Self {
        Self {
            route,
            segment,
            offset,
        }
    }
}

/// Hash-consing pool handing out one id per distinct item.
#[derive(Debug, Default)]
pub struct ItemPool {
    items: Vec<Item>,
    ids: HashMap<Item, ItemId>,
}

impl ItemPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the id of `item`, allocating one on first sight.
    pub fn intern(&mut self, item: Item) -> ItemId {
        if let Some(&id) = self.ids.get(&item) {
            return id;
        }
        let id = self.items.len();
        self.items.push(item);
        self.ids.insert(item, id);
        id
    }

    pub fn get(&self, id: ItemId) -> Item {
        self.items[id]
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_interning_reuses_ids() {
        let mut pool = ItemPool::new();
        let a = pool.intern(Item::new(0, 0, 0));
        let b = pool.intern(Item::new(0, 1, 0));
        assert_ne!(a, b);
        assert_eq!(pool.intern(Item::new(0, 0, 0)), a);
        assert_eq!(pool.len(), 2);
        assert_eq!(pool.get(b), Item::new(0, 1, 0));
    }
}
