use std::ops::Index;

use serde::{Deserialize, Serialize};

/// Something that may be packed: what it is worth and what it weighs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Item {
    pub value: u32,
    pub weight: u32,
}

impl Item {
    #[must_use]
    pub const fn new(value: u32, weight: u32) -> Self {
        Self { value, weight }
    }
}

/// `(value, weight)` pairs of the built-in reference catalog.
const REFERENCE_ITEMS: [(u32, u32); 16] = [
    (9, 10),
    (2, 9),
    (0, 6),
    (0, 3),
    (6, 8),
    (1, 6),
    (5, 4),
    (7, 5),
    (8, 10),
    (9, 8),
    (6, 6),
    (7, 7),
    (9, 2),
    (1, 7),
    (1, 9),
    (5, 3),
];

/// Ordered, read-only list of items.
///
/// Item indices are significant: candidates select items by position, so two
/// catalogs with the same items in a different order are different problems.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    items: Vec<Item>,
}

impl Catalog {
    #[must_use]
    pub fn new(items: Vec<Item>) -> Self {
        Self { items }
    }

    /// The fixed 16-item catalog every run uses.
    ///
    /// With a weight limit of 20 its best packing is worth 32.
    #[must_use]
    pub fn reference() -> Self {
        REFERENCE_ITEMS
            .iter()
            .map(|&(value, weight)| Item::new(value, weight))
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Item> + '_ {
        self.items.iter()
    }
}

impl Index<usize> for Catalog {
    type Output = Item;

    fn index(&self, index: usize) -> &Self::Output {
        &self.items[index]
    }
}

impl FromIterator<Item> for Catalog {
    fn from_iter<T: IntoIterator<Item = Item>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Item;
    type IntoIter = std::slice::Iter<'a, Item>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
