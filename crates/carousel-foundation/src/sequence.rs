//! Render sequence construction.
//!
//! A looping carousel lays out one extra clone at each end of the item list:
//! the last item in front, the first item behind. Spring animations can then
//! always travel in the requested direction, and the position state machine
//! teleports back into the original range once they settle.

use std::fmt;
use std::ops::Index;
use std::rc::Rc;

/// Caller-supplied identity of a carousel item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(pub u64);

/// One entry of the caller's item list. The payload is opaque to the carousel.
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselItem<T> {
    pub id: ItemId,
    pub payload: T,
}

impl<T> CarouselItem<T> {
    pub fn new(id: u64, payload: T) -> Self {
        Self {
            id: ItemId(id),
            payload,
        }
    }
}

/// A laid-out slot of the render sequence.
pub struct RenderEntry<T> {
    pub item: Rc<CarouselItem<T>>,
    /// Position of `item` in the caller's list.
    pub source_index: usize,
    /// `true` for the boundary clones of a looping sequence.
    pub is_clone: bool,
}

impl<T> RenderEntry<T> {
    /// Stable render key; clones share the item id, so the slot index is part of it.
    pub fn key(&self, render_index: usize) -> (ItemId, usize) {
        (self.item.id, render_index)
    }
}

impl<T> Clone for RenderEntry<T> {
    fn clone(&self) -> Self {
        Self {
            item: Rc::clone(&self.item),
            source_index: self.source_index,
            is_clone: self.is_clone,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for RenderEntry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderEntry")
            .field("id", &self.item.id)
            .field("source_index", &self.source_index)
            .field("is_clone", &self.is_clone)
            .finish()
    }
}

/// Items in layout order. Rebuilt wholesale, never patched.
pub struct RenderSequence<T> {
    entries: Vec<RenderEntry<T>>,
    item_count: usize,
    looping: bool,
}

impl<T> RenderSequence<T> {
    /// Builds the render sequence for `items`.
    ///
    /// Without looping the sequence mirrors `items`. With looping it is
    /// `[last, items.., first]`, including the single-item case
    /// (clone, original, clone). An empty list yields an empty sequence.
    pub fn build(items: &[Rc<CarouselItem<T>>], looping: bool) -> Self {
        let count = items.len();
        let originals = items.iter().enumerate().map(|(index, item)| RenderEntry {
            item: Rc::clone(item),
            source_index: index,
            is_clone: false,
        });

        let entries = match (items.first(), items.last()) {
            (Some(first), Some(last)) if looping => {
                let mut entries = Vec::with_capacity(count + 2);
                entries.push(RenderEntry {
                    item: Rc::clone(last),
                    source_index: count - 1,
                    is_clone: true,
                });
                entries.extend(originals);
                entries.push(RenderEntry {
                    item: Rc::clone(first),
                    source_index: 0,
                    is_clone: true,
                });
                entries
            }
            _ => originals.collect(),
        };

        Self {
            entries,
            item_count: count,
            looping,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of original items (N).
    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn is_looping(&self) -> bool {
        self.looping
    }

    pub fn get(&self, render_index: usize) -> Option<&RenderEntry<T>> {
        self.entries.get(render_index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RenderEntry<T>> {
        self.entries.iter()
    }
}

impl<T> Index<usize> for RenderSequence<T> {
    type Output = RenderEntry<T>;

    fn index(&self, render_index: usize) -> &Self::Output {
        &self.entries[render_index]
    }
}

impl<T> Clone for RenderSequence<T> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            item_count: self.item_count,
            looping: self.looping,
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for RenderSequence<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderSequence")
            .field("looping", &self.looping)
            .field("entries", &self.entries)
            .finish()
    }
}
