//! Arena-backed recency list.
//!
//! Entries live in a `Vec` of slots addressed by stable indices. The
//! doubly-linked recency order is expressed as `prev`/`next` index fields
//! inside each slot, so the key index can hold plain [`Handle`]s instead of
//! references into the list. Vacated slots are recycled through a free list.
//!
//! Front = most recently used, back = least recently used.

/// Null link.
const NIL: usize = usize::MAX;

/// Position of an entry inside a [`RecencyList`].
///
/// A handle stays valid until its entry is removed. Using a handle after
/// removal is a logic error and panics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Handle(usize);

/// A resident cache entry.
#[derive(Debug)]
pub(crate) struct Entry<V> {
    pub key: String,
    pub value: V,
    /// Byte cost captured when the value was stored.
    pub cost: u64,
}

#[derive(Debug)]
struct Slot<V> {
    entry: Option<Entry<V>>,
    prev: usize,
    next: usize,
}

/// Doubly-linked list of entries ordered by recency.
#[derive(Debug)]
pub(crate) struct RecencyList<V> {
    slots: Vec<Slot<V>>,
    free: Vec<usize>,
    head: usize,
    tail: usize,
    len: usize,
}

impl<V> RecencyList<V> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: NIL,
            tail: NIL,
            len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert an entry as the most recently used one.
    pub fn push_front(&mut self, entry: Entry<V>) -> Handle {
        let slot = Slot {
            entry: Some(entry),
            prev: NIL,
            next: NIL,
        };

        let idx = match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = slot;
                idx
            }
            None => {
                self.slots.push(slot);
                self.slots.len() - 1
            }
        };

        self.link_front(idx);
        self.len += 1;
        Handle(idx)
    }

    /// Mark an entry as the most recently used one.
    pub fn move_to_front(&mut self, handle: Handle) {
        let idx = handle.0;
        debug_assert!(self.slots[idx].entry.is_some(), "stale handle");
        if self.head == idx {
            return;
        }
        self.unlink(idx);
        self.link_front(idx);
    }

    /// Remove an entry and hand it back to the caller.
    pub fn remove(&mut self, handle: Handle) -> Entry<V> {
        let idx = handle.0;
        let entry = match self.slots[idx].entry.take() {
            Some(entry) => entry,
            None => panic!("recency list handle {idx} used after removal"),
        };

        self.unlink(idx);
        self.free.push(idx);
        self.len -= 1;
        entry
    }

    /// Remove the least recently used entry.
    pub fn pop_back(&mut self) -> Option<Entry<V>> {
        if self.tail == NIL {
            return None;
        }
        Some(self.remove(Handle(self.tail)))
    }

    /// Reset to an empty list, detaching every entry at once.
    ///
    /// All handles are invalidated. The detached entries are yielded by the
    /// returned iterator and dropped with it, which lets the caller choose
    /// where that happens.
    pub fn clear(&mut self) -> impl Iterator<Item = Entry<V>> + use<V> {
        let slots = std::mem::take(&mut self.slots);
        self.free.clear();
        self.head = NIL;
        self.tail = NIL;
        self.len = 0;
        slots.into_iter().filter_map(|slot| slot.entry)
    }

    pub fn get(&self, handle: Handle) -> &Entry<V> {
        match self.slots[handle.0].entry.as_ref() {
            Some(entry) => entry,
            None => panic!("recency list handle {} used after removal", handle.0),
        }
    }

    pub fn get_mut(&mut self, handle: Handle) -> &mut Entry<V> {
        match self.slots[handle.0].entry.as_mut() {
            Some(entry) => entry,
            None => panic!("recency list handle {} used after removal", handle.0),
        }
    }

    /// Iterate from most to least recently used.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            list: self,
            cursor: self.head,
        }
    }

    fn link_front(&mut self, idx: usize) {
        let old_head = self.head;
        {
            let slot = &mut self.slots[idx];
            slot.prev = NIL;
            slot.next = old_head;
        }
        if old_head != NIL {
            self.slots[old_head].prev = idx;
        } else {
            self.tail = idx;
        }
        self.head = idx;
    }

    fn unlink(&mut self, idx: usize) {
        let (prev, next) = {
            let slot = &self.slots[idx];
            (slot.prev, slot.next)
        };

        if prev != NIL {
            self.slots[prev].next = next;
        } else {
            self.head = next;
        }

        if next != NIL {
            self.slots[next].prev = prev;
        } else {
            self.tail = prev;
        }

        let slot = &mut self.slots[idx];
        slot.prev = NIL;
        slot.next = NIL;
    }
}

/// Front-to-back iterator over a [`RecencyList`].
pub(crate) struct Iter<'a, V> {
    list: &'a RecencyList<V>,
    cursor: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a Entry<V>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor == NIL {
            return None;
        }
        let slot = &self.list.slots[self.cursor];
        self.cursor = slot.next;
        slot.entry.as_ref()
    }
}
