#[cfg(test)]
extern crate scoped_threadpool;

use alloc::fmt;
use alloc::vec::Vec;

extern crate alloc;

/// Stable handle to an entry stored in a [`List`].
///
/// A slot stays valid from the moment the entry is added until it is removed,
/// no matter how often the entry moves inside the list. Freed slots are reused
/// by later insertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Slot(usize);

/// A node in the doubly linked list.
///
/// Contains a value and the slots of the previous (more recent) and next
/// (less recent) entries. This structure is not meant to be used directly by
/// users of the `List`.
pub struct Entry<T> {
    /// The value stored in this entry.
    val: T,
    /// Slot of the previous entry in the list, `None` for the head.
    prev: Option<Slot>,
    /// Slot of the next entry in the list, `None` for the tail.
    next: Option<Slot>,
}

impl<T> Entry<T> {
    /// Creates a new, unlinked entry with the given value.
    fn new(val: T) -> Self {
        Entry {
            val,
            prev: None,
            next: None,
        }
    }

    /// Returns a reference to the value in this entry.
    pub fn get_value(&self) -> &T {
        &self.val
    }

    /// Returns a mutable reference to the value in this entry.
    pub fn get_value_mut(&mut self) -> &mut T {
        &mut self.val
    }
}

/// A doubly linked list whose nodes live in a slot arena.
///
/// Links between entries are slot indices instead of pointers, so the list
/// needs no `unsafe` code and no reference counting. Entries are ordered from
/// the front (head) to the back (tail); every operation except iteration runs
/// in O(1).
///
/// # Examples
///
/// ```ignore
/// let mut list = List::with_capacity(3);
///
/// let a = list.add(10);
/// let b = list.add(20);
///
/// // `a` was added first, so it sits at the back.
/// list.move_to_front(a);
/// assert_eq!(list.remove_last(), Some(20));
/// ```
pub struct List<T> {
    /// Current number of linked entries.
    len: usize,
    /// Slot of the first entry.
    head: Option<Slot>,
    /// Slot of the last entry.
    tail: Option<Slot>,
    /// Arena backing every entry; `None` marks a free slot.
    nodes: Vec<Option<Entry<T>>>,
    /// Free slots available for reuse.
    free: Vec<Slot>,
}

impl<T> List<T> {
    /// Creates an empty list with room for `slots` entries before the arena
    /// has to grow.
    pub fn with_capacity(slots: usize) -> List<T> {
        List {
            len: 0,
            head: None,
            tail: None,
            nodes: Vec::with_capacity(slots),
            free: Vec::new(),
        }
    }

    /// Returns the current number of items in the list.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list contains no items.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of slots allocated in the arena, occupied or free.
    #[cfg(test)]
    pub fn slots(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the slot of the first entry.
    pub fn head(&self) -> Option<Slot> {
        self.head
    }

    /// Returns the slot of the last entry.
    pub fn tail(&self) -> Option<Slot> {
        self.tail
    }

    fn entry(&self, slot: Slot) -> Option<&Entry<T>> {
        self.nodes.get(slot.0).and_then(Option::as_ref)
    }

    fn entry_mut(&mut self, slot: Slot) -> Option<&mut Entry<T>> {
        self.nodes.get_mut(slot.0).and_then(Option::as_mut)
    }

    /// Stores an entry in a free slot, growing the arena only when none is free.
    fn alloc(&mut self, entry: Entry<T>) -> Slot {
        match self.free.pop() {
            Some(slot) => {
                self.nodes[slot.0] = Some(entry);
                slot
            }
            None => {
                self.nodes.push(Some(entry));
                Slot(self.nodes.len() - 1)
            }
        }
    }

    /// Adds a value at the front of the list and returns its slot.
    pub fn add(&mut self, v: T) -> Slot {
        let slot = self.alloc(Entry::new(v));
        self.attach(slot);
        self.len += 1;
        slot
    }

    /// Unlinks an entry from its neighbours without freeing its slot.
    ///
    /// The predecessor is linked straight to the successor; head and tail are
    /// moved when the entry sits at either end. The entry's own links are
    /// cleared. Detaching an entry that is not linked does nothing.
    pub fn detach(&mut self, slot: Slot) {
        let (prev, next) = match self.entry_mut(slot) {
            Some(entry) => (entry.prev.take(), entry.next.take()),
            None => return,
        };

        match prev {
            Some(prev) => {
                if let Some(entry) = self.entry_mut(prev) {
                    entry.next = next;
                }
            }
            None if self.head == Some(slot) => self.head = next,
            None => {}
        }

        match next {
            Some(next) => {
                if let Some(entry) = self.entry_mut(next) {
                    entry.prev = prev;
                }
            }
            None if self.tail == Some(slot) => self.tail = prev,
            None => {}
        }
    }

    /// Links a detached entry in front of the current head.
    pub fn attach(&mut self, slot: Slot) {
        let old_head = self.head;
        match self.entry_mut(slot) {
            Some(entry) => {
                entry.prev = None;
                entry.next = old_head;
            }
            None => return,
        }

        match old_head {
            Some(old_head) => {
                if let Some(entry) = self.entry_mut(old_head) {
                    entry.prev = Some(slot);
                }
            }
            None => self.tail = Some(slot),
        }
        self.head = Some(slot);
    }

    /// Moves an entry to the front of the list.
    pub fn move_to_front(&mut self, slot: Slot) {
        if self.head == Some(slot) {
            return;
        }
        self.detach(slot);
        self.attach(slot);
    }

    /// Unlinks an entry, frees its slot and returns its value.
    pub fn remove(&mut self, slot: Slot) -> Option<T> {
        self.entry(slot)?;
        self.detach(slot);
        let entry = self.nodes[slot.0].take()?;
        self.free.push(slot);
        self.len -= 1;
        Some(entry.val)
    }

    /// Removes the last (least recently attached) item from the list.
    pub fn remove_last(&mut self) -> Option<T> {
        let tail = self.tail?;
        self.remove(tail)
    }

    /// Returns the value stored in `slot`.
    pub fn get_value(&self, slot: Slot) -> Option<&T> {
        self.entry(slot).map(Entry::get_value)
    }

    /// Returns a mutable reference to the value stored in `slot`.
    pub fn get_value_mut(&mut self, slot: Slot) -> Option<&mut T> {
        self.entry_mut(slot).map(Entry::get_value_mut)
    }

    /// Iterates over the values from front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            cursor: self.head,
            remaining: self.len,
        }
    }

    /// Walks the list in both directions and panics if any link is broken.
    #[cfg(test)]
    pub fn assert_links(&self) {
        let mut forward = alloc::vec::Vec::new();
        let mut prev = None;
        let mut cursor = self.head;
        while let Some(slot) = cursor {
            let entry = self.entry(slot).expect("linked slot must be occupied");
            assert_eq!(entry.prev, prev, "back-reference of {slot:?} is stale");
            forward.push(slot);
            assert!(forward.len() <= self.len, "cycle in forward links");
            prev = Some(slot);
            cursor = entry.next;
        }
        assert_eq!(prev, self.tail, "tail does not match the last linked entry");
        assert_eq!(forward.len(), self.len, "length does not match linked entries");

        let mut backward = alloc::vec::Vec::new();
        let mut cursor = self.tail;
        while let Some(slot) = cursor {
            backward.push(slot);
            assert!(backward.len() <= self.len, "cycle in backward links");
            cursor = self.entry(slot).and_then(|entry| entry.prev);
        }
        backward.reverse();
        assert_eq!(forward, backward);

        let occupied = self.nodes.iter().filter(|node| node.is_some()).count();
        assert_eq!(occupied, self.len, "occupied slots must all be linked");
        assert_eq!(occupied + self.free.len(), self.nodes.len());
    }
}

/// Front-to-back iterator over a [`List`].
pub struct Iter<'a, T> {
    list: &'a List<T>,
    cursor: Option<Slot>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let entry = self.list.entry(self.cursor?)?;
        self.cursor = entry.next;
        self.remaining = self.remaining.saturating_sub(1);
        Some(&entry.val)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("List")
            .field("len", &self.len)
            .field("slots", &self.nodes.len())
            .field("head", &self.head)
            .field("tail", &self.tail)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use alloc::string::{String, ToString};
    use alloc::vec;
    use alloc::vec::Vec;
    use scoped_threadpool::Pool;
    use std::sync::Mutex;

    fn values<T: Clone>(list: &List<T>) -> Vec<T> {
        list.iter().cloned().collect()
    }

    #[test]
    fn test_new_list_is_empty() {
        let list: List<u32> = List::with_capacity(5);
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert_eq!(list.head(), None);
        assert_eq!(list.tail(), None);
        assert_eq!(list.slots(), 0);
        list.assert_links();
    }

    #[test]
    fn test_add_items() {
        let mut list = List::with_capacity(3);
        let first = list.add(10);
        let second = list.add(20);
        assert_eq!(list.len(), 2);
        assert_eq!(list.head(), Some(second));
        assert_eq!(list.tail(), Some(first));
        assert_eq!(values(&list), vec![20, 10]);
        list.assert_links();
    }

    #[test]
    fn test_get_value() {
        let mut list = List::with_capacity(2);
        let slot = list.add(String::from("apple"));
        assert_eq!(list.get_value(slot).map(String::as_str), Some("apple"));

        if let Some(v) = list.get_value_mut(slot) {
            v.push_str("-pie");
        }
        assert_eq!(list.get_value(slot).map(String::as_str), Some("apple-pie"));
        assert_eq!(list.get_value(Slot(7)), None);
    }

    #[test]
    fn test_remove_last() {
        let mut list = List::with_capacity(3);
        list.add(1);
        list.add(2);
        list.add(3);

        assert_eq!(list.remove_last(), Some(1));
        assert_eq!(list.remove_last(), Some(2));
        list.assert_links();
        assert_eq!(list.remove_last(), Some(3));
        assert_eq!(list.remove_last(), None);
        assert!(list.is_empty());
        assert_eq!(list.head(), None);
        assert_eq!(list.tail(), None);
        list.assert_links();
    }

    #[test]
    fn test_move_to_front() {
        let mut list = List::with_capacity(3);
        let a = list.add("a");
        let b = list.add("b");
        let c = list.add("c");
        assert_eq!(values(&list), vec!["c", "b", "a"]);

        // tail to front
        list.move_to_front(a);
        assert_eq!(values(&list), vec!["a", "c", "b"]);
        list.assert_links();

        // middle to front
        list.move_to_front(c);
        assert_eq!(values(&list), vec!["c", "a", "b"]);
        list.assert_links();

        // head stays put
        list.move_to_front(c);
        assert_eq!(values(&list), vec!["c", "a", "b"]);
        assert_eq!(list.tail(), Some(b));
        assert_eq!(list.len(), 3);
        list.assert_links();
    }

    #[test]
    fn test_detach_single_entry_clears_ends() {
        let mut list = List::with_capacity(1);
        let only = list.add(42);
        list.detach(only);
        assert_eq!(list.head(), None);
        assert_eq!(list.tail(), None);

        // detaching twice is a no-op
        list.detach(only);
        list.attach(only);
        assert_eq!(list.head(), Some(only));
        assert_eq!(list.tail(), Some(only));
        list.assert_links();
    }

    #[test]
    fn test_remove_middle_fixes_neighbours() {
        let mut list = List::with_capacity(3);
        list.add(1);
        let middle = list.add(2);
        list.add(3);

        assert_eq!(list.remove(middle), Some(2));
        assert_eq!(values(&list), vec![3, 1]);
        assert_eq!(list.remove(middle), None);
        list.assert_links();
    }

    #[test]
    fn test_freed_slots_are_reused() {
        let mut list = List::with_capacity(2);
        list.add(1);
        list.add(2);
        for i in 3..100 {
            list.add(i);
            list.remove_last();
        }
        assert_eq!(list.len(), 2);
        assert_eq!(list.slots(), 3);
        assert_eq!(values(&list), vec![99, 98]);
        list.assert_links();
    }

    #[derive(Debug, Clone, PartialEq)]
    struct ComplexValue {
        id: u32,
        label: String,
    }

    #[test]
    fn test_list_complex_values() {
        let mut list = List::with_capacity(3);
        let first = list.add(ComplexValue {
            id: 1,
            label: "one".to_string(),
        });
        list.add(ComplexValue {
            id: 2,
            label: "two".to_string(),
        });

        list.move_to_front(first);
        let removed = list.remove_last().unwrap();
        assert_eq!(removed.id, 2);
        assert_eq!(removed.label, "two");
        assert_eq!(list.get_value(first).unwrap().label, "one");
    }

    #[test]
    fn test_iter_is_exact_size() {
        let mut list = List::with_capacity(4);
        for i in 0..4 {
            list.add(i);
        }
        let mut iter = list.iter();
        assert_eq!(iter.len(), 4);
        iter.next();
        assert_eq!(iter.len(), 3);
    }

    #[test]
    fn test_length_consistency_after_complex_operations() {
        let mut list = List::with_capacity(8);
        let mut slots = Vec::new();
        for i in 0..8 {
            slots.push(list.add(i));
        }
        for (step, slot) in slots.iter().enumerate() {
            if step % 3 == 0 {
                list.remove(*slot);
            } else {
                list.move_to_front(*slot);
            }
            list.assert_links();
        }
        assert_eq!(list.len(), 5);
        assert_eq!(values(&list), vec![7, 5, 4, 2, 1]);
    }

    #[test]
    fn test_list_behind_external_lock() {
        let list = Mutex::new(List::with_capacity(64));
        let mut pool = Pool::new(4);

        pool.scoped(|scope| {
            for t in 0..4u32 {
                let list = &list;
                scope.execute(move || {
                    for i in 0..16u32 {
                        let mut guard = list.lock().unwrap();
                        let slot = guard.add(t * 100 + i);
                        guard.move_to_front(slot);
                    }
                });
            }
        });

        let list = list.into_inner().unwrap();
        assert_eq!(list.len(), 64);
        list.assert_links();
    }
}
