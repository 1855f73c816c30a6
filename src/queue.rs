/*!
# Priority Queue with Decrease-Key

A binary min-heap over `(element, priority)` entries stored densely in a `Vec` (children of index
`i` live at `2i + 1` and `2i + 2`). Besides the usual `enqueue`/`dequeue`, it supports lowering the
priority of a pending element in place, which is what Dijkstra and Prim need.

Elements are located for [`PriorityQueue::decrease_key`] by a linear scan on equality. This is
`O(n)` per call, which is fine for hand-drawn graphs. Heap order is strict (`<`), so entries of
equal priority leave in an order that only depends on the sequence of operations.

```
use stepgraphs::queue::PriorityQueue;

let mut queue = PriorityQueue::new();
for (element, priority) in [('a', 5.0), ('b', 3.0), ('c', 8.0), ('d', 1.0)] {
    queue.enqueue(element, priority);
}
queue.decrease_key(&'c', 2.0);

assert_eq!(queue.dequeue(), Some('d'));
assert_eq!(queue.dequeue(), Some('c'));
assert_eq!(queue.dequeue(), Some('b'));
assert_eq!(queue.dequeue(), Some('a'));
assert_eq!(queue.dequeue(), None);
```
*/

use tracing::warn;

use crate::error::AlgoError;

/// An element together with its priority
#[derive(Debug, Clone, PartialEq)]
pub struct Entry<T> {
    pub element: T,
    pub priority: f64,
}

/// Result of [`PriorityQueue::decrease_key`]. Only `Decreased` changes the queue.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum DecreaseKey {
    Decreased,
    /// The element is not in the queue
    NotFound,
    /// The new priority is not strictly smaller than the current one
    NotLower,
}

/// Binary min-heap keyed by an `f64` priority
#[derive(Debug, Clone)]
pub struct PriorityQueue<T> {
    heap: Vec<Entry<T>>,
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self { heap: Vec::new() }
    }
}

impl<T> PriorityQueue<T> {
    /// Creates an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty queue with room for `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// The entries in heap layout, i.e. the root first
    pub fn entries(&self) -> &[Entry<T>] {
        &self.heap
    }

    /// Copies the entries in heap layout, translating every element with `f`
    pub fn map_entries<U>(&self, mut f: impl FnMut(&T) -> U) -> Vec<Entry<U>> {
        self.heap
            .iter()
            .map(|entry| Entry {
                element: f(&entry.element),
                priority: entry.priority,
            })
            .collect()
    }

    /// Returns the element with the smallest priority without removing it
    pub fn peek(&self) -> Option<&T> {
        self.heap.first().map(|entry| &entry.element)
    }

    /// Returns the smallest priority in the queue
    pub fn peek_priority(&self) -> Option<f64> {
        self.heap.first().map(|entry| entry.priority)
    }

    /// Appends the element and moves it towards the root while it is smaller than its parent.
    pub fn enqueue(&mut self, element: T, priority: f64) {
        self.heap.push(Entry { element, priority });
        self.sift_up(self.heap.len() - 1);
    }

    /// Removes and returns the element with the smallest priority; `None` if the queue is empty.
    pub fn dequeue(&mut self) -> Option<T> {
        if self.heap.is_empty() {
            warn!("dequeue on empty priority queue");
            return None;
        }

        // moves the last entry into the root
        let root = self.heap.swap_remove(0);
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some(root.element)
    }

    /// As [`PriorityQueue::dequeue`], but reports an empty queue as [`AlgoError::EmptyQueue`]
    pub fn try_dequeue(&mut self) -> Result<T, AlgoError> {
        self.dequeue().ok_or(AlgoError::EmptyQueue)
    }

    /// Removes all entries and returns the elements in dequeue order
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut sorted = Vec::with_capacity(self.len());
        while !self.heap.is_empty() {
            let root = self.heap.swap_remove(0);
            if !self.heap.is_empty() {
                self.sift_down(0);
            }
            sorted.push(root.element);
        }
        sorted
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.heap[index].priority >= self.heap[parent].priority {
                break;
            }
            self.heap.swap(index, parent);
            index = parent;
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * index + 1;
            let right = left + 1;
            if left >= len {
                break;
            }

            let mut smaller = left;
            if right < len && self.heap[right].priority < self.heap[left].priority {
                smaller = right;
            }

            if self.heap[smaller].priority >= self.heap[index].priority {
                break;
            }
            self.heap.swap(index, smaller);
            index = smaller;
        }
    }
}

impl<T: PartialEq> PriorityQueue<T> {
    fn position(&self, element: &T) -> Option<usize> {
        self.heap.iter().position(|entry| entry.element == *element)
    }

    /// Returns true if the element is pending in the queue
    pub fn contains(&self, element: &T) -> bool {
        self.position(element).is_some()
    }

    /// Current priority of a pending element
    pub fn priority_of(&self, element: &T) -> Option<f64> {
        self.position(element).map(|i| self.heap[i].priority)
    }

    /// Lowers the priority of a pending element and restores heap order.
    ///
    /// If the element is missing or `new_priority` is not strictly smaller than its current
    /// priority, the queue is left untouched and the returned value says why.
    pub fn decrease_key(&mut self, element: &T, new_priority: f64) -> DecreaseKey {
        let Some(index) = self.position(element) else {
            warn!("decrease_key: element not found in priority queue");
            return DecreaseKey::NotFound;
        };

        let current = self.heap[index].priority;
        if !(new_priority < current) {
            warn!(current, new_priority, "decrease_key: priority would not decrease");
            return DecreaseKey::NotLower;
        }

        self.heap[index].priority = new_priority;
        self.sift_up(index);
        DecreaseKey::Decreased
    }
}
