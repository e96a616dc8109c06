use std::cmp::Ordering;

#[derive(Debug, Clone)]
struct Slot<T> {
    data: T,
    priority: f64,
}

/// Array-backed binary max-heap
///
/// The slot at index `i` never has a lower priority than its children at
/// `2i + 1` and `2i + 2`. Extraction order among equal priorities is
/// unspecified. Negative and zero priorities are ordered normally.
/// Priorities are compared with `f64::total_cmp`, so a stray NaN ranks
/// above every number instead of breaking the heap order.
#[derive(Debug, Clone)]
pub struct PriorityQueue<T> {
    heap: Vec<Slot<T>>,
}

impl<T> PriorityQueue<T> {
    pub fn new() -> Self {
        Self { heap: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            heap: Vec::with_capacity(capacity),
        }
    }

    /// Append and sift up. O(log n).
    pub fn insert(&mut self, data: T, priority: f64) {
        self.heap.push(Slot { data, priority });
        self.sift_up(self.heap.len() - 1);
    }

    /// Remove and return a highest-priority record. O(log n).
    pub fn extract_max(&mut self) -> Option<T> {
        self.extract_max_with_priority().map(|(data, _)| data)
    }

    pub fn extract_max_with_priority(&mut self) -> Option<(T, f64)> {
        let last = self.heap.pop()?;
        if self.heap.is_empty() {
            return Some((last.data, last.priority));
        }

        let root = std::mem::replace(&mut self.heap[0], last);
        self.sift_down(0);
        Some((root.data, root.priority))
    }

    /// Highest-priority record without removing it. O(1).
    pub fn peek(&self) -> Option<&T> {
        self.heap.first().map(|slot| &slot.data)
    }

    pub fn peek_priority(&self) -> Option<f64> {
        self.heap.first().map(|slot| slot.priority)
    }

    pub fn size(&self) -> usize {
        self.heap.len()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn clear(&mut self) {
        self.heap.clear();
    }

    /// Drain into a vector ordered by descending priority
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut sorted = Vec::with_capacity(self.heap.len());
        while let Some(data) = self.extract_max() {
            sorted.push(data);
        }
        sorted
    }

    #[inline]
    fn outranks(&self, a: usize, b: usize) -> bool {
        self.heap[a].priority.total_cmp(&self.heap[b].priority) == Ordering::Greater
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if !self.outranks(index, parent) {
                break;
            }
            self.heap.swap(parent, index);
            index = parent;
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * index + 1;
            let right = left + 1;
            let mut largest = index;

            if left < len && self.outranks(left, largest) {
                largest = left;
            }
            if right < len && self.outranks(right, largest) {
                largest = right;
            }
            if largest == index {
                break;
            }

            self.heap.swap(index, largest);
            index = largest;
        }
    }
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<(T, f64)> for PriorityQueue<T> {
    /// Bottom-up heapify in O(n)
    fn from_iter<I: IntoIterator<Item = (T, f64)>>(iter: I) -> Self {
        let mut queue = Self {
            heap: iter
                .into_iter()
                .map(|(data, priority)| Slot { data, priority })
                .collect(),
        };
        for index in (0..queue.heap.len() / 2).rev() {
            queue.sift_down(index);
        }
        queue
    }
}

impl<T> Extend<(T, f64)> for PriorityQueue<T> {
    fn extend<I: IntoIterator<Item = (T, f64)>>(&mut self, iter: I) {
        for (data, priority) in iter {
            self.insert(data, priority);
        }
    }
}
