use std::cmp::Ordering;

type Link<T> = Option<Box<Node<T>>>;

#[derive(Debug, Clone)]
struct Node<T> {
    key: f64,
    data: T,
    height: usize,
    left: Link<T>,
    right: Link<T>,
}

impl<T> Node<T> {
    fn leaf(key: f64, data: T) -> Box<Self> {
        Box::new(Self {
            key,
            data,
            height: 1,
            left: None,
            right: None,
        })
    }

    fn update_height(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
    }

    fn balance_factor(&self) -> isize {
        height(&self.left) as isize - height(&self.right) as isize
    }
}

#[inline]
fn height<T>(link: &Link<T>) -> usize {
    link.as_ref().map_or(0, |node| node.height)
}

/// Folds `-0.0` into `0.0` so both zeros compare equal under `total_cmp`
#[inline]
fn canonical(key: f64) -> f64 {
    key + 0.0
}

/// Orders an incoming key against a stored one by IEEE total order. Equal
/// keys go right.
#[inline]
fn descend_left(key: f64, node_key: f64) -> bool {
    key.total_cmp(&node_key) == Ordering::Less
}

fn rotate_right<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    let Some(mut pivot) = node.left.take() else {
        return node;
    };
    node.left = pivot.right.take();
    node.update_height();
    pivot.right = Some(node);
    pivot.update_height();
    pivot
}

fn rotate_left<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    let Some(mut pivot) = node.right.take() else {
        return node;
    };
    node.right = pivot.left.take();
    node.update_height();
    pivot.left = Some(node);
    pivot.update_height();
    pivot
}

/// Restore the AVL invariant at `node`, whose subtrees are already balanced
fn rebalance<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    node.update_height();
    let balance = node.balance_factor();

    if balance > 1 {
        // Left-right case reduces to left-left
        if node.left.as_ref().is_some_and(|left| left.balance_factor() < 0) {
            node.left = node.left.take().map(rotate_left);
        }
        return rotate_right(node);
    }

    if balance < -1 {
        // Right-left case reduces to right-right
        if node.right.as_ref().is_some_and(|right| right.balance_factor() > 0) {
            node.right = node.right.take().map(rotate_right);
        }
        return rotate_left(node);
    }

    node
}

fn insert_node<T>(link: Link<T>, key: f64, data: T) -> Box<Node<T>> {
    match link {
        None => Node::leaf(key, data),
        Some(mut node) => {
            if descend_left(key, node.key) {
                node.left = Some(insert_node(node.left.take(), key, data));
            } else {
                node.right = Some(insert_node(node.right.take(), key, data));
            }
            rebalance(node)
        }
    }
}

fn collect_range<'a, T>(link: &'a Link<T>, lo: f64, hi: f64, out: &mut Vec<&'a T>) {
    let Some(node) = link else {
        return;
    };

    // Left keys never exceed node.key, right keys are never below it
    let above_lo = node.key.total_cmp(&lo) != Ordering::Less;
    let below_hi = node.key.total_cmp(&hi) != Ordering::Greater;
    if above_lo {
        collect_range(&node.left, lo, hi, out);
    }
    if above_lo && below_hi {
        out.push(&node.data);
    }
    if below_hi {
        collect_range(&node.right, lo, hi, out);
    }
}

/// Recomputed height of a subtree, or `None` if any node is out of balance
fn checked_height<T>(link: &Link<T>) -> Option<usize> {
    match link {
        None => Some(0),
        Some(node) => {
            let left = checked_height(&node.left)?;
            let right = checked_height(&node.right)?;
            (left.abs_diff(right) <= 1).then(|| 1 + left.max(right))
        }
    }
}

/// Height-balanced (AVL) search tree of records keyed by score
///
/// Duplicate scores are allowed; an equal key is inserted into the right
/// subtree. Insert, point lookup and range boundaries are O(log n).
///
/// Keys are ordered by `f64::total_cmp` with `-0.0` folded into `0.0`.
/// Scores should not be NaN; if one is stored anyway it sorts after every
/// number (a negative NaN before every number) and never hides other
/// records from `search` or `search_range`.
#[derive(Debug, Clone)]
pub struct RatingTree<T> {
    root: Link<T>,
    size: usize,
}

impl<T> RatingTree<T> {
    pub fn new() -> Self {
        Self { root: None, size: 0 }
    }

    /// Insert `data` under `key`, rebalancing along the path to the root
    pub fn insert(&mut self, data: T, key: f64) {
        self.root = Some(insert_node(self.root.take(), canonical(key), data));
        self.size += 1;
    }

    /// Some record whose key equals `key` exactly
    pub fn search(&self, key: f64) -> Option<&T> {
        let key = canonical(key);
        let mut current = self.root.as_ref();

        while let Some(node) = current {
            match key.total_cmp(&node.key) {
                Ordering::Equal => return Some(&node.data),
                Ordering::Less => current = node.left.as_ref(),
                Ordering::Greater => current = node.right.as_ref(),
            }
        }

        None
    }

    /// Records with `lo <= key <= hi`, ascending by key
    pub fn search_range(&self, lo: f64, hi: f64) -> Vec<&T> {
        let mut out = Vec::new();
        if lo <= hi {
            collect_range(&self.root, canonical(lo), canonical(hi), &mut out);
        }
        out
    }

    pub fn count_range(&self, lo: f64, hi: f64) -> usize {
        self.search_range(lo, hi).len()
    }

    /// All records ascending by key
    pub fn in_order_traversal(&self) -> Vec<&T> {
        self.iter().map(|(_, data)| data).collect()
    }

    /// `(key, record)` pairs ascending by key
    pub fn iter(&self) -> Iter<'_, T> {
        let mut iter = Iter { stack: Vec::new() };
        iter.push_left(self.root.as_deref());
        iter
    }

    /// Lowest-scored record
    pub fn min(&self) -> Option<(f64, &T)> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some((node.key, &node.data))
    }

    /// Highest-scored record
    pub fn max(&self) -> Option<(f64, &T)> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Some((node.key, &node.data))
    }

    /// Number of levels; 0 for an empty tree
    pub fn height(&self) -> usize {
        height(&self.root)
    }

    /// Checks the AVL invariant at every node from recomputed heights
    pub fn is_balanced(&self) -> bool {
        checked_height(&self.root).is_some()
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn clear(&mut self) {
        self.root = None;
        self.size = 0;
    }
}

impl<T> Default for RatingTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// In-order iterator over a `RatingTree`
pub struct Iter<'a, T> {
    stack: Vec<&'a Node<T>>,
}

impl<'a, T> Iter<'a, T> {
    fn push_left(&mut self, mut node: Option<&'a Node<T>>) {
        while let Some(current) = node {
            self.stack.push(current);
            node = current.left.as_deref();
        }
    }
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (f64, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left(node.right.as_deref());
        Some((node.key, &node.data))
    }
}
