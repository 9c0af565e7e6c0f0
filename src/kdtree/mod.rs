//! Static k-d tree with soft deletion.
//!
//! The tree is built once over a fixed point set and never changes shape. Popping an
//! element only flips its `used` flag and decrements the unused counters on the path
//! from its leaf to the root, so empty subtrees are skipped without rescanning them.
//!
//! Nodes live in a flat arena and refer to each other by index.

use {
  num_traits::ToPrimitive,
  std::fmt::{Debug, Formatter}
};

mod builder;
mod search;

pub use search::SearchStats;

/// Below this many elements a subtree becomes a leaf bucket and is scanned linearly.
pub const DEFAULT_LEAF_SIZE: usize = 50;

/// An element of a fixed-dimensional metric space.
pub trait KdPoint {
  type Scalar: Copy + PartialOrd + ToPrimitive;
  const DIMENSIONS: usize;

  fn get(&self, dim: usize) -> Self::Scalar;

  #[inline]
  fn coord(&self, dim: usize) -> f64 {
    self.get(dim).to_f64().unwrap_or(f64::NAN)
  }
}

/// Squared euclidean distance.
pub fn distance2<T: KdPoint>(a: &T, b: &T) -> f64 {
  (0..T::DIMENSIONS)
    .map(|dim| (a.coord(dim) - b.coord(dim)).powi(2))
    .sum()
}

pub(crate) type NodeId = u32;
pub(crate) const ROOT: NodeId = 0;
pub(crate) const NO_PARENT: NodeId = NodeId::MAX;

#[derive(Debug, Copy, Clone)]
pub(crate) enum NodeKind {
  Internal {
    left: NodeId,
    right: NodeId,
    dim: usize,
    split: f64
  },
  /// Bucket of `items[start..end]`
  Leaf {
    start: usize,
    end: usize
  }
}

#[derive(Debug, Copy, Clone)]
pub(crate) struct Node {
  pub parent: NodeId,
  /// Number of unused elements in this subtree
  pub remaining: usize,
  pub kind: NodeKind
}

pub struct KdTree<T> {
  pub(crate) nodes: Vec<Node>,
  pub(crate) items: Vec<T>,
  pub(crate) used: Vec<bool>,
  leaf_size: usize
}

impl<T: KdPoint> KdTree<T> {
  /// Total number of elements the tree was built with, popped or not.
  pub fn len(&self) -> usize {
    self.items.len()
  }

  /// Number of elements not popped yet.
  pub fn num_leaves(&self) -> usize {
    self.nodes[ROOT as usize].remaining
  }

  pub fn is_exhausted(&self) -> bool {
    self.num_leaves() == 0
  }

  pub fn node_count(&self) -> usize {
    self.nodes.len()
  }

  pub fn leaf_size(&self) -> usize {
    self.leaf_size
  }

  /// Elements that can still be popped, in storage order.
  pub fn unused(&self) -> impl Iterator<Item = &T> + '_ {
    self.items.iter()
      .zip(&self.used)
      .filter_map(|(item, used)| (!used).then(|| item))
  }

  /// Closest unused element to `query`, without consuming it.
  ///
  /// Panics if every element has been popped.
  pub fn get_closest(&self, query: &T, epsilon: f64) -> &T {
    let found = self.closest_node(query, epsilon, &mut SearchStats::default());
    &self.items[found.slot]
  }

  /// Remove the closest unused element to `query` and return it.
  ///
  /// `epsilon = 0` is an exact nearest neighbour search; larger values allow a result up to
  /// `1 + epsilon` times farther than the true nearest neighbour.
  /// Panics if every element has been popped.
  pub fn pop_closest(&mut self, query: &T, epsilon: f64) -> T where T: Clone {
    self.pop_closest_with_stats(query, epsilon, &mut SearchStats::default())
  }

  pub fn pop_closest_with_stats(&mut self, query: &T, epsilon: f64, stats: &mut SearchStats) -> T
    where T: Clone {
    let found = self.closest_node(query, epsilon, stats);
    self.used[found.slot] = true;

    let mut id = found.leaf;
    while id != NO_PARENT {
      let node = &mut self.nodes[id as usize];
      node.remaining -= 1;
      id = node.parent;
    }
    self.items[found.slot].clone()
  }

  fn memory_footprint(&self) -> usize {
    self.nodes.capacity() * std::mem::size_of::<Node>()
      + self.items.capacity() * std::mem::size_of::<T>()
      + self.used.capacity() * std::mem::size_of::<bool>()
  }
}

impl<T: KdPoint> Debug for KdTree<T> {
  fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
    use humansize::{FileSize, file_size_opts as options};

    f.debug_struct("KdTree")
      .field("len", &self.len())
      .field("remaining", &self.num_leaves())
      .field("nodes", &self.node_count())
      .field("leaf_size", &self.leaf_size)
      .field("size", &self.memory_footprint()
        .file_size(options::BINARY)
        .unwrap_or_else(|e| e))
      .finish()
  }
}
