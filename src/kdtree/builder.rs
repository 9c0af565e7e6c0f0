use {
  super::{KdTree, KdPoint, Node, NodeId, NodeKind, DEFAULT_LEAF_SIZE, NO_PARENT},
  anyhow::{ensure, Result}
};

impl<T: KdPoint> KdTree<T> {
  pub fn new(points: Vec<T>) -> Result<Self> {
    Self::with_leaf_size(points, DEFAULT_LEAF_SIZE)
  }

  /// Build the tree. Subtrees with fewer than `leaf_size` elements become leaf buckets.
  pub fn with_leaf_size(mut points: Vec<T>, leaf_size: usize) -> Result<Self> {
    ensure!(!points.is_empty(), "cannot build a k-d tree over an empty point set");
    ensure!(leaf_size > 0, "k-d tree leaf size must be positive");
    ensure!(T::DIMENSIONS > 0, "k-d tree points must have at least one dimension");
    ensure!(
      points.len() < NO_PARENT as usize,
      "k-d tree supports at most {} points, got {}", NO_PARENT, points.len()
    );

    let mut nodes = Vec::with_capacity(2 * points.len() / leaf_size + 1);
    build_node(&mut nodes, &mut points, 0, leaf_size, 0, NO_PARENT);

    Ok(Self {
      nodes,
      used: vec![false; points.len()],
      items: points,
      leaf_size
    })
  }
}

/// Recursively partition `items`, which starts at `offset` in the final item array.
fn build_node<T: KdPoint>(
  nodes: &mut Vec<Node>,
  items: &mut [T],
  offset: usize,
  leaf_size: usize,
  seed_dim: usize,
  parent: NodeId
) -> NodeId {
  let id = nodes.len() as NodeId;
  nodes.push(Node {
    parent,
    remaining: items.len(),
    kind: NodeKind::Leaf { start: offset, end: offset + items.len() }
  });
  if items.len() < leaf_size {
    return id;
  }

  // every dimension degenerate: keep the leaf
  if let Some((dim, split, mid)) = median_split(items, seed_dim) {
    let next_dim = (dim + 1) % T::DIMENSIONS;
    let (lo, hi) = items.split_at_mut(mid);
    let left = build_node(nodes, lo, offset, leaf_size, next_dim, id);
    let right = build_node(nodes, hi, offset + mid, leaf_size, next_dim, id);
    nodes[id as usize].kind = NodeKind::Internal { left, right, dim, split };
  }
  id
}

/// Partition `items` around the median of the first non-degenerate dimension, starting
/// from `seed_dim`. Returns `(dim, split, mid)` such that `items[..mid] <= split` and
/// `items[mid..] >= split` along `dim`, with both halves non-empty.
fn median_split<T: KdPoint>(items: &mut [T], seed_dim: usize) -> Option<(usize, f64, usize)> {
  let n = items.len();
  (0..T::DIMENSIONS)
    .map(|k| (seed_dim + k) % T::DIMENSIONS)
    .find_map(|dim| {
      let (_, median, _) = items.select_nth_unstable_by(
        n / 2,
        |a, b| a.coord(dim).total_cmp(&b.coord(dim))
      );
      let split = median.coord(dim);

      let mid = partition(items, |p| p.coord(dim) < split);
      if mid > 0 {
        return Some((dim, split, mid));
      }
      // the median is also the minimum; move the ties to the left instead
      let mid = partition(items, |p| p.coord(dim) <= split);
      (mid < n).then(|| (dim, split, mid))
    })
}

/// Move every element matching `pred` to the front, returning how many there are.
fn partition<T>(items: &mut [T], pred: impl Fn(&T) -> bool) -> usize {
  let mut first = 0;
  for i in 0..items.len() {
    if pred(&items[i]) {
      items.swap(first, i);
      first += 1;
    }
  }
  first
}
