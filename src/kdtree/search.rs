use super::{distance2, KdTree, KdPoint, NodeId, NodeKind, ROOT};

/// Work done by one or more searches.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct SearchStats {
  pub nodes_visited: u64,
  pub leaves_visited: u64,
  /// Distance evaluations against stored elements
  pub comparisons: u64
}

#[derive(Debug, Copy, Clone)]
pub(crate) struct Candidate {
  pub distance2: f64,
  pub leaf: NodeId,
  pub slot: usize
}

impl<T: KdPoint> KdTree<T> {
  pub(crate) fn closest_node(&self, query: &T, epsilon: f64, stats: &mut SearchStats) -> Candidate {
    assert!(self.num_leaves() > 0, "k-d tree is exhausted: every element has already been popped");
    debug_assert!(epsilon >= 0.0, "epsilon must be non-negative, got {epsilon}");

    let mut best = None;
    self.search(ROOT, query, epsilon, &mut best, stats);
    best.unwrap_or_else(|| unreachable!("a non-empty subtree always yields a candidate"))
  }

  /// Only ever called on subtrees with at least one unused element.
  fn search(
    &self,
    id: NodeId,
    query: &T,
    epsilon: f64,
    best: &mut Option<Candidate>,
    stats: &mut SearchStats
  ) {
    stats.nodes_visited += 1;
    match self.nodes[id as usize].kind {
      NodeKind::Leaf { start, end } => {
        stats.leaves_visited += 1;
        for slot in start..end {
          if self.used[slot] {
            continue;
          }
          stats.comparisons += 1;
          let distance2 = distance2(&self.items[slot], query);
          // strict: on ties the first candidate found wins
          if best.map_or(true, |b| distance2 < b.distance2) {
            *best = Some(Candidate { distance2, leaf: id, slot });
          }
        }
      }
      NodeKind::Internal { left, right, dim, split } => {
        let diff = query.coord(dim) - split;
        let (near, far) = if diff < 0.0 { (left, right) } else { (right, left) };

        if self.nodes[near as usize].remaining == 0 {
          self.search(far, query, epsilon, best, stats);
          return;
        }
        self.search(near, query, epsilon, best, stats);

        if self.nodes[far as usize].remaining > 0 {
          let reach = diff.abs() * (1.0 + epsilon);
          if best.map_or(true, |b| reach * reach <= b.distance2) {
            self.search(far, query, epsilon, best, stats);
          }
        }
      }
    }
  }
}
