//! Arena-based point quadtree over `(t1, t2)` spike-pair coordinates.
//!
//! Nodes live in a flat `Vec<QuadNode>` addressed by `NodeIdx`, rather than
//! `Box`-linked child pointers — grounded on the flat-arena layout of the
//! PMantix-ParticleSim quadtree (`Vec<Node>` + index-based children) and
//! generalised here to store ordered pairs instead of particles. Leaves hold
//! up to `QT_MAX_CAP` points inline in a `SmallVec` before subdividing,
//! following the capacity/subdivide split used in the habedi-spart quadtree.

use crate::bbox::BoundingBox;
use crate::error::{GnatError, Result};
use crate::pair::SpikePair;
use smallvec::SmallVec;
use tracing::{debug, trace};

/// Maximum points a leaf holds before it subdivides.
pub const QT_MAX_CAP: usize = 4;

/// Hard cap on subdivision depth, guarding against infinite recursion when
/// many points share (or nearly share) a coordinate and keep landing in the
/// same child after every split.
pub const MAX_DEPTH: u32 = 48;

/// Index of a node within a `Quadtree`'s arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeIdx(pub(crate) u32);

#[derive(Debug)]
enum NodeKind {
    Leaf {
        points: SmallVec<[SpikePair; QT_MAX_CAP]>,
    },
    Internal {
        /// Children in NW, SW, NE, SE order, matching `BoundingBox::subdivide`.
        children: [NodeIdx; 4],
    },
}

#[derive(Debug)]
struct QuadNode {
    bounds: BoundingBox,
    depth: u32,
    kind: NodeKind,
}

/// An arena-based point quadtree indexing `SpikePair` points by `(t1, t2)`.
#[derive(Debug)]
pub struct Quadtree {
    nodes: Vec<QuadNode>,
    root: NodeIdx,
    len: usize,
}

impl Quadtree {
    /// Create an empty quadtree rooted at `bounds`.
    pub fn new(bounds: BoundingBox) -> Self {
        let root_node = QuadNode {
            bounds,
            depth: 0,
            kind: NodeKind::Leaf {
                points: SmallVec::new(),
            },
        };
        Self {
            nodes: vec![root_node],
            root: NodeIdx(0),
            len: 0,
        }
    }

    /// Number of points currently indexed.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no points.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn node(&self, idx: NodeIdx) -> &QuadNode {
        &self.nodes[idx.0 as usize]
    }

    fn node_mut(&mut self, idx: NodeIdx) -> &mut QuadNode {
        &mut self.nodes[idx.0 as usize]
    }

    /// Insert a spike-pair. Returns `Ok(true)` if the point fell within the
    /// root boundary and was inserted, `Err(PointOutOfBounds)` if it did
    /// not — per design, out-of-bounds points are a surfaced error, not a
    /// silent drop.
    pub fn insert(&mut self, pair: SpikePair) -> Result<bool> {
        let (t1, t2) = pair.point();
        let root_bounds = self.node(self.root).bounds;
        if !root_bounds.contains_point(t1 as f64, t2 as f64) {
            return Err(GnatError::PointOutOfBounds { t1, t2 });
        }
        self.insert_at(self.root, pair);
        self.len += 1;
        Ok(true)
    }

    fn insert_at(&mut self, idx: NodeIdx, pair: SpikePair) {
        let depth = self.node(idx).depth;
        match &mut self.node_mut(idx).kind {
            NodeKind::Internal { children } => {
                let children = *children;
                let (t1, t2) = pair.point();
                for child in children {
                    if self.node(child).bounds.contains_point(t1 as f64, t2 as f64) {
                        self.insert_at(child, pair);
                        return;
                    }
                }
                // Point lies exactly on the root's own boundary split that
                // no strict child claims (can only happen at the dead
                // centre of a node whose children tile it exactly up to
                // floating point rounding). Fall back to the first child
                // that contains it inclusively of its own edges.
                trace!(t1, t2, "point unclaimed by strict children, forcing NW");
                self.insert_at(children[0], pair);
            }
            NodeKind::Leaf { points } => {
                if points.len() < QT_MAX_CAP || depth >= MAX_DEPTH {
                    points.push(pair);
                } else {
                    self.subdivide(idx);
                    self.insert_at(idx, pair);
                }
            }
        }
    }

    fn subdivide(&mut self, idx: NodeIdx) {
        let (bounds, depth, old_points) = {
            let node = self.node_mut(idx);
            let old_points = match &mut node.kind {
                NodeKind::Leaf { points } => std::mem::take(points),
                NodeKind::Internal { .. } => unreachable!("subdivide called on internal node"),
            };
            (node.bounds, node.depth, old_points)
        };

        debug!(depth, n_points = old_points.len(), "subdividing quadtree leaf");

        let child_bounds = bounds.subdivide();
        let mut child_idxs = [NodeIdx(0); 4];
        for (i, cb) in child_bounds.into_iter().enumerate() {
            let child_idx = NodeIdx(self.nodes.len() as u32);
            self.nodes.push(QuadNode {
                bounds: cb,
                depth: depth + 1,
                kind: NodeKind::Leaf {
                    points: SmallVec::new(),
                },
            });
            child_idxs[i] = child_idx;
        }

        self.node_mut(idx).kind = NodeKind::Internal {
            children: child_idxs,
        };

        for pair in old_points {
            self.insert_at(idx, pair);
        }
    }

    /// Visit every point stored in a leaf whose bounding box intersects
    /// `region` (inclusive), calling `visitor` for each. This is a
    /// generic-visitor replacement for a function-pointer callback:
    /// `visitor` may be any `FnMut`, including a capturing closure that
    /// accumulates state.
    ///
    /// No per-point culling is performed: a leaf whose box merely
    /// intersects `region` has every one of its points visited, even ones
    /// that do not themselves lie within `region`. The visitor is the
    /// filter of record (see the causal kernel's edge predicate); this
    /// traversal only prunes whole subtrees.
    pub fn query_map<F>(&self, region: &BoundingBox, visitor: &mut F)
    where
        F: FnMut(&SpikePair),
    {
        self.query_at(self.root, region, visitor);
    }

    fn query_at<F>(&self, idx: NodeIdx, region: &BoundingBox, visitor: &mut F)
    where
        F: FnMut(&SpikePair),
    {
        let node = self.node(idx);
        if !node.bounds.intersects(region) {
            return;
        }
        match &node.kind {
            NodeKind::Leaf { points } => {
                for p in points {
                    visitor(p);
                }
            }
            NodeKind::Internal { children } => {
                for child in children {
                    self.query_at(*child, region, visitor);
                }
            }
        }
    }

    /// Root bounding box.
    pub fn bounds(&self) -> BoundingBox {
        self.node(self.root).bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spike::{NeuronId, Spike};

    fn pair(t1: i64, t2: i64) -> SpikePair {
        let n = NeuronId::new(0);
        SpikePair::new(Spike::new(n, t1), Spike::new(n, t2)).unwrap()
    }

    #[test]
    fn test_insert_within_capacity_stays_leaf() {
        let mut qt = Quadtree::new(BoundingBox::new(0.0, 0.0, 100.0));
        for i in 0..QT_MAX_CAP {
            qt.insert(pair(i as i64, i as i64)).unwrap();
        }
        assert_eq!(qt.len(), QT_MAX_CAP);
        assert!(matches!(qt.node(qt.root).kind, NodeKind::Leaf { .. }));
    }

    #[test]
    fn test_insert_beyond_capacity_subdivides() {
        let mut qt = Quadtree::new(BoundingBox::new(0.0, 0.0, 100.0));
        // spread points across distinct quadrants so subdivision actually
        // separates them rather than re-filling one child
        let pts = [
            (-50, -50),
            (50, -50),
            (-50, 50),
            (50, 50),
            (-60, -60),
        ];
        for (t1, t2) in pts {
            qt.insert(pair(t1, t2)).unwrap();
        }
        assert_eq!(qt.len(), 5);
        assert!(matches!(qt.node(qt.root).kind, NodeKind::Internal { .. }));
    }

    #[test]
    fn test_out_of_bounds_point_errors() {
        let mut qt = Quadtree::new(BoundingBox::new(0.0, 0.0, 10.0));
        let err = qt.insert(pair(100, 100)).unwrap_err();
        assert!(matches!(err, GnatError::PointOutOfBounds { t1: 100, t2: 100 }));
    }

    #[test]
    fn test_query_map_finds_points_in_intersecting_leaves() {
        // force a subdivision so the far point lands in a sibling leaf
        // that a small region query should never visit
        let mut qt = Quadtree::new(BoundingBox::new(0.0, 0.0, 100.0));
        qt.insert(pair(10, 10)).unwrap();
        qt.insert(pair(-10, -10)).unwrap();
        qt.insert(pair(5, 5)).unwrap();
        qt.insert(pair(-5, -5)).unwrap();
        qt.insert(pair(90, 90)).unwrap();

        let mut found = Vec::new();
        qt.query_map(&BoundingBox::new(0.0, 0.0, 20.0), &mut |p| found.push(p.point()));
        assert!(found.contains(&(10, 10)));
        assert!(found.contains(&(-10, -10)));
        assert!(!found.contains(&(90, 90)));
    }

    #[test]
    fn test_query_map_visits_superset_within_intersecting_leaf() {
        // a leaf that merely intersects the region (but isn't fully inside
        // it) still has every one of its points visited
        let mut qt = Quadtree::new(BoundingBox::new(0.0, 0.0, 100.0));
        qt.insert(pair(5, 5)).unwrap();
        qt.insert(pair(95, 95)).unwrap();

        let mut found = Vec::new();
        // region touches the root leaf but the second point lies outside it
        qt.query_map(&BoundingBox::new(0.0, 0.0, 10.0), &mut |p| found.push(p.point()));
        assert!(found.contains(&(5, 5)));
        assert!(found.contains(&(95, 95)));
    }

    #[test]
    fn test_many_points_all_retrievable() {
        let mut qt = Quadtree::new(BoundingBox::new(0.0, 0.0, 1000.0));
        for i in -200..200 {
            qt.insert(pair(i, i * 2 % 900)).unwrap();
        }
        let mut found = Vec::new();
        qt.query_map(&BoundingBox::new(0.0, 0.0, 1000.0), &mut |p| found.push(p.point()));
        assert_eq!(found.len(), qt.len());
    }
}
