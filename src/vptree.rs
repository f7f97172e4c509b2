//! Vantage-Point Trees are a data structure for fast
//! k-nearest-neighbor searches in arbitrary metric spaces.
//!
//! Each node holds one item (its vantage point) and a radius `mu`. Items
//! in the inner subtree lie within `mu` of the vantage point and items in
//! the outer subtree lie at `mu` or beyond, which lets a search skip whole
//! subtrees using the triangle inequality.
use rand::Rng;
use std::fmt::Debug;
use tracing::{debug, trace};

use crate::heap::BoundedMaxHeap;
use crate::median::select_nth_by_key;
use crate::metric::{Float, ItemMetric, Metric, MetricItem, Scalar};
use num::Zero;

struct TaggedItem<F, T> {
    item: T,
    dist: F,
}

struct VPNode<F, T> {
    inner: Option<Box<VPNode<F, T>>>,
    outer: Option<Box<VPNode<F, T>>>,
    center: T,
    mu: F,
}

/// One search result: an indexed item and its distance to the query.
#[derive(Debug, PartialEq)]
pub struct Neighbor<'a, T, F> {
    pub item: &'a T,
    pub distance: F,
}

impl<'a, T, F: Copy> Clone for Neighbor<'a, T, F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<'a, T, F: Copy> Copy for Neighbor<'a, T, F> {}

/// Counters collected during one search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Number of tree nodes whose vantage point was measured.
    pub visited: usize,
}

impl<F: Scalar, T> VPNode<F, T> {
    fn leaf(center: T) -> Self {
        VPNode {
            inner: None,
            outer: None,
            center,
            mu: F::zero(),
        }
    }

    fn build<M, R>(metric: &M, mut items: Vec<TaggedItem<F, T>>, rng: &mut R) -> Option<Box<Self>>
    where
        M: Metric<T, Distance = F>,
        R: Rng + ?Sized,
    {
        if items.is_empty() {
            return None;
        }

        let sel_index = rng.gen_range(0..items.len());
        let vp = items.swap_remove(sel_index).item;
        if items.is_empty() {
            return Some(Box::new(VPNode::leaf(vp)));
        }

        for ti in items.iter_mut() {
            ti.dist = metric.distance(&ti.item, &vp);
        }

        // Split at the median distance: everything before `m` is no
        // farther than the item at `m`, everything from `m` on is no nearer.
        let m = items.len() / 2;
        select_nth_by_key(&mut items, m, |ti| ti.dist, rng);
        let mu = items[m].dist;

        let outer_items = items.split_off(m);
        let inner = VPNode::build(metric, items, rng);
        let outer = VPNode::build(metric, outer_items, rng);

        Some(Box::new(VPNode {
            inner,
            outer,
            center: vp,
            mu,
        }))
    }

    fn depth(&self) -> usize {
        let inner = self.inner.as_ref().map_or(0, |n| n.depth());
        let outer = self.outer.as_ref().map_or(0, |n| n.depth());
        1 + inner.max(outer)
    }

    fn dump_into(&self, label: &str, level: usize, out: &mut String)
    where
        T: Debug,
    {
        out.push_str(&format!(
            "{:indent$}{}{:?} mu={}\n",
            "",
            label,
            self.center,
            self.mu,
            indent = 2 * level
        ));
        if let Some(ref inner) = self.inner {
            inner.dump_into("< ", level + 1, out);
        }
        if let Some(ref outer) = self.outer {
            outer.dump_into("> ", level + 1, out);
        }
    }
}

/// Per-query state. Lives only for the duration of one search so that a
/// shared tree can serve any number of concurrent queries.
struct SearchContext<'a, 'q, T, M: Metric<T>> {
    metric: &'a M,
    target: &'q T,
    tau: M::Distance,
    candidates: BoundedMaxHeap<M::Distance, &'a T>,
    visited: usize,
}

impl<'a, 'q, T, M: Metric<T>> SearchContext<'a, 'q, T, M> {
    fn visit(&mut self, node: &'a VPNode<M::Distance, T>) {
        self.visited += 1;
        let d = self.metric.distance(&node.center, self.target);

        if d < self.tau {
            self.candidates.push(&node.center, d);
            if self.candidates.is_full() {
                if let Some(worst) = self.candidates.peek_max() {
                    self.tau = worst.dist;
                }
            }
        }

        // Visit the side the target falls on first; it tightens tau sooner.
        if d < node.mu {
            self.visit_inner(node, d);
            self.visit_outer(node, d);
        } else {
            self.visit_outer(node, d);
            self.visit_inner(node, d);
        }
    }

    fn visit_inner(&mut self, node: &'a VPNode<M::Distance, T>, d: M::Distance) {
        if let Some(ref inner) = node.inner {
            if d - self.tau <= node.mu {
                self.visit(inner);
            }
        }
    }

    fn visit_outer(&mut self, node: &'a VPNode<M::Distance, T>, d: M::Distance) {
        if let Some(ref outer) = node.outer {
            if d + self.tau >= node.mu {
                self.visit(outer);
            }
        }
    }
}

/// A vantage point tree over items of type `T` under the metric `M`.
///
/// The tree is immutable once built. Searches keep their state on the
/// stack, so `&VPTree` can be shared between threads whenever `T` and `M`
/// allow it.
pub struct VPTree<T, M: Metric<T>> {
    root: Option<Box<VPNode<M::Distance, T>>>,
    metric: M,
    len: usize,
}

impl<T: MetricItem> VPTree<T, ItemMetric> {
    /// Construct a tree from items that carry their own distance.
    pub fn new(items: Vec<T>) -> Self {
        VPTree::with_metric(ItemMetric, items)
    }

    /// Like [`VPTree::new`], drawing vantage points from `rng`.
    pub fn new_with_rng<R: Rng + ?Sized>(items: Vec<T>, rng: &mut R) -> Self {
        VPTree::with_metric_and_rng(ItemMetric, items, rng)
    }
}

impl<T, M: Metric<T>> VPTree<T, M> {
    /// Construct a new vantage point tree from a set of elements, using
    /// the thread-local RNG for vantage point selection.
    ///
    /// ```
    /// use vptree::VPTree;
    ///
    /// let tree = VPTree::with_metric(|a: &i64, b: &i64| (a - b).abs() as f64, vec![0, 10, 20, 30, 40]);
    /// let (items, dists) = tree.search(&22, 2);
    /// assert_eq!(items, vec![&20, &30]);
    /// assert_eq!(dists, vec![2.0, 8.0]);
    /// ```
    pub fn with_metric(metric: M, items: Vec<T>) -> Self {
        VPTree::with_metric_and_rng(metric, items, &mut rand::thread_rng())
    }

    /// Construct a tree, drawing vantage points from `rng`. A seeded RNG
    /// makes the tree shape reproducible; search results never depend on
    /// it.
    pub fn with_metric_and_rng<R: Rng + ?Sized>(metric: M, items: Vec<T>, rng: &mut R) -> Self {
        let len = items.len();
        let tagged: Vec<TaggedItem<M::Distance, T>> = items
            .into_iter()
            .map(|item| TaggedItem {
                item,
                dist: <M::Distance as Zero>::zero(),
            })
            .collect();
        let root = VPNode::build(&metric, tagged, rng);
        let tree = VPTree { root, metric, len };
        debug!(items = len, depth = tree.depth(), "built vantage point tree");

        tree
    }

    /// Number of indexed items.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of nodes on the longest root-to-leaf path; 0 when empty.
    pub fn depth(&self) -> usize {
        self.root.as_ref().map_or(0, |n| n.depth())
    }

    pub fn metric(&self) -> &M {
        &self.metric
    }

    /// Find the `k` nearest items to `target`, returned with their
    /// distances in ascending order of distance.
    ///
    /// Returns `min(k, self.len())` results; nothing at all when `k` is 0.
    pub fn search<'a>(&'a self, target: &T, k: usize) -> (Vec<&'a T>, Vec<M::Distance>) {
        self.search_with_stats(target, k)
            .0
            .into_iter()
            .map(|n| (n.item, n.distance))
            .unzip()
    }

    /// Like [`VPTree::search`], also reporting how much of the tree was
    /// visited.
    pub fn search_with_stats<'a>(
        &'a self,
        target: &T,
        k: usize,
    ) -> (Vec<Neighbor<'a, T, M::Distance>>, SearchStats) {
        let root = match self.root {
            Some(ref root) if k > 0 => root,
            _ => return (Vec::new(), SearchStats::default()),
        };

        let mut ctx = SearchContext {
            metric: &self.metric,
            target,
            tau: <M::Distance as Float>::infinity(),
            candidates: BoundedMaxHeap::with_capacity(k.min(self.len)),
            visited: 0,
        };
        ctx.visit(root);

        let stats = SearchStats {
            visited: ctx.visited,
        };
        let neighbors: Vec<_> = ctx
            .candidates
            .into_sorted_vec()
            .into_iter()
            .map(|c| Neighbor {
                item: c.item,
                distance: c.dist,
            })
            .collect();
        trace!(k, found = neighbors.len(), visited = stats.visited, "vantage point search");

        (neighbors, stats)
    }

    /// Find the nearest item and its distance, or `None` for an empty tree.
    pub fn nearest_neighbor<'a>(&'a self, target: &T) -> Option<(&'a T, M::Distance)> {
        self.search_with_stats(target, 1)
            .0
            .first()
            .map(|n| (n.item, n.distance))
    }

    /// Find the `k` nearest items, closest first.
    pub fn nearest_neighbors<'a>(&'a self, target: &T, k: usize) -> Vec<&'a T> {
        self.search(target, k).0
    }
}

impl<T: Debug, M: Metric<T>> VPTree<T, M> {
    /// Render the tree, one node per line, children indented under their
    /// parent and marked `<` (inner) or `>` (outer).
    pub fn dump(&self) -> String {
        let mut out = String::new();
        if let Some(ref root) = self.root {
            root.dump_into("", 0, &mut out);
        }
        out
    }
}
