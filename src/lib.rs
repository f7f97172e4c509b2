//! Exact k-nearest-neighbor search over arbitrary metric spaces using
//! vantage point trees.
//!
//! Build a [`VPTree`] once from a collection of items and a distance
//! function, then query it any number of times, from any number of
//! threads:
//!
//! ```
//! use vptree::VPTree;
//!
//! let fingerprints: Vec<u32> = vec![0x00, 0xff, 0xf0, 0x0f];
//! let hamming = |a: &u32, b: &u32| (a ^ b).count_ones() as f64;
//! let tree = VPTree::with_metric(hamming, fingerprints);
//!
//! let (found, dists) = tree.search(&0xf1, 2);
//! assert_eq!(found, vec![&0xf0, &0xff]);
//! assert_eq!(dists, vec![1.0, 3.0]);
//! ```
//!
//! Results are exact as long as the distance function is a true metric
//! (non-negative, symmetric, triangle inequality). This is not checked;
//! a function that breaks these rules yields lower quality results rather
//! than an error.
extern crate num;
extern crate order_stat;
extern crate rand;

pub mod heap;
pub mod linear;
pub mod median;
pub mod metric;
pub mod vptree;

pub use median::median_of_three;
pub use metric::{ItemMetric, Metric, MetricItem, Scalar};
pub use vptree::{Neighbor, SearchStats, VPTree};
