//! Exhaustive k-nearest-neighbor search.
//!
//! Measures every item, so it is exact for any distance function, metric
//! or not. Useful as a baseline and as a correctness oracle for
//! [`VPTree`](crate::VPTree).
use crate::median::cmp_distance;
use crate::metric::Metric;
use crate::vptree::Neighbor;

/// Find the `k` items of `items` nearest to `target`, closest first.
///
/// ```
/// use vptree::linear;
///
/// let items = [0, 10, 20, 30, 40];
/// let found = linear::knn(&|a: &i32, b: &i32| (a - b).abs() as f64, &items, &22, 2);
/// let dists: Vec<f64> = found.iter().map(|n| n.distance).collect();
/// assert_eq!(dists, vec![2.0, 8.0]);
/// ```
pub fn knn<'a, T, M>(metric: &M, items: &'a [T], target: &T, k: usize) -> Vec<Neighbor<'a, T, M::Distance>>
where
    M: Metric<T>,
{
    let k = k.min(items.len());
    if k == 0 {
        return Vec::new();
    }

    let mut all: Vec<Neighbor<'a, T, M::Distance>> = items
        .iter()
        .map(|item| Neighbor {
            item,
            distance: metric.distance(item, target),
        })
        .collect();

    if k < all.len() {
        order_stat::kth_by(&mut all, k - 1, |a, b| cmp_distance(&a.distance, &b.distance));
        all.truncate(k);
    }
    all.sort_by(|a, b| cmp_distance(&a.distance, &b.distance));
    all
}

#[cfg(test)]
mod tests {
    use super::knn;

    fn abs_diff(a: &i32, b: &i32) -> f64 {
        (a - b).abs() as f64
    }

    #[test]
    fn selects_and_sorts() {
        let items = [9, -4, 17, 3, 0, 12, 6];
        let found: Vec<i32> = knn(&abs_diff, &items, &4, 3).iter().map(|n| *n.item).collect();
        assert_eq!(found, vec![3, 6, 0]);
    }

    #[test]
    fn k_larger_than_items() {
        let items = [1, 2];
        assert_eq!(knn(&abs_diff, &items, &0, 10).len(), 2);
        assert!(knn(&abs_diff, &items, &0, 0).is_empty());
        let empty: [i32; 0] = [];
        assert!(knn(&abs_diff, &empty, &0, 3).is_empty());
    }

    #[test]
    fn nan_distances_sort_last() {
        // Every third item measures as NaN.
        let spotty = |a: &i32, b: &i32| {
            if a % 3 == 0 {
                std::f64::NAN
            } else {
                (a - b).abs() as f64
            }
        };
        let items: Vec<i32> = (0..5_000).rev().collect();

        let all = knn(&spotty, &items, &10, items.len());
        assert_eq!(all.len(), items.len());
        let numbers = all.iter().take_while(|n| !n.distance.is_nan()).count();
        assert_eq!(numbers, 3_333);
        assert!(all[numbers..].iter().all(|n| n.distance.is_nan()));
        assert!(all[..numbers].windows(2).all(|w| w[0].distance <= w[1].distance));

        let few = knn(&spotty, &items, &10, 4);
        let dists: Vec<f64> = few.iter().map(|n| n.distance).collect();
        assert_eq!(dists, vec![0.0, 1.0, 2.0, 3.0]);
    }
}
