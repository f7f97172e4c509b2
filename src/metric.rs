//! Distance functions over opaque items.
//!
//! A metric must be non-negative, symmetric and satisfy the triangle
//! inequality for searches to return the exact nearest neighbors. None of
//! this is checked: a metric that breaks these rules only degrades the
//! quality of search results.
use std::fmt::{Debug, Display};

pub use num::Float;

pub trait Scalar: Float + Debug + Display {}
impl<T: Float + Debug + Display> Scalar for T {}

/// A distance function over items of type `T`.
///
/// Implemented for every closure or function of the shape
/// `Fn(&T, &T) -> F`, so most callers never implement it by hand:
///
/// ```
/// use vptree::Metric;
///
/// let abs_diff = |a: &i32, b: &i32| (a - b).abs() as f64;
/// assert_eq!(abs_diff.distance(&3, &7), 4.0);
/// ```
pub trait Metric<T> {
    type Distance: Scalar;

    fn distance(&self, a: &T, b: &T) -> Self::Distance;
}

impl<T, F, M> Metric<T> for M
where
    F: Scalar,
    M: Fn(&T, &T) -> F,
{
    type Distance = F;

    #[inline]
    fn distance(&self, a: &T, b: &T) -> F {
        self(a, b)
    }
}

/// Items that know the distance to other items of the same type.
pub trait MetricItem {
    type Distance: Scalar;

    fn distance(&self, other: &Self) -> Self::Distance;
}

/// Adapts a [`MetricItem`] type into a [`Metric`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemMetric;

impl<T: MetricItem> Metric<T> for ItemMetric {
    type Distance = T::Distance;

    #[inline]
    fn distance(&self, a: &T, b: &T) -> T::Distance {
        MetricItem::distance(a, b)
    }
}

#[cfg(test)]
mod tests {
    use super::{ItemMetric, Metric, MetricItem};

    struct Word(&'static str);

    impl MetricItem for Word {
        type Distance = f32;

        fn distance(&self, other: &Self) -> f32 {
            let common = self.0.chars().zip(other.0.chars()).filter(|(a, b)| a == b).count();
            (self.0.len().max(other.0.len()) - common) as f32
        }
    }

    fn hamming(a: &u8, b: &u8) -> f64 {
        (a ^ b).count_ones() as f64
    }

    #[test]
    fn function_pointer_is_a_metric() {
        assert_eq!(hamming.distance(&0b1010, &0b0110), 2.0);
    }

    #[test]
    fn item_metric_delegates() {
        assert_eq!(ItemMetric.distance(&Word("kitten"), &Word("sitten")), 1.0);
        assert_eq!(ItemMetric.distance(&Word("abc"), &Word("abc")), 0.0);
    }
}
