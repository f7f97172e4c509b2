use rand::Rng;
use std::cmp::Ordering;

/// Total order over distances: NaN sorts after every number and equal to
/// itself.
#[allow(clippy::eq_op)]
pub(crate) fn cmp_distance<F: PartialOrd>(x: &F, y: &F) -> Ordering {
    match x.partial_cmp(y) {
        Some(ord) => ord,
        None => {
            let x_nan = x != x;
            let y_nan = y != y;
            x_nan.cmp(&y_nan)
        }
    }
}

/// Return the position (0, 1 or 2) of the median of three values.
///
/// ```
/// use vptree::median_of_three;
/// assert_eq!(median_of_three(&1.0, &2.0, &3.0), 1);
/// assert_eq!(median_of_three(&1.0, &3.0, &2.0), 2);
/// assert_eq!(median_of_three(&3.0, &1.0, &2.0), 2);
/// assert_eq!(median_of_three(&2.0, &1.0, &3.0), 0);
/// assert_eq!(median_of_three(&3.0, &2.0, &1.0), 1);
/// assert_eq!(median_of_three(&2.0, &3.0, &1.0), 0);
/// assert_eq!(median_of_three(&2.0, &2.0, &2.0), 1);
/// ```
pub fn median_of_three<F: PartialOrd>(a: &F, b: &F, c: &F) -> usize {
    use std::cmp::Ordering::Greater;

    let le = |x: &F, y: &F| cmp_distance(x, y) != Greater;
    if le(a, b) {
        if le(b, c) {
            1
        } else if le(a, c) {
            2
        } else {
            0
        }
    } else if le(a, c) {
        0
    } else if le(b, c) {
        2
    } else {
        1
    }
}

/// Pick a pivot key: the median of three randomly chosen keys.
fn choose_pivot<T, F, K, R>(arr: &[T], key: &K, rng: &mut R) -> F
where
    F: PartialOrd,
    K: Fn(&T) -> F,
    R: Rng + ?Sized,
{
    let n = arr.len();
    if n < 3 {
        return key(&arr[rng.gen_range(0..n)]);
    }
    let a = key(&arr[rng.gen_range(0..n)]);
    let b = key(&arr[rng.gen_range(0..n)]);
    let c = key(&arr[rng.gen_range(0..n)]);
    match median_of_three(&a, &b, &c) {
        0 => a,
        1 => b,
        _ => c,
    }
}

/// Three-way partition of `arr` around `pivot`.
///
/// Returns `(lt, gt)` such that `arr[..lt]` is below the pivot,
/// `arr[lt..gt]` compares equal to it and `arr[gt..]` is above it.
fn partition3<T, F, K>(arr: &mut [T], pivot: &F, key: &K) -> (usize, usize)
where
    F: PartialOrd,
    K: Fn(&T) -> F,
{
    let mut lt = 0;
    let mut i = 0;
    let mut gt = arr.len();
    while i < gt {
        match cmp_distance(&key(&arr[i]), pivot) {
            Ordering::Less => {
                arr.swap(lt, i);
                lt += 1;
                i += 1;
            }
            Ordering::Greater => {
                gt -= 1;
                arr.swap(i, gt);
            }
            Ordering::Equal => i += 1,
        }
    }
    (lt, gt)
}

/// Partially sort `arr` so that `arr[k]` holds the element a full sort by
/// `key` would put there, every element before it has a key `<=` and
/// every element after it a key `>=`.
///
/// Pivot keys are drawn from elements of the current range, so the band
/// equal to the pivot is never empty and each round either finishes or
/// strictly shrinks the range. Long runs of equal keys finish in a single
/// round instead of degrading.
///
/// Panics if `k >= arr.len()`.
pub fn select_nth_by_key<T, F, K, R>(arr: &mut [T], k: usize, key: K, rng: &mut R)
where
    F: PartialOrd,
    K: Fn(&T) -> F,
    R: Rng + ?Sized,
{
    assert!(k < arr.len(), "selection index {} out of range for length {}", k, arr.len());

    let mut lo = 0;
    let mut hi = arr.len();
    while hi - lo > 1 {
        let pivot = choose_pivot(&arr[lo..hi], &key, rng);
        let (lt, gt) = partition3(&mut arr[lo..hi], &pivot, &key);
        if k < lo + lt {
            hi = lo + lt;
        } else if k >= lo + gt {
            lo += gt;
        } else {
            return;
        }
    }
}
