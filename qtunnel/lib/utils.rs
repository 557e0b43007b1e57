//! Miscellaneous tools.

use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::Arr1;

/// Return `true` if bit `k` of basis index `idx` is set.
#[inline]
pub fn bit(idx: usize, k: usize) -> bool { (idx >> k) & 1 == 1 }

/// Sum of squared magnitudes over all amplitudes.
pub fn norm_squared<S>(q: &Arr1<S>) -> f64
where S: nd::Data<Elem = C64>
{
    q.iter().map(|qk| qk.norm_sqr()).sum()
}

/// Largest elementwise distance between two complex arrays.
///
/// *Panics if the arrays have different lengths*.
pub fn max_deviation<S, T>(a: &Arr1<S>, b: &Arr1<T>) -> f64
where
    S: nd::Data<Elem = C64>,
    T: nd::Data<Elem = C64>,
{
    assert_eq!(a.len(), b.len());
    a.iter().zip(b)
        .map(|(ak, bk)| (ak - bk).norm())
        .fold(0.0, f64::max)
}

/// `n` evenly spaced values over `[start, stop]`, with the endpoint pinned to
/// `stop` exactly.
pub fn linspace(start: f64, stop: f64, n: usize) -> nd::Array1<f64> {
    let mut x: nd::Array1<f64> = nd::Array1::linspace(start, stop, n);
    if let Some(last) = x.last_mut() { *last = stop; }
    x
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bits() {
        // 0b1010
        assert!(!bit(10, 0));
        assert!(bit(10, 1));
        assert!(!bit(10, 2));
        assert!(bit(10, 3));
    }

    #[test]
    fn linspace_endpoints() {
        let x = linspace(-1.0, 1.0, 16);
        assert_eq!(x.len(), 16);
        assert_eq!(x[0], -1.0);
        assert_eq!(x[15], 1.0);
        assert!((x[1] - x[0] - 2.0 / 15.0).abs() < 1e-15);
    }
}
