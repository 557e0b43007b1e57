//! The position grid and the quartic double-well potential sampled over it.

use ndarray as nd;
use crate::{
    Arr1,
    error::{ ConfigError, EvolResult },
    utils,
};

/// Grid positions for `qubits` qubits: `D = 2^qubits` evenly spaced points over
/// `[-1, 1]`, ascending with basis index.
pub fn grid_positions(qubits: usize) -> EvolResult<nd::Array1<f64>> {
    ConfigError::check_qubits(qubits)?;
    Ok(utils::linspace(-1.0, 1.0, 1 << qubits))
}

/// Spacing of the position grid.
pub fn grid_spacing(qubits: usize) -> EvolResult<f64> {
    ConfigError::check_qubits(qubits)?;
    Ok(2.0 / ((1_usize << qubits) - 1) as f64)
}

/// Binary labels for every basis state, zero-padded to `qubits` digits.
pub fn basis_labels(qubits: usize) -> Vec<String> {
    (0..1_usize << qubits)
        .map(|k| format!("{:0n$b}", k, n = qubits))
        .collect()
}

/// Divide a potential by its maximum, for display against probabilities.
///
/// Returned unchanged if the maximum is not positive.
pub fn scaled_potential<S>(potential: &Arr1<S>) -> nd::Array1<f64>
where S: nd::Data<Elem = f64>
{
    let max = potential.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if max > 0.0 {
        potential.mapv(|v| v / max)
    } else {
        potential.to_owned()
    }
}

/// Quartic double well `V(x) = a (x² - b²)²`, with minima at `x = ±b` and a
/// barrier of height `a b⁴` at `x = 0`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DoubleWell {
    pub a: f64,
    pub b: f64,
}

impl Default for DoubleWell {
    fn default() -> Self { Self { a: 50.0, b: 0.5 } }
}

impl DoubleWell {
    /// Evaluate the potential at a single position.
    pub fn eval(&self, x: f64) -> f64 {
        self.a * (x.powi(2) - self.b.powi(2)).powi(2)
    }

    /// Height of the central barrier above the well minima.
    pub fn barrier(&self) -> f64 { self.a * self.b.powi(4) }

    /// Sample the potential over the grid for `qubits` qubits.
    pub fn profile(&self, qubits: usize) -> EvolResult<nd::Array1<f64>> {
        ConfigError::check_potential(self.a, self.b)?;
        Ok(grid_positions(qubits)?.mapv(|x| self.eval(x)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn labels() {
        let l = basis_labels(4);
        assert_eq!(l.len(), 16);
        assert_eq!(l[0], "0000");
        assert_eq!(l[5], "0101");
        assert_eq!(l[15], "1111");
        assert_eq!(basis_labels(1), vec!["0", "1"]);
    }

    #[test]
    fn profile_is_symmetric() {
        let v = DoubleWell::default().profile(4).unwrap();
        assert_eq!(v.len(), 16);
        // endpoints: 50 * (1 - 0.25)² = 28.125
        assert_abs_diff_eq!(v[0], 28.125, epsilon = 1e-12);
        assert_abs_diff_eq!(v[15], 28.125, epsilon = 1e-12);
        for k in 0..16 {
            assert_abs_diff_eq!(v[k], v[15 - k], epsilon = 1e-12);
        }
    }

    #[test]
    fn scaling() {
        let v = DoubleWell::default().profile(4).unwrap();
        let s = scaled_potential(&v);
        let max = s.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        assert_eq!(max, 1.0);
        let zero: nd::Array1<f64> = nd::Array1::zeros(4);
        assert_eq!(scaled_potential(&zero), zero);
    }

    #[test]
    fn well_shape() {
        let w = DoubleWell::default();
        assert_eq!(w.eval(0.5), 0.0);
        assert_eq!(w.eval(-0.5), 0.0);
        assert_abs_diff_eq!(w.eval(0.0), w.barrier(), epsilon = 1e-12);
        assert_abs_diff_eq!(grid_spacing(4).unwrap(), 2.0 / 15.0, epsilon = 1e-15);
        let bad = DoubleWell { a: f64::NAN, b: 0.5 };
        assert!(bad.profile(4).is_err());
    }
}
