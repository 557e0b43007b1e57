//! Complex amplitude arrays over the `2^N` basis states of a position grid.
//!
//! A [`StateVector`] is never modified in place: every operator application
//! reads the whole input and returns a fresh vector.

use std::fmt;
use ndarray as nd;
use num_complex::Complex64 as C64;
use num_traits::One;
use crate::{
    Arr1,
    Arr2,
    error::{ ConfigError, DimensionError, EvolResult },
    utils,
};

/// Amplitudes of a discretized wavefunction, indexed by basis state.
#[derive(Clone, Debug, PartialEq)]
pub struct StateVector {
    amps: nd::Array1<C64>,
}

impl StateVector {
    /// Wrap an array of amplitudes.
    ///
    /// Fails if the length is not `2^N` for some `N` in `1..=MAX_QUBITS`. The
    /// amplitudes are taken as given; no normalization is applied.
    pub fn from_amplitudes(amps: nd::Array1<C64>) -> EvolResult<Self> {
        let n = amps.len();
        if !n.is_power_of_two() {
            return Err(ConfigError::BadDimension(n).into());
        }
        ConfigError::check_qubits(n.trailing_zeros() as usize)?;
        Ok(Self { amps })
    }

    /// The uniform superposition over `2^qubits` states, each amplitude equal
    /// to `1/√D`.
    pub fn uniform(qubits: usize) -> EvolResult<Self> {
        ConfigError::check_qubits(qubits)?;
        let d = 1_usize << qubits;
        let a = C64::from((d as f64).sqrt().recip());
        Ok(Self { amps: nd::Array1::from_elem(d, a) })
    }

    /// The basis state `|idx⟩` over `2^qubits` states.
    pub fn basis(qubits: usize, idx: usize) -> EvolResult<Self> {
        ConfigError::check_qubits(qubits)?;
        let d = 1_usize << qubits;
        if idx >= d { return Err(DimensionError(d, idx.saturating_add(1)).into()); }
        let mut amps: nd::Array1<C64> = nd::Array1::zeros(d);
        amps[idx] = C64::one();
        Ok(Self { amps })
    }

    /// Number of basis states, `D`.
    pub fn dim(&self) -> usize { self.amps.len() }

    /// Number of qubits, `N = log2(D)`.
    pub fn num_qubits(&self) -> usize { self.amps.len().trailing_zeros() as usize }

    /// Read-only view of the amplitudes.
    pub fn amplitudes(&self) -> nd::ArrayView1<'_, C64> { self.amps.view() }

    /// Consume `self`, returning the underlying amplitude array.
    pub fn into_amplitudes(self) -> nd::Array1<C64> { self.amps }

    /// Sum of `|amplitude|²` over all basis states.
    ///
    /// This is a diagnostic only; nothing in the engine renormalizes.
    pub fn norm_squared(&self) -> f64 { utils::norm_squared(&self.amps) }

    /// Elementwise product with an array of phases, returning a new state.
    pub fn apply_diagonal<S>(&self, phases: &Arr1<S>) -> EvolResult<Self>
    where S: nd::Data<Elem = C64>
    {
        DimensionError::check(phases.len(), self.dim())?;
        let amps: nd::Array1<C64>
            = nd::Zip::from(&self.amps).and(phases)
            .map_collect(|ak, pk| ak * pk);
        Ok(Self { amps })
    }

    /// Dense matrix-vector product, returning a new state.
    pub fn apply_dense<S>(&self, matrix: &Arr2<S>) -> EvolResult<Self>
    where S: nd::Data<Elem = C64>
    {
        let (rows, cols) = matrix.dim();
        DimensionError::check(cols, self.dim())?;
        DimensionError::check(rows, self.dim())?;
        Ok(Self { amps: matrix.dot(&self.amps) })
    }

    /// Probability of each basis state, `|amplitude|²`.
    pub fn probabilities(&self) -> nd::Array1<f64> {
        self.amps.mapv(|ak| ak.norm_sqr())
    }
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let n = self.num_qubits();
        for (k, ak) in self.amps.iter().enumerate() {
            writeln!(f, "|{:0n$b}⟩: {:+.6}{:+.6}i", k, ak.re, ak.im, n = n)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use crate::EvolError;

    #[test]
    fn uniform_is_normalized() {
        for n in 1..=6 {
            let q = StateVector::uniform(n).unwrap();
            assert_eq!(q.dim(), 1 << n);
            assert_eq!(q.num_qubits(), n);
            assert_abs_diff_eq!(q.norm_squared(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn rejects_bad_lengths() {
        assert!(StateVector::from_amplitudes(nd::Array1::zeros(12)).is_err());
        assert!(StateVector::from_amplitudes(nd::Array1::zeros(1)).is_err());
        assert!(StateVector::from_amplitudes(nd::Array1::zeros(8)).is_ok());
        assert!(StateVector::uniform(0).is_err());
        assert!(StateVector::basis(2, 4).is_err());
    }

    #[test]
    fn basis_index_out_of_range() {
        assert_eq!(
            StateVector::basis(2, 4).unwrap_err(),
            EvolError::DimensionMismatch(DimensionError(4, 5)),
        );
        assert_eq!(
            StateVector::basis(2, usize::MAX).unwrap_err(),
            EvolError::DimensionMismatch(DimensionError(4, usize::MAX)),
        );
    }

    #[test]
    fn diagonal_is_elementwise() {
        let q = StateVector::uniform(1).unwrap();
        let phases = nd::array![C64::from(1.0), C64::i()];
        let p = q.apply_diagonal(&phases).unwrap();
        let h = 0.5_f64.sqrt();
        assert_abs_diff_eq!(p.amplitudes()[0].re, h, epsilon = 1e-15);
        assert_abs_diff_eq!(p.amplitudes()[1].im, h, epsilon = 1e-15);
        // input untouched
        assert_eq!(q, StateVector::uniform(1).unwrap());
    }

    #[test]
    fn dense_matches_definition() {
        let q = StateVector::basis(1, 0).unwrap();
        let m = nd::array![
            [C64::new(0.0, 0.0), C64::new(1.0, 0.0)],
            [C64::new(0.0, 1.0), C64::new(0.0, 0.0)],
        ];
        let p = q.apply_dense(&m).unwrap();
        assert_eq!(p.amplitudes()[0], C64::new(0.0, 0.0));
        assert_eq!(p.amplitudes()[1], C64::new(0.0, 1.0));
    }

    #[test]
    fn dimension_mismatch() {
        let q = StateVector::uniform(2).unwrap();
        let phases: nd::Array1<C64> = nd::Array1::ones(8);
        assert!(matches!(
            q.apply_diagonal(&phases),
            Err(crate::EvolError::DimensionMismatch(DimensionError(8, 4))),
        ));
        let m: nd::Array2<C64> = nd::Array2::eye(2);
        assert!(q.apply_dense(&m).is_err());
    }

    #[test]
    fn probabilities_sum() {
        let q = StateVector::basis(3, 5).unwrap();
        let p = q.probabilities();
        assert_eq!(p[5], 1.0);
        assert_eq!(p.sum(), 1.0);
    }
}
