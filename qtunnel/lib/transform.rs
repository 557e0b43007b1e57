//! The basis change between the position grid and its momentum-like conjugate.
//!
//! The forward transform is the normalized discrete Fourier transform over the
//! `D = 2^N` bit-pattern basis,
//! ```text
//! F[j, k] = exp(+2πi j k / D) / √D
//! ```
//! and the inverse is its conjugate transpose. Both can be applied either as
//! materialized `D × D` matrices ([`Backend::Dense`]) or through a factored FFT
//! ([`Backend::Fft`]).

use std::{ f64::consts::TAU, fmt, sync::Arc };
use ndarray as nd;
use num_complex::Complex64 as C64;
use rustfft::{ Fft, FftPlanner };
use tracing::debug;
use crate::{
    Arr2,
    error::{ ConfigError, DimensionError, EvolError, EvolResult },
    state::StateVector,
    utils,
};

/// Build the forward transform matrix for `qubits` qubits.
///
/// *Panics if `2^qubits` overflows `usize`*.
pub fn forward_matrix(qubits: usize) -> nd::Array2<C64> {
    let d = 1_usize << qubits;
    let norm = (d as f64).sqrt().recip();
    nd::Array2::from_shape_fn((d, d), |(j, k)| {
        // reduce j·k mod D first so the phase argument stays small
        let jk = ((j as u128 * k as u128) % d as u128) as f64;
        C64::from_polar(norm, TAU * jk / d as f64)
    })
}

/// Build the inverse transform matrix for `qubits` qubits, the conjugate
/// transpose of [`forward_matrix`].
///
/// *Panics if `2^qubits` overflows `usize`*.
pub fn inverse_matrix(qubits: usize) -> nd::Array2<C64> {
    conj_transpose(&forward_matrix(qubits))
}

/// Conjugate transpose of a square matrix.
pub fn conj_transpose<S>(matrix: &Arr2<S>) -> nd::Array2<C64>
where S: nd::Data<Elem = C64>
{
    matrix.t().mapv(|mjk| mjk.conj())
}

/// Return the largest elementwise deviation of `a · b` from the identity.
pub fn identity_deviation<S, T>(a: &Arr2<S>, b: &Arr2<T>) -> f64
where
    S: nd::Data<Elem = C64>,
    T: nd::Data<Elem = C64>,
{
    a.dot(b).indexed_iter()
        .map(|((j, k), pjk)| {
            if j == k { (*pjk - 1.0).norm() } else { pjk.norm() }
        })
        .fold(0.0, f64::max)
}

/// Check that `matrix · matrix†` is the identity to within `epsilon`.
pub fn check_unitary<S>(
    operator: &'static str,
    matrix: &Arr2<S>,
    epsilon: f64,
) -> EvolResult<f64>
where S: nd::Data<Elem = C64>
{
    let deviation = identity_deviation(matrix, &conj_transpose(matrix));
    EvolError::check_deviation(operator, deviation, epsilon)?;
    Ok(deviation)
}

/// Selects how the basis transform is carried out.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Backend {
    /// Direct `O(D²)` matrix-vector products against materialized matrices.
    #[default]
    Dense,
    /// Factored `O(D log D)` transform.
    Fft,
}

impl Backend {
    /// [`Dense`][Self::Dense] up to `MAX_DENSE_QUBITS`, [`Fft`][Self::Fft]
    /// above.
    pub fn for_qubits(qubits: usize) -> Self {
        if qubits > crate::MAX_DENSE_QUBITS { Self::Fft } else { Self::Dense }
    }

    /// Check that this backend can be built for `qubits` qubits.
    pub fn check_qubits(self, qubits: usize) -> EvolResult<()> {
        ConfigError::check_qubits(qubits)?;
        if self == Self::Dense && qubits > crate::MAX_DENSE_QUBITS {
            return Err(ConfigError::BadQubitCount {
                got: qubits,
                max: crate::MAX_DENSE_QUBITS,
            }.into());
        }
        Ok(())
    }
}

#[derive(Clone)]
enum Kernel {
    Dense {
        forward: nd::Array2<C64>,
        inverse: nd::Array2<C64>,
    },
    Fft {
        // rustfft's inverse plan carries the +i sign of the forward transform
        forward: Arc<dyn Fft<f64>>,
        inverse: Arc<dyn Fft<f64>>,
        norm: f64,
    },
}

/// A prepared forward/inverse basis transform pair for a fixed qubit count.
#[derive(Clone)]
pub struct BasisTransform {
    qubits: usize,
    kernel: Kernel,
}

impl fmt::Debug for BasisTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasisTransform")
            .field("qubits", &self.qubits)
            .field("backend", &self.backend())
            .finish()
    }
}

impl BasisTransform {
    /// Prepare the transform for `qubits` qubits on the given backend.
    pub fn new(qubits: usize, backend: Backend) -> EvolResult<Self> {
        backend.check_qubits(qubits)?;
        let d = 1_usize << qubits;
        let kernel
            = match backend {
                Backend::Dense => {
                    let forward = forward_matrix(qubits);
                    let inverse = conj_transpose(&forward);
                    Kernel::Dense { forward, inverse }
                },
                Backend::Fft => {
                    let mut planner = FftPlanner::new();
                    Kernel::Fft {
                        forward: planner.plan_fft_inverse(d),
                        inverse: planner.plan_fft_forward(d),
                        norm: (d as f64).sqrt().recip(),
                    }
                },
            };
        debug!(qubits, dim = d, ?backend, "prepared basis transform");
        Ok(Self { qubits, kernel })
    }

    /// Number of qubits the transform acts on.
    pub fn num_qubits(&self) -> usize { self.qubits }

    /// Dimension of the transformed space.
    pub fn dim(&self) -> usize { 1 << self.qubits }

    /// The backend in use.
    pub fn backend(&self) -> Backend {
        match self.kernel {
            Kernel::Dense { .. } => Backend::Dense,
            Kernel::Fft { .. } => Backend::Fft,
        }
    }

    /// Verify `F · F† = I` (dense backend only; the FFT backend is unitary by
    /// construction) and return the observed deviation.
    pub fn check_unitary(&self, epsilon: f64) -> EvolResult<f64> {
        match &self.kernel {
            Kernel::Dense { forward, inverse } => {
                let deviation = identity_deviation(forward, inverse);
                EvolError::check_deviation("basis transform", deviation, epsilon)?;
                debug!(deviation, "basis transform passed unitarity check");
                Ok(deviation)
            },
            Kernel::Fft { .. } => Ok(0.0),
        }
    }

    /// Apply the forward transform.
    pub fn forward(&self, state: &StateVector) -> EvolResult<StateVector> {
        match &self.kernel {
            Kernel::Dense { forward, .. } => state.apply_dense(forward),
            Kernel::Fft { forward, norm, .. }
                => self.apply_fft(forward.as_ref(), *norm, state),
        }
    }

    /// Apply the inverse transform.
    pub fn inverse(&self, state: &StateVector) -> EvolResult<StateVector> {
        match &self.kernel {
            Kernel::Dense { inverse, .. } => state.apply_dense(inverse),
            Kernel::Fft { inverse, norm, .. }
                => self.apply_fft(inverse.as_ref(), *norm, state),
        }
    }

    fn apply_fft(&self, plan: &dyn Fft<f64>, norm: f64, state: &StateVector)
        -> EvolResult<StateVector>
    {
        DimensionError::check(self.dim(), state.dim())?;
        let mut buf: Vec<C64> = state.amplitudes().to_vec();
        plan.process(&mut buf);
        buf.iter_mut().for_each(|bk| { *bk *= norm; });
        StateVector::from_amplitudes(nd::Array1::from_vec(buf))
    }
}

/// Largest elementwise difference between the two backends' forward transforms
/// of `state`.
pub fn backend_deviation(state: &StateVector) -> EvolResult<f64> {
    let n = state.num_qubits();
    let dense = BasisTransform::new(n, Backend::Dense)?.forward(state)?;
    let fast = BasisTransform::new(n, Backend::Fft)?.forward(state)?;
    Ok(utils::max_deviation(&dense.amplitudes(), &fast.amplitudes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn forward_entries() {
        let f = forward_matrix(2);
        assert_abs_diff_eq!(f[[0, 0]].re, 0.5, epsilon = 1e-15);
        // exp(+iπ/2) / 2
        assert_abs_diff_eq!(f[[1, 1]].re, 0.0, epsilon = 1e-15);
        assert_abs_diff_eq!(f[[1, 1]].im, 0.5, epsilon = 1e-15);
        // exp(+iπ) / 2
        assert_abs_diff_eq!(f[[2, 1]].re, -0.5, epsilon = 1e-15);
        assert_eq!(f[[1, 2]], f[[2, 1]]);
    }

    #[test]
    fn inverse_is_identity() {
        for n in [1, 2, 3, 4, 6] {
            let dev = identity_deviation(&forward_matrix(n), &inverse_matrix(n));
            assert!(dev < 1e-9, "n = {n}: deviation {dev}");
            assert!(check_unitary("forward", &forward_matrix(n), 1e-9).is_ok());
        }
    }

    #[test]
    fn detects_non_unitary() {
        let mut m = forward_matrix(2);
        m[[0, 0]] *= 1.01;
        assert!(matches!(
            check_unitary("perturbed", &m, 1e-9),
            Err(EvolError::UnitarityViolation { operator: "perturbed", .. }),
        ));
    }

    #[test]
    fn forward_of_uniform_is_zero_mode() {
        let q = StateVector::uniform(4).unwrap();
        for backend in [Backend::Dense, Backend::Fft] {
            let t = BasisTransform::new(4, backend).unwrap();
            let p = t.forward(&q).unwrap();
            assert_abs_diff_eq!(p.amplitudes()[0].re, 1.0, epsilon = 1e-12);
            assert_abs_diff_eq!(p.norm_squared(), 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn backends_agree() {
        let mut amps: nd::Array1<C64> = nd::Array1::zeros(32);
        amps.iter_mut().enumerate()
            .for_each(|(k, ak)| { *ak = C64::new((k as f64).sin(), (0.3 * k as f64).cos()); });
        let q = StateVector::from_amplitudes(amps).unwrap();
        assert!(backend_deviation(&q).unwrap() < 1e-9);

        let dense = BasisTransform::new(5, Backend::Dense).unwrap();
        let fast = BasisTransform::new(5, Backend::Fft).unwrap();
        let a = dense.inverse(&q).unwrap();
        let b = fast.inverse(&q).unwrap();
        assert!(utils::max_deviation(&a.amplitudes(), &b.amplitudes()) < 1e-9);
    }

    #[test]
    fn dense_size_limit() {
        let n = crate::MAX_DENSE_QUBITS + 1;
        assert!(BasisTransform::new(n, Backend::Dense).is_err());
        assert!(BasisTransform::new(n, Backend::Fft).is_ok());
        assert!(Backend::Dense.check_qubits(n).is_err());
        assert!(Backend::Dense.check_qubits(n - 1).is_ok());
        assert_eq!(Backend::for_qubits(n - 1), Backend::Dense);
        assert_eq!(Backend::for_qubits(n), Backend::Fft);
    }

    #[test]
    fn round_trip() {
        let q = StateVector::basis(3, 5).unwrap();
        for backend in [Backend::Dense, Backend::Fft] {
            let t = BasisTransform::new(3, backend).unwrap();
            assert!(t.check_unitary(1e-9).is_ok());
            let p = t.inverse(&t.forward(&q).unwrap()).unwrap();
            assert!(utils::max_deviation(&p.amplitudes(), &q.amplitudes()) < 1e-12);
        }
    }
}
