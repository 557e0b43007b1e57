//! Diagonal propagators: arrays of unit-magnitude phases `exp(-i θ Δt)`, one
//! per basis index.
//!
//! Kinetic angles are read off the bit pattern of each index through a
//! [`KineticWeights`] table of single-bit and pairwise terms; potential angles
//! are the potential itself, sampled at each grid point.

use std::f64::consts::PI;
use ndarray as nd;
use num_complex::Complex64 as C64;
use tracing::debug;
use crate::{
    Arr1,
    error::{ ConfigError, DimensionError, EvolError, EvolResult },
    utils::bit,
};

/// A pairwise kinetic term, contributing `weight` to every basis index with
/// both the `control` and `target` bits set.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PairWeight {
    pub control: usize,
    pub target: usize,
    pub weight: f64,
}

/// Table of single-bit and pairwise phase weights defining a kinetic-energy
/// quadratic form over the bits of a basis index.
///
/// The angle for index `idx` is
/// ```text
/// θ(idx) = Σ_k single[k] b_k(idx) + Σ_p pairs[p].weight b_c(idx) b_t(idx)
/// ```
/// where `b_k(idx)` is bit `k` of `idx`.
#[derive(Clone, Debug, PartialEq)]
pub struct KineticWeights {
    pub single: Vec<f64>,
    pub pairs: Vec<PairWeight>,
}

// all (control, target) with control > target, descending by control then
// target: (n-1, n-2), (n-1, n-3), ..., (1, 0)
fn pair_order(qubits: usize) -> impl Iterator<Item = (usize, usize)> {
    (1..qubits).rev()
        .flat_map(|c| (0..c).rev().map(move |t| (c, t)))
}

impl KineticWeights {
    /// The closed-form coupling structure:
    /// ```text
    /// single[k] = π² / 4^(N - k)
    /// pair p    = π² / 2^(p + 1)
    /// ```
    /// with pairs enumerated `(N-1, N-2), (N-1, N-3), ..., (1, 0)`.
    ///
    /// The coefficients were derived for `N = 4`; other qubit counts follow
    /// the same pattern but are not a re-derivation of the kinetic operator.
    pub fn closed_form(qubits: usize) -> Self {
        let pi2 = PI * PI;
        let single: Vec<f64>
            = (0..qubits)
            .map(|k| pi2 / 4.0_f64.powi((qubits - k) as i32))
            .collect();
        let pairs: Vec<PairWeight>
            = pair_order(qubits).enumerate()
            .map(|(p, (control, target))| {
                PairWeight {
                    control,
                    target,
                    weight: pi2 / 2.0_f64.powi(p as i32 + 1),
                }
            })
            .collect();
        Self { single, pairs }
    }

    /// Free-particle kinetic energy `(k dk)²`, where `k` is the signed
    /// (two's-complement) momentum index and `dk = 2π / (D dx)`.
    ///
    /// Writing `k = Σ_{q<N-1} 2^q b_q - 2^(N-1) b_(N-1)` and expanding the
    /// square gives
    /// ```text
    /// single[q]     = dk² 4^q
    /// weight (c, t) = ±dk² 2^(c + t + 1)    (negative iff c = N - 1)
    /// ```
    /// Unlike [`Self::closed_form`], this table is symmetric under `k → -k`.
    pub fn free_particle(qubits: usize, dx: f64) -> Self {
        let d = 2.0_f64.powi(qubits as i32);
        let dk2 = (2.0 * PI / (d * dx)).powi(2);
        let single: Vec<f64>
            = (0..qubits)
            .map(|q| dk2 * 4.0_f64.powi(q as i32))
            .collect();
        let pairs: Vec<PairWeight>
            = pair_order(qubits)
            .map(|(control, target)| {
                let sign = if control == qubits - 1 { -1.0 } else { 1.0 };
                PairWeight {
                    control,
                    target,
                    weight: sign * dk2 * 2.0_f64.powi((control + target + 1) as i32),
                }
            })
            .collect();
        Self { single, pairs }
    }

    /// Number of qubits the table is defined over.
    pub fn num_qubits(&self) -> usize { self.single.len() }

    /// Check that the table is defined over `qubits` qubits, that `qubits` lies
    /// in `1..=MAX_QUBITS`, and that every pair names two distinct in-range
    /// qubits with control above target.
    pub fn validate(&self, qubits: usize) -> EvolResult<()> {
        ConfigError::check_qubits(qubits)?;
        DimensionError::check(qubits, self.single.len())?;
        self.pairs.iter()
            .try_for_each(|p| {
                (p.control < qubits && p.target < p.control)
                    .then_some(())
                    .ok_or(ConfigError::BadPair {
                        control: p.control,
                        target: p.target,
                        qubits,
                    })
            })?;
        Ok(())
    }

    /// Total kinetic angle for basis index `idx`.
    pub fn angle(&self, idx: usize) -> f64 {
        let single: f64
            = self.single.iter().enumerate()
            .filter(|(k, _)| bit(idx, *k))
            .map(|(_, w)| w)
            .sum();
        let pairwise: f64
            = self.pairs.iter()
            .filter(|p| bit(idx, p.control) && bit(idx, p.target))
            .map(|p| p.weight)
            .sum();
        single + pairwise
    }

    /// Kinetic angles for every basis index.
    pub fn angles(&self) -> nd::Array1<f64> {
        let d = 1_usize << self.num_qubits();
        (0..d).map(|idx| self.angle(idx)).collect()
    }
}

/// Convert an array of angles into phases `exp(-i θ dt)`.
pub fn phases<S>(angles: &Arr1<S>, dt: f64) -> nd::Array1<C64>
where S: nd::Data<Elem = f64>
{
    angles.mapv(|th| C64::cis(-th * dt))
}

/// Build the kinetic diagonal propagator from a weight table.
pub fn kinetic_phases(weights: &KineticWeights, dt: f64)
    -> EvolResult<nd::Array1<C64>>
{
    ConfigError::check_timestep(dt)?;
    weights.validate(weights.num_qubits())?;
    let ph = phases(&weights.angles(), dt);
    debug!(dim = ph.len(), dt, "built kinetic propagator");
    Ok(ph)
}

/// Build the potential diagonal propagator from a sampled potential.
pub fn potential_phases<S>(potential: &Arr1<S>, dt: f64)
    -> EvolResult<nd::Array1<C64>>
where S: nd::Data<Elem = f64>
{
    ConfigError::check_timestep(dt)?;
    let ph = phases(potential, dt);
    debug!(dim = ph.len(), dt, "built potential propagator");
    Ok(ph)
}

/// Check that every phase has unit magnitude to within `epsilon`, returning the
/// largest deviation.
pub fn check_unit_modulus<S>(
    operator: &'static str,
    phases: &Arr1<S>,
    epsilon: f64,
) -> EvolResult<f64>
where S: nd::Data<Elem = C64>
{
    let deviation
        = phases.iter()
        .map(|pk| (pk.norm() - 1.0).abs())
        .fold(0.0, f64::max);
    EvolError::check_deviation(operator, deviation, epsilon)?;
    Ok(deviation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn closed_form_four_qubits() {
        let w = KineticWeights::closed_form(4);
        let pi2 = PI * PI;
        assert_eq!(w.single, vec![pi2 / 256.0, pi2 / 64.0, pi2 / 16.0, pi2 / 4.0]);
        let order: Vec<(usize, usize)>
            = w.pairs.iter().map(|p| (p.control, p.target)).collect();
        assert_eq!(order, vec![(3, 2), (3, 1), (3, 0), (2, 1), (2, 0), (1, 0)]);
        let weights: Vec<f64> = w.pairs.iter().map(|p| p.weight).collect();
        assert_eq!(
            weights,
            vec![pi2 / 2.0, pi2 / 4.0, pi2 / 8.0, pi2 / 16.0, pi2 / 32.0, pi2 / 64.0],
        );
        assert!(w.validate(4).is_ok());
    }

    #[test]
    fn pair_count() {
        for n in 1..=8 {
            assert_eq!(KineticWeights::closed_form(n).pairs.len(), n * (n - 1) / 2);
        }
    }

    #[test]
    fn angles_from_bits() {
        let w = KineticWeights::closed_form(4);
        let pi2 = PI * PI;
        assert_eq!(w.angle(0), 0.0);
        // 0b0001: qubit 0 only
        assert_abs_diff_eq!(w.angle(1), pi2 / 256.0, epsilon = 1e-15);
        // 0b1100: qubits 3 and 2, plus pair (3, 2)
        assert_abs_diff_eq!(
            w.angle(12), pi2 / 4.0 + pi2 / 16.0 + pi2 / 2.0, epsilon = 1e-14);
        // 0b1111: everything
        let total: f64
            = w.single.iter().sum::<f64>()
            + w.pairs.iter().map(|p| p.weight).sum::<f64>();
        assert_abs_diff_eq!(w.angle(15), total, epsilon = 1e-14);
    }

    #[test]
    fn free_particle_is_signed_k_squared() {
        let n = 4;
        let d = 16;
        let dx = 2.0 / 15.0;
        let dk = 2.0 * PI / (d as f64 * dx);
        let w = KineticWeights::free_particle(n, dx);
        for idx in 0..d {
            let k = if idx < d / 2 { idx as f64 } else { idx as f64 - d as f64 };
            let expected = (k * dk).powi(2);
            assert_abs_diff_eq!(w.angle(idx), expected, epsilon = 1e-9 * (1.0 + expected));
        }
    }

    #[test]
    fn rejects_bad_tables() {
        let mut w = KineticWeights::closed_form(3);
        assert!(matches!(w.validate(4), Err(EvolError::DimensionMismatch(_))));
        w.pairs.push(PairWeight { control: 0, target: 1, weight: 1.0 });
        assert!(matches!(w.validate(3), Err(EvolError::InvalidConfiguration(_))));
        assert!(kinetic_phases(&w, 0.01).is_err());
    }

    #[test]
    fn rejects_oversized_tables() {
        for n in [0, crate::MAX_QUBITS + 1, 64, 100] {
            let w = KineticWeights { single: vec![0.0; n], pairs: Vec::new() };
            assert!(matches!(
                w.validate(n),
                Err(EvolError::InvalidConfiguration(ConfigError::BadQubitCount { .. })),
            ));
            assert!(matches!(
                kinetic_phases(&w, 0.01),
                Err(EvolError::InvalidConfiguration(ConfigError::BadQubitCount { .. })),
            ));
        }
    }

    #[test]
    fn phases_are_unit() {
        let w = KineticWeights::closed_form(4);
        let k = kinetic_phases(&w, 0.01).unwrap();
        assert!(check_unit_modulus("kinetic", &k, 1e-12).is_ok());
        assert_eq!(k[0], C64::from(1.0));
        let v: nd::Array1<f64> = nd::array![0.0, 1.0, 2.0, 3.0];
        let p = potential_phases(&v, 0.5).unwrap();
        assert_abs_diff_eq!(p[2].re, (-1.0_f64).cos(), epsilon = 1e-15);
        assert_abs_diff_eq!(p[2].im, (-1.0_f64).sin(), epsilon = 1e-15);
        assert!(potential_phases(&v, 0.0).is_err());
    }

    #[test]
    fn construction_is_deterministic() {
        let a = kinetic_phases(&KineticWeights::closed_form(4), 0.01).unwrap();
        let b = kinetic_phases(&KineticWeights::closed_form(4), 0.01).unwrap();
        assert!(a.iter().zip(&b).all(|(ak, bk)| {
            ak.re.to_bits() == bk.re.to_bits() && ak.im.to_bits() == bk.im.to_bits()
        }));
    }

    #[test]
    fn unit_modulus_violation() {
        let ph = nd::array![C64::from(1.0), C64::from(0.5)];
        assert!(matches!(
            check_unit_modulus("bad", &ph, 1e-9),
            Err(EvolError::UnitarityViolation { .. }),
        ));
    }
}
