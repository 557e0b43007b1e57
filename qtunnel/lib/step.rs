//! The single-step evolution operator.
//!
//! One step is a first-order (non-symmetrized) Trotter splitting of the kinetic
//! and potential parts of the Hamiltonian,
//! ```text
//! U(Δt) ≈ exp(-i V Δt) F† exp(-i K Δt) F
//! ```
//! applied right to left. The splitting carries an `O(Δt²)` error per step and
//! the two halves do not commute, so the stage order is fixed.

use std::fmt;
use ndarray as nd;
use num_complex::Complex64 as C64;
use tracing::debug;
use crate::{
    Arr1,
    error::{ ConfigError, DimensionError, EvolResult },
    propagator::{ self, KineticWeights },
    state::StateVector,
    transform::{ Backend, BasisTransform },
};

/// One stage of a [`TimeStep`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    /// Forward basis transform into the momentum-like basis.
    TransformForward,
    /// Diagonal kinetic propagator.
    KineticDiagonal,
    /// Inverse basis transform back to positions.
    TransformInverse,
    /// Diagonal potential propagator.
    PotentialDiagonal,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TransformForward => write!(f, "F"),
            Self::KineticDiagonal => write!(f, "K"),
            Self::TransformInverse => write!(f, "F†"),
            Self::PotentialDiagonal => write!(f, "V"),
        }
    }
}

/// A prepared time step: basis transform plus kinetic and potential phases,
/// applied in the order given by [`TimeStep::STAGES`].
#[derive(Clone, Debug)]
pub struct TimeStep {
    transform: BasisTransform,
    kinetic: nd::Array1<C64>,
    potential: nd::Array1<C64>,
    dt: f64,
}

impl TimeStep {
    /// Order in which stages are applied.
    pub const STAGES: [Stage; 4] = [
        Stage::TransformForward,
        Stage::KineticDiagonal,
        Stage::TransformInverse,
        Stage::PotentialDiagonal,
    ];

    /// Build a step from a kinetic weight table and a sampled potential.
    ///
    /// Fails if the time step is not positive, if the table or potential do not
    /// match the qubit count, or if any constructed operator is not unitary to
    /// within `epsilon`. Passing `check_transform = false` skips the `O(D³)`
    /// check of the dense basis transform; the diagonal checks always run.
    pub fn new<S>(
        weights: &KineticWeights,
        potential: &Arr1<S>,
        dt: f64,
        backend: Backend,
        check_transform: bool,
        epsilon: f64,
    ) -> EvolResult<Self>
    where S: nd::Data<Elem = f64>
    {
        ConfigError::check_timestep(dt)?;
        let qubits = weights.num_qubits();
        let transform = BasisTransform::new(qubits, backend)?;
        DimensionError::check(transform.dim(), potential.len())?;
        if check_transform { transform.check_unitary(epsilon)?; }
        let kinetic = propagator::kinetic_phases(weights, dt)?;
        propagator::check_unit_modulus("kinetic propagator", &kinetic, epsilon)?;
        let potential = propagator::potential_phases(potential, dt)?;
        propagator::check_unit_modulus("potential propagator", &potential, epsilon)?;
        debug!(
            qubits,
            dt,
            ?backend,
            stages = %Self::STAGES.iter().map(|s| s.to_string()).collect::<Vec<_>>().join(" → "),
            "built time step"
        );
        Ok(Self { transform, kinetic, potential, dt })
    }

    /// Number of qubits.
    pub fn num_qubits(&self) -> usize { self.transform.num_qubits() }

    /// Dimension of the state space.
    pub fn dim(&self) -> usize { self.transform.dim() }

    /// Time step.
    pub fn dt(&self) -> f64 { self.dt }

    /// The basis transform.
    pub fn transform(&self) -> &BasisTransform { &self.transform }

    /// Kinetic phases.
    pub fn kinetic(&self) -> nd::ArrayView1<'_, C64> { self.kinetic.view() }

    /// Potential phases.
    pub fn potential(&self) -> nd::ArrayView1<'_, C64> { self.potential.view() }

    /// Apply a single stage.
    pub fn apply_stage(&self, stage: Stage, state: &StateVector)
        -> EvolResult<StateVector>
    {
        match stage {
            Stage::TransformForward => self.transform.forward(state),
            Stage::KineticDiagonal => state.apply_diagonal(&self.kinetic),
            Stage::TransformInverse => self.transform.inverse(state),
            Stage::PotentialDiagonal => state.apply_diagonal(&self.potential),
        }
    }

    /// Apply all four stages, in order, to `state`.
    pub fn apply(&self, state: &StateVector) -> EvolResult<StateVector> {
        DimensionError::check(self.dim(), state.dim())?;
        Self::STAGES.into_iter()
            .try_fold(state.clone(), |q, stage| self.apply_stage(stage, &q))
    }
}
