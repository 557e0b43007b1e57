//! Provides a unitary time-evolution engine for a wavefunction discretized over
//! `2^N` grid points in a one-dimensional double-well potential, propagated by a
//! first-order kinetic/potential split-operator scheme.
//!
//! Each time step applies, in order:
//! 1. the forward basis transform (position → momentum-like basis),
//! 2. the diagonal kinetic propagator,
//! 3. the inverse basis transform,
//! 4. the diagonal potential propagator.
//!
//! The kinetic propagator is built from a table of single-bit and pairwise
//! phase weights evaluated on the bit pattern of each basis index; the
//! potential propagator is built from a quartic double well sampled over
//! `linspace(-1, 1, 2^N)`.
//!
//! ```
//! use qtunnel::{ RunConfig, PotentialParams, run_evolution, extract_probabilities };
//!
//! let config = RunConfig::new(4, 0.01, 10, PotentialParams { a: 50.0, b: 0.5 })
//!     .unwrap();
//! let output = run_evolution(&config).unwrap();
//! let probs = extract_probabilities(&output.final_state);
//! assert_eq!(probs.len(), 16);
//! assert!((probs.sum() - 1.0).abs() < 1e-9);
//! ```
//!
//! See [`docs`] for theoretical background.

pub mod error;
pub mod state;
pub mod transform;
pub mod propagator;
pub mod potential;
pub mod step;
pub mod evolve;
pub mod run;
pub mod utils;

pub mod docs;

pub use error::{ ConfigError, DimensionError, EvolError, EvolResult };
pub use state::StateVector;
pub use transform::{ Backend, BasisTransform };
pub use propagator::{ KineticWeights, PairWeight };
pub use potential::DoubleWell;
pub use step::{ Stage, TimeStep };
pub use evolve::{ evolve, Evolution, StepRecord };
pub use run::{
    PlotData,
    PotentialParams,
    RunConfig,
    RunOutput,
    extract_probabilities,
    run_evolution,
};

/// Tolerance used when checking that constructed operators are unitary.
pub const UNITARITY_EPSILON: f64 = 1e-9;

/// Largest supported qubit count.
pub const MAX_QUBITS: usize = 20;

/// Largest qubit count for which dense `D × D` transform matrices are built.
pub const MAX_DENSE_QUBITS: usize = 13;

/// Largest qubit count for which a new [`RunConfig`] checks the dense basis
/// transform for unitarity by default.
pub const MAX_CHECKED_QUBITS: usize = 10;

pub type Arr1<S> = ndarray::ArrayBase<S, ndarray::Ix1>;
pub type Arr2<S> = ndarray::ArrayBase<S, ndarray::Ix2>;
