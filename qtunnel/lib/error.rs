//! Collection of all error types.
//!
//! All errors derive [`thiserror::Error`], making them composable when allowed
//! and compatible with application code using [`anyhow`][anyhow].
//!
//! [anyhow]: https://crates.io/crates/anyhow

use thiserror::Error;

/// Returned when an operator is applied to (or configured for) a state of a
/// different dimension.
#[derive(Debug, Error, Clone, PartialEq)]
#[error("encountered operator and state with incompatible dimensions; expected {0}, got {1}")]
pub struct DimensionError(pub usize, pub usize);

impl DimensionError {
    pub(crate) fn check(expected: usize, got: usize) -> Result<(), Self> {
        (expected == got).then_some(()).ok_or(Self(expected, got))
    }
}

/// Returned when a run configuration is rejected.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// Qubit counts must lie in `1..=MAX_QUBITS`.
    #[error("qubit count must be between 1 and {max}; got {got}")]
    BadQubitCount { got: usize, max: usize },

    /// State arrays must have a length that is a power of two.
    #[error("state dimension must be a power of two; got {0}")]
    BadDimension(usize),

    /// Time steps must be finite and greater than 0.
    #[error("time step must be finite and greater than 0; got {0}")]
    BadTimestep(f64),

    /// Runs must take at least one step.
    #[error("step count must be greater than 0; got {0}")]
    BadStepCount(usize),

    /// Potential parameters must be finite.
    #[error("potential parameters must be finite; got a = {a}, b = {b}")]
    BadPotential { a: f64, b: f64 },

    /// A kinetic weight table refers to qubits that don't exist or lists a
    /// pair whose control does not sit above its target.
    #[error("invalid kinetic weight pair ({control}, {target}) for {qubits} qubits")]
    BadPair { control: usize, target: usize, qubits: usize },
}

impl ConfigError {
    pub(crate) fn check_qubits(qubits: usize) -> Result<(), Self> {
        (1..=crate::MAX_QUBITS).contains(&qubits)
            .then_some(())
            .ok_or(Self::BadQubitCount { got: qubits, max: crate::MAX_QUBITS })
    }

    pub(crate) fn check_timestep(dt: f64) -> Result<(), Self> {
        (dt.is_finite() && dt > 0.0).then_some(()).ok_or(Self::BadTimestep(dt))
    }

    pub(crate) fn check_steps(steps: usize) -> Result<(), Self> {
        (steps != 0).then_some(()).ok_or(Self::BadStepCount(steps))
    }

    pub(crate) fn check_potential(a: f64, b: f64) -> Result<(), Self> {
        (a.is_finite() && b.is_finite())
            .then_some(())
            .ok_or(Self::BadPotential { a, b })
    }
}

/// Returned from operator construction and time evolution.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EvolError {
    /// [`ConfigError`]
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),

    /// [`DimensionError`]
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(#[from] DimensionError),

    /// Returned when an evolution is asked to take no steps.
    #[error("step count must be at least 1; got {0}")]
    InvalidStepCount(usize),

    /// Returned when a constructed operator fails its unitarity check. This
    /// always indicates a bad phase or matrix derivation.
    #[error("{operator} is not unitary; max deviation {deviation:e}")]
    UnitarityViolation { operator: &'static str, deviation: f64 },
}

impl EvolError {
    pub(crate) fn check_steps(steps: usize) -> Result<(), Self> {
        (steps != 0).then_some(()).ok_or(Self::InvalidStepCount(steps))
    }

    pub(crate) fn check_deviation(
        operator: &'static str,
        deviation: f64,
        epsilon: f64,
    ) -> Result<(), Self>
    {
        (deviation <= epsilon)
            .then_some(())
            .ok_or(Self::UnitarityViolation { operator, deviation })
    }
}

pub type EvolResult<T> = Result<T, EvolError>;
