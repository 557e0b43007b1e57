//! Repeated application of a [`TimeStep`] to an initial state.
//!
//! In all 2D arrays, the first (or zero-th) axis indexes time.

use ndarray as nd;
use num_complex::Complex64 as C64;
use tracing::{ debug, trace };
use crate::{
    error::{ DimensionError, EvolError, EvolResult },
    state::StateVector,
    step::TimeStep,
};

/// Norm diagnostics recorded after a single step.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StepRecord {
    /// 1-based index of the step just taken.
    pub step: usize,
    /// `Σ |amplitude|²` after the step.
    pub norm_squared: f64,
    /// `|norm_squared - initial norm_squared|`.
    pub drift: f64,
}

/// Output of [`evolve`].
#[derive(Clone, Debug)]
pub struct Evolution {
    /// State after the last step.
    pub final_state: StateVector,
    /// One record per step taken.
    pub diagnostics: Vec<StepRecord>,
    /// Every intermediate state, if requested; row 0 is the initial state and
    /// row `k` the state after `k` steps.
    pub history: Option<nd::Array2<C64>>,
}

impl Evolution {
    /// Number of steps taken.
    pub fn steps(&self) -> usize { self.diagnostics.len() }

    /// Largest norm drift over all steps.
    pub fn max_drift(&self) -> f64 {
        self.diagnostics.iter()
            .map(|rec| rec.drift)
            .fold(0.0, f64::max)
    }

    /// Largest change in norm drift between consecutive steps.
    pub fn max_step_drift(&self, initial_norm_squared: f64) -> f64 {
        self.diagnostics.iter()
            .scan(initial_norm_squared, |prev, rec| {
                let d = (rec.norm_squared - *prev).abs();
                *prev = rec.norm_squared;
                Some(d)
            })
            .fold(0.0, f64::max)
    }
}

/// Apply `step` to `initial` `steps` times in sequence, each application
/// consuming the previous output.
///
/// Fails with [`EvolError::InvalidStepCount`] if `steps` is 0 and with
/// [`EvolError::DimensionMismatch`] if the state and operator disagree. The
/// state is never renormalized.
pub fn evolve(
    initial: &StateVector,
    step: &TimeStep,
    steps: usize,
    record_history: bool,
) -> EvolResult<Evolution>
{
    EvolError::check_steps(steps)?;
    DimensionError::check(step.dim(), initial.dim())?;
    debug!(steps, dim = initial.dim(), dt = step.dt(), "begin evolution");

    let norm0 = initial.norm_squared();
    let mut history: Option<nd::Array2<C64>>
        = record_history.then(|| {
            let mut q: nd::Array2<C64>
                = nd::Array2::zeros((steps + 1, initial.dim()));
            q.slice_mut(nd::s![0, ..]).assign(&initial.amplitudes());
            q
        });
    let mut diagnostics: Vec<StepRecord> = Vec::with_capacity(steps);
    let mut q_temp: StateVector = initial.clone();
    for k in 1..=steps {
        q_temp = step.apply(&q_temp)?;
        let norm_squared = q_temp.norm_squared();
        let drift = (norm_squared - norm0).abs();
        trace!(step = k, norm_squared, drift);
        diagnostics.push(StepRecord { step: k, norm_squared, drift });
        if let Some(q) = history.as_mut() {
            q.slice_mut(nd::s![k, ..]).assign(&q_temp.amplitudes());
        }
    }

    let evolution = Evolution { final_state: q_temp, diagnostics, history };
    debug!(max_drift = evolution.max_drift(), "end evolution");
    Ok(evolution)
}
