//! Theoretical background.
//!
//! # Contents
//! - [Background](#background)
//! - [Discretization](#discretization)
//! - [Kinetic phases from bit patterns](#kinetic-phases-from-bit-patterns)
//! - [Time stepping](#time-stepping)
//! - [Symmetry](#symmetry)
//!
//! # Background
//! A particle in a double-well potential
//! ```text
//! V(x) = a (x² - b²)²
//! ```
//! has two degenerate minima at *x* = ±*b* separated by a barrier of height
//! *a* *b*⁴. Classically, a particle with energy below the barrier stays in
//! whichever well it starts in; quantum mechanically, amplitude leaks through
//! the barrier and oscillates between the two wells. This crate simulates that
//! process by evolving a wavefunction under the time-dependent Schrödinger
//! equation, in natural units:
//! ```text
//!   ∂ψ
//! i -- = (H_k + H_v) ψ
//!   ∂t
//! ```
//!
//! # Discretization
//! The wavefunction is sampled over *D* = 2<sup>*N*</sup> evenly spaced points
//! covering \[-1, 1\], so that each grid index can be read as the bit pattern of
//! an *N*-qubit register:
//! ```text
//! x[i] = -1 + 2 i / (D - 1),   i ∊ {0, ..., D - 1}
//! i = Σ_k b_k 2^k
//! ```
//! The potential is diagonal in this basis. The kinetic term is diagonal in the
//! conjugate basis, reached by the discrete Fourier transform
//! ```text
//!             1
//! F[j, k] = ---- exp(+2πi j k / D)
//!            √D
//! ```
//! whose inverse is its conjugate transpose *F*†.
//!
//! # Kinetic phases from bit patterns
//! Any quadratic form in the momentum index that is written in terms of its
//! bits reduces to single-bit and pairwise terms, because *b*<sub>*k*</sub>² =
//! *b*<sub>*k*</sub>:
//! ```text
//! θ(i) = Σ_k s_k b_k(i) + Σ_{c > t} w_{c,t} b_c(i) b_t(i)
//! ```
//! This is the form taken by [`KineticWeights`][crate::propagator::KineticWeights].
//! The default table uses the closed-form coefficients
//! ```text
//! s_k = π² / 4^(N - k)
//! w_p = π² / 2^(p + 1)
//! ```
//! with pairs *p* enumerated (*N*-1, *N*-2), (*N*-1, *N*-3), ..., (1, 0).
//!
//! The free-particle table instead expands (*k* *dk*)² for the signed momentum
//! index
//! ```text
//! k = Σ_{q < N-1} 2^q b_q - 2^(N-1) b_(N-1)
//! ```
//! which gives *s*<sub>*q*</sub> = *dk*² 4<sup>*q*</sup> and *w*<sub>*c*,*t*</sub>
//! = ±*dk*² 2<sup>*c*+*t*+1</sup>, with the minus sign exactly when *c* = *N* - 1.
//!
//! # Time stepping
//! The two halves of the Hamiltonian do not commute, but each is diagonal in
//! its own basis. Discarding the commutator in the Baker-Campbell-Hausdorff
//! expansion gives the first-order splitting
//! ```text
//!               -i H_v dt       -i H_k dt
//! ψ(t + dt) = [e          F† e          F] ψ(t) + O(dt²)
//! ```
//! so that a single step is four stage applications:
//! ```text
//!     ψ(t)
//!       |
//!       '--> F ---.
//!                 |
//!                 V
//!              -i θ dt
//!             e
//!                 |
//!       .-- F† <--'
//!       |
//!       V
//!   -i V(x) dt
//!  e
//!       |
//!       V
//!   ψ(t + dt)
//! ```
//! Every stage is unitary, so the norm of ψ is preserved up to floating-point
//! error regardless of the splitting error; nothing is renormalized. The
//! symmetrized (*O*(*dt*³)) variant that sandwiches the kinetic step between
//! two half-steps of the potential is deliberately not used here.
//!
//! # Symmetry
//! Reflecting the grid, *i* → *D* - 1 - *i*, maps to momentum index *j* → -*j*
//! (mod *D*) times a phase. The potential is reflection-symmetric, so a step
//! preserves reflection symmetry of the probability distribution exactly when
//! *θ*(*j*) = *θ*(-*j* mod *D*). The free-particle table satisfies this; the
//! closed-form table does not, and a symmetric initial state drifts out of
//! left/right balance under it.
