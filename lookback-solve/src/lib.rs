//! Numerical solvers for lookback models.
//!
//! The only solver needed so far is bisection on a single scalar unknown,
//! which is what inverting a strictly monotonic relation requires.

pub mod equation;
