//! Newton solver for fixed and periodic points of the map, with the
//! multipliers and stability class of the point it converges to.

use crate::kernel::{GumowskiMira, State};
use anyhow::{bail, Context, Result};
use nalgebra::{Complex, Matrix2, Vector2};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NewtonSettings {
    pub max_steps: usize,
    pub damping: f64,
    pub tolerance: f64,
}

impl Default for NewtonSettings {
    fn default() -> Self {
        Self {
            max_steps: 25,
            damping: 1.0,
            tolerance: 1e-9,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComplexNumber {
    pub re: f64,
    pub im: f64,
}

impl ComplexNumber {
    pub fn modulus(&self) -> f64 {
        self.re.hypot(self.im)
    }
}

impl From<Complex<f64>> for ComplexNumber {
    fn from(value: Complex<f64>) -> Self {
        Self {
            re: value.re,
            im: value.im,
        }
    }
}

/// Classification of a periodic point by its multipliers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Stability {
    /// Both multipliers inside the unit circle.
    Attracting,
    /// Both multipliers outside the unit circle.
    Repelling,
    /// One multiplier on each side.
    Saddle,
    /// A multiplier on the unit circle.
    NonHyperbolic,
}

const UNIT_CIRCLE_TOLERANCE: f64 = 1e-9;

impl Stability {
    pub fn classify(multipliers: &[ComplexNumber]) -> Self {
        let moduli: Vec<f64> = multipliers.iter().map(ComplexNumber::modulus).collect();
        if moduli
            .iter()
            .any(|m| (m - 1.0).abs() <= UNIT_CIRCLE_TOLERANCE)
        {
            return Stability::NonHyperbolic;
        }
        let inside = moduli.iter().filter(|&&m| m < 1.0).count();
        match inside {
            n if n == moduli.len() => Stability::Attracting,
            0 => Stability::Repelling,
            _ => Stability::Saddle,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixedPointResult {
    pub state: State,
    pub period: usize,
    pub residual_norm: f64,
    pub iterations: usize,
    /// Row-major Jacobian of the `period`-fold map at `state`.
    pub jacobian: [[f64; 2]; 2],
    pub eigenvalues: Vec<ComplexNumber>,
    pub stability: Stability,
}

/// Newton iteration for a point with `f^period(s) = s`, started at `guess`.
pub fn solve_fixed_point(
    kernel: &GumowskiMira,
    guess: State,
    period: usize,
    settings: NewtonSettings,
) -> Result<FixedPointResult> {
    if period == 0 {
        bail!("period must be at least 1.");
    }
    if !guess.is_finite() {
        bail!("Initial guess must be finite.");
    }
    if settings.max_steps == 0 {
        bail!("max_steps must be greater than zero.");
    }
    if settings.damping <= 0.0 {
        bail!("damping must be positive.");
    }
    if settings.tolerance <= 0.0 {
        bail!("tolerance must be positive.");
    }

    let mut state = guess;
    let (mut image, mut jacobian) = iterate_with_jacobian(kernel, state, period);
    let mut residual = Vector2::new(image.x - state.x, image.y - state.y);
    let mut residual_norm = residual.norm();
    let mut iterations = 0usize;

    loop {
        if !residual_norm.is_finite() {
            bail!(
                "Newton iterate left the finite domain after {} steps.",
                iterations
            );
        }
        if residual_norm <= settings.tolerance {
            break;
        }
        if iterations >= settings.max_steps {
            bail!(
                "Newton solver failed to converge in {} steps (‖f(x) − x‖ = {}).",
                settings.max_steps,
                residual_norm
            );
        }

        let delta = (jacobian - Matrix2::identity())
            .lu()
            .solve(&residual)
            .context("Jacobian minus identity is singular during Newton iteration.")?;

        state = State::new(
            state.x - settings.damping * delta[0],
            state.y - settings.damping * delta[1],
        );
        iterations += 1;
        (image, jacobian) = iterate_with_jacobian(kernel, state, period);
        residual = Vector2::new(image.x - state.x, image.y - state.y);
        residual_norm = residual.norm();
        trace!(iterations, residual_norm, "newton step");
    }

    let eigenvalues: Vec<ComplexNumber> = jacobian
        .complex_eigenvalues()
        .iter()
        .copied()
        .map(ComplexNumber::from)
        .collect();
    let stability = Stability::classify(&eigenvalues);
    debug!(
        period,
        iterations,
        residual_norm,
        ?stability,
        "converged to periodic point"
    );

    Ok(FixedPointResult {
        state,
        period,
        residual_norm,
        iterations,
        jacobian: [
            [jacobian[(0, 0)], jacobian[(0, 1)]],
            [jacobian[(1, 0)], jacobian[(1, 1)]],
        ],
        eigenvalues,
        stability,
    })
}

/// `f^period(state)` and the chain-rule product `J(s_{k−1}) ⋯ J(s_0)`.
fn iterate_with_jacobian(
    kernel: &GumowskiMira,
    state: State,
    period: usize,
) -> (State, Matrix2<f64>) {
    let mut current = state;
    let mut product = Matrix2::identity();
    for _ in 0..period {
        let [[j00, j01], [j10, j11]] = kernel.jacobian(current);
        product = Matrix2::new(j00, j01, j10, j11) * product;
        current = kernel.step(current);
    }
    (current, product)
}
