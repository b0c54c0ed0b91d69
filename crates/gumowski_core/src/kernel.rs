//! The Gumowski–Mira map and its analytic Jacobian.
//!
//! ```text
//! G(x, μ)  = μx + 2(1−μ)x² / (1+x²)
//! G'(x, μ) = μ + 4(1−μ)x / (1+x²)²
//!
//! x' = a·y·(1 − b·y²) + y + G(x, μ)
//! y' = −x + G(x', μ)
//! ```
//!
//! The closed-form pieces are generic over [`Scalar`]; [`GumowskiMira`] is the
//! `f64` kernel value handed to the orbit, sweep and stability queries.

use crate::traits::{DynamicalSystem, Scalar};
use serde::{Deserialize, Serialize};

/// A point `(x, y)` of the map's phase space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct State {
    pub x: f64,
    pub y: f64,
}

impl State {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    pub fn to_array(self) -> [f64; 2] {
        [self.x, self.y]
    }
}

impl From<[f64; 2]> for State {
    fn from(value: [f64; 2]) -> Self {
        Self::new(value[0], value[1])
    }
}

impl From<State> for [f64; 2] {
    fn from(value: State) -> Self {
        value.to_array()
    }
}

/// Names one axis of the parameter space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Parameter {
    A,
    B,
    Mu,
}

impl Parameter {
    pub const ALL: [Parameter; 3] = [Parameter::A, Parameter::B, Parameter::Mu];

    /// Position in the `(a, b, μ)` ordering.
    pub fn index(self) -> usize {
        match self {
            Parameter::A => 0,
            Parameter::B => 1,
            Parameter::Mu => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn name(self) -> &'static str {
        match self {
            Parameter::A => "a",
            Parameter::B => "b",
            Parameter::Mu => "mu",
        }
    }
}

/// The control parameters `(a, b, μ)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParameterTriple {
    pub a: f64,
    pub b: f64,
    pub mu: f64,
}

impl ParameterTriple {
    pub fn new(a: f64, b: f64, mu: f64) -> Self {
        Self { a, b, mu }
    }

    pub fn get(&self, parameter: Parameter) -> f64 {
        match parameter {
            Parameter::A => self.a,
            Parameter::B => self.b,
            Parameter::Mu => self.mu,
        }
    }

    /// Copy of `self` with one component replaced.
    pub fn with(mut self, parameter: Parameter, value: f64) -> Self {
        match parameter {
            Parameter::A => self.a = value,
            Parameter::B => self.b = value,
            Parameter::Mu => self.mu = value,
        }
        self
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.a, self.b, self.mu]
    }
}

/// `G(x, μ) = μx + 2(1−μ)x² / (1+x²)`. Total: `1 + x² > 0`.
pub fn g<T: Scalar>(x: T, mu: T) -> T {
    let one = T::one();
    let two = one + one;
    let x2 = x * x;
    mu * x + two * x2 * (one - mu) / (one + x2)
}

/// `∂G/∂x = μ + 4(1−μ)x / (1+x²)²`.
pub fn g_prime<T: Scalar>(x: T, mu: T) -> T {
    let one = T::one();
    let four = (one + one) * (one + one);
    let denom = one + x * x;
    mu + four * (one - mu) * x / (denom * denom)
}

/// One iteration of the map for `state = [x, y]`, `params = [a, b, μ]`.
pub fn map_step<T: Scalar>(state: [T; 2], params: [T; 3]) -> [T; 2] {
    let [x, y] = state;
    let [a, b, mu] = params;
    let one = T::one();
    let x_new = a * y * (one - b * y * y) + y + g(x, mu);
    let y_new = -x + g(x_new, mu);
    [x_new, y_new]
}

/// Row-major Jacobian `[[∂x'/∂x, ∂x'/∂y], [∂y'/∂x, ∂y'/∂y]]` of [`map_step`].
pub fn map_jacobian<T: Scalar>(state: [T; 2], params: [T; 3]) -> [[T; 2]; 2] {
    let [x, y] = state;
    let [a, b, mu] = params;
    let one = T::one();
    let three = one + one + one;
    let x_new = a * y * (one - b * y * y) + y + g(x, mu);
    let gp_x = g_prime(x, mu);
    let gp_xnew = g_prime(x_new, mu);

    let dfdx = gp_x;
    let dfdy = a * (one - three * b * y * y) + one;
    let dgdx = -one + gp_xnew * dfdx;
    let dgdy = gp_xnew * dfdy;

    [[dfdx, dfdy], [dgdx, dgdy]]
}

/// The map at a fixed parameter triple.
///
/// Stateless and `Copy`; build one per query instead of sharing an instance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GumowskiMira {
    pub params: ParameterTriple,
}

impl GumowskiMira {
    pub fn new(params: ParameterTriple) -> Self {
        Self { params }
    }

    pub fn step(&self, state: State) -> State {
        map_step(state.to_array(), self.params.to_array()).into()
    }

    pub fn jacobian(&self, state: State) -> [[f64; 2]; 2] {
        map_jacobian(state.to_array(), self.params.to_array())
    }
}

impl DynamicalSystem<f64> for GumowskiMira {
    fn dimension(&self) -> usize {
        2
    }

    fn apply(&self, x: &[f64], out: &mut [f64]) {
        let next = map_step([x[0], x[1]], self.params.to_array());
        out[..2].copy_from_slice(&next);
    }
}

/// Evolves `(x, y, Φ)` with `Φ_{n+1} = J(x_n) Φ_n`.
/// `Φ` is a row-major 2×2 block stored after the state.
pub struct TangentMap {
    pub inner: GumowskiMira,
}

impl TangentMap {
    pub const DIMENSION: usize = 2 + 2 * 2;

    pub fn new(inner: GumowskiMira) -> Self {
        Self { inner }
    }

    /// Augmented initial state with `Φ = I`.
    pub fn augmented(state: State) -> [f64; Self::DIMENSION] {
        [state.x, state.y, 1.0, 0.0, 0.0, 1.0]
    }
}

impl DynamicalSystem<f64> for TangentMap {
    fn dimension(&self) -> usize {
        Self::DIMENSION
    }

    fn apply(&self, x: &[f64], out: &mut [f64]) {
        let n = 2;
        self.inner.apply(&x[..n], &mut out[..n]);

        // Jacobian at the pre-image, applied to Φ.
        let jacobian = self.inner.jacobian(State::new(x[0], x[1]));
        let phi = &x[n..];
        for i in 0..n {
            for j in 0..n {
                let mut sum = 0.0;
                for k in 0..n {
                    sum += jacobian[i][k] * phi[k * n + j];
                }
                out[n + i * n + j] = sum;
            }
        }
    }
}
