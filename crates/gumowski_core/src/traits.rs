use num_traits::{Float, FromPrimitive};
use std::fmt::Debug;

/// Numeric types the closed-form kernel can be evaluated in.
/// Must support basic arithmetic, debug printing, and conversion from f64.
pub trait Scalar: Float + FromPrimitive + Debug + 'static {}

impl<T: Float + FromPrimitive + Debug + 'static> Scalar for T {}

/// A discrete map `x_{n+1} = f(x_n)` on a flat state vector.
pub trait DynamicalSystem<T: Scalar> {
    /// Returns the dimension of the state space.
    fn dimension(&self) -> usize;

    /// Evaluates the map.
    /// x: current state
    /// out: buffer to write x_{n+1}
    fn apply(&self, x: &[T], out: &mut [T]);
}

/// A trait for steppers that advance a system by one iteration.
pub trait Steppable<T: Scalar> {
    /// Performs one iteration.
    /// n: iteration counter (advanced by one)
    /// state: current state (updated in place)
    fn step(&mut self, system: &impl DynamicalSystem<T>, n: &mut usize, state: &mut [T]);
}
