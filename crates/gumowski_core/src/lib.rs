//! The `gumowski_core` crate is the numeric engine behind the Gumowski–Mira dashboard.
//! Every query is a pure function of its arguments, so the caller is free to re-run it
//! on each parameter change or to memoize results.
//!
//! Key components:
//! - **Kernel**: the map `G`, its derivative, the step function and its analytic Jacobian.
//! - **Trajectory**: orbits with an optional discarded transient.
//! - **Bifurcation**: uniform one-parameter sweeps, flattened for scatter plots.
//! - **Analysis / Fixed points**: Lyapunov spectrum and Newton-based periodic points.
//! - **Dashboard**: slider ranges, defaults and video assets consumed by the web front-end.

pub mod analysis;
pub mod bifurcation;
pub mod dashboard;
pub mod error;
pub mod fixed_point;
pub mod kernel;
pub mod solvers;
pub mod traits;
pub mod trajectory;

pub use error::MapError;
pub use kernel::{GumowskiMira, Parameter, ParameterTriple, State};
