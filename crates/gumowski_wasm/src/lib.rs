//! WASM bindings for the Gumowski–Mira dashboard.
//!
//! The front-end owns plotting, sliders and video playback; every call here
//! forwards slider values to `gumowski_core` and hands plain arrays back.

mod analysis;
mod dashboard;
mod system;

pub use dashboard::{compute_attractor_view, compute_bifurcation_view, dashboard_config};
pub use system::WasmGumowskiMira;
