//! Lyapunov spectrum and periodic-point runners.

use crate::system::{to_js, WasmGumowskiMira};
use gumowski_core::analysis::{kaplan_yorke, lyapunov_exponents, LyapunovSettings};
use gumowski_core::fixed_point::{solve_fixed_point, FixedPointResult, NewtonSettings};
use gumowski_core::State;
use js_sys::Float64Array;
use wasm_bindgen::prelude::*;

impl WasmGumowskiMira {
    pub(crate) fn lyapunov_values(
        &self,
        x0: f64,
        y0: f64,
        steps: u32,
        transient: u32,
        qr_stride: u32,
    ) -> Result<[f64; 2], String> {
        let settings = LyapunovSettings {
            steps: steps as usize,
            transient: transient as usize,
            qr_stride: if qr_stride == 0 { 1 } else { qr_stride as usize },
        };
        lyapunov_exponents(&self.kernel, State::new(x0, y0), settings)
            .map_err(|e| format!("Lyapunov computation failed: {e}"))
    }

    pub(crate) fn fixed_point_result(
        &self,
        x0: f64,
        y0: f64,
        period: u32,
        max_steps: u32,
        tolerance: f64,
    ) -> Result<FixedPointResult, String> {
        let defaults = NewtonSettings::default();
        let settings = NewtonSettings {
            max_steps: if max_steps == 0 {
                defaults.max_steps
            } else {
                max_steps as usize
            },
            tolerance: if tolerance > 0.0 {
                tolerance
            } else {
                defaults.tolerance
            },
            ..defaults
        };
        solve_fixed_point(&self.kernel, State::new(x0, y0), period as usize, settings)
            .map_err(|e| format!("Fixed point solve failed: {e:#}"))
    }
}

#[wasm_bindgen]
impl WasmGumowskiMira {
    /// Both exponents, largest first. `qr_stride = 0` means every iteration.
    pub fn compute_lyapunov_exponents(
        &self,
        x0: f64,
        y0: f64,
        steps: u32,
        transient: u32,
        qr_stride: u32,
    ) -> Result<Float64Array, JsValue> {
        let exponents = self
            .lyapunov_values(x0, y0, steps, transient, qr_stride)
            .map_err(|e| JsValue::from_str(&e))?;
        Ok(Float64Array::from(exponents.as_slice()))
    }

    pub fn compute_kaplan_yorke_dimension(
        &self,
        x0: f64,
        y0: f64,
        steps: u32,
        transient: u32,
    ) -> Result<f64, JsValue> {
        let exponents = self
            .lyapunov_values(x0, y0, steps, transient, 1)
            .map_err(|e| JsValue::from_str(&e))?;
        Ok(kaplan_yorke(&exponents))
    }

    /// Periodic point of the given period near `(x0, y0)`, with multipliers
    /// and stability. `max_steps = 0` and `tolerance <= 0` select defaults.
    pub fn solve_fixed_point(
        &self,
        x0: f64,
        y0: f64,
        period: u32,
        max_steps: u32,
        tolerance: f64,
    ) -> Result<JsValue, JsValue> {
        let result = self
            .fixed_point_result(x0, y0, period, max_steps, tolerance)
            .map_err(|e| JsValue::from_str(&e))?;
        to_js(&result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gumowski_core::fixed_point::Stability;

    #[test]
    fn lyapunov_values_at_saddle_origin() {
        let system = WasmGumowskiMira::new(0.0, 0.2, 2.0);
        let exponents = system
            .lyapunov_values(0.0, 0.0, 2000, 0, 0)
            .expect("exponents");
        let expected = (2.0 + 3.0_f64.sqrt()).ln();
        assert!((exponents[0] - expected).abs() < 1e-2);
        assert!((exponents[0] + exponents[1]).abs() < 1e-9);
    }

    #[test]
    fn lyapunov_values_prefix_errors() {
        let system = WasmGumowskiMira::new(0.0, 0.2, 2.0);
        let err = system
            .lyapunov_values(0.0, 0.0, 0, 0, 1)
            .expect_err("zero steps");
        assert!(err.starts_with("Lyapunov computation failed"));
    }

    #[test]
    fn fixed_point_result_uses_defaults_for_zero_inputs() {
        let system = WasmGumowskiMira::new(0.0, 0.2, 2.0);
        let result = system
            .fixed_point_result(0.0, 0.0, 1, 0, 0.0)
            .expect("fixed point");
        assert_eq!(result.stability, Stability::Saddle);
        assert_eq!(result.period, 1);
    }

    #[test]
    fn fixed_point_result_rejects_zero_period() {
        let system = WasmGumowskiMira::new(0.0, 0.2, 2.0);
        let err = system
            .fixed_point_result(0.0, 0.0, 0, 0, 0.0)
            .expect_err("zero period");
        assert!(err.contains("period"));
    }
}
