//! Lyapunov spectrum of the map by tangent iteration with periodic QR
//! re-orthonormalisation, and the Kaplan–Yorke dimension derived from it.

use crate::{
    kernel::{GumowskiMira, State, TangentMap},
    solvers::DiscreteMap,
    trajectory::Orbit,
    traits::Steppable,
};
use anyhow::{anyhow, bail, Result};
use nalgebra::Matrix2;
use serde::{Deserialize, Serialize};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LyapunovSettings {
    pub steps: usize,
    pub transient: usize,
    pub qr_stride: usize,
}

/// Beyond this radius the cubic term dominates and the orbit never returns.
/// Tangent products lose all precision long before they overflow.
const ESCAPE_RADIUS: f64 = 1e12;

fn escaped(state: State) -> bool {
    !state.is_finite() || state.x.abs() > ESCAPE_RADIUS || state.y.abs() > ESCAPE_RADIUS
}

impl Default for LyapunovSettings {
    fn default() -> Self {
        Self {
            steps: 10_000,
            transient: 1_000,
            qr_stride: 1,
        }
    }
}

/// Both Lyapunov exponents of the map along the orbit of `initial_state`,
/// largest first, per iteration.
///
/// The first `transient` iterations move the seed onto the attractor without
/// accumulating growth. The tangent block is re-orthonormalised every
/// `qr_stride` iterations and after the last one.
pub fn lyapunov_exponents(
    kernel: &GumowskiMira,
    initial_state: State,
    settings: LyapunovSettings,
) -> Result<[f64; 2]> {
    let LyapunovSettings {
        steps,
        transient,
        qr_stride,
    } = settings;
    if steps == 0 {
        bail!("Lyapunov computation requires at least one iteration.");
    }
    if qr_stride == 0 {
        bail!("qr_stride must be at least 1.");
    }

    let start = Orbit::new(*kernel, initial_state)
        .take(transient)
        .last()
        .unwrap_or(initial_state);
    if escaped(start) {
        bail!("Orbit diverged during the transient; exponents are undefined.");
    }

    let tangent = TangentMap::new(*kernel);
    let mut stepper = DiscreteMap::new(TangentMap::DIMENSION);
    let mut augmented = TangentMap::augmented(start);
    let mut accum = [0.0; 2];
    let mut iteration = 0usize;
    let mut since_last_qr = 0usize;

    while iteration < steps {
        stepper.step(&tangent, &mut iteration, &mut augmented);
        since_last_qr += 1;

        if escaped(State::new(augmented[0], augmented[1]))
            || augmented[2..].iter().any(|v| !v.is_finite())
        {
            bail!(
                "Orbit diverged after {} iterations; exponents are undefined.",
                iteration
            );
        }
        if since_last_qr == qr_stride || iteration == steps {
            apply_qr(&mut augmented[2..], &mut accum)?;
            since_last_qr = 0;
        }
    }

    let mut exponents = accum.map(|v| v / steps as f64);
    if exponents[0] < exponents[1] {
        exponents.swap(0, 1);
    }
    debug!(
        steps,
        transient,
        qr_stride,
        lambda_max = exponents[0],
        lambda_min = exponents[1],
        "computed lyapunov exponents"
    );
    Ok(exponents)
}

/// Replaces the row-major tangent block `Φ` by `Q` of its QR factorisation and
/// adds `ln|R_ii|` to `accum`.
fn apply_qr(phi: &mut [f64], accum: &mut [f64; 2]) -> Result<()> {
    if phi.len() != 4 {
        bail!("Tangent matrix slice has incorrect size.");
    }
    let (q, r) = Matrix2::from_row_slice(phi).qr().unpack();
    for i in 0..2 {
        let diag = r[(i, i)].abs();
        if diag <= f64::EPSILON {
            return Err(anyhow!(
                "Encountered near-singular R matrix during orthonormalization."
            ));
        }
        accum[i] += diag.ln();
    }
    // nalgebra is column-major; write Q back row by row.
    for i in 0..2 {
        for j in 0..2 {
            phi[i * 2 + j] = q[(i, j)];
        }
    }
    Ok(())
}

/// Kaplan–Yorke dimension `k + Σ_{i≤k} λ_i / |λ_{k+1}|`, where `k` is the
/// largest count whose partial sum stays non-negative.
pub fn kaplan_yorke(exponents: &[f64]) -> f64 {
    let mut sorted = exponents.to_vec();
    sorted.sort_by(|a, b| b.total_cmp(a));

    let mut partial = 0.0;
    for (k, &lambda) in sorted.iter().enumerate() {
        if partial + lambda < 0.0 {
            if lambda.abs() <= f64::EPSILON {
                return k as f64;
            }
            return k as f64 + partial / lambda.abs();
        }
        partial += lambda;
    }
    sorted.len() as f64
}

#[cfg(test)]
mod tests {
    use super::{apply_qr, kaplan_yorke, lyapunov_exponents, LyapunovSettings};
    use crate::kernel::{GumowskiMira, ParameterTriple, State};

    fn assert_err_contains<T: std::fmt::Debug>(result: anyhow::Result<T>, needle: &str) {
        let err = result.expect_err("expected error");
        let message = format!("{err}");
        assert!(
            message.contains(needle),
            "expected error to contain \"{needle}\", got \"{message}\""
        );
    }

    fn settings(steps: usize) -> LyapunovSettings {
        LyapunovSettings {
            steps,
            transient: 0,
            qr_stride: 1,
        }
    }

    #[test]
    fn rejects_invalid_inputs() {
        let kernel = GumowskiMira::new(ParameterTriple::new(0.0, 0.0, 0.5));
        assert_err_contains(
            lyapunov_exponents(&kernel, State::new(0.1, 0.1), settings(0)),
            "at least one iteration",
        );
        assert_err_contains(
            lyapunov_exponents(
                &kernel,
                State::new(0.1, 0.1),
                LyapunovSettings {
                    qr_stride: 0,
                    ..settings(10)
                },
            ),
            "qr_stride",
        );
    }

    #[test]
    fn saddle_at_origin_recovers_eigenvalue_logs() {
        // At the origin with a = 0 the Jacobian is [[μ, 1], [μ²−1, μ]],
        // whose eigenvalues are μ ± √(μ²−1).
        let kernel = GumowskiMira::new(ParameterTriple::new(0.0, 0.3, 2.0));
        let exponents =
            lyapunov_exponents(&kernel, State::new(0.0, 0.0), settings(4000)).expect("exponents");
        let expected = (2.0 + 3.0_f64.sqrt()).ln();
        assert!((exponents[0] - expected).abs() < 1e-2, "{exponents:?}");
        assert!((exponents[1] + expected).abs() < 1e-2, "{exponents:?}");
    }

    #[test]
    fn exponent_sum_tracks_jacobian_determinant() {
        // det J = a(1 − 3by²) + 1, which is constant 1 + a when b = 0.
        let kernel = GumowskiMira::new(ParameterTriple::new(-0.2, 0.0, 2.0));
        let exponents =
            lyapunov_exponents(&kernel, State::new(0.0, 0.0), settings(500)).expect("exponents");
        let sum = exponents[0] + exponents[1];
        assert!((sum - 0.8_f64.ln()).abs() < 1e-9, "sum = {sum}");
    }

    #[test]
    fn stride_does_not_change_exponent_sum() {
        let kernel = GumowskiMira::new(ParameterTriple::new(0.0, 0.3, 2.0));
        let exponents = lyapunov_exponents(
            &kernel,
            State::new(0.0, 0.0),
            LyapunovSettings {
                qr_stride: 5,
                ..settings(200)
            },
        )
        .expect("exponents");
        assert!((exponents[0] + exponents[1]).abs() < 1e-9);
    }

    #[test]
    fn diverging_orbit_is_reported() {
        // From (2, 2) the orbit reaches |x| ≈ 6.5e9 after two iterations and
        // ≈ 1.9e32 after three.
        let kernel = GumowskiMira::new(ParameterTriple::new(5.0, -5.0, 3.0));
        for steps in [3, 5, 10, 500] {
            assert_err_contains(
                lyapunov_exponents(&kernel, State::new(2.0, 2.0), settings(steps)),
                "diverged after 3 iterations",
            );
        }
        assert_err_contains(
            lyapunov_exponents(
                &kernel,
                State::new(2.0, 2.0),
                LyapunovSettings {
                    qr_stride: 4,
                    ..settings(50)
                },
            ),
            "diverged after 3 iterations",
        );
        assert_err_contains(
            lyapunov_exponents(
                &kernel,
                State::new(2.0, 2.0),
                LyapunovSettings {
                    transient: 500,
                    ..settings(10)
                },
            ),
            "during the transient",
        );
    }

    #[test]
    fn apply_qr_rejects_near_singular_matrix() {
        let mut phi = [0.0; 4];
        let mut accum = [0.0; 2];
        assert_err_contains(apply_qr(&mut phi, &mut accum), "near-singular R matrix");
    }

    #[test]
    fn apply_qr_keeps_orthonormal_block_and_logs_diagonal() {
        let mut phi = [2.0, 0.0, 0.0, 0.5];
        let mut accum = [0.0; 2];
        apply_qr(&mut phi, &mut accum).expect("QR should succeed");
        assert!((accum[0] - 2.0_f64.ln()).abs() < 1e-12);
        assert!((accum[1] - 0.5_f64.ln()).abs() < 1e-12);
        assert!((phi[0].abs() - 1.0).abs() < 1e-12);
        assert!(phi[1].abs() < 1e-12 && phi[2].abs() < 1e-12);
        assert!((phi[3].abs() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn kaplan_yorke_handles_empty_and_partial_sum() {
        assert_eq!(kaplan_yorke(&[]), 0.0);
        assert!((kaplan_yorke(&[0.4, -0.8]) - 1.5).abs() < 1e-12);
        assert!((kaplan_yorke(&[-1.0, 0.1, 0.0]) - 2.1).abs() < 1e-12);
        assert_eq!(kaplan_yorke(&[-0.1, -0.2]), 0.0);
    }
}
