//! What the web dashboard needs from the core besides numbers: its menu,
//! slider ranges and defaults, and the pre-rendered parameter-space videos.
//!
//! Video files are opaque assets; only their paths live here.

use crate::bifurcation::{sweep, BifurcationDiagram, BifurcationSettings, SweepRange};
use crate::error::Result;
use crate::kernel::{GumowskiMira, Parameter, ParameterTriple, State};
use crate::trajectory::generate;
use serde::{Deserialize, Serialize};

/// Two-parameter projection shown by a parameter-space video.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Projection {
    MuB,
    MuA,
    AB,
}

impl Projection {
    pub const ALL: [Projection; 3] = [Projection::MuB, Projection::MuA, Projection::AB];

    pub fn label(self) -> &'static str {
        match self {
            Projection::MuB => "Parameter Space μ×b",
            Projection::MuA => "Parameter Space μ×a",
            Projection::AB => "Parameter Space a×b",
        }
    }

    /// The video files are named after the parameter held fixed while the
    /// other two span the frame.
    pub fn video_path(self) -> &'static str {
        match self {
            Projection::MuB => "Videos/Animation_Parameter_Space_a_GumovskiMira.mp4",
            Projection::MuA => "Videos/Animation_Parameter_Space_b_GumovskiMira.mp4",
            Projection::AB => "Videos/Animation_Parameter_Space_mu_GumovskiMira.mp4",
        }
    }

    pub fn axes(self) -> (Parameter, Parameter) {
        match self {
            Projection::MuB => (Parameter::Mu, Parameter::B),
            Projection::MuA => (Parameter::Mu, Parameter::A),
            Projection::AB => (Parameter::A, Parameter::B),
        }
    }
}

/// Navigation entries, in menu order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum View {
    Home,
    Attractors,
    Bifurcation,
    ParameterSpace(Projection),
}

impl View {
    pub fn all() -> Vec<View> {
        let mut views = vec![View::Home, View::Attractors, View::Bifurcation];
        views.extend(Projection::ALL.into_iter().map(View::ParameterSpace));
        views
    }

    pub fn label(self) -> &'static str {
        match self {
            View::Home => "Home",
            View::Attractors => "Attractors",
            View::Bifurcation => "Bifurcation",
            View::ParameterSpace(projection) => projection.label(),
        }
    }

    pub fn video_path(self) -> Option<&'static str> {
        match self {
            View::ParameterSpace(projection) => Some(projection.video_path()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SliderSpec {
    pub label: String,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    pub default: f64,
}

impl SliderSpec {
    pub fn new(label: &str, min: f64, max: f64, default: f64, step: f64) -> Self {
        Self {
            label: label.to_string(),
            min,
            max,
            step,
            default,
        }
    }

    /// Nearest value the slider can actually take.
    pub fn clamp(&self, value: f64) -> f64 {
        if !value.is_finite() {
            return self.default;
        }
        let clamped = value.clamp(self.min, self.max);
        if self.step <= 0.0 {
            return clamped;
        }
        let ticks = ((clamped - self.min) / self.step).round();
        (self.min + ticks * self.step).clamp(self.min, self.max)
    }
}

/// Inputs of the attractor scatter plot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttractorSettings {
    pub params: ParameterTriple,
    pub initial_state: State,
    pub n_steps: usize,
    pub transient: usize,
}

impl Default for AttractorSettings {
    fn default() -> Self {
        Self {
            params: ParameterTriple::new(0.01, 0.05, -0.8),
            initial_state: State::new(0.0, 0.85),
            n_steps: 1_000_000,
            transient: 0,
        }
    }
}

impl AttractorSettings {
    pub fn compute(&self) -> Result<Vec<State>> {
        generate(
            &GumowskiMira::new(self.params),
            self.initial_state,
            self.n_steps,
            self.transient,
        )
    }
}

pub fn attractor_sliders() -> Vec<SliderSpec> {
    vec![
        SliderSpec::new("Parameter a", 0.0, 1.0, 0.01, 0.01),
        SliderSpec::new("Parameter b", 0.0, 1.0, 0.05, 0.01),
        SliderSpec::new("Parameter μ", -0.99, 0.99, -0.8, 0.01),
    ]
}

/// Slider values of the bifurcation view: `a`, `b` and the `μ` window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BifurcationView {
    pub a: f64,
    pub b: f64,
    pub mu_min: f64,
    pub mu_max: f64,
}

impl Default for BifurcationView {
    fn default() -> Self {
        Self {
            a: 0.30,
            b: 0.20,
            mu_min: -0.6,
            mu_max: 0.6,
        }
    }
}

impl BifurcationView {
    pub fn to_settings(&self) -> BifurcationSettings {
        let defaults = BifurcationSettings::default();
        BifurcationSettings {
            base: ParameterTriple::new(self.a, self.b, defaults.base.mu),
            parameter: Parameter::Mu,
            range: SweepRange::new(self.mu_min, self.mu_max, defaults.range.count),
            ..defaults
        }
    }

    pub fn compute(&self) -> Result<BifurcationDiagram> {
        sweep(&self.to_settings())
    }
}

pub fn bifurcation_sliders() -> Vec<SliderSpec> {
    vec![
        SliderSpec::new("Parameter a", 0.0, 1.0, 0.30, 0.01),
        SliderSpec::new("Parameter b", 0.0, 1.0, 0.20, 0.01),
        SliderSpec::new("Minimum μ", -1.0, 0.0, -0.6, 0.01),
        SliderSpec::new("Maximum μ", 0.0, 1.0, 0.6, 0.01),
    ]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuEntry {
    pub view: View,
    pub label: String,
    pub video_path: Option<String>,
}

/// Everything the front-end renders its navigation and inputs from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    pub menu: Vec<MenuEntry>,
    pub attractor_sliders: Vec<SliderSpec>,
    pub bifurcation_sliders: Vec<SliderSpec>,
    pub attractor: AttractorSettings,
    pub bifurcation: BifurcationSettings,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            menu: View::all()
                .into_iter()
                .map(|view| MenuEntry {
                    view,
                    label: view.label().to_string(),
                    video_path: view.video_path().map(str::to_string),
                })
                .collect(),
            attractor_sliders: attractor_sliders(),
            bifurcation_sliders: bifurcation_sliders(),
            attractor: AttractorSettings::default(),
            bifurcation: BifurcationView::default().to_settings(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn menu_follows_navigation_order() {
        let labels: Vec<&str> = View::all().into_iter().map(View::label).collect();
        assert_eq!(
            labels,
            vec![
                "Home",
                "Attractors",
                "Bifurcation",
                "Parameter Space μ×b",
                "Parameter Space μ×a",
                "Parameter Space a×b",
            ]
        );
    }

    #[test]
    fn only_parameter_space_views_have_videos() {
        assert_eq!(View::Home.video_path(), None);
        assert_eq!(View::Bifurcation.video_path(), None);
        assert_eq!(
            View::ParameterSpace(Projection::AB).video_path(),
            Some("Videos/Animation_Parameter_Space_mu_GumovskiMira.mp4")
        );
        for projection in Projection::ALL {
            let (first, second) = projection.axes();
            assert_ne!(first, second);
            assert!(projection.video_path().ends_with(".mp4"));
        }
    }

    #[test]
    fn slider_clamp_snaps_to_grid_and_range() {
        let slider = SliderSpec::new("Parameter μ", -0.99, 0.99, -0.8, 0.01);
        assert!((slider.clamp(5.0) - 0.99).abs() < 1e-12);
        assert_eq!(slider.clamp(-5.0), -0.99);
        assert!((slider.clamp(0.123) - 0.12).abs() < 1e-12);
        assert_eq!(slider.clamp(f64::NAN), -0.8);
    }

    #[test]
    fn slider_defaults_sit_inside_their_ranges() {
        for slider in attractor_sliders().iter().chain(bifurcation_sliders().iter()) {
            assert!(slider.min <= slider.default && slider.default <= slider.max);
            assert!((slider.clamp(slider.default) - slider.default).abs() < 1e-12);
        }
    }

    #[test]
    fn bifurcation_view_builds_mu_sweep() {
        let view = BifurcationView {
            a: 0.4,
            b: 0.1,
            mu_min: -0.3,
            mu_max: 0.2,
        };
        let settings = view.to_settings();
        assert_eq!(settings.parameter, Parameter::Mu);
        assert_eq!(settings.base.a, 0.4);
        assert_eq!(settings.base.b, 0.1);
        assert_eq!(settings.range, SweepRange::new(-0.3, 0.2, 1000));
        assert_eq!(settings.total_time, 2000);
        assert_eq!(settings.transient_time, 1000);
    }

    #[test]
    fn attractor_settings_compute_orbit() {
        let settings = AttractorSettings {
            n_steps: 64,
            ..AttractorSettings::default()
        };
        let orbit = settings.compute().expect("orbit");
        assert_eq!(orbit.len(), 64);
        assert!(orbit.iter().all(State::is_finite));
    }

    #[test]
    fn default_config_lists_every_view() {
        let config = DashboardConfig::default();
        assert_eq!(config.menu.len(), 6);
        assert_eq!(config.attractor_sliders.len(), 3);
        assert_eq!(config.bifurcation_sliders.len(), 4);
        assert_eq!(config.attractor.n_steps, 1_000_000);
        assert_eq!(
            config.menu[3].video_path.as_deref(),
            Some("Videos/Animation_Parameter_Space_a_GumovskiMira.mp4")
        );
    }
}
