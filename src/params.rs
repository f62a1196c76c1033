use crate::curve::CurveDef;
use crate::math::{clamp, clamp01, finite_or, lerp};

/// Optional overrides for the three shaping functions consulted during
/// synthesis. Absent entries fall back to closed-form defaults.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShadowCurves {
    /// Reshapes how layer index maps to normalized distance from surface.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layer_distribution: Option<CurveDef>,
    /// Reshapes how depth maps to pixel-offset growth.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset_growth: Option<CurveDef>,
    /// Multiplicative shaping factor on each layer's alpha.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alpha_distribution: Option<CurveDef>,
}

/// Raw engine input, as supplied by sliders or a persisted token document.
///
/// Every numeric field is corrected on normalization rather than validated:
/// non-finite values take documented defaults, ranged values are clamped.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShadowParams {
    /// Perceived elevation, `[0, 1]`.
    pub depth: f64,
    /// Simulated light direction, each component `[-1, 1]`.
    pub light_x: f64,
    pub light_y: f64,
    /// Overall darkness driver, `[0, 1]`.
    pub intensity: f64,
    /// Edge sharpness, `[0, 1]`; 0 = diffuse, 1 = crisp.
    pub hardness: f64,
    /// Drives derived layer count when `layer_count` is absent, `[0, 1]`.
    pub resolution: f64,
    /// Explicit layer count override, honored when `>= 2`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layer_count: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub curves: Option<ShadowCurves>,
}

impl Default for ShadowParams {
    fn default() -> Self {
        Self {
            depth: 0.0,
            light_x: 0.0,
            // Default light comes from directly above.
            light_y: 1.0,
            intensity: 0.0,
            hardness: 0.0,
            resolution: 0.0,
            layer_count: None,
            curves: None,
        }
    }
}

impl ShadowParams {
    /// Produces the internal working set: clamped scalars, clamped raw light
    /// components, and the carried-through layer count override.
    pub fn normalize(&self) -> NormalizedParams {
        NormalizedParams {
            depth: clamp01(finite_or(self.depth, 0.0)),
            intensity: clamp01(finite_or(self.intensity, 0.0)),
            hardness: clamp01(finite_or(self.hardness, 0.0)),
            resolution: clamp01(finite_or(self.resolution, 0.0)),
            light_x: clamp(-1.0, 1.0, finite_or(self.light_x, 0.0)),
            light_y: clamp(-1.0, 1.0, finite_or(self.light_y, 1.0)),
            layer_count: self.layer_count,
        }
    }
}

/// Clamped, defaulted working quantities consumed by the synthesizer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NormalizedParams {
    pub depth: f64,
    pub intensity: f64,
    pub hardness: f64,
    pub resolution: f64,
    /// Raw (un-eased) light components, clamped to `[-1, 1]`.
    pub light_x: f64,
    pub light_y: f64,
    pub layer_count: Option<f64>,
}

impl NormalizedParams {
    /// Light-direction easing: `sign(v) * |v|^1.5` per axis.
    ///
    /// Deliberately not normalized to a unit vector; diagonal light throws a
    /// longer combined offset than single-axis light.
    pub fn eased_light(&self) -> (f64, f64) {
        (ease_axis(self.light_x), ease_axis(self.light_y))
    }

    /// Resolved layer count in `[2, 10]`. An explicit override of at least 2
    /// wins; otherwise depth and resolution interpolate between 3 and 10.
    pub fn layer_count(&self) -> usize {
        if let Some(lc) = self.layer_count {
            if lc >= 2.0 {
                return clamp(2.0, 10.0, lc.round()) as usize;
            }
        }
        let layer_t = clamp01(self.depth * self.resolution);
        clamp(2.0, 10.0, lerp(3.0, 10.0, layer_t).round()) as usize
    }
}

fn ease_axis(v: f64) -> f64 {
    if v == 0.0 { 0.0 } else { v.signum() * v.abs().powf(1.5) }
}
