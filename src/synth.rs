use crate::curve::CurveDef;
use crate::math::{clamp01, lerp};
use crate::params::{NormalizedParams, ShadowCurves};

/// One rendered shadow layer, ordered innermost (contact) to outermost.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShadowLayer {
    /// Signed pixel offsets along the eased light direction.
    pub offset_x: f64,
    pub offset_y: f64,
    /// Pixels, always >= 0.
    pub blur: f64,
    /// Pixels, always <= 0; shadows only contract in this model.
    pub spread: f64,
    /// `[0, 1]`.
    pub alpha: f64,
    /// Layers past the stack midpoint are atmospheric and bind to the accent
    /// color variable in CSS output.
    pub is_accent: bool,
}

fn round1(n: f64) -> f64 {
    (n * 10.0).round() / 10.0
}

fn round3(n: f64) -> f64 {
    (n * 1000.0).round() / 1000.0
}

fn curve_or<F: Fn(f64) -> f64>(curve: Option<&CurveDef>, x: f64, fallback: F) -> f64 {
    match curve {
        Some(c) => c.evaluate(x),
        None => fallback(x),
    }
}

/// Computes the ordered layer stack for a normalized parameter set.
///
/// This is the algorithmic core of the crate and is kept pure and uncached;
/// [`crate::ShadowEngine`] memoizes it. UI previews recompute the same
/// formulas independently, so the lerp/curve ordering here is part of the
/// output contract, not an implementation detail.
pub fn synthesize_layers(
    params: &NormalizedParams,
    curves: Option<&ShadowCurves>,
) -> Vec<ShadowLayer> {
    let n = params.layer_count();
    let (lx, ly) = params.eased_light();
    let en = params.depth;
    let o = params.intensity;
    let c = params.hardness;

    let growth = curves.and_then(|cv| cv.offset_growth.as_ref());
    let dist = curves.and_then(|cv| cv.layer_distribution.as_ref());
    let alpha_dist = curves.and_then(|cv| cv.alpha_distribution.as_ref());

    // Offset ceiling at the two intensity extremes, interpolated by the
    // actual intensity. The default growth exponents differ so that high
    // intensity also steepens the depth response.
    let offset_min = 1.0;
    let offset_at_o0 = lerp(3.0, 50.0, curve_or(growth, en, |e| e.powf(2.2)));
    let offset_at_o1 = lerp(5.0, 150.0, curve_or(growth, en, |e| e.powf(3.1)));
    let offset_max = lerp(offset_at_o0, offset_at_o1, o);

    let blur_ratio = lerp(2.1, 1.05, c);
    let spread_max = lerp(0.0, 5.0, c);
    let default_dist_power = lerp(1.7, 3.0, c);
    let peak = lerp(0.22, 0.72, o);

    let mut layers = Vec::with_capacity(n);
    for i in 0..n {
        let t = if n == 1 {
            1.0
        } else {
            i as f64 / (n - 1) as f64
        };
        let u = clamp01(curve_or(dist, t, |t| t.powf(default_dist_power)));

        let offset = lerp(offset_min, offset_max, u);
        let x = offset * lx;
        let y = offset * ly;
        let blur = offset * blur_ratio;
        let spread = -spread_max * t;

        // Soft shadows darken toward the outer edge, hard shadows
        // concentrate at contact; hardness blends the two ramps.
        let soft_alpha = peak * t;
        let hard_alpha = peak * (n - i) as f64 / (n - 1) as f64;
        let shape = curve_or(alpha_dist, t, |_| 1.0);
        let alpha = clamp01(lerp(soft_alpha, hard_alpha, c) * shape);

        layers.push(ShadowLayer {
            offset_x: round1(x),
            offset_y: round1(y),
            blur: round1(blur),
            spread: round1(spread),
            alpha: round3(alpha),
            is_accent: t > 0.5,
        });
    }

    layers
}
