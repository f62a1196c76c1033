use crate::curve::CurvePoint;

/// A named, ready-made shaping curve offered by authoring UIs.
#[derive(Clone, Copy, Debug)]
pub struct CurvePreset {
    pub label: &'static str,
    /// Interior knots; endpoints (0,0) and (1,1) are implicit.
    pub points: &'static [CurvePoint],
}

pub const CURVE_PRESETS: &[CurvePreset] = &[
    CurvePreset {
        label: "Linear",
        points: &[],
    },
    CurvePreset {
        label: "Ease In",
        points: &[
            CurvePoint { x: 0.4, y: 0.1 },
            CurvePoint { x: 0.7, y: 0.3 },
        ],
    },
    CurvePreset {
        label: "Ease Out",
        points: &[
            CurvePoint { x: 0.3, y: 0.7 },
            CurvePoint { x: 0.6, y: 0.9 },
        ],
    },
    CurvePreset {
        label: "Ease In-Out",
        points: &[
            CurvePoint { x: 0.3, y: 0.1 },
            CurvePoint { x: 0.7, y: 0.9 },
        ],
    },
    CurvePreset {
        label: "Steps",
        points: &[
            CurvePoint { x: 0.24, y: 0.0 },
            CurvePoint { x: 0.25, y: 0.33 },
            CurvePoint { x: 0.49, y: 0.33 },
            CurvePoint { x: 0.5, y: 0.66 },
            CurvePoint { x: 0.74, y: 0.66 },
            CurvePoint { x: 0.75, y: 1.0 },
        ],
    },
    CurvePreset {
        label: "Late Bloom",
        points: &[
            CurvePoint { x: 0.6, y: 0.1 },
            CurvePoint { x: 0.8, y: 0.5 },
        ],
    },
    CurvePreset {
        label: "Early Burst",
        points: &[
            CurvePoint { x: 0.2, y: 0.5 },
            CurvePoint { x: 0.4, y: 0.9 },
        ],
    },
    CurvePreset {
        label: "S-Curve",
        points: &[
            CurvePoint { x: 0.25, y: 0.05 },
            CurvePoint { x: 0.4, y: 0.3 },
            CurvePoint { x: 0.6, y: 0.7 },
            CurvePoint { x: 0.75, y: 0.95 },
        ],
    },
];

/// Resolves a preset label to its interior knots. Unknown labels resolve to
/// the empty (linear) point set.
pub fn resolve_preset(label: &str) -> &'static [CurvePoint] {
    CURVE_PRESETS
        .iter()
        .find(|p| p.label == label)
        .map(|p| p.points)
        .unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curve::CurveDef;

    #[test]
    fn resolve_known_preset() {
        let pts = resolve_preset("Ease In");
        assert_eq!(pts.len(), 2);
        assert_eq!(pts[0], CurvePoint { x: 0.4, y: 0.1 });
    }

    #[test]
    fn resolve_unknown_preset_is_linear() {
        assert!(resolve_preset("Bounce").is_empty());
    }

    #[test]
    fn all_presets_evaluate_within_unit_box() {
        for preset in CURVE_PRESETS {
            let curve = CurveDef::Points(preset.points.to_vec());
            for i in 0..=50 {
                let x = f64::from(i) / 50.0;
                let y = curve.evaluate(x);
                assert!(
                    (-1e-9..=1.0 + 1e-9).contains(&y),
                    "{} left the unit box at x={x}: {y}",
                    preset.label
                );
            }
        }
    }
}
