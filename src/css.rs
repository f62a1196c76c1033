use crate::math::{clamp, finite_or};
use crate::synth::ShadowLayer;

const BASE_VAR: &str = "var(--shadow-color)";
const ACCENT_VAR: &str = "var(--shadow-accent, var(--shadow-color))";

/// Separator between layers; the indent keeps multi-line stacks readable
/// inside generated `:root` blocks.
const LAYER_SEP: &str = ",\n    ";

fn trim_trailing_zeros(s: &str) -> &str {
    s.trim_end_matches('0').trim_end_matches('.')
}

/// Pixel formatting: sub-2px magnitudes keep two decimals (offsets near the
/// contact layer are fractional), larger values one decimal. Trailing zeros
/// are trimmed either way.
fn format_px(n: f64) -> String {
    if n.abs() < 2.0 {
        let mut r = (n * 100.0).round() / 100.0;
        if r == 0.0 {
            r = 0.0; // collapse -0.00
        }
        format!("{}px", trim_trailing_zeros(&format!("{r:.2}")))
    } else {
        let r = (n * 10.0).round() / 10.0;
        format!("{}px", trim_trailing_zeros(&format!("{r:.1}")))
    }
}

fn format_alpha(n: f64) -> String {
    let mut r = (n * 1000.0).round() / 1000.0;
    if r == 0.0 {
        r = 0.0;
    }
    trim_trailing_zeros(&format!("{r:.3}")).to_string()
}

/// Renders a layer list as a CSS `box-shadow` value.
///
/// Colors are bound through custom properties so one stack serves any theme:
/// contact layers use `--shadow-color`, accent layers prefer
/// `--shadow-accent` and fall back to the base color. Spread terms below
/// 0.05px are omitted. An empty list renders as `none`.
pub fn layers_to_css(layers: &[ShadowLayer]) -> String {
    if layers.is_empty() {
        return "none".to_string();
    }

    let rendered: Vec<String> = layers
        .iter()
        .map(|layer| {
            let color_var = if layer.is_accent { ACCENT_VAR } else { BASE_VAR };
            let color = format!("hsl({color_var} / {})", format_alpha(layer.alpha));

            let x = format_px(layer.offset_x);
            let y = format_px(layer.offset_y);
            let blur = format_px(layer.blur);

            if layer.spread.abs() < 0.05 {
                format!("{x} {y} {blur} {color}")
            } else {
                let spread = format_px(layer.spread);
                format!("{x} {y} {blur} {spread} {color}")
            }
        })
        .collect();

    rendered.join(LAYER_SEP)
}

/// Builds an all-transparent stack of `layer_count` layers plus one leading
/// transparent accent marker.
///
/// CSS cannot animate between `box-shadow` lists of different lengths, so
/// transitions to "no shadow" go through this stack at the *same* layer
/// count as the real one instead of through `box-shadow: none`.
pub fn zero_shadow_stack(layer_count: Option<f64>) -> String {
    let n = clamp(2.0, 10.0, finite_or(layer_count.unwrap_or(5.0), 5.0).round()) as usize;

    let mut layers = Vec::with_capacity(n + 1);
    layers.push(format!("0px 0px 0px hsl({ACCENT_VAR} / 0)"));
    for _ in 0..n {
        layers.push(format!("0px 0px 0px 0px hsl({BASE_VAR} / 0)"));
    }

    layers.join(LAYER_SEP)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layer(x: f64, y: f64, blur: f64, spread: f64, alpha: f64, accent: bool) -> ShadowLayer {
        ShadowLayer {
            offset_x: x,
            offset_y: y,
            blur,
            spread,
            alpha,
            is_accent: accent,
        }
    }

    #[test]
    fn single_layer_without_spread_term() {
        let css = layers_to_css(&[layer(1.005, 0.0, 2.1, 0.0, 0.22, false)]);
        assert_eq!(css, "1px 0px 2.1px hsl(var(--shadow-color) / 0.22)");
    }

    #[test]
    fn spread_term_appears_past_threshold() {
        let css = layers_to_css(&[layer(1.0, 1.0, 2.0, -0.5, 0.1, false)]);
        assert!(css.contains(" -0.5px hsl("));

        let css = layers_to_css(&[layer(1.0, 1.0, 2.0, -0.04, 0.1, false)]);
        assert!(!css.contains("-0.04px"));
    }

    #[test]
    fn accent_layers_bind_accent_variable_with_fallback() {
        let css = layers_to_css(&[
            layer(1.0, 1.0, 2.0, 0.0, 0.2, false),
            layer(4.0, 4.0, 8.0, 0.0, 0.3, true),
        ]);
        let lines: Vec<&str> = css.split(",\n    ").collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("hsl(var(--shadow-color) /"));
        assert!(lines[1].contains("hsl(var(--shadow-accent, var(--shadow-color)) /"));
    }

    #[test]
    fn empty_stack_serializes_to_none() {
        assert_eq!(layers_to_css(&[]), "none");
    }

    #[test]
    fn px_formatting_rounds_by_magnitude() {
        // < 2px: two decimals, trimmed.
        assert_eq!(format_px(1.005), "1px");
        assert_eq!(format_px(0.12345), "0.12px");
        assert_eq!(format_px(-1.5), "-1.5px");
        assert_eq!(format_px(0.0), "0px");
        assert_eq!(format_px(-0.004), "0px");
        // >= 2px: one decimal, trimmed.
        assert_eq!(format_px(2.149), "2.1px");
        assert_eq!(format_px(50.0), "50px");
        assert_eq!(format_px(-4.0), "-4px");
    }

    #[test]
    fn alpha_formatting_trims_trailing_zeros() {
        assert_eq!(format_alpha(0.22), "0.22");
        assert_eq!(format_alpha(0.2204), "0.22");
        assert_eq!(format_alpha(0.0), "0");
        assert_eq!(format_alpha(1.0), "1");
        assert_eq!(format_alpha(0.125), "0.125");
    }

    #[test]
    fn zero_stack_has_marker_plus_n_layers() {
        let stack = zero_shadow_stack(Some(4.0));
        let terms: Vec<&str> = stack.split(",\n    ").collect();
        assert_eq!(terms.len(), 5);
        assert!(terms[0].contains("--shadow-accent"));
        for term in &terms[1..] {
            assert_eq!(*term, "0px 0px 0px 0px hsl(var(--shadow-color) / 0)");
        }
    }

    #[test]
    fn zero_stack_clamps_count() {
        assert_eq!(zero_shadow_stack(None).split(",\n    ").count(), 6);
        assert_eq!(zero_shadow_stack(Some(0.0)).split(",\n    ").count(), 3);
        assert_eq!(zero_shadow_stack(Some(99.0)).split(",\n    ").count(), 11);
        assert_eq!(zero_shadow_stack(Some(f64::NAN)).split(",\n    ").count(), 6);
    }
}
