use serde_json::Value;

use crate::engine::ShadowEngine;
use crate::error::{UmbraError, UmbraResult};
use crate::params::ShadowParams;

const INTERACTION_STATES: [&str; 3] = ["default", "hover", "active"];

/// Parses a raw design-token document. Object key order is preserved, so
/// declaration lines come out in document order.
pub fn parse_token_document(json: &str) -> UmbraResult<Value> {
    let doc: Value = serde_json::from_str(json).map_err(|e| UmbraError::serde(e.to_string()))?;
    if !doc.is_object() {
        return Err(UmbraError::token_document("top level must be an object"));
    }
    Ok(doc)
}

/// Sanitises a user-entered name into a CSS custom-property fragment.
pub fn sanitise_css_name(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut last_dash = true; // swallow leading dashes
    for ch in raw.trim().to_lowercase().chars() {
        let mapped = if ch.is_whitespace() { '-' } else { ch };
        if mapped == '-' || mapped.is_ascii_lowercase() || mapped.is_ascii_digit() {
            if mapped == '-' {
                if !last_dash {
                    out.push('-');
                }
                last_dash = true;
            } else {
                out.push(mapped);
                last_dash = false;
            }
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    if out.is_empty() {
        "unnamed".to_string()
    } else {
        out
    }
}

fn get_path<'a>(doc: &'a Value, path: &str) -> Option<&'a Value> {
    let mut cur = doc;
    for key in path.split('.') {
        cur = cur.get(key)?;
    }
    Some(cur)
}

/// Unwraps `$value` (DTCG) or `value` (legacy) token wrappers.
fn unwrap_token_value(v: &Value) -> &Value {
    if let Some(inner) = v.get("$value") {
        return inner;
    }
    if let Some(inner) = v.get("value") {
        return inner;
    }
    v
}

/// Numeric coercion in the document reader mirrors the engine's defensive
/// policy: numbers pass through, numeric strings parse, anything else is NaN
/// and picks up the engine default downstream.
fn token_number(v: Option<&Value>) -> f64 {
    match v.map(unwrap_token_value) {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(f64::NAN),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}

fn token_number_or(v: Option<&Value>, default: f64) -> f64 {
    match v {
        Some(_) => token_number(v),
        None => default,
    }
}

/// Reads the `elevation_new` token schema and emits the CSS custom-property
/// declaration lines consumed by the token pipeline:
///
/// - `--shadow-color`
/// - `--shadow-elevation-{name}` per configured elevation level
/// - `--shadow-interaction-{default,hover,active}` and
///   `--shadow-interaction-none` when an interaction block is present
///
/// Missing required paths produce an empty list, not an error; the build
/// step treats "no elevation tokens" as a valid document.
pub fn build_shadow_css_vars(engine: &mut ShadowEngine, tokens: &Value) -> Vec<String> {
    let Some(light) = get_path(tokens, "elevation_new.shadow.light") else {
        return Vec::new();
    };
    let Some(color) = get_path(tokens, "elevation_new.shadow.color.hsl") else {
        return Vec::new();
    };
    let Some(elevations) = get_path(tokens, "elevation_new.elevation").and_then(Value::as_object)
    else {
        return Vec::new();
    };

    let light_x = token_number(light.get("x"));
    let light_y = token_number(light.get("y"));
    let shadow_color_hsl = match unwrap_token_value(color) {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };

    let mut lines = Vec::new();
    lines.push(format!("  --shadow-color: {shadow_color_hsl};"));

    for (name, cfg) in elevations {
        let depth = token_number(cfg.get("depth"));
        if !depth.is_finite() {
            continue;
        }

        let intensity = token_number_or(cfg.get("intensity"), 0.25);
        let hardness = token_number_or(cfg.get("hardness"), 0.25);
        // Historical schema quirk: per-elevation `resolution` is an explicit
        // layer count, not the [0,1] resolution control.
        let layer_count = token_number_or(cfg.get("resolution"), 5.0);

        let stack = engine.shadow_stack(&ShadowParams {
            depth,
            light_x,
            light_y,
            intensity,
            hardness,
            resolution: 0.0,
            layer_count: Some(layer_count),
            curves: None,
        });

        lines.push(format!("  --shadow-elevation-{}:", sanitise_css_name(name)));
        lines.push(format!("    {stack};"));
    }

    if let Some(interaction) = get_path(tokens, "elevation_new.interaction") {
        let layer_count = token_number_or(interaction.get("resolution"), 5.0);

        for state in INTERACTION_STATES {
            let Some(cfg) = interaction.get(state) else {
                continue;
            };
            let depth = token_number(cfg.get("depth"));
            if !depth.is_finite() {
                continue;
            }

            let stack = engine.shadow_stack(&ShadowParams {
                depth,
                light_x,
                light_y,
                intensity: token_number_or(cfg.get("intensity"), 0.25),
                hardness: token_number_or(cfg.get("hardness"), 0.25),
                resolution: 0.0,
                layer_count: Some(layer_count),
                curves: None,
            });

            lines.push(format!("  --shadow-interaction-{state}:"));
            lines.push(format!("    {stack};"));
        }

        let none_stack = engine.zero_shadow_stack(Some(layer_count));
        lines.push("  --shadow-interaction-none:".to_string());
        lines.push(format!("    {none_stack};"));
    }

    lines
}
