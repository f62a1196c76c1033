//! Umbra is a parametric elevation shadow engine.
//!
//! It turns a small set of physically-inspired controls (light direction,
//! perceived depth, intensity, hardness, layer count, optional shaping
//! curves) into an ordered stack of shadow layers, then serializes the stack
//! as a CSS `box-shadow` value or a DTCG-style shadow token value.
//!
//! # Pipeline overview
//!
//! 1. **Normalize**: `ShadowParams -> NormalizedParams` (clamp, default, ease)
//! 2. **Synthesize**: `NormalizedParams + ShadowCurves -> Vec<ShadowLayer>`
//! 3. **Serialize**: layers -> CSS `box-shadow` string or DTCG token value
//! 4. **Batch** (optional): a nested token document -> ordered CSS
//!    custom-property declaration lines
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-default**: synthesis is a pure function of its input;
//!   the [`ShadowEngine`] cache only changes latency, never output.
//! - **Never-throw core**: malformed numeric input is clamped or defaulted,
//!   not rejected. `Result` appears only at the document/IO boundary.
#![forbid(unsafe_code)]

pub mod css;
pub mod cssvars;
pub mod curve;
pub mod engine;
pub mod error;
pub mod fingerprint;
mod math;
pub mod params;
pub mod presets;
pub mod synth;
pub mod token;

pub use css::{layers_to_css, zero_shadow_stack};
pub use cssvars::{build_shadow_css_vars, parse_token_document, sanitise_css_name};
pub use curve::{CurveDef, CurvePoint};
pub use engine::{
    CacheStats, ShadowEngine, build_shadow_layers, build_shadow_stack, build_zero_shadow_stack,
};
pub use error::{UmbraError, UmbraResult};
pub use fingerprint::{ParamsFingerprint, fingerprint_params};
pub use params::{NormalizedParams, ShadowCurves, ShadowParams};
pub use presets::{CurvePreset, CURVE_PRESETS, resolve_preset};
pub use synth::{ShadowLayer, synthesize_layers};
pub use token::{ColorFormat, DtcgColor, DtcgShadowLayer, dtcg_shadow_value};
