use crate::synth::ShadowLayer;

/// Target color space for DTCG color values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorFormat {
    Hex,
    Rgb,
    Lch,
    Oklch,
}

/// DTCG-style color value: a color space, its components, an alpha, and the
/// originating hex for tools that prefer it.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DtcgColor {
    pub color_space: String,
    pub components: [f64; 3],
    pub alpha: f64,
    pub hex: String,
}

/// Dimension value with an explicit unit; the engine only emits pixels.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct DtcgDimension {
    pub value: f64,
    pub unit: String,
}

impl DtcgDimension {
    fn px(value: f64) -> Self {
        Self {
            value,
            unit: "px".to_string(),
        }
    }
}

/// One entry of a DTCG `shadow` token's `$value` array.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DtcgShadowLayer {
    pub color: DtcgColor,
    pub offset_x: DtcgDimension,
    pub offset_y: DtcgDimension,
    pub blur: DtcgDimension,
    pub spread: DtcgDimension,
}

/// Renders a layer list as a DTCG shadow token value, resolving each layer's
/// color against the base or accent hex. A missing accent falls back to the
/// base, mirroring the CSS variable fallback.
pub fn dtcg_shadow_value(
    layers: &[ShadowLayer],
    shadow_hex: &str,
    accent_hex: Option<&str>,
    format: ColorFormat,
) -> Vec<DtcgShadowLayer> {
    layers
        .iter()
        .map(|layer| {
            let hex = if layer.is_accent {
                accent_hex.unwrap_or(shadow_hex)
            } else {
                shadow_hex
            };
            DtcgShadowLayer {
                color: hex_to_dtcg_color(hex, layer.alpha, format),
                offset_x: DtcgDimension::px(layer.offset_x),
                offset_y: DtcgDimension::px(layer.offset_y),
                blur: DtcgDimension::px(layer.blur),
                spread: DtcgDimension::px(layer.spread),
            }
        })
        .collect()
}

/// Resolves a hex color into the requested DTCG color space. Malformed hex
/// resolves to black rather than failing; this sits inside the same
/// never-throw boundary as the rest of the engine.
pub fn hex_to_dtcg_color(hex: &str, alpha: f64, format: ColorFormat) -> DtcgColor {
    let [r, g, b] = parse_hex(hex).unwrap_or([0, 0, 0]);
    let canonical = format!("#{r:02x}{g:02x}{b:02x}");

    let (space, components) = match format {
        ColorFormat::Hex | ColorFormat::Rgb => (
            "srgb",
            [
                round4(f64::from(r) / 255.0),
                round4(f64::from(g) / 255.0),
                round4(f64::from(b) / 255.0),
            ],
        ),
        ColorFormat::Oklch => {
            let [l, c, h] = rgb_to_oklch(r, g, b);
            ("oklch", [round4(l), round4(c), round2(h)])
        }
        ColorFormat::Lch => {
            let [l, c, h] = rgb_to_lch(r, g, b);
            ("lch", [round2(l), round2(c), round2(h)])
        }
    };

    DtcgColor {
        color_space: space.to_string(),
        components,
        alpha,
        hex: canonical,
    }
}

fn parse_hex(hex: &str) -> Option<[u8; 3]> {
    let digits = hex.strip_prefix('#')?;
    match digits.len() {
        6 => {
            let n = u32::from_str_radix(digits, 16).ok()?;
            Some([(n >> 16) as u8, (n >> 8) as u8, n as u8])
        }
        3 => {
            let n = u32::from_str_radix(digits, 16).ok()?;
            let (r, g, b) = ((n >> 8) & 0xf, (n >> 4) & 0xf, n & 0xf);
            Some([(r * 17) as u8, (g * 17) as u8, (b * 17) as u8])
        }
        _ => None,
    }
}

fn round2(n: f64) -> f64 {
    (n * 100.0).round() / 100.0
}

fn round4(n: f64) -> f64 {
    (n * 10_000.0).round() / 10_000.0
}

fn linearize(c: f64) -> f64 {
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

fn linear_rgb(r: u8, g: u8, b: u8) -> [f64; 3] {
    [
        linearize(f64::from(r) / 255.0),
        linearize(f64::from(g) / 255.0),
        linearize(f64::from(b) / 255.0),
    ]
}

fn rgb_to_oklch(r: u8, g: u8, b: u8) -> [f64; 3] {
    let [lr, lg, lb] = linear_rgb(r, g, b);

    let l_ = 0.4122214708 * lr + 0.5363325363 * lg + 0.0514459929 * lb;
    let m_ = 0.2119034982 * lr + 0.6806995451 * lg + 0.1073969566 * lb;
    let s_ = 0.0883024619 * lr + 0.2817188376 * lg + 0.6299787005 * lb;
    let l3 = l_.cbrt();
    let m3 = m_.cbrt();
    let s3 = s_.cbrt();

    let l = 0.2104542553 * l3 + 0.7936177850 * m3 - 0.0040720468 * s3;
    let a = 1.9779984951 * l3 - 2.4285922050 * m3 + 0.4505937099 * s3;
    let bk = 0.0259040371 * l3 + 0.7827717662 * m3 - 0.8086757660 * s3;

    let c = a.hypot(bk);
    let mut h = bk.atan2(a).to_degrees();
    if h < 0.0 {
        h += 360.0;
    }
    [l, c, h]
}

fn rgb_to_lch(r: u8, g: u8, b: u8) -> [f64; 3] {
    let [lr, lg, lb] = linear_rgb(r, g, b);

    // sRGB linear -> XYZ (D65) -> Lab -> LCh.
    let x = 0.4124564 * lr + 0.3575761 * lg + 0.1804375 * lb;
    let y = 0.2126729 * lr + 0.7151522 * lg + 0.0721750 * lb;
    let z = 0.0193339 * lr + 0.1191920 * lg + 0.9503041 * lb;

    let fn_ = |t: f64| {
        if t > 0.008856 {
            t.cbrt()
        } else {
            7.787 * t + 16.0 / 116.0
        }
    };
    let (xn, yn, zn) = (0.95047, 1.0, 1.08883);
    let (fx, fy, fz) = (fn_(x / xn), fn_(y / yn), fn_(z / zn));

    let l = 116.0 * fy - 16.0;
    let a = 500.0 * (fx - fy);
    let bk = 200.0 * (fy - fz);

    let c = a.hypot(bk);
    let mut h = bk.atan2(a).to_degrees();
    if h < 0.0 {
        h += 360.0;
    }
    [l, c, h]
}
