pub(crate) fn clamp(min: f64, max: f64, n: f64) -> f64 {
    n.max(min).min(max)
}

pub(crate) fn clamp01(n: f64) -> f64 {
    clamp(0.0, 1.0, n)
}

pub(crate) fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Maps `x` from `[in_min, in_max]` to `[0, 1]`, clamped. Zero-width or
/// non-finite input ranges collapse to 0.
pub(crate) fn remap01(x: f64, in_min: f64, in_max: f64) -> f64 {
    let denom = in_max - in_min;
    if !denom.is_finite() || denom == 0.0 {
        return 0.0;
    }
    clamp01((x - in_min) / denom)
}

/// Substitutes `default` for NaN and infinities. The engine never rejects
/// numeric input, it corrects it.
pub(crate) fn finite_or(n: f64, default: f64) -> f64 {
    if n.is_finite() { n } else { default }
}

#[derive(Clone, Copy, Debug)]
pub(crate) struct Fnv1a64(u64);

impl Fnv1a64 {
    pub(crate) const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01B3;

    pub(crate) fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub(crate) fn write_u8(&mut self, v: u8) {
        self.write_bytes(&[v]);
    }

    pub(crate) fn write_u64(&mut self, v: u64) {
        self.write_bytes(&v.to_le_bytes());
    }

    pub(crate) fn write_bytes(&mut self, bytes: &[u8]) {
        let mut h = self.0;
        for &b in bytes {
            h ^= u64::from(b);
            h = h.wrapping_mul(Self::PRIME);
        }
        self.0 = h;
    }

    pub(crate) fn finish(self) -> u64 {
        self.0
    }
}
