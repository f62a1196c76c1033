use crate::math::Fnv1a64;
use crate::params::{NormalizedParams, ShadowCurves};

/// Stable 128-bit key over a normalized parameter set plus its curves.
///
/// Two independently seeded FNV-1a streams keep accidental collisions out of
/// reach for interactive parameter sweeps. Curve JSON is hashed with object
/// keys sorted, so key order in a persisted document never causes a miss.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ParamsFingerprint {
    pub hi: u64,
    pub lo: u64,
}

pub fn fingerprint_params(
    params: &NormalizedParams,
    curves: Option<&ShadowCurves>,
) -> ParamsFingerprint {
    let mut a = Fnv1a64::new(Fnv1a64::OFFSET_BASIS);
    let mut b = Fnv1a64::new(0x9ae1_6a3b_2f90_404f);

    for v in [
        params.depth,
        params.intensity,
        params.hardness,
        params.resolution,
        params.light_x,
        params.light_y,
    ] {
        write_u64_pair(&mut a, &mut b, v.to_bits());
    }

    match params.layer_count {
        Some(lc) => {
            write_u8_pair(&mut a, &mut b, 1);
            write_u64_pair(&mut a, &mut b, lc.to_bits());
        }
        None => write_u8_pair(&mut a, &mut b, 0),
    }

    match curves {
        Some(c) => {
            write_u8_pair(&mut a, &mut b, 1);
            let v = serde_json::to_value(c).unwrap_or(serde_json::Value::Null);
            write_json_value_pair(&mut a, &mut b, &v);
        }
        None => write_u8_pair(&mut a, &mut b, 0),
    }

    ParamsFingerprint {
        hi: a.finish(),
        lo: b.finish(),
    }
}

fn write_json_value_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, v: &serde_json::Value) {
    match v {
        serde_json::Value::Null => write_u8_pair(a, b, 0),
        serde_json::Value::Bool(x) => {
            write_u8_pair(a, b, 1);
            write_u8_pair(a, b, u8::from(*x));
        }
        serde_json::Value::Number(n) => {
            write_u8_pair(a, b, 2);
            write_str_pair(a, b, &n.to_string());
        }
        serde_json::Value::String(s) => {
            write_u8_pair(a, b, 3);
            write_str_pair(a, b, s);
        }
        serde_json::Value::Array(items) => {
            write_u8_pair(a, b, 4);
            write_u64_pair(a, b, items.len() as u64);
            for item in items {
                write_json_value_pair(a, b, item);
            }
        }
        serde_json::Value::Object(map) => {
            write_u8_pair(a, b, 5);
            let mut keys = map.keys().cloned().collect::<Vec<_>>();
            keys.sort();
            write_u64_pair(a, b, keys.len() as u64);
            for k in keys {
                write_str_pair(a, b, &k);
                write_json_value_pair(a, b, &map[&k]);
            }
        }
    }
}

fn write_u8_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, v: u8) {
    a.write_u8(v);
    b.write_u8(v);
}

fn write_u64_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, v: u64) {
    a.write_u64(v);
    b.write_u64(v);
}

fn write_str_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, s: &str) {
    write_u64_pair(a, b, s.len() as u64);
    a.write_bytes(s.as_bytes());
    b.write_bytes(s.as_bytes());
}
