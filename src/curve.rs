use crate::math::{clamp01, lerp, remap01};

/// Interior control point of a shaping spline, both coordinates in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct CurvePoint {
    pub x: f64,
    pub y: f64,
}

impl CurvePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A shaping function on `[0,1] -> [0,1]`.
///
/// Three wire shapes are accepted, for compatibility with persisted token
/// documents: a CSS-style cubic Bézier (`{x1,y1,x2,y2}`), an object-wrapped
/// point list (`{points: [...]}`), and a bare point list. The point lists
/// hold *interior* knots only; endpoints `(0,0)` and `(1,1)` are implicit.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum CurveDef {
    /// CSS-style cubic Bézier timing function from (0,0) to (1,1).
    Bezier { x1: f64, y1: f64, x2: f64, y2: f64 },
    /// Interior spline points, object-wrapped.
    Wrapped { points: Vec<CurvePoint> },
    /// Interior spline points, bare.
    Points(Vec<CurvePoint>),
}

impl CurveDef {
    pub fn from_points(points: Vec<CurvePoint>) -> Self {
        Self::Points(points)
    }

    /// Evaluates the curve at `x`. Input and output are clamped to `[0, 1]`
    /// by construction of the underlying functions.
    pub fn evaluate(&self, x: f64) -> f64 {
        match self {
            Self::Bezier { x1, y1, x2, y2 } => cubic_bezier_at_x(x, *x1, *y1, *x2, *y2),
            Self::Wrapped { points } => evaluate_spline(x, points),
            Self::Points(points) => evaluate_spline(x, points),
        }
    }
}

/// Evaluates an optional curve; an absent curve is the identity line.
///
/// This is the single evaluator shared by the layer synthesizer and any
/// preview path: two callers given the same curve and `x` must observe
/// bit-identical results.
pub fn evaluate(curve: Option<&CurveDef>, x: f64) -> f64 {
    match curve {
        Some(c) => c.evaluate(x),
        None => x,
    }
}

fn bezier_coord(t: f64, c1: f64, c2: f64) -> f64 {
    let u = 1.0 - t;
    3.0 * u * u * t * c1 + 3.0 * u * t * t * c2 + t * t * t
}

fn bezier_coord_deriv(t: f64, c1: f64, c2: f64) -> f64 {
    let u = 1.0 - t;
    3.0 * u * u * c1 + 6.0 * u * t * (c2 - c1) + 3.0 * t * t * (1.0 - c2)
}

/// Solves a CSS cubic Bézier for y at a given x: Newton–Raphson first, with
/// a bisection fallback when the residual stays above 1e-3.
fn cubic_bezier_at_x(x: f64, x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    let target = clamp01(x);
    let cx1 = clamp01(x1);
    let cx2 = clamp01(x2);
    let cy1 = clamp01(y1);
    let cy2 = clamp01(y2);

    // The linear curve is common enough (it is the "no easing" default) to
    // skip iteration, and its derivative never degenerates.
    if cx1 == cy1 && cx2 == cy2 && cx1 == 0.0 && cx2 == 1.0 {
        return target;
    }

    let mut t = target;
    for _ in 0..6 {
        let x_est = bezier_coord(t, cx1, cx2);
        let dx = x_est - target;
        if dx.abs() < 1e-5 {
            break;
        }
        let d = bezier_coord_deriv(t, cx1, cx2);
        if d.abs() < 1e-6 {
            break;
        }
        t = clamp01(t - dx / d);
    }

    let mut x_est = bezier_coord(t, cx1, cx2);
    if (x_est - target).abs() > 1e-3 {
        let mut lo = 0.0;
        let mut hi = 1.0;
        t = target;
        for _ in 0..20 {
            x_est = bezier_coord(t, cx1, cx2);
            if (x_est - target).abs() < 1e-5 {
                break;
            }
            if x_est < target {
                lo = t;
            } else {
                hi = t;
            }
            t = (lo + hi) / 2.0;
        }
    }

    bezier_coord(t, cy1, cy2)
}

/// Monotone cubic Hermite spline through the interior points, with implicit
/// endpoints at (0,0) and (1,1). Fritsch–Carlson tangent limiting keeps the
/// interpolant free of overshoot between monotone knots.
fn evaluate_spline(x: f64, points: &[CurvePoint]) -> f64 {
    if points.is_empty() {
        return x;
    }

    // Working copy: caller order is not trusted, and caller data is never
    // mutated.
    let mut interior = points.to_vec();
    interior.sort_by(|a, b| a.x.total_cmp(&b.x));

    let mut pts = Vec::with_capacity(interior.len() + 2);
    if interior[0].x > 0.001 {
        pts.push(CurvePoint::new(0.0, 0.0));
    }
    pts.extend_from_slice(&interior);
    if pts[pts.len() - 1].x < 0.999 {
        pts.push(CurvePoint::new(1.0, 1.0));
    }

    let n = pts.len();
    if n == 1 {
        return pts[0].y;
    }
    if n == 2 {
        let t = remap01(x, pts[0].x, pts[1].x);
        return lerp(pts[0].y, pts[1].y, t);
    }

    let cx = clamp01(x);
    if cx <= pts[0].x {
        return pts[0].y;
    }
    if cx >= pts[n - 1].x {
        return pts[n - 1].y;
    }

    // Secant slopes per segment.
    let mut delta = Vec::with_capacity(n - 1);
    for i in 0..n - 1 {
        let w = pts[i + 1].x - pts[i].x;
        delta.push(if w > 0.0 { (pts[i + 1].y - pts[i].y) / w } else { 0.0 });
    }

    // Knot tangents: endpoint tangents follow the adjacent secant, interior
    // tangents average neighbours, zeroed at local extrema.
    let mut m = vec![0.0; n];
    m[0] = delta[0];
    m[n - 1] = delta[n - 2];
    for i in 1..n - 1 {
        m[i] = if delta[i - 1] * delta[i] <= 0.0 {
            0.0
        } else {
            (delta[i - 1] + delta[i]) / 2.0
        };
    }

    // Fritsch–Carlson monotonicity limiter.
    for i in 0..n - 1 {
        if delta[i].abs() < 1e-12 {
            m[i] = 0.0;
            m[i + 1] = 0.0;
        } else {
            let alpha = m[i] / delta[i];
            let beta = m[i + 1] / delta[i];
            let tau = alpha * alpha + beta * beta;
            if tau > 9.0 {
                let s = 3.0 / tau.sqrt();
                m[i] = s * alpha * delta[i];
                m[i + 1] = s * beta * delta[i];
            }
        }
    }

    let mut seg = 0;
    for i in 0..n - 1 {
        if cx >= pts[i].x && cx <= pts[i + 1].x {
            seg = i;
            break;
        }
    }

    let dx = pts[seg + 1].x - pts[seg].x;
    let t = if dx > 0.0 { (cx - pts[seg].x) / dx } else { 0.0 };
    let t2 = t * t;
    let t3 = t2 * t;

    let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
    let h10 = t3 - 2.0 * t2 + t;
    let h01 = -2.0 * t3 + 3.0 * t2;
    let h11 = t3 - t2;

    h00 * pts[seg].y + h10 * dx * m[seg] + h01 * pts[seg + 1].y + h11 * dx * m[seg + 1]
}
