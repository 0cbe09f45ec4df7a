/// A triangular membership function with breakpoints `a <= b <= c`.
///
/// The membership is 0 outside `[a, c]`, rises linearly to 1 at `b` and
/// falls back to 0 at `c`. When `a == b` or `b == c` that side is a
/// plateau at 1 instead of a ramp.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle {
    a: f64,
    b: f64,
    c: f64,
}

impl Triangle {
    /// Creates a triangle without validating it; see
    /// [`Triangle::is_valid_within`].
    pub const fn new(a: f64, b: f64, c: f64) -> Self {
        Self { a, b, c }
    }

    pub fn breakpoints(&self) -> (f64, f64, f64) {
        (self.a, self.b, self.c)
    }

    /// True when the breakpoints are finite, non-decreasing and lie within
    /// `[lo, hi]`.
    pub fn is_valid_within(&self, lo: f64, hi: f64) -> bool {
        let Self { a, b, c } = *self;

        [a, b, c].iter().all(|p| p.is_finite() && lo <= *p && *p <= hi) && a <= b && b <= c
    }

    /// Membership degree of `x`. Total: any input, including NaN and the
    /// infinities, maps into `[0, 1]`.
    pub fn evaluate(&self, x: f64) -> f64 {
        let Self { a, b, c } = *self;

        if x < a || x > c {
            0.
        } else if x == b {
            1.
        } else if x < b {
            (x - a) / (b - a)
        } else if x > b {
            (c - x) / (c - b)
        } else {
            // NaN
            0.
        }
    }
}

impl From<[f64; 3]> for Triangle {
    fn from([a, b, c]: [f64; 3]) -> Self {
        Triangle::new(a, b, c)
    }
}

#[test]
fn test_triangle_shape() {
    let medio = Triangle::new(20., 50., 80.);

    assert_eq!(medio.evaluate(20.), 0.);
    assert_eq!(medio.evaluate(35.), 0.5);
    assert_eq!(medio.evaluate(50.), 1.);
    assert_eq!(medio.evaluate(65.), 0.5);
    assert_eq!(medio.evaluate(80.), 0.);
    assert_eq!(medio.evaluate(-1000.), 0.);
    assert_eq!(medio.evaluate(1e9), 0.);
}

#[test]
fn test_triangle_plateaus() {
    let perto = Triangle::new(0., 0., 35.);
    let longe = Triangle::new(60., 100., 100.);
    let spike = Triangle::new(5., 5., 5.);

    assert_eq!(perto.evaluate(0.), 1.);
    assert_eq!(perto.evaluate(35.), 0.);
    assert_eq!(longe.evaluate(100.), 1.);
    assert_eq!(longe.evaluate(80.), 0.5);
    assert_eq!(spike.evaluate(5.), 1.);
    assert_eq!(spike.evaluate(5.5), 0.);
}

#[test]
fn test_triangle_non_finite() {
    let t = Triangle::new(0., 50., 100.);

    assert_eq!(t.evaluate(f64::NAN), 0.);
    assert_eq!(t.evaluate(f64::INFINITY), 0.);
    assert_eq!(t.evaluate(f64::NEG_INFINITY), 0.);
}

#[test]
fn test_triangle_validation() {
    assert!(Triangle::new(0., 0., 35.).is_valid_within(0., 100.));
    assert!(!Triangle::new(50., 20., 80.).is_valid_within(0., 100.));
    assert!(!Triangle::new(-1., 20., 80.).is_valid_within(0., 100.));
    assert!(!Triangle::new(60., 100., 101.).is_valid_within(0., 100.));
    assert!(!Triangle::new(f64::NAN, 20., 80.).is_valid_within(0., 100.));
}
