//! Max-min fuzzy operators.

use num::Float;

/// Fuzzy AND, the minimum t-norm.
#[inline]
pub fn and<F: Float>(u: F, v: F) -> F {
    F::min(u, v)
}

/// Fuzzy OR, the maximum t-conorm.
#[inline]
pub fn or<F: Float>(u: F, v: F) -> F {
    F::max(u, v)
}

/// Fuzzy NOT, the standard complement.
#[inline]
pub fn not<F: Float>(u: F) -> F {
    F::one() - u
}

/// Mamdani implication: clips a consequent membership curve at the rule's
/// firing level.
pub fn clip<F: Float>(level: F, membership: impl IntoIterator<Item = F>) -> impl Iterator<Item = F> {
    membership.into_iter().map(move |m| and(level, m))
}

/// Point-wise maximum of two membership curves sampled on the same grid.
pub fn aggregate<F: Float>(
    u: impl IntoIterator<Item = F>,
    v: impl IntoIterator<Item = F>,
) -> impl Iterator<Item = F> {
    u.into_iter().zip(v).map(|(u, v)| or(u, v))
}

#[test]
fn test_operator_algebra() {
    let values = [0., 0.25, 0.5, 0.75, 1.];

    for p in values {
        for q in values {
            assert_eq!(and(p, q), p.min(q));
            assert_eq!(or(p, q), p.max(q));
        }
        assert_eq!(not(p), 1. - p);
        assert_eq!(not(not(p)), p);
    }
}

#[test]
fn test_clip_and_aggregate() {
    let clipped: Vec<f64> = clip(0.5, [0., 0.25, 1., 0.75]).collect();

    assert_eq!(clipped, vec![0., 0.25, 0.5, 0.5]);

    let agg: Vec<f64> = aggregate([0., 0.5, 0.2], [0.3, 0.1, 0.2]).collect();

    assert_eq!(agg, vec![0.3, 0.5, 0.2]);
}
