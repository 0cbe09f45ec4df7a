use std::iter::Sum;

use num::Float;

/// Center of gravity of a sampled membership curve.
///
/// Computed as the discrete weighted mean `Σ x·μ(x) / Σ μ(x)`. Returns
/// `None` when the curve carries no mass.
pub(crate) fn centroid<F>(curve: impl IntoIterator<Item = (F, F)> + Clone) -> Option<F>
where
    F: Float + Sum,
{
    let den = curve.clone().into_iter().map(|(_, m)| m).sum::<F>();

    if den == F::zero() {
        return None;
    }

    let num = curve.into_iter().map(|(x, m)| x * m).sum::<F>();

    Some(num / den)
}

#[test]
fn test_centroid() {
    let curve = [(0., 0.), (1., 1.), (2., 0.)];

    assert_eq!(centroid(curve.iter().copied()), Some(1.));

    let curve = [(0., 1.), (1., 1.), (2., 0.), (3., 0.5)];

    assert_eq!(centroid(curve.iter().copied()), Some(1.));

    let curve = [(0., 0.), (50., 0.), (100., 0.)];

    assert_eq!(centroid(curve.iter().copied()), None);
}
