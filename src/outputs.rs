/// Result of one inference: the crisp score plus the aggregated output curve
/// it was defuzzified from.
#[derive(Clone, Debug, PartialEq)]
pub struct Outputs {
    score: f64,
    aggregated: Vec<(f64, f64)>,
}

impl Outputs {
    pub(crate) fn new(score: f64, aggregated: Vec<(f64, f64)>) -> Self {
        Self { score, aggregated }
    }

    pub fn score(&self) -> f64 {
        self.score
    }

    /// `(x, membership)` samples over the output universe.
    pub fn aggregated(&self) -> &[(f64, f64)] {
        &self.aggregated
    }

    /// True when the aggregated curve has no mass on the grid, so the score
    /// is the zero-evidence fallback.
    pub fn is_empty(&self) -> bool {
        self.aggregated.iter().all(|(_, m)| *m == 0.)
    }

    pub fn into_aggregated(self) -> Vec<(f64, f64)> {
        self.aggregated
    }
}
