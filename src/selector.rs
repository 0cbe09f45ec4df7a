use std::cmp::Ordering;

use tracing::{debug, info};

use crate::error::{FuzzyError, Result};
use crate::inference::RuleSet;
use crate::inputs::Inputs;
use crate::outputs::Outputs;
use crate::variable::Variables;

/// One entry of the catalog: a named rule set plus caller-defined metadata.
#[derive(Clone, Debug)]
pub struct Alternative<M = ()> {
    name: String,
    rules: RuleSet,
    meta: M,
}

impl<M> Alternative<M> {
    pub fn new(name: impl Into<String>, rules: RuleSet, meta: M) -> Self {
        Self {
            name: name.into(),
            rules,
            meta,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn meta(&self) -> &M {
        &self.meta
    }
}

/// An alternative's score for one input snapshot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ranked<'a> {
    pub name: &'a str,
    pub score: f64,
}

/// Scores every alternative of a catalog with the same inputs and ranks
/// them. The catalog is read-only after construction.
#[derive(Clone, Debug)]
pub struct Selector<M = ()> {
    variables: Variables,
    alternatives: Vec<Alternative<M>>,
}

impl<M> Selector<M> {
    /// Checks every rule set against `variables` and requires all of them to
    /// conclude on the same output variable.
    pub fn new(variables: Variables, alternatives: Vec<Alternative<M>>) -> Result<Self> {
        let mut output = None;

        for alt in &alternatives {
            alt.rules.validate(&variables)?;

            match output {
                None => output = Some(alt.rules.output()),
                Some(key) if key != alt.rules.output() => {
                    return Err(FuzzyError::MismatchedOutput {
                        alternative: alt.name.clone(),
                        expected: variables.lookup(key)?.name().to_owned(),
                        found: variables.lookup(alt.rules.output())?.name().to_owned(),
                    });
                },
                Some(_) => {},
            }
        }

        info!(
            variables = variables.len(),
            alternatives = alternatives.len(),
            "built alternative catalog"
        );

        Ok(Self {
            variables,
            alternatives,
        })
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    pub fn alternatives(&self) -> &[Alternative<M>] {
        &self.alternatives
    }

    pub fn get(&self, name: &str) -> Option<&Alternative<M>> {
        self.alternatives.iter().find(|alt| alt.name == name)
    }

    /// Full inference result for every alternative, in catalog order.
    pub fn evaluate(&self, inputs: &Inputs) -> Result<Vec<(&Alternative<M>, Outputs)>> {
        self.alternatives
            .iter()
            .map(|alt| Ok((alt, alt.rules.infer(&self.variables, inputs)?)))
            .collect::<Result<Vec<_>>>()
    }

    /// Alternatives by descending score. Ties keep catalog order.
    pub fn rank(&self, inputs: &Inputs) -> Result<Vec<Ranked<'_>>> {
        let scores = self
            .alternatives
            .iter()
            .map(|alt| {
                let score = alt.rules.infer(&self.variables, inputs)?.score();

                debug!(alternative = %alt.name, score, "scored alternative");

                Ok(Ranked { name: &alt.name, score })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(sort_ranked(scores))
    }

    /// The highest-scoring alternative, or `None` for an empty catalog.
    pub fn best(&self, inputs: &Inputs) -> Result<Option<Ranked<'_>>> {
        Ok(self.rank(inputs)?.into_iter().next())
    }
}

#[cfg(feature = "rayon")]
impl<M: Sync> Selector<M> {
    /// Same as [`Selector::rank`], scoring alternatives in parallel.
    pub fn rank_par(&self, inputs: &Inputs) -> Result<Vec<Ranked<'_>>> {
        use rayon::prelude::*;

        let scores = self
            .alternatives
            .par_iter()
            .map(|alt| {
                let score = alt.rules.infer(&self.variables, inputs)?.score();

                Ok(Ranked { name: &alt.name, score })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(sort_ranked(scores))
    }
}

fn sort_ranked(mut scores: Vec<Ranked<'_>>) -> Vec<Ranked<'_>> {
    // sort_by is stable, so equal scores stay in catalog order
    scores.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    scores
}

#[test]
fn test_sort_ranked_is_stable() {
    let ranked = sort_ranked(vec![
        Ranked { name: "a", score: 10. },
        Ranked { name: "b", score: 50. },
        Ranked { name: "c", score: 10. },
        Ranked { name: "d", score: 50. },
        Ranked { name: "e", score: 0. },
    ]);
    let names: Vec<_> = ranked.iter().map(|r| r.name).collect();

    assert_eq!(names, vec!["b", "d", "a", "c", "e"]);
}
