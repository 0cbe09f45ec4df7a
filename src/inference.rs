use std::collections::BTreeMap;

use tracing::{debug, trace};

use crate::error::{FuzzyError, Result};
use crate::inputs::Inputs;
use crate::math::centroid;
use crate::ops;
use crate::outputs::Outputs;
use crate::rules::{Rule, Rules};
use crate::variable::{VariableKey, Variables};

/// An immutable, validated set of rules concluding on one output variable.
///
/// Evaluation is max-min Mamdani inference: rule strengths are combined per
/// output term with max, each term's membership is clipped at its level,
/// the clipped curves are merged point-wise with max and the result is
/// defuzzified by its centroid over the output universe grid.
#[derive(Clone, Debug)]
pub struct RuleSet {
    output: VariableKey,
    rules: Vec<Rule>,
}

impl RuleSet {
    /// Validates the rules against `vars`: every consequent must name a term
    /// of the same output variable and every premise leaf must name a
    /// registered variable and term.
    pub fn new(vars: &Variables, rules: Rules) -> Result<Self> {
        let mut output = None;
        let mut resolved = Vec::with_capacity(rules.len());

        for decl in rules.0 {
            let (var_key, rule) = decl.resolve()?;

            match output {
                None => output = Some(var_key),
                Some(key) if key != var_key => {
                    return Err(FuzzyError::InvalidConsequent {
                        reason: "rules conclude on more than one output variable".to_owned(),
                    });
                },
                Some(_) => {},
            }

            let var = vars.lookup(var_key)?;

            if !var.has_term(rule.output_term()) {
                return Err(var.unknown_term(rule.output_term()));
            }

            rule.premise().validate(vars)?;
            resolved.push(rule);
        }

        let output = output.ok_or(FuzzyError::EmptyRuleSet)?;

        Ok(Self {
            output,
            rules: resolved,
        })
    }

    /// Re-checks every consequent and premise leaf against `vars`, which
    /// must be the arena the rule set was built on.
    pub(crate) fn validate(&self, vars: &Variables) -> Result<()> {
        let output = vars.lookup(self.output)?;

        for rule in &self.rules {
            if !output.has_term(rule.output_term()) {
                return Err(output.unknown_term(rule.output_term()));
            }

            rule.premise().validate(vars)?;
        }

        Ok(())
    }

    pub fn output(&self) -> VariableKey {
        self.output
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Per output term, the maximum firing strength among the rules that
    /// conclude on it. Every rule is evaluated, including those that end up
    /// at zero.
    pub fn activations(&self, vars: &Variables, inputs: &Inputs) -> Result<BTreeMap<&str, f64>> {
        let mut levels = BTreeMap::new();

        for (i, rule) in self.rules.iter().enumerate() {
            let (term, strength) = rule.fire(vars, inputs)?;

            trace!(rule = i, term, strength, "rule fired");

            let level = levels.entry(term).or_insert(0.);
            *level = ops::or(*level, strength);
        }

        Ok(levels)
    }

    /// Runs the inference for one input snapshot.
    ///
    /// When nothing fires the aggregated curve is flat zero and the score is
    /// `0.0`.
    pub fn infer(&self, vars: &Variables, inputs: &Inputs) -> Result<Outputs> {
        let output = vars.lookup(self.output)?;
        let levels = self.activations(vars, inputs)?;
        let grid: Vec<f64> = output.universe().samples().collect();
        let mut aggregated = vec![0.; grid.len()];

        for (term, level) in &levels {
            let membership = output.membership(term).ok_or_else(|| output.unknown_term(term))?;
            let clipped = ops::clip(*level, grid.iter().map(|x| membership.evaluate(*x)));

            aggregated = ops::aggregate(aggregated, clipped).collect();
        }

        let curve: Vec<(f64, f64)> = grid.into_iter().zip(aggregated).collect();
        let score = centroid(curve.iter().copied()).unwrap_or(0.);

        debug!(output = output.name(), ?levels, score, "inference complete");

        Ok(Outputs::new(score, curve))
    }
}
