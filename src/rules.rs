use std::borrow::Cow;

use crate::dsl::Expr;
use crate::error::{FuzzyError, Result};
use crate::inputs::Inputs;
use crate::variable::{VariableKey, Variables};

/// Rule builder; validated into a [`RuleSet`](crate::RuleSet).
#[derive(Clone, Debug, Default)]
pub struct Rules(pub(crate) Vec<RuleDecl>);

impl Rules {
    pub fn new() -> Self {
        Rules(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Rules(Vec::with_capacity(capacity))
    }

    /// Adds `if premise then consequence`, where the consequence is a single
    /// `output.is(term)` proposition.
    pub fn add(&mut self, premise: Expr, consequence: Expr) {
        self.add_weighted(premise, consequence, 1.);
    }

    pub fn add_weighted(&mut self, premise: Expr, consequence: Expr, weight: f64) {
        self.0.push(RuleDecl {
            premise,
            consequence,
            weight,
        });
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Clone, Debug)]
pub(crate) struct RuleDecl {
    premise: Expr,
    consequence: Expr,
    weight: f64,
}

impl RuleDecl {
    /// Splits the consequent into its output variable and term.
    pub(crate) fn resolve(self) -> Result<(VariableKey, Rule)> {
        if !(self.weight > 0. && self.weight <= 1.) {
            return Err(FuzzyError::InvalidWeight { weight: self.weight });
        }

        match self.consequence {
            Expr::Is(output, term) => Ok((
                output,
                Rule {
                    premise: self.premise,
                    output_term: term,
                    weight: self.weight,
                },
            )),
            other => Err(FuzzyError::InvalidConsequent {
                reason: format!("expected a single proposition, found {other:?}"),
            }),
        }
    }
}

/// A validated rule: antecedent, consequent output term and weight.
#[derive(Clone, Debug, PartialEq)]
pub struct Rule {
    premise: Expr,
    output_term: Cow<'static, str>,
    weight: f64,
}

impl Rule {
    pub fn premise(&self) -> &Expr {
        &self.premise
    }

    pub fn output_term(&self) -> &str {
        &self.output_term
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Firing strength: the premise degree scaled by the weight, kept in
    /// `[0, 1]`.
    pub fn fire(&self, vars: &Variables, inputs: &Inputs) -> Result<(&str, f64)> {
        let degree = self.premise.eval(vars, inputs)?;
        let strength = (degree * self.weight).clamp(0., 1.);

        Ok((&*self.output_term, strength))
    }
}

#[test]
fn test_resolve_rejects_bad_declarations() {
    let mut vars = Variables::new();
    let key = vars
        .insert(
            crate::variable::LinguisticVariable::new(
                "desirability",
                crate::variable::Universe::new(0. ..=100., None).unwrap(),
                [("desejavel", crate::membership::Triangle::new(30., 55., 75.))],
            )
            .unwrap(),
        )
        .unwrap();
    let premise = Expr::is(key, "desejavel");

    let mut rules = Rules::new();
    rules.add_weighted(premise.clone(), Expr::is(key, "desejavel"), 0.);
    rules.add_weighted(premise.clone(), Expr::is(key, "desejavel"), 1.5);
    rules.add(premise.clone(), !Expr::is(key, "desejavel"));
    rules.add_weighted(premise, Expr::is(key, "desejavel"), 0.5);

    let mut resolved = rules.0.into_iter().map(RuleDecl::resolve);

    assert!(matches!(resolved.next(), Some(Err(FuzzyError::InvalidWeight { .. }))));
    assert!(matches!(resolved.next(), Some(Err(FuzzyError::InvalidWeight { .. }))));
    assert!(matches!(resolved.next(), Some(Err(FuzzyError::InvalidConsequent { .. }))));

    let (output, rule) = resolved.next().unwrap().unwrap();

    assert_eq!(output, key);
    assert_eq!(rule.output_term(), "desejavel");
    assert_eq!(rule.weight(), 0.5);

    let mut inputs = Inputs::new();
    inputs.insert(key, 55.);

    assert_eq!(rule.fire(&vars, &inputs).unwrap(), ("desejavel", 0.5));
}
