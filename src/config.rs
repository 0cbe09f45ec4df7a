//! TOML description of a catalog.
//!
//! ```toml
//! output = "desirability"
//!
//! [[variables]]
//! name = "distance"
//! range = [0.0, 100.0]
//! terms = { perto = [0.0, 0.0, 35.0], longe = [60.0, 100.0, 100.0] }
//!
//! [[alternatives]]
//! name = "Sniper"
//!
//! [[alternatives.rules]]
//! when = { is = { var = "distance", term = "longe" } }
//! then = "imprescindivel"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::dsl::Expr;
use crate::error::{FuzzyError, Result};
use crate::inference::RuleSet;
use crate::membership::Triangle;
use crate::rules::Rules;
use crate::selector::{Alternative, Selector};
use crate::variable::{LinguisticVariable, Universe, VariableKey, Variables};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogConfig {
    /// Name of the variable every rule concludes on.
    pub output: String,
    pub variables: Vec<VariableConfig>,
    #[serde(default)]
    pub alternatives: Vec<AlternativeConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VariableConfig {
    pub name: String,
    pub range: [f64; 2],
    /// Grid step, defaults to 1.
    #[serde(default)]
    pub step: Option<f64>,
    /// Term name to triangle breakpoints `[a, b, c]`.
    pub terms: BTreeMap<String, [f64; 3]>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AlternativeConfig {
    pub name: String,
    pub rules: Vec<RuleConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleConfig {
    pub when: ExprConfig,
    pub then: String,
    #[serde(default = "default_weight")]
    pub weight: f64,
}

fn default_weight() -> f64 {
    1.
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExprConfig {
    Is { var: String, term: String },
    And(Vec<ExprConfig>),
    Or(Vec<ExprConfig>),
    Not(Box<ExprConfig>),
}

impl ExprConfig {
    fn build(&self, vars: &Variables) -> Result<Expr> {
        match self {
            ExprConfig::Is { var, term } => {
                let key = key_of(vars, var)?;

                Ok(Expr::is(key, term.clone()))
            },
            ExprConfig::And(exprs) => fold(exprs, vars, "and", Expr::and),
            ExprConfig::Or(exprs) => fold(exprs, vars, "or", Expr::or),
            ExprConfig::Not(expr) => Ok(!expr.build(vars)?),
        }
    }
}

fn fold(exprs: &[ExprConfig], vars: &Variables, op: &str, join: fn(Expr, Expr) -> Expr) -> Result<Expr> {
    let mut iter = exprs.iter();
    let first = iter.next().ok_or_else(|| FuzzyError::Config {
        reason: format!("`{op}` needs at least one operand"),
    })?;
    let mut acc = first.build(vars)?;

    for expr in iter {
        acc = join(acc, expr.build(vars)?);
    }

    Ok(acc)
}

fn key_of(vars: &Variables, name: &str) -> Result<VariableKey> {
    vars.key_of(name).ok_or_else(|| FuzzyError::UnknownVariable {
        variable: name.to_owned(),
    })
}

impl CatalogConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let s = std::fs::read_to_string(path).map_err(|source| FuzzyError::Io {
            path: path.to_owned(),
            source,
        })?;

        Self::from_toml_str(&s)
    }

    /// Builds and validates every variable and rule set. Fails on the first
    /// wiring error.
    pub fn build(&self) -> Result<Selector> {
        let mut vars = Variables::new();

        for var in &self.variables {
            let [lo, hi] = var.range;
            let universe = Universe::new(lo..=hi, var.step)?;
            let terms = var
                .terms
                .iter()
                .map(|(name, breakpoints)| (name.clone(), Triangle::from(*breakpoints)));

            vars.insert(LinguisticVariable::new(var.name.clone(), universe, terms)?)?;
        }

        let output = key_of(&vars, &self.output)?;
        let mut alternatives = Vec::with_capacity(self.alternatives.len());

        for alt in &self.alternatives {
            let mut rules = Rules::with_capacity(alt.rules.len());

            for rule in &alt.rules {
                rules.add_weighted(rule.when.build(&vars)?, Expr::is(output, rule.then.clone()), rule.weight);
            }

            alternatives.push(Alternative::new(alt.name.clone(), RuleSet::new(&vars, rules)?, ()));
        }

        info!(output = %self.output, alternatives = alternatives.len(), "loaded catalog config");

        Selector::new(vars, alternatives)
    }
}
