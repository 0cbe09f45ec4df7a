use std::collections::HashMap;

use crate::error::{FuzzyError, Result};
use crate::variable::{Variable, VariableKey, Variables};

/// Crisp input values bound to variables for one evaluation.
#[derive(Clone, Debug, Default)]
pub struct Inputs(pub(crate) HashMap<VariableKey, f64>);

impl Inputs {
    pub fn new() -> Self {
        Inputs(HashMap::new())
    }

    pub fn add<I>(&mut self, var: Variable<I>, val: f64) {
        self.0.insert(var.0, val);
    }

    pub fn insert(&mut self, key: VariableKey, val: f64) {
        self.0.insert(key, val);
    }

    /// Binds a value by variable name.
    pub fn add_named(&mut self, vars: &Variables, name: &str, val: f64) -> Result<()> {
        let key = vars.key_of(name).ok_or_else(|| FuzzyError::UnknownVariable {
            variable: name.to_owned(),
        })?;

        self.0.insert(key, val);

        Ok(())
    }

    pub fn get(&self, key: VariableKey) -> Option<f64> {
        self.0.get(&key).copied()
    }

    /// Rejects values outside their variable's universe, checking variables
    /// in registration order. Inference itself never calls this; out-of-range
    /// values just saturate to zero membership.
    pub fn validate(&self, vars: &Variables) -> Result<()> {
        if self.0.keys().any(|key| vars.get(*key).is_none()) {
            return Err(FuzzyError::UnregisteredKey);
        }

        for (key, var) in vars.iter() {
            let Some(value) = self.get(key) else {
                continue;
            };
            let universe = var.universe();

            if !universe.contains(value) {
                let (lo, hi) = universe.bounds();

                return Err(FuzzyError::OutOfRange {
                    variable: var.name().to_owned(),
                    value,
                    lo,
                    hi,
                });
            }
        }

        Ok(())
    }
}
