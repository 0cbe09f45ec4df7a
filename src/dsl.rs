use std::borrow::Cow;
use std::ops::{BitAnd, BitOr, Not};

use crate::error::{FuzzyError, Result};
use crate::inputs::Inputs;
use crate::ops;
use crate::terms::Term;
use crate::variable::{Variable, VariableKey, Variables};

/// A rule antecedent: propositions over variable terms joined with fuzzy
/// AND (min), OR (max) and NOT (complement).
#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Is(VariableKey, Cow<'static, str>),
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    Not(Box<Expr>),
}

impl Expr {
    /// A proposition on a term given by name.
    pub fn is(var: VariableKey, term: impl Into<Cow<'static, str>>) -> Self {
        Expr::Is(var, term.into())
    }

    pub fn or(self, rhs: Expr) -> Self {
        Expr::Or(Box::new(self), Box::new(rhs))
    }

    pub fn and(self, rhs: Expr) -> Self {
        Expr::And(Box::new(self), Box::new(rhs))
    }

    pub fn and2(self, rhs: Expr, rhs2: Expr) -> Self {
        self.and(rhs).and(rhs2)
    }

    pub fn negate(self) -> Self {
        Expr::Not(Box::new(self))
    }

    /// Every `(variable, term)` leaf, left to right.
    pub fn propositions(&self) -> Vec<(VariableKey, &str)> {
        let mut props = Vec::new();

        fn parse<'p>(expr: &'p Expr, out: &mut Vec<(VariableKey, &'p str)>) {
            match expr {
                Expr::Is(var_key, term) => out.push((*var_key, &**term)),
                Expr::And(expr, expr2) | Expr::Or(expr, expr2) => {
                    parse(expr, out);
                    parse(expr2, out);
                },
                Expr::Not(expr) => parse(expr, out),
            }
        }

        parse(self, &mut props);

        props
    }

    /// Degree to which the antecedent holds for the bound inputs.
    ///
    /// Both sides of AND/OR are always evaluated; no short-circuiting.
    pub fn eval(&self, vars: &Variables, inputs: &Inputs) -> Result<f64> {
        match self {
            Expr::Is(var_key, term) => {
                let var = vars.lookup(*var_key)?;
                let x = inputs.get(*var_key).ok_or_else(|| FuzzyError::UnboundVariable {
                    variable: var.name().to_owned(),
                })?;

                var.degree_of(term, x)
            },
            Expr::And(expr, expr2) => {
                let left = expr.eval(vars, inputs)?;
                let right = expr2.eval(vars, inputs)?;

                Ok(ops::and(left, right))
            },
            Expr::Or(expr, expr2) => {
                let left = expr.eval(vars, inputs)?;
                let right = expr2.eval(vars, inputs)?;

                Ok(ops::or(left, right))
            },
            Expr::Not(expr) => Ok(ops::not(expr.eval(vars, inputs)?)),
        }
    }

    /// Checks every leaf against the arena, so later evaluation can only fail
    /// on unbound inputs.
    pub(crate) fn validate(&self, vars: &Variables) -> Result<()> {
        for (var_key, term) in self.propositions() {
            let var = vars.lookup(var_key)?;

            if !var.has_term(term) {
                return Err(var.unknown_term(term));
            }
        }

        Ok(())
    }
}

impl BitAnd for Expr {
    type Output = Expr;

    fn bitand(self, rhs: Expr) -> Expr {
        self.and(rhs)
    }
}

impl BitOr for Expr {
    type Output = Expr;

    fn bitor(self, rhs: Expr) -> Expr {
        self.or(rhs)
    }
}

impl Not for Expr {
    type Output = Expr;

    fn not(self) -> Expr {
        self.negate()
    }
}

impl<I: Term> Variable<I> {
    pub fn is(self, rhs: I) -> Expr {
        Expr::Is(self.0, Cow::Borrowed(rhs.name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::membership::Triangle;
    use crate::variable::{LinguisticVariable, Universe};

    fn setup() -> (Variables, VariableKey, VariableKey) {
        let universe = Universe::new(0. ..=100., None).unwrap();
        let mut vars = Variables::new();
        let distance = vars
            .insert(
                LinguisticVariable::new(
                    "distance",
                    universe,
                    [
                        ("perto", Triangle::new(0., 0., 35.)),
                        ("medio", Triangle::new(20., 50., 80.)),
                    ],
                )
                .unwrap(),
            )
            .unwrap();
        let ammo = vars
            .insert(
                LinguisticVariable::new(
                    "ammunition",
                    universe,
                    [
                        ("baixa", Triangle::new(0., 0., 40.)),
                        ("alta", Triangle::new(60., 100., 100.)),
                    ],
                )
                .unwrap(),
            )
            .unwrap();

        (vars, distance, ammo)
    }

    #[test]
    fn test_connectives() {
        let (vars, distance, ammo) = setup();
        let mut inputs = Inputs::new();

        inputs.insert(distance, 35.);
        inputs.insert(ammo, 80.);

        let medio = vars.get(distance).unwrap().degree_of("medio", 35.).unwrap();
        let alta = vars.get(ammo).unwrap().degree_of("alta", 80.).unwrap();

        assert_eq!(medio, 0.5);
        assert_eq!(alta, 0.5);

        let p = Expr::is(distance, "medio");
        let q = Expr::is(ammo, "baixa");

        assert_eq!((p.clone() & q.clone()).eval(&vars, &inputs).unwrap(), 0.);
        assert_eq!((p.clone() | q.clone()).eval(&vars, &inputs).unwrap(), 0.5);
        assert_eq!((!q.clone()).eval(&vars, &inputs).unwrap(), 1.);
        assert_eq!(
            (!p.clone() | Expr::is(ammo, "alta")).eval(&vars, &inputs).unwrap(),
            0.5
        );
        assert_eq!(
            Expr::is(distance, "perto")
                .and2(q.clone(), p.clone())
                .eval(&vars, &inputs)
                .unwrap(),
            0.
        );
    }

    #[test]
    fn test_unbound_variable() {
        let (vars, distance, ammo) = setup();
        let mut inputs = Inputs::new();

        inputs.insert(distance, 10.);

        let expr = Expr::is(distance, "perto") | Expr::is(ammo, "alta");

        assert!(matches!(
            expr.eval(&vars, &inputs),
            Err(FuzzyError::UnboundVariable { variable }) if variable == "ammunition"
        ));
    }

    #[test]
    fn test_propositions_and_validate() {
        let (vars, distance, ammo) = setup();
        let expr = Expr::is(distance, "perto") & !(Expr::is(ammo, "baixa") | Expr::is(ammo, "media"));

        assert_eq!(
            expr.propositions(),
            vec![(distance, "perto"), (ammo, "baixa"), (ammo, "media")]
        );
        assert!(matches!(
            expr.validate(&vars),
            Err(FuzzyError::UnknownTerm { term, .. }) if term == "media"
        ));
        assert!(Expr::is(distance, "medio").validate(&vars).is_ok());
    }
}
