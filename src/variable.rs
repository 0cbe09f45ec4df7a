use std::borrow::Cow;
use std::marker::PhantomData;
use std::ops::RangeInclusive;

use slotmap::{new_key_type, SlotMap};
use tracing::debug;

use crate::error::{FuzzyError, Result};
use crate::linspace::Linspace;
use crate::membership::Triangle;
use crate::terms::{Term, Terms};

new_key_type! {
    /// A variable key
    pub struct VariableKey;
}

/// A closed interval `[lo, hi]` discretized at a fixed step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Universe {
    lo: f64,
    hi: f64,
    step: f64,
    len: usize,
}

impl Universe {
    pub const DEFAULT_STEP: f64 = 1.;

    /// Upper bound on the number of grid points.
    pub const MAX_SAMPLES: usize = 1 << 20;

    /// If the step value is not provided, it defaults to 1
    pub fn new(range: RangeInclusive<f64>, step: Option<f64>) -> Result<Self> {
        let lo = *range.start();
        let hi = *range.end();
        let step = step.unwrap_or(Self::DEFAULT_STEP);

        let invalid = || FuzzyError::InvalidUniverse { lo, hi, step };

        if !(lo.is_finite() && hi.is_finite() && lo <= hi && step.is_finite() && step > 0.) {
            return Err(invalid());
        }

        let steps = (hi - lo) / step;

        if !steps.is_finite() {
            return Err(invalid());
        }

        // A step that divides the span up to rounding still reaches `hi`
        let nearest = steps.round();
        let steps = if (steps - nearest).abs() <= 1e-9 * nearest.max(1.) {
            nearest
        } else {
            steps.floor()
        };

        if steps >= Self::MAX_SAMPLES as f64 {
            return Err(invalid());
        }

        let len = (steps as usize).checked_add(1).ok_or_else(invalid)?;

        Ok(Self { lo, hi, step, len })
    }

    pub fn bounds(&self) -> (f64, f64) {
        (self.lo, self.hi)
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Number of sample points on the grid.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn contains(&self, x: f64) -> bool {
        self.lo <= x && x <= self.hi
    }

    /// The sample points `lo, lo + step, ...`, never past `hi`.
    pub fn samples(&self) -> impl ExactSizeIterator<Item = f64> {
        let last = self.lo + self.step * (self.len - 1) as f64;

        Linspace::new(self.lo, last.min(self.hi), self.len)
    }
}

/// A named axis holding a set of triangular terms.
#[derive(Clone, Debug)]
pub struct LinguisticVariable {
    name: String,
    universe: Universe,
    terms: Vec<(Cow<'static, str>, Triangle)>,
}

impl LinguisticVariable {
    pub fn new<N>(
        name: impl Into<String>,
        universe: Universe,
        terms: impl IntoIterator<Item = (N, Triangle)>,
    ) -> Result<Self>
    where
        N: Into<Cow<'static, str>>,
    {
        let name = name.into();
        let (lo, hi) = universe.bounds();
        let mut this = Self {
            name,
            universe,
            terms: Vec::new(),
        };

        for (term, membership) in terms {
            let term = term.into();

            if !membership.is_valid_within(lo, hi) {
                let (a, b, c) = membership.breakpoints();

                return Err(FuzzyError::InvalidBreakpoints {
                    term: term.into_owned(),
                    a,
                    b,
                    c,
                    lo,
                    hi,
                });
            }

            if this.membership(&term).is_some() {
                return Err(FuzzyError::DuplicateTerm {
                    variable: this.name,
                    term: term.into_owned(),
                });
            }

            this.terms.push((term, membership));
        }

        Ok(this)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn universe(&self) -> &Universe {
        &self.universe
    }

    /// Term names in declaration order.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(|(term, _)| &**term)
    }

    pub fn has_term(&self, term: &str) -> bool {
        self.membership(term).is_some()
    }

    pub fn membership(&self, term: &str) -> Option<&Triangle> {
        self.terms.iter().find(|(t, _)| t == term).map(|(_, m)| m)
    }

    /// Degree to which `x` belongs to `term`.
    pub fn degree_of(&self, term: &str, x: f64) -> Result<f64> {
        self.membership(term)
            .map(|m| m.evaluate(x))
            .ok_or_else(|| self.unknown_term(term))
    }

    /// Every term's degree at `x`, in declaration order.
    pub fn degrees(&self, x: f64) -> Vec<(&str, f64)> {
        self.terms.iter().map(|(t, m)| (&**t, m.evaluate(x))).collect()
    }

    /// Samples a term's membership over the universe grid.
    pub fn curve(&self, term: &str) -> Result<Vec<(f64, f64)>> {
        let membership = self.membership(term).ok_or_else(|| self.unknown_term(term))?;

        Ok(self.universe.samples().map(|x| (x, membership.evaluate(x))).collect())
    }

    pub(crate) fn unknown_term(&self, term: &str) -> FuzzyError {
        FuzzyError::UnknownTerm {
            variable: self.name.clone(),
            term: term.to_owned(),
        }
    }
}

/// Typed handle to a variable registered through [`Variables::add`].
pub struct Variable<I>(pub(crate) VariableKey, PhantomData<I>);

impl<I> Variable<I> {
    pub fn key(&self) -> VariableKey {
        self.0
    }
}

impl<I> Clone for Variable<I> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I> Copy for Variable<I> {}

/// Arena of the linguistic variables shared by a catalog's rule sets.
#[derive(Clone, Debug, Default)]
pub struct Variables(pub(crate) SlotMap<VariableKey, LinguisticVariable>);

impl Variables {
    pub fn new() -> Self {
        Self(SlotMap::with_key())
    }

    /// Registers a variable from typed term declarations.
    pub fn add<I: Term>(
        &mut self,
        name: impl Into<String>,
        universe: Universe,
        terms: Terms<I>,
    ) -> Result<Variable<I>> {
        let var = LinguisticVariable::new(name, universe, terms.named())?;
        let key = self.insert(var)?;

        Ok(Variable(key, PhantomData))
    }

    pub fn insert(&mut self, var: LinguisticVariable) -> Result<VariableKey> {
        if self.key_of(var.name()).is_some() {
            return Err(FuzzyError::DuplicateVariable {
                variable: var.name,
            });
        }

        debug!(variable = %var.name, terms = var.terms.len(), "registered linguistic variable");

        Ok(self.0.insert(var))
    }

    pub fn get(&self, key: VariableKey) -> Option<&LinguisticVariable> {
        self.0.get(key)
    }

    pub fn key_of(&self, name: &str) -> Option<VariableKey> {
        self.0.iter().find(|(_, v)| v.name == name).map(|(k, _)| k)
    }

    pub fn by_name(&self, name: &str) -> Result<&LinguisticVariable> {
        self.key_of(name)
            .map(|key| &self.0[key])
            .ok_or_else(|| FuzzyError::UnknownVariable {
                variable: name.to_owned(),
            })
    }

    pub fn iter(&self) -> impl Iterator<Item = (VariableKey, &LinguisticVariable)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn lookup(&self, key: VariableKey) -> Result<&LinguisticVariable> {
        self.0.get(key).ok_or(FuzzyError::UnregisteredKey)
    }
}

#[cfg(test)]
fn distance() -> LinguisticVariable {
    LinguisticVariable::new(
        "distance",
        Universe::new(0. ..=100., None).unwrap(),
        [
            ("perto", Triangle::new(0., 0., 35.)),
            ("medio", Triangle::new(20., 50., 80.)),
            ("longe", Triangle::new(60., 100., 100.)),
        ],
    )
    .unwrap()
}

#[test]
fn test_universe_grid() {
    let universe = Universe::new(0. ..=100., None).unwrap();
    let samples: Vec<_> = universe.samples().collect();

    assert_eq!(universe.len(), 101);
    assert_eq!(samples.len(), 101);
    assert_eq!(samples[0], 0.);
    assert_eq!(samples[100], 100.);

    // Like arange, the grid stops at the last full step
    let universe = Universe::new(0. ..=1., Some(0.3)).unwrap();
    let samples: Vec<_> = universe.samples().collect();

    assert_eq!(samples.len(), 4);
    assert!(samples.iter().all(|x| universe.contains(*x)));

    assert!(Universe::new(10. ..=0., None).is_err());
    assert!(Universe::new(0. ..=10., Some(0.)).is_err());
    assert!(Universe::new(0. ..=f64::INFINITY, None).is_err());
}

#[test]
fn test_universe_inexact_step_keeps_hi() {
    // 0.3 / 0.1 rounds to 2.9999999999999996
    let universe = Universe::new(0. ..=0.3, Some(0.1)).unwrap();
    let samples: Vec<_> = universe.samples().collect();

    assert_eq!(universe.len(), 4);
    assert_eq!(samples[0], 0.);
    assert_eq!(samples[3], 0.3);
}

#[test]
fn test_universe_rejects_unusable_grids() {
    assert!(matches!(
        Universe::new(-1e308..=1e308, None),
        Err(FuzzyError::InvalidUniverse { .. })
    ));
    assert!(matches!(
        Universe::new(0. ..=100., Some(1e-14)),
        Err(FuzzyError::InvalidUniverse { .. })
    ));
    assert!(Universe::new(f64::MIN..=f64::MAX, Some(f64::MAX)).is_err());

    let widest = Universe::new(0. ..=(Universe::MAX_SAMPLES - 1) as f64, None).unwrap();

    assert_eq!(widest.len(), Universe::MAX_SAMPLES);
    assert!(Universe::new(0. ..=Universe::MAX_SAMPLES as f64, None).is_err());
}

#[test]
fn test_degree_of_boundaries() {
    let distance = distance();

    assert_eq!(distance.degree_of("perto", 0.).unwrap(), 1.);
    assert_eq!(distance.degree_of("medio", 0.).unwrap(), 0.);
    assert_eq!(distance.degree_of("longe", 0.).unwrap(), 0.);
    assert_eq!(distance.degree_of("longe", 100.).unwrap(), 1.);
    assert_eq!(distance.degree_of("medio", 50.).unwrap(), 1.);
    assert_eq!(distance.degree_of("perto", -50.).unwrap(), 0.);
    assert_eq!(
        distance.degrees(10.),
        vec![("perto", 25. / 35.), ("medio", 0.), ("longe", 0.)]
    );
    assert_eq!(distance.terms().collect::<Vec<_>>(), vec!["perto", "medio", "longe"]);
}

#[test]
fn test_unknown_term() {
    let distance = distance();

    assert!(matches!(
        distance.degree_of("colado", 10.),
        Err(FuzzyError::UnknownTerm { ref variable, ref term }) if variable == "distance" && term == "colado"
    ));
    assert!(distance.curve("colado").is_err());
}

#[test]
fn test_invalid_terms() {
    let universe = Universe::new(0. ..=100., None).unwrap();

    let err = LinguisticVariable::new("ammo", universe, [("alta", Triangle::new(60., 100., 120.))]).unwrap_err();
    assert!(matches!(err, FuzzyError::InvalidBreakpoints { .. }));

    let err = LinguisticVariable::new("ammo", universe, [("alta", Triangle::new(80., 60., 100.))]).unwrap_err();
    assert!(matches!(err, FuzzyError::InvalidBreakpoints { .. }));

    let err = LinguisticVariable::new(
        "ammo",
        universe,
        [("alta", Triangle::new(60., 100., 100.)), ("alta", Triangle::new(0., 0., 40.))],
    )
    .unwrap_err();
    assert!(matches!(err, FuzzyError::DuplicateTerm { .. }));
}

#[test]
fn test_curve() {
    let curve = distance().curve("medio").unwrap();

    assert_eq!(curve.len(), 101);
    assert_eq!(curve[50], (50., 1.));
    assert_eq!(curve[35], (35., 0.5));
    assert!(curve.iter().all(|(_, m)| (0. ..=1.).contains(m)));
}

#[test]
fn test_variables_arena() {
    let mut vars = Variables::new();
    let key = vars.insert(distance()).unwrap();

    assert_eq!(vars.key_of("distance"), Some(key));
    assert_eq!(vars.by_name("distance").unwrap().name(), "distance");
    assert!(matches!(vars.by_name("ammo"), Err(FuzzyError::UnknownVariable { .. })));
    assert!(matches!(vars.insert(distance()), Err(FuzzyError::DuplicateVariable { .. })));
    assert_eq!(vars.len(), 1);

    let other = Variables::new();

    assert!(matches!(other.lookup(key), Err(FuzzyError::UnregisteredKey)));
}
