//! Mamdani fuzzy inference over triangular linguistic variables, used to
//! score and rank a catalog of discrete alternatives.
//!
//! ```
//! use fuzzy_armory::armory::{Armory, PISTOL};
//!
//! let armory = Armory::new()?;
//! let best = armory.best(10., 90.)?.expect("non-empty roster");
//!
//! assert_eq!(best.name, PISTOL);
//! # Ok::<(), fuzzy_armory::FuzzyError>(())
//! ```

pub mod armory;
pub mod config;
mod dsl;
mod error;
mod inference;
mod inputs;
mod linspace;
mod math;
mod membership;
pub mod ops;
mod outputs;
mod rules;
mod selector;
mod terms;
mod variable;

pub use dsl::Expr;
pub use error::{FuzzyError, Result};
pub use inference::RuleSet;
pub use inputs::Inputs;
pub use membership::Triangle;
pub use outputs::Outputs;
pub use rules::{Rule, Rules};
pub use selector::{Alternative, Ranked, Selector};
pub use terms::{Key, Term, Terms};
pub use variable::{LinguisticVariable, Universe, Variable, VariableKey, Variables};
