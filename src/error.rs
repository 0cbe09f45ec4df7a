use std::path::PathBuf;

pub type Result<T, E = FuzzyError> = std::result::Result<T, E>;

/// Errors raised while wiring variables, rules and catalogs together.
///
/// Evaluation itself only fails with [`FuzzyError::UnboundVariable`]; every
/// other variant is a construction error.
#[derive(Debug, thiserror::Error)]
pub enum FuzzyError {
    #[error("invalid breakpoints ({a}, {b}, {c}) for term `{term}` on universe [{lo}, {hi}]")]
    InvalidBreakpoints {
        term: String,
        a: f64,
        b: f64,
        c: f64,
        lo: f64,
        hi: f64,
    },

    #[error("invalid universe [{lo}, {hi}] with step {step}")]
    InvalidUniverse { lo: f64, hi: f64, step: f64 },

    #[error("unknown term `{term}` on variable `{variable}`")]
    UnknownTerm { variable: String, term: String },

    #[error("duplicate term `{term}` on variable `{variable}`")]
    DuplicateTerm { variable: String, term: String },

    #[error("unknown variable `{variable}`")]
    UnknownVariable { variable: String },

    #[error("variable key is not registered in this arena")]
    UnregisteredKey,

    #[error("duplicate variable `{variable}`")]
    DuplicateVariable { variable: String },

    #[error("variable `{variable}` is not bound in the inputs")]
    UnboundVariable { variable: String },

    #[error("rule weight {weight} is outside (0, 1]")]
    InvalidWeight { weight: f64 },

    #[error("invalid consequent: {reason}")]
    InvalidConsequent { reason: String },

    #[error("rule set has no rules")]
    EmptyRuleSet,

    #[error("alternative `{alternative}` concludes on `{found}` instead of `{expected}`")]
    MismatchedOutput {
        alternative: String,
        expected: String,
        found: String,
    },

    #[error("value {value} for `{variable}` is outside [{lo}, {hi}]")]
    OutOfRange {
        variable: String,
        value: f64,
        lo: f64,
        hi: f64,
    },

    #[error("invalid catalog config: {reason}")]
    Config { reason: String },

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
