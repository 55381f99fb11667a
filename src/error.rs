use thiserror::Error;

/// Errors raised while building or evaluating an inference system.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FuzzyError {
    #[error("unknown variable `{0}`")]
    UnknownVariable(String),

    #[error("variable `{variable}` has no label `{label}`")]
    UnknownLabel { variable: String, label: String },

    #[error("no operator bound to `{0}`")]
    UnknownOperator(String),

    #[error("no input supplied for variable `{0}`")]
    MissingInput(String),

    #[error("input for variable `{variable}` is not a finite number: {value}")]
    InvalidInput { variable: String, value: f64 },

    #[error("operator `{operator}` expects {expected} operand(s), got {found}")]
    Arity {
        operator: String,
        expected: &'static str,
        found: usize,
    },

    #[error("invalid `{shape}` membership function: {reason}")]
    InvalidShape { shape: String, reason: String },

    #[error("integration step must be positive and finite, got {0}")]
    InvalidStep(f64),

    /// The aggregated output is zero over the whole sampled domain of the variable.
    #[error("no rule fires anywhere in the domain of `{0}`")]
    EmptyFiring(String),
}

pub type Result<T> = std::result::Result<T, FuzzyError>;

#[test]
fn test_messages() {
    let err = FuzzyError::UnknownLabel {
        variable: "service".into(),
        label: "awful".into(),
    };

    assert_eq!(err.to_string(), "variable `service` has no label `awful`");
    assert_eq!(
        FuzzyError::EmptyFiring("tip".into()).to_string(),
        "no rule fires anywhere in the domain of `tip`"
    );
}
