use std::collections::BTreeMap;

use num::Float;
use serde::{Deserialize, Serialize};

use crate::error::{FuzzyError, Result};

/// Fuzzy complement.
pub fn not<F: Float>(x: F) -> F {
    F::one() - x
}

/// Probabilistic sum, folded left over `xs`. Empty input yields the identity, zero.
pub fn probor<F: Float>(xs: impl IntoIterator<Item = F>) -> F {
    xs.into_iter().fold(F::zero(), |u, v| u + v - u * v)
}

/// Operator method for combining the degrees of propositions in a fuzzy rule
/// premise. The t-norms and t-conorms fold over any number of operands;
/// complement and hedges take exactly one.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    Min,
    Prod,
    BoundedProd,
    DrasticProd,
    Max,
    ProbOr,
    BoundedSum,
    DrasticSum,
    Not,
    /// Concentration hedge, `x²`
    Very,
    /// Dilation hedge, `√x`
    Somewhat,
}

impl Operator {
    pub fn is_unary(self) -> bool {
        matches!(self, Self::Not | Self::Very | Self::Somewhat)
    }

    fn link<F: Float>(self, u: F, v: F) -> F {
        match self {
            Self::Max => F::max(u, v),
            Self::ProbOr => u + v - u * v,
            Self::BoundedSum => F::min(F::one(), u + v),
            Self::DrasticSum => {
                if v == F::zero() {
                    u
                } else if u == F::zero() {
                    v
                } else {
                    F::one()
                }
            },
            Self::Min => F::min(u, v),
            Self::Prod => u * v,
            Self::BoundedProd => F::max(F::zero(), u + v - F::one()),
            Self::DrasticProd => {
                if v == F::one() {
                    u
                } else if u == F::one() {
                    v
                } else {
                    F::zero()
                }
            },
            Self::Not | Self::Very | Self::Somewhat => u,
        }
    }

    /// Applies the operator to `operands` in order. `symbol` names the binding
    /// for error reporting.
    pub fn apply<F: Float>(self, symbol: &str, operands: &[F]) -> Result<F> {
        let arity = |expected| FuzzyError::Arity {
            operator: symbol.to_owned(),
            expected,
            found: operands.len(),
        };

        if self.is_unary() {
            let &[x] = operands else {
                return Err(arity("exactly 1"));
            };

            return Ok(match self {
                Self::Very => x * x,
                Self::Somewhat => x.sqrt(),
                _ => not(x),
            });
        }

        let (&first, rest) = operands.split_first().ok_or_else(|| arity("at least 1"))?;

        Ok(match self {
            Self::ProbOr => probor(operands.iter().copied()),
            _ => rest.iter().fold(first, |acc, &v| self.link(acc, v)),
        })
    }
}

/// Symbol to operator bindings used when evaluating rule premises.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Operators(BTreeMap<String, Operator>);

impl Operators {
    /// No bindings at all.
    pub fn empty() -> Self {
        Operators(BTreeMap::new())
    }

    pub fn bind(&mut self, symbol: impl Into<String>, op: Operator) -> &mut Self {
        self.0.insert(symbol.into(), op);
        self
    }

    pub fn get(&self, symbol: &str) -> Result<Operator> {
        self.0
            .get(symbol)
            .copied()
            .ok_or_else(|| FuzzyError::UnknownOperator(symbol.to_owned()))
    }
}

/// `and` is min, `or` is max, `not` is the complement.
impl Default for Operators {
    fn default() -> Self {
        let mut ops = Operators::empty();

        ops.bind("and", Operator::Min).bind("or", Operator::Max).bind("not", Operator::Not);
        ops
    }
}

#[test]
fn test_not_involution() {
    for x in [0., 0.25, 0.5, 0.6, 1.] {
        assert_eq!(not(not(x)), x);
    }
}

#[test]
fn test_probor() {
    assert_eq!(probor([0.5, 0.5]), 0.75);
    assert_eq!(probor([0., 0.3]), 0.3);
    assert_eq!(probor([1., 0.3]), 1.);
    assert_eq!(probor(Vec::<f64>::new()), 0.);
    assert_eq!(probor([0.2, 0.4]), probor([0.4, 0.2]));
}

#[test]
fn test_apply() {
    let xs = [0.6, 0.3, 0.9];

    assert_eq!(Operator::Min.apply("and", &xs), Ok(0.3));
    assert_eq!(Operator::Max.apply("or", &xs), Ok(0.9));
    assert_eq!(Operator::Prod.apply("and", &[0.5, 0.5]), Ok(0.25));
    assert_eq!(Operator::BoundedSum.apply("or", &[0.7, 0.6]), Ok(1.));
    assert_eq!(Operator::BoundedProd.apply("and", &[0.5, 0.25]), Ok(0.));
    assert_eq!(Operator::DrasticProd.apply("and", &[1., 0.4]), Ok(0.4));
    assert_eq!(Operator::DrasticProd.apply("and", &[0.5, 0.4]), Ok(0.));
    assert_eq!(Operator::DrasticSum.apply("or", &[0., 0.4]), Ok(0.4));
    assert_eq!(Operator::DrasticSum.apply("or", &[0.5, 0.4]), Ok(1.));
    assert_eq!(Operator::Min.apply("and", &[0.4]), Ok(0.4));
    assert_eq!(Operator::Not.apply("not", &[0.25]), Ok(0.75));
    assert_eq!(Operator::Very.apply("very", &[0.5]), Ok(0.25));
    assert_eq!(Operator::Somewhat.apply("somewhat", &[0.25]), Ok(0.5));
}

#[test]
fn test_apply_arity() {
    assert_eq!(
        Operator::Not.apply("not", &[0.1, 0.2]),
        Err(FuzzyError::Arity {
            operator: "not".into(),
            expected: "exactly 1",
            found: 2,
        })
    );
    assert!(matches!(
        Operator::Max.apply::<f64>("or", &[]),
        Err(FuzzyError::Arity { found: 0, .. })
    ));
}

#[test]
fn test_default_bindings() {
    let ops = Operators::default();

    assert_eq!(ops.get("and"), Ok(Operator::Min));
    assert_eq!(ops.get("or"), Ok(Operator::Max));
    assert_eq!(ops.get("not"), Ok(Operator::Not));
    assert_eq!(ops.get("xor"), Err(FuzzyError::UnknownOperator("xor".into())));
}
