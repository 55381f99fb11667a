use serde::{Deserialize, Serialize};

/// `variable IS label`
#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct Predicate {
    pub variable: String,
    pub label: String,
}

impl Predicate {
    pub fn new(variable: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            label: label.into(),
        }
    }
}

/// A rule premise. Operator nodes name their operator by symbol; the symbol
/// is resolved against the system's operator bindings at evaluation time.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Expr {
    Is(Predicate),
    Unary(String, Box<Expr>),
    Nary(String, Vec<Expr>),
}

impl Expr {
    pub fn is(variable: impl Into<String>, label: impl Into<String>) -> Self {
        Expr::Is(Predicate::new(variable, label))
    }

    pub fn unary(op: impl Into<String>, operand: Expr) -> Self {
        Expr::Unary(op.into(), Box::new(operand))
    }

    pub fn nary(op: impl Into<String>, operands: impl IntoIterator<Item = Expr>) -> Self {
        Expr::Nary(op.into(), operands.into_iter().collect())
    }

    /// `and` over all of `operands`
    pub fn all(operands: impl IntoIterator<Item = Expr>) -> Self {
        Self::nary("and", operands)
    }

    /// `or` over all of `operands`
    pub fn any(operands: impl IntoIterator<Item = Expr>) -> Self {
        Self::nary("or", operands)
    }

    pub fn and(self, rhs: Expr) -> Self {
        Expr::Nary("and".into(), vec![self, rhs])
    }

    pub fn or(self, rhs: Expr) -> Self {
        Expr::Nary("or".into(), vec![self, rhs])
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(self) -> Self {
        Self::unary("not", self)
    }

    /// Every `variable IS label` leaf, left to right.
    pub fn propositions(&self) -> Vec<&Predicate> {
        let mut props = Vec::new();

        fn parse<'p>(expr: &'p Expr, out: &mut Vec<&'p Predicate>) {
            match expr {
                Expr::Is(predicate) => out.push(predicate),
                Expr::Unary(_, expr) => parse(expr, out),
                Expr::Nary(_, exprs) => {
                    for expr in exprs {
                        parse(expr, out);
                    }
                },
            }
        }

        parse(self, &mut props);

        props
    }

    /// Every operator node as `(symbol, operand count)`, outermost first.
    pub fn operators(&self) -> Vec<(&str, usize)> {
        let mut ops = Vec::new();

        fn parse<'p>(expr: &'p Expr, out: &mut Vec<(&'p str, usize)>) {
            match expr {
                Expr::Is(_) => {},
                Expr::Unary(op, expr) => {
                    out.push((op.as_str(), 1));
                    parse(expr, out);
                },
                Expr::Nary(op, exprs) => {
                    out.push((op.as_str(), exprs.len()));
                    for expr in exprs {
                        parse(expr, out);
                    }
                },
            }
        }

        parse(self, &mut ops);

        ops
    }
}

#[test]
fn test_walkers() {
    let premise = Expr::is("score", "high")
        .and(Expr::is("ratio", "good").not())
        .or(Expr::all([Expr::is("credit", "good"), Expr::is("score", "low")]));

    let props: Vec<_> = premise
        .propositions()
        .into_iter()
        .map(|p| (p.variable.as_str(), p.label.as_str()))
        .collect();

    assert_eq!(
        props,
        vec![("score", "high"), ("ratio", "good"), ("credit", "good"), ("score", "low")]
    );
    assert_eq!(premise.operators(), vec![("or", 2), ("and", 2), ("not", 1), ("and", 2)]);
}
