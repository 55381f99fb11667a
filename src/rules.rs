use serde::{Deserialize, Serialize};

use crate::dsl::{Expr, Predicate};

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Rules(pub(crate) Vec<Rule>);

impl Rules {
    pub fn new() -> Self {
        Rules(Vec::new())
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Rules(Vec::with_capacity(capacity))
    }

    pub fn add(&mut self, premise: Expr, consequence: Predicate) -> &mut Self {
        self.0.push(Rule { premise, consequence });
        self
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// IF `premise` THEN `consequence`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub premise: Expr,
    pub consequence: Predicate,
}
