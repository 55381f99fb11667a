use std::collections::BTreeMap;

use crate::dsl::Predicate;
use crate::error::Result;

/// How strongly one rule's premise holds, paired with the rule's consequence.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Firing<'r> {
    pub consequence: &'r Predicate,
    pub strength: f64,
}

impl Firing<'_> {
    pub fn label(&self) -> &str {
        &self.consequence.label
    }
}

/// Defuzzified value of every output variable. Each output carries its own
/// result so one variable without any firing rule does not hide the others.
#[derive(Debug)]
pub struct Outputs(pub(crate) BTreeMap<String, Result<f64>>);

impl Outputs {
    pub fn get(&self, var: &str) -> Option<&Result<f64>> {
        self.0.get(var)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Result<f64>)> {
        self.0.iter().map(|(var, res)| (var.as_str(), res))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
