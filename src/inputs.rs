use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Crisp values for the input variables, by name.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Inputs(pub(crate) HashMap<String, f64>);

impl Inputs {
    pub fn new() -> Self {
        Inputs(HashMap::new())
    }

    pub fn add(&mut self, var: impl Into<String>, val: f64) -> &mut Self {
        self.0.insert(var.into(), val);
        self
    }

    pub fn get(&self, var: &str) -> Option<f64> {
        self.0.get(var).copied()
    }
}

impl<V: Into<String>> FromIterator<(V, f64)> for Inputs {
    fn from_iter<I: IntoIterator<Item = (V, f64)>>(iter: I) -> Self {
        Inputs(iter.into_iter().map(|(var, val)| (var.into(), val)).collect())
    }
}
