use std::collections::HashMap;
use std::ops::Index;

use slotmap::{new_key_type, SlotMap};

use crate::error::{FuzzyError, Result};
use crate::membership::MembershipFunction;
use crate::terms::Terms;

new_key_type! {
    /// A variable key
    pub struct VariableKey;
}

#[derive(Clone, Debug, PartialEq)]
pub struct LinguisticVariable {
    name: String,
    terms: Terms,
}

impl LinguisticVariable {
    pub fn new(name: impl Into<String>, terms: Terms) -> Self {
        Self {
            name: name.into(),
            terms,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn terms(&self) -> &Terms {
        &self.terms
    }

    pub fn membership(&self, label: &str) -> Result<&MembershipFunction> {
        self.terms.get(label).ok_or_else(|| FuzzyError::UnknownLabel {
            variable: self.name.clone(),
            label: label.to_owned(),
        })
    }

    /// Smallest and largest parameter over all of the variable's sets.
    ///
    /// This is structural: open-ended shapes such as Gaussians contribute
    /// their parameters and nothing for their tails. `None` when there are no
    /// parameters at all.
    pub fn domain(&self) -> Option<(f64, f64)> {
        self.terms
            .0
            .values()
            .flat_map(MembershipFunction::params)
            .fold(None, |bounds, p| match bounds {
                None => Some((p, p)),
                Some((lo, hi)) => Some((f64::min(lo, p), f64::max(hi, p))),
            })
    }
}

/// The variables of an inference system, addressable by key or by name.
#[derive(Clone, Debug, Default)]
pub struct Variables {
    slots: SlotMap<VariableKey, LinguisticVariable>,
    names: HashMap<String, VariableKey>,
}

impl Variables {
    pub fn new() -> Self {
        Self {
            slots: SlotMap::with_key(),
            names: HashMap::new(),
        }
    }

    /// Adds a variable, replacing the terms of any variable with the same name.
    pub fn add(&mut self, name: impl Into<String>, terms: Terms) -> VariableKey {
        let name = name.into();

        if let Some(&key) = self.names.get(&name) {
            self.slots[key].terms = terms;
            return key;
        }

        let key = self.slots.insert(LinguisticVariable::new(name.clone(), terms));

        self.names.insert(name, key);
        key
    }

    pub fn key(&self, name: &str) -> Result<VariableKey> {
        self.names
            .get(name)
            .copied()
            .ok_or_else(|| FuzzyError::UnknownVariable(name.to_owned()))
    }

    pub fn get(&self, name: &str) -> Result<&LinguisticVariable> {
        self.key(name).map(|key| &self.slots[key])
    }

    pub fn iter(&self) -> impl Iterator<Item = (VariableKey, &LinguisticVariable)> {
        self.slots.iter()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl Index<VariableKey> for Variables {
    type Output = LinguisticVariable;

    fn index(&self, key: VariableKey) -> &LinguisticVariable {
        &self.slots[key]
    }
}

#[test]
fn test_domain() {
    let tip: Terms = [
        ("cheap", MembershipFunction::Tri(0., 5., 10.)),
        ("generous", MembershipFunction::Tri(20., 25., 30.)),
    ]
    .into_iter()
    .collect();
    let tip = LinguisticVariable::new("tip", tip);

    assert_eq!(tip.domain(), Some((0., 30.)));
    assert_eq!(LinguisticVariable::new("empty", Terms::new()).domain(), None);

    // Gaussian sigma counts as a parameter too
    let temp: Terms = [("warm", MembershipFunction::Gauss(2., 20.))].into_iter().collect();

    assert_eq!(LinguisticVariable::new("temp", temp).domain(), Some((2., 20.)));
}

#[test]
fn test_variables_lookup() {
    let mut vars = Variables::new();
    let service = vars.add("service", [("poor", MembershipFunction::Tri(0., 0., 5.))].into_iter().collect());

    assert_eq!(vars.key("service"), Ok(service));
    assert_eq!(vars[service].name(), "service");
    assert_eq!(vars.get("food"), Err(FuzzyError::UnknownVariable("food".into())));
    assert_eq!(
        vars[service].membership("great"),
        Err(FuzzyError::UnknownLabel {
            variable: "service".into(),
            label: "great".into(),
        })
    );

    let again = vars.add("service", Terms::new());

    assert_eq!(again, service);
    assert_eq!(vars.len(), 1);
    assert!(vars[service].terms().is_empty());
}
