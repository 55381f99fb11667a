use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::membership::MembershipFunction;

/// The labelled fuzzy sets of one linguistic variable.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Terms(pub(crate) BTreeMap<String, MembershipFunction>);

impl Terms {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Inserting an existing label replaces its membership function.
    pub fn insert(&mut self, label: impl Into<String>, membership: MembershipFunction) -> &mut Self {
        self.0.insert(label.into(), membership);
        self
    }

    pub fn get(&self, label: &str) -> Option<&MembershipFunction> {
        self.0.get(label)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &MembershipFunction)> {
        self.0.iter().map(|(label, mf)| (label.as_str(), mf))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<L: Into<String>> FromIterator<(L, MembershipFunction)> for Terms {
    fn from_iter<I: IntoIterator<Item = (L, MembershipFunction)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(label, mf)| (label.into(), mf)).collect())
    }
}
