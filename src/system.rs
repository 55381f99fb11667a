use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dsl::{Expr, Predicate};
use crate::error::{FuzzyError, Result};
use crate::inputs::Inputs;
use crate::ops::Operators;
use crate::rules::Rules;
use crate::terms::Terms;
use crate::variable::Variables;

/// A validated fuzzy inference system: variables, rule base and operator bindings.
///
/// Built once and only read afterwards, so a single system can be shared by
/// reference across threads evaluating different inputs.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(try_from = "Definition", into = "Definition")]
pub struct InferenceSystem {
    pub(crate) variables: Variables,
    pub(crate) rules: Rules,
    pub(crate) operators: Operators,
}

/// The plain-data form of an [`InferenceSystem`], as it appears in any serde format.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Definition {
    pub variables: BTreeMap<String, Terms>,
    pub rules: Rules,
    #[serde(default)]
    pub operators: Operators,
}

impl InferenceSystem {
    /// Fails if any rule refers to a variable, label or operator that does not
    /// exist, or uses an operator with the wrong number of operands.
    pub fn new(variables: Variables, rules: Rules, operators: Operators) -> Result<Self> {
        let this = Self {
            variables,
            rules,
            operators,
        };

        this.validate()?;

        debug!(
            variables = this.variables.len(),
            rules = this.rules.len(),
            "built inference system"
        );

        Ok(this)
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    pub fn operators(&self) -> &Operators {
        &self.operators
    }

    /// Checks every membership function's parameters, then cross-checks every
    /// name referenced by the rule base against the definition.
    pub fn validate(&self) -> Result<()> {
        for (_, var) in self.variables.iter() {
            for (_, mf) in var.terms().iter() {
                mf.check()?;
            }
        }

        for rule in self.rules.iter() {
            for predicate in rule.premise.propositions() {
                self.check_predicate(predicate)?;
            }

            self.check_predicate(&rule.consequence)?;

            for (symbol, n_operands) in rule.premise.operators() {
                let op = self.operators.get(symbol)?;

                if (op.is_unary() && n_operands != 1) || n_operands == 0 {
                    return Err(FuzzyError::Arity {
                        operator: symbol.to_owned(),
                        expected: if op.is_unary() { "exactly 1" } else { "at least 1" },
                        found: n_operands,
                    });
                }
            }
        }

        Ok(())
    }

    fn check_predicate(&self, predicate: &Predicate) -> Result<()> {
        self.variables
            .get(&predicate.variable)?
            .membership(&predicate.label)
            .map(|_| ())
    }

    /// Ensures `inputs` has a finite value for every variable any rule premise reads.
    pub fn check_inputs(&self, inputs: &Inputs) -> Result<()> {
        for predicate in self.rules.iter().flat_map(|rule| rule.premise.propositions()) {
            match inputs.get(&predicate.variable) {
                None => return Err(FuzzyError::MissingInput(predicate.variable.clone())),
                Some(value) if !value.is_finite() => {
                    return Err(FuzzyError::InvalidInput {
                        variable: predicate.variable.clone(),
                        value,
                    })
                },
                Some(_) => {},
            }
        }

        Ok(())
    }

    /// Names of the variables that appear as the consequence of at least one
    /// rule, in order of first appearance.
    pub fn output_variables(&self) -> Vec<&str> {
        let mut outputs: Vec<&str> = Vec::new();

        for rule in self.rules.iter() {
            let var = rule.consequence.variable.as_str();

            if !outputs.contains(&var) {
                outputs.push(var);
            }
        }

        outputs
    }
}

impl TryFrom<Definition> for InferenceSystem {
    type Error = FuzzyError;

    fn try_from(def: Definition) -> Result<Self> {
        let mut variables = Variables::new();

        for (name, terms) in def.variables {
            variables.add(name, terms);
        }

        InferenceSystem::new(variables, def.rules, def.operators)
    }
}

impl From<InferenceSystem> for Definition {
    fn from(system: InferenceSystem) -> Self {
        let variables = system
            .variables
            .iter()
            .map(|(_, var)| (var.name().to_owned(), var.terms().clone()))
            .collect();

        Definition {
            variables,
            rules: system.rules,
            operators: system.operators,
        }
    }
}
