//! Mamdani fuzzy inference.
//!
//! An [`InferenceSystem`] holds linguistic variables, each a set of labelled
//! [`MembershipFunction`]s, a rule base of `IF premise THEN variable IS label`
//! rules, and the operator bindings rule premises are evaluated with. Given
//! crisp [`Inputs`] it computes rule firing strengths, clips each consequence
//! set at its rule's strength (min), combines them with max and reduces the
//! result to a crisp value by centroid.
//!
//! ```
//! use fuzzy_mamdani::{Expr, InferenceSystem, Inputs, MembershipFunction::*, Operators, Predicate, Rules, Terms, Variables};
//!
//! let mut vars = Variables::new();
//! vars.add("service", [("poor", Tri(0., 0., 5.)), ("good", Tri(0., 5., 10.))].into_iter().collect::<Terms>());
//! vars.add("tip", [("cheap", Tri(0., 5., 10.)), ("average", Tri(10., 15., 20.))].into_iter().collect::<Terms>());
//!
//! let mut rules = Rules::new();
//! rules.add(Expr::is("service", "poor"), Predicate::new("tip", "cheap"));
//! rules.add(Expr::is("service", "good"), Predicate::new("tip", "average"));
//!
//! let system = InferenceSystem::new(vars, rules, Operators::default())?;
//! let mut inputs = Inputs::new();
//! inputs.add("service", 2.);
//!
//! let tip = system.defuzzify(&inputs, "tip")?;
//! assert!(tip > 5. && tip < 15.);
//! # Ok::<(), fuzzy_mamdani::FuzzyError>(())
//! ```

mod dsl;
mod error;
mod inference;
mod inputs;
mod linspace;
mod math;
pub mod membership;
mod ops;
mod outputs;
mod rules;
mod system;
mod terms;
mod variable;

pub use dsl::{Expr, Predicate};
pub use error::{FuzzyError, Result};
pub use inference::Centroid;
pub use inputs::Inputs;
pub use membership::MembershipFunction;
pub use ops::{not, probor, Operator, Operators};
pub use outputs::{Firing, Outputs};
pub use rules::{Rule, Rules};
pub use system::{Definition, InferenceSystem};
pub use terms::Terms;
pub use variable::{LinguisticVariable, VariableKey, Variables};
