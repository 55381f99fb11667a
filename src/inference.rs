use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::dsl::Expr;
use crate::error::{FuzzyError, Result};
use crate::inputs::Inputs;
use crate::linspace::Steps;
use crate::outputs::{Firing, Outputs};
use crate::system::InferenceSystem;
use crate::variable::LinguisticVariable;

/// Centre of gravity defuzzification by a left Riemann sum over the output
/// variable's domain.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawCentroid")]
pub struct Centroid {
    step: f64,
}

#[derive(Deserialize)]
struct RawCentroid {
    step: f64,
}

impl TryFrom<RawCentroid> for Centroid {
    type Error = FuzzyError;

    fn try_from(raw: RawCentroid) -> Result<Self> {
        Centroid::with_step(raw.step)
    }
}

impl Centroid {
    pub fn with_step(step: f64) -> Result<Self> {
        if step.is_finite() && step > 0. {
            Ok(Centroid { step })
        } else {
            Err(FuzzyError::InvalidStep(step))
        }
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Centroid of `membership` sampled at `min, min + step, ...` strictly below `max`.
    ///
    /// Samples are summed in ascending order. Returns `None` when the sampled
    /// membership is zero everywhere.
    pub fn compute(&self, min: f64, max: f64, mut membership: impl FnMut(f64) -> f64) -> Option<f64> {
        let mut num = 0.;
        let mut den = 0.;

        for x in Steps::new(min, max, self.step) {
            let mu = membership(x);

            num += mu * x;
            den += mu;
        }

        if den == 0. {
            None
        } else {
            Some(num / den)
        }
    }
}

impl Default for Centroid {
    fn default() -> Self {
        Centroid { step: 0.1 }
    }
}

impl InferenceSystem {
    /// Degree to which `value` belongs to the set `label` of `variable`.
    pub fn fuzzify(&self, variable: &str, label: &str, value: f64) -> Result<f64> {
        Ok(self.variables.get(variable)?.membership(label)?.eval(value))
    }

    /// Firing strength of every rule, in rule base order.
    pub fn evaluate_rules(&self, inputs: &Inputs) -> Result<Vec<Firing<'_>>> {
        self.check_inputs(inputs)?;

        let mut firings = Vec::with_capacity(self.rules.len());

        for (i, rule) in self.rules.iter().enumerate() {
            let strength = self.eval_premise(&rule.premise, inputs)?;

            trace!(rule = i, consequence = %rule.consequence.label, strength, "rule fired");

            firings.push(Firing {
                consequence: &rule.consequence,
                strength,
            });
        }

        Ok(firings)
    }

    fn eval_premise(&self, expr: &Expr, inputs: &Inputs) -> Result<f64> {
        match expr {
            Expr::Is(predicate) => {
                let value = inputs
                    .get(&predicate.variable)
                    .ok_or_else(|| FuzzyError::MissingInput(predicate.variable.clone()))?;

                self.fuzzify(&predicate.variable, &predicate.label, value)
            },
            Expr::Unary(symbol, operand) => {
                let op = self.operators.get(symbol)?;
                let degree = self.eval_premise(operand, inputs)?;

                op.apply(symbol, &[degree])
            },
            Expr::Nary(symbol, operands) => {
                let op = self.operators.get(symbol)?;
                let degrees = operands
                    .iter()
                    .map(|operand| self.eval_premise(operand, inputs))
                    .collect::<Result<Vec<_>>>()?;

                op.apply(symbol, &degrees)
            },
        }
    }

    /// Aggregated membership of `output` at `x`: each rule concluding about
    /// `output` clips its consequence set at its firing strength (min), and
    /// the clipped sets are combined with max. Zero if no rule concludes
    /// about `output`.
    pub fn infer(&self, inputs: &Inputs, output: &str, x: f64) -> Result<f64> {
        let firings = self.evaluate_rules(inputs)?;

        self.aggregate(&firings, output, x)
    }

    /// The pointwise step of [`InferenceSystem::infer`] over firings that were
    /// already computed.
    pub fn aggregate(&self, firings: &[Firing<'_>], output: &str, x: f64) -> Result<f64> {
        let var = self.variables.get(output)?;

        aggregate_at(var, firings, x)
    }

    /// Crisp value of `output` by centroid defuzzification with the default step.
    pub fn defuzzify(&self, inputs: &Inputs, output: &str) -> Result<f64> {
        self.defuzzify_with(inputs, output, &Centroid::default())
    }

    pub fn defuzzify_with(&self, inputs: &Inputs, output: &str, centroid: &Centroid) -> Result<f64> {
        let var = &self.variables[self.variables.key(output)?];
        let firings = self.evaluate_rules(inputs)?;

        defuzzify_var(var, &firings, centroid)
    }

    /// Defuzzifies every variable some rule concludes about.
    pub fn defuzzify_all(&self, inputs: &Inputs) -> Result<Outputs> {
        let firings = self.evaluate_rules(inputs)?;
        let mut outputs = BTreeMap::new();
        let centroid = Centroid::default();

        for name in self.output_variables() {
            let var = self.variables.get(name)?;

            outputs.insert(name.to_owned(), defuzzify_var(var, &firings, &centroid));
        }

        Ok(Outputs(outputs))
    }
}

fn aggregate_at(var: &LinguisticVariable, firings: &[Firing<'_>], x: f64) -> Result<f64> {
    let mut degree = 0.;

    for firing in firings.iter().filter(|f| f.consequence.variable == var.name()) {
        let clipped = f64::min(firing.strength, var.membership(firing.label())?.eval(x));

        degree = f64::max(degree, clipped);
    }

    Ok(degree)
}

fn defuzzify_var(var: &LinguisticVariable, firings: &[Firing<'_>], centroid: &Centroid) -> Result<f64> {
    let empty = || FuzzyError::EmptyFiring(var.name().to_owned());
    let (min, max) = var.domain().ok_or_else(empty)?;

    trace!(variable = var.name(), min, max, step = centroid.step(), "defuzzifying");

    // Labels were validated with the system, so the lookups below cannot fail.
    // Any error is still carried out of the closure rather than unwrapped.
    let mut failure = None;
    let result = centroid.compute(min, max, |x| match aggregate_at(var, firings, x) {
        Ok(mu) => mu,
        Err(err) => {
            if failure.is_none() {
                failure = Some(err);
            }
            0.
        },
    });

    if let Some(err) = failure {
        return Err(err);
    }

    match result {
        Some(value) => {
            debug!(variable = var.name(), value, "defuzzified");
            Ok(value)
        },
        None => {
            debug!(variable = var.name(), "no rule fires over the domain");
            Err(empty())
        },
    }
}

#[test]
fn test_centroid_step() {
    assert_eq!(Centroid::default().step(), 0.1);
    assert_eq!(Centroid::with_step(0.5).map(|c| c.step()), Ok(0.5));
    assert_eq!(Centroid::with_step(0.), Err(FuzzyError::InvalidStep(0.)));
    assert!(Centroid::with_step(f64::NAN).is_err());
    assert!(Centroid::with_step(-1.).is_err());
}

#[test]
fn test_centroid_compute() {
    let centroid = Centroid::with_step(1.).unwrap();

    // Uniform membership over 0, 1, 2, 3
    assert_eq!(centroid.compute(0., 4., |_| 1.), Some(1.5));
    // Right endpoint is never sampled
    assert_eq!(centroid.compute(0., 4., |x| if x >= 4. { 1. } else { 0. }), None);
    assert_eq!(centroid.compute(0., 4., |x| if x == 3. { 0.5 } else { 0. }), Some(3.));
}

#[test]
fn test_bank_loan() {
    use crate::dsl::Predicate;
    use crate::membership::MembershipFunction::Points;
    use crate::ops::Operators;
    use crate::rules::Rules;
    use crate::terms::Terms;
    use crate::variable::Variables;

    let mut score_terms = Terms::new();
    let mut ratio_terms = Terms::new();
    let mut credit_terms = Terms::new();
    let mut decision_terms = Terms::new();

    score_terms.insert("high", Points(vec![(175., 0.), (180., 0.2), (185., 0.7), (190., 1.)]));
    score_terms.insert(
        "low",
        Points(vec![(155., 1.), (160., 0.8), (165., 0.5), (170., 0.2), (175., 0.)]),
    );
    ratio_terms.insert("good", Points(vec![(0.3, 1.), (0.4, 0.7), (0.41, 0.3), (0.42, 0.)]));
    ratio_terms.insert("bad", Points(vec![(0.44, 0.), (0.45, 0.3), (0.5, 0.7), (0.7, 1.)]));
    credit_terms.insert("good", Points(vec![(2., 1.), (3., 0.7), (4., 0.3), (5., 0.)]));
    credit_terms.insert("bad", Points(vec![(5., 0.), (6., 0.3), (7., 0.7), (8., 1.)]));
    decision_terms.insert("approve", Points(vec![(5., 0.), (6., 0.3), (7., 0.7), (8., 1.)]));
    decision_terms.insert("reject", Points(vec![(2., 1.), (3., 0.7), (4., 0.3), (5., 0.)]));

    let mut vars = Variables::new();
    vars.add("score", score_terms);
    vars.add("ratio", ratio_terms);
    vars.add("credit", credit_terms);
    vars.add("decision", decision_terms);

    let mut rules = Rules::new();

    rules.add(
        Expr::all([
            Expr::is("score", "high"),
            Expr::is("ratio", "good"),
            Expr::is("credit", "good"),
        ]),
        Predicate::new("decision", "approve"),
    );
    rules.add(
        Expr::is("score", "low")
            .and(Expr::is("ratio", "bad"))
            .or(Expr::is("credit", "bad")),
        Predicate::new("decision", "reject"),
    );

    let system = InferenceSystem::new(vars, rules, Operators::default()).unwrap();
    let inputs: Inputs = [("score", 190.), ("ratio", 0.39), ("credit", 1.5)].into_iter().collect();

    let firings = system.evaluate_rules(&inputs).unwrap();
    let strengths: Vec<_> = firings.iter().map(|f| (f.label(), f.strength)).collect();

    // ratio 0.39 sits 90% of the way from (0.3, 1.0) to (0.4, 0.7)
    assert_eq!(strengths.len(), 2);
    assert_eq!(strengths[0].0, "approve");
    assert!((strengths[0].1 - 0.73).abs() < 1e-9);
    assert_eq!(strengths[1], ("reject", 0.));

    // Only `approve` fires, clipped at 0.73; its domain is 5..8
    let decision = system.defuzzify(&inputs, "decision").unwrap();

    assert!(decision > 6.5 && decision < 8.);
    assert_eq!(system.infer(&inputs, "decision", 4.), Ok(0.));
    assert!((system.infer(&inputs, "decision", 7.5).unwrap() - 0.73).abs() < 1e-9);
}
