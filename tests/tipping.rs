use fuzzy_mamdani::MembershipFunction::*;
use fuzzy_mamdani::{
    Centroid, Expr, FuzzyError, InferenceSystem, Inputs, MembershipFunction, Operator, Operators, Predicate, Rules,
    Terms, Variables,
};

fn tipping(operators: Operators) -> InferenceSystem {
    let mut vars = Variables::new();

    vars.add(
        "service",
        [
            ("poor", Tri(0., 0., 5.)),
            ("good", Tri(0., 5., 10.)),
            ("excellent", Tri(5., 10., 10.)),
        ]
        .into_iter()
        .collect::<Terms>(),
    );
    vars.add(
        "food",
        [("rancid", Trap(-2., 0., 1., 3.)), ("delicious", Lins(7., 9.))]
            .into_iter()
            .collect::<Terms>(),
    );
    vars.add(
        "tip",
        [
            ("cheap", Tri(0., 5., 10.)),
            ("average", Tri(10., 15., 20.)),
            ("generous", Tri(20., 25., 30.)),
        ]
        .into_iter()
        .collect::<Terms>(),
    );

    let mut rules = Rules::new();

    rules
        .add(
            Expr::is("service", "poor").or(Expr::is("food", "rancid")),
            Predicate::new("tip", "cheap"),
        )
        .add(Expr::is("service", "good"), Predicate::new("tip", "average"))
        .add(
            Expr::is("service", "excellent").or(Expr::is("food", "delicious")),
            Predicate::new("tip", "generous"),
        );

    InferenceSystem::new(vars, rules, operators).unwrap()
}

fn inputs(service: f64, food: f64) -> Inputs {
    [("service", service), ("food", food)].into_iter().collect()
}

#[test]
fn fuzzify_scenario_sets() {
    let system = tipping(Operators::default());

    assert_eq!(system.fuzzify("service", "poor", 2.0), Ok(0.6));
    assert_eq!(system.fuzzify("food", "rancid", 5.0), Ok(0.0));
    assert_eq!(
        system.fuzzify("service", "awful", 2.0),
        Err(FuzzyError::UnknownLabel {
            variable: "service".into(),
            label: "awful".into(),
        })
    );
    assert_eq!(
        system.fuzzify("ambience", "nice", 2.0),
        Err(FuzzyError::UnknownVariable("ambience".into()))
    );
}

#[test]
fn rule_strengths_in_rule_order() {
    let system = tipping(Operators::default());
    let firings = system.evaluate_rules(&inputs(2.0, 5.0)).unwrap();
    let strengths: Vec<_> = firings.iter().map(|f| (f.label(), f.strength)).collect();

    assert_eq!(strengths, vec![("cheap", 0.6), ("average", 0.4), ("generous", 0.0)]);
}

#[test]
fn missing_input_is_reported_before_evaluation() {
    let system = tipping(Operators::default());
    let only_service: Inputs = [("service", 2.0)].into_iter().collect();

    assert_eq!(
        system.evaluate_rules(&only_service).unwrap_err(),
        FuzzyError::MissingInput("food".into())
    );
    assert_eq!(
        system.defuzzify(&only_service, "tip").unwrap_err(),
        FuzzyError::MissingInput("food".into())
    );
}

#[test]
fn infer_clips_and_aggregates() {
    let system = tipping(Operators::default());
    let inputs = inputs(2.0, 5.0);

    // cheap clipped at 0.6 peaks at 5; average is zero there
    assert_eq!(system.infer(&inputs, "tip", 5.0), Ok(0.6));
    assert_eq!(system.infer(&inputs, "tip", 15.0), Ok(0.4));
    assert_eq!(system.infer(&inputs, "tip", 2.5), Ok(0.5));
    assert_eq!(system.infer(&inputs, "tip", 25.0), Ok(0.0));
    // nothing concludes about service
    assert_eq!(system.infer(&inputs, "service", 2.0), Ok(0.0));
    assert_eq!(
        system.infer(&inputs, "mood", 2.0),
        Err(FuzzyError::UnknownVariable("mood".into()))
    );

    let firings = system.evaluate_rules(&inputs).unwrap();

    for x in [0., 3.3, 7.1, 12., 19.9] {
        assert_eq!(system.aggregate(&firings, "tip", x), system.infer(&inputs, "tip", x));
    }
}

#[test]
fn centroid_of_clipped_triangles() {
    let system = tipping(Operators::default());
    let inputs = inputs(2.0, 5.0);
    let tip = system.defuzzify(&inputs, "tip").unwrap();

    // Clipped cheap has area 4.2 around 5, clipped average 3.2 around 15;
    // their kinks fall on the sampling grid so the sum matches exactly.
    let expected = (4.2 * 5. + 3.2 * 15.) / 7.4;

    assert!((tip - expected).abs() < 1e-9, "{tip} != {expected}");
    assert!((0.0..=30.0).contains(&tip));
    assert_eq!(system.defuzzify(&inputs, "tip"), Ok(tip));
}

#[test]
fn coarser_step_stays_close() {
    let system = tipping(Operators::default());
    let inputs = inputs(2.0, 5.0);
    let fine = system.defuzzify(&inputs, "tip").unwrap();
    let coarse = system
        .defuzzify_with(&inputs, "tip", &Centroid::with_step(1.).unwrap())
        .unwrap();

    assert!((fine - coarse).abs() < 0.1);
}

#[test]
fn nothing_fires_is_empty_firing() {
    let system = tipping(Operators::default());
    let far_away = inputs(100., -100.);

    assert_eq!(
        system.defuzzify(&far_away, "tip"),
        Err(FuzzyError::EmptyFiring("tip".into()))
    );

    let all = system.defuzzify_all(&far_away).unwrap();

    assert_eq!(all.len(), 1);
    assert_eq!(all.get("tip"), Some(&Err(FuzzyError::EmptyFiring("tip".into()))));
}

#[test]
fn defuzzify_all_matches_single_output() {
    let system = tipping(Operators::default());
    let inputs = inputs(8.0, 8.0);
    let all = system.defuzzify_all(&inputs).unwrap();
    let tip = system.defuzzify(&inputs, "tip");

    assert_eq!(all.get("tip"), Some(&tip));
    assert!(tip.unwrap() > 15.);
}

#[test]
fn custom_or_binding() {
    let mut ops = Operators::default();

    ops.bind("or", Operator::ProbOr);

    let system = tipping(ops);
    let firings = system.evaluate_rules(&inputs(2.0, 0.5)).unwrap();

    // poor = 0.6, rancid = 1.0
    assert!((firings[0].strength - 1.0).abs() < 1e-12);

    let firings = system.evaluate_rules(&inputs(7.5, 8.0)).unwrap();

    // excellent = 0.5, delicious = 0.5
    assert_eq!(firings[2].strength, 0.75);
}

#[test]
fn hedges_and_negation() {
    let mut ops = Operators::default();

    ops.bind("very", Operator::Very);

    let mut rules = Rules::new();

    rules
        .add(
            Expr::unary("very", Expr::is("service", "good")),
            Predicate::new("tip", "average"),
        )
        .add(Expr::is("service", "good").not(), Predicate::new("tip", "cheap"));

    let system = InferenceSystem::new(tipping(Operators::default()).variables().clone(), rules, ops).unwrap();
    let firings = system.evaluate_rules(&[("service", 2.5)].into_iter().collect()).unwrap();

    assert_eq!(firings[0].strength, 0.25);
    assert_eq!(firings[1].strength, 0.5);
}

#[test]
fn definition_from_json() {
    let json = r#"{
        "variables": {
            "service": {
                "poor": { "shape": "tri", "params": [0, 0, 5] },
                "good": { "shape": "tri", "params": [0, 5, 10] }
            },
            "tip": {
                "cheap": { "shape": "tri", "params": [0, 5, 10] },
                "average": { "shape": "tri", "params": [10, 15, 20] }
            }
        },
        "rules": [
            {
                "premise": { "nary": ["or", [{ "is": { "variable": "service", "label": "poor" } }]] },
                "consequence": { "variable": "tip", "label": "cheap" }
            },
            {
                "premise": { "is": { "variable": "service", "label": "good" } },
                "consequence": { "variable": "tip", "label": "average" }
            }
        ]
    }"#;

    let system: InferenceSystem = serde_json::from_str(json).unwrap();
    let inputs: Inputs = [("service", 2.0)].into_iter().collect();

    assert_eq!(system.rules().len(), 2);
    assert_eq!(system.fuzzify("service", "poor", 2.0), Ok(0.6));

    let expected = (4.2 * 5. + 3.2 * 15.) / 7.4;

    assert!((system.defuzzify(&inputs, "tip").unwrap() - expected).abs() < 1e-9);

    let bad = json.replace(r#""label": "cheap""#, r#""label": "lavish""#);
    let err = serde_json::from_str::<InferenceSystem>(&bad).unwrap_err();

    assert!(err.to_string().contains("lavish"));
}

#[test]
fn system_is_shareable_across_threads() {
    let system = tipping(Operators::default());
    let expected = system.defuzzify(&inputs(2.0, 5.0), "tip").unwrap();

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| system.defuzzify(&inputs(2.0, 5.0), "tip").unwrap()))
            .collect();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn non_finite_input_is_rejected() {
    let system = tipping(Operators::default());

    for service in [f64::NAN, f64::INFINITY] {
        assert!(matches!(
            system.defuzzify(&inputs(service, 5.0), "tip"),
            Err(FuzzyError::InvalidInput { ref variable, .. }) if variable == "service"
        ));
    }
}

#[test]
fn points_from_json_are_sorted() {
    let pairs: MembershipFunction =
        serde_json::from_str(r#"{ "shape": "points", "params": [[2, 1], [0, 0]] }"#).unwrap();
    let flat: MembershipFunction = serde_json::from_str(r#"{ "shape": "points", "params": [2, 1, 0, 0] }"#).unwrap();

    assert_eq!(pairs.eval(1.0), 0.5);
    assert_eq!(pairs, flat);
    assert_eq!(pairs, Points(vec![(0., 0.), (2., 1.)]));

    let written = serde_json::to_string(&pairs).unwrap();

    assert_eq!(written, r#"{"shape":"points","params":[[0.0,0.0],[2.0,1.0]]}"#);
    assert!(serde_json::from_str::<MembershipFunction>(r#"{ "shape": "tri", "params": [[0, 1]] }"#).is_err());
}

#[test]
fn step_below_domain_precision_terminates() {
    let mut vars = Variables::new();
    let mut rules = Rules::new();

    vars.add("service", [("poor", Tri(0., 0., 5.))].into_iter().collect::<Terms>());
    vars.add("load", [("mid", Tri(1e16, 1.5e16, 2e16))].into_iter().collect::<Terms>());
    rules.add(Expr::is("service", "poor"), Predicate::new("load", "mid"));

    let system = InferenceSystem::new(vars, rules, Operators::default()).unwrap();
    let inputs: Inputs = [("service", 2.0)].into_iter().collect();

    // 0.1 vanishes against 1e16, so only the left end is ever sampled
    assert_eq!(system.defuzzify(&inputs, "load"), Err(FuzzyError::EmptyFiring("load".into())));
}
