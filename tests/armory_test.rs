use fuzzy_armory::armory::{Armory, Desirability, Distance, PISTOL, ROCKET_LAUNCHER, SNIPER};
use fuzzy_armory::config::CatalogConfig;
use fuzzy_armory::{FuzzyError, Inputs, Rules, RuleSet, Term};

const ARMORY_TOML: &str = include_str!("../catalogs/armory.toml");

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn names<'a>(ranked: &[fuzzy_armory::Ranked<'a>]) -> Vec<&'a str> {
    ranked.iter().map(|r| r.name).collect()
}

#[test]
fn distance_terms_at_zero() {
    let armory = Armory::new().unwrap();
    let distance = armory.selector().variables().by_name("distance").unwrap();

    assert_eq!(distance.degree_of(Distance::Perto.name(), 0.).unwrap(), 1.);
    assert_eq!(distance.degree_of(Distance::Medio.name(), 0.).unwrap(), 0.);
    assert_eq!(distance.degree_of(Distance::Longe.name(), 0.).unwrap(), 0.);
}

#[test]
fn close_target_full_ammo_picks_pistol() {
    init_tracing();

    let armory = Armory::new().unwrap();
    let ranked = armory.rank(10., 90.).unwrap();

    assert_eq!(names(&ranked), vec![PISTOL, SNIPER, ROCKET_LAUNCHER]);

    // Only "perto AND alta => imprescindivel" fires for the pistol, at
    // min(25/35, 0.75)
    let h: f64 = 25. / 35.;
    let imprescindivel = |x: f64| {
        if x < 65. {
            0.
        } else if x <= 85. {
            (x - 65.) / 20.
        } else {
            (100. - x) / 15.
        }
    };
    let clipped: Vec<(f64, f64)> = (0..=100)
        .map(|i| i as f64)
        .map(|x| (x, h.min(imprescindivel(x))))
        .collect();
    let expected = clipped.iter().map(|(x, m)| x * m).sum::<f64>() / clipped.iter().map(|(_, m)| *m).sum::<f64>();

    assert_eq!(ranked[0].score, expected);
    assert!(65. < ranked[0].score && ranked[0].score < 100.);

    // Sniper and rocket launcher fire the same single rule and tie exactly
    assert_eq!(ranked[1].score, ranked[2].score);
    assert!(ranked[1].score < 40.);
}

#[test]
fn long_range_full_ammo_picks_sniper() {
    let armory = Armory::new().unwrap();
    let best = armory.best(90., 90.).unwrap().unwrap();

    assert_eq!(best.name, SNIPER);
}

#[test]
fn medium_range_full_ammo_picks_rocket_launcher() {
    let armory = Armory::new().unwrap();
    let ranked = armory.rank(50., 90.).unwrap();

    assert_eq!(ranked[0].name, ROCKET_LAUNCHER);
    assert!(ranked[0].score > ranked[1].score);
}

#[test]
fn no_evidence_scores_zero_in_catalog_order() {
    let armory = Armory::new().unwrap();
    let ranked = armory.rank(50., 10.).unwrap();

    assert_eq!(names(&ranked), vec![PISTOL, SNIPER, ROCKET_LAUNCHER]);
    assert!(ranked.iter().all(|r| r.score == 0.));

    let evaluated = armory.selector().evaluate(&armory.inputs(50., 10.)).unwrap();

    assert!(evaluated.iter().all(|(_, outputs)| outputs.is_empty()));
}

#[test]
fn rank_is_sorted_descending() {
    let armory = Armory::new().unwrap();

    for d in (0..=100).step_by(5) {
        for a in (0..=100).step_by(5) {
            let ranked = armory.rank(d as f64, a as f64).unwrap();

            assert_eq!(ranked.len(), 3);
            assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score), "d={d} a={a}");
            assert!(ranked.iter().all(|r| (0. ..=100.).contains(&r.score)));
        }
    }
}

#[test]
fn out_of_range_inputs_still_evaluate() {
    let armory = Armory::new().unwrap();
    let inputs = armory.inputs(150., -20.);

    assert!(armory.selector().rank(&inputs).is_ok());
    assert!(matches!(
        inputs.validate(armory.selector().variables()),
        Err(FuzzyError::OutOfRange { .. })
    ));
}

#[test]
fn unbound_input_is_reported() {
    let armory = Armory::new().unwrap();
    let mut inputs = Inputs::new();

    inputs.add(armory.distance, 10.);

    assert!(matches!(
        armory.selector().rank(&inputs),
        Err(FuzzyError::UnboundVariable { variable }) if variable == "ammunition"
    ));
}

#[test]
fn toml_catalog_matches_builtin_roster() {
    let armory = Armory::new().unwrap();
    let loaded = CatalogConfig::from_toml_str(ARMORY_TOML).unwrap().build().unwrap();

    for d in (0..=100).step_by(10) {
        for a in (0..=100).step_by(10) {
            let (d, a) = (d as f64, a as f64);
            let mut inputs = Inputs::new();

            inputs.add_named(loaded.variables(), "distance", d).unwrap();
            inputs.add_named(loaded.variables(), "ammunition", a).unwrap();

            assert_eq!(loaded.rank(&inputs).unwrap(), armory.rank(d, a).unwrap(), "d={d} a={a}");
        }
    }
}

#[test]
fn changing_one_rule_set_leaves_others_alone() {
    let original = CatalogConfig::from_toml_str(ARMORY_TOML).unwrap();
    let mut edited = original.clone();

    let sniper = edited.alternatives.iter_mut().find(|alt| alt.name == SNIPER).unwrap();
    sniper.rules.truncate(1);

    let original = original.build().unwrap();
    let edited = edited.build().unwrap();

    for (d, a) in [(10., 90.), (50., 50.), (90., 30.), (70., 70.)] {
        let mut inputs = Inputs::new();

        inputs.add_named(original.variables(), "distance", d).unwrap();
        inputs.add_named(original.variables(), "ammunition", a).unwrap();

        let before = original.evaluate(&inputs).unwrap();
        let after = edited.evaluate(&inputs).unwrap();

        for ((alt, outputs), (alt2, outputs2)) in before.iter().zip(&after) {
            assert_eq!(alt.name(), alt2.name());
            if alt.name() != SNIPER {
                assert_eq!(outputs.score(), outputs2.score());
            }
        }
    }
}

#[test]
fn extra_alternative_from_builder() {
    let armory = Armory::new().unwrap();
    let vars = armory.selector().variables();
    let mut rules = Rules::new();

    rules.add(armory.distance.is(Distance::Medio), armory.desirability.is(Desirability::Desejavel));

    let shotgun = RuleSet::new(vars, rules).unwrap();
    let outputs = shotgun.infer(vars, &armory.inputs(50., 0.)).unwrap();

    // desejavel clipped at 1 is the plain triangle (30, 55, 75)
    assert!(outputs.score() > 50. && outputs.score() < 55.);
    assert_eq!(outputs.aggregated().len(), 101);
}

#[cfg(feature = "rayon")]
#[test]
fn parallel_rank_matches_sequential() {
    let armory = Armory::new().unwrap();

    for (d, a) in [(10., 90.), (50., 10.), (90., 90.), (33.3, 66.6)] {
        let inputs = armory.inputs(d, a);

        assert_eq!(
            armory.selector().rank_par(&inputs).unwrap(),
            armory.selector().rank(&inputs).unwrap()
        );
    }
}
