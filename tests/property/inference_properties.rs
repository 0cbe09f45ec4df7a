use fuzzy_armory::armory::Armory;
use fuzzy_armory::{ops, Expr, Inputs, LinguisticVariable, Triangle, Universe, Variables};
use proptest::prelude::*;

fn arb_triangle() -> impl Strategy<Value = Triangle> {
    (0.0f64..=100., 0.0f64..=100., 0.0f64..=100.).prop_map(|(a, b, c)| {
        let mut points = [a, b, c];
        points.sort_by(|x, y| x.total_cmp(y));
        Triangle::from(points)
    })
}

fn arb_input() -> impl Strategy<Value = f64> {
    prop_oneof![
        4 => -1e6f64..1e6,
        1 => Just(f64::NAN),
        1 => Just(f64::INFINITY),
        1 => Just(f64::NEG_INFINITY),
    ]
}

// ── Membership ───────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn membership_is_total(t in arb_triangle(), x in arb_input()) {
        let m = t.evaluate(x);
        prop_assert!((0. ..=1.).contains(&m), "{t:?} at {x} gave {m}");
    }

    #[test]
    fn membership_peaks_at_b(t in arb_triangle()) {
        let (_, b, _) = t.breakpoints();
        prop_assert_eq!(t.evaluate(b), 1.);
    }

    #[test]
    fn membership_is_zero_outside_support(t in arb_triangle(), offset in 0.001f64..1e6) {
        let (a, _, c) = t.breakpoints();
        prop_assert_eq!(t.evaluate(a - offset), 0.);
        prop_assert_eq!(t.evaluate(c + offset), 0.);
    }

    #[test]
    fn armory_degrees_are_total(x in arb_input()) {
        let armory = Armory::new().unwrap();

        for (_, var) in armory.selector().variables().iter() {
            for (term, degree) in var.degrees(x) {
                prop_assert!((0. ..=1.).contains(&degree), "{}/{term} at {x}", var.name());
            }
        }
    }
}

// ── Connectives ──────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn connective_algebra(p in 0.0f64..=1., q in 0.0f64..=1.) {
        prop_assert_eq!(ops::and(p, q), p.min(q));
        prop_assert_eq!(ops::or(p, q), p.max(q));
        prop_assert_eq!(ops::not(p), 1. - p);
    }

    #[test]
    fn expression_connectives_match_operators(x in 0.0f64..=100., y in 0.0f64..=100.) {
        let universe = Universe::new(0. ..=100., None).unwrap();
        let mut vars = Variables::new();
        let u = vars
            .insert(LinguisticVariable::new("u", universe, [("t", Triangle::new(0., 30., 70.))]).unwrap())
            .unwrap();
        let v = vars
            .insert(LinguisticVariable::new("v", universe, [("t", Triangle::new(20., 60., 100.))]).unwrap())
            .unwrap();
        let mut inputs = Inputs::new();
        inputs.insert(u, x);
        inputs.insert(v, y);

        let p = Expr::is(u, "t").eval(&vars, &inputs).unwrap();
        let q = Expr::is(v, "t").eval(&vars, &inputs).unwrap();

        prop_assert_eq!((Expr::is(u, "t") & Expr::is(v, "t")).eval(&vars, &inputs).unwrap(), p.min(q));
        prop_assert_eq!((Expr::is(u, "t") | Expr::is(v, "t")).eval(&vars, &inputs).unwrap(), p.max(q));
        prop_assert_eq!((!Expr::is(u, "t")).eval(&vars, &inputs).unwrap(), 1. - p);
    }
}

// ── Inference ────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn scores_are_bounded_and_deterministic(d in 0.0f64..=100., a in 0.0f64..=100.) {
        let armory = Armory::new().unwrap();
        let first = armory.rank(d, a).unwrap();
        let second = armory.rank(d, a).unwrap();

        prop_assert_eq!(&first, &second);
        for ranked in &first {
            prop_assert!((0. ..=100.).contains(&ranked.score));
        }
    }

    #[test]
    fn rank_is_descending(d in 0.0f64..=100., a in 0.0f64..=100.) {
        let armory = Armory::new().unwrap();
        let ranked = armory.rank(d, a).unwrap();

        prop_assert!(ranked.windows(2).all(|w| w[0].score >= w[1].score));
        prop_assert_eq!(armory.best(d, a).unwrap(), ranked.first().copied());
    }
}
