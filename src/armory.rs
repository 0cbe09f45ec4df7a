//! The built-in weapon roster: pistol, sniper rifle and rocket launcher
//! scored from target distance and ammunition level.

use crate::error::Result;
use crate::inference::RuleSet;
use crate::inputs::Inputs;
use crate::rules::Rules;
use crate::selector::{Alternative, Ranked, Selector};
use crate::terms::{Key, Term, Terms};
use crate::variable::{Universe, Variable, Variables};

macro_rules! term_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $label:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, Key, Ord, PartialEq, PartialOrd)]
        pub enum $name {
            $($variant),+
        }

        impl Term for $name {
            fn name(self) -> &'static str {
                match self {
                    $(Self::$variant => $label),+
                }
            }
        }
    };
}

term_enum! {
    /// Distance to the target, 0 to 100.
    Distance {
        Perto => "perto",
        Medio => "medio",
        Longe => "longe",
    }
}

term_enum! {
    /// Remaining ammunition as a percentage of capacity.
    Ammunition {
        Baixa => "baixa",
        Media => "media",
        Alta => "alta",
    }
}

term_enum! {
    Desirability {
        Indesejavel => "indesejavel",
        Desejavel => "desejavel",
        Imprescindivel => "imprescindivel",
    }
}

/// Per-weapon data that is not part of the decision logic.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WeaponProfile {
    /// Rounds in a full load.
    pub capacity: u32,
}

impl WeaponProfile {
    /// Converts an absolute round count into the `[0, 100]` ammunition scale.
    pub fn ammo_percentage(&self, rounds: u32) -> f64 {
        if self.capacity == 0 {
            return 0.;
        }

        (f64::from(rounds) / f64::from(self.capacity) * 100.).clamp(0., 100.)
    }
}

pub const PISTOL: &str = "Pistola";
pub const SNIPER: &str = "Sniper";
pub const ROCKET_LAUNCHER: &str = "Rocket Launcher";

pub struct Armory {
    pub distance: Variable<Distance>,
    pub ammunition: Variable<Ammunition>,
    pub desirability: Variable<Desirability>,
    selector: Selector<WeaponProfile>,
}

impl Armory {
    pub fn new() -> Result<Self> {
        use Ammunition::*;
        use Desirability::*;
        use Distance::*;

        let universe = Universe::new(0. ..=100., None)?;
        let mut distance_terms = Terms::new();
        let mut ammunition_terms = Terms::new();
        let mut desirability_terms = Terms::new();

        distance_terms.insert(Perto, [0., 0., 35.]);
        distance_terms.insert(Medio, [20., 50., 80.]);
        distance_terms.insert(Longe, [60., 100., 100.]);
        ammunition_terms.insert(Baixa, [0., 0., 40.]);
        ammunition_terms.insert(Media, [20., 50., 80.]);
        ammunition_terms.insert(Alta, [60., 100., 100.]);
        desirability_terms.insert(Indesejavel, [0., 0., 40.]);
        desirability_terms.insert(Desejavel, [30., 55., 75.]);
        desirability_terms.insert(Imprescindivel, [65., 85., 100.]);

        let mut vars = Variables::new();
        let distance = vars.add("distance", universe, distance_terms)?;
        let ammunition = vars.add("ammunition", universe, ammunition_terms)?;
        let desirability = vars.add("desirability", universe, desirability_terms)?;

        // Short range
        let mut pistol = Rules::with_capacity(6);
        pistol.add(distance.is(Perto) & ammunition.is(Alta), desirability.is(Imprescindivel));
        pistol.add(distance.is(Perto) & ammunition.is(Media), desirability.is(Desejavel));
        pistol.add(distance.is(Perto) & ammunition.is(Baixa), desirability.is(Indesejavel));
        pistol.add(distance.is(Medio) & ammunition.is(Media), desirability.is(Desejavel));
        pistol.add(distance.is(Medio) & ammunition.is(Alta), desirability.is(Desejavel));
        pistol.add(distance.is(Longe), desirability.is(Indesejavel));

        // Long range
        let mut sniper = Rules::with_capacity(4);
        sniper.add(distance.is(Longe) & ammunition.is(Alta), desirability.is(Imprescindivel));
        sniper.add(distance.is(Longe) & ammunition.is(Media), desirability.is(Desejavel));
        sniper.add(
            distance.is(Medio) & (ammunition.is(Media) | ammunition.is(Alta)),
            desirability.is(Desejavel),
        );
        sniper.add(distance.is(Perto), desirability.is(Indesejavel));

        // Medium and long range, as long as there is ammunition to spare
        let mut rocket = Rules::with_capacity(5);
        rocket.add(distance.is(Perto), desirability.is(Indesejavel));
        rocket.add(distance.is(Medio) & ammunition.is(Alta), desirability.is(Imprescindivel));
        rocket.add(distance.is(Medio) & ammunition.is(Media), desirability.is(Desejavel));
        rocket.add(distance.is(Longe) & !ammunition.is(Baixa), desirability.is(Desejavel));
        rocket.add(distance.is(Longe) & ammunition.is(Alta), desirability.is(Imprescindivel));

        let alternatives = vec![
            Alternative::new(PISTOL, RuleSet::new(&vars, pistol)?, WeaponProfile { capacity: 12 }),
            Alternative::new(SNIPER, RuleSet::new(&vars, sniper)?, WeaponProfile { capacity: 5 }),
            Alternative::new(
                ROCKET_LAUNCHER,
                RuleSet::new(&vars, rocket)?,
                WeaponProfile { capacity: 4 },
            ),
        ];

        Ok(Self {
            distance,
            ammunition,
            desirability,
            selector: Selector::new(vars, alternatives)?,
        })
    }

    pub fn selector(&self) -> &Selector<WeaponProfile> {
        &self.selector
    }

    /// Binds a distance and an ammunition percentage.
    pub fn inputs(&self, distance: f64, ammunition: f64) -> Inputs {
        let mut inputs = Inputs::new();

        inputs.add(self.distance, distance);
        inputs.add(self.ammunition, ammunition);
        inputs
    }

    pub fn rank(&self, distance: f64, ammunition: f64) -> Result<Vec<Ranked<'_>>> {
        self.selector.rank(&self.inputs(distance, ammunition))
    }

    /// The recommended weapon for the situation.
    pub fn best(&self, distance: f64, ammunition: f64) -> Result<Option<Ranked<'_>>> {
        self.selector.best(&self.inputs(distance, ammunition))
    }
}

#[test]
fn test_ammo_percentage() {
    let rocket = WeaponProfile { capacity: 4 };

    assert_eq!(rocket.ammo_percentage(0), 0.);
    assert_eq!(rocket.ammo_percentage(1), 25.);
    assert_eq!(rocket.ammo_percentage(4), 100.);
    assert_eq!(rocket.ammo_percentage(9), 100.);
    assert_eq!(WeaponProfile { capacity: 0 }.ammo_percentage(3), 0.);
}

#[test]
fn test_term_names() {
    assert_eq!(Distance::Perto.name(), "perto");
    assert_eq!(Ammunition::Media.name(), "media");
    assert_eq!(Desirability::Imprescindivel.name(), "imprescindivel");
}
