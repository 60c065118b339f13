//! Special mission templates.
//!
//! A mission is stateless data: which regions a player must hold to activate
//! it, who can see it, what cards it costs, and what it grants (extra edges,
//! combat modifiers, a special card). Activation records the mission in the
//! player's `active_special_missions` with an anchor base region.

use serde::{Deserialize, Serialize};

use crate::battle::cards::Modifiers;
use crate::board::adjacency::ExtraEdge;
use crate::board::player::SpecialCardKind;
use crate::board::region::Region::{self, *};
use crate::economy::deck::CardKind;
use crate::economy::resources::{RawMaterialType, TechnologyType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissionId {
    AndesCrossing,
    NormandyLanding,
    AlejandroMagno,
    OttomanLegacy,
    GenghisKhan,
    Bolivar,
    PacificFire,
    GoldenDome,
    AntarcticRoute,
    IntelligenceNetwork,
}

pub const ALL_MISSIONS: [MissionId; 10] = [
    MissionId::AndesCrossing,
    MissionId::NormandyLanding,
    MissionId::AlejandroMagno,
    MissionId::OttomanLegacy,
    MissionId::GenghisKhan,
    MissionId::Bolivar,
    MissionId::PacificFire,
    MissionId::GoldenDome,
    MissionId::AntarcticRoute,
    MissionId::IntelligenceNetwork,
];

impl MissionId {
    pub fn template(self) -> &'static Mission {
        &MISSIONS[self as usize]
    }
}

/// Attack modifiers applied when a battle's source and target both match.
#[derive(Debug, Clone, Copy)]
pub struct AttackBonus {
    pub sources: &'static [Region],
    pub targets: &'static [Region],
    pub modifiers: Modifiers,
}

/// Defense modifiers applied when the mission holder defends a listed region.
#[derive(Debug, Clone, Copy)]
pub struct DefenseBonus {
    pub regions: &'static [Region],
    pub modifiers: Modifiers,
}

#[derive(Debug, Clone, Copy)]
pub struct Mission {
    pub id: MissionId,
    pub name: &'static str,
    /// Every one of these must be held to activate.
    pub control: &'static [Region],
    /// Holding any of these makes the mission visible.
    pub visible_for: &'static [Region],
    pub global: bool,
    /// Cards spent on activation, matched exactly.
    pub cards: &'static [CardKind],
    /// Regions the mission may be anchored to.
    pub bases: &'static [Region],
    pub edges: &'static [ExtraEdge],
    pub attack: Option<AttackBonus>,
    pub defense: Option<DefenseBonus>,
    pub grants: Option<SpecialCardKind>,
}

const fn mods(infantry: i8, artillery: i8, air: i8) -> Modifiers {
    Modifiers { infantry, artillery, air }
}

const GREECE_TURKEY: &[ExtraEdge] = &[ExtraEdge::new(Greece, Turkey)];

pub static MISSIONS: [Mission; 10] = [
    Mission {
        id: MissionId::AndesCrossing,
        name: "Andes Crossing",
        control: &[Argentina],
        visible_for: &[Argentina, Chile],
        global: false,
        cards: &[],
        bases: &[Argentina],
        edges: &[],
        attack: Some(AttackBonus { sources: &[Argentina], targets: &[Chile, Peru], modifiers: mods(1, 1, 0) }),
        defense: None,
        grants: None,
    },
    Mission {
        id: MissionId::NormandyLanding,
        name: "Normandy Landing",
        control: &[UnitedKingdom, UnitedStates],
        visible_for: &[UnitedKingdom, UnitedStates, France],
        global: false,
        cards: &[],
        bases: &[UnitedKingdom],
        edges: &[],
        attack: Some(AttackBonus { sources: &[UnitedKingdom], targets: &[France], modifiers: mods(2, 0, 1) }),
        defense: None,
        grants: None,
    },
    Mission {
        id: MissionId::AlejandroMagno,
        name: "Alejandro Magno",
        control: &[Greece, Balkans],
        visible_for: &[Greece, Balkans, Turkey],
        global: false,
        cards: &[],
        bases: &[Greece],
        edges: GREECE_TURKEY,
        attack: Some(AttackBonus { sources: &[Greece], targets: &[Turkey, Egypt], modifiers: mods(1, 0, 0) }),
        defense: None,
        grants: None,
    },
    Mission {
        id: MissionId::OttomanLegacy,
        name: "Ottoman Legacy",
        control: &[Turkey],
        visible_for: &[Turkey, Greece],
        global: false,
        cards: &[],
        bases: &[Turkey],
        edges: GREECE_TURKEY,
        attack: Some(AttackBonus {
            sources: &[Turkey],
            targets: &[Greece, Balkans, Iraq],
            modifiers: mods(0, 1, 0),
        }),
        defense: None,
        grants: None,
    },
    Mission {
        id: MissionId::GenghisKhan,
        name: "Genghis Khan",
        control: &[Mongolia],
        visible_for: &[Mongolia, China],
        global: false,
        cards: &[],
        bases: &[Mongolia],
        edges: &[],
        attack: Some(AttackBonus { sources: &[Mongolia], targets: &[China, Siberia], modifiers: mods(1, 0, 0) }),
        defense: None,
        grants: None,
    },
    Mission {
        id: MissionId::Bolivar,
        name: "Bolívar",
        control: &[Venezuela, Colombia],
        visible_for: &[Venezuela, Colombia],
        global: false,
        cards: &[],
        bases: &[Venezuela, Colombia],
        edges: &[],
        attack: Some(AttackBonus {
            sources: &[Venezuela, Colombia],
            targets: &[Peru, Bolivia, Brazil],
            modifiers: mods(1, 0, 0),
        }),
        defense: None,
        grants: None,
    },
    Mission {
        id: MissionId::PacificFire,
        name: "Pacific Fire",
        control: &[Japan],
        visible_for: &[Japan],
        global: false,
        cards: &[],
        bases: &[Japan],
        edges: &[],
        attack: Some(AttackBonus {
            sources: &[Japan],
            targets: &[UnitedStates, Philippines, Taiwan],
            modifiers: mods(0, 0, 1),
        }),
        defense: None,
        grants: None,
    },
    Mission {
        id: MissionId::GoldenDome,
        name: "Golden Dome",
        control: &[UnitedStates],
        visible_for: &[UnitedStates],
        global: false,
        cards: &[
            CardKind::Tech(TechnologyType::Electronics),
            CardKind::Raw(RawMaterialType::Semiconductor),
        ],
        bases: &[UnitedStates],
        edges: &[],
        attack: None,
        defense: Some(DefenseBonus { regions: &[UnitedStates], modifiers: mods(0, 0, 1) }),
        grants: None,
    },
    Mission {
        id: MissionId::AntarcticRoute,
        name: "Antarctic Route",
        control: &[Argentina, Chile],
        visible_for: &[Argentina, Chile, Australia, SouthAfrica],
        global: false,
        cards: &[CardKind::Tech(TechnologyType::Refining), CardKind::Raw(RawMaterialType::Oil)],
        bases: &[Argentina, Chile],
        edges: &[
            ExtraEdge::new(Argentina, Australia),
            ExtraEdge::new(Argentina, SouthAfrica),
            ExtraEdge::new(Chile, SouthAfrica),
            ExtraEdge::new(Australia, SouthAfrica),
        ],
        attack: None,
        defense: None,
        grants: Some(SpecialCardKind::AntarcticBase),
    },
    Mission {
        id: MissionId::IntelligenceNetwork,
        name: "Intelligence Network",
        control: &[UnitedKingdom],
        visible_for: &[],
        global: true,
        cards: &[CardKind::Tech(TechnologyType::Electronics)],
        bases: &[UnitedKingdom],
        edges: &[],
        attack: None,
        defense: None,
        grants: Some(SpecialCardKind::EspionageHq),
    },
];
