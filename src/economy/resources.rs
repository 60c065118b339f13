//! Resource catalog: raw materials, technologies, and provider candidates.
//!
//! Every technology consumes exactly one raw material type to produce one
//! supply unit. The candidate lists name the regions that may be picked as
//! providers when the production deck is assigned at game setup.

use serde::{Deserialize, Serialize};

use crate::board::region::Region::{self, *};

/// The three supply pools a player stockpiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupplyKind {
    Food,
    Manufacture,
    Energy,
}

pub const ALL_SUPPLY_KINDS: [SupplyKind; 3] =
    [SupplyKind::Food, SupplyKind::Manufacture, SupplyKind::Energy];

/// A raw material a territory can provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RawMaterialType {
    Iron,
    Aluminum,
    Semiconductor,
    Water,
    Grain,
    Oil,
    /// Nuclear fuel. Only ever assigned to as many providers as there are players.
    Uranium,
}

pub const ALL_RAW_MATERIALS: [RawMaterialType; 7] = [
    RawMaterialType::Iron,
    RawMaterialType::Aluminum,
    RawMaterialType::Semiconductor,
    RawMaterialType::Water,
    RawMaterialType::Grain,
    RawMaterialType::Oil,
    RawMaterialType::Uranium,
];

impl RawMaterialType {
    /// Returns the supply pool this material belongs to.
    pub const fn category(self) -> SupplyKind {
        match self {
            RawMaterialType::Iron | RawMaterialType::Aluminum | RawMaterialType::Semiconductor => {
                SupplyKind::Manufacture
            }
            RawMaterialType::Water | RawMaterialType::Grain => SupplyKind::Food,
            RawMaterialType::Oil | RawMaterialType::Uranium => SupplyKind::Energy,
        }
    }

    /// Returns true for the material that can fuel a silo.
    pub const fn is_fuel(self) -> bool {
        matches!(self, RawMaterialType::Uranium)
    }

    /// Regions that may be picked as providers of this material.
    pub const fn candidates(self) -> &'static [Region] {
        match self {
            RawMaterialType::Iron => {
                &[Australia, Brazil, China, Russia, India, Ukraine, SouthAfrica, Canada, Scandinavia]
            }
            RawMaterialType::Aluminum => {
                &[Australia, China, Russia, Canada, Brazil, India, Kazakhstan, SaudiArabia]
            }
            RawMaterialType::Semiconductor => {
                &[Taiwan, SouthKorea, Japan, UnitedStates, China, Germany, Vietnam, Philippines]
            }
            RawMaterialType::Water => {
                &[Canada, Brazil, Russia, Congo, Colombia, Peru, Scandinavia, NewZealand, Ethiopia]
            }
            RawMaterialType::Grain => {
                &[UnitedStates, Ukraine, Argentina, France, Kazakhstan, Canada, Australia, India]
            }
            RawMaterialType::Oil => &[
                SaudiArabia, Russia, Iraq, Iran, Venezuela, Nigeria, Libya, Algeria, Mexico, Kazakhstan,
            ],
            RawMaterialType::Uranium => {
                &[Kazakhstan, Canada, Australia, Nigeria, Angola, Russia, SouthAfrica, Mongolia]
            }
        }
    }
}

/// A technology a territory can provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TechnologyType {
    Agriculture,
    FoodProcessing,
    Electronics,
    LightIndustry,
    HeavyIndustry,
    Mining,
    Refining,
    /// Weapons-grade reactor technology.
    NuclearReactor,
}

pub const ALL_TECHNOLOGIES: [TechnologyType; 8] = [
    TechnologyType::Agriculture,
    TechnologyType::FoodProcessing,
    TechnologyType::Electronics,
    TechnologyType::LightIndustry,
    TechnologyType::HeavyIndustry,
    TechnologyType::Mining,
    TechnologyType::Refining,
    TechnologyType::NuclearReactor,
];

/// Regions able to host weapons-grade reactor technology.
pub const WEAPONS_CAPABLE_CANDIDATES: &[Region] = &[
    UnitedStates, Russia, China, UnitedKingdom, France, India, Pakistan, Israel, NorthKorea,
];

/// Civilian energy regions used to pad the reactor provider list.
pub const CIVILIAN_ENERGY_CANDIDATES: &[Region] = &[
    Canada, Japan, SouthKorea, Ukraine, Scandinavia, Spain, Brazil, Argentina, SouthAfrica, Germany,
];

impl TechnologyType {
    /// The raw material this technology must be paired with.
    pub const fn required_raw(self) -> RawMaterialType {
        TECHNOLOGY_REQUIREMENTS[self as usize].1
    }

    /// The supply pool the produced unit goes into.
    pub const fn product(self) -> SupplyKind {
        self.required_raw().category()
    }

    /// Regions that may be picked as providers of this technology.
    ///
    /// The reactor list here is only the weapons-capable half; deck
    /// assignment pads it from `CIVILIAN_ENERGY_CANDIDATES`.
    pub const fn candidates(self) -> &'static [Region] {
        match self {
            TechnologyType::Agriculture => {
                &[UnitedStates, France, Argentina, Brazil, Ukraine, India, Israel, Australia]
            }
            TechnologyType::FoodProcessing => {
                &[UnitedStates, Brazil, Germany, Italy, Spain, Mexico, Japan]
            }
            TechnologyType::Electronics => {
                &[UnitedStates, Japan, SouthKorea, Taiwan, China, Germany, Israel]
            }
            TechnologyType::LightIndustry => {
                &[China, Vietnam, Turkey, Mexico, Italy, Poland, Indonesia]
            }
            TechnologyType::HeavyIndustry => {
                &[Germany, Japan, China, Russia, UnitedStates, SouthKorea, Ukraine, India]
            }
            TechnologyType::Mining => {
                &[Chile, Peru, Australia, SouthAfrica, Congo, Canada, Bolivia, Mongolia]
            }
            TechnologyType::Refining => {
                &[SaudiArabia, UnitedStates, Russia, Iran, Venezuela, UnitedKingdom, Algeria]
            }
            TechnologyType::NuclearReactor => WEAPONS_CAPABLE_CANDIDATES,
        }
    }
}

/// Technology -> raw material pairing, indexed by `TechnologyType as usize`.
pub const TECHNOLOGY_REQUIREMENTS: [(TechnologyType, RawMaterialType); 8] = [
    (TechnologyType::Agriculture, RawMaterialType::Water),
    (TechnologyType::FoodProcessing, RawMaterialType::Grain),
    (TechnologyType::Electronics, RawMaterialType::Semiconductor),
    (TechnologyType::LightIndustry, RawMaterialType::Aluminum),
    (TechnologyType::HeavyIndustry, RawMaterialType::Iron),
    (TechnologyType::Mining, RawMaterialType::Iron),
    (TechnologyType::Refining, RawMaterialType::Oil),
    (TechnologyType::NuclearReactor, RawMaterialType::Uranium),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requirement_table_is_indexed_by_discriminant() {
        for (i, (tech, _)) in TECHNOLOGY_REQUIREMENTS.iter().enumerate() {
            assert_eq!(*tech as usize, i);
            assert_eq!(ALL_TECHNOLOGIES[i], *tech);
        }
    }

    #[test]
    fn products_follow_raw_category() {
        assert_eq!(TechnologyType::Agriculture.product(), SupplyKind::Food);
        assert_eq!(TechnologyType::Electronics.product(), SupplyKind::Manufacture);
        assert_eq!(TechnologyType::NuclearReactor.product(), SupplyKind::Energy);
        assert_eq!(TechnologyType::Mining.required_raw(), RawMaterialType::Iron);
    }

    #[test]
    fn candidate_lists_cover_six_providers() {
        for raw in ALL_RAW_MATERIALS {
            assert!(raw.candidates().len() >= 6, "{:?} has too few candidates", raw);
        }
        for tech in ALL_TECHNOLOGIES {
            if tech != TechnologyType::NuclearReactor {
                assert!(tech.candidates().len() >= 6, "{:?} has too few candidates", tech);
            }
        }
        assert!(WEAPONS_CAPABLE_CANDIDATES.len() >= 6);
    }

    #[test]
    fn weapons_candidates_are_nuclear_capable() {
        for r in WEAPONS_CAPABLE_CANDIDATES {
            assert!(r.is_nuclear_capable(), "{:?}", r);
        }
    }

    #[test]
    fn only_uranium_is_fuel() {
        for raw in ALL_RAW_MATERIALS {
            assert_eq!(raw.is_fuel(), raw == RawMaterialType::Uranium);
        }
    }
}
