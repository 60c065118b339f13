//! Region definitions and metadata for the world map.
//!
//! All 60 regions are enumerated grouped by continent. Region metadata
//! (display name, continent, defensive biomes, weapons capability) is stored
//! in a compile-time lookup table indexed by the `Region` enum discriminant.

use serde::{Deserialize, Serialize};

/// The number of regions on the world map.
pub const REGION_COUNT: usize = 60;

/// A contestable region on the world map.
///
/// Variants are grouped by continent. The `#[repr(u8)]` attribute enables
/// use as an array index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Region {
    Alaska = 0,
    Canada = 1,
    Greenland = 2,
    UnitedStates = 3,
    Mexico = 4,
    CentralAmerica = 5,
    Cuba = 6,
    Colombia = 7,
    Venezuela = 8,
    Peru = 9,
    Brazil = 10,
    Bolivia = 11,
    Chile = 12,
    Argentina = 13,
    UnitedKingdom = 14,
    Spain = 15,
    France = 16,
    Germany = 17,
    Italy = 18,
    Scandinavia = 19,
    Poland = 20,
    Ukraine = 21,
    Balkans = 22,
    Greece = 23,
    Russia = 24,
    Turkey = 25,
    Israel = 26,
    Iraq = 27,
    Iran = 28,
    SaudiArabia = 29,
    Afghanistan = 30,
    Pakistan = 31,
    India = 32,
    Kazakhstan = 33,
    Siberia = 34,
    Kamchatka = 35,
    Mongolia = 36,
    China = 37,
    NorthKorea = 38,
    SouthKorea = 39,
    Japan = 40,
    Taiwan = 41,
    Vietnam = 42,
    Egypt = 43,
    Libya = 44,
    Algeria = 45,
    Morocco = 46,
    Nigeria = 47,
    Sudan = 48,
    Ethiopia = 49,
    Congo = 50,
    Kenya = 51,
    Angola = 52,
    SouthAfrica = 53,
    Madagascar = 54,
    Indonesia = 55,
    Philippines = 56,
    PapuaNewGuinea = 57,
    Australia = 58,
    NewZealand = 59,
}

/// All region variants in index order.
pub const ALL_REGIONS: [Region; REGION_COUNT] = [
    Region::Alaska, Region::Canada, Region::Greenland, Region::UnitedStates,
    Region::Mexico, Region::CentralAmerica, Region::Cuba, Region::Colombia,
    Region::Venezuela, Region::Peru, Region::Brazil, Region::Bolivia,
    Region::Chile, Region::Argentina, Region::UnitedKingdom, Region::Spain,
    Region::France, Region::Germany, Region::Italy, Region::Scandinavia,
    Region::Poland, Region::Ukraine, Region::Balkans, Region::Greece,
    Region::Russia, Region::Turkey, Region::Israel, Region::Iraq,
    Region::Iran, Region::SaudiArabia, Region::Afghanistan, Region::Pakistan,
    Region::India, Region::Kazakhstan, Region::Siberia, Region::Kamchatka,
    Region::Mongolia, Region::China, Region::NorthKorea, Region::SouthKorea,
    Region::Japan, Region::Taiwan, Region::Vietnam, Region::Egypt,
    Region::Libya, Region::Algeria, Region::Morocco, Region::Nigeria,
    Region::Sudan, Region::Ethiopia, Region::Congo, Region::Kenya,
    Region::Angola, Region::SouthAfrica, Region::Madagascar, Region::Indonesia,
    Region::Philippines, Region::PapuaNewGuinea, Region::Australia, Region::NewZealand,
];

impl Region {
    /// Returns the lowercase protocol key for this region.
    pub const fn key(self) -> &'static str {
        REGION_INFO[self as usize].key
    }

    /// Returns the full display name for this region.
    pub const fn name(self) -> &'static str {
        REGION_INFO[self as usize].name
    }

    /// Returns the continent this region belongs to.
    pub const fn continent(self) -> Continent {
        REGION_INFO[self as usize].continent
    }

    /// Returns the defensive biomes of this region.
    pub const fn biomes(self) -> &'static [Biome] {
        REGION_INFO[self as usize].biomes
    }

    /// Returns true if a nuclear design can be drafted from this region.
    pub const fn is_nuclear_capable(self) -> bool {
        REGION_INFO[self as usize].nuclear_capable
    }

    /// Looks up a region by its protocol key.
    pub fn from_key(key: &str) -> Option<Region> {
        ALL_REGIONS.iter().copied().find(|r| r.key() == key)
    }

    /// Converts an array index back into a region.
    pub fn from_index(idx: usize) -> Option<Region> {
        ALL_REGIONS.get(idx).copied()
    }
}

/// Continent tag used for grouping and display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Continent {
    NorthAmerica,
    SouthAmerica,
    Europe,
    Asia,
    Africa,
    Oceania,
}

/// Terrain features that grant the defender bonuses against specific regiments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Biome {
    /// +1 against artillery.
    Mountain,
    /// +1 against artillery and +1 against air.
    Jungle,
    /// +1 against air.
    Urban,
    /// +1 against infantry.
    Plain,
}

/// Static metadata for a region.
pub struct RegionInfo {
    pub key: &'static str,
    pub name: &'static str,
    pub continent: Continent,
    pub biomes: &'static [Biome],
    pub nuclear_capable: bool,
}

use Biome::{Jungle, Mountain, Plain, Urban};
use Continent::{Africa, Asia, Europe, NorthAmerica, Oceania, SouthAmerica};

const fn info(
    key: &'static str,
    name: &'static str,
    continent: Continent,
    biomes: &'static [Biome],
    nuclear_capable: bool,
) -> RegionInfo {
    RegionInfo { key, name, continent, biomes, nuclear_capable }
}

/// Compile-time lookup table: index by `Region as usize`.
pub static REGION_INFO: [RegionInfo; REGION_COUNT] = [
    info("alaska", "Alaska", NorthAmerica, &[Mountain], false),
    info("canada", "Canada", NorthAmerica, &[Plain], false),
    info("greenland", "Greenland", NorthAmerica, &[Mountain], false),
    info("united_states", "United States", NorthAmerica, &[Urban, Plain], true),
    info("mexico", "Mexico", NorthAmerica, &[Mountain], false),
    info("central_america", "Central America", NorthAmerica, &[Jungle], false),
    info("cuba", "Cuba", NorthAmerica, &[Jungle], false),
    info("colombia", "Colombia", SouthAmerica, &[Jungle, Mountain], false),
    info("venezuela", "Venezuela", SouthAmerica, &[Plain], false),
    info("peru", "Peru", SouthAmerica, &[Mountain], false),
    info("brazil", "Brazil", SouthAmerica, &[Jungle], false),
    info("bolivia", "Bolivia", SouthAmerica, &[Mountain], false),
    info("chile", "Chile", SouthAmerica, &[Mountain], false),
    info("argentina", "Argentina", SouthAmerica, &[Plain], false),
    info("united_kingdom", "United Kingdom", Europe, &[Urban], true),
    info("spain", "Spain", Europe, &[Plain], false),
    info("france", "France", Europe, &[Urban, Plain], true),
    info("germany", "Germany", Europe, &[Urban], false),
    info("italy", "Italy", Europe, &[Mountain], false),
    info("scandinavia", "Scandinavia", Europe, &[Mountain], false),
    info("poland", "Poland", Europe, &[Plain], false),
    info("ukraine", "Ukraine", Europe, &[Plain], false),
    info("balkans", "Balkans", Europe, &[Mountain], false),
    info("greece", "Greece", Europe, &[Mountain], false),
    info("russia", "Russia", Europe, &[Plain, Urban], true),
    info("turkey", "Turkey", Asia, &[Mountain], false),
    info("israel", "Israel", Asia, &[Urban], true),
    info("iraq", "Iraq", Asia, &[Plain], false),
    info("iran", "Iran", Asia, &[Mountain], false),
    info("saudi_arabia", "Saudi Arabia", Asia, &[Plain], false),
    info("afghanistan", "Afghanistan", Asia, &[Mountain], false),
    info("pakistan", "Pakistan", Asia, &[Mountain], true),
    info("india", "India", Asia, &[Urban, Jungle], true),
    info("kazakhstan", "Kazakhstan", Asia, &[Plain], false),
    info("siberia", "Siberia", Asia, &[Plain], false),
    info("kamchatka", "Kamchatka", Asia, &[Mountain], false),
    info("mongolia", "Mongolia", Asia, &[Plain], false),
    info("china", "China", Asia, &[Urban, Mountain], true),
    info("north_korea", "North Korea", Asia, &[Mountain], true),
    info("south_korea", "South Korea", Asia, &[Urban], false),
    info("japan", "Japan", Asia, &[Urban, Mountain], false),
    info("taiwan", "Taiwan", Asia, &[Urban], false),
    info("vietnam", "Vietnam", Asia, &[Jungle], false),
    info("egypt", "Egypt", Africa, &[Plain], false),
    info("libya", "Libya", Africa, &[Plain], false),
    info("algeria", "Algeria", Africa, &[Plain], false),
    info("morocco", "Morocco", Africa, &[Mountain], false),
    info("nigeria", "Nigeria", Africa, &[Jungle], false),
    info("sudan", "Sudan", Africa, &[Plain], false),
    info("ethiopia", "Ethiopia", Africa, &[Mountain], false),
    info("congo", "Congo", Africa, &[Jungle], false),
    info("kenya", "Kenya", Africa, &[Plain], false),
    info("angola", "Angola", Africa, &[Jungle], false),
    info("south_africa", "South Africa", Africa, &[Urban, Plain], false),
    info("madagascar", "Madagascar", Africa, &[Jungle], false),
    info("indonesia", "Indonesia", Oceania, &[Jungle], false),
    info("philippines", "Philippines", Oceania, &[Jungle], false),
    info("papua_new_guinea", "Papua New Guinea", Oceania, &[Jungle, Mountain], false),
    info("australia", "Australia", Oceania, &[Plain], false),
    info("new_zealand", "New Zealand", Oceania, &[Mountain], false),
];
