//! Rules configuration.
//!
//! Every tunable number the rules engine uses lives here so a host can load
//! a variant ruleset from JSON. The defaults are the standard game.

use serde::{Deserialize, Serialize};

/// Errors raised while loading or validating a ruleset.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse rules JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("player count {0} outside {1}..={2}")]
    PlayerCount(usize, usize, usize),

    #[error("invalid rule '{name}': {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Tunable rule constants, carried inside every world snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub min_players: usize,
    pub max_players: usize,
    /// Regions dealt to each player at setup; the rest start neutral.
    pub starting_regions: usize,
    /// Cards dealt to each side when a battle starts.
    pub hand_size: usize,
    /// Maximum clash rounds per battle.
    pub max_rounds: u8,
    /// Clash wins the attacker needs to take the region.
    pub wins_needed: u8,
    /// Upper bound on provider regions per resource type.
    pub max_providers: usize,
    /// Owner turn-starts a silo spends under construction.
    pub silo_build_turns: u8,
    /// Owner turn-starts a silo spends cooling down after mutual deterrence.
    pub silo_cooldown_turns: u8,
    /// Cards drawn for one complete food/manufacture/energy trio.
    pub trio_draw: usize,
    pub start_year: u16,
    pub start_month: u8,
    /// Inclusive range of months the calendar advances per round.
    pub month_advance_min: u8,
    pub month_advance_max: u8,
}

impl Default for RulesConfig {
    fn default() -> Self {
        RulesConfig {
            min_players: 2,
            max_players: 6,
            starting_regions: 7,
            hand_size: 5,
            max_rounds: 3,
            wins_needed: 2,
            max_providers: 6,
            silo_build_turns: 1,
            silo_cooldown_turns: 2,
            trio_draw: 4,
            start_year: 1962,
            start_month: 1,
            month_advance_min: 1,
            month_advance_max: 3,
        }
    }
}

impl RulesConfig {
    /// Parses and validates a ruleset. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let rules: RulesConfig = serde_json::from_str(json)?;
        rules.validate()?;
        Ok(rules)
    }

    /// Checks internal consistency of the ruleset.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_players < 2 || self.min_players > self.max_players {
            return Err(ConfigError::Invalid {
                name: "min_players",
                reason: format!("must be in 2..={}", self.max_players),
            });
        }
        if self.starting_regions == 0 || self.starting_regions * self.max_players > 60 {
            return Err(ConfigError::Invalid {
                name: "starting_regions",
                reason: "every player needs at least one region and all must fit on the map".to_string(),
            });
        }
        if self.max_rounds == 0 || self.wins_needed == 0 || self.wins_needed > self.max_rounds {
            return Err(ConfigError::Invalid {
                name: "wins_needed",
                reason: format!("must be in 1..={}", self.max_rounds),
            });
        }
        if usize::from(self.max_rounds) > self.hand_size {
            return Err(ConfigError::Invalid {
                name: "hand_size",
                reason: "hand must cover every clash round".to_string(),
            });
        }
        // Two hands are dealt from the 60-card battle deck.
        if self.hand_size * 2 > 60 {
            return Err(ConfigError::Invalid {
                name: "hand_size",
                reason: "two hands must fit in the battle deck".to_string(),
            });
        }
        if !(1..=12).contains(&self.start_month) {
            return Err(ConfigError::Invalid {
                name: "start_month",
                reason: "must be in 1..=12".to_string(),
            });
        }
        if self.month_advance_min == 0
            || self.month_advance_min > self.month_advance_max
            || self.month_advance_max > 12
        {
            return Err(ConfigError::Invalid {
                name: "month_advance",
                reason: "need 1 <= min <= max <= 12".to_string(),
            });
        }
        Ok(())
    }

    /// Validates a requested player count against this ruleset.
    pub fn check_players(&self, n: usize) -> Result<(), ConfigError> {
        if n < self.min_players || n > self.max_players {
            return Err(ConfigError::PlayerCount(n, self.min_players, self.max_players));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let rules = RulesConfig::default();
        assert!(rules.validate().is_ok());
        assert_eq!(rules.hand_size, 5);
        assert_eq!(rules.max_rounds, 3);
        assert_eq!(rules.wins_needed, 2);
    }

    #[test]
    fn partial_json_fills_defaults() {
        let rules = RulesConfig::from_json(r#"{"start_year": 1983}"#).unwrap();
        assert_eq!(rules.start_year, 1983);
        assert_eq!(rules.silo_cooldown_turns, 2);
    }

    #[test]
    fn rejects_unwinnable_battles() {
        let err = RulesConfig::from_json(r#"{"max_rounds": 3, "wins_needed": 4}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "wins_needed", .. }));
    }

    #[test]
    fn rejects_bad_json() {
        assert!(matches!(RulesConfig::from_json("{"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn player_count_bounds() {
        let rules = RulesConfig::default();
        assert!(rules.check_players(2).is_ok());
        assert!(rules.check_players(6).is_ok());
        assert!(matches!(rules.check_players(1), Err(ConfigError::PlayerCount(1, 2, 6))));
        assert!(rules.check_players(7).is_err());
    }
}
