//! Non-aggression treaties.

use tracing::info;

use crate::board::player::PlayerId;
use crate::board::region::Region;
use crate::board::state::{Treaty, WorldState};
use crate::resolve::ActionError;

/// Records a clause binding `signer` not to attack `with` from the listed
/// regions (anywhere, if empty) through the end of `until_year`.
pub fn sign_treaty(
    state: &mut WorldState,
    signer: PlayerId,
    with: PlayerId,
    forbidden_sources: &[Region],
    until_year: u16,
) -> Result<(), ActionError> {
    if with == signer || state.player(with).is_none() {
        return Err(ActionError::InvalidTarget(with));
    }
    if until_year < state.clock.year {
        return Err(ActionError::TreatyExpired(until_year));
    }
    let mut sources = forbidden_sources.to_vec();
    sources.sort();
    sources.dedup();
    info!(%signer, %with, until_year, sources = sources.len(), "treaty signed");
    state.treaties.push(Treaty { signer, counterpart: with, forbidden_sources: sources, until_year });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RulesConfig;

    #[test]
    fn signing_records_clause() {
        let mut s = WorldState::empty(2, RulesConfig::default());
        sign_treaty(&mut s, PlayerId(0), PlayerId(1), &[Region::Chile, Region::Chile], 1963).unwrap();
        assert_eq!(s.treaties.len(), 1);
        assert_eq!(s.treaties[0].forbidden_sources, vec![Region::Chile]);
    }

    #[test]
    fn invalid_treaties_are_rejected() {
        let mut s = WorldState::empty(2, RulesConfig::default());
        assert_eq!(
            sign_treaty(&mut s, PlayerId(0), PlayerId(0), &[], 1963),
            Err(ActionError::InvalidTarget(PlayerId(0)))
        );
        assert_eq!(
            sign_treaty(&mut s, PlayerId(0), PlayerId(4), &[], 1963),
            Err(ActionError::InvalidTarget(PlayerId(4)))
        );
        assert_eq!(sign_treaty(&mut s, PlayerId(0), PlayerId(1), &[], 1950), Err(ActionError::TreatyExpired(1950)));
        assert!(s.treaties.is_empty());
    }
}
