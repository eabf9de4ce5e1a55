//! Games and challenges lists.
//!
//! Entries involving the connected address come first, then newest id
//! first.

use crate::core::error::Result;
use crate::services::api::ChessContract;
use chess_shared::{Challenge, ChessGameSummary};
use std::cmp::Reverse;

pub fn sort_games(games: &mut [ChessGameSummary], address: Option<&str>) {
    games.sort_by_key(|game| {
        let mine = address.map_or(false, |a| game.involves(a));
        Reverse((mine, game.game_id))
    });
}

pub fn sort_challenges(challenges: &mut [Challenge], address: Option<&str>) {
    challenges.sort_by_key(|challenge| {
        let mine = address.map_or(false, |a| challenge.involves(a));
        Reverse((mine, challenge.challenge_id))
    });
}

/// Live games, sorted for the connected address.
pub async fn load_games(contract: &ChessContract) -> Result<Vec<ChessGameSummary>> {
    let mut games = contract.get_games(Some(false), None).await?;
    let address = contract.session().address();
    sort_games(&mut games, address.as_deref());
    tracing::debug!(count = games.len(), "Games loaded");
    Ok(games)
}

/// Open challenges, sorted for the connected address.
pub async fn load_challenges(contract: &ChessContract) -> Result<Vec<Challenge>> {
    let mut challenges = contract.get_challenges(None).await?;
    let address = contract.session().address();
    sort_challenges(&mut challenges, address.as_deref());
    tracing::debug!(count = challenges.len(), "Challenges loaded");
    Ok(challenges)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(game_id: u64, player1: &str, player2: &str) -> ChessGameSummary {
        ChessGameSummary {
            game_id,
            player1: player1.into(),
            player2: player2.into(),
            status: None,
            start_height: 0,
            block_time_limit: None,
            turn_color: None,
        }
    }

    fn challenge(challenge_id: u64, created_by: &str, opponent: Option<&str>) -> Challenge {
        Challenge {
            challenge_id,
            created_by: created_by.into(),
            created_block: 0,
            opponent: opponent.map(str::to_string),
            play_as: None,
            block_time_limit: None,
        }
    }

    #[test]
    fn test_games_mine_first_then_newest() {
        let mut games = vec![
            summary(1, "me", "x"),
            summary(4, "a", "b"),
            summary(2, "y", "me"),
            summary(3, "c", "d"),
        ];

        sort_games(&mut games, Some("me"));

        let ids: Vec<u64> = games.iter().map(|g| g.game_id).collect();
        assert_eq!(ids, vec![2, 1, 4, 3]);
    }

    #[test]
    fn test_games_without_address_newest_first() {
        let mut games = vec![summary(1, "a", "b"), summary(3, "c", "d"), summary(2, "e", "f")];

        sort_games(&mut games, None);

        let ids: Vec<u64> = games.iter().map(|g| g.game_id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_challenges_match_creator_or_opponent() {
        let mut challenges = vec![
            challenge(1, "me", None),
            challenge(5, "a", None),
            challenge(2, "b", Some("me")),
            challenge(3, "c", Some("d")),
        ];

        sort_challenges(&mut challenges, Some("me"));

        let ids: Vec<u64> = challenges.iter().map(|c| c.challenge_id).collect();
        assert_eq!(ids, vec![2, 1, 5, 3]);
    }
}
