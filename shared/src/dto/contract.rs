use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Side of the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerColor {
    White,
    Black,
}

impl PlayerColor {
    pub fn as_str(self) -> &'static str {
        match self {
            PlayerColor::White => "white",
            PlayerColor::Black => "black",
        }
    }
}

impl fmt::Display for PlayerColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Action recorded in a game's move log.
///
/// Serializes the way the contract expects: unit variants as bare strings
/// (`"resign"`), the others as single-key objects (`{"make_move": "e4"}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveAction {
    MakeMove(String),
    OfferDraw(String),
    AcceptDraw,
    Resign,
}

impl MoveAction {
    /// The board move carried by this action, if any.
    pub fn san(&self) -> Option<&str> {
        match self {
            MoveAction::MakeMove(san) | MoveAction::OfferDraw(san) => Some(san),
            MoveAction::AcceptDraw | MoveAction::Resign => None,
        }
    }

    pub fn is_offer_draw(&self) -> bool {
        matches!(self, MoveAction::OfferDraw(_))
    }
}

/// One entry of the remote move log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MoveRecord {
    pub action: MoveAction,
    pub block: u64,
}

// The contract returns `[block, action]` pairs; older deployments and
// fixtures use `{"action", "block"}` objects.
#[derive(Deserialize)]
#[serde(untagged)]
enum MoveRecordRepr {
    Pair(u64, MoveAction),
    Object { action: MoveAction, block: u64 },
}

impl<'de> Deserialize<'de> for MoveRecord {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(match MoveRecordRepr::deserialize(deserializer)? {
            MoveRecordRepr::Pair(block, action) => MoveRecord { action, block },
            MoveRecordRepr::Object { action, block } => MoveRecord { action, block },
        })
    }
}

/// Full game record returned by `get_game`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChessGame {
    pub game_id: u64,
    /// White.
    pub player1: String,
    /// Black.
    pub player2: String,
    #[serde(default)]
    pub moves: Vec<MoveRecord>,
    /// Terminal result such as `"white_wins"`; absent while the game is live.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub start_height: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_time_limit: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turn_color: Option<PlayerColor>,
}

impl ChessGame {
    pub fn is_over(&self) -> bool {
        self.status.is_some()
    }

    pub fn player(&self, color: PlayerColor) -> &str {
        match color {
            PlayerColor::White => &self.player1,
            PlayerColor::Black => &self.player2,
        }
    }

    pub fn involves(&self, address: &str) -> bool {
        self.player1 == address || self.player2 == address
    }

    pub fn last_action(&self) -> Option<&MoveAction> {
        self.moves.last().map(|record| &record.action)
    }
}

/// Game listing entry returned by `get_games` (no move log).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChessGameSummary {
    pub game_id: u64,
    pub player1: String,
    pub player2: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    pub start_height: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_time_limit: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub turn_color: Option<PlayerColor>,
}

impl ChessGameSummary {
    pub fn involves(&self, address: &str) -> bool {
        self.player1 == address || self.player2 == address
    }
}

/// Open challenge returned by `get_challenges`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Challenge {
    pub challenge_id: u64,
    pub created_by: String,
    pub created_block: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opponent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub play_as: Option<PlayerColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_time_limit: Option<u64>,
}

impl Challenge {
    pub fn involves(&self, address: &str) -> bool {
        self.created_by == address || self.opponent.as_deref() == Some(address)
    }
}

/// Parameters for `create_challenge`. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateChallengeRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opponent: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub play_as: Option<PlayerColor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_time_limit: Option<u64>,
}

/// State-changing contract messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecuteMsg {
    CreateChallenge(CreateChallengeRequest),
    AcceptChallenge { challenge_id: u64 },
    CancelChallenge { challenge_id: u64 },
    Move { game_id: u64, action: MoveAction },
}

/// Read-only contract queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryMsg {
    GetChallenges {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        player: Option<String>,
    },
    GetGame {
        game_id: u64,
    },
    GetGames {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        game_over: Option<bool>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        player: Option<String>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_move_action_wire_format() {
        assert_eq!(serde_json::to_value(MoveAction::Resign).unwrap(), json!("resign"));
        assert_eq!(serde_json::to_value(MoveAction::AcceptDraw).unwrap(), json!("accept_draw"));
        assert_eq!(
            serde_json::to_value(MoveAction::OfferDraw("Qd1".to_string())).unwrap(),
            json!({"offer_draw": "Qd1"})
        );
    }

    #[test]
    fn test_move_record_accepts_pair_and_object() {
        let pair: MoveRecord = serde_json::from_value(json!([120, {"make_move": "e4"}])).unwrap();
        let object: MoveRecord =
            serde_json::from_value(json!({"action": "resign", "block": 130})).unwrap();

        assert_eq!(pair, MoveRecord { action: MoveAction::MakeMove("e4".to_string()), block: 120 });
        assert_eq!(object, MoveRecord { action: MoveAction::Resign, block: 130 });
    }

    #[test]
    fn test_chess_game_defaults() {
        let game: ChessGame = serde_json::from_value(json!({
            "game_id": 3,
            "player1": "juno1white",
            "player2": "juno1black",
            "start_height": 10
        }))
        .unwrap();

        assert!(game.moves.is_empty());
        assert!(!game.is_over());
        assert_eq!(game.player(PlayerColor::Black), "juno1black");
        assert!(game.involves("juno1white"));
        assert!(!game.involves("juno1other"));
    }

    #[test]
    fn test_execute_msg_wire_format() {
        let msg = ExecuteMsg::Move {
            game_id: 4,
            action: MoveAction::MakeMove("0-0".to_string()),
        };
        assert_eq!(
            serde_json::to_value(&msg).unwrap(),
            json!({"move": {"game_id": 4, "action": {"make_move": "0-0"}}})
        );

        let create = ExecuteMsg::CreateChallenge(CreateChallengeRequest {
            play_as: Some(PlayerColor::Black),
            ..Default::default()
        });
        assert_eq!(
            serde_json::to_value(&create).unwrap(),
            json!({"create_challenge": {"play_as": "black"}})
        );
    }

    #[test]
    fn test_query_msg_omits_empty_filters() {
        let query = QueryMsg::GetGames { game_over: None, player: None };
        assert_eq!(serde_json::to_value(&query).unwrap(), json!({"get_games": {}}));
    }

    #[test]
    fn test_challenge_involves_opponent() {
        let challenge = Challenge {
            challenge_id: 1,
            created_by: "juno1a".to_string(),
            created_block: 5,
            opponent: Some("juno1b".to_string()),
            play_as: None,
            block_time_limit: None,
        };
        assert!(challenge.involves("juno1a"));
        assert!(challenge.involves("juno1b"));
        assert!(!challenge.involves("juno1c"));
    }
}
