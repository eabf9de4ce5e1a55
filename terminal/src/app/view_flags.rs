//! Derived view flags.
//!
//! Flags are always recomputed from a snapshot taken at the start of the
//! recomputation, never patched field by field.

use chess_shared::{ChessGame, PlayerColor};

/// Inputs to [`ViewFlags::derive`].
#[derive(Debug, Clone, Copy)]
pub struct ViewSnapshot<'a> {
    /// Connected address, re-read from the session.
    pub address: Option<&'a str>,
    pub game: Option<&'a ChessGame>,
    /// Side to move in the local position.
    pub turn: PlayerColor,
    pub staged: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewFlags {
    pub turn: PlayerColor,
    /// Board orientation: black for player2, white otherwise.
    pub orientation: PlayerColor,
    /// The connected player may stage a move now.
    pub interactive: bool,
    /// The last logged action is a draw offer.
    pub draw_offered: bool,
}

impl Default for ViewFlags {
    fn default() -> Self {
        Self {
            turn: PlayerColor::White,
            orientation: PlayerColor::White,
            interactive: false,
            draw_offered: false,
        }
    }
}

impl ViewFlags {
    pub fn derive(snapshot: &ViewSnapshot<'_>) -> Self {
        let Some(game) = snapshot.game else {
            return Self {
                turn: snapshot.turn,
                ..Self::default()
            };
        };

        let orientation = match snapshot.address {
            Some(address) if address == game.player2 => PlayerColor::Black,
            _ => PlayerColor::White,
        };

        let to_move = snapshot.address == Some(game.player(snapshot.turn));
        let interactive = !game.is_over() && !snapshot.staged && to_move;

        let draw_offered = game
            .last_action()
            .map(|action| action.is_offer_draw())
            .unwrap_or(false);

        Self {
            turn: snapshot.turn,
            orientation,
            interactive,
            draw_offered,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_shared::{MoveAction, MoveRecord};

    const WHITE: &str = "juno1white";
    const BLACK: &str = "juno1black";

    fn game(actions: Vec<MoveAction>, status: Option<&str>) -> ChessGame {
        ChessGame {
            game_id: 1,
            player1: WHITE.into(),
            player2: BLACK.into(),
            moves: actions
                .into_iter()
                .enumerate()
                .map(|(i, action)| MoveRecord {
                    action,
                    block: i as u64,
                })
                .collect(),
            status: status.map(str::to_string),
            start_height: 0,
            block_time_limit: None,
            turn_color: None,
        }
    }

    fn derive(game: &ChessGame, address: Option<&str>, turn: PlayerColor, staged: bool) -> ViewFlags {
        ViewFlags::derive(&ViewSnapshot {
            address,
            game: Some(game),
            turn,
            staged,
        })
    }

    #[test]
    fn test_interactive_truth_table() {
        for over in [false, true] {
            for staged in [false, true] {
                for address in [WHITE, BLACK] {
                    for turn in [PlayerColor::White, PlayerColor::Black] {
                        let g = game(vec![], over.then_some("white_wins"));
                        let flags = derive(&g, Some(address), turn, staged);

                        let owns_turn = (address == WHITE) == (turn == PlayerColor::White);
                        assert_eq!(
                            flags.interactive,
                            !over && !staged && owns_turn,
                            "over={} staged={} address={} turn={}",
                            over,
                            staged,
                            address,
                            turn
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_disconnected_is_never_interactive() {
        let g = game(vec![], None);
        let flags = derive(&g, None, PlayerColor::White, false);
        assert!(!flags.interactive);
        assert_eq!(flags.orientation, PlayerColor::White);
    }

    #[test]
    fn test_spectator_sees_white_orientation() {
        let g = game(vec![], None);
        let flags = derive(&g, Some("juno1someone"), PlayerColor::Black, false);
        assert_eq!(flags.orientation, PlayerColor::White);
        assert!(!flags.interactive);
    }

    #[test]
    fn test_orientation_for_black() {
        let g = game(vec![], None);
        assert_eq!(derive(&g, Some(BLACK), PlayerColor::White, false).orientation, PlayerColor::Black);
        assert_eq!(derive(&g, Some(WHITE), PlayerColor::White, false).orientation, PlayerColor::White);
    }

    #[test]
    fn test_draw_offered() {
        let cases = vec![
            (vec![], false),
            (vec![MoveAction::MakeMove("e4".into())], false),
            (vec![MoveAction::OfferDraw("e4".into()), MoveAction::AcceptDraw], false),
            (vec![MoveAction::MakeMove("e4".into()), MoveAction::Resign], false),
            (vec![MoveAction::MakeMove("e4".into()), MoveAction::OfferDraw("e5".into())], true),
        ];

        for (actions, expected) in cases {
            let g = game(actions.clone(), None);
            let flags = derive(&g, Some(WHITE), PlayerColor::White, false);
            assert_eq!(flags.draw_offered, expected, "log {:?}", actions);
        }
    }

    #[test]
    fn test_no_game_loaded() {
        let flags = ViewFlags::derive(&ViewSnapshot {
            address: Some(WHITE),
            game: None,
            turn: PlayerColor::White,
            staged: false,
        });
        assert_eq!(flags, ViewFlags::default());
    }
}
