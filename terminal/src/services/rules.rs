//! Local rules engine: replays a remote move log with the `chess` crate.
//!
//! The contract is authoritative; this position only drives the board
//! display, turn detection and staging legality.

use crate::core::error::{AppError, Result};
use chess::{Board, BoardStatus, ChessMove, Color, File, MoveGen, Piece, Rank, Square};
use chess_shared::{MoveRecord, PlayerColor};
use tracing::warn;

/// One applied move with the side that played it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub san: String,
    pub color: PlayerColor,
}

/// Position rebuilt from a move log.
#[derive(Debug, Clone)]
pub struct LocalPosition {
    board: Board,
    history: Vec<HistoryEntry>,
}

impl Default for LocalPosition {
    fn default() -> Self {
        Self {
            board: Board::default(),
            history: Vec::new(),
        }
    }
}

impl LocalPosition {
    /// Starting position.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replay a full log from the starting position.
    ///
    /// `MakeMove` and `OfferDraw` carry a board move; `AcceptDraw` and
    /// `Resign` do not change the position.
    pub fn replay(moves: &[MoveRecord]) -> Result<Self> {
        let mut position = Self::new();
        for (index, record) in moves.iter().enumerate() {
            if let Some(san) = record.action.san() {
                position.apply(san).map_err(|e| {
                    warn!(index, san = %san, error = %e, "Move log does not replay");
                    AppError::RemoteQuery(format!("move {} ({}) in game log is not legal", index + 1, san))
                })?;
            }
        }
        Ok(position)
    }

    /// Side to move.
    pub fn turn(&self) -> PlayerColor {
        from_color(self.board.side_to_move())
    }

    pub fn history(&self) -> &[HistoryEntry] {
        &self.history
    }

    /// Apply a move in standard algebraic notation and return its canonical
    /// SAN, including the `+`/`#` suffix. Illegal moves leave the position
    /// untouched.
    ///
    /// Accepts `=` or bare promotion (`bxa8=Q`, `bxa8Q`), numeral castling,
    /// an optional `e.p.` marker and redundant disambiguation (`Ngf3`).
    pub fn apply(&mut self, san: &str) -> Result<String> {
        let key = normalize_san(san);
        if key.is_empty() {
            return Err(AppError::Validation("Empty move".to_string()));
        }

        let chess_move = self
            .resolve(&key)
            .ok_or_else(|| AppError::Validation(format!("Illegal move '{}'", san.trim())))?;
        let canonical = to_san(&self.board, chess_move);

        let color = self.turn();
        self.board = self.board.make_move_new(chess_move);
        self.history.push(HistoryEntry {
            san: canonical.clone(),
            color,
        });
        Ok(canonical)
    }

    /// Match against the canonical SAN of every legal move, falling back to
    /// the crate's parser for over-specified input.
    fn resolve(&self, key: &str) -> Option<ChessMove> {
        MoveGen::new_legal(&self.board)
            .find(|&candidate| normalize_san(&to_san(&self.board, candidate)) == key)
            .or_else(|| {
                ChessMove::from_san(&self.board, key)
                    .ok()
                    .filter(|&candidate| self.board.legal(candidate))
            })
    }

    /// History as numbered pairs: `["1. e4 e5", "2. Nf3"]`.
    pub fn history_rows(&self) -> Vec<String> {
        self.history
            .chunks(2)
            .enumerate()
            .map(|(index, pair)| {
                let moves: Vec<&str> = pair.iter().map(|entry| entry.san.as_str()).collect();
                format!("{}. {}", index + 1, moves.join(" "))
            })
            .collect()
    }

    /// Piece letter on a square (`K`/`k` style, uppercase for white).
    /// `rank` and `file` are zero-based from a1.
    pub fn piece_at(&self, rank: usize, file: usize) -> Option<char> {
        let square = Square::make_square(Rank::from_index(rank), File::from_index(file));
        let piece = self.board.piece_on(square)?;
        let color = self.board.color_on(square)?;
        let letter = piece_letter(piece);
        Some(match color {
            Color::White => letter,
            Color::Black => letter.to_ascii_lowercase(),
        })
    }
}

fn from_color(color: Color) -> PlayerColor {
    match color {
        Color::White => PlayerColor::White,
        Color::Black => PlayerColor::Black,
    }
}

/// Comparison form of a SAN string: numeral castling becomes letters and
/// check, annotation, `e.p.` and `=` markers are dropped.
pub fn normalize_san(san: &str) -> String {
    let trimmed = san.trim();
    let trimmed = trimmed.strip_suffix("e.p.").unwrap_or(trimmed).trim_end();
    let trimmed = trimmed.trim_end_matches(|c: char| matches!(c, '+' | '#' | '!' | '?'));
    let trimmed = if trimmed.starts_with('0') {
        trimmed.replace('0', "O")
    } else {
        trimmed.to_string()
    };
    trimmed.replace('=', "")
}

fn piece_letter(piece: Piece) -> char {
    match piece {
        Piece::Pawn => 'P',
        Piece::Knight => 'N',
        Piece::Bishop => 'B',
        Piece::Rook => 'R',
        Piece::Queen => 'Q',
        Piece::King => 'K',
    }
}

/// Canonical SAN of a legal move on `board`.
fn to_san(board: &Board, chess_move: ChessMove) -> String {
    let source = chess_move.get_source();
    let dest = chess_move.get_dest();
    let piece = board.piece_on(source).unwrap_or(Piece::Pawn);
    let file_delta = dest.get_file().to_index() as i32 - source.get_file().to_index() as i32;

    let mut san = String::new();
    if piece == Piece::King && file_delta.abs() == 2 {
        san.push_str(if file_delta > 0 { "O-O" } else { "O-O-O" });
    } else if piece == Piece::Pawn {
        // a diagonal pawn move is a capture, en passant included
        if file_delta != 0 {
            san.push(file_char(source));
            san.push('x');
        }
        push_square(&mut san, dest);
        if let Some(promotion) = chess_move.get_promotion() {
            san.push('=');
            san.push(piece_letter(promotion));
        }
    } else {
        san.push(piece_letter(piece));
        let rivals: Vec<Square> = MoveGen::new_legal(board)
            .filter(|other| {
                other.get_dest() == dest
                    && other.get_source() != source
                    && board.piece_on(other.get_source()) == Some(piece)
            })
            .map(|other| other.get_source())
            .collect();
        if !rivals.is_empty() {
            if rivals.iter().all(|sq| sq.get_file() != source.get_file()) {
                san.push(file_char(source));
            } else if rivals.iter().all(|sq| sq.get_rank() != source.get_rank()) {
                san.push(rank_char(source));
            } else {
                san.push(file_char(source));
                san.push(rank_char(source));
            }
        }
        if board.piece_on(dest).is_some() {
            san.push('x');
        }
        push_square(&mut san, dest);
    }

    let next = board.make_move_new(chess_move);
    if next.status() == BoardStatus::Checkmate {
        san.push('#');
    } else if next.checkers().popcnt() > 0 {
        san.push('+');
    }
    san
}

fn push_square(san: &mut String, square: Square) {
    san.push(file_char(square));
    san.push(rank_char(square));
}

fn file_char(square: Square) -> char {
    (b'a' + square.get_file().to_index() as u8) as char
}

fn rank_char(square: Square) -> char {
    (b'1' + square.get_rank().to_index() as u8) as char
}

/// Contract notation: castling uses numerals (`O-O` → `0-0`).
pub fn to_contract_notation(san: &str) -> String {
    if san.starts_with('O') {
        san.replace(|c: char| c == 'O' || c == 'o', "0")
    } else {
        san.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chess_shared::MoveAction;

    fn log(actions: Vec<MoveAction>) -> Vec<MoveRecord> {
        actions
            .into_iter()
            .enumerate()
            .map(|(i, action)| MoveRecord {
                action,
                block: 100 + i as u64,
            })
            .collect()
    }

    fn moves(sans: &[&str]) -> Vec<MoveRecord> {
        log(sans.iter().map(|s| MoveAction::MakeMove(s.to_string())).collect())
    }

    #[test]
    fn test_empty_log_is_start_position() {
        let position = LocalPosition::replay(&[]).unwrap();
        assert_eq!(position.turn(), PlayerColor::White);
        assert!(position.history().is_empty());
        assert_eq!(position.piece_at(0, 4), Some('K'));
        assert_eq!(position.piece_at(7, 3), Some('q'));
        assert_eq!(position.piece_at(3, 3), None);
    }

    #[test]
    fn test_replay_sets_turn_and_history() {
        let position = LocalPosition::replay(&moves(&["e4", "e5", "Nf3"])).unwrap();

        assert_eq!(position.turn(), PlayerColor::Black);
        assert_eq!(position.history().len(), 3);
        assert_eq!(position.history()[1].color, PlayerColor::Black);
        assert_eq!(position.history_rows(), vec!["1. e4 e5", "2. Nf3"]);
    }

    #[test]
    fn test_replay_is_idempotent() {
        let log = moves(&["e4", "e5", "Nf3", "Nc6", "Bc4", "Bc5"]);

        let first = LocalPosition::replay(&log).unwrap();
        let second = LocalPosition::replay(&log).unwrap();

        assert_eq!(first.history(), second.history());
        assert_eq!(first.turn(), second.turn());
        for rank in 0..8 {
            for file in 0..8 {
                assert_eq!(first.piece_at(rank, file), second.piece_at(rank, file));
            }
        }
    }

    #[test]
    fn test_replay_skips_non_board_actions() {
        let log = log(vec![
            MoveAction::MakeMove("e4".into()),
            MoveAction::OfferDraw("e5".into()),
            MoveAction::AcceptDraw,
        ]);

        let position = LocalPosition::replay(&log).unwrap();

        assert_eq!(position.history().len(), 2);
        assert_eq!(position.turn(), PlayerColor::White);
    }

    #[test]
    fn test_replay_accepts_numeral_castling() {
        let position =
            LocalPosition::replay(&moves(&["e4", "e5", "Nf3", "Nc6", "Bc4", "Bc5", "0-0"])).unwrap();

        assert_eq!(position.piece_at(0, 6), Some('K'));
        assert_eq!(position.piece_at(0, 5), Some('R'));
        assert_eq!(position.history().last().map(|e| e.san.as_str()), Some("O-O"));
    }

    #[test]
    fn test_replay_rejects_corrupt_log() {
        let err = LocalPosition::replay(&moves(&["e4", "e4"])).unwrap_err();
        assert!(matches!(err, AppError::RemoteQuery(_)));
    }

    #[test]
    fn test_illegal_move_leaves_position_untouched() {
        let mut position = LocalPosition::replay(&moves(&["e4"])).unwrap();

        let err = position.apply("Ke2").unwrap_err();

        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(position.turn(), PlayerColor::Black);
        assert_eq!(position.history().len(), 1);
    }

    #[test]
    fn test_normalize_san() {
        assert_eq!(normalize_san("0-0"), "O-O");
        assert_eq!(normalize_san("0-0-0"), "O-O-O");
        assert_eq!(normalize_san(" Qxf7# "), "Qxf7");
        assert_eq!(normalize_san("Nf3+"), "Nf3");
        assert_eq!(normalize_san("bxa8=Q+"), "bxa8Q");
        assert_eq!(normalize_san("exf6 e.p."), "exf6");
    }

    #[test]
    fn test_replay_promotion() {
        let before = ["a4", "h5", "a5", "h4", "a6", "h3", "axb7", "hxg2"];
        for promotion in ["bxa8=Q", "bxa8Q", "bxa8=Q+"] {
            let mut sans = before.to_vec();
            sans.push(promotion);

            let position = LocalPosition::replay(&moves(&sans)).unwrap();

            assert_eq!(position.piece_at(7, 0), Some('Q'), "{}", promotion);
            assert_eq!(position.piece_at(6, 1), None);
            assert_eq!(position.history().last().map(|e| e.san.as_str()), Some("bxa8=Q"));
        }
    }

    #[test]
    fn test_replay_underpromotion_and_black_promotion() {
        let position = LocalPosition::replay(&moves(&[
            "a4", "h5", "a5", "h4", "a6", "h3", "axb7", "hxg2", "bxa8=N", "gxh1=Q",
        ]))
        .unwrap();

        assert_eq!(position.piece_at(7, 0), Some('N'));
        assert_eq!(position.piece_at(0, 7), Some('q'));
        assert_eq!(position.turn(), PlayerColor::White);
    }

    #[test]
    fn test_replay_en_passant() {
        for capture in ["exf6", "exf6 e.p."] {
            let position = LocalPosition::replay(&moves(&["e4", "d5", "e5", "f5", capture])).unwrap();

            assert_eq!(position.piece_at(5, 5), Some('P'), "{}", capture);
            assert_eq!(position.piece_at(4, 5), None);
            assert_eq!(position.piece_at(4, 4), None);
            assert_eq!(position.history().last().map(|e| e.san.as_str()), Some("exf6"));
        }
    }

    #[test]
    fn test_apply_returns_canonical_san() {
        let mut position = LocalPosition::replay(&moves(&["e4", "e5", "Bc4", "Nc6", "Qh5", "Nf6"])).unwrap();

        assert_eq!(position.apply("Qxf7").unwrap(), "Qxf7#");
        assert_eq!(position.history().last().map(|e| e.san.as_str()), Some("Qxf7#"));

        let mut start = LocalPosition::new();
        assert_eq!(start.apply("Ngf3").unwrap(), "Nf3");
    }

    #[test]
    fn test_check_suffix_and_disambiguation() {
        let mut position = LocalPosition::replay(&moves(&["e4", "a6", "Nc3", "a5"])).unwrap();
        assert_eq!(position.apply("Nge2").unwrap(), "Nge2");

        let mut check = LocalPosition::replay(&moves(&["e4", "f6", "d4"])).unwrap();
        check.apply("g5").unwrap();
        assert_eq!(check.apply("Qh5").unwrap(), "Qh5#");

        let mut plain = LocalPosition::replay(&moves(&["e4", "f5"])).unwrap();
        assert_eq!(plain.apply("Qh5").unwrap(), "Qh5+");
    }

    #[test]
    fn test_contract_notation() {
        assert_eq!(to_contract_notation("O-O"), "0-0");
        assert_eq!(to_contract_notation("O-O-O"), "0-0-0");
        assert_eq!(to_contract_notation("Nf3"), "Nf3");
        assert_eq!(to_contract_notation("Qd1"), "Qd1");
    }
}
