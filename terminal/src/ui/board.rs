//! # Text Rendering
//!
//! Board, game, lobby and session views for the line-oriented terminal.

use crate::app::state::GameViewState;
use crate::config::SECONDS_PER_BLOCK;
use crate::services::rules::LocalPosition;
use crate::services::wallet::{Session, SessionStatus};
use chess_shared::{
    display_player, format_address, format_block_time, format_game_status, Challenge,
    ChessGameSummary, PlayerColor,
};
use std::fmt::Write;

const FILES: [char; 8] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'];

/// Board with the `orientation` side at the bottom.
pub fn render_board(position: &LocalPosition, orientation: PlayerColor) -> String {
    let (ranks, files): (Vec<usize>, Vec<usize>) = match orientation {
        PlayerColor::White => ((0..8).rev().collect(), (0..8).collect()),
        PlayerColor::Black => ((0..8).collect(), (0..8).rev().collect()),
    };

    let mut out = String::new();
    let border = format!("  +{}+\n", "-".repeat(files.len() * 2 + 1));
    out.push_str(&border);
    for &rank in &ranks {
        let _ = write!(out, "{} |", rank + 1);
        for &file in &files {
            let _ = write!(out, " {}", position.piece_at(rank, file).unwrap_or('.'));
        }
        out.push_str(" |\n");
    }
    out.push_str(&border);
    out.push_str("   ");
    for &file in &files {
        let _ = write!(out, " {}", FILES[file]);
    }
    out.push('\n');
    out
}

fn player_label(address: &str, connected: Option<&str>, prefix: &str) -> String {
    match display_player(address, connected).as_str() {
        "You" => format!("You ({})", format_address(Some(address), prefix)),
        _ => format_address(Some(address), prefix),
    }
}

/// Full game view: players, status, board, history and available actions.
pub fn render_game(state: &GameViewState, address: Option<&str>, prefix: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Game #{} [{}]", state.game_id, state.status.label());

    let Some(game) = &state.game else {
        if let Some(err) = &state.last_error {
            let _ = writeln!(out, "Error: {}", err);
        }
        return out;
    };

    let _ = writeln!(out, "White: {}", player_label(&game.player1, address, prefix));
    let _ = writeln!(out, "Black: {}", player_label(&game.player2, address, prefix));
    let _ = writeln!(
        out,
        "Status: {}   Time limit: {}",
        format_game_status(game.status.as_deref(), state.flags.turn),
        format_block_time(game.block_time_limit, SECONDS_PER_BLOCK)
    );
    out.push_str(&render_board(&state.position, state.flags.orientation));

    let rows = state.position.history_rows();
    if !rows.is_empty() {
        let _ = writeln!(out, "Moves: {}", rows.join(" | "));
    }

    if let Some(staged) = &state.staged {
        let _ = writeln!(out, "Staged: {} (submit, offer-draw or cancel)", staged.san);
    }
    if state.flags.draw_offered && !game.is_over() {
        let _ = writeln!(out, "A draw has been offered (accept-draw)");
    }
    if state.flags.interactive {
        let _ = writeln!(out, "Your move. Fee estimate: {}", state.fee_tier);
    } else if !game.is_over() && state.staged.is_none() {
        let _ = writeln!(out, "Waiting for {}", state.flags.turn);
    }
    if let Some(tx) = &state.last_tx {
        let _ = writeln!(out, "Last transaction: {} (height {})", tx.transaction_hash, tx.height);
    }
    if let Some(err) = &state.last_error {
        let _ = writeln!(out, "Error: {}", err);
    }
    out
}

pub fn render_games(games: &[ChessGameSummary], address: Option<&str>, prefix: &str) -> String {
    if games.is_empty() {
        return "No live games\n".to_string();
    }
    let mut out = String::new();
    for game in games {
        let turn = game.turn_color.unwrap_or(PlayerColor::White);
        let _ = writeln!(
            out,
            "#{:<5} {} vs {}  {}",
            game.game_id,
            player_label(&game.player1, address, prefix),
            player_label(&game.player2, address, prefix),
            format_game_status(game.status.as_deref(), turn)
        );
    }
    out
}

pub fn render_challenges(challenges: &[Challenge], address: Option<&str>, prefix: &str) -> String {
    if challenges.is_empty() {
        return "No open challenges\n".to_string();
    }
    let mut out = String::new();
    for challenge in challenges {
        let opponent = challenge
            .opponent
            .as_deref()
            .map(|o| player_label(o, address, prefix))
            .unwrap_or_else(|| "anyone".to_string());
        let plays = challenge
            .play_as
            .map(|c| c.to_string())
            .unwrap_or_else(|| "random".to_string());
        let _ = writeln!(
            out,
            "#{:<5} by {}  for {}  creator plays {}  limit {}",
            challenge.challenge_id,
            player_label(&challenge.created_by, address, prefix),
            opponent,
            plays,
            format_block_time(challenge.block_time_limit, SECONDS_PER_BLOCK)
        );
    }
    out
}

pub fn render_session(session: &Session, chain_id: &str) -> String {
    let status = match session.status {
        SessionStatus::Disconnected => "disconnected",
        SessionStatus::Connecting => "connecting",
        SessionStatus::Connected => "connected",
        SessionStatus::Error => "error",
    };
    let mut out = format!("Wallet: {} on {}", status, chain_id);
    if let Some(address) = &session.address {
        let _ = write!(out, " as {}", address);
    }
    if session.persisted {
        out.push_str(" (remembered)");
    }
    if let Some(err) = &session.last_error {
        let _ = write!(out, "\nLast error: {}", err);
    }
    out.push('\n');
    out
}
