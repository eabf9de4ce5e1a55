//! # Shared Utility Functions
//!
//! Display helpers used by the terminal front end.
//!
//! ## Usage
//!
//! ```rust
//! use chess_shared::utils::format_address;
//!
//! let address = "juno1qzmu3y33vhwhexwwtctp7e3fn20qnfphy3f04w";
//! assert_eq!(format_address(Some(address), "juno"), "juno1qzmu...3f04w");
//! assert_eq!(format_address(None, "juno"), "-");
//! ```

use crate::dto::contract::PlayerColor;

/// Shorten a bech32 address to the prefix plus five characters on each side.
///
/// Returns `-` when there is no address, and the address unchanged when it
/// is too short to shorten.
///
/// # Examples
///
/// ```rust
/// use chess_shared::utils::format_address;
///
/// assert_eq!(format_address(Some("juno1short"), "juno"), "juno1short");
/// ```
pub fn format_address(address: Option<&str>, bech32_prefix: &str) -> String {
    let address = match address {
        Some(address) if !address.is_empty() => address,
        _ => return "-".to_string(),
    };

    let head = bech32_prefix.len() + 5;
    let tail = 5;
    // Bech32 is ASCII-only, byte slicing is safe once lengths are checked
    if !address.is_ascii() || address.len() <= head + tail {
        return address.to_string();
    }

    format!("{}...{}", &address[..head], &address[address.len() - tail..])
}

/// Label an address for display, showing `You` for the connected wallet.
pub fn display_player(address: &str, connected: Option<&str>) -> String {
    if connected == Some(address) {
        "You".to_string()
    } else {
        address.to_string()
    }
}

/// Human-readable block count, e.g. `"100 (~10m0s)"`.
///
/// `secs_per_block` is the chain's average block time.
pub fn format_block_time(num_blocks: Option<u64>, secs_per_block: u64) -> String {
    let num_blocks = match num_blocks {
        Some(blocks) if blocks > 0 => blocks,
        _ => return "none".to_string(),
    };

    let mut seconds = num_blocks.saturating_mul(secs_per_block);
    let mut out = Vec::new();
    for (unit, suffix) in [(86_400, "d"), (3_600, "h"), (60, "m")] {
        if seconds > unit {
            out.push(format!("{}{}", seconds / unit, suffix));
            seconds %= unit;
        }
    }
    if out.len() < 2 {
        out.push(format!("{}s", seconds));
    }

    format!("{} (~{})", num_blocks, out.join(""))
}

/// Status text for a game: the terminal result, or whose turn it is.
pub fn format_game_status(status: Option<&str>, turn: PlayerColor) -> String {
    match status {
        Some(status) => status.replace('_', " "),
        None => format!("{} to play", turn),
    }
}
