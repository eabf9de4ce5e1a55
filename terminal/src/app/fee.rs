//! Gas estimate for game actions.
//!
//! Contract gas grows with the length of the move log, so the estimate is a
//! step function of the remote move count. It is a heuristic; an
//! underestimate fails as an ordinary transaction error.

use chess_shared::{Fee, StdFee};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeeTier {
    /// Fewer than 20 moves.
    Low,
    /// 20 to 59 moves.
    Medium,
    /// 60 moves and more.
    High,
}

impl FeeTier {
    pub fn for_move_count(moves: usize) -> Self {
        match moves {
            0..=19 => FeeTier::Low,
            20..=59 => FeeTier::Medium,
            _ => FeeTier::High,
        }
    }

    pub fn gas(self) -> u64 {
        match self {
            FeeTier::Low => 200_000,
            FeeTier::Medium => 250_000,
            FeeTier::High => 300_000,
        }
    }

    /// Gas-only fee; the wallet prices it.
    pub fn fee(self) -> Fee {
        Fee::Std(StdFee::gas(self.gas()))
    }
}

impl fmt::Display for FeeTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FeeTier::Low => "low",
            FeeTier::Medium => "medium",
            FeeTier::High => "high",
        };
        write!(f, "{} ({} gas)", name, self.gas())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_boundaries() {
        assert_eq!(FeeTier::for_move_count(0), FeeTier::Low);
        assert_eq!(FeeTier::for_move_count(19), FeeTier::Low);
        assert_eq!(FeeTier::for_move_count(20), FeeTier::Medium);
        assert_eq!(FeeTier::for_move_count(59), FeeTier::Medium);
        assert_eq!(FeeTier::for_move_count(60), FeeTier::High);
        assert_eq!(FeeTier::for_move_count(500), FeeTier::High);
    }

    #[test]
    fn test_gas_increases_with_tier() {
        assert!(FeeTier::Low.gas() < FeeTier::Medium.gas());
        assert!(FeeTier::Medium.gas() < FeeTier::High.gas());
    }

    #[test]
    fn test_tier_fee() {
        assert_eq!(FeeTier::for_move_count(25).fee(), Fee::Std(StdFee::gas(250_000)));
        assert_eq!(FeeTier::High.to_string(), "high (300000 gas)");
    }
}
