//! Giveaway leaderboard data.

use serde::{Deserialize, Serialize};

/// Number of places shown on the leaderboard.
pub const LEADERBOARD_SIZE: usize = 25;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Winner {
    pub id: String,
    pub rank: u32,
    /// Masked wallet address.
    pub wallet: String,
    pub points: Option<u32>,
    pub prize: Option<String>,
}

const MOCK_WALLETS: [&str; LEADERBOARD_SIZE] = [
    "0x1234567890abcdef1234567890abcdef12345678",
    "0xabcdef1234567890abcdef1234567890abcdef12",
    "0x9876543210fedcba9876543210fedcba98765432",
    "0x1111222233334444555566667777888899990000",
    "0xaaaabbbbccccddddeeeeffffaaaabbbbccccdddd",
    "0x5555666677778888999900001111222233334444",
    "0x2222333344445555666677778888999900001111",
    "0x7777888899990000111122223333444455556666",
    "0x3333444455556666777788889999000011112222",
    "0x8888999900001111222233334444555566667777",
    "0x4444555566667777888899990000111122223333",
    "0x9999000011112222333344445555666677778888",
    "0x0000111122223333444455556666777788889999",
    "0x6666777788889999000011112222333344445555",
    "0x1111000022223333444455556666777788889999",
    "0xaaaa1111bbbb2222cccc3333dddd4444eeee5555",
    "0x5555eeee4444dddd3333cccc2222bbbb1111aaaa",
    "0x9999888877776666555544443333222211110000",
    "0x1234abcd5678efgh9012ijkl3456mnop78901234",
    "0xfedcba9876543210fedcba9876543210fedcba98",
    "0x1a2b3c4d5e6f7a8b9c0d1e2f3a4b5c6d7e8f9a0b",
    "0xdeadbeefcafebabe1234567890abcdef12345678",
    "0x0123456789abcdef0123456789abcdef01234567",
    "0xffffeeeeddddccccbbbbaaaa9999888877776666",
    "0x1111aaaa2222bbbb3333cccc4444dddd5555eeee",
];

/// Hides the middle of a wallet address.
///
/// Keeps the first and last four characters. A full 42 character address
/// gets seven stars in between; short addresses are returned unchanged.
pub fn mask_wallet(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 8 {
        return address.to_string();
    }
    let start: String = chars[..4].iter().collect();
    let end: String = chars[chars.len() - 4..].iter().collect();
    let stars = "*".repeat(chars.len().saturating_sub(35));
    format!("{start}{stars}{end}")
}

fn mock_prize(rank: u32) -> &'static str {
    match rank {
        1 => "1 ETH",
        2 => "iPhone 17 Pro Max",
        3 => "Asterium merch box",
        4..=10 => "Asterium card + 100 HUMO",
        _ => "50 HUMO",
    }
}

/// Placeholder leaderboard shown until the draw results are published.
pub fn mock_winners() -> Vec<Winner> {
    (1u32..)
        .zip(MOCK_WALLETS)
        .map(|(rank, wallet)| Winner {
            id: rank.to_string(),
            rank,
            wallet: mask_wallet(wallet),
            points: Some(5000 - (rank - 1) * 120),
            prize: Some(mock_prize(rank).to_string()),
        })
        .collect()
}

/// The first `n` winners, fewer if the list is shorter.
pub fn top(winners: &[Winner], n: usize) -> &[Winner] {
    &winners[..n.min(winners.len())]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_full_address() {
        assert_eq!(
            mask_wallet("0x1234567890abcdef1234567890abcdef12345678"),
            "0x12*******5678"
        );
    }

    #[test]
    fn test_mask_short_addresses() {
        assert_eq!(mask_wallet("0x1234"), "0x1234");
        assert_eq!(mask_wallet("0x123456"), "0x123456");
        // Too short for any stars, but still trimmed to the edges.
        assert_eq!(mask_wallet("0x12345678"), "0x125678");
    }

    #[test]
    fn test_mock_leaderboard() {
        let winners = mock_winners();
        assert_eq!(winners.len(), LEADERBOARD_SIZE);

        let first = &winners[0];
        assert_eq!(first.rank, 1);
        assert_eq!(first.points, Some(5000));
        assert_eq!(first.prize.as_deref(), Some("1 ETH"));
        assert_eq!(first.wallet, "0x12*******5678");

        assert_eq!(winners[9].prize.as_deref(), Some("Asterium card + 100 HUMO"));
        assert_eq!(winners[10].prize.as_deref(), Some("50 HUMO"));
        assert_eq!(winners[24].points, Some(5000 - 24 * 120));
        // Masking does not care whether the address is real hex.
        assert_eq!(winners[18].wallet, "0x12*******1234");
    }

    #[test]
    fn test_top() {
        let winners = mock_winners();
        assert_eq!(top(&winners, 3).len(), 3);
        assert_eq!(top(&winners, 100).len(), LEADERBOARD_SIZE);
        assert!(top(&[], 5).is_empty());
    }
}
