use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[repr(u8)]
pub enum Rank {
    Nine = 0,
    Ten = 1,
    Jack = 2,
    Queen = 3,
    King = 4,
    Ace = 5,
}

impl Rank {
    pub const ORDERED: [Rank; 6] = [
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
        Rank::Ace,
    ];

    pub const fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Rank::Nine),
            1 => Some(Rank::Ten),
            2 => Some(Rank::Jack),
            3 => Some(Rank::Queen),
            4 => Some(Rank::King),
            5 => Some(Rank::Ace),
            _ => None,
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "9" => Some(Rank::Nine),
            "10" | "X" | "T" => Some(Rank::Ten),
            "J" => Some(Rank::Jack),
            "Q" => Some(Rank::Queen),
            "K" => Some(Rank::King),
            "A" => Some(Rank::Ace),
            _ => None,
        }
    }

    /// Base strength of the rank before any trump adjustment.
    pub const fn index(self) -> u8 {
        self as u8
    }

    pub const fn is_honor(self) -> bool {
        matches!(self, Rank::Queen | Rank::King | Rank::Ace)
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        };
        f.write_str(text)
    }
}
