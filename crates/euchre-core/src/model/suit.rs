use core::fmt;
use serde::{Deserialize, Serialize};

/// Suits ordered by their integer code (clubs, spades, diamonds, hearts).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Suit {
    Clubs = 1,
    Spades = 2,
    Diamonds = 4,
    Hearts = 8,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Clubs, Suit::Spades, Suit::Diamonds, Suit::Hearts];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Suit::Clubs),
            1 => Some(Suit::Spades),
            2 => Some(Suit::Diamonds),
            3 => Some(Suit::Hearts),
            _ => None,
        }
    }

    pub const fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'C' | 'c' => Some(Suit::Clubs),
            'S' | 's' => Some(Suit::Spades),
            'D' | 'd' => Some(Suit::Diamonds),
            'H' | 'h' => Some(Suit::Hearts),
            _ => None,
        }
    }

    pub const fn code(self) -> u8 {
        self as u8
    }

    /// Position within [`Suit::ALL`].
    pub const fn index(self) -> usize {
        match self {
            Suit::Clubs => 0,
            Suit::Spades => 1,
            Suit::Diamonds => 2,
            Suit::Hearts => 3,
        }
    }

    /// The other suit of the same colour; its Jack becomes the left bower.
    pub const fn same_color(self) -> Suit {
        match self {
            Suit::Clubs => Suit::Spades,
            Suit::Spades => Suit::Clubs,
            Suit::Diamonds => Suit::Hearts,
            Suit::Hearts => Suit::Diamonds,
        }
    }

    pub const fn is_black(self) -> bool {
        matches!(self, Suit::Clubs | Suit::Spades)
    }

    pub const fn symbol(self) -> char {
        match self {
            Suit::Clubs => 'C',
            Suit::Spades => 'S',
            Suit::Diamonds => 'D',
            Suit::Hearts => 'H',
        }
    }
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
