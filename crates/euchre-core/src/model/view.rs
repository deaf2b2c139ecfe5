use crate::model::card::Card;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::fmt;
use std::hash::{Hash, Hasher};

/// A card seen through a fixed trump suit.
///
/// Equality and hashing only consider the physical card, so two views of the
/// same card compare equal whatever trump they were built under.
#[derive(Debug, Clone, Copy)]
pub struct CardView {
    card: Card,
    suit: Suit,
    power: u8,
    position: Option<usize>,
}

impl CardView {
    /// View of a card still in hand at raw position `position`.
    pub fn in_hand(card: Card, position: usize, trump: Suit) -> Self {
        Self::build(card, Some(position), trump)
    }

    /// View of a card already on the table.
    pub fn played(card: Card, trump: Suit) -> Self {
        Self::build(card, None, trump)
    }

    fn build(card: Card, position: Option<usize>, trump: Suit) -> Self {
        Self {
            card,
            suit: card.effective_suit(trump),
            power: card.power(trump),
            position,
        }
    }

    pub fn card(&self) -> Card {
        self.card
    }

    pub fn rank(&self) -> Rank {
        self.card.rank
    }

    pub fn raw_suit(&self) -> Suit {
        self.card.suit
    }

    /// Effective suit: the trump suit for trump cards, the printed suit otherwise.
    pub fn suit(&self) -> Suit {
        self.suit
    }

    pub fn power(&self) -> u8 {
        self.power
    }

    pub fn position(&self) -> Option<usize> {
        self.position
    }

    pub fn is_trump(&self, trump: Suit) -> bool {
        self.suit == trump
    }

    pub fn is_view_of(&self, card: Card) -> bool {
        self.card == card
    }
}

impl PartialEq for CardView {
    fn eq(&self, other: &Self) -> bool {
        self.card == other.card
    }
}

impl Eq for CardView {}

impl Hash for CardView {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.card.hash(state);
    }
}

impl fmt::Display for CardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.card, f)
    }
}
