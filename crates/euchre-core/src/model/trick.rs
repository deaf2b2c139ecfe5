use crate::model::card::Card;
use crate::model::player::PlayerPosition;
use crate::model::suit::Suit;
use crate::model::view::CardView;
use std::fmt;

/// Cards on the table for the trick in progress.
#[derive(Debug, Clone)]
pub struct TrickState {
    leader: PlayerPosition,
    trump: Suit,
    suit_led: Option<Suit>,
    cards: Vec<CardView>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrickError {
    TrickComplete,
    OutOfTurn {
        expected: PlayerPosition,
        actual: PlayerPosition,
    },
}

impl fmt::Display for TrickError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrickError::TrickComplete => write!(f, "trick already complete"),
            TrickError::OutOfTurn { expected, actual } => {
                write!(f, "expected {expected} to play next but got {actual}")
            }
        }
    }
}

impl std::error::Error for TrickError {}

impl TrickState {
    pub fn new(leader: PlayerPosition, trump: Suit) -> Self {
        Self {
            leader,
            trump,
            suit_led: None,
            cards: Vec::with_capacity(4),
        }
    }

    pub fn leader(&self) -> PlayerPosition {
        self.leader
    }

    pub fn trump(&self) -> Suit {
        self.trump
    }

    /// Effective suit of the first card played.
    pub fn suit_led(&self) -> Option<Suit> {
        self.suit_led
    }

    pub fn cards_in_play(&self) -> &[CardView] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.cards.len() == 4
    }

    pub fn expected_position(&self) -> PlayerPosition {
        self.leader.advance(self.cards.len())
    }

    /// Seat that played the card at `index` within this trick.
    pub fn seat_at(&self, index: usize) -> PlayerPosition {
        self.leader.advance(index)
    }

    pub fn play(&mut self, position: PlayerPosition, card: Card) -> Result<(), TrickError> {
        if self.is_complete() {
            return Err(TrickError::TrickComplete);
        }

        let expected = self.expected_position();
        if expected != position {
            return Err(TrickError::OutOfTurn {
                expected,
                actual: position,
            });
        }

        let view = CardView::played(card, self.trump);
        if self.cards.is_empty() {
            self.suit_led = Some(view.suit());
        }
        self.cards.push(view);
        Ok(())
    }

    /// Index (relative to the leader) and view of the card currently winning.
    /// Only trump and cards of the suit led can win.
    pub fn current_winner(&self) -> Option<(usize, &CardView)> {
        let suit_led = self.suit_led?;
        self.cards
            .iter()
            .enumerate()
            .filter(|(_, view)| view.suit() == self.trump || view.suit() == suit_led)
            .max_by_key(|(_, view)| view.power())
    }

    pub fn winning_seat(&self) -> Option<PlayerPosition> {
        self.current_winner().map(|(index, _)| self.seat_at(index))
    }

    /// Whether the next seat to play sees its partner holding the trick.
    pub fn partner_is_winning(&self) -> bool {
        self.current_winner()
            .is_some_and(|(index, _)| self.cards.len() % 2 == index % 2)
    }

    pub fn plays(&self) -> impl Iterator<Item = (PlayerPosition, Card)> + '_ {
        self.cards
            .iter()
            .enumerate()
            .map(|(index, view)| (self.seat_at(index), view.card()))
    }
}
