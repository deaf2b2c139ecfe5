use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::array;

pub const DECK_SIZE: usize = 24;
pub const HAND_SIZE: usize = 5;
pub const KITTY_SIZE: usize = 3;

#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
}

/// Result of dealing one deck: a hand per seat index, the face-up card and
/// the face-down remainder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deal {
    pub hands: [Hand; 4],
    pub up_card: Card,
    pub kitty: [Card; KITTY_SIZE],
}

impl Deck {
    pub fn standard() -> Self {
        let mut cards = Vec::with_capacity(DECK_SIZE);
        for suit in Suit::ALL.iter().copied() {
            for rank in Rank::ORDERED.iter().copied() {
                cards.push(Card::new(rank, suit));
            }
        }
        Self { cards }
    }

    pub fn shuffled<R: rand::Rng + ?Sized>(rng: &mut R) -> Self {
        let mut deck = Self::standard();
        deck.shuffle_in_place(rng);
        deck
    }

    pub fn shuffled_with_seed(seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        Self::shuffled(&mut rng)
    }

    pub fn shuffle_in_place<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.shuffle(rng);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Seat `i` receives cards `5i..5i+5`; the last card is turned up and the
    /// three before it form the kitty.
    pub fn deal(&self) -> Deal {
        let hands = array::from_fn(|seat| {
            let start = seat * HAND_SIZE;
            Hand::with_cards(self.cards[start..start + HAND_SIZE].to_vec())
        });
        let dealt = 4 * HAND_SIZE;
        let kitty = array::from_fn(|idx| self.cards[dealt + idx]);
        Deal {
            hands,
            up_card: self.cards[DECK_SIZE - 1],
            kitty,
        }
    }
}
