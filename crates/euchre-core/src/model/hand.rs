use crate::model::card::Card;
use crate::model::suit::Suit;
use crate::model::view::CardView;
use core::fmt;

/// A player's cards, always kept in canonical (suit, rank) order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Hand {
    cards: Vec<Card>,
}

impl Hand {
    pub fn new() -> Self {
        Self { cards: Vec::new() }
    }

    pub fn with_cards(cards: Vec<Card>) -> Self {
        let mut hand = Self { cards };
        hand.sort();
        hand
    }

    pub fn contains(&self, card: Card) -> bool {
        self.cards.contains(&card)
    }

    pub fn position_of(&self, card: Card) -> Option<usize> {
        self.cards.iter().position(|&c| c == card)
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Views under `trump`, weakest first. Equal powers keep canonical order.
    pub fn view(&self, trump: Suit) -> Vec<CardView> {
        let mut views: Vec<CardView> = self
            .cards
            .iter()
            .enumerate()
            .map(|(position, &card)| CardView::in_hand(card, position, trump))
            .collect();
        views.sort_by_key(CardView::power);
        views
    }

    /// Swaps the weakest card (judged under the up-card's suit) for `up_card`
    /// and returns the discard.
    pub fn pick_up_card(&mut self, up_card: Card) -> Option<Card> {
        let discard = self
            .view(up_card.suit)
            .first()
            .and_then(CardView::position)
            .map(|position| std::mem::replace(&mut self.cards[position], up_card));
        if discard.is_none() {
            self.cards.push(up_card);
        }
        self.sort();
        discard
    }

    /// Removes the card at raw position `position`.
    pub fn play(&mut self, position: usize) -> Option<Card> {
        if position < self.cards.len() {
            Some(self.cards.remove(position))
        } else {
            None
        }
    }

    fn sort(&mut self) {
        self.cards.sort();
    }
}

impl fmt::Display for Hand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[")?;
        for (idx, card) in self.cards.iter().enumerate() {
            if idx > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{card}")?;
        }
        f.write_str("]")
    }
}
