use crate::model::rank::Rank;
use crate::model::suit::Suit;
use core::fmt;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

const TRUMP_BONUS: u8 = 6;
const BOWER_BONUS: u8 = 3;
const RIGHT_BOWER_BONUS: u8 = 1;
const TRUMP_HONOR_PENALTY: u8 = 1;

/// Number of trump cards under any trump suit: six own ranks plus the left bower.
pub const TRUMP_COUNT: usize = 7;

/// A physical card. The derived ordering (suit code, then rank) is the
/// canonical display/sort order only; gameplay strength is [`Card::power`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(into = "String", try_from = "String")]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { suit, rank }
    }

    pub fn is_trump(self, trump: Suit) -> bool {
        self.suit == trump || self.is_left_bower(trump)
    }

    pub fn is_right_bower(self, trump: Suit) -> bool {
        self.rank == Rank::Jack && self.suit == trump
    }

    pub fn is_left_bower(self, trump: Suit) -> bool {
        self.rank == Rank::Jack && self.suit.same_color() == trump
    }

    /// Suit the card counts as once `trump` is fixed.
    pub fn effective_suit(self, trump: Suit) -> Suit {
        if self.is_trump(trump) { trump } else { self.suit }
    }

    /// Gameplay strength under `trump`. Non-trump cards keep their rank index
    /// (0..=5); trump cards map onto the distinct values 6..=12 with the right
    /// bower on top.
    pub fn power(self, trump: Suit) -> u8 {
        let mut power = self.rank.index();
        if self.is_trump(trump) {
            power += TRUMP_BONUS;
            if self.rank == Rank::Jack {
                power += BOWER_BONUS;
                if self.suit == trump {
                    power += RIGHT_BOWER_BONUS;
                }
            } else if self.rank.is_honor() {
                power -= TRUMP_HONOR_PENALTY;
            }
        }
        power
    }

    /// Every trump card under `trump`: right bower, left bower, then the
    /// remaining ranks of the suit in rank order.
    pub fn trump_cards(trump: Suit) -> [Card; TRUMP_COUNT] {
        [
            Card::new(Rank::Jack, trump),
            Card::new(Rank::Jack, trump.same_color()),
            Card::new(Rank::Nine, trump),
            Card::new(Rank::Ten, trump),
            Card::new(Rank::Queen, trump),
            Card::new(Rank::King, trump),
            Card::new(Rank::Ace, trump),
        ]
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardParseError(pub String);

impl fmt::Display for CardParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid card '{}'", self.0)
    }
}

impl std::error::Error for CardParseError {}

impl FromStr for Card {
    type Err = CardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        let suit = chars
            .next_back()
            .and_then(Suit::from_symbol)
            .ok_or_else(|| CardParseError(s.to_string()))?;
        let rank = Rank::from_symbol(&chars.as_str().to_ascii_uppercase())
            .ok_or_else(|| CardParseError(s.to_string()))?;
        Ok(Card::new(rank, suit))
    }
}

impl From<Card> for String {
    fn from(card: Card) -> Self {
        card.to_string()
    }
}

impl TryFrom<String> for Card {
    type Error = CardParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::{Card, Rank, Suit, TRUMP_COUNT};
    use std::collections::HashSet;

    fn all_cards() -> Vec<Card> {
        Suit::ALL
            .iter()
            .flat_map(|&suit| Rank::ORDERED.iter().map(move |&rank| Card::new(rank, suit)))
            .collect()
    }

    #[test]
    fn left_bower_is_trump() {
        let left = Card::new(Rank::Jack, Suit::Diamonds);
        assert!(left.is_trump(Suit::Hearts));
        assert!(left.is_left_bower(Suit::Hearts));
        assert_eq!(left.effective_suit(Suit::Hearts), Suit::Hearts);
        assert!(!left.is_trump(Suit::Spades));
        assert_eq!(left.effective_suit(Suit::Spades), Suit::Diamonds);
    }

    #[test]
    fn seven_cards_are_trump_for_each_suit() {
        for trump in Suit::ALL {
            let count = all_cards().iter().filter(|c| c.is_trump(trump)).count();
            assert_eq!(count, TRUMP_COUNT, "trump {trump}");
        }
    }

    #[test]
    fn trump_powers_are_distinct_and_above_plain_cards() {
        for trump in Suit::ALL {
            let cards = all_cards();
            let trump_powers: HashSet<u8> = cards
                .iter()
                .filter(|c| c.is_trump(trump))
                .map(|c| c.power(trump))
                .collect();
            assert_eq!(trump_powers, (6..=12).collect());

            for suit in Suit::ALL.iter().copied().filter(|&s| s != trump) {
                let plain: Vec<u8> = cards
                    .iter()
                    .filter(|c| c.suit == suit && !c.is_trump(trump))
                    .map(|c| c.power(trump))
                    .collect();
                let distinct: HashSet<u8> = plain.iter().copied().collect();
                assert_eq!(distinct.len(), plain.len());
                assert!(plain.iter().all(|&p| p <= 5));
            }
        }
    }

    #[test]
    fn bower_powers() {
        assert_eq!(Card::new(Rank::Jack, Suit::Spades).power(Suit::Spades), 12);
        assert_eq!(Card::new(Rank::Jack, Suit::Clubs).power(Suit::Spades), 11);
        assert_eq!(Card::new(Rank::Ace, Suit::Spades).power(Suit::Spades), 10);
        assert_eq!(Card::new(Rank::Queen, Suit::Spades).power(Suit::Spades), 8);
        assert_eq!(Card::new(Rank::Nine, Suit::Spades).power(Suit::Spades), 6);
        assert_eq!(Card::new(Rank::Ace, Suit::Hearts).power(Suit::Spades), 5);
    }

    #[test]
    fn trump_cards_list_order() {
        let list = Card::trump_cards(Suit::Hearts);
        let text: Vec<String> = list.iter().map(Card::to_string).collect();
        assert_eq!(text, ["JH", "JD", "9H", "10H", "QH", "KH", "AH"]);
        assert!(list.iter().all(|c| c.is_trump(Suit::Hearts)));
    }

    #[test]
    fn canonical_order_is_suit_then_rank() {
        let mut cards = vec![
            "AH".parse::<Card>().unwrap(),
            "9S".parse().unwrap(),
            "KC".parse().unwrap(),
            "10C".parse().unwrap(),
        ];
        cards.sort();
        let text: Vec<String> = cards.iter().map(Card::to_string).collect();
        assert_eq!(text, ["10C", "KC", "9S", "AH"]);
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!("ZZ".parse::<Card>().is_err());
        assert!("".parse::<Card>().is_err());
        assert_eq!("xd".parse::<Card>().unwrap(), Card::new(Rank::Ten, Suit::Diamonds));
    }

    #[test]
    fn serializes_as_compact_string() {
        let card = Card::new(Rank::Jack, Suit::Hearts);
        let json = serde_json::to_string(&card).unwrap();
        assert_eq!(json, "\"JH\"");
        let back: Card = serde_json::from_str(&json).unwrap();
        assert_eq!(back, card);
    }
}
