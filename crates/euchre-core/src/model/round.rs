use crate::model::bid::{Bid, ScoreDelta, TRICKS_PER_ROUND};
use crate::model::card::Card;
use crate::model::deck::Deck;
use crate::model::hand::Hand;
use crate::model::player::{PlayerPosition, Team};
use crate::model::suit::Suit;
use crate::model::trick::{TrickError, TrickState};
use std::collections::BTreeSet;
use std::fmt;

/// State of one five-trick round once trump is fixed.
#[derive(Debug, Clone)]
pub struct RoundState {
    hands: [Hand; 4],
    dealer: PlayerPosition,
    bid: Bid,
    tricks: [u8; 2],
    current_trick: TrickState,
    trick_history: Vec<TrickState>,
    unseen: BTreeSet<Card>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    Played(Card),
    TrickCompleted { card: Card, winner: PlayerPosition },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayError {
    RoundComplete,
    OutOfTurn {
        expected: PlayerPosition,
        actual: PlayerPosition,
    },
    PositionOutOfRange {
        seat: PlayerPosition,
        position: usize,
        hand_size: usize,
    },
    MustFollowSuit(Suit),
    Trick(TrickError),
}

impl fmt::Display for PlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlayError::RoundComplete => write!(f, "all five tricks have been played"),
            PlayError::OutOfTurn { expected, actual } => {
                write!(f, "expected {expected} to play next but got {actual}")
            }
            PlayError::PositionOutOfRange {
                seat,
                position,
                hand_size,
            } => write!(
                f,
                "{seat} has {hand_size} cards; position {position} is out of range"
            ),
            PlayError::MustFollowSuit(suit) => write!(f, "must follow {suit}"),
            PlayError::Trick(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for PlayError {}

impl RoundState {
    /// Starts play with `hands` as they stand after bidding (dealer pickup
    /// already applied). The seat left of the dealer leads.
    pub fn new(hands: [Hand; 4], dealer: PlayerPosition, bid: Bid) -> Self {
        Self {
            hands,
            dealer,
            bid,
            tricks: [0; 2],
            current_trick: TrickState::new(dealer.next(), bid.trump),
            trick_history: Vec::with_capacity(TRICKS_PER_ROUND as usize),
            unseen: Deck::standard().cards().iter().copied().collect(),
        }
    }

    pub fn hand(&self, seat: PlayerPosition) -> &Hand {
        &self.hands[seat.index()]
    }

    pub fn dealer(&self) -> PlayerPosition {
        self.dealer
    }

    pub fn bid(&self) -> Bid {
        self.bid
    }

    pub fn trump(&self) -> Suit {
        self.bid.trump
    }

    /// Tricks taken so far, indexed by [`Team::index`].
    pub fn tricks(&self) -> [u8; 2] {
        self.tricks
    }

    pub fn tricks_for(&self, team: Team) -> u8 {
        self.tricks[team.index()]
    }

    pub fn current_trick(&self) -> &TrickState {
        &self.current_trick
    }

    pub fn trick_history(&self) -> &[TrickState] {
        &self.trick_history
    }

    pub fn tricks_completed(&self) -> usize {
        self.trick_history.len()
    }

    pub fn is_complete(&self) -> bool {
        self.trick_history.len() == TRICKS_PER_ROUND as usize
    }

    pub fn expected_seat(&self) -> PlayerPosition {
        self.current_trick.expected_position()
    }

    /// Cards nobody has played yet this round.
    pub fn unseen_cards(&self) -> impl Iterator<Item = &Card> {
        self.unseen.iter()
    }

    pub fn is_unseen(&self, card: Card) -> bool {
        self.unseen.contains(&card)
    }

    /// Power of the strongest trump that has not been played.
    pub fn highest_unseen_trump_power(&self) -> Option<u8> {
        let trump = self.trump();
        self.unseen
            .iter()
            .filter(|card| card.is_trump(trump))
            .map(|card| card.power(trump))
            .max()
    }

    /// Plays the card at raw position `position` of `seat`'s hand.
    pub fn play_card(
        &mut self,
        seat: PlayerPosition,
        position: usize,
    ) -> Result<PlayOutcome, PlayError> {
        if self.is_complete() {
            return Err(PlayError::RoundComplete);
        }

        let expected = self.expected_seat();
        if expected != seat {
            return Err(PlayError::OutOfTurn {
                expected,
                actual: seat,
            });
        }

        let hand = &self.hands[seat.index()];
        let card = *hand
            .cards()
            .get(position)
            .ok_or(PlayError::PositionOutOfRange {
                seat,
                position,
                hand_size: hand.len(),
            })?;

        let trump = self.trump();
        if let Some(suit_led) = self.current_trick.suit_led() {
            let can_follow = hand.iter().any(|c| c.effective_suit(trump) == suit_led);
            if can_follow && card.effective_suit(trump) != suit_led {
                return Err(PlayError::MustFollowSuit(suit_led));
            }
        }

        self.current_trick
            .play(seat, card)
            .map_err(PlayError::Trick)?;
        self.hands[seat.index()].play(position);
        self.unseen.remove(&card);

        if !self.current_trick.is_complete() {
            return Ok(PlayOutcome::Played(card));
        }

        let winner = self
            .current_trick
            .winning_seat()
            .unwrap_or(self.current_trick.leader());
        self.tricks[winner.team().index()] += 1;
        let finished = std::mem::replace(&mut self.current_trick, TrickState::new(winner, trump));
        self.trick_history.push(finished);
        Ok(PlayOutcome::TrickCompleted { card, winner })
    }

    /// Score change once all five tricks are played.
    pub fn score(&self) -> Option<ScoreDelta> {
        self.is_complete().then(|| self.bid.score(self.tricks))
    }
}
