use crate::model::bid::Bid;
use crate::model::card::Card;
use crate::model::player::PlayerPosition;
use crate::model::suit::Suit;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BidPhase {
    /// Seats may order up the up-card's suit.
    TurnUp,
    /// Up-card turned down; seats may name any other suit.
    ChooseSuit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BiddingStatus {
    Pending,
    Called(Bid),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BidError {
    OutOfTurn {
        expected: PlayerPosition,
        actual: PlayerPosition,
    },
    WrongSuit {
        called: Suit,
        up_card: Card,
    },
    TurnedDownSuit(Suit),
    DealerMustCall(PlayerPosition),
    AlreadyCalled,
}

impl fmt::Display for BidError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BidError::OutOfTurn { expected, actual } => {
                write!(f, "expected {expected} to bid next but got {actual}")
            }
            BidError::WrongSuit { called, up_card } => {
                write!(f, "only {} may be ordered up on {up_card}, not {called}", up_card.suit)
            }
            BidError::TurnedDownSuit(suit) => {
                write!(f, "{suit} was turned down and cannot be named")
            }
            BidError::DealerMustCall(dealer) => {
                write!(f, "dealer {dealer} passed with no trump named")
            }
            BidError::AlreadyCalled => write!(f, "trump has already been called"),
        }
    }
}

impl std::error::Error for BidError {}

/// Two-phase round-robin auction starting left of the dealer.
#[derive(Debug, Clone)]
pub struct BiddingState {
    dealer: PlayerPosition,
    up_card: Card,
    phase: BidPhase,
    current: PlayerPosition,
    passes: u8,
    bid: Option<Bid>,
}

impl BiddingState {
    pub fn new(dealer: PlayerPosition, up_card: Card) -> Self {
        Self {
            dealer,
            up_card,
            phase: BidPhase::TurnUp,
            current: dealer.next(),
            passes: 0,
            bid: None,
        }
    }

    pub fn dealer(&self) -> PlayerPosition {
        self.dealer
    }

    pub fn up_card(&self) -> Card {
        self.up_card
    }

    pub fn phase(&self) -> BidPhase {
        self.phase
    }

    pub fn current_player(&self) -> PlayerPosition {
        self.current
    }

    pub fn bid(&self) -> Option<Bid> {
        self.bid
    }

    /// The dealer takes the up-card only when it was ordered up.
    pub fn dealer_picks_up(&self) -> bool {
        self.bid.is_some() && self.phase == BidPhase::TurnUp
    }

    pub fn apply(
        &mut self,
        seat: PlayerPosition,
        call: Option<Suit>,
    ) -> Result<BiddingStatus, BidError> {
        if self.bid.is_some() {
            return Err(BidError::AlreadyCalled);
        }
        if seat != self.current {
            return Err(BidError::OutOfTurn {
                expected: self.current,
                actual: seat,
            });
        }

        match (self.phase, call) {
            (BidPhase::TurnUp, Some(suit)) if suit != self.up_card.suit => {
                Err(BidError::WrongSuit {
                    called: suit,
                    up_card: self.up_card,
                })
            }
            (BidPhase::ChooseSuit, Some(suit)) if suit == self.up_card.suit => {
                Err(BidError::TurnedDownSuit(suit))
            }
            (BidPhase::ChooseSuit, None) if seat == self.dealer => {
                Err(BidError::DealerMustCall(seat))
            }
            (_, Some(suit)) => {
                let bid = Bid::new(seat, suit);
                self.bid = Some(bid);
                Ok(BiddingStatus::Called(bid))
            }
            (_, None) => {
                self.passes += 1;
                if self.phase == BidPhase::TurnUp && self.passes == 4 {
                    self.phase = BidPhase::ChooseSuit;
                    self.passes = 0;
                }
                self.current = self.current.next();
                Ok(BiddingStatus::Pending)
            }
        }
    }
}
