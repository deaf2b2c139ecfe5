mod heuristic;

pub use heuristic::HeuristicPolicy;

use euchre_core::model::bidding::BidPhase;
use euchre_core::model::card::Card;
use euchre_core::model::hand::Hand;
use euchre_core::model::player::PlayerPosition;
use euchre_core::model::round::RoundState;
use euchre_core::model::suit::Suit;

/// What a seat sees when it is asked to bid.
#[derive(Debug, Clone, Copy)]
pub struct BidContext<'a> {
    pub seat: PlayerPosition,
    pub hand: &'a Hand,
    pub up_card: Card,
    pub dealer: PlayerPosition,
    pub phase: BidPhase,
}

impl BidContext<'_> {
    pub fn is_dealer(&self) -> bool {
        self.seat == self.dealer
    }

    /// True once the up-card has been turned down.
    pub fn choose_suit(&self) -> bool {
        self.phase == BidPhase::ChooseSuit
    }
}

/// What a seat sees when it is asked to play.
#[derive(Debug, Clone, Copy)]
pub struct PolicyContext<'a> {
    pub seat: PlayerPosition,
    pub round: &'a RoundState,
}

impl<'a> PolicyContext<'a> {
    pub fn hand(&self) -> &'a Hand {
        self.round.hand(self.seat)
    }
}

/// Decision interface for one seat at the table.
pub trait Policy: Send {
    /// Suit to name, or `None` to pass.
    fn choose_call(&mut self, ctx: &BidContext) -> Option<Suit>;

    /// Raw position in the seat's hand of the card to play. `None` means the
    /// policy has nothing to play, which the table treats as fatal.
    fn choose_play(&mut self, ctx: &PolicyContext) -> Option<usize>;
}
