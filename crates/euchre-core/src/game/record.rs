use crate::model::bid::{Bid, BidOutcome, ScoreDelta};
use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::player::{PlayerPosition, Team};
use crate::model::suit::Suit;
use serde::{Deserialize, Serialize};
use std::array;

/// Snapshot of one finished round, keyed by seat offsets from the dealer so
/// rounds with different dealers line up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub dealer: PlayerPosition,
    /// Hands as dealt, before any pickup. Index 0 sits left of the dealer,
    /// index 3 is the dealer.
    pub hands: [Vec<Card>; 4],
    pub up_card: Card,
    pub caller: PlayerPosition,
    pub caller_offset: usize,
    pub trump: Suit,
    /// Tricks taken, indexed by [`Team::index`].
    pub tricks: [u8; 2],
    pub scoring_team: Team,
    pub points: u8,
    pub outcome: BidOutcome,
    /// Positive when the calling team scored.
    pub signed_score: i8,
    pub power_signature: Vec<u8>,
}

impl RoundRecord {
    pub fn new(
        dealt: &[Hand; 4],
        dealer: PlayerPosition,
        up_card: Card,
        bid: Bid,
        tricks: [u8; 2],
        delta: ScoreDelta,
    ) -> Self {
        let hands = array::from_fn(|offset| {
            let seat = dealer.advance(offset + 1);
            dealt[seat.index()].cards().to_vec()
        });
        Self {
            dealer,
            hands,
            up_card,
            caller: bid.caller,
            caller_offset: bid.caller.offset_from_dealer(dealer),
            trump: bid.trump,
            tricks,
            scoring_team: delta.team,
            points: delta.points,
            outcome: delta.outcome,
            signed_score: delta.signed_for(bid.bidding_team()),
            power_signature: power_signature(&dealt[bid.caller.index()], bid.trump),
        }
    }

    pub fn caller_hand(&self) -> &[Card] {
        &self.hands[self.caller_offset]
    }

    pub fn to_json_line(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

/// Powers of `hand` under `trump`, strongest first.
pub fn power_signature(hand: &Hand, trump: Suit) -> Vec<u8> {
    let mut powers: Vec<u8> = hand.iter().map(|card| card.power(trump)).collect();
    powers.sort_unstable_by(|a, b| b.cmp(a));
    powers
}
