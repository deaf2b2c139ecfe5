use crate::policy::{BidContext, HeuristicPolicy, Policy, PolicyContext};
use euchre_core::game::record::RoundRecord;
use euchre_core::model::bid::{Bid, ScoreDelta};
use euchre_core::model::bidding::{BidError, BiddingState, BiddingStatus};
use euchre_core::model::card::Card;
use euchre_core::model::deck::{Deal, Deck};
use euchre_core::model::player::PlayerPosition;
use euchre_core::model::round::{PlayError, PlayOutcome, RoundState};
use rand::Rng;
use thiserror::Error;
use tracing::{Level, event};

#[derive(Debug, Error)]
pub enum TableError {
    #[error("bidding failed: {0}")]
    Bid(#[from] BidError),
    #[error("{seat} made an illegal play: {source}")]
    Play {
        seat: PlayerPosition,
        #[source]
        source: PlayError,
    },
    #[error("{seat} had no card to play")]
    EmptyHand { seat: PlayerPosition },
    #[error("round finished without a score")]
    Unscored,
}

/// Everything that happened in one dealt round.
#[derive(Debug, Clone)]
pub struct RoundResult {
    pub trick_counts: [u8; 2],
    pub bid: Bid,
    pub score_delta: ScoreDelta,
    pub record: RoundRecord,
    /// Card the dealer discarded after taking the up-card, if it was ordered up.
    pub discard: Option<Card>,
    /// Every card in the order it hit the table.
    pub plays: Vec<(PlayerPosition, Card)>,
}

impl RoundResult {
    pub fn plays_by(&self, seat: PlayerPosition) -> Vec<Card> {
        self.plays
            .iter()
            .filter(|(player, _)| *player == seat)
            .map(|(_, card)| *card)
            .collect()
    }
}

/// Four seats, each driven by its own policy, indexed by seat.
pub struct Table {
    policies: [Box<dyn Policy>; 4],
}

impl Table {
    pub fn new(policies: [Box<dyn Policy>; 4]) -> Self {
        Self { policies }
    }

    pub fn heuristic() -> Self {
        Self::new(std::array::from_fn(|_| {
            Box::new(HeuristicPolicy::new()) as Box<dyn Policy>
        }))
    }

    /// Shuffles a fresh deck from `rng` and plays it out.
    pub fn run_round<R: Rng + ?Sized>(
        &mut self,
        dealer: PlayerPosition,
        rng: &mut R,
    ) -> Result<RoundResult, TableError> {
        let deal = Deck::shuffled(rng).deal();
        self.play_round(deal, dealer)
    }

    /// Runs the auction and all five tricks for `deal`.
    pub fn play_round(
        &mut self,
        deal: Deal,
        dealer: PlayerPosition,
    ) -> Result<RoundResult, TableError> {
        let dealt = deal.hands.clone();
        let mut hands = deal.hands;
        let up_card = deal.up_card;

        let mut bidding = BiddingState::new(dealer, up_card);
        let bid = loop {
            let seat = bidding.current_player();
            let ctx = BidContext {
                seat,
                hand: &hands[seat.index()],
                up_card,
                dealer,
                phase: bidding.phase(),
            };
            let call = self.policies[seat.index()].choose_call(&ctx);
            if let BiddingStatus::Called(bid) = bidding.apply(seat, call)? {
                break bid;
            }
        };

        let discard = if bidding.dealer_picks_up() {
            hands[dealer.index()].pick_up_card(up_card)
        } else {
            None
        };

        let mut round = RoundState::new(hands, dealer, bid);
        let mut plays = Vec::with_capacity(20);
        while !round.is_complete() {
            let seat = round.expected_seat();
            let position = self.policies[seat.index()]
                .choose_play(&PolicyContext {
                    seat,
                    round: &round,
                })
                .ok_or(TableError::EmptyHand { seat })?;
            let outcome = round
                .play_card(seat, position)
                .map_err(|source| TableError::Play { seat, source })?;
            match outcome {
                PlayOutcome::Played(card) => plays.push((seat, card)),
                PlayOutcome::TrickCompleted { card, winner } => {
                    plays.push((seat, card));
                    event!(
                        target: "euchre_bot::table",
                        Level::DEBUG,
                        trick = round.tricks_completed(),
                        winner = %winner,
                    );
                }
            }
        }

        let score_delta = round.score().ok_or(TableError::Unscored)?;
        let trick_counts = round.tricks();
        let record = RoundRecord::new(&dealt, dealer, up_card, bid, trick_counts, score_delta);

        event!(
            target: "euchre_bot::table",
            Level::DEBUG,
            dealer = %dealer,
            caller = %bid.caller,
            trump = %bid.trump,
            tricks_ns = trick_counts[0],
            tricks_ew = trick_counts[1],
            outcome = ?score_delta.outcome,
            points = score_delta.points,
        );

        Ok(RoundResult {
            trick_counts,
            bid,
            score_delta,
            record,
            discard,
            plays,
        })
    }
}
