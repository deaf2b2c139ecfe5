use super::{BidContext, Policy, PolicyContext};
use crate::bot::{PlayChoice, choose_card, decide_to_call, estimate_winners};
use euchre_core::model::suit::Suit;
use tracing::{Level, event};

/// Plays the trick-estimate bidding rule and the rule-based card policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicPolicy;

impl HeuristicPolicy {
    pub fn new() -> Self {
        Self
    }
}

impl Policy for HeuristicPolicy {
    fn choose_call(&mut self, ctx: &BidContext) -> Option<Suit> {
        let call = decide_to_call(
            ctx.seat,
            ctx.hand,
            ctx.up_card,
            ctx.dealer,
            ctx.choose_suit(),
        );
        log_bid_decision(ctx, call);
        call
    }

    fn choose_play(&mut self, ctx: &PolicyContext) -> Option<usize> {
        let choice = choose_card(ctx.seat, ctx.round)?;
        log_play_decision(ctx, &choice);
        Some(choice.position)
    }
}

fn log_bid_decision(ctx: &BidContext, call: Option<Suit>) {
    if !tracing::enabled!(Level::INFO) {
        return;
    }

    let estimates = Suit::ALL
        .iter()
        .map(|suit| {
            let estimate = estimate_winners(ctx.hand, *suit, ctx.up_card, ctx.is_dealer());
            format!("{}={estimate}", suit.symbol())
        })
        .collect::<Vec<_>>()
        .join(",");
    let call = call.map_or_else(|| "pass".to_string(), |suit| suit.to_string());

    event!(
        target: "euchre_bot::bid",
        Level::INFO,
        seat = %ctx.seat,
        dealer = %ctx.dealer,
        phase = ?ctx.phase,
        up_card = %ctx.up_card,
        hand = %ctx.hand,
        estimates = %estimates,
        call = %call,
    );
}

fn log_play_decision(ctx: &PolicyContext, choice: &PlayChoice) {
    if !tracing::enabled!(Level::INFO) {
        return;
    }

    let trick = ctx.round.current_trick();
    event!(
        target: "euchre_bot::play",
        Level::INFO,
        seat = %ctx.seat,
        trump = %ctx.round.trump(),
        hand = %ctx.hand(),
        trick_cards = trick.len(),
        chosen = %choice.card,
        position = choice.position,
        reason = choice.reason.as_str(),
    );
}
