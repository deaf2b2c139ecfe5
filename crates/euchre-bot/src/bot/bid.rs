use super::estimator::estimate_winners;
use euchre_core::model::card::Card;
use euchre_core::model::hand::Hand;
use euchre_core::model::player::PlayerPosition;
use euchre_core::model::suit::Suit;

/// Estimated tricks needed before a seat names trump voluntarily.
pub const CALL_THRESHOLD: u8 = 3;

/// Bidding decision for `seat`.
///
/// With `choose_suit` unset the seat may only order up the up-card's suit.
/// Once the up-card is turned down every other suit is estimated in
/// [`Suit::ALL`] order and only a strictly better estimate replaces the
/// current pick, so ties go to the suit evaluated first. The dealer always
/// names its best suit in that phase.
pub fn decide_to_call(
    seat: PlayerPosition,
    hand: &Hand,
    up_card: Card,
    dealer: PlayerPosition,
    choose_suit: bool,
) -> Option<Suit> {
    let is_dealer = seat == dealer;

    if !choose_suit {
        let estimate = estimate_winners(hand, up_card.suit, up_card, is_dealer);
        return (estimate >= CALL_THRESHOLD).then_some(up_card.suit);
    }

    let mut best: Option<(u8, Suit)> = None;
    for suit in Suit::ALL.iter().copied().filter(|s| *s != up_card.suit) {
        let estimate = estimate_winners(hand, suit, up_card, is_dealer);
        if best.is_none_or(|(top, _)| estimate > top) {
            best = Some((estimate, suit));
        }
    }

    best.filter(|(estimate, _)| is_dealer || *estimate >= CALL_THRESHOLD)
        .map(|(_, suit)| suit)
}
