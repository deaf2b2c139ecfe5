use euchre_core::model::card::Card;
use euchre_core::model::player::PlayerPosition;
use euchre_core::model::round::RoundState;
use euchre_core::model::suit::Suit;
use euchre_core::model::trick::TrickState;
use euchre_core::model::view::CardView;

/// Branch of the play policy that produced a choice. Logged with each play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayReason {
    LastCard,
    /// Calling side leads the highest trump still out.
    LeadBossTrump,
    LeadHighSide,
    /// Only trump left to lead.
    LeadLowTrump,
    UnderPartner,
    BeatInSuit,
    DumpInSuit,
    TrumpIn,
    Discard,
}

impl PlayReason {
    pub const fn as_str(self) -> &'static str {
        match self {
            PlayReason::LastCard => "last_card",
            PlayReason::LeadBossTrump => "lead_boss_trump",
            PlayReason::LeadHighSide => "lead_high_side",
            PlayReason::LeadLowTrump => "lead_low_trump",
            PlayReason::UnderPartner => "under_partner",
            PlayReason::BeatInSuit => "beat_in_suit",
            PlayReason::DumpInSuit => "dump_in_suit",
            PlayReason::TrumpIn => "trump_in",
            PlayReason::Discard => "discard",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayChoice {
    /// Index into the seat's raw (canonically sorted) hand.
    pub position: usize,
    pub card: Card,
    pub reason: PlayReason,
}

impl PlayChoice {
    fn from_view(view: &CardView, reason: PlayReason) -> Self {
        Self {
            position: view.position().unwrap_or_default(),
            card: view.card(),
            reason,
        }
    }
}

/// Raw hand position of the card `seat` plays next, or `None` when its hand
/// is empty.
pub fn select_card(seat: PlayerPosition, round: &RoundState) -> Option<usize> {
    choose_card(seat, round).map(|choice| choice.position)
}

/// Picks the card for `seat`, or `None` when its hand is empty.
pub fn choose_card(seat: PlayerPosition, round: &RoundState) -> Option<PlayChoice> {
    let hand = round.hand(seat);
    if hand.len() == 1 {
        let card = *hand.cards().first()?;
        return Some(PlayChoice {
            position: 0,
            card,
            reason: PlayReason::LastCard,
        });
    }

    let trump = round.trump();
    let view = hand.view(trump);
    let weakest = view.first()?;
    let trick = round.current_trick();

    if trick.is_empty() {
        Some(lead(seat, round, &view, weakest, trump))
    } else {
        Some(follow(trick, &view, weakest, trump))
    }
}

fn lead(
    seat: PlayerPosition,
    round: &RoundState,
    view: &[CardView],
    weakest: &CardView,
    trump: Suit,
) -> PlayChoice {
    if round.bid().bidding_team() == seat.team() {
        let boss = view.last().filter(|best| {
            best.is_trump(trump) && round.highest_unseen_trump_power() == Some(best.power())
        });
        if let Some(best) = boss {
            return PlayChoice::from_view(best, PlayReason::LeadBossTrump);
        }
    }

    match view.iter().rev().find(|card| !card.is_trump(trump)) {
        Some(side) => PlayChoice::from_view(side, PlayReason::LeadHighSide),
        None => PlayChoice::from_view(weakest, PlayReason::LeadLowTrump),
    }
}

fn follow(trick: &TrickState, view: &[CardView], weakest: &CardView, trump: Suit) -> PlayChoice {
    let in_suit: Vec<&CardView> = view
        .iter()
        .filter(|card| Some(card.suit()) == trick.suit_led())
        .collect();
    let winning_power = trick
        .current_winner()
        .map(|(_, card)| card.power())
        .unwrap_or_default();

    if trick.partner_is_winning() {
        return match in_suit.first() {
            Some(low) => PlayChoice::from_view(low, PlayReason::UnderPartner),
            None => PlayChoice::from_view(weakest, PlayReason::Discard),
        };
    }

    if let Some(low) = in_suit.first() {
        return match in_suit.iter().find(|card| card.power() > winning_power) {
            Some(winner) => PlayChoice::from_view(winner, PlayReason::BeatInSuit),
            None => PlayChoice::from_view(low, PlayReason::DumpInSuit),
        };
    }

    view.iter()
        .filter(|card| card.is_trump(trump))
        .find(|card| card.power() > winning_power)
        .map(|ruff| PlayChoice::from_view(ruff, PlayReason::TrumpIn))
        .unwrap_or_else(|| PlayChoice::from_view(weakest, PlayReason::Discard))
}

#[cfg(test)]
mod tests {
    use super::{PlayReason, choose_card, select_card};
    use euchre_core::model::bid::Bid;
    use euchre_core::model::card::Card;
    use euchre_core::model::hand::Hand;
    use euchre_core::model::player::PlayerPosition;
    use euchre_core::model::round::RoundState;
    use euchre_core::model::suit::Suit;

    fn hand(cards: &[&str]) -> Hand {
        Hand::with_cards(cards.iter().map(|c| c.parse::<Card>().unwrap()).collect())
    }

    fn card(text: &str) -> Card {
        text.parse().unwrap()
    }

    fn round(hands: [&[&str]; 4], caller: PlayerPosition, trump: Suit) -> RoundState {
        RoundState::new(
            hands.map(hand),
            PlayerPosition::North,
            Bid::new(caller, trump),
        )
    }

    fn play(round: &mut RoundState, seat: PlayerPosition, text: &str) {
        let position = round.hand(seat).position_of(card(text)).unwrap();
        round.play_card(seat, position).unwrap();
    }

    #[test]
    fn caller_leads_boss_trump() {
        let r = round(
            [
                &["9C", "10C", "JC", "QC", "KC"],
                &["JH", "AC", "9S", "10S", "KD"],
                &["KS", "AS", "9D", "10D", "JD"],
                &["QD", "AD", "9H", "10H", "QS"],
            ],
            PlayerPosition::East,
            Suit::Hearts,
        );
        let choice = choose_card(PlayerPosition::East, &r).unwrap();
        assert_eq!(choice.card, card("JH"));
        assert_eq!(choice.reason, PlayReason::LeadBossTrump);
    }

    #[test]
    fn caller_without_boss_leads_high_side_card() {
        let r = round(
            [
                &["9C", "10C", "JC", "QC", "KC"],
                &["AH", "AC", "9S", "10S", "KD"],
                &["KS", "AS", "9D", "10D", "JD"],
                &["QD", "AD", "9H", "10H", "QS"],
            ],
            PlayerPosition::East,
            Suit::Hearts,
        );
        let choice = choose_card(PlayerPosition::East, &r).unwrap();
        assert_eq!(choice.card, card("AC"));
        assert_eq!(choice.reason, PlayReason::LeadHighSide);
    }

    #[test]
    fn all_trump_leads_weakest() {
        let r = round(
            [
                &["9C", "10C", "JC", "QC", "KC"],
                &["9H", "10H", "QH", "KH", "AH"],
                &["KS", "AS", "9D", "10D", "JD"],
                &["QD", "AD", "JH", "AC", "QS"],
            ],
            PlayerPosition::North,
            Suit::Hearts,
        );
        let choice = choose_card(PlayerPosition::East, &r).unwrap();
        assert_eq!(choice.card, card("9H"));
        assert_eq!(choice.reason, PlayReason::LeadLowTrump);
    }

    #[test]
    fn follower_does_not_overtake_partner() {
        let mut r = round(
            [
                &["9C", "10C", "JC", "QC", "AH"],
                &["AC", "9S", "10S", "JS", "QS"],
                &["KC", "AS", "9D", "10D", "JD"],
                &["QD", "KD", "AD", "9H", "10H"],
            ],
            PlayerPosition::South,
            Suit::Hearts,
        );
        play(&mut r, PlayerPosition::East, "AC");
        play(&mut r, PlayerPosition::South, "KC");
        // West holds no clubs; East's ace is winning.
        let choice = choose_card(PlayerPosition::West, &r).unwrap();
        assert_eq!(choice.card, card("QD"));
        assert_eq!(choice.reason, PlayReason::Discard);
    }

    #[test]
    fn opponent_winning_is_beaten_cheaply() {
        let mut r = round(
            [
                &["9C", "10C", "JC", "QC", "AH"],
                &["AC", "9S", "10S", "JS", "QS"],
                &["KC", "AS", "9D", "10D", "JD"],
                &["QD", "KD", "AD", "9H", "10H"],
            ],
            PlayerPosition::South,
            Suit::Hearts,
        );
        play(&mut r, PlayerPosition::East, "9S");
        let choice = choose_card(PlayerPosition::South, &r).unwrap();
        assert_eq!(choice.card, card("AS"));
        assert_eq!(choice.reason, PlayReason::BeatInSuit);
    }

    #[test]
    fn void_follower_trumps_with_cheapest_winner() {
        let mut r = round(
            [
                &["9C", "10C", "JC", "QC", "AH"],
                &["AC", "9S", "10S", "JS", "QS"],
                &["KC", "AS", "9D", "10D", "JD"],
                &["QD", "KD", "AD", "9H", "10H"],
            ],
            PlayerPosition::South,
            Suit::Hearts,
        );
        play(&mut r, PlayerPosition::East, "QS");
        play(&mut r, PlayerPosition::South, "AS");
        let choice = choose_card(PlayerPosition::West, &r).unwrap();
        assert_eq!(choice.card, card("9H"));
        assert_eq!(choice.reason, PlayReason::TrumpIn);
    }

    #[test]
    fn losing_follower_dumps_lowest_in_suit() {
        let mut r = round(
            [
                &["9C", "10C", "JC", "QC", "AH"],
                &["AC", "9S", "10S", "JS", "QS"],
                &["KC", "AS", "9D", "10D", "JD"],
                &["QD", "KD", "AD", "9H", "10H"],
            ],
            PlayerPosition::South,
            Suit::Hearts,
        );
        play(&mut r, PlayerPosition::East, "AC");
        let choice = choose_card(PlayerPosition::South, &r).unwrap();
        assert_eq!(choice.card, card("KC"));
        assert_eq!(choice.reason, PlayReason::DumpInSuit);
    }

    #[test]
    fn selected_position_is_always_in_bounds() {
        let mut r = round(
            [
                &["9C", "10C", "JC", "QC", "AH"],
                &["AC", "9S", "10S", "JS", "QS"],
                &["KC", "AS", "9D", "10D", "JD"],
                &["QD", "KD", "AD", "9H", "10H"],
            ],
            PlayerPosition::South,
            Suit::Hearts,
        );
        while !r.is_complete() {
            let seat = r.expected_seat();
            let before = r.hand(seat).len();
            let position = select_card(seat, &r).unwrap();
            assert!(position < before);
            r.play_card(seat, position).unwrap();
            assert_eq!(r.hand(seat).len(), before - 1);
        }
        let tricks = r.tricks();
        assert_eq!(tricks[0] + tricks[1], 5);
    }

    #[test]
    fn empty_hand_has_no_card_to_select() {
        let mut r = round(
            [
                &["9C", "10C", "JC", "QC", "AH"],
                &["AC", "9S", "10S", "JS", "QS"],
                &["KC", "AS", "9D", "10D", "JD"],
                &["QD", "KD", "AD", "9H", "10H"],
            ],
            PlayerPosition::South,
            Suit::Hearts,
        );
        while !r.is_complete() {
            let seat = r.expected_seat();
            let position = select_card(seat, &r).unwrap();
            r.play_card(seat, position).unwrap();
        }
        for seat in PlayerPosition::LOOP {
            assert!(r.hand(seat).is_empty());
            assert_eq!(select_card(seat, &r), None);
            assert_eq!(choose_card(seat, &r), None);
        }
    }
}
