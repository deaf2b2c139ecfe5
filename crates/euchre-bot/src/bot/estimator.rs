use euchre_core::model::card::Card;
use euchre_core::model::deck::HAND_SIZE;
use euchre_core::model::hand::Hand;
use euchre_core::model::rank::Rank;
use euchre_core::model::suit::Suit;
use euchre_core::model::view::CardView;

/// Tallies the estimator reads off a hand viewed under a candidate trump.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HandCounters {
    pub trump: u8,
    /// Aces outside the trump suit.
    pub side_ace: u8,
    /// Distinct non-trump suits held. Each missing suit is a chance to ruff.
    pub off_suit: u8,
}

impl HandCounters {
    pub fn count(view: &[CardView], trump: Suit) -> Self {
        let mut counters = HandCounters::default();
        let mut suits_seen = [false; 4];
        for card in view {
            if card.suit() == trump {
                counters.trump += 1;
            } else {
                suits_seen[card.suit().index()] = true;
                if card.rank() == Rank::Ace {
                    counters.side_ace += 1;
                }
            }
        }
        counters.off_suit = suits_seen.iter().filter(|seen| **seen).count() as u8;
        counters
    }

    /// No trump, or exactly one trump per side suit: nothing left to reconcile.
    fn is_degenerate(&self) -> bool {
        self.trump == 0 || self.off_suit == self.trump
    }
}

/// Expected tricks for `hand` if `candidate` becomes trump.
///
/// The dealer is evaluated on the hand it would hold after taking `up_card`;
/// `hand` itself is never modified. Held trump are matched against the trump
/// ladder (right bower, left bower, then 9 through Ace): each held card that
/// is at least as strong as the next unclaimed ladder card counts as a winner
/// and consumes two ladder slots, one for itself and one for the card it
/// beats. The lowest trump are set aside, one per side suit held, as ruffing
/// material. The result is clamped to a full round of tricks.
pub fn estimate_winners(hand: &Hand, candidate: Suit, up_card: Card, is_dealer: bool) -> u8 {
    let mut working = hand.clone();
    if is_dealer {
        working.pick_up_card(up_card);
    }
    let view = working.view(candidate);
    let counters = HandCounters::count(&view, candidate);

    if counters.is_degenerate() {
        return counters.side_ace + counters.trump;
    }

    let winners = trump_winners(&view, candidate, counters);
    (counters.side_ace + winners + counters.off_suit).min(HAND_SIZE as u8)
}

fn trump_winners(view: &[CardView], candidate: Suit, counters: HandCounters) -> u8 {
    let ladder = Card::trump_cards(candidate);
    let held = view.len() as isize;
    let trump = isize::from(counters.trump);
    let off_suit = isize::from(counters.off_suit);

    // Trump sort to the top of the view, so the window never dips below them.
    let mut worst = (held - 1 - (trump - off_suit)).max(held - trump);
    let mut best = held - 1;
    let mut next = 0usize;
    let mut winners = 0u8;

    while next < ladder.len() && worst <= best {
        if ladder[next].power(candidate) <= view[best as usize].power() {
            winners += 1;
            best -= 1;
            next += 2;
        } else {
            worst += 1;
            next += 1;
        }
    }
    winners
}

#[cfg(test)]
mod tests {
    use super::{HandCounters, estimate_winners};
    use euchre_core::model::card::Card;
    use euchre_core::model::hand::Hand;
    use euchre_core::model::suit::Suit;

    fn hand(cards: &[&str]) -> Hand {
        Hand::with_cards(cards.iter().map(|c| c.parse::<Card>().unwrap()).collect())
    }

    fn card(text: &str) -> Card {
        text.parse().unwrap()
    }

    #[test]
    fn counters_use_effective_suits() {
        let h = hand(&["JD", "9H", "AS", "AC", "KC"]);
        let counters = HandCounters::count(&h.view(Suit::Hearts), Suit::Hearts);
        assert_eq!(
            counters,
            HandCounters {
                trump: 2,
                side_ace: 2,
                off_suit: 2,
            }
        );
    }

    #[test]
    fn no_trump_counts_side_aces_only() {
        let h = hand(&["AC", "9S", "10S", "JS", "QS"]);
        assert_eq!(estimate_winners(&h, Suit::Hearts, card("AH"), false), 1);
    }

    #[test]
    fn one_trump_per_side_suit_short_circuits() {
        let h = hand(&["9C", "10C", "9S", "10S", "10H"]);
        assert_eq!(estimate_winners(&h, Suit::Clubs, card("9H"), false), 2);
        assert_eq!(estimate_winners(&h, Suit::Diamonds, card("9H"), false), 0);
    }

    #[test]
    fn strong_trump_hand_is_clamped_to_five() {
        let h = hand(&["JH", "JD", "AH", "KH", "AS"]);
        assert_eq!(estimate_winners(&h, Suit::Hearts, card("9H"), false), 5);
    }

    #[test]
    fn lone_bower_with_two_side_suits() {
        let h = hand(&["KS", "AS", "9D", "10D", "JD"]);
        assert_eq!(estimate_winners(&h, Suit::Hearts, card("AH"), false), 3);
    }

    #[test]
    fn dealer_estimate_includes_up_card_without_touching_hand() {
        let h = hand(&["9C", "10C", "JC", "QC", "KC"]);
        let before = h.clone();
        let as_dealer = estimate_winners(&h, Suit::Hearts, card("AH"), true);
        let as_seat = estimate_winners(&h, Suit::Hearts, card("AH"), false);
        assert_eq!(h, before);
        assert_eq!(as_seat, 0);
        assert_eq!(as_dealer, 1);
    }
}
