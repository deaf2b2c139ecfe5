use euchre_core::model::card::{Card, TRUMP_COUNT};
use euchre_core::model::deck::{DECK_SIZE, Deck, HAND_SIZE, KITTY_SIZE};
use euchre_core::model::suit::Suit;
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::collections::{BTreeSet, HashSet};

#[test]
fn trump_powers_are_distinct_and_above_side_cards() {
    let deck = Deck::standard();
    for trump in Suit::ALL {
        let trump_powers: BTreeSet<u8> = deck
            .cards()
            .iter()
            .filter(|card| card.is_trump(trump))
            .map(|card| card.power(trump))
            .collect();
        assert_eq!(trump_powers.len(), TRUMP_COUNT);
        assert_eq!(trump_powers, (6..=12).collect());

        for suit in Suit::ALL {
            let side: Vec<u8> = deck
                .cards()
                .iter()
                .filter(|card| card.suit == suit && !card.is_trump(trump))
                .map(|card| card.power(trump))
                .collect();
            let distinct: HashSet<u8> = side.iter().copied().collect();
            assert_eq!(distinct.len(), side.len());
            assert!(side.iter().all(|power| *power < 6));
        }
    }
}

#[test]
fn ladder_lists_every_trump_once() {
    for trump in Suit::ALL {
        let ladder = Card::trump_cards(trump);
        assert!(ladder.iter().all(|card| card.is_trump(trump)));
        let unique: HashSet<Card> = ladder.iter().copied().collect();
        assert_eq!(unique.len(), TRUMP_COUNT);
        assert!(ladder[0].is_right_bower(trump));
        assert!(ladder[1].is_left_bower(trump));
    }
}

#[test]
fn shuffled_deals_place_every_card_once() {
    let mut rng = StdRng::seed_from_u64(20251017);
    for _ in 0..200 {
        let deal = Deck::shuffled(&mut rng).deal();
        let mut seen = HashSet::new();
        for hand in &deal.hands {
            assert_eq!(hand.len(), HAND_SIZE);
            for card in hand.iter() {
                assert!(seen.insert(*card));
            }
        }
        assert_eq!(deal.kitty.len(), KITTY_SIZE);
        for card in deal.kitty {
            assert!(seen.insert(card));
        }
        assert!(seen.insert(deal.up_card));
        assert_eq!(seen.len(), DECK_SIZE);
    }
}

#[test]
fn seeded_shuffles_repeat() {
    assert_eq!(
        Deck::shuffled_with_seed(5).cards(),
        Deck::shuffled_with_seed(5).cards()
    );
}
