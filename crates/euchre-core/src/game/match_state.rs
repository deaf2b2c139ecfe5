use crate::model::bid::ScoreDelta;
use crate::model::deck::{Deal, Deck};
use crate::model::player::{PlayerPosition, Team};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Points a team needs to take the game.
pub const TARGET_SCORE: u32 = 10;

/// One game to [`TARGET_SCORE`]: team totals, the rotating dealer and the
/// seeded RNG every deal draws from.
#[derive(Debug, Clone)]
pub struct MatchState {
    scores: [u32; 2],
    target_score: u32,
    dealer: PlayerPosition,
    round_number: u32,
    rng: StdRng,
    seed: u64,
}

impl MatchState {
    pub fn new(dealer: PlayerPosition) -> Self {
        let seed: u64 = rand::random();
        Self::with_seed(dealer, seed)
    }

    pub fn with_seed(dealer: PlayerPosition, seed: u64) -> Self {
        Self::with_seed_and_target(dealer, seed, TARGET_SCORE)
    }

    pub fn with_seed_and_target(dealer: PlayerPosition, seed: u64, target_score: u32) -> Self {
        Self {
            scores: [0; 2],
            target_score: target_score.max(1),
            dealer,
            round_number: 1,
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn dealer(&self) -> PlayerPosition {
        self.dealer
    }

    pub fn round_number(&self) -> u32 {
        self.round_number
    }

    pub fn target_score(&self) -> u32 {
        self.target_score
    }

    pub fn scores(&self) -> [u32; 2] {
        self.scores
    }

    pub fn score(&self, team: Team) -> u32 {
        self.scores[team.index()]
    }

    /// Shuffles a fresh deck from the match RNG and deals it.
    pub fn deal_round(&mut self) -> Deal {
        Deck::shuffled(&mut self.rng).deal()
    }

    /// Credits the round's points and passes the deal to the left.
    pub fn finish_round(&mut self, delta: ScoreDelta) {
        self.scores[delta.team.index()] += u32::from(delta.points);
        self.dealer = self.dealer.next();
        self.round_number += 1;
    }

    pub fn winner(&self) -> Option<Team> {
        Team::BOTH
            .iter()
            .copied()
            .find(|team| self.score(*team) >= self.target_score)
    }

    pub fn has_winner(&self) -> bool {
        self.winner().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::{MatchState, TARGET_SCORE};
    use crate::model::bid::{BidOutcome, ScoreDelta};
    use crate::model::player::{PlayerPosition, Team};

    fn delta(team: Team, points: u8) -> ScoreDelta {
        let outcome = if points == 2 {
            BidOutcome::March
        } else {
            BidOutcome::Made
        };
        ScoreDelta {
            team,
            points,
            outcome,
        }
    }

    #[test]
    fn same_seed_deals_same_rounds() {
        let mut a = MatchState::with_seed(PlayerPosition::North, 7);
        let mut b = MatchState::with_seed(PlayerPosition::North, 7);
        for _ in 0..3 {
            assert_eq!(a.deal_round(), b.deal_round());
        }
    }

    #[test]
    fn successive_deals_differ() {
        let mut state = MatchState::with_seed(PlayerPosition::North, 7);
        let first = state.deal_round();
        let second = state.deal_round();
        assert_ne!(first, second);
    }

    #[test]
    fn finish_round_rotates_dealer_and_scores() {
        let mut state = MatchState::with_seed(PlayerPosition::West, 1);
        state.finish_round(delta(Team::EastWest, 2));
        assert_eq!(state.dealer(), PlayerPosition::North);
        assert_eq!(state.round_number(), 2);
        assert_eq!(state.score(Team::EastWest), 2);
        assert_eq!(state.score(Team::NorthSouth), 0);
        assert!(!state.has_winner());
    }

    #[test]
    fn first_team_to_target_wins() {
        let mut state = MatchState::with_seed(PlayerPosition::North, 1);
        for _ in 0..TARGET_SCORE {
            state.finish_round(delta(Team::NorthSouth, 1));
        }
        assert_eq!(state.winner(), Some(Team::NorthSouth));
    }

    #[test]
    fn custom_target_is_respected() {
        let mut state = MatchState::with_seed_and_target(PlayerPosition::North, 1, 2);
        state.finish_round(delta(Team::EastWest, 2));
        assert_eq!(state.winner(), Some(Team::EastWest));
    }
}
