use euchre_bot::{Table, TableError};
use euchre_core::game::match_state::MatchState;
use euchre_core::game::record::RoundRecord;
use euchre_core::model::player::{PlayerPosition, Team};
use tracing::{Level, event};

/// One finished game, with its rounds in the order they were played.
#[derive(Debug, Clone)]
pub struct GameOutcome {
    pub index: usize,
    pub seed: u64,
    pub winner: Team,
    pub scores: [u32; 2],
    pub rounds: Vec<RoundRecord>,
}

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("game {index} (seed {seed}): {source}")]
    Table {
        index: usize,
        seed: u64,
        #[source]
        source: TableError,
    },
    #[error("game {index} (seed {seed}) stopped without a winner")]
    NoWinner { index: usize, seed: u64 },
}

/// Plays a full game to `target_score` with four heuristic seats. North
/// deals first; everything random comes from `seed`.
pub fn play_game(index: usize, seed: u64, target_score: u32) -> Result<GameOutcome, GameError> {
    let mut state = MatchState::with_seed_and_target(PlayerPosition::North, seed, target_score);
    let mut table = Table::heuristic();
    let mut rounds = Vec::new();

    while !state.has_winner() {
        let dealer = state.dealer();
        let deal = state.deal_round();
        let result = table
            .play_round(deal, dealer)
            .map_err(|source| GameError::Table {
                index,
                seed,
                source,
            })?;
        state.finish_round(result.score_delta);
        rounds.push(result.record);
    }

    let winner = state.winner().ok_or(GameError::NoWinner { index, seed })?;
    let scores = state.scores();

    event!(
        target: "euchre_bench::game",
        Level::INFO,
        game = index,
        seed,
        rounds = rounds.len(),
        winner = %winner,
        score_ns = scores[Team::NorthSouth.index()],
        score_ew = scores[Team::EastWest.index()],
    );

    Ok(GameOutcome {
        index,
        seed,
        winner,
        scores,
        rounds,
    })
}
