use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use euchre_core::game::record::RoundRecord;
use euchre_core::model::bid::BidOutcome;
use euchre_core::model::player::Team;
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal};
use thiserror::Error;

const CONFIDENCE_LEVEL: f64 = 0.95;

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("no rounds were recorded")]
    Empty,
    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("statistics failure: {0}")]
    Stats(String),
}

/// Running totals for one caller power signature.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct HandStats {
    samples: usize,
    total: i64,
}

/// Partial statistics over a set of rounds. Workers build one each and the
/// partials are merged, so the result does not depend on how rounds were
/// split between threads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalyticsCollector {
    distribution: BTreeMap<i8, usize>,
    rounds: usize,
    sum: i64,
    sum_squares: i64,
    hands: HashMap<Vec<u8>, HandStats>,
    outcomes: [usize; 3],
    calls_by_offset: [usize; 4],
    games: usize,
    game_wins: [usize; 2],
}

impl AnalyticsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_round(&mut self, record: &RoundRecord) {
        let score = record.signed_score;
        *self.distribution.entry(score).or_insert(0) += 1;
        self.rounds += 1;
        self.sum += i64::from(score);
        self.sum_squares += i64::from(score) * i64::from(score);

        let stats = self
            .hands
            .entry(record.power_signature.clone())
            .or_default();
        stats.samples += 1;
        stats.total += i64::from(score);

        self.outcomes[outcome_index(record.outcome)] += 1;
        if let Some(slot) = self.calls_by_offset.get_mut(record.caller_offset) {
            *slot += 1;
        }
    }

    pub fn record_game(&mut self, winner: Team) {
        self.games += 1;
        self.game_wins[winner.index()] += 1;
    }

    pub fn merge(mut self, other: AnalyticsCollector) -> Self {
        for (score, count) in other.distribution {
            *self.distribution.entry(score).or_insert(0) += count;
        }
        self.rounds += other.rounds;
        self.sum += other.sum;
        self.sum_squares += other.sum_squares;
        for (signature, stats) in other.hands {
            let entry = self.hands.entry(signature).or_default();
            entry.samples += stats.samples;
            entry.total += stats.total;
        }
        for (mine, theirs) in self.outcomes.iter_mut().zip(other.outcomes) {
            *mine += theirs;
        }
        for (mine, theirs) in self.calls_by_offset.iter_mut().zip(other.calls_by_offset) {
            *mine += theirs;
        }
        self.games += other.games;
        for (mine, theirs) in self.game_wins.iter_mut().zip(other.game_wins) {
            *mine += theirs;
        }
        self
    }

    pub fn rounds(&self) -> usize {
        self.rounds
    }

    /// Signed score (from the calling team's side) to number of rounds.
    pub fn distribution_of_points(&self) -> &BTreeMap<i8, usize> {
        &self.distribution
    }

    /// Mean signed score per round with a normal-approximation confidence
    /// interval.
    pub fn average_points_per_hand(&self) -> Result<PointsEstimate, AnalyticsError> {
        if self.rounds == 0 {
            return Err(AnalyticsError::Empty);
        }
        let n = self.rounds as f64;
        let mean = self.sum as f64 / n;
        if self.rounds == 1 {
            return Ok(PointsEstimate {
                mean,
                ci95: (mean, mean),
                samples: self.rounds,
            });
        }

        let variance = ((self.sum_squares as f64 - n * mean * mean) / (n - 1.0)).max(0.0);
        let std_error = (variance / n).sqrt();
        let normal = Normal::new(0.0, 1.0).map_err(|e| AnalyticsError::Stats(e.to_string()))?;
        let z = normal.inverse_cdf(1.0 - (1.0 - CONFIDENCE_LEVEL) / 2.0);
        let margin = z * std_error;
        Ok(PointsEstimate {
            mean,
            ci95: (mean - margin, mean + margin),
            samples: self.rounds,
        })
    }

    /// The `k` caller power signatures with the best mean signed score.
    /// Signatures seen fewer than `min_samples` times are skipped; ties go to
    /// the more frequent signature.
    pub fn top_hands(&self, k: usize, min_samples: usize) -> Vec<HandReport> {
        let mut reports: Vec<HandReport> = self
            .hands
            .iter()
            .filter(|(_, stats)| stats.samples >= min_samples.max(1))
            .map(|(signature, stats)| HandReport {
                power_signature: signature.clone(),
                samples: stats.samples,
                mean_score: stats.total as f64 / stats.samples as f64,
            })
            .collect();
        reports.sort_by(|a, b| {
            b.mean_score
                .total_cmp(&a.mean_score)
                .then_with(|| b.samples.cmp(&a.samples))
                .then_with(|| b.power_signature.cmp(&a.power_signature))
        });
        reports.truncate(k);
        reports
    }

    pub fn summarize(
        &self,
        top_k: usize,
        min_samples: usize,
    ) -> Result<AnalyticsSummary, AnalyticsError> {
        Ok(AnalyticsSummary {
            games: self.games,
            rounds: self.rounds,
            game_wins: self.game_wins,
            euchred: self.outcomes[outcome_index(BidOutcome::Euchred)],
            made: self.outcomes[outcome_index(BidOutcome::Made)],
            marches: self.outcomes[outcome_index(BidOutcome::March)],
            calls_by_offset: self.calls_by_offset,
            distribution: self.distribution.clone(),
            average: self.average_points_per_hand()?,
            top_hands: self.top_hands(top_k, min_samples),
        })
    }
}

fn outcome_index(outcome: BidOutcome) -> usize {
    match outcome {
        BidOutcome::Euchred => 0,
        BidOutcome::Made => 1,
        BidOutcome::March => 2,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PointsEstimate {
    pub mean: f64,
    pub ci95: (f64, f64),
    pub samples: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HandReport {
    pub power_signature: Vec<u8>,
    pub samples: usize,
    pub mean_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyticsSummary {
    pub games: usize,
    pub rounds: usize,
    pub game_wins: [usize; 2],
    pub euchred: usize,
    pub made: usize,
    pub marches: usize,
    pub calls_by_offset: [usize; 4],
    pub distribution: BTreeMap<i8, usize>,
    pub average: PointsEstimate,
    pub top_hands: Vec<HandReport>,
}

impl AnalyticsSummary {
    pub fn to_markdown(&self, run_id: &str) -> String {
        let mut out = String::new();
        out.push_str(&format!("# Simulation Summary: {run_id}\n\n"));
        out.push_str(&format!(
            "Games: {} (North/South {}, East/West {}), rounds: {}\n\n",
            self.games,
            self.game_wins[Team::NorthSouth.index()],
            self.game_wins[Team::EastWest.index()],
            self.rounds
        ));
        out.push_str(&format!(
            "Average points per hand for the calling team: {:.3} (95% CI [{:.3}, {:.3}])\n\n",
            self.average.mean, self.average.ci95.0, self.average.ci95.1
        ));
        out.push_str(&format!(
            "Outcomes: made {}, march {}, euchred {}\n\n",
            self.made, self.marches, self.euchred
        ));

        out.push_str("## Distribution of points\n\n");
        out.push_str("| Signed score | Rounds | Share |\n");
        out.push_str("|--------------|--------|-------|\n");
        for (score, count) in &self.distribution {
            out.push_str(&format!(
                "| {score:+} | {count} | {:.1}% |\n",
                percent(*count, self.rounds)
            ));
        }

        out.push_str("\n## Calls by seat\n\n");
        out.push_str("| Seat from dealer | Calls |\n");
        out.push_str("|------------------|-------|\n");
        for (offset, count) in self.calls_by_offset.iter().enumerate() {
            out.push_str(&format!("| {} | {count} |\n", offset_label(offset)));
        }

        out.push_str("\n## Top caller hands\n\n");
        out.push_str("| Power signature | Samples | Mean score |\n");
        out.push_str("|-----------------|---------|------------|\n");
        for hand in &self.top_hands {
            let signature = hand
                .power_signature
                .iter()
                .map(u8::to_string)
                .collect::<Vec<_>>()
                .join(" ");
            out.push_str(&format!(
                "| {signature} | {} | {:+.3} |\n",
                hand.samples, hand.mean_score
            ));
        }
        out
    }

    pub fn write_markdown(
        &self,
        path: impl AsRef<Path>,
        run_id: &str,
    ) -> Result<(), AnalyticsError> {
        fs::write(path.as_ref(), self.to_markdown(run_id)).map_err(|e| AnalyticsError::Io {
            context: "writing summary markdown",
            source: e,
        })
    }
}

fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        count as f64 * 100.0 / total as f64
    }
}

fn offset_label(offset: usize) -> &'static str {
    match offset {
        0 => "left of dealer",
        1 => "dealer's partner",
        2 => "right of dealer",
        _ => "dealer",
    }
}

#[cfg(test)]
mod tests {
    use super::{AnalyticsCollector, AnalyticsError};
    use euchre_core::game::record::RoundRecord;
    use euchre_core::model::bid::Bid;
    use euchre_core::model::deck::Deck;
    use euchre_core::model::player::{PlayerPosition, Team};
    use euchre_core::model::suit::Suit;

    fn record(caller: PlayerPosition, tricks: [u8; 2]) -> RoundRecord {
        let deal = Deck::standard().deal();
        let bid = Bid::new(caller, Suit::Hearts);
        RoundRecord::new(
            &deal.hands,
            PlayerPosition::North,
            deal.up_card,
            bid,
            tricks,
            bid.score(tricks),
        )
    }

    #[test]
    fn distribution_counts_signed_scores() {
        let mut collector = AnalyticsCollector::new();
        collector.record_round(&record(PlayerPosition::South, [2, 3]));
        collector.record_round(&record(PlayerPosition::South, [3, 2]));
        collector.record_round(&record(PlayerPosition::South, [5, 0]));
        collector.record_round(&record(PlayerPosition::East, [2, 3]));

        let distribution = collector.distribution_of_points();
        assert_eq!(distribution.get(&-2), Some(&1));
        assert_eq!(distribution.get(&1), Some(&2));
        assert_eq!(distribution.get(&2), Some(&1));
        assert_eq!(collector.rounds(), 4);
    }

    #[test]
    fn average_has_symmetric_interval() {
        let mut collector = AnalyticsCollector::new();
        collector.record_round(&record(PlayerPosition::South, [2, 3]));
        collector.record_round(&record(PlayerPosition::South, [5, 0]));
        let estimate = collector.average_points_per_hand().unwrap();
        assert!((estimate.mean - 0.0).abs() < 1e-9);
        assert!(estimate.ci95.0 < 0.0 && estimate.ci95.1 > 0.0);
        assert!((estimate.ci95.0 + estimate.ci95.1).abs() < 1e-9);
        // sd = 2*sqrt(2), se = 2, z ~ 1.96
        assert!((estimate.ci95.1 - 3.92).abs() < 0.01);
    }

    #[test]
    fn empty_average_is_an_error() {
        let collector = AnalyticsCollector::new();
        assert!(matches!(
            collector.average_points_per_hand(),
            Err(AnalyticsError::Empty)
        ));
    }

    #[test]
    fn merge_matches_sequential_accumulation() {
        let records = [
            record(PlayerPosition::South, [2, 3]),
            record(PlayerPosition::West, [1, 4]),
            record(PlayerPosition::North, [5, 0]),
        ];

        let mut sequential = AnalyticsCollector::new();
        for r in &records {
            sequential.record_round(r);
        }
        sequential.record_game(Team::EastWest);

        let mut left = AnalyticsCollector::new();
        left.record_round(&records[0]);
        let mut right = AnalyticsCollector::new();
        right.record_round(&records[1]);
        right.record_round(&records[2]);
        right.record_game(Team::EastWest);

        assert_eq!(left.merge(right), sequential);
    }

    #[test]
    fn top_hands_rank_by_mean_then_samples() {
        let mut collector = AnalyticsCollector::new();
        // South and North hold different hands in the unshuffled deal.
        collector.record_round(&record(PlayerPosition::South, [3, 2]));
        collector.record_round(&record(PlayerPosition::South, [5, 0]));
        collector.record_round(&record(PlayerPosition::North, [5, 0]));

        let top = collector.top_hands(5, 1);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].samples, 1);
        assert!((top[0].mean_score - 2.0).abs() < 1e-9);
        assert!((top[1].mean_score - 1.5).abs() < 1e-9);

        assert_eq!(collector.top_hands(5, 2).len(), 1);
        assert_eq!(collector.top_hands(1, 1).len(), 1);
    }

    #[test]
    fn markdown_lists_sections() {
        let mut collector = AnalyticsCollector::new();
        collector.record_round(&record(PlayerPosition::South, [2, 3]));
        collector.record_game(Team::EastWest);
        let summary = collector.summarize(3, 1).unwrap();
        let markdown = summary.to_markdown("unit");
        assert!(markdown.contains("# Simulation Summary: unit"));
        assert!(markdown.contains("| -2 | 1 | 100.0% |"));
        assert!(markdown.contains("| dealer's partner | 1 |"));
        assert!(markdown.contains("## Top caller hands"));
    }
}
