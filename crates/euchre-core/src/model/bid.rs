use crate::model::player::{PlayerPosition, Team};
use crate::model::suit::Suit;
use serde::{Deserialize, Serialize};

/// Tricks the calling team needs to make its bid.
pub const TRICKS_TO_MAKE: u8 = 3;
pub const TRICKS_PER_ROUND: u8 = 5;

/// The call that fixed trump for a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Bid {
    pub caller: PlayerPosition,
    pub trump: Suit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BidOutcome {
    /// Calling team took fewer than three tricks.
    Euchred,
    Made,
    /// Calling team took all five tricks.
    March,
}

/// Points awarded to one team at the end of a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoreDelta {
    pub team: Team,
    pub points: u8,
    pub outcome: BidOutcome,
}

impl Bid {
    pub const fn new(caller: PlayerPosition, trump: Suit) -> Self {
        Self { caller, trump }
    }

    pub const fn bidding_team(&self) -> Team {
        self.caller.team()
    }

    /// Score change given the per-team trick counts (indexed by [`Team::index`]).
    pub fn score(&self, tricks: [u8; 2]) -> ScoreDelta {
        let team = self.bidding_team();
        let taken = tricks[team.index()];
        if taken < TRICKS_TO_MAKE {
            ScoreDelta {
                team: team.other(),
                points: 2,
                outcome: BidOutcome::Euchred,
            }
        } else if taken == TRICKS_PER_ROUND {
            ScoreDelta {
                team,
                points: 2,
                outcome: BidOutcome::March,
            }
        } else {
            ScoreDelta {
                team,
                points: 1,
                outcome: BidOutcome::Made,
            }
        }
    }
}

impl ScoreDelta {
    /// Points seen from `team`'s side: positive when it scored, negative otherwise.
    pub fn signed_for(&self, team: Team) -> i8 {
        let points = self.points as i8;
        if self.team == team { points } else { -points }
    }
}
