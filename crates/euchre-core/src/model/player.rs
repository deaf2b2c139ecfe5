use core::fmt;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PlayerPosition {
    North = 0,
    East = 1,
    South = 2,
    West = 3,
}

/// Partnerships: seats with the same parity play together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[repr(u8)]
pub enum Team {
    NorthSouth = 0,
    EastWest = 1,
}

impl PlayerPosition {
    pub const LOOP: [PlayerPosition; 4] = [
        PlayerPosition::North,
        PlayerPosition::East,
        PlayerPosition::South,
        PlayerPosition::West,
    ];

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(PlayerPosition::North),
            1 => Some(PlayerPosition::East),
            2 => Some(PlayerPosition::South),
            3 => Some(PlayerPosition::West),
            _ => None,
        }
    }

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn team(self) -> Team {
        match self {
            PlayerPosition::North | PlayerPosition::South => Team::NorthSouth,
            PlayerPosition::East | PlayerPosition::West => Team::EastWest,
        }
    }

    pub const fn next(self) -> PlayerPosition {
        match self {
            PlayerPosition::North => PlayerPosition::East,
            PlayerPosition::East => PlayerPosition::South,
            PlayerPosition::South => PlayerPosition::West,
            PlayerPosition::West => PlayerPosition::North,
        }
    }

    pub const fn previous(self) -> PlayerPosition {
        match self {
            PlayerPosition::North => PlayerPosition::West,
            PlayerPosition::East => PlayerPosition::North,
            PlayerPosition::South => PlayerPosition::East,
            PlayerPosition::West => PlayerPosition::South,
        }
    }

    pub const fn opposite(self) -> PlayerPosition {
        match self {
            PlayerPosition::North => PlayerPosition::South,
            PlayerPosition::East => PlayerPosition::West,
            PlayerPosition::South => PlayerPosition::North,
            PlayerPosition::West => PlayerPosition::East,
        }
    }

    /// Seat reached after `steps` moves to the left.
    pub const fn advance(self, steps: usize) -> PlayerPosition {
        match PlayerPosition::from_index((self.index() + steps) % 4) {
            Some(seat) => seat,
            None => self,
        }
    }

    /// Seats in playing order starting with `self`.
    pub const fn turn_order(self) -> [PlayerPosition; 4] {
        [self, self.advance(1), self.advance(2), self.advance(3)]
    }

    /// Distance from the dealer in bidding order: left of dealer is 0, the
    /// dealer is 3.
    pub const fn offset_from_dealer(self, dealer: PlayerPosition) -> usize {
        (self.index() + 3 - dealer.index()) % 4
    }
}

impl Team {
    pub const BOTH: [Team; 2] = [Team::NorthSouth, Team::EastWest];

    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn other(self) -> Team {
        match self {
            Team::NorthSouth => Team::EastWest,
            Team::EastWest => Team::NorthSouth,
        }
    }
}

impl fmt::Display for PlayerPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PlayerPosition::North => "North",
            PlayerPosition::East => "East",
            PlayerPosition::South => "South",
            PlayerPosition::West => "West",
        };
        f.write_str(label)
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Team::NorthSouth => "North/South",
            Team::EastWest => "East/West",
        };
        f.write_str(label)
    }
}

#[cfg(test)]
mod tests {
    use super::{PlayerPosition, Team};

    #[test]
    fn next_wraps_around() {
        assert_eq!(PlayerPosition::West.next(), PlayerPosition::North);
    }

    #[test]
    fn previous_wraps_around() {
        assert_eq!(PlayerPosition::North.previous(), PlayerPosition::West);
    }

    #[test]
    fn teams_follow_seat_parity() {
        for seat in PlayerPosition::LOOP {
            assert_eq!(seat.team().index(), seat.index() % 2);
            assert_eq!(seat.opposite().team(), seat.team());
            assert_ne!(seat.next().team(), seat.team());
        }
        assert_eq!(Team::EastWest.other(), Team::NorthSouth);
    }

    #[test]
    fn turn_order_starts_at_self() {
        assert_eq!(
            PlayerPosition::South.turn_order(),
            [
                PlayerPosition::South,
                PlayerPosition::West,
                PlayerPosition::North,
                PlayerPosition::East,
            ]
        );
    }

    #[test]
    fn dealer_offsets() {
        let dealer = PlayerPosition::North;
        assert_eq!(PlayerPosition::East.offset_from_dealer(dealer), 0);
        assert_eq!(PlayerPosition::South.offset_from_dealer(dealer), 1);
        assert_eq!(PlayerPosition::West.offset_from_dealer(dealer), 2);
        assert_eq!(dealer.offset_from_dealer(dealer), 3);
    }

    #[test]
    fn index_roundtrip() {
        for (i, seat) in PlayerPosition::LOOP.iter().enumerate() {
            assert_eq!(PlayerPosition::from_index(i), Some(*seat));
            assert_eq!(seat.index(), i);
        }
    }
}
