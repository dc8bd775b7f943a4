//! Teams and per-team data storage.
//!
//! ## Team
//!
//! Breakthrough has exactly two sides. The Attacker starts on the top row
//! (row `N`) and moves toward row 1; the Defender starts on row 1 and moves
//! toward row `N`. Player 1 always plays the Attacker.
//!
//! ## TeamMap
//!
//! Fixed two-slot storage indexed by `Team`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// One of the two sides.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Team {
    Attacker,
    Defender,
}

impl Team {
    /// Both teams, Attacker first (the order of play).
    pub const ALL: [Team; 2] = [Team::Attacker, Team::Defender];

    /// The other team.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Team::Attacker => Team::Defender,
            Team::Defender => Team::Attacker,
        }
    }

    /// Row delta of one forward step.
    #[must_use]
    pub const fn forward(self) -> isize {
        match self {
            Team::Attacker => -1,
            Team::Defender => 1,
        }
    }

    /// Row the team's pieces start on.
    #[must_use]
    pub const fn home_row(self, size: usize) -> usize {
        match self {
            Team::Attacker => size,
            Team::Defender => 1,
        }
    }

    /// Row a piece must reach to win.
    #[must_use]
    pub const fn goal_row(self, size: usize) -> usize {
        self.opponent().home_row(size)
    }

    /// Single-character board marker.
    #[must_use]
    pub const fn marker(self) -> char {
        match self {
            Team::Attacker => 'X',
            Team::Defender => 'O',
        }
    }

    /// 1-based player number (Attacker is player 1).
    #[must_use]
    pub const fn player_number(self) -> u8 {
        match self {
            Team::Attacker => 1,
            Team::Defender => 2,
        }
    }

    const fn index(self) -> usize {
        match self {
            Team::Attacker => 0,
            Team::Defender => 1,
        }
    }
}

impl std::fmt::Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Team::Attacker => write!(f, "Attacker"),
            Team::Defender => write!(f, "Defender"),
        }
    }
}

/// Per-team data storage with O(1) access.
///
/// ```
/// use breakthrough::core::{Team, TeamMap};
///
/// let mut captures: TeamMap<u32> = TeamMap::default();
/// captures[Team::Defender] += 1;
/// assert_eq!(captures[Team::Attacker], 0);
/// assert_eq!(captures[Team::Defender], 1);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TeamMap<T> {
    data: [T; 2],
}

impl<T> Index<Team> for TeamMap<T> {
    type Output = T;

    fn index(&self, team: Team) -> &Self::Output {
        &self.data[team.index()]
    }
}

impl<T> IndexMut<Team> for TeamMap<T> {
    fn index_mut(&mut self, team: Team) -> &mut Self::Output {
        &mut self.data[team.index()]
    }
}
