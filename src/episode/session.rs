//! Multi-episode sessions.
//!
//! A session plays a configured number of episodes back-to-back, each on a
//! fresh board, and keeps a running win/loss tally per side. The tally is
//! the only state that outlives an episode.
//!
//! Episode `i` always draws from `GameRng::new(seed).derive(i)`, so a
//! session's results depend only on its config, not on how episodes are
//! scheduled. `run_parallel` relies on this to spread episodes over worker
//! threads.

use std::ops::Index;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};
use std::thread;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::controller::{EpisodeController, EpisodeRecord};
use crate::core::{GameRng, SessionConfig, Team, TeamMap};
use crate::error::Result;
use crate::strategy::Strategy;

/// Win/loss counters for one side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    pub wins: u64,
    pub losses: u64,
}

/// Running session counters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    sides: TeamMap<Record>,
    episodes: u64,
    stalemates: u64,
    total_plies: u64,
}

impl Tally {
    /// Count a finished episode: a win for the winner, a loss for the other.
    pub fn record(&mut self, episode: &EpisodeRecord) {
        self.sides[episode.winner].wins += 1;
        self.sides[episode.winner.opponent()].losses += 1;
        self.episodes += 1;
        self.total_plies += episode.plies as u64;
        if episode.termination.is_stalemate() {
            self.stalemates += 1;
        }
    }

    /// Add another tally's counts into this one.
    pub fn merge(&mut self, other: &Tally) {
        for team in Team::ALL {
            self.sides[team].wins += other.sides[team].wins;
            self.sides[team].losses += other.sides[team].losses;
        }
        self.episodes += other.episodes;
        self.stalemates += other.stalemates;
        self.total_plies += other.total_plies;
    }

    #[must_use]
    pub fn wins(&self, team: Team) -> u64 {
        self.sides[team].wins
    }

    #[must_use]
    pub fn losses(&self, team: Team) -> u64 {
        self.sides[team].losses
    }

    #[must_use]
    pub fn episodes(&self) -> u64 {
        self.episodes
    }

    /// Episodes that ended because a side could not move.
    #[must_use]
    pub fn stalemates(&self) -> u64 {
        self.stalemates
    }

    #[must_use]
    pub fn total_plies(&self) -> u64 {
        self.total_plies
    }

    /// Average episode length, or 0 before any episode.
    #[must_use]
    pub fn mean_plies(&self) -> f64 {
        if self.episodes == 0 {
            0.0
        } else {
            self.total_plies as f64 / self.episodes as f64
        }
    }

    /// The one-line player 1 report printed at the end of a session.
    ///
    /// ```
    /// use breakthrough::episode::Tally;
    ///
    /// let tally = Tally::default();
    /// assert_eq!(tally.summary_line(), "Player 1 number of Wins: 0, Loses: 0");
    /// ```
    #[must_use]
    pub fn summary_line(&self) -> String {
        format!(
            "Player {} number of Wins: {}, Loses: {}",
            Team::Attacker.player_number(),
            self.wins(Team::Attacker),
            self.losses(Team::Attacker)
        )
    }
}

impl Index<Team> for Tally {
    type Output = Record;

    fn index(&self, team: Team) -> &Self::Output {
        &self.sides[team]
    }
}

/// Runs the episodes of a session and owns its tally.
#[derive(Clone, Debug)]
pub struct SessionRunner {
    config: SessionConfig,
    tally: Tally,
}

impl SessionRunner {
    /// Create a runner. Fails if the config does not validate.
    pub fn new(config: SessionConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            tally: Tally::default(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Counts accumulated so far.
    #[must_use]
    pub fn tally(&self) -> &Tally {
        &self.tally
    }

    /// Play episode `index` of this session without recording it.
    pub fn play_episode(
        &self,
        index: u64,
        attacker: &mut dyn Strategy,
        defender: &mut dyn Strategy,
    ) -> Result<EpisodeRecord> {
        let mut rng = GameRng::new(self.config.seed).derive(index);
        EpisodeController::new(self.config.board_size)?.run(attacker, defender, &mut rng)
    }

    /// Play every episode in order with the given strategies.
    pub fn run(
        &mut self,
        attacker: &mut dyn Strategy,
        defender: &mut dyn Strategy,
    ) -> Result<&Tally> {
        info!(
            episodes = self.config.episodes,
            board_size = self.config.board_size,
            seed = self.config.seed,
            attacker = attacker.name(),
            defender = defender.name(),
            "starting session"
        );

        for index in 0..self.config.episodes {
            let record = self.play_episode(index as u64, attacker, defender)?;
            self.tally.record(&record);
        }

        self.log_finished();
        Ok(&self.tally)
    }

    /// Play every episode across `config.threads` worker threads.
    ///
    /// Each episode gets its own board, its own RNG stream, and a fresh pair
    /// of strategies from `factory`. Results are merged into the tally as
    /// episodes finish.
    pub fn run_parallel<F>(&mut self, factory: F) -> Result<&Tally>
    where
        F: Fn(Team) -> Box<dyn Strategy> + Sync,
    {
        let episodes = self.config.episodes;
        let threads = self.config.threads.clamp(1, episodes.max(1));
        info!(
            episodes,
            threads,
            board_size = self.config.board_size,
            seed = self.config.seed,
            "starting parallel session"
        );

        let next = AtomicUsize::new(0);
        let shared = Mutex::new(Tally::default());
        let this = &*self;

        thread::scope(|s| {
            let workers: Vec<_> = (0..threads)
                .map(|_| {
                    s.spawn(|| -> Result<()> {
                        loop {
                            let index = next.fetch_add(1, Ordering::Relaxed);
                            if index >= episodes {
                                return Ok(());
                            }
                            let mut attacker = factory(Team::Attacker);
                            let mut defender = factory(Team::Defender);
                            let record =
                                this.play_episode(index as u64, attacker.as_mut(), defender.as_mut())?;
                            shared
                                .lock()
                                .unwrap_or_else(PoisonError::into_inner)
                                .record(&record);
                        }
                    })
                })
                .collect();

            workers
                .into_iter()
                .map(|worker| worker.join().unwrap_or_else(|panic| std::panic::resume_unwind(panic)))
                .collect::<Result<Vec<()>>>()
        })?;

        let finished = shared.into_inner().unwrap_or_else(PoisonError::into_inner);
        self.tally.merge(&finished);

        self.log_finished();
        Ok(&self.tally)
    }

    fn log_finished(&self) {
        info!(
            episodes = self.tally.episodes(),
            attacker_wins = self.tally.wins(Team::Attacker),
            defender_wins = self.tally.wins(Team::Defender),
            stalemates = self.tally.stalemates(),
            mean_plies = self.tally.mean_plies(),
            "session finished"
        );
    }
}
