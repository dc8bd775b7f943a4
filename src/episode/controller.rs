//! Single-episode state machine.
//!
//! An episode starts InProgress with the Attacker to move. Each ply:
//! 1. the active team's strategy picks a move
//! 2. the move is checked against the generator and applied
//! 3. the board is re-evaluated
//! 4. the active team switches
//!
//! The episode is Terminal once a piece reaches its goal row, or when the
//! active team cannot move at all. In the second case the stuck team loses.
//!
//! Every piece moves strictly toward its goal row, so no piece moves more
//! than `N - 1` times and an episode can never exceed
//! `(N - 1) * pieces` plies. The controller enforces that bound.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::board::{BoardState, Snapshot};
use crate::core::{GameRng, GameRngState, MoveChoice, MoveRecord, Team, TeamMap};
use crate::error::{Error, Result};
use crate::rules::{evaluate, is_legal, movable_pieces, GameResult};
use crate::strategy::Strategy;

/// Why an episode ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Termination {
    /// A piece of this team reached its goal row.
    ReachedGoal(Team),
    /// This team had no legal move on its turn.
    Stalemate(Team),
}

impl Termination {
    /// The winning team.
    #[must_use]
    pub fn winner(self) -> Team {
        match self {
            Termination::ReachedGoal(team) => team,
            Termination::Stalemate(stuck) => stuck.opponent(),
        }
    }

    #[must_use]
    pub fn is_stalemate(self) -> bool {
        matches!(self, Termination::Stalemate(_))
    }
}

impl std::fmt::Display for Termination {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Termination::ReachedGoal(team) => write!(f, "{team} reached goal"),
            Termination::Stalemate(team) => write!(f, "{team} stalemated"),
        }
    }
}

/// Summary of a finished episode.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EpisodeRecord {
    pub winner: Team,
    pub termination: Termination,

    /// Board status at the end. Stays `InProgress` after a stalemate.
    pub result: GameResult,

    pub plies: usize,

    /// Pieces captured by each team.
    pub captures: TeamMap<usize>,

    pub final_snapshot: Snapshot,

    /// RNG state at the start of the episode, for replay.
    pub rng_state: GameRngState,

    pub history: Vec<MoveRecord>,
}

/// Drives one episode from a starting board to a terminal state.
#[derive(Clone, Debug)]
pub struct EpisodeController {
    board: BoardState,
    active: Team,
    result: GameResult,
    termination: Option<Termination>,
    plies: usize,
    ply_limit: usize,
    captures: TeamMap<usize>,
    history: Vec<MoveRecord>,
}

impl EpisodeController {
    /// Start an episode on a fresh board of the given size.
    pub fn new(size: usize) -> Result<Self> {
        Ok(Self::from_board(BoardState::initialize(size)?))
    }

    /// Start an episode from an arbitrary board, Attacker to move.
    ///
    /// If the board is already terminal the episode starts finished.
    #[must_use]
    pub fn from_board(board: BoardState) -> Self {
        let result = evaluate(&board);
        let ply_limit = board.size().saturating_sub(1) * board.piece_count();
        Self {
            termination: result.winner().map(Termination::ReachedGoal),
            board,
            active: Team::Attacker,
            result,
            plies: 0,
            ply_limit,
            captures: TeamMap::default(),
            history: Vec::new(),
        }
    }

    #[must_use]
    pub fn board(&self) -> &BoardState {
        &self.board
    }

    /// Team to move next.
    #[must_use]
    pub fn active(&self) -> Team {
        self.active
    }

    #[must_use]
    pub fn result(&self) -> GameResult {
        self.result
    }

    #[must_use]
    pub fn termination(&self) -> Option<Termination> {
        self.termination
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.termination.is_some()
    }

    /// Plies applied so far.
    #[must_use]
    pub fn plies(&self) -> usize {
        self.plies
    }

    /// Upper bound on plies for this episode.
    #[must_use]
    pub fn ply_limit(&self) -> usize {
        self.ply_limit
    }

    /// Moves applied so far, oldest first.
    #[must_use]
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// Play one ply for the active team using `strategy`.
    ///
    /// Returns the applied move, or `None` if the episode was already over
    /// or ended now by stalemate.
    pub fn step(
        &mut self,
        strategy: &mut dyn Strategy,
        rng: &mut GameRng,
    ) -> Result<Option<MoveRecord>> {
        if self.termination.is_some() {
            return Ok(None);
        }

        let team = self.active;
        let choice = match strategy.select_move(&self.board, team, rng) {
            Ok(choice) => choice,
            Err(Error::NoLegalMove { team: stuck }) if stuck == team => {
                let movable = movable_pieces(&self.board, team).len();
                if movable > 0 {
                    return Err(Error::FalseStalemate { team, movable });
                }
                warn!(%team, plies = self.plies, "no legal move, ending episode");
                self.termination = Some(Termination::Stalemate(team));
                return Ok(None);
            }
            Err(err) => return Err(err),
        };

        self.apply(team, choice).map(Some)
    }

    fn apply(&mut self, team: Team, choice: MoveChoice) -> Result<MoveRecord> {
        if !is_legal(&self.board, team, &choice) {
            return Err(Error::IllegalChoice { team, choice });
        }
        if self.plies >= self.ply_limit {
            return Err(Error::PlyLimitExceeded {
                limit: self.ply_limit,
            });
        }

        let outcome = self.board.apply_move(choice.piece_id, choice.destination)?;
        self.plies += 1;
        if outcome.captured.is_some() {
            self.captures[team] += 1;
        }

        let record = MoveRecord {
            team,
            choice,
            from: outcome.from,
            captured: outcome.captured,
            ply: self.plies,
        };
        trace!(
            ply = record.ply,
            %team,
            piece = %choice.piece_id,
            from = %record.from,
            to = %choice.destination,
            capture = record.is_capture(),
            "move"
        );
        self.history.push(record.clone());
        debug_assert!(self.board.check_invariants().is_ok());

        self.result = evaluate(&self.board);
        if let Some(winner) = self.result.winner() {
            self.termination = Some(Termination::ReachedGoal(winner));
        }
        self.active = team.opponent();

        Ok(record)
    }

    /// Play the episode to completion.
    ///
    /// Both strategies are told the outcome before the record is returned.
    pub fn run(
        mut self,
        attacker: &mut dyn Strategy,
        defender: &mut dyn Strategy,
        rng: &mut GameRng,
    ) -> Result<EpisodeRecord> {
        let rng_state = rng.state();

        let termination = loop {
            if let Some(termination) = self.termination {
                break termination;
            }
            let strategy: &mut dyn Strategy = match self.active {
                Team::Attacker => &mut *attacker,
                Team::Defender => &mut *defender,
            };
            self.step(strategy, rng)?;
        };

        let winner = termination.winner();
        attacker.episode_finished(Team::Attacker, winner == Team::Attacker);
        defender.episode_finished(Team::Defender, winner == Team::Defender);

        let final_snapshot = self.board.physical_snapshot();
        debug!(
            %winner,
            %termination,
            plies = self.plies,
            fingerprint = final_snapshot.fingerprint(),
            "episode finished\n{final_snapshot}"
        );

        Ok(EpisodeRecord {
            winner,
            termination,
            result: self.result,
            plies: self.plies,
            captures: self.captures,
            final_snapshot,
            rng_state,
            history: self.history,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{PieceId, Square};
    use crate::strategy::RandomStrategy;

    /// Always plays the same move, legal or not.
    struct FixedStrategy(MoveChoice);

    impl Strategy for FixedStrategy {
        fn select_move(&mut self, _: &BoardState, _: Team, _: &mut GameRng) -> Result<MoveChoice> {
            Ok(self.0)
        }

        fn name(&self) -> &str {
            "Fixed"
        }
    }

    /// Counts outcome notifications.
    #[derive(Default)]
    struct CountingStrategy {
        inner: RandomStrategy,
        wins: u32,
        losses: u32,
    }

    impl Strategy for CountingStrategy {
        fn select_move(&mut self, board: &BoardState, team: Team, rng: &mut GameRng) -> Result<MoveChoice> {
            self.inner.select_move(board, team, rng)
        }

        fn name(&self) -> &str {
            "Counting"
        }

        fn episode_finished(&mut self, _team: Team, won: bool) {
            if won {
                self.wins += 1;
            } else {
                self.losses += 1;
            }
        }
    }

    #[test]
    fn test_initial_state() {
        let controller = EpisodeController::new(5).unwrap();

        assert_eq!(controller.active(), Team::Attacker);
        assert_eq!(controller.result(), GameResult::InProgress);
        assert!(!controller.is_terminal());
        assert_eq!(controller.ply_limit(), 4 * 10);
    }

    #[test]
    fn test_step_alternates_teams() {
        let mut controller = EpisodeController::new(5).unwrap();
        let mut strategy = RandomStrategy::new();
        let mut rng = GameRng::new(3);

        let first = controller.step(&mut strategy, &mut rng).unwrap().unwrap();
        assert_eq!(first.team, Team::Attacker);
        assert_eq!(controller.active(), Team::Defender);

        let second = controller.step(&mut strategy, &mut rng).unwrap().unwrap();
        assert_eq!(second.team, Team::Defender);
        assert_eq!(second.ply, 2);
        assert_eq!(controller.history().len(), 2);
    }

    #[test]
    fn test_illegal_choice_is_fatal() {
        let mut controller = EpisodeController::new(3).unwrap();
        // Straight two rows is never legal.
        let mut strategy = FixedStrategy(MoveChoice::new(PieceId(0), Square::new(1, 1)));
        let mut rng = GameRng::new(0);

        let err = controller.step(&mut strategy, &mut rng).unwrap_err();

        assert!(matches!(err, Error::IllegalChoice { team: Team::Attacker, .. }));
        assert!(err.is_internal());
        assert_eq!(controller.plies(), 0);
    }

    #[test]
    fn test_stalemate_requires_no_movable_piece() {
        struct Stuck;
        impl Strategy for Stuck {
            fn select_move(&mut self, _: &BoardState, team: Team, _: &mut GameRng) -> Result<MoveChoice> {
                Err(Error::NoLegalMove { team })
            }
            fn name(&self) -> &str {
                "Stuck"
            }
        }

        // Attacker can still move: the claim is rejected.
        let mut controller = EpisodeController::new(3).unwrap();
        let err = controller.step(&mut Stuck, &mut GameRng::new(0)).unwrap_err();
        assert!(matches!(err, Error::FalseStalemate { team: Team::Attacker, movable: 3 }));
        assert!(!controller.is_terminal());

        // Attacker has no pieces: the claim is accepted.
        let board = BoardState::from_pieces(3, [(Team::Defender, Square::new(1, 2))]).unwrap();
        let mut controller = EpisodeController::from_board(board);
        assert!(controller.step(&mut Stuck, &mut GameRng::new(0)).unwrap().is_none());
        assert_eq!(controller.termination(), Some(Termination::Stalemate(Team::Attacker)));
    }

    #[test]
    fn test_moving_opponent_piece_is_illegal() {
        let mut controller = EpisodeController::new(3).unwrap();
        let mut strategy = FixedStrategy(MoveChoice::new(PieceId(3), Square::new(2, 1)));
        let mut rng = GameRng::new(0);

        assert!(controller.step(&mut strategy, &mut rng).is_err());
    }

    #[test]
    fn test_goal_ends_episode() {
        let board = BoardState::from_pieces(
            3,
            [
                (Team::Attacker, Square::new(2, 2)),
                (Team::Defender, Square::new(1, 1)),
            ],
        )
        .unwrap();
        let mut controller = EpisodeController::from_board(board);
        let mut strategy = FixedStrategy(MoveChoice::new(PieceId(0), Square::new(1, 2)));
        let mut rng = GameRng::new(0);

        controller.step(&mut strategy, &mut rng).unwrap();

        assert_eq!(controller.result(), GameResult::AttackerReachedGoal);
        assert_eq!(controller.termination(), Some(Termination::ReachedGoal(Team::Attacker)));

        // Terminal: nothing further is applied.
        let before = controller.board().clone();
        assert!(controller.step(&mut strategy, &mut rng).unwrap().is_none());
        assert_eq!(controller.board(), &before);
        assert_eq!(controller.plies(), 1);
    }

    #[test]
    fn test_already_terminal_board() {
        let board = BoardState::from_pieces(3, [(Team::Defender, Square::new(3, 2))]).unwrap();
        let controller = EpisodeController::from_board(board);

        assert!(controller.is_terminal());
        assert_eq!(controller.termination(), Some(Termination::ReachedGoal(Team::Defender)));
    }

    #[test]
    fn test_stalemate_loses() {
        let board = BoardState::from_pieces(4, [(Team::Defender, Square::new(1, 3))]).unwrap();
        let controller = EpisodeController::from_board(board);
        let mut attacker = RandomStrategy::new();
        let mut defender = RandomStrategy::new();
        let mut rng = GameRng::new(0);

        let record = controller.run(&mut attacker, &mut defender, &mut rng).unwrap();

        assert_eq!(record.termination, Termination::Stalemate(Team::Attacker));
        assert_eq!(record.winner, Team::Defender);
        assert_eq!(record.result, GameResult::InProgress);
        assert_eq!(record.plies, 0);
    }

    #[test]
    fn test_run_reaches_terminal() {
        let controller = EpisodeController::new(5).unwrap();
        let mut attacker = RandomStrategy::new();
        let mut defender = RandomStrategy::new();
        let mut rng = GameRng::new(77);

        let record = controller.run(&mut attacker, &mut defender, &mut rng).unwrap();

        match record.termination {
            Termination::ReachedGoal(team) => {
                assert!(record.result.is_terminal());
                assert_eq!(record.result.winner(), Some(team));
            }
            Termination::Stalemate(team) => assert_eq!(record.final_snapshot.count(team), 0),
        }
        assert!(record.plies <= 40);
        assert_eq!(record.history.len(), record.plies);
        assert_eq!(record.final_snapshot.len(), 25);
    }

    #[test]
    fn test_strategies_are_notified() {
        let mut attacker = CountingStrategy::default();
        let mut defender = CountingStrategy::default();
        let mut rng = GameRng::new(1);

        for _ in 0..5 {
            let controller = EpisodeController::new(4).unwrap();
            controller.run(&mut attacker, &mut defender, &mut rng).unwrap();
        }

        assert_eq!(attacker.wins + attacker.losses, 5);
        assert_eq!(attacker.wins, defender.losses);
        assert_eq!(attacker.losses, defender.wins);
    }

    #[test]
    fn test_captures_counted() {
        let controller = EpisodeController::new(6).unwrap();
        let mut attacker = RandomStrategy::new();
        let mut defender = RandomStrategy::new();
        let mut rng = GameRng::new(8);

        let record = controller.run(&mut attacker, &mut defender, &mut rng).unwrap();

        let captured_in_history = record.history.iter().filter(|m| m.is_capture()).count();
        assert_eq!(
            record.captures[Team::Attacker] + record.captures[Team::Defender],
            captured_in_history
        );
        assert_eq!(
            record.final_snapshot.count(Team::Attacker),
            6 - record.captures[Team::Defender]
        );
    }

    #[test]
    fn test_termination_display() {
        assert_eq!(Termination::ReachedGoal(Team::Attacker).to_string(), "Attacker reached goal");
        assert_eq!(Termination::Stalemate(Team::Defender).to_string(), "Defender stalemated");
        assert_eq!(Termination::Stalemate(Team::Defender).winner(), Team::Attacker);
    }
}
