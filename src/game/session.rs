//! # Game Session
//!
//! The owned handle a front-end talks to: one [`GameState`], the seeded
//! random number generator that drives it, and an optional narrator.

use super::state::{GameState, MessageKind, RunConfig};
use super::turn::TurnOutcome;
use crate::input::Command;
use crate::narrative::{NarrativeContext, NarrativeRequest, Narrator, SilentNarrator};
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;

/// A game in progress together with everything needed to advance it.
pub struct GameSession {
    state: GameState,
    rng: StdRng,
    narrator: Box<dyn Narrator>,
}

impl GameSession {
    /// Starts a new run from a seed. The same seed and commands always
    /// produce the same game.
    ///
    /// # Examples
    ///
    /// ```
    /// use rogulator::{Command, Direction, GameSession, RunConfig};
    ///
    /// let mut session = GameSession::new(RunConfig::default(), 7);
    /// session.apply(Command::Rest);
    /// assert_eq!(session.state().turn, 1);
    /// ```
    pub fn new(config: RunConfig, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let state = GameState::new_game(config, &mut rng);
        Self {
            state,
            rng,
            narrator: Box::new(SilentNarrator),
        }
    }

    /// Resumes a saved state with a fresh random stream.
    pub fn from_state(state: GameState, seed: u64) -> Self {
        Self {
            state,
            rng: StdRng::seed_from_u64(seed),
            narrator: Box::new(SilentNarrator),
        }
    }

    /// Replaces the narrator and narrates the room the player stands in.
    pub fn with_narrator(mut self, narrator: impl Narrator + 'static) -> Self {
        self.narrator = Box::new(narrator);
        if self.state.current_room_id.is_some() {
            self.narrate(NarrativeRequest::RoomDescription);
        }
        self
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn into_state(self) -> GameState {
        self.state
    }

    /// Applies one command and narrates whatever it produced.
    pub fn apply(&mut self, command: Command) -> TurnOutcome {
        let outcome = match command {
            Command::Move(direction) => self.state.move_player(direction, &mut self.rng),
            Command::Rest => self.state.rest(&mut self.rng),
            Command::Click(target) => self.state.click(target, &mut self.rng),
            Command::NewGame(size) => {
                self.start_new_game(RunConfig::for_size(size));
                return TurnOutcome::none();
            }
        };

        for request in NarrativeRequest::from_outcome(&outcome, &self.state) {
            self.narrate(request);
        }
        outcome
    }

    /// Discards the current run and starts another from the session's RNG.
    pub fn start_new_game(&mut self, config: RunConfig) {
        self.state = GameState::new_game(config, &mut self.rng);
        if self.state.current_room_id.is_some() {
            self.narrate(NarrativeRequest::RoomDescription);
        }
    }

    /// Asks the narrator for text. Failures are logged and otherwise ignored.
    fn narrate(&mut self, request: NarrativeRequest) {
        let context = NarrativeContext::capture(&self.state);
        match self.narrator.narrate(&request, &context) {
            Ok(Some(text)) => self.state.add_message(text, MessageKind::Info),
            Ok(None) => debug!("No narration for {:?}", request.tier()),
            Err(e) => warn!("Narration failed for {:?}: {}", request, e),
        }
    }
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("run_id", &self.state.run_id)
            .field("turn", &self.state.turn)
            .field("status", &self.state.status)
            .finish_non_exhaustive()
    }
}
