// rust/engine/src/session/state.rs
#![forbid(unsafe_code)]

use tracing::{debug, info, warn};

use crate::engine::{Direction, Engine, Grid, Tile};
use crate::error::RestoreError;
use crate::session::snapshot::{GameSnapshot, parse_best_score};
use crate::session::store::{BEST_SCORE_KEY, GAME_STATE_KEY, Store};

/// What one `Session::apply` call did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TurnReport {
    /// False for rejected input (terminated session) and for moves that changed nothing.
    pub moved: bool,
    pub score_gained: u64,
    /// True only on the turn that first reached the win value in this game.
    pub won_now: bool,
    /// No legal move remains after this turn.
    pub over: bool,
    /// The tile spawned after a successful move.
    pub spawned: Option<Tile>,
}

/// Current game plus score bookkeeping, persisted through a `Store`.
///
/// The in-memory state is authoritative: storage failures are logged and play continues.
pub struct Session<S: Store> {
    engine: Engine,
    grid: Grid,
    score: u64,
    best_score: u64,
    won: bool,
    over: bool,
    keep_playing: bool,
    moves_made: u64,
    store: S,
    /// Last best score known to be in the store.
    stored_best: u64,
}

impl<S: Store> Session<S> {
    /// Resume the stored game if there is a valid one, otherwise start fresh.
    pub fn start(mut engine: Engine, store: S) -> Self {
        let best_score = load_best_score(&store);

        match load_snapshot(&store, &mut engine) {
            Ok(Some((grid, snap))) => {
                debug!(score = snap.score, tiles = grid.tile_count(), "restored saved game");
                let over = snap.over || !Engine::moves_available(&grid);
                Self {
                    engine,
                    grid,
                    score: snap.score,
                    best_score: best_score.max(snap.score),
                    won: snap.won,
                    over,
                    keep_playing: snap.keep_playing,
                    moves_made: 0,
                    store,
                    stored_best: best_score,
                }
            }
            Ok(None) => Self::fresh(engine, store, best_score),
            Err(e) => {
                warn!(error = %e, "saved game unreadable, starting a new one");
                Self::fresh(engine, store, best_score)
            }
        }
    }

    /// Start a new game, ignoring any stored game state (the stored best score still counts).
    pub fn new_game(engine: Engine, store: S) -> Self {
        let best_score = load_best_score(&store);
        Self::fresh(engine, store, best_score)
    }

    fn fresh(mut engine: Engine, store: S, best_score: u64) -> Self {
        let grid = engine.setup();
        // A full deal (start_tiles == size * size) can already be locked.
        let over = !Engine::moves_available(&grid);
        Self {
            engine,
            grid,
            score: 0,
            best_score,
            won: false,
            over,
            keep_playing: false,
            moves_made: 0,
            store,
            stored_best: best_score,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn score(&self) -> u64 {
        self.score
    }

    pub fn best_score(&self) -> u64 {
        self.best_score
    }

    pub fn won(&self) -> bool {
        self.won
    }

    pub fn over(&self) -> bool {
        self.over
    }

    pub fn keep_playing(&self) -> bool {
        self.keep_playing
    }

    /// Moves that changed the grid since this session object was created or restarted.
    pub fn moves_made(&self) -> u64 {
        self.moves_made
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// No input is accepted: either stuck, or won and not yet continued.
    pub fn is_terminated(&self) -> bool {
        self.over || (self.won && !self.keep_playing)
    }

    /// Play one turn: move, then (only if something moved) spawn, score, check and save.
    pub fn apply(&mut self, direction: Direction) -> TurnReport {
        if self.is_terminated() {
            return TurnReport {
                over: self.over,
                ..TurnReport::default()
            };
        }

        let outcome = self.engine.apply_move(&mut self.grid, direction);
        if !outcome.moved {
            return TurnReport::default();
        }

        let spawned = self.engine.add_random_tile(&mut self.grid);

        self.moves_made += 1;
        self.score += outcome.score;
        self.best_score = self.best_score.max(self.score);

        let won_now = outcome.won && !self.won;
        self.won |= outcome.won;
        if won_now {
            info!(score = self.score, moves = self.moves_made, "win value reached");
        }

        self.over = !Engine::moves_available(&self.grid);
        if self.over {
            info!(score = self.score, max_tile = self.grid.max_value(), "game over");
        }

        self.save();

        TurnReport {
            moved: true,
            score_gained: outcome.score,
            won_now,
            over: self.over,
            spawned,
        }
    }

    /// Drop the current game (and its stored copy) and deal a fresh grid.
    pub fn restart(&mut self) {
        if let Err(e) = self.store.remove(GAME_STATE_KEY) {
            warn!(error = %e, "failed to clear saved game");
        }
        self.grid = self.engine.setup();
        self.score = 0;
        self.won = false;
        self.over = !Engine::moves_available(&self.grid);
        self.keep_playing = false;
        self.moves_made = 0;
        debug!(best_score = self.best_score, "game restarted");
    }

    /// Keep playing after a win.
    pub fn continue_playing(&mut self) {
        self.keep_playing = true;
        self.over = !Engine::moves_available(&self.grid);
        self.save();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(
            &self.grid,
            self.score,
            self.won,
            self.over,
            self.keep_playing,
        )
    }

    /// Persist game state and, if it grew, the best score. Failures are logged only.
    pub fn save(&mut self) {
        match self.snapshot().to_json() {
            Ok(json) => {
                if let Err(e) = self.store.save(GAME_STATE_KEY, &json) {
                    warn!(error = %e, "failed to save game state");
                }
            }
            Err(e) => warn!(error = %e, "failed to encode game state"),
        }

        if self.best_score > self.stored_best {
            match self
                .store
                .save(BEST_SCORE_KEY, &self.best_score.to_string())
            {
                Ok(()) => self.stored_best = self.best_score,
                Err(e) => warn!(error = %e, "failed to save best score"),
            }
        }
    }
}

fn load_best_score<S: Store>(store: &S) -> u64 {
    let raw = match store.load(BEST_SCORE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return 0,
        Err(e) => {
            warn!(error = %e, "failed to load best score");
            return 0;
        }
    };
    parse_best_score(&raw).unwrap_or_else(|e| {
        warn!(error = %e, "stored best score unreadable, using 0");
        0
    })
}

fn load_snapshot<S: Store>(
    store: &S,
    engine: &mut Engine,
) -> Result<Option<(Grid, GameSnapshot)>, RestoreError> {
    let raw = match store.load(GAME_STATE_KEY) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Ok(None),
        Err(e) => {
            warn!(error = %e, "failed to load game state");
            return Ok(None);
        }
    };
    let snap = GameSnapshot::from_json(&raw)?;
    let size = engine.size();
    let grid = snap.restore_grid(size, engine.ids_mut())?;
    Ok(Some((grid, snap)))
}
