// rust/twenty48_cli/src/rollout/stats.rs
#![forbid(unsafe_code)]

use std::collections::BTreeMap;
use std::time::Instant;

/// How one finished game ended.
#[derive(Clone, Copy, Debug)]
pub struct GameSummary {
    pub turns: u64,
    pub score: u64,
    pub max_tile: u32,
    pub won: bool,
}

/// Running totals for a rollout. A turn is counted only when it moved the grid.
#[derive(Clone, Debug)]
pub struct RolloutStats {
    pub turns: u64,
    /// Turns played in the game that is still open.
    pub open_turns: u64,

    pub games: u64,
    pub wins: u64,
    finished_turns: u64,
    finished_score: u64,
    pub longest_game: u64,

    /// Highest score and tile seen anywhere, open game included.
    pub best_score: u64,
    pub max_tile: u32,
    /// Finished games keyed by their largest tile.
    pub max_tile_hist: BTreeMap<u32, u64>,

    started: Instant,
}

fn ratio(num: f64, den: u64) -> f64 {
    if den == 0 { 0.0 } else { num / den as f64 }
}

impl RolloutStats {
    pub fn new() -> Self {
        Self {
            turns: 0,
            open_turns: 0,
            games: 0,
            wins: 0,
            finished_turns: 0,
            finished_score: 0,
            longest_game: 0,
            best_score: 0,
            max_tile: 0,
            max_tile_hist: BTreeMap::new(),
            started: Instant::now(),
        }
    }

    pub fn on_turn(&mut self, score: u64, max_tile: u32) {
        self.turns += 1;
        self.open_turns += 1;
        self.best_score = self.best_score.max(score);
        self.max_tile = self.max_tile.max(max_tile);
    }

    /// Close the open game. Returns its summary for logging.
    pub fn on_game_end(&mut self, score: u64, max_tile: u32, won: bool) -> GameSummary {
        let summary = GameSummary {
            turns: std::mem::take(&mut self.open_turns),
            score,
            max_tile,
            won,
        };

        self.games += 1;
        self.wins += u64::from(won);
        self.finished_turns += summary.turns;
        self.finished_score += score;
        self.longest_game = self.longest_game.max(summary.turns);
        self.best_score = self.best_score.max(score);
        *self.max_tile_hist.entry(max_tile).or_default() += 1;

        summary
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.started.elapsed().as_secs_f64()
    }

    pub fn turns_per_sec(&self) -> f64 {
        let dt = self.elapsed_secs();
        if dt > 0.0 { self.turns as f64 / dt } else { 0.0 }
    }

    pub fn mean_game_len(&self) -> f64 {
        ratio(self.finished_turns as f64, self.games)
    }

    pub fn mean_score(&self) -> f64 {
        ratio(self.finished_score as f64, self.games)
    }

    pub fn win_rate(&self) -> f64 {
        ratio(self.wins as f64, self.games)
    }

    /// Points per moving turn, counting the open game's score too.
    pub fn score_per_turn(&self, open_score: u64) -> f64 {
        ratio((self.finished_score + open_score) as f64, self.turns)
    }

    pub fn live_msg(&self, size: usize, open_score: u64) -> String {
        format!(
            "{size}x{size} turns/s={:.0} games={} mean_len={:.1} mean_score={:.1} best={} pts/turn={:.2} max_tile={} win={:.1}%",
            self.turns_per_sec(),
            self.games,
            self.mean_game_len(),
            self.mean_score(),
            self.best_score,
            self.score_per_turn(open_score),
            self.max_tile,
            100.0 * self.win_rate(),
        )
    }

    pub fn final_report(
        &self,
        policy: &str,
        size: usize,
        open_score: u64,
        open_terminated: bool,
    ) -> FinalReport {
        FinalReport {
            policy: policy.to_string(),
            size,
            turns: self.turns,
            elapsed_s: self.elapsed_secs(),
            turns_per_s: self.turns_per_sec(),
            games: self.games,
            mean_game_len: self.mean_game_len(),
            longest_game: self.longest_game,
            mean_score: self.mean_score(),
            best_score: self.best_score.max(open_score),
            score_per_turn: self.score_per_turn(open_score),
            max_tile: self.max_tile,
            win_rate: self.win_rate(),
            max_tile_hist: self.max_tile_hist.clone(),
            total_score: self.finished_score + open_score,
            open_turns: self.open_turns,
            open_score,
            open_terminated,
        }
    }
}

/// Everything the `DONE:` line prints.
#[derive(Clone, Debug)]
pub struct FinalReport {
    pub policy: String,
    pub size: usize,

    pub turns: u64,
    pub elapsed_s: f64,
    pub turns_per_s: f64,

    pub games: u64,
    pub mean_game_len: f64,
    pub longest_game: u64,

    pub mean_score: f64,
    pub best_score: u64,
    pub score_per_turn: f64,
    pub total_score: u64,

    pub max_tile: u32,
    pub win_rate: f64,
    pub max_tile_hist: BTreeMap<u32, u64>,

    /// The game still running when the turn budget ran out.
    pub open_turns: u64,
    pub open_score: u64,
    pub open_terminated: bool,
}

impl FinalReport {
    /// `2048:3 1024:10 ...`, largest tile first.
    pub fn max_tile_hist_line(&self) -> String {
        self.max_tile_hist
            .iter()
            .rev()
            .map(|(tile, n)| format!("{tile}:{n}"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}
