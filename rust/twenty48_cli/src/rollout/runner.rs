// rust/twenty48_cli/src/rollout/runner.rs
#![forbid(unsafe_code)]

use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use twenty48_engine::{Direction, Engine, EngineConfig, Policy, Session, Store, TurnReport};

use super::sinks::{ReportRow, RolloutSink};
use super::stats::{FinalReport, RolloutStats};

/// Turns between progress-bar message refreshes.
const LIVE_EVERY: u64 = 200;

/// Rollout settings, filled from CLI flags. No behaviour lives here.
#[derive(Clone, Debug)]
pub struct RunnerConfig {
    /// Moving turns to play, summed over all games.
    pub steps: u64,
    pub engine: EngineConfig,
    /// Label for the final report.
    pub policy_name: String,
    /// After a win, continue the same game instead of starting a new one.
    pub keep_playing: bool,

    /// 0 = summary only, 1 = progress bar, 2 = progress bar and table rows.
    pub verbosity: u8,
    /// Table row cadence in turns; 0 turns the table off.
    pub report_every: u64,

    /// Print the board after every turn, then sleep this many ms.
    pub render_ms: Option<u64>,
}

pub struct Runner {
    cfg: RunnerConfig,
    sink: Box<dyn RolloutSink>,
}

impl Runner {
    pub fn new(cfg: RunnerConfig, sink: Box<dyn RolloutSink>) -> Self {
        Self { cfg, sink }
    }

    fn progress_bar(&self) -> Result<Option<ProgressBar>> {
        if self.cfg.verbosity == 0 {
            return Ok(None);
        }
        let style = ProgressStyle::with_template(
            "[{elapsed_precise}] {bar:40.green/black} {pos}/{len} turns  {msg}",
        )
        .context("progress bar template")?
        .progress_chars("##-");
        let pb = ProgressBar::new(self.cfg.steps);
        pb.set_style(style);
        Ok(Some(pb))
    }

    /// Play until `steps` moving turns are done, starting a new game whenever one ends.
    ///
    /// The first game resumes whatever `store` holds. The store keeps the best score
    /// between runs, and the last game is saved so the next run can pick it up.
    pub fn run<S: Store>(&mut self, policy: &mut dyn Policy, store: S) -> Result<FinalReport> {
        let engine = Engine::new(self.cfg.engine).context("invalid engine configuration")?;
        let mut session = Session::start(engine, store);
        info!(
            score = session.score(),
            best_score = session.best_score(),
            "session started"
        );

        let pb = self.progress_bar()?;
        let mut stats = RolloutStats::new();
        self.render_board(&session, None);

        while stats.turns < self.cfg.steps {
            if session.is_terminated() {
                if !session.over() && self.cfg.keep_playing {
                    session.continue_playing();
                } else {
                    self.end_game(&mut session, &mut stats);
                }
                continue;
            }

            // A policy only comes back empty-handed on a board the session should already
            // have flagged as over; close the game rather than spin.
            let Some(direction) = policy.choose_move(session.engine(), session.grid()) else {
                self.end_game(&mut session, &mut stats);
                continue;
            };

            let turn = session.apply(direction);
            if !turn.moved {
                continue;
            }
            stats.on_turn(session.score(), session.grid().max_value());
            self.render_board(&session, Some((stats.turns, direction, &turn)));

            if let Some(pb) = &pb {
                pb.inc(1);
                if stats.turns % LIVE_EVERY == 0 {
                    pb.set_message(stats.live_msg(self.cfg.engine.size, session.score()));
                }
            }

            if self.cfg.verbosity >= 2
                && self.cfg.report_every > 0
                && stats.turns % self.cfg.report_every == 0
            {
                let row = self.report_row(&stats, &session);
                self.sink.on_report_row(&row, pb.as_ref());
            }
        }

        if let Some(pb) = pb {
            pb.finish_with_message("done");
        }
        session.save();

        let mut report = stats.final_report(
            &self.cfg.policy_name,
            self.cfg.engine.size,
            session.score(),
            session.is_terminated(),
        );
        // Includes a best score carried in from an earlier run.
        report.best_score = report.best_score.max(session.best_score());
        Ok(report)
    }

    fn end_game<S: Store>(&self, session: &mut Session<S>, stats: &mut RolloutStats) {
        let max_tile = session.grid().max_value();
        let game = stats.on_game_end(session.score(), max_tile, session.won());
        debug!(
            game = stats.games,
            turns = game.turns,
            score = game.score,
            max_tile = game.max_tile,
            won = game.won,
            "game finished"
        );

        session.restart();

        if self.cfg.render_ms.is_some() {
            println!(
                "=== new game: finished={} mean_score={:.1} best={} ===",
                stats.games,
                stats.mean_score(),
                session.best_score()
            );
            print!("{}", session.grid().render_ascii());
        }
    }

    fn render_board<S: Store>(
        &self,
        session: &Session<S>,
        turn: Option<(u64, Direction, &TurnReport)>,
    ) {
        let Some(ms) = self.cfg.render_ms else {
            return;
        };
        if let Some((n, direction, report)) = turn {
            println!(
                "turn={n} move={direction} +{} score={}",
                report.score_gained,
                session.score()
            );
        }
        print!("{}", session.grid().render_ascii());
        if turn.is_some() && ms > 0 {
            std::thread::sleep(Duration::from_millis(ms));
        }
    }

    fn report_row<S: Store>(&self, stats: &RolloutStats, session: &Session<S>) -> ReportRow {
        ReportRow {
            turn: stats.turns,
            turns_total: self.cfg.steps,
            turns_per_s: stats.turns_per_sec(),
            games: stats.games,
            mean_game_len: stats.mean_game_len(),
            longest_game: stats.longest_game,
            score_per_turn: stats.score_per_turn(session.score()),
            mean_score: stats.mean_score(),
            best_score: session.best_score(),
            max_tile: stats.max_tile,
            win_rate: stats.win_rate(),
            open_score: session.score(),
            open_tiles: session.grid().tile_count(),
        }
    }
}
