// rust/twenty48_cli/src/rollout/sinks.rs
#![forbid(unsafe_code)]

/// One periodic table row. The runner fills it in; sinks only format it.
#[derive(Clone, Debug)]
pub struct ReportRow {
    pub turn: u64,
    pub turns_total: u64,
    pub turns_per_s: f64,

    pub games: u64,
    pub mean_game_len: f64,
    pub longest_game: u64,

    pub score_per_turn: f64,
    pub mean_score: f64,
    pub best_score: u64,

    pub max_tile: u32,
    pub win_rate: f64,

    /// The game in progress.
    pub open_score: u64,
    pub open_tiles: usize,
}

/// Receives periodic table rows from the runner.
pub trait RolloutSink {
    fn on_report_row(&mut self, row: &ReportRow, pb: Option<&indicatif::ProgressBar>);
}

/// Drops every row.
#[derive(Default)]
pub struct NoopSink;

impl RolloutSink for NoopSink {
    fn on_report_row(&mut self, _row: &ReportRow, _pb: Option<&indicatif::ProgressBar>) {}
}

/// Prints rows as a fixed-width table, repeating the header every `header_every` rows.
///
/// The runner decides when a row is due; this sink prints every row it is handed.
pub struct TableSink {
    header_every: u64,
    rows_printed: u64,
}

/// (title, width) per column; `row_line` must follow the same widths.
const COLUMNS: [(&str, usize); 12] = [
    ("turn/total", 21),
    ("turns/s", 9),
    ("games", 6),
    ("mean_len", 9),
    ("longest", 8),
    ("pts/turn", 9),
    ("mean_score", 10),
    ("best", 8),
    ("maxT", 6),
    ("win%", 6),
    ("score", 8),
    ("tiles", 5),
];

impl TableSink {
    pub fn new(header_every: u64) -> Self {
        Self {
            header_every: header_every.max(1),
            rows_printed: 0,
        }
    }

    fn header_lines() -> [String; 2] {
        let header = COLUMNS
            .iter()
            .map(|(title, w)| format!("{title:>w$}"))
            .collect::<Vec<_>>()
            .join(" ");
        let rule = "-".repeat(header.len());
        [header, rule]
    }

    fn row_line(r: &ReportRow) -> String {
        format!(
            "{:>10}/{:<10} {:>9.0} {:>6} {:>9.1} {:>8} {:>9.2} {:>10.1} {:>8} {:>6} {:>6.1} {:>8} {:>5}",
            r.turn,
            r.turns_total,
            r.turns_per_s,
            r.games,
            r.mean_game_len,
            r.longest_game,
            r.score_per_turn,
            r.mean_score,
            r.best_score,
            r.max_tile,
            100.0 * r.win_rate,
            r.open_score,
            r.open_tiles,
        )
    }
}

impl RolloutSink for TableSink {
    fn on_report_row(&mut self, row: &ReportRow, pb: Option<&indicatif::ProgressBar>) {
        let mut lines = Vec::with_capacity(3);
        if self.rows_printed % self.header_every == 0 {
            lines.extend(Self::header_lines());
        }
        lines.push(Self::row_line(row));
        self.rows_printed += 1;

        // Printing through the bar keeps it pinned below the table.
        for line in lines {
            match pb {
                Some(pb) => pb.println(line),
                None => println!("{line}"),
            }
        }
    }
}
