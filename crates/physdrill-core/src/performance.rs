//! In-memory attempt tallies per problem kind and difficulty.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::{Difficulty, Topic};

/// Attempts and correct answers for one cell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub attempts: u32,
    pub correct: u32,
}

impl Tally {
    pub fn record(&mut self, correct: bool) {
        self.attempts += 1;
        if correct {
            self.correct += 1;
        }
    }

    /// Percentage correct, 0.0 when nothing was attempted.
    pub fn percentage(&self) -> f64 {
        if self.attempts == 0 {
            0.0
        } else {
            self.correct as f64 / self.attempts as f64 * 100.0
        }
    }

    /// "3/4 (75.0%)"
    pub fn display(&self) -> String {
        format!("{}/{} ({:.1}%)", self.correct, self.attempts, self.percentage())
    }
}

/// One row of the kind x difficulty pivot.
#[derive(Debug, Clone, PartialEq)]
pub struct PivotRow {
    pub topic: Topic,
    pub kind: String,
    /// One formatted cell per requested difficulty.
    pub cells: Vec<String>,
    /// The row's total across every difficulty.
    pub total: String,
}

type KindCells = BTreeMap<String, BTreeMap<Difficulty, Tally>>;

/// Performance counters for a practice session or graded worksheet.
///
/// Cells are keyed by topic and kind, so kinds that share a name across
/// topics (collision and energy both have `elastic`) stay apart.
#[derive(Debug, Clone, Default)]
pub struct Performance {
    cells: BTreeMap<Topic, KindCells>,
    total: Tally,
}

impl Performance {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, topic: Topic, kind: &str, difficulty: Difficulty, correct: bool) {
        self.cells
            .entry(topic)
            .or_default()
            .entry(kind.to_string())
            .or_default()
            .entry(difficulty)
            .or_default()
            .record(correct);
        self.total.record(correct);
    }

    pub fn reset(&mut self) {
        self.cells.clear();
        self.total = Tally::default();
    }

    pub fn is_empty(&self) -> bool {
        self.total.attempts == 0
    }

    fn row(&self, topic: Topic, kind: &str) -> Option<&BTreeMap<Difficulty, Tally>> {
        self.cells.get(&topic).and_then(|kinds| kinds.get(kind))
    }

    pub fn tally(&self, topic: Topic, kind: &str, difficulty: Difficulty) -> Tally {
        self.row(topic, kind)
            .and_then(|row| row.get(&difficulty))
            .copied()
            .unwrap_or_default()
    }

    pub fn kind_total(&self, topic: Topic, kind: &str) -> Tally {
        self.row(topic, kind)
            .map(|row| {
                row.values().fold(Tally::default(), |acc, t| Tally {
                    attempts: acc.attempts + t.attempts,
                    correct: acc.correct + t.correct,
                })
            })
            .unwrap_or_default()
    }

    pub fn total(&self) -> Tally {
        self.total
    }

    pub fn cell_display(&self, topic: Topic, kind: &str, difficulty: Difficulty) -> String {
        self.tally(topic, kind, difficulty).display()
    }

    /// Topics with at least one attempt.
    pub fn topics(&self) -> impl Iterator<Item = Topic> + '_ {
        self.cells.keys().copied()
    }

    /// Attempted kinds of `topic`, in sorted order.
    pub fn kinds(&self, topic: Topic) -> impl Iterator<Item = &str> {
        self.cells
            .get(&topic)
            .into_iter()
            .flat_map(|kinds| kinds.keys().map(String::as_str))
    }

    /// Every attempted (topic, kind) pair, in sorted order.
    fn attempted(&self) -> impl Iterator<Item = (Topic, &str)> {
        self.cells.iter().flat_map(|(topic, kinds)| {
            kinds.keys().map(move |kind| (*topic, kind.as_str()))
        })
    }

    fn pivot_row(&self, topic: Topic, kind: &str, difficulties: &[Difficulty]) -> PivotRow {
        PivotRow {
            topic,
            kind: kind.to_string(),
            cells: difficulties
                .iter()
                .map(|d| self.cell_display(topic, kind, *d))
                .collect(),
            total: self.kind_total(topic, kind).display(),
        }
    }

    /// Pivot rows for `kinds` of `topic` (in the given order, attempted or
    /// not), followed by any other attempted kind of any topic.
    pub fn pivot(&self, topic: Topic, kinds: &[&str], difficulties: &[Difficulty]) -> Vec<PivotRow> {
        let mut rows: Vec<PivotRow> = kinds
            .iter()
            .map(|kind| self.pivot_row(topic, kind, difficulties))
            .collect();
        rows.extend(
            self.attempted()
                .filter(|(t, k)| !(*t == topic && kinds.iter().any(|listed| *listed == *k)))
                .map(|(t, kind)| self.pivot_row(t, kind, difficulties)),
        );
        rows
    }

    /// Pivot rows for every attempted kind.
    pub fn pivot_all(&self, difficulties: &[Difficulty]) -> Vec<PivotRow> {
        self.attempted()
            .map(|(topic, kind)| self.pivot_row(topic, kind, difficulties))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tally_display() {
        let mut t = Tally::default();
        assert_eq!(t.display(), "0/0 (0.0%)");
        for ok in [true, true, false, true] {
            t.record(ok);
        }
        assert_eq!(t.display(), "3/4 (75.0%)");
    }

    #[test]
    fn record_and_reset() {
        let mut perf = Performance::new();
        let lm = Topic::LinearMotion;
        perf.record(lm, "no-time", Difficulty::Easy, true);
        perf.record(lm, "no-time", Difficulty::Easy, false);
        perf.record(lm, "no-time", Difficulty::Hard, true);
        perf.record(lm, "mixed", Difficulty::Medium, true);

        assert_eq!(perf.cell_display(lm, "no-time", Difficulty::Easy), "1/2 (50.0%)");
        assert_eq!(perf.kind_total(lm, "no-time").attempts, 3);
        assert_eq!(perf.total(), Tally { attempts: 4, correct: 3 });
        assert_eq!(perf.cell_display(lm, "no-distance", Difficulty::Easy), "0/0 (0.0%)");

        perf.reset();
        assert!(perf.is_empty());
        assert_eq!(perf.kinds(lm).count(), 0);
        assert_eq!(perf.topics().count(), 0);
    }

    #[test]
    fn same_kind_name_in_two_topics_is_kept_apart() {
        let mut perf = Performance::new();
        perf.record(Topic::Collision, "elastic", Difficulty::Easy, true);
        perf.record(Topic::Energy, "elastic", Difficulty::Easy, false);

        assert_eq!(perf.cell_display(Topic::Collision, "elastic", Difficulty::Easy), "1/1 (100.0%)");
        assert_eq!(perf.cell_display(Topic::Energy, "elastic", Difficulty::Easy), "0/1 (0.0%)");
        assert_eq!(perf.total(), Tally { attempts: 2, correct: 1 });

        let rows = perf.pivot_all(&[Difficulty::Easy]);
        let keys: Vec<(Topic, &str)> = rows.iter().map(|r| (r.topic, r.kind.as_str())).collect();
        assert_eq!(keys, vec![(Topic::Collision, "elastic"), (Topic::Energy, "elastic")]);
    }

    #[test]
    fn pivot_lists_requested_kinds_then_extras() {
        let mut perf = Performance::new();
        let lm = Topic::LinearMotion;
        perf.record(lm, "mixed", Difficulty::Hard, false);
        perf.record(lm, "no-time", Difficulty::Easy, true);
        perf.record(Topic::Forces, "force", Difficulty::Easy, true);

        let rows = perf.pivot(lm, &["no-time", "no-distance"], &[Difficulty::Easy, Difficulty::Hard]);
        let kinds: Vec<&str> = rows.iter().map(|r| r.kind.as_str()).collect();
        assert_eq!(kinds, vec!["no-time", "no-distance", "mixed", "force"]);
        assert_eq!(rows[0].cells, vec!["1/1 (100.0%)", "0/0 (0.0%)"]);
        assert_eq!(rows[2].cells[1], "0/1 (0.0%)");
        assert_eq!(rows[1].total, "0/0 (0.0%)");
        assert_eq!(rows[3].topic, Topic::Forces);
    }
}
