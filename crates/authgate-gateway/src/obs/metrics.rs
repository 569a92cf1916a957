//! Minimal metrics registry for the gate.
//!
//! Each metric is a [`Family`] of atomics keyed by a sorted label set, so
//! `[("a","1"),("b","2")]` and `[("b","2"),("a","1")]` hit the same series.
//! Durations are kept as integer microseconds.

use std::fmt::Write;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::time::Duration;

use dashmap::DashMap;

type LabelSet = Vec<(String, String)>;

fn label_set(labels: &[(&str, &str)]) -> LabelSet {
    let mut set: LabelSet = labels
        .iter()
        .map(|&(k, v)| (k.to_owned(), v.to_owned()))
        .collect();
    set.sort_unstable();
    set
}

/// `k="v",...` with Prometheus escaping; `extra` is appended last.
fn format_labels(set: &LabelSet, extra: Option<(&str, &str)>) -> String {
    let mut out = String::new();
    for (k, v) in set.iter().map(|(k, v)| (k.as_str(), v.as_str())).chain(extra) {
        if !out.is_empty() {
            out.push(',');
        }
        out.push_str(k);
        out.push_str("=\"");
        for c in v.chars() {
            match c {
                '\\' => out.push_str("\\\\"),
                '"' => out.push_str("\\\""),
                '\n' => out.push_str("\\n"),
                c => out.push(c),
            }
        }
        out.push('"');
    }
    out
}

/// Label set -> value cell.
struct Family<T> {
    cells: DashMap<LabelSet, T>,
}

impl<T: Default> Default for Family<T> {
    fn default() -> Self {
        Self {
            cells: DashMap::new(),
        }
    }
}

impl<T: Default> Family<T> {
    fn with(&self, labels: &[(&str, &str)], f: impl FnOnce(&T)) {
        let cell = self.cells.entry(label_set(labels)).or_default();
        f(cell.value());
    }

    fn read<R>(&self, labels: &[(&str, &str)], f: impl FnOnce(&T) -> R) -> Option<R> {
        self.cells.get(&label_set(labels)).map(|cell| f(cell.value()))
    }

    fn write_simple(&self, out: &mut String, name: &str, kind: &str, value: impl Fn(&T) -> String) {
        let _ = writeln!(out, "# TYPE {name} {kind}");
        for cell in self.cells.iter() {
            let labels = format_labels(cell.key(), None);
            let _ = writeln!(out, "{name}{{{labels}}} {}", value(cell.value()));
        }
    }
}

#[derive(Default)]
pub struct CounterVec(Family<AtomicU64>);

impl CounterVec {
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.0.with(labels, |c| {
            c.fetch_add(1, Ordering::Relaxed);
        });
    }

    /// 0 for a label set never incremented.
    pub fn get(&self, labels: &[(&str, &str)]) -> u64 {
        self.0
            .read(labels, |c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }
}

#[derive(Default)]
pub struct GaugeVec(Family<AtomicI64>);

impl GaugeVec {
    pub fn set(&self, labels: &[(&str, &str)], v: i64) {
        self.0.with(labels, |g| g.store(v, Ordering::Relaxed));
    }

    pub fn get(&self, labels: &[(&str, &str)]) -> i64 {
        self.0
            .read(labels, |g| g.load(Ordering::Relaxed))
            .unwrap_or(0)
    }
}

/// Upper bounds in microseconds. Enforce is in-process, so most of the range
/// sits below one millisecond.
const LATENCY_BOUNDS_MICROS: [u64; 9] = [10, 50, 100, 250, 500, 1_000, 5_000, 10_000, 50_000];

#[derive(Default)]
struct Buckets {
    below: [AtomicU64; LATENCY_BOUNDS_MICROS.len()],
    total: AtomicU64,
    sum_micros: AtomicU64,
}

#[derive(Default)]
pub struct HistogramVec(Family<Buckets>);

impl HistogramVec {
    pub fn observe(&self, labels: &[(&str, &str)], elapsed: Duration) {
        let micros = u64::try_from(elapsed.as_micros()).unwrap_or(u64::MAX);
        self.0.with(labels, |h| {
            h.total.fetch_add(1, Ordering::Relaxed);
            h.sum_micros.fetch_add(micros, Ordering::Relaxed);
            let first = LATENCY_BOUNDS_MICROS.partition_point(|&le| le < micros);
            for slot in &h.below[first..] {
                slot.fetch_add(1, Ordering::Relaxed);
            }
        });
    }

    fn write(&self, out: &mut String, name: &str) {
        let _ = writeln!(out, "# TYPE {name} histogram");
        for cell in self.0.cells.iter() {
            let (set, h) = (cell.key(), cell.value());
            let total = h.total.load(Ordering::Relaxed);
            for (le, slot) in LATENCY_BOUNDS_MICROS.iter().zip(&h.below) {
                let le = le.to_string();
                let labels = format_labels(set, Some(("le", le.as_str())));
                let _ = writeln!(out, "{name}_bucket{{{labels}}} {}", slot.load(Ordering::Relaxed));
            }
            let inf = format_labels(set, Some(("le", "+Inf")));
            let _ = writeln!(out, "{name}_bucket{{{inf}}} {total}");

            let labels = format_labels(set, None);
            let sum = h.sum_micros.load(Ordering::Relaxed);
            let _ = writeln!(out, "{name}_sum{{{labels}}} {sum}");
            let _ = writeln!(out, "{name}_count{{{labels}}} {total}");
        }
    }
}

#[derive(Default)]
pub struct GateMetrics {
    /// `decision` = allow | deny
    pub decisions: CounterVec,
    /// Enforce calls that failed inside the engine and were resolved to deny.
    pub engine_faults: CounterVec,
    /// `result` = ok | error
    pub reloads: CounterVec,
    pub rules_loaded: GaugeVec,
    pub enforce_duration: HistogramVec,
}

impl GateMetrics {
    /// Prometheus text exposition of every series touched so far.
    pub fn render(&self) -> String {
        let count = |c: &AtomicU64| c.load(Ordering::Relaxed).to_string();
        let level = |g: &AtomicI64| g.load(Ordering::Relaxed).to_string();

        let mut out = String::new();
        self.decisions
            .0
            .write_simple(&mut out, "authgate_decisions_total", "counter", count);
        self.engine_faults
            .0
            .write_simple(&mut out, "authgate_engine_faults_total", "counter", count);
        self.reloads
            .0
            .write_simple(&mut out, "authgate_reloads_total", "counter", count);
        self.rules_loaded
            .0
            .write_simple(&mut out, "authgate_rules_loaded", "gauge", level);
        self.enforce_duration
            .write(&mut out, "authgate_enforce_duration_micros");
        out
    }
}
