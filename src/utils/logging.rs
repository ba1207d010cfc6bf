use log::{log_enabled, Level};
use std::time::{Duration, Instant};

/// Trace-level timer around a batch of pair tests.
///
/// Logs the batch size on creation and, on drop, the elapsed time together
/// with the number of pairs that produced contacts (when recorded).
pub struct ScopedTimer<'a> {
    label: &'a str,
    pairs: usize,
    contacts: Option<usize>,
    start: Instant,
}

impl<'a> ScopedTimer<'a> {
    pub fn new(label: &'a str, pairs: usize) -> Self {
        if log_enabled!(Level::Trace) {
            log::trace!("⏱️ start {label} ({pairs} pairs)");
        }
        Self {
            label,
            pairs,
            contacts: None,
            start: Instant::now(),
        }
    }

    /// Records how many pairs intersected. `count` only runs when tracing is on.
    pub fn record_contacts(&mut self, count: impl FnOnce() -> usize) {
        if log_enabled!(Level::Trace) {
            self.contacts = Some(count());
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl<'a> Drop for ScopedTimer<'a> {
    fn drop(&mut self) {
        if !log_enabled!(Level::Trace) {
            return;
        }
        let elapsed = self.start.elapsed();
        let per_pair = elapsed.as_nanos() / self.pairs.max(1) as u128;
        match self.contacts {
            Some(contacts) => log::trace!(
                "⏱️ end {} ({} µs, {} ns/pair, {}/{} in contact)",
                self.label,
                elapsed.as_micros(),
                per_pair,
                contacts,
                self.pairs
            ),
            None => log::trace!(
                "⏱️ end {} ({} µs, {} ns/pair)",
                self.label,
                elapsed.as_micros(),
                per_pair
            ),
        }
    }
}
