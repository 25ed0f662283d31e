//! Pondering: iterative deepening with per-depth reports
//!
//! [`ponder`] re-runs the search at depths `1..=max_depth` and hands each
//! completed depth to a callback. [`Analyzer`] runs the same loop on a
//! snapshot of the game in a background thread, so the live game can go
//! on while analysis continues. Each depth is a fresh search: a report for
//! depth `d` is exactly what a direct search at depth `d` returns.

use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, instrument, warn};

use crate::error::{Error, Result};

use super::{Algorithm, SearchGame, SearchOutcome, Searcher};

/// One completed pondering depth
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PonderReport<M> {
    pub outcome: SearchOutcome<M>,
    /// Time spent on this depth
    pub elapsed: Duration,
}

/// Search at increasing depth, reporting every completed depth.
///
/// `report` may return `ControlFlow::Break` to stop early. An interrupted
/// search (stop flag) ends the loop quietly; the last completed report is
/// returned. Other errors, like [`Error::NoMoveAvailable`], are returned.
#[instrument(skip_all, fields(maximizing = maximizing, max_depth = max_depth))]
pub fn ponder<G, F>(
    searcher: &mut Searcher,
    game: &mut G,
    maximizing: bool,
    max_depth: u32,
    mut report: F,
) -> Result<Option<PonderReport<G::Move>>>
where
    G: SearchGame,
    F: FnMut(&PonderReport<G::Move>) -> ControlFlow<()>,
{
    let mut last = None;
    for depth in 1..=max_depth.max(1) {
        let start = Instant::now();
        let outcome = match searcher.calculate_move_with_history(game, maximizing, depth) {
            Ok(outcome) => outcome,
            Err(Error::SearchInterrupted) => {
                debug!(depth, "pondering interrupted");
                break;
            }
            Err(e) => return Err(e),
        };
        let current = PonderReport {
            outcome,
            elapsed: start.elapsed(),
        };
        debug!(
            depth,
            best_move = ?current.outcome.best_move,
            score = current.outcome.score,
            nodes = current.outcome.nodes,
            "ponder depth complete"
        );
        let flow = report(&current);
        last = Some(current);
        if flow.is_break() {
            break;
        }
    }
    Ok(last)
}

// =============================================================================
// Analyzer: background pondering on a snapshot
// =============================================================================

/// Background pondering thread working on its own copy of the game.
///
/// Reports arrive over a channel; [`Analyzer::latest`] drains it without
/// blocking. Dropping the analyzer stops the thread and waits for it.
pub struct Analyzer<M> {
    stop: Arc<AtomicBool>,
    receiver: Receiver<PonderReport<M>>,
    handle: Option<JoinHandle<()>>,
    latest: Option<PonderReport<M>>,
}

impl<M> Analyzer<M>
where
    M: Clone + Send + 'static,
{
    /// Start pondering on `snapshot`, which the thread owns from now on
    pub fn spawn<G>(mut snapshot: G, maximizing: bool, max_depth: u32, algorithm: Algorithm) -> Self
    where
        G: SearchGame<Move = M> + Send + 'static,
    {
        let stop = Arc::new(AtomicBool::new(false));
        let (tx, rx) = channel();
        let flag = Arc::clone(&stop);

        let handle = thread::spawn(move || {
            let mut searcher = Searcher::new(algorithm).with_stop_flag(flag);
            let result = ponder(&mut searcher, &mut snapshot, maximizing, max_depth, |report| {
                if tx.send(report.clone()).is_err() {
                    ControlFlow::Break(())
                } else {
                    ControlFlow::Continue(())
                }
            });
            if let Err(e) = result {
                debug!(error = %e, "analysis ended without a move");
            }
        });

        Self {
            stop,
            receiver: rx,
            handle: Some(handle),
            latest: None,
        }
    }
}

impl<M> Analyzer<M> {
    /// Most recent report received so far
    pub fn latest(&mut self) -> Option<&PonderReport<M>> {
        loop {
            match self.receiver.try_recv() {
                Ok(report) => self.latest = Some(report),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
            }
        }
        self.latest.as_ref()
    }

    /// True once the thread has finished every depth or was stopped
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Block until pondering completes, then return the deepest report
    pub fn wait(mut self) -> Option<PonderReport<M>> {
        self.join();
        self.latest();
        self.latest.take()
    }

    /// Ask the thread to stop and wait for it
    pub fn stop(&mut self) {
        self.stop.store(true, Ordering::Relaxed);
        self.join();
    }

    fn join(&mut self) {
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("analyzer thread panicked, its analysis is abandoned");
            }
        }
    }
}

impl<M> Drop for Analyzer<M> {
    fn drop(&mut self) {
        self.stop();
    }
}
