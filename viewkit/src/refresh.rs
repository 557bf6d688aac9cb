//! Poll-refresh coordinator - periodic per-view data refresh.
//!
//! Keeps a view's data fresh without user action: a tokio task fires the
//! source's fetch on a fixed interval, skips ticks entirely while the view
//! is hidden, and performs one immediate out-of-band fetch when the view
//! becomes visible again. The schedule is an owned resource: [`start`]
//! returns a [`RefreshHandle`] bound to the view's mounted lifetime, and
//! dropping or stopping the handle cancels the schedule.
//!
//! # Example
//!
//! ```ignore
//! let source = Arc::new(DashboardSource::new(client));
//!
//! // The mount fetch is the caller's, outside the interval schedule.
//! source.fetch(FetchKind::Foreground).await?;
//!
//! let handle = refresh::start(source, Duration::from_secs(5));
//! // ... on visibilitychange:
//! handle.notify_visible();
//! // ... on unmount:
//! handle.stop();
//! ```

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

/// Boxed error returned by a refresh fetch.
pub type RefreshError = Box<dyn std::error::Error + Send + Sync>;

/// Whether a fetch was asked for by the user or by the schedule.
///
/// Foreground fetches (user-initiated or initial load) may show a loading
/// indicator and surface their errors. Background fetches (interval tick
/// or visibility regain) must not: prior content stays on screen until
/// new data replaces it, and failures are logged only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchKind {
    /// User-initiated or initial load.
    Foreground,
    /// Interval tick or visibility-regain refresh.
    Background,
}

impl FetchKind {
    /// Returns `true` if a loading indicator should be shown for this fetch.
    pub fn shows_loading(&self) -> bool {
        matches!(self, FetchKind::Foreground)
    }
}

/// A view's data source, driven by the coordinator.
///
/// Implementations perform the actual endpoint calls and apply the
/// results to the view's state. Completions must be guarded by a
/// still-current check (the table engine's request token, or the host's
/// own mounted flag): stopping the schedule does not cancel a fetch
/// already in flight.
#[async_trait]
pub trait RefreshSource: Send + Sync + 'static {
    /// Re-fetches the view's data.
    ///
    /// `kind` tells the implementation whether it may flip a loading
    /// indicator. Errors from background fetches never surface to the
    /// user; the coordinator logs them at `warn` and moves on.
    async fn fetch(&self, kind: FetchKind) -> Result<(), RefreshError>;

    /// Returns `true` while the hosting view is not visible.
    ///
    /// Ticks that fire while suspended are skipped outright - no
    /// queueing, no catch-up fetch.
    fn is_suspended(&self) -> bool {
        false
    }

    /// Label used in log messages.
    fn label(&self) -> &str {
        "view"
    }
}

/// Begins refreshing `source` every `interval`.
///
/// The first fetch is the caller's (on mount) and is not part of the
/// schedule; the interval governs only subsequent background refreshes.
/// Fetches are serialized: a tick that elapses while a fetch is still
/// running is skipped, not queued.
pub fn start(source: Arc<dyn RefreshSource>, interval: Duration) -> RefreshHandle {
    let cancel = CancellationToken::new();
    let visible = Arc::new(Notify::new());

    let task = tokio::spawn(run_loop(
        Arc::clone(&source),
        interval,
        cancel.clone(),
        Arc::clone(&visible),
    ));

    RefreshHandle {
        cancel,
        visible,
        task,
    }
}

async fn run_loop(
    source: Arc<dyn RefreshSource>,
    interval: Duration,
    cancel: CancellationToken,
    visible: Arc<Notify>,
) {
    // First tick lands one full interval from now; the mount fetch was
    // the caller's.
    let start_at = tokio::time::Instant::now() + interval;
    let mut ticker = tokio::time::interval_at(start_at, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {
                if source.is_suspended() {
                    continue;
                }
                background_fetch(&*source).await;
            }
            _ = visible.notified() => {
                // Hidden -> visible: bridge the gap immediately,
                // independent of the tick schedule.
                background_fetch(&*source).await;
            }
        }
    }
}

async fn background_fetch(source: &dyn RefreshSource) {
    if let Err(err) = source.fetch(FetchKind::Background).await {
        log::warn!("background refresh for {} failed: {err}", source.label());
    }
}

/// Owned handle to a running refresh schedule.
///
/// Tied to the view's mounted duration: stop it on unmount. Dropping the
/// handle also cancels the schedule, so a forgotten handle cannot leak a
/// free-running timer.
#[derive(Debug)]
pub struct RefreshHandle {
    cancel: CancellationToken,
    visible: Arc<Notify>,
    task: JoinHandle<()>,
}

impl RefreshHandle {
    /// Cancels the schedule. Safe to call any number of times.
    ///
    /// Only the schedule is cancelled: a fetch the loop already entered
    /// runs to completion, and its result is discarded by the source's
    /// still-current check.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    /// Returns `true` once the schedule has been cancelled.
    pub fn is_stopped(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Signals that the view went from hidden to visible.
    ///
    /// Triggers one immediate out-of-band background fetch. Repeated
    /// signals before the loop gets to run collapse into one fetch.
    pub fn notify_visible(&self) {
        self.visible.notify_one();
    }

    /// Stops the schedule and waits for the loop to wind down.
    pub async fn join(mut self) {
        self.cancel.cancel();
        // The loop only exits between fetches, so this also waits out any
        // fetch it had already entered.
        let _ = (&mut self.task).await;
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}
