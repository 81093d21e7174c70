use std::sync::{Arc, RwLock};
use std::time::Duration;

use log::{debug, info};
use serde::Serialize;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio::time::{self, Instant};
use tokio_util::sync::CancellationToken;

use super::state::{Tick, TimerPhase, TimerState};
use crate::credits::MIN_PERSIST_SECONDS;
use crate::error::EngineError;
use crate::ledger::StudyLedger;
use crate::notify::{NoticeKind, Notifier};
use crate::phrases;
use crate::reconcile::Reconciler;

const DEFAULT_PHRASE_CONTEXT: &str = "general study";

#[derive(Debug, Serialize, Clone)]
pub struct TimerSnapshot {
    pub state: TimerState,
    pub clock: String,
    pub progress_percent: f64,
}

impl TimerSnapshot {
    fn of(state: &TimerState) -> Self {
        Self {
            clock: state.clock(),
            progress_percent: state.progress_percent(),
            state: state.clone(),
        }
    }
}

/// Cancellable periodic driver for one running stretch. Dropping the handle
/// cancels the task, so replacing the slot can never leak a second ticker.
struct TickerHandle {
    token: CancellationToken,
    handle: JoinHandle<()>,
}

impl Drop for TickerHandle {
    fn drop(&mut self) {
        self.token.cancel();
        self.handle.abort();
    }
}

/// Async owner of the focus-timer state machine.
///
/// All transitions run under a single state lock; the ticker task is the only
/// periodic driver and is cancelled atomically with every exit from
/// `Running`. The reconciler handoff happens exactly once per terminating
/// transition and its submission lifecycle is independent of the timer.
#[derive(Clone)]
pub struct FocusController {
    state: Arc<Mutex<TimerState>>,
    ticker: Arc<Mutex<Option<TickerHandle>>>,
    reconciler: Reconciler,
    ledger: Arc<dyn StudyLedger>,
    notifier: Arc<dyn Notifier>,
    phrase_context: Arc<RwLock<String>>,
    tick_interval: Duration,
    reset_delay: Duration,
}

impl FocusController {
    pub fn new(ledger: Arc<dyn StudyLedger>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            state: Arc::new(Mutex::new(TimerState::new())),
            ticker: Arc::new(Mutex::new(None)),
            reconciler: Reconciler::new(ledger.clone(), notifier.clone()),
            ledger,
            notifier,
            phrase_context: Arc::new(RwLock::new(DEFAULT_PHRASE_CONTEXT.to_string())),
            tick_interval: Duration::from_secs(1),
            reset_delay: Duration::from_secs(2),
        }
    }

    pub async fn snapshot(&self) -> TimerSnapshot {
        TimerSnapshot::of(&*self.state.lock().await)
    }

    /// Context string sent with motivational-phrase requests, typically the
    /// selected subject's display name.
    pub fn set_phrase_context(&self, context: impl Into<String>) {
        *self.phrase_context.write().unwrap() = context.into();
    }

    pub async fn configure(
        &self,
        duration_seconds: u32,
        subject_id: &str,
    ) -> Result<TimerSnapshot, EngineError> {
        let mut state = self.state.lock().await;
        state.configure(duration_seconds, subject_id)?;
        debug!("configured {duration_seconds}s cycle for subject {subject_id}");
        Ok(TimerSnapshot::of(&state))
    }

    pub async fn start(&self) -> Result<TimerSnapshot, EngineError> {
        let snapshot = {
            let mut state = self.state.lock().await;
            state.start()?;
            info!(
                "cycle {} started: {}s on subject {}",
                state.cycle_id.map(|id| id.to_string()).unwrap_or_default(),
                state.total_seconds,
                state.subject_id.as_deref().unwrap_or_default(),
            );
            TimerSnapshot::of(&state)
        };

        self.spawn_ticker().await;
        self.notifier
            .notify(NoticeKind::Info, "Session started. Focus and do your best!");
        self.request_phrase();
        Ok(snapshot)
    }

    /// Toggles pause. Entering `Paused` cancels the ticker in the same
    /// critical section as the phase change; toggling back restarts it.
    pub async fn pause(&self) -> Result<TimerSnapshot, EngineError> {
        let (snapshot, now_paused) = {
            let mut state = self.state.lock().await;
            let phase = state.pause()?;
            if phase == TimerPhase::Paused {
                self.cancel_ticker().await;
            }
            (TimerSnapshot::of(&state), phase == TimerPhase::Paused)
        };

        if now_paused {
            self.notifier
                .notify(NoticeKind::Info, "Session paused. Take a break if you need one.");
        } else {
            self.spawn_ticker().await;
            self.notifier
                .notify(NoticeKind::Info, "Session resumed. Back to focus!");
        }
        Ok(snapshot)
    }

    pub async fn resume(&self) -> Result<TimerSnapshot, EngineError> {
        let snapshot = {
            let mut state = self.state.lock().await;
            state.resume()?;
            TimerSnapshot::of(&state)
        };

        self.spawn_ticker().await;
        self.notifier
            .notify(NoticeKind::Info, "Session resumed. Back to focus!");
        Ok(snapshot)
    }

    /// Ends the cycle early. Elapsed time of at least one whole minute is
    /// handed to the reconciler; anything shorter is discarded.
    pub async fn stop(&self) -> Result<TimerSnapshot, EngineError> {
        let (snapshot, summary) = {
            let mut state = self.state.lock().await;
            let summary = state.stop()?;
            self.cancel_ticker().await;
            (TimerSnapshot::of(&state), summary)
        };

        info!(
            "cycle {} stopped after {}s",
            summary.cycle_id.map(|id| id.to_string()).unwrap_or_default(),
            summary.elapsed_seconds,
        );

        if summary.elapsed_seconds >= MIN_PERSIST_SECONDS {
            if let Some(subject_id) = summary.subject_id {
                let reconciler = self.reconciler.clone();
                let elapsed = summary.elapsed_seconds;
                tokio::spawn(async move {
                    reconciler.reconcile(&subject_id, elapsed).await;
                });
            }
        } else {
            debug!(
                "discarding {}s cycle, below the {MIN_PERSIST_SECONDS}s persistence threshold",
                summary.elapsed_seconds
            );
        }

        self.notifier
            .notify(NoticeKind::Info, "Session ended. Great work!");
        Ok(snapshot)
    }

    /// Discards progress without persisting. Rejected while actively running.
    pub async fn reset(&self) -> Result<TimerSnapshot, EngineError> {
        let snapshot = {
            let mut state = self.state.lock().await;
            state.reset()?;
            TimerSnapshot::of(&state)
        };

        self.notifier
            .notify(NoticeKind::Info, "Timer reset. Ready for a new session.");
        Ok(snapshot)
    }

    /// Tears down the periodic driver. Also happens implicitly when the last
    /// controller clone is dropped, via `TickerHandle`.
    pub async fn shutdown(&self) {
        self.cancel_ticker().await;
    }

    #[cfg(test)]
    pub(crate) fn with_timing(mut self, tick_interval: Duration, reset_delay: Duration) -> Self {
        self.tick_interval = tick_interval;
        self.reset_delay = reset_delay;
        self
    }

    async fn spawn_ticker(&self) {
        let mut slot = self.ticker.lock().await;
        slot.take(); // cancels any previous driver before the new one exists

        let token = CancellationToken::new();
        let cancelled = token.clone();
        let controller = self.clone();
        let tick_interval = self.tick_interval;

        let handle = tokio::spawn(async move {
            // interval_at skips the immediate first tick a plain interval fires
            let mut interval = time::interval_at(Instant::now() + tick_interval, tick_interval);
            loop {
                tokio::select! {
                    _ = cancelled.cancelled() => break,
                    _ = interval.tick() => {}
                }
                if !controller.advance_tick().await {
                    break;
                }
            }
        });

        *slot = Some(TickerHandle { token, handle });
    }

    async fn cancel_ticker(&self) {
        self.ticker.lock().await.take();
    }

    /// Processes one wall-clock second. Returns false when the driver should
    /// stop, either because the countdown completed or the phase left
    /// `Running` through another transition.
    async fn advance_tick(&self) -> bool {
        let completion = {
            let mut state = self.state.lock().await;
            match state.tick() {
                Tick::Advanced { .. } => return true,
                Tick::Ignored => return false,
                Tick::Completed { elapsed_seconds } => {
                    (state.subject_id.clone(), state.cycle_id, elapsed_seconds)
                }
            }
        };

        let (subject_id, cycle_id, elapsed_seconds) = completion;
        info!(
            "cycle {} completed after the full {elapsed_seconds}s",
            cycle_id.map(|id| id.to_string()).unwrap_or_default(),
        );
        self.notifier
            .notify(NoticeKind::Success, phrases::completion_phrase());

        if let Some(subject_id) = subject_id {
            let reconciler = self.reconciler.clone();
            tokio::spawn(async move {
                reconciler.reconcile(&subject_id, elapsed_seconds).await;
            });
        }

        // Hold the completion display briefly, then return to Idle so the next
        // cycle can start on the same subject without reconfiguration.
        let state = self.state.clone();
        let reset_delay = self.reset_delay;
        tokio::spawn(async move {
            time::sleep(reset_delay).await;
            let mut guard = state.lock().await;
            if guard.phase == TimerPhase::Completed {
                let _ = guard.reset();
            }
        });

        false
    }

    fn request_phrase(&self) {
        let ledger = self.ledger.clone();
        let notifier = self.notifier.clone();
        let context = self.phrase_context.read().unwrap().clone();

        tokio::spawn(async move {
            let phrase = match ledger.motivational_phrase(&context).await {
                Ok(phrase) => phrase,
                Err(err) => {
                    debug!("phrase service unavailable, using local pool: {err}");
                    phrases::fallback_phrase().to_string()
                }
            };
            notifier.notify(NoticeKind::Motivation, &phrase);
        });
    }
}
