//! Staged generation progress.
//!
//! A fixed sequence of five cosmetic stages, each completing after a delay.
//! Nothing depends on the stages; they run alongside synthesis and stop as
//! soon as cancellation is signalled.

use serde::Serialize;
use std::time::Duration;
use tokio::sync::watch;

/// Stage labels in order.
pub const STAGES: [&str; 5] = [
    "Analyzing genre and mood...",
    "Generating instrumental track...",
    "Processing vocal synthesis...",
    "Applying audio effects...",
    "Finalizing composition...",
];

/// A completed stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StageUpdate {
    /// Zero-based stage index.
    pub index: usize,
    /// Stage label.
    pub label: &'static str,
    /// Overall progress after this stage, 20..=100.
    pub percent: u8,
}

/// All stage updates in order.
pub fn stage_updates() -> impl Iterator<Item = StageUpdate> {
    STAGES.iter().enumerate().map(|(index, &label)| StageUpdate {
        index,
        label,
        percent: ((index + 1) * 100 / STAGES.len()) as u8,
    })
}

/// Resolves once `rx` reads `true`. Never resolves if the sender is gone.
async fn cancelled(rx: &mut watch::Receiver<bool>) {
    if rx.wait_for(|cancel| *cancel).await.is_err() {
        std::future::pending::<()>().await;
    }
}

/// Runs the stages, calling `on_stage` as each one completes.
///
/// Returns `false` if cancelled before the last stage completed.
pub async fn run_stages<F>(delay: Duration, mut cancel: watch::Receiver<bool>, mut on_stage: F) -> bool
where
    F: FnMut(&StageUpdate),
{
    for update in stage_updates() {
        if *cancel.borrow() {
            return false;
        }
        if !delay.is_zero() {
            tokio::select! {
                _ = tokio::time::sleep(delay) => {}
                _ = cancelled(&mut cancel) => return false,
            }
        }
        tracing::info!(stage = update.index, percent = update.percent, "{}", update.label);
        on_stage(&update);
    }
    true
}
