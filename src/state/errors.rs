#[cfg(test)]
#[path = "errors_test.rs"]
mod errors_test;

use std::time::Duration;

/// How long a surfaced backend error stays visible before auto-dismissal.
pub const DISMISS_AFTER: Duration = Duration::from_secs(8);

/// Transient surface for `async-error` notifications.
///
/// Errors are ephemeral: showing a new one replaces the previous one, and a
/// dismiss timer started for an older error must not clear a newer one. The
/// epoch ties each timer to the error it was started for.
#[derive(Clone, Debug, Default)]
pub struct ErrorState {
    pub message: Option<String>,
    epoch: u64,
}

impl ErrorState {
    /// Display `message`, replacing whatever was shown. Returns the epoch the
    /// caller should pass to [`Self::dismiss_if_current`] when its timer fires.
    pub fn show(&mut self, message: impl Into<String>) -> u64 {
        self.message = Some(message.into());
        self.epoch += 1;
        self.epoch
    }

    /// Manual dismissal (user clicked the toast away).
    pub fn dismiss(&mut self) {
        self.message = None;
    }

    /// Timer-driven dismissal: clears only if no newer error has been shown
    /// since `epoch`.
    pub fn dismiss_if_current(&mut self, epoch: u64) {
        if self.epoch == epoch {
            self.message = None;
        }
    }
}
