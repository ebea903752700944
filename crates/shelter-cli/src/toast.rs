//! Transient success/failure notifications shown in the status bar.

use std::{
  collections::VecDeque,
  time::{Duration, Instant},
};

/// How long a toast stays visible.
pub const TOAST_TTL: Duration = Duration::from_secs(4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
  Success,
  Failure,
}

#[derive(Debug, Clone)]
pub struct Toast {
  pub kind:      ToastKind,
  pub message:   String,
  pub raised_at: Instant,
}

/// Newest-last queue of notifications. Nothing ever blocks on a toast; they
/// simply age out.
#[derive(Debug, Default)]
pub struct Toasts {
  items: VecDeque<Toast>,
}

impl Toasts {
  pub fn success(&mut self, message: impl Into<String>) {
    self.push(ToastKind::Success, message.into());
  }

  pub fn failure(&mut self, message: impl Into<String>) {
    self.push(ToastKind::Failure, message.into());
  }

  fn push(&mut self, kind: ToastKind, message: String) {
    self.items.push_back(Toast { kind, message, raised_at: Instant::now() });
  }

  /// Drop toasts older than [`TOAST_TTL`] as of `now`.
  pub fn prune(&mut self, now: Instant) {
    self
      .items
      .retain(|t| now.saturating_duration_since(t.raised_at) < TOAST_TTL);
  }

  /// The newest toast still visible at `now`.
  pub fn current(&self, now: Instant) -> Option<&Toast> {
    self
      .items
      .iter()
      .rev()
      .find(|t| now.saturating_duration_since(t.raised_at) < TOAST_TTL)
  }

  /// The newest toast regardless of age.
  #[cfg(test)]
  pub fn last(&self) -> Option<&Toast> { self.items.back() }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn newest_toast_wins() {
    let mut toasts = Toasts::default();
    toasts.success("one");
    toasts.failure("two");
    let now = Instant::now();
    let current = toasts.current(now).unwrap();
    assert_eq!(current.message, "two");
    assert_eq!(current.kind, ToastKind::Failure);
  }

  #[test]
  fn toasts_expire() {
    let mut toasts = Toasts::default();
    toasts.success("saved");
    let later = Instant::now() + TOAST_TTL + Duration::from_millis(1);
    assert!(toasts.current(later).is_none());
    toasts.prune(later);
    assert!(toasts.last().is_none());
  }
}
