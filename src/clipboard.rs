// src/clipboard.rs
//! Clipboard copy with a scheduled, cancellable clear.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use thiserror::Error;

/// How long a copied secret stays on the clipboard.
pub const CLEAR_AFTER: Duration = Duration::from_secs(30);
/// How long the "copied" indicator stays visible.
pub const COPIED_INDICATOR: Duration = Duration::from_secs(2);

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("Clipboard access failed: {0}")]
    Access(String),
}

/// What happened to a scheduled clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClearOutcome {
    /// The secret was wiped.
    Cleared,
    /// The clipboard held something else by then and was left alone.
    Replaced,
    /// Reading or clearing the clipboard failed.
    Failed,
    /// The clear was cancelled before it fired.
    Cancelled,
}

pub trait ClipboardBackend {
    fn get_text(&mut self) -> Result<String, ClipboardError>;

    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;

    fn clear(&mut self) -> Result<(), ClipboardError>;
}

impl<B: ClipboardBackend + ?Sized> ClipboardBackend for Box<B> {
    fn get_text(&mut self) -> Result<String, ClipboardError> {
        (**self).get_text()
    }

    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        (**self).set_text(text)
    }

    fn clear(&mut self) -> Result<(), ClipboardError> {
        (**self).clear()
    }
}

/// Opener for a boxed backend, the form the CLI holds on to.
pub type OpenClipboard = fn() -> Result<Box<dyn ClipboardBackend>, ClipboardError>;

/// The system clipboard through `arboard`.
pub struct SystemClipboard {
    inner: arboard::Clipboard,
}

impl SystemClipboard {
    pub fn open() -> Result<Self, ClipboardError> {
        arboard::Clipboard::new()
            .map(|inner| Self { inner })
            .map_err(|e| ClipboardError::Unavailable(e.to_string()))
    }

    pub fn open_boxed() -> Result<Box<dyn ClipboardBackend>, ClipboardError> {
        Ok(Box::new(Self::open()?))
    }
}

impl ClipboardBackend for SystemClipboard {
    fn get_text(&mut self) -> Result<String, ClipboardError> {
        self.inner
            .get_text()
            .map_err(|e| ClipboardError::Access(e.to_string()))
    }

    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        self.inner
            .set_text(text.to_string())
            .map_err(|e| ClipboardError::Access(e.to_string()))
    }

    fn clear(&mut self) -> Result<(), ClipboardError> {
        self.inner
            .clear()
            .map_err(|e| ClipboardError::Access(e.to_string()))
    }
}

struct PendingClear {
    cancel: Sender<()>,
    worker: JoinHandle<ClearOutcome>,
}

/// Copies secrets and wipes them after `clear_after`.
///
/// The backend is opened on the worker thread and kept alive until the
/// clear fires, so backends need not be `Send`. Only a clipboard that still
/// holds the copied secret is wiped. Dropping the manager with a clear
/// pending blocks until that clear has run.
pub struct ClipboardManager<F> {
    open: F,
    clear_after: Duration,
    pending: Option<PendingClear>,
}

impl ClipboardManager<OpenClipboard> {
    pub fn system(clear_after: Duration) -> Self {
        let open: OpenClipboard = SystemClipboard::open_boxed;
        ClipboardManager::new(open, clear_after)
    }
}

impl<B, F> ClipboardManager<F>
where
    B: ClipboardBackend,
    F: Fn() -> Result<B, ClipboardError> + Clone + Send + 'static,
{
    pub fn new(open: F, clear_after: Duration) -> Self {
        Self {
            open,
            clear_after,
            pending: None,
        }
    }

    pub fn clear_after(&self) -> Duration {
        self.clear_after
    }

    /// Copy `secret` and schedule its removal. A clear still pending from an
    /// earlier copy is cancelled first.
    pub fn copy(&mut self, secret: &str) -> Result<(), ClipboardError> {
        self.cancel();

        let (cancel_tx, cancel_rx) = mpsc::channel::<()>();
        let (ready_tx, ready_rx) = mpsc::channel::<Result<(), ClipboardError>>();
        let open = self.open.clone();
        let secret = secret.to_string();
        let clear_after = self.clear_after;

        let worker = thread::spawn(move || {
            let deadline = Instant::now() + clear_after;
            let mut backend = match open().and_then(|mut b| b.set_text(&secret).map(|_| b)) {
                Ok(backend) => {
                    let _ = ready_tx.send(Ok(()));
                    backend
                }
                Err(e) => {
                    let _ = ready_tx.send(Err(e));
                    return ClearOutcome::Failed;
                }
            };

            // Only an explicit cancel stops the clear; a dropped sender still clears on time
            match cancel_rx.recv_timeout(clear_after) {
                Ok(()) => return ClearOutcome::Cancelled,
                Err(RecvTimeoutError::Timeout) => {}
                Err(RecvTimeoutError::Disconnected) => {
                    thread::sleep(deadline.saturating_duration_since(Instant::now()));
                }
            }

            match backend.get_text() {
                Ok(current) if current == secret => match backend.clear() {
                    Ok(()) => {
                        log::info!("Clipboard cleared after {}s", clear_after.as_secs());
                        ClearOutcome::Cleared
                    }
                    Err(e) => {
                        log::warn!("Failed to clear clipboard: {}", e);
                        ClearOutcome::Failed
                    }
                },
                Ok(_) => {
                    log::debug!("Clipboard content changed since copy, leaving it alone");
                    ClearOutcome::Replaced
                }
                Err(e) => {
                    log::warn!("Failed to read clipboard before clearing: {}", e);
                    ClearOutcome::Failed
                }
            }
        });

        match ready_rx.recv() {
            Ok(Ok(())) => {
                self.pending = Some(PendingClear {
                    cancel: cancel_tx,
                    worker,
                });
                Ok(())
            }
            Ok(Err(e)) => {
                let _ = worker.join();
                Err(e)
            }
            Err(_) => {
                let _ = worker.join();
                Err(ClipboardError::Access("clipboard worker exited".to_string()))
            }
        }
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Abort the scheduled clear, leaving the clipboard as it is.
    pub fn cancel(&mut self) {
        if let Some(pending) = self.pending.take() {
            let _ = pending.cancel.send(());
            let _ = pending.worker.join();
        }
    }

    /// Block until the scheduled clear has run. `None` when nothing was
    /// pending.
    pub fn wait(&mut self) -> Option<ClearOutcome> {
        self.pending.take().map(|pending| {
            let outcome = pending.worker.join().unwrap_or(ClearOutcome::Failed);
            // keep the sender alive until the worker is done
            drop(pending.cancel);
            outcome
        })
    }
}

impl<F> Drop for ClipboardManager<F> {
    fn drop(&mut self) {
        if let Some(pending) = self.pending.take() {
            log::debug!("Waiting for the pending clipboard clear");
            // the worker sees the sender disconnect and clears at its deadline
            drop(pending.cancel);
            let _ = pending.worker.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct FakeClipboard {
        content: Arc<Mutex<String>>,
    }

    impl ClipboardBackend for FakeClipboard {
        fn get_text(&mut self) -> Result<String, ClipboardError> {
            Ok(self.content.lock().unwrap().clone())
        }

        fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
            *self.content.lock().unwrap() = text.to_string();
            Ok(())
        }

        fn clear(&mut self) -> Result<(), ClipboardError> {
            self.content.lock().unwrap().clear();
            Ok(())
        }
    }

    fn manager(
        fake: &FakeClipboard,
        clear_after: Duration,
    ) -> ClipboardManager<impl Fn() -> Result<FakeClipboard, ClipboardError> + Clone + Send + 'static> {
        let fake = fake.clone();
        ClipboardManager::new(
            move || -> Result<FakeClipboard, ClipboardError> { Ok(fake.clone()) },
            clear_after,
        )
    }

    #[test]
    fn secret_is_cleared_after_the_delay() {
        let fake = FakeClipboard::default();
        let mut clipboard = manager(&fake, Duration::from_millis(20));

        clipboard.copy("s3cret").unwrap();
        assert_eq!(*fake.content.lock().unwrap(), "s3cret");
        assert!(clipboard.is_pending());

        assert_eq!(clipboard.wait(), Some(ClearOutcome::Cleared));
        assert_eq!(*fake.content.lock().unwrap(), "");
        assert!(!clipboard.is_pending());
        assert_eq!(clipboard.wait(), None);
    }

    #[test]
    fn cancel_keeps_the_secret() {
        let fake = FakeClipboard::default();
        let mut clipboard = manager(&fake, Duration::from_secs(60));

        clipboard.copy("s3cret").unwrap();
        clipboard.cancel();
        assert_eq!(*fake.content.lock().unwrap(), "s3cret");
        assert_eq!(clipboard.wait(), None);
    }

    #[test]
    fn dropping_the_manager_still_clears() {
        let fake = FakeClipboard::default();
        {
            let mut clipboard = manager(&fake, Duration::from_millis(50));
            clipboard.copy("s3cret").unwrap();
            assert_eq!(*fake.content.lock().unwrap(), "s3cret");
        }
        assert_eq!(*fake.content.lock().unwrap(), "");
    }

    #[test]
    fn replaced_content_is_left_alone() {
        let fake = FakeClipboard::default();
        let mut clipboard = manager(&fake, Duration::from_millis(50));

        clipboard.copy("s3cret").unwrap();
        *fake.content.lock().unwrap() = "something else".to_string();

        assert_eq!(clipboard.wait(), Some(ClearOutcome::Replaced));
        assert_eq!(*fake.content.lock().unwrap(), "something else");
    }

    #[test]
    fn copying_again_reschedules() {
        let fake = FakeClipboard::default();
        let mut clipboard = manager(&fake, Duration::from_millis(20));

        clipboard.copy("first").unwrap();
        clipboard.copy("second").unwrap();
        assert_eq!(*fake.content.lock().unwrap(), "second");
        assert_eq!(clipboard.wait(), Some(ClearOutcome::Cleared));
        assert_eq!(*fake.content.lock().unwrap(), "");
    }

    #[derive(Clone, Default)]
    struct StuckClipboard {
        content: Arc<Mutex<String>>,
    }

    impl ClipboardBackend for StuckClipboard {
        fn get_text(&mut self) -> Result<String, ClipboardError> {
            Ok(self.content.lock().unwrap().clone())
        }

        fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
            *self.content.lock().unwrap() = text.to_string();
            Ok(())
        }

        fn clear(&mut self) -> Result<(), ClipboardError> {
            Err(ClipboardError::Access("clipboard is locked".to_string()))
        }
    }

    #[test]
    fn failed_clear_is_not_reported_as_replaced() {
        let stuck = StuckClipboard::default();
        let opened = stuck.clone();
        let mut clipboard = ClipboardManager::new(
            move || -> Result<StuckClipboard, ClipboardError> { Ok(opened.clone()) },
            Duration::from_millis(20),
        );

        clipboard.copy("s3cret").unwrap();
        assert_eq!(clipboard.wait(), Some(ClearOutcome::Failed));
        assert_eq!(*stuck.content.lock().unwrap(), "s3cret");
    }

    #[test]
    fn boxed_backends_work_through_the_manager() {
        let fake = FakeClipboard::default();
        let opened = fake.clone();
        let mut clipboard = ClipboardManager::new(
            move || -> Result<Box<dyn ClipboardBackend>, ClipboardError> {
                Ok(Box::new(opened.clone()))
            },
            Duration::from_millis(20),
        );

        clipboard.copy("s3cret").unwrap();
        assert_eq!(clipboard.wait(), Some(ClearOutcome::Cleared));
        assert_eq!(*fake.content.lock().unwrap(), "");
    }

    #[test]
    fn open_failure_is_reported() {
        let mut clipboard = ClipboardManager::new(
            || -> Result<FakeClipboard, ClipboardError> {
                Err(ClipboardError::Unavailable("no display".to_string()))
            },
            CLEAR_AFTER,
        );

        assert!(matches!(
            clipboard.copy("s3cret"),
            Err(ClipboardError::Unavailable(_))
        ));
        assert!(!clipboard.is_pending());
    }
}
