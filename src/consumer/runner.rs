//! The long-lived consumption loop and its cross-thread shutdown handle.

use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info};

use crate::consumer::{ConsumerError, RecordHandler, RecordStream};

const STATE_RUNNING: u8 = 0;
const STATE_SHUTTING_DOWN: u8 = 1;
const STATE_CLOSED: u8 = 2;

/// The lifecycle of a [`ConsumerRunner`].
///
/// `Running` until shutdown is requested, `ShuttingDown` while the in-flight
/// poll is being interrupted, `Closed` once the broker connection has been
/// released. No transition leaves `Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunnerState {
    Running,
    ShuttingDown,
    Closed,
}

impl RunnerState {
    fn from_u8(value: u8) -> RunnerState {
        match value {
            STATE_SHUTTING_DOWN => RunnerState::ShuttingDown,
            STATE_CLOSED => RunnerState::Closed,
            _ => RunnerState::Running,
        }
    }
}

/// Drives a statically partition-assigned consumption loop with safe
/// external cancellation.
pub struct ConsumerRunner<S: RecordStream> {
    stream: Arc<S>,
    handler: Box<dyn RecordHandler>,
    closed: Arc<AtomicBool>,
    state: Arc<AtomicU8>,
    poll_timeout: Duration,
}

impl<S: RecordStream> ConsumerRunner<S> {
    /// Wrap an already-assigned stream with a handler and a poll timeout.
    pub fn new(stream: S, handler: impl RecordHandler + 'static, poll_timeout: Duration) -> Self {
        Self {
            stream: Arc::new(stream),
            handler: Box::new(handler),
            closed: Arc::new(AtomicBool::new(false)),
            state: Arc::new(AtomicU8::new(STATE_RUNNING)),
            poll_timeout,
        }
    }

    /// A cloneable handle for requesting shutdown from another thread.
    pub fn shutdown_handle(&self) -> ShutdownHandle<S> {
        ShutdownHandle {
            stream: Arc::clone(&self.stream),
            closed: Arc::clone(&self.closed),
            state: Arc::clone(&self.state),
        }
    }

    pub fn state(&self) -> RunnerState {
        RunnerState::from_u8(self.state.load(Ordering::SeqCst))
    }

    /// Run the poll loop until shutdown or a fatal error.
    ///
    /// A wakeup observed after shutdown was requested ends the loop cleanly;
    /// a wakeup nobody requested is unexpected and propagates as an error,
    /// as do broker and decode failures. On every exit path the stream is
    /// closed exactly once, from this thread.
    pub fn run(mut self) -> Result<(), ConsumerError> {
        let outcome = loop {
            if self.closed.load(Ordering::SeqCst) {
                break Ok(());
            }
            match self.stream.poll(self.poll_timeout) {
                Ok(records) => {
                    if !records.is_empty() {
                        self.handler.handle_records(records);
                    }
                }
                Err(ConsumerError::Wakeup) => {
                    if self.closed.load(Ordering::SeqCst) {
                        break Ok(());
                    }
                    break Err(ConsumerError::Wakeup);
                }
                Err(err) => break Err(err),
            }
        };

        self.stream.close();
        self.state.store(STATE_CLOSED, Ordering::SeqCst);

        if let Err(ref err) = outcome {
            error!("Consumer loop terminated: {}", err);
        }
        outcome
    }
}

/// Requests cancellation of a running [`ConsumerRunner`].
pub struct ShutdownHandle<S: RecordStream> {
    stream: Arc<S>,
    closed: Arc<AtomicBool>,
    state: Arc<AtomicU8>,
}

impl<S: RecordStream> Clone for ShutdownHandle<S> {
    fn clone(&self) -> Self {
        Self {
            stream: Arc::clone(&self.stream),
            closed: Arc::clone(&self.closed),
            state: Arc::clone(&self.state),
        }
    }
}

impl<S: RecordStream> ShutdownHandle<S> {
    /// Request shutdown: set the cancellation flag and wake the in-progress
    /// (or next) poll. Idempotent and safe under concurrent invocation.
    pub fn shutdown(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }
        info!("Shutting down consumer");
        let _ = self.state.compare_exchange(
            STATE_RUNNING,
            STATE_SHUTTING_DOWN,
            Ordering::SeqCst,
            Ordering::SeqCst,
        );
        self.stream.wake();
    }

    pub fn state(&self) -> RunnerState {
        RunnerState::from_u8(self.state.load(Ordering::SeqCst))
    }
}
