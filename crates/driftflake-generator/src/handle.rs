use crate::{error::GeneratorError, request::Request, worker::worker_loop};
use driftflake_core::{Driftflake, DriftflakeSettings, Error, FlakeId};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time;

/// How long a caller waits for the worker's reply before giving up.
pub const DEFAULT_REPLY_TIMEOUT: Duration = Duration::from_secs(5);

/// Requests queued beyond this depth make senders wait for capacity.
const REQUEST_QUEUE_DEPTH: usize = 128;

/// Cloneable façade over the worker task that owns a [`Driftflake`].
///
/// Dropping every handle closes the request channel and lets the
/// worker exit on its own; [`stop`](Self::stop) shuts it down
/// explicitly and waits for the acknowledgement.
#[derive(Clone, Debug)]
pub struct GeneratorHandle {
    tx: mpsc::Sender<Request>,
    reply_timeout: Duration,
}

impl GeneratorHandle {
    /// Validates the settings, spawns the owning worker task, and
    /// returns a handle to it.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(settings: DriftflakeSettings) -> Result<Self, GeneratorError> {
        Self::start_with_timeout(settings, DEFAULT_REPLY_TIMEOUT)
    }

    /// Like [`start`](Self::start), with a custom reply timeout.
    pub fn start_with_timeout(
        settings: DriftflakeSettings,
        reply_timeout: Duration,
    ) -> Result<Self, GeneratorError> {
        // Validate before spawning so a bad configuration fails the
        // caller instead of a worker nobody is watching.
        let flake = Driftflake::new(settings)?;
        let (tx, rx) = mpsc::channel(REQUEST_QUEUE_DEPTH);
        tokio::spawn(worker_loop(rx, flake));
        Ok(Self { tx, reply_timeout })
    }

    /// Mints one id from the wall clock.
    pub async fn generate(&self) -> Result<FlakeId, GeneratorError> {
        let (reply, rx) = oneshot::channel();
        self.send(Request::NextId { reply }).await?;
        self.await_reply(rx).await
    }

    /// Mints one id from the logical clock, ignoring wall time.
    pub async fn generate_lazy(&self) -> Result<FlakeId, GeneratorError> {
        let (reply, rx) = oneshot::channel();
        self.send(Request::NextIdLazy { reply }).await?;
        self.await_reply(rx).await
    }

    /// Mints `count` wall-clock ids as one serialized batch, in
    /// generation order.
    pub async fn generate_many(&self, count: usize) -> Result<Vec<FlakeId>, GeneratorError> {
        let (reply, rx) = oneshot::channel();
        self.send(Request::NextIds { count, reply }).await?;
        self.await_reply(rx).await
    }

    /// Mints `count` lazy ids as one serialized batch, in generation
    /// order.
    pub async fn generate_many_lazy(&self, count: usize) -> Result<Vec<FlakeId>, GeneratorError> {
        let (reply, rx) = oneshot::channel();
        self.send(Request::NextIdsLazy { count, reply }).await?;
        self.await_reply(rx).await
    }

    /// Shuts the worker down and waits for its acknowledgement.
    ///
    /// Requests issued after this (from any clone of the handle) fail
    /// with [`GeneratorError::Stopped`]. The in-memory counters are
    /// discarded; there is nothing to drain.
    pub async fn stop(&self) {
        let (ack, rx) = oneshot::channel();
        if self.send(Request::Shutdown { ack }).await.is_err() {
            // Already stopped.
            return;
        }
        let _ = time::timeout(self.reply_timeout, rx).await;
    }

    async fn send(&self, request: Request) -> Result<(), GeneratorError> {
        self.tx
            .send(request)
            .await
            .map_err(|_| GeneratorError::Stopped)
    }

    async fn await_reply<T>(
        &self,
        rx: oneshot::Receiver<Result<T, Error>>,
    ) -> Result<T, GeneratorError> {
        match time::timeout(self.reply_timeout, rx).await {
            // The worker dropped the reply channel without answering;
            // it only does that when shutting down.
            Ok(Err(_)) => Err(GeneratorError::Stopped),
            Ok(Ok(outcome)) => outcome.map_err(GeneratorError::from),
            Err(_) => Err(GeneratorError::ReplyTimeout),
        }
    }
}
