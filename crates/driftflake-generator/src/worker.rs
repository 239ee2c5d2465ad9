use crate::request::Request;
use driftflake_core::{Clock, Driftflake};
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Runs the task that exclusively owns the generator state machine.
///
/// Requests are processed to completion, one at a time, in channel
/// order; no mutation of the counters is ever in flight concurrently.
/// The loop ends when a shutdown request arrives or every handle has
/// been dropped. Queued requests remaining after shutdown are dropped,
/// which closes their reply channels and surfaces `Stopped` to the
/// callers.
pub(crate) async fn worker_loop<C: Clock>(mut rx: mpsc::Receiver<Request>, mut flake: Driftflake<C>) {
    debug!("generator worker started");

    while let Some(request) = rx.recv().await {
        match request {
            Request::NextId { reply } => {
                if reply.send(flake.next_id()).is_err() {
                    warn!("caller went away before its id reply was sent");
                }
            }
            Request::NextIdLazy { reply } => {
                if reply.send(flake.next_id_lazy()).is_err() {
                    warn!("caller went away before its id reply was sent");
                }
            }
            Request::NextIds { count, reply } => {
                if reply.send(flake.next_ids(count)).is_err() {
                    warn!(count, "caller went away before its batch reply was sent");
                }
            }
            Request::NextIdsLazy { count, reply } => {
                if reply.send(flake.next_ids_lazy(count)).is_err() {
                    warn!(count, "caller went away before its batch reply was sent");
                }
            }
            Request::Shutdown { ack } => {
                if ack.send(()).is_err() {
                    warn!("caller went away before the shutdown was acknowledged");
                }
                break;
            }
        }
    }

    debug!("generator worker stopped");
}
