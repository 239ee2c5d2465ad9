use driftflake_core::{Error, FlakeId};
use tokio::sync::oneshot;

/// One message on the worker's queue. Every variant carries the reply
/// channel its caller is waiting on.
pub(crate) enum Request {
    NextId {
        reply: oneshot::Sender<Result<FlakeId, Error>>,
    },
    NextIdLazy {
        reply: oneshot::Sender<Result<FlakeId, Error>>,
    },
    NextIds {
        count: usize,
        reply: oneshot::Sender<Result<Vec<FlakeId>, Error>>,
    },
    NextIdsLazy {
        count: usize,
        reply: oneshot::Sender<Result<Vec<FlakeId>, Error>>,
    },
    Shutdown {
        ack: oneshot::Sender<()>,
    },
}
