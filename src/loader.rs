//! Background load worker
//!
//! Parsing and normalization are long-running next to interactive work, so
//! they run behind a message-passing boundary: one request per dropped file,
//! answered over a dedicated reply channel. The worker task processes
//! requests strictly in order, which serializes concurrent file drops, and
//! each parse runs under `spawn_blocking` so the async runtime is never
//! stalled. There is no cancellation of an in-flight load; a failed load
//! simply leaves the previously installed dataset authoritative.

use crate::error::GedcomError;
use crate::gedcom::{Dataset, normalize, parse};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, warn};

struct LoadRequest {
    bytes: Vec<u8>,
    reply: oneshot::Sender<Result<Dataset, GedcomError>>,
}

/// Handle to the load worker. Cheap to clone; the worker task lives for as
/// long as any handle does.
#[derive(Clone)]
pub struct Loader {
    requests: mpsc::UnboundedSender<LoadRequest>,
}

impl Loader {
    /// Start the worker task on the current tokio runtime.
    pub fn spawn() -> Self {
        let (requests, mut queue) = mpsc::unbounded_channel::<LoadRequest>();

        tokio::spawn(async move {
            while let Some(LoadRequest { bytes, reply }) = queue.recv().await {
                let result = match tokio::task::spawn_blocking(move || load_dataset(&bytes)).await {
                    Ok(result) => result,
                    Err(join_error) => {
                        warn!(error = %join_error, "load task died");
                        Err(GedcomError::LoadTaskFailed(join_error.to_string()))
                    }
                };
                // The requester may have given up waiting; that is fine.
                let _ = reply.send(result);
            }
            debug!("load worker shutting down, all handles dropped");
        });

        Self { requests }
    }

    /// Load one source file: decode, parse, normalize. Awaited per file;
    /// concurrent callers are answered in request order.
    pub async fn load_data(&self, bytes: Vec<u8>) -> Result<Dataset, GedcomError> {
        let (reply, response) = oneshot::channel();
        self.requests
            .send(LoadRequest { bytes, reply })
            .map_err(|_| GedcomError::WorkerGone)?;
        response.await.map_err(|_| GedcomError::WorkerGone)?
    }
}

/// The synchronous load pipeline, shared by the worker and direct callers.
pub(crate) fn load_dataset(bytes: &[u8]) -> Result<Dataset, GedcomError> {
    if bytes.is_empty() {
        return Err(GedcomError::EmptyFile);
    }
    let text = String::from_utf8_lossy(bytes);
    let forest = parse(&text);
    Ok(normalize(&forest))
}
