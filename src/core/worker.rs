//! Worker thread for gotry's background I/O.
//!
//! The catalog load is the only operation that runs off the UI thread. Requests
//! [WorkerTask] come in from the terminal loop via a channel and results [WorkerResponse]
//! go back the same way, where they are turned into ordinary session events.
//!
//! Every request carries a `request_id`. The loop only keeps the newest id and drops any
//! response tagged with an older one.

use crate::core::{WorkspaceEntry, list_entries};

use crossbeam_channel::{Receiver, Sender, unbounded};
use tracing::{debug, warn};

use std::path::PathBuf;
use std::thread;

/// Tasks sent to the worker thread.
#[derive(Debug)]
pub enum WorkerTask {
    LoadCatalog { base: PathBuf, request_id: u64 },
}

/// Responses sent from the worker thread back to the terminal loop.
#[derive(Debug)]
pub enum WorkerResponse {
    CatalogLoaded {
        entries: Vec<WorkspaceEntry>,
        request_id: u64,
    },
    LoadFailed {
        message: String,
        request_id: u64,
    },
}

impl WorkerResponse {
    pub fn request_id(&self) -> u64 {
        match self {
            WorkerResponse::CatalogLoaded { request_id, .. }
            | WorkerResponse::LoadFailed { request_id, .. } => *request_id,
        }
    }
}

/// Owns the task and response channels of the I/O worker.
pub struct Workers {
    io_tx: Sender<WorkerTask>,
    response_rx: Receiver<WorkerResponse>,
    request_id: u64,
}

impl Workers {
    /// Spawns the I/O worker thread.
    pub fn spawn() -> Self {
        let (io_tx, io_rx) = unbounded::<WorkerTask>();
        let (res_tx, response_rx) = unbounded::<WorkerResponse>();

        start_io_worker(io_rx, res_tx);

        Self {
            io_tx,
            response_rx,
            request_id: 0,
        }
    }

    /// Accessor for the I/O worker task sender.
    pub fn io_tx(&self) -> &Sender<WorkerTask> {
        &self.io_tx
    }

    /// Accessor for the worker response receiver.
    pub fn response_rx(&self) -> &Receiver<WorkerResponse> {
        &self.response_rx
    }

    /// Id of the most recent load request.
    pub fn latest_request(&self) -> u64 {
        self.request_id
    }

    /// Queues a fresh catalog load and returns its request id. Fire and forget.
    pub fn request_catalog(&mut self, base: PathBuf) -> u64 {
        self.request_id = self.request_id.wrapping_add(1);
        let request_id = self.request_id;
        debug!(request_id, base = %base.display(), "catalog load requested");
        if self
            .io_tx
            .send(WorkerTask::LoadCatalog { base, request_id })
            .is_err()
        {
            warn!(request_id, "io worker is gone, load request dropped");
        }
        request_id
    }

    /// Non-blocking drain of all responses that belong to the latest request.
    pub fn drain_current(&self) -> Vec<WorkerResponse> {
        let latest = self.request_id;
        self.response_rx
            .try_iter()
            .filter(|resp| {
                let current = resp.request_id() == latest;
                if !current {
                    debug!(stale = resp.request_id(), latest, "discarding stale catalog");
                }
                current
            })
            .collect()
    }
}

/// Starts the io worker thread, which listens for [WorkerTask] and answers with [WorkerResponse].
///
/// Queued load requests are coalesced so only the newest one hits the filesystem.
fn start_io_worker(task_rx: Receiver<WorkerTask>, res_tx: Sender<WorkerResponse>) {
    thread::spawn(move || {
        while let Ok(task) = task_rx.recv() {
            let WorkerTask::LoadCatalog {
                mut base,
                mut request_id,
            } = task;

            while let Ok(WorkerTask::LoadCatalog {
                base: b,
                request_id: id,
            }) = task_rx.try_recv()
            {
                base = b;
                request_id = id;
            }

            let response = match list_entries(&base) {
                Ok(entries) => {
                    debug!(request_id, count = entries.len(), "catalog loaded");
                    WorkerResponse::CatalogLoaded {
                        entries,
                        request_id,
                    }
                }
                Err(e) => {
                    warn!(request_id, error = %e, "catalog load failed");
                    WorkerResponse::LoadFailed {
                        message: format!("{}: {}", base.display(), e),
                        request_id,
                    }
                }
            };
            if res_tx.send(response).is_err() {
                break;
            }
        }
    });
}
