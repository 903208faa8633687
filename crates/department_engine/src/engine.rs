use std::io;
use std::sync::Arc;
use std::thread;

use department_core::{DepartmentFilter, DepartmentId, Pagination, RequestId};
use department_logging::{dept_debug, dept_info};
use tokio::sync::mpsc as async_mpsc;
use tokio_util::sync::CancellationToken;

use crate::{DepartmentDraft, DepartmentService, EngineEvent};

/// Receives engine results. Called from the engine thread.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

enum EngineCommand {
    Fetch {
        request_id: RequestId,
        filter: DepartmentFilter,
        pagination: Pagination,
    },
    Delete {
        request_id: RequestId,
        id: DepartmentId,
    },
    Save {
        request_id: RequestId,
        draft: DepartmentDraft,
    },
}

/// Runs service calls on a single-threaded tokio runtime owned by a
/// dedicated thread. Once shut down (or dropped) no further events are
/// emitted, including for calls that were already in flight.
pub struct EngineHandle {
    cmd_tx: async_mpsc::UnboundedSender<EngineCommand>,
    cancel: CancellationToken,
}

impl EngineHandle {
    pub fn new(service: Arc<dyn DepartmentService>, sink: Arc<dyn EventSink>) -> io::Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;
        let (cmd_tx, mut cmd_rx) = async_mpsc::unbounded_channel();
        let cancel = CancellationToken::new();
        let loop_cancel = cancel.clone();

        thread::Builder::new()
            .name("department-engine".to_string())
            .spawn(move || {
                runtime.block_on(async move {
                    loop {
                        tokio::select! {
                            _ = loop_cancel.cancelled() => break,
                            command = cmd_rx.recv() => match command {
                                Some(command) => {
                                    tokio::spawn(handle_command(
                                        service.clone(),
                                        command,
                                        sink.clone(),
                                        loop_cancel.clone(),
                                    ));
                                }
                                None => break,
                            },
                        }
                    }
                });
                dept_info!("Department engine stopped");
            })?;

        Ok(Self { cmd_tx, cancel })
    }

    pub fn fetch(&self, request_id: RequestId, filter: DepartmentFilter, pagination: Pagination) {
        self.send(EngineCommand::Fetch {
            request_id,
            filter,
            pagination,
        });
    }

    pub fn delete(&self, request_id: RequestId, id: DepartmentId) {
        self.send(EngineCommand::Delete { request_id, id });
    }

    /// Submits a form save; `request_id` is echoed on the matching `SaveCompleted`.
    pub fn save(&self, request_id: RequestId, draft: DepartmentDraft) {
        self.send(EngineCommand::Save { request_id, draft });
    }

    /// Stops the engine; responses still in flight are dropped.
    pub fn shutdown(&self) {
        self.cancel.cancel();
    }

    fn send(&self, command: EngineCommand) {
        if self.cancel.is_cancelled() || self.cmd_tx.send(command).is_err() {
            dept_debug!("Engine is stopped; command dropped");
        }
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn handle_command(
    service: Arc<dyn DepartmentService>,
    command: EngineCommand,
    sink: Arc<dyn EventSink>,
    cancel: CancellationToken,
) {
    let event = match command {
        EngineCommand::Fetch {
            request_id,
            filter,
            pagination,
        } => {
            let result = tokio::select! {
                _ = cancel.cancelled() => return,
                result = service.list(&filter, pagination) => result,
            };
            EngineEvent::PageFetched { request_id, result }
        }
        EngineCommand::Delete { request_id, id } => {
            let result = tokio::select! {
                _ = cancel.cancelled() => return,
                result = service.remove(id) => result,
            };
            EngineEvent::DeleteCompleted { request_id, result }
        }
        EngineCommand::Save { request_id, draft } => {
            let result = tokio::select! {
                _ = cancel.cancelled() => return,
                result = service.save(&draft) => result,
            };
            EngineEvent::SaveCompleted { request_id, result }
        }
    };

    if !cancel.is_cancelled() {
        sink.emit(event);
    }
}
