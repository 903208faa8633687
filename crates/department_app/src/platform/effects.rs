use std::io;
use std::sync::{mpsc, Arc};

use department_core::{DeleteFailure, Effect, FetchFailure, Msg, RequestId};
use department_engine::{
    DepartmentDraft, DepartmentService, EngineEvent, EngineHandle, EventSink,
};
use department_logging::{dept_info, dept_warn};

use super::app::AppEvent;

/// Executes core effects against the engine and feeds results back to the app loop.
pub struct EffectRunner {
    engine: EngineHandle,
    events: mpsc::Sender<AppEvent>,
}

impl EffectRunner {
    pub fn new(
        service: Arc<dyn DepartmentService>,
        events: mpsc::Sender<AppEvent>,
    ) -> io::Result<Self> {
        let sink = Arc::new(AppEventSink {
            tx: events.clone(),
        });
        let engine = EngineHandle::new(service, sink)?;
        Ok(Self { engine, events })
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchPage {
                    request_id,
                    filter,
                    pagination,
                } => {
                    dept_info!(
                        "FetchPage request_id={} name={:?} page={} size={}",
                        request_id,
                        filter.name,
                        pagination.page,
                        pagination.size
                    );
                    self.engine.fetch(request_id, filter, pagination);
                }
                Effect::DeleteDepartment { request_id, id } => {
                    dept_info!("DeleteDepartment request_id={} id={}", request_id, id);
                    self.engine.delete(request_id, id);
                }
                Effect::NavigateToDepartment { id } => {
                    dept_info!("NavigateToDepartment id={}", id);
                    let _ = self.events.send(AppEvent::Navigated(id));
                }
            }
        }
    }

    /// Submits the department form on behalf of the user.
    pub fn submit_form(&self, request_id: RequestId, draft: DepartmentDraft) {
        dept_info!(
            "SaveDepartment request_id={} id={:?} name={:?}",
            request_id,
            draft.id,
            draft.name
        );
        self.engine.save(request_id, draft);
    }

    pub fn shutdown(&self) {
        self.engine.shutdown();
    }
}

struct AppEventSink {
    tx: mpsc::Sender<AppEvent>,
}

impl EventSink for AppEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(AppEvent::Engine(event));
    }
}

/// Translates an engine result into the message the core expects.
pub(crate) fn to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::PageFetched { request_id, result } => Msg::PageLoaded {
            request_id,
            result: result.map_err(|err| {
                dept_warn!("Listing request {} failed: {}", request_id, err);
                FetchFailure::new(format!("Could not load departments: {err}"))
            }),
        },
        EngineEvent::DeleteCompleted { request_id, result } => Msg::DeleteSettled {
            request_id,
            result: result.map_err(|err| {
                dept_warn!("Delete request {} failed: {}", request_id, err);
                DeleteFailure {
                    message: err.server_message,
                }
            }),
        },
        EngineEvent::SaveCompleted { result, .. } => match result {
            Ok(department) => Msg::FormSaved(department),
            Err(err) => Msg::FormSaveFailed(form_error_message(&err)),
        },
    }
}

pub(crate) fn form_error_message(err: &department_engine::SaveError) -> String {
    match &err.server_message {
        Some(message) => message.clone(),
        None => format!("Could not save department: {}", err.kind),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use department_core::{Department, DepartmentPage};
    use department_engine::{FailureKind, FetchError, MutationError};

    #[test]
    fn fetch_failure_becomes_readable_banner_text() {
        let msg = to_msg(EngineEvent::PageFetched {
            request_id: 4,
            result: Err(FetchError {
                kind: FailureKind::Timeout,
                message: "operation timed out".to_string(),
            }),
        });

        match msg {
            Msg::PageLoaded {
                request_id: 4,
                result: Err(failure),
            } => {
                assert!(failure.message.starts_with("Could not load departments"));
                assert!(failure.message.contains("timeout"));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn page_passes_through_untouched() {
        let page = DepartmentPage::new(vec![Department::new(1, "Engineering")], 1);
        let msg = to_msg(EngineEvent::PageFetched {
            request_id: 1,
            result: Ok(page.clone()),
        });
        assert_eq!(
            msg,
            Msg::PageLoaded {
                request_id: 1,
                result: Ok(page)
            }
        );
    }

    #[test]
    fn delete_failure_keeps_only_server_message() {
        let msg = to_msg(EngineEvent::DeleteCompleted {
            request_id: 9,
            result: Err(MutationError {
                kind: FailureKind::HttpStatus(409),
                server_message: Some("in use".to_string()),
            }),
        });
        assert_eq!(
            msg,
            Msg::DeleteSettled {
                request_id: 9,
                result: Err(DeleteFailure::new("in use"))
            }
        );
    }

    #[test]
    fn save_failure_without_message_names_the_cause() {
        let msg = to_msg(EngineEvent::SaveCompleted {
            request_id: 1,
            result: Err(MutationError {
                kind: FailureKind::Network,
                server_message: None,
            }),
        });
        assert_eq!(
            msg,
            Msg::FormSaveFailed("Could not save department: network error".to_string())
        );
    }
}
