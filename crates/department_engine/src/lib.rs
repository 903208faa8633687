//! Department engine: data service client and effect execution.
mod engine;
mod service;
mod types;

pub use engine::{EngineHandle, EventSink};
pub use service::{DepartmentService, ReqwestDepartmentService, ServiceSettings};
pub use types::{
    DeleteError, DepartmentDraft, EngineEvent, FailureKind, FetchError, MutationError, SaveError,
    ServiceSetupError,
};
