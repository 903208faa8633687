//! Department browser core: pure state machine and view-model helpers.
//!
//! Nothing in this crate performs IO or reads a clock. Time enters through
//! `Msg::Tick`, remote results through `Msg::PageLoaded` and
//! `Msg::DeleteSettled`, and every request to the outside world leaves as an
//! [`Effect`].
mod collection;
mod debounce;
mod dialog;
mod effect;
mod model;
mod msg;
mod notification;
mod permissions;
mod state;
mod update;
mod view_model;

pub use collection::PAGE_SIZE;
pub use debounce::{SearchDebouncer, SEARCH_DEBOUNCE_MS};
pub use dialog::Dialog;
pub use effect::Effect;
pub use model::{
    CurrentUser, DeleteFailure, Department, DepartmentFilter, DepartmentId, DepartmentPage,
    FetchFailure, Millis, Pagination, RequestId, Role,
};
pub use msg::Msg;
pub use notification::{Notification, NotificationChannel, Severity, NOTIFICATION_DURATION_MS};
pub use permissions::{can_create, can_delete, can_edit, is_owned_by, PermissionSource, RolePolicy};
pub use state::AppState;
pub use update::update;
pub use view_model::{AppViewModel, DepartmentCardView, DialogView, EmptyState, LoadingIndicator};
