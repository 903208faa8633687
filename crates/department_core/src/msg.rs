use crate::{
    CurrentUser, DeleteFailure, Department, DepartmentId, DepartmentPage, FetchFailure, Millis,
    RequestId,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// The view was mounted; triggers the initial fetch.
    Mounted,
    /// The view is going away; pending timers and requests are abandoned.
    Unmounted,
    /// Logical clock update from the driver.
    Tick { now: Millis },
    /// User edited the search box (raw, not yet debounced).
    SearchInputChanged(String),
    /// User picked a page (1-based).
    PageRequested(u32),
    /// User asked for a reload of the current page.
    RefreshRequested,
    /// Data service answered a `FetchPage` effect.
    PageLoaded {
        request_id: RequestId,
        result: Result<DepartmentPage, FetchFailure>,
    },
    /// Authentication context changed. `None` means signed out.
    AuthChanged(Option<CurrentUser>),
    AddClicked,
    EditClicked(DepartmentId),
    DeleteClicked(DepartmentId),
    /// Form collaborator saved the entity.
    FormSaved(Department),
    /// Form collaborator was closed without saving.
    FormCancelled,
    /// Form collaborator reported a submission error it already surfaced itself.
    FormSaveFailed(String),
    DeleteConfirmed,
    DeleteCancelled,
    /// Data service answered a `DeleteDepartment` effect.
    DeleteSettled {
        request_id: RequestId,
        result: Result<(), DeleteFailure>,
    },
    NotificationDismissed,
    /// User activated a list item outside its action buttons.
    DepartmentActivated(DepartmentId),
    /// Fallback for placeholder wiring.
    NoOp,
}

impl Msg {
    /// Messages that still mean something when no view is mounted.
    pub(crate) fn applies_while_unmounted(&self) -> bool {
        matches!(
            self,
            Msg::Mounted | Msg::Tick { .. } | Msg::AuthChanged(_) | Msg::NoOp
        )
    }
}
