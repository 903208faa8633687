use crate::{Department, DepartmentId, Notification};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadingIndicator {
    #[default]
    Hidden,
    /// Nothing to show yet; the whole list area is a spinner.
    FullPage,
    /// A reload is running behind a list that stays visible.
    Inline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmptyState {
    /// No department exists at all.
    NoDepartments,
    /// The current search matched nothing.
    NoMatches,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DialogView {
    #[default]
    Closed,
    /// Entity form; `None` means create mode.
    Form { department: Option<Department> },
    ConfirmDelete { department: Department, busy: bool },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub raw_query: String,
    pub effective_query: String,
    pub page: u32,
    pub total_pages: u32,
    pub show_pagination: bool,
    pub cards: Vec<DepartmentCardView>,
    pub loading: LoadingIndicator,
    pub error: Option<String>,
    pub empty_state: Option<EmptyState>,
    pub can_create: bool,
    /// False while a dialog is open; every action trigger is disabled.
    pub actions_enabled: bool,
    pub dialog: DialogView,
    pub notification: Option<Notification>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentCardView {
    pub id: DepartmentId,
    pub name: String,
    pub description: Option<String>,
    pub moderator_login: Option<String>,
    pub can_edit: bool,
    pub can_delete: bool,
    pub owned_by_me: bool,
}
