use crate::{Department, RequestId};

/// Which modal is open. The targeted department travels inside the variant,
/// so an Add dialog can never carry a stale selection.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Dialog {
    #[default]
    Closed,
    Add,
    Edit(Department),
    Delete(Department),
}

impl Dialog {
    pub fn is_open(&self) -> bool {
        !matches!(self, Dialog::Closed)
    }

    pub fn target(&self) -> Option<&Department> {
        match self {
            Dialog::Edit(department) | Dialog::Delete(department) => Some(department),
            Dialog::Closed | Dialog::Add => None,
        }
    }
}

/// Open dialog plus the bookkeeping for an in-flight delete.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct DialogCoordinator {
    dialog: Dialog,
    pending_delete: Option<RequestId>,
}

impl DialogCoordinator {
    pub(crate) fn dialog(&self) -> &Dialog {
        &self.dialog
    }

    pub(crate) fn action_loading(&self) -> bool {
        self.pending_delete.is_some()
    }

    /// Opens `dialog` unless another one is already open.
    pub(crate) fn open(&mut self, dialog: Dialog) -> bool {
        if self.dialog.is_open() {
            return false;
        }
        self.dialog = dialog;
        true
    }

    pub(crate) fn close(&mut self) {
        self.dialog = Dialog::Closed;
        self.pending_delete = None;
    }

    pub(crate) fn begin_delete(&mut self, request_id: RequestId) {
        self.pending_delete = Some(request_id);
    }

    /// Clears the in-flight marker if `request_id` is the delete being awaited.
    pub(crate) fn settle_delete(&mut self, request_id: RequestId) -> bool {
        if self.pending_delete != Some(request_id) {
            return false;
        }
        self.pending_delete = None;
        true
    }
}
