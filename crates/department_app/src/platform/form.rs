use department_core::{DepartmentId, Dialog, RequestId};
use department_logging::dept_debug;

/// The form a save was submitted from: `None` for Add, the edited id otherwise.
type FormTarget = Option<DepartmentId>;

fn target_of(dialog: &Dialog) -> Option<FormTarget> {
    match dialog {
        Dialog::Add => Some(None),
        Dialog::Edit(department) => Some(Some(department.id)),
        Dialog::Closed | Dialog::Delete(_) => None,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingSave {
    request_id: RequestId,
    target: FormTarget,
}

/// What to do with a `SaveCompleted` from the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// Not the save we are waiting for.
    Unknown,
    /// The submitting form is still open; forward the result to the core.
    Deliver,
    /// The submitting form has gone away.
    Orphaned,
}

/// Keeps at most one form save in flight and remembers which form sent it.
#[derive(Debug, Default)]
pub struct FormSubmissions {
    last_request_id: RequestId,
    pending: Option<PendingSave>,
}

impl FormSubmissions {
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Registers a save from the open form. Returns `None` when no form is
    /// open or another save has not settled yet.
    pub fn begin(&mut self, dialog: &Dialog) -> Option<RequestId> {
        if self.pending.is_some() {
            return None;
        }
        let target = target_of(dialog)?;
        self.last_request_id += 1;
        let request_id = self.last_request_id;
        self.pending = Some(PendingSave { request_id, target });
        Some(request_id)
    }

    pub fn settle(&mut self, request_id: RequestId, dialog: &Dialog) -> SaveOutcome {
        let Some(pending) = self.pending.filter(|p| p.request_id == request_id) else {
            dept_debug!("Discarding unknown save response {}", request_id);
            return SaveOutcome::Unknown;
        };
        self.pending = None;
        if target_of(dialog) == Some(pending.target) {
            SaveOutcome::Deliver
        } else {
            dept_debug!(
                "Save {} finished after its form closed (target {:?})",
                request_id,
                pending.target
            );
            SaveOutcome::Orphaned
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use department_core::Department;

    fn editing(id: DepartmentId) -> Dialog {
        Dialog::Edit(Department::new(id, "Engineering"))
    }

    #[test]
    fn save_needs_an_open_form() {
        let mut forms = FormSubmissions::default();
        assert_eq!(forms.begin(&Dialog::Closed), None);
        assert_eq!(
            forms.begin(&Dialog::Delete(Department::new(3, "Engineering"))),
            None
        );
        assert!(!forms.is_pending());
    }

    #[test]
    fn second_save_is_refused_until_the_first_settles() {
        let mut forms = FormSubmissions::default();
        assert_eq!(forms.begin(&Dialog::Add), Some(1));
        assert_eq!(forms.begin(&Dialog::Add), None);
        assert!(forms.is_pending());

        assert_eq!(forms.settle(1, &Dialog::Add), SaveOutcome::Deliver);
        assert!(!forms.is_pending());
        assert_eq!(forms.begin(&Dialog::Add), Some(2));
    }

    #[test]
    fn edit_result_is_not_delivered_to_a_later_add_form() {
        let mut forms = FormSubmissions::default();
        let request_id = forms.begin(&editing(3)).expect("save starts");

        // The edit form was closed (e.g. by a sign-out) and Add opened meanwhile.
        assert_eq!(forms.settle(request_id, &Dialog::Add), SaveOutcome::Orphaned);
        assert!(!forms.is_pending());
    }

    #[test]
    fn edit_result_is_not_delivered_to_another_edit_form() {
        let mut forms = FormSubmissions::default();
        let request_id = forms.begin(&editing(3)).expect("save starts");
        assert_eq!(forms.settle(request_id, &editing(9)), SaveOutcome::Orphaned);
    }

    #[test]
    fn unknown_response_leaves_pending_save_alone() {
        let mut forms = FormSubmissions::default();
        let request_id = forms.begin(&editing(3)).expect("save starts");

        assert_eq!(forms.settle(request_id + 5, &editing(3)), SaveOutcome::Unknown);
        assert!(forms.is_pending());
        assert_eq!(forms.settle(request_id, &editing(3)), SaveOutcome::Deliver);
    }
}
