use department_logging::{dept_debug, dept_warn};

use crate::collection::PageOutcome;
use crate::{AppState, Dialog, Effect, Msg, Notification};

const DELETE_FALLBACK_MESSAGE: &str = "Failed to delete department";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    if !state.is_mounted() && !msg.applies_while_unmounted() {
        dept_debug!("Ignoring {:?} while unmounted", msg);
        return (state, Vec::new());
    }

    let effects = match msg {
        Msg::Mounted => {
            state.mount();
            vec![state.fetch_current()]
        }
        Msg::Unmounted => {
            state.unmount();
            Vec::new()
        }
        Msg::Tick { now } => {
            state.advance_clock(now);
            let now = state.now();
            let mut effects = Vec::new();
            if let Some(query) = state.debouncer.poll(now) {
                dept_debug!("Search committed: {:?}", query);
                state.collection.commit_query(query);
                effects.push(state.fetch_current());
            }
            if state.notifications.expire(now) {
                state.mark_dirty();
            }
            effects
        }
        Msg::SearchInputChanged(raw) => {
            state.set_raw_query(raw);
            Vec::new()
        }
        Msg::PageRequested(page) => {
            if state.collection.select_page(page) {
                vec![state.fetch_current()]
            } else {
                Vec::new()
            }
        }
        Msg::RefreshRequested => vec![state.fetch_current()],
        Msg::PageLoaded { request_id, result } => {
            match state.collection.apply(request_id, result) {
                PageOutcome::Stale => {
                    dept_debug!("Discarding stale page response {}", request_id);
                    Vec::new()
                }
                PageOutcome::Applied => {
                    state.mark_dirty();
                    Vec::new()
                }
                PageOutcome::Clamped => {
                    dept_debug!(
                        "Page no longer exists, clamping to {}",
                        state.collection.page()
                    );
                    vec![state.fetch_current()]
                }
            }
        }
        Msg::AuthChanged(user) => {
            state.set_user(user);
            close_unauthorized_dialog(&mut state);
            Vec::new()
        }
        Msg::AddClicked => {
            if state.can_create() && state.dialogs.open(Dialog::Add) {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::EditClicked(id) => {
            let target = state.collection.find(id).cloned();
            if let Some(department) = target {
                if state.can_edit(&department) && state.dialogs.open(Dialog::Edit(department)) {
                    state.mark_dirty();
                }
            }
            Vec::new()
        }
        Msg::DeleteClicked(id) => {
            let target = state.collection.find(id).cloned();
            if let Some(department) = target {
                if state.can_delete(&department) && state.dialogs.open(Dialog::Delete(department))
                {
                    state.mark_dirty();
                }
            }
            Vec::new()
        }
        Msg::FormSaved(saved) => {
            let verb = match state.dialog() {
                Dialog::Add => "created",
                Dialog::Edit(department) if department.id == saved.id => "updated",
                Dialog::Edit(department) => {
                    dept_debug!(
                        "Ignoring save of department {} while editing {}",
                        saved.id,
                        department.id
                    );
                    return (state, Vec::new());
                }
                Dialog::Closed | Dialog::Delete(_) => {
                    dept_debug!("Ignoring save of {:?} with no form open", saved.name);
                    return (state, Vec::new());
                }
            };
            state.dialogs.close();
            state.notify(Notification::success(format!(
                "Department \"{}\" {}",
                saved.name, verb
            )));
            vec![state.fetch_current()]
        }
        Msg::FormCancelled => {
            if matches!(state.dialog(), Dialog::Add | Dialog::Edit(_)) {
                state.dialogs.close();
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::FormSaveFailed(message) => {
            dept_warn!("Department form reported a save failure: {}", message);
            Vec::new()
        }
        Msg::DeleteConfirmed => {
            let id = match state.dialog() {
                Dialog::Delete(department) if !state.action_loading() => department.id,
                _ => return (state, Vec::new()),
            };
            let request_id = state.allocate_request_id();
            state.dialogs.begin_delete(request_id);
            state.mark_dirty();
            vec![Effect::DeleteDepartment { request_id, id }]
        }
        Msg::DeleteCancelled => {
            if matches!(state.dialog(), Dialog::Delete(_)) && !state.action_loading() {
                state.dialogs.close();
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::DeleteSettled { request_id, result } => {
            let name = match state.dialog() {
                Dialog::Delete(department) => department.name.clone(),
                _ => String::new(),
            };
            if !state.dialogs.settle_delete(request_id) {
                dept_debug!("Discarding stale delete response {}", request_id);
                return (state, Vec::new());
            }
            match result {
                Ok(()) => {
                    state.dialogs.close();
                    state.notify(Notification::success(format!(
                        "Department \"{}\" deleted",
                        name
                    )));
                    vec![state.fetch_current()]
                }
                Err(failure) => {
                    let message = failure
                        .message
                        .filter(|message| !message.trim().is_empty())
                        .unwrap_or_else(|| DELETE_FALLBACK_MESSAGE.to_string());
                    dept_warn!("Deleting department {:?} failed: {}", name, message);
                    state.notify(Notification::error(message));
                    Vec::new()
                }
            }
        }
        Msg::NotificationDismissed => {
            if state.notifications.dismiss() {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::DepartmentActivated(id) => {
            if !state.dialog().is_open() && state.collection.find(id).is_some() {
                vec![Effect::NavigateToDepartment { id }]
            } else {
                Vec::new()
            }
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}

/// Closes a dialog the new user is no longer allowed to hold open.
/// A delete already in flight is left to settle.
fn close_unauthorized_dialog(state: &mut AppState) {
    let allowed = match state.dialog() {
        Dialog::Closed => return,
        Dialog::Add => state.can_create(),
        Dialog::Edit(department) => state.can_edit(department),
        Dialog::Delete(department) => state.action_loading() || state.can_delete(department),
    };
    if !allowed {
        dept_debug!("Closing dialog after permission change");
        state.dialogs.close();
    }
}
