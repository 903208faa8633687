use std::sync::Once;

use department_core::{
    update, AppState, CurrentUser, DeleteFailure, Department, DepartmentPage, Effect, Msg,
    Notification, NotificationChannel, RequestId, Role, Severity, NOTIFICATION_DURATION_MS,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(department_logging::initialize_for_tests);
}

fn fetch_id(effects: &[Effect]) -> RequestId {
    effects
        .iter()
        .find_map(|effect| match effect {
            Effect::FetchPage { request_id, .. } => Some(*request_id),
            _ => None,
        })
        .expect("fetch effect")
}

fn admin_with_items() -> AppState {
    let admin = CurrentUser::new("root", Role::Administrator);
    let (state, _) = update(AppState::new(), Msg::AuthChanged(Some(admin)));
    let (state, effects) = update(state, Msg::Mounted);
    let (state, _) = update(
        state,
        Msg::PageLoaded {
            request_id: fetch_id(&effects),
            result: Ok(DepartmentPage::new(vec![Department::new(7, "Facilities")], 1)),
        },
    );
    state
}

#[test]
fn channel_replaces_and_expires() {
    let mut channel = NotificationChannel::default();
    channel.show(Notification::success("first"), 0);
    channel.show(Notification::error("second"), 100);

    assert_eq!(channel.current().map(|n| n.message.as_str()), Some("second"));
    assert_eq!(channel.deadline(), Some(100 + NOTIFICATION_DURATION_MS));
    assert!(!channel.expire(6_099));
    assert!(channel.expire(6_100));
    assert_eq!(channel.current(), None);
    assert!(!channel.dismiss());
}

#[test]
fn notification_auto_dismisses_after_duration() {
    init_logging();
    let (state, _) = update(admin_with_items(), Msg::Tick { now: 1_000 });
    let (state, _) = update(state, Msg::AddClicked);
    let (state, _) = update(state, Msg::FormSaved(Department::new(8, "Research")));
    assert!(state.view().notification.is_some());
    assert_eq!(state.next_deadline(), Some(7_000));

    let (state, _) = update(state, Msg::Tick { now: 6_999 });
    assert!(state.view().notification.is_some());

    let (mut state, _) = update(state, Msg::Tick { now: 7_000 });
    assert_eq!(state.view().notification, None);
    assert_eq!(state.next_deadline(), None);
    assert!(state.consume_dirty());
}

#[test]
fn user_can_dismiss_notification_early() {
    init_logging();
    let (state, _) = update(admin_with_items(), Msg::AddClicked);
    let (state, _) = update(state, Msg::FormSaved(Department::new(8, "Research")));
    let (state, _) = update(state, Msg::NotificationDismissed);

    assert_eq!(state.view().notification, None);
}

#[test]
fn newer_notification_replaces_older_one() {
    init_logging();
    let (state, _) = update(admin_with_items(), Msg::DeleteClicked(7));
    let (state, effects) = update(state, Msg::DeleteConfirmed);
    let request_id = match effects.as_slice() {
        [Effect::DeleteDepartment { request_id, .. }] => *request_id,
        other => panic!("unexpected effects {other:?}"),
    };
    let (state, _) = update(
        state,
        Msg::DeleteSettled {
            request_id,
            result: Err(DeleteFailure::new("in use")),
        },
    );
    let (state, _) = update(state, Msg::DeleteCancelled);
    let (state, _) = update(state, Msg::AddClicked);
    let (state, _) = update(state, Msg::FormSaved(Department::new(8, "Research")));

    let notification = state.view().notification.expect("notification");
    assert_eq!(notification.severity, Severity::Success);
}

#[test]
fn clock_never_moves_backwards() {
    init_logging();
    let (state, _) = update(admin_with_items(), Msg::Tick { now: 900 });
    let (state, _) = update(state, Msg::Tick { now: 100 });
    assert_eq!(state.now(), 900);
}

#[test]
fn unmount_drops_pending_work_and_late_responses() {
    init_logging();
    let state = admin_with_items();
    let (state, refresh) = update(state, Msg::RefreshRequested);
    let (state, _) = update(state, Msg::Tick { now: 10 });
    let (state, _) = update(state, Msg::SearchInputChanged("Fac".into()));
    assert!(state.next_deadline().is_some());

    let (state, effects) = update(state, Msg::Unmounted);
    assert!(effects.is_empty());
    assert!(!state.is_mounted());
    assert_eq!(state.next_deadline(), None);

    let (state, effects) = update(state, Msg::Tick { now: 10_000 });
    assert!(effects.is_empty());

    let before = state.clone();
    let (state, effects) = update(
        state,
        Msg::PageLoaded {
            request_id: fetch_id(&refresh),
            result: Ok(DepartmentPage::default()),
        },
    );
    assert!(effects.is_empty());
    assert_eq!(state, before);

    let (state, effects) = update(state, Msg::AddClicked);
    assert!(effects.is_empty());
    assert_eq!(state, before);
}

#[test]
fn remount_starts_from_a_fresh_view() {
    init_logging();
    let (state, _) = update(admin_with_items(), Msg::Unmounted);
    let (state, effects) = update(state, Msg::Mounted);

    let view = state.view();
    assert!(view.cards.is_empty());
    assert_eq!(view.page, 1);
    assert_eq!(view.raw_query, "");
    assert!(view.can_create);
    // Request ids keep increasing across mounts.
    assert_eq!(fetch_id(&effects), 2);
}
