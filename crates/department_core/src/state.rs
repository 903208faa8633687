use std::fmt;
use std::sync::Arc;

use crate::collection::Collection;
use crate::dialog::DialogCoordinator;
use crate::permissions::{self, PermissionSource, RolePolicy};
use crate::view_model::{
    AppViewModel, DepartmentCardView, DialogView, EmptyState, LoadingIndicator,
};
use crate::{
    CurrentUser, Department, Dialog, Effect, Millis, Notification, NotificationChannel,
    RequestId, SearchDebouncer,
};

/// Everything the department list view knows. Owned by a single driver loop.
#[derive(Clone)]
pub struct AppState {
    permissions: Arc<dyn PermissionSource>,
    user: Option<CurrentUser>,
    now: Millis,
    mounted: bool,
    raw_query: String,
    pub(crate) debouncer: SearchDebouncer,
    pub(crate) collection: Collection,
    pub(crate) dialogs: DialogCoordinator,
    pub(crate) notifications: NotificationChannel,
    last_request_id: RequestId,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::with_permissions(Arc::new(RolePolicy))
    }

    pub fn with_permissions(permissions: Arc<dyn PermissionSource>) -> Self {
        Self {
            permissions,
            user: None,
            now: 0,
            mounted: false,
            raw_query: String::new(),
            debouncer: SearchDebouncer::default(),
            collection: Collection::default(),
            dialogs: DialogCoordinator::default(),
            notifications: NotificationChannel::default(),
            last_request_id: 0,
            dirty: false,
        }
    }

    pub fn now(&self) -> Millis {
        self.now
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn current_user(&self) -> Option<&CurrentUser> {
        self.user.as_ref()
    }

    pub fn dialog(&self) -> &Dialog {
        self.dialogs.dialog()
    }

    pub fn action_loading(&self) -> bool {
        self.dialogs.action_loading()
    }

    /// Earliest moment a `Msg::Tick` would change anything.
    pub fn next_deadline(&self) -> Option<Millis> {
        match (self.debouncer.deadline(), self.notifications.deadline()) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn can_create(&self) -> bool {
        permissions::can_create(self.permissions.as_ref(), self.user.as_ref())
    }

    pub fn can_edit(&self, department: &Department) -> bool {
        permissions::can_edit(self.permissions.as_ref(), self.user.as_ref(), department)
    }

    pub fn can_delete(&self, department: &Department) -> bool {
        permissions::can_delete(self.permissions.as_ref(), self.user.as_ref(), department)
    }

    pub fn is_owned_by_me(&self, department: &Department) -> bool {
        permissions::is_owned_by(self.permissions.as_ref(), self.user.as_ref(), department)
    }

    pub fn view(&self) -> AppViewModel {
        let collection = &self.collection;
        let items = collection.items();
        let actions_enabled = !self.dialogs.dialog().is_open();

        let loading = match (collection.is_loading(), items.is_empty()) {
            (true, true) => LoadingIndicator::FullPage,
            (true, false) => LoadingIndicator::Inline,
            (false, _) => LoadingIndicator::Hidden,
        };

        let empty_state = if !collection.is_loading()
            && collection.error().is_none()
            && items.is_empty()
        {
            if collection.effective_query().is_empty() {
                Some(EmptyState::NoDepartments)
            } else {
                Some(EmptyState::NoMatches)
            }
        } else {
            None
        };

        let cards = items
            .iter()
            .map(|department| DepartmentCardView {
                id: department.id,
                name: department.name.clone(),
                description: department.description.clone(),
                moderator_login: department.moderator_login.clone(),
                can_edit: self.can_edit(department),
                can_delete: self.can_delete(department),
                owned_by_me: self.is_owned_by_me(department),
            })
            .collect();

        let dialog = match self.dialogs.dialog() {
            Dialog::Closed => DialogView::Closed,
            Dialog::Add => DialogView::Form { department: None },
            Dialog::Edit(department) => DialogView::Form {
                department: Some(department.clone()),
            },
            Dialog::Delete(department) => DialogView::ConfirmDelete {
                department: department.clone(),
                busy: self.dialogs.action_loading(),
            },
        };

        AppViewModel {
            raw_query: self.raw_query.clone(),
            effective_query: collection.effective_query().to_string(),
            page: collection.page(),
            total_pages: collection.total_pages(),
            show_pagination: collection.total_pages() > 1,
            cards,
            loading,
            error: collection.error().map(str::to_string),
            empty_state,
            can_create: self.can_create(),
            actions_enabled,
            dialog,
            notification: self.notifications.current().cloned(),
            dirty: self.dirty,
        }
    }

    /// Returns whether the view changed since the last call and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn mount(&mut self) {
        self.mounted = true;
        self.raw_query.clear();
        self.debouncer.cancel();
        self.collection = Collection::default();
        self.dialogs = DialogCoordinator::default();
        self.notifications.dismiss();
        self.mark_dirty();
    }

    /// Drops timers and forgets every outstanding request so late answers are ignored.
    pub(crate) fn unmount(&mut self) {
        self.mounted = false;
        self.debouncer.cancel();
        self.notifications.dismiss();
        self.collection.abandon_request();
        self.dialogs.close();
        self.mark_dirty();
    }

    /// The clock never runs backwards.
    pub(crate) fn advance_clock(&mut self, now: Millis) {
        self.now = self.now.max(now);
    }

    pub(crate) fn set_raw_query(&mut self, raw: String) {
        self.debouncer.input(raw.clone(), self.now);
        self.raw_query = raw;
        self.mark_dirty();
    }

    pub(crate) fn set_user(&mut self, user: Option<CurrentUser>) {
        self.user = user;
        self.mark_dirty();
    }

    pub(crate) fn allocate_request_id(&mut self) -> RequestId {
        self.last_request_id += 1;
        self.last_request_id
    }

    /// Issues a fetch for the current query and page.
    pub(crate) fn fetch_current(&mut self) -> Effect {
        let request_id = self.allocate_request_id();
        self.mark_dirty();
        self.collection.begin_fetch(request_id)
    }

    pub(crate) fn notify(&mut self, notification: Notification) {
        self.notifications.show(notification, self.now);
        self.mark_dirty();
    }
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("user", &self.user)
            .field("now", &self.now)
            .field("mounted", &self.mounted)
            .field("raw_query", &self.raw_query)
            .field("debouncer", &self.debouncer)
            .field("collection", &self.collection)
            .field("dialogs", &self.dialogs)
            .field("notifications", &self.notifications)
            .field("last_request_id", &self.last_request_id)
            .field("dirty", &self.dirty)
            .finish_non_exhaustive()
    }
}

impl PartialEq for AppState {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::addr_eq(
            Arc::as_ptr(&self.permissions),
            Arc::as_ptr(&other.permissions),
        ) && self.user == other.user
            && self.now == other.now
            && self.mounted == other.mounted
            && self.raw_query == other.raw_query
            && self.debouncer == other.debouncer
            && self.collection == other.collection
            && self.dialogs == other.dialogs
            && self.notifications == other.notifications
            && self.last_request_id == other.last_request_id
            && self.dirty == other.dirty
    }
}

impl Eq for AppState {}
