//! Permission predicates gating the add/edit/delete affordances.
//!
//! These only decide what the view offers. The data service is expected to
//! enforce the same rules on its side.

use crate::{CurrentUser, Department, Role};

/// Role service contract. Implementations must be pure and never touch the network.
pub trait PermissionSource: Send + Sync {
    fn can_create_departments(&self, user: &CurrentUser) -> bool;
    fn can_edit_department(&self, user: &CurrentUser, owner_login: Option<&str>) -> bool;
    fn can_delete_department(&self, user: &CurrentUser) -> bool;
    fn is_moderator(&self, user: &CurrentUser) -> bool;
}

/// Default role rules: administrators may do everything, moderators may edit
/// the departments they moderate, members may only browse.
#[derive(Debug, Clone, Copy, Default)]
pub struct RolePolicy;

impl PermissionSource for RolePolicy {
    fn can_create_departments(&self, user: &CurrentUser) -> bool {
        user.role == Role::Administrator
    }

    fn can_edit_department(&self, user: &CurrentUser, owner_login: Option<&str>) -> bool {
        match user.role {
            Role::Administrator => true,
            Role::Moderator => {
                !user.username.is_empty() && owner_login == Some(user.username.as_str())
            }
            Role::Member => false,
        }
    }

    fn can_delete_department(&self, user: &CurrentUser) -> bool {
        user.role == Role::Administrator
    }

    fn is_moderator(&self, user: &CurrentUser) -> bool {
        user.role == Role::Moderator
    }
}

pub fn can_create(source: &dyn PermissionSource, user: Option<&CurrentUser>) -> bool {
    user.is_some_and(|user| source.can_create_departments(user))
}

pub fn can_edit(
    source: &dyn PermissionSource,
    user: Option<&CurrentUser>,
    department: &Department,
) -> bool {
    user.is_some_and(|user| {
        source.can_edit_department(user, department.moderator_login.as_deref())
    })
}

pub fn can_delete(
    source: &dyn PermissionSource,
    user: Option<&CurrentUser>,
    _department: &Department,
) -> bool {
    user.is_some_and(|user| source.can_delete_department(user))
}

/// True when `user` is a moderator and `department` is theirs.
pub fn is_owned_by(
    source: &dyn PermissionSource,
    user: Option<&CurrentUser>,
    department: &Department,
) -> bool {
    user.is_some_and(|user| {
        source.is_moderator(user)
            && department.moderator_login.as_deref() == Some(user.username.as_str())
    })
}
