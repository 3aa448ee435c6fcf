//! Authorization policy for workshops.
//!
//! Handlers ask [`Policy::can`] before touching the repository. Permissions
//! are opaque strings carried by the caller's token; the `admin` role holds
//! all of them.

use std::collections::HashSet;

use crate::types::DbId;

/// Role that bypasses per-permission checks (restore/force-delete excepted).
pub const ROLE_ADMIN: &str = "admin";

pub const PERM_VIEW_WORKSHOPS: &str = "ver talleres";
pub const PERM_CREATE_WORKSHOPS: &str = "crear talleres";
pub const PERM_EDIT_WORKSHOPS: &str = "editar talleres";
pub const PERM_DELETE_WORKSHOPS: &str = "eliminar talleres";

/// Every workshop permission.
pub const WORKSHOP_PERMISSIONS: &[&str] = &[
    PERM_VIEW_WORKSHOPS,
    PERM_CREATE_WORKSHOPS,
    PERM_EDIT_WORKSHOPS,
    PERM_DELETE_WORKSHOPS,
];

/// The caller an authorization decision is made for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub user_id: DbId,
    pub role: String,
    pub permissions: HashSet<String>,
}

impl Actor {
    pub fn new<I, S>(user_id: DbId, role: &str, permissions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            user_id,
            role: role.to_string(),
            permissions: permissions.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }

    /// Whether the actor holds `permission`, directly or through `admin`.
    pub fn has_permission(&self, permission: &str) -> bool {
        self.is_admin() || self.permissions.contains(permission)
    }
}

/// Operations a policy can be asked about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ViewAny,
    View,
    Create,
    Update,
    Delete,
    Restore,
    ForceDelete,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ViewAny => "view_any",
            Self::View => "view",
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Restore => "restore",
            Self::ForceDelete => "force_delete",
        }
    }
}

/// Decides whether an actor may perform an action on a resource.
///
/// `resource` is `None` for collection-level actions (`ViewAny`, `Create`).
pub trait Policy<R: ?Sized> {
    fn can(&self, actor: &Actor, action: Action, resource: Option<&R>) -> bool;
}

/// Permission-string policy for workshops.
///
/// Generic over the resource type so both the db row and test doubles can be
/// checked; decisions never depend on the resource's contents.
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkshopPolicy;

impl WorkshopPolicy {
    /// Permission required for `action`, or `None` if it is never allowed.
    pub fn required_permission(action: Action) -> Option<&'static str> {
        match action {
            Action::ViewAny | Action::View => Some(PERM_VIEW_WORKSHOPS),
            Action::Create => Some(PERM_CREATE_WORKSHOPS),
            Action::Update => Some(PERM_EDIT_WORKSHOPS),
            Action::Delete => Some(PERM_DELETE_WORKSHOPS),
            Action::Restore | Action::ForceDelete => None,
        }
    }
}

impl<R: ?Sized> Policy<R> for WorkshopPolicy {
    fn can(&self, actor: &Actor, action: Action, _resource: Option<&R>) -> bool {
        Self::required_permission(action).is_some_and(|perm| actor.has_permission(perm))
    }
}
