//! Permission checks for rendered menu nodes.
//!
//! Menu rendering delegates every node to an [`Authorized`] collaborator,
//! which either returns the node (possibly altered) or drops it. Hosts with
//! their own permission backend implement the trait, or pass a closure.

use std::collections::HashSet;

use tracing::debug;

use crate::menu::Authority;
use crate::nav::NavNode;

/// Authorization collaborator.
pub trait Authorized {
    /// Return the node if the current user may see it.
    fn check(&self, authority: Option<&Authority>, node: NavNode) -> Option<NavNode>;
}

impl<F> Authorized for F
where
    F: Fn(Option<&Authority>, NavNode) -> Option<NavNode>,
{
    fn check(&self, authority: Option<&Authority>, node: NavNode) -> Option<NavNode> {
        self(authority, node)
    }
}

/// Lets every node through.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllowAll;

impl Authorized for AllowAll {
    fn check(&self, _authority: Option<&Authority>, node: NavNode) -> Option<NavNode> {
        Some(node)
    }
}

/// Role-based check against the current user's role set.
#[derive(Debug, Clone, Default)]
pub struct RoleAuthorizer {
    roles: HashSet<String>,
    /// Role that bypasses every check.
    admin_role: Option<String>,
}

impl RoleAuthorizer {
    /// Create an authorizer for a user holding `roles`.
    pub fn new<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            roles: roles.into_iter().map(Into::into).collect(),
            admin_role: None,
        }
    }

    pub fn with_admin_role(mut self, role: impl Into<String>) -> Self {
        self.admin_role = Some(role.into());
        self
    }

    pub fn is_admin(&self) -> bool {
        self.admin_role
            .as_ref()
            .is_some_and(|admin| self.roles.contains(admin))
    }

    /// Check an authority token.
    ///
    /// - Admin users always pass.
    /// - Entries without authority are public.
    /// - Otherwise holding any one of the listed roles is enough.
    pub fn has_authority(&self, authority: Option<&Authority>) -> bool {
        if self.is_admin() {
            return true;
        }

        match authority {
            None => true,
            Some(authority) => authority.roles().iter().any(|r| self.roles.contains(r)),
        }
    }
}

impl Authorized for RoleAuthorizer {
    fn check(&self, authority: Option<&Authority>, node: NavNode) -> Option<NavNode> {
        if self.has_authority(authority) {
            Some(node)
        } else {
            debug!(key = %node.key(), "menu entry hidden by authority");
            None
        }
    }
}
