//! Role permission matrix.
//!
//! A role grants, per resource, five capability flags (view / create / edit /
//! delete / manage) plus a separate two-flag dashboard permission. The matrix
//! is persisted as JSONB on the role row; every check is fail-closed -- a
//! missing role or flag denies.

use serde::{Deserialize, Serialize};

/// A capability that can be required on a resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    View,
    Create,
    Edit,
    Delete,
    Manage,
}

/// Every resource type gated by the permission matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Categories,
    RolesPermissions,
    Users,
    Authors,
    Articles,
    PublicBooks,
    Publishers,
    Notifications,
    Coupons,
    Subscriptions,
    Currencies,
    EducationalBooks,
    Quotes,
    Posts,
    Analysis,
    ContactUs,
    Slides,
}

impl Resource {
    /// Stable name used in error messages and audit logs.
    pub fn name(self) -> &'static str {
        match self {
            Resource::Categories => "categories",
            Resource::RolesPermissions => "roles_permissions",
            Resource::Users => "users",
            Resource::Authors => "authors",
            Resource::Articles => "articles",
            Resource::PublicBooks => "public_books",
            Resource::Publishers => "publishers",
            Resource::Notifications => "notifications",
            Resource::Coupons => "coupons",
            Resource::Subscriptions => "subscriptions",
            Resource::Currencies => "currencies",
            Resource::EducationalBooks => "educational_books",
            Resource::Quotes => "quotes",
            Resource::Posts => "posts",
            Resource::Analysis => "analysis",
            Resource::ContactUs => "contactUs",
            Resource::Slides => "slides",
        }
    }
}

/// The five capability flags granted on one resource.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PermissionSet {
    pub view: bool,
    pub create: bool,
    pub edit: bool,
    pub delete: bool,
    pub manage: bool,
}

impl PermissionSet {
    pub const ALL: PermissionSet = PermissionSet {
        view: true,
        create: true,
        edit: true,
        delete: true,
        manage: true,
    };

    pub const NONE: PermissionSet = PermissionSet {
        view: false,
        create: false,
        edit: false,
        delete: false,
        manage: false,
    };

    pub fn allows(self, action: Action) -> bool {
        match action {
            Action::View => self.view,
            Action::Create => self.create,
            Action::Edit => self.edit,
            Action::Delete => self.delete,
            Action::Manage => self.manage,
        }
    }
}

/// Dashboard access uses a distinct two-flag shape, checked separately from
/// the resource matrix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardPermission {
    pub access: bool,
    pub view: bool,
}

/// Full capability matrix of a role: one [`PermissionSet`] per resource.
///
/// Fields absent from stored JSON deserialize to all-false, so a matrix
/// persisted before a resource existed still denies it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PermissionMatrix {
    pub dashboard: DashboardPermission,
    pub categories: PermissionSet,
    pub roles_permissions: PermissionSet,
    pub users: PermissionSet,
    pub authors: PermissionSet,
    pub articles: PermissionSet,
    pub public_books: PermissionSet,
    pub publishers: PermissionSet,
    pub notifications: PermissionSet,
    pub coupons: PermissionSet,
    pub subscriptions: PermissionSet,
    pub currencies: PermissionSet,
    pub educational_books: PermissionSet,
    pub quotes: PermissionSet,
    pub posts: PermissionSet,
    pub analysis: PermissionSet,
    #[serde(rename = "contactUs")]
    pub contact_us: PermissionSet,
    pub slides: PermissionSet,
}

impl PermissionMatrix {
    pub fn resource(&self, resource: Resource) -> PermissionSet {
        match resource {
            Resource::Categories => self.categories,
            Resource::RolesPermissions => self.roles_permissions,
            Resource::Users => self.users,
            Resource::Authors => self.authors,
            Resource::Articles => self.articles,
            Resource::PublicBooks => self.public_books,
            Resource::Publishers => self.publishers,
            Resource::Notifications => self.notifications,
            Resource::Coupons => self.coupons,
            Resource::Subscriptions => self.subscriptions,
            Resource::Currencies => self.currencies,
            Resource::EducationalBooks => self.educational_books,
            Resource::Quotes => self.quotes,
            Resource::Posts => self.posts,
            Resource::Analysis => self.analysis,
            Resource::ContactUs => self.contact_us,
            Resource::Slides => self.slides,
        }
    }

    /// Does this matrix grant `action` on `resource`?
    pub fn has_capability(&self, resource: Resource, action: Action) -> bool {
        self.resource(resource).allows(action)
    }
}

/// Name of the seeded all-permissions role. Never editable or deletable.
pub const ROLE_SUPER_ADMIN: &str = "SuperAdmin";

/// Name of the seeded default role for registered users.
pub const ROLE_USER: &str = "User";

/// Matrix seeded for the `SuperAdmin` role: every flag true.
pub fn superadmin_matrix() -> PermissionMatrix {
    PermissionMatrix {
        dashboard: DashboardPermission {
            access: true,
            view: true,
        },
        categories: PermissionSet::ALL,
        roles_permissions: PermissionSet::ALL,
        users: PermissionSet::ALL,
        authors: PermissionSet::ALL,
        articles: PermissionSet::ALL,
        public_books: PermissionSet::ALL,
        publishers: PermissionSet::ALL,
        notifications: PermissionSet::ALL,
        coupons: PermissionSet::ALL,
        subscriptions: PermissionSet::ALL,
        currencies: PermissionSet::ALL,
        educational_books: PermissionSet::ALL,
        quotes: PermissionSet::ALL,
        posts: PermissionSet::ALL,
        analysis: PermissionSet::ALL,
        contact_us: PermissionSet::ALL,
        slides: PermissionSet::ALL,
    }
}

/// Matrix seeded for the `User` role: read/submit access to the public
/// catalogue only.
pub fn user_matrix() -> PermissionMatrix {
    PermissionMatrix {
        public_books: PermissionSet {
            view: true,
            create: true,
            ..PermissionSet::NONE
        },
        ..PermissionMatrix::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_RESOURCES: &[Resource] = &[
        Resource::Categories,
        Resource::RolesPermissions,
        Resource::Users,
        Resource::Authors,
        Resource::Articles,
        Resource::PublicBooks,
        Resource::Publishers,
        Resource::Notifications,
        Resource::Coupons,
        Resource::Subscriptions,
        Resource::Currencies,
        Resource::EducationalBooks,
        Resource::Quotes,
        Resource::Posts,
        Resource::Analysis,
        Resource::ContactUs,
        Resource::Slides,
    ];

    const ALL_ACTIONS: &[Action] = &[
        Action::View,
        Action::Create,
        Action::Edit,
        Action::Delete,
        Action::Manage,
    ];

    #[test]
    fn default_matrix_denies_everything() {
        let matrix = PermissionMatrix::default();
        for &resource in ALL_RESOURCES {
            for &action in ALL_ACTIONS {
                assert!(
                    !matrix.has_capability(resource, action),
                    "default matrix must deny {}/{action:?}",
                    resource.name()
                );
            }
        }
        assert!(!matrix.dashboard.access);
        assert!(!matrix.dashboard.view);
    }

    #[test]
    fn superadmin_matrix_grants_everything() {
        let matrix = superadmin_matrix();
        for &resource in ALL_RESOURCES {
            for &action in ALL_ACTIONS {
                assert!(matrix.has_capability(resource, action));
            }
        }
        assert!(matrix.dashboard.access);
        assert!(matrix.dashboard.view);
    }

    #[test]
    fn user_matrix_is_minimal() {
        let matrix = user_matrix();
        assert!(matrix.has_capability(Resource::PublicBooks, Action::View));
        assert!(matrix.has_capability(Resource::PublicBooks, Action::Create));
        assert!(!matrix.has_capability(Resource::PublicBooks, Action::Delete));
        assert!(!matrix.has_capability(Resource::Users, Action::View));
        assert!(!matrix.dashboard.access);
    }

    #[test]
    fn matrix_round_trips_through_json() {
        let matrix = superadmin_matrix();
        let json = serde_json::to_value(&matrix).unwrap();
        // contactUs keeps its legacy camelCase key in stored JSON.
        assert!(json.get("contactUs").is_some());
        let back: PermissionMatrix = serde_json::from_value(json).unwrap();
        assert_eq!(back, matrix);
    }

    #[test]
    fn unknown_resources_in_stored_json_deny() {
        // A matrix persisted before `slides` existed has no such key.
        let json = serde_json::json!({
            "dashboard": { "access": true, "view": true },
            "users": { "view": true, "create": false, "edit": false, "delete": false, "manage": false }
        });
        let matrix: PermissionMatrix = serde_json::from_value(json).unwrap();
        assert!(matrix.has_capability(Resource::Users, Action::View));
        assert!(!matrix.has_capability(Resource::Slides, Action::View));
    }
}
