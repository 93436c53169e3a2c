use serde::{Deserialize, Serialize};

use crate::domain::user::{User, UserRole};

/// Verified request identity with the data every authorization decision
/// needs: the local role and the full store-access list, loaded fresh for
/// each request.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CurrentUser {
    pub id: i32,
    pub email: String,
    pub name: String,
    pub role: UserRole,
    /// Stores the user holds an explicit access grant for. Empty for admins,
    /// who do not need grants.
    pub store_ids: Vec<i32>,
}

impl CurrentUser {
    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Whether the user may operate within `store_id`. Admins bypass the
    /// grant check entirely.
    pub fn has_access(&self, store_id: i32) -> bool {
        self.is_admin() || self.store_ids.contains(&store_id)
    }
}

impl From<User> for CurrentUser {
    fn from(value: User) -> Self {
        Self {
            id: value.id,
            email: value.email,
            name: value.name,
            role: value.role,
            store_ids: value.store_ids,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: UserRole, store_ids: Vec<i32>) -> CurrentUser {
        CurrentUser {
            id: 1,
            email: "user@example.com".to_string(),
            name: "Tester".to_string(),
            role,
            store_ids,
        }
    }

    #[test]
    fn admin_has_access_everywhere() {
        let admin = user(UserRole::Admin, Vec::new());
        assert!(admin.is_admin());
        assert!(admin.has_access(1));
        assert!(admin.has_access(99));
    }

    #[test]
    fn user_access_is_limited_to_grants() {
        let member = user(UserRole::User, vec![2, 5]);
        assert!(!member.is_admin());
        assert!(member.has_access(2));
        assert!(member.has_access(5));
        assert!(!member.has_access(3));
    }
}
