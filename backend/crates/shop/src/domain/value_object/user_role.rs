//! User Role Value Object
//!
//! Closed role vocabulary and the role set held by each user.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    #[default]
    User,
    Admin,
}

impl Role {
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            Role::User => "USER",
            Role::Admin => "ADMIN",
        }
    }

    /// Parse a stored role code; unknown codes are rejected, not defaulted
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "USER" => Some(Role::User),
            "ADMIN" => Some(Role::Admin),
            _ => None,
        }
    }

    /// Whether holding `self` satisfies a route that requires `required`
    #[inline]
    pub const fn grants(&self, required: Role) -> bool {
        match (self, required) {
            (Role::Admin, Role::Admin | Role::User) => true,
            (Role::User, Role::User) => true,
            (Role::User, Role::Admin) => false,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Roles held by a user, duplicate-free and never empty
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RoleSet(Vec<Role>);

impl Default for RoleSet {
    fn default() -> Self {
        Self(vec![Role::User])
    }
}

impl RoleSet {
    pub fn new(roles: impl IntoIterator<Item = Role>) -> Self {
        let mut set: Vec<Role> = Vec::new();
        for role in roles {
            if !set.contains(&role) {
                set.push(role);
            }
        }
        if set.is_empty() {
            return Self::default();
        }
        Self(set)
    }

    /// Build from stored codes, skipping anything outside the vocabulary
    pub fn from_codes<S: AsRef<str>>(codes: &[S]) -> Self {
        Self::new(codes.iter().filter_map(|code| {
            let role = Role::from_code(code.as_ref());
            if role.is_none() {
                tracing::warn!(code = code.as_ref(), "Ignoring unknown role code");
            }
            role
        }))
    }

    pub fn codes(&self) -> Vec<String> {
        self.0.iter().map(|role| role.code().to_string()).collect()
    }

    pub fn contains(&self, role: Role) -> bool {
        self.0.contains(&role)
    }

    /// Whether any held role grants `required`
    pub fn permits(&self, required: Role) -> bool {
        self.0.iter().any(|role| role.grants(required))
    }

    pub fn iter(&self) -> impl Iterator<Item = &Role> {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_codes() {
        assert_eq!(Role::from_code("USER"), Some(Role::User));
        assert_eq!(Role::from_code("ADMIN"), Some(Role::Admin));
        assert_eq!(Role::from_code("admin"), None);
        assert_eq!(Role::Admin.to_string(), "ADMIN");
    }

    #[test]
    fn test_role_serde() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"ADMIN\"");
        let role: Role = serde_json::from_str("\"USER\"").unwrap();
        assert_eq!(role, Role::User);
    }

    #[test]
    fn test_default_set_is_user() {
        let roles = RoleSet::default();
        assert!(roles.contains(Role::User));
        assert!(!roles.permits(Role::Admin));
        assert_eq!(RoleSet::new(Vec::<Role>::new()), RoleSet::default());
    }

    #[test]
    fn test_permits() {
        let admin = RoleSet::new([Role::User, Role::Admin, Role::Admin]);
        assert_eq!(admin.codes(), vec!["USER", "ADMIN"]);
        assert!(admin.permits(Role::Admin));
        assert!(admin.permits(Role::User));

        let admin_only = RoleSet::new([Role::Admin]);
        assert!(admin_only.permits(Role::User));
    }

    #[test]
    fn test_from_codes_skips_unknown() {
        let roles = RoleSet::from_codes(&["USER", "ROOT"][..]);
        assert_eq!(roles, RoleSet::default());
    }
}
