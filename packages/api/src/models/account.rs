//! # Accounts, roles and tokens
//!
//! [`Account`] is what `GET /auth/admin/me` returns for the bearer token: the
//! username, the numeric role code and, depending on the role, the id of the
//! teacher or student record the account belongs to.
//!
//! [`Role`] gives the numeric codes names and knows each role's landing page.

use serde::{Deserialize, Serialize};

/// Role codes as issued by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Role {
    Admin,
    Teacher,
    Student,
}

impl Role {
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(Role::Admin),
            1 => Some(Role::Teacher),
            2 => Some(Role::Student),
            _ => None,
        }
    }

    pub fn code(self) -> i64 {
        match self {
            Role::Admin => 0,
            Role::Teacher => 1,
            Role::Student => 2,
        }
    }

    /// Path a freshly signed-in user of this role is sent to.
    pub fn landing_path(self) -> &'static str {
        match self {
            Role::Admin => "/admin/teachers",
            Role::Teacher => "/teacher",
            Role::Student => "/student",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Role::Admin => "Administrator",
            Role::Teacher => "Teacher",
            Role::Student => "Student",
        }
    }
}

impl TryFrom<i64> for Role {
    type Error = String;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        Role::from_code(code).ok_or_else(|| format!("unknown role code {code}"))
    }
}

impl From<Role> for i64 {
    fn from(role: Role) -> Self {
        role.code()
    }
}

/// The signed-in account.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    #[serde(rename = "taikhoan")]
    pub username: String,
    #[serde(rename = "quyen")]
    pub role_code: i64,
    #[serde(rename = "id_gv", default)]
    pub teacher_id: Option<i64>,
    #[serde(rename = "id_hs", default)]
    pub student_id: Option<i64>,
}

impl Account {
    /// The account's role, or `None` for codes this console does not know.
    pub fn role(&self) -> Option<Role> {
        Role::from_code(self.role_code)
    }

    pub fn has_role(&self, role: Role) -> bool {
        self.role() == Some(role)
    }
}

/// Response of the form-encoded login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
}

/// Body of the password-change request.
#[derive(Debug, Clone, Serialize)]
pub struct PasswordChange {
    #[serde(rename = "matkhau")]
    pub password: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_account_from_me_response() {
        let account: Account =
            serde_json::from_str(r#"{"taikhoan":"gv01","quyen":1,"id_gv":7,"id_hs":null}"#)
                .unwrap();
        assert_eq!(account.username, "gv01");
        assert_eq!(account.role(), Some(Role::Teacher));
        assert_eq!(account.teacher_id, Some(7));
        assert!(account.student_id.is_none());
    }

    #[test]
    fn test_unknown_role_code() {
        let account: Account = serde_json::from_str(r#"{"taikhoan":"x","quyen":9}"#).unwrap();
        assert!(account.role().is_none());
        assert!(!account.has_role(Role::Admin));
    }

    #[test]
    fn test_role_serializes_as_code() {
        assert_eq!(serde_json::to_string(&Role::Student).unwrap(), "2");
        let role: Role = serde_json::from_str("0").unwrap();
        assert_eq!(role, Role::Admin);
        assert!(serde_json::from_str::<Role>("5").is_err());
    }

    #[test]
    fn test_landing_paths() {
        assert_eq!(Role::Admin.landing_path(), "/admin/teachers");
        assert_eq!(Role::Teacher.landing_path(), "/teacher");
        assert_eq!(Role::Student.landing_path(), "/student");
    }
}
