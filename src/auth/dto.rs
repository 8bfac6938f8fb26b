use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use super::repo_types::{Role, User};
use crate::error::FieldError;

/// Request body for user registration.
#[derive(Debug, Default)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub password: String,
    pub name: Option<String>,
}

impl RegisterRequest {
    /// Reads the fields out of a JSON object. Absent or null fields come back
    /// empty so the validator reports them; a field of the wrong type is
    /// reported against that field here.
    pub fn from_json(body: &Value) -> Result<Self, Vec<FieldError>> {
        let Some(obj) = body.as_object() else {
            return Err(vec![FieldError::new("body", "Expected a JSON object")]);
        };

        let mut errors = Vec::new();
        let mut text = |field: &'static str| match obj.get(field) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(_) => {
                errors.push(FieldError::new(field, "Must be a string"));
                None
            }
        };
        let req = Self {
            email: text("email").unwrap_or_default(),
            username: text("username").unwrap_or_default(),
            password: text("password").unwrap_or_default(),
            name: text("name"),
        };

        if errors.is_empty() {
            Ok(req)
        } else {
            Err(errors)
        }
    }
}

/// `login` is either an email or a username.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub login: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub user: PublicUser,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct VerifyResponse {
    pub user: Option<PublicUser>,
}

/// Public part of the user returned to the client.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicUser {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub name: Option<String>,
    pub avatar: Option<String>,
    pub role: Role,
    pub is_verified: bool,
}

impl From<User> for PublicUser {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            username: u.username,
            name: u.name,
            avatar: u.avatar,
            role: u.role,
            is_verified: u.is_verified,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn register_body_reads_strings_and_defaults_missing() {
        let req = RegisterRequest::from_json(&json!({
            "email": "a@x.com",
            "username": null,
            "password": "Passw0rd!"
        }))
        .unwrap();
        assert_eq!(req.email, "a@x.com");
        assert_eq!(req.username, "");
        assert_eq!(req.password, "Passw0rd!");
        assert_eq!(req.name, None);
    }

    #[test]
    fn register_body_flags_mistyped_fields() {
        let errors = RegisterRequest::from_json(&json!({
            "email": 5,
            "username": "a",
            "password": ["x"]
        }))
        .unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["email", "password"]);
    }

    #[test]
    fn register_body_must_be_an_object() {
        let errors = RegisterRequest::from_json(&json!([1, 2])).unwrap_err();
        assert_eq!(errors[0].field, "body");
    }
}
