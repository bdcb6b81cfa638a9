//! crates/schemes_connect_core/src/auth.rs
//!
//! Login and registration form rules. No credentials are checked or stored
//! here; a valid form simply yields the `AuthSession` to persist.

use regex::Regex;
use std::sync::OnceLock;

use crate::domain::AuthSession;

pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Please enter both email and password.")]
    MissingCredentials,
    #[error("Please fill in all fields.")]
    MissingFields,
    #[error("'{0}' is not a valid email address.")]
    InvalidEmail(String),
    #[error("Passwords do not match.")]
    PasswordMismatch,
    #[error("Password must be at least 6 characters.")]
    WeakPassword,
}

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"))
}

pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_match(email)
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    /// The display name is the part of the email before the `@`.
    pub fn validate(&self) -> Result<AuthSession, AuthError> {
        let email = self.email.trim();
        if email.is_empty() || self.password.is_empty() {
            return Err(AuthError::MissingCredentials);
        }
        if !is_valid_email(email) {
            return Err(AuthError::InvalidEmail(email.to_string()));
        }
        let name = email.split('@').next().unwrap_or(email).to_string();
        Ok(AuthSession {
            email: email.to_string(),
            name,
            is_logged_in: true,
        })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl RegistrationForm {
    pub fn validate(&self) -> Result<AuthSession, AuthError> {
        let name = self.name.trim();
        let email = self.email.trim();
        if name.is_empty()
            || email.is_empty()
            || self.password.is_empty()
            || self.confirm_password.is_empty()
        {
            return Err(AuthError::MissingFields);
        }
        if self.password != self.confirm_password {
            return Err(AuthError::PasswordMismatch);
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword);
        }
        if !is_valid_email(email) {
            return Err(AuthError::InvalidEmail(email.to_string()));
        }
        Ok(AuthSession {
            email: email.to_string(),
            name: name.to_string(),
            is_logged_in: true,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registration() -> RegistrationForm {
        RegistrationForm {
            name: "Asha Patil".to_string(),
            email: "asha@example.in".to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret1".to_string(),
        }
    }

    #[test]
    fn login_derives_name_from_email() {
        let session = LoginForm {
            email: " ramesh.kumar@mail.com ".to_string(),
            password: "x".to_string(),
        }
        .validate()
        .unwrap();
        assert_eq!(session.name, "ramesh.kumar");
        assert_eq!(session.email, "ramesh.kumar@mail.com");
        assert!(session.is_logged_in);
    }

    #[test]
    fn login_requires_both_fields() {
        let form = LoginForm {
            email: "a@b.in".to_string(),
            password: String::new(),
        };
        assert_eq!(form.validate(), Err(AuthError::MissingCredentials));
    }

    #[test]
    fn registration_happy_path() {
        let session = registration().validate().unwrap();
        assert_eq!(session.name, "Asha Patil");
        assert!(session.is_logged_in);
    }

    #[test]
    fn registration_rules_apply_in_order() {
        let mismatch = RegistrationForm {
            confirm_password: "secret2".to_string(),
            ..registration()
        };
        assert_eq!(mismatch.validate(), Err(AuthError::PasswordMismatch));

        let weak = RegistrationForm {
            password: "abc".to_string(),
            confirm_password: "abc".to_string(),
            ..registration()
        };
        assert_eq!(weak.validate(), Err(AuthError::WeakPassword));

        let missing = RegistrationForm {
            name: " ".to_string(),
            ..registration()
        };
        assert_eq!(missing.validate(), Err(AuthError::MissingFields));

        let bad_email = RegistrationForm {
            email: "asha.example.in".to_string(),
            ..registration()
        };
        assert!(matches!(bad_email.validate(), Err(AuthError::InvalidEmail(_))));
    }
}
