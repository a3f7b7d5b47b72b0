//! Sign-in, sign-up and password forms. These are full pages rather than
//! modals, so they validate straight into request bodies without a
//! [`super::FormController`].

use serde::Serialize;

use super::ValidationError;

pub const MIN_PASSWORD_LEN: usize = 6;
pub const SHORT_PASSWORD: &str = "Password must be at least 6 characters.";

/// Length is counted in characters, not bytes.
pub fn is_valid_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

/// Body of `POST /auth/login`. Only obtainable from [`LoginForm::validate`].
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    username: String,
    password: String,
}

impl std::fmt::Debug for LoginRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginRequest")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl LoginForm {
    pub fn validate(&self) -> Result<LoginRequest, ValidationError> {
        if !is_valid_password(&self.password) {
            return Err(ValidationError::new(SHORT_PASSWORD));
        }
        Ok(LoginRequest {
            username: self.username.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub password: String,
}

#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    first_name: String,
    last_name: String,
    username: String,
    password: String,
}

impl std::fmt::Debug for RegisterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterRequest")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl RegisterForm {
    pub fn validate(&self) -> Result<RegisterRequest, ValidationError> {
        if !is_valid_password(&self.password) {
            return Err(ValidationError::new(SHORT_PASSWORD));
        }
        Ok(RegisterRequest {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            username: self.username.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChangePasswordForm {
    pub old_password: String,
    pub new_password: String,
    pub repeat_new_password: String,
}

#[derive(Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    old_password: String,
    new_password: String,
}

impl std::fmt::Debug for ChangePasswordRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ChangePasswordRequest { .. }")
    }
}

impl ChangePasswordForm {
    pub fn validate(&self) -> Result<ChangePasswordRequest, ValidationError> {
        if self.old_password.is_empty()
            || self.new_password.is_empty()
            || self.repeat_new_password.is_empty()
        {
            return Err(ValidationError::new("Please fill all fields."));
        }
        if !is_valid_password(&self.new_password) {
            return Err(ValidationError::new(
                "New password must be at least 6 characters.",
            ));
        }
        if self.new_password != self.repeat_new_password {
            return Err(ValidationError::new("New passwords do not match."));
        }
        Ok(ChangePasswordRequest {
            old_password: self.old_password.clone(),
            new_password: self.new_password.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_short_password_rejected() {
        let form = LoginForm {
            username: "ada".to_string(),
            password: "12345".to_string(),
        };
        assert_eq!(
            form.validate().unwrap_err().reason,
            "Password must be at least 6 characters."
        );
        let form = RegisterForm {
            password: "abc".to_string(),
            ..Default::default()
        };
        assert_eq!(form.validate().unwrap_err().reason, SHORT_PASSWORD);
    }

    #[test]
    fn test_register_body() {
        let form = RegisterForm {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            username: "ada".to_string(),
            password: "secret1".to_string(),
        };
        assert_eq!(
            serde_json::to_value(form.validate().unwrap()).unwrap(),
            json!({
                "firstName": "Ada",
                "lastName": "Lovelace",
                "username": "ada",
                "password": "secret1",
            })
        );
    }

    #[test]
    fn test_request_debug_hides_password() {
        let request = LoginForm {
            username: "ada".to_string(),
            password: "hunter22".to_string(),
        }
        .validate()
        .unwrap();
        assert!(!format!("{request:?}").contains("hunter22"));
    }

    #[test]
    fn test_change_password_checks_in_order() {
        let mut form = ChangePasswordForm::default();
        assert_eq!(form.validate().unwrap_err().reason, "Please fill all fields.");

        form.old_password = "oldpass".to_string();
        form.new_password = "short".to_string();
        form.repeat_new_password = "other".to_string();
        assert_eq!(
            form.validate().unwrap_err().reason,
            "New password must be at least 6 characters."
        );

        form.new_password = "longenough".to_string();
        assert_eq!(form.validate().unwrap_err().reason, "New passwords do not match.");

        form.repeat_new_password = "longenough".to_string();
        assert_eq!(
            serde_json::to_value(form.validate().unwrap()).unwrap(),
            json!({ "oldPassword": "oldpass", "newPassword": "longenough" })
        );
    }
}
