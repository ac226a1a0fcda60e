use super::{UploadFile, ValidationError};
use crate::model::Credentials;

/// Sign-up form contents.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignUpForm {
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    pub avatar: Option<UploadFile>,
}

impl SignUpForm {
    /// Check the form and split it into credentials and the avatar upload.
    ///
    /// The avatar must already have passed image validation when it was
    /// picked.
    pub fn validate(&self) -> Result<(Credentials, UploadFile), ValidationError> {
        if self.username.trim().is_empty() {
            return Err(ValidationError::EmptyField { field: "Username" });
        }
        if self.password.is_empty() {
            return Err(ValidationError::EmptyField { field: "Password" });
        }
        if self.password != self.confirm_password {
            return Err(ValidationError::PasswordMismatch);
        }
        let avatar = self.avatar.clone().ok_or(ValidationError::MissingAvatar)?;
        Ok((
            Credentials {
                username: self.username.trim().to_string(),
                password: self.password.clone(),
            },
            avatar,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> SignUpForm {
        SignUpForm {
            username: "anna".to_string(),
            password: "secret".to_string(),
            confirm_password: "secret".to_string(),
            avatar: None,
        }
    }

    #[test]
    fn mismatch_is_reported_before_missing_avatar() {
        let mut f = form();
        f.confirm_password = "other".to_string();
        assert_eq!(f.validate().unwrap_err(), ValidationError::PasswordMismatch);
    }

    #[test]
    fn avatar_is_required() {
        assert_eq!(form().validate().unwrap_err(), ValidationError::MissingAvatar);
    }
}
