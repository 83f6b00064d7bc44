use crate::error::ValidationError;

/// Email + password sign-in. No credentials are checked, only presence.
#[derive(Debug, Clone, Default)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

impl SignInForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.email.is_empty() || self.password.is_empty() {
            return Err(ValidationError::IncompleteForm);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct SignUpForm {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl SignUpForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.is_empty() || self.email.is_empty() || self.password.is_empty() {
            return Err(ValidationError::IncompleteForm);
        }
        Ok(())
    }
}

/// Profile password change
#[derive(Debug, Clone, Default)]
pub struct PasswordChange {
    pub current: String,
    pub new: String,
    pub confirm: String,
}

impl PasswordChange {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.new != self.confirm {
            return Err(ValidationError::PasswordMismatch);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::Severity;

    #[test]
    fn test_sign_in_requires_both_fields() {
        assert_eq!(
            SignInForm::new("", "secret").validate(),
            Err(ValidationError::IncompleteForm)
        );
        assert_eq!(
            SignInForm::new("a@b.c", "").validate(),
            Err(ValidationError::IncompleteForm)
        );
        assert!(SignInForm::new("a@b.c", "secret").validate().is_ok());
    }

    #[test]
    fn test_sign_up_requires_every_field() {
        let mut form = SignUpForm {
            name: "Sam".into(),
            email: "sam@example.com".into(),
            password: String::new(),
        };
        assert!(form.validate().is_err());

        form.password = "pw".into();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_password_mismatch_becomes_destructive_toast() {
        let change = PasswordChange {
            current: "old".into(),
            new: "one".into(),
            confirm: "two".into(),
        };

        let err = change.validate().unwrap_err();
        let toast = err.to_toast();
        assert_eq!(toast.severity, Severity::Destructive);
        assert_eq!(toast.description, "New passwords do not match.");
    }
}
