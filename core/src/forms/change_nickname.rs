//! Nickname change form

use serde::Deserialize;
use validator::Validate;

use crate::domain::entities::user::User;
use crate::errors::{FormError, FormErrors};

use super::{log_rejection, syntax_errors, FormContext};

pub const NICKNAME_MAX_LENGTH: u64 = 20;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct ChangeNicknameForm {
    #[validate(length(max = NICKNAME_MAX_LENGTH, code = "nickname_length", message = "Nickname must be at most 20 characters"))]
    pub nickname_new: String,
}

#[derive(Debug, Clone)]
pub struct ValidatedNicknameChange {
    pub user: User,
    pub nickname: String,
}

impl ChangeNicknameForm {
    pub fn new(nickname_new: impl Into<String>) -> Self {
        Self {
            nickname_new: nickname_new.into(),
        }
    }

    /// Validate a nickname change for the logged-in user
    ///
    /// Needs no store access. The field error and the `not_logged_in` form
    /// error are reported together.
    pub fn validate(&self, ctx: &FormContext) -> Result<ValidatedNicknameChange, FormErrors> {
        let form = Self::new(self.nickname_new.trim());
        let mut errors = syntax_errors(&form);

        if form.nickname_new.is_empty() {
            errors.push(FormError::nickname_blank());
        }

        let user = match &ctx.user {
            Some(user) => Some(user.clone()),
            None => {
                errors.push(FormError::not_logged_in());
                None
            }
        };

        match user {
            Some(user) if errors.is_empty() => Ok(ValidatedNicknameChange {
                user,
                nickname: form.nickname_new,
            }),
            _ => {
                log_rejection("change_nickname", &errors);
                Err(errors)
            }
        }
    }
}
