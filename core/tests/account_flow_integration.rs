//! End-to-end account flows over the in-memory collaborators

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use async_trait::async_trait;
    use uuid::Uuid;

    use ms_core::domain::entities::verification_code::{CodePurpose, VerificationCode};
    use ms_core::errors::{codes, DomainError};
    use ms_core::forms::{BindEmailForm, ChangeNicknameForm, LoginForm, RegistrationForm};
    use ms_core::repositories::MockUserRepository;
    use ms_core::services::{
        AccountService, AccountServiceConfig, MockAuthenticationService, MockSessionStore, SessionStore,
    };

    fn service() -> AccountService<MockUserRepository, MockSessionStore, MockAuthenticationService<MockUserRepository>> {
        let users = Arc::new(MockUserRepository::new());
        let auth = Arc::new(MockAuthenticationService::new(users.clone()));
        AccountService::new(users, Arc::new(MockSessionStore::new()), auth, AccountServiceConfig::default())
    }

    #[tokio::test]
    async fn test_register_logout_login_customize() {
        let service = service();
        let browser = "browser-session";

        // Sign up
        let ctx = service.context(browser).await.unwrap();
        let code = service
            .issue_code(&ctx, CodePurpose::Register, "carol@example.com")
            .await
            .unwrap()
            .code;
        let form = RegistrationForm {
            username: "carol".to_string(),
            password: "hunter22".to_string(),
            password_again: "hunter22".to_string(),
            email: "carol@example.com".to_string(),
            verification_code: code,
        };
        let signed_in = service.register(&ctx, &form).await.unwrap();
        let carol = signed_in.user;

        // Registration logs the new account in on a new session id
        assert!(!service.context(browser).await.unwrap().is_authenticated());
        let browser = signed_in.session_id;
        let ctx = service.context(&browser).await.unwrap();
        assert_eq!(ctx.user.as_ref().map(|u| u.id), Some(carol.id));

        service.logout(&ctx).await.unwrap();
        let ctx = service.context(&browser).await.unwrap();
        assert!(!ctx.is_authenticated());

        // Log back in from a different browser
        let other = service.context("other-browser").await.unwrap();
        let signed_in = service.login(&other, &LoginForm::new("carol", "hunter22")).await.unwrap();
        assert_eq!(signed_in.user.id, carol.id);
        let other_browser = signed_in.session_id;

        let ctx = service.context(&other_browser).await.unwrap();
        let user = service
            .change_nickname(&ctx, &ChangeNicknameForm::new("Caz"))
            .await
            .unwrap();
        assert_eq!(user.display_name(), "Caz");

        // Carol already bound an email during registration
        let ctx = service.context(&other_browser).await.unwrap();
        let code = service
            .issue_code(&ctx, CodePurpose::BindEmail, "second@example.com")
            .await
            .unwrap()
            .code;
        let err = service
            .bind_email(&ctx, &BindEmailForm::new("second@example.com", code))
            .await
            .unwrap_err();
        assert!(err.form_errors().unwrap().has_code(codes::EMAIL_ALREADY_BOUND));
    }

    #[tokio::test]
    async fn test_duplicate_registration_reports_field_errors() {
        let service = service();

        for (session, expect_ok) in [("first", true), ("second", false)] {
            let ctx = service.context(session).await.unwrap();
            let code = service
                .issue_code(&ctx, CodePurpose::Register, "dup@example.com")
                .await
                .unwrap()
                .code;
            let form = RegistrationForm {
                username: "duplicate".to_string(),
                password: "password".to_string(),
                password_again: "password".to_string(),
                email: "dup@example.com".to_string(),
                verification_code: code,
            };

            let result = service.register(&ctx, &form).await;
            if expect_ok {
                assert!(result.is_ok());
            } else {
                let err = result.unwrap_err();
                let errors = err.form_errors().unwrap();
                assert!(errors.has_code(codes::USERNAME_TAKEN));
                assert!(errors.has_code(codes::EMAIL_TAKEN));
                assert_eq!(errors.len(), 2);
            }
        }
    }

    /// Session backend that is down
    struct UnavailableSessions;

    #[async_trait]
    impl SessionStore for UnavailableSessions {
        async fn get_code(&self, _: &str, _: CodePurpose) -> Result<Option<VerificationCode>, DomainError> {
            Err(DomainError::Session("connection refused".to_string()))
        }
        async fn store_code(&self, _: &str, _: &VerificationCode) -> Result<(), DomainError> {
            Err(DomainError::Session("connection refused".to_string()))
        }
        async fn clear_code(&self, _: &str, _: CodePurpose) -> Result<(), DomainError> {
            Err(DomainError::Session("connection refused".to_string()))
        }
        async fn get_user_id(&self, _: &str) -> Result<Option<Uuid>, DomainError> {
            Err(DomainError::Session("connection refused".to_string()))
        }
        async fn set_user_id(&self, _: &str, _: Uuid) -> Result<(), DomainError> {
            Err(DomainError::Session("connection refused".to_string()))
        }
        async fn clear_user_id(&self, _: &str) -> Result<(), DomainError> {
            Err(DomainError::Session("connection refused".to_string()))
        }
    }

    #[tokio::test]
    async fn test_backend_failure_is_not_a_form_error() {
        let users = Arc::new(MockUserRepository::new());
        let auth = Arc::new(MockAuthenticationService::new(users.clone()));
        let service = AccountService::new(
            users,
            Arc::new(UnavailableSessions),
            auth,
            AccountServiceConfig::default(),
        );

        let err = service.context("any").await.unwrap_err();
        assert!(matches!(err, DomainError::Session(_)));
        assert!(err.form_errors().is_none());
    }
}
