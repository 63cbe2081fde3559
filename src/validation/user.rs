use crate::errno::{self, DomainError};
use crate::models::ListRequest;
use crate::models::user::{
    ChangePasswordRequest, CreateUserRequest, LoginRequest, UpdateUserRequest,
};
use crate::store::Store;

use super::{Validator, is_valid_email, is_valid_password, is_valid_phone, is_valid_username};

const MAX_NICKNAME_LEN: usize = 30;

fn check_username(username: &str) -> Result<(), DomainError> {
    if is_valid_username(username) {
        Ok(())
    } else {
        Err(errno::USERNAME_INVALID)
    }
}

fn check_nickname(nickname: &str) -> Result<(), DomainError> {
    if nickname.len() >= MAX_NICKNAME_LEN {
        return Err(errno::INVALID_ARGUMENT
            .with_message("nickname must be less than 30 characters"));
    }
    Ok(())
}

fn check_caller(user_id: &str, caller_id: &str) -> Result<(), DomainError> {
    if user_id != caller_id {
        return Err(errno::PERMISSION_DENIED);
    }
    Ok(())
}

impl<S: Store> Validator<S> {
    pub fn validate_create_user_request(&self, rq: &CreateUserRequest) -> Result<(), DomainError> {
        check_username(&rq.username)?;
        is_valid_password(&rq.password)?;
        if let Some(nickname) = &rq.nickname {
            check_nickname(nickname)?;
        }
        is_valid_email(&rq.email)?;
        is_valid_phone(&rq.phone)
    }

    /// Only the fields present in the request are checked.
    pub fn validate_update_user_request(
        &self,
        rq: &UpdateUserRequest,
        caller_id: &str,
    ) -> Result<(), DomainError> {
        check_caller(&rq.user_id, caller_id)?;
        if let Some(nickname) = &rq.nickname {
            check_nickname(nickname)?;
        }
        if let Some(email) = &rq.email {
            is_valid_email(email)?;
        }
        if let Some(phone) = &rq.phone {
            is_valid_phone(phone)?;
        }
        Ok(())
    }

    pub fn validate_change_password_request(
        &self,
        rq: &ChangePasswordRequest,
        caller_id: &str,
    ) -> Result<(), DomainError> {
        check_caller(&rq.user_id, caller_id)?;
        if rq.old_password.is_empty() {
            return Err(errno::INVALID_ARGUMENT.with_message("old password cannot be empty"));
        }
        is_valid_password(&rq.new_password)
    }

    /// Login only requires both credentials to be present; stored
    /// credentials decide the rest.
    pub fn validate_login_request(&self, rq: &LoginRequest) -> Result<(), DomainError> {
        if rq.username.is_empty() {
            return Err(errno::INVALID_ARGUMENT.with_message("username cannot be empty"));
        }
        if rq.password.is_empty() {
            return Err(errno::INVALID_ARGUMENT.with_message("password cannot be empty"));
        }
        Ok(())
    }

    pub fn validate_list_request(&self, rq: &ListRequest) -> Result<(), DomainError> {
        if rq.offset < 0 {
            return Err(errno::INVALID_ARGUMENT
                .with_message("offset must be greater than or equal to 0"));
        }
        if rq.limit <= 0 {
            return Err(errno::INVALID_ARGUMENT.with_message("limit must be greater than 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::NullStore;
    use rstest::{fixture, rstest};

    #[fixture]
    fn validator() -> Validator<NullStore> {
        Validator::new(NullStore::default())
    }

    fn create_request() -> CreateUserRequest {
        CreateUserRequest {
            username: "colin_404".to_string(),
            password: "miniblog1234".to_string(),
            nickname: Some("colin".to_string()),
            email: "colin404@foxmail.com".to_string(),
            phone: "18110000000".to_string(),
        }
    }

    #[rstest]
    fn test_create_user_accepts_valid_request(validator: Validator<NullStore>) {
        assert!(validator.validate_create_user_request(&create_request()).is_ok());
    }

    #[rstest]
    fn test_create_user_lifts_username_failure(validator: Validator<NullStore>) {
        let rq = CreateUserRequest {
            username: "ab".to_string(),
            ..create_request()
        };
        let err = validator.validate_create_user_request(&rq).unwrap_err();
        assert_eq!(err, errno::USERNAME_INVALID);
        assert_eq!(err.status_code().as_u16(), 400);
    }

    #[rstest]
    fn test_create_user_reports_first_bad_field(validator: Validator<NullStore>) {
        let rq = CreateUserRequest {
            password: "abc12".to_string(),
            email: "not-an-email".to_string(),
            ..create_request()
        };
        let err = validator.validate_create_user_request(&rq).unwrap_err();
        assert_eq!(err.message(), "password must be at least 6 characters long");
    }

    #[rstest]
    #[case("a".repeat(29), true)]
    #[case("a".repeat(30), false)]
    fn test_nickname_length_bound(
        validator: Validator<NullStore>,
        #[case] nickname: String,
        #[case] accepted: bool,
    ) {
        let rq = CreateUserRequest {
            nickname: Some(nickname),
            ..create_request()
        };
        let result = validator.validate_create_user_request(&rq);
        assert_eq!(result.is_ok(), accepted);
        if let Err(err) = result {
            assert_eq!(err.message(), "nickname must be less than 30 characters");
        }
    }

    #[rstest]
    fn test_update_user_rejects_other_callers(validator: Validator<NullStore>) {
        let rq = UpdateUserRequest {
            user_id: "user-000001".to_string(),
            nickname: None,
            email: None,
            phone: None,
        };
        let err = validator
            .validate_update_user_request(&rq, "user-000002")
            .unwrap_err();
        assert!(err.is(&errno::PERMISSION_DENIED));
        assert!(validator.validate_update_user_request(&rq, "user-000001").is_ok());
    }

    #[rstest]
    fn test_update_user_checks_supplied_fields_only(validator: Validator<NullStore>) {
        let rq = UpdateUserRequest {
            user_id: "user-000001".to_string(),
            nickname: None,
            email: None,
            phone: Some("12912345678".to_string()),
        };
        let err = validator
            .validate_update_user_request(&rq, "user-000001")
            .unwrap_err();
        assert_eq!(err.message(), "invalid phone format");
    }

    #[rstest]
    fn test_change_password(validator: Validator<NullStore>) {
        let mut rq = ChangePasswordRequest {
            user_id: "user-000001".to_string(),
            old_password: String::new(),
            new_password: "abc123".to_string(),
        };
        let err = validator
            .validate_change_password_request(&rq, "user-000001")
            .unwrap_err();
        assert_eq!(err.message(), "old password cannot be empty");

        rq.old_password = "old-secret".to_string();
        rq.new_password = "abcdef".to_string();
        let err = validator
            .validate_change_password_request(&rq, "user-000001")
            .unwrap_err();
        assert_eq!(err.message(), "password must contain at least one number");

        rq.new_password = "abc123".to_string();
        assert!(validator.validate_change_password_request(&rq, "user-000001").is_ok());
        assert!(
            validator
                .validate_change_password_request(&rq, "someone-else")
                .unwrap_err()
                .is(&errno::PERMISSION_DENIED)
        );
    }

    #[rstest]
    #[case("", "secret", Some("username cannot be empty"))]
    #[case("alice", "", Some("password cannot be empty"))]
    #[case("x", "y", None)]
    fn test_login_requires_credentials(
        validator: Validator<NullStore>,
        #[case] username: &str,
        #[case] password: &str,
        #[case] expected: Option<&str>,
    ) {
        let rq = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        let got = validator.validate_login_request(&rq).err();
        assert_eq!(got.as_ref().map(|err| err.message()), expected);
    }

    #[rstest]
    #[case(0, 10, None)]
    #[case(-1, 10, Some("offset must be greater than or equal to 0"))]
    #[case(0, 0, Some("limit must be greater than 0"))]
    #[case(5, -3, Some("limit must be greater than 0"))]
    fn test_list_request_bounds(
        validator: Validator<NullStore>,
        #[case] offset: i64,
        #[case] limit: i64,
        #[case] expected: Option<&str>,
    ) {
        let got = validator
            .validate_list_request(&ListRequest { offset, limit })
            .err();
        assert_eq!(got.as_ref().map(|err| err.message()), expected);
    }
}
