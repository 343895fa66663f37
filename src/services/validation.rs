//! 表单校验
//!
//! 校验在提交前完成，失败的表单不会发到网络。

use crate::error::ValidationError;
use regex::Regex;
use serde::Serialize;
use std::sync::OnceLock;

const MIN_PASSWORD_LEN: usize = 6;

fn email_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").ok())
        .as_ref()
}

fn phone_re() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\+?[0-9][0-9 \-]{5,}[0-9]$").ok())
        .as_ref()
}

pub fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Required { field })
    } else {
        Ok(())
    }
}

pub fn validate_email(value: &str) -> Result<(), ValidationError> {
    require("email", value)?;
    if email_re().is_some_and(|re| re.is_match(value.trim())) {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail {
            value: value.to_string(),
        })
    }
}

/// 7 到 15 位数字，允许前导 `+`、空格和 `-`
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    require("phone", value)?;
    let trimmed = value.trim();
    let digits = trimmed.chars().filter(char::is_ascii_digit).count();
    if phone_re().is_some_and(|re| re.is_match(trimmed)) && (7..=15).contains(&digits) {
        Ok(())
    } else {
        Err(ValidationError::InvalidPhone {
            value: value.to_string(),
        })
    }
}

pub fn validate_password(password: &str, confirm: &str) -> Result<(), ValidationError> {
    require("password", password)?;
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ValidationError::PasswordTooShort {
            min: MIN_PASSWORD_LEN,
        });
    }
    if password != confirm {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(())
}

/// 注册表单
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupForm {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing)]
    pub confirm_password: String,
    /// 人机验证 token，随请求一起提交
    pub captcha_token: String,
}

impl SignupForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        validate_email(&self.email)?;
        validate_password(&self.password, &self.confirm_password)?;
        if self.captcha_token.trim().is_empty() {
            return Err(ValidationError::MissingCaptcha);
        }
        Ok(())
    }
}

/// 线索表单（弹窗 / 联系我们）
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exam_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl LeadForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        validate_email(&self.email)?;
        validate_phone(&self.phone)
    }
}

/// 邮件订阅表单
#[derive(Debug, Clone, Default, Serialize)]
pub struct SubscribeForm {
    pub email: String,
}

impl SubscribeForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_email(&self.email)
    }
}

/// 管理员登录表单
#[derive(Debug, Clone, Default, Serialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_email(&self.email)?;
        require("password", &self.password)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email() {
        assert!(validate_email("learner@example.com").is_ok());
        assert_eq!(
            validate_email(" "),
            Err(ValidationError::Required { field: "email" })
        );
        assert!(matches!(
            validate_email("learner@example"),
            Err(ValidationError::InvalidEmail { .. })
        ));
    }

    #[test]
    fn test_phone() {
        assert!(validate_phone("+1 415-555-0100").is_ok());
        assert!(validate_phone("9876543210").is_ok());
        assert!(validate_phone("12345").is_err());
        assert!(validate_phone("555-CALL-NOW").is_err());
        assert!(validate_phone("+1234567890123456").is_err());
    }

    #[test]
    fn test_signup_reports_first_failure() {
        let mut form = SignupForm {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password: "secret1".to_string(),
            confirm_password: "secret2".to_string(),
            captcha_token: String::new(),
        };
        assert_eq!(form.validate(), Err(ValidationError::PasswordMismatch));

        form.confirm_password = "secret1".to_string();
        assert_eq!(form.validate(), Err(ValidationError::MissingCaptcha));

        form.captcha_token = "captcha-ok".to_string();
        assert!(form.validate().is_ok());
    }

    #[test]
    fn test_signup_payload_omits_confirmation() {
        let form = SignupForm {
            confirm_password: "x".to_string(),
            ..SignupForm::default()
        };
        let json = serde_json::to_value(&form).unwrap();
        assert!(json.get("confirmPassword").is_none());
        assert!(json.get("captchaToken").is_some());
    }

    #[test]
    fn test_short_password() {
        assert_eq!(
            validate_password("abc", "abc"),
            Err(ValidationError::PasswordTooShort { min: 6 })
        );
    }
}
