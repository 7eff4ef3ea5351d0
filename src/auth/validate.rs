//! Statically defined input rules, one set per operation. Every rule runs
//! and all violations are reported in a single ValidationError; handlers
//! must return before any store call when this fails.

use lazy_static::lazy_static;
use regex::Regex;

use crate::auth::dto::{LoginEmailRequest, LoginPhoneRequest, RegisterRequest, ValidateOtpRequest};
use crate::error::ApiError;

pub const MIN_PHONE_LEN: usize = 11;
pub const MIN_PASSWORD_LEN: usize = 6;
pub const MIN_OTP_LEN: usize = 4;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

fn check_phone(phone: &str, violations: &mut Vec<String>) {
    if phone.len() < MIN_PHONE_LEN {
        violations.push(format!("phone must be at least {MIN_PHONE_LEN} characters"));
    }
}

fn check_email(email: &str, violations: &mut Vec<String>) {
    if !is_valid_email(email) {
        violations.push("email must be a valid address".into());
    }
}

fn check_password(password: &str, violations: &mut Vec<String>) {
    if password.len() < MIN_PASSWORD_LEN {
        violations.push(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        ));
    }
}

fn check_otp(otp: &str, violations: &mut Vec<String>) {
    if otp.len() < MIN_OTP_LEN {
        violations.push(format!("otp must be at least {MIN_OTP_LEN} characters"));
    }
}

fn finish(violations: Vec<String>) -> Result<(), ApiError> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(ApiError::Validation(violations.join("; ")))
    }
}

impl RegisterRequest {
    /// Normalizes fields in place, then checks the register rule set.
    pub fn validate(&mut self) -> Result<(), ApiError> {
        self.name = self
            .name
            .take()
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());
        self.phone = self.phone.trim().to_string();
        self.email = self.email.trim().to_lowercase();
        self.password = self.password.trim().to_string();

        let mut violations = Vec::new();
        check_phone(&self.phone, &mut violations);
        check_email(&self.email, &mut violations);
        check_password(&self.password, &mut violations);
        finish(violations)
    }
}

impl LoginEmailRequest {
    pub fn validate(&mut self) -> Result<(), ApiError> {
        self.email = self.email.trim().to_lowercase();
        self.password = self.password.trim().to_string();

        let mut violations = Vec::new();
        check_email(&self.email, &mut violations);
        check_password(&self.password, &mut violations);
        finish(violations)
    }
}

impl LoginPhoneRequest {
    pub fn validate(&mut self) -> Result<(), ApiError> {
        self.phone = self.phone.trim().to_string();

        let mut violations = Vec::new();
        check_phone(&self.phone, &mut violations);
        finish(violations)
    }
}

impl ValidateOtpRequest {
    pub fn validate(&mut self) -> Result<(), ApiError> {
        self.phone = self.phone.trim().to_string();
        self.otp = self.otp.trim().to_string();

        let mut violations = Vec::new();
        check_phone(&self.phone, &mut violations);
        check_otp(&self.otp, &mut violations);
        finish(violations)
    }
}
