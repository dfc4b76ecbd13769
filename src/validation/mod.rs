//! Field checks for the console forms. Every check is a pure function; the
//! password rules live in [`password_issue`] so the boolean check and the
//! displayed message always agree.

pub mod forms;
pub mod upload;

pub use forms::{
    Field, FieldError, ForgotPasswordInputs, FormContext, FormInputs, LoginInputs,
    RegisterInputs, ResetPasswordInputs, ValidationError, check_validation, field_message,
    validate_form,
};
pub use upload::{UploadError, image_mime_for, validate_image};

use once_cell::sync::Lazy;
use regex::Regex;

const EMAIL_PATTERN: &str = r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9]([A-Za-z0-9-]*[A-Za-z0-9])?(\.[A-Za-z0-9]([A-Za-z0-9-]*[A-Za-z0-9])?)*$";
const PHONE_PATTERN: &str = r"^[0-9]{10}$";
const PINCODE_PATTERN: &str = r"^[0-9]{6}$";
/// Looser shape accepted for allow-list numbers: optional `+`, area code in
/// parentheses, and `-`, `.` or space separators.
const CONTACT_PHONE_PATTERN: &str =
    r"^[+]?[(]?[0-9]{1,4}[)]?[-\s.]?[(]?[0-9]{1,4}[)]?[-\s.]?[0-9]{1,9}$";

/// Symbols a password must contain at least one of.
pub const PASSWORD_SYMBOLS: &str = "@$!%*?&#";
pub const PASSWORD_MIN_CHARS: usize = 8;
pub const PASSWORD_MAX_CHARS: usize = 16;

static EMAIL_REGEX: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(EMAIL_PATTERN).ok());
static PHONE_REGEX: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(PHONE_PATTERN).ok());
static PINCODE_REGEX: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(PINCODE_PATTERN).ok());
static CONTACT_PHONE_REGEX: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(CONTACT_PHONE_PATTERN).ok());

fn matches(regex: &Lazy<Option<Regex>>, value: &str) -> bool {
    regex.as_ref().is_some_and(|regex| regex.is_match(value))
}

/// `local@domain` shape check. Emptiness is handled by the required-field
/// rules, so the empty string is not reported here.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    email.is_empty() || matches(&EMAIL_REGEX, email)
}

/// Exactly ten ASCII digits.
#[must_use]
pub fn is_valid_phone(phone: &str) -> bool {
    matches(&PHONE_REGEX, phone)
}

/// Six-digit postal code.
#[must_use]
pub fn is_valid_pincode(pincode: &str) -> bool {
    matches(&PINCODE_REGEX, pincode)
}

#[must_use]
pub fn is_valid_contact_phone(phone: &str) -> bool {
    matches(&CONTACT_PHONE_REGEX, phone)
}

/// First failing password rule, in reporting order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PasswordIssue {
    Length,
    Lowercase,
    Uppercase,
    Digit,
    Symbol,
    /// Every rule passes but a character outside the allowed set is present.
    Charset,
}

impl PasswordIssue {
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::Length => "Password must be between 8 and 16 characters long.",
            Self::Lowercase => "Password must contain at least one lowercase letter.",
            Self::Uppercase => "Password must contain at least one uppercase letter.",
            Self::Digit => "Password must contain at least one digit.",
            Self::Symbol => "Password must contain at least one special character.",
            Self::Charset => "Only a-z, A-Z, 0-9, @$!%*?&# are allowed",
        }
    }
}

fn is_password_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || PASSWORD_SYMBOLS.contains(c)
}

/// Checks `password` against the strength rules and returns the first one it
/// breaks.
#[must_use]
pub fn password_issue(password: &str) -> Option<PasswordIssue> {
    let chars = password.chars().count();
    if !(PASSWORD_MIN_CHARS..=PASSWORD_MAX_CHARS).contains(&chars) {
        return Some(PasswordIssue::Length);
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        return Some(PasswordIssue::Lowercase);
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        return Some(PasswordIssue::Uppercase);
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        return Some(PasswordIssue::Digit);
    }
    if !password.chars().any(|c| PASSWORD_SYMBOLS.contains(c)) {
        return Some(PasswordIssue::Symbol);
    }
    if !password.chars().all(is_password_char) {
        return Some(PasswordIssue::Charset);
    }
    None
}

#[must_use]
pub fn is_valid_password(password: &str) -> bool {
    password_issue(password).is_none()
}

/// Message shown under a password field. Valid passwords get the charset
/// hint, which is what the field displays when no rule is broken.
#[must_use]
pub fn password_message(password: &str) -> &'static str {
    password_issue(password)
        .unwrap_or(PasswordIssue::Charset)
        .message()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shapes() {
        assert!(is_valid_email(""));
        assert!(is_valid_email("office@school.edu"));
        assert!(is_valid_email("first.last+tag@mail.school-one.in"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("a@-school.edu"));
        assert!(!is_valid_email("a@school..edu"));
        assert!(!is_valid_email("a b@school.edu"));
    }

    #[test]
    fn phone_requires_ten_digits() {
        assert!(is_valid_phone("9876543210"));
        assert!(!is_valid_phone("987654321"));
        assert!(!is_valid_phone("98765432101"));
        assert!(!is_valid_phone("98765o3210"));
        assert!(!is_valid_phone("+919876543"));
        assert!(!is_valid_phone("٩٨٧٦٥٤٣٢١٠"));
    }

    #[test]
    fn contact_phone_allows_separators() {
        assert!(is_valid_contact_phone("+91 9876-543210"));
        assert!(is_valid_contact_phone("(022) 2345.6789"));
        assert!(is_valid_contact_phone("1234567890"));
        assert!(!is_valid_contact_phone("call me"));
        assert!(!is_valid_contact_phone(""));
    }

    #[test]
    fn pincode_is_six_digits() {
        assert!(is_valid_pincode("560001"));
        assert!(!is_valid_pincode("56001"));
        assert!(!is_valid_pincode("56000a"));
    }

    #[test]
    fn password_rules_report_in_order() {
        assert_eq!(password_issue("Ab1@"), Some(PasswordIssue::Length));
        assert_eq!(password_issue("Abcdefgh1@Abcdefg"), Some(PasswordIssue::Length));
        assert_eq!(password_issue("ABCDEFG1@"), Some(PasswordIssue::Lowercase));
        assert_eq!(password_issue("abcdefg1@"), Some(PasswordIssue::Uppercase));
        assert_eq!(password_issue("Abcdefgh"), Some(PasswordIssue::Digit));
        assert_eq!(password_issue("Abcdefg1"), Some(PasswordIssue::Symbol));
        assert_eq!(password_issue("Abcd fg1@"), Some(PasswordIssue::Charset));
        assert_eq!(password_issue("Abcdefg1@"), None);
    }

    #[test]
    fn missing_digit_and_symbol_reports_digit() {
        assert_eq!(
            password_message("Abcdefgh"),
            "Password must contain at least one digit."
        );
    }

    #[test]
    fn boolean_and_message_agree() {
        for password in ["", "short", "Abcdefg1@", "Abcd efg1@", "ABCDEFGH1@", "Abcdefg1"] {
            let valid = is_valid_password(password);
            assert_eq!(valid, password_issue(password).is_none(), "{password}");
            if !valid {
                assert_ne!(password_message(password), "");
            }
        }
    }
}
