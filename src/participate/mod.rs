//! The "participate" giveaway form.
//!
//! [`ParticipateController`] owns the form data, the touched flags and the
//! modal lifecycle. Validation is derived on every read from the current
//! [`FormData`], so there is no cached state to go stale.

mod controller;
mod handler;
mod validation;

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::i18n::Translator;

pub use controller::{ModalPhase, Mounted, ParticipateController, ParticipateOptions, SubmitOutcome};
pub use handler::{LogSubmitHandler, SubmitHandler};
pub use validation::{clean_phone, is_uzbek, is_valid_email, is_valid_name, is_valid_phone};

/// The values entered in the participate form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormData {
    pub name: String,
    pub email: String,
    /// Raw phone input, formatting characters included.
    pub phone: String,
    pub agree: bool,
}

impl FormData {
    pub fn name_valid(&self) -> bool {
        is_valid_name(&self.name)
    }

    pub fn email_valid(&self) -> bool {
        is_valid_email(&self.email)
    }

    pub fn phone_valid(&self) -> bool {
        is_valid_phone(&self.phone)
    }

    pub const fn agree_valid(&self) -> bool {
        self.agree
    }

    pub fn is_valid(&self) -> bool {
        self.name_valid() && self.email_valid() && self.phone_valid() && self.agree_valid()
    }

    /// Error codes for every touched field that fails validation.
    pub fn errors(&self, touched: TouchedFlags) -> FieldErrors {
        let check = |field: FormField, valid: bool, code: ErrorCode| {
            (touched.get(field) && !valid).then_some(code)
        };

        let phone_code = if is_uzbek(&self.phone) {
            ErrorCode::InvalidPhoneUz
        } else {
            ErrorCode::InvalidPhoneIntl
        };

        FieldErrors {
            name: check(FormField::Name, self.name_valid(), ErrorCode::Required),
            email: check(FormField::Email, self.email_valid(), ErrorCode::InvalidEmail),
            phone: check(FormField::Phone, self.phone_valid(), phone_code),
            agree: check(FormField::Agree, self.agree_valid(), ErrorCode::MustAgree),
        }
    }
}

/// Identifies a single input of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Name,
    Email,
    Phone,
    Agree,
}

impl FormField {
    pub const ALL: [Self; 4] = [Self::Name, Self::Email, Self::Phone, Self::Agree];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::Agree => "agree",
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which fields the user has already left at least once.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct TouchedFlags {
    pub name: bool,
    pub email: bool,
    pub phone: bool,
    pub agree: bool,
}

impl TouchedFlags {
    pub const fn all() -> Self {
        Self {
            name: true,
            email: true,
            phone: true,
            agree: true,
        }
    }

    pub const fn get(self, field: FormField) -> bool {
        match field {
            FormField::Name => self.name,
            FormField::Email => self.email,
            FormField::Phone => self.phone,
            FormField::Agree => self.agree,
        }
    }

    pub const fn set(&mut self, field: FormField) {
        match field {
            FormField::Name => self.name = true,
            FormField::Email => self.email = true,
            FormField::Phone => self.phone = true,
            FormField::Agree => self.agree = true,
        }
    }
}

/// Validation failure shown next to a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    Required,
    InvalidEmail,
    InvalidPhoneUz,
    InvalidPhoneIntl,
    MustAgree,
}

impl ErrorCode {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::InvalidEmail => "invalid_email",
            Self::InvalidPhoneUz => "invalid_phone_uz",
            Self::InvalidPhoneIntl => "invalid_phone_intl",
            Self::MustAgree => "must_agree",
        }
    }

    /// Translation key of the human readable message.
    pub fn message_key(self) -> String {
        format!("participate.errors.{}", self.as_str())
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-field validation errors. `None` means nothing to show.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FieldErrors {
    pub name: Option<ErrorCode>,
    pub email: Option<ErrorCode>,
    pub phone: Option<ErrorCode>,
    pub agree: Option<ErrorCode>,
}

impl FieldErrors {
    pub const fn get(&self, field: FormField) -> Option<ErrorCode> {
        match field {
            FormField::Name => self.name,
            FormField::Email => self.email,
            FormField::Phone => self.phone,
            FormField::Agree => self.agree,
        }
    }

    /// Error code string of a field, empty when there is no error.
    #[allow(dead_code)]
    pub fn code(&self, field: FormField) -> &'static str {
        self.get(field).map_or("", ErrorCode::as_str)
    }

    /// Localized message of a field, empty when there is no error.
    pub fn text(&self, field: FormField, translator: &dyn Translator) -> String {
        self.get(field)
            .map(|code| translator.translate(&code.message_key()))
            .unwrap_or_default()
    }

    #[allow(dead_code)]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone.is_none() && self.agree.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> FormData {
        FormData {
            name: "Aziz".to_string(),
            email: "aziz@example.uz".to_string(),
            phone: "+998 90 123 45 67".to_string(),
            agree: true,
        }
    }

    #[test]
    fn test_untouched_fields_report_no_errors() {
        let errors = FormData::default().errors(TouchedFlags::default());
        assert!(errors.is_empty());
        for field in FormField::ALL {
            assert_eq!(errors.code(field), "");
        }
    }

    #[test]
    fn test_only_touched_field_reports_error() {
        let mut touched = TouchedFlags::default();
        touched.set(FormField::Name);

        let errors = FormData::default().errors(touched);
        assert_eq!(errors.code(FormField::Name), "required");
        assert_eq!(errors.code(FormField::Email), "");
        assert_eq!(errors.code(FormField::Phone), "");
        assert_eq!(errors.code(FormField::Agree), "");
    }

    #[test]
    fn test_all_error_codes() {
        let form = FormData {
            name: " A ".to_string(),
            email: "user@example".to_string(),
            phone: "12345".to_string(),
            agree: false,
        };
        let errors = form.errors(TouchedFlags::all());
        assert_eq!(errors.name, Some(ErrorCode::Required));
        assert_eq!(errors.email, Some(ErrorCode::InvalidEmail));
        assert_eq!(errors.phone, Some(ErrorCode::InvalidPhoneIntl));
        assert_eq!(errors.agree, Some(ErrorCode::MustAgree));
    }

    #[test]
    fn test_uzbek_phone_error_code() {
        let form = FormData {
            phone: "+998 90 123 45".to_string(),
            ..valid_form()
        };
        let errors = form.errors(TouchedFlags::all());
        assert_eq!(errors.code(FormField::Phone), "invalid_phone_uz");
    }

    #[test]
    fn test_valid_form_has_no_errors() {
        let form = valid_form();
        assert!(form.is_valid());
        assert!(form.errors(TouchedFlags::all()).is_empty());
    }

    #[test]
    fn test_message_key() {
        assert_eq!(
            ErrorCode::InvalidPhoneIntl.message_key(),
            "participate.errors.invalid_phone_intl"
        );
    }
}
