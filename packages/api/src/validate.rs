//! Form checks run before anything is sent to the backend.

use crate::error::ValidationError;

/// Phone numbers are local ten-digit numbers.
pub const PHONE_LENGTH: usize = 10;

/// Trimmed `value`, or `Required` when it is blank.
pub fn required<'a>(field: &'static str, value: &'a str) -> Result<&'a str, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        Err(ValidationError::Required { field })
    } else {
        Ok(value)
    }
}

pub fn phone(value: &str) -> Result<&str, ValidationError> {
    let value = value.trim();
    if !value.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::PhoneDigits);
    }
    if value.len() != PHONE_LENGTH {
        return Err(ValidationError::PhoneLength {
            expected: PHONE_LENGTH,
        });
    }
    Ok(value)
}

/// Blank phones are allowed on optional fields; anything else must be valid.
pub fn optional_phone(value: &str) -> Result<Option<&str>, ValidationError> {
    if value.trim().is_empty() {
        Ok(None)
    } else {
        phone(value).map(Some)
    }
}

pub fn email(value: &str) -> Result<&str, ValidationError> {
    let value = value.trim();
    let Some((local, domain)) = value.split_once('@') else {
        return Err(ValidationError::Email);
    };
    let domain_ok = domain
        .split_once('.')
        .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty());
    if local.is_empty() || !domain_ok || value.contains(char::is_whitespace) {
        return Err(ValidationError::Email);
    }
    Ok(value)
}

pub fn password_confirmation<'a>(
    password: &'a str,
    confirmation: &str,
) -> Result<&'a str, ValidationError> {
    let password = required("Password", password)?;
    if password != confirmation.trim() {
        return Err(ValidationError::PasswordMismatch);
    }
    Ok(password)
}

/// The class form needs a name, a year and at least one teacher.
pub fn class_form<'a>(
    name: &'a str,
    year_id: Option<i64>,
    teacher_ids: &[i64],
) -> Result<(&'a str, i64), ValidationError> {
    let name = required("Class name", name)?;
    let year_id = year_id.ok_or(ValidationError::EmptySelection {
        what: "academic year",
    })?;
    if teacher_ids.is_empty() {
        return Err(ValidationError::EmptySelection { what: "teacher" });
    }
    Ok((name, year_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phone_must_be_ten_digits() {
        assert_eq!(phone(" 0912345678 "), Ok("0912345678"));
        assert_eq!(
            phone("091234567"),
            Err(ValidationError::PhoneLength { expected: 10 })
        );
        assert_eq!(
            phone("09123456789"),
            Err(ValidationError::PhoneLength { expected: 10 })
        );
        assert_eq!(phone("09123-5678"), Err(ValidationError::PhoneDigits));
    }

    #[test]
    fn test_optional_phone() {
        assert_eq!(optional_phone("  "), Ok(None));
        assert_eq!(optional_phone("0912345678"), Ok(Some("0912345678")));
        assert!(optional_phone("123").is_err());
    }

    #[test]
    fn test_required_trims() {
        assert_eq!(required("Name", "  An "), Ok("An"));
        assert_eq!(
            required("Name", "   "),
            Err(ValidationError::Required { field: "Name" })
        );
        assert_eq!(
            ValidationError::Required { field: "Name" }.to_string(),
            "Name is required"
        );
    }

    #[test]
    fn test_email_shape() {
        assert!(email("b@school.vn").is_ok());
        assert!(email("b@school").is_err());
        assert!(email("@school.vn").is_err());
        assert!(email("b school@x.vn").is_err());
    }

    #[test]
    fn test_password_confirmation() {
        assert_eq!(password_confirmation("secret", "secret"), Ok("secret"));
        assert_eq!(
            password_confirmation("secret", "secreT"),
            Err(ValidationError::PasswordMismatch)
        );
        assert!(matches!(
            password_confirmation("", ""),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_class_form() {
        assert_eq!(class_form("1A", Some(2), &[3]), Ok(("1A", 2)));
        assert_eq!(
            class_form("1A", None, &[3]),
            Err(ValidationError::EmptySelection {
                what: "academic year"
            })
        );
        assert_eq!(
            class_form("1A", Some(2), &[]),
            Err(ValidationError::EmptySelection { what: "teacher" })
        );
        assert!(class_form(" ", Some(2), &[3]).is_err());
    }
}
