//! Request body validation.
//!
//! A `Validator` collects one `FieldError` per failing field. Rules on a field run in the
//! order they are chained and stop at the first failure.
//!
//! ```rust,ignore
//! let mut v = Validator::new();
//! v.field("email", Some(dto.email.as_str()))
//!     .not_empty("Email cannot be blank.")
//!     .email("Please enter a valid email address.");
//! v.finish()?;
//! ```

use url::Url;

use crate::{model::api::FieldErrorDto, server::error::AppError};

/// A validation failure on a single request field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub param: String,
    pub msg: String,
    pub value: Option<String>,
}

impl FieldError {
    pub fn new(param: impl Into<String>, msg: impl Into<String>, value: Option<String>) -> Self {
        Self {
            param: param.into(),
            msg: msg.into(),
            value,
        }
    }

    pub fn into_dto(self) -> FieldErrorDto {
        FieldErrorDto {
            param: self.param,
            msg: self.msg,
            value: self.value,
        }
    }
}

#[derive(Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a rule chain for `param`. `None` means the field was absent from the request.
    pub fn field<'v>(&'v mut self, param: &'static str, value: Option<&'v str>) -> FieldCheck<'v> {
        FieldCheck {
            errors: &mut self.errors,
            param,
            value,
            done: false,
        }
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    /// Converts collected failures into `AppError::Validation`.
    pub fn finish(self) -> Result<(), AppError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(self.errors))
        }
    }
}

/// Rule chain for one field.
pub struct FieldCheck<'v> {
    errors: &'v mut Vec<FieldError>,
    param: &'static str,
    value: Option<&'v str>,
    done: bool,
}

impl<'v> FieldCheck<'v> {
    /// Skips every following rule when the field is absent.
    pub fn optional(mut self) -> Self {
        if self.value.is_none() {
            self.done = true;
        }
        self
    }

    pub fn not_empty(self, msg: &str) -> Self {
        self.check(|v| !v.trim().is_empty(), msg)
    }

    pub fn email(self, msg: &str) -> Self {
        self.check(is_email, msg)
    }

    /// Character count within `min..=max`.
    pub fn length(self, min: usize, max: usize, msg: &str) -> Self {
        self.check(
            |v| {
                let len = v.chars().count();
                len >= min && len <= max
            },
            msg,
        )
    }

    pub fn max_length(self, max: usize, msg: &str) -> Self {
        self.length(0, max, msg)
    }

    pub fn equals(self, other: &str, msg: &str) -> Self {
        self.check(|v| v == other, msg)
    }

    pub fn one_of(self, allowed: &[&str], msg: &str) -> Self {
        self.check(|v| allowed.contains(&v), msg)
    }

    pub fn numeric(self, msg: &str) -> Self {
        self.check(is_numeric, msg)
    }

    pub fn url(self, msg: &str) -> Self {
        self.check(is_url, msg)
    }

    pub fn date(self, msg: &str) -> Self {
        self.check(|v| super::format::parse_event_time(v).is_some(), msg)
    }

    /// Runs an arbitrary predicate on the value.
    pub fn check(mut self, rule: impl FnOnce(&str) -> bool, msg: &str) -> Self {
        if self.done {
            return self;
        }

        let value = self.value.unwrap_or("");
        if !rule(value) {
            self.errors.push(FieldError::new(
                self.param,
                msg,
                self.value.map(str::to_string),
            ));
            self.done = true;
        }

        self
    }
}

/// Renders a JSON scalar the way a form would submit it.
///
/// Strings pass through, numbers are printed, `null` is treated as absent.
pub fn json_scalar(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && !value.chars().any(char::is_whitespace)
        && domain.split('.').count() >= 2
        && domain.split('.').all(|label| {
            !label.is_empty() && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
        })
}

/// Optional sign, optional decimal part, at least one digit.
fn is_numeric(value: &str) -> bool {
    let digits = value.strip_prefix(['+', '-']).unwrap_or(value);
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };

    let all_digits = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    match frac_part {
        Some(frac) => all_digits(int_part) && !frac.is_empty() && all_digits(frac),
        None => !int_part.is_empty() && all_digits(int_part),
    }
}

/// Accepts `http`/`https` URLs and bare hostnames such as `example.com/path`.
fn is_url(value: &str) -> bool {
    if value.chars().any(char::is_whitespace) {
        return false;
    }

    let parsed = if value.contains("://") {
        Url::parse(value)
    } else {
        Url::parse(&format!("http://{}", value))
    };

    match parsed {
        Ok(url) => {
            matches!(url.scheme(), "http" | "https")
                && url.host_str().is_some_and(|host| host.contains('.'))
        }
        Err(_) => false,
    }
}
