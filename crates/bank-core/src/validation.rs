//! Request body validators
//!
//! Each validator inspects the raw arguments object and reports the first
//! problem as a message; `None` means the body passed. Controllers run a
//! composite of these before touching a use case.

use serde_json::Value;

use bank_fs::validate_segment;

/// Validates one aspect of a request body.
pub trait Validator: Send + Sync {
    /// Returns an error message, or `None` when the body is acceptable.
    fn validate(&self, body: &Value) -> Option<String>;
}

/// Requires a field to be present and non-null.
pub struct RequiredFieldValidator {
    field: &'static str,
}

impl RequiredFieldValidator {
    pub fn new(field: &'static str) -> Self {
        Self { field }
    }
}

impl Validator for RequiredFieldValidator {
    fn validate(&self, body: &Value) -> Option<String> {
        match body.get(self.field) {
            Some(v) if !v.is_null() => None,
            _ => Some(format!("Missing required parameter: {}", self.field)),
        }
    }
}

/// Rejects values that could traverse out of the storage root. Only applies
/// when the field is present and a string; presence is the
/// [`RequiredFieldValidator`]'s job.
pub struct PathSecurityValidator {
    field: &'static str,
}

impl PathSecurityValidator {
    pub fn new(field: &'static str) -> Self {
        Self { field }
    }
}

impl Validator for PathSecurityValidator {
    fn validate(&self, body: &Value) -> Option<String> {
        let value = body.get(self.field)?.as_str()?;
        if validate_segment(value).is_err() {
            return Some(format!(
                "Invalid value for parameter {}: path traversal is not allowed",
                self.field
            ));
        }
        None
    }
}

/// Runs validators in order; the first error wins.
pub struct ValidatorComposite {
    validators: Vec<Box<dyn Validator>>,
}

impl ValidatorComposite {
    pub fn new(validators: Vec<Box<dyn Validator>>) -> Self {
        Self { validators }
    }

    /// A composite requiring the given fields and applying path security to
    /// each of them. This is the shape every context tool uses.
    pub fn for_fields(fields: &'static [&'static str]) -> Self {
        let mut validators: Vec<Box<dyn Validator>> = Vec::new();
        for field in fields {
            validators.push(Box::new(RequiredFieldValidator::new(field)));
            validators.push(Box::new(PathSecurityValidator::new(field)));
        }
        Self::new(validators)
    }
}

impl Validator for ValidatorComposite {
    fn validate(&self, body: &Value) -> Option<String> {
        self.validators.iter().find_map(|v| v.validate(body))
    }
}
