//! Reactive form state with per-field validation rules.
//!
//! A `Form` owns a set of registered `Field`s. Each field keeps its value and
//! its current error message in signals so inputs and inline messages update
//! reactively. Validation runs on submit; after the first submit a field
//! re-validates on every change.

use leptos::prelude::*;

/// Predicate used by [`Rule::Pattern`].
pub type Matcher = fn(&str) -> bool;

/// A single validation rule attached to a field.
#[derive(Debug, Clone, Copy)]
pub enum Rule {
    /// The value must not be empty.
    Required { message: &'static str },
    /// The value must satisfy `matcher`.
    Pattern {
        matcher: Matcher,
        message: &'static str,
    },
    /// The value must be at least `min` characters long.
    MinLength { min: usize, message: &'static str },
}

impl Rule {
    #[must_use]
    pub fn required(message: &'static str) -> Self {
        Self::Required { message }
    }

    #[must_use]
    pub fn pattern(matcher: Matcher, message: &'static str) -> Self {
        Self::Pattern { matcher, message }
    }

    #[must_use]
    pub fn min_length(min: usize, message: &'static str) -> Self {
        Self::MinLength { min, message }
    }

    /// Checks `value` against this rule.
    ///
    /// Pattern and length rules pass on an empty value; emptiness is the
    /// business of `Required`.
    pub fn check(&self, value: &str) -> Result<(), &'static str> {
        match *self {
            Self::Required { message } => {
                if value.is_empty() {
                    return Err(message);
                }
            }
            Self::Pattern { matcher, message } => {
                if !value.is_empty() && !matcher(value) {
                    return Err(message);
                }
            }
            Self::MinLength { min, message } => {
                if !value.is_empty() && value.chars().count() < min {
                    return Err(message);
                }
            }
        }
        Ok(())
    }
}

/// Runs `rules` in order and returns the first failure.
pub fn validate(value: &str, rules: &[Rule]) -> Result<(), &'static str> {
    rules.iter().try_for_each(|rule| rule.check(value))
}

/// Matches `local@domain.tld`, ignoring ASCII case.
///
/// The local part allows letters, digits and `._%+-`; the domain allows
/// letters, digits, `.` and `-`; the final label is two or more letters.
#[must_use]
pub fn is_email(value: &str) -> bool {
    let Some((local, domain)) = value.split_once('@') else {
        return false;
    };
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };

    let local_ok = !local.is_empty()
        && local
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "._%+-".contains(c));
    let domain_ok = domain
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-');

    local_ok
        && domain_ok
        && !host.is_empty()
        && tld.len() >= 2
        && tld.chars().all(|c| c.is_ascii_alphabetic())
}

/// A registered form field.
#[derive(Clone, Copy)]
pub struct Field {
    name: &'static str,
    value: RwSignal<String>,
    error: RwSignal<Option<&'static str>>,
    rules: StoredValue<Vec<Rule>>,
    submitted: RwSignal<bool>,
}

impl Field {
    /// Returns the field name, used as the input's `name` and `id`.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Current value (tracked).
    #[must_use]
    pub fn value(&self) -> String {
        self.value.get()
    }

    /// Current value without subscribing the caller.
    #[must_use]
    pub fn value_untracked(&self) -> String {
        self.value.get_untracked()
    }

    /// Current error message (tracked).
    #[must_use]
    pub fn error(&self) -> Option<&'static str> {
        self.error.get()
    }

    /// Updates the value, re-validating once the form has been submitted.
    pub fn set(&self, value: String) {
        self.value.set(value);
        if self.submitted.get_untracked() {
            self.validate();
        }
    }

    /// Validates the current value and records the outcome.
    pub fn validate(&self) -> bool {
        let outcome = self
            .rules
            .with_value(|rules| self.value.with_untracked(|value| validate(value, rules)));
        self.error.set(outcome.err());
        outcome.is_ok()
    }
}

/// A form made of registered fields.
#[derive(Clone, Copy)]
pub struct Form {
    fields: StoredValue<Vec<Field>>,
    submitted: RwSignal<bool>,
}

impl Default for Form {
    fn default() -> Self {
        Self::new()
    }
}

impl Form {
    #[must_use]
    pub fn new() -> Self {
        Self {
            fields: StoredValue::new(Vec::new()),
            submitted: RwSignal::new(false),
        }
    }

    /// Registers a field with a default value and its rules.
    pub fn register(
        &self,
        name: &'static str,
        default: impl Into<String>,
        rules: Vec<Rule>,
    ) -> Field {
        let field = Field {
            name,
            value: RwSignal::new(default.into()),
            error: RwSignal::new(None),
            rules: StoredValue::new(rules),
            submitted: self.submitted,
        };
        self.fields.update_value(|fields| fields.push(field));
        field
    }

    /// Validates every field, so all messages show at once.
    pub fn validate_all(&self) -> bool {
        self.fields.with_value(|fields| {
            fields
                .iter()
                .fold(true, |all_valid, field| field.validate() && all_valid)
        })
    }

    /// Validates the form and calls `on_valid` only if every field passed.
    ///
    /// Returns whether `on_valid` was called.
    pub fn handle_submit(&self, on_valid: impl FnOnce()) -> bool {
        self.submitted.set(true);
        if !self.validate_all() {
            return false;
        }
        on_valid();
        true
    }
}
