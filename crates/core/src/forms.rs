//! Per-field form validation and input sanitization.
//!
//! One shared rule table drives validation for all three forms (issue
//! editor, login, registration) instead of per-form rewrites. Two layers of
//! input policy apply:
//!
//! 1. [`sanitize`] silently drops characters outside a field's allowed
//!    character class before the value is stored.
//! 2. [`validate_field`] checks the stored value against the field's rules
//!    and returns a human-readable message, or `None` when valid.
//!
//! [`FormState`] models the touched-state flow: inline errors only appear
//! for fields the user has blurred, and submission forces every field into
//! the touched state and blocks when any rule fails.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::LazyLock;

use regex::Regex;

use crate::issue::{
    DEFAULT_PRIORITY, DEFAULT_SEVERITY, DEFAULT_STATUS, DESCRIPTION_MAX_CHARS,
    DESCRIPTION_MIN_CHARS, TITLE_MAX_CHARS, TITLE_MIN_CHARS, VALID_PRIORITIES, VALID_SEVERITIES,
    VALID_STATUSES,
};

/// Minimum username length (characters).
pub const USERNAME_MIN_CHARS: usize = 3;
/// Minimum password length (characters).
pub const PASSWORD_MIN_CHARS: usize = 6;

/// `local@domain.tld` shape: no whitespace or extra `@`, dot in the domain.
static EMAIL_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex is valid"));

// ---------------------------------------------------------------------------
// Character classes
// ---------------------------------------------------------------------------

/// Allowed character set for a free-text input.
///
/// Characters outside the class are dropped at entry time, before the value
/// is stored or validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    /// Letters, digits, whitespace, and `. , ! ? ( ) -`.
    Title,
    /// Same as [`CharClass::Title`] plus `_`.
    Description,
    /// Letters, digits, `_`, and `@`.
    Username,
    /// Letters, digits, and `@ . - _`.
    Email,
    /// Letters, digits, and `! @ # $ % ^ & *`.
    Password,
}

impl CharClass {
    /// Whether `c` belongs to this character class.
    pub fn allows(self, c: char) -> bool {
        match self {
            CharClass::Title => c.is_ascii_alphanumeric() || c.is_whitespace() || ".,!?()-".contains(c),
            CharClass::Description => {
                c.is_ascii_alphanumeric() || c.is_whitespace() || ".,!?()_-".contains(c)
            }
            CharClass::Username => c.is_ascii_alphanumeric() || c == '_' || c == '@',
            CharClass::Email => c.is_ascii_alphanumeric() || "@.-_".contains(c),
            CharClass::Password => c.is_ascii_alphanumeric() || "!@#$%^&*".contains(c),
        }
    }
}

/// Drop every character of `input` that is not allowed by `class`.
pub fn sanitize(class: CharClass, input: &str) -> String {
    input.chars().filter(|&c| class.allows(c)).collect()
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// A single validation rule. Each carries the message it produces on failure.
#[derive(Debug, Clone, Copy)]
enum Rule {
    /// Non-empty after trimming.
    Required(&'static str),
    /// At least this many characters.
    MinChars(usize, &'static str),
    /// At most this many characters.
    MaxChars(usize, &'static str),
    /// Every character belongs to the class.
    Charset(CharClass, &'static str),
    /// Exact membership in a fixed value set.
    OneOf(&'static [&'static str], &'static str),
    /// Matches the `local@domain.tld` shape.
    EmailShape(&'static str),
    /// At least one lowercase letter, one uppercase letter, and one digit.
    Complexity(&'static str),
    /// Equals the sibling password field's current value.
    ConfirmPassword(&'static str),
}

impl Rule {
    fn check(self, value: &str, ctx: &FieldContext) -> Option<&'static str> {
        match self {
            Rule::Required(msg) => value.trim().is_empty().then_some(msg),
            Rule::MinChars(min, msg) => (value.chars().count() < min).then_some(msg),
            Rule::MaxChars(max, msg) => (value.chars().count() > max).then_some(msg),
            Rule::Charset(class, msg) => (!value.chars().all(|c| class.allows(c))).then_some(msg),
            Rule::OneOf(set, msg) => (!set.contains(&value)).then_some(msg),
            Rule::EmailShape(msg) => (!EMAIL_SHAPE.is_match(value)).then_some(msg),
            Rule::Complexity(msg) => {
                let lower = value.chars().any(|c| c.is_ascii_lowercase());
                let upper = value.chars().any(|c| c.is_ascii_uppercase());
                let digit = value.chars().any(|c| c.is_ascii_digit());
                (!(lower && upper && digit)).then_some(msg)
            }
            // Without a sibling password there is nothing to compare against.
            Rule::ConfirmPassword(msg) => match ctx.password {
                Some(password) => (value != password).then_some(msg),
                None => None,
            },
        }
    }
}

const TITLE_RULES: &[Rule] = &[
    Rule::Required("Title is required"),
    Rule::MinChars(TITLE_MIN_CHARS, "Title must be at least 3 characters"),
    Rule::MaxChars(TITLE_MAX_CHARS, "Title must be less than 100 characters"),
];

const DESCRIPTION_RULES: &[Rule] = &[
    Rule::Required("Description is required"),
    Rule::MinChars(DESCRIPTION_MIN_CHARS, "Description must be at least 10 characters"),
    Rule::MaxChars(DESCRIPTION_MAX_CHARS, "Description must be less than 500 characters"),
];

const SEVERITY_RULES: &[Rule] = &[Rule::OneOf(VALID_SEVERITIES, "Please select a valid severity")];

const PRIORITY_RULES: &[Rule] = &[Rule::OneOf(VALID_PRIORITIES, "Please select a valid priority")];

const STATUS_RULES: &[Rule] = &[Rule::OneOf(VALID_STATUSES, "Please select a valid status")];

const USERNAME_RULES: &[Rule] = &[
    Rule::Required("Username is required"),
    Rule::MinChars(USERNAME_MIN_CHARS, "Username must be at least 3 characters"),
];

const USERNAME_REGISTRATION_RULES: &[Rule] = &[
    Rule::Required("Username is required"),
    Rule::MinChars(USERNAME_MIN_CHARS, "Username must be at least 3 characters"),
    Rule::Charset(
        CharClass::Username,
        "Username can only contain letters, numbers, underscores, and @ symbol",
    ),
];

const EMAIL_RULES: &[Rule] = &[
    Rule::Required("Email is required"),
    Rule::EmailShape("Please enter a valid email address"),
];

const PASSWORD_RULES: &[Rule] = &[
    Rule::Required("Password is required"),
    Rule::MinChars(PASSWORD_MIN_CHARS, "Password must be at least 6 characters"),
];

const PASSWORD_REGISTRATION_RULES: &[Rule] = &[
    Rule::Required("Password is required"),
    Rule::MinChars(PASSWORD_MIN_CHARS, "Password must be at least 6 characters"),
    Rule::Complexity(
        "Password must contain at least one uppercase letter, one lowercase letter, and one number",
    ),
];

const CONFIRM_PASSWORD_RULES: &[Rule] = &[
    Rule::Required("Please confirm your password"),
    Rule::ConfirmPassword("Passwords do not match"),
];

// ---------------------------------------------------------------------------
// Field validation
// ---------------------------------------------------------------------------

/// Context required by context-sensitive rules.
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldContext<'a> {
    /// Registration applies the stricter username charset and password
    /// complexity rules.
    pub registration: bool,
    /// Current value of the sibling password field (for `confirmPassword`).
    pub password: Option<&'a str>,
}

/// Look up the rule table for a field. Unknown fields have no rules.
fn rules_for(field: &str, ctx: &FieldContext) -> &'static [Rule] {
    match field {
        "title" => TITLE_RULES,
        "description" => DESCRIPTION_RULES,
        "severity" => SEVERITY_RULES,
        "priority" => PRIORITY_RULES,
        "status" => STATUS_RULES,
        "username" if ctx.registration => USERNAME_REGISTRATION_RULES,
        "username" => USERNAME_RULES,
        "email" => EMAIL_RULES,
        "password" if ctx.registration => PASSWORD_REGISTRATION_RULES,
        "password" => PASSWORD_RULES,
        "confirmPassword" => CONFIRM_PASSWORD_RULES,
        _ => &[],
    }
}

/// Validate one field value. Returns the first failing rule's message, or
/// `None` when the value is acceptable.
pub fn validate_field(field: &str, value: &str, ctx: &FieldContext) -> Option<&'static str> {
    rules_for(field, ctx)
        .iter()
        .find_map(|rule| rule.check(value, ctx))
}

// ---------------------------------------------------------------------------
// Form model
// ---------------------------------------------------------------------------

/// Which form a [`FormState`] models.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    /// Issue create/edit: title, description, severity, priority, status.
    Issue,
    /// Login: username, password.
    Login,
    /// Registration: username, email, password, confirmPassword.
    Registration,
}

impl FormKind {
    /// Field names for this form, in display order.
    pub fn fields(self) -> &'static [&'static str] {
        match self {
            FormKind::Issue => &["title", "description", "severity", "priority", "status"],
            FormKind::Login => &["username", "password"],
            FormKind::Registration => &["username", "email", "password", "confirmPassword"],
        }
    }

    /// Character class applied at entry time, if the field is filtered.
    fn char_class(self, field: &str) -> Option<CharClass> {
        match (self, field) {
            (FormKind::Issue, "title") => Some(CharClass::Title),
            (FormKind::Issue, "description") => Some(CharClass::Description),
            (_, "username") => Some(CharClass::Username),
            (_, "email") => Some(CharClass::Email),
            (_, "password" | "confirmPassword") => Some(CharClass::Password),
            _ => None,
        }
    }

    /// Initial value for a field (enum selects start on their defaults).
    fn initial_value(self, field: &str) -> &'static str {
        match field {
            "severity" => DEFAULT_SEVERITY,
            "priority" => DEFAULT_PRIORITY,
            "status" => DEFAULT_STATUS,
            _ => "",
        }
    }

    fn registration(self) -> bool {
        matches!(self, FormKind::Registration)
    }
}

/// Synchronous form model: values, per-field errors, and the touched set.
///
/// Validation only runs for touched fields (first blur), plus unconditionally
/// at submission time where every field is forced touched and a submission
/// with any failing field is blocked.
#[derive(Debug, Clone)]
pub struct FormState {
    kind: FormKind,
    values: BTreeMap<&'static str, String>,
    errors: BTreeMap<&'static str, &'static str>,
    touched: BTreeSet<&'static str>,
}

impl FormState {
    /// Create a pristine form with default field values.
    pub fn new(kind: FormKind) -> Self {
        let values = kind
            .fields()
            .iter()
            .map(|&f| (f, kind.initial_value(f).to_string()))
            .collect();
        Self {
            kind,
            values,
            errors: BTreeMap::new(),
            touched: BTreeSet::new(),
        }
    }

    /// Pre-populate an edit form from existing field values.
    ///
    /// Unknown field names are ignored.
    pub fn with_values<'a>(kind: FormKind, values: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut form = Self::new(kind);
        for (field, value) in values {
            if let Some(&name) = form.kind.fields().iter().find(|&&f| f == field) {
                form.values.insert(name, value.to_string());
            }
        }
        form
    }

    /// Current (sanitized) value of a field.
    pub fn value(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or("")
    }

    /// Current inline error for a field, if any is displayed.
    pub fn error(&self, field: &str) -> Option<&'static str> {
        self.errors.get(field).copied()
    }

    /// Whether the user has blurred this field.
    pub fn is_touched(&self, field: &str) -> bool {
        self.touched.contains(field)
    }

    /// Handle a change event: sanitize the raw input, store it, and
    /// revalidate if the field is already touched.
    ///
    /// Editing the password also revalidates a touched `confirmPassword`,
    /// so a stale match error clears as the user types.
    pub fn input(&mut self, field: &str, raw: &str) {
        let Some(&name) = self.kind.fields().iter().find(|&&f| f == field) else {
            return;
        };

        let value = match self.kind.char_class(name) {
            Some(class) => sanitize(class, raw),
            None => raw.to_string(),
        };
        self.values.insert(name, value);

        if self.touched.contains(name) {
            self.revalidate(name);
        }
        if name == "password" && self.touched.contains("confirmPassword") {
            self.revalidate("confirmPassword");
        }
    }

    /// Handle a blur event: mark the field touched and validate it.
    pub fn blur(&mut self, field: &str) {
        let Some(&name) = self.kind.fields().iter().find(|&&f| f == field) else {
            return;
        };
        self.touched.insert(name);
        self.revalidate(name);
    }

    /// Attempt submission.
    ///
    /// Forces every field into the touched state and validates all of them.
    /// Returns the sanitized field values ready for the network call, or the
    /// field -> message map when the submission is blocked.
    pub fn submit(&mut self) -> Result<BTreeMap<&'static str, String>, BTreeMap<&'static str, &'static str>> {
        for &field in self.kind.fields() {
            self.touched.insert(field);
            self.revalidate(field);
        }
        if self.errors.is_empty() {
            Ok(self.values.clone())
        } else {
            Err(self.errors.clone())
        }
    }

    fn revalidate(&mut self, field: &'static str) {
        let password = self.values.get("password").cloned();
        let ctx = FieldContext {
            registration: self.kind.registration(),
            password: password.as_deref(),
        };
        match validate_field(field, self.value(field), &ctx) {
            Some(msg) => {
                self.errors.insert(field, msg);
            }
            None => {
                self.errors.remove(field);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> FieldContext<'static> {
        FieldContext::default()
    }

    fn registration_ctx() -> FieldContext<'static> {
        FieldContext {
            registration: true,
            password: None,
        }
    }

    // -- validate_field ------------------------------------------------------

    #[test]
    fn short_title_message() {
        assert_eq!(
            validate_field("title", "ab", &ctx()),
            Some("Title must be at least 3 characters")
        );
    }

    #[test]
    fn valid_title_passes() {
        assert_eq!(validate_field("title", "Valid title", &ctx()), None);
    }

    #[test]
    fn long_title_rejected() {
        let long = "t".repeat(101);
        assert_eq!(
            validate_field("title", &long, &ctx()),
            Some("Title must be less than 100 characters")
        );
    }

    #[test]
    fn blank_description_is_required() {
        assert_eq!(
            validate_field("description", "  ", &ctx()),
            Some("Description is required")
        );
    }

    #[test]
    fn short_password_message() {
        assert_eq!(
            validate_field("password", "abc", &ctx()),
            Some("Password must be at least 6 characters")
        );
    }

    #[test]
    fn login_password_skips_complexity() {
        // Login applies only the length rule.
        assert_eq!(validate_field("password", "abcdef", &ctx()), None);
    }

    #[test]
    fn registration_password_requires_complexity() {
        assert_eq!(
            validate_field("password", "abcdef", &registration_ctx()),
            Some("Password must contain at least one uppercase letter, one lowercase letter, and one number")
        );
        assert_eq!(validate_field("password", "Abcdef1", &registration_ctx()), None);
    }

    #[test]
    fn registration_username_charset() {
        assert_eq!(
            validate_field("username", "user name", &registration_ctx()),
            Some("Username can only contain letters, numbers, underscores, and @ symbol")
        );
        assert_eq!(validate_field("username", "user_name@1", &registration_ctx()), None);
        // Login accepts the same value without the charset rule.
        assert_eq!(validate_field("username", "user name", &ctx()), None);
    }

    #[test]
    fn email_shape() {
        assert_eq!(validate_field("email", "a@b.co", &ctx()), None);
        assert_eq!(
            validate_field("email", "not-an-email", &ctx()),
            Some("Please enter a valid email address")
        );
        assert_eq!(
            validate_field("email", "missing@tld", &ctx()),
            Some("Please enter a valid email address")
        );
    }

    #[test]
    fn confirm_password_must_match() {
        let ctx = FieldContext {
            registration: true,
            password: Some("Secret1"),
        };
        assert_eq!(
            validate_field("confirmPassword", "Secret2", &ctx),
            Some("Passwords do not match")
        );
        assert_eq!(validate_field("confirmPassword", "Secret1", &ctx), None);
        assert_eq!(
            validate_field("confirmPassword", "", &ctx),
            Some("Please confirm your password")
        );
    }

    #[test]
    fn unknown_field_has_no_rules() {
        assert_eq!(validate_field("nickname", "", &ctx()), None);
    }

    // -- sanitize ------------------------------------------------------------

    #[test]
    fn title_sanitize_drops_disallowed() {
        assert_eq!(
            sanitize(CharClass::Title, "Login <fails> w/ 100% CPU!"),
            "Login fails w 100 CPU!"
        );
    }

    #[test]
    fn description_allows_underscore() {
        assert_eq!(sanitize(CharClass::Description, "env_var=1"), "env_var1");
        assert_eq!(sanitize(CharClass::Title, "env_var=1"), "envvar1");
    }

    #[test]
    fn username_sanitize() {
        assert_eq!(sanitize(CharClass::Username, "user name!"), "username");
        assert_eq!(sanitize(CharClass::Username, "user_1@x"), "user_1@x");
    }

    #[test]
    fn password_keeps_allowed_symbols() {
        assert_eq!(sanitize(CharClass::Password, "P@ss w0rd+"), "P@ssw0rd");
    }

    // -- FormState -----------------------------------------------------------

    #[test]
    fn issue_form_starts_on_defaults() {
        let form = FormState::new(FormKind::Issue);
        assert_eq!(form.value("severity"), "Medium");
        assert_eq!(form.value("priority"), "Normal");
        assert_eq!(form.value("status"), "Open");
        assert_eq!(form.value("title"), "");
    }

    #[test]
    fn input_before_blur_shows_no_error() {
        let mut form = FormState::new(FormKind::Issue);
        form.input("title", "ab");
        assert_eq!(form.error("title"), None, "untouched fields stay quiet");
    }

    #[test]
    fn blur_surfaces_error_and_input_updates_it() {
        let mut form = FormState::new(FormKind::Issue);
        form.input("title", "ab");
        form.blur("title");
        assert_eq!(form.error("title"), Some("Title must be at least 3 characters"));

        form.input("title", "abc");
        assert_eq!(form.error("title"), None, "touched fields revalidate on change");
    }

    #[test]
    fn input_is_sanitized_before_storage() {
        let mut form = FormState::new(FormKind::Issue);
        form.input("title", "Crash<script>!");
        assert_eq!(form.value("title"), "Crashscript!");
    }

    #[test]
    fn submit_blocks_and_touches_everything() {
        let mut form = FormState::new(FormKind::Issue);
        let errors = form.submit().unwrap_err();
        assert_eq!(errors.get("title"), Some(&"Title is required"));
        assert_eq!(errors.get("description"), Some(&"Description is required"));
        assert!(form.is_touched("title"));
        assert!(form.is_touched("status"));
        // The enum selects default to valid values.
        assert!(!errors.contains_key("severity"));
    }

    #[test]
    fn valid_submit_returns_sanitized_values() {
        let mut form = FormState::new(FormKind::Issue);
        form.input("title", "Login bug#1");
        form.input("description", "cannot login since <yesterday>");
        let values = form.submit().expect("form should be valid");
        assert_eq!(values["title"], "Login bug1");
        assert_eq!(values["description"], "cannot login since yesterday");
        assert_eq!(values["severity"], "Medium");
    }

    #[test]
    fn password_edit_revalidates_touched_confirm() {
        let mut form = FormState::new(FormKind::Registration);
        form.input("password", "Secret1");
        form.input("confirmPassword", "Secret1");
        form.blur("confirmPassword");
        assert_eq!(form.error("confirmPassword"), None);

        form.input("password", "Secret12");
        assert_eq!(form.error("confirmPassword"), Some("Passwords do not match"));

        form.input("confirmPassword", "Secret12");
        assert_eq!(form.error("confirmPassword"), None);
    }

    #[test]
    fn registration_submit_applies_strict_rules() {
        let mut form = FormState::new(FormKind::Registration);
        form.input("username", "ab");
        form.input("email", "user@example.com");
        form.input("password", "abcdef");
        form.input("confirmPassword", "abcdef");
        let errors = form.submit().unwrap_err();
        assert_eq!(errors.get("username"), Some(&"Username must be at least 3 characters"));
        assert_eq!(
            errors.get("password"),
            Some(&"Password must contain at least one uppercase letter, one lowercase letter, and one number")
        );
    }

    #[test]
    fn edit_form_prefills_existing_values() {
        let form = FormState::with_values(
            FormKind::Issue,
            [("title", "Existing"), ("status", "Closed"), ("bogus", "x")],
        );
        assert_eq!(form.value("title"), "Existing");
        assert_eq!(form.value("status"), "Closed");
        assert_eq!(form.value("bogus"), "");
    }
}
