#![forbid(unsafe_code)]
// Allow pedantic lints for early-stage API ergonomics.
#![allow(clippy::nursery)]
#![allow(clippy::pedantic)]

//! # Dynaform
//!
//! A library for forms whose field set is decided at runtime.
//!
//! Dynaform provides:
//! - A static catalog mapping a form type to an ordered list of field
//!   descriptors (text, number, password, select)
//! - Per-field validation with a specialized card-expiry date rule
//! - Required-field completion tracking
//! - An in-memory, insertion-ordered store of submitted records with
//!   edit and delete semantics
//!
//! ## Example
//!
//! ```rust
//! use dynaform::{FormSession, FormType};
//!
//! let mut session = FormSession::new(FormType::UserInfo);
//!
//! session.set_value("first_name", "Ada");
//! session.set_value("last_name", "Lovelace");
//! assert_eq!(session.progress().round() as u32, 100);
//!
//! assert!(session.submit());
//! assert_eq!(session.submissions().len(), 1);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use chrono::Datelike;
use serde::Serialize;
use thiserror::Error;

// -----------------------------------------------------------------------------
// Form Types
// -----------------------------------------------------------------------------

/// The closed set of form types the catalog knows about.
///
/// Each variant selects one field set. Switching the active type in a
/// [`FormSession`] discards the working values and errors but never touches
/// previously submitted records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FormType {
    /// Personal information (name, age).
    #[default]
    UserInfo,
    /// Postal address.
    Address,
    /// Payment details (card number, expiry, CVV).
    Payment,
}

impl FormType {
    /// Stable identifier, used on the CLI and in reports.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::UserInfo => "user-info",
            Self::Address => "address",
            Self::Payment => "payment",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::UserInfo => "User Information",
            Self::Address => "Address Information",
            Self::Payment => "Payment Information",
        }
    }

    /// All form types, in catalog order.
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::UserInfo, Self::Address, Self::Payment]
    }
}

impl fmt::Display for FormType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown form-type identifier.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown form type: {0:?}")]
pub struct ParseFormTypeError(String);

impl FromStr for FormType {
    type Err = ParseFormTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user-info" => Ok(Self::UserInfo),
            "address" => Ok(Self::Address),
            "payment" => Ok(Self::Payment),
            other => Err(ParseFormTypeError(other.to_string())),
        }
    }
}

// -----------------------------------------------------------------------------
// Field Catalog
// -----------------------------------------------------------------------------

/// How a field's input is represented and gated.
///
/// Select choices live on the variant itself, so a descriptor can never
/// claim to be a selection without carrying its options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    /// Free-form text.
    Text,
    /// Digits only.
    Number,
    /// Text echoed as mask characters.
    Password,
    /// One value from a fixed list of choices.
    Select(&'static [&'static str]),
}

impl FieldKind {
    /// Whether input for this kind is restricted to digits.
    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Number)
    }

    /// The enumeration for select fields, `None` otherwise.
    #[must_use]
    pub const fn choices(self) -> Option<&'static [&'static str]> {
        match self {
            Self::Select(choices) => Some(choices),
            _ => None,
        }
    }
}

/// Static metadata describing one input of a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldDescriptor {
    /// Identifier, unique within one field set.
    pub name: &'static str,
    /// Input representation.
    pub kind: FieldKind,
    /// Display label.
    pub label: &'static str,
    /// Whether a non-empty value is needed for submission.
    pub required: bool,
}

/// Name of the one field the expiry-date rule and normalizer apply to.
pub const EXPIRY_FIELD: &str = "expiry_date";

const US_STATES: &[&str] = &["California", "Texas", "New York"];

const USER_INFO_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor {
        name: "first_name",
        kind: FieldKind::Text,
        label: "First Name",
        required: true,
    },
    FieldDescriptor {
        name: "last_name",
        kind: FieldKind::Text,
        label: "Last Name",
        required: true,
    },
    FieldDescriptor {
        name: "age",
        kind: FieldKind::Number,
        label: "Age",
        required: false,
    },
];

const ADDRESS_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor {
        name: "street",
        kind: FieldKind::Text,
        label: "Street",
        required: true,
    },
    FieldDescriptor {
        name: "city",
        kind: FieldKind::Text,
        label: "City",
        required: true,
    },
    FieldDescriptor {
        name: "state",
        kind: FieldKind::Select(US_STATES),
        label: "State",
        required: true,
    },
    FieldDescriptor {
        name: "zip_code",
        kind: FieldKind::Text,
        label: "Zip Code",
        required: false,
    },
];

const PAYMENT_FIELDS: &[FieldDescriptor] = &[
    FieldDescriptor {
        name: "card_number",
        kind: FieldKind::Text,
        label: "Card Number",
        required: true,
    },
    FieldDescriptor {
        name: EXPIRY_FIELD,
        kind: FieldKind::Text,
        label: "Expiry Date",
        required: true,
    },
    FieldDescriptor {
        name: "cvv",
        kind: FieldKind::Password,
        label: "CVV",
        required: true,
    },
    FieldDescriptor {
        name: "cardholder_name",
        kind: FieldKind::Text,
        label: "Cardholder Name",
        required: true,
    },
];

/// Looks up the ordered field set for a form type.
///
/// Total over the closed enum: every type has a non-empty, order-stable
/// field list.
#[must_use]
pub const fn fields_for(form_type: FormType) -> &'static [FieldDescriptor] {
    match form_type {
        FormType::UserInfo => USER_INFO_FIELDS,
        FormType::Address => ADDRESS_FIELDS,
        FormType::Payment => PAYMENT_FIELDS,
    }
}

/// Source of field sets for a session.
///
/// The session only talks to this trait, so a source that resolves field
/// sets elsewhere (say, over a network before the session starts) slots in
/// without touching the orchestration. The built-in [`Catalog`] answers
/// from static data on the same call stack.
pub trait FieldSource {
    /// Returns the ordered field set for `form_type`.
    fn fetch_fields(&self, form_type: FormType) -> &'static [FieldDescriptor];
}

/// The static, process-wide field catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct Catalog;

impl FieldSource for Catalog {
    fn fetch_fields(&self, form_type: FormType) -> &'static [FieldDescriptor] {
        fields_for(form_type)
    }
}

// -----------------------------------------------------------------------------
// Validation
// -----------------------------------------------------------------------------

/// Message for an empty required field.
pub const REQUIRED_MESSAGE: &str = "This field is required";

/// Message for a malformed or out-of-range expiry date.
pub const EXPIRY_MESSAGE: &str = "Please enter a valid date (MM/DD/YYYY)";

fn current_year() -> i32 {
    chrono::Local::now().year()
}

/// Validates one field's candidate value.
///
/// Returns the error message on failure, `None` when valid. Rule
/// precedence: the required/empty check first, then the expiry-date rule
/// for the field named [`EXPIRY_FIELD`], otherwise valid. The year bound
/// of the expiry rule is the current local calendar year.
#[must_use]
pub fn validate_field(field: &FieldDescriptor, value: &str) -> Option<String> {
    validate_field_in_year(field, value, current_year())
}

/// [`validate_field`] with the expiry year bound pinned, for testability.
#[must_use]
pub fn validate_field_in_year(field: &FieldDescriptor, value: &str, year: i32) -> Option<String> {
    if field.required && value.is_empty() {
        return Some(REQUIRED_MESSAGE.to_string());
    }
    if field.name == EXPIRY_FIELD && !value.is_empty() {
        return validate_expiry_in_year(value, year);
    }
    None
}

/// Applies the expiry-date rule against a given current year.
///
/// The value must be exactly `MM/DD/YYYY`: two digits, `/`, two digits,
/// `/`, four digits, with month in 1..=12, day in 1..=31, and year at
/// least `current_year`. Days up to 31 are accepted for every month; there
/// is no month-length or leap-year cross-check.
#[must_use]
pub fn validate_expiry_in_year(value: &str, current_year: i32) -> Option<String> {
    let mut parts = value.split('/');
    let (Some(month), Some(day), Some(year), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Some(EXPIRY_MESSAGE.to_string());
    };

    if month.len() != 2 || day.len() != 2 || year.len() != 4 {
        return Some(EXPIRY_MESSAGE.to_string());
    }

    let (Ok(month), Ok(day), Ok(year)) = (
        month.parse::<u32>(),
        day.parse::<u32>(),
        year.parse::<i32>(),
    ) else {
        return Some(EXPIRY_MESSAGE.to_string());
    };

    let in_range = (1..=12).contains(&month) && (1..=31).contains(&day) && year >= current_year;
    if in_range {
        None
    } else {
        Some(EXPIRY_MESSAGE.to_string())
    }
}

/// Normalizes raw input destined for the expiry-date field.
///
/// Strips every character that is not a digit or `/`, auto-inserts the
/// separator once the month segment is complete (only when the raw input
/// did not already contain one), and truncates to the `MM/DD/YYYY` width.
/// Applied before the value is stored or validated; idempotent.
#[must_use]
pub fn normalize_expiry(raw: &str) -> String {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '/')
        .collect();

    let mut value = if cleaned.len() == 2 && !raw.contains('/') {
        format!("{cleaned}/")
    } else {
        cleaned
    };
    value.truncate(10);
    value
}

// -----------------------------------------------------------------------------
// Progress
// -----------------------------------------------------------------------------

/// Percentage of required fields holding a non-empty value, in [0, 100].
///
/// A field set without required fields is always 100% complete. The result
/// is a real number; callers round for display.
#[must_use]
pub fn completion(fields: &[FieldDescriptor], values: &HashMap<String, String>) -> f64 {
    let total_required = fields.iter().filter(|f| f.required).count();
    if total_required == 0 {
        return 100.0;
    }

    let filled_required = fields
        .iter()
        .filter(|f| f.required && values.get(f.name).is_some_and(|v| !v.is_empty()))
        .count();
    100.0 * filled_required as f64 / total_required as f64
}

// -----------------------------------------------------------------------------
// Submission Store
// -----------------------------------------------------------------------------

/// An immutable snapshot of a completed form.
///
/// Captured at submit time together with the form type it was filled in
/// under, so the record can be displayed with the labels of its own field
/// set even after the session switches to another type.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubmissionRecord {
    form_type: FormType,
    values: HashMap<String, String>,
}

impl SubmissionRecord {
    /// The form type this record was captured under.
    #[must_use]
    pub const fn form_type(&self) -> FormType {
        self.form_type
    }

    /// The snapshotted values, keyed by field name.
    #[must_use]
    pub const fn values(&self) -> &HashMap<String, String> {
        &self.values
    }

    /// Looks up one value by field name.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}

/// Insertion-ordered collection of submitted records.
///
/// Records are addressed by position for edit and delete. A stale position
/// (the list may have shifted under the user) is a no-op, never an error.
#[derive(Debug, Clone, Default)]
pub struct SubmissionStore {
    records: Vec<SubmissionRecord>,
}

impl SubmissionStore {
    /// Creates an empty store.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Appends a record.
    pub fn push(&mut self, record: SubmissionRecord) {
        self.records.push(record);
    }

    /// Removes and returns the record at `index`.
    ///
    /// Returns `None` without touching the collection when `index` is out
    /// of bounds. Deletion discards the result; edit keeps it.
    pub fn remove(&mut self, index: usize) -> Option<SubmissionRecord> {
        if index < self.records.len() {
            Some(self.records.remove(index))
        } else {
            None
        }
    }

    /// All records, oldest first.
    #[must_use]
    pub fn records(&self) -> &[SubmissionRecord] {
        &self.records
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

// -----------------------------------------------------------------------------
// Form Session
// -----------------------------------------------------------------------------

/// Owns all mutable form state for one session.
///
/// The session sequences every user-visible operation: switching the form
/// type, editing a field, submitting, and editing or deleting past
/// submissions. Each operation is an instantaneous local computation; no
/// operation suspends or can be observed mid-update.
///
/// Invariant: the error map has a key for a field only while that field
/// currently fails validation, and submission is blocked while the map is
/// non-empty.
#[derive(Debug, Clone)]
pub struct FormSession<S: FieldSource = Catalog> {
    source: S,
    form_type: FormType,
    fields: &'static [FieldDescriptor],
    values: HashMap<String, String>,
    errors: HashMap<String, String>,
    progress: f64,
    just_submitted: bool,
    store: SubmissionStore,
}

impl FormSession<Catalog> {
    /// Creates a session over the static catalog.
    #[must_use]
    pub fn new(form_type: FormType) -> Self {
        Self::with_source(Catalog, form_type)
    }
}

impl<S: FieldSource> FormSession<S> {
    /// Creates a session over a custom field source.
    pub fn with_source(source: S, form_type: FormType) -> Self {
        let fields = source.fetch_fields(form_type);
        Self {
            source,
            form_type,
            fields,
            values: HashMap::new(),
            errors: HashMap::new(),
            progress: 0.0,
            just_submitted: false,
            store: SubmissionStore::new(),
        }
    }

    /// The active form type.
    #[must_use]
    pub const fn form_type(&self) -> FormType {
        self.form_type
    }

    /// The active field set, in render order.
    #[must_use]
    pub const fn fields(&self) -> &'static [FieldDescriptor] {
        self.fields
    }

    /// Current value of a field; absent means empty.
    #[must_use]
    pub fn value(&self, name: &str) -> &str {
        self.values.get(name).map_or("", String::as_str)
    }

    /// Current validation message for a field, if it is failing.
    #[must_use]
    pub fn error(&self, name: &str) -> Option<&str> {
        self.errors.get(name).map(String::as_str)
    }

    /// Whether any field currently fails validation.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Required-field completion percentage, in [0, 100].
    #[must_use]
    pub const fn progress(&self) -> f64 {
        self.progress
    }

    /// Whether the most recent action was a successful submission.
    #[must_use]
    pub const fn just_submitted(&self) -> bool {
        self.just_submitted
    }

    /// Submitted records, oldest first.
    #[must_use]
    pub fn submissions(&self) -> &[SubmissionRecord] {
        self.store.records()
    }

    /// Switches the active form type.
    ///
    /// Discards working values and errors, resets progress, and clears the
    /// just-submitted flag. Submitted records are untouched. Re-selecting
    /// the already-active type is a no-op.
    pub fn set_form_type(&mut self, form_type: FormType) {
        if form_type == self.form_type {
            return;
        }
        tracing::info!(from = %self.form_type, to = %form_type, "switching form type");

        self.form_type = form_type;
        self.fields = self.source.fetch_fields(form_type);
        self.values.clear();
        self.errors.clear();
        self.progress = 0.0;
        self.just_submitted = false;
    }

    /// Stores a field value and re-validates that field only.
    ///
    /// Expiry input is normalized before being stored. The field's error
    /// key is inserted or removed according to the validation result, and
    /// progress is recomputed over the full field set. Unknown names are
    /// ignored.
    pub fn set_value(&mut self, name: &str, raw: &str) {
        let Some(field) = self.fields.iter().find(|f| f.name == name) else {
            tracing::debug!(name, "ignoring value for unknown field");
            return;
        };

        let value = if field.name == EXPIRY_FIELD {
            normalize_expiry(raw)
        } else {
            raw.to_string()
        };

        match validate_field(field, &value) {
            Some(message) => {
                self.errors.insert(field.name.to_string(), message);
            }
            None => {
                self.errors.remove(field.name);
            }
        }

        self.values.insert(field.name.to_string(), value);
        self.progress = completion(self.fields, &self.values);
    }

    /// Attempts to submit the working form.
    ///
    /// Every required field is re-checked; if any is empty, all of them
    /// are marked with the required-field error and nothing is appended.
    /// An outstanding validation error also blocks submission. On success
    /// a snapshot is appended to the submission list and the
    /// just-submitted flag is set. Returns whether a record was appended.
    pub fn submit(&mut self) -> bool {
        let mut missing = false;
        for field in self.fields {
            if field.required && self.value(field.name).is_empty() {
                self.errors
                    .insert(field.name.to_string(), REQUIRED_MESSAGE.to_string());
                missing = true;
            }
        }
        if missing || !self.errors.is_empty() {
            tracing::debug!(form_type = %self.form_type, "submission blocked by validation");
            return false;
        }

        self.store.push(SubmissionRecord {
            form_type: self.form_type,
            values: self.values.clone(),
        });
        self.just_submitted = true;
        tracing::info!(form_type = %self.form_type, total = self.store.len(), "form submitted");
        true
    }

    /// Pulls a submitted record back into the working form.
    ///
    /// The record is removed from the submission list and its values are
    /// loaded verbatim; validation and progress are not recomputed until
    /// the next value change or submit attempt. The active form type is
    /// not switched. Out-of-bounds positions are a no-op.
    pub fn edit_record(&mut self, index: usize) {
        if let Some(record) = self.store.remove(index) {
            tracing::debug!(index, form_type = %record.form_type(), "editing submitted record");
            self.values = record.values;
        }
    }

    /// Deletes a submitted record. Out-of-bounds positions are a no-op.
    pub fn delete_record(&mut self, index: usize) {
        if self.store.remove(index).is_some() {
            tracing::debug!(index, remaining = self.store.len(), "deleted submitted record");
        }
    }
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------
