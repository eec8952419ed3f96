use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::collections::BTreeMap;

pub const REQUIRED: &str = "required";

/// Collection best-effort analytics events are written to.
pub const ANALYTICS_COLLECTION: &str = "analytics";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordKind {
    Contact,
    Testimonial,
}

impl RecordKind {
    /// Remote collection (table) the kind is stored in.
    pub fn collection(&self) -> &'static str {
        match self {
            RecordKind::Contact => "contacts",
            RecordKind::Testimonial => "testimonials",
        }
    }

    /// Screen a record of this kind is submitted from.
    pub fn page(&self) -> &'static str {
        match self {
            RecordKind::Contact => "contact",
            RecordKind::Testimonial => "testimonials",
        }
    }

    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            RecordKind::Contact => &["email", "subject", "message"],
            RecordKind::Testimonial => &["name", "message"],
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordKind::Contact => write!(f, "contact"),
            RecordKind::Testimonial => write!(f, "testimonial"),
        }
    }
}

/// Star rating in `[1, 5]`. Defaults to 5, the form's initial value.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    /// Accepts any value so that out-of-range input is caught by validation
    /// rather than lost.
    pub fn new(value: u8) -> Self {
        Self(value)
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    pub fn is_valid(&self) -> bool {
        (Self::MIN..=Self::MAX).contains(&self.0)
    }
}

impl Default for Rating {
    fn default() -> Self {
        Self(Self::MAX)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ContactMessage {
    pub email: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Testimonial {
    pub name: String,
    pub role: String,
    pub company: String,
    pub message: String,
    #[serde(default)]
    pub rating: Rating,
}

/// A user-authored record on its way to the remote store.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmittableRecord {
    Contact(ContactMessage),
    Testimonial(Testimonial),
}

impl SubmittableRecord {
    pub fn kind(&self) -> RecordKind {
        match self {
            SubmittableRecord::Contact(_) => RecordKind::Contact,
            SubmittableRecord::Testimonial(_) => RecordKind::Testimonial,
        }
    }

    /// Text fields by name, in form order.
    pub fn fields(&self) -> Vec<(&'static str, &str)> {
        match self {
            SubmittableRecord::Contact(c) => vec![
                ("email", c.email.as_str()),
                ("subject", c.subject.as_str()),
                ("message", c.message.as_str()),
            ],
            SubmittableRecord::Testimonial(t) => vec![
                ("name", t.name.as_str()),
                ("role", t.role.as_str()),
                ("company", t.company.as_str()),
                ("message", t.message.as_str()),
            ],
        }
    }

    pub fn validate(&self) -> Validation {
        let required = self.kind().required_fields();
        let mut validation = Validation::default();

        for (field, value) in self.fields() {
            if required.contains(&field) && value.trim().is_empty() {
                validation.reject(field, REQUIRED);
            }
        }

        if let SubmittableRecord::Testimonial(t) = self {
            if !t.rating.is_valid() {
                validation.reject(
                    "rating",
                    format!("must be between {} and {}", Rating::MIN, Rating::MAX),
                );
            }
        }

        validation
    }

    /// Row to insert, with surrounding whitespace stripped from every field.
    pub fn to_row(&self) -> Value {
        let mut row = serde_json::Map::new();
        for (field, value) in self.fields() {
            row.insert(field.to_string(), Value::String(value.trim().to_string()));
        }
        if let SubmittableRecord::Testimonial(t) = self {
            row.insert("rating".to_string(), json!(t.rating.value()));
        }
        Value::Object(row)
    }
}

impl From<ContactMessage> for SubmittableRecord {
    fn from(message: ContactMessage) -> Self {
        SubmittableRecord::Contact(message)
    }
}

impl From<Testimonial> for SubmittableRecord {
    fn from(testimonial: Testimonial) -> Self {
        SubmittableRecord::Testimonial(testimonial)
    }
}

/// Field-level validation result. Empty means valid.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct Validation {
    pub field_errors: BTreeMap<String, String>,
}

impl Validation {
    pub fn is_valid(&self) -> bool {
        self.field_errors.is_empty()
    }

    pub fn reject(&mut self, field: &str, message: impl Into<String>) {
        self.field_errors.insert(field.to_string(), message.into());
    }

    pub fn error_for(&self, field: &str) -> Option<&str> {
        self.field_errors.get(field).map(String::as_str)
    }

    pub fn fields(&self) -> Vec<&str> {
        self.field_errors.keys().map(String::as_str).collect()
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct AnalyticsEvent {
    pub event_type: String,
    pub page: String,
    pub user_agent: String,
}

impl AnalyticsEvent {
    pub fn new(event_type: impl Into<String>, page: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            page: page.into(),
            user_agent: concat!("portfolio-core/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Row identifier as handed back by the store: serial or uuid.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum RecordId {
    Serial(i64),
    Text(String),
}

/// A testimonial read back from the store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoredTestimonial {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    pub message: String,
    #[serde(default)]
    pub rating: Rating,
    pub created_at: DateTime<Utc>,
}
