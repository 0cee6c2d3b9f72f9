use serde::{Deserialize, Serialize};

/// A structured field collected through its own prompt, in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldName {
    Description,
    Location,
    ContactName,
}

impl FieldName {
    pub const ORDER: [FieldName; 3] = [
        FieldName::Description,
        FieldName::Location,
        FieldName::ContactName,
    ];

    pub fn first() -> Self {
        Self::ORDER[0]
    }

    /// The field after this one, or `None` once the structured path is exhausted.
    pub fn next(self) -> Option<Self> {
        let idx = Self::ORDER.iter().position(|f| *f == self)?;
        Self::ORDER.get(idx + 1).copied()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FieldName::Description => "description",
            FieldName::Location => "location",
            FieldName::ContactName => "contactName",
        }
    }

    /// Minimum trimmed length (in chars) accepted by `validate`.
    pub fn min_len(self) -> usize {
        match self {
            FieldName::Description => 10,
            FieldName::Location => 3,
            FieldName::ContactName => 2,
        }
    }

    /// Prefix of the user turn, e.g. `Location: Elm street`.
    pub fn turn_label(self) -> &'static str {
        match self {
            FieldName::Description => "Brief explanation",
            FieldName::Location => "Location",
            FieldName::ContactName => "Name",
        }
    }

    pub fn prompt_title(self) -> &'static str {
        match self {
            FieldName::Description => "Describe the issue",
            FieldName::Location => "Where is it?",
            FieldName::ContactName => "Your name",
        }
    }

    pub fn placeholder(self) -> &'static str {
        match self {
            FieldName::Description => {
                "e.g., There is a large pothole causing damage to vehicles..."
            }
            FieldName::Location => "e.g., 123 Main Street or Downtown Area",
            FieldName::ContactName => "e.g., John Smith",
        }
    }

    pub fn submit_label(self) -> &'static str {
        match self {
            FieldName::Description => "Continue to Location",
            FieldName::Location => "Continue to Your Name",
            FieldName::ContactName => "Submit Complaint",
        }
    }
}

impl std::fmt::Display for FieldName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Local gate in front of a field submission. A rejected value is never sent.
pub fn validate(field: FieldName, raw: &str) -> bool {
    raw.trim().chars().count() >= field.min_len()
}

/// A slot in [`ComplaintDraft`]. The three structured fields plus the
/// optional contact details that have no prompt of their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DraftField {
    Description,
    Location,
    ContactName,
    ContactEmail,
    ContactPhone,
}

impl DraftField {
    pub fn label(self) -> &'static str {
        match self {
            DraftField::ContactEmail => "Email",
            DraftField::ContactPhone => "Phone",
            DraftField::Description => FieldName::Description.turn_label(),
            DraftField::Location => FieldName::Location.turn_label(),
            DraftField::ContactName => FieldName::ContactName.turn_label(),
        }
    }
}

impl From<FieldName> for DraftField {
    fn from(field: FieldName) -> Self {
        match field {
            FieldName::Description => DraftField::Description,
            FieldName::Location => DraftField::Location,
            FieldName::ContactName => DraftField::ContactName,
        }
    }
}

/// Scratch values typed into the field prompts.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ComplaintDraft {
    pub description: String,
    pub location: String,
    pub contact_name: String,
    pub contact_email: String,
    pub contact_phone: String,
}

impl ComplaintDraft {
    pub fn get(&self, key: impl Into<DraftField>) -> &str {
        match key.into() {
            DraftField::Description => &self.description,
            DraftField::Location => &self.location,
            DraftField::ContactName => &self.contact_name,
            DraftField::ContactEmail => &self.contact_email,
            DraftField::ContactPhone => &self.contact_phone,
        }
    }

    pub fn set(&mut self, key: impl Into<DraftField>, value: impl Into<String>) {
        *self.slot(key.into()) = value.into();
    }

    pub fn clear(&mut self, key: impl Into<DraftField>) {
        self.slot(key.into()).clear();
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    fn slot(&mut self, key: DraftField) -> &mut String {
        match key {
            DraftField::Description => &mut self.description,
            DraftField::Location => &mut self.location,
            DraftField::ContactName => &mut self.contact_name,
            DraftField::ContactEmail => &mut self.contact_email,
            DraftField::ContactPhone => &mut self.contact_phone,
        }
    }
}
