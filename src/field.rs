use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    #[default]
    Text,
    Number,
    Email,
    Password,
    Select,
}

impl FieldType {
    pub const ALL: [FieldType; 5] = [
        FieldType::Text,
        FieldType::Number,
        FieldType::Email,
        FieldType::Password,
        FieldType::Select,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Number => "number",
            Self::Email => "email",
            Self::Password => "password",
            Self::Select => "select",
        }
    }

    pub fn is_select(&self) -> bool {
        matches!(self, Self::Select)
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown field type '{0}'")]
pub struct UnknownFieldType(pub String);

impl FromStr for FieldType {
    type Err = UnknownFieldType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        FieldType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnknownFieldType(wanted.to_string()))
    }
}

/// A committed form field. Only its position in the list changes after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDefinition {
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    pub is_required: bool,
    /// Empty unless `field_type` is `Select`.
    #[serde(default)]
    pub options: Vec<String>,
}

impl FieldDefinition {
    pub fn new(field_type: FieldType, label: impl Into<String>) -> Self {
        Self {
            field_type,
            label: label.into(),
            is_required: false,
            options: Vec::new(),
        }
    }

    pub fn required(mut self, is_required: bool) -> Self {
        self.is_required = is_required;
        self
    }

    /// Options are dropped for anything but select fields.
    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if self.field_type.is_select() {
            self.options = options.into_iter().map(Into::into).collect();
        }
        self
    }
}

/// The field being assembled before it is committed to the list.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Draft {
    #[serde(rename = "type")]
    pub field_type: FieldType,
    pub label: String,
    pub is_required: bool,
    pub options: Vec<String>,
    pub pending_option: String,
}

impl Draft {
    pub fn has_blank_label(&self) -> bool {
        self.label.trim().is_empty()
    }

    pub(crate) fn to_definition(&self) -> FieldDefinition {
        let options = if self.field_type.is_select() {
            self.options.clone()
        } else {
            Vec::new()
        };
        FieldDefinition {
            field_type: self.field_type,
            label: self.label.clone(),
            is_required: self.is_required,
            options,
        }
    }
}
