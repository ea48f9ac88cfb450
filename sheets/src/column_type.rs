use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

/// Closed set of column types. Cell values are always stored as text;
/// the type only selects how the client edits and serialises them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ColumnType {
    #[default]
    Text,
    TextMultiLine,
    TextUrl,
    TextSelect,
    TextMultiSelect,
    Date,
    DateTime,
    Number,
    Boolean,
}

impl ColumnType {
    pub const ALL: [ColumnType; 9] = [
        ColumnType::Text,
        ColumnType::TextMultiLine,
        ColumnType::TextUrl,
        ColumnType::TextSelect,
        ColumnType::TextMultiSelect,
        ColumnType::Date,
        ColumnType::DateTime,
        ColumnType::Number,
        ColumnType::Boolean,
    ];

    /// Canonical tag as stored and accepted on the wire.
    pub fn as_str(self) -> &'static str {
        match self {
            ColumnType::Text => "text",
            ColumnType::TextMultiLine => "text-multi-line",
            ColumnType::TextUrl => "text-url",
            ColumnType::TextSelect => "text-select",
            ColumnType::TextMultiSelect => "text-multi-select",
            ColumnType::Date => "date",
            ColumnType::DateTime => "date-time",
            ColumnType::Number => "number",
            ColumnType::Boolean => "boolean",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ColumnType::Text => "Text",
            ColumnType::TextMultiLine => "Multi-line text",
            ColumnType::TextUrl => "URL",
            ColumnType::TextSelect => "Select",
            ColumnType::TextMultiSelect => "Multi-select",
            ColumnType::Date => "Date",
            ColumnType::DateTime => "Date & time",
            ColumnType::Number => "Number",
            ColumnType::Boolean => "Checkbox",
        }
    }

    /// Select types are the only ones whose `options` mean anything.
    pub fn has_options(self) -> bool {
        matches!(self, ColumnType::TextSelect | ColumnType::TextMultiSelect)
    }

    /// Lenient lookup for values read back from the API: unknown tags edit as text.
    pub fn from_tag(tag: &str) -> Self {
        tag.parse().unwrap_or_default()
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown column type: {0:?}")]
pub struct UnknownColumnType(pub String);

impl FromStr for ColumnType {
    type Err = UnknownColumnType;

    /// Case-insensitive: the table detail read path returns upper-cased tags.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        ColumnType::ALL
            .into_iter()
            .find(|t| t.as_str() == lower)
            .ok_or_else(|| UnknownColumnType(s.to_string()))
    }
}

impl Serialize for ColumnType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ColumnType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        tag.parse().map_err(de::Error::custom)
    }
}
