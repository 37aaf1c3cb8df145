use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ValueType {
    String,
    Number,
    Integer,
    BigNumber,
    Date,
    Timestamp,
    Boolean,
    Binary,
}

impl ValueType {
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            ValueType::Number | ValueType::Integer | ValueType::BigNumber
        )
    }
}

impl Display for ValueType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueType::String => write!(f, "String"),
            ValueType::Number => write!(f, "Number"),
            ValueType::Integer => write!(f, "Integer"),
            ValueType::BigNumber => write!(f, "BigNumber"),
            ValueType::Date => write!(f, "Date"),
            ValueType::Timestamp => write!(f, "Timestamp"),
            ValueType::Boolean => write!(f, "Boolean"),
            ValueType::Binary => write!(f, "Binary"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct ValueMeta {
    pub name: String,
    #[serde(rename = "type")]
    pub value_type: ValueType,
}

impl ValueMeta {
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            value_type,
        }
    }
}

/// Ordered field layout of a row stream.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct RowSchema {
    fields: Vec<ValueMeta>,
}

impl RowSchema {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_value_meta(&mut self, meta: ValueMeta) {
        self.fields.push(meta);
    }

    pub fn with_field(mut self, name: impl Into<String>, value_type: ValueType) -> Self {
        self.add_value_meta(ValueMeta::new(name, value_type));
        self
    }

    /// First field with the given name.
    pub fn search_value_meta(&self, name: &str) -> Option<&ValueMeta> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    pub fn fields(&self) -> &[ValueMeta] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A single row; values are positional against a [`RowSchema`].
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(transparent)]
pub struct Row {
    pub values: Vec<serde_json::Value>,
}

impl Row {
    pub fn new(values: Vec<serde_json::Value>) -> Self {
        Self { values }
    }
}
