//! Result schema
//!
//! The ordered column -> declared-type mapping for the *current result*, not
//! the raw dataset. Computed or derived columns only exist in the result
//! schema, so filter translation and export both resolve types here.

use arrow::datatypes::{DataType, Schema};

/// Declared column types, in the query compiler's vocabulary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclaredType {
    Boolean,
    Integer,
    Float,
    String,
    Date,
    Datetime,
}

impl DeclaredType {
    /// Maps an Arrow data type to a declared type.
    ///
    /// Returns `None` for types the compiler has no vocabulary for; rules on
    /// such columns pass through untyped.
    pub fn from_arrow(data_type: &DataType) -> Option<Self> {
        match data_type {
            DataType::Boolean => Some(Self::Boolean),
            DataType::Int8
            | DataType::Int16
            | DataType::Int32
            | DataType::Int64
            | DataType::UInt8
            | DataType::UInt16
            | DataType::UInt32
            | DataType::UInt64 => Some(Self::Integer),
            DataType::Float16 | DataType::Float32 | DataType::Float64 => Some(Self::Float),
            DataType::Utf8 | DataType::LargeUtf8 => Some(Self::String),
            DataType::Date32 | DataType::Date64 => Some(Self::Date),
            DataType::Timestamp(_, _) => Some(Self::Datetime),
            _ => None,
        }
    }

    /// The wire name the query compiler expects
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Float => "float",
            Self::String => "string",
            Self::Date => "date",
            Self::Datetime => "datetime",
        }
    }

    /// Whether this type is stored as an integer but rendered as a
    /// date/time string on export
    pub fn is_temporal(&self) -> bool {
        matches!(self, Self::Date | Self::Datetime)
    }
}

/// Ordered column -> declared-type mapping for one result
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultSchema {
    columns: Vec<(String, Option<DeclaredType>)>,
}

impl ResultSchema {
    /// An empty schema, used before the first fetch completes
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds the mapping from an Arrow result schema
    pub fn from_arrow(schema: &Schema) -> Self {
        let columns = schema
            .fields()
            .iter()
            .map(|field| {
                (
                    field.name().clone(),
                    DeclaredType::from_arrow(field.data_type()),
                )
            })
            .collect();
        Self { columns }
    }

    /// Looks up a column's declared type; `None` if the column is absent
    /// or its Arrow type has no declared equivalent
    pub fn declared_type(&self, column: &str) -> Option<DeclaredType> {
        self.columns
            .iter()
            .find(|(name, _)| name == column)
            .and_then(|(_, declared)| *declared)
    }

    /// Column names in schema order
    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|(name, _)| name.as_str())
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the schema has no columns
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
