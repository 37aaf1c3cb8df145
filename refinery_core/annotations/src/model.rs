use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use uuid::Uuid;

fn generated_name() -> String {
    Uuid::new_v4().to_string()
}

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AggregationType {
    None,
    #[default]
    Sum,
    Average,
    Count,
    CountDistinct,
    Minimum,
    Maximum,
}

impl AggregationType {
    /// Counting aggregations accept fields of any type.
    pub fn is_count(&self) -> bool {
        matches!(self, AggregationType::Count | AggregationType::CountDistinct)
    }
}

impl Display for AggregationType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AggregationType::None => write!(f, "NONE"),
            AggregationType::Sum => write!(f, "SUM"),
            AggregationType::Average => write!(f, "AVERAGE"),
            AggregationType::Count => write!(f, "COUNT"),
            AggregationType::CountDistinct => write!(f, "COUNT_DISTINCT"),
            AggregationType::Minimum => write!(f, "MINIMUM"),
            AggregationType::Maximum => write!(f, "MAXIMUM"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct CreateAttribute {
    #[serde(default = "generated_name")]
    pub name: String,
    pub field: String,
    #[serde(default)]
    pub dimension: Option<String>,
    #[serde(default)]
    pub hierarchy: Option<String>,
    #[serde(default)]
    pub parent_attribute: Option<String>,
    #[serde(default)]
    pub unique: bool,
}

impl CreateAttribute {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            name: generated_name(),
            field: field.into(),
            dimension: None,
            hierarchy: None,
            parent_attribute: None,
            unique: false,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn in_hierarchy(mut self, dimension: impl Into<String>, hierarchy: impl Into<String>) -> Self {
        self.dimension = Some(dimension.into());
        self.hierarchy = Some(hierarchy.into());
        self
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct CreateMeasure {
    #[serde(default = "generated_name")]
    pub name: String,
    pub field: String,
    #[serde(default)]
    pub aggregation: AggregationType,
    #[serde(default)]
    pub format_string: Option<String>,
    #[serde(default)]
    pub hidden: bool,
}

impl CreateMeasure {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            name: generated_name(),
            field: field.into(),
            aggregation: AggregationType::default(),
            format_string: None,
            hidden: false,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn aggregated_by(mut self, aggregation: AggregationType) -> Self {
        self.aggregation = aggregation;
        self
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct CreateDimensionKey {
    #[serde(default = "generated_name")]
    pub name: String,
    pub field: String,
    pub dimension: String,
}

/// Links a fact field to a dimension published as a shared annotation group.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct LinkDimension {
    #[serde(default = "generated_name")]
    pub name: String,
    pub field: String,
    pub shared_dimension: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ModelAnnotation {
    CreateAttribute(CreateAttribute),
    CreateMeasure(CreateMeasure),
    CreateDimensionKey(CreateDimensionKey),
    LinkDimension(LinkDimension),
}

impl ModelAnnotation {
    pub fn name(&self) -> &str {
        match self {
            ModelAnnotation::CreateAttribute(a) => &a.name,
            ModelAnnotation::CreateMeasure(m) => &m.name,
            ModelAnnotation::CreateDimensionKey(k) => &k.name,
            ModelAnnotation::LinkDimension(l) => &l.name,
        }
    }

    /// Source field the annotation reads from.
    pub fn field(&self) -> &str {
        match self {
            ModelAnnotation::CreateAttribute(a) => &a.field,
            ModelAnnotation::CreateMeasure(m) => &m.field,
            ModelAnnotation::CreateDimensionKey(k) => &k.field,
            ModelAnnotation::LinkDimension(l) => &l.field,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ModelAnnotation::CreateAttribute(_) => "create_attribute",
            ModelAnnotation::CreateMeasure(_) => "create_measure",
            ModelAnnotation::CreateDimensionKey(_) => "create_dimension_key",
            ModelAnnotation::LinkDimension(_) => "link_dimension",
        }
    }
}

impl From<CreateAttribute> for ModelAnnotation {
    fn from(value: CreateAttribute) -> Self {
        ModelAnnotation::CreateAttribute(value)
    }
}

impl From<CreateMeasure> for ModelAnnotation {
    fn from(value: CreateMeasure) -> Self {
        ModelAnnotation::CreateMeasure(value)
    }
}

impl From<CreateDimensionKey> for ModelAnnotation {
    fn from(value: CreateDimensionKey) -> Self {
        ModelAnnotation::CreateDimensionKey(value)
    }
}

impl From<LinkDimension> for ModelAnnotation {
    fn from(value: LinkDimension) -> Self {
        ModelAnnotation::LinkDimension(value)
    }
}

/// Ordered, optionally named collection of annotations.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
pub struct AnnotationGroup {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub annotations: Vec<ModelAnnotation>,
}

impl AnnotationGroup {
    pub fn new(annotations: Vec<ModelAnnotation>) -> Self {
        Self {
            name: None,
            description: None,
            annotations,
        }
    }

    pub fn named(name: impl Into<String>, annotations: Vec<ModelAnnotation>) -> Self {
        Self {
            name: Some(name.into()),
            description: None,
            annotations,
        }
    }

    pub fn add(&mut self, annotation: impl Into<ModelAnnotation>) {
        self.annotations.push(annotation.into());
    }

    pub fn get(&self, index: usize) -> Option<&ModelAnnotation> {
        self.annotations.get(index)
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ModelAnnotation> {
        self.annotations.iter()
    }
}

impl<'a> IntoIterator for &'a AnnotationGroup {
    type Item = &'a ModelAnnotation;
    type IntoIter = std::slice::Iter<'a, ModelAnnotation>;

    fn into_iter(self) -> Self::IntoIter {
        self.annotations.iter()
    }
}
