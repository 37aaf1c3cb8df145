use crate::model::AnnotationGroup;
use serde::{Deserialize, Serialize};

/// Where a step takes its annotations from.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AnnotationSource {
    Inline(AnnotationGroup),
    /// Group stored in the annotation store under this name.
    Shared { name: String },
}

/// Authoring-time configuration of one model annotation step.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct AnnotationStepConfig {
    pub step_name: String,
    /// Written as `inline: {...}` or `shared: {name: ...}`.
    #[serde(with = "serde_yaml::with::singleton_map")]
    pub annotations: AnnotationSource,
    /// Step that provides the data the annotations describe.
    #[serde(default)]
    pub target_output_step: Option<String>,
    /// Shared dimensions are reused across models and need no target step.
    #[serde(default)]
    pub shared_dimension: bool,
}

impl AnnotationStepConfig {
    pub fn inline(step_name: impl Into<String>, group: AnnotationGroup) -> Self {
        Self {
            step_name: step_name.into(),
            annotations: AnnotationSource::Inline(group),
            target_output_step: None,
            shared_dimension: false,
        }
    }

    pub fn shared(step_name: impl Into<String>, group_name: impl Into<String>) -> Self {
        Self {
            step_name: step_name.into(),
            annotations: AnnotationSource::Shared {
                name: group_name.into(),
            },
            target_output_step: None,
            shared_dimension: false,
        }
    }

    pub fn with_target_output_step(mut self, step: impl Into<String>) -> Self {
        self.target_output_step = Some(step.into());
        self
    }

    pub fn as_shared_dimension(mut self) -> Self {
        self.shared_dimension = true;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ModelAnnotation;

    #[test]
    fn reads_inline_and_shared_sources_from_yaml() {
        let yaml = r#"
- step_name: sales_annotations
  target_output_step: table_input
  annotations:
    inline:
      name: sales
      annotations:
        - type: create_measure
          name: Revenue
          field: revenue
- step_name: product_link
  shared_dimension: true
  annotations:
    shared:
      name: products
"#;
        let steps: Vec<AnnotationStepConfig> = serde_yaml::from_str(yaml).unwrap();

        match &steps[0].annotations {
            AnnotationSource::Inline(group) => {
                assert_eq!(group.name.as_deref(), Some("sales"));
                assert!(matches!(
                    group.get(0),
                    Some(ModelAnnotation::CreateMeasure(m)) if m.name == "Revenue"
                ));
            }
            other => panic!("expected an inline group, got {other:?}"),
        }
        assert_eq!(steps[0].target_output_step.as_deref(), Some("table_input"));
        assert_eq!(
            steps[1],
            AnnotationStepConfig::shared("product_link", "products").as_shared_dimension()
        );
    }

    #[test]
    fn yaml_form_survives_a_write() {
        let config = AnnotationStepConfig::shared("product_link", "products")
            .with_target_output_step("table_input");
        let yaml = serde_yaml::to_string(&config).unwrap();
        assert!(yaml.contains("shared:"));
        let back: AnnotationStepConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(back, config);
    }
}
