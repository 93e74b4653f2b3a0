use crate::config::Config;
use serde::{Deserialize, Serialize};

/// Visibility of the deployed function on the remote platform.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AccessLevel {
    Public,
    #[default]
    Private,
}

/// A runtime dependency the remote sandbox must provision, optionally pinned
/// to a version or a custom package index.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Dependency {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_url: Option<String>,
}

/// Shape and dtype of an example input used to trace the function for export.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TensorSpec {
    pub dtype: String,
    pub shape: Vec<usize>,
}

/// Declarative descriptor handed to the external deployment service when
/// registering the classifier. The registration transport itself lives
/// outside this crate; we only assemble the payload.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FunctionDescriptor {
    pub tag: String,
    pub description: String,
    pub access: AccessLevel,
    pub dependencies: Vec<Dependency>,
    pub targets: Vec<String>,
    pub example_inputs: Vec<TensorSpec>,
}

impl FunctionDescriptor {
    pub fn from_config(config: &Config) -> Self {
        let crop = config.model.crop_size as usize;
        Self {
            tag: config.function.tag.clone(),
            description: config.function.description.clone(),
            access: config.function.access,
            dependencies: config.function.dependencies.clone(),
            targets: config.function.targets.clone(),
            example_inputs: vec![TensorSpec {
                dtype: "float32".to_string(),
                shape: vec![1, 3, crop, crop],
            }],
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
