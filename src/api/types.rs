use serde::{Deserialize, Serialize};

/// The handful of `/api/v1/model-versions/{id}` fields used for logging.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelVersion {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub model: Option<ModelSummary>,
    #[serde(default)]
    pub files: Vec<ModelFile>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelSummary {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelFile {
    pub name: Option<String>,
}

impl ModelVersion {
    /// "Model name / version name", falling back to whatever is present.
    pub fn display_name(&self) -> Option<String> {
        let model = self.model.as_ref().and_then(|m| m.name.as_deref());
        match (model, self.name.as_deref()) {
            (Some(m), Some(v)) => Some(format!("{} / {}", m, v)),
            (Some(m), None) => Some(m.to_string()),
            (None, Some(v)) => Some(v.to_string()),
            (None, None) => None,
        }
    }

    /// Server-side file names, in response order. Unnamed entries are skipped.
    pub fn file_names(&self) -> Vec<&str> {
        self.files.iter().filter_map(|f| f.name.as_deref()).collect()
    }
}
