/// Errors surfaced by the navbar core and the document loaders
#[derive(Debug, thiserror::Error)]
pub enum NavbarError {
    #[error("position control needs at least one leaf, got {total}")]
    InvalidLeafCount { total: usize },

    #[error("document: {0}")]
    Document(String),

    #[error("I/O: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl NavbarError {
    pub fn document(msg: impl Into<String>) -> Self {
        Self::Document(msg.into())
    }
}
