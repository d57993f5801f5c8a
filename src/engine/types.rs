use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineDiag {
    pub backend: String,
    pub tool_version: String,
    pub ok: bool,
    #[serde(default)]
    pub error: Option<String>,
}
