use serde::{Deserialize, Serialize};

/// One spoken line of a script, already trimmed and validated.
///
/// `character`, `voice_id` and `text` are guaranteed non-empty. Rows that
/// don't satisfy this never become a `ScriptRow`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptRow {
    pub shot: String,
    pub character: String,
    pub voice_id: String,
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub emotion: Option<String>,
}
