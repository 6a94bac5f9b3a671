use super::error::CredentialsError;

/// Account credentials for the synthesis service.
///
/// Both parts are trimmed once here; the rest of the pipeline only ever sees
/// the trimmed values.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    api_key: String,
    group_id: String,
}

impl Credentials {
    pub fn new(api_key: impl AsRef<str>, group_id: impl AsRef<str>) -> Result<Self, CredentialsError> {
        let api_key = api_key.as_ref().trim();
        let group_id = group_id.as_ref().trim();

        if api_key.is_empty() {
            return Err(CredentialsError::MissingApiKey);
        }
        if group_id.is_empty() {
            return Err(CredentialsError::MissingGroupId);
        }

        Ok(Self {
            api_key: api_key.to_string(),
            group_id: group_id.to_string(),
        })
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn group_id(&self) -> &str {
        &self.group_id
    }
}

// Keep the key out of logs and panic messages
impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"***")
            .field("group_id", &self.group_id)
            .finish()
    }
}
