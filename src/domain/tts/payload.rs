/// Where the synthesis service put the audio.
///
/// The service either inlines the clip or points at a file it hosts. The
/// adapter resolves both into an `AudioResource` before anything else sees
/// them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioPayload {
    InlineBytes(Vec<u8>),
    RemoteUrl(String),
}

impl AudioPayload {
    pub fn kind(&self) -> &'static str {
        match self {
            AudioPayload::InlineBytes(_) => "inline",
            AudioPayload::RemoteUrl(_) => "url",
        }
    }
}
