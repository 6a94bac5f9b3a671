/// Why a single synthesis call produced no audio.
///
/// The `Display` text is what an operator sees next to a failed row.
#[derive(Debug, thiserror::Error)]
pub enum SynthesisError {
    #[error("synthesis request failed with HTTP {status}: {status_text}")]
    Transport { status: u16, status_text: String },

    #[error("synthesis service error {status_code}: {message}")]
    Service { status_code: i64, message: String },

    #[error("invalid inline audio: {0}")]
    Decode(#[from] HexDecodeError),

    #[error("synthesis response contained no audio data")]
    NoAudioData,

    #[error("failed to fetch audio file {url}: {reason}")]
    SecondaryFetch { url: String, reason: String },

    #[error("could not reach synthesis service: {0}")]
    Network(String),

    #[error("malformed synthesis response: {0}")]
    MalformedResponse(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HexDecodeError {
    #[error("odd number of hex digits ({0})")]
    OddLength(usize),

    #[error("invalid hex digit {found:?} at offset {offset}")]
    InvalidDigit { found: char, offset: usize },
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CredentialsError {
    #[error("API key is required")]
    MissingApiKey,

    #[error("group id is required")]
    MissingGroupId,
}
