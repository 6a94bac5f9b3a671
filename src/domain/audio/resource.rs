use std::sync::Arc;

pub const MIME_MP3: &str = "audio/mp3";

/// Decoded audio for one synthesized line.
///
/// The bytes are shared, so cloning a resource to serve a download doesn't
/// copy the audio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioResource {
    bytes: Arc<[u8]>,
    mime_type: String,
}

impl AudioResource {
    pub fn new(bytes: impl Into<Arc<[u8]>>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes: bytes.into(),
            mime_type: mime_type.into(),
        }
    }

    pub fn mp3(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self::new(bytes, MIME_MP3)
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// File extension matching the MIME type, mp3 when unknown
    pub fn extension(&self) -> &'static str {
        let essence = self
            .mime_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match essence.as_str() {
            "audio/wav" | "audio/x-wav" | "audio/wave" => "wav",
            "audio/flac" | "audio/x-flac" => "flac",
            "audio/ogg" | "audio/opus" => "ogg",
            "audio/pcm" => "pcm",
            _ => "mp3",
        }
    }
}
