use crate::domain::audio::AudioResource;
use crate::domain::tts::{Credentials, SynthesisError};
use async_trait::async_trait;

/// Repository for TTS synthesis operations.
/// Abstracts the underlying TTS provider so the batch scheduler can be driven
/// by the real HTTP service or by an in-memory stub.
///
/// Implementations are responsible for:
/// - Building the provider-specific request (model, voice and audio settings)
/// - Classifying every failure as a `SynthesisError`
/// - Resolving whatever payload shape the provider returns into one
///   `AudioResource`
#[async_trait]
pub trait TtsRepository: Send + Sync {
    /// Synthesize one line of text with the given voice
    ///
    /// Makes exactly one synthesis request, plus one follow-up download when
    /// the provider answers with an audio URL. Never retries.
    ///
    /// # Errors
    /// Returns the classified failure when no audio could be produced
    async fn synthesize(
        &self,
        text: &str,
        voice_id: &str,
        credentials: &Credentials,
    ) -> Result<AudioResource, SynthesisError>;
}
