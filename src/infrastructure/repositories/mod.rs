pub mod t2a_tts_repository;
pub mod tts_repository;

pub use t2a_tts_repository::T2aTtsRepository;
pub use tts_repository::TtsRepository;
