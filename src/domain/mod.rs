pub mod audio;
pub mod batch;
pub mod script;
pub mod tts;
