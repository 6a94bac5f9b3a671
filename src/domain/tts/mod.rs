pub mod credentials;
pub mod error;
pub mod hex;
pub mod payload;

pub use credentials::Credentials;
pub use error::{CredentialsError, HexDecodeError, SynthesisError};
pub use hex::decode_hex;
pub use payload::AudioPayload;
