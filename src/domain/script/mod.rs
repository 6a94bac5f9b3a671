pub mod model;
pub mod validator;

pub use model::ScriptRow;
pub use validator::{ingest, IngestReport, RawRecord};
