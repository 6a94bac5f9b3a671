pub mod credentials;
pub mod request_id;

pub use credentials::credentials_middleware;
pub use request_id::{request_id_middleware, RequestId};
