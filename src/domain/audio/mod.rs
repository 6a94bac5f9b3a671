pub mod file_name;
pub mod manager;
pub mod resource;

pub use file_name::download_file_name;
pub use manager::{AudioResourceManager, ResourceHandle};
pub use resource::AudioResource;
