pub mod dto;
pub mod error;
pub mod model;
pub mod scheduler;
pub mod service;
pub mod store;

pub use dto::{AudioDownload, BatchResponse, IngestResponse, RunStartedResponse, WorkItemResponse};
pub use error::BatchServiceError;
pub use model::{BatchProgress, ItemId, RunProgress, RunSummary, WorkItem, WorkItemStatus};
pub use scheduler::BatchScheduler;
pub use service::{BatchService, BatchServiceApi, RunHandle};
pub use store::WorkItemStore;
