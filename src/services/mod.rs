pub mod error;
pub use error::ExplorerError;

pub mod inflight;
pub use inflight::KeyedLocks;

pub mod location_service;
pub use location_service::LocationService;

pub mod record_service;
pub use record_service::RecordService;
