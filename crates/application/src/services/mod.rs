//! Application services - Use case implementations

mod outlook_service;
mod snapshot_service;

pub use outlook_service::OutlookService;
pub use snapshot_service::SnapshotService;
