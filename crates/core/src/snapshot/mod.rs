pub mod snapshot_service;
pub mod snapshot_traits;


pub use snapshot_service::LedgerSnapshotService;
pub use snapshot_traits::SnapshotValuationTrait;
