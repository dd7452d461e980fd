pub mod app;
pub mod domain;
pub mod infra;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::CafeService;
pub use domain::{Cafe, CafeView, NewCafe};
pub use infra::Config;
pub use storage::{CafeStore, MemoryCafeStore, PgCafeStore, StoreError};
