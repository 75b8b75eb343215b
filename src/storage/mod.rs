pub mod catalog;
pub mod codec;
pub mod counter;
pub mod engine;
pub mod file;
pub mod memory;
pub mod record;

pub use catalog::Table;
pub use counter::{IdKind, next_id};
pub use engine::{RecordStore, Row};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use record::{Record, RecordStoreExt};
