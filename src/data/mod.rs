pub mod codec;
pub mod stores;

pub use codec::PersistenceCodec;
pub use stores::{ByteStore, FileStore, MemoryStore};
