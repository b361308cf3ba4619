pub mod atomic_writer;
pub mod http_store;
pub mod json_dir_store;

pub use atomic_writer::AtomicWriter;
pub use http_store::HttpComponentStore;
pub use json_dir_store::JsonDirStore;
