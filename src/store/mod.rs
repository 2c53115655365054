pub mod base;
pub mod sqlite_store;

// Re-export the primary Store items so code outside can do
// "use crate::store::{Store, create_store};"
pub use base::{apply_patch, create_store, NewUser, Store, StoreError};
