/// Shared kernel - error types, result alias, path sandbox and digests
pub mod checksum;
pub mod error;
pub mod result;
pub mod security;

pub use result::Result;
