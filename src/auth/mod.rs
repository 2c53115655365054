//! Session token issuance/verification and password hashing.

pub mod password;
pub mod tokens;

pub use tokens::{InvalidToken, TokenService};
