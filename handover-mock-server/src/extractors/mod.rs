//! Request extractors that reject with [`crate::error::ServerError`].

pub mod json;
pub mod session;

pub use json::JsonBody;
pub use session::SessionId;
