//! Wire types for the HTTP surface.

pub mod chat;
pub mod message;
