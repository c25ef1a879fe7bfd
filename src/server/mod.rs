//! HTTP surface: router, handlers, session payloads, listen-address parsing.

pub mod listen;
pub mod routes;
pub mod session;
pub mod state;
