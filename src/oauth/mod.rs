//! OAuth authorization-code flow: capability trait, Google-style adapter, PKCE material.

pub mod adapter;
pub mod google;
pub mod pkce;
