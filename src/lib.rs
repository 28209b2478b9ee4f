//! Gestão 360: alert derivation for an HR dashboard, a typed client for its
//! REST backend, and the session/config plumbing the `g360` binary runs on.

pub mod alerts;
pub mod client;
pub mod config;
pub mod models;
pub mod render;
pub mod session;
