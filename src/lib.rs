//! relay-http - minimal HTTP/1.1 server
//!
//! Core library for request framing, routing and static file serving.

pub mod config;
pub mod http;
pub mod routes;
pub mod server;
