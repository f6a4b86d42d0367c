//! tinyhttp - a small HTTP/1.1 server over raw TCP
//!
//! Request parsing, routing, response framing, gzip content encoding and
//! static file serving, without an HTTP library underneath.

pub mod config;
pub mod files;
pub mod http;
pub mod router;
pub mod server;
