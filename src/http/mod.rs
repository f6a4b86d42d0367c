//! HTTP/1.1 protocol engine over raw TCP.
//!
//! - **`connection`**: per-connection read/respond loop and keep-alive state machine
//! - **`parser`**: decodes one request from a buffered read
//! - **`request`**: decoded request and header lookup
//! - **`response`**: status codes and the response header block
//! - **`writer`**: composes and writes response bytes
//! - **`encoding`**: `Accept-Encoding` negotiation and gzip
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← One read of up to 1024 bytes
//!        └──────┬──────┘
//!               │ Request decoded (or 400 on decode failure)
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Router produces the response
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent
//!               ├─ no `Connection: close` → Reading (same connection)
//!               └─ `Connection: close`, decode failure or EOF → Closed
//! ```

pub mod connection;
pub mod encoding;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
