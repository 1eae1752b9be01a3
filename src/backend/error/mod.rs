//! Backend Error Module
//!
//! Error types used by the HTTP handlers and server assembly.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - Error type definitions
//! └── conversion.rs - IntoResponse implementation
//! ```
//!
//! All backend errors implement `IntoResponse`, so a handler can return
//! `Result<impl IntoResponse, BackendError>` and the error is converted into
//! a JSON body with the matching status code.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

pub use types::BackendError;
