//! Route Configuration Module
//!
//! # Module Structure
//!
//! ```text
//! routes/
//! ├── mod.rs          - Module exports and documentation
//! ├── router.rs       - Main router creation
//! └── chat_routes.rs  - Chat endpoints
//! ```
//!
//! # Routes
//!
//! | Method | Path         | Handler                    |
//! |--------|--------------|----------------------------|
//! | GET    | `/api/chat`  | `handle_chat_subscription` |
//! | POST   | `/api/chat`  | `handle_chat_publish`      |
//! | GET    | `/api/hello` | `handle_hello`             |
//! | GET    | `/health`    | liveness probe             |
//! | *      | anything else| static files               |

/// Main router creation
pub mod router;

/// Chat endpoints
pub mod chat_routes;

pub use router::create_router;
