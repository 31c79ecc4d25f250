//! # Rampart API
//!
//! An axum service whose requests pass a two-stage guard chain before reaching
//! any handler, and whose list endpoints share one pagination engine.
//!
//! ```text
//! crates/
//! ├── rampart-core/     # AppError, roles, filters, pagination parser and envelopes
//! ├── rampart-config/   # JWT, CORS and server configuration
//! ├── rampart-auth/     # JWT verification and principal resolution
//! ├── rampart-models/   # User document and DTOs
//! └── rampart-db/       # Collections, paginate(), Postgres and in-memory stores
//! src/
//! ├── middleware/       # Route policies, authentication and role guards
//! ├── modules/          # health, users
//! ├── extract.rs        # Query and path extractors with JSON rejections
//! ├── logging.rs        # Subscriber setup and request logging
//! ├── router.rs         # Route table and its policies
//! └── state.rs          # Shared application state
//! ```
//!
//! ## Request Flow
//!
//! ```text
//! request → logging → CORS → guard_chain(authenticate → authorize) → handler
//! ```
//!
//! Route policies are declared in [`router::route_policies`]. Routes are
//! authenticated unless declared public; a route may additionally restrict
//! the roles it admits. Declaring a route both public and role-restricted is
//! rejected when the table is built.
//!
//! ## List Endpoints
//!
//! `GET /api/users` accepts `page`, `limit`, `search`, `sortBy` and
//! `sortOrder`. Malformed values fall back to defaults instead of failing the
//! request:
//!
//! | Parameter | Default | Accepted |
//! |-----------|---------|----------|
//! | `page` | 1 | integer ≥ 1, trailing text ignored |
//! | `limit` | 10 | integer in 1..=100, trailing text ignored |
//! | `search` | none | non-blank text, matched against first name, last name and email |
//! | `sortBy` | `createdAt` | any field name |
//! | `sortOrder` | `desc` | `asc` or `desc` |
//!
//! `role` and `isActive` narrow the list further. Blank values are ignored;
//! unparsable ones are rejected with 400.
//!
//! ## Error Responses
//!
//! ```json
//! { "success": false, "error": "Invalid or expired credential" }
//! ```

pub mod extract;
pub mod logging;
pub mod middleware;
pub mod modules;
pub mod router;
pub mod state;
pub mod validator;
