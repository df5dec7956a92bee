//! # Services Module
//!
//! External integrations of the client: the backend HTTP API and local
//! persistence.
//!
//! ## Module Overview
//!
//! ```text
//! services/
//! ├── api/        - Backend HTTP API client
//! │                 (envelope unwrapping, per-resource services)
//! ├── cache.rs    - TTL map for quote responses
//! └── storage.rs  - Key/value store (authToken, loginUrl, user)
//! ```
//!
//! ## Service Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │                stocksim CLI                  │
//! │                                              │
//! │  ┌──────────────────┐   ┌────────────────┐   │
//! │  │  ApiClient       │──►│  FileStore     │   │
//! │  │  (api/)          │   │  (storage.rs)  │   │
//! │  └────────┬─────────┘   └────────────────┘   │
//! └───────────┼──────────────────────────────────┘
//!             │ HTTP/JSON
//!             ▼
//! ┌──────────────────────────┐
//! │  Simulator backend       │
//! │  /api/stocks/*           │
//! │  /api/portfolio/*        │
//! │  /api/watchlist/*        │
//! │  /api/settings/*         │
//! │  /api/leaderboard ...    │
//! └──────────────────────────┘
//! ```

pub mod api;
pub mod cache;
pub mod storage;
