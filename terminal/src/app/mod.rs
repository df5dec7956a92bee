//! # Application Layer
//!
//! Everything between the CLI and the backend client.
//!
//! ```text
//! main.rs (clap) ──► App (commands.rs) ──► MarketApi ──► ApiClient ──► backend
//!                     │    │
//!                     │    └─► ui::views (render to text)
//!                     ├─► Session (session.rs, local identity)
//!                     ├─► NavigationCache (navigation.rs)
//!                     └─► PriceTicker (ticker.rs) ──► async_channel ──► AppEvent
//! ```
//!
//! ## Key Components
//!
//! - **[`App`]**: one handler per page, returning rendered text
//! - **[`AppEvent`]**: messages from background tasks and the 401 side channel
//! - **[`Session`]**: local trader identity and backend token
//! - **[`NavigationCache`]**: menu fetched once, with an offline fallback
//! - **[`PriceTicker`]**: periodic quote refresh

pub mod commands;
pub mod events;
pub mod navigation;
pub mod session;
pub mod ticker;

pub use commands::{App, SettingsUpdate};
pub use events::AppEvent;
pub use navigation::{MenuSource, NavigationCache};
pub use session::{LocalUser, Session};
pub use ticker::PriceTicker;
