//! # console-client
//!
//! Rust client library for the management console API.
//!
//! The load-bearing pieces are the session store (one bearer credential plus
//! an optional profile snapshot, persisted across runs) and the authenticated
//! request pipeline: every outbound call carries the stored credential, every
//! inbound result is classified as success, business error, or transport
//! error, and session-invalidating responses tear the session down and
//! schedule a redirect to login. The resource wrappers in [`api`] are thin
//! parameter-to-request mappings on top.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use console_client::{ConsoleClient, Result};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = ConsoleClient::builder()
//!         .base_url("https://console.example.com")
//!         .build()
//!         .await?;
//!
//!     let profile = client.login("admin", "secret").await?;
//!     println!("signed in as {}", profile.username);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod session;
pub mod surface;
pub mod transport;

// Re-exports for ergonomic usage
pub use client::{ConsoleClient, ConsoleClientBuilder};
pub use error::{Error, Result};
pub use models::auth::{AdminProfile, LoginRequest, LoginResponse};
pub use models::envelope::Envelope;
pub use models::records::{Activity, Order, Page, PageQuery, Team, User};
pub use session::{FileSessionStorage, MemorySessionStorage, SessionStore, SessionStorage};
pub use surface::{Navigator, Notifier};
pub use transport::http::{HttpClient, ScheduledRedirect};
