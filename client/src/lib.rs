//! # SkyScout - Library Root
//!
//! Client-side data and state layer of a flight search application: airport discovery,
//! flight search, fare calendars, and account sessions.
//! This library crate contains all modules used by the binary crate (`main.rs`).
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────┐
//! │              skyscout (this crate)                     │
//! ├────────────────────────────────────────────────────────┤
//! │  Tokio         - Async runtime                         │
//! │  Reqwest       - HTTP client                           │
//! │  parking_lot   - Slice state locks                     │
//! │  async-channel - Change notifications to the host      │
//! │  tracing       - Structured logging                    │
//! └────────────────────────────────────────────────────────┘
//!          │                              │
//!          │ HTTPS (RapidAPI)             │ HTTPS
//!          ▼                              ▼
//! ┌─────────────────┐          ┌─────────────────────────┐
//! │  Flight API     │          │  Identity provider      │
//! │  (Sky Scrapper) │          │  (Firebase Auth REST)   │
//! └─────────────────┘          └─────────────────────────┘
//! ```
//!
//! ## Module Structure
//!
//! - **app**: [`app::App`], the slices, their state types, and derived view helpers
//! - **config**: Environment-driven configuration
//! - **core**: Error type and the service traits slices depend on
//! - **debug**: Logging setup
//! - **services**: Flight API client, identity provider, location
//! - **storage**: Durable key-value store and the session store on top of it
//! - **utils**: Input validation
//!
//! ## Module Dependency Graph
//!
//! ```text
//! main.rs
//!   └─> app ──> core (traits, errors)
//!        │        ▲
//!        │        │ implements
//!        └─> services, storage ──> shared (DTOs), lib-auth
//! ```

pub mod app;
pub mod config;
pub mod core;
pub mod debug;
pub mod services;
pub mod storage;
pub mod utils;
