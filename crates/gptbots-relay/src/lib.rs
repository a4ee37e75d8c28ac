//! GPTBots Relay - local HTTP relay for the GPTBots conversational API.
//!
//! Office add-in clients run inside a browser sandbox and cannot call
//! `api.gptbots.ai` directly: the API key has to stay out of client code,
//! and the add-in origins are not on the upstream CORS allow-list. This
//! crate exposes a loopback HTTP surface mirroring the two conversation
//! endpoints, injects the bearer credential, and hands the upstream
//! response back untouched.
//!
//! Design goals:
//! - Accept add-in traffic from a fixed set of local origins (CORS).
//! - Forward request bodies opaquely; the relay never validates shapes.
//! - Return the upstream status and body byte-for-byte.

pub mod config;
pub mod cors;
pub mod error;
pub mod server;

pub use config::{CorsSettings, RelayConfig};
pub use error::RelayError;
pub use server::serve;
