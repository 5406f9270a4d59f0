//! coincore: account ledger and message routing for coinbot
//!
//! Nothing in this crate knows about Telegram. A transport converts its
//! updates into [`Inbound`] events, calls [`Engine::handle`], and renders the
//! returned [`Reply`].
//!
//! # Module Structure
//!
//! - `store`: in-memory accounts keyed by user id
//! - `router`: trigger → route table (commands, keyboard labels, callbacks)
//! - `handlers`: one function per route
//! - `admin`: admin capability gate
//! - `dice`: pluggable random source for the coin game

pub mod account;
pub mod admin;
pub mod dice;
pub mod engine;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod reply;
pub mod router;
pub mod store;

pub use account::{Account, Wallet};
pub use admin::AdminGate;
pub use dice::{FixedDraws, RandomSource, ThreadRandom};
pub use engine::{Engine, Inbound};
pub use error::{CoreError, CoreResult};
pub use reply::{Menu, Reply};
pub use router::{Payload, Route, Router};
pub use store::UserStore;
