//! Single entry point used by transports

use std::sync::Arc;

use crate::admin::AdminGate;
use crate::dice::{RandomSource, ThreadRandom};
use crate::handlers::{handler_for, Context};
use crate::metrics::{record_failure, UPDATES_TOTAL};
use crate::reply::Reply;
use crate::router::{Payload, Router};
use crate::store::UserStore;

/// Transport-neutral inbound event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inbound {
    pub sender: i64,
    pub payload: Payload,
}

impl Inbound {
    pub fn text(sender: i64, text: impl Into<String>) -> Self {
        Self {
            sender,
            payload: Payload::Text(text.into()),
        }
    }

    pub fn callback(sender: i64, data: impl Into<String>) -> Self {
        Self {
            sender,
            payload: Payload::Callback(data.into()),
        }
    }
}

/// Owns the store, the admin gate, the random source and the routing table.
///
/// `Engine` is `Send + Sync`; share it behind an `Arc` between request tasks.
pub struct Engine {
    store: Arc<UserStore>,
    gate: AdminGate,
    dice: Arc<dyn RandomSource>,
    router: Router,
}

impl Engine {
    /// Engine with an empty store and the thread RNG.
    pub fn new(gate: AdminGate) -> Self {
        Self::with_parts(Arc::new(UserStore::new()), gate, Arc::new(ThreadRandom))
    }

    pub fn with_parts(store: Arc<UserStore>, gate: AdminGate, dice: Arc<dyn RandomSource>) -> Self {
        Self {
            store,
            gate,
            dice,
            router: Router::new(),
        }
    }

    pub fn store(&self) -> &Arc<UserStore> {
        &self.store
    }

    /// Routes one event and produces its reply.
    ///
    /// The sender's account is created on first contact. Handler errors are
    /// turned into their user-facing text here and never escape.
    pub fn handle(&self, inbound: &Inbound) -> Reply {
        self.store.ensure(inbound.sender);

        let resolved = self.router.resolve(&inbound.payload);
        let route = resolved.route.name();
        UPDATES_TOTAL.with_label_values(&[route]).inc();
        tracing::debug!(user_id = inbound.sender, route, "routing inbound event");

        let cx = Context {
            store: &self.store,
            gate: &self.gate,
            dice: self.dice.as_ref(),
            sender: inbound.sender,
            args: resolved.args,
        };

        match handler_for(resolved.route)(&cx) {
            Ok(reply) => reply,
            Err(err) => {
                tracing::info!(user_id = inbound.sender, route, error = %err, "handler rejected event");
                record_failure(err.kind());
                Reply::plain(err.user_message())
            }
        }
    }
}
