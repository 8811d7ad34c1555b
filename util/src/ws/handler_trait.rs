use super::runtime::WsContext;
use serde::de::DeserializeOwned;
use std::future::Future;

/// Per-room behaviour plugged into [`serve_topic`](super::serve::serve_topic).
pub trait WsHandler: Send + Sync + 'static {
    /// Incoming client message type (a tagged enum works best).
    type In: DeserializeOwned + Send;

    /// Called once the socket is subscribed and the viewer registered.
    fn on_open(&self, ctx: &WsContext) -> impl Future<Output = ()> + Send {
        async move {
            let _ = ctx;
        }
    }

    /// Called for every text frame that parses as `Self::In`.
    fn on_message(&self, ctx: &WsContext, msg: Self::In) -> impl Future<Output = ()> + Send;

    /// Called when the client closes; the viewer is unregistered afterwards.
    fn on_close(&self, ctx: &WsContext) -> impl Future<Output = ()> + Send {
        async move {
            let _ = ctx;
        }
    }
}
