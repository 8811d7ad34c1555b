use serde::Serialize;

/// A realtime event: a stable name plus the room it is published to.
pub trait Event: Serialize {
    const NAME: &'static str;
    /// Topic the event belongs to, e.g. `course:3:attendance`.
    fn topic_path(&self) -> String;
}
