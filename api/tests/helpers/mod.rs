pub mod app;
pub mod ws;

pub use app::{get_json_body, make_test_app, send};
pub use ws::{connect_ws, spawn_server};
