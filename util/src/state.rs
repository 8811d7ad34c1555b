//! Application state shared across Axum route handlers and background tasks.
//!
//! Holds the database connection, the WebSocket manager used for course rooms,
//! and the registry of running QR codes.

use crate::qr::QrRegistry;
use crate::ws::WebSocketManager;
use sea_orm::DatabaseConnection;

/// Central application state shared across the server.
#[derive(Clone)]
pub struct AppState {
    db: DatabaseConnection,
    ws: WebSocketManager,
    qr: QrRegistry,
}

impl AppState {
    /// Creates a new `AppState` with an empty QR registry.
    pub fn new(db: DatabaseConnection, ws: WebSocketManager) -> Self {
        Self {
            db,
            ws,
            qr: QrRegistry::new(),
        }
    }

    /// Returns a shared reference to the internal `DatabaseConnection`.
    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Returns a shared reference to the internal `WebSocketManager`.
    pub fn ws(&self) -> &WebSocketManager {
        &self.ws
    }

    pub fn qr(&self) -> &QrRegistry {
        &self.qr
    }
}

impl AppState {
    /// Returns a cloned copy of the database connection.
    ///
    /// Useful for spawned tasks that require ownership.
    pub fn db_clone(&self) -> DatabaseConnection {
        self.db.clone()
    }

    /// Returns a cloned instance of the `WebSocketManager`.
    pub fn ws_clone(&self) -> WebSocketManager {
        self.ws.clone()
    }

    pub fn qr_clone(&self) -> QrRegistry {
        self.qr.clone()
    }
}
