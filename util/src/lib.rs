pub mod config;
pub mod qr;
pub mod state;
pub mod ws;
