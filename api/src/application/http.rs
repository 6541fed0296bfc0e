pub mod error;
pub mod file;
pub mod health;
pub mod page;
pub mod qr;
pub mod server;
pub mod upload;
