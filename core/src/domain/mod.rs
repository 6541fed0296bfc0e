pub mod common;
pub mod data_uri;
pub mod health;
pub mod qr;
pub mod storage;
