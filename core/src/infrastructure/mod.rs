pub mod object_storage;
pub mod qr;
