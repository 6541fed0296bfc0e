pub mod handlers;
pub mod router;
pub mod spool;
pub mod validators;
