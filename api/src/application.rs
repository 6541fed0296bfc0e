pub mod client_middleware;
pub mod http;
pub mod logger;
