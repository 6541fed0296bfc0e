pub mod entities;
pub mod ports;
pub mod services;

pub use entities::HealthReport;
pub use ports::HealthCheckService;
