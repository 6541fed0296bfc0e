use super::entities::HealthReport;

pub trait HealthCheckService: Send + Sync {
    /// Liveness plus presence of the storage provider configuration.
    fn health(&self) -> HealthReport;
}
