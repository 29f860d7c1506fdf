pub mod config;
pub mod insight;
pub mod metrics;

pub use config::{ConfigurationError, Credential, LlmConfig, NeuroSyncConfig};
pub use insight::Insight;
pub use metrics::{CheckInMetrics, EditError, MetricField, MetricsError};
