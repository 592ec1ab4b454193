//*** START FILE: src/api/mod.rs ***//
pub mod backend;
pub mod error;
pub mod http_client;
pub mod mock;

// Re-export what the session layer and main.rs reach for
pub use backend::{AdvisoryBackend, AnalysisRequest, FarmerReport, HealthStatus};
pub use error::{ApiError, FailureKind};
pub use http_client::HttpBackend;
pub use mock::MockBackend;
//*** END FILE: src/api/mod.rs ***//
