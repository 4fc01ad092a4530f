pub mod api;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod series;
pub mod types;

pub use api::{HttpTransport, LabClient, RequestBody, Transport};
pub use config::{LabConfig, DEFAULT_BASE_URL};
pub use endpoint::{Endpoint, Method, Service};
pub use error::ApiError;
pub use series::KeyedSeries;
pub use types::*;
