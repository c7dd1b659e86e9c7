pub mod bearer;
pub mod client;
pub mod interceptor;
pub mod models;
pub mod resources;

pub use bearer::BearerAuthMiddleware;
pub use client::{ApiClient, ApiRequest};
pub use interceptor::{Interception, RetryState};
pub use models::{NewProject, NewReferenceClient, Project, ProjectType, ReferenceClient};
pub use resources::AdminApi;
