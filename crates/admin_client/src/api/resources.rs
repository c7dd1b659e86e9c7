use async_trait::async_trait;

use super::client::{ApiClient, ApiRequest};
use super::models::{NewProject, NewReferenceClient, Project, ReferenceClient};
use crate::error::Result;

pub const REFERENCE_CLIENTS_PATH: &str = "/admin/reference-clients";
pub const PROJECTS_PATH: &str = "/admin/projects";

/// The admin content collections.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AdminApi: Send + Sync {
    async fn list_reference_clients(&self) -> Result<Vec<ReferenceClient>>;

    async fn create_reference_client(&self, draft: NewReferenceClient) -> Result<ReferenceClient>;

    async fn delete_reference_client(&self, id: &str) -> Result<()>;

    /// Lists every project, inactive ones included.
    async fn list_projects(&self) -> Result<Vec<Project>>;

    async fn create_project(&self, draft: NewProject) -> Result<Project>;

    async fn delete_project(&self, id: &str) -> Result<()>;
}

#[async_trait]
impl AdminApi for ApiClient {
    async fn list_reference_clients(&self) -> Result<Vec<ReferenceClient>> {
        self.get_json(ApiRequest::get(REFERENCE_CLIENTS_PATH)).await
    }

    async fn create_reference_client(&self, draft: NewReferenceClient) -> Result<ReferenceClient> {
        let request = ApiRequest::post(REFERENCE_CLIENTS_PATH).json(&draft.normalized())?;
        self.get_json(request).await
    }

    async fn delete_reference_client(&self, id: &str) -> Result<()> {
        self.send(ApiRequest::delete(format!("{REFERENCE_CLIENTS_PATH}/{id}")))
            .await?;
        Ok(())
    }

    async fn list_projects(&self) -> Result<Vec<Project>> {
        self.get_json(ApiRequest::get(PROJECTS_PATH).query("all", "1"))
            .await
    }

    async fn create_project(&self, draft: NewProject) -> Result<Project> {
        let request = ApiRequest::post(PROJECTS_PATH).json(&draft.normalized())?;
        self.get_json(request).await
    }

    async fn delete_project(&self, id: &str) -> Result<()> {
        self.send(ApiRequest::delete(format!("{PROJECTS_PATH}/{id}")))
            .await?;
        Ok(())
    }
}
