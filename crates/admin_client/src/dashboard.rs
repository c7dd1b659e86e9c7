//! State behind the admin dashboard: the two content collections plus the
//! busy marker for deletions.

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::{debug, info};

use crate::api::{AdminApi, NewProject, NewReferenceClient, Project, ReferenceClient};
use crate::error::Result;
use crate::utils::MountHandle;

#[derive(Debug, Clone, Default)]
pub struct DashboardState {
    pub reference_clients: Vec<ReferenceClient>,
    pub projects: Vec<Project>,
    pub loading: bool,
    pub busy_delete_id: Option<String>,
}

#[derive(Clone)]
pub struct Dashboard {
    api: Arc<dyn AdminApi>,
    state: Arc<RwLock<DashboardState>>,
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("state", &*self.read())
            .finish_non_exhaustive()
    }
}

impl Dashboard {
    pub fn new(api: Arc<dyn AdminApi>) -> Self {
        Dashboard {
            api,
            state: Arc::new(RwLock::new(DashboardState {
                loading: true,
                ..Default::default()
            })),
        }
    }

    pub fn snapshot(&self) -> DashboardState {
        self.read().clone()
    }

    /// Reference clients ordered by contact name, case-insensitively.
    pub fn sorted_reference_clients(&self) -> Vec<ReferenceClient> {
        let mut clients = self.read().reference_clients.clone();
        clients.sort_by_cached_key(|client| client.name.to_lowercase());
        clients
    }

    /// Fetches both collections concurrently. The result is applied only if
    /// `mount` is still alive when the responses arrive; a stale load returns
    /// `Ok(false)` and leaves the state untouched, errors included.
    pub async fn load(&self, mount: &MountHandle) -> Result<bool> {
        let (clients, projects) = futures::join!(
            self.api.list_reference_clients(),
            self.api.list_projects()
        );

        if !mount.is_alive() {
            debug!("Dashboard unmounted before load finished, discarding result");
            return Ok(false);
        }

        let mut state = self.write();
        state.loading = false;
        let clients = clients?;
        let projects = projects?;
        info!(
            "Loaded {} reference clients and {} projects",
            clients.len(),
            projects.len()
        );
        state.reference_clients = clients;
        state.projects = projects;
        Ok(true)
    }

    pub async fn create_reference_client(&self, draft: NewReferenceClient) -> Result<ReferenceClient> {
        let created = self.api.create_reference_client(draft).await?;
        self.write().reference_clients.insert(0, created.clone());
        Ok(created)
    }

    pub async fn create_project(&self, draft: NewProject) -> Result<Project> {
        let created = self.api.create_project(draft).await?;
        self.write().projects.insert(0, created.clone());
        Ok(created)
    }

    pub async fn delete_reference_client(&self, id: &str) -> Result<()> {
        self.write().busy_delete_id = Some(id.to_string());
        let result = self.api.delete_reference_client(id).await;
        let mut state = self.write();
        state.busy_delete_id = None;
        result?;
        state.reference_clients.retain(|client| client.id != id);
        Ok(())
    }

    pub async fn delete_project(&self, id: &str) -> Result<()> {
        self.write().busy_delete_id = Some(id.to_string());
        let result = self.api.delete_project(id).await;
        let mut state = self.write();
        state.busy_delete_id = None;
        result?;
        state.projects.retain(|project| project.id != id);
        Ok(())
    }

    fn read(&self) -> RwLockReadGuard<'_, DashboardState> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, DashboardState> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::resources::MockAdminApi;
    use crate::api::ProjectType;
    use crate::error::ApiError;
    use crate::utils::Mount;
    use reqwest::StatusCode;

    fn client(id: &str, name: &str) -> ReferenceClient {
        ReferenceClient {
            id: id.to_string(),
            name: name.to_string(),
            business_name: None,
            email: format!("{id}@example.com"),
            phone: None,
            niche: None,
            note: None,
            project_type: ProjectType::Other,
            is_active: true,
            created_at: None,
        }
    }

    fn project(id: &str) -> Project {
        Project {
            id: id.to_string(),
            client_name: "Bar.F".to_string(),
            project_type: "landing".to_string(),
            description: String::new(),
            long_description: None,
            url: None,
            images: vec![],
            order: 0,
            is_active: true,
            created_at: None,
        }
    }

    fn loaded_mock() -> MockAdminApi {
        let mut api = MockAdminApi::new();
        api.expect_list_reference_clients()
            .returning(|| Ok(vec![client("b", "yael"), client("a", "Avi")]));
        api.expect_list_projects().returning(|| Ok(vec![project("p1")]));
        api
    }

    #[tokio::test]
    async fn load_applies_results_while_mounted() {
        let dashboard = Dashboard::new(Arc::new(loaded_mock()));
        let mount = Mount::new();

        assert!(dashboard.load(&mount.handle()).await.expect("load"));

        let state = dashboard.snapshot();
        assert!(!state.loading);
        assert_eq!(state.reference_clients.len(), 2);
        assert_eq!(state.projects.len(), 1);

        let sorted: Vec<_> = dashboard
            .sorted_reference_clients()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(sorted, vec!["Avi", "yael"]);
    }

    #[tokio::test]
    async fn load_after_unmount_leaves_state_untouched() {
        let dashboard = Dashboard::new(Arc::new(loaded_mock()));
        let mount = Mount::new();
        let handle = mount.handle();
        drop(mount);

        assert!(!dashboard.load(&handle).await.expect("stale load is not an error"));
        let state = dashboard.snapshot();
        assert!(state.loading);
        assert!(state.reference_clients.is_empty());
    }

    #[tokio::test]
    async fn stale_load_swallows_errors() {
        let mut api = MockAdminApi::new();
        api.expect_list_reference_clients().returning(|| {
            Err(ApiError::Status {
                status: StatusCode::UNAUTHORIZED,
                message: None,
            })
        });
        api.expect_list_projects().returning(|| Ok(vec![]));
        let dashboard = Dashboard::new(Arc::new(api));
        let mount = Mount::new();
        let handle = mount.handle();
        mount.unmount();

        assert!(matches!(dashboard.load(&handle).await, Ok(false)));
    }

    #[tokio::test]
    async fn create_prepends_and_delete_removes() {
        let mut api = loaded_mock();
        api.expect_create_reference_client()
            .returning(|draft| Ok(client("c", &draft.name)));
        api.expect_delete_reference_client()
            .withf(|id| id == "b")
            .returning(|_| Ok(()));
        let dashboard = Dashboard::new(Arc::new(api));
        let mount = Mount::new();
        dashboard.load(&mount.handle()).await.expect("load");

        dashboard
            .create_reference_client(NewReferenceClient {
                name: "Noa".into(),
                ..Default::default()
            })
            .await
            .expect("create");
        assert_eq!(dashboard.snapshot().reference_clients[0].id, "c");

        dashboard.delete_reference_client("b").await.expect("delete");
        let state = dashboard.snapshot();
        assert!(state.reference_clients.iter().all(|c| c.id != "b"));
        assert_eq!(state.busy_delete_id, None);
    }

    #[tokio::test]
    async fn failed_delete_keeps_item_and_clears_busy_marker() {
        let mut api = loaded_mock();
        api.expect_delete_project().returning(|_| {
            Err(ApiError::Status {
                status: StatusCode::INTERNAL_SERVER_ERROR,
                message: Some("boom".into()),
            })
        });
        let dashboard = Dashboard::new(Arc::new(api));
        let mount = Mount::new();
        dashboard.load(&mount.handle()).await.expect("load");

        assert!(dashboard.delete_project("p1").await.is_err());
        let state = dashboard.snapshot();
        assert_eq!(state.projects.len(), 1);
        assert_eq!(state.busy_delete_id, None);
    }
}
