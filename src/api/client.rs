use std::sync::Arc;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client as HttpClient, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::ProjectApi;
use crate::credentials::CredentialProvider;
use crate::error::{AppError, Result};
use crate::models::{
    Client, CreatedProject, DailyHoursRow, Employee, Project, ProjectPayload, RawAssignment,
    ReportQuery, ReportRow, Role,
};

#[derive(Serialize)]
struct CreateRoleRequest<'a> {
    role_name: &'a str,
}

#[derive(Serialize)]
struct AssignRoleRequest<'a> {
    sow_id: &'a str,
    role_id: i64,
    estimated_hours: i64,
}

#[derive(Serialize)]
struct AssignEmployeeRequest<'a> {
    sow_id: &'a str,
    emp_id: i64,
    role_id: i64,
    rate: Option<f64>,
}

/// Authenticated JSON client for the timesheet backend.
#[derive(Clone)]
pub struct ApiClient {
    client: HttpClient,
    base_url: String,
    credentials: Arc<dyn CredentialProvider>,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, credentials: Arc<dyn CredentialProvider>) -> Self {
        Self {
            client: HttpClient::new(),
            base_url: base_url.into(),
            credentials,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    fn auth_header(&self) -> Result<String> {
        let token = self.credentials.bearer_token().ok_or(AppError::NoCredential)?;
        Ok(format!("Bearer {}", token))
    }

    /// Check a response for trouble before decoding.
    ///
    /// An HTML content type on an endpoint that should return JSON is how an
    /// expired session manifests (the backend serves the login page), so it
    /// gets its own error rather than a JSON decode failure.
    async fn check(response: Response) -> Result<Response> {
        let is_html = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.contains("text/html"))
            .unwrap_or(false);
        if is_html {
            return Err(AppError::SessionExpired);
        }

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AppError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(String, String)],
    ) -> Result<T> {
        let response = self
            .client
            .get(self.url(path))
            .header("Authorization", self.auth_header()?)
            .query(query)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let response = self
            .client
            .post(self.url(path))
            .header("Authorization", self.auth_header()?)
            .json(body)
            .send()
            .await?;
        Ok(Self::check(response).await?.json().await?)
    }

    async fn post_unit<B: Serialize>(&self, path: &str, body: &B) -> Result<()> {
        let response = self
            .client
            .post(self.url(path))
            .header("Authorization", self.auth_header()?)
            .json(body)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn put_unit<B: Serialize>(&self, path: &str, body: &B) -> Result<()> {
        let response = self
            .client
            .put(self.url(path))
            .header("Authorization", self.auth_header()?)
            .json(body)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn delete_unit(&self, path: &str) -> Result<()> {
        let response = self
            .client
            .delete(self.url(path))
            .header("Authorization", self.auth_header()?)
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}

impl ProjectApi for ApiClient {
    async fn list_projects(&self, company_id: i64) -> Result<Vec<Project>> {
        self.get_json(&format!("/api/projects/company/{}", company_id), &[])
            .await
    }

    async fn create_project(&self, payload: &ProjectPayload) -> Result<CreatedProject> {
        self.post_json("/api/projects", payload).await
    }

    async fn update_project(&self, sow_id: &str, payload: &ProjectPayload) -> Result<()> {
        self.put_unit(&format!("/api/projects/{}", sow_id), payload)
            .await
    }

    async fn delete_project(&self, sow_id: &str) -> Result<()> {
        self.delete_unit(&format!("/api/projects/{}", sow_id)).await
    }

    async fn list_roles(&self) -> Result<Vec<Role>> {
        self.get_json("/api/roles", &[]).await
    }

    async fn create_role(&self, role_name: &str) -> Result<Role> {
        self.post_json("/api/roles", &CreateRoleRequest { role_name })
            .await
    }

    async fn list_employees(&self) -> Result<Vec<Employee>> {
        self.get_json("/api/employees", &[]).await
    }

    async fn clients_by_billable(&self, billable: bool) -> Result<Vec<Client>> {
        self.get_json(
            "/api/clients",
            &[("billable".to_string(), billable.to_string())],
        )
        .await
    }

    async fn project_assignments(&self, sow_id: &str) -> Result<Vec<RawAssignment>> {
        self.get_json(&format!("/api/projects/{}/assignments", sow_id), &[])
            .await
    }

    async fn assign_role(&self, sow_id: &str, role_id: i64, estimated_hours: i64) -> Result<()> {
        self.post_unit(
            "/api/projects/assign-role",
            &AssignRoleRequest {
                sow_id,
                role_id,
                estimated_hours,
            },
        )
        .await
    }

    async fn assign_employee(
        &self,
        sow_id: &str,
        role_id: i64,
        emp_id: i64,
        rate: Option<f64>,
    ) -> Result<()> {
        self.post_unit(
            "/api/projects/assign-employee",
            &AssignEmployeeRequest {
                sow_id,
                emp_id,
                role_id,
                rate,
            },
        )
        .await
    }

    async fn remove_role_employee(&self, sow_id: &str, role_id: i64, emp_id: i64) -> Result<()> {
        self.delete_unit(&format!(
            "/api/projects/{}/roles/{}/employees/{}",
            sow_id, role_id, emp_id
        ))
        .await
    }

    async fn remove_project_role(&self, sow_id: &str, role_id: i64) -> Result<()> {
        self.delete_unit(&format!("/api/projects/{}/roles/{}", sow_id, role_id))
            .await
    }

    async fn daily_report(&self, query: &ReportQuery) -> Result<Vec<ReportRow>> {
        self.get_json("/api/timesheet/daily-report", &query.to_params())
            .await
    }

    async fn daily_hours_report(&self, query: &ReportQuery) -> Result<Vec<DailyHoursRow>> {
        self.get_json("/api/timesheet/daily-hours-report", &query.to_params())
            .await
    }
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .finish()
    }
}
