//! reqwest-backed SchoolApi.
//!
//! The client is already authenticated: the bearer token is supplied by the
//! caller and attached to every request.

use super::dto::{
    AttendanceAddRequest, GainAddRequest, GainCatalogRequest, GainNode, RosterRequest, RosterRow,
};
use super::response::{check_response, network_error};
use crate::domain::{AttendanceEntry, DomainError, LessonSession, ObjectiveNode};
use crate::ports::{RosterRecord, SchoolApi};
use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;

const ROSTER_PATH: &str = "/teacher/attendance";
const ATTENDANCE_ADD_PATH: &str = "/teacher/attendanceadd";
const GAIN_CATALOG_PATH: &str = "/schedule/gain/new/get";
const GAIN_ADD_PATH: &str = "/schedule/gainadd";

pub struct HttpSchoolApi {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpSchoolApi {
    /// # Arguments
    /// * `base_url` - API root (e.g. "https://okul.example.com/api")
    /// * `token` - Bearer token of the signed-in teacher, if the backend requires one
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn post<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<reqwest::Response, DomainError> {
        let mut req = self.client.post(self.url(path)).json(body);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        debug!(path, "POST");
        let resp = req.send().await.map_err(network_error)?;
        check_response(resp).await
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, DomainError> {
        let resp = self.post(path, body).await?;
        resp.json::<T>()
            .await
            .map_err(|e| DomainError::Decode(format!("{}: {}", path, e)))
    }
}

#[async_trait::async_trait]
impl SchoolApi for HttpSchoolApi {
    async fn fetch_roster(
        &self,
        session: &LessonSession,
    ) -> Result<Vec<RosterRecord>, DomainError> {
        let rows: Vec<RosterRow> = self
            .post_json(ROSTER_PATH, &RosterRequest::new(session))
            .await?;
        rows.into_iter().map(RosterRow::into_record).collect()
    }

    async fn submit_attendance(
        &self,
        session: &LessonSession,
        entry: &AttendanceEntry,
    ) -> Result<(), DomainError> {
        let body = AttendanceAddRequest::new(session, entry.student_id, entry.status);
        self.post(ATTENDANCE_ADD_PATH, &body).await?;
        Ok(())
    }

    async fn fetch_objectives(
        &self,
        subject: &str,
        class_id: &str,
    ) -> Result<Vec<ObjectiveNode>, DomainError> {
        let body = GainCatalogRequest { subject, class_id };
        let nodes: Vec<GainNode> = self.post_json(GAIN_CATALOG_PATH, &body).await?;
        Ok(nodes.into_iter().map(ObjectiveNode::from).collect())
    }

    async fn save_objectives(
        &self,
        session: &LessonSession,
        objectives: &str,
    ) -> Result<(), DomainError> {
        let body = GainAddRequest {
            class_id: &session.class_id,
            kazanim: objectives,
            program_id: &session.program_id,
        };
        self.post(GAIN_ADD_PATH, &body).await?;
        Ok(())
    }
}
