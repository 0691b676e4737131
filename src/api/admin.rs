//! Admin dashboard endpoints: repair cases, knowledge files, system health.

use super::{ApiClient, ApiError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CaseRecord {
    pub page_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Deserialize)]
struct CaseEnvelope {
    success: Option<bool>,
    #[serde(default)]
    cases: Vec<CaseRecord>,
    error: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FileRecord {
    pub name: String,
    #[serde(default)]
    pub size: u64,
}

#[derive(Deserialize)]
struct FileListResponse {
    #[serde(default)]
    files: Vec<FileRecord>,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SystemInfo {
    #[serde(default)]
    pub db_status: String,
    #[serde(default)]
    pub doc_count: u64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FactoryRecord {
    pub name: String,
    #[serde(default)]
    pub prefecture: Option<String>,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Deserialize)]
struct FactoryNetworkResponse {
    #[serde(default)]
    factories: Vec<FactoryRecord>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TrendPoint {
    pub label: String,
    #[serde(default)]
    pub count: u64,
}

#[derive(Deserialize)]
struct AnalyticsResponse {
    #[serde(default)]
    trends: Vec<TrendPoint>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BuilderRecord {
    pub name: String,
    #[serde(default)]
    pub prefecture: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

#[derive(Deserialize)]
struct BuilderListResponse {
    #[serde(default)]
    builders: Vec<BuilderRecord>,
}

#[derive(Serialize)]
struct UpdateStatusRequest<'a> {
    page_id: &'a str,
    status: &'a str,
}

#[derive(Serialize)]
struct AddCommentRequest<'a> {
    page_id: &'a str,
    comment: &'a str,
}

impl ApiClient {
    /// Newer backends wrap the list as `{success, cases}`; older ones return
    /// the raw array. Try the envelope first.
    pub async fn list_cases(&self, status: Option<&str>) -> Result<Vec<CaseRecord>, ApiError> {
        let mut query = Vec::new();
        if let Some(status) = status {
            query.push(("status", status.to_string()));
        }
        let body = self.get_checked("/admin/api/cases", &query).await?;

        if let Ok(envelope) = serde_json::from_str::<CaseEnvelope>(&body)
            && let Some(success) = envelope.success
        {
            if !success {
                let message = envelope
                    .error
                    .unwrap_or_else(|| "案件一覧の取得に失敗しました".to_string());
                return Err(ApiError::Backend(message));
            }
            return Ok(envelope.cases);
        }

        Ok(serde_json::from_str::<Vec<CaseRecord>>(&body)?)
    }

    pub async fn update_case_status(&self, page_id: &str, status: &str) -> Result<(), ApiError> {
        let body = self
            .post_checked("/admin/api/update-status", &UpdateStatusRequest { page_id, status })
            .await?;
        super::reject_failure(&body)
    }

    pub async fn add_case_comment(&self, page_id: &str, comment: &str) -> Result<(), ApiError> {
        let body = self
            .post_checked("/admin/api/add-comment", &AddCommentRequest { page_id, comment })
            .await?;
        super::reject_failure(&body)
    }

    /// Flushes and re-ingests the backend knowledge base.
    pub async fn reload_database(&self) -> Result<(), ApiError> {
        let body = self.post_checked("/reload_data", &serde_json::json!({})).await?;
        super::reject_failure(&body)
    }

    /// Knowledge files currently loaded into the backend. Degrades to an
    /// empty list when the backend is down; the panel shows its empty state.
    pub async fn list_files(&self) -> Vec<FileRecord> {
        match self.fetch_files().await {
            Ok(files) => files,
            Err(err) => {
                tracing::warn!("file list fetch failed: {err}");
                Vec::new()
            }
        }
    }

    async fn fetch_files(&self) -> Result<Vec<FileRecord>, ApiError> {
        let body = self.get_checked("/api/admin/files", &[]).await?;
        let parsed: FileListResponse = serde_json::from_str(&body)?;
        Ok(parsed.files)
    }

    pub async fn system_info(&self) -> SystemInfo {
        match self.fetch_system_info().await {
            Ok(info) => info,
            Err(err) => {
                tracing::warn!("system info fetch failed: {err}");
                SystemInfo::default()
            }
        }
    }

    async fn fetch_system_info(&self) -> Result<SystemInfo, ApiError> {
        let body = self.get_checked("/api/admin/system-info", &[]).await?;
        Ok(serde_json::from_str(&body)?)
    }

    pub async fn factory_network(&self) -> Vec<FactoryRecord> {
        match self.fetch_factory_network().await {
            Ok(factories) => factories,
            Err(err) => {
                tracing::warn!("factory network fetch failed: {err}");
                Vec::new()
            }
        }
    }

    async fn fetch_factory_network(&self) -> Result<Vec<FactoryRecord>, ApiError> {
        let body = self.get_checked("/api/admin/factory-network", &[]).await?;
        let parsed: FactoryNetworkResponse = serde_json::from_str(&body)?;
        Ok(parsed.factories)
    }

    pub async fn analytics(&self) -> Vec<TrendPoint> {
        match self.fetch_analytics().await {
            Ok(trends) => trends,
            Err(err) => {
                tracing::warn!("analytics fetch failed: {err}");
                Vec::new()
            }
        }
    }

    async fn fetch_analytics(&self) -> Result<Vec<TrendPoint>, ApiError> {
        let body = self.get_checked("/api/admin/analytics", &[]).await?;
        let parsed: AnalyticsResponse = serde_json::from_str(&body)?;
        Ok(parsed.trends)
    }

    pub async fn list_builders(&self) -> Result<Vec<BuilderRecord>, ApiError> {
        let body = self.get_checked("/api/v1/builders", &[]).await?;
        let parsed: BuilderListResponse = serde_json::from_str(&body)?;
        Ok(parsed.builders)
    }
}
