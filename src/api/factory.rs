//! Factory matching and cost estimation endpoints.

use super::{ApiClient, ApiError};
use serde::{Deserialize, Serialize};

/// The slice of a repair case the matching service scores against.
#[derive(Debug, Clone, Serialize)]
pub struct CaseSummary {
    pub page_id: String,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefecture: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Serialize)]
struct MatchRequest<'a> {
    case: &'a CaseSummary,
    max_results: usize,
}

#[derive(Serialize)]
struct AutoAssignRequest<'a> {
    case: &'a CaseSummary,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct FactoryMatch {
    pub name: String,
    #[serde(default)]
    pub page_id: Option<String>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub prefecture: Option<String>,
    #[serde(default)]
    pub specialties: Vec<String>,
}

#[derive(Deserialize)]
struct MatchResponse {
    success: Option<bool>,
    #[serde(default)]
    matched_factories: Vec<FactoryMatch>,
    error: Option<String>,
}

#[derive(Deserialize)]
struct AutoAssignResponse {
    success: Option<bool>,
    assigned_factory: Option<FactoryMatch>,
    error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CostEstimateRequest {
    pub category: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_type: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct CostLineItem {
    pub label: String,
    #[serde(default)]
    pub amount: u64,
}

#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct CostEstimate {
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub breakdown: Vec<CostLineItem>,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Deserialize)]
struct EstimateResponse {
    success: Option<bool>,
    estimation: Option<CostEstimate>,
    error: Option<String>,
}

impl ApiClient {
    pub async fn match_factories(
        &self,
        case: &CaseSummary,
        max_results: usize,
    ) -> Result<Vec<FactoryMatch>, ApiError> {
        let body = self
            .post_checked("/api/v1/factories/match", &MatchRequest { case, max_results })
            .await?;
        let parsed: MatchResponse = serde_json::from_str(&body)?;
        if parsed.success == Some(false) {
            let message = parsed
                .error
                .unwrap_or_else(|| "工場マッチングに失敗しました".to_string());
            return Err(ApiError::Backend(message));
        }
        Ok(parsed.matched_factories)
    }

    pub async fn auto_assign_case(
        &self,
        case_id: &str,
        case: &CaseSummary,
    ) -> Result<FactoryMatch, ApiError> {
        let path = format!("/api/v1/cases/{case_id}/auto-assign");
        let body = self.post_checked(&path, &AutoAssignRequest { case }).await?;
        let parsed: AutoAssignResponse = serde_json::from_str(&body)?;
        if parsed.success == Some(false) {
            let message = parsed
                .error
                .unwrap_or_else(|| "自動割り当てに失敗しました".to_string());
            return Err(ApiError::Backend(message));
        }
        parsed.assigned_factory.ok_or_else(|| {
            ApiError::Backend("割り当て可能な工場が見つかりませんでした".to_string())
        })
    }

    pub async fn estimate_cost(
        &self,
        request: &CostEstimateRequest,
    ) -> Result<CostEstimate, ApiError> {
        let body = self.post_checked("/api/v1/cost-estimation", request).await?;
        let parsed: EstimateResponse = serde_json::from_str(&body)?;
        if parsed.success == Some(false) {
            let message = parsed
                .error
                .unwrap_or_else(|| "費用の概算に失敗しました".to_string());
            return Err(ApiError::Backend(message));
        }
        parsed
            .estimation
            .ok_or_else(|| ApiError::Backend("概算結果が応答に含まれていません".to_string()))
    }
}
