//! Partner shop directory and deal (inquiry) endpoints.

use super::{ApiClient, ApiError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PartnerShop {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub prefecture: Option<String>,
    #[serde(default)]
    pub specialties: Vec<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

#[derive(Deserialize)]
struct ShopListResponse {
    #[serde(default)]
    shops: Vec<PartnerShop>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ShopFilter<'a> {
    pub status: Option<&'a str>,
    pub prefecture: Option<&'a str>,
    pub specialty: Option<&'a str>,
}

/// Inquiry form submitted from the landing page; the backend opens a deal
/// from it.
#[derive(Debug, Clone, Default, Serialize)]
pub struct InquiryForm {
    pub customer_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vehicle_model: Option<String>,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partner_page_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DealRecord {
    pub id: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub partner_page_id: Option<String>,
    #[serde(default)]
    pub deal_amount: Option<u64>,
    #[serde(default)]
    pub commission_rate: Option<f64>,
}

#[derive(Deserialize)]
struct DealEnvelope {
    success: Option<bool>,
    deal: Option<DealRecord>,
    error: Option<String>,
    message: Option<String>,
}

#[derive(Deserialize)]
struct DealListResponse {
    #[serde(default)]
    deals: Vec<DealRecord>,
}

#[derive(Serialize)]
struct DealStatusRequest<'a> {
    status: &'a str,
}

#[derive(Serialize)]
struct DealAmountRequest {
    deal_amount: u64,
    commission_rate: f64,
}

fn unwrap_deal(body: &str) -> Result<DealRecord, ApiError> {
    let envelope: DealEnvelope = serde_json::from_str(body)?;
    if envelope.success == Some(false) {
        let message = envelope
            .error
            .or(envelope.message)
            .unwrap_or_else(|| "取引処理に失敗しました".to_string());
        return Err(ApiError::Backend(message));
    }
    envelope
        .deal
        .ok_or_else(|| ApiError::Backend("取引データが応答に含まれていません".to_string()))
}

impl ApiClient {
    /// A refused connection here gets the distinguished "backend
    /// unreachable" error before rethrowing, so the shop directory can show
    /// a specific notice instead of a raw transport error.
    pub async fn list_partner_shops(
        &self,
        filter: ShopFilter<'_>,
    ) -> Result<Vec<PartnerShop>, ApiError> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(status) = filter.status {
            query.push(("status", status.to_string()));
        }
        if let Some(prefecture) = filter.prefecture {
            query.push(("prefecture", prefecture.to_string()));
        }
        if let Some(specialty) = filter.specialty {
            query.push(("specialty", specialty.to_string()));
        }

        let response = self
            .http
            .get(self.url("/api/v1/partner-shops"))
            .query(&query)
            .send()
            .await
            .map_err(|err| {
                if err.is_connect() {
                    ApiError::Unreachable
                } else {
                    ApiError::from(err)
                }
            })?;
        let body = Self::require_success(response).await?;
        let parsed: ShopListResponse = serde_json::from_str(&body)?;
        Ok(parsed.shops)
    }

    pub async fn get_partner_shop(&self, id: &str) -> Result<PartnerShop, ApiError> {
        let path = format!("/api/v1/partner-shops/{id}");
        let body = self.get_checked(&path, &[]).await?;
        Ok(serde_json::from_str(&body)?)
    }

    pub async fn submit_inquiry(&self, form: &InquiryForm) -> Result<DealRecord, ApiError> {
        let body = self.post_checked("/api/v1/deals", form).await?;
        unwrap_deal(&body)
    }

    pub async fn list_deals(
        &self,
        status: Option<&str>,
        partner_page_id: Option<&str>,
    ) -> Result<Vec<DealRecord>, ApiError> {
        let mut query: Vec<(&str, String)> = Vec::new();
        if let Some(status) = status {
            query.push(("status", status.to_string()));
        }
        if let Some(partner_page_id) = partner_page_id {
            query.push(("partner_page_id", partner_page_id.to_string()));
        }
        let body = self.get_checked("/api/v1/deals", &query).await?;
        let parsed: DealListResponse = serde_json::from_str(&body)?;
        Ok(parsed.deals)
    }

    pub async fn update_deal_status(
        &self,
        id: &str,
        status: &str,
    ) -> Result<DealRecord, ApiError> {
        let path = format!("/api/v1/deals/{id}/status");
        let body = self.patch_checked(&path, &DealStatusRequest { status }).await?;
        unwrap_deal(&body)
    }

    pub async fn update_deal_amount(
        &self,
        id: &str,
        deal_amount: u64,
        commission_rate: f64,
    ) -> Result<DealRecord, ApiError> {
        let path = format!("/api/v1/deals/{id}/amount");
        let body = self
            .patch_checked(&path, &DealAmountRequest { deal_amount, commission_rate })
            .await?;
        unwrap_deal(&body)
    }
}
