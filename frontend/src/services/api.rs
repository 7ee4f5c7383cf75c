use anyhow::{anyhow, Context, Result};
use gloo::net::http::{Request, Response};
use serde::de::DeserializeOwned;
use shared::{
    AccessCardRequest, ApiEnvelope, ContributeReceipt, ContributeRequest, Guest, GiftItem,
    SaveSeatRequest,
};

/// Default gift-service endpoint; override at build time or with
/// [`ApiClient::with_base_url`].
const DEFAULT_BASE_URL: &str = match option_env!("GIFT_API_BASE_URL") {
    Some(url) => url,
    None => "http://localhost:3000/api",
};

const DEFAULT_CARD_FILENAME: &str = "invitation.png";

/// A generated invitation card: PNG bytes plus the server-suggested
/// download filename.
#[derive(Debug, Clone, PartialEq)]
pub struct AccessCard {
    pub bytes: Vec<u8>,
    pub filename: String,
}

/// API client for the remote gift service.
#[derive(Clone, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Create a new API client with the default base URL.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Create a new API client with a custom base URL.
    pub fn with_base_url(base_url: String) -> Self {
        Self { base_url }
    }

    /// Fetch the full gift list.
    pub async fn fetch_gifts(&self) -> Result<Vec<GiftItem>> {
        let response = Request::get(&format!("{}/gifts", self.base_url))
            .send()
            .await
            .context("failed to reach the gift service")?;
        unwrap_envelope(response, "Failed to fetch gifts").await
    }

    /// Create a contribution; the receipt carries the transaction number
    /// used as the payment reference.
    pub async fn contribute(
        &self,
        gift_id: &str,
        request: &ContributeRequest,
    ) -> Result<ContributeReceipt> {
        let response = Request::post(&format!("{}/gifts/{}/contribute", self.base_url, gift_id))
            .json(request)
            .context("failed to serialize contribution")?
            .send()
            .await
            .context("failed to reach the gift service")?;
        unwrap_envelope(response, "Failed to create contribution").await
    }

    /// Confirm a completed payment by transaction number.
    pub async fn confirm(&self, transaction_no: &str) -> Result<()> {
        let body = shared::ConfirmRequest {
            transaction_no: transaction_no.to_string(),
        };
        let response = Request::post(&format!("{}/gifts/confirm", self.base_url))
            .json(&body)
            .context("failed to serialize confirmation")?
            .send()
            .await
            .context("failed to reach the gift service")?;

        // confirm replies with an envelope that may carry no payload
        let envelope: ApiEnvelope<serde_json::Value> = response
            .json()
            .await
            .context("failed to parse confirmation response")?;
        if envelope.success {
            Ok(())
        } else {
            Err(anyhow!(envelope
                .message
                .unwrap_or_else(|| "Failed to confirm payment".to_string())))
        }
    }

    /// RSVP: register a guest and receive their invitation code.
    pub async fn save_seat(&self, request: &SaveSeatRequest) -> Result<Guest> {
        let response = Request::post(&format!("{}/guests", self.base_url))
            .json(request)
            .context("failed to serialize RSVP")?
            .send()
            .await
            .context("failed to reach the gift service")?;
        unwrap_envelope(response, "Failed to save your seat").await
    }

    /// Look up a guest by invitation code.
    pub async fn guest_by_code(&self, code: &str) -> Result<Guest> {
        let response = Request::get(&format!("{}/guests/code/{}", self.base_url, code))
            .send()
            .await
            .context("failed to reach the gift service")?;
        unwrap_envelope(response, "Guest not found").await
    }

    /// Generate the invitation card image for a code. Returns raw PNG
    /// bytes; the filename comes from the `Content-Disposition` header.
    pub async fn generate_access_card(&self, code: &str) -> Result<AccessCard> {
        let body = AccessCardRequest {
            invitation_code: code.to_string(),
        };
        let response = Request::post(&format!("{}/guests/generate-access-card", self.base_url))
            .json(&body)
            .context("failed to serialize card request")?
            .send()
            .await
            .context("failed to reach the gift service")?;

        if !response.ok() {
            let status = response.status();
            let message = response
                .json::<ApiEnvelope<serde_json::Value>>()
                .await
                .ok()
                .and_then(|envelope| envelope.message)
                .unwrap_or_else(|| format!("Failed to generate invitation (status {status})"));
            return Err(anyhow!(message));
        }

        let filename = response
            .headers()
            .get("Content-Disposition")
            .and_then(|value| filename_from_disposition(&value))
            .unwrap_or_else(|| DEFAULT_CARD_FILENAME.to_string());
        let bytes = response
            .binary()
            .await
            .context("failed to read invitation card image")?;
        Ok(AccessCard { bytes, filename })
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Unwrap a `{ success, data, message }` envelope, surfacing the server's
/// message (or `fallback`) on any failure path.
async fn unwrap_envelope<T: DeserializeOwned>(response: Response, fallback: &str) -> Result<T> {
    if response.ok() {
        let envelope: ApiEnvelope<T> = response
            .json()
            .await
            .context("failed to parse gift service response")?;
        envelope.into_data(fallback).map_err(|message| anyhow!(message))
    } else {
        let status = response.status();
        let message = response
            .json::<ApiEnvelope<serde_json::Value>>()
            .await
            .ok()
            .and_then(|envelope| envelope.message)
            .unwrap_or_else(|| format!("{fallback} (status {status})"));
        Err(anyhow!(message))
    }
}

/// Pull a download filename out of a `Content-Disposition` header.
fn filename_from_disposition(header: &str) -> Option<String> {
    header.split(';').find_map(|part| {
        let part = part.trim();
        let value = part
            .strip_prefix("filename*=")
            .or_else(|| part.strip_prefix("filename="))?;
        let cleaned = value.trim_matches('"').trim_start_matches("UTF-8''");
        if cleaned.is_empty() {
            None
        } else {
            Some(cleaned.to_string())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_from_disposition_variants() {
        assert_eq!(
            filename_from_disposition("attachment; filename=\"card-ada.png\""),
            Some("card-ada.png".to_string())
        );
        assert_eq!(
            filename_from_disposition("attachment; filename=card.png"),
            Some("card.png".to_string())
        );
        assert_eq!(
            filename_from_disposition("attachment; filename*=UTF-8''card%20ada.png"),
            Some("card%20ada.png".to_string())
        );
        assert_eq!(filename_from_disposition("inline"), None);
        assert_eq!(filename_from_disposition("attachment; filename=\"\""), None);
    }
}
