use serde::{Deserialize, Serialize};

/// Conversion factor between major currency units (naira, what guests see
/// and type) and minor units (kobo, what the gift service speaks).
///
/// Every amount crossing the API boundary is an integer in minor units;
/// every amount shown to or entered by a guest is in major units. The
/// conversion is applied at each boundary crossing, in both directions.
pub const MINOR_UNITS_PER_MAJOR: i64 = 100;

/// Major units → minor units (naira → kobo).
pub fn to_minor_units(major: i64) -> i64 {
    major * MINOR_UNITS_PER_MAJOR
}

/// Minor units → major units (kobo → naira).
pub fn to_major_units(minor: i64) -> i64 {
    minor / MINOR_UNITS_PER_MAJOR
}

/// Format a major-unit amount for display, e.g. `₦25,000`.
pub fn format_major(major: i64) -> String {
    let digits = major.abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    if major < 0 {
        format!("-₦{}", grouped)
    } else {
        format!("₦{}", grouped)
    }
}

/// Format a minor-unit amount for display.
pub fn format_minor(minor: i64) -> String {
    format_major(to_major_units(minor))
}

/// Generic response envelope used by every gift-service endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: serde::de::Deserialize<'de>"))]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default)]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    /// Unwrap a successful envelope into its payload, or the server's
    /// message (falling back to `fallback`) on failure.
    pub fn into_data(self, fallback: &str) -> Result<T, String> {
        if self.success {
            self.data
                .ok_or_else(|| self.message.unwrap_or_else(|| fallback.to_string()))
        } else {
            Err(self.message.unwrap_or_else(|| fallback.to_string()))
        }
    }
}

/// Whether a gift is funded by many guests or claimed by a single one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GiftType {
    #[serde(rename = "CONTRIBUTORY")]
    Contributory,
    #[serde(rename = "REGULAR")]
    Regular,
}

/// A named claim on a gift, recorded by the gift service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Selection {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub representing: Option<String>,
    /// Minor currency units.
    #[serde(default)]
    pub amount: i64,
    /// RFC 3339 timestamp.
    pub created_at: String,
}

/// A named funder of a contributory gift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contributor {
    pub id: String,
    pub name: String,
    /// Minor currency units.
    pub amount: i64,
    /// RFC 3339 timestamp.
    pub created_at: String,
}

impl Contributor {
    /// Human-readable contribution date, e.g. "Dec 14, 2023".
    pub fn contributed_on(&self) -> Option<String> {
        chrono::DateTime::parse_from_rfc3339(&self.created_at)
            .ok()
            .map(|d| d.format("%b %-d, %Y").to_string())
    }
}

/// One registry entry as served by `GET /gifts`.
///
/// Invariants once reconciled with the server: `raised_amount <= amount`,
/// and `is_completed` exactly when `raised_amount >= amount`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GiftItem {
    pub id: String,
    pub title: String,
    pub description: String,
    /// Funding goal, minor currency units.
    pub amount: i64,
    pub image_url: String,
    #[serde(rename = "type")]
    pub gift_type: GiftType,
    /// Cumulative contributions, minor currency units.
    pub raised_amount: i64,
    /// Per-guest ceiling, minor units; unlimited when absent.
    #[serde(default)]
    pub max_per_guest: Option<i64>,
    /// Per-guest floor, minor units.
    #[serde(default)]
    pub min_per_guest: Option<i64>,
    pub is_taken: bool,
    pub is_completed: bool,
    pub created_at: String,
    /// Derived funding percentage, clamped to 0–100.
    pub progress: f64,
    #[serde(default)]
    pub selections: Vec<Selection>,
    #[serde(default)]
    pub contributors: Vec<Contributor>,
}

impl GiftItem {
    /// Capacity left before the goal is met, floored at zero. Minor units.
    pub fn remaining_amount(&self) -> i64 {
        (self.amount - self.raised_amount).max(0)
    }

    /// Fold a confirmed contribution into this entry: bumps the raised
    /// total, re-derives `progress` (clamped at 100) and `is_completed`.
    ///
    /// Provisional: a follow-up catalog refresh supersedes it with
    /// server-authoritative numbers. Calling it twice for the same
    /// contribution double-counts; callers apply each contribution once.
    pub fn apply_contribution(&mut self, amount_minor: i64) {
        self.raised_amount += amount_minor;
        self.progress = if self.amount > 0 {
            (self.raised_amount as f64 / self.amount as f64 * 100.0).min(100.0)
        } else {
            100.0
        };
        self.is_completed = self.raised_amount >= self.amount;
    }
}

/// Body of `POST /gifts/{id}/contribute`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributeRequest {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub representing: String,
    /// Minor currency units.
    pub amount: i64,
}

/// Payload returned by a successful contribution creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributeReceipt {
    /// Transaction number issued by the server; doubles as the payment
    /// reference.
    pub transaction_no: String,
    /// Minor currency units.
    pub amount: i64,
    /// Title of the gift being funded.
    pub gift: String,
}

/// Body of `POST /gifts/confirm`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmRequest {
    pub transaction_no: String,
}

/// Which side of the aisle a contributor stands with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Representing {
    #[serde(rename = "Bride's Family")]
    BrideFamily,
    #[serde(rename = "Groom's Family")]
    GroomFamily,
    #[serde(rename = "Both")]
    Both,
}

impl Representing {
    pub const ALL: [Representing; 3] = [
        Representing::BrideFamily,
        Representing::GroomFamily,
        Representing::Both,
    ];

    /// The wire value, which is also the display label.
    pub fn label(&self) -> &'static str {
        match self {
            Representing::BrideFamily => "Bride's Family",
            Representing::GroomFamily => "Groom's Family",
            Representing::Both => "Both",
        }
    }

    pub fn from_label(label: &str) -> Option<Representing> {
        Representing::ALL.into_iter().find(|r| r.label() == label)
    }
}

/// Body of `POST /guests`, the RSVP form.
///
/// `representing` and `extra` are free-form strings on the wire
/// ("bride" | "groom" | "both" | "friend", and "0" | "1").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveSeatRequest {
    pub name: String,
    pub phone: String,
    pub representing: String,
    pub extra: String,
}

/// Guest record returned by `POST /guests` and `GET /guests/code/{code}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guest {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub representing: Option<String>,
    #[serde(default)]
    pub invitation_code: String,
}

/// Body of `POST /guests/generate-access-card`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessCardRequest {
    pub invitation_code: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unit_conversion_round_trips() {
        for major in [0i64, 1, 5_000, 50_000, 1_234_567] {
            assert_eq!(to_major_units(to_minor_units(major)), major);
        }
        assert_eq!(to_minor_units(5_000), 500_000);
        assert_eq!(to_major_units(500_000), 5_000);
    }

    #[test]
    fn test_format_major_groups_thousands() {
        assert_eq!(format_major(0), "₦0");
        assert_eq!(format_major(999), "₦999");
        assert_eq!(format_major(5_000), "₦5,000");
        assert_eq!(format_major(1_234_567), "₦1,234,567");
        assert_eq!(format_minor(500_000), "₦5,000");
    }

    fn sample_gift() -> GiftItem {
        GiftItem {
            id: "gift-1".to_string(),
            title: "Honeymoon Fund".to_string(),
            description: "Help us get away".to_string(),
            amount: 1_000_000,
            image_url: "/images/honeymoon.jpg".to_string(),
            gift_type: GiftType::Contributory,
            raised_amount: 0,
            max_per_guest: None,
            min_per_guest: Some(500_000),
            is_taken: false,
            is_completed: false,
            created_at: "2026-01-01T00:00:00Z".to_string(),
            progress: 0.0,
            selections: Vec::new(),
            contributors: Vec::new(),
        }
    }

    #[test]
    fn test_apply_contribution_updates_progress() {
        let mut gift = sample_gift();
        gift.apply_contribution(500_000);
        assert_eq!(gift.raised_amount, 500_000);
        assert_eq!(gift.progress, 50.0);
        assert!(!gift.is_completed);

        gift.apply_contribution(500_000);
        assert_eq!(gift.raised_amount, 1_000_000);
        assert_eq!(gift.progress, 100.0);
        assert!(gift.is_completed);
    }

    #[test]
    fn test_apply_contribution_clamps_progress() {
        let mut gift = sample_gift();
        gift.apply_contribution(1_500_000);
        assert_eq!(gift.progress, 100.0);
        assert!(gift.is_completed);
        assert_eq!(gift.remaining_amount(), 0);
    }

    #[test]
    fn test_gift_item_wire_shape() {
        let gift: GiftItem = serde_json::from_value(json!({
            "id": "g1",
            "title": "Espresso Machine",
            "description": "For slow mornings",
            "amount": 2_500_000,
            "imageUrl": "https://cdn.example.com/espresso.jpg",
            "type": "CONTRIBUTORY",
            "raisedAmount": 750_000,
            "maxPerGuest": 1_000_000,
            "minPerGuest": 100_000,
            "isTaken": false,
            "isCompleted": false,
            "createdAt": "2026-02-14T12:00:00Z",
            "progress": 30.0,
            "selections": [],
            "contributors": [{
                "id": "c1",
                "name": "Ada",
                "amount": 750_000,
                "createdAt": "2026-03-01T09:30:00Z"
            }]
        }))
        .unwrap();

        assert_eq!(gift.gift_type, GiftType::Contributory);
        assert_eq!(gift.raised_amount, 750_000);
        assert_eq!(gift.max_per_guest, Some(1_000_000));
        assert_eq!(gift.remaining_amount(), 1_750_000);
        assert_eq!(
            gift.contributors[0].contributed_on().as_deref(),
            Some("Mar 1, 2026")
        );
    }

    #[test]
    fn test_envelope_unwraps_success_and_failure() {
        let ok: ApiEnvelope<ContributeReceipt> = serde_json::from_value(json!({
            "success": true,
            "message": "Contribution created",
            "data": { "transactionNo": "TX-123", "amount": 500_000, "gift": "Honeymoon Fund" }
        }))
        .unwrap();
        let receipt = ok.into_data("fallback").unwrap();
        assert_eq!(receipt.transaction_no, "TX-123");

        let failed: ApiEnvelope<ContributeReceipt> = serde_json::from_value(json!({
            "success": false,
            "message": "Gift already fully funded"
        }))
        .unwrap();
        assert_eq!(
            failed.into_data("fallback").unwrap_err(),
            "Gift already fully funded"
        );

        let empty: ApiEnvelope<ContributeReceipt> =
            serde_json::from_value(json!({ "success": false })).unwrap();
        assert_eq!(empty.into_data("fallback").unwrap_err(), "fallback");
    }

    #[test]
    fn test_representing_labels_round_trip() {
        for r in Representing::ALL {
            assert_eq!(Representing::from_label(r.label()), Some(r));
            let wire = serde_json::to_value(r).unwrap();
            assert_eq!(wire, json!(r.label()));
        }
        assert_eq!(Representing::from_label("Caterer"), None);
    }

    #[test]
    fn test_contribute_request_serializes_camel_case() {
        let body = serde_json::to_value(ContributeRequest {
            name: "Ada".to_string(),
            phone: "08123456789".to_string(),
            email: "ada@example.com".to_string(),
            representing: "Both".to_string(),
            amount: 500_000,
        })
        .unwrap();
        assert_eq!(
            body,
            json!({
                "name": "Ada",
                "phone": "08123456789",
                "email": "ada@example.com",
                "representing": "Both",
                "amount": 500_000
            })
        );
    }
}
