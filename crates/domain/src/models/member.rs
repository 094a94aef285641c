//! Member record domain models.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Membership status, set once at intake.
///
/// The stored status is never recomputed from the expiry date; view-level
/// live/expired classification is derived independently (see
/// `services::classify`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MemberStatus {
    Live,
    Pending,
    Expired,
}

impl MemberStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MemberStatus::Live => "Live",
            MemberStatus::Pending => "Pending",
            MemberStatus::Expired => "Expired",
        }
    }
}

impl Default for MemberStatus {
    fn default() -> Self {
        MemberStatus::Live
    }
}

impl FromStr for MemberStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Live" => Ok(MemberStatus::Live),
            "Pending" => Ok(MemberStatus::Pending),
            "Expired" => Ok(MemberStatus::Expired),
            _ => Err(format!("Invalid member status: {}", s)),
        }
    }
}

impl fmt::Display for MemberStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One member record, owned by the operator that created it.
///
/// Wire field names follow the stored-data contract (`fullName`,
/// `contactNumber`, ...). Amount fields are decimal strings, as stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberRecord {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub full_name: String,
    pub address: String,
    pub contact_number: String,
    pub email: String,
    pub admission_date: DateTime<Utc>,
    /// `None` when the stored value is absent or unparseable; the
    /// classifier buckets such records as expired.
    #[serde(default, deserialize_with = "lenient_datetime")]
    pub expiry_date: Option<DateTime<Utc>>,
    pub status: MemberStatus,
    pub seat_number: String,
    pub profile_image: Option<String>,
    pub document: Option<String>,
    pub due_amount: String,
    pub total_amount: String,
    pub paid_amount: String,
    pub plan_id: Option<Uuid>,
    /// Denormalized plan display name.
    pub plan: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for a new member record; the store assigns `id` and
/// `createdAt`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewMember {
    pub full_name: String,
    pub address: String,
    pub contact_number: String,
    pub email: String,
    pub admission_date: DateTime<Utc>,
    pub expiry_date: Option<DateTime<Utc>>,
    pub status: MemberStatus,
    pub seat_number: String,
    pub profile_image: Option<String>,
    pub document: Option<String>,
    pub due_amount: String,
    pub total_amount: String,
    pub paid_amount: String,
    pub plan_id: Option<Uuid>,
    pub plan: Option<String>,
}

/// Deserializes an expiry timestamp leniently: RFC3339 strings and
/// millisecond epochs parse, anything else becomes `None` instead of
/// failing the whole record.
fn lenient_datetime<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::String(s) => DateTime::parse_from_rfc3339(&s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        serde_json::Value::Number(n) => n
            .as_i64()
            .and_then(|millis| Utc.timestamp_millis_opt(millis).single()),
        _ => None,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample_json(expiry: &str) -> String {
        format!(
            r#"{{
                "id": "7b7f9fb0-3f43-4e5b-9d3c-3a1f4f4c9b01",
                "ownerId": "1de29113-27a5-4a9f-8a95-15b0a1c4f222",
                "fullName": "Manish Rajoriya",
                "address": "MG Road 12",
                "contactNumber": "8888888",
                "email": "manish@example.com",
                "admissionDate": "2025-01-23T00:00:00Z",
                "expiryDate": {expiry},
                "status": "Live",
                "seatNumber": "12",
                "profileImage": null,
                "document": null,
                "dueAmount": "1400.00",
                "totalAmount": "2000",
                "paidAmount": "600",
                "planId": null,
                "plan": "g1 monthly",
                "createdAt": "2025-01-23T10:00:00Z"
            }}"#,
            expiry = expiry
        )
    }

    #[test]
    fn test_status_roundtrip() {
        for status in [MemberStatus::Live, MemberStatus::Pending, MemberStatus::Expired] {
            assert_eq!(MemberStatus::from_str(status.as_str()).unwrap(), status);
        }
        assert!(MemberStatus::from_str("Active").is_err());
    }

    #[test]
    fn test_member_record_uses_wire_field_names() {
        let record = MemberRecord {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            full_name: "Test Member".to_string(),
            address: "Somewhere".to_string(),
            contact_number: "9999999".to_string(),
            email: "t@example.com".to_string(),
            admission_date: Utc::now(),
            expiry_date: Some(Utc::now()),
            status: MemberStatus::Live,
            seat_number: "1".to_string(),
            profile_image: None,
            document: None,
            due_amount: "0.00".to_string(),
            total_amount: "1000".to_string(),
            paid_amount: "1000".to_string(),
            plan_id: None,
            plan: None,
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&record).unwrap();
        for field in [
            "fullName",
            "contactNumber",
            "admissionDate",
            "expiryDate",
            "seatNumber",
            "dueAmount",
            "totalAmount",
            "paidAmount",
            "planId",
            "ownerId",
            "createdAt",
        ] {
            assert!(json.contains(field), "missing wire field {}", field);
        }
    }

    #[test]
    fn test_expiry_parses_rfc3339() {
        let record: MemberRecord =
            serde_json::from_str(&sample_json("\"2025-02-22T00:00:00Z\"")).unwrap();
        assert_eq!(
            record.expiry_date,
            Some(Utc.with_ymd_and_hms(2025, 2, 22, 0, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_malformed_expiry_becomes_none() {
        let record: MemberRecord =
            serde_json::from_str(&sample_json("\"not-a-date\"")).unwrap();
        assert_eq!(record.expiry_date, None);

        let record: MemberRecord = serde_json::from_str(&sample_json("null")).unwrap();
        assert_eq!(record.expiry_date, None);
    }

    #[test]
    fn test_epoch_millis_expiry_parses() {
        let record: MemberRecord =
            serde_json::from_str(&sample_json("1740182400000")).unwrap();
        assert!(record.expiry_date.is_some());
    }
}
