//! Billing webhook authentication and event decoding.
//!
//! The billing provider signs each delivery with HMAC-SHA256 over
//! `"{timestamp}.{raw body}"` and sends the result in a header of the form
//! `t=<unix seconds>,v1=<hex>[,v1=<hex>...]`. Verification must run on the
//! raw bytes, before any JSON parsing.

use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;

use crate::error::CoreError;
use crate::status::SubscriptionStatus;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Header carrying the provider's signature.
pub const SIGNATURE_HEADER: &str = "stripe-signature";

/// Default maximum age of a signed delivery, in seconds.
pub const DEFAULT_TOLERANCE_SECS: i64 = 300;

/// Signature scheme accepted in the header.
const EXPECTED_SCHEME: &str = "v1";

pub const EVENT_CHECKOUT_COMPLETED: &str = "checkout.session.completed";
pub const EVENT_SUBSCRIPTION_UPDATED: &str = "customer.subscription.updated";
pub const EVENT_SUBSCRIPTION_DELETED: &str = "customer.subscription.deleted";

/// Provider subscription statuses that grant access.
pub const ACTIVE_PROVIDER_STATUSES: &[&str] = &["active", "trialing"];

// ---------------------------------------------------------------------------
// Signature verification
// ---------------------------------------------------------------------------

type HmacSha256 = Hmac<Sha256>;

/// A parsed signature header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignatureHeader {
    pub timestamp: i64,
    pub signatures: Vec<Vec<u8>>,
}

impl SignatureHeader {
    /// Parse `t=...,v1=...` pairs. Entries for other schemes and entries
    /// that are not valid hex are skipped.
    pub fn parse(header: &str) -> Result<Self, CoreError> {
        let mut timestamp = None;
        let mut signatures = Vec::new();

        for pair in header.split(',') {
            let Some((key, value)) = pair.trim().split_once('=') else {
                continue;
            };
            match key {
                "t" => {
                    timestamp = Some(value.parse::<i64>().map_err(|_| {
                        CoreError::SignatureInvalid("Unable to parse timestamp".into())
                    })?);
                }
                EXPECTED_SCHEME => {
                    if let Ok(bytes) = hex::decode(value) {
                        signatures.push(bytes);
                    }
                }
                _ => {}
            }
        }

        let timestamp = timestamp.ok_or_else(|| {
            CoreError::SignatureInvalid("Missing timestamp in signature header".into())
        })?;
        if signatures.is_empty() {
            return Err(CoreError::SignatureInvalid(
                "No signatures found with expected scheme".into(),
            ));
        }

        Ok(Self {
            timestamp,
            signatures,
        })
    }
}

fn signing_mac(secret: &str, timestamp: i64, payload: &[u8]) -> Result<HmacSha256, CoreError> {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .map_err(|e| CoreError::Internal(format!("HMAC key rejected: {e}")))?;
    mac.update(timestamp.to_string().as_bytes());
    mac.update(b".");
    mac.update(payload);
    Ok(mac)
}

/// Compute the hex-encoded `v1` signature for a payload.
pub fn compute_signature(secret: &str, timestamp: i64, payload: &[u8]) -> Result<String, CoreError> {
    let mac = signing_mac(secret, timestamp, payload)?;
    Ok(hex::encode(mac.finalize().into_bytes()))
}

/// Build a complete signature header value for a payload.
pub fn signature_header(secret: &str, timestamp: i64, payload: &[u8]) -> Result<String, CoreError> {
    let signature = compute_signature(secret, timestamp, payload)?;
    Ok(format!("t={timestamp},{EXPECTED_SCHEME}={signature}"))
}

/// Authenticate a raw payload against its signature header.
///
/// Any `v1` entry may match; comparison is constant-time. Deliveries whose
/// timestamp is more than `tolerance_secs` older than `now` are rejected.
/// A `tolerance_secs` of zero disables the age check.
pub fn verify_signature(
    payload: &[u8],
    header: &str,
    secret: &str,
    now: i64,
    tolerance_secs: i64,
) -> Result<(), CoreError> {
    let parsed = SignatureHeader::parse(header)?;
    let mac = signing_mac(secret, parsed.timestamp, payload)?;

    let matched = parsed
        .signatures
        .iter()
        .any(|sig| mac.clone().verify_slice(sig).is_ok());
    if !matched {
        return Err(CoreError::SignatureInvalid(
            "No signature matches the expected signature for the payload".into(),
        ));
    }

    if tolerance_secs > 0 && parsed.timestamp < now - tolerance_secs {
        return Err(CoreError::SignatureInvalid(
            "Timestamp outside the tolerance zone".into(),
        ));
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Event decoding
// ---------------------------------------------------------------------------

/// A billing event reduced to what the reconciler acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BillingEvent {
    /// Checkout finished. `identity` is the profile id round-tripped through
    /// the provider; it may be absent.
    CheckoutCompleted {
        identity: Option<String>,
        customer_id: Option<String>,
    },
    /// Subscription status changed on the provider side.
    SubscriptionUpdated {
        customer_id: String,
        provider_status: String,
        status: SubscriptionStatus,
    },
    /// Subscription ended.
    SubscriptionDeleted { customer_id: String },
    /// Any event type the reconciler does not act on.
    Ignored,
}

/// A decoded event plus the provider's envelope metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillingEventEnvelope {
    pub id: String,
    pub event_type: String,
    pub event: BillingEvent,
}

#[derive(Deserialize)]
struct RawEnvelope {
    id: String,
    #[serde(rename = "type")]
    event_type: String,
    data: RawData,
}

#[derive(Deserialize)]
struct RawData {
    object: serde_json::Value,
}

/// The provider sends `customer` either as an id or as an expanded object.
#[derive(Deserialize)]
#[serde(untagged)]
enum CustomerRef {
    Id(String),
    Expanded { id: String },
}

impl CustomerRef {
    fn into_id(self) -> String {
        match self {
            CustomerRef::Id(id) | CustomerRef::Expanded { id } => id,
        }
    }
}

#[derive(Deserialize)]
struct RawCheckoutSession {
    client_reference_id: Option<String>,
    customer: Option<CustomerRef>,
}

#[derive(Deserialize)]
struct RawSubscription {
    customer: CustomerRef,
    #[serde(default)]
    status: String,
}

/// Map a provider subscription status to the local access flag.
pub fn map_provider_status(provider_status: &str) -> SubscriptionStatus {
    if ACTIVE_PROVIDER_STATUSES.contains(&provider_status) {
        SubscriptionStatus::Active
    } else {
        SubscriptionStatus::Inactive
    }
}

fn malformed(event_type: &str, err: serde_json::Error) -> CoreError {
    CoreError::Validation(format!("Malformed {event_type} payload: {err}"))
}

/// Decode an already-authenticated payload.
pub fn parse_event(payload: &[u8]) -> Result<BillingEventEnvelope, CoreError> {
    let raw: RawEnvelope = serde_json::from_slice(payload)
        .map_err(|e| CoreError::Validation(format!("Malformed billing event: {e}")))?;

    let event = match raw.event_type.as_str() {
        EVENT_CHECKOUT_COMPLETED => {
            let session: RawCheckoutSession = serde_json::from_value(raw.data.object)
                .map_err(|e| malformed(EVENT_CHECKOUT_COMPLETED, e))?;
            BillingEvent::CheckoutCompleted {
                identity: session.client_reference_id.filter(|id| !id.trim().is_empty()),
                customer_id: session.customer.map(CustomerRef::into_id),
            }
        }
        EVENT_SUBSCRIPTION_UPDATED => {
            let sub: RawSubscription = serde_json::from_value(raw.data.object)
                .map_err(|e| malformed(EVENT_SUBSCRIPTION_UPDATED, e))?;
            let status = map_provider_status(&sub.status);
            BillingEvent::SubscriptionUpdated {
                customer_id: sub.customer.into_id(),
                provider_status: sub.status,
                status,
            }
        }
        EVENT_SUBSCRIPTION_DELETED => {
            let sub: RawSubscription = serde_json::from_value(raw.data.object)
                .map_err(|e| malformed(EVENT_SUBSCRIPTION_DELETED, e))?;
            BillingEvent::SubscriptionDeleted {
                customer_id: sub.customer.into_id(),
            }
        }
        _ => BillingEvent::Ignored,
    };

    Ok(BillingEventEnvelope {
        id: raw.id,
        event_type: raw.event_type,
        event,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "whsec_test_secret";
    const NOW: i64 = 1_700_000_000;

    fn signed(payload: &[u8], timestamp: i64) -> String {
        signature_header(SECRET, timestamp, payload).unwrap()
    }

    #[test]
    fn valid_signature_verifies() {
        let payload = br#"{"id":"evt_1"}"#;
        let header = signed(payload, NOW);
        assert!(verify_signature(payload, &header, SECRET, NOW, DEFAULT_TOLERANCE_SECS).is_ok());
    }

    #[test]
    fn tampered_payload_fails() {
        let header = signed(br#"{"id":"evt_1"}"#, NOW);
        let err = verify_signature(br#"{"id":"evt_2"}"#, &header, SECRET, NOW, 300).unwrap_err();
        assert!(matches!(err, CoreError::SignatureInvalid(_)));
    }

    #[test]
    fn wrong_secret_fails() {
        let payload = b"{}";
        let header = signature_header("other_secret", NOW, payload).unwrap();
        assert!(verify_signature(payload, &header, SECRET, NOW, 300).is_err());
    }

    #[test]
    fn any_v1_entry_may_match() {
        let payload = b"{}";
        let good = compute_signature(SECRET, NOW, payload).unwrap();
        let header = format!("t={NOW},v1={},v0=ignored,v1={good}", "ab".repeat(32));
        assert!(verify_signature(payload, &header, SECRET, NOW, 300).is_ok());
    }

    #[test]
    fn stale_timestamp_fails() {
        let payload = b"{}";
        let header = signed(payload, NOW - 301);
        let err = verify_signature(payload, &header, SECRET, NOW, 300).unwrap_err();
        assert!(err.to_string().contains("tolerance"));
        assert!(verify_signature(payload, &header, SECRET, NOW, 0).is_ok());
    }

    #[test]
    fn header_without_timestamp_fails() {
        let err = SignatureHeader::parse("v1=abcd").unwrap_err();
        assert!(err.to_string().contains("timestamp"));
    }

    #[test]
    fn header_without_v1_fails() {
        assert!(SignatureHeader::parse("t=1,v0=abcd").is_err());
        assert!(SignatureHeader::parse("t=1,v1=not-hex").is_err());
        assert!(SignatureHeader::parse("garbage").is_err());
    }

    #[test]
    fn provider_status_mapping() {
        assert_eq!(map_provider_status("active"), SubscriptionStatus::Active);
        assert_eq!(map_provider_status("trialing"), SubscriptionStatus::Active);
        assert_eq!(map_provider_status("past_due"), SubscriptionStatus::Inactive);
        assert_eq!(map_provider_status("canceled"), SubscriptionStatus::Inactive);
        assert_eq!(map_provider_status(""), SubscriptionStatus::Inactive);
    }

    #[test]
    fn parses_checkout_completed() {
        let payload = br#"{
            "id": "evt_1",
            "type": "checkout.session.completed",
            "data": { "object": { "client_reference_id": "abc", "customer": "cus_1" } }
        }"#;
        let envelope = parse_event(payload).unwrap();
        assert_eq!(envelope.id, "evt_1");
        assert_eq!(
            envelope.event,
            BillingEvent::CheckoutCompleted {
                identity: Some("abc".into()),
                customer_id: Some("cus_1".into()),
            }
        );
    }

    #[test]
    fn checkout_without_identity_is_kept_empty() {
        let payload = br#"{
            "id": "evt_1",
            "type": "checkout.session.completed",
            "data": { "object": { "client_reference_id": "", "customer": null } }
        }"#;
        let envelope = parse_event(payload).unwrap();
        assert_eq!(
            envelope.event,
            BillingEvent::CheckoutCompleted {
                identity: None,
                customer_id: None,
            }
        );
    }

    #[test]
    fn parses_expanded_customer_object() {
        let payload = br#"{
            "id": "evt_2",
            "type": "customer.subscription.updated",
            "data": { "object": { "customer": { "id": "cus_9" }, "status": "trialing" } }
        }"#;
        let envelope = parse_event(payload).unwrap();
        assert_eq!(
            envelope.event,
            BillingEvent::SubscriptionUpdated {
                customer_id: "cus_9".into(),
                provider_status: "trialing".into(),
                status: SubscriptionStatus::Active,
            }
        );
    }

    #[test]
    fn parses_subscription_deleted() {
        let payload = br#"{
            "id": "evt_3",
            "type": "customer.subscription.deleted",
            "data": { "object": { "customer": "cus_1", "status": "canceled" } }
        }"#;
        assert_eq!(
            parse_event(payload).unwrap().event,
            BillingEvent::SubscriptionDeleted {
                customer_id: "cus_1".into()
            }
        );
    }

    #[test]
    fn unknown_event_types_are_ignored() {
        let payload = br#"{"id":"evt_4","type":"invoice.paid","data":{"object":{}}}"#;
        let envelope = parse_event(payload).unwrap();
        assert_eq!(envelope.event, BillingEvent::Ignored);
        assert_eq!(envelope.event_type, "invoice.paid");
    }

    #[test]
    fn malformed_payload_is_a_validation_error() {
        assert!(matches!(parse_event(b"not json"), Err(CoreError::Validation(_))));
        let missing_customer =
            br#"{"id":"e","type":"customer.subscription.deleted","data":{"object":{}}}"#;
        assert!(matches!(parse_event(missing_customer), Err(CoreError::Validation(_))));
    }
}
