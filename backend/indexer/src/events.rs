//! Canonical event types emitted by the escrow registry and the GiveCoin
//! ledger contracts.

use serde::{Deserialize, Serialize};

/// All recognised event kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// A campaign was registered (`created` topic).
    CampaignCreated,
    /// A donation was taken into custody (`donated` topic).
    DonationReceived,
    /// The owner appended a milestone (`ms_set` topic).
    MilestoneSet,
    /// The owner approved the next milestone (`ms_apprv` topic).
    MilestoneApproved,
    /// Unlocked funds were paid to the owner (`withdrawn` topic).
    FundsWithdrawn,
    /// Ledger transfer (`transfer` topic).
    Transfer,
    /// Ledger allowance change (`approve` topic).
    Approval,
    /// Ledger supply issuance (`issued` topic).
    Issued,
    /// An event from a watched contract that we don't recognise yet.
    Unknown,
}

impl EventKind {
    /// Parse the leading topic symbol into an [`EventKind`].
    pub fn from_topic(topic: &str) -> Self {
        match topic {
            "created" => Self::CampaignCreated,
            "donated" => Self::DonationReceived,
            "ms_set" => Self::MilestoneSet,
            "ms_apprv" => Self::MilestoneApproved,
            "withdrawn" => Self::FundsWithdrawn,
            "transfer" => Self::Transfer,
            "approve" => Self::Approval,
            "issued" => Self::Issued,
            _ => Self::Unknown,
        }
    }

    /// Return a short identifier string suitable for storage in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CampaignCreated => "campaign_created",
            Self::DonationReceived => "donation_received",
            Self::MilestoneSet => "milestone_set",
            Self::MilestoneApproved => "milestone_approved",
            Self::FundsWithdrawn => "funds_withdrawn",
            Self::Transfer => "transfer",
            Self::Approval => "approval",
            Self::Issued => "issued",
            Self::Unknown => "unknown",
        }
    }

    /// Escrow events carry the campaign id as their second topic.
    pub fn is_campaign_event(&self) -> bool {
        matches!(
            self,
            Self::CampaignCreated
                | Self::DonationReceived
                | Self::MilestoneSet
                | Self::MilestoneApproved
                | Self::FundsWithdrawn
        )
    }
}

/// A fully decoded event, ready to be stored in the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexedEvent {
    /// RPC-assigned event id; the idempotency key.
    pub event_id: Option<String>,
    pub event_type: String,
    pub campaign_id: Option<String>,
    /// The address that acted: owner, donor, sender or approver.
    pub actor: Option<String>,
    pub amount: Option<String>,
    /// Kind-specific extra: milestone index or description, counterparty.
    pub detail: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
}

/// An event record as stored in / read from the database.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct EventRecord {
    pub id: i64,
    pub event_id: Option<String>,
    pub event_type: String,
    pub campaign_id: Option<String>,
    pub actor: Option<String>,
    pub amount: Option<String>,
    pub detail: Option<String>,
    pub ledger: i64,
    pub timestamp: i64,
    pub contract_id: String,
    pub tx_hash: Option<String>,
    pub created_at: i64,
}
