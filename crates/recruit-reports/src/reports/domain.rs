use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// The three independently sourced feeds the engine reconciles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Profile,
    Client,
    Candidate,
}

impl EntityKind {
    pub const fn ordered() -> [Self; 3] {
        [Self::Profile, Self::Client, Self::Candidate]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Profile => "profiles",
            Self::Client => "clients",
            Self::Candidate => "candidates",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Stable identifier shared by every entity kind.
///
/// Upstream feeds mix numeric and string ids, so both are folded into one
/// canonical string form: `7`, `7.0` and `"7"` all become `"7"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub String);

impl EntityId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonicalizes a raw JSON scalar into an id. Objects, arrays, booleans,
    /// null and blank strings are not ids.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(text) => {
                let trimmed = text.trim();
                (!trimmed.is_empty()).then(|| Self(trimmed.to_string()))
            }
            Value::Number(number) => {
                if let Some(int) = number.as_i64() {
                    Some(Self(int.to_string()))
                } else if let Some(int) = number.as_u64() {
                    Some(Self(int.to_string()))
                } else {
                    let float = number.as_f64()?;
                    if float.is_finite() && float.fract() == 0.0 {
                        Some(Self(format!("{float:.0}")))
                    } else {
                        Some(Self(number.to_string()))
                    }
                }
            }
            _ => None,
        }
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntityId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// Lowercases and folds `-` and spaces into `_` so `In Progress`,
/// `in-progress` and `in_progress` compare equal.
pub(crate) fn fold_status(raw: &str) -> String {
    raw.trim().to_ascii_lowercase().replace(['-', ' '], "_")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileStatus {
    Draft,
    Pending,
    Approved,
    InProgress,
    CandidatesFound,
    InEvaluation,
    InInterview,
    Finalists,
    Completed,
    Cancelled,
    Unknown,
}

impl ProfileStatus {
    pub const fn ordered() -> [Self; 11] {
        [
            Self::Draft,
            Self::Pending,
            Self::Approved,
            Self::InProgress,
            Self::CandidatesFound,
            Self::InEvaluation,
            Self::InInterview,
            Self::Finalists,
            Self::Completed,
            Self::Cancelled,
            Self::Unknown,
        ]
    }

    /// Maps an upstream spelling onto a status. Unrecognized text yields
    /// [`ProfileStatus::Unknown`]; callers keep the raw string for display.
    pub fn from_raw(raw: &str) -> Self {
        match fold_status(raw).as_str() {
            "draft" => Self::Draft,
            "pending" => Self::Pending,
            "approved" => Self::Approved,
            "in_progress" => Self::InProgress,
            "candidates_found" => Self::CandidatesFound,
            "in_evaluation" => Self::InEvaluation,
            "in_interview" | "in_interviews" | "interviewing" => Self::InInterview,
            "finalists" => Self::Finalists,
            "completed" => Self::Completed,
            "cancelled" | "canceled" => Self::Cancelled,
            _ => Self::Unknown,
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::InProgress => "in_progress",
            Self::CandidatesFound => "candidates_found",
            Self::InEvaluation => "in_evaluation",
            Self::InInterview => "in_interview",
            Self::Finalists => "finalists",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Unknown => "unknown",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Pending => "Pending Approval",
            Self::Approved => "Approved",
            Self::InProgress => "In Progress",
            Self::CandidatesFound => "Candidates Found",
            Self::InEvaluation => "In Evaluation",
            Self::InInterview => "In Interview",
            Self::Finalists => "Finalists",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
            Self::Unknown => "Unknown",
        }
    }

    /// Statuses that count as "open" unless configuration narrows the set.
    pub const fn default_active() -> [Self; 7] {
        [
            Self::Pending,
            Self::Approved,
            Self::InProgress,
            Self::CandidatesFound,
            Self::InEvaluation,
            Self::InInterview,
            Self::Finalists,
        ]
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub fn from_raw(raw: &str) -> Option<Self> {
        match fold_status(raw).as_str() {
            "low" => Some(Self::Low),
            "medium" | "normal" => Some(Self::Medium),
            "high" => Some(Self::High),
            "urgent" | "critical" => Some(Self::Urgent),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
            Self::Urgent => "Urgent",
        }
    }
}

/// Candidate status as spelled upstream. Distinct spellings are kept apart
/// here and collapsed only by [`FunnelBucket::for_status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateStatus {
    New,
    Applied,
    Screening,
    InReview,
    Shortlisted,
    Qualified,
    Interviewing,
    Offered,
    Hired,
    Rejected,
    Withdrawn,
    Unknown,
}

impl CandidateStatus {
    pub fn from_raw(raw: &str) -> Self {
        match fold_status(raw).as_str() {
            "new" => Self::New,
            "applied" => Self::Applied,
            "screening" => Self::Screening,
            "in_review" => Self::InReview,
            "shortlisted" => Self::Shortlisted,
            "qualified" => Self::Qualified,
            "interviewing" | "interview" => Self::Interviewing,
            "offered" | "offer" => Self::Offered,
            "hired" => Self::Hired,
            "rejected" => Self::Rejected,
            "withdrawn" => Self::Withdrawn,
            _ => Self::Unknown,
        }
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Applied => "applied",
            Self::Screening => "screening",
            Self::InReview => "in_review",
            Self::Shortlisted => "shortlisted",
            Self::Qualified => "qualified",
            Self::Interviewing => "interviewing",
            Self::Offered => "offered",
            Self::Hired => "hired",
            Self::Rejected => "rejected",
            Self::Withdrawn => "withdrawn",
            Self::Unknown => "unknown",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::New => "New",
            Self::Applied => "Applied",
            Self::Screening => "Screening",
            Self::InReview => "In Review",
            Self::Shortlisted => "Shortlisted",
            Self::Qualified => "Qualified",
            Self::Interviewing => "Interviewing",
            Self::Offered => "Offered",
            Self::Hired => "Hired",
            Self::Rejected => "Rejected",
            Self::Withdrawn => "Withdrawn",
            Self::Unknown => "Unknown",
        }
    }

    /// Still moving through the pipeline. Terminal and unknown statuses are not.
    pub const fn is_active(self) -> bool {
        !matches!(
            self,
            Self::Hired | Self::Rejected | Self::Withdrawn | Self::Unknown
        )
    }
}

/// Canonical funnel stage used for every statistics scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FunnelBucket {
    Applied,
    Screening,
    Shortlisted,
    Interviewing,
    Offered,
    Hired,
    Rejected,
}

impl FunnelBucket {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::Applied,
            Self::Screening,
            Self::Shortlisted,
            Self::Interviewing,
            Self::Offered,
            Self::Hired,
            Self::Rejected,
        ]
    }

    /// The single status-to-bucket table. `None` means the candidate counts
    /// toward totals only.
    pub const fn for_status(status: CandidateStatus) -> Option<Self> {
        match status {
            CandidateStatus::New | CandidateStatus::Applied => Some(Self::Applied),
            CandidateStatus::Screening | CandidateStatus::InReview => Some(Self::Screening),
            CandidateStatus::Shortlisted | CandidateStatus::Qualified => Some(Self::Shortlisted),
            CandidateStatus::Interviewing => Some(Self::Interviewing),
            CandidateStatus::Offered => Some(Self::Offered),
            CandidateStatus::Hired => Some(Self::Hired),
            CandidateStatus::Rejected => Some(Self::Rejected),
            CandidateStatus::Withdrawn | CandidateStatus::Unknown => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Applied => "Applied",
            Self::Screening => "Screening",
            Self::Shortlisted => "Shortlisted",
            Self::Interviewing => "Interviewing",
            Self::Offered => "Offered",
            Self::Hired => "Hired",
            Self::Rejected => "Rejected",
        }
    }
}
