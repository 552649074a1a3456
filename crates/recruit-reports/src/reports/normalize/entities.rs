use crate::reports::domain::{CandidateStatus, EntityId, Priority, ProfileStatus};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeSet;

/// A recruitment position opened for a client.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileEntity {
    pub id: EntityId,
    pub title: String,
    pub client_id: Option<EntityId>,
    /// Client name as embedded in the profile feed, used when the client feed
    /// itself does not resolve the reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_name_hint: Option<String>,
    pub status: ProfileStatus,
    /// Upstream spelling, kept for display when `status` is `unknown`.
    pub status_raw: String,
    pub priority: Priority,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub days_open: Option<u32>,
    pub location: Option<String>,
    pub salary_range: Option<SalaryRange>,
    pub description: String,
    pub requirements: String,
    pub positions_available: u32,
    pub work_modality: Option<String>,
    pub supervisor: Option<ContactInfo>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalaryRange {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub period: Option<String>,
    pub currency: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContactInfo {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl ContactInfo {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.email.is_none() && self.phone.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientEntity {
    pub id: EntityId,
    pub company_name: String,
    pub industry: Option<String>,
    pub contact: ContactInfo,
    pub website: Option<String>,
    pub active: bool,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageSkill {
    pub name: String,
    pub level: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CandidateEntity {
    pub id: EntityId,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub status: CandidateStatus,
    pub status_raw: String,
    pub profile_id: Option<EntityId>,
    /// 0–100. `None` when the feed carried no score; such candidates are left
    /// out of match averages rather than counted as zero.
    pub matching_score: Option<f64>,
    pub years_experience: Option<f64>,
    pub skills: BTreeSet<String>,
    pub languages: Vec<LanguageSkill>,
    pub source: Option<String>,
    pub current_position: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}
