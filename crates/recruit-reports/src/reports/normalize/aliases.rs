//! Upstream field spellings per canonical field, tried in order.
//!
//! Bump [`ALIAS_TABLE_VERSION`] whenever an alias is added, removed, or
//! reordered so consumers can tell which resolution rules produced a view.

pub const ALIAS_TABLE_VERSION: u32 = 1;

pub(crate) mod profile {
    pub(crate) const ID: &[&str] = &["id", "profile_id", "uuid"];
    pub(crate) const TITLE: &[&str] = &["position_title", "title", "name"];
    pub(crate) const CLIENT_ID: &[&str] = &["client_id", "client", "client.id"];
    pub(crate) const CLIENT_NAME: &[&str] = &["client_name", "client.company_name"];
    pub(crate) const STATUS: &[&str] = &["status"];
    pub(crate) const PRIORITY: &[&str] = &["priority"];
    pub(crate) const CREATED_AT: &[&str] = &["created_at", "createdAt", "date_created"];
    pub(crate) const UPDATED_AT: &[&str] = &["updated_at", "updatedAt", "modified_at"];
    pub(crate) const LOCATION: &[&str] = &["location", "location_text"];
    pub(crate) const LOCATION_CITY: &[&str] = &["location_city", "city", "location.city"];
    pub(crate) const LOCATION_STATE: &[&str] = &["location_state", "state", "location.state"];
    pub(crate) const SALARY_MIN: &[&str] = &["salary_min", "salary_range.min", "salary.min"];
    pub(crate) const SALARY_MAX: &[&str] = &["salary_max", "salary_range.max", "salary.max"];
    pub(crate) const SALARY_PERIOD: &[&str] = &["salary_period", "salary_range.period"];
    pub(crate) const SALARY_CURRENCY: &[&str] =
        &["salary_currency", "currency", "salary_range.currency"];
    pub(crate) const DESCRIPTION: &[&str] =
        &["description", "job_description", "position_description"];
    pub(crate) const REQUIREMENTS: &[&str] =
        &["requirements", "job_requirements", "position_requirements"];
    pub(crate) const POSITIONS_AVAILABLE: &[&str] =
        &["positions_available", "number_of_positions", "vacancies"];
    pub(crate) const WORK_MODALITY: &[&str] = &["work_modality", "modality"];
    pub(crate) const SUPERVISOR_NAME: &[&str] =
        &["supervisor_name", "assigned_supervisor_name", "supervisor.name"];
    pub(crate) const SUPERVISOR_EMAIL: &[&str] =
        &["supervisor_email", "assigned_supervisor_email", "supervisor.email"];
}

pub(crate) mod client {
    pub(crate) const ID: &[&str] = &["id", "client_id", "uuid"];
    pub(crate) const COMPANY_NAME: &[&str] = &["company_name", "name", "business_name"];
    pub(crate) const INDUSTRY: &[&str] = &["industry", "sector"];
    pub(crate) const CONTACT_NAME: &[&str] =
        &["contact_name", "primary_contact_name", "contact.name"];
    pub(crate) const CONTACT_EMAIL: &[&str] =
        &["contact_email", "primary_contact_email", "contact.email", "email"];
    pub(crate) const CONTACT_PHONE: &[&str] =
        &["contact_phone", "primary_contact_phone", "contact.phone", "phone"];
    pub(crate) const WEBSITE: &[&str] = &["website", "url"];
    pub(crate) const ACTIVE: &[&str] = &["is_active", "active"];
    pub(crate) const CREATED_AT: &[&str] = &["created_at", "createdAt", "date_created"];
}

pub(crate) mod candidate {
    pub(crate) const ID: &[&str] = &["id", "candidate_id", "uuid"];
    pub(crate) const FULL_NAME: &[&str] = &["full_name", "name"];
    pub(crate) const FIRST_NAME: &[&str] = &["first_name"];
    pub(crate) const LAST_NAME: &[&str] = &["last_name"];
    pub(crate) const EMAIL: &[&str] = &["email", "contact_email"];
    pub(crate) const PHONE: &[&str] = &["phone", "phone_number"];
    pub(crate) const STATUS: &[&str] = &["status", "application_status"];
    pub(crate) const PROFILE_ID: &[&str] = &["profile_id", "profile", "profile.id"];
    pub(crate) const MATCHING_SCORE: &[&str] =
        &["matching_score", "match_score", "match_percentage"];
    pub(crate) const YEARS_EXPERIENCE: &[&str] = &["years_experience", "experience_years"];
    pub(crate) const SKILLS: &[&str] = &["skills", "technical_skills"];
    pub(crate) const LANGUAGES: &[&str] = &["languages"];
    pub(crate) const LANGUAGE_NAME: &[&str] = &["name", "language"];
    pub(crate) const LANGUAGE_LEVEL: &[&str] = &["level", "proficiency"];
    pub(crate) const SOURCE: &[&str] = &["source"];
    pub(crate) const CURRENT_POSITION: &[&str] = &["current_position", "current_job_title"];
    pub(crate) const CREATED_AT: &[&str] = &["created_at", "createdAt", "applied_at"];
}
