use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WorkMode {
    #[serde(rename = "Presencial")]
    OnSite,
    #[serde(rename = "Home Office")]
    Remote,
}

impl WorkMode {
    pub fn label(&self) -> &'static str {
        match self {
            WorkMode::OnSite => "on-site",
            WorkMode::Remote => "remote",
        }
    }
}

impl fmt::Display for WorkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for WorkMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "on-site" | "onsite" | "presencial" => Ok(WorkMode::OnSite),
            "remote" | "home-office" | "home office" => Ok(WorkMode::Remote),
            other => Err(format!("unknown work mode '{}' (expected on-site or remote)", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PostingStatus {
    #[serde(rename = "Ativo")]
    Active,
    #[serde(rename = "Inativo")]
    Inactive,
}

impl PostingStatus {
    pub fn label(&self) -> &'static str {
        match self {
            PostingStatus::Active => "active",
            PostingStatus::Inactive => "inactive",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            PostingStatus::Active => PostingStatus::Inactive,
            PostingStatus::Inactive => PostingStatus::Active,
        }
    }
}

impl fmt::Display for PostingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

impl FromStr for PostingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "active" | "ativo" => Ok(PostingStatus::Active),
            "inactive" | "inativo" => Ok(PostingStatus::Inactive),
            other => Err(format!("unknown status '{}' (expected active or inactive)", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomQuestion {
    pub question: String,
}

/// The free-form questionnaire attached to a posting. Stored by the backend
/// as a single JSON column, hence the camelCase keys.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostingQuestions {
    #[serde(default)]
    pub equipment_question: String,
    #[serde(default)]
    pub custom_questions: Vec<CustomQuestion>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Posting {
    pub id: String,
    pub title: String,
    pub service: String,
    pub value: f64,
    pub work_mode: WorkMode,
    pub service_date: NaiveDate,
    pub status: PostingStatus,
    pub availability: String,
    pub requirements: String,
    pub training: bool,
    pub contact: String,
    pub cep: Option<String>,    // on-site only
    pub radius: Option<String>, // km, kept as typed
    pub equipment_question: String,
    pub custom_questions: Vec<CustomQuestion>,
}

impl Posting {
    pub fn is_on_site(&self) -> bool {
        self.work_mode == WorkMode::OnSite
    }
}

/// A partial posting: the payload of create and update calls.
///
/// `cep` and `radius` are tri-state. `None` leaves the column alone,
/// `Some(None)` clears it and `Some(Some(_))` sets it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostingDraft {
    pub title: Option<String>,
    pub service: Option<String>,
    pub value: Option<f64>,
    pub work_mode: Option<WorkMode>,
    pub service_date: Option<NaiveDate>,
    pub status: Option<PostingStatus>,
    pub availability: Option<String>,
    pub requirements: Option<String>,
    pub training: Option<bool>,
    pub contact: Option<String>,
    pub cep: Option<Option<String>>,
    pub radius: Option<Option<String>>,
    pub questions: Option<PostingQuestions>,
}

impl PostingDraft {
    pub fn with_status(status: PostingStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: String,
    pub name: String,
    pub equipment_type: String,  // "Notebook", "Smartphone", ...
    pub equipment_model: String,
    pub city: String,
    pub state: String,
    pub cep: String,
    pub distance: f64,
    pub availability: String,
    pub work_mode: WorkMode,
    pub avatar_url: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invitation {
    pub id: String,
    pub posting_id: String,
    pub candidate_id: String,
    pub link: String,
    pub created_at: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_work_mode_wire_names() {
        assert_eq!(serde_json::to_string(&WorkMode::OnSite).unwrap(), "\"Presencial\"");
        assert_eq!(serde_json::to_string(&WorkMode::Remote).unwrap(), "\"Home Office\"");
        let mode: WorkMode = serde_json::from_str("\"Home Office\"").unwrap();
        assert_eq!(mode, WorkMode::Remote);
    }

    #[test]
    fn test_work_mode_from_cli_spelling() {
        assert_eq!("on-site".parse::<WorkMode>().unwrap(), WorkMode::OnSite);
        assert_eq!("Presencial".parse::<WorkMode>().unwrap(), WorkMode::OnSite);
        assert_eq!("REMOTE".parse::<WorkMode>().unwrap(), WorkMode::Remote);
        assert!("hybrid".parse::<WorkMode>().is_err());
    }

    #[test]
    fn test_status_toggle_and_wire_names() {
        assert_eq!(PostingStatus::Active.toggled(), PostingStatus::Inactive);
        assert_eq!(PostingStatus::Inactive.toggled(), PostingStatus::Active);
        assert_eq!(serde_json::to_string(&PostingStatus::Inactive).unwrap(), "\"Inativo\"");
        assert_eq!("ativo".parse::<PostingStatus>().unwrap(), PostingStatus::Active);
    }

    #[test]
    fn test_questions_missing_keys_default() {
        let q: PostingQuestions = serde_json::from_str("{}").unwrap();
        assert_eq!(q, PostingQuestions::default());
    }
}
