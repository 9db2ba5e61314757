//! Conversion between the dashboard's records and the backend's rows.
//!
//! Every function here is total: malformed numeric text coerces instead of
//! failing, and missing or null columns fall back to defaults. One odd row
//! never fails a whole listing.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::models::{
    Candidate, Invitation, Posting, PostingDraft, PostingQuestions, PostingStatus, WorkMode,
};

pub const AVATAR_PLACEHOLDER_URL: &str = "https://img.usecurling.com/ppl/thumbnail?seed=";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostingRow {
    #[serde(deserialize_with = "lenient_id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub titulo: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub servico: String,
    #[serde(default, deserialize_with = "numeric")]
    pub valor: f64,
    #[serde(default = "default_mode", deserialize_with = "lenient_mode")]
    pub tipo: WorkMode,
    #[serde(default = "fallback_date", deserialize_with = "lenient_date")]
    pub data_servico: NaiveDate,
    #[serde(default = "default_status", deserialize_with = "lenient_status")]
    pub status: PostingStatus,
    #[serde(default, deserialize_with = "lenient_string")]
    pub disponibilidade: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub requisitos: String,
    #[serde(default, deserialize_with = "lenient_bool")]
    pub treinamento: bool,
    #[serde(default, deserialize_with = "lenient_string")]
    pub contato: String,
    #[serde(default, deserialize_with = "lenient_optional_string")]
    pub cep_base: Option<String>,
    #[serde(default, deserialize_with = "optional_numeric")]
    pub raio_distancia: Option<f64>,
    #[serde(default, deserialize_with = "lenient_questions")]
    pub perguntas: Option<PostingQuestions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

/// Write-side row: only the columns present in a [`PostingDraft`] are sent.
/// A `Some(None)` serializes as `null` and clears the column.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PostingPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub titulo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub servico: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valor: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tipo: Option<WorkMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_servico: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PostingStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disponibilidade: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub requisitos: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub treinamento: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contato: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cep_base: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raio_distancia: Option<Option<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub perguntas: Option<PostingQuestions>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CandidateRow {
    #[serde(deserialize_with = "lenient_id")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub nome: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub equipamento_tipo: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub equipamento_modelo: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub cidade: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub estado: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub cep: String,
    #[serde(default, deserialize_with = "numeric")]
    pub distancia: f64,
    #[serde(default, deserialize_with = "lenient_string")]
    pub disponibilidade: String,
    #[serde(default = "default_mode", deserialize_with = "lenient_mode")]
    pub tipo: WorkMode,
    #[serde(default, deserialize_with = "lenient_optional_string")]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewInvitationRow {
    pub vaga_id: String,
    pub talento_id: String,
    pub link_unico: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct InvitationRow {
    #[serde(deserialize_with = "lenient_id")]
    pub id: String,
    #[serde(deserialize_with = "lenient_id")]
    pub vaga_id: String,
    #[serde(deserialize_with = "lenient_id")]
    pub talento_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub link_unico: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

// --- Postings ---

pub fn posting_to_row(posting: &Posting) -> PostingRow {
    PostingRow {
        id: posting.id.clone(),
        titulo: posting.title.clone(),
        servico: posting.service.clone(),
        valor: posting.value,
        tipo: posting.work_mode,
        data_servico: posting.service_date,
        status: posting.status,
        disponibilidade: posting.availability.clone(),
        requisitos: posting.requirements.clone(),
        treinamento: posting.training,
        contato: posting.contact.clone(),
        cep_base: non_empty(posting.cep.as_deref()),
        raio_distancia: posting.radius.as_deref().and_then(parse_number),
        perguntas: Some(PostingQuestions {
            equipment_question: posting.equipment_question.clone(),
            custom_questions: posting.custom_questions.clone(),
        }),
        created_at: None,
    }
}

pub fn row_to_posting(row: PostingRow) -> Posting {
    let questions = row.perguntas.unwrap_or_default();
    Posting {
        id: row.id,
        title: row.titulo,
        service: row.servico,
        value: row.valor,
        work_mode: row.tipo,
        service_date: row.data_servico,
        status: row.status,
        availability: row.disponibilidade,
        requirements: row.requisitos,
        training: row.treinamento,
        contact: row.contato,
        cep: non_empty(row.cep_base.as_deref()),
        // A zero radius reads as "not set".
        radius: row
            .raio_distancia
            .filter(|r| *r != 0.0)
            .map(format_number),
        equipment_question: questions.equipment_question,
        custom_questions: questions.custom_questions,
    }
}

pub fn draft_to_patch(draft: &PostingDraft) -> PostingPatch {
    PostingPatch {
        titulo: draft.title.clone(),
        servico: draft.service.clone(),
        valor: draft.value,
        tipo: draft.work_mode,
        data_servico: draft.service_date,
        status: draft.status,
        disponibilidade: draft.availability.clone(),
        requisitos: draft.requirements.clone(),
        treinamento: draft.training,
        contato: draft.contact.clone(),
        cep_base: draft.cep.as_ref().map(|cep| non_empty(cep.as_deref())),
        raio_distancia: draft
            .radius
            .as_ref()
            .map(|radius| radius.as_deref().and_then(parse_number)),
        perguntas: draft.questions.clone(),
    }
}

// --- Candidates and invitations ---

pub fn row_to_candidate(row: CandidateRow) -> Candidate {
    let avatar_url = non_empty(row.avatar_url.as_deref())
        .unwrap_or_else(|| format!("{}{}", AVATAR_PLACEHOLDER_URL, row.id));
    Candidate {
        id: row.id,
        name: row.nome,
        equipment_type: row.equipamento_tipo,
        equipment_model: row.equipamento_modelo,
        city: row.cidade,
        state: row.estado,
        cep: row.cep,
        distance: row.distancia,
        availability: row.disponibilidade,
        work_mode: row.tipo,
        avatar_url,
    }
}

pub fn new_invitation_row(posting_id: &str, candidate_id: &str, link: &str) -> NewInvitationRow {
    NewInvitationRow {
        vaga_id: posting_id.to_string(),
        talento_id: candidate_id.to_string(),
        link_unico: link.to_string(),
    }
}

pub fn row_to_invitation(row: InvitationRow) -> Invitation {
    Invitation {
        id: row.id,
        posting_id: row.vaga_id,
        candidate_id: row.talento_id,
        link: row.link_unico,
        created_at: row.created_at,
    }
}

// --- Coercion helpers ---

/// Reads a JSON number or numeric string. Anything else, including
/// non-finite values, yields `None`.
pub fn coerce_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_number(s),
        _ => None,
    }
}

pub fn parse_number(text: &str) -> Option<f64> {
    text.trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
}

fn format_number(n: f64) -> String {
    format!("{}", n)
}

fn non_empty(text: Option<&str>) -> Option<String> {
    text.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

fn lenient_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_optional_string<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Null or unknown modes read as on-site.
fn default_mode() -> WorkMode {
    WorkMode::OnSite
}

fn lenient_mode<'de, D: Deserializer<'de>>(deserializer: D) -> Result<WorkMode, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(value
        .as_str()
        .and_then(|text| text.parse().ok())
        .unwrap_or_else(default_mode))
}

fn default_status() -> PostingStatus {
    PostingStatus::Active
}

fn lenient_status<'de, D: Deserializer<'de>>(deserializer: D) -> Result<PostingStatus, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(value
        .as_str()
        .and_then(|text| text.parse().ok())
        .unwrap_or_else(default_status))
}

/// Unix epoch; shown as `01/01/1970` so a broken row is easy to spot.
fn fallback_date() -> NaiveDate {
    NaiveDate::default()
}

fn lenient_date<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
    let value = Value::deserialize(deserializer)?;
    let parsed = value.as_str().and_then(|text| {
        let text = text.trim();
        // timestamptz columns come back as `2024-10-01T00:00:00+00:00`
        let day = text.get(..10).unwrap_or(text);
        NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
    });
    Ok(parsed.unwrap_or_else(fallback_date))
}

fn lenient_questions<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<PostingQuestions>, D::Error> {
    Ok(serde_json::from_value(Value::deserialize(deserializer)?).ok())
}

fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(Option::<bool>::deserialize(deserializer)?.unwrap_or(false))
}

fn numeric<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(coerce_number(&Value::deserialize(deserializer)?).unwrap_or(0.0))
}

fn optional_numeric<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(coerce_number(&Value::deserialize(deserializer)?))
}
