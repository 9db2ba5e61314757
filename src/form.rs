//! Input-time validation for the login screen and the posting form.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

use crate::error::ValidationErrors;
use crate::mapper::parse_number;
use crate::models::{CustomQuestion, Posting, PostingDraft, PostingQuestions, PostingStatus, WorkMode};

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));
static CEP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{5}-?\d{3}$").expect("valid postal code regex"));

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let email = self.email.trim();
        if email.is_empty() {
            errors.push("email", "email is required");
        } else if !EMAIL_RE.is_match(email) {
            errors.push("email", "invalid email");
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.push("password", "password must be at least 6 characters");
        }
        errors.into_result()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStep {
    Details,
    Questions,
}

/// Raw form inputs, kept as typed until submission.
#[derive(Debug, Clone)]
pub struct PostingFields {
    pub title: String,
    pub service: String,
    pub value: String,
    pub availability: String,
    pub requirements: String,
    pub service_date: Option<NaiveDate>,
    pub training: bool,
    pub contact: String,
    pub work_mode: Option<WorkMode>,
    pub status: PostingStatus,
    pub cep: String,
    pub radius: String,
    pub equipment_question: String,
    pub custom_questions: Vec<String>,
}

impl Default for PostingFields {
    fn default() -> Self {
        Self {
            title: String::new(),
            service: String::new(),
            value: String::new(),
            availability: String::new(),
            requirements: String::new(),
            service_date: None,
            training: false,
            contact: String::new(),
            work_mode: Some(WorkMode::OnSite),
            status: PostingStatus::Active,
            cep: String::new(),
            radius: String::new(),
            equipment_question: String::new(),
            custom_questions: Vec::new(),
        }
    }
}

impl From<&Posting> for PostingFields {
    fn from(posting: &Posting) -> Self {
        Self {
            title: posting.title.clone(),
            service: posting.service.clone(),
            value: format!("{}", posting.value),
            availability: posting.availability.clone(),
            requirements: posting.requirements.clone(),
            service_date: Some(posting.service_date),
            training: posting.training,
            contact: posting.contact.clone(),
            work_mode: Some(posting.work_mode),
            status: posting.status,
            cep: posting.cep.clone().unwrap_or_default(),
            radius: posting.radius.clone().unwrap_or_default(),
            equipment_question: posting.equipment_question.clone(),
            custom_questions: posting
                .custom_questions
                .iter()
                .map(|q| q.question.clone())
                .collect(),
        }
    }
}

/// Two-step posting form: details first, then the questionnaire.
#[derive(Debug, Clone)]
pub struct PostingForm {
    fields: PostingFields,
    step: FormStep,
    errors: ValidationErrors,
    editing: Option<String>,
}

impl Default for PostingForm {
    fn default() -> Self {
        Self::new()
    }
}

impl PostingForm {
    pub fn new() -> Self {
        Self::with_fields(PostingFields::default())
    }

    pub fn with_fields(fields: PostingFields) -> Self {
        Self {
            fields,
            step: FormStep::Details,
            errors: ValidationErrors::new(),
            editing: None,
        }
    }

    /// Prefills the form from an existing posting for editing.
    pub fn for_posting(posting: &Posting) -> Self {
        Self {
            editing: Some(posting.id.clone()),
            ..Self::with_fields(PostingFields::from(posting))
        }
    }

    pub fn fields(&self) -> &PostingFields {
        &self.fields
    }

    pub fn fields_mut(&mut self) -> &mut PostingFields {
        &mut self.fields
    }

    pub fn step(&self) -> FormStep {
        self.step
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    /// Validates every step-one field and, if they pass, moves to the
    /// questionnaire with the equipment question filled in.
    pub fn next(&mut self) -> Result<(), ValidationErrors> {
        self.errors = validate_details(&self.fields);
        if !self.errors.is_empty() {
            return Err(self.errors.clone());
        }
        if self.fields.equipment_question.trim().is_empty() {
            self.fields.equipment_question = equipment_question_for(&self.fields.service);
        }
        self.step = FormStep::Questions;
        Ok(())
    }

    pub fn back(&mut self) {
        self.step = FormStep::Details;
        self.errors = ValidationErrors::new();
    }

    pub fn add_question(&mut self, question: impl Into<String>) {
        self.fields.custom_questions.push(question.into());
    }

    pub fn remove_question(&mut self, index: usize) -> Option<String> {
        (index < self.fields.custom_questions.len()).then(|| self.fields.custom_questions.remove(index))
    }

    pub fn submit(&mut self) -> Result<PostingDraft, ValidationErrors> {
        if self.step == FormStep::Details {
            self.next()?;
        }
        self.errors = validate_questions(&self.fields);
        if !self.errors.is_empty() {
            return Err(self.errors.clone());
        }
        Ok(self.to_draft())
    }

    fn to_draft(&self) -> PostingDraft {
        let f = &self.fields;
        let on_site = f.work_mode == Some(WorkMode::OnSite);
        PostingDraft {
            title: Some(f.title.trim().to_string()),
            service: Some(f.service.trim().to_string()),
            value: parse_number(&f.value),
            work_mode: f.work_mode,
            service_date: f.service_date,
            status: Some(f.status),
            availability: Some(f.availability.trim().to_string()),
            requirements: Some(f.requirements.trim().to_string()),
            training: Some(f.training),
            contact: Some(f.contact.trim().to_string()),
            cep: Some(on_site.then(|| f.cep.trim().to_string())),
            radius: Some(on_site.then(|| f.radius.trim().to_string())),
            questions: Some(PostingQuestions {
                equipment_question: f.equipment_question.trim().to_string(),
                custom_questions: f
                    .custom_questions
                    .iter()
                    .map(|q| CustomQuestion {
                        question: q.trim().to_string(),
                    })
                    .collect(),
            }),
        }
    }
}

pub fn equipment_question_for(service: &str) -> String {
    format!("Do you have the equipment required for {}?", service.trim())
}

pub fn validate_details(f: &PostingFields) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if f.title.trim().is_empty() {
        errors.push("title", "title is required");
    }
    if char_len(&f.service) < 2 {
        errors.push("service", "service is required");
    }
    if f.value.trim().is_empty() {
        errors.push("value", "value is required");
    } else {
        match parse_number(&f.value) {
            None => errors.push("value", "value must be a number"),
            Some(v) if v < 0.0 => errors.push("value", "value must not be negative"),
            Some(_) => {}
        }
    }
    if char_len(&f.availability) < 2 {
        errors.push("availability", "availability is required");
    }
    if char_len(&f.requirements) < 10 {
        errors.push("requirements", "describe the requirements in at least 10 characters");
    }
    if f.service_date.is_none() {
        errors.push("service_date", "service date is required");
    }
    if char_len(&f.contact) < 5 {
        errors.push("contact", "contact is required");
    }

    match f.work_mode {
        None => errors.push("work_mode", "select the work mode"),
        Some(WorkMode::OnSite) => {
            let cep = f.cep.trim();
            if cep.is_empty() {
                errors.push("cep", "postal code required for on-site postings");
            } else if !CEP_RE.is_match(cep) {
                errors.push("cep", "postal code must look like 00000-000");
            }
            if !parse_number(&f.radius).is_some_and(|r| r > 0.0) {
                errors.push("radius", "radius must be greater than zero");
            }
        }
        Some(WorkMode::Remote) => {}
    }

    errors
}

fn validate_questions(f: &PostingFields) -> ValidationErrors {
    let mut errors = ValidationErrors::new();
    if f.equipment_question.trim().is_empty() {
        errors.push("equipment_question", "equipment question is required");
    }
    for (i, question) in f.custom_questions.iter().enumerate() {
        if question.trim().is_empty() {
            errors.push("custom_questions", format!("question {} is empty", i + 1));
        }
    }
    errors
}

fn char_len(text: &str) -> usize {
    text.trim().chars().count()
}
