//! Pure projections over in-memory records. Recomputed on every input change.

use crate::models::{Candidate, Posting, PostingStatus, WorkMode};

pub const MAX_DISTANCE_KM: f64 = 500.0;
pub const DISTANCE_STEP_KM: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModeFilter {
    #[default]
    Any,
    Only(WorkMode),
}

impl ModeFilter {
    pub fn admits(&self, mode: WorkMode) -> bool {
        match self {
            ModeFilter::Any => true,
            ModeFilter::Only(wanted) => *wanted == mode,
        }
    }

    /// Any -> on-site -> remote -> Any, for a select-style toggle.
    pub fn cycle(&self) -> Self {
        match self {
            ModeFilter::Any => ModeFilter::Only(WorkMode::OnSite),
            ModeFilter::Only(WorkMode::OnSite) => ModeFilter::Only(WorkMode::Remote),
            ModeFilter::Only(WorkMode::Remote) => ModeFilter::Any,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ModeFilter::Any => "any",
            ModeFilter::Only(mode) => mode.label(),
        }
    }
}

impl From<Option<WorkMode>> for ModeFilter {
    fn from(mode: Option<WorkMode>) -> Self {
        mode.map_or(ModeFilter::Any, ModeFilter::Only)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CandidateSort {
    #[default]
    AsListed,
    Nearest,
}

/// Talent pool criteria. Empty text and `ModeFilter::Any` impose no constraint.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CandidateFilter {
    pub name: String,
    pub mode: ModeFilter,
    pub equipment: String,
    pub max_distance: Option<f64>,
}

impl CandidateFilter {
    /// Interactive starting point: no text criteria, slider at [`MAX_DISTANCE_KM`].
    pub fn for_dashboard() -> Self {
        Self {
            max_distance: Some(MAX_DISTANCE_KM),
            ..Self::default()
        }
    }

    pub fn matches(&self, candidate: &Candidate) -> bool {
        if !contains_ci(&candidate.name, &self.name) {
            return false;
        }

        if !self.mode.admits(candidate.work_mode) {
            return false;
        }

        let equipment = self.equipment.trim();
        if !equipment.is_empty()
            && !contains_ci(&candidate.equipment_type, equipment)
            && !contains_ci(&candidate.equipment_model, equipment)
        {
            return false;
        }

        if let Some(max) = self.max_distance {
            if candidate.distance > max {
                return false;
            }
        }

        true
    }

    pub fn apply<'a>(&self, candidates: &'a [Candidate], sort: CandidateSort) -> Vec<&'a Candidate> {
        let mut matched: Vec<&Candidate> = candidates.iter().filter(|c| self.matches(c)).collect();
        if sort == CandidateSort::Nearest {
            matched.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        }
        matched
    }

    /// Slider step up, capped at [`MAX_DISTANCE_KM`].
    pub fn widen(&mut self) {
        let current = self.max_distance.unwrap_or(MAX_DISTANCE_KM);
        self.max_distance = Some((current + DISTANCE_STEP_KM).min(MAX_DISTANCE_KM));
    }

    /// Slider step down, floored at zero.
    pub fn narrow(&mut self) {
        let current = self.max_distance.unwrap_or(MAX_DISTANCE_KM);
        self.max_distance = Some((current - DISTANCE_STEP_KM).max(0.0));
    }
}

/// Postings list criteria: text search over title and service, plus enums.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PostingFilter {
    pub search: String,
    pub status: Option<PostingStatus>,
    pub mode: ModeFilter,
}

impl PostingFilter {
    pub fn matches(&self, posting: &Posting) -> bool {
        let search = self.search.trim();
        if !search.is_empty()
            && !contains_ci(&posting.title, search)
            && !contains_ci(&posting.service, search)
        {
            return false;
        }

        if let Some(status) = self.status {
            if posting.status != status {
                return false;
            }
        }

        self.mode.admits(posting.work_mode)
    }

    pub fn apply<'a>(&self, postings: &'a [Posting]) -> Vec<&'a Posting> {
        postings.iter().filter(|p| self.matches(p)).collect()
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}
