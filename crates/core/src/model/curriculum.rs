use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::ModuleId;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CurriculumError {
    #[error("module {id} has an empty title")]
    EmptyTitle { id: ModuleId },

    #[error("module {id} has no topics")]
    NoTopics { id: ModuleId },

    #[error("module {id} has no case studies")]
    NoCases { id: ModuleId },

    #[error("duplicate module id {id}")]
    DuplicateModule { id: ModuleId },

    #[error("curriculum has no modules")]
    Empty,

    #[error("unknown module {id}")]
    UnknownModule { id: ModuleId },
}

//
// ─── CASE STUDY ────────────────────────────────────────────────────────────────
//

/// Concrete scenario used to ground a generated question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CaseStudy {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub data_points: Vec<String>,
}

impl CaseStudy {
    #[must_use]
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        data_points: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            data_points: data_points.into_iter().map(Into::into).collect(),
        }
    }
}

//
// ─── MODULE ────────────────────────────────────────────────────────────────────
//

/// Raw module shape as it appears in a syllabus file, before validation.
#[derive(Debug, Clone, Deserialize)]
struct ModuleRecord {
    id: ModuleId,
    title: String,
    topics: Vec<String>,
    cases: Vec<CaseStudy>,
}

/// Curriculum unit grouping topics and case studies under one theme.
///
/// A `Module` always has a non-empty title, at least one topic and at least
/// one case study, so topic/case selection never sees an empty list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "ModuleRecord")]
pub struct Module {
    id: ModuleId,
    title: String,
    topics: Vec<String>,
    cases: Vec<CaseStudy>,
}

impl TryFrom<ModuleRecord> for Module {
    type Error = CurriculumError;

    fn try_from(record: ModuleRecord) -> Result<Self, Self::Error> {
        Self::new(record.id, record.title, record.topics, record.cases)
    }
}

impl Module {
    /// Build a validated module.
    ///
    /// # Errors
    ///
    /// Returns `CurriculumError` if the title is blank or topics/cases are empty.
    pub fn new(
        id: ModuleId,
        title: impl Into<String>,
        topics: Vec<String>,
        cases: Vec<CaseStudy>,
    ) -> Result<Self, CurriculumError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(CurriculumError::EmptyTitle { id });
        }
        if topics.is_empty() {
            return Err(CurriculumError::NoTopics { id });
        }
        if cases.is_empty() {
            return Err(CurriculumError::NoCases { id });
        }
        Ok(Self {
            id,
            title,
            topics,
            cases,
        })
    }

    /// Assemble a module from trusted, statically known parts.
    pub(crate) fn from_parts(
        id: u32,
        title: &str,
        topics: &[&str],
        cases: Vec<CaseStudy>,
    ) -> Self {
        Self {
            id: ModuleId::new(id),
            title: title.to_string(),
            topics: topics.iter().map(|t| (*t).to_string()).collect(),
            cases,
        }
    }

    #[must_use]
    pub fn id(&self) -> ModuleId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn topics(&self) -> &[String] {
        &self.topics
    }

    #[must_use]
    pub fn cases(&self) -> &[CaseStudy] {
        &self.cases
    }

    /// Label shown next to an active question of this module.
    #[must_use]
    pub fn question_label(&self) -> String {
        format!("Q-ID: {}", 100 + u64::from(self.id.value()) * 10)
    }
}

//
// ─── CURRICULUM ────────────────────────────────────────────────────────────────
//

/// Read-only catalog of modules, ordered by id.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Vec<Module>")]
pub struct Curriculum {
    modules: Vec<Arc<Module>>,
}

impl TryFrom<Vec<Module>> for Curriculum {
    type Error = CurriculumError;

    fn try_from(modules: Vec<Module>) -> Result<Self, Self::Error> {
        Self::new(modules)
    }
}

impl Curriculum {
    /// Build a curriculum from validated modules, sorting them into curriculum order.
    ///
    /// # Errors
    ///
    /// Returns `CurriculumError::Empty` for an empty list and
    /// `CurriculumError::DuplicateModule` when two modules share an id.
    pub fn new(mut modules: Vec<Module>) -> Result<Self, CurriculumError> {
        if modules.is_empty() {
            return Err(CurriculumError::Empty);
        }
        let mut seen = HashSet::new();
        for module in &modules {
            if !seen.insert(module.id()) {
                return Err(CurriculumError::DuplicateModule { id: module.id() });
            }
        }
        modules.sort_by_key(Module::id);
        Ok(Self {
            modules: modules.into_iter().map(Arc::new).collect(),
        })
    }

    /// The built-in "Data & Decisions" syllabus.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            modules: super::syllabus::modules().into_iter().map(Arc::new).collect(),
        }
    }

    #[must_use]
    pub fn modules(&self) -> &[Arc<Module>] {
        &self.modules
    }

    /// Look up a module by id.
    ///
    /// # Errors
    ///
    /// Returns `CurriculumError::UnknownModule` if no module has this id.
    pub fn module(&self, id: ModuleId) -> Result<Arc<Module>, CurriculumError> {
        self.modules
            .iter()
            .find(|m| m.id() == id)
            .cloned()
            .ok_or(CurriculumError::UnknownModule { id })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }
}

impl Default for Curriculum {
    fn default() -> Self {
        Self::builtin()
    }
}
