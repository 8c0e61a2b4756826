mod curriculum;
mod difficulty;
mod formula;
mod ids;
mod question;
mod syllabus;

pub use curriculum::{CaseStudy, Curriculum, CurriculumError, Module};
pub use difficulty::DifficultyTier;
pub use formula::{FormulaDraft, FormulaToken};
pub use ids::{ModuleId, ParseModuleIdError};
pub use question::{EvaluationResult, Question, QuestionKind, QuestionType};
