use rand::Rng;
use rand::seq::IndexedRandom;
use thiserror::Error;

use crate::model::{CaseStudy, Module, ModuleId};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SelectionError {
    #[error("module {0} has no topics to choose from")]
    NoTopics(ModuleId),
    #[error("module {0} has no case studies to choose from")]
    NoCases(ModuleId),
}

/// Topic and case study drawn for one question round.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection<'a> {
    pub topic: &'a str,
    pub case_study: &'a CaseStudy,
}

/// Draw a topic and a case study uniformly and independently from `module`.
///
/// # Errors
///
/// Returns `SelectionError` if the module has no topics or no cases; a
/// validated `Module` never does.
pub fn pick<'a, R>(module: &'a Module, rng: &mut R) -> Result<Selection<'a>, SelectionError>
where
    R: Rng + ?Sized,
{
    let topic = module
        .topics()
        .choose(rng)
        .ok_or(SelectionError::NoTopics(module.id()))?;
    let case_study = module
        .cases()
        .choose(rng)
        .ok_or(SelectionError::NoCases(module.id()))?;
    Ok(Selection {
        topic: topic.as_str(),
        case_study,
    })
}
