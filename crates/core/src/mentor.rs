//! Lines the tutor persona says between questions.

use crate::model::Module;

pub const GREETING: &str = "Ready to look at some data? Let's minimize those residuals.";
pub const REVIEWING_CASE_FILES: &str = "Reviewing the case files...";
pub const TIER_WRAPPED: &str = "Excellent work. Let's tackle another case.";
pub const DEGRADED_QUESTION: &str =
    "The server farm is napping, so we'll do this one the old-fashioned way.";
pub const LOAD_TIMED_OUT: &str =
    "That case file is taking forever. Give it another try when you're ready.";
pub const GRADING_UNAVAILABLE: &str =
    "My grading notebook seems to have crashed. Let's call that one inconclusive.";

#[must_use]
pub fn module_selected(module: &Module) -> String {
    format!("Ah, {}. A fine choice. Let's begin.", module.title())
}
