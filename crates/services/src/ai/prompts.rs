//! Prompt text for the question generator and the grader.

use tutor_core::model::{CaseStudy, DifficultyTier, Question, QuestionType};

pub const PERSONA: &str = "\
You are Professor Max, a witty, dry-humored economist who teaches the MBA course \
\"Data & Decisions\". You love R, tolerate Excel and poke fun at it. You emphasize \
deep ideas over rote memorization. You are suave and intellectual but approachable.

Rules for generation:
1. Do not open questions with \"Alright wizards\" or \"Listen up\". Start with the relevant context or the question.
2. Keep catchphrases such as \"Boom. Deep idea.\" or \"Check your standard errors\" for feedback, never inside question text.
3. Be concise. Avoid walls of text.";

fn tier_instruction(tier: DifficultyTier) -> &'static str {
    match tier {
        DifficultyTier::Concept => {
            "Ask for a definition or the validity of a concept related to this case."
        }
        DifficultyTier::Setup => "Ask to map the text description to a variable or hypothesis.",
        DifficultyTier::Execution => {
            "Ask for a specific calculation (e.g. t-stat, confidence interval). Provide the correct numeric value."
        }
        DifficultyTier::Interpretation => {
            "Ask for a business decision or the interpretation of a coefficient. Provide a rubric for grading."
        }
    }
}

/// User prompt asking for one question at `tier` about `topic`.
#[must_use]
pub fn question_prompt(topic: &str, tier: DifficultyTier, case_study: &CaseStudy) -> String {
    let expected = tier.expected_question_type();
    format!(
        "Generate a single {tier} level question about {topic} using this case study.\n\
         Case: {title}\n\
         Context: {description}\n\
         Data: {data}\n\n\
         {instruction} Return type: {expected}.\n\n\
         Output JSON only:\n\
         {{\n\
         \x20 \"context\": \"At most two sentences with the data needed for this question.\",\n\
         \x20 \"text\": \"The question itself. Keep it direct.\",\n\
         \x20 \"type\": \"MULTIPLE_CHOICE\" | \"CALCULATION\" | \"TEXT_INPUT\",\n\
         \x20 \"options\": [\"Option A\", \"Option B\", \"Option C\", \"Option D\"] (only for MULTIPLE_CHOICE),\n\
         \x20 \"correctOptionIndex\": number (only for MULTIPLE_CHOICE),\n\
         \x20 \"correctValue\": number (only for CALCULATION),\n\
         \x20 \"rubric\": \"Key points required for a correct answer\" (only for TEXT_INPUT)\n\
         }}",
        title = case_study.title,
        description = case_study.description,
        data = case_study.data_points.join(", "),
        instruction = tier_instruction(tier),
    )
}

/// What the grader compares against: the rubric, or the options as JSON.
#[must_use]
pub fn rubric_or_options(question: &Question) -> String {
    match &question.rubric {
        Some(rubric) => rubric.clone(),
        None => serde_json::to_string(question.options()).unwrap_or_default(),
    }
}

/// User prompt asking the grader for a verdict in the persona's voice.
#[must_use]
pub fn grading_prompt(question: &Question, answer: &str) -> String {
    let kind_hint = if question.question_type() == QuestionType::Formula {
        "The answer is a formula written as space-separated tokens.\n"
    } else {
        ""
    };
    format!(
        "Question context: {context}\n\
         Question: {text}\n\
         Rubric/Correct answer: {rubric}\n\
         Student answer: {answer}\n\
         {kind_hint}\n\
         Evaluate the student's answer. Be strict on concepts but lenient on phrasing. \
         Respond in Max's voice. If wrong, explain why in one sentence.\n\n\
         Output JSON:\n\
         {{\n\
         \x20 \"isCorrect\": boolean,\n\
         \x20 \"feedback\": \"string\"\n\
         }}",
        context = question.context.as_deref().unwrap_or(""),
        text = question.text,
        rubric = rubric_or_options(question),
    )
}
