//! Construction of the coach prompt sent to the text generator.

use crate::{CycleStep, Lift, Settings, Weight};

/// The output contract requested from the generator. The extractor in
/// [`crate::plan`] parses exactly this shape.
pub const OUTPUT_FORMAT: &str = "『name』 【weight kg】 (sets) reps [rest]";

/// Builds the prompt for today's menu.
///
/// The knowledge base and user constraints come first so the generator
/// treats them as binding; the strict format line comes last.
#[must_use]
pub fn build(
    settings: &Settings,
    lift: Lift,
    step: &CycleStep,
    target_weight: Weight,
    body_parts: &[String],
) -> String {
    let body_parts = if body_parts.is_empty() {
        "coach's choice".to_string()
    } else {
        body_parts.join(", ")
    };

    format!(
        "You are a professional strength coach. Strictly follow the \
         knowledge base and the user constraints below and write today's \
         training menu.\n\
         \n\
         Knowledge base (records, research, methods):\n\
         {knowledge_base}\n\
         \n\
         User constraints:\n\
         {custom_constraints}\n\
         \n\
         Today's base settings:\n\
         - Main lift: {lift}\n\
         - Prescribed load: {target_weight} kg ({sets} sets x {reps} reps)\n\
         - Cycle progress: step {index}/6 ({phase})\n\
         - Body parts to train: {body_parts}\n\
         \n\
         Output format, one line per exercise, no other delimiters:\n\
         {format}",
        knowledge_base = settings.knowledge_base,
        custom_constraints = settings.custom_constraints,
        sets = step.target_sets,
        reps = step.target_reps,
        index = step.index,
        phase = step.phase(),
        format = OUTPUT_FORMAT,
    )
}
