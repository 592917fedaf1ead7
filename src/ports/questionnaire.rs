use std::collections::BTreeSet;

use crate::domain::{AppError, Locals, PromptSpec};

/// Port for answering a template's questionnaire prompts.
///
/// Implementations may suspend awaiting user input. Keys listed in `skip`
/// were already supplied explicitly and must not be asked again.
pub trait QuestionnairePort {
    fn ask(&self, prompts: &[PromptSpec], skip: &BTreeSet<String>) -> Result<Locals, AppError>;
}
