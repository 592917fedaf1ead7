use std::collections::BTreeSet;

use dialoguer::Input;

use crate::domain::{AppError, Locals, PromptSpec, locals};
use crate::ports::QuestionnairePort;

/// Terminal questionnaire over the manifest's prompts.
#[derive(Debug, Clone, Copy, Default)]
pub struct InteractiveQuestionnaire;

impl QuestionnairePort for InteractiveQuestionnaire {
    fn ask(&self, prompts: &[PromptSpec], skip: &BTreeSet<String>) -> Result<Locals, AppError> {
        let mut answers = Locals::new();
        for prompt in prompts {
            if skip.contains(&prompt.key) {
                continue;
            }
            let mut input = Input::<String>::new().with_prompt(&prompt.message).allow_empty(true);
            if let Some(default) = &prompt.default {
                input = input.default(default.clone());
            }
            let answer = input.interact_text().map_err(|e| match e {
                dialoguer::Error::IO(io) => AppError::Io(io),
            })?;
            answers.insert(prompt.key.clone(), locals::coerce(&answer));
        }
        Ok(answers)
    }
}
