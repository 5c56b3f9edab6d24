//! Interactive prompts.

use console::Term;
use dialoguer::Select;

use crate::error::{EasypackError, Result};

use super::SelectPrompt;

/// Show a select list on `term` and return the chosen value.
pub fn select_on(prompt: &SelectPrompt, term: &Term) -> Result<String> {
    if prompt.options.is_empty() {
        return Err(EasypackError::ConfigValidationError {
            message: format!("Nothing to choose for '{}'", prompt.key),
        });
    }

    let labels: Vec<_> = prompt.options.iter().map(|o| o.label.as_str()).collect();
    let selection = Select::new()
        .with_prompt(&prompt.question)
        .items(&labels)
        .default(prompt.default_index())
        .interact_on(term)
        .map_err(|e| EasypackError::Io(e.into()))?;

    Ok(prompt.options[selection].value.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_options_are_rejected() {
        let prompt = SelectPrompt {
            key: "boilerplate".to_string(),
            question: "Pick one".to_string(),
            options: Vec::new(),
            default: None,
        };
        let err = select_on(&prompt, &Term::stdout()).unwrap_err();
        assert!(err.to_string().contains("boilerplate"));
    }
}
