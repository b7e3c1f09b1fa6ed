//! Interactive prompts.

use console::Term;
use dialoguer::{Input, Password};

use crate::error::{Result, WrError};

use super::{Prompt, PromptType};

fn map_dialoguer_err(key: &str, e: dialoguer::Error) -> WrError {
    WrError::Prompt {
        key: key.to_string(),
        message: e.to_string(),
    }
}

/// Prompt the user for input on the given terminal.
pub fn prompt_user(prompt: &Prompt, term: &Term) -> Result<String> {
    match prompt.prompt_type {
        PromptType::Input => prompt_input(prompt, term),
        PromptType::Secret => prompt_secret(prompt, term),
    }
}

fn prompt_input(prompt: &Prompt, term: &Term) -> Result<String> {
    let mut input = Input::<String>::new()
        .with_prompt(&prompt.question)
        .allow_empty(true);

    if let Some(default) = &prompt.default {
        input = input.default(default.clone());
    }

    let value = input
        .interact_text_on(term)
        .map_err(|e| map_dialoguer_err(&prompt.key, e))?;

    Ok(value.trim().to_string())
}

fn prompt_secret(prompt: &Prompt, term: &Term) -> Result<String> {
    let value = Password::new()
        .with_prompt(&prompt.question)
        .allow_empty_password(true)
        .interact_on(term)
        .map_err(|e| map_dialoguer_err(&prompt.key, e))?;

    Ok(value.trim().to_string())
}
