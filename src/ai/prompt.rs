//! Reusable prompts using Handlebars for templating. Strict mode is
//! on so a missing variable is an error instead of an empty string
//! quietly ending up in front of the model.

use std::fmt;

use anyhow::Result;
use handlebars::Handlebars;
use serde_json::json;

use crate::catalog::Category;

pub const STORE_NAME: &str = "Teja Pickles & Home Foods";

#[derive(Debug)]
pub enum Prompt {
    Persona,
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

const PERSONA_PROMPT: &str = r"You are an expert South Indian food connoisseur for '{{store_name}}'. You help customers choose between {{categories}}. Be polite and warm, use words like 'Namaste', and emphasize traditional Andhra flavors from {{region}}. Keep responses concise.";

pub fn templates<'a>() -> Handlebars<'a> {
    let mut registry = Handlebars::new();
    registry.set_strict_mode(true);
    // Output goes to a model, not a browser
    registry.register_escape_fn(handlebars::no_escape);
    registry
        .register_template_string(&Prompt::Persona.to_string(), PERSONA_PROMPT)
        .expect("Failed to register template");
    registry
}

/// The system instruction sent with every assistant request
pub fn persona() -> Result<String> {
    let categories = Category::ALL
        .iter()
        .map(Category::label)
        .collect::<Vec<&str>>()
        .join(", ");
    let rendered = templates().render(
        &Prompt::Persona.to_string(),
        &json!({
            "store_name": STORE_NAME,
            "categories": categories,
            "region": "Machilipatnam",
        }),
    )?;
    Ok(rendered)
}
