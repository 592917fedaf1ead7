//! Rendering of scaffold files against the resolved locals map.

use minijinja::{Environment, Value};

use crate::domain::{AppError, Locals};

/// Render one file's contents as a template against `locals`.
///
/// Undefined keys render as empty per the engine's default semantics, so an
/// empty locals map is valid input; syntax and evaluation errors surface as
/// `RenderError`.
pub fn render_str(content: &str, locals: &Locals, file: &str) -> Result<String, AppError> {
    let mut env = Environment::new();
    env.set_keep_trailing_newline(true);

    env.add_template(file, content).map_err(|e| AppError::RenderError {
        file: file.to_string(),
        details: e.to_string(),
    })?;

    let template = env.get_template(file).map_err(|e| AppError::RenderError {
        file: file.to_string(),
        details: e.to_string(),
    })?;

    template.render(Value::from_serialize(locals)).map_err(|e| AppError::RenderError {
        file: file.to_string(),
        details: e.to_string(),
    })
}
