use anyhow::{Context, Result, anyhow};
use std::fs;
use std::path::Path;

/// Resolves the prompt from whichever input source was supplied. A literal
/// prompt is returned unchanged; a file is read as UTF-8 in full. File
/// failures name the offending path and are fatal to the invocation.
pub fn resolve_prompt(prompt: Option<String>, file: Option<&Path>) -> Result<String> {
    match (prompt, file) {
        (Some(text), None) => Ok(text),
        (None, Some(path)) => fs::read_to_string(path)
            .with_context(|| format!("File error ({})", path.display())),
        // clap's input group makes the remaining combinations unrepresentable,
        // but callers constructing arguments by hand still get a clean error.
        _ => Err(anyhow!("exactly one of --prompt or --file must be supplied")),
    }
}
