//! Output filename construction and path sanitization.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Extension of the staging file the transfer engine streams into.
pub const TEMP_EXTENSION: &str = "part";

/// Placeholder rendered for template fields with no usable value.
pub const MISSING_FIELD_SENTINEL: &str = "__NONE__";

/// Template applied when the user supplies none.
pub const DEFAULT_FILENAME_TEMPLATE: &str = "{id} - {title}.{ext}";

/// Characters that are unsafe in filenames on at least one supported
/// platform. Removed outright rather than replaced, so sanitized names
/// never gain surprise whitespace.
const UNSAFE_PATH_CHARS: [char; 9] = ['<', '>', '"', '?', '\\', '/', '*', ':', '|'];

/// Errors from output path construction.
#[derive(Debug, Error)]
pub enum FilenameError {
    /// Could not create the parent directories of a templated path
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        /// The directory that could not be created
        path: PathBuf,
        /// The underlying IO error
        #[source]
        source: std::io::Error,
    },
}

impl FilenameError {
    /// Creates a `CreateDir` error.
    #[must_use]
    pub fn create_dir(path: &Path, source: std::io::Error) -> Self {
        Self::CreateDir {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Removes path-hostile characters, then trims trailing whitespace and dots.
///
/// Interior dots and spaces survive; only the tail is trimmed, since
/// Windows rejects names ending in either.
#[must_use]
pub fn sanitize_for_path(value: &str) -> String {
    let stripped: String = value
        .chars()
        .filter(|c| !UNSAFE_PATH_CHARS.contains(c))
        .collect();
    stripped
        .trim_end_matches(|c: char| c.is_whitespace() || c == '.')
        .to_string()
}

/// Returns `path` with its extension replaced (or appended when absent).
#[must_use]
pub fn replace_extension(path: &Path, new_extension: &str) -> PathBuf {
    let mut replaced = path.to_path_buf();
    replaced.set_extension(new_extension);
    replaced
}

/// Builds the output path for a download from the record's template fields.
///
/// Every field value is sanitized before substitution; fields that are
/// absent or sanitize down to nothing render as the missing-field
/// placeholder. Directory components can only come from literal separators
/// in the template itself. Parent directories of the rendered path are
/// created on demand.
///
/// A rendered extension equal to the staging extension gets an underscore
/// appended so the final path can never collide with its own temp file.
///
/// # Errors
///
/// Returns [`FilenameError::CreateDir`] when a parent directory cannot be
/// created.
pub fn create_filename(
    fields: &HashMap<&'static str, String>,
    template: Option<&str>,
) -> Result<PathBuf, FilenameError> {
    let template = template.unwrap_or(DEFAULT_FILENAME_TEMPLATE);
    let sanitized: HashMap<&str, String> = fields
        .iter()
        .map(|(key, value)| (*key, sanitize_for_path(value)))
        .collect();
    let rendered = render_template(template, &sanitized);
    let path = avoid_temp_collision(PathBuf::from(rendered));

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        std::fs::create_dir_all(parent).map_err(|e| FilenameError::create_dir(parent, e))?;
    }
    Ok(path)
}

/// Substitutes `{name}` placeholders from `fields`. `{{` and `}}` escape
/// to literal braces; an unterminated placeholder is kept as literal text.
fn render_template(template: &str, fields: &HashMap<&str, String>) -> String {
    let mut rendered = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '{' if chars.peek() == Some(&'{') => {
                chars.next();
                rendered.push('{');
            }
            '}' if chars.peek() == Some(&'}') => {
                chars.next();
                rendered.push('}');
            }
            '{' => {
                let mut name = String::new();
                let mut closed = false;
                for inner in chars.by_ref() {
                    if inner == '}' {
                        closed = true;
                        break;
                    }
                    name.push(inner);
                }
                if !closed {
                    rendered.push('{');
                    rendered.push_str(&name);
                    break;
                }
                match fields.get(name.as_str()) {
                    Some(value) if !value.is_empty() => rendered.push_str(value),
                    _ => rendered.push_str(MISSING_FIELD_SENTINEL),
                }
            }
            _ => rendered.push(ch),
        }
    }
    rendered
}

/// Appends an underscore to an extension that matches the staging suffix.
fn avoid_temp_collision(path: PathBuf) -> PathBuf {
    let collides = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case(TEMP_EXTENSION));
    if !collides {
        return path;
    }
    let mut path = path;
    path.set_extension(format!("{TEMP_EXTENSION}_"));
    path
}
