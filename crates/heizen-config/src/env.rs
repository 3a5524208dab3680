use std::{borrow::Cow, sync::LazyLock};

use regex::{Captures, Regex};

/// `{{ env.VAR }}` or `{{ env.VAR | default("fallback") }}`
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\{\{\s*(?P<key>[a-zA-Z0-9_.]+)\s*(?:\|\s*default\("(?P<default>[^"]*)"\))?\s*\}\}"#)
        .expect("placeholder pattern must compile")
});

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub(crate) enum ExpandError {
    #[error("environment variable not found: `{0}`")]
    MissingVar(String),
    #[error("only variables scoped with 'env.' are supported: `{0}`")]
    UnsupportedScope(String),
}

/// Substitute environment placeholders in raw TOML text
///
/// Runs before deserialization so config structs hold plain `String` and
/// `SecretString` values. Comment lines are copied through untouched, which
/// lets a sample config mention variables that are not set.
pub(crate) fn expand_env(input: &str) -> Result<String, ExpandError> {
    let mut output = String::with_capacity(input.len());

    for line in input.split_inclusive('\n') {
        if line.trim_start().starts_with('#') {
            output.push_str(line);
        } else {
            output.push_str(&expand_line(line)?);
        }
    }

    Ok(output)
}

fn expand_line(line: &str) -> Result<Cow<'_, str>, ExpandError> {
    let mut expanded = String::new();
    let mut cursor = 0;

    for captures in PLACEHOLDER.captures_iter(line) {
        let Some(whole) = captures.get(0) else { continue };

        expanded.push_str(&line[cursor..whole.start()]);
        expanded.push_str(&resolve(&captures)?);
        cursor = whole.end();
    }

    if cursor == 0 {
        return Ok(Cow::Borrowed(line));
    }

    expanded.push_str(&line[cursor..]);
    Ok(Cow::Owned(expanded))
}

fn resolve(captures: &Captures<'_>) -> Result<String, ExpandError> {
    let key = &captures["key"];

    let Some(name) = key.strip_prefix("env.").filter(|name| !name.contains('.')) else {
        return Err(ExpandError::UnsupportedScope(key.to_owned()));
    };

    match (std::env::var(name), captures.name("default")) {
        (Ok(value), _) => Ok(value),
        (Err(_), Some(fallback)) => Ok(fallback.as_str().to_owned()),
        (Err(_), None) => Err(ExpandError::MissingVar(name.to_owned())),
    }
}
