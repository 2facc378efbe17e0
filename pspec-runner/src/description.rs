// Copyright (c) The pspec Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turning identifiers and declared descriptions into readable report text.
//!
//! Descriptions are resolved in this order:
//!
//! 1. A description template, substituted with the test's parameters. Failures
//!    here are errors in the test itself, and are returned to the caller.
//! 2. A declared description, such as a docstring. Only the first non-empty
//!    line is used.
//! 3. The leaf name, with a conventional prefix stripped and underscores
//!    replaced by spaces.

use crate::errors::DescriptionError;
use camino::Utf8Path;
use std::{borrow::Cow, collections::BTreeMap};

/// Where the description of a single test comes from.
#[derive(Clone, Debug, PartialEq)]
pub enum DescriptionSource {
    /// No description was declared.
    None,

    /// A description was declared and is ready to display.
    Declared(String),

    /// A description template that still needs parameters substituted.
    Template {
        /// The template, with `{name}` placeholders.
        template: String,

        /// The parameters the test was invoked with.
        parameters: BTreeMap<String, serde_json::Value>,
    },
}

impl DescriptionSource {
    /// Resolves this source into display text, using `leaf_name` as a
    /// fallback.
    pub fn resolve(
        &self,
        leaf_name: &str,
        strip_prefixes: &[String],
    ) -> Result<String, DescriptionError> {
        match self {
            Self::Template {
                template,
                parameters,
            } => {
                let substituted = substitute_template(template, parameters)?;
                match first_line(&substituted) {
                    Some(line) => Ok(line.to_owned()),
                    None => Ok(leaf_description(leaf_name, strip_prefixes)),
                }
            }
            Self::Declared(description) => match first_line(description) {
                Some(line) => Ok(line.to_owned()),
                None => Ok(leaf_description(leaf_name, strip_prefixes)),
            },
            Self::None => Ok(leaf_description(leaf_name, strip_prefixes)),
        }
    }
}

/// Returns the first non-blank line of `text`, trimmed.
pub fn first_line(text: &str) -> Option<&str> {
    text.lines().map(str::trim).find(|line| !line.is_empty())
}

/// Converts a leaf test name into a readable description.
///
/// The first prefix in `strip_prefixes` that matches is removed, unless that
/// would leave nothing behind. Underscores become spaces.
pub fn leaf_description(name: &str, strip_prefixes: &[String]) -> String {
    let stripped = strip_prefixes
        .iter()
        .find_map(|prefix| {
            name.strip_prefix(prefix.as_str())
                .filter(|rest| rest.chars().any(|c| c != '_'))
        })
        .unwrap_or(name);

    spaced_words(stripped).join(" ")
}

/// Converts a scope segment name, such as a class name, into header text.
///
/// `TestFooBar` becomes `Foo bar` and `describe_the_thing` becomes
/// `describe the thing`.
pub fn scope_header(name: &str) -> String {
    let stripped = ["Test", "test_"]
        .into_iter()
        .find_map(|prefix| {
            name.strip_prefix(prefix).filter(|rest| {
                rest.starts_with(|c: char| c.is_uppercase() || c == '_')
                    || (prefix.ends_with('_') && !rest.is_empty())
            })
        })
        .unwrap_or(name);

    let mut words = Vec::new();
    for word in spaced_words(stripped) {
        words.extend(split_camel_case(word));
    }

    words
        .iter()
        .enumerate()
        .map(|(index, word)| {
            if index == 0 {
                Cow::Borrowed(*word)
            } else {
                Cow::Owned(word.to_lowercase())
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Returns the name a module is displayed with.
///
/// Module names that already carry a file extension are shown as is; others get
/// `suffix` appended.
pub fn module_display_name<'a>(name: &'a str, suffix: &str) -> Cow<'a, str> {
    if suffix.is_empty() || Utf8Path::new(name).extension().is_some() {
        Cow::Borrowed(name)
    } else {
        Cow::Owned(format!("{name}{suffix}"))
    }
}

/// Substitutes `{name}` placeholders in `template` with `parameters`.
///
/// `{{` and `}}` produce literal braces. Anything after a `:`, `!`, `.` or `[`
/// inside a placeholder (a format spec, conversion or attribute access) is
/// ignored. String parameters are inserted as is, other values in their JSON
/// form.
pub fn substitute_template(
    template: &str,
    parameters: &BTreeMap<String, serde_json::Value>,
) -> Result<String, DescriptionError> {
    let malformed = |position, reason| DescriptionError::MalformedTemplate {
        template: template.to_owned(),
        position,
        reason,
    };

    let mut out = String::with_capacity(template.len());
    let mut chars = template.char_indices().peekable();

    while let Some((position, c)) = chars.next() {
        match c {
            '{' if chars.next_if(|&(_, next)| next == '{').is_some() => out.push('{'),
            '}' if chars.next_if(|&(_, next)| next == '}').is_some() => out.push('}'),
            '}' => return Err(malformed(position, "single `}` encountered")),
            '{' => {
                let start = position + 1;
                let end = loop {
                    match chars.next() {
                        Some((end, '}')) => break end,
                        Some((nested, '{')) => {
                            return Err(malformed(nested, "nested `{` in placeholder"));
                        }
                        Some(_) => {}
                        None => return Err(malformed(position, "unclosed placeholder")),
                    }
                };

                let field = &template[start..end];
                let key = field
                    .split([':', '!', '.', '['])
                    .next()
                    .unwrap_or_default();
                if key.is_empty() {
                    return Err(malformed(position, "placeholder has no parameter name"));
                }

                match parameters.get(key) {
                    Some(serde_json::Value::String(s)) => out.push_str(s),
                    Some(other) => out.push_str(&other.to_string()),
                    None => {
                        return Err(DescriptionError::MissingParameter {
                            template: template.to_owned(),
                            key: key.to_owned(),
                        });
                    }
                }
            }
            c => out.push(c),
        }
    }

    Ok(out)
}

fn spaced_words(s: &str) -> Vec<&str> {
    s.split(['_', ' ']).filter(|word| !word.is_empty()).collect()
}

// Splits at lower-to-upper transitions, and before the last capital of an
// acronym that is followed by lowercase ("HTTPServer" -> "HTTP", "Server").
fn split_camel_case(word: &str) -> Vec<&str> {
    let chars: Vec<(usize, char)> = word.char_indices().collect();
    let mut parts = Vec::new();
    let mut start = 0;

    for i in 1..chars.len() {
        let (index, c) = chars[i];
        let prev = chars[i - 1].1;
        let next_is_lower = chars.get(i + 1).is_some_and(|&(_, n)| n.is_lowercase());
        let boundary = c.is_uppercase()
            && (prev.is_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_uppercase() && next_is_lower));
        if boundary {
            parts.push(&word[start..index]);
            start = index;
        }
    }
    parts.push(&word[start..]);
    parts
}
