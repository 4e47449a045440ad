//! `{{key}}` placeholder substitution and extraction.
//!
//! Placeholders may carry whitespace inside the braces (`{{ nama }}`) and
//! keys match case-insensitively through [`VariableMap`]. A placeholder with
//! no value resolves to the empty string.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use crate::variables::VariableMap;

static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{\{\s*([\w-]+)\s*\}\}").expect("Invalid placeholder regex")
});

/// Replace every placeholder in `content` with its value from `map`.
pub fn substitute(content: &str, map: &VariableMap) -> String {
    PLACEHOLDER_RE
        .replace_all(content, |caps: &Captures| {
            map.get(&caps[1]).unwrap_or_default().to_string()
        })
        .into_owned()
}

/// Placeholder names in order of first appearance, without duplicates.
pub fn extract_placeholders(content: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    PLACEHOLDER_RE
        .captures_iter(content)
        .map(|caps| caps[1].to_string())
        .filter(|name| seen.insert(name.clone()))
        .collect()
}

/// Placeholder tokens exactly as written, e.g. `{{ NAMA }}`, without duplicates.
pub fn find_tokens(content: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    PLACEHOLDER_RE
        .find_iter(content)
        .map(|m| m.as_str().to_string())
        .filter(|token| seen.insert(token.clone()))
        .collect()
}

/// One find/replace pair for a remote document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Replacement {
    pub find: String,
    pub replace: String,
}

/// Find/replace pairs that make a remote copy match [`substitute`] output.
///
/// Every spelling of every key is emitted as both `{{key}}` and `{{ key }}`.
/// Tokens found in `template_text` that neither form covers (odd spacing,
/// unknown keys) are added verbatim so they resolve the same way the
/// preview resolves them.
pub fn replacement_plan(map: &VariableMap, template_text: &str) -> Vec<Replacement> {
    let mut seen = HashSet::new();
    let mut plan = Vec::new();
    let mut push = |find: String, replace: &str| {
        if seen.insert(find.to_lowercase()) {
            plan.push(Replacement {
                find,
                replace: replace.to_string(),
            });
        }
    };

    for (key, value) in map.entries() {
        push(format!("{{{{{key}}}}}"), &value);
        push(format!("{{{{ {key} }}}}"), &value);
    }

    for token in find_tokens(template_text) {
        let value = PLACEHOLDER_RE
            .captures(&token)
            .and_then(|caps| map.get(&caps[1]))
            .unwrap_or_default()
            .to_string();
        push(token, &value);
    }

    plan
}
