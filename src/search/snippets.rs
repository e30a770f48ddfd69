use super::highlight::terms_pattern;
use regex::Regex;
use serde::{Deserialize, Serialize};

const DEFAULT_CONTEXT_CHARS: usize = 50;
const DEFAULT_MAX_SNIPPETS: usize = 3;
const DEFAULT_FALLBACK_CHARS: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnippetConfig {
    /// Characters kept on each side of a match.
    #[serde(default = "default_context_chars")]
    pub context_chars: usize,
    #[serde(default = "default_max_snippets")]
    pub max_snippets: usize,
    /// Leading characters returned when nothing in the content matches.
    #[serde(default = "default_fallback_chars")]
    pub fallback_chars: usize,
}

fn default_context_chars() -> usize {
    DEFAULT_CONTEXT_CHARS
}

fn default_max_snippets() -> usize {
    DEFAULT_MAX_SNIPPETS
}

fn default_fallback_chars() -> usize {
    DEFAULT_FALLBACK_CHARS
}

impl Default for SnippetConfig {
    fn default() -> Self {
        Self {
            context_chars: DEFAULT_CONTEXT_CHARS,
            max_snippets: DEFAULT_MAX_SNIPPETS,
            fallback_chars: DEFAULT_FALLBACK_CHARS,
        }
    }
}

/// Excerpts of `content` around occurrences of the query terms.
///
/// Windows never overlap and are returned in text order. Window arithmetic is
/// done in characters so multi-byte text is never split.
pub fn extract_snippets(content: &str, query: &str, config: &SnippetConfig) -> Vec<String> {
    let tokens = super::tokenize(query);
    extract_with(content, terms_pattern(&tokens).as_ref(), config)
}

pub(crate) fn extract_with(
    content: &str,
    pattern: Option<&Regex>,
    config: &SnippetConfig,
) -> Vec<String> {
    if content.is_empty() || config.max_snippets == 0 {
        return vec![];
    }

    // byte offset of every char, plus the end of the string
    let boundaries: Vec<usize> = content
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(content.len()))
        .collect();
    let char_len = boundaries.len() - 1;
    let to_char = |byte: usize| boundaries.partition_point(|&b| b < byte);

    let mut snippets = vec![];
    let mut covered_until = 0;

    if let Some(re) = pattern {
        for m in re.find_iter(content) {
            let start = to_char(m.start());
            let end = to_char(m.end());

            if !snippets.is_empty() && start < covered_until {
                continue;
            }

            let from = start
                .saturating_sub(config.context_chars)
                .max(covered_until);
            let to = (end + config.context_chars).min(char_len);

            snippets.push(content[boundaries[from]..boundaries[to]].to_string());
            covered_until = to;

            if snippets.len() >= config.max_snippets {
                break;
            }
        }
    }

    if snippets.is_empty() {
        let to = config.fallback_chars.min(char_len);
        snippets.push(content[..boundaries[to]].to_string());
    }

    snippets
}
