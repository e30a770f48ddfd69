use crate::notes::Note;
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeSet, fmt::Display};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchedField {
    Title,
    Content,
    Tags,
}

impl Display for MatchedField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MatchedField::Title => write!(f, "title"),
            MatchedField::Content => write!(f, "content"),
            MatchedField::Tags => write!(f, "tags"),
        }
    }
}

/// How multi-term queries decide whether a note matches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// A note matches when at least one term is found in any field.
    #[default]
    Any,
    /// Every term has to be found in at least one field.
    All,
}

/// Per-field match counts of one note against a token sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMatches {
    /// Tokens contained in the title.
    pub title: usize,
    /// Tokens contained in the content.
    pub content: usize,
    /// Matching (tag, token) pairs.
    pub tag_hits: usize,
    /// Tokens found in at least one field.
    pub tokens_matched: usize,
}

impl FieldMatches {
    pub fn fields(&self) -> BTreeSet<MatchedField> {
        let mut fields = BTreeSet::new();
        if self.title > 0 {
            fields.insert(MatchedField::Title);
        }
        if self.content > 0 {
            fields.insert(MatchedField::Content);
        }
        if self.tag_hits > 0 {
            fields.insert(MatchedField::Tags);
        }
        fields
    }

    pub fn is_match(&self, mode: MatchMode, token_count: usize) -> bool {
        match mode {
            MatchMode::Any => self.tokens_matched > 0,
            MatchMode::All => token_count > 0 && self.tokens_matched == token_count,
        }
    }
}

/// One query token, matched case-insensitively with the same folding the
/// highlighter and snippet extractor use.
#[derive(Debug, Clone)]
pub struct TokenMatcher {
    token: String,
    pattern: Option<Regex>,
}

impl TokenMatcher {
    pub fn new(token: &str) -> Self {
        let pattern = match RegexBuilder::new(&regex::escape(token))
            .case_insensitive(true)
            .build()
        {
            Ok(re) => Some(re),
            Err(err) => {
                log::warn!("couldnt build pattern for {token:?}: {err}");
                None
            }
        };

        Self {
            token: token.to_lowercase(),
            pattern,
        }
    }

    pub fn is_in(&self, text: &str) -> bool {
        match &self.pattern {
            Some(re) => re.is_match(text),
            None => text.to_lowercase().contains(self.token.as_str()),
        }
    }
}

pub fn token_matchers(tokens: &[String]) -> Vec<TokenMatcher> {
    tokens.iter().map(|t| TokenMatcher::new(t)).collect()
}

/// Tokens must already be lowercase, see [`super::tokenize`].
pub fn match_fields(note: &Note, tokens: &[String]) -> FieldMatches {
    match_fields_with(note, &token_matchers(tokens))
}

pub(crate) fn match_fields_with(note: &Note, matchers: &[TokenMatcher]) -> FieldMatches {
    let mut matches = FieldMatches::default();

    for matcher in matchers {
        let mut found = false;

        if matcher.is_in(&note.title) {
            matches.title += 1;
            found = true;
        }

        if matcher.is_in(&note.content) {
            matches.content += 1;
            found = true;
        }

        let tag_hits = note.tags.iter().filter(|t| matcher.is_in(t)).count();
        if tag_hits > 0 {
            matches.tag_hits += tag_hits;
            found = true;
        }

        if found {
            matches.tokens_matched += 1;
        }
    }

    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::tokenize;
    use chrono::Utc;

    fn make_note(title: &str, content: &str, tags: &[&str]) -> Note {
        Note {
            id: 1,
            title: title.to_string(),
            content: content.to_string(),
            folder_id: None,
            tags: tags.iter().map(|s| s.to_string()).collect(),
            is_favorite: false,
            is_archived: false,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    #[test]
    fn test_title_and_content() {
        let note = make_note("Budget Meeting", "Discuss Q3 budget", &["work"]);
        let m = match_fields(&note, &tokenize("budget"));
        assert_eq!(m.title, 1);
        assert_eq!(m.content, 1);
        assert_eq!(m.tag_hits, 0);
        assert_eq!(
            m.fields(),
            BTreeSet::from([MatchedField::Title, MatchedField::Content])
        );
    }

    #[test]
    fn test_tag_hits_count_every_tag() {
        let note = make_note("", "", &["project-x", "Projects", "home"]);
        let m = match_fields(&note, &tokenize("proj"));
        assert_eq!(m.tag_hits, 2);
        assert_eq!(m.fields(), BTreeSet::from([MatchedField::Tags]));
    }

    #[test]
    fn test_any_vs_all() {
        let note = make_note("Rust guide", "", &[]);
        let tokens = tokenize("rust python");
        let m = match_fields(&note, &tokens);
        assert_eq!(m.tokens_matched, 1);
        assert!(m.is_match(MatchMode::Any, tokens.len()));
        assert!(!m.is_match(MatchMode::All, tokens.len()));

        let tokens = tokenize("rust guide");
        let m = match_fields(&note, &tokens);
        assert!(m.is_match(MatchMode::All, tokens.len()));
    }

    #[test]
    fn test_no_tokens_never_matches() {
        let note = make_note("anything", "", &[]);
        let m = match_fields(&note, &[]);
        assert!(!m.is_match(MatchMode::Any, 0));
        assert!(!m.is_match(MatchMode::All, 0));
    }

    #[test]
    fn test_folding_agrees_with_highlight() {
        // lowercasing "İ" yields "i" plus a combining dot, the regex fold does not
        let note = make_note("", "İNCE", &[]);
        let tokens = tokenize("i");
        let m = match_fields(&note, &tokens);
        assert_eq!(m.content, 0);
        assert!(!m.is_match(MatchMode::Any, tokens.len()));
        assert_eq!(crate::search::highlight(&note.content, "i"), "İNCE");

        let note = make_note("Straße", "", &["ÜBER"]);
        let m = match_fields(&note, &tokenize("strasse straße über"));
        assert_eq!(m.title, 1);
        assert_eq!(m.tag_hits, 1);
        assert_eq!(m.tokens_matched, 2);
    }

    #[test]
    fn test_case_insensitive_fields() {
        let note = make_note("GROCERY List", "MILK", &["Food"]);
        let m = match_fields(&note, &tokenize("grocery milk food"));
        assert_eq!(m.tokens_matched, 3);
    }
}
