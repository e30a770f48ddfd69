use regex::{Regex, RegexBuilder};

pub const MARK_OPEN: &str = "<mark>";
pub const MARK_CLOSE: &str = "</mark>";

/// Build a case-insensitive pattern matching any of `terms` literally.
///
/// Longer terms come first so the leftmost match prefers them. Returns `None`
/// when there is nothing to match.
pub fn terms_pattern<S: AsRef<str>>(terms: &[S]) -> Option<Regex> {
    let mut terms: Vec<&str> = terms
        .iter()
        .map(|t| t.as_ref())
        .filter(|t| !t.is_empty())
        .collect();
    if terms.is_empty() {
        return None;
    }

    terms.sort_by(|a, b| b.chars().count().cmp(&a.chars().count()).then(a.cmp(b)));
    terms.dedup();

    let alternation = terms
        .iter()
        .map(|t| regex::escape(t))
        .collect::<Vec<_>>()
        .join("|");

    match RegexBuilder::new(&alternation).case_insensitive(true).build() {
        Ok(re) => Some(re),
        Err(err) => {
            // escaped literals only fail on size limits
            log::warn!("couldnt build highlight pattern: {err}");
            None
        }
    }
}

/// Wrap every case-insensitive occurrence of `term` in `<mark>` tags.
pub fn highlight(text: &str, term: &str) -> String {
    highlight_terms(text, &[term])
}

/// Like [`highlight`] for several terms at once; marks never nest.
pub fn highlight_terms<S: AsRef<str>>(text: &str, terms: &[S]) -> String {
    match terms_pattern(terms) {
        Some(re) => highlight_with(text, &re),
        None => text.to_string(),
    }
}

pub(crate) fn highlight_with(text: &str, re: &Regex) -> String {
    re.replace_all(text, |caps: &regex::Captures| {
        format!("{MARK_OPEN}{}{MARK_CLOSE}", &caps[0])
    })
    .into_owned()
}
