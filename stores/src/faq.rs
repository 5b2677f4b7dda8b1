/// A static help-center entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FaqEntry {
    pub category: &'static str,
    pub question: &'static str,
    pub answer: &'static str,
}

/// Entries whose question or answer contains every word of `query`,
/// ignoring case. A blank query matches everything.
pub fn search<'a>(entries: &'a [FaqEntry], query: &str) -> Vec<&'a FaqEntry> {
    let words: Vec<String> =
        query.split_whitespace().map(str::to_lowercase).collect();
    entries
        .iter()
        .filter(|entry| {
            let haystack =
                format!("{} {}", entry.question, entry.answer).to_lowercase();
            words.iter().all(|w| haystack.contains(w.as_str()))
        })
        .collect()
}
