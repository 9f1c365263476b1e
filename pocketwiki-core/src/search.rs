//! Title search.
//!
//! A search either matches some stored title exactly (ignoring case), in
//! which case the caller redirects straight to that entry, or it yields
//! the titles containing the query as a substring.

/// Result of a title search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Some title equals the query case-insensitively; holds the stored
    /// casing. With several case-variants the first in input order wins.
    Exact(String),
    /// Titles containing the query case-insensitively, input order
    /// preserved. Possibly empty.
    Matches(Vec<String>),
}

/// Search a title list for a query, case-insensitively.
pub fn search_titles(titles: &[String], query: &str) -> SearchOutcome {
    let needle = query.to_lowercase();

    let matches: Vec<String> = titles
        .iter()
        .filter(|title| title.to_lowercase().contains(&needle))
        .cloned()
        .collect();

    if let Some(exact) = matches.iter().find(|title| title.to_lowercase() == needle) {
        return SearchOutcome::Exact(exact.clone());
    }
    SearchOutcome::Matches(matches)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titles(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn exact_match_wins_regardless_of_case() {
        let all = titles(&["CSS", "Git", "Python"]);
        assert_eq!(
            search_titles(&all, "python"),
            SearchOutcome::Exact("Python".into())
        );
    }

    #[test]
    fn substring_matches_keep_order() {
        let all = titles(&["CSS", "Git", "GitHub", "Python"]);
        assert_eq!(
            search_titles(&all, "git"),
            SearchOutcome::Exact("Git".into())
        );
        assert_eq!(
            search_titles(&all, "hub"),
            SearchOutcome::Matches(titles(&["GitHub"]))
        );
        assert_eq!(
            search_titles(&all, "t"),
            SearchOutcome::Matches(titles(&["Git", "GitHub", "Python"]))
        );
    }

    #[test]
    fn no_match_is_an_empty_list() {
        let all = titles(&["CSS"]);
        assert_eq!(search_titles(&all, "xyz"), SearchOutcome::Matches(vec![]));
    }

    #[test]
    fn empty_query_matches_everything() {
        let all = titles(&["A", "B"]);
        assert_eq!(search_titles(&all, ""), SearchOutcome::Matches(all.clone()));
    }
}
