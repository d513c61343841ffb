//! Recent-search list maintenance, kept pure so it is unit-testable.

/// Maximum entries kept in the suggestions dropdown.
pub const MAX_RECENT_SEARCHES: usize = 5;

/// Pushes a term to the front of the list: duplicates (case-insensitive)
/// are removed first, blanks are ignored, and the list is capped at
/// [`MAX_RECENT_SEARCHES`].
pub fn push_recent(list: &mut Vec<String>, term: &str) {
    let term = term.trim();
    if term.is_empty() {
        return;
    }
    list.retain(|existing| !existing.eq_ignore_ascii_case(term));
    list.insert(0, term.to_string());
    list.truncate(MAX_RECENT_SEARCHES);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_front_and_cap() {
        let mut list = Vec::new();
        for term in ["a", "b", "c", "d", "e", "f"] {
            push_recent(&mut list, term);
        }
        assert_eq!(list, vec!["f", "e", "d", "c", "b"]);
    }

    #[test]
    fn test_duplicate_moves_to_front() {
        let mut list = vec!["matrix".to_string(), "dune".to_string()];
        push_recent(&mut list, "Dune");
        assert_eq!(list, vec!["Dune", "matrix"]);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_blank_terms_are_ignored() {
        let mut list = vec!["dune".to_string()];
        push_recent(&mut list, "   ");
        assert_eq!(list, vec!["dune"]);
    }
}
