//! Fixed-vocabulary skill lookup.

/// Curated skill keywords: language names, tools, soft skills. Lowercase,
/// in reporting order.
pub const SKILL_VOCABULARY: &[&str] = &[
    "python",
    "java",
    "machine learning",
    "sql",
    "communication",
    "teamwork",
    "javascript",
    "typescript",
    "c++",
    "c#",
    "go",
    "rust",
    "php",
    "html",
    "css",
    "react",
    "angular",
    "node.js",
    "django",
    "spring",
    "docker",
    "kubernetes",
    "aws",
    "azure",
    "git",
    "linux",
    "postgresql",
    "mongodb",
    "data analysis",
    "deep learning",
    "leadership",
    "project management",
    "agile",
    "problem solving",
];

/// Case-insensitive substring containment per vocabulary entry; hits are
/// reported in vocabulary order, not document order. No word-boundary check,
/// so "java" also fires inside "javascript".
pub fn match_skills(text: &str, vocabulary: &[&str]) -> Vec<String> {
    let haystack = text.to_lowercase();
    vocabulary
        .iter()
        .copied()
        .filter(|skill| haystack.contains(skill))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_follow_vocabulary_order() {
        let found = match_skills("I know Python and SQL", &["python", "sql", "java"]);
        assert_eq!(found, vec!["python", "sql"]);
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let found = match_skills("PYTHON and sQl", &["python", "sql"]);
        assert_eq!(found, vec!["python", "sql"]);
    }

    #[test]
    fn test_substring_containment_over_matches() {
        // "java" inside "javascript" counts as a hit.
        let found = match_skills("JavaScript developer", &["java", "javascript"]);
        assert_eq!(found, vec!["java", "javascript"]);
    }

    #[test]
    fn test_no_hits_yield_empty_list() {
        assert!(match_skills("nothing relevant", &["python"]).is_empty());
        assert!(match_skills("", SKILL_VOCABULARY).is_empty());
    }
}
