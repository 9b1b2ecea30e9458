//! Skills: delimiter-separated tokens, optionally grouped under `Category:` labels.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::parser::{first_match, lines, strip_bullet, Strategy};

static CATEGORY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z][A-Za-z0-9 /&+.\-]{0,40}):\s*(.*)$").expect("category pattern is valid")
});

static DELIMITER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[,|•·▪]").expect("delimiter pattern is valid"));

const STRATEGIES: &[Strategy<Vec<String>>] = &[categorized];

pub fn extract(body: &str) -> Vec<String> {
    first_match(body, STRATEGIES, delimited)
}

/// Applies when at least one line carries a `Category:` label.
fn categorized(body: &str) -> Option<Vec<String>> {
    let has_category = lines(body).any(|line| CATEGORY.is_match(line));
    if !has_category {
        return None;
    }

    let skills = lines(body)
        .flat_map(|line| {
            let values = CATEGORY
                .captures(line)
                .and_then(|caps| caps.get(2))
                .map_or(line, |m| m.as_str());
            split_values(values)
        })
        .collect();
    Some(skills)
}

fn delimited(body: &str) -> Vec<String> {
    lines(body).flat_map(split_values).collect()
}

fn split_values(line: &str) -> Vec<String> {
    let line = strip_bullet(line).unwrap_or(line);
    DELIMITER
        .split(line)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comma_and_pipe_delimiters() {
        assert_eq!(extract("Python, SQL | Docker"), vec!["Python", "SQL", "Docker"]);
    }

    #[test]
    fn test_bullet_delimiters() {
        assert_eq!(extract("React • Node.js · AWS"), vec!["React", "Node.js", "AWS"]);
    }

    #[test]
    fn test_category_labels_are_stripped() {
        let body = "Languages: Go, Rust, C++\nDatabases: PostgreSQL";
        assert_eq!(extract(body), vec!["Go", "Rust", "C++", "PostgreSQL"]);
    }

    #[test]
    fn test_mixed_labelled_and_plain_lines() {
        let body = "Languages: Go\nGit, Linux";
        assert_eq!(extract(body), vec!["Go", "Git", "Linux"]);
    }

    #[test]
    fn test_empty_tokens_are_dropped() {
        assert_eq!(extract("Python,, ,SQL,"), vec!["Python", "SQL"]);
    }

    #[test]
    fn test_leading_line_bullets_are_stripped() {
        assert_eq!(extract("- Python\n- SQL"), vec!["Python", "SQL"]);
    }

    #[test]
    fn test_empty_body() {
        assert!(extract("").is_empty());
    }
}
