//! Résumé Parser: turns unstructured résumé text into a `ResumeRecord`.
//!
//! Each section is isolated by header (see `sections`) and handed to its own
//! extractor. Extractors are chains of small heuristics tried in order,
//! first hit wins, with a catch-all at the end. Nothing here can fail: a
//! heuristic that finds nothing just leaves the field empty.

pub mod certifications;
pub mod education;
pub mod experience;
pub mod personal;
pub mod projects;
pub mod sections;
pub mod skills;

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::models::resume::ResumeRecord;
use crate::parser::sections::{isolate, Section};

/// One heuristic. Returns `None` when it does not apply to its input.
pub type Strategy<T> = fn(&str) -> Option<T>;

/// Tries `strategies` in order and returns the first hit, else `fallback(input)`.
pub fn first_match<T>(input: &str, strategies: &[Strategy<T>], fallback: fn(&str) -> T) -> T {
    first_hit(input, strategies).unwrap_or_else(|| fallback(input))
}

/// Like `first_match`, for fields where "nothing found" is a valid answer.
pub fn first_hit<T>(input: &str, strategies: &[Strategy<T>]) -> Option<T> {
    strategies.iter().find_map(|strategy| strategy(input))
}

static BULLET: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*[•\-\*▪◦·‣●]\s*").expect("bullet pattern is valid"));

/// Returns the line without its bullet marker, or `None` if it has none.
pub fn strip_bullet(line: &str) -> Option<&str> {
    BULLET.find(line).map(|m| line[m.end()..].trim())
}

/// Non-empty trimmed lines of `body`.
pub(crate) fn lines(body: &str) -> impl Iterator<Item = &str> {
    body.lines().map(str::trim).filter(|line| !line.is_empty())
}

/// Appends `text` to an optional free-text field, space-separated.
pub(crate) fn append_text(field: &mut Option<String>, text: &str) {
    let text = text.trim();
    if text.is_empty() {
        return;
    }
    match field {
        Some(existing) => {
            existing.push(' ');
            existing.push_str(text);
        }
        None => *field = Some(text.to_string()),
    }
}

/// Trims the separators left behind when a date or label is cut out of a line.
pub(crate) fn trim_separators(text: &str) -> &str {
    text.trim_matches(|c: char| c.is_whitespace() || matches!(c, ',' | '|' | '-' | '–' | '—' | '·' | ':'))
}

/// Parses résumé text into a structured record. Pure and deterministic.
pub fn parse(text: &str) -> ResumeRecord {
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");
    let body = |section| isolate(&normalized, section);

    let record = ResumeRecord {
        raw_text: text.to_string(),
        personal_info: personal::extract(&normalized),
        skills: body(Section::Skills).map(skills::extract).unwrap_or_default(),
        education: body(Section::Education)
            .map(education::extract)
            .unwrap_or_default(),
        experience: body(Section::Experience)
            .map(experience::extract)
            .unwrap_or_default(),
        projects: body(Section::Projects)
            .map(projects::extract)
            .unwrap_or_default(),
        certifications: body(Section::Certifications)
            .map(certifications::extract)
            .unwrap_or_default(),
    };

    debug!(
        skills = record.skills.len(),
        education = record.education.len(),
        experience = record.experience.len(),
        projects = record.projects.len(),
        certifications = record.certifications.len(),
        "Parsed resume"
    );

    record
}

#[cfg(test)]
mod tests {
    use super::*;

    const FULL_RESUME: &str = "Jane Doe\n\
        +1 555 123 4567 | jane.doe@example.com\n\
        ◇ Austin, TX ◇ linkedin.com/in/janedoe\n\
        \n\
        SUMMARY\n\
        Backend engineer who likes boring, reliable systems.\n\
        \n\
        SKILLS\n\
        Languages: Go, Rust, C++\n\
        Tools: Docker | Kubernetes\n\
        \n\
        EXPERIENCE\n\
        2019-2022 Acme Corp\n\
        Senior Engineer\n\
        • Cut p99 latency by 40%\n\
        • Led migration to Kubernetes\n\
        2016-2019 Initech LLC\n\
        - Built billing pipeline\n\
        \n\
        EDUCATION\n\
        B.S. Computer Science, University of Texas, 2012-2016\n\
        \n\
        PROJECTS\n\
        Ledger, Jan 2021 - Mar 2021 Link\n\
        • Double-entry bookkeeping service\n\
        Technologies: Rust, PostgreSQL\n\
        \n\
        CERTIFICATIONS\n\
        AWS Solutions Architect, Amazon, 2021\n";

    #[test]
    fn test_text_without_headers_yields_empty_sections() {
        let text = "hello there, this is just a note\nwith two lines";
        let record = parse(text);
        assert_eq!(record.raw_text, text);
        assert!(record.skills.is_empty());
        assert!(record.education.is_empty());
        assert!(record.experience.is_empty());
        assert!(record.projects.is_empty());
        assert!(record.certifications.is_empty());
    }

    #[test]
    fn test_empty_text_never_panics() {
        let record = parse("");
        assert!(record.is_sparse());
        assert_eq!(record.personal_info, Default::default());
    }

    #[test]
    fn test_skills_with_category_label() {
        let record = parse("SKILLS\nLanguages: Go, Rust, C++");
        assert_eq!(record.skills, vec!["Go", "Rust", "C++"]);
    }

    #[test]
    fn test_upload_scenario_skills_and_education() {
        let record = parse("SKILLS\nPython, SQL\n\nEDUCATION\nBachelor's, MIT (GPA: 3.9) 2018-2022");
        assert_eq!(record.skills, vec!["Python", "SQL"]);
        assert_eq!(record.education.len(), 1);
        let entry = &record.education[0];
        assert_eq!(entry.degree.as_deref(), Some("Bachelor's"));
        assert_eq!(entry.school.as_deref(), Some("MIT"));
        assert_eq!(entry.gpa.as_deref(), Some("3.9"));
        assert_eq!(entry.year.as_deref(), Some("2018-2022"));
    }

    #[test]
    fn test_experience_duration_and_achievements() {
        let record = parse("EXPERIENCE\n2019-2022 Acme Corp\n• Shipped v2\n- Hired 4 engineers\n* Cut costs 10%");
        assert_eq!(record.experience.len(), 1);
        let entry = &record.experience[0];
        assert_eq!(entry.duration.as_deref(), Some("2019-2022"));
        assert_eq!(entry.company.as_deref(), Some("Acme Corp"));
        assert_eq!(
            entry.achievements,
            vec!["Shipped v2", "Hired 4 engineers", "Cut costs 10%"]
        );
    }

    #[test]
    fn test_full_resume() {
        let record = parse(FULL_RESUME);

        assert_eq!(record.personal_info.name.as_deref(), Some("Jane Doe"));
        assert_eq!(record.personal_info.email.as_deref(), Some("jane.doe@example.com"));
        assert_eq!(record.personal_info.phone.as_deref(), Some("+1 555 123 4567"));
        assert_eq!(record.personal_info.location.as_deref(), Some("Austin, TX"));
        assert_eq!(record.personal_info.linkedin_handle.as_deref(), Some("janedoe"));
        assert_eq!(
            record.personal_info.summary.as_deref(),
            Some("Backend engineer who likes boring, reliable systems.")
        );

        assert_eq!(record.skills, vec!["Go", "Rust", "C++", "Docker", "Kubernetes"]);

        assert_eq!(record.experience.len(), 2);
        assert_eq!(record.experience[0].role.as_deref(), Some("Senior Engineer"));
        assert_eq!(record.experience[0].achievements.len(), 2);
        assert_eq!(record.experience[1].company.as_deref(), Some("Initech LLC"));
        assert_eq!(record.experience[1].duration.as_deref(), Some("2016-2019"));

        assert_eq!(record.education.len(), 1);
        assert_eq!(
            record.education[0].school.as_deref(),
            Some("University of Texas")
        );
        assert_eq!(
            record.education[0].degree.as_deref(),
            Some("B.S. Computer Science")
        );

        assert_eq!(record.projects.len(), 1);
        assert_eq!(record.projects[0].name, "Ledger");
        assert_eq!(record.projects[0].technologies, vec!["Rust", "PostgreSQL"]);

        assert_eq!(record.certifications, vec!["AWS Solutions Architect"]);
    }

    #[test]
    fn test_reparse_of_raw_text_is_identical() {
        let first = parse(FULL_RESUME);
        let second = parse(&first.raw_text);
        assert_eq!(first, second);
    }

    #[test]
    fn test_crlf_line_endings_are_handled() {
        let record = parse("SKILLS\r\nPython, SQL\r\n");
        assert_eq!(record.skills, vec!["Python", "SQL"]);
        assert_eq!(record.raw_text, "SKILLS\r\nPython, SQL\r\n");
    }

    #[test]
    fn test_strip_bullet() {
        assert_eq!(strip_bullet("• Shipped it"), Some("Shipped it"));
        assert_eq!(strip_bullet("  - Shipped it"), Some("Shipped it"));
        assert_eq!(strip_bullet("Shipped it"), None);
    }

    #[test]
    fn test_first_match_falls_back() {
        fn never(_: &str) -> Option<usize> {
            None
        }
        fn digits(s: &str) -> Option<usize> {
            s.parse().ok()
        }
        assert_eq!(first_match("42", &[never, digits], |s| s.len()), 42);
        assert_eq!(first_match("abc", &[never, digits], |s| s.len()), 3);
    }
}
