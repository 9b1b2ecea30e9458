//! Projects: entries headed by `<name>, <duration> Link` lines, bullets as description.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::resume::ProjectEntry;
use crate::parser::{first_hit, first_match, lines, strip_bullet, Strategy};

static LINKED_HEADER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?P<name>[^,\n]+?),\s*(?P<duration>[^\n]+?)\s+Link\s*$")
        .expect("project header pattern is valid")
});

static TECH_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?im)^\s*(?:technologies|tech stack|tools|built with)\s*:\s*(.+)$")
        .expect("technologies pattern is valid")
});

static TECH_DELIMITER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[,|•·]").expect("technology delimiter pattern is valid"));

/// Marker stored in `ProjectEntry.link` when the header carried a link.
pub const LINK_MARKER: &str = "Link";

/// Technologies recognized in free text when no explicit list is given.
pub const KNOWN_TECHNOLOGIES: &[&str] = &[
    "JavaScript",
    "TypeScript",
    "Python",
    "Java",
    "Rust",
    "Go",
    "C++",
    "C#",
    "Kotlin",
    "Swift",
    "React",
    "Next.js",
    "Vue",
    "Angular",
    "Redux",
    "Node.js",
    "Express",
    "Django",
    "Flask",
    "FastAPI",
    "Spring",
    "GraphQL",
    "HTML",
    "CSS",
    "Tailwind",
    "MongoDB",
    "PostgreSQL",
    "MySQL",
    "SQLite",
    "Redis",
    "Firebase",
    "Supabase",
    "Docker",
    "Kubernetes",
    "AWS",
    "GCP",
    "Azure",
    "TensorFlow",
    "PyTorch",
    "OpenCV",
    "Pandas",
    "NumPy",
    "Flutter",
    "Git",
];

/// Parsed header line: name, duration and link.
type Header = (String, Option<String>, Option<String>);

const HEADER_STRATEGIES: &[Strategy<Header>] = &[linked_header];
const TECH_STRATEGIES: &[Strategy<Vec<String>>] = &[explicit_technologies];

pub fn extract(body: &str) -> Vec<ProjectEntry> {
    split_entries(body)
        .iter()
        .map(|chunk| parse_entry(chunk))
        .collect()
}

/// Groups lines into one chunk per project.
///
/// With `Link` headers present, each header starts a chunk. Without them a
/// plain line following bullet lines starts the next project.
fn split_entries(body: &str) -> Vec<Vec<&str>> {
    let all: Vec<&str> = lines(body).collect();
    let has_headers = all.iter().any(|line| LINKED_HEADER.is_match(line));

    let mut chunks: Vec<Vec<&str>> = Vec::new();
    let mut previous_was_bullet = false;
    for line in all {
        let is_bullet = strip_bullet(line).is_some();
        let starts_entry = if has_headers {
            LINKED_HEADER.is_match(line)
        } else {
            previous_was_bullet && !is_bullet && !TECH_LINE.is_match(line)
        };

        match chunks.last_mut() {
            Some(chunk) if !starts_entry => chunk.push(line),
            _ => chunks.push(vec![line]),
        }
        previous_was_bullet = is_bullet;
    }
    chunks
}

fn parse_entry(chunk: &[&str]) -> ProjectEntry {
    let Some((first, rest)) = chunk.split_first() else {
        return ProjectEntry::default();
    };
    let (name, duration, link) = first_match(first, HEADER_STRATEGIES, plain_header);

    let bullets: Vec<&str> = rest
        .iter()
        .filter_map(|line| strip_bullet(line))
        .map(|b| b.trim_end_matches('.'))
        .filter(|b| !b.is_empty())
        .collect();
    let description = if bullets.is_empty() {
        rest.iter()
            .copied()
            .filter(|line| !TECH_LINE.is_match(line))
            .collect::<Vec<_>>()
            .join(" ")
    } else {
        bullets.join(". ")
    };

    let text = chunk.join("\n");
    let technologies = first_match(&text, TECH_STRATEGIES, scan_vocabulary);

    ProjectEntry {
        name,
        description,
        technologies,
        duration,
        link,
    }
}

/// `Ledger, Jan 2021 - Mar 2021 Link`
fn linked_header(line: &str) -> Option<Header> {
    let caps = LINKED_HEADER.captures(line)?;
    Some((
        caps["name"].trim().to_string(),
        Some(caps["duration"].trim().to_string()),
        Some(LINK_MARKER.to_string()),
    ))
}

fn plain_header(line: &str) -> Header {
    (strip_bullet(line).unwrap_or(line).to_string(), None, None)
}

fn explicit_technologies(text: &str) -> Option<Vec<String>> {
    let caps = TECH_LINE.captures(text)?;
    Some(
        TECH_DELIMITER
            .split(&caps[1])
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect(),
    )
}

/// Case-insensitive vocabulary scan. A hit must not sit inside a longer
/// word, so "Java" is not found in "JavaScript".
pub fn scan_vocabulary(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    KNOWN_TECHNOLOGIES
        .iter()
        .filter(|tech| contains_token(&lower, &tech.to_lowercase()))
        .map(|tech| tech.to_string())
        .collect()
}

fn contains_token(haystack: &str, needle: &str) -> bool {
    haystack.match_indices(needle).any(|(start, _)| {
        let before = haystack[..start].chars().next_back();
        let after = haystack[start + needle.len()..].chars().next();
        !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(|c| c.is_alphanumeric() || c == '+' || c == '#')
    })
}

/// Best-effort single technology list for a whole body, used by secondary scans.
pub fn technologies_in(text: &str) -> Vec<String> {
    first_hit(text, TECH_STRATEGIES).unwrap_or_else(|| scan_vocabulary(text))
}
