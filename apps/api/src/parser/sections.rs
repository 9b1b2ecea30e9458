//! Section isolation: locates a section header and slices out its body.
//!
//! A body runs from just after the header to whichever comes first:
//! another section's name, a blank line followed by an ALL-CAPS heading,
//! or the end of the text. Overlapping aliases (a skill category literally
//! called "Experience") will cut a body short; that is a known limitation.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Skills,
    Education,
    Experience,
    Projects,
    Certifications,
    Summary,
    Interests,
}

impl Section {
    /// Header aliases, longest first so the alternation prefers them at a tie.
    fn aliases(self) -> &'static [&'static str] {
        match self {
            Section::Skills => &["technical skills", "core competencies", "skills"],
            Section::Education => &["academic background", "education"],
            Section::Experience => &[
                "professional experience",
                "employment history",
                "work experience",
                "work history",
                "experience",
            ],
            Section::Projects => &["personal projects", "academic projects", "projects"],
            Section::Certifications => &["certifications", "certificates", "licenses"],
            Section::Summary => &["professional summary", "career summary", "summary"],
            Section::Interests => &["personal interests", "interests", "hobbies", "about me"],
        }
    }

    /// The boundary name this section must not stop on.
    fn own_boundary(self) -> Option<&'static str> {
        match self {
            Section::Skills => Some("skills"),
            Section::Education => Some("education"),
            Section::Experience => Some("experience"),
            Section::Projects => Some("projects"),
            Section::Certifications => Some("certifications"),
            Section::Summary | Section::Interests => None,
        }
    }

    const ALL: [Section; 7] = [
        Section::Skills,
        Section::Education,
        Section::Experience,
        Section::Projects,
        Section::Certifications,
        Section::Summary,
        Section::Interests,
    ];
}

/// Names that end any section body.
const BOUNDARY_NAMES: &[&str] = &[
    "skills",
    "education",
    "experience",
    "projects",
    "certifications",
    "references",
];

struct SectionPatterns {
    header: Regex,
    boundary: Regex,
}

fn word_alternation(words: &[&str]) -> String {
    let alternatives: Vec<String> = words.iter().map(|w| regex::escape(w)).collect();
    format!(r"(?i)\b(?:{})\b", alternatives.join("|"))
}

static PATTERNS: Lazy<HashMap<Section, SectionPatterns>> = Lazy::new(|| {
    Section::ALL
        .iter()
        .map(|&section| {
            let boundaries: Vec<&str> = BOUNDARY_NAMES
                .iter()
                .copied()
                .filter(|name| Some(*name) != section.own_boundary())
                .collect();
            let patterns = SectionPatterns {
                header: Regex::new(&word_alternation(section.aliases()))
                    .expect("section header pattern is valid"),
                boundary: Regex::new(&word_alternation(&boundaries))
                    .expect("section boundary pattern is valid"),
            };
            (section, patterns)
        })
        .collect()
});

static CAPS_HEADING: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\n[ \t]*\n[ \t]*[A-Z][A-Z0-9&/ \t-]{2,}[ \t]*(?:\n|$)")
        .expect("caps heading pattern is valid")
});

/// Returns the body of `section`, or `None` when none of its aliases occur.
///
/// The body is trimmed of surrounding whitespace and of the `:` / `-` that
/// often trail a header. An existing but empty section yields `Some("")`.
pub fn isolate(text: &str, section: Section) -> Option<&str> {
    let patterns = &PATTERNS[&section];
    let header = patterns.header.find(text)?;
    let start = header.end();
    let rest = &text[start..];

    // Headings are only looked for once the body has some content, so a body
    // opening with a blank line is not mistaken for a boundary.
    let content_offset = rest.len() - rest.trim_start().len();

    let mut end = rest.len();
    if let Some(m) = patterns.boundary.find(rest) {
        end = end.min(m.start());
    }
    if let Some(m) = CAPS_HEADING.find_at(rest, content_offset) {
        end = end.min(m.start());
    }

    Some(
        rest[..end]
            .trim()
            .trim_start_matches([':', '-'])
            .trim(),
    )
}
