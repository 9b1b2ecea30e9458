//! Prompt construction: résumé context block, project constraint and
//! recent history, assembled into the answer template.

use std::fmt::Write as _;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::facts::{defaults, FactSnapshot};
use crate::interview::conversation::{Role, Turn};
use crate::interview::prompts::{ANSWER_PROMPT_TEMPLATE, PROJECT_CONSTRAINT_HEADER};
use crate::llm_client::prompts::{GROUNDING_INSTRUCTION, SPOKEN_STYLE_INSTRUCTION};
use crate::models::resume::{EducationEntry, ExperienceEntry, ProjectEntry};
use crate::parser::sections::{isolate, Section};
use crate::parser::{certifications, lines, personal, projects};

/// Number of most recent turns carried into the prompt.
pub const HISTORY_WINDOW: usize = 6;

static PROJECT_QUESTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\bprojects?\b|what have you (?:made|built|developed)")
        .expect("project question pattern is valid")
});

static INSTITUTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?:[A-Z][A-Za-z.&'-]*[ \t]+)*(?:University|College|Institute|School)(?:[ \t]+of(?:[ \t]+[A-Z][A-Za-z.&'-]*)+)?",
    )
    .expect("institution pattern is valid")
});

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([a-z_]+)\}").expect("placeholder pattern is valid"));

pub fn is_project_question(question: &str) -> bool {
    PROJECT_QUESTION.is_match(question)
}

/// Details pulled from the raw résumé text by secondary scans. Each falls
/// back to a built-in value when its scan finds nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateDetails {
    pub name: String,
    pub location: String,
    pub institution: String,
    pub personal_blurb: String,
    pub projects: Vec<ProjectEntry>,
    pub certifications: Vec<String>,
}

impl CandidateDetails {
    pub fn scan(raw_text: &str) -> Self {
        Self {
            name: personal::name(raw_text).unwrap_or_else(|| defaults::DEFAULT_NAME.to_string()),
            location: personal::location(raw_text)
                .unwrap_or_else(|| defaults::DEFAULT_LOCATION.to_string()),
            institution: institution(raw_text)
                .unwrap_or_else(|| defaults::DEFAULT_INSTITUTION.to_string()),
            personal_blurb: personal_blurb(raw_text)
                .unwrap_or_else(|| defaults::DEFAULT_PERSONAL_BLURB.to_string()),
            projects: scanned_projects(raw_text).unwrap_or_else(defaults::default_projects),
            certifications: isolate(raw_text, Section::Certifications)
                .map(certifications::extract)
                .unwrap_or_default(),
        }
    }
}

fn institution(text: &str) -> Option<String> {
    INSTITUTION
        .find(text)
        .map(|m| m.as_str().trim().to_string())
}

fn personal_blurb(text: &str) -> Option<String> {
    let body = isolate(text, Section::Interests)?;
    let joined = lines(body).collect::<Vec<_>>().join(" ");
    (!joined.is_empty()).then_some(joined)
}

fn scanned_projects(text: &str) -> Option<Vec<ProjectEntry>> {
    let mut found = projects::extract(isolate(text, Section::Projects)?);
    found.retain(|p| !p.name.is_empty());
    for project in found.iter_mut().filter(|p| p.technologies.is_empty()) {
        project.technologies = projects::technologies_in(&project.description);
    }
    (!found.is_empty()).then_some(found)
}

// ──────────────────────────────────────────────────────────────
// Rendering
// ──────────────────────────────────────────────────────────────

fn render_experience(out: &mut String, entries: &[ExperienceEntry]) {
    out.push_str("Experience:\n");
    for entry in entries {
        let role = entry.role.as_deref().unwrap_or("Role not listed");
        let _ = write!(out, "- {role}");
        if let Some(company) = &entry.company {
            let _ = write!(out, " at {company}");
        }
        if let Some(duration) = &entry.duration {
            let _ = write!(out, " ({duration})");
        }
        out.push('\n');
        if let Some(description) = &entry.description {
            let _ = writeln!(out, "  {description}");
        }
        for achievement in &entry.achievements {
            let _ = writeln!(out, "  * {achievement}");
        }
    }
}

fn render_education(out: &mut String, entries: &[EducationEntry]) {
    out.push_str("Education:\n");
    for entry in entries {
        let parts: Vec<&str> = [entry.degree.as_deref(), entry.school.as_deref(), entry.year.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        let _ = write!(out, "- {}", parts.join(", "));
        if let Some(gpa) = &entry.gpa {
            let _ = write!(out, " (GPA {gpa})");
        }
        out.push('\n');
    }
}

fn render_project(out: &mut String, project: &ProjectEntry) {
    let _ = write!(out, "{}", project.name);
    if !project.technologies.is_empty() {
        let _ = write!(out, " ({})", project.technologies.join(", "));
    }
    if !project.description.is_empty() {
        let _ = write!(out, ": {}", project.description);
    }
}

/// The résumé facts block placed at the top of every prompt.
pub fn context_block(facts: &FactSnapshot, details: &CandidateDetails) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Skills: {}", facts.skills_or_fallback().join(", "));
    render_experience(&mut out, &facts.experience_or_fallback());
    render_education(&mut out, &facts.education_or_fallback());

    out.push_str("\nExtracted resume details:\n");
    let _ = writeln!(out, "Name: {}", details.name);
    let _ = writeln!(out, "Location: {}", details.location);
    let _ = writeln!(out, "Education institution: {}", details.institution);
    let _ = writeln!(out, "Personal background: {}", details.personal_blurb);
    out.push_str("Projects:\n");
    for project in &details.projects {
        out.push_str("- ");
        render_project(&mut out, project);
        out.push('\n');
    }
    if details.certifications.is_empty() {
        out.push_str("Certifications: none listed\n");
    } else {
        let _ = writeln!(out, "Certifications: {}", details.certifications.join(", "));
    }
    out
}

/// Enumerated project list for project questions, empty otherwise.
pub fn project_constraint(question: &str, details: &CandidateDetails) -> String {
    if !is_project_question(question) {
        return String::new();
    }
    let mut out = format!("\n{PROJECT_CONSTRAINT_HEADER}\n");
    for (i, project) in details.projects.iter().enumerate() {
        let _ = write!(out, "{}. ", i + 1);
        render_project(&mut out, project);
        out.push('\n');
    }
    out
}

pub fn render_history(history: &[Turn]) -> String {
    if history.is_empty() {
        return "(This is the first question of the interview.)".to_string();
    }
    let start = history.len().saturating_sub(HISTORY_WINDOW);
    history[start..]
        .iter()
        .map(|turn| {
            let speaker = match turn.role {
                Role::Interviewer => "Interviewer",
                Role::Candidate => "You",
            };
            format!("{speaker}: {}", turn.content)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Substitutes `{name}` placeholders in one pass. Inserted values are never
/// rescanned, so braces in résumé text or earlier questions come through
/// verbatim. Unknown placeholders are left alone.
fn fill_template(template: &str, values: &[(&str, &str)]) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            values
                .iter()
                .find(|(name, _)| *name == &caps[1])
                .map_or_else(|| caps[0].to_string(), |(_, value)| value.to_string())
        })
        .into_owned()
}

pub fn build_prompt(question: &str, facts: &FactSnapshot, history: &[Turn]) -> String {
    let details = CandidateDetails::scan(facts.raw_text());
    fill_template(
        ANSWER_PROMPT_TEMPLATE,
        &[
            ("grounding_instruction", GROUNDING_INSTRUCTION),
            ("style_instruction", SPOKEN_STYLE_INSTRUCTION),
            ("project_constraint", &project_constraint(question, &details)),
            ("history", &render_history(history)),
            ("context", &context_block(facts, &details)),
            ("question", question.trim()),
        ],
    )
}
