//! Built-in material used before a résumé is loaded or when a field is empty.

use crate::models::resume::{EducationEntry, ExperienceEntry, ProjectEntry};

pub const DEFAULT_SKILLS: &[&str] = &[
    "JavaScript",
    "TypeScript",
    "React",
    "Node.js",
    "Python",
    "SQL",
    "Git",
];

pub fn default_experience() -> Vec<ExperienceEntry> {
    vec![ExperienceEntry {
        role: Some("Software Developer".to_string()),
        company: Some("a growing product company".to_string()),
        duration: Some("2021 - Present".to_string()),
        achievements: vec![
            "Built and maintained customer-facing web features end to end".to_string(),
            "Improved page load times by refactoring the data-fetching layer".to_string(),
            "Reviewed code and mentored newer developers on the team".to_string(),
        ],
        description: None,
    }]
}

pub fn default_education() -> Vec<EducationEntry> {
    vec![EducationEntry {
        degree: Some("Bachelor's degree in Computer Science".to_string()),
        school: Some("a state university".to_string()),
        year: None,
        gpa: None,
        description: None,
    }]
}

// Defaults for the responder's "extracted details" block.

pub const DEFAULT_NAME: &str = "the candidate";
pub const DEFAULT_LOCATION: &str = "not specified";
pub const DEFAULT_INSTITUTION: &str = "my university";
pub const DEFAULT_PERSONAL_BLURB: &str = "I grew up in a close-knit family that valued curiosity \
    and hard work, and outside of work I enjoy reading, hiking, and tinkering with side projects.";

pub fn default_projects() -> Vec<ProjectEntry> {
    vec![
        ProjectEntry {
            name: "Task Manager App".to_string(),
            description: "A full-stack task tracker with authentication and real-time updates"
                .to_string(),
            technologies: vec!["React".to_string(), "Node.js".to_string(), "MongoDB".to_string()],
            duration: None,
            link: None,
        },
        ProjectEntry {
            name: "Portfolio Website".to_string(),
            description: "A personal site showcasing my work, built with a static-site workflow"
                .to_string(),
            technologies: vec!["HTML".to_string(), "CSS".to_string(), "JavaScript".to_string()],
            duration: None,
            link: None,
        },
    ]
}
