use serde::{Deserialize, Serialize};

/// Contact and profile facts found near the top of a résumé.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalInfo {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub summary: Option<String>,
    pub linkedin_handle: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EducationEntry {
    pub degree: Option<String>,
    pub school: Option<String>,
    pub year: Option<String>,
    pub gpa: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExperienceEntry {
    pub role: Option<String>,
    pub company: Option<String>,
    pub duration: Option<String>,
    pub achievements: Vec<String>,
    pub description: Option<String>,
}

/// `name` and `description` are always present (possibly empty) once a
/// projects section was found at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectEntry {
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub duration: Option<String>,
    pub link: Option<String>,
}

/// Structured view of one uploaded résumé.
///
/// Produced once by the parser and never mutated afterwards; a new upload
/// replaces the whole record. Every field is independently optional: an empty
/// list or `None` means the heuristics found nothing, not that parsing failed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeRecord {
    /// Full extracted text, kept for the responder's secondary scans.
    pub raw_text: String,
    pub personal_info: PersonalInfo,
    pub skills: Vec<String>,
    pub education: Vec<EducationEntry>,
    pub experience: Vec<ExperienceEntry>,
    pub projects: Vec<ProjectEntry>,
    pub certifications: Vec<String>,
}

impl ResumeRecord {
    /// True when no section produced anything.
    pub fn is_sparse(&self) -> bool {
        self.skills.is_empty()
            && self.education.is_empty()
            && self.experience.is_empty()
            && self.projects.is_empty()
            && self.certifications.is_empty()
    }
}
