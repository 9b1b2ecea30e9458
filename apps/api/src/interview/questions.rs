//! Suggested interviewer prompts for the practice UI.

use crate::models::resume::ResumeRecord;

pub const COMMON_QUESTIONS: &[&str] = &[
    "Can you tell me about yourself?",
    "What are your greatest strengths?",
    "What do you consider to be your weaknesses?",
    "Why are you interested in this position?",
    "Where do you see yourself in 5 years?",
    "Can you describe a challenging situation you've faced at work and how you handled it?",
    "How do you handle pressure or stressful situations?",
    "Do you have any questions for me?",
];

/// Common questions followed by ones derived from the loaded résumé.
/// The skill question names the first listed skill so the list is stable.
pub fn suggested(record: Option<&ResumeRecord>) -> Vec<String> {
    let mut questions: Vec<String> = COMMON_QUESTIONS.iter().map(|q| q.to_string()).collect();
    let Some(record) = record else {
        return questions;
    };

    if !record.experience.is_empty() {
        questions.extend(
            [
                "Can you tell me more about your experience at your most recent job?",
                "What were your main responsibilities in your previous position?",
                "What's the most significant project you've worked on?",
            ]
            .map(String::from),
        );
    }
    if let Some(skill) = record.skills.first() {
        questions.push(format!(
            "I see you have {skill} listed as a skill. Can you tell me about a time you used this skill effectively?"
        ));
        questions.push("How do you stay updated with the latest developments in your field?".to_string());
    }
    if !record.education.is_empty() {
        questions.push("How has your education prepared you for this career?".to_string());
    }
    questions
}
