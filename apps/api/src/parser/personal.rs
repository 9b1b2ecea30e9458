//! Personal info: name, contact line, location, LinkedIn and summary.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::resume::PersonalInfo;
use crate::parser::sections::{isolate, Section};
use crate::parser::{first_hit, lines, Strategy};

static NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*([A-Z][a-z]+(?:[-'][A-Za-z]+)?(?:[ \t]+[A-Z][a-z]+(?:[-'][A-Za-z]+)?){1,3})\b")
        .expect("name pattern is valid")
});

/// A phone-like token and an email separated by a delimiter glyph.
static CONTACT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?P<phone>\+?\(?\d[\d \t().\-]{8,}\d)\s*[|•◇◆♦·,/]\s*(?P<email>[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,})",
    )
    .expect("contact pattern is valid")
});

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[A-Za-z0-9._%+\-]+@[A-Za-z0-9.\-]+\.[A-Za-z]{2,}").expect("email pattern is valid")
});

static PHONE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\+?\(?\d[\d \t().\-]{8,}\d").expect("phone pattern is valid")
});

static LOCATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[◇◆♦]\s*([^◇◆♦\n]+?)\s*[◇◆♦]").expect("location pattern is valid")
});

static LINKEDIN_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)linkedin\.com/in/([A-Za-z0-9_\-%]+)").expect("linkedin pattern is valid")
});

const MIN_PHONE_DIGITS: usize = 10;

const EMAIL_STRATEGIES: &[Strategy<String>] = &[joint_email, standalone_email];
const PHONE_STRATEGIES: &[Strategy<String>] = &[joint_phone, standalone_phone];
const LINKEDIN_STRATEGIES: &[Strategy<String>] = &[linkedin_url, linkedin_literal];

pub fn extract(text: &str) -> PersonalInfo {
    PersonalInfo {
        name: name(text),
        email: first_hit(text, EMAIL_STRATEGIES),
        phone: first_hit(text, PHONE_STRATEGIES),
        location: location(text),
        summary: summary(text),
        linkedin_handle: first_hit(text, LINKEDIN_STRATEGIES),
    }
}

/// A run of two to four capitalized words at the very start of the text.
pub fn name(text: &str) -> Option<String> {
    NAME.captures(text).map(|caps| caps[1].to_string())
}

pub fn location(text: &str) -> Option<String> {
    LOCATION.captures(text).map(|caps| caps[1].to_string())
}

fn summary(text: &str) -> Option<String> {
    let body = isolate(text, Section::Summary)?;
    let joined = lines(body).collect::<Vec<_>>().join(" ");
    (!joined.is_empty()).then_some(joined)
}

fn digit_count(token: &str) -> usize {
    token.chars().filter(char::is_ascii_digit).count()
}

fn joint_contact(text: &str) -> Option<(String, String)> {
    CONTACT
        .captures_iter(text)
        .find(|caps| digit_count(&caps["phone"]) >= MIN_PHONE_DIGITS)
        .map(|caps| (caps["phone"].trim().to_string(), caps["email"].to_string()))
}

fn joint_email(text: &str) -> Option<String> {
    joint_contact(text).map(|(_, email)| email)
}

fn joint_phone(text: &str) -> Option<String> {
    joint_contact(text).map(|(phone, _)| phone)
}

fn standalone_email(text: &str) -> Option<String> {
    EMAIL.find(text).map(|m| m.as_str().to_string())
}

fn standalone_phone(text: &str) -> Option<String> {
    PHONE
        .find_iter(text)
        .find(|m| digit_count(m.as_str()) >= MIN_PHONE_DIGITS)
        .map(|m| m.as_str().trim().to_string())
}

fn linkedin_url(text: &str) -> Option<String> {
    LINKEDIN_URL.captures(text).map(|caps| caps[1].to_string())
}

fn linkedin_literal(text: &str) -> Option<String> {
    text.contains("LinkedIn").then(|| "LinkedIn".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_from_leading_capitalized_words() {
        assert_eq!(name("Ada Lovelace\nAnalyst").as_deref(), Some("Ada Lovelace"));
        assert_eq!(name("  Mary-Jane Watson\n").as_deref(), Some("Mary-Jane Watson"));
    }

    #[test]
    fn test_name_rejects_headers_and_lowercase() {
        assert_eq!(name("SKILLS\nRust"), None);
        assert_eq!(name("resume of someone"), None);
        assert_eq!(name("Resume\nRust"), None);
    }

    #[test]
    fn test_joint_contact_line() {
        let info = extract("Sam Lee\n(555) 123-4567 • sam@lee.dev");
        assert_eq!(info.phone.as_deref(), Some("(555) 123-4567"));
        assert_eq!(info.email.as_deref(), Some("sam@lee.dev"));
    }

    #[test]
    fn test_short_numbers_are_not_phones() {
        let info = extract("Call 555-1234 or mail me@x.io");
        assert_eq!(info.phone, None);
        assert_eq!(info.email.as_deref(), Some("me@x.io"));
    }

    #[test]
    fn test_location_between_diamonds() {
        assert_eq!(location("◇ Pune, India ◇").as_deref(), Some("Pune, India"));
        assert_eq!(location("no glyphs here"), None);
    }

    #[test]
    fn test_linkedin_handle_prefers_url() {
        let info = extract("LinkedIn: https://www.linkedin.com/in/sam-lee-42");
        assert_eq!(info.linkedin_handle.as_deref(), Some("sam-lee-42"));
        let info = extract("Find me on LinkedIn");
        assert_eq!(info.linkedin_handle.as_deref(), Some("LinkedIn"));
    }

    #[test]
    fn test_summary_lines_are_joined() {
        let info = extract("Summary\nFirst line\nsecond line\n\nSKILLS\nGo");
        assert_eq!(info.summary.as_deref(), Some("First line second line"));
    }

    #[test]
    fn test_empty_text_has_no_personal_info() {
        assert_eq!(extract(""), PersonalInfo::default());
    }
}
