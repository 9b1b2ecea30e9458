//! Experience: line scan keyed on date ranges, bullets become achievements.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::resume::ExperienceEntry;
use crate::parser::{append_text, first_match, lines, strip_bullet, trim_separators, Strategy};

const MONTH: &str = r"(?:jan|feb|mar|apr|may|jun|jul|aug|sep|sept|oct|nov|dec)[a-z]*\.?\s+";

static DATE_RANGE: Lazy<Regex> = Lazy::new(|| {
    let year = r"(?:19|20)\d{2}\b";
    let pattern = format!(
        r"(?i)\b(?:{MONTH})?{year}(?:\s*(?:-|–|—|to)\s*(?:(?:{MONTH})?{year}|present\b|current\b|now\b))?"
    );
    Regex::new(&pattern).expect("date range pattern is valid")
});

static COMPANY: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:inc|corp|corporation|ltd|llc|company)\b").expect("company pattern is valid")
});

/// Unclassified lines shorter than this are taken as the role title.
const ROLE_MAX_CHARS: usize = 50;

const STRATEGIES: &[Strategy<Vec<ExperienceEntry>>] = &[dated];

pub fn extract(body: &str) -> Vec<ExperienceEntry> {
    first_match(body, STRATEGIES, one_per_line)
}

#[derive(Default)]
struct Scan {
    entries: Vec<ExperienceEntry>,
    open: Option<ExperienceEntry>,
    saw_date: bool,
}

impl Scan {
    fn flush(&mut self) {
        if let Some(entry) = self.open.take() {
            self.entries.push(entry);
        }
    }

    fn open_mut(&mut self) -> &mut ExperienceEntry {
        self.open.get_or_insert_with(ExperienceEntry::default)
    }

    fn line(&mut self, line: &str) {
        if let Some(achievement) = strip_bullet(line) {
            if !achievement.is_empty() {
                self.open_mut().achievements.push(achievement.to_string());
            }
            return;
        }

        if let Some(date) = DATE_RANGE.find(line) {
            self.saw_date = true;
            let fills_open = matches!(&self.open, Some(open) if open.duration.is_none());
            if !fills_open {
                self.flush();
            }
            self.open_mut().duration = Some(date.as_str().trim().to_string());

            let rest = format!("{} {}", &line[..date.start()], &line[date.end()..]);
            self.classify(trim_separators(&rest));
        } else {
            self.classify(line);
        }
    }

    fn classify(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let open = self.open_mut();
        if COMPANY.is_match(text) && open.company.is_none() {
            open.company = Some(text.to_string());
        } else if text.chars().count() < ROLE_MAX_CHARS && open.role.is_none() {
            open.role = Some(text.to_string());
        } else {
            append_text(&mut open.description, text);
        }
    }
}

fn dated(body: &str) -> Option<Vec<ExperienceEntry>> {
    let mut scan = Scan::default();
    for line in lines(body) {
        scan.line(line);
    }
    scan.flush();
    scan.saw_date.then_some(scan.entries)
}

fn one_per_line(body: &str) -> Vec<ExperienceEntry> {
    lines(body)
        .map(|line| ExperienceEntry {
            description: Some(line.to_string()),
            ..Default::default()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_line_with_company_and_bullets() {
        let entries = extract("2019-2022 Acme Corp\n• Built the API\n- Mentored interns");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].duration.as_deref(), Some("2019-2022"));
        assert_eq!(entries[0].company.as_deref(), Some("Acme Corp"));
        assert_eq!(entries[0].achievements, vec!["Built the API", "Mentored interns"]);
    }

    #[test]
    fn test_role_company_then_dates() {
        let body = "Software Engineer\nGlobex Corporation\nJan 2020 - Present\n* Owned search";
        let entries = extract(body);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].role.as_deref(), Some("Software Engineer"));
        assert_eq!(entries[0].company.as_deref(), Some("Globex Corporation"));
        assert_eq!(entries[0].duration.as_deref(), Some("Jan 2020 - Present"));
        assert_eq!(entries[0].achievements, vec!["Owned search"]);
    }

    #[test]
    fn test_next_date_flushes_entry() {
        let body = "2020-2022 Initech LLC\nBackend Developer\n2018-2020 Hooli Inc.\nIntern";
        let entries = extract(body);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].role.as_deref(), Some("Backend Developer"));
        assert_eq!(entries[1].company.as_deref(), Some("Hooli Inc."));
        assert_eq!(entries[1].role.as_deref(), Some("Intern"));
        assert_eq!(entries[1].duration.as_deref(), Some("2018-2020"));
    }

    #[test]
    fn test_long_lines_become_description() {
        let body = "2021 - present Startup\nWorked across the whole stack on a product used by thousands of small businesses";
        let entries = extract(body);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].role.as_deref(), Some("Startup"));
        assert!(entries[0]
            .description
            .as_deref()
            .unwrap()
            .starts_with("Worked across the whole stack"));
    }

    #[test]
    fn test_no_dates_falls_back_to_one_entry_per_line() {
        let entries = extract("Freelance web design\nVolunteer tutor");
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].description.as_deref(), Some("Freelance web design"));
        assert!(entries[0].role.is_none());
    }

    #[test]
    fn test_bullets_keep_original_order() {
        let entries = extract("2015\n• one\n• two\n• three");
        assert_eq!(entries[0].achievements, vec!["one", "two", "three"]);
    }
}
