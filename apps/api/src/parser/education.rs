//! Education: line scan keyed on degree keywords, `Degree, School (GPA: X)` lines and years.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::models::resume::EducationEntry;
use crate::parser::{append_text, first_match, lines, strip_bullet, trim_separators, Strategy};

static SHAPED: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?P<degree>[^,(]+),\s*(?P<school>[^,(]+?)\s*\(\s*GPA\s*:?\s*(?P<gpa>\d+(?:\.\d+)?)\s*\)",
    )
    .expect("shaped education pattern is valid")
});

/// Two-letter abbreviations only count in capitals so lowercase words like
/// "ma" or "bs" don't open entries.
static DEGREE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:bachelor(?:'s|s)?|master(?:'s|s)?|ph\.?d|mba|(?-i:B\.?S|M\.?S|B\.?A|M\.?A))\b",
    )
    .expect("degree pattern is valid")
});

static YEAR: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)\b(?:19|20)\d{2}\b(?:\s*(?:-|–|—|to)\s*(?:(?:19|20)\d{2}\b|present\b|current\b|now\b))?",
    )
    .expect("year pattern is valid")
});

static SCHOOL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(?:university|college|school|institute)\b").expect("school pattern is valid")
});

static GPA: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\(?\s*\bgpa\b\s*[:\-]?\s*(\d+(?:\.\d+)?)\s*\)?").expect("gpa pattern is valid")
});

const STRATEGIES: &[Strategy<Vec<EducationEntry>>] = &[structured];

pub fn extract(body: &str) -> Vec<EducationEntry> {
    first_match(body, STRATEGIES, one_per_line)
}

/// Accumulates lines into the entry currently being built.
#[derive(Default)]
struct Scan {
    entries: Vec<EducationEntry>,
    open: Option<EducationEntry>,
}

impl Scan {
    fn flush(&mut self) {
        if let Some(entry) = self.open.take() {
            self.entries.push(entry);
        }
    }

    fn open_mut(&mut self) -> &mut EducationEntry {
        self.open.get_or_insert_with(EducationEntry::default)
    }

    /// Starts a new entry unless the open one has no degree yet.
    fn start_degree(&mut self, entry: EducationEntry) {
        let merge = matches!(&self.open, Some(open) if open.degree.is_none());
        if merge {
            let open = self.open_mut();
            open.degree = entry.degree;
            open.school = open.school.take().or(entry.school);
            open.year = open.year.take().or(entry.year);
            open.gpa = open.gpa.take().or(entry.gpa);
        } else {
            self.flush();
            self.open = Some(entry);
        }
    }

    /// While the open entry has a degree but no school, a line naming an
    /// institution is its school line unless the degree keyword comes first.
    /// "Harvard University, Cambridge, MA" is a school, not a master's.
    fn names_degree(&self, line: &str) -> bool {
        let Some(degree) = DEGREE.find(line) else {
            return false;
        };
        let awaiting_school =
            matches!(&self.open, Some(open) if open.degree.is_some() && open.school.is_none());
        match SCHOOL.find(line) {
            Some(school) if awaiting_school => degree.start() < school.start(),
            _ => true,
        }
    }

    fn line(&mut self, line: &str) {
        let line = strip_bullet(line).unwrap_or(line);

        if let Some(entry) = shaped_line(line) {
            self.start_degree(entry);
        } else if self.names_degree(line) {
            self.start_degree(degree_line(line));
        } else if let Some(year) = YEAR.find(line) {
            let fills_open = matches!(&self.open, Some(open) if open.year.is_none());
            if !fills_open {
                self.flush();
            }
            self.open_mut().year = Some(year.as_str().to_string());
            let rest = line.replace(year.as_str(), "");
            self.classify(trim_separators(&rest));
        } else if SCHOOL.is_match(line) || GPA.is_match(line) {
            self.classify(line);
        } else if let Some(open) = &mut self.open {
            append_text(&mut open.description, line);
        }
    }

    fn classify(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let open = self.open_mut();
        if let Some(gpa) = GPA.captures(text).and_then(|caps| caps.get(1)) {
            if open.gpa.is_none() {
                open.gpa = Some(gpa.as_str().to_string());
                return;
            }
        }
        if SCHOOL.is_match(text) && open.school.is_none() {
            open.school = Some(text.to_string());
        } else {
            append_text(&mut open.description, text);
        }
    }
}

/// `Degree, School (GPA: 3.9) 2018-2022`
fn shaped_line(line: &str) -> Option<EducationEntry> {
    let caps = SHAPED.captures(line)?;
    Some(EducationEntry {
        degree: Some(caps["degree"].trim().to_string()),
        school: Some(caps["school"].trim().to_string()),
        gpa: Some(caps["gpa"].to_string()),
        year: YEAR.find(&line[caps[0].len()..]).map(|m| m.as_str().to_string()),
        description: None,
    })
}

/// A line carrying a degree keyword; comma segments naming an institution
/// become the school, the rest the degree.
fn degree_line(line: &str) -> EducationEntry {
    let year = YEAR.find(line).map(|m| m.as_str().to_string());
    let gpa = GPA
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string());

    let mut cleaned = GPA.replace_all(line, "").into_owned();
    if let Some(year) = &year {
        cleaned = cleaned.replace(year.as_str(), "");
    }

    let mut school = None;
    let mut degree_parts = Vec::new();
    for segment in cleaned.split(',').map(trim_separators).filter(|s| !s.is_empty()) {
        if school.is_none() && SCHOOL.is_match(segment) {
            school = Some(segment.to_string());
        } else {
            degree_parts.push(segment);
        }
    }

    EducationEntry {
        degree: Some(degree_parts.join(", ")).filter(|d| !d.is_empty()),
        school,
        year,
        gpa,
        description: None,
    }
}

fn structured(body: &str) -> Option<Vec<EducationEntry>> {
    let mut scan = Scan::default();
    for line in lines(body) {
        scan.line(line);
    }
    scan.flush();

    let found_anything = scan
        .entries
        .iter()
        .any(|e| e.degree.is_some() || e.school.is_some() || e.year.is_some());
    found_anything.then_some(scan.entries)
}

fn one_per_line(body: &str) -> Vec<EducationEntry> {
    lines(body)
        .map(|line| EducationEntry {
            degree: Some(line.to_string()),
            ..Default::default()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shaped_line_with_gpa() {
        let entries = extract("Bachelor's, MIT (GPA: 3.9) 2018-2022");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].degree.as_deref(), Some("Bachelor's"));
        assert_eq!(entries[0].school.as_deref(), Some("MIT"));
        assert_eq!(entries[0].gpa.as_deref(), Some("3.9"));
        assert_eq!(entries[0].year.as_deref(), Some("2018-2022"));
    }

    #[test]
    fn test_degree_then_school_lines() {
        let body = "Master of Science in Computer Science\nStanford University\n2020 - Present";
        let entries = extract(body);
        assert_eq!(entries.len(), 1);
        assert_eq!(
            entries[0].degree.as_deref(),
            Some("Master of Science in Computer Science")
        );
        assert_eq!(entries[0].school.as_deref(), Some("Stanford University"));
        assert_eq!(entries[0].year.as_deref(), Some("2020 - Present"));
    }

    #[test]
    fn test_school_first_then_degree_stays_one_entry() {
        let body = "Georgia Institute of Technology\nBS Computer Engineering 2014-2018";
        let entries = extract(body);
        assert_eq!(entries.len(), 1);
        assert_eq!(
            entries[0].school.as_deref(),
            Some("Georgia Institute of Technology")
        );
        assert_eq!(entries[0].degree.as_deref(), Some("BS Computer Engineering"));
        assert_eq!(entries[0].year.as_deref(), Some("2014-2018"));
    }

    #[test]
    fn test_new_degree_starts_new_entry() {
        let body = "MBA, Wharton School, 2020\nBachelor of Arts, Yale University, 2012";
        let entries = extract(body);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].degree.as_deref(), Some("MBA"));
        assert_eq!(entries[0].school.as_deref(), Some("Wharton School"));
        assert_eq!(entries[1].school.as_deref(), Some("Yale University"));
        assert_eq!(entries[1].year.as_deref(), Some("2012"));
    }

    #[test]
    fn test_second_year_opens_fresh_entry() {
        let body = "Some College 2010-2012\nOther College 2012-2014";
        let entries = extract(body);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].school.as_deref(), Some("Some College"));
        assert_eq!(entries[1].school.as_deref(), Some("Other College"));
    }

    #[test]
    fn test_gpa_and_description_lines() {
        let body = "PhD Physics, Caltech\nGPA: 4.0\nThesis on dark matter halos";
        let entries = extract(body);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].gpa.as_deref(), Some("4.0"));
        assert_eq!(
            entries[0].description.as_deref(),
            Some("Thesis on dark matter halos")
        );
    }

    #[test]
    fn test_unstructured_falls_back_to_one_entry_per_line() {
        let entries = extract("Self-taught via online courses\nBootcamp graduate");
        assert_eq!(entries.len(), 2);
        assert_eq!(
            entries[0].degree.as_deref(),
            Some("Self-taught via online courses")
        );
        assert_eq!(entries[1].degree.as_deref(), Some("Bootcamp graduate"));
    }

    #[test]
    fn test_state_code_on_school_line_is_not_a_degree() {
        let body = "Bachelor of Science in Computer Science\nHarvard University, Cambridge, MA\n2014-2018";
        let entries = extract(body);
        assert_eq!(entries.len(), 1);
        assert_eq!(
            entries[0].degree.as_deref(),
            Some("Bachelor of Science in Computer Science")
        );
        assert_eq!(
            entries[0].school.as_deref(),
            Some("Harvard University, Cambridge, MA")
        );
        assert_eq!(entries[0].year.as_deref(), Some("2014-2018"));
    }

    #[test]
    fn test_degree_before_school_still_opens_new_entry() {
        let body = "BS Mathematics\nMS Data Science, Stanford University";
        let entries = extract(body);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].degree.as_deref(), Some("BS Mathematics"));
        assert_eq!(entries[1].degree.as_deref(), Some("MS Data Science"));
        assert_eq!(entries[1].school.as_deref(), Some("Stanford University"));
    }

    #[test]
    fn test_lowercase_abbreviation_is_not_a_degree() {
        assert!(!DEGREE.is_match("worked with ma and pa shops"));
        assert!(DEGREE.is_match("M.S. Computer Science"));
        assert!(DEGREE.is_match("master's in physics"));
    }

    #[test]
    fn test_empty_body_is_empty() {
        assert!(extract("").is_empty());
    }
}
