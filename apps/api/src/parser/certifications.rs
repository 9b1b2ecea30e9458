use crate::parser::{lines, strip_bullet};

/// One certification per line, cut at the first comma to drop issuer and date.
pub fn extract(body: &str) -> Vec<String> {
    lines(body)
        .map(|line| strip_bullet(line).unwrap_or(line))
        .filter_map(|line| line.split(',').next())
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(String::from)
        .collect()
}
