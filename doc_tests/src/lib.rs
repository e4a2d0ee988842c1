// Checks that keep SECURITY.md in step with the vault contract.

use regex::Regex;

fn header(line: &str) -> Option<(usize, &str)> {
    if !line.starts_with('#') {
        return None;
    }
    let level = line.chars().take_while(|&c| c == '#').count();
    Some((level, line[level..].trim()))
}

/// Returns the named section (header line included) up to the next header of
/// the same or a higher level. Empty if the section is absent.
pub fn extract_section(content: &str, section_name: &str) -> String {
    let mut section = String::new();
    let mut level = None;

    for line in content.lines() {
        match (header(line), level) {
            (Some((current, title)), None) if title == section_name => level = Some(current),
            (Some((current, _)), Some(open)) if current <= open => break,
            (_, None) => continue,
            _ => {}
        }
        section.push_str(line);
        section.push('\n');
    }

    section
}

pub fn section_exists(content: &str, section_name: &str) -> bool {
    content
        .lines()
        .filter_map(header)
        .any(|(_, title)| title == section_name)
}

/// Parses rows of the form `| 3 | `Unauthorized` | ... |` into (code, variant).
pub fn error_codes(content: &str) -> Vec<(u32, String)> {
    let row = Regex::new(r"^\|\s*(\d+)\s*\|\s*`([A-Za-z]+)`\s*\|").unwrap();
    content
        .lines()
        .filter_map(|line| row.captures(line.trim()))
        .filter_map(|caps| {
            let code = caps[1].parse().ok()?;
            Some((code, caps[2].to_string()))
        })
        .collect()
}
