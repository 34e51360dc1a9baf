//! Section tags.
//!
//! Catalog sections collapse onto a small fixed vocabulary: `ClinicalStaff`
//! and the numbered sections `1` to `4`. Unknown tags are kept as given,
//! except the literal `unknown`, which means "no section".

pub const CLINICAL_STAFF: &str = "ClinicalStaff";

const NUMBERED_SECTIONS: [&str; 4] = ["1", "2", "3", "4"];

/// Sections retrieved when the caller does not name any.
pub const DEFAULT_SECTIONS: [&str; 5] = ["clinicalstaff", "1", "2", "3", "4"];

pub fn default_sections() -> Vec<String> {
    DEFAULT_SECTIONS.iter().map(|s| (*s).to_string()).collect()
}

/// Normalize an explicit section tag, inferring one from the header when
/// the tag is blank.
pub fn normalize_section(section: &str, header: &str) -> String {
    let mut candidate = section.trim().to_string();
    if candidate.is_empty() {
        candidate = infer_section_from_header(header).to_string();
    }
    let lower = candidate.to_lowercase();
    if lower.starts_with("clinical") {
        return CLINICAL_STAFF.to_string();
    }
    for number in NUMBERED_SECTIONS {
        if lower.starts_with(&format!("section {number}")) {
            return number.to_string();
        }
    }
    if NUMBERED_SECTIONS.contains(&lower.as_str()) {
        return candidate;
    }
    if lower == "unknown" {
        return String::new();
    }
    candidate
}

fn infer_section_from_header(header: &str) -> &'static str {
    let lower = header.trim().to_lowercase();
    for number in NUMBERED_SECTIONS {
        if lower.contains(&format!("section {number}")) {
            return number;
        }
    }
    if lower.contains("clinician") || lower.contains("clinical staff") {
        return CLINICAL_STAFF;
    }
    ""
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_tags() {
        assert_eq!(normalize_section("Clinical Staff", "X"), "ClinicalStaff");
        assert_eq!(normalize_section("Section 3 - Assessments", "X"), "3");
        assert_eq!(normalize_section(" 2 ", "X"), "2");
        assert_eq!(normalize_section("UNKNOWN", "X"), "");
        assert_eq!(normalize_section("Admin", "X"), "Admin");
    }

    #[test]
    fn inferred_from_header() {
        assert_eq!(normalize_section("", "Section 4 start"), "4");
        assert_eq!(normalize_section("", "Clinician Name"), "ClinicalStaff");
        assert_eq!(normalize_section("", "Ward"), "");
    }
}
