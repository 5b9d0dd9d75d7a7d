//! Keyword-precedence purpose classifier.

use voiceform_protocols::Purpose;

/// Keyword rules in precedence order. First match wins; the ordering is
/// deliberate (e.g. "lastname" must not fall into the "name"-free rules
/// below it, and file-upload cues outrank everything).
const RULES: &[(&[&str], Purpose)] = &[
    (&["first", "fname", "firstname"], Purpose::FirstName),
    (&["last", "lname", "lastname", "surname"], Purpose::LastName),
    (&["email", "mail"], Purpose::Email),
    (&["phone", "tel", "mobile", "number"], Purpose::Phone),
    (&["address", "street"], Purpose::Address),
    (&["city", "town"], Purpose::City),
    (&["state", "province"], Purpose::State),
    (&["zip", "postal", "pincode"], Purpose::Zip),
    (&["country"], Purpose::Country),
    (&["age", "birth", "dob", "date"], Purpose::AgeDate),
    (&["gender", "sex"], Purpose::Gender),
    (&["company", "organization"], Purpose::Company),
    (&["message", "comment", "feedback"], Purpose::Message),
];

const FILE_UPLOAD_TERMS: &[&str] = &["upload", "file", "attach", "document", "resume", "cv"];

/// Classify a field's semantic purpose from its label and attributes.
///
/// Matching is case-insensitive substring containment over the
/// concatenated label, name and id — no tokenization. A label containing
/// "statement" therefore matches the "state" rule before any later rule;
/// that is fixed, accepted behavior.
pub fn classify_purpose(label: &str, name: &str, id: &str, input_type: &str) -> Purpose {
    let haystack = format!(
        "{} {} {}",
        label.to_lowercase(),
        name.to_lowercase(),
        id.to_lowercase()
    );

    if input_type.eq_ignore_ascii_case("file") || contains_any(&haystack, FILE_UPLOAD_TERMS) {
        return Purpose::FileUpload;
    }

    for (terms, purpose) in RULES {
        if contains_any(&haystack, terms) {
            return *purpose;
        }
    }

    Purpose::Other
}

fn contains_any(haystack: &str, terms: &[&str]) -> bool {
    terms.iter().any(|t| haystack.contains(t))
}

#[cfg(test)]
#[path = "purpose_tests.rs"]
mod tests;
