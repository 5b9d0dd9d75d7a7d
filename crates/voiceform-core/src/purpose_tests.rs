use super::*;

#[test]
fn test_file_input_type_wins() {
    assert_eq!(
        classify_purpose("Photo", "photo", "photo", "file"),
        Purpose::FileUpload
    );
}

#[test]
fn test_upload_terms_outrank_state() {
    // Rule order: "upload" in the label wins over the "state" substring.
    assert_eq!(
        classify_purpose("State your upload file", "", "", "text"),
        Purpose::FileUpload
    );
}

#[test]
fn test_first_and_last_name() {
    assert_eq!(
        classify_purpose("First Name", "fname", "", "text"),
        Purpose::FirstName
    );
    assert_eq!(
        classify_purpose("Surname", "", "", "text"),
        Purpose::LastName
    );
}

#[test]
fn test_email_from_name_attribute() {
    assert_eq!(
        classify_purpose("Your contact", "email", "", "text"),
        Purpose::Email
    );
}

#[test]
fn test_phone_and_zip() {
    assert_eq!(
        classify_purpose("Mobile", "", "", "tel"),
        Purpose::Phone
    );
    assert_eq!(
        classify_purpose("Postal code", "", "", "text"),
        Purpose::Zip
    );
}

#[test]
fn test_statement_matches_state() {
    // Substring containment without tokenization is fixed behavior.
    assert_eq!(
        classify_purpose("Bank statement reference", "", "", "text"),
        Purpose::State
    );
}

#[test]
fn test_age_date_gender_company_message() {
    assert_eq!(classify_purpose("Date of birth", "", "", "text"), Purpose::AgeDate);
    assert_eq!(classify_purpose("Gender", "", "", "text"), Purpose::Gender);
    assert_eq!(
        classify_purpose("Organization", "", "", "text"),
        Purpose::Company
    );
    assert_eq!(
        classify_purpose("Feedback", "", "", "text"),
        Purpose::Message
    );
}

#[test]
fn test_other_fallback() {
    assert_eq!(
        classify_purpose("Favorite color", "color", "color", "text"),
        Purpose::Other
    );
}

#[test]
fn test_id_attribute_contributes() {
    assert_eq!(
        classify_purpose("Where you live", "", "city_input", "text"),
        Purpose::City
    );
}

#[test]
fn test_deterministic() {
    for _ in 0..3 {
        assert_eq!(
            classify_purpose("Email Address", "email", "email", "text"),
            Purpose::Email
        );
    }
}
