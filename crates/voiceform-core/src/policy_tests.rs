use super::*;
use crate::testing::{Commit, CountingGate, FakeControl, FakePage, ScriptedSpeech};
use voiceform_protocols::SelectOption;

fn config() -> SessionConfig {
    SessionConfig::immediate()
}

fn field(
    page: &FakePage,
    index: usize,
    label: &str,
    structural: StructuralType,
    purpose: Purpose,
) -> FieldDescriptor {
    FieldDescriptor {
        label: label.to_string(),
        structural,
        purpose,
        required: false,
        options: Vec::new(),
        handle: page.handle_of(index),
    }
}

#[tokio::test]
async fn test_inaccessible_field_skipped_with_announcement() {
    let page = FakePage::new(vec![FakeControl::input("text").hidden_from_view()]);
    let speech = ScriptedSpeech::new();
    let gate = CountingGate::new();
    let f = field(&page, 0, "City", StructuralType::Text, Purpose::City);

    process_field(&page, &speech, &gate, &f, &config()).await.unwrap();

    assert!(speech.said("Skipping City - field not accessible"));
    assert!(page.commits().is_empty());
    assert_eq!(speech.listen_count(), 0);
}

#[tokio::test]
async fn test_disabled_field_skipped() {
    let page = FakePage::new(vec![FakeControl::input("text").disabled()]);
    let speech = ScriptedSpeech::new();
    let gate = CountingGate::new();
    let f = field(&page, 0, "City", StructuralType::Text, Purpose::City);

    process_field(&page, &speech, &gate, &f, &config()).await.unwrap();
    assert!(speech.said("not accessible"));
}

#[tokio::test]
async fn test_name_field_spelled_letter_by_letter() {
    let page = FakePage::new(vec![FakeControl::input("text")]);
    let speech = ScriptedSpeech::with_replies(["Ann", "yes"]);
    let gate = CountingGate::new();
    let f = field(&page, 0, "First Name", StructuralType::Text, Purpose::FirstName);

    process_field(&page, &speech, &gate, &f, &config()).await.unwrap();

    assert!(speech.spoken().contains(&"A n n".to_string()));
    assert_eq!(
        page.commits(),
        vec![Commit::Fill {
            index: 0,
            value: "Ann".to_string()
        }]
    );
}

#[tokio::test]
async fn test_zip_field_digit_readback() {
    let page = FakePage::new(vec![FakeControl::input("text")]);
    let speech = ScriptedSpeech::with_replies(["90210", "yes"]);
    let gate = CountingGate::new();
    let f = field(&page, 0, "Zip", StructuralType::Text, Purpose::Zip);

    process_field(&page, &speech, &gate, &f, &config()).await.unwrap();
    assert!(speech.spoken().contains(&"9 0 2 1 0".to_string()));
}

#[tokio::test]
async fn test_dropdown_substring_match() {
    let page = FakePage::new(vec![FakeControl::new("select")]);
    let speech = ScriptedSpeech::with_replies(["united"]);
    let gate = CountingGate::new();
    let mut f = field(&page, 0, "Country", StructuralType::Dropdown, Purpose::Country);
    f.options = vec![
        SelectOption { text: "Canada".to_string(), value: "ca".to_string() },
        SelectOption { text: "United States".to_string(), value: "us".to_string() },
    ];

    process_field(&page, &speech, &gate, &f, &config()).await.unwrap();

    assert_eq!(
        page.commits(),
        vec![Commit::Select {
            index: 0,
            value: "us".to_string()
        }]
    );
    assert!(speech.said("United States selected for Country"));
}

#[tokio::test]
async fn test_dropdown_no_match_announced() {
    let page = FakePage::new(vec![FakeControl::new("select")]);
    let speech = ScriptedSpeech::with_replies(["atlantis"]);
    let gate = CountingGate::new();
    let mut f = field(&page, 0, "Country", StructuralType::Dropdown, Purpose::Country);
    f.options = vec![SelectOption {
        text: "Canada".to_string(),
        value: "ca".to_string(),
    }];

    process_field(&page, &speech, &gate, &f, &config()).await.unwrap();
    assert!(page.commits().is_empty());
    assert!(speech.said("Option not found. Skipping."));
}

#[tokio::test]
async fn test_dropdown_empty_choice_selects_nothing() {
    let page = FakePage::new(vec![FakeControl::new("select")]);
    let speech = ScriptedSpeech::with_replies([""]);
    let gate = CountingGate::new();
    let mut f = field(&page, 0, "Country", StructuralType::Dropdown, Purpose::Country);
    f.options = vec![SelectOption {
        text: "Canada".to_string(),
        value: "ca".to_string(),
    }];

    process_field(&page, &speech, &gate, &f, &config()).await.unwrap();
    assert!(page.commits().is_empty());
}

#[tokio::test]
async fn test_checkbox_yes_please() {
    let page = FakePage::new(vec![FakeControl::input("checkbox")]);
    let speech = ScriptedSpeech::with_replies(["yes please"]);
    let gate = CountingGate::new();
    let f = field(&page, 0, "Subscribe", StructuralType::Checkbox, Purpose::Other);

    process_field(&page, &speech, &gate, &f, &config()).await.unwrap();

    assert_eq!(page.commits(), vec![Commit::Check { index: 0 }]);
    // No confirmation prompt: exactly one listen.
    assert_eq!(speech.listen_count(), 1);
    assert!(speech.said("has been checked"));
}

#[tokio::test]
async fn test_checkbox_check_keyword() {
    let page = FakePage::new(vec![FakeControl::input("checkbox")]);
    let speech = ScriptedSpeech::with_replies(["check it"]);
    let gate = CountingGate::new();
    let f = field(&page, 0, "Terms", StructuralType::Checkbox, Purpose::Other);

    process_field(&page, &speech, &gate, &f, &config()).await.unwrap();
    assert_eq!(page.commits(), vec![Commit::Check { index: 0 }]);
}

#[tokio::test]
async fn test_checkbox_declined() {
    let page = FakePage::new(vec![FakeControl::input("checkbox")]);
    let speech = ScriptedSpeech::with_replies(["no thanks"]);
    let gate = CountingGate::new();
    let f = field(&page, 0, "Subscribe", StructuralType::Checkbox, Purpose::Other);

    process_field(&page, &speech, &gate, &f, &config()).await.unwrap();
    assert!(page.commits().is_empty());
    assert!(speech.said("left unchecked"));
}

#[tokio::test]
async fn test_textarea_prompt_wording() {
    let page = FakePage::new(vec![FakeControl::new("textarea")]);
    let speech = ScriptedSpeech::with_replies(["hello there", "yes"]);
    let gate = CountingGate::new();
    let f = field(&page, 0, "Message", StructuralType::Textarea, Purpose::Message);

    process_field(&page, &speech, &gate, &f, &config()).await.unwrap();
    assert!(speech.said("Please provide your Message"));
    assert_eq!(
        page.commits(),
        vec![Commit::Fill {
            index: 0,
            value: "hello there".to_string()
        }]
    );
}

#[tokio::test]
async fn test_radio_has_no_strategy() {
    let page = FakePage::new(vec![FakeControl::input("radio")]);
    let speech = ScriptedSpeech::new();
    let gate = CountingGate::new();
    let f = field(&page, 0, "Gender", StructuralType::Radio, Purpose::Gender);

    process_field(&page, &speech, &gate, &f, &config()).await.unwrap();
    assert!(page.commits().is_empty());
    assert_eq!(speech.listen_count(), 0);
}
