use std::time::Duration;

use super::*;
use crate::testing::{Commit, FakeControl, FakePage, ScriptedSpeech};
use voiceform_protocols::{FieldDescriptor, Purpose, StructuralType};

fn policy() -> CapturePolicy {
    CapturePolicy::new(Duration::from_secs(8))
}

fn email_field(page: &FakePage) -> FieldDescriptor {
    FieldDescriptor {
        label: "Email Address".to_string(),
        structural: StructuralType::Text,
        purpose: Purpose::Email,
        required: false,
        options: Vec::new(),
        handle: page.handle_of(0),
    }
}

#[test]
fn test_is_affirmative() {
    assert!(is_affirmative("yes"));
    assert!(is_affirmative("Yes please"));
    assert!(is_affirmative("YES"));
    assert!(!is_affirmative("no"));
    assert!(!is_affirmative(""));
}

#[tokio::test]
async fn test_confirm_entry_reads_back_rendered() {
    let speech = ScriptedSpeech::with_replies(["yes"]);
    let confirmed = confirm_entry(&speech, &policy(), "First Name", "Ann", ReadbackMode::Letters)
        .await
        .unwrap();
    assert!(confirmed);
    let spoken = speech.spoken();
    assert_eq!(spoken[0], "You entered for First Name:");
    assert_eq!(spoken[1], "A n n");
    assert!(spoken[2].contains("confirm"));
}

#[tokio::test]
async fn test_reject_once_then_accept() {
    // Cycle 1: value "wrong@example.com", confirm "no".
    // Cycle 2: value "jane@example.com", confirm "yes".
    let speech = ScriptedSpeech::with_replies([
        "wrong@example.com",
        "no",
        "jane@example.com",
        "yes",
    ]);
    let page = FakePage::new(vec![FakeControl::input("text").attr("name", "email")]);
    let field = email_field(&page);

    fill_with_confirmation(
        &page,
        &speech,
        &field,
        "Please say your Email Address",
        ReadbackMode::Verbatim,
        &policy(),
        &policy(),
    )
    .await
    .unwrap();

    // Exactly two prompt cycles, one commit with the second value.
    let prompts = speech
        .spoken()
        .iter()
        .filter(|s| s.contains("Please say your"))
        .count();
    assert_eq!(prompts, 2);
    assert_eq!(
        page.commits(),
        vec![Commit::Fill {
            index: 0,
            value: "jane@example.com".to_string()
        }]
    );
    assert!(speech.said("Let's try again."));
}

#[tokio::test]
async fn test_commit_failure_announced_and_skipped() {
    let speech = ScriptedSpeech::with_replies(["something", "yes"]);
    let page = FakePage::new(vec![FakeControl::input("text").failing_fill()]);
    let field = email_field(&page);

    fill_with_confirmation(
        &page,
        &speech,
        &field,
        "Please say your Email Address",
        ReadbackMode::Verbatim,
        &policy(),
        &policy(),
    )
    .await
    .unwrap();

    assert!(page.commits().is_empty());
    assert!(speech.said("Could not fill Email Address"));
}

#[tokio::test]
async fn test_digit_readback_for_phone_value() {
    let speech = ScriptedSpeech::with_replies(["12A-3", "yes"]);
    let page = FakePage::new(vec![FakeControl::input("text")]);
    let field = email_field(&page);

    fill_with_confirmation(
        &page,
        &speech,
        &field,
        "Please say your Phone",
        ReadbackMode::Digits,
        &policy(),
        &policy(),
    )
    .await
    .unwrap();

    assert!(speech.spoken().contains(&"1 2 A - 3".to_string()));
}
