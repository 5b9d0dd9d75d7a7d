use std::fs;
use std::path::PathBuf;

use super::*;
use crate::testing::{Commit, CountingGate, FakeControl, FakePage, ScriptedSpeech};
use voiceform_protocols::{FieldDescriptor, Purpose, StructuralType};

fn upload_field(page: &FakePage, index: usize) -> FieldDescriptor {
    FieldDescriptor {
        label: "Resume".to_string(),
        structural: StructuralType::Text,
        purpose: Purpose::FileUpload,
        required: false,
        options: Vec::new(),
        handle: page.handle_of(index),
    }
}

fn config_with_root(root: PathBuf) -> SessionConfig {
    SessionConfig {
        search_roots: Some(vec![root]),
        ..SessionConfig::immediate()
    }
}

fn plant(dir: &std::path::Path, names: &[&str]) {
    for name in names {
        fs::write(dir.join(name), b"x").unwrap();
    }
}

fn committed_files(page: &FakePage) -> Vec<(usize, Vec<PathBuf>)> {
    page.commits()
        .into_iter()
        .filter_map(|c| match c {
            Commit::Files { index, paths } if !paths.is_empty() => Some((index, paths)),
            _ => None,
        })
        .collect()
}

#[test]
fn test_classify_upload_option() {
    assert_eq!(classify_upload_option("upload from computer"), Some(1));
    assert_eq!(classify_upload_option("browse local files"), Some(1));
    assert_eq!(classify_upload_option("select a file"), Some(2));
    // Trigger term without a source term.
    assert_eq!(classify_upload_option("upload"), None);
    // Source term without a trigger term.
    assert_eq!(classify_upload_option("my computer"), None);
    assert_eq!(classify_upload_option(""), None);
    // Prose block over the length cutoff.
    let long = format!("upload a file from your computer {}", "x".repeat(100));
    assert_eq!(classify_upload_option(&long), None);
}

#[tokio::test]
async fn test_direct_input_single_match() {
    let dir = tempfile::tempdir().unwrap();
    plant(dir.path(), &["resume.pdf"]);

    let page = FakePage::new(vec![FakeControl::input("file").accepting_files()]);
    let speech = ScriptedSpeech::with_replies(["resume", "yes"]);
    let gate = CountingGate::new();
    let field = upload_field(&page, 0);

    resolve_file_upload(
        &page,
        &speech,
        &gate,
        &field,
        &config_with_root(dir.path().to_path_buf()),
    )
    .await
    .unwrap();

    assert!(speech.said("File chooser is ready"));
    assert!(speech.said("Found file: resume.pdf"));
    assert!(speech.said("uploaded successfully"));
    let files = committed_files(&page);
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].0, 0);
    assert_eq!(files[0].1[0].file_name().unwrap(), "resume.pdf");
    assert_eq!(gate.wait_count(), 0);
}

#[tokio::test]
async fn test_no_filename_abandons_field() {
    let dir = tempfile::tempdir().unwrap();
    let page = FakePage::new(vec![FakeControl::input("file").accepting_files()]);
    let speech = ScriptedSpeech::with_replies([""]);
    let gate = CountingGate::new();
    let field = upload_field(&page, 0);

    resolve_file_upload(
        &page,
        &speech,
        &gate,
        &field,
        &config_with_root(dir.path().to_path_buf()),
    )
    .await
    .unwrap();

    assert!(speech.said("No filename provided"));
    assert!(committed_files(&page).is_empty());
}

#[tokio::test]
async fn test_zero_matches_retry_then_skip() {
    let dir = tempfile::tempdir().unwrap();
    let page = FakePage::new(vec![FakeControl::input("file").accepting_files()]);
    // First name finds nothing; retry "yes"; second name finds nothing;
    // retry "no" abandons.
    let speech = ScriptedSpeech::with_replies(["ghost", "yes", "phantom", "no"]);
    let gate = CountingGate::new();
    let field = upload_field(&page, 0);

    resolve_file_upload(
        &page,
        &speech,
        &gate,
        &field,
        &config_with_root(dir.path().to_path_buf()),
    )
    .await
    .unwrap();

    assert!(speech.said("No files found named ghost"));
    assert!(speech.said("No files found named phantom"));
    assert!(speech.said("Skipping file upload."));
    assert!(committed_files(&page).is_empty());
}

#[tokio::test]
async fn test_multiple_matches_ordinal_choice() {
    let dir = tempfile::tempdir().unwrap();
    plant(dir.path(), &["report.pdf", "reported.txt"]);

    let page = FakePage::new(vec![FakeControl::input("file").accepting_files()]);
    let speech = ScriptedSpeech::with_replies(["report", "second", "yes"]);
    let gate = CountingGate::new();
    let field = upload_field(&page, 0);

    resolve_file_upload(
        &page,
        &speech,
        &gate,
        &field,
        &config_with_root(dir.path().to_path_buf()),
    )
    .await
    .unwrap();

    let files = committed_files(&page);
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].1[0].file_name().unwrap(), "reported.txt");
}

#[tokio::test]
async fn test_out_of_range_ordinal_abandons() {
    let dir = tempfile::tempdir().unwrap();
    plant(dir.path(), &["report.pdf", "reported.txt"]);

    let page = FakePage::new(vec![FakeControl::input("file").accepting_files()]);
    // "12" must parse as twelve and be rejected, not select option two.
    let speech = ScriptedSpeech::with_replies(["report", "12"]);
    let gate = CountingGate::new();
    let field = upload_field(&page, 0);

    resolve_file_upload(
        &page,
        &speech,
        &gate,
        &field,
        &config_with_root(dir.path().to_path_buf()),
    )
    .await
    .unwrap();

    assert!(speech.said("Invalid choice. Skipping file upload."));
    assert!(committed_files(&page).is_empty());
}

#[tokio::test]
async fn test_menu_options_priority_and_fallback_commit() {
    let dir = tempfile::tempdir().unwrap();
    plant(dir.path(), &["resume.pdf"]);

    let page = FakePage::new(vec![
        // 0: the triggering control; rejects direct file input.
        FakeControl::input("file"),
        // 1: generic trigger, priority 2.
        FakeControl::new("span").text("Select a file"),
        // 2: local-machine trigger, priority 1 - announced first.
        FakeControl::new("button").text("Upload from computer"),
        // 3: the real file input the menu reveals.
        FakeControl::input("file").accepting_files(),
    ]);
    let speech = ScriptedSpeech::with_replies(["first", "resume", "yes"]);
    let gate = CountingGate::new();
    let field = upload_field(&page, 0);

    resolve_file_upload(
        &page,
        &speech,
        &gate,
        &field,
        &config_with_root(dir.path().to_path_buf()),
    )
    .await
    .unwrap();

    // Priority 1 announced as option 1 despite later DOM position.
    assert!(speech.said("Option 1: upload from computer"));
    assert!(speech.said("Option 2: select a file"));
    // "first" clicked the computer option.
    assert!(page.commits().contains(&Commit::Click { index: 2 }));
    // Original control rejected the file; fallback input took it.
    let files = committed_files(&page);
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].0, 3);
    assert_eq!(gate.wait_count(), 0);
}

#[tokio::test]
async fn test_all_commits_fail_waits_for_operator() {
    let dir = tempfile::tempdir().unwrap();
    plant(dir.path(), &["resume.pdf"]);

    // No control on the page accepts files.
    let page = FakePage::new(vec![FakeControl::input("file")]);
    let speech = ScriptedSpeech::with_replies(["resume", "yes"]);
    let gate = CountingGate::new();
    let field = upload_field(&page, 0);

    resolve_file_upload(
        &page,
        &speech,
        &gate,
        &field,
        &config_with_root(dir.path().to_path_buf()),
    )
    .await
    .unwrap();

    assert!(speech.said("Error uploading file"));
    assert!(speech.said("select the file manually"));
    assert_eq!(gate.wait_count(), 1);
}

#[tokio::test]
async fn test_unexpected_page_failure_caught() {
    // Handle points at a control that does not exist: the initial click
    // fails and the catch-all announces and gates.
    let page = FakePage::new(vec![]);
    let speech = ScriptedSpeech::new();
    let gate = CountingGate::new();
    let field = FieldDescriptor {
        label: "Resume".to_string(),
        structural: StructuralType::Text,
        purpose: Purpose::FileUpload,
        required: false,
        options: Vec::new(),
        handle: page.handle_of(7),
    };

    resolve_file_upload(&page, &speech, &gate, &field, &SessionConfig::immediate())
        .await
        .unwrap();

    assert!(speech.said("Error with file upload"));
    assert_eq!(gate.wait_count(), 1);
}

#[tokio::test]
async fn test_decline_then_different_file() {
    let dir = tempfile::tempdir().unwrap();
    plant(dir.path(), &["draft.txt", "final.txt"]);

    let page = FakePage::new(vec![FakeControl::input("file").accepting_files()]);
    // Pick draft, decline upload, agree to a different file, pick final,
    // confirm.
    let speech =
        ScriptedSpeech::with_replies(["draft", "no", "yes", "final", "yes"]);
    let gate = CountingGate::new();
    let field = upload_field(&page, 0);

    resolve_file_upload(
        &page,
        &speech,
        &gate,
        &field,
        &config_with_root(dir.path().to_path_buf()),
    )
    .await
    .unwrap();

    let files = committed_files(&page);
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].1[0].file_name().unwrap(), "final.txt");
}
