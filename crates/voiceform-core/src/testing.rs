//! Scripted doubles for the page, speech, and operator seams.
//!
//! Hand-rolled rather than mocked: interaction tests read much better when
//! the double's behavior is a plain data script (queued listen replies,
//! recorded commits) instead of expectation calls.

use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use voiceform_protocols::{ControlHandle, OperatorGate, Page, PageError, Speech, SpeechError};

// ---------------------------------------------------------------------------
// Speech double
// ---------------------------------------------------------------------------

/// Speech double with queued listen replies and recorded spoken lines.
///
/// An exhausted reply queue yields `Ok("")`, the timeout-with-no-speech
/// outcome, so a test that under-scripts loops terminate instead of hanging.
#[derive(Default)]
pub struct ScriptedSpeech {
    replies: Mutex<VecDeque<Result<String, SpeechError>>>,
    spoken: Mutex<Vec<String>>,
    listens: Mutex<u32>,
}

impl ScriptedSpeech {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue replies in the order `listen` will return them.
    pub fn with_replies<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let s = Self::new();
        for r in replies {
            s.push_reply(Ok(r.into()));
        }
        s
    }

    pub fn push_reply(&self, reply: Result<String, SpeechError>) {
        self.replies.lock().push_back(reply);
    }

    /// Everything spoken so far, in order.
    pub fn spoken(&self) -> Vec<String> {
        self.spoken.lock().clone()
    }

    /// Number of `listen` calls so far.
    pub fn listen_count(&self) -> u32 {
        *self.listens.lock()
    }

    /// Whether any spoken line contains the given fragment.
    pub fn said(&self, fragment: &str) -> bool {
        self.spoken.lock().iter().any(|s| s.contains(fragment))
    }
}

#[async_trait]
impl Speech for ScriptedSpeech {
    async fn speak(&self, text: &str) -> Result<(), SpeechError> {
        self.spoken.lock().push(text.to_string());
        Ok(())
    }

    async fn listen(&self, _timeout: Duration) -> Result<String, SpeechError> {
        *self.listens.lock() += 1;
        self.replies
            .lock()
            .pop_front()
            .unwrap_or_else(|| Ok(String::new()))
    }
}

// ---------------------------------------------------------------------------
// Page double
// ---------------------------------------------------------------------------

/// One scripted element. Labels are modeled as controls too (tag "label"
/// with a `for` attribute), so `query("label[for=..]")` works uniformly.
#[derive(Debug, Clone)]
pub struct FakeControl {
    pub tag: String,
    pub attrs: HashMap<String, String>,
    pub inner_text: String,
    pub ancestor_label: Option<String>,
    pub adjacent_text: Option<String>,
    pub options: Vec<(String, String)>,
    pub visible: bool,
    pub enabled: bool,
    /// Whether `set_files` succeeds on this control.
    pub accepts_files: bool,
    pub fail_fill: bool,
}

impl FakeControl {
    pub fn new(tag: &str) -> Self {
        Self {
            tag: tag.to_string(),
            attrs: HashMap::new(),
            inner_text: String::new(),
            ancestor_label: None,
            adjacent_text: None,
            options: Vec::new(),
            visible: true,
            enabled: true,
            accepts_files: false,
            fail_fill: false,
        }
    }

    pub fn input(input_type: &str) -> Self {
        Self::new("input").attr("type", input_type)
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.insert(name.to_string(), value.to_string());
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.inner_text = text.to_string();
        self
    }

    pub fn option(mut self, text: &str, value: &str) -> Self {
        self.options.push((text.to_string(), value.to_string()));
        self
    }

    pub fn hidden_from_view(mut self) -> Self {
        self.visible = false;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn accepting_files(mut self) -> Self {
        self.accepts_files = true;
        self
    }

    pub fn failing_fill(mut self) -> Self {
        self.fail_fill = true;
        self
    }
}

/// A committed page mutation, recorded by the [`FakePage`].
#[derive(Debug, Clone, PartialEq)]
pub enum Commit {
    Fill { index: usize, value: String },
    Check { index: usize },
    Select { index: usize, value: String },
    Files { index: usize, paths: Vec<PathBuf> },
    Click { index: usize },
}

/// Page double over a fixed list of scripted controls.
///
/// Handles are control indices rendered as strings. Selector support covers
/// exactly what the engine queries: comma-separated tag lists and a single
/// `tag[attr='value']` form.
#[derive(Default)]
pub struct FakePage {
    controls: Vec<FakeControl>,
    commits: Mutex<Vec<Commit>>,
}

impl FakePage {
    pub fn new(controls: Vec<FakeControl>) -> Self {
        Self {
            controls,
            commits: Mutex::new(Vec::new()),
        }
    }

    pub fn commits(&self) -> Vec<Commit> {
        self.commits.lock().clone()
    }

    pub fn handle_of(&self, index: usize) -> ControlHandle {
        ControlHandle::new(index.to_string())
    }

    fn control(&self, handle: &ControlHandle) -> Result<&FakeControl, PageError> {
        handle
            .id()
            .parse::<usize>()
            .ok()
            .and_then(|ix| self.controls.get(ix))
            .ok_or_else(|| PageError::ElementNotFound(handle.id().to_string()))
    }

    fn index(&self, handle: &ControlHandle) -> usize {
        handle.id().parse().unwrap_or(usize::MAX)
    }

    fn matches(control: &FakeControl, selector: &str) -> bool {
        let selector = selector.trim();
        if let Some((tag, rest)) = selector.split_once('[') {
            if control.tag != tag {
                return false;
            }
            // tag[attr='value']
            let Some(body) = rest.strip_suffix(']') else {
                return false;
            };
            let Some((attr, value)) = body.split_once('=') else {
                return false;
            };
            let value = value.trim_matches('\'').trim_matches('"');
            return control.attrs.get(attr).map(String::as_str) == Some(value);
        }
        control.tag == selector
    }

    fn select_indices(&self, selector: &str) -> Vec<usize> {
        self.controls
            .iter()
            .enumerate()
            .filter(|(_, c)| selector.split(',').any(|s| Self::matches(c, s)))
            .map(|(ix, _)| ix)
            .collect()
    }
}

#[async_trait]
impl Page for FakePage {
    async fn query_all(&self, selector: &str) -> Result<Vec<ControlHandle>, PageError> {
        Ok(self
            .select_indices(selector)
            .into_iter()
            .map(|ix| self.handle_of(ix))
            .collect())
    }

    async fn query(&self, selector: &str) -> Result<Option<ControlHandle>, PageError> {
        Ok(self
            .select_indices(selector)
            .first()
            .map(|&ix| self.handle_of(ix)))
    }

    async fn tag_name(&self, handle: &ControlHandle) -> Result<String, PageError> {
        Ok(self.control(handle)?.tag.clone())
    }

    async fn attribute(
        &self,
        handle: &ControlHandle,
        name: &str,
    ) -> Result<Option<String>, PageError> {
        Ok(self.control(handle)?.attrs.get(name).cloned())
    }

    async fn inner_text(&self, handle: &ControlHandle) -> Result<String, PageError> {
        Ok(self.control(handle)?.inner_text.clone())
    }

    async fn ancestor_label_text(
        &self,
        handle: &ControlHandle,
    ) -> Result<Option<String>, PageError> {
        Ok(self.control(handle)?.ancestor_label.clone())
    }

    async fn adjacent_text(&self, handle: &ControlHandle) -> Result<Option<String>, PageError> {
        Ok(self.control(handle)?.adjacent_text.clone())
    }

    async fn option_items(
        &self,
        handle: &ControlHandle,
    ) -> Result<Vec<(String, String)>, PageError> {
        Ok(self.control(handle)?.options.clone())
    }

    async fn is_visible(&self, handle: &ControlHandle) -> Result<bool, PageError> {
        Ok(self.control(handle)?.visible)
    }

    async fn is_enabled(&self, handle: &ControlHandle) -> Result<bool, PageError> {
        Ok(self.control(handle)?.enabled)
    }

    async fn fill(&self, handle: &ControlHandle, value: &str) -> Result<(), PageError> {
        let control = self.control(handle)?;
        if control.fail_fill {
            return Err(PageError::ActionFailed("scripted fill failure".to_string()));
        }
        self.commits.lock().push(Commit::Fill {
            index: self.index(handle),
            value: value.to_string(),
        });
        Ok(())
    }

    async fn check(&self, handle: &ControlHandle) -> Result<(), PageError> {
        self.control(handle)?;
        self.commits.lock().push(Commit::Check {
            index: self.index(handle),
        });
        Ok(())
    }

    async fn select_option(&self, handle: &ControlHandle, value: &str) -> Result<(), PageError> {
        self.control(handle)?;
        self.commits.lock().push(Commit::Select {
            index: self.index(handle),
            value: value.to_string(),
        });
        Ok(())
    }

    async fn set_files(&self, handle: &ControlHandle, paths: &[&Path]) -> Result<(), PageError> {
        let control = self.control(handle)?;
        if !control.accepts_files {
            return Err(PageError::ActionFailed(
                "control does not accept files".to_string(),
            ));
        }
        self.commits.lock().push(Commit::Files {
            index: self.index(handle),
            paths: paths.iter().map(|p| p.to_path_buf()).collect(),
        });
        Ok(())
    }

    async fn click(&self, handle: &ControlHandle) -> Result<(), PageError> {
        self.control(handle)?;
        self.commits.lock().push(Commit::Click {
            index: self.index(handle),
        });
        Ok(())
    }

    async fn navigate(&self, _url: &str) -> Result<(), PageError> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Operator gate double
// ---------------------------------------------------------------------------

/// Gate that continues immediately, counting how often it was hit.
#[derive(Default)]
pub struct CountingGate {
    waits: Mutex<u32>,
}

impl CountingGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn wait_count(&self) -> u32 {
        *self.waits.lock()
    }
}

#[async_trait]
impl OperatorGate for CountingGate {
    async fn wait(&self) {
        *self.waits.lock() += 1;
    }
}
