//! Secret-post access gate.
//!
//! Community posts may be marked private by their author; the backend then
//! returns a redacted stub (`need_password = true`) until the post's
//! password is verified for the current view session. [`SecretPostGate`]
//! owns that flow for a single post view: it loads the post, opens the
//! password prompt when required, runs the one-shot verification attempts,
//! and guarantees that body fields are never exposed while locked.
//!
//! Authorization is per view instance. It is never cached across
//! navigations; a fresh gate (or a [`SecretPostGate::navigate`] call)
//! always repeats the challenge for a secret post.

use std::future::Future;
use std::sync::{Arc, Mutex};

use futures::future::{AbortHandle, Abortable};
use uuid::Uuid;

use crate::board::{Comment, Consultation};
use crate::client::ApiClient;
use crate::config::ErrorDetailMode;
use crate::error::{GreenroomError, Result};

/// Shown when the password field is submitted empty.
pub const MSG_PASSWORD_REQUIRED: &str = "비밀번호를 입력해주세요";

/// Fallback when the backend rejects a password without a message.
pub const MSG_PASSWORD_MISMATCH: &str = "비밀번호가 일치하지 않습니다";

/// Shown when the post does not exist; the caller then redirects to the
/// containing list view.
pub const MSG_POST_NOT_FOUND: &str = "게시글을 찾을 수 없습니다.";

/// Shown for transport failures in [`ErrorDetailMode::Distinct`] mode.
pub const MSG_CONNECTION_FAILED: &str = "네트워크 연결을 확인해주세요";

/// Gate lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    /// Initial load in progress (or not yet started).
    Loading,
    /// The post is secret and unverified; the password prompt is open.
    Locked,
    /// Full content is held and may be rendered.
    Unlocked,
    /// The post does not exist; terminal for this view.
    NotFound,
    /// The user dismissed the prompt or navigated away.
    Cancelled,
}

/// Result of a [`SecretPostGate::load`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Full content arrived; render it.
    Unlocked,
    /// A redacted stub arrived; the password prompt is open.
    Locked,
    /// The post does not exist; redirect to the list view.
    NotFound,
    /// The request was aborted through a [`GateCanceller`].
    Cancelled,
}

/// Result of a [`SecretPostGate::submit_password`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Verified; full content replaced the stub and the prompt closed.
    Unlocked,
    /// Rejected; the prompt stays open with an error message.
    Rejected,
    /// The request was aborted through a [`GateCanceller`].
    Cancelled,
}

/// Clonable handle that aborts the gate's in-flight request.
///
/// Hand this to whatever owns the view's lifetime; calling
/// [`GateCanceller::cancel`] aborts the pending load or verification
/// instead of leaving it to run unobserved.
#[derive(Debug, Clone)]
pub struct GateCanceller {
    inflight: Arc<Mutex<Option<AbortHandle>>>,
}

impl GateCanceller {
    /// Abort the in-flight request, if any.
    pub fn cancel(&self) {
        if let Some(handle) = self.inflight.lock().expect("inflight lock poisoned").take() {
            handle.abort();
        }
    }
}

/// Access gate for a single community-post view.
pub struct SecretPostGate {
    client: ApiClient,
    view_id: Uuid,
    post_id: String,
    state: GateState,
    post: Option<Consultation>,
    prompt_open: bool,
    prompt_error: Option<String>,
    is_submitting: bool,
    remembered_password: Option<String>,
    error_mode: ErrorDetailMode,
    inflight: Arc<Mutex<Option<AbortHandle>>>,
}

impl SecretPostGate {
    /// Create a gate for one post view. Call [`SecretPostGate::load`] next.
    pub fn new(client: ApiClient, post_id: impl Into<String>, error_mode: ErrorDetailMode) -> Self {
        Self {
            client,
            view_id: Uuid::new_v4(),
            post_id: post_id.into(),
            state: GateState::Loading,
            post: None,
            prompt_open: false,
            prompt_error: None,
            is_submitting: false,
            remembered_password: None,
            error_mode,
            inflight: Arc::new(Mutex::new(None)),
        }
    }

    /// Point the gate at a different post.
    ///
    /// Everything held for the previous post is discarded, including any
    /// verified content and the remembered password; the challenge starts
    /// over for the new id.
    pub fn navigate(&mut self, post_id: impl Into<String>) {
        self.abort_inflight();
        self.view_id = Uuid::new_v4();
        self.post_id = post_id.into();
        self.state = GateState::Loading;
        self.post = None;
        self.prompt_open = false;
        self.prompt_error = None;
        self.is_submitting = false;
        self.remembered_password = None;
    }

    /// Fetch the post and decide whether to render or to prompt.
    ///
    /// Any previously held content is discarded before the fetch proceeds,
    /// so a stale payload can never leak across a fast navigation. A
    /// missing post is a terminal [`LoadOutcome::NotFound`] for this load;
    /// transport failures propagate as errors and leave the gate in
    /// `Loading`, where the call may be repeated.
    pub async fn load(&mut self) -> Result<LoadOutcome> {
        if self.post_id.trim().is_empty() {
            return Err(GreenroomError::Validation("post id is required".to_string()));
        }

        // Discard prior state before anything renders.
        self.post = None;
        self.state = GateState::Loading;
        self.prompt_open = false;
        self.prompt_error = None;

        tracing::debug!(view = %self.view_id, post = %self.post_id, "loading post");

        let client = self.client.clone();
        let id = self.post_id.clone();
        let result = self
            .run_abortable(async move { client.consultations().get(&id).await })
            .await;

        match result {
            None => {
                self.state = GateState::Cancelled;
                Ok(LoadOutcome::Cancelled)
            }
            Some(Ok(post)) => Ok(self.apply_post(post)),
            Some(Err(GreenroomError::NotFound(_))) => Ok(self.apply_not_found()),
            Some(Err(e)) => Err(e),
        }
    }

    /// Send a password candidate to the verifier for the loaded post.
    ///
    /// An empty candidate fails fast with [`MSG_PASSWORD_REQUIRED`] and no
    /// network call. A rejection keeps the prompt open with the backend's
    /// message (or the generic mismatch text); the user may retry without
    /// bound. In [`ErrorDetailMode::Legacy`] a transport failure reads
    /// exactly like a wrong password.
    pub async fn submit_password(&mut self, candidate: &str) -> Result<SubmitOutcome> {
        if self.state != GateState::Locked {
            return Err(GreenroomError::Validation(
                "no password prompt is open".to_string(),
            ));
        }
        if self.is_submitting {
            return Ok(SubmitOutcome::Rejected);
        }
        if candidate.trim().is_empty() {
            self.prompt_error = Some(MSG_PASSWORD_REQUIRED.to_string());
            return Ok(SubmitOutcome::Rejected);
        }

        self.is_submitting = true;
        self.prompt_error = None;

        let client = self.client.clone();
        let id = self.post_id.clone();
        let password = candidate.to_string();
        let result = self
            .run_abortable(async move { client.consultations().check_password(&id, &password).await })
            .await;

        self.is_submitting = false;

        match result {
            None => {
                self.state = GateState::Cancelled;
                Ok(SubmitOutcome::Cancelled)
            }
            Some(Ok(post)) => {
                self.apply_password_ok(post, candidate);
                Ok(SubmitOutcome::Unlocked)
            }
            Some(Err(err)) => {
                let message = self.submit_failure_message(&err);
                self.apply_password_rejected(message);
                Ok(SubmitOutcome::Rejected)
            }
        }
    }

    /// Dismiss the prompt without success.
    ///
    /// Aborts any in-flight request and leaves the gate terminal; the
    /// caller navigates back to the containing list view. No partial
    /// content is ever exposed.
    pub fn cancel(&mut self) {
        self.abort_inflight();
        self.prompt_open = false;
        self.is_submitting = false;
        self.state = GateState::Cancelled;
        tracing::debug!(view = %self.view_id, post = %self.post_id, "prompt cancelled");
    }

    /// Delete the loaded post.
    ///
    /// Forwards `password` when given, otherwise whatever password
    /// unlocked this view; the backend enforces it for secret posts.
    pub async fn delete(&mut self, password: Option<&str>) -> Result<()> {
        let password = password
            .map(str::to_string)
            .or_else(|| self.remembered_password.clone());
        self.client
            .consultations()
            .delete(&self.post_id, password.as_deref())
            .await
    }

    /// A handle that can abort this gate's in-flight request.
    pub fn canceller(&self) -> GateCanceller {
        GateCanceller {
            inflight: Arc::clone(&self.inflight),
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> GateState {
        self.state
    }

    /// Identifier of the post this view is for.
    pub fn post_id(&self) -> &str {
        &self.post_id
    }

    /// Unique id of this view instance (appears in log output).
    pub fn view_id(&self) -> Uuid {
        self.view_id
    }

    /// The held payload: a redacted stub while locked, the full post once
    /// unlocked. Header fields (title, writer, date) are safe to render
    /// from either.
    pub fn post(&self) -> Option<&Consultation> {
        self.post.as_ref()
    }

    /// The post body, only while unlocked.
    pub fn visible_content(&self) -> Option<&str> {
        if self.state != GateState::Unlocked {
            return None;
        }
        self.post.as_ref().and_then(|p| p.content.as_deref())
    }

    /// Admin replies, only while unlocked.
    pub fn visible_comments(&self) -> &[Comment] {
        if self.state != GateState::Unlocked {
            return &[];
        }
        self.post
            .as_ref()
            .and_then(|p| p.comments.as_deref())
            .unwrap_or(&[])
    }

    /// Whether the password prompt is open.
    pub fn prompt_open(&self) -> bool {
        self.prompt_open
    }

    /// Message to show inside the prompt, if any.
    pub fn prompt_error(&self) -> Option<&str> {
        self.prompt_error.as_deref()
    }

    /// Whether a verification attempt is in flight (disable the submit
    /// control while true).
    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    // --- transitions ---

    fn apply_post(&mut self, post: Consultation) -> LoadOutcome {
        if post.need_password {
            // Belt and braces: drop body fields from the stub even though
            // the backend never sends them alongside need_password.
            self.post = Some(redact(post));
            self.state = GateState::Locked;
            self.prompt_open = true;
            tracing::debug!(view = %self.view_id, post = %self.post_id, "post locked, prompting");
            LoadOutcome::Locked
        } else {
            self.post = Some(post);
            self.state = GateState::Unlocked;
            LoadOutcome::Unlocked
        }
    }

    fn apply_not_found(&mut self) -> LoadOutcome {
        self.post = None;
        self.state = GateState::NotFound;
        self.prompt_open = false;
        tracing::debug!(view = %self.view_id, post = %self.post_id, "post not found");
        LoadOutcome::NotFound
    }

    fn apply_password_ok(&mut self, post: Consultation, candidate: &str) {
        self.post = Some(post);
        self.state = GateState::Unlocked;
        self.prompt_open = false;
        self.prompt_error = None;
        self.remembered_password = Some(candidate.to_string());
        tracing::info!(view = %self.view_id, post = %self.post_id, "post unlocked");
    }

    fn apply_password_rejected(&mut self, message: String) {
        self.state = GateState::Locked;
        self.prompt_open = true;
        self.prompt_error = Some(message);
    }

    /// Map a verification failure to the message shown in the prompt.
    fn submit_failure_message(&self, err: &GreenroomError) -> String {
        match err {
            GreenroomError::AuthFailed(message) | GreenroomError::NotFound(message)
                if !message.is_empty() =>
            {
                message.clone()
            }
            GreenroomError::Http(_) if self.error_mode == ErrorDetailMode::Distinct => {
                MSG_CONNECTION_FAILED.to_string()
            }
            _ => MSG_PASSWORD_MISMATCH.to_string(),
        }
    }

    // --- plumbing ---

    /// Run a request future, registering it with the gate's abort handle.
    ///
    /// Returns `None` when the request was aborted.
    async fn run_abortable<T, F>(&self, fut: F) -> Option<Result<T>>
    where
        F: Future<Output = Result<T>>,
    {
        let (handle, registration) = AbortHandle::new_pair();
        *self.inflight.lock().expect("inflight lock poisoned") = Some(handle);
        let result = Abortable::new(fut, registration).await;
        *self.inflight.lock().expect("inflight lock poisoned") = None;
        result.ok()
    }

    fn abort_inflight(&self) {
        if let Some(handle) = self
            .inflight
            .lock()
            .expect("inflight lock poisoned")
            .take()
        {
            handle.abort();
        }
    }
}

/// Strip body fields from a payload that still requires a password.
fn redact(mut post: Consultation) -> Consultation {
    post.content = None;
    post.comments = None;
    post
}
