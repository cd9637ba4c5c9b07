use crate::client::{ClientError, WaitlistClient};

/// Message shown when submit is pressed with nothing in the input
const MSG_EMPTY_EMAIL: &str = "请输入邮箱地址";
/// Message shown when the request never reaches the server
const MSG_NETWORK_FAILURE: &str = "网络错误，请检查连接后重试";
/// Fallback message for a rejection without an error body
const MSG_SUBMIT_FALLBACK: &str = "提交失败，请重试";
/// Fallback message for a success response without text
const MSG_SUCCESS_FALLBACK: &str = "成功加入等待列表！";

/// Form submission status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FormStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// Controller behind the landing page signup form
///
/// Tracks the input text, the submission status, the message shown under the
/// form and the optimistic signup count displayed next to it.
#[derive(Debug, Default)]
pub struct SignupForm {
    email: String,
    status: FormStatus,
    message: String,
    waitlist_count: Option<u64>,
}

impl SignupForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current input text
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Current submission status
    pub const fn status(&self) -> FormStatus {
        self.status
    }

    /// Message to show under the form, empty when there is none
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Last known signup count, if the initial fetch succeeded
    pub const fn waitlist_count(&self) -> Option<u64> {
        self.waitlist_count
    }

    /// Whether the input and the submit control are disabled
    pub fn is_input_disabled(&self) -> bool {
        matches!(self.status, FormStatus::Loading | FormStatus::Success)
    }

    /// Fetch the current signup count; a failure leaves the count unknown
    pub async fn mount(&mut self, client: &WaitlistClient) {
        if let Ok(count) = client.count().await {
            self.waitlist_count = Some(count);
        }
    }

    /// Replace the input text, leaving a previous error state behind
    pub fn input_changed(&mut self, text: impl Into<String>) {
        self.email = text.into();
        if self.status == FormStatus::Error {
            self.status = FormStatus::Idle;
            self.message.clear();
        }
    }

    /// Submit the current input to the waitlist
    ///
    /// Does nothing while a submission is in flight or after one succeeded.
    pub async fn submit(&mut self, client: &WaitlistClient) {
        if self.is_input_disabled() {
            return;
        }

        if self.email.trim().is_empty() {
            self.status = FormStatus::Error;
            self.message = MSG_EMPTY_EMAIL.into();
            return;
        }

        self.status = FormStatus::Loading;
        self.message.clear();

        match client.join(self.email.trim()).await {
            Ok(response) => {
                self.status = FormStatus::Success;
                self.message = if response.message.is_empty() {
                    MSG_SUCCESS_FALLBACK.into()
                } else {
                    response.message
                };
                self.email.clear();
                if let Some(count) = self.waitlist_count {
                    self.waitlist_count = Some(count + 1);
                }
            }
            Err(ClientError::Rejected { error, .. }) => {
                self.status = FormStatus::Error;
                self.message = error.unwrap_or_else(|| MSG_SUBMIT_FALLBACK.into());
            }
            Err(ClientError::Network(_)) => {
                self.status = FormStatus::Error;
                self.message = MSG_NETWORK_FAILURE.into();
            }
        }
    }
}
