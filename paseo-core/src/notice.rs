use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Error,
    Notice,
    Success,
}

/// A message shown to the shopper on the checkout page
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

/// Append-only sink for checkout notices.
///
/// Any error notice blocks order creation; enforcing that is up to the caller.
pub trait NoticeSink {
    fn add(&mut self, notice: Notice);

    fn add_error(&mut self, message: String) {
        self.add(Notice::error(message));
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NoticeList {
    notices: Vec<Notice>,
}

impl NoticeList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn has_errors(&self) -> bool {
        self.notices.iter().any(|n| n.level == NoticeLevel::Error)
    }

    pub fn error_count(&self) -> usize {
        self.notices.iter().filter(|n| n.level == NoticeLevel::Error).count()
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn into_messages(self) -> Vec<String> {
        self.notices.into_iter().map(|n| n.message).collect()
    }
}

impl NoticeSink for NoticeList {
    fn add(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}

impl NoticeSink for Vec<Notice> {
    fn add(&mut self, notice: Notice) {
        self.push(notice);
    }
}
