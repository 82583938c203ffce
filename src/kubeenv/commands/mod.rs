//! # Commands
//!
//! One module per operation. Each `run` takes the store (and whatever else
//! it needs) as plain arguments and returns a [`CmdResult`]: structured data
//! plus user-facing messages. Nothing here prints or exits.

pub mod add;
pub mod current;
pub mod delete;
pub mod import;
pub mod list;
pub mod rename;
pub mod switch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// One line of `list` output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvEntry {
    pub name: String,
    pub active: bool,
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub envs: Vec<EnvEntry>,
    /// Environments created or modified by the command
    pub affected: Vec<String>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_envs(mut self, envs: Vec<EnvEntry>) -> Self {
        self.envs = envs;
        self
    }

    pub fn with_message(mut self, message: CmdMessage) -> Self {
        self.messages.push(message);
        self
    }

    /// True when a per-item failure was reported (bulk operations keep going past them).
    pub fn has_errors(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.level == MessageLevel::Error)
    }
}
