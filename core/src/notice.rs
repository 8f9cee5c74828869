use crate::config::ToastConfig;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CopyMethod {
    Clipboard,
    ExecCommand,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CopyOutcome {
    Copied(CopyMethod),
    Failed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub is_error: bool,
}

impl Toast {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: false,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            is_error: true,
        }
    }

    pub fn for_copy(outcome: CopyOutcome, config: &ToastConfig) -> Self {
        match outcome {
            CopyOutcome::Copied(_) => Self::info(config.copy_success.clone()),
            CopyOutcome::Failed => Self::error(config.copy_failure.clone()),
        }
    }
}

/// Tracks the toast currently on screen. Every `show` bumps the generation so
/// a hide timer armed for an older toast can tell it has been superseded.
#[derive(Clone, Debug, Default)]
pub struct ToastState {
    current: Option<Toast>,
    generation: u64,
}

impl ToastState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&Toast> {
        self.current.as_ref()
    }

    pub fn show(&mut self, toast: Toast) -> u64 {
        self.current = Some(toast);
        self.generation = self.generation.wrapping_add(1);
        self.generation
    }

    /// Hides the toast if `generation` is still the latest; returns whether it did.
    pub fn expire(&mut self, generation: u64) -> bool {
        if generation != self.generation || self.current.is_none() {
            return false;
        }
        self.current = None;
        true
    }
}
