//! Short-lived toast messages.

use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastKind {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub kind: ToastKind,
    pub message: String,
}

impl Toast {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: ToastKind::Info,
            message: message.into(),
        }
    }
}

/// Visible toasts, each removed after a fixed number of ticks.
#[derive(Debug)]
pub struct ToastQueue {
    entries: VecDeque<(Toast, u32)>,
    ttl_ticks: u32,
    capacity: usize,
}

impl ToastQueue {
    pub fn new(ttl_ticks: u32, capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            ttl_ticks: ttl_ticks.max(1),
            capacity: capacity.max(1),
        }
    }

    /// Oldest toast is dropped when the queue is full.
    pub fn push(&mut self, toast: Toast) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back((toast, self.ttl_ticks));
    }

    pub fn extend(&mut self, toasts: impl IntoIterator<Item = Toast>) {
        for toast in toasts {
            self.push(toast);
        }
    }

    pub fn on_tick(&mut self) {
        for entry in &mut self.entries {
            entry.1 = entry.1.saturating_sub(1);
        }
        self.entries.retain(|(_, left)| *left > 0);
    }

    pub fn visible(&self) -> impl Iterator<Item = &Toast> {
        self.entries.iter().map(|(toast, _)| toast)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toasts_expire_after_ttl() {
        let mut queue = ToastQueue::new(2, 4);
        queue.push(Toast::info("hello"));
        queue.on_tick();
        assert!(!queue.is_empty());
        queue.on_tick();
        assert!(queue.is_empty());
    }

    #[test]
    fn full_queue_drops_oldest() {
        let mut queue = ToastQueue::new(10, 2);
        queue.extend([Toast::info("a"), Toast::info("b"), Toast::error("c")]);
        let messages: Vec<&str> = queue.visible().map(|t| t.message.as_str()).collect();
        assert_eq!(messages, vec!["b", "c"]);
    }
}
