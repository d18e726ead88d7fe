use std::fmt::Debug;

/// Channel for transient, user-visible messages (fetch failures and the
/// like). Implementations must not block.
pub trait Notifier: Send + Sync + Debug {
    fn notify(&self, message: &str);
}

/// Notifier that drops every message. Useful where no user is watching.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullNotifier;

impl Notifier for NullNotifier {
    fn notify(&self, _message: &str) {}
}
