//! Mail notification side channel.
//!
//! Deletions send a best-effort notification. The capability is a trait so
//! the local and cloud transports stay interchangeable; which one runs is
//! decided by configuration at startup, never at the call site.

const MAIL_FROM: &str = "noreply@mycompany.com";
const MAIL_TO: &str = "admin@mycompany.com";

/// Fire-and-forget notification capability.
///
/// Implementations must not block the caller and must swallow their own
/// failures; nothing downstream consumes a result.
pub trait Notifier: Send + Sync {
    fn notify(&self, subject: &str, body: &str);
}

/// Development notifier: delivery is the log stream.
#[derive(Debug, Default)]
pub struct LocalMailNotifier;

impl Notifier for LocalMailNotifier {
    fn notify(&self, subject: &str, body: &str) {
        tracing::info!(
            target: "cityinfo::mail",
            from = MAIL_FROM,
            to = MAIL_TO,
            subject,
            body,
            "mail notification (local)"
        );
    }
}

/// Cloud delivery stand-in.
///
/// Logs where a real mail client would hand off; the trait seam is what a
/// production transport would implement.
#[derive(Debug, Default)]
pub struct CloudMailNotifier;

impl Notifier for CloudMailNotifier {
    fn notify(&self, subject: &str, body: &str) {
        tracing::info!(
            target: "cityinfo::mail::cloud",
            from = MAIL_FROM,
            to = MAIL_TO,
            subject,
            body,
            "mail notification (cloud)"
        );
    }
}
