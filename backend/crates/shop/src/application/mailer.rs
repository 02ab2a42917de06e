//! Welcome Mail
//!
//! Registration only enqueues a [`WelcomeEmail`]; a background worker hands
//! it to the configured [`WelcomeMailer`] after the response has gone out.
//! Delivery failures are logged by the worker and never reach the caller.

use thiserror::Error;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::domain::value_object::email::Email;

/// Welcome message for a newly registered user
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WelcomeEmail {
    pub to: Email,
    pub first_name: String,
}

impl WelcomeEmail {
    pub fn subject(&self) -> String {
        format!("Welcome to ShopHub {}", self.first_name.to_uppercase())
    }
}

#[derive(Debug, Error)]
#[error("Mail delivery failed: {0}")]
pub struct MailError(pub String);

/// Delivery backend for welcome mail
#[trait_variant::make(WelcomeMailer: Send)]
pub trait LocalWelcomeMailer {
    async fn send_welcome(&self, email: &WelcomeEmail) -> Result<(), MailError>;
}

/// Mailer that only records the message in the log
#[derive(Debug, Clone, Copy, Default)]
pub struct LogMailer;

impl WelcomeMailer for LogMailer {
    async fn send_welcome(&self, email: &WelcomeEmail) -> Result<(), MailError> {
        tracing::info!(
            to = %email.to,
            subject = %email.subject(),
            "Welcome email (log only)"
        );
        Ok(())
    }
}

/// Sending side of the mail worker
#[derive(Debug, Clone)]
pub struct MailQueue {
    tx: mpsc::UnboundedSender<WelcomeEmail>,
}

impl MailQueue {
    /// Spawn a worker delivering through `mailer`
    pub fn spawn<M>(mailer: M) -> (Self, JoinHandle<()>)
    where
        M: WelcomeMailer + Send + Sync + 'static,
    {
        let (queue, rx) = Self::channel();
        let handle = tokio::spawn(run_mail_worker(mailer, rx));
        (queue, handle)
    }

    /// Queue plus its receiving end, for callers that drive delivery themselves
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<WelcomeEmail>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Queue `email`; never blocks and never fails the caller
    pub fn enqueue(&self, email: WelcomeEmail) {
        if let Err(mpsc::error::SendError(email)) = self.tx.send(email) {
            tracing::warn!(to = %email.to, "Mail worker stopped, welcome email dropped");
        }
    }
}

/// Deliver queued mail until every `MailQueue` is dropped
pub async fn run_mail_worker<M>(mailer: M, mut rx: mpsc::UnboundedReceiver<WelcomeEmail>)
where
    M: WelcomeMailer,
{
    while let Some(email) = rx.recv().await {
        match mailer.send_welcome(&email).await {
            Ok(()) => tracing::debug!(to = %email.to, "Welcome email delivered"),
            Err(e) => tracing::warn!(to = %email.to, error = %e, "Welcome email failed"),
        }
    }
    tracing::info!("Mail worker stopped");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn welcome(name: &str) -> WelcomeEmail {
        WelcomeEmail {
            to: Email::new("jane@x.com").unwrap(),
            first_name: name.to_string(),
        }
    }

    #[derive(Clone, Default)]
    struct FlakyMailer {
        attempts: Arc<AtomicUsize>,
    }

    impl WelcomeMailer for FlakyMailer {
        async fn send_welcome(&self, _email: &WelcomeEmail) -> Result<(), MailError> {
            let attempt = self.attempts.fetch_add(1, Ordering::SeqCst);
            if attempt == 0 {
                Err(MailError("smtp down".to_string()))
            } else {
                Ok(())
            }
        }
    }

    #[test]
    fn test_subject_uppercases_name() {
        assert_eq!(welcome("Jane").subject(), "Welcome to ShopHub JANE");
    }

    #[tokio::test]
    async fn test_worker_survives_failures() {
        let mailer = FlakyMailer::default();
        let attempts = mailer.attempts.clone();
        let (queue, handle) = MailQueue::spawn(mailer);

        queue.enqueue(welcome("Jane"));
        queue.enqueue(welcome("John"));
        drop(queue);
        handle.await.unwrap();

        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_enqueue_after_worker_stopped_does_not_panic() {
        let (queue, rx) = MailQueue::channel();
        drop(rx);
        queue.enqueue(welcome("Jane"));
    }
}
