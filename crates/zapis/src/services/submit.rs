//! The simulated submission round trip.
//!
//! There is no network endpoint; delivery is one artificial delay followed
//! by success. The result is typed so the caller's guard against a failed
//! round trip is real, and a submission always resolves: no cancellation,
//! no timeout.

use std::time::Duration;

use form::FormValues;
use tokio::sync::mpsc::UnboundedSender;
use tracing::debug;

use crate::action::Action;

/// Deliver one set of committed values. Resolves after `delay`.
pub async fn deliver(values: FormValues, delay: Duration) -> Result<FormValues, String> {
    tokio::time::sleep(delay).await;
    Ok(values)
}

/// Spawn the round trip and report back on the action channel. The caller
/// keeps its pending flag up until `SubmitFinished` arrives, which happens
/// exactly once per spawn.
pub fn spawn(tx: UnboundedSender<Action>, values: FormValues, delay: Duration) {
    tokio::spawn(async move {
        debug!("submission started (delay {:?})", delay);
        let result = deliver(values, delay).await;
        tx.send(Action::SubmitFinished(result)).ok();
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn deliver_resolves_with_the_committed_values() {
        let values = FormValues {
            username: "jana_n".into(),
            email: "jana@example.com".into(),
            ..Default::default()
        };
        let delivered = deliver(values.clone(), Duration::from_millis(1))
            .await
            .unwrap();
        assert_eq!(delivered, values);
    }

    #[tokio::test]
    async fn spawn_reports_finished_exactly_once() {
        let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
        spawn(tx, FormValues::default(), Duration::from_millis(1));

        let first = rx.recv().await;
        assert!(matches!(first, Some(Action::SubmitFinished(Ok(_)))));

        // channel closes after the single report
        assert!(rx.recv().await.is_none());
    }
}
