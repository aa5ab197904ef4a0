//! Elastic-IP verification against the cloud metadata endpoint.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::app::context::StepContext;
use crate::domain::outcome::StepOutcome;
use crate::domain::retry::{poll_until, RetryPolicy};
use crate::error::Result;

use super::ProvisionStep;

/// 20 polls 30 seconds apart: a ten-minute bound.
const MAX_ATTEMPTS: u32 = 20;
const POLL_DELAY: Duration = Duration::from_secs(30);

/// Waits for the expected public address to be attached to the instance.
///
/// Exhaustion is a warning, not an abort: DNS and proxy correctness depend
/// on the address, but the deployment can proceed and be re-verified later.
pub struct AddressWaiter;

#[async_trait]
impl ProvisionStep for AddressWaiter {
    fn name(&self) -> &'static str {
        "address"
    }

    async fn execute(&self, ctx: &StepContext) -> Result<StepOutcome> {
        // Metadata reachability doubles as the "running in the target
        // cloud" signal; local test hosts skip the wait entirely.
        if !ctx.metadata.available().await {
            warn!("Metadata endpoint unreachable, skipping address verification");
            return Ok(StepOutcome::tolerated(
                "metadata endpoint unreachable, address not verified",
            ));
        }

        let expected = ctx.config.network.expected_address.clone();
        let policy = RetryPolicy::fixed(MAX_ATTEMPTS, POLL_DELAY);
        let metadata = ctx.metadata.clone();

        let result = poll_until(&policy, "elastic-ip", || {
            let metadata = metadata.clone();
            let expected = expected.clone();
            async move {
                match metadata.public_ipv4().await {
                    Ok(address) => address == expected,
                    Err(err) => {
                        warn!(error = %err, "Metadata poll failed");
                        false
                    }
                }
            }
        })
        .await;

        if result.succeeded {
            info!(address = %expected, attempts = result.attempts, "Expected address attached");
            Ok(StepOutcome::Success)
        } else {
            Ok(StepOutcome::tolerated(format!(
                "expected address {expected} not attached after {} attempts",
                result.attempts
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::FakeHostSet;

    #[tokio::test]
    async fn test_unreachable_metadata_skips_wait() {
        let hosts = FakeHostSet::new();
        let ctx = hosts.context();

        let outcome = AddressWaiter.execute(&ctx).await.unwrap();

        assert!(matches!(outcome, StepOutcome::Tolerated(_)));
        assert_eq!(hosts.metadata.poll_count(), 0);
    }

    #[tokio::test]
    async fn test_immediate_match_succeeds_on_first_poll() {
        let hosts = FakeHostSet::new();
        hosts.metadata.set_available(true);
        hosts.metadata.set_address("13.203.1.165");
        let ctx = hosts.context();

        let outcome = AddressWaiter.execute(&ctx).await.unwrap();

        assert_eq!(outcome, StepOutcome::Success);
        assert_eq!(hosts.metadata.poll_count(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_exhaustion_is_tolerated_and_bounded() {
        let hosts = FakeHostSet::new();
        hosts.metadata.set_available(true);
        hosts.metadata.set_address("3.3.3.3");
        let ctx = hosts.context();

        let outcome = AddressWaiter.execute(&ctx).await.unwrap();

        match outcome {
            StepOutcome::Tolerated(warnings) => {
                assert!(warnings[0].contains("13.203.1.165"));
                assert!(warnings[0].contains("20 attempts"));
            }
            StepOutcome::Success => panic!("expected tolerated outcome"),
        }
        assert_eq!(hosts.metadata.poll_count(), 20);
    }

    #[tokio::test(start_paused = true)]
    async fn test_late_attachment_succeeds_mid_wait() {
        let hosts = FakeHostSet::new();
        hosts.metadata.set_available(true);
        hosts
            .metadata
            .script_addresses(&["3.3.3.3", "3.3.3.3", "13.203.1.165"]);
        let ctx = hosts.context();

        let outcome = AddressWaiter.execute(&ctx).await.unwrap();

        assert_eq!(outcome, StepOutcome::Success);
        assert_eq!(hosts.metadata.poll_count(), 3);
    }
}
