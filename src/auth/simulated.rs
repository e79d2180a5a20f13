//! Timed stand-in for a biometric sensor. Always succeeds once the
//! configured delay has passed.

use std::time::Duration;

use async_trait::async_trait;
use log::info;

use super::provider::{AuthMethod, AuthOutcome, AuthenticationProvider};

pub const DEFAULT_AUTH_DELAY: Duration = Duration::from_millis(1500);

pub struct SimulatedBiometrics {
    delay: Duration,
}

impl Default for SimulatedBiometrics {
    fn default() -> Self {
        Self::new(DEFAULT_AUTH_DELAY)
    }
}

impl SimulatedBiometrics {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl AuthenticationProvider for SimulatedBiometrics {
    fn name(&self) -> &str {
        "simulated"
    }

    async fn attempt(&self, method: AuthMethod) -> AuthOutcome {
        info!("Simulating {} scan ({}ms)", method, self.delay.as_millis());
        tokio::time::sleep(self.delay).await;
        AuthOutcome::Succeeded
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::{assert_pending, assert_ready_eq, task};

    #[tokio::test(start_paused = true)]
    async fn test_succeeds_only_after_delay() {
        let provider = SimulatedBiometrics::new(Duration::from_millis(1500));
        let mut attempt = task::spawn(provider.attempt(AuthMethod::Fingerprint));

        assert_pending!(attempt.poll());
        tokio::time::advance(Duration::from_millis(1000)).await;
        assert_pending!(attempt.poll());
        tokio::time::advance(Duration::from_millis(600)).await;
        assert_ready_eq!(attempt.poll(), AuthOutcome::Succeeded);
    }

    #[tokio::test(start_paused = true)]
    async fn test_zero_delay_is_immediate() {
        let provider = SimulatedBiometrics::new(Duration::ZERO);
        assert_eq!(provider.attempt(AuthMethod::Face).await, AuthOutcome::Succeeded);
    }

    #[test]
    fn test_method_parsing_and_toggle() {
        assert_eq!("Face".parse::<AuthMethod>().unwrap(), AuthMethod::Face);
        assert!("retina".parse::<AuthMethod>().is_err());
        assert_eq!(AuthMethod::Fingerprint.toggled(), AuthMethod::Face);
        assert_eq!(SimulatedBiometrics::default().delay(), DEFAULT_AUTH_DELAY);
    }
}
