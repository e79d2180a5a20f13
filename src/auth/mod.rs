pub mod provider;
pub mod simulated;

pub use provider::{AuthMethod, AuthOutcome, AuthSession, AuthenticationProvider};
pub use simulated::SimulatedBiometrics;
