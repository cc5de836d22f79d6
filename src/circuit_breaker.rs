use failsafe::{backoff, failure_policy, Config};
use std::time::Duration;

/// Circuit breaker type guarding calls to the AI service.
pub type AiCircuitBreaker =
    failsafe::StateMachine<failure_policy::ConsecutiveFailures<backoff::Exponential>, ()>;

/// Creates a circuit breaker for AI classification calls.
///
/// # Configuration
///
/// - **Failure threshold**: `threshold` consecutive failures triggers OPEN state.
/// - **Backoff**: Exponential backoff from 10s to 60s before attempting recovery.
///
/// While OPEN, leads are classified by the local heuristic without an outbound call.
pub fn create_ai_circuit_breaker(threshold: u32) -> AiCircuitBreaker {
    let backoff_strategy = backoff::exponential(
        Duration::from_secs(10), // Initial delay
        Duration::from_secs(60), // Maximum delay
    );

    let failure_policy = failure_policy::consecutive_failures(threshold.max(1), backoff_strategy);

    Config::new().failure_policy(failure_policy).build()
}

/// Breaker for a configured threshold; `0` disables it.
pub fn ai_circuit_breaker_from_threshold(threshold: u32) -> Option<AiCircuitBreaker> {
    if threshold == 0 {
        return None;
    }
    Some(create_ai_circuit_breaker(threshold))
}
