use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

/// Outcome of checking one candidate produced by an attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    AcceptedWithWarning(String),
    Rejected(String),
}

impl Verdict {
    pub fn is_accepted(&self) -> bool {
        !matches!(self, Verdict::Rejected(_))
    }
}

/// Wait inserted between two attempts.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DelayStrategy {
    #[default]
    None,
    Fixed(Duration),
    Exponential { base: Duration, max: Duration },
}

impl DelayStrategy {
    /// Delay to wait after the given failed attempt (1-based).
    pub fn delay_after(&self, attempt: u32) -> Duration {
        match self {
            DelayStrategy::None => Duration::ZERO,
            DelayStrategy::Fixed(delay) => *delay,
            DelayStrategy::Exponential { base, max } => {
                let exponent = attempt.saturating_sub(1).min(16);
                base.saturating_mul(1u32 << exponent).min(*max)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    max_attempts: u32,
    pub delay: DelayStrategy,
}

impl RetryPolicy {
    pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

    /// Budgets below one are raised to one: the first call always happens.
    pub fn new(max_attempts: u32, delay: DelayStrategy) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            delay,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_ATTEMPTS, DelayStrategy::None)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validated<T> {
    pub value: T,
    pub verdict: Verdict,
    pub attempts: u32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryError<E> {
    /// The attempt itself failed; no further attempts were made.
    Aborted { error: E, attempts: u32 },
    /// Every attempt produced a rejected candidate.
    Exhausted { attempts: u32, last_reason: String },
}

/// Runs `attempt` until `check` accepts its output or the budget in `policy`
/// is spent. Errors returned by `attempt` end the loop immediately.
pub async fn retry_until_valid<T, E, F, Fut, P>(
    policy: &RetryPolicy,
    mut attempt: F,
    mut check: P,
) -> Result<Validated<T>, RetryError<E>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    P: FnMut(&T) -> Verdict,
{
    let mut last_reason = String::new();

    for current in 1..=policy.max_attempts() {
        let value = attempt(current).await.map_err(|error| RetryError::Aborted {
            error,
            attempts: current,
        })?;

        match check(&value) {
            Verdict::Rejected(reason) => {
                warn!(attempt = current, %reason, "candidate rejected");
                last_reason = reason;
            }
            verdict => {
                debug!(attempt = current, ?verdict, "candidate accepted");
                return Ok(Validated {
                    value,
                    verdict,
                    attempts: current,
                });
            }
        }

        if current < policy.max_attempts() {
            let delay = policy.delay.delay_after(current);
            if !delay.is_zero() {
                tokio::time::sleep(delay).await;
            }
        }
    }

    Err(RetryError::Exhausted {
        attempts: policy.max_attempts(),
        last_reason,
    })
}

#[cfg(test)]
mod tests {
    use std::cell::{Cell, RefCell};

    use tokio::time::Instant;

    use super::*;

    fn accept_when_even(value: &u32) -> Verdict {
        if value % 2 == 0 {
            Verdict::Accepted
        } else {
            Verdict::Rejected(format!("{value} is odd"))
        }
    }

    #[test]
    fn test_budget_is_at_least_one() {
        assert_eq!(RetryPolicy::new(0, DelayStrategy::None).max_attempts(), 1);
        assert_eq!(RetryPolicy::default().max_attempts(), 3);
    }

    #[test]
    fn test_delay_strategies() {
        assert_eq!(DelayStrategy::None.delay_after(2), Duration::ZERO);
        assert_eq!(
            DelayStrategy::Fixed(Duration::from_millis(250)).delay_after(5),
            Duration::from_millis(250)
        );

        let exponential = DelayStrategy::Exponential {
            base: Duration::from_millis(100),
            max: Duration::from_millis(350),
        };
        assert_eq!(exponential.delay_after(1), Duration::from_millis(100));
        assert_eq!(exponential.delay_after(2), Duration::from_millis(200));
        assert_eq!(exponential.delay_after(3), Duration::from_millis(350));
    }

    #[tokio::test]
    async fn test_accepts_first_valid_candidate() {
        let calls = Cell::new(0u32);
        let result = retry_until_valid(
            &RetryPolicy::default(),
            |attempt| {
                calls.set(calls.get() + 1);
                async move { Ok::<u32, String>(attempt + 1) }
            },
            accept_when_even,
        )
        .await
        .unwrap();

        assert_eq!(result.value, 2);
        assert_eq!(result.attempts, 1);
        assert_eq!(result.verdict, Verdict::Accepted);
        assert_eq!(calls.get(), 1);
    }

    #[tokio::test]
    async fn test_retries_until_accepted() {
        let result = retry_until_valid(
            &RetryPolicy::default(),
            |attempt| async move { Ok::<u32, String>(if attempt < 3 { 1 } else { 4 }) },
            accept_when_even,
        )
        .await
        .unwrap();

        assert_eq!(result.value, 4);
        assert_eq!(result.attempts, 3);
    }

    #[tokio::test]
    async fn test_stops_after_budget() {
        let calls = Cell::new(0u32);
        let result = retry_until_valid(
            &RetryPolicy::new(2, DelayStrategy::None),
            |_| {
                calls.set(calls.get() + 1);
                async { Ok::<u32, String>(7) }
            },
            accept_when_even,
        )
        .await;

        assert_eq!(
            result,
            Err(RetryError::Exhausted {
                attempts: 2,
                last_reason: "7 is odd".to_string(),
            })
        );
        assert_eq!(calls.get(), 2);
    }

    /// Elapsed time at the start of every attempt, and in total.
    async fn attempt_offsets(policy: RetryPolicy) -> (Vec<Duration>, Duration) {
        let started = Instant::now();
        let offsets = RefCell::new(Vec::new());

        let result = retry_until_valid(
            &policy,
            |_| {
                offsets.borrow_mut().push(started.elapsed());
                async { Ok::<u32, String>(1) }
            },
            accept_when_even,
        )
        .await;

        assert!(matches!(result, Err(RetryError::Exhausted { .. })));
        (offsets.into_inner(), started.elapsed())
    }

    #[tokio::test(start_paused = true)]
    async fn test_fixed_delay_only_between_attempts() {
        let (offsets, total) = attempt_offsets(RetryPolicy::new(
            3,
            DelayStrategy::Fixed(Duration::from_millis(100)),
        ))
        .await;

        assert_eq!(
            offsets,
            vec![
                Duration::ZERO,
                Duration::from_millis(100),
                Duration::from_millis(200)
            ]
        );
        assert_eq!(total, Duration::from_millis(200));
    }

    #[tokio::test(start_paused = true)]
    async fn test_exponential_delay_is_capped() {
        let (offsets, total) = attempt_offsets(RetryPolicy::new(
            4,
            DelayStrategy::Exponential {
                base: Duration::from_millis(100),
                max: Duration::from_millis(150),
            },
        ))
        .await;

        assert_eq!(
            offsets,
            vec![
                Duration::ZERO,
                Duration::from_millis(100),
                Duration::from_millis(250),
                Duration::from_millis(400)
            ]
        );
        assert_eq!(total, Duration::from_millis(400));
    }

    #[tokio::test]
    async fn test_attempt_error_aborts_immediately() {
        let calls = Cell::new(0u32);
        let result = retry_until_valid(
            &RetryPolicy::default(),
            |_| {
                calls.set(calls.get() + 1);
                async { Err::<u32, String>("quota".to_string()) }
            },
            accept_when_even,
        )
        .await;

        assert_eq!(
            result,
            Err(RetryError::Aborted {
                error: "quota".to_string(),
                attempts: 1,
            })
        );
        assert_eq!(calls.get(), 1);
    }
}
