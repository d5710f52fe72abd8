// ── Two-tier call strategy ──
//
// Guest writes go to the site scope first and, on any failure, are
// retried once at the org scope. Settlement is kept as a pure function
// so the decision table is testable without a network.

use std::future::Future;

/// Which tier produced the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Primary,
    Secondary,
}

/// Result of running (or settling) a two-tier call.
#[derive(Debug)]
pub enum Outcome<T, E> {
    Primary(T),
    /// The primary failed and the secondary succeeded.
    Secondary { value: T, primary_error: E },
    /// Nothing succeeded. `secondary_error` is absent only when the
    /// secondary was never attempted.
    Failed {
        primary_error: E,
        secondary_error: Option<E>,
    },
}

impl<T, E> Outcome<T, E> {
    /// The value and its tier, or the error that should be surfaced:
    /// the secondary's when it ran, otherwise the primary's.
    pub fn into_result(self) -> Result<(T, Tier), E> {
        match self {
            Self::Primary(value) => Ok((value, Tier::Primary)),
            Self::Secondary { value, .. } => Ok((value, Tier::Secondary)),
            Self::Failed {
                primary_error,
                secondary_error,
            } => Err(secondary_error.unwrap_or(primary_error)),
        }
    }
}

/// Decide the outcome from the primary result and the secondary result,
/// if a secondary was attempted. A successful primary wins regardless.
pub fn settle<T, E>(primary: Result<T, E>, secondary: Option<Result<T, E>>) -> Outcome<T, E> {
    match (primary, secondary) {
        (Ok(value), _) => Outcome::Primary(value),
        (Err(primary_error), Some(Ok(value))) => Outcome::Secondary {
            value,
            primary_error,
        },
        (Err(primary_error), Some(Err(secondary_error))) => Outcome::Failed {
            primary_error,
            secondary_error: Some(secondary_error),
        },
        (Err(primary_error), None) => Outcome::Failed {
            primary_error,
            secondary_error: None,
        },
    }
}

/// Await `primary`; only if it fails, build and await the secondary.
pub async fn two_tier<T, E, P, S, SF>(primary: P, secondary: S) -> Outcome<T, E>
where
    P: Future<Output = Result<T, E>>,
    S: FnOnce() -> SF,
    SF: Future<Output = Result<T, E>>,
{
    match primary.await {
        Ok(value) => settle(Ok(value), None),
        Err(err) => {
            let second = secondary().await;
            settle(Err(err), Some(second))
        }
    }
}
