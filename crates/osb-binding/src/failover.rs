//! Ordered host failover
//!
//! Generic "try each candidate host in order, stop at first success,
//! aggregate failures" executor. Account creation, account deletion and
//! connectivity probing all run through [`attempt`]; they differ only
//! in the operation closure.

use crate::model::TargetHost;
use std::fmt::Display;

/// Successful outcome of a failover attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailoverSuccess<T> {
    /// The host the operation succeeded on
    pub host: TargetHost,

    /// The operation's result
    pub value: T,
}

/// A single host's recorded failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostFailure<E> {
    /// The host that failed
    pub host: TargetHost,

    /// Why it failed
    pub cause: E,
}

/// Failure of an entire failover attempt
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FailoverError<E> {
    /// The candidate list was empty
    #[error("no candidate hosts")]
    NoCandidates,

    /// Every candidate host failed
    #[error("operation failed on all {} candidate hosts", .0.len())]
    Exhausted(Vec<HostFailure<E>>),
}

/// Try `operation` against each host in order, stopping at the first
/// success
///
/// First success wins: later hosts are never invoked once one
/// succeeds, which keeps side effects (such as remote account creation)
/// down to at most one. Per-host failures are recorded in host order
/// and returned together when the list is exhausted. A single host is
/// attempted exactly once per call; there is no intra-host retry and no
/// timeout logic here.
///
/// # Errors
/// - [`FailoverError::NoCandidates`] for an empty host list
/// - [`FailoverError::Exhausted`] with every per-host failure, in order
pub fn attempt<T, E: Display>(
    hosts: &[TargetHost],
    mut operation: impl FnMut(&TargetHost) -> Result<T, E>,
) -> Result<FailoverSuccess<T>, FailoverError<E>> {
    if hosts.is_empty() {
        return Err(FailoverError::NoCandidates);
    }

    let mut failures = Vec::new();
    for host in hosts {
        match operation(host) {
            Ok(value) => {
                return Ok(FailoverSuccess {
                    host: host.clone(),
                    value,
                });
            }
            Err(cause) => {
                tracing::info!("operation failed on host {host}: {cause}");
                failures.push(HostFailure {
                    host: host.clone(),
                    cause,
                });
            }
        }
    }

    Err(FailoverError::Exhausted(failures))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    fn hosts(n: u8) -> Vec<TargetHost> {
        (1..=n).map(|i| TargetHost::new(format!("10.0.0.{i}"), 9200)).collect()
    }

    #[test]
    fn first_success_wins() {
        let candidates = hosts(3);
        let attempts = RefCell::new(Vec::new());

        let outcome = attempt(&candidates, |host| {
            attempts.borrow_mut().push(host.clone());
            if host.address == "10.0.0.1" {
                Err("down")
            } else {
                Ok(host.address.clone())
            }
        })
        .unwrap();

        assert_eq!(outcome.host, candidates[1]);
        assert_eq!(outcome.value, "10.0.0.2");
        // The third host is never invoked.
        assert_eq!(attempts.borrow().as_slice(), &candidates[..2]);
    }

    #[test]
    fn exhaustion_aggregates_failures_in_order() {
        let candidates = hosts(2);

        let err = attempt(&candidates, |host| -> Result<(), String> {
            Err(format!("{host} down"))
        })
        .unwrap_err();

        let FailoverError::Exhausted(failures) = err else {
            panic!("expected exhaustion");
        };
        assert_eq!(failures.len(), 2);
        assert_eq!(failures[0].host, candidates[0]);
        assert_eq!(failures[1].host, candidates[1]);
        assert_eq!(failures[0].cause, "10.0.0.1:9200 down");
    }

    #[test]
    fn empty_list_is_an_error() {
        let err = attempt(&[], |_host| Ok::<_, &str>(())).unwrap_err();
        assert_eq!(err, FailoverError::<&str>::NoCandidates);
    }

    #[test]
    fn single_host_attempted_exactly_once() {
        let candidates = hosts(1);
        let calls = RefCell::new(0u32);

        let _ = attempt(&candidates, |_host| -> Result<(), &str> {
            *calls.borrow_mut() += 1;
            Err("down")
        });

        assert_eq!(*calls.borrow(), 1);
    }
}
