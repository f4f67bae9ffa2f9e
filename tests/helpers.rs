// Shared test helpers: in-memory resolvers with predictable behavior.
//
// This module provides stub `Resolve` implementations used across multiple test
// files so batch behavior can be checked without network access.

use std::collections::{BTreeSet, HashMap};
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use bulk_resolve::{Resolution, Resolve, ResolveFailure};
use futures::future::{BoxFuture, FutureExt};

/// Answers from a fixed table; unknown hosts fail as NXDOMAIN.
pub struct StubResolver {
    answers: HashMap<String, Vec<Ipv4Addr>>,
    calls: AtomicUsize,
}

impl StubResolver {
    pub fn new(answers: &[(&str, &[Ipv4Addr])]) -> Self {
        Self {
            answers: answers
                .iter()
                .map(|(host, ips)| (host.to_string(), ips.to_vec()))
                .collect(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of lookups issued so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Resolve for StubResolver {
    fn resolve<'a>(&'a self, host: &'a str) -> BoxFuture<'a, Resolution> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let outcome = match self.answers.get(host) {
            Some(ips) => Resolution::Resolved(ips.iter().copied().collect::<BTreeSet<_>>()),
            None => Resolution::Failed(ResolveFailure::NameNotFound("NXDOMAIN".to_string())),
        };
        async move { outcome }.boxed()
    }
}

/// Never answers before `lifetime` elapses, like an unreachable nameserver.
#[allow(dead_code)] // Used by other test files
pub struct BlackholeResolver {
    pub lifetime: Duration,
}

impl Resolve for BlackholeResolver {
    fn resolve<'a>(&'a self, _host: &'a str) -> BoxFuture<'a, Resolution> {
        async move {
            tokio::time::sleep(self.lifetime).await;
            Resolution::Failed(ResolveFailure::Timeout)
        }
        .boxed()
    }
}
