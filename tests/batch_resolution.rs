//! Batch resolution behavior through the public async API.

mod helpers;

use std::net::Ipv4Addr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use bulk_resolve::{BatchCoordinator, CandidateRecord};
use helpers::{BlackholeResolver, StubResolver};

fn coordinator<R: bulk_resolve::Resolve>(resolver: Arc<R>, max: usize) -> BatchCoordinator<R> {
    BatchCoordinator::new(resolver, max).with_progress_interval(Duration::ZERO)
}

#[tokio::test]
async fn test_mixed_batch_matches_expected_output() {
    let resolver = Arc::new(StubResolver::new(&[(
        "a.example.com",
        &[Ipv4Addr::new(9, 9, 9, 9)],
    )]));

    let input = vec![
        CandidateRecord::new("a.example.com"),
        CandidateRecord::with_ips("b.example.com", "1.2.3.4"),
    ];
    let output = coordinator(Arc::clone(&resolver), 50)
        .resolve_batch(input)
        .await;

    let expected: Vec<CandidateRecord> = serde_json::from_str(
        r#"[
            {"subdomain": "a.example.com", "ips": "9.9.9.9", "valid": 1},
            {"subdomain": "b.example.com", "ips": "1.2.3.4", "valid": 1}
        ]"#,
    )
    .unwrap();
    assert_eq!(output, expected);
    assert_eq!(resolver.calls(), 1, "resolved record must not be looked up");
}

#[tokio::test]
async fn test_nonexistent_host_is_invalid_with_reason() {
    let resolver = Arc::new(StubResolver::new(&[]));
    let output = coordinator(resolver, 50)
        .resolve_batch(vec![CandidateRecord::new("nope.invalid")])
        .await;

    assert_eq!(output.len(), 1);
    assert_eq!(output[0].valid, 0);
    let reason = output[0].ips.as_deref().unwrap_or_default();
    assert!(!reason.is_empty());
    assert!(reason.contains("NXDOMAIN"), "reason was {reason}");
}

#[tokio::test]
async fn test_length_order_and_untouched_records() {
    let answers: Vec<(String, Vec<Ipv4Addr>)> = (0..100u8)
        .filter(|i| i % 3 == 0)
        .map(|i| (format!("h{i}.example.com"), vec![Ipv4Addr::new(10, 1, 0, i)]))
        .collect();
    let table: Vec<(&str, &[Ipv4Addr])> = answers
        .iter()
        .map(|(h, ips)| (h.as_str(), ips.as_slice()))
        .collect();
    let resolver = Arc::new(StubResolver::new(&table));

    let input: Vec<CandidateRecord> = (0..100u8)
        .map(|i| {
            if i % 5 == 0 {
                CandidateRecord::with_ips(format!("h{i}.example.com"), "203.0.113.1")
            } else {
                CandidateRecord::new(format!("h{i}.example.com"))
            }
        })
        .collect();

    let output = coordinator(Arc::clone(&resolver), 7)
        .resolve_batch(input.clone())
        .await;

    assert_eq!(output.len(), input.len());
    assert_eq!(resolver.calls(), 80);
    for (before, after) in input.iter().zip(&output) {
        assert_eq!(before.subdomain, after.subdomain);
        if !before.needs_resolution() {
            assert_eq!(before, after, "pre-resolved record changed");
            continue;
        }
        let ips = after.ips.as_deref().expect("every pending record gets ips");
        assert!(!ips.is_empty());
        if after.valid == 1 {
            assert!(ips.parse::<Ipv4Addr>().is_ok(), "expected an address, got {ips}");
        } else {
            assert_eq!(after.valid, 0);
            assert!(ips.parse::<Ipv4Addr>().is_err());
        }
    }
}

#[tokio::test]
async fn test_all_failing_batch_is_bounded_by_lifetime_groups() {
    let lifetime = Duration::from_millis(100);
    let resolver = Arc::new(BlackholeResolver { lifetime });
    let input: Vec<_> = (0..30)
        .map(|i| CandidateRecord::new(format!("dark{i}.example.com")))
        .collect();

    let start = Instant::now();
    let output = coordinator(resolver, 10).resolve_batch(input).await;
    let elapsed = start.elapsed();

    assert!(output.iter().all(|r| r.valid == 0));
    assert!(output.iter().all(|r| r.ips.as_deref() == Some("timeout")));
    // 30 hosts / 10 in flight = 3 groups
    assert!(elapsed >= lifetime * 3, "finished too early: {:?}", elapsed);
    assert!(
        elapsed < lifetime * 3 + Duration::from_secs(2),
        "took {:?}",
        elapsed
    );
}
