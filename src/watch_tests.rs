#![allow(clippy::unwrap_used)]

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::time::Duration;

use super::*;
use crate::engine::compute_monthly_summary;
use crate::models::TransactionKind;

const WAIT: Duration = Duration::from_secs(5);

fn expense(amount: Decimal) -> TransactionRecord {
    TransactionRecord::new(
        1,
        TransactionKind::Expense,
        amount,
        "Food".into(),
        "🍔".into(),
        NaiveDate::from_ymd_opt(2024, 3, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap(),
    )
}

fn snapshot(records: Vec<TransactionRecord>) -> Snapshot {
    records.into()
}

// ── SnapshotFeed ──────────────────────────────────────────────

#[test]
fn test_subscribe_receives_current_snapshot() {
    let mut feed = SnapshotFeed::new();
    let rx = feed.subscribe(snapshot(vec![expense(dec!(5))]));
    let first = rx.recv_timeout(WAIT).unwrap();
    assert_eq!(first.len(), 1);
}

#[test]
fn test_publish_reaches_all_subscribers() {
    let mut feed = SnapshotFeed::new();
    let a = feed.subscribe(snapshot(vec![]));
    let b = feed.subscribe(snapshot(vec![]));
    feed.publish(snapshot(vec![expense(dec!(1)), expense(dec!(2))]));

    for rx in [a, b] {
        assert_eq!(rx.recv_timeout(WAIT).unwrap().len(), 0);
        assert_eq!(rx.recv_timeout(WAIT).unwrap().len(), 2);
    }
}

#[test]
fn test_publish_prunes_dropped_subscribers() {
    let mut feed = SnapshotFeed::new();
    let keep = feed.subscribe(snapshot(vec![]));
    let gone = feed.subscribe(snapshot(vec![]));
    assert_eq!(feed.subscriber_count(), 2);
    drop(gone);
    feed.publish(snapshot(vec![]));
    assert_eq!(feed.subscriber_count(), 1);
    drop(keep);
    feed.publish(snapshot(vec![]));
    assert!(feed.is_empty());
}

// ── Recompute ─────────────────────────────────────────────────

#[test]
fn test_recompute_runs_per_emission() {
    let mut feed = SnapshotFeed::new();
    let rx = feed.subscribe(snapshot(vec![expense(dec!(10))]));
    let job = Recompute::spawn(rx, |txns| compute_monthly_summary(txns, dec!(100)));

    let first = job.next_timeout(WAIT).unwrap();
    assert_eq!(first.expense, dec!(10));

    feed.publish(snapshot(vec![expense(dec!(10)), expense(dec!(150))]));
    let second = job.next_timeout(WAIT).unwrap();
    assert_eq!(second.expense, dec!(160));
    assert!(second.is_over);
}

#[test]
fn test_recompute_stops_when_feed_closes() {
    let mut feed = SnapshotFeed::new();
    let rx = feed.subscribe(snapshot(vec![]));
    let job = Recompute::spawn(rx, |txns| txns.len());
    assert_eq!(job.next_timeout(WAIT), Some(0));
    drop(feed);
    assert_eq!(job.next_timeout(Duration::from_millis(200)), None);
}

#[test]
fn test_cancel_discards_pending_results() {
    let mut feed = SnapshotFeed::new();
    let rx = feed.subscribe(snapshot(vec![]));
    let mut job = Recompute::spawn(rx, |txns| txns.len());
    // Let the worker queue a result for the initial snapshot.
    std::thread::sleep(Duration::from_millis(100));

    job.cancel();
    assert!(job.is_cancelled());
    assert_eq!(job.latest(), None);
    assert_eq!(job.next_timeout(Duration::from_millis(50)), None);

    // The worker has exited, so one publish prunes its subscription.
    feed.publish(snapshot(vec![expense(dec!(1))]));
    assert!(feed.is_empty());
}

#[test]
fn test_drop_closes_subscription() {
    let mut feed = SnapshotFeed::new();
    let rx = feed.subscribe(snapshot(vec![]));
    let job = Recompute::spawn(rx, |txns| txns.len());
    assert_eq!(job.next_timeout(WAIT), Some(0));
    assert_eq!(feed.subscriber_count(), 1);

    drop(job);
    feed.publish(snapshot(vec![]));
    assert!(feed.is_empty());
}

#[test]
fn test_cancel_is_idempotent() {
    let mut feed = SnapshotFeed::new();
    let rx = feed.subscribe(snapshot(vec![]));
    let mut job = Recompute::spawn(rx, |txns| txns.len());
    job.cancel();
    job.cancel();
    assert!(job.is_cancelled());
    assert_eq!(job.latest(), None);
}

#[test]
fn test_latest_skips_stale_results() {
    let mut feed = SnapshotFeed::new();
    let rx = feed.subscribe(snapshot(vec![]));
    let job = Recompute::spawn(rx, |txns| txns.len());
    assert_eq!(job.next_timeout(WAIT), Some(0));
    assert_eq!(job.latest(), None);
}

#[test]
fn test_worker_summary_with_no_limit() {
    let mut feed = SnapshotFeed::new();
    let rx = feed.subscribe(snapshot(vec![]));
    let job = Recompute::spawn(rx, |txns| compute_monthly_summary(txns, Decimal::ZERO));
    let summary = job.next_timeout(WAIT).unwrap();
    assert_eq!(summary.percent_used, Decimal::ZERO);
}
