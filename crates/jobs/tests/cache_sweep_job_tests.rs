use dohgate_jobs::CacheSweepJob;
use std::sync::Arc;
use tokio::time::{sleep, Duration};
use tokio_util::sync::CancellationToken;

mod helpers;
use helpers::MockCacheMaintenancePort;

#[tokio::test]
async fn test_cache_sweep_job_starts_without_panic() {
    let mock = Arc::new(MockCacheMaintenancePort::new());
    let job = Arc::new(CacheSweepJob::new(mock.clone()));

    job.start().await;
    sleep(Duration::from_millis(10)).await;

    assert_eq!(mock.sweep_call_count(), 0, "First sweep waits a full interval");
}

#[tokio::test]
async fn test_cache_sweep_job_fires_on_interval() {
    let mock = Arc::new(MockCacheMaintenancePort::new());
    let job = Arc::new(CacheSweepJob::new(mock.clone()).with_interval(1));

    job.start().await;
    sleep(Duration::from_millis(1100)).await;

    assert!(mock.sweep_call_count() >= 1, "Sweep should have fired at least once");
}

#[tokio::test]
async fn test_cache_sweep_job_error_is_non_fatal() {
    let mock = Arc::new(MockCacheMaintenancePort::new());
    mock.set_should_fail(true);
    let job = Arc::new(CacheSweepJob::new(mock.clone()).with_interval(1));

    job.start().await;
    sleep(Duration::from_millis(2200)).await;

    assert!(
        mock.sweep_call_count() >= 2,
        "Sweep should keep running after a failure"
    );
}

#[tokio::test]
async fn test_cache_sweep_job_stops_on_cancellation() {
    let mock = Arc::new(MockCacheMaintenancePort::new());
    let token = CancellationToken::new();
    let job = Arc::new(
        CacheSweepJob::new(mock.clone())
            .with_interval(1)
            .with_cancellation(token.clone()),
    );

    job.start().await;
    token.cancel();
    sleep(Duration::from_millis(1200)).await;

    assert_eq!(mock.sweep_call_count(), 0);
}
