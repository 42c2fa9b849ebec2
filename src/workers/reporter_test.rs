// Tests for the periodic stats reporter task.

#[cfg(test)]
mod tests {
    use std::sync::atomic::Ordering;
    use std::sync::Arc;
    use std::time::Duration;

    use tokio::time::timeout;
    use tokio_util::sync::CancellationToken;

    use crate::config::test_config::new_test_throttle;
    use crate::config::Throttle;
    use crate::stats::{Counters, Gauges};
    use crate::workers::reporter;

    fn init_logs() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter("info")
            .try_init();
    }

    fn reporting_throttle() -> Throttle {
        let mut cfg = new_test_throttle();
        cfg.debug = true;
        cfg.report_interval = Duration::from_millis(10);
        cfg
    }

    #[tokio::test]
    async fn test_reporter_stops_on_cancellation() {
        init_logs();
        let token = CancellationToken::new();
        let counters = Arc::new(Counters::new());
        let gauges = Arc::new(Gauges::new(40, 4));

        let handle = reporter::spawn(
            token.clone(),
            "test".to_string(),
            &reporting_throttle(),
            counters,
            gauges,
        );

        token.cancel();

        // The cancellation flag is checked at every wake-up, so the task
        // must exit promptly rather than looping forever.
        timeout(Duration::from_secs(2), handle)
            .await
            .expect("reporter did not stop after cancellation")
            .expect("reporter task panicked");
    }

    #[tokio::test]
    async fn test_reporter_drains_counters_each_window() {
        init_logs();
        let token = CancellationToken::new();
        let counters = Arc::new(Counters::new());
        let gauges = Arc::new(Gauges::new(40, 4));

        counters.admitted.fetch_add(5, Ordering::Relaxed);
        counters.rejected_by_budget.fetch_add(2, Ordering::Relaxed);

        let handle = reporter::spawn(
            token.clone(),
            "test".to_string(),
            &reporting_throttle(),
            counters.clone(),
            gauges,
        );

        // Wait until a reporting window has passed and the counters were
        // snapshot-and-reset by the task.
        let drained = timeout(Duration::from_secs(2), async {
            loop {
                if counters.snapshot().total() == 0 {
                    return;
                }
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await;
        assert!(drained.is_ok(), "reporter never drained the counters");

        token.cancel();
        let _ = timeout(Duration::from_secs(2), handle).await;
    }

    #[tokio::test]
    async fn test_reporter_is_gated_by_debug() {
        init_logs();
        let token = CancellationToken::new();
        let counters = Arc::new(Counters::new());
        let gauges = Arc::new(Gauges::new(40, 4));

        counters.admitted.fetch_add(5, Ordering::Relaxed);

        let mut cfg = reporting_throttle();
        cfg.debug = false;

        let handle = reporter::spawn(
            token.clone(),
            "test".to_string(),
            &cfg,
            counters.clone(),
            gauges,
        );

        // Without debug the task finishes on its own, no cancellation
        // needed, and never drains the counters behind the host's back.
        timeout(Duration::from_secs(2), handle)
            .await
            .expect("disabled reporter did not finish")
            .expect("reporter task panicked");

        tokio::time::sleep(Duration::from_millis(30)).await;
        assert_eq!(counters.snapshot().admitted, 5);
    }
}
