#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate, NaiveDateTime};
    use worktimer::libs::activity::ActivityMonitor;
    use worktimer::libs::config::TimerConfig;
    use worktimer::libs::idle::ManualIdleSource;

    fn start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap().and_hms_opt(9, 0, 0).unwrap()
    }

    fn ms(value: i64) -> Duration {
        Duration::milliseconds(value)
    }

    #[test]
    fn test_input_within_check_interval_is_ignored() {
        let t0 = start();
        let mut monitor = ActivityMonitor::new(&TimerConfig::default(), t0);

        monitor.record_input(t0 + ms(50), t0 + ms(50));
        assert_eq!(monitor.sample_count(), 0);

        monitor.record_input(t0 + ms(100), t0 + ms(100));
        assert_eq!(monitor.sample_count(), 1);

        // Same input seen again on the next tick
        monitor.record_input(t0 + ms(200), t0 + ms(100));
        assert_eq!(monitor.sample_count(), 1);
    }

    #[test]
    fn test_rate_is_computed_before_the_new_sample() {
        let t0 = start();
        let mut monitor = ActivityMonitor::new(&TimerConfig::default(), t0);

        monitor.record_input(t0 + ms(100), t0 + ms(100));
        assert_eq!(monitor.rate(), 0.0);
        assert_eq!(monitor.last_activity_date(), t0);

        // 30 samples in a 30s window at 100ms cover exactly min_rate, which is not enough
        for i in 2..=31 {
            let t = t0 + ms(i * 100);
            monitor.record_input(t, t);
        }
        assert_eq!(monitor.rate(), 0.1);
        assert_eq!(monitor.last_activity_date(), t0);

        let t = t0 + ms(3200);
        monitor.record_input(t, t);
        assert!(monitor.rate() > 0.1);
        assert_eq!(monitor.last_activity_date(), t);
    }

    #[test]
    fn test_old_samples_are_evicted() {
        let t0 = start();
        let mut monitor = ActivityMonitor::new(&TimerConfig::default(), t0);

        for i in 1..=10 {
            let t = t0 + ms(i * 100);
            monitor.record_input(t, t);
        }
        assert_eq!(monitor.sample_count(), 10);

        let later = t0 + Duration::seconds(60);
        monitor.record_input(later, later);
        assert_eq!(monitor.rate(), 0.0);
        assert_eq!(monitor.sample_count(), 1);
    }

    #[test]
    fn test_stray_input_after_absence_does_not_count() {
        let t0 = start();
        let mut monitor = ActivityMonitor::new(&TimerConfig::default(), t0);

        for i in 1..=100 {
            let t = t0 + ms(i * 100);
            monitor.record_input(t, t);
        }
        let worked_until = monitor.last_activity_date();
        assert_eq!(worked_until, t0 + Duration::seconds(10));

        let nudge = t0 + Duration::minutes(5);
        monitor.record_input(nudge, nudge);
        assert_eq!(monitor.last_activity_date(), worked_until);
    }

    #[test]
    fn test_tick_uses_idle_time() {
        let t0 = start();
        let mut monitor = ActivityMonitor::new(&TimerConfig::default(), t0);
        let idle = ManualIdleSource::new();

        // Last input happened before the monitor started: nothing new
        idle.set(Duration::seconds(10));
        monitor.tick(t0 + ms(100), &idle);
        assert_eq!(monitor.sample_count(), 0);

        idle.set(Duration::zero());
        monitor.tick(t0 + ms(200), &idle);
        assert_eq!(monitor.sample_count(), 1);
    }

    #[test]
    fn test_idle_failure_counts_as_input() {
        let t0 = start();
        let mut monitor = ActivityMonitor::new(&TimerConfig::default(), t0);
        let idle = ManualIdleSource::new();

        idle.fail("no display");
        monitor.tick(t0 + ms(100), &idle);
        assert_eq!(monitor.sample_count(), 1);
    }

    #[test]
    fn test_negative_idle_time_is_clamped() {
        let t0 = start();
        let mut monitor = ActivityMonitor::new(&TimerConfig::default(), t0);
        let idle = ManualIdleSource::new();

        idle.set(Duration::seconds(-5));
        monitor.tick(t0 + ms(100), &idle);
        assert_eq!(monitor.sample_count(), 1);
    }

    #[test]
    fn test_reset_forgets_history() {
        let t0 = start();
        let mut monitor = ActivityMonitor::new(&TimerConfig::default(), t0);
        for i in 1..=40 {
            let t = t0 + ms(i * 100);
            monitor.record_input(t, t);
        }
        assert!(monitor.sample_count() > 0);

        let later = t0 + Duration::minutes(1);
        monitor.reset(later);
        assert_eq!(monitor.sample_count(), 0);
        assert_eq!(monitor.rate(), 0.0);
        assert_eq!(monitor.last_activity_date(), later);
    }

    #[test]
    fn test_absurd_idle_time_is_clamped() {
        let t0 = start();
        let config = TimerConfig::default();
        let mut monitor = ActivityMonitor::new(&config, t0);
        let idle = ManualIdleSource::new();

        // Far beyond the representable date range if subtracted unclamped.
        idle.set(Duration::weeks(52_000_000));
        monitor.tick(t0 + ms(100), &idle);
        assert_eq!(monitor.sample_count(), 0);
        assert_eq!(monitor.last_activity_date(), t0);

        idle.set(Duration::milliseconds(-5_000));
        monitor.tick(t0 + ms(200), &idle);
        assert_eq!(monitor.sample_count(), 1);
        assert_eq!(monitor.last_activity_date(), t0);
    }
}
