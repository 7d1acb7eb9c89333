#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate, NaiveDateTime};
    use worktimer::libs::accumulator::{calculate_break_time, BreakAccumulator};
    use worktimer::libs::config::TimerConfig;

    fn start() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap().and_hms_opt(9, 0, 0).unwrap()
    }

    /// Debt accrues at 5:20 and the minimum break is long enough that every
    /// step below 10 seconds counts as work.
    fn small_config() -> TimerConfig {
        TimerConfig {
            activity_time: 20,
            break_time: 5,
            interrupting_time: 2,
            min_break_time: 10,
            ..Default::default()
        }
    }

    #[test]
    fn test_growth_scales_by_ratio() {
        let config = small_config();
        let result = calculate_break_time(Duration::zero(), Duration::seconds(4), true, &config);
        assert_eq!(result, Duration::seconds(1));
    }

    #[test]
    fn test_growth_crossing_break_time_converts_excess_back() {
        let config = small_config();
        // 4s + 8s * 5/20 = 6s, one second beyond the target, which is 4s of work
        let result = calculate_break_time(Duration::seconds(4), Duration::seconds(8), true, &config);
        assert_eq!(result, Duration::seconds(9));
    }

    #[test]
    fn test_growth_beyond_break_time_is_one_to_one() {
        let config = small_config();
        let result = calculate_break_time(Duration::seconds(6), Duration::seconds(2), true, &config);
        assert_eq!(result, Duration::seconds(8));
    }

    #[test]
    fn test_decay_caps_at_break_time_first() {
        let config = small_config();
        let result = calculate_break_time(Duration::seconds(9), Duration::seconds(3), false, &config);
        assert_eq!(result, Duration::seconds(2));
    }

    #[test]
    fn test_decay_never_goes_negative() {
        let config = small_config();
        let result = calculate_break_time(Duration::seconds(2), Duration::seconds(3), false, &config);
        assert_eq!(result, Duration::zero());

        let result = calculate_break_time(Duration::zero(), Duration::hours(5), false, &config);
        assert_eq!(result, Duration::zero());
    }

    #[test]
    fn test_small_moves_are_not_transitions() {
        let config = small_config();
        let t0 = start();
        let mut accumulator = BreakAccumulator::new(&config, t0);

        let state = accumulator.evaluate(t0 + Duration::seconds(1), t0 + Duration::seconds(1), false);
        assert_eq!(state.time_start, t0);
        assert_eq!(state.break_time, Duration::zero());
        assert_eq!(accumulator.prev_activity_date(), t0);
    }

    #[test]
    fn test_growth_step_moves_anchor() {
        let config = small_config();
        let t0 = start();
        let mut accumulator = BreakAccumulator::new(&config, t0);

        let mark = t0 + Duration::seconds(4);
        let state = accumulator.evaluate(mark, mark, false);
        assert_eq!(state.time_start, mark);
        assert_eq!(state.break_time, Duration::seconds(1));
        assert_eq!(state.next_break_time, Duration::seconds(1));
    }

    #[test]
    fn test_projection_decays_from_anchor() {
        let config = small_config();
        let t0 = start();
        let mut accumulator = BreakAccumulator::new(&config, t0);

        let mark = t0 + Duration::seconds(8);
        let state = accumulator.evaluate(mark, mark, false);
        assert_eq!(state.break_time, Duration::seconds(2));

        let state = accumulator.evaluate(mark + Duration::seconds(1), mark, false);
        assert_eq!(state.break_time, Duration::seconds(2));
        assert_eq!(state.next_break_time, Duration::seconds(1));

        let state = accumulator.evaluate(mark + Duration::seconds(10), mark, false);
        assert_eq!(state.next_break_time, Duration::zero());
    }

    #[test]
    fn test_evaluate_is_idempotent_without_new_activity() {
        let config = small_config();
        let t0 = start();
        let mut accumulator = BreakAccumulator::new(&config, t0);

        let mark = t0 + Duration::seconds(8);
        let now = mark + Duration::milliseconds(500);
        let first = accumulator.evaluate(now, mark, false);
        let second = accumulator.evaluate(now, mark, false);
        assert_eq!(first, second);
    }

    #[test]
    fn test_long_gap_is_a_decay_step() {
        let config = small_config();
        let t0 = start();
        let mut accumulator = BreakAccumulator::new(&config, t0);

        let mark = t0 + Duration::seconds(8);
        accumulator.evaluate(mark, mark, false);
        assert_eq!(accumulator.prev_break_time(), Duration::seconds(2));

        let back = mark + Duration::seconds(11);
        let state = accumulator.evaluate(back, back, false);
        assert_eq!(state.break_time, Duration::zero());
        assert_eq!(state.time_start, back);
    }

    #[test]
    fn test_visible_reminder_shortens_min_break() {
        // min_break_time (10s) exceeds break_time (5s): an 8s gap is work while
        // hidden but a break once the reminder is on screen.
        let config = small_config();
        let t0 = start();

        let mut hidden = BreakAccumulator::new(&config, t0);
        let state = hidden.evaluate(t0 + Duration::seconds(8), t0 + Duration::seconds(8), false);
        assert_eq!(state.break_time, Duration::seconds(2));

        let mut visible = BreakAccumulator::new(&config, t0);
        let state = visible.evaluate(t0 + Duration::seconds(8), t0 + Duration::seconds(8), true);
        assert_eq!(state.break_time, Duration::zero());

        assert_eq!(visible.min_break_time_effective(true), Duration::seconds(5));
        assert_eq!(visible.min_break_time_effective(false), Duration::seconds(10));
    }

    #[test]
    fn test_acknowledge_and_reset() {
        let config = small_config();
        let t0 = start();
        let mut accumulator = BreakAccumulator::new(&config, t0);

        let mark = t0 + Duration::seconds(8);
        accumulator.evaluate(mark, mark, false);
        accumulator.acknowledge_break();
        assert_eq!(accumulator.prev_break_time(), Duration::zero());
        assert_eq!(accumulator.prev_activity_date(), mark);

        let later = mark + Duration::minutes(1);
        accumulator.reset(later);
        assert_eq!(accumulator.prev_activity_date(), later);
    }

    #[test]
    fn test_debt_is_never_negative() {
        let config = small_config();
        let t0 = start();
        let mut accumulator = BreakAccumulator::new(&config, t0);

        let mut mark = t0;
        for gap in [3, 15, 2, 40, 7, 1, 12] {
            mark += Duration::seconds(gap);
            let state = accumulator.evaluate(mark + Duration::seconds(30), mark, false);
            assert!(state.break_time >= Duration::zero());
            assert!(state.next_break_time >= Duration::zero());
        }
    }
}
