#[cfg(test)]
mod tests {
    use chrono::{Duration, NaiveDate, NaiveDateTime};
    use worktimer::libs::accumulator::ActivityState;
    use worktimer::libs::engine::{Frame, PresentationSink};
    use worktimer::libs::policy::{Directives, Urgency};
    use worktimer::libs::toast::{ReminderLog, Toast};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap().and_hms_opt(14, 30, 0).unwrap()
    }

    #[test]
    fn test_toast_without_countdown() {
        let toast = Toast::new("Stretch");
        assert_eq!(toast.close_at(), None);
        assert_eq!(toast.close_remaining(now()), None);
        assert!(!toast.is_expired(now() + Duration::days(1)));
        assert_eq!(toast.display_message(now()), "Stretch");
    }

    #[test]
    fn test_countdown_follows_target_time() {
        let toast = Toast::new("Stretch").close_after(Duration::seconds(90), now());
        assert_eq!(toast.close_at(), Some(now() + Duration::seconds(90)));
        assert_eq!(toast.display_message(now()), "Stretch (01:30)");
        assert_eq!(toast.display_message(now() + Duration::seconds(48)), "Stretch (00:42)");
        assert!(!toast.is_expired(now() + Duration::seconds(89)));
    }

    #[test]
    fn test_countdown_clamps_at_zero() {
        let toast = Toast::new("Stretch").close_after(Duration::seconds(10), now());
        let late = now() + Duration::seconds(25);
        assert_eq!(toast.close_remaining(late), Some(Duration::zero()));
        assert!(toast.is_expired(late));
        assert!(toast.is_expired(now() + Duration::seconds(10)));
        assert_eq!(toast.display_message(late), "Stretch (00:00)");
    }

    fn frame(visible: bool, urgency: Urgency, message: &str) -> Frame {
        Frame {
            state: ActivityState {
                time_start: now(),
                break_time: Duration::seconds(180),
                next_break_time: Duration::seconds(180),
            },
            directives: Directives {
                visible,
                message: message.to_string(),
                escalating: urgency == Urgency::Escalated,
                urgency,
                shown: false,
                hidden: false,
                escalation_started: false,
                reset_debt: false,
            },
            last_activity_date: now(),
            rate: 1.0,
        }
    }

    #[test]
    fn test_reminder_log_records_each_transition_once() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("reminders.log");
        let mut log = ReminderLog::open(path.clone()).unwrap();
        assert_eq!(log.path(), path.as_path());

        let mut shown = frame(true, Urgency::Normal, "03:00");
        shown.directives.shown = true;
        log.present(&frame(false, Urgency::Normal, ""));
        log.present(&shown);
        log.present(&frame(true, Urgency::Normal, "02:59"));

        let mut escalated = frame(true, Urgency::Escalated, "02:59");
        escalated.directives.escalation_started = true;
        log.present(&escalated);

        log.present(&frame(true, Urgency::OnBreak, "00:58"));
        log.present(&frame(true, Urgency::OnBreak, "00:57"));

        let mut hidden = frame(false, Urgency::Normal, "");
        hidden.directives.hidden = true;
        hidden.directives.reset_debt = true;
        log.present(&hidden);
        drop(log);

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 4, "{}", contents);
        assert!(lines[0].ends_with("Time for a break! Step away for 03:00"));
        assert!(lines[1].contains("ignoring the break reminder"));
        assert!(lines[2].ends_with("Break in progress, 00:58 to go"));
        assert!(lines[3].ends_with("Break complete, welcome back"));
        assert!(lines.iter().all(|line| NaiveDateTime::parse_from_str(&line[..19], "%Y-%m-%d %H:%M:%S").is_ok()));
    }

    #[test]
    fn test_reminder_log_appends_to_existing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("reminders.log");
        std::fs::write(&path, "earlier line\n").unwrap();

        let mut hidden = frame(false, Urgency::Normal, "");
        hidden.directives.hidden = true;
        ReminderLog::open(path.clone()).unwrap().present(&hidden);

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("earlier line\n"));
        assert_eq!(contents.lines().count(), 2);
    }
}
