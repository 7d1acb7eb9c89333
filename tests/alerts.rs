#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tokio::sync::mpsc;
    use tokio::time::{sleep, Duration};
    use worktimer::libs::alert::{Alert, AlertSequence, ESCALATION_REPEAT};
    use worktimer::libs::idle::KeyEvent;
    use worktimer::libs::key_feedback::{KeyFeedback, MAX_PENDING_CLICKS};

    #[derive(Default)]
    struct CountingAlert {
        rings: AtomicUsize,
    }

    impl CountingAlert {
        fn count(&self) -> usize {
            self.rings.load(Ordering::SeqCst)
        }
    }

    impl Alert for CountingAlert {
        fn ring(&self) {
            self.rings.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn press(key: &str) -> KeyEvent {
        KeyEvent::Pressed(key.to_string())
    }

    fn release(key: &str) -> KeyEvent {
        KeyEvent::Released(key.to_string())
    }

    #[tokio::test]
    async fn test_escalation_pattern_rings_three_times() {
        let alert = Arc::new(CountingAlert::default());
        let sequence = AlertSequence::escalation(alert.clone());

        sleep(Duration::from_millis(900)).await;
        assert_eq!(alert.count(), ESCALATION_REPEAT);
        assert!(sequence.is_finished());
    }

    #[tokio::test]
    async fn test_cancelled_sequence_stops_ringing() {
        let alert = Arc::new(CountingAlert::default());
        let sequence = AlertSequence::spawn(alert.clone(), 5, Duration::from_millis(200));

        sleep(Duration::from_millis(50)).await;
        sequence.cancel();
        sleep(Duration::from_millis(500)).await;
        assert_eq!(alert.count(), 1);
    }

    #[tokio::test]
    async fn test_dropped_sequence_stops_ringing() {
        let alert = Arc::new(CountingAlert::default());
        let sequence = AlertSequence::spawn(alert.clone(), 5, Duration::from_millis(200));

        sleep(Duration::from_millis(50)).await;
        drop(sequence);
        sleep(Duration::from_millis(500)).await;
        assert_eq!(alert.count(), 1);
    }

    #[tokio::test]
    async fn test_fast_typing_collapses_backlog() {
        let alert = Arc::new(CountingAlert::default());
        let mut feedback = KeyFeedback::new(alert.clone());

        for key in ["KeyA", "KeyB", "KeyC", "KeyD", "KeyE"] {
            feedback.handle(&press(key));
        }
        sleep(Duration::from_millis(500)).await;
        assert_eq!(alert.count(), MAX_PENDING_CLICKS);
    }

    #[tokio::test]
    async fn test_auto_repeat_clicks_once() {
        let alert = Arc::new(CountingAlert::default());
        let mut feedback = KeyFeedback::new(alert.clone());

        feedback.handle(&press("KeyA"));
        feedback.handle(&press("KeyA"));
        feedback.handle(&press("KeyA"));
        sleep(Duration::from_millis(200)).await;
        assert_eq!(alert.count(), 1);

        feedback.handle(&release("KeyA"));
        feedback.handle(&press("KeyA"));
        sleep(Duration::from_millis(200)).await;
        assert_eq!(alert.count(), 2);
    }

    #[tokio::test]
    async fn test_consume_reads_channel() {
        let alert = Arc::new(CountingAlert::default());
        let feedback = KeyFeedback::new(alert.clone());
        let (tx, rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(feedback.consume(rx));

        tx.send(press("Space")).unwrap();
        tx.send(release("Space")).unwrap();
        sleep(Duration::from_millis(200)).await;
        assert_eq!(alert.count(), 1);

        tx.send(press("Return")).unwrap();
        sleep(Duration::from_millis(200)).await;
        assert_eq!(alert.count(), 2);

        drop(tx);
        handle.await.unwrap();
    }
}
