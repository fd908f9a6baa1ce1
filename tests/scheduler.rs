mod common;

mod tests {
    use embassy_time::{Duration, Instant};
    use myrtio_pixel_aggregator::{
        Aggregator, AggregatorConfig, AggregatorIntent, IntentQueue, QueueFull, Scheduler,
    };

    use crate::common::{BLUE, MockStrip, Probes, RED};

    type TestAggregator = Aggregator<MockStrip, Probes, 8, 4>;

    fn aggregator(heartbeat: Option<usize>) -> TestAggregator {
        let mut config = AggregatorConfig::new(4);
        config.heartbeat = heartbeat;
        let mut aggregator = TestAggregator::new(&config, Probes::NO_API).unwrap();
        aggregator.attach_driver(MockStrip::new(4));
        aggregator.add_led_mapping(0, "light.kitchen", "#FF0000").unwrap();
        aggregator
    }

    #[test]
    fn test_tick_applies_queued_intents() {
        let queue: IntentQueue<8> = IntentQueue::new();
        let sender = queue.sender();
        let mut scheduler = Scheduler::new(aggregator(None), queue.receiver());

        sender.send_state("light.kitchen", "on").unwrap();
        sender.send_state("light.unknown", "on").unwrap();
        assert_eq!(queue.len(), 2);

        let result = scheduler.tick(Instant::from_millis(0));
        assert_eq!(result.applied, 2);
        assert!(queue.is_empty());

        let strip = scheduler.aggregator().compositor().driver().unwrap();
        assert_eq!(strip.pixels[0], RED);
        assert_eq!(strip.flushes, 1);
    }

    #[test]
    fn test_tick_runs_heartbeat() {
        let queue: IntentQueue<4> = IntentQueue::new();
        let mut scheduler = Scheduler::new(aggregator(Some(2)), queue.receiver());

        scheduler.tick(Instant::from_millis(0));
        let strip = scheduler.aggregator().compositor().driver().unwrap();
        assert_eq!(strip.pixels[2], BLUE);
    }

    #[test]
    fn test_tick_timing() {
        let queue: IntentQueue<4> = IntentQueue::new();
        let mut scheduler = Scheduler::with_interval(
            aggregator(None),
            queue.receiver(),
            Duration::from_millis(50),
        );

        let result = scheduler.tick(Instant::from_millis(0));
        assert_eq!(result.next_deadline, Instant::from_millis(50));
        assert_eq!(result.sleep_duration, Duration::from_millis(50));

        let result = scheduler.tick(Instant::from_millis(60));
        assert_eq!(result.next_deadline, Instant::from_millis(100));
        assert_eq!(result.sleep_duration, Duration::from_millis(40));

        // Far behind: the backlog is dropped
        let result = scheduler.tick(Instant::from_millis(1000));
        assert_eq!(result.next_deadline, Instant::from_millis(1050));
        assert_eq!(result.sleep_duration, Duration::from_millis(50));
    }

    #[test]
    fn test_queue_full_returns_intent() {
        let queue: IntentQueue<1> = IntentQueue::new();
        let sender = queue.sender();
        sender.send(AggregatorIntent::Force(true)).unwrap();
        assert_eq!(
            sender.send(AggregatorIntent::Force(false)),
            Err(QueueFull(AggregatorIntent::Force(false)))
        );
        assert_eq!(queue.receiver().try_receive(), Some(AggregatorIntent::Force(true)));
        assert_eq!(queue.receiver().try_receive(), None);
    }

    #[test]
    fn test_overlong_signal_is_dropped() {
        let queue: IntentQueue<2> = IntentQueue::new();
        let long = "x".repeat(100);
        assert_eq!(queue.sender().send_state(&long, "on"), Ok(()));
        assert!(queue.is_empty());
    }
}
