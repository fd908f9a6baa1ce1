mod common;

mod tests {
    use embassy_time::Duration;
    use myrtio_pixel_aggregator::{Aggregator, AggregatorConfig, ConfigDocument, ConfigError, Rgb};

    use crate::common::{BLACK, BLUE, GREEN, MockStrip, Probes, RED};

    const FULL: &str = r##"{
        "led_count": 8,
        "brightness": 0.5,
        "on_color": "#0000FF",
        "off_color": "#00ff00",
        "force": false,
        "heartbeat": 7,
        "heartbeat_speed": 12,
        "leds": [
            { "led": 0, "signal": "light.kitchen", "color": "#FF0000" },
            { "led": 0, "signal": "light.hall" },
            { "led": 3, "signal": "binary_sensor.door", "color": "#00FF00" }
        ]
    }"##;

    const MINIMAL: &str = r#"{"led_count":4,"leds":[{"led":1,"signal":"switch.fan"}]}"#;

    #[test]
    fn test_defaults() {
        let config = AggregatorConfig::new(16);
        assert_eq!(config.led_count, 16);
        assert_eq!(config.brightness, 1.0);
        assert_eq!(config.on_color, Rgb::new(255, 255, 255));
        assert_eq!(config.off_color, BLACK);
        assert!(!config.force_all_on);
        assert_eq!(config.heartbeat, None);
        assert_eq!(config.heartbeat_speed, 14);
        assert_eq!(config.heartbeat_interval, Duration::from_millis(50));
    }

    #[test]
    fn test_parse_full_document() {
        let document = ConfigDocument::<'_, 8>::from_json(FULL).unwrap();
        let settings = document.settings();
        assert_eq!(settings.led_count, 8);
        assert_eq!(settings.brightness, 0.5);
        assert_eq!(settings.on_color, BLUE);
        assert_eq!(settings.off_color, GREEN);
        assert_eq!(settings.heartbeat, Some(7));
        assert_eq!(settings.heartbeat_speed, 12);

        let mappings: Vec<(usize, &str, Rgb)> = document.mappings().collect();
        assert_eq!(
            mappings,
            [
                (0, "light.kitchen", RED),
                (0, "light.hall", BLUE),
                (3, "binary_sensor.door", GREEN),
            ]
        );
    }

    #[test]
    fn test_parse_minimal_document() {
        let document = ConfigDocument::<'_, 4>::from_json(MINIMAL).unwrap();
        let settings = document.settings();
        assert_eq!(settings.brightness, 1.0);
        assert_eq!(settings.off_color, BLACK);
        assert_eq!(settings.heartbeat, None);

        let mappings: Vec<(usize, &str, Rgb)> = document.mappings().collect();
        assert_eq!(mappings, [(1, "switch.fan", Rgb::new(255, 255, 255))]);
    }

    #[test]
    fn test_negative_heartbeat_disables() {
        let json = r#"{"led_count":4,"heartbeat":-1,"leds":[]}"#;
        let document = ConfigDocument::<'_, 4>::from_json(json).unwrap();
        assert_eq!(document.settings().heartbeat, None);
    }

    #[test]
    fn test_invalid_document() {
        assert!(matches!(
            ConfigDocument::<'_, 4>::from_json(r#"{"leds":[]}"#),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            ConfigDocument::<'_, 4>::from_json("not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_aggregator_from_document() {
        let document = ConfigDocument::<'_, 8>::from_json(FULL).unwrap();
        let mut aggregator: Aggregator<MockStrip, Probes, 8, 4> =
            Aggregator::from_document(&document, Probes::CONNECTED).unwrap();
        aggregator.attach_driver(MockStrip::new(8));

        assert_eq!(aggregator.heartbeat().map(|h| h.led()), Some(7));
        let ids: Vec<&str> = aggregator.subscriptions().collect();
        assert_eq!(ids, ["light.kitchen", "light.hall", "binary_sensor.door"]);

        aggregator.on_signal_state("light.hall", "on").unwrap();
        let pixels = &aggregator.compositor().driver().unwrap().pixels;
        assert_eq!(pixels[0], Rgb::new(0, 0, 128));
        assert_eq!(pixels[3], BLACK);
    }

    #[test]
    fn test_document_mapping_out_of_range() {
        let json = r#"{"led_count":2,"leds":[{"led":2,"signal":"a"}]}"#;
        let document = ConfigDocument::<'_, 4>::from_json(json).unwrap();
        let result: Result<Aggregator<MockStrip, Probes, 4, 2>, _> =
            Aggregator::from_document(&document, Probes::CONNECTED);
        assert!(matches!(
            result,
            Err(ConfigError::LedOutOfRange {
                led: 2,
                led_count: 2
            })
        ));
    }
}
