//! Unit tests for ts-core primitives.

#[cfg(test)]
mod ids {
    use crate::{ClassId, CustomerId};

    #[test]
    fn index_roundtrip() {
        let id = ClassId(2);
        assert_eq!(id.index(), 2);
        assert_eq!(ClassId::try_from(2usize).unwrap(), id);
        assert!(ClassId::try_from(256usize).is_err());
    }

    #[test]
    fn ordering() {
        assert!(CustomerId(1) < CustomerId(2));
        assert!(ClassId(0) < ClassId(1));
    }

    #[test]
    fn display() {
        assert_eq!(CustomerId(7).to_string(), "C7");
        assert_eq!(ClassId(1).to_string(), "class#1");
    }
}

#[cfg(test)]
mod time {
    use crate::Tick;

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(t.offset(3), Tick(13));
        assert_eq!(Tick(15) - Tick(10), 5u64);
        assert_eq!(Tick(15).since(Tick(10)), 5);
    }

    #[test]
    fn display() {
        assert_eq!(Tick(4).to_string(), "t=4");
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    /// 64 fair coin flips.
    fn flips(rng: &mut SimRng) -> Vec<bool> {
        (0..64).map(|_| rng.gen_bool(0.5)).collect()
    }

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = SimRng::new(12345);
        let mut r2 = SimRng::new(12345);
        assert_eq!(flips(&mut r1), flips(&mut r2));
    }

    #[test]
    fn different_seeds_differ() {
        let mut r0 = SimRng::new(1);
        let mut r1 = SimRng::new(2);
        assert_ne!(flips(&mut r0), flips(&mut r1));
    }

    #[test]
    fn gen_bool_extremes() {
        let mut rng = SimRng::new(0);
        for _ in 0..100 {
            assert!(!rng.gen_bool(0.0));
            assert!(rng.gen_bool(1.0));
        }
    }

    #[test]
    fn gen_bool_clamps_out_of_range() {
        let mut rng = SimRng::new(0);
        assert!(!rng.gen_bool(-0.5));
        assert!(rng.gen_bool(1.5));
    }

    #[test]
    fn from_entropy_reports_seed() {
        let (mut rng, seed) = SimRng::from_entropy();
        let mut replay = SimRng::new(seed);
        assert_eq!(flips(&mut rng), flips(&mut replay));
    }
}

#[cfg(test)]
mod customer {
    use crate::{ClassId, Customer, CustomerId, Tick};

    #[test]
    fn service_stamps() {
        let mut c = Customer::new(CustomerId(1), ClassId(0), Tick(3));
        assert_eq!(c.service_start(), None);
        assert_eq!(c.wait_ticks(), None);

        c.begin_service(Tick(5));
        c.end_service(Tick(8));
        assert_eq!(c.service_start(), Some(Tick(5)));
        assert_eq!(c.service_end(), Some(Tick(8)));
        assert_eq!(c.wait_ticks(), Some(2));

        let r = c.record();
        assert_eq!(r.id, CustomerId(1));
        assert_eq!(r.arrival, Tick(3));
        assert_eq!(r.service_end, Some(Tick(8)));
    }

    #[test]
    #[should_panic(expected = "already started service")]
    fn service_start_set_once() {
        let mut c = Customer::new(CustomerId(1), ClassId(0), Tick(0));
        c.begin_service(Tick(1));
        c.begin_service(Tick(2));
    }

    #[test]
    #[should_panic(expected = "never started service")]
    fn end_requires_start() {
        let mut c = Customer::new(CustomerId(1), ClassId(0), Tick(0));
        c.end_service(Tick(1));
    }
}

#[cfg(test)]
mod config {
    use std::io::Write;

    use crate::{ClassConfig, ClassId, CoreError, SimConfig};

    #[test]
    fn default_is_valid() {
        let cfg = SimConfig::default();
        cfg.validate().unwrap();
        assert_eq!(cfg.class_count(), 3);
        assert_eq!(cfg.horizon(), 100);
        assert_eq!(cfg.class_by_tag("M"), Some(ClassId(1)));
        assert_eq!(cfg.class(ClassId(2)).teller, "V_Regular");
    }

    #[test]
    fn zero_service_probability_rejected() {
        let cfg = SimConfig::new(10, vec![ClassConfig::new("A", "V_A", 0.5, 0.0)]);
        match cfg.validate() {
            Err(CoreError::InvalidProbability { what, class, .. }) => {
                assert_eq!(what, "service");
                assert_eq!(class, "A");
            }
            other => panic!("expected InvalidProbability, got {other:?}"),
        }
    }

    #[test]
    fn out_of_range_arrival_rejected() {
        for p in [-0.1, 1.5, f64::NAN] {
            let cfg = SimConfig::new(10, vec![ClassConfig::new("A", "V_A", p, 0.5)]);
            assert!(matches!(cfg.validate(), Err(CoreError::InvalidProbability { .. })), "p={p}");
        }
    }

    #[test]
    fn zero_arrival_probability_allowed() {
        let cfg = SimConfig::new(10, vec![ClassConfig::new("A", "V_A", 0.0, 1.0)]);
        cfg.validate().unwrap();
    }

    #[test]
    fn negative_horizon_rejected() {
        let cfg = SimConfig::new(-1, vec![ClassConfig::new("A", "V_A", 0.5, 0.5)]);
        assert!(matches!(cfg.validate(), Err(CoreError::InvalidHorizon(-1))));
    }

    #[test]
    fn empty_and_duplicate_classes_rejected() {
        assert!(matches!(SimConfig::new(5, vec![]).validate(), Err(CoreError::Config(_))));

        let dup = SimConfig::new(
            5,
            vec![ClassConfig::new("A", "V1", 0.5, 0.5), ClassConfig::new("A", "V2", 0.5, 0.5)],
        );
        assert!(matches!(dup.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn priority_defaults_to_declared_order() {
        let cfg = SimConfig::new(
            5,
            vec![
                ClassConfig::new("A", "V_A", 0.1, 0.5),
                ClassConfig::new("B", "V_B", 0.1, 0.5).with_priority(9),
                ClassConfig::new("C", "V_C", 0.1, 0.5),
            ],
        );
        assert_eq!(cfg.priority_ranks(), vec![0, 9, 2]);
    }

    #[test]
    fn parse_toml() {
        let cfg = SimConfig::from_toml_str(
            r#"
            total_ticks = 50
            seed = 7

            [[classes]]
            tag = "A"
            teller = "V_Preferencial"
            arrival_prob = 0.2
            service_prob = 0.9

            [[classes]]
            tag = "B"
            teller = "V_Regular"
            arrival_prob = 0.1
            service_prob = 0.4
            priority = 5
            "#,
        )
        .unwrap();
        assert_eq!(cfg.total_ticks, 50);
        assert_eq!(cfg.seed, Some(7));
        assert_eq!(cfg.classes[1].priority, Some(5));
        assert_eq!(cfg.arrival_probs(), vec![0.2, 0.1]);
        assert_eq!(cfg.service_probs(), vec![0.9, 0.4]);
    }

    #[test]
    fn parse_toml_validates() {
        let result = SimConfig::from_toml_str(
            r#"
            total_ticks = 10

            [[classes]]
            tag = "A"
            teller = "V"
            arrival_prob = 0.2
            service_prob = 0.0
            "#,
        );
        assert!(matches!(result, Err(CoreError::InvalidProbability { .. })));
    }

    #[test]
    fn malformed_toml_is_parse_error() {
        assert!(matches!(SimConfig::from_toml_str("total_ticks = ["), Err(CoreError::Toml(_))));
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "total_ticks = 3\n[[classes]]\ntag = \"A\"\nteller = \"V\"\narrival_prob = 1.0\nservice_prob = 1.0\n"
        )
        .unwrap();
        let cfg = SimConfig::load(file.path()).unwrap();
        assert_eq!(cfg.horizon(), 3);
        assert_eq!(cfg.seed, None);
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = SimConfig::load(std::path::Path::new("/definitely/not/here.toml"));
        assert!(matches!(result, Err(CoreError::Io(_))));
    }
}
