use crate::{
    DEFAULT_EPOCH, Error, GeneratorConfig, GeneratorState, IdGenerator, MAX_SEQUENCE, Poll,
    SnowflakeId, SystemClock, TimeSource, decode_node_id, decode_sequence, decode_timestamp,
};
use core::cell::Cell;
use std::collections::HashSet;
use std::thread::scope;
use std::time::Duration;

struct MockTime {
    millis: i64,
}

impl TimeSource for MockTime {
    fn current_millis(&self) -> i64 {
        self.millis
    }
}

/// Replays `values` one read at a time, repeating the last value forever.
struct ScriptedTime {
    values: Vec<i64>,
    index: Cell<usize>,
}

impl ScriptedTime {
    fn new(values: Vec<i64>) -> Self {
        Self {
            values,
            index: Cell::new(0),
        }
    }

    fn reads(&self) -> usize {
        self.index.get()
    }
}

impl TimeSource for ScriptedTime {
    fn current_millis(&self) -> i64 {
        let i = self.index.get();
        self.index.set(i + 1);
        self.values[i.min(self.values.len() - 1)]
    }
}

trait PollExt {
    fn unwrap_ready(self) -> SnowflakeId;
    fn unwrap_pending(self) -> u64;
}

impl PollExt for Poll {
    fn unwrap_ready(self) -> SnowflakeId {
        match self {
            Self::Ready { id } => id,
            Self::Pending { yield_for } => {
                panic!("unexpected pending (yield for: {yield_for})")
            }
        }
    }

    fn unwrap_pending(self) -> u64 {
        match self {
            Self::Ready { id } => panic!("unexpected ready ({id})"),
            Self::Pending { yield_for } => yield_for,
        }
    }
}

#[test]
fn sequence_increments_within_same_tick() {
    let generator = IdGenerator::with_time_source(0, 0, MockTime { millis: 42 });

    let id1 = generator.generate_id().unwrap();
    let id2 = generator.generate_id().unwrap();
    let id3 = generator.generate_id().unwrap();

    assert_eq!(id1.timestamp(), 42);
    assert_eq!(id2.timestamp(), 42);
    assert_eq!(id3.timestamp(), 42);
    assert_eq!(id1.sequence(), 0);
    assert_eq!(id2.sequence(), 1);
    assert_eq!(id3.sequence(), 2);
    assert!(id1 < id2 && id2 < id3);
}

#[test]
fn try_poll_returns_pending_when_sequence_exhausted() {
    let state = GeneratorState::from_components(0, 0, MAX_SEQUENCE, 0);
    let generator = IdGenerator::from_state(state, MockTime { millis: 0 });

    assert_eq!(generator.try_poll().unwrap().unwrap_pending(), 1);
    // Polling never consumes anything while pending.
    assert_eq!(generator.try_poll().unwrap().unwrap_pending(), 1);
}

#[test]
fn generate_waits_out_exhausted_millisecond() {
    let state = GeneratorState::from_components(42, 1, MAX_SEQUENCE, 0);
    let clock = ScriptedTime::new(vec![42, 42, 43]);
    let generator = IdGenerator::from_state(state, &clock);

    let id = generator.generate_id().unwrap();
    assert_eq!(id.timestamp(), 43);
    assert_eq!(id.sequence(), 0);
    assert_eq!(id.node_id(), 1);
    assert_eq!(clock.reads(), 3);
}

#[test]
fn overflow_rolls_into_next_millisecond() {
    let mut readings = vec![42; MAX_SEQUENCE as usize + 2];
    readings.push(43);
    let generator = IdGenerator::with_time_source(1, 0, ScriptedTime::new(readings));

    for i in 0..=MAX_SEQUENCE {
        let id = generator.generate_id().unwrap();
        assert_eq!(id.sequence(), i);
        assert_eq!(id.timestamp(), 42);
    }

    // The 1025th call in millisecond 42 must move on to 43.
    let id = generator.generate_id().unwrap();
    assert_eq!(id.timestamp(), 43);
    assert_eq!(id.sequence(), 0);
}

#[test]
fn overflow_on_real_clock_is_strictly_increasing() {
    let generator = IdGenerator::new(Some(1), None);
    let ids: Vec<SnowflakeId> = (0..3 * (MAX_SEQUENCE as usize + 1))
        .map(|_| generator.generate_id().unwrap())
        .collect();

    for pair in ids.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        assert!(a < b);
        if a.sequence() == MAX_SEQUENCE {
            assert!(b.timestamp() > a.timestamp());
            assert_eq!(b.sequence(), 0);
        }
    }
}

#[test]
fn scenario_node_4090_unix_epoch() {
    let clock = ScriptedTime::new(vec![1_000, 1_000, 1_000, 1_002]);
    let generator = IdGenerator::with_time_source(4090, 0, clock);

    let ids: Vec<u64> = (0..3).map(|_| generator.generate().unwrap()).collect();
    for (expected_seq, &id) in ids.iter().enumerate() {
        assert_eq!(decode_sequence(id), expected_seq as u16);
        assert_eq!(decode_node_id(id), 4090);
        assert_eq!(decode_timestamp(id, 0), 1_000);
    }

    let fourth = generator.generate().unwrap();
    assert!(decode_timestamp(fourth, 0) > decode_timestamp(ids[2], 0));
    assert_eq!(decode_sequence(fourth), 0);
    assert_eq!(decode_node_id(fourth), 4090);
}

#[test]
fn scenario_on_real_clock_after_gap() {
    let generator = IdGenerator::new(Some(4090), Some(0));
    let ids: Vec<u64> = (0..3).map(|_| generator.generate().unwrap()).collect();
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
    assert!(ids.iter().all(|&id| decode_node_id(id) == 4090));

    std::thread::sleep(Duration::from_millis(2));

    let fourth = generator.generate().unwrap();
    assert!(decode_timestamp(fourth, 0) > decode_timestamp(ids[2], 0));
    assert_eq!(decode_sequence(fourth), 0);
}

#[test]
fn round_trip_within_wall_clock_window() {
    for node in [0, 1, 2048, 4095] {
        let generator = IdGenerator::new(Some(node), Some(DEFAULT_EPOCH));
        let before = SystemClock.current_millis();
        let id = generator.generate().unwrap();
        let after = SystemClock.current_millis();

        assert_eq!(decode_node_id(id), node);
        let ts = decode_timestamp(id, DEFAULT_EPOCH);
        assert!(ts >= before && ts <= after, "{before} <= {ts} <= {after}");
        assert_eq!(generator.decode_timestamp(id), ts);
    }
}

#[test]
fn many_ids_are_unique_and_monotonic() {
    const TOTAL_IDS: usize = 64 * 1024;

    let generator = IdGenerator::new(Some(1), None);
    let mut last: Option<SnowflakeId> = None;
    let mut seen = HashSet::with_capacity(TOTAL_IDS);

    for _ in 0..TOTAL_IDS {
        let id = generator.generate_id().unwrap();
        assert_eq!(id.node_id(), 1);
        if let Some(prev) = last {
            assert!(id > prev);
            if id.timestamp() == prev.timestamp() {
                assert_eq!(id.sequence(), prev.sequence() + 1);
            } else {
                assert_eq!(id.sequence(), 0);
            }
        }
        assert!(seen.insert(id));
        last = Some(id);
    }
}

#[test]
fn threaded_ids_are_unique() {
    const THREADS: usize = 8;
    const IDS_PER_THREAD: usize = 16 * 1024;

    let generator = IdGenerator::new(Some(0), None);

    let per_thread: Vec<Vec<u64>> = scope(|s| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                s.spawn(|| {
                    (0..IDS_PER_THREAD)
                        .map(|_| generator.generate().unwrap())
                        .collect::<Vec<_>>()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let mut seen = HashSet::with_capacity(THREADS * IDS_PER_THREAD);
    for ids in &per_thread {
        // Ordering only holds per caller.
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
        for &id in ids {
            assert!(seen.insert(id), "duplicate id {id}");
        }
    }
    assert_eq!(seen.len(), THREADS * IDS_PER_THREAD);
}

#[test]
fn clock_before_epoch_is_an_error() {
    let now = SystemClock.current_millis();
    let generator = IdGenerator::new(Some(1), Some(now + 60_000));
    assert!(matches!(
        generator.generate(),
        Err(Error::ClockBeforeEpoch { .. })
    ));

    let generator = IdGenerator::with_time_source(1, 500, MockTime { millis: 499 });
    assert_eq!(
        generator.generate(),
        Err(Error::ClockBeforeEpoch {
            now: 499,
            epoch_offset: 500
        })
    );
}

#[test]
fn clock_regression_is_an_error() {
    let generator = IdGenerator::with_time_source(1, 0, ScriptedTime::new(vec![50, 49, 50]));
    generator.generate().unwrap();
    assert_eq!(
        generator.generate(),
        Err(Error::ClockRegression {
            last_timestamp: 50,
            timestamp: 49
        })
    );

    let id = generator.generate_id().unwrap();
    assert_eq!((id.timestamp(), id.sequence()), (50, 1));
}

#[test]
fn node_id_is_masked_not_rejected() {
    let generator = IdGenerator::new(Some(4096 + 5), None);
    assert_eq!(generator.node_id(), 5);
    assert_eq!(decode_node_id(generator.generate().unwrap()), 5);
}

#[test]
fn provider_only_used_without_node_id() {
    let provider = || 77_u16;
    assert_eq!(IdGenerator::with_provider(None, None, &provider).node_id(), 77);
    assert_eq!(IdGenerator::with_provider(Some(3), None, &provider).node_id(), 3);

    let wide = || u16::MAX;
    assert_eq!(IdGenerator::with_provider(None, None, &wide).node_id(), 4095);
}

#[test]
fn defaults_and_config() {
    let generator = IdGenerator::new(None, None);
    assert_eq!(generator.epoch_offset(), DEFAULT_EPOCH);
    assert!(generator.node_id() <= 4095);

    let generator = IdGenerator::from_config(&GeneratorConfig::new(Some(12), Some(0)));
    assert_eq!(generator.node_id(), 12);
    assert_eq!(generator.epoch_offset(), 0);
}

#[cfg(not(feature = "parking-lot"))]
#[test]
fn panicking_clock_poisons_generator() {
    struct PanickingTime;
    impl TimeSource for PanickingTime {
        fn current_millis(&self) -> i64 {
            panic!("clock exploded")
        }
    }

    let generator = IdGenerator::with_time_source(0, 0, PanickingTime);
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| generator.generate()));
    assert!(result.is_err());
    assert_eq!(generator.generate(), Err(Error::LockPoisoned));
}
