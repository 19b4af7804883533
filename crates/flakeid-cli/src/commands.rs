use std::io::Write;

use flakeid::{IdGenerator, SnowflakeId, TimeSource};

/// Writes `count` freshly generated IDs to `out`, one per line.
pub fn generate<T: TimeSource>(
    generator: &IdGenerator<T>,
    count: usize,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    for _ in 0..count {
        writeln!(out, "{}", generator.generate()?)?;
    }
    tracing::debug!(count, node_id = generator.node_id(), "generated ids");
    Ok(())
}

/// Writes one tab-separated line per ID: raw id, Unix-millisecond timestamp,
/// node id, sequence.
pub fn decode(ids: &[u64], epoch_offset: i64, out: &mut impl Write) -> anyhow::Result<()> {
    writeln!(out, "id\ttimestamp_ms\tnode_id\tsequence")?;
    for &raw in ids {
        let id = SnowflakeId::from_raw(raw);
        writeln!(
            out,
            "{}\t{}\t{}\t{}",
            id,
            id.unix_millis(epoch_offset),
            id.node_id(),
            id.sequence()
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedTime(i64);
    impl TimeSource for FixedTime {
        fn current_millis(&self) -> i64 {
            self.0
        }
    }

    #[test]
    fn generate_prints_one_id_per_line() {
        let generator = IdGenerator::with_time_source(4090, 0, FixedTime(1_000));
        let mut out = Vec::new();
        generate(&generator, 3, &mut out).unwrap();

        let lines: Vec<u64> = String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|l| l.parse().unwrap())
            .collect();
        assert_eq!(
            lines,
            vec![
                flakeid::encode(1_000, 4090, 0),
                flakeid::encode(1_000, 4090, 1),
                flakeid::encode(1_000, 4090, 2),
            ]
        );
    }

    #[test]
    fn generate_surfaces_clock_errors() {
        let generator = IdGenerator::with_time_source(1, 2_000, FixedTime(1_000));
        let mut out = Vec::new();
        let err = generate(&generator, 1, &mut out).unwrap_err();
        assert!(err.downcast_ref::<flakeid::Error>().is_some());
        assert!(out.is_empty());
    }

    #[test]
    fn decode_prints_fields() {
        let raw = flakeid::encode(42, 7, 3);
        let mut out = Vec::new();
        decode(&[raw], 1_000, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("id\ttimestamp_ms\tnode_id\tsequence"));
        assert_eq!(lines.next(), Some(format!("{raw}\t1042\t7\t3").as_str()));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn decode_clamps_timestamp_under_huge_epoch() {
        let mut out = Vec::new();
        decode(&[4_194_304], i64::MAX, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        assert_eq!(
            text.lines().nth(1),
            Some(format!("4194304\t{}\t0\t0", i64::MAX).as_str())
        );
    }
}
