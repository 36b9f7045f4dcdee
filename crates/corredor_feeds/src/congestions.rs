use corredor_routing::congestion::CongestionReading;
use corredor_routing::error::FeedError;

fn parse_field(line: usize, name: &str, value: Option<&str>) -> Result<i64, FeedError> {
    let value = value.ok_or_else(|| FeedError::Malformed {
        line,
        reason: format!("missing {name}"),
    })?;

    value.trim().parse::<i64>().map_err(|_| FeedError::Malformed {
        line,
        reason: format!("invalid {name} \"{value}\""),
    })
}

/// Parses `segment_id#timestamp#current#future` records. Only the segment id
/// and the current level are kept. Any bad record fails the whole feed. The
/// result is sorted by ascending segment id.
pub fn parse_congestions(content: &str) -> Result<Vec<CongestionReading>, FeedError> {
    let mut readings = vec![];

    for (i, raw) in content.lines().enumerate() {
        let line = i + 1;
        let raw = raw.trim().trim_matches('"');
        if raw.is_empty() {
            continue;
        }

        let mut fields = raw.split('#');
        let segment_id = parse_field(line, "segment id", fields.next())?;
        let _timestamp = fields.next();
        let level = parse_field(line, "congestion level", fields.next())?;

        readings.push(CongestionReading::new(segment_id, level)?);
    }

    readings.sort_by_key(|reading| reading.segment_id);
    Ok(readings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_congestions() {
        let content = "2#20211110120052#4#5\n1#20211110120052#0#0\n\n3#20211110120052#6#6\n";
        let readings = parse_congestions(content).unwrap();

        let ids: Vec<i64> = readings.iter().map(|r| r.segment_id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(readings[1].level.value(), 4);
        assert_eq!(readings[2].level.value(), 6);
    }

    #[test]
    fn test_out_of_range_level() {
        let result = parse_congestions("1#20211110120052#7#0\n");
        assert!(matches!(
            result,
            Err(FeedError::InvalidCongestionLevel {
                segment_id: 1,
                level: 7
            })
        ));
    }

    #[test]
    fn test_missing_level() {
        let result = parse_congestions("1#20211110120052#0#0\n2#20211110120052\n");
        assert!(matches!(result, Err(FeedError::Malformed { line: 2, .. })));
    }

    #[test]
    fn test_non_numeric_id() {
        let result = parse_congestions("x#20211110120052#1#1\n");
        assert!(matches!(result, Err(FeedError::Malformed { line: 1, .. })));
    }
}
