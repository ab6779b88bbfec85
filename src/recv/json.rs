//! Flush events encoded as one JSON document per line:
//!
//! ```text
//! {"timestamp":1500000000,"counters":{"api.web1.requests":12},"timers":{"api.web1.latency":[5,1,3]}}
//! ```
//!
//! Every metric kind is optional. Set members are strings.

use std::io::{BufRead, ErrorKind};

use tracing::{debug, warn};

use super::{FlushEvent, FlushSender};

pub fn parse_event(line: &str) -> Result<FlushEvent, serde_json::Error> {
    serde_json::from_str(line)
}

/// Forward every event read from `reader` to `sender`, skipping lines that
/// aren't UTF-8 or don't decode. Stops at end of input, on an I/O error, or
/// when nobody is listening anymore. Returns how many events were sent.
pub fn read_events<R: BufRead>(reader: R, sender: &FlushSender) -> usize {
    let mut sent = 0;

    for (index, line) in reader.lines().enumerate() {
        let line = match line {
            Ok(line) => line,
            // The bad bytes are already consumed, so the next line is intact.
            Err(ref err) if err.kind() == ErrorKind::InvalidData => {
                warn!(
                    line = index + 1,
                    error = %err,
                    "skipping flush event that is not UTF-8"
                );
                continue;
            }
            Err(err) => {
                warn!(error = %err, "failed to read flush event");
                break;
            }
        };

        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }

        match parse_event(line) {
            Ok(event) => {
                if !sender.push(event) {
                    debug!("flush listener went away");
                    break;
                }
                sent += 1;
            }
            Err(err) => warn!(line = index + 1, error = %err, "skipping malformed flush event"),
        }
    }

    sent
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::recv::flush_channel;

    #[test]
    fn it_parses_events() {
        let event = parse_event(
            r#"{"timestamp":1500000000,"counters":{"a.b.c":2},"gauges":{"a.b.g":1.5},"timers":{"a.b.t":[3,1]},"sets":{"a.b.s":["x","y","x"]}}"#,
        )
        .unwrap();

        assert_eq!(event.timestamp, 1_500_000_000);
        assert_eq!(event.snapshot.counters["a.b.c"], 2.0);
        assert_eq!(event.snapshot.gauges["a.b.g"], 1.5);
        assert_eq!(event.snapshot.timers["a.b.t"], vec![3.0, 1.0]);
        assert_eq!(event.snapshot.sets["a.b.s"].len(), 2);
    }

    #[test]
    fn it_allows_missing_kinds() {
        let event = parse_event(r#"{"timestamp":7}"#).unwrap();

        assert_eq!(event.timestamp, 7);
        assert!(event.snapshot.is_empty());
    }

    #[test]
    fn it_requires_a_timestamp() {
        assert!(parse_event(r#"{"counters":{}}"#).is_err());
    }

    #[test]
    fn it_skips_blank_and_malformed_lines() {
        let input = "{\"timestamp\":1}\n\nnot json\n{\"timestamp\":2,\"gauges\":{\"a.b.c\":1}}\n";
        let (sender, receiver) = flush_channel();

        let sent = read_events(Cursor::new(input), &sender);
        drop(sender);

        assert_eq!(sent, 2);
        let timestamps: Vec<u64> = receiver.into_iter().map(|event| event.timestamp).collect();
        assert_eq!(timestamps, vec![1, 2]);
    }

    #[test]
    fn it_skips_lines_that_are_not_utf8() {
        let input: &[u8] = b"{\"timestamp\":1}\n\xff\xfe garbage\n{\"timestamp\":2}\n{\"timestamp\":3}\n";
        let (sender, receiver) = flush_channel();

        let sent = read_events(Cursor::new(input), &sender);
        drop(sender);

        assert_eq!(sent, 3);
        let timestamps: Vec<u64> = receiver.into_iter().map(|event| event.timestamp).collect();
        assert_eq!(timestamps, vec![1, 2, 3]);
    }

    #[test]
    fn it_stops_when_the_listener_is_gone() {
        let (sender, receiver) = flush_channel();
        drop(receiver);

        assert_eq!(read_events(Cursor::new("{\"timestamp\":1}\n"), &sender), 0);
    }
}
