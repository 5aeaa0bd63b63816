//! The ticking feed served by both modes.

use serde::Serialize;
use turbosse::{Emitter, Event, EventStream, StreamResult};

/// One tick of the demo feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tick {
    /// 1-based position in the feed
    pub sequence: u32,
    /// Number of ticks in the feed
    pub total: u32,
}

impl Event for Tick {
    fn name(&self) -> &str {
        "tick"
    }
}

/// Open `stream`, send `count` ticks and close it.
///
/// `pause` runs between ticks; realtime servers sleep there, buffered
/// servers pass a no-op.
pub fn run<E: Emitter>(
    stream: &mut EventStream<E>,
    count: u32,
    mut pause: impl FnMut(),
) -> StreamResult<()> {
    stream.open()?;
    for sequence in 1..=count {
        if sequence > 1 {
            pause();
        }
        stream.send_event(&Tick {
            sequence,
            total: count,
        })?;
    }
    stream.close()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use turbosse::{ResponseEventStream, StreamConfig};

    #[test]
    fn test_feed_body() {
        let mut stream =
            ResponseEventStream::buffered(StreamConfig::new().with_id("demo").with_retry_millis(5))
                .unwrap();
        let mut pauses = 0;
        run(&mut stream, 2, || pauses += 1).unwrap();

        assert_eq!(pauses, 1);
        let response = stream.into_response().unwrap();
        assert_eq!(
            std::str::from_utf8(response.body()).unwrap(),
            "id: demo\nevent: tick\ndata: {\"sequence\":1,\"total\":2}\nretry: 5\n\n\
             id: demo\nevent: tick\ndata: {\"sequence\":2,\"total\":2}\nretry: 5\n\n\
             id: demo\nevent: done\ndata: \nretry: 5\n\n"
        );
    }

    #[test]
    fn test_empty_feed_only_closes() {
        let mut stream = ResponseEventStream::buffered(StreamConfig::new()).unwrap();
        run(&mut stream, 0, || unreachable!()).unwrap();
        let response = stream.into_response().unwrap();
        assert_eq!(
            std::str::from_utf8(response.body()).unwrap().matches("event: ").count(),
            1
        );
    }
}
