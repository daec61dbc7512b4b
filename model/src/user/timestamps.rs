use chrono::{DateTime, Duration, Utc};

use crate::codec::{parse_datetime, put_datetime_into};
use crate::Payload;

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ActivityTimestamps {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
}

impl ActivityTimestamps {
    pub fn new(start: Option<DateTime<Utc>>, end: Option<DateTime<Utc>>) -> ActivityTimestamps {
        ActivityTimestamps { start, end }
    }

    pub fn from_data(data: &Payload) -> ActivityTimestamps {
        ActivityTimestamps {
            start: parse_datetime(data, "start"),
            end: parse_datetime(data, "end"),
        }
    }

    pub fn to_data(&self, defaults: bool) -> Payload {
        let mut data = Payload::new();
        put_datetime_into(self.start, &mut data, "start", defaults);
        put_datetime_into(self.end, &mut data, "end", defaults);
        data
    }

    /// Time between `start` and `end`, when both are known.
    pub fn duration(&self) -> Option<Duration> {
        match (self.start, self.end) {
            (Some(start), Some(end)) => Some(end - start),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.start.is_none() && self.end.is_none()
    }
}
