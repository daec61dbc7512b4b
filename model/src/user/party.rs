use serde_json::Value;

use crate::codec::{parse_string, put_string_into};
use crate::Payload;

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ActivityParty {
    pub id: Option<String>,
    pub size: u32,
    pub max: u32,
}

impl ActivityParty {
    pub fn new(party_id: Option<String>, size: u32, max: u32) -> ActivityParty {
        ActivityParty {
            id: party_id.filter(|s| !s.is_empty()),
            size,
            max,
        }
    }

    pub fn from_data(data: &Payload) -> ActivityParty {
        // [current_size, max_size]
        let (size, max) = match data.get("size").and_then(Value::as_array) {
            Some(size) => (
                size.get(0).and_then(as_u32).unwrap_or(0),
                size.get(1).and_then(as_u32).unwrap_or(0),
            ),
            None => (0, 0),
        };

        ActivityParty {
            id: parse_string(data, "id"),
            size,
            max,
        }
    }

    pub fn to_data(&self, defaults: bool) -> Payload {
        let mut data = Payload::new();
        put_string_into(self.id.as_deref(), &mut data, "id", defaults);

        if defaults || self.size != 0 || self.max != 0 {
            data.insert("size".to_owned(), Value::from(vec![self.size, self.max]));
        }

        data
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_none() && self.size == 0 && self.max == 0
    }
}

fn as_u32(value: &Value) -> Option<u32> {
    value.as_u64().map(|n| n.min(u64::from(u32::MAX)) as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_data() {
        let party = ActivityParty::new(Some("p".to_owned()), 6, 12);
        let data = party.to_data(false);

        assert_eq!(data["size"], json!([6, 12]));
        assert_eq!(data["id"], json!("p"));
    }

    #[test]
    fn test_to_data_empty() {
        let data = ActivityParty::default().to_data(false);
        assert!(data.get("id").is_none());
        assert!(data.get("size").is_none());

        let data = ActivityParty::default().to_data(true);
        assert_eq!(data["size"], json!([0, 0]));
        assert_eq!(data["id"], Value::Null);
    }

    #[test]
    fn test_from_data() {
        let data = json!({"id": "spotify:1", "size": [2]});
        let party = ActivityParty::from_data(data.as_object().unwrap());

        assert_eq!(party.id.as_deref(), Some("spotify:1"));
        assert_eq!((party.size, party.max), (2, 0));
    }
}
