use crate::codec::{parse_string, put_string_into};
use crate::Payload;

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ActivitySecrets {
    pub join: Option<String>,
    pub spectate: Option<String>,
    pub match_secret: Option<String>,
}

impl ActivitySecrets {
    pub fn new(
        join: Option<String>,
        spectate: Option<String>,
        match_secret: Option<String>,
    ) -> ActivitySecrets {
        ActivitySecrets {
            join: join.filter(|s| !s.is_empty()),
            spectate: spectate.filter(|s| !s.is_empty()),
            match_secret: match_secret.filter(|s| !s.is_empty()),
        }
    }

    pub fn from_data(data: &Payload) -> ActivitySecrets {
        ActivitySecrets {
            join: parse_string(data, "join"),
            spectate: parse_string(data, "spectate"),
            match_secret: parse_string(data, "match"),
        }
    }

    pub fn to_data(&self, defaults: bool) -> Payload {
        let mut data = Payload::new();
        put_string_into(self.join.as_deref(), &mut data, "join", defaults);
        put_string_into(self.spectate.as_deref(), &mut data, "spectate", defaults);
        put_string_into(self.match_secret.as_deref(), &mut data, "match", defaults);
        data
    }

    pub fn is_empty(&self) -> bool {
        self.join.is_none() && self.spectate.is_none() && self.match_secret.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_match_key() {
        let data = json!({"match": "m", "join": ""});
        let secrets = ActivitySecrets::from_data(data.as_object().unwrap());

        assert_eq!(secrets.match_secret.as_deref(), Some("m"));
        assert_eq!(secrets.join, None);
        assert_eq!(secrets.to_data(false), *json!({"match": "m"}).as_object().unwrap());
    }
}
