use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Payload, Snowflake};

/// Partial emoji as sent inside activities: either a unicode emoji (`id` absent) or
/// a custom guild emoji.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash)]
pub struct ActivityEmoji {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Snowflake>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub animated: bool,
}

impl ActivityEmoji {
    pub fn new(emoji: String) -> ActivityEmoji {
        ActivityEmoji {
            name: emoji,
            id: None,
            animated: false,
        }
    }

    pub fn new_custom_emoji(name: String, id: Snowflake, animated: bool) -> ActivityEmoji {
        ActivityEmoji {
            name,
            id: Some(id),
            animated,
        }
    }

    /// Lenient decode, `None` when the payload is not an emoji.
    pub fn from_data(data: &Payload) -> Option<ActivityEmoji> {
        serde_json::from_value(serde_json::Value::Object(data.clone())).ok()
    }

    pub fn to_data(&self) -> Payload {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(data)) => data,
            _ => Payload::new(),
        }
    }

    pub fn is_custom(&self) -> bool {
        self.id.map_or(false, |id| !id.is_none())
    }
}

impl fmt::Display for ActivityEmoji {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.id {
            Some(id) if !id.is_none() => {
                let prefix = if self.animated { "a" } else { "" };
                write!(f, "<{}:{}:{}>", prefix, self.name, id)
            }
            _ => f.write_str(&self.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_display() {
        assert_eq!(ActivityEmoji::new("🎮".to_owned()).to_string(), "🎮");
        assert_eq!(
            ActivityEmoji::new_custom_emoji("blob".to_owned(), Snowflake(5), false).to_string(),
            "<:blob:5>"
        );
        assert_eq!(
            ActivityEmoji::new_custom_emoji("blob".to_owned(), Snowflake(5), true).to_string(),
            "<a:blob:5>"
        );
    }

    #[test]
    fn test_from_data() {
        let data = json!({"name": "blob", "id": "77", "animated": true});
        let emoji = ActivityEmoji::from_data(data.as_object().unwrap()).unwrap();
        assert!(emoji.is_custom());
        assert_eq!(emoji.id, Some(Snowflake(77)));
        assert_eq!(emoji.to_data(), *data.as_object().unwrap());

        assert_eq!(ActivityEmoji::from_data(json!({"id": 1}).as_object().unwrap()), None);
    }
}
