use crate::codec::{parse_string, put_string_into};
use crate::Payload;

/// Images and hover texts of a rich activity. Image ids are *usually* snowflakes,
/// but streaming and spotify activities store prefixed ids (`twitch:`, `spotify:`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ActivityAssets {
    pub image_large: Option<String>,
    pub image_small: Option<String>,
    pub text_large: Option<String>,
    pub text_small: Option<String>,
}

impl ActivityAssets {
    pub fn new(
        image_large: Option<String>,
        image_small: Option<String>,
        text_large: Option<String>,
        text_small: Option<String>,
    ) -> ActivityAssets {
        ActivityAssets {
            image_large: image_large.filter(|s| !s.is_empty()),
            image_small: image_small.filter(|s| !s.is_empty()),
            text_large: text_large.filter(|s| !s.is_empty()),
            text_small: text_small.filter(|s| !s.is_empty()),
        }
    }

    pub fn from_data(data: &Payload) -> ActivityAssets {
        ActivityAssets {
            image_large: parse_string(data, "large_image"),
            image_small: parse_string(data, "small_image"),
            text_large: parse_string(data, "large_text"),
            text_small: parse_string(data, "small_text"),
        }
    }

    pub fn to_data(&self, defaults: bool) -> Payload {
        let mut data = Payload::new();
        put_string_into(self.image_large.as_deref(), &mut data, "large_image", defaults);
        put_string_into(self.image_small.as_deref(), &mut data, "small_image", defaults);
        put_string_into(self.text_large.as_deref(), &mut data, "large_text", defaults);
        put_string_into(self.text_small.as_deref(), &mut data, "small_text", defaults);
        data
    }

    pub fn is_empty(&self) -> bool {
        self.image_large.is_none()
            && self.image_small.is_none()
            && self.text_large.is_none()
            && self.text_small.is_none()
    }

    #[deprecated(note = "use the `image_large` field")]
    pub fn large_image(&self) -> Option<&str> {
        self.image_large.as_deref()
    }

    #[deprecated(note = "use the `image_small` field")]
    pub fn small_image(&self) -> Option<&str> {
        self.image_small.as_deref()
    }
}
