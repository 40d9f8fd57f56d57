//! Brand persona used by the educational templates.

use serde::{Deserialize, Serialize};

/// The persona and signature hashtag content is written as.
///
/// # Examples
///
/// ```
/// use autopx_core::Brand;
///
/// let brand = Brand::default();
/// assert_eq!(brand.name(), "Peterdamianohq");
/// assert!(brand.matches_hashtag("#PeterDamianoHQ"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, derive_getters::Getters)]
#[serde(from = "RawBrand")]
pub struct Brand {
    /// Account or persona name
    name: String,
    /// Signature hashtag, including the leading `#`
    hashtag: String,
}

impl Brand {
    /// Create a brand, normalising the hashtag to start with `#`.
    pub fn new(name: impl Into<String>, hashtag: impl Into<String>) -> Self {
        let hashtag = hashtag.into();
        let hashtag = if hashtag.starts_with('#') {
            hashtag
        } else {
            format!("#{}", hashtag)
        };
        Self {
            name: name.into(),
            hashtag,
        }
    }

    /// Case-insensitive comparison against the signature hashtag.
    pub fn matches_hashtag(&self, tag: &str) -> bool {
        tag.trim().eq_ignore_ascii_case(&self.hashtag)
    }
}

// Deserialized brands go through `Brand::new` so configured hashtags are normalised too.
#[derive(Deserialize)]
struct RawBrand {
    name: String,
    hashtag: String,
}

impl From<RawBrand> for Brand {
    fn from(raw: RawBrand) -> Self {
        Self::new(raw.name, raw.hashtag)
    }
}

impl Default for Brand {
    fn default() -> Self {
        Self::new("Peterdamianohq", "#peterdamianoHQ")
    }
}
