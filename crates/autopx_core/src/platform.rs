//! Platform identifiers.

use serde::{Deserialize, Serialize};

/// Platforms a post can be drafted for.
///
/// # Examples
///
/// ```
/// use autopx_core::{PublishPlatform, TargetPlatform};
///
/// let target: TargetPlatform = "both".parse().unwrap();
/// assert!(target.includes(PublishPlatform::X));
/// assert_eq!(TargetPlatform::X.to_string(), "x");
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TargetPlatform {
    /// A Facebook Page post
    Facebook,
    /// A post on X
    X,
    /// One draft for each platform
    Both,
}

impl TargetPlatform {
    /// Whether drafts for `platform` are requested.
    pub fn includes(self, platform: PublishPlatform) -> bool {
        matches!(
            (self, platform),
            (Self::Both, _)
                | (Self::Facebook, PublishPlatform::Facebook)
                | (Self::X, PublishPlatform::X)
        )
    }
}

impl From<PublishPlatform> for TargetPlatform {
    fn from(platform: PublishPlatform) -> Self {
        match platform {
            PublishPlatform::Facebook => Self::Facebook,
            PublishPlatform::X => Self::X,
        }
    }
}

/// A single platform text can be optimised for or published to.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PublishPlatform {
    /// Facebook Pages
    Facebook,
    /// X (formerly Twitter)
    X,
}

impl PublishPlatform {
    /// Human-readable platform name used in prompts and messages.
    pub fn label(self) -> &'static str {
        match self {
            Self::Facebook => "Facebook",
            Self::X => "X",
        }
    }
}
