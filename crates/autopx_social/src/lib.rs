//! Publishing adapters for Facebook Pages and X.
//!
//! Each adapter turns "publish this text" into exactly one platform API call. Adapters hold fixed
//! credentials and nothing else: no retries, no rate-limit handling, no idempotency keys.
//!
//! # Example
//!
//! ```no_run
//! use autopx_interface::SocialPlatform;
//! use autopx_social::{FacebookCredentials, FacebookPlatform, GRAPH_API_URL};
//!
//! # async fn example() -> autopx_error::AutopxResult<()> {
//! let facebook = FacebookPlatform::new(FacebookCredentials::from_env(), GRAPH_API_URL)?;
//! let outcome = facebook.publish("Hello from autopx").await;
//! println!("{}", serde_json::to_string(&outcome).unwrap_or_default());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod credentials;
mod facebook;
mod metrics;
pub mod oauth;
mod x;

pub use credentials::{FacebookCredentials, XCredentials};
pub use facebook::{FacebookPlatform, GRAPH_API_URL};
pub use metrics::PublishMetrics;
pub use x::{CreatedPost, X_API_URL, XApi, XClient, XPlatform};
