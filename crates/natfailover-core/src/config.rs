//! Reactor configuration
//!
//! Two tag knobs with compiled defaults. Both can be overridden through the
//! environment for fleets that tag differently; with nothing set, behavior
//! is exactly the stock configuration.

use std::env;

/// Default substring looked for in the `Name` tag of NAT instances
pub const DEFAULT_NAT_NAME_MARKER: &str = "asg-nat-instance";

/// Default tag key that opts a route table into route updates
pub const DEFAULT_ALLOW_TAG: &str = "AllowNatRouteUpdates";

/// Tunables for the failover workflow
#[derive(Debug, Clone)]
pub struct ReactorConfig {
    /// Substring of the `Name` tag that marks members of the NAT
    /// auto-scaling role
    pub nat_name_marker: String,

    /// Route tables carrying this tag key (any value) receive route updates
    pub allow_tag: String,
}

impl Default for ReactorConfig {
    fn default() -> Self {
        Self {
            nat_name_marker: DEFAULT_NAT_NAME_MARKER.to_string(),
            allow_tag: DEFAULT_ALLOW_TAG.to_string(),
        }
    }
}

impl ReactorConfig {
    /// Build a config from `NAT_NAME_MARKER` and `NAT_ROUTE_ALLOW_TAG`,
    /// falling back to the defaults for anything unset
    pub fn from_env() -> Self {
        Self {
            nat_name_marker: env::var("NAT_NAME_MARKER")
                .unwrap_or_else(|_| DEFAULT_NAT_NAME_MARKER.to_string()),
            allow_tag: env::var("NAT_ROUTE_ALLOW_TAG")
                .unwrap_or_else(|_| DEFAULT_ALLOW_TAG.to_string()),
        }
    }
}
