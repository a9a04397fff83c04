//! NAT failover error types

use thiserror::Error;

/// Failures surfaced by the failover workflow and its providers
///
/// `RouteNotFound` is the one variant the workflow tolerates: a missing
/// default route is an expected state (first-ever NAT configuration), while
/// every other deletion failure must propagate instead of being swallowed.
#[derive(Error, Debug)]
pub enum FailoverError {
    #[error("Instance not found: {0}")]
    InstanceNotFound(String),

    #[error("Instance lookup failed for {instance_id}: {message}")]
    LookupFailed { instance_id: String, message: String },

    #[error("Instance {0} has no VPC association")]
    VpcNotAttached(String),

    #[error("Attribute update failed for {instance_id}: {message}")]
    AttributeUpdateFailed { instance_id: String, message: String },

    #[error("Route table listing failed for {vpc_id}: {message}")]
    RouteTableListingFailed { vpc_id: String, message: String },

    #[error("Route not found: {destination} in {route_table_id}")]
    RouteNotFound { route_table_id: String, destination: String },

    #[error("Route deletion failed in {route_table_id}: {message}")]
    RouteDeletionFailed { route_table_id: String, message: String },

    #[error("Route creation failed in {route_table_id}: {message}")]
    RouteCreationFailed { route_table_id: String, message: String },
}

pub type Result<T> = std::result::Result<T, FailoverError>;
