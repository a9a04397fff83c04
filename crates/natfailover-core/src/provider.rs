//! Network control-plane abstraction
//!
//! The workflow reaches the cloud provider through [`NetworkProvider`]. The
//! aws-sdk-ec2 implementation lives in `natfailover-ec2`; tests use an
//! in-memory fake. Descriptors are read-only snapshots, fetched fresh for
//! every use and never cached.

use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;

/// Cloud networking operations consumed by the failover workflow
#[async_trait]
pub trait NetworkProvider: Send + Sync {
    /// Fetch the instance's tags and VPC association
    async fn describe_instance(&self, instance_id: &str) -> Result<InstanceDescriptor>;

    /// Turn off the source/destination check so the instance may forward
    /// traffic it did not originate. Safe to repeat on an already-disabled
    /// instance.
    async fn disable_source_dest_check(&self, instance_id: &str) -> Result<()>;

    /// List every route table belonging to the given VPC
    async fn route_tables_for_vpc(&self, vpc_id: &str) -> Result<Vec<RouteTableDescriptor>>;

    /// Delete the route for `destination_cidr` from the table
    ///
    /// Implementations must report an absent route as the discriminated
    /// route-not-found error, so callers can tell it apart from real
    /// failures like permission errors or throttling.
    async fn delete_route(&self, route_table_id: &str, destination_cidr: &str) -> Result<()>;

    /// Create a route for `destination_cidr` targeting `instance_id`
    async fn create_route(
        &self,
        route_table_id: &str,
        destination_cidr: &str,
        instance_id: &str,
    ) -> Result<()>;
}

/// Read-only view of a compute instance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceDescriptor {
    pub instance_id: String,
    /// Tag key to value; keys are unique per instance
    pub tags: HashMap<String, String>,
    /// Owning VPC, absent for instances without a VPC attachment
    pub vpc_id: Option<String>,
}

impl InstanceDescriptor {
    /// Value of the `Name` tag, if present
    pub fn name(&self) -> Option<&str> {
        self.tags.get("Name").map(String::as_str)
    }
}

/// Read-only view of a route table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTableDescriptor {
    pub route_table_id: String,
    pub tags: HashMap<String, String>,
    pub vpc_id: Option<String>,
}

impl RouteTableDescriptor {
    /// Presence check for a tag key; the value is not inspected
    pub fn has_tag(&self, key: &str) -> bool {
        self.tags.contains_key(key)
    }
}
