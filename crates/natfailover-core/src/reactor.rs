//! The failover workflow
//!
//! One reactor serves the whole process lifetime. Each `handle` call
//! classifies the instance, disables its source/destination check, then
//! repoints the default route of every opted-in route table in the
//! instance's VPC. Steps run strictly in that order with no rollback; a
//! failure aborts the invocation and leaves the remaining tables untouched.

use crate::config::ReactorConfig;
use crate::error::{FailoverError, Result};
use crate::event::{FailoverResponse, StateChangeEvent};
use crate::provider::NetworkProvider;

/// The catch-all destination replaced on every eligible route table
pub const DEFAULT_ROUTE_CIDR: &str = "0.0.0.0/0";

/// Applies the NAT routing change for one lifecycle event
pub struct NatFailoverReactor<P> {
    network: P,
    config: ReactorConfig,
}

impl<P: NetworkProvider> NatFailoverReactor<P> {
    /// Reactor with the stock tag configuration
    pub fn new(network: P) -> Self {
        Self::with_config(network, ReactorConfig::default())
    }

    pub fn with_config(network: P, config: ReactorConfig) -> Self {
        Self { network, config }
    }

    /// Top-level dispatch for one state-change notification
    ///
    /// Routing is updated only when the instance carries the NAT name marker
    /// and the reported state is `running`. Anything else gets the 204 skip
    /// result and no side effects.
    pub async fn handle(&self, event: &StateChangeEvent) -> Result<FailoverResponse> {
        let instance_id = &event.detail.instance_id;
        let state = &event.detail.state;

        if self.is_nat_instance(instance_id).await? && event.detail.is_running() {
            tracing::info!("NAT instance {} entered {}, reconfiguring routes", instance_id, state);
            self.network.disable_source_dest_check(instance_id).await?;
            tracing::info!("Disabled source/dest check on {}", instance_id);
            self.sync_route_tables(instance_id).await?;
            Ok(FailoverResponse::updated())
        } else {
            tracing::info!("Skipping instance {} in state {}", instance_id, state);
            Ok(FailoverResponse::skipped())
        }
    }

    /// Whether the instance belongs to the NAT auto-scaling role
    ///
    /// Substring match on the `Name` tag, so suffixed names minted by the
    /// scaling group qualify without exact-name coordination.
    pub async fn is_nat_instance(&self, instance_id: &str) -> Result<bool> {
        let instance = self.network.describe_instance(instance_id).await?;
        Ok(instance
            .name()
            .is_some_and(|name| name.contains(&self.config.nat_name_marker)))
    }

    /// Replace the default route of every opted-in route table in the
    /// instance's VPC
    ///
    /// Tables without the opt-in tag are skipped, not failed. Zero eligible
    /// tables is a successful no-op.
    pub async fn sync_route_tables(&self, instance_id: &str) -> Result<()> {
        let instance = self.network.describe_instance(instance_id).await?;
        let vpc_id = instance
            .vpc_id
            .ok_or_else(|| FailoverError::VpcNotAttached(instance_id.to_string()))?;

        let route_tables = self.network.route_tables_for_vpc(&vpc_id).await?;
        tracing::debug!("Found {} route tables in {}", route_tables.len(), vpc_id);

        for table in &route_tables {
            if table.has_tag(&self.config.allow_tag) {
                self.set_public_route(&table.route_table_id, instance_id)
                    .await?;
            } else {
                tracing::debug!(
                    "Route table {} lacks the {} tag, leaving it alone",
                    table.route_table_id,
                    self.config.allow_tag
                );
            }
        }

        Ok(())
    }

    /// Point the default route of `route_table_id` at `instance_id`
    ///
    /// A missing prior route is expected (first-ever NAT configuration) and
    /// only logged; any other deletion failure propagates and aborts the
    /// remaining tables in the batch, as does a creation failure.
    pub async fn set_public_route(&self, route_table_id: &str, instance_id: &str) -> Result<()> {
        match self
            .network
            .delete_route(route_table_id, DEFAULT_ROUTE_CIDR)
            .await
        {
            Ok(()) => {
                tracing::debug!("Removed previous default route from {}", route_table_id);
            }
            Err(FailoverError::RouteNotFound { .. }) => {
                tracing::debug!("No default route in {}, nothing to delete", route_table_id);
            }
            Err(err) => return Err(err),
        }

        self.network
            .create_route(route_table_id, DEFAULT_ROUTE_CIDR, instance_id)
            .await?;
        tracing::info!(
            "Default route in {} now targets {}",
            route_table_id,
            instance_id
        );
        Ok(())
    }
}
