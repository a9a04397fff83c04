//! EC2 implementation of the network provider

use std::collections::HashMap;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_ec2::Client;
use aws_sdk_ec2::error::{DisplayErrorContext, ProvideErrorMetadata, SdkError};
use aws_sdk_ec2::types::{AttributeBooleanValue, Filter, Instance, RouteTable, Tag};
use natfailover_core::{
    FailoverError, InstanceDescriptor, NetworkProvider, Result, RouteTableDescriptor,
};

// EC2 error codes the reactor distinguishes from generic failures.
const INSTANCE_NOT_FOUND: &str = "InvalidInstanceID.NotFound";
const INSTANCE_MALFORMED: &str = "InvalidInstanceID.Malformed";
const ROUTE_NOT_FOUND: &str = "InvalidRoute.NotFound";

/// Network provider backed by the AWS EC2 control plane
pub struct Ec2NetworkProvider {
    client: Client,
}

impl Ec2NetworkProvider {
    /// Wrap an already-configured client, e.g. one pointed at a test endpoint
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Build a client from the ambient environment (execution role, region)
    pub async fn from_env() -> Self {
        let config = aws_config::defaults(BehaviorVersion::latest()).load().await;
        Self::new(Client::new(&config))
    }
}

#[async_trait]
impl NetworkProvider for Ec2NetworkProvider {
    async fn describe_instance(&self, instance_id: &str) -> Result<InstanceDescriptor> {
        let output = self
            .client
            .describe_instances()
            .instance_ids(instance_id)
            .send()
            .await
            .map_err(|err| {
                if matches!(err.code(), Some(INSTANCE_NOT_FOUND) | Some(INSTANCE_MALFORMED)) {
                    FailoverError::InstanceNotFound(instance_id.to_string())
                } else {
                    FailoverError::LookupFailed {
                        instance_id: instance_id.to_string(),
                        message: sdk_message(err),
                    }
                }
            })?;

        let instance = output
            .reservations()
            .iter()
            .flat_map(|reservation| reservation.instances())
            .next()
            .ok_or_else(|| FailoverError::InstanceNotFound(instance_id.to_string()))?;

        Ok(instance_descriptor(instance, instance_id))
    }

    async fn disable_source_dest_check(&self, instance_id: &str) -> Result<()> {
        tracing::debug!("Setting sourceDestCheck=false on {}", instance_id);
        self.client
            .modify_instance_attribute()
            .instance_id(instance_id)
            .source_dest_check(AttributeBooleanValue::builder().value(false).build())
            .send()
            .await
            .map_err(|err| FailoverError::AttributeUpdateFailed {
                instance_id: instance_id.to_string(),
                message: sdk_message(err),
            })?;
        Ok(())
    }

    async fn route_tables_for_vpc(&self, vpc_id: &str) -> Result<Vec<RouteTableDescriptor>> {
        let output = self
            .client
            .describe_route_tables()
            .filters(Filter::builder().name("vpc-id").values(vpc_id).build())
            .send()
            .await
            .map_err(|err| FailoverError::RouteTableListingFailed {
                vpc_id: vpc_id.to_string(),
                message: sdk_message(err),
            })?;

        Ok(output
            .route_tables()
            .iter()
            .filter_map(route_table_descriptor)
            .collect())
    }

    async fn delete_route(&self, route_table_id: &str, destination_cidr: &str) -> Result<()> {
        tracing::debug!("Deleting route {} from {}", destination_cidr, route_table_id);
        self.client
            .delete_route()
            .route_table_id(route_table_id)
            .destination_cidr_block(destination_cidr)
            .send()
            .await
            .map_err(|err| {
                if err.code() == Some(ROUTE_NOT_FOUND) {
                    FailoverError::RouteNotFound {
                        route_table_id: route_table_id.to_string(),
                        destination: destination_cidr.to_string(),
                    }
                } else {
                    FailoverError::RouteDeletionFailed {
                        route_table_id: route_table_id.to_string(),
                        message: sdk_message(err),
                    }
                }
            })?;
        Ok(())
    }

    async fn create_route(
        &self,
        route_table_id: &str,
        destination_cidr: &str,
        instance_id: &str,
    ) -> Result<()> {
        tracing::debug!(
            "Creating route {} -> {} in {}",
            destination_cidr,
            instance_id,
            route_table_id
        );
        self.client
            .create_route()
            .route_table_id(route_table_id)
            .destination_cidr_block(destination_cidr)
            .instance_id(instance_id)
            .send()
            .await
            .map_err(|err| FailoverError::RouteCreationFailed {
                route_table_id: route_table_id.to_string(),
                message: sdk_message(err),
            })?;
        Ok(())
    }
}

/// Render the full error chain, including the service code and message
fn sdk_message<E>(err: SdkError<E>) -> String
where
    E: std::error::Error + 'static,
{
    DisplayErrorContext(err).to_string()
}

/// Collapse EC2 tags into a map, keeping keyed-but-valueless tags
///
/// Presence-only tags like the route table opt-in marker arrive with no
/// value; they survive here as empty strings so lookups by key still work.
fn tag_map(tags: &[Tag]) -> HashMap<String, String> {
    tags.iter()
        .filter_map(|tag| {
            let key = tag.key()?.to_string();
            let value = tag.value().unwrap_or_default().to_string();
            Some((key, value))
        })
        .collect()
}

fn instance_descriptor(instance: &Instance, instance_id: &str) -> InstanceDescriptor {
    InstanceDescriptor {
        instance_id: instance.instance_id().unwrap_or(instance_id).to_string(),
        tags: tag_map(instance.tags()),
        vpc_id: instance.vpc_id().map(str::to_string),
    }
}

fn route_table_descriptor(table: &RouteTable) -> Option<RouteTableDescriptor> {
    let route_table_id = table.route_table_id()?.to_string();
    Some(RouteTableDescriptor {
        route_table_id,
        tags: tag_map(table.tags()),
        vpc_id: table.vpc_id().map(str::to_string),
    })
}
