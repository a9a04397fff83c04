//! Shared test double and fixtures for the reactor tests

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use natfailover_core::{
    FailoverError, InstanceDescriptor, NetworkProvider, Result, RouteTableDescriptor,
    StateChangeDetail, StateChangeEvent,
};

/// Every provider call the reactor made, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    DescribeInstance(String),
    DisableSourceDestCheck(String),
    RouteTablesForVpc(String),
    DeleteRoute(String, String),
    CreateRoute(String, String, String),
}

#[derive(Default)]
struct SharedState {
    routes: Mutex<HashMap<(String, String), String>>,
    calls: Mutex<Vec<Call>>,
}

/// In-memory stand-in for the EC2 control plane
///
/// Routes live in shared state so a clone handed to the reactor and the
/// copy kept by the test observe the same mutations.
#[derive(Clone, Default)]
pub struct FakeNetwork {
    instances: HashMap<String, InstanceDescriptor>,
    route_tables: Vec<RouteTableDescriptor>,
    deny_route_deletion: bool,
    deny_route_creation: bool,
    shared: Arc<SharedState>,
}

impl FakeNetwork {
    pub fn with_instance(mut self, instance: InstanceDescriptor) -> Self {
        self.instances
            .insert(instance.instance_id.clone(), instance);
        self
    }

    pub fn with_route_table(mut self, table: RouteTableDescriptor) -> Self {
        self.route_tables.push(table);
        self
    }

    pub fn with_existing_route(
        self,
        route_table_id: &str,
        destination: &str,
        target: &str,
    ) -> Self {
        self.shared.routes.lock().unwrap().insert(
            (route_table_id.to_string(), destination.to_string()),
            target.to_string(),
        );
        self
    }

    /// Make every delete_route call fail with a non-missing-route error
    pub fn deny_route_deletion(mut self) -> Self {
        self.deny_route_deletion = true;
        self
    }

    /// Make every create_route call fail
    pub fn deny_route_creation(mut self) -> Self {
        self.deny_route_creation = true;
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.shared.calls.lock().unwrap().clone()
    }

    pub fn route_target(&self, route_table_id: &str, destination: &str) -> Option<String> {
        self.shared
            .routes
            .lock()
            .unwrap()
            .get(&(route_table_id.to_string(), destination.to_string()))
            .cloned()
    }

    fn record(&self, call: Call) {
        self.shared.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl NetworkProvider for FakeNetwork {
    async fn describe_instance(&self, instance_id: &str) -> Result<InstanceDescriptor> {
        self.record(Call::DescribeInstance(instance_id.to_string()));
        self.instances
            .get(instance_id)
            .cloned()
            .ok_or_else(|| FailoverError::InstanceNotFound(instance_id.to_string()))
    }

    async fn disable_source_dest_check(&self, instance_id: &str) -> Result<()> {
        self.record(Call::DisableSourceDestCheck(instance_id.to_string()));
        Ok(())
    }

    async fn route_tables_for_vpc(&self, vpc_id: &str) -> Result<Vec<RouteTableDescriptor>> {
        self.record(Call::RouteTablesForVpc(vpc_id.to_string()));
        Ok(self
            .route_tables
            .iter()
            .filter(|table| table.vpc_id.as_deref() == Some(vpc_id))
            .cloned()
            .collect())
    }

    async fn delete_route(&self, route_table_id: &str, destination_cidr: &str) -> Result<()> {
        self.record(Call::DeleteRoute(
            route_table_id.to_string(),
            destination_cidr.to_string(),
        ));
        if self.deny_route_deletion {
            return Err(FailoverError::RouteDeletionFailed {
                route_table_id: route_table_id.to_string(),
                message: "UnauthorizedOperation: not allowed".to_string(),
            });
        }
        let removed = self
            .shared
            .routes
            .lock()
            .unwrap()
            .remove(&(route_table_id.to_string(), destination_cidr.to_string()));
        match removed {
            Some(_) => Ok(()),
            None => Err(FailoverError::RouteNotFound {
                route_table_id: route_table_id.to_string(),
                destination: destination_cidr.to_string(),
            }),
        }
    }

    async fn create_route(
        &self,
        route_table_id: &str,
        destination_cidr: &str,
        instance_id: &str,
    ) -> Result<()> {
        self.record(Call::CreateRoute(
            route_table_id.to_string(),
            destination_cidr.to_string(),
            instance_id.to_string(),
        ));
        if self.deny_route_creation {
            return Err(FailoverError::RouteCreationFailed {
                route_table_id: route_table_id.to_string(),
                message: "RouteLimitExceeded: too many routes".to_string(),
            });
        }
        self.shared.routes.lock().unwrap().insert(
            (route_table_id.to_string(), destination_cidr.to_string()),
            instance_id.to_string(),
        );
        Ok(())
    }
}

pub fn tags(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .collect()
}

pub fn instance(instance_id: &str, name: &str, vpc_id: &str) -> InstanceDescriptor {
    InstanceDescriptor {
        instance_id: instance_id.to_string(),
        tags: tags(&[("Name", name)]),
        vpc_id: Some(vpc_id.to_string()),
    }
}

pub fn route_table(
    route_table_id: &str,
    vpc_id: &str,
    allow_updates: bool,
) -> RouteTableDescriptor {
    let table_tags = if allow_updates {
        tags(&[("AllowNatRouteUpdates", "")])
    } else {
        tags(&[("Name", "private-subnet-rt")])
    };
    RouteTableDescriptor {
        route_table_id: route_table_id.to_string(),
        tags: table_tags,
        vpc_id: Some(vpc_id.to_string()),
    }
}

pub fn event(instance_id: &str, state: &str) -> StateChangeEvent {
    StateChangeEvent {
        detail: StateChangeDetail {
            instance_id: instance_id.to_string(),
            state: state.to_string(),
        },
    }
}
