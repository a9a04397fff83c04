//! NAT failover core
//!
//! This crate decides and applies the routing change that follows a
//! failover-capable NAT instance coming up: classify the instance by its
//! `Name` tag, disable its source/destination check, and repoint the default
//! route (0.0.0.0/0) of every opted-in route table in the instance's VPC at
//! the new instance.
//!
//! The cloud control plane is reached through the [`NetworkProvider`] trait.
//! `natfailover-ec2` implements it on top of aws-sdk-ec2; tests drive the
//! workflow with an in-memory fake. Nothing is cached between invocations,
//! every view is fetched fresh and discarded.
//!
//! # Example
//!
//! ```ignore
//! use natfailover_core::{NatFailoverReactor, ReactorConfig};
//!
//! let reactor = NatFailoverReactor::with_config(provider, ReactorConfig::from_env());
//! let response = reactor.handle(&event).await?;
//! assert_eq!(response.status_code, 200);
//! ```

pub mod config;
pub mod error;
pub mod event;
pub mod provider;
pub mod reactor;

pub use config::{DEFAULT_ALLOW_TAG, DEFAULT_NAT_NAME_MARKER, ReactorConfig};
pub use error::{FailoverError, Result};
pub use event::{FailoverResponse, StateChangeDetail, StateChangeEvent};
pub use provider::{InstanceDescriptor, NetworkProvider, RouteTableDescriptor};
pub use reactor::{DEFAULT_ROUTE_CIDR, NatFailoverReactor};
