//! AWS EC2 network provider for the NAT failover reactor
//!
//! This crate implements the NetworkProvider trait against the EC2
//! control plane, covering instance lookup, the source/destination
//! check attribute, and VPC route table mutations.
//!
//! # Requirements
//!
//! - Credentials and region come from the ambient environment (Lambda
//!   execution role, env vars, or shared config)
//! - The caller needs `ec2:DescribeInstances`, `ec2:DescribeRouteTables`,
//!   `ec2:ModifyInstanceAttribute`, `ec2:DeleteRoute` and `ec2:CreateRoute`
//!
//! # Example
//!
//! ```ignore
//! use natfailover_core::NatFailoverReactor;
//! use natfailover_ec2::Ec2NetworkProvider;
//!
//! let provider = Ec2NetworkProvider::from_env().await;
//! let reactor = NatFailoverReactor::new(provider);
//! ```

pub mod provider;

pub use provider::Ec2NetworkProvider;
