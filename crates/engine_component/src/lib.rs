//! # engine_component
//!
//! The "C" in ECS. Defines what a component is and how component types are
//! identified across the whole process.
//!
//! This crate provides:
//!
//! - [`Component`] trait: the contract all grouped data must satisfy.
//! - [`ComponentTypeId`]: a process-wide unique identifier per component type.
//! - [`Registry`]: lazily assigns and remembers type identifiers.
//! - [`RegistryConfig`]: sizing knobs for the registry's backing maps.
//! - [`Signature`]: the set of component types an entity carries.

pub mod component;
pub mod config;
pub mod registry;
pub mod signature;

pub use component::{Component, ComponentMeta, ComponentTypeId};
pub use config::RegistryConfig;
pub use registry::{Registry, identify};
pub use signature::Signature;
