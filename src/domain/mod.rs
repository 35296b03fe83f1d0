//! Domain Layer
//!
//! The aggregator's core: session entities and the rules that derive and
//! reorder them.
//!
//! ## Structure
//!
//! - `entities/` - Session data (FileInventory, DependencyRecord, RoleRule, SessionState)
//! - `value_objects/` - Immutable value types (Severity, Page, Platform, VersionConstraint)
//! - `services/` - Role resolution, dependency flattening, inventory materialization
//! - `ports/` - Descriptor builder, tree generator, preference and session stores
//!
//! ## Design Principles
//!
//! 1. **No I/O** - Storage and enumeration go through ports
//! 2. **Deterministic** - Same inputs always produce the same ordered output
//! 3. **Ports & Adapters** - Infrastructure supplies the implementations

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
