//! Declarative whitelisting and cleaning of nested request parameters.
//!
//! Each entity declares a [`Schema`]: which keys are permitted as plain
//! values, which of those are required, which keys hold nested entities
//! (singular or repeated) and which keys are silently ignored. Running input
//! through a schema with [`Flexer::flex`] either returns a cleaned map holding
//! only declared data, recursively cleaned for nested entities, or fails with
//! a typed [`Error`].
//!
//! # Core Types
//!
//! - [`SchemaBuilder`]: Declares handlers (`permit`, `one_nested`, `many_nested`, `ignore`)
//! - [`Schema`]: Immutable declared shape of one entity
//! - [`SchemaRegistry`]: Name to schema directory used to resolve nested entities
//! - [`Flexer`]: Runs schemas against input under a [`FlexConfig`]
//! - [`params::ToPlainMap`]: Boundary for host framework parameter types
//!
//! # Examples
//!
//! ```
//! use serde_json::json;
//! use strong_arm::{ErrorKind, Flexer, NestedOptions, PermitOptions, Schema, SchemaRegistry};
//!
//! let registry = SchemaRegistry::new()
//!     .with(
//!         Schema::builder("User")
//!             .ignore(["created_at", "updated_at"])
//!             .permit("id")?
//!             .permit_with("email", PermitOptions::required())?
//!             .permit("public")?
//!             .one_nested_with("tag", NestedOptions::unformatted())
//!             .build(),
//!     )
//!     .with(Schema::builder("Tag").permit("id")?.build());
//! registry.check_associations()?;
//!
//! let flexer = Flexer::new(&registry);
//!
//! let cleaned = flexer.flex_named(
//!     "User",
//!     &json!({
//!         "email": "nate@example.com",
//!         "public": false,
//!         "tag": {"data": {"id": 1}},
//!         "created_at": "2017-01-01",
//!     }),
//! )?;
//! assert_eq!(
//!     serde_json::Value::Object(cleaned),
//!     json!({"email": "nate@example.com", "public": false, "tag": {"id": 1}})
//! );
//!
//! let err = flexer.flex_named("User", &json!({"income": 150000})).unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::UnhandledKeys);
//! # Ok::<(), strong_arm::Error>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod config;
mod engine;
mod error;
mod handler;
mod logging;
pub mod params;
mod presence;
mod reconcile;
mod resolver;
mod schema;

pub use config::{FlexConfig, Strictness, DEFAULT_DATA_KEY, DEFAULT_MAX_DEPTH};
pub use engine::Flexer;
pub use error::{Error, ErrorKind};
pub use handler::{
    nested_attributes_key, Association, AttributeList, Handler, HandlerKind, NestedOptions,
    PermitOptions, NESTED_ATTRIBUTES_SUFFIX,
};
pub use logging::FlexLog;
pub use presence::is_absent;
pub use reconcile::unhandled_keys;
pub use resolver::{
    resolve_association, sub_schema_name, target_schema_name, SchemaDirectory, SchemaRegistry,
};
pub use schema::{Schema, SchemaBuilder};
