//! Host parameter boundary.
//!
//! The engine only consumes plain nested maps. Hosts whose frameworks carry
//! their own parameter types implement [`ToPlainMap`] once, and
//! [`Flexer::flex_params`](crate::Flexer::flex_params) does the conversion
//! before validation.
//!
//! [`FormParams`] is a ready-made adapter for bracketed form fields, the shape
//! browsers submit for nested forms:
//!
//! ```text
//! user[name]=Nate
//! user[posts_attributes][0][title]=Hello
//! user[posts_attributes][1][title]=World
//! user[tags][]=rust
//! ```
//!
//! # Example Flow
//!
//! ```
//! use strong_arm::params::FormParams;
//! use strong_arm::{Flexer, Schema, SchemaRegistry};
//!
//! let registry = SchemaRegistry::new()
//!     .with(Schema::builder("User").permit("name")?.many_nested("posts").build())
//!     .with(Schema::builder("Post").permit("title")?.build());
//!
//! let params: FormParams = [
//!     ("name", "Nate"),
//!     ("posts_attributes[0][title]", "Hello"),
//!     ("posts_attributes[1][title]", "World"),
//! ]
//! .into_iter()
//! .collect();
//!
//! let user = registry.resolve_schema("User")?;
//! let cleaned = Flexer::new(&registry).flex_params(user, &params)?;
//! assert_eq!(cleaned["posts_attributes"][1]["title"], "World");
//! # Ok::<(), strong_arm::Error>(())
//! ```

mod extract;
mod form;

pub use extract::ToPlainMap;
pub use form::FormParams;
