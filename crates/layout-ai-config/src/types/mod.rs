//! Layout data model shared by every layout-ai crate.
//!
//! A generated level is a [`LayoutData`]: game type and theme metadata plus
//! an ordered list of placed [`LayoutObject`]s. Object ids are keys into a
//! [`Catalog`], and grid-shaped worlds are described by a [`GridSpec`].

pub mod catalog;
pub mod grid;
pub mod layout;

pub use catalog::{Catalog, CatalogEntry};
pub use grid::{Cell, GridSpec, OriginMode};
pub use layout::{LayoutData, LayoutObject, Vec3, DEFAULT_SCHEMA_VERSION};
