//! Declarative schema metadata for message types.

mod descriptor;

pub use descriptor::{Attributes, SchemaDeclarations, SchemaDescriptor};
