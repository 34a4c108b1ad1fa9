//! Safe SQL builder: identifiers from model metadata only, values as a single JSONB parameter.

mod builder;
pub use builder::*;
