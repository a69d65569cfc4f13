//! Transform module: scalable recipes and the catalog that holds them.
//!
//! Depends on `state`. Does not import from `proof`.

pub mod catalog;
pub mod template;
