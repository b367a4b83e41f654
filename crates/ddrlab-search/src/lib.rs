//! Search engines built on top of the DDR5 power models:
//! inverse device parameter search and deployment configuration search.

pub mod deployment;
pub mod error;
pub mod inverse;
pub mod optimizer;
