//! # nrl-core
//!
//! Core models shared by the nrl crates: the [`Region`](models::Region) of a single
//! aligned fragment and the [`RegionSet`](models::RegionSet) read from a bed file.
//!
//! ```no_run
//! use nrl_core::models::RegionSet;
//!
//! let fragments = RegionSet::try_from("demo/wt.bed").unwrap();
//! let lengths = fragments.region_widths();
//! ```
pub mod errors;
pub mod models;
pub mod utils;

pub use errors::RegionSetError;
