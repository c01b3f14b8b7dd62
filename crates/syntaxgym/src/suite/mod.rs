//! # Test Suites
//!
//! A [`Suite`] is a targeted syntactic evaluation experiment:
//! * [`Item`]s instantiate one template as several [`Condition`]s;
//! * each condition is an ordered list of [`Region`]s;
//! * predictions compare aggregated region values across conditions.
//!
//! A [`Sentence`] is the transient view of one condition used while
//! aligning model tokens with regions.

pub mod item;
pub mod region;
pub mod region_table;
pub mod sentence;
pub mod suite_document;

#[doc(inline)]
pub use item::{Condition, Item};
#[doc(inline)]
pub use region::Region;
#[doc(inline)]
pub use region_table::{RegionRow, write_region_table};
#[doc(inline)]
pub use sentence::Sentence;
#[doc(inline)]
pub use suite_document::{Suite, SuiteMeta};
