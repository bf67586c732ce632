//! Product catalog: ingestion and the filter/sort engine.
//!
//! Products arrive from the API as [`RawProduct`] values with loosely typed
//! fields and several competing image fields. They are normalized once into
//! [`Product`] and from then on only [`filter_and_sort`] reshapes them.

pub mod filter;
pub mod images;
pub mod product;

pub use filter::{FilterState, SortMode, SortModeError, filter_and_sort};
pub use images::{ImageResolver, MAX_DISPLAY_IMAGES, RawImages};
pub use product::{DEFAULT_CATEGORY_LABEL, Product, RawProduct};
