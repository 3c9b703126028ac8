//! Utility functions for rule implementations.

pub mod allowance;
pub mod casing;
pub mod jsonpath;
pub mod paths;

#[doc(inline)]
pub use casing::{classify, is_camel_case, is_kebab_segment, Case};
#[doc(inline)]
pub use paths::{is_http_method, template_variables};
