//! Value types shared by the planner and its callers.

mod value;

pub use value::Value;
