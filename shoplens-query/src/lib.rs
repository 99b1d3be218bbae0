//! SHOPLENS Query - Planning, Generation, Validation
//!
//! Derives a data-retrieval [`Plan`](shoplens_core::Plan) from a classified
//! intent via static lookup tables, renders the plan into deterministic
//! StoreQL text, and statically validates query text before execution.
//!
//! Pipeline position:
//!
//! ```text
//! Intent → plan_for → Plan → generate_query → StoreQL → validate_query
//! ```
//!
//! No grammar or parser lives here: validation is a set of static checks
//! whose rejections are user-correctable, not faults.

pub mod generator;
pub mod planner;
pub mod validator;

pub use generator::generate_query;
pub use planner::plan_for;
pub use validator::validate_query;
