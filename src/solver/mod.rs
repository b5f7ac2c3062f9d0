pub mod assignment;
pub mod heuristics;
pub mod inference;
pub mod propagation;
pub mod search;
pub mod stats;
pub mod store;
pub mod value;
pub mod work_list;
