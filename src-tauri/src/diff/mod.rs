pub mod compare;
pub mod merge;

pub use compare::{compare_devices, summarize};
pub use merge::merge_devices;
