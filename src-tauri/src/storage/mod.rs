pub mod sample;
pub mod session;
pub mod store;

pub use sample::sample_devices;
pub use session::{CheckerSession, DataSource, DataSourceStatus};
pub use store::DeviceStore;
