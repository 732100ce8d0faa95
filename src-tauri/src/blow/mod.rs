mod level;
mod monitor;

// Public exports
pub use level::BLOW_RMS_THRESHOLD;
pub use monitor::{BlowMonitor, BlowSession, MonitorError};
