pub mod daylight;
pub mod monitor;
pub mod notify;
pub mod sat;
pub mod visibility;
