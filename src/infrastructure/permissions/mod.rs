//! Permission probe adapters

mod cpal_probe;

pub use cpal_probe::CpalPermissionProbe;
