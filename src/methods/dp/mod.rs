//! Dormand-Prince Runge Kutta methods

mod dopri5;

pub use dopri5::{contdp5, dopri5};
pub(crate) use dopri5::resolve_settings;
