//! Status codes for integrators

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Status {
    Success,
    UserInterrupt,
    NeedLargerNMax,
    StepSizeTooSmall,
    ProbablyStiff,
}
