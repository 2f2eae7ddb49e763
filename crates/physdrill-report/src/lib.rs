//! physdrill-report: Worksheet and answer-key rendering.

pub mod html;
pub mod markdown;
