//! Errors returned by the validated loaders

use thiserror::Error;

/// A packed group element handed to a validated loader was not normalized
///
/// The unchecked `load_normalized` constructors accept the same data
/// without complaint and silently produce a distorted motion.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum NormalizationError {
    /// `r r̃` (or the scalar part of `m m̃`) differs from 1
    #[error("squared norm deviates from 1 by {deviation}")]
    Norm { deviation: f32 },

    /// The pseudoscalar part of `m m̃` is not zero,
    /// so the motor's translation is inconsistent with its rotation
    #[error("motor pseudoscalar constraint violated by {deviation}")]
    Screw { deviation: f32 },

    /// A coordinate was NaN or infinite
    #[error("coordinate {lane} is not finite")]
    NotFinite { lane: usize },
}
