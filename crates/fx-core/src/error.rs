use thiserror::Error;

/// Configuration problems detected when an engine is created.
///
/// Per-frame operations never return errors; degenerate runtime inputs such
/// as a zero-sized viewport are clamped instead.
#[derive(Debug, Error, PartialEq)]
pub enum FxError {
    #[error("{what} must contain at least one point")]
    EmptyCloud { what: &'static str },
    #[error("{what} must be finite and positive, got {value}")]
    NonPositive { what: &'static str, value: f32 },
    #[error("{what} must lie in [0, 1], got {value}")]
    OutOfUnitRange { what: &'static str, value: f32 },
    #[error("at least one shape definition is required")]
    NoShapes,
    #[error("shape {index} has {actual} points, expected {expected}")]
    ShapeSizeMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },
    #[error("globe needs at least one marker (the hub)")]
    NoMarkers,
    #[error("card layout invalid: {cards} cards grouped by {group}")]
    CardLayout { cards: usize, group: usize },
    #[error("card layout needs {needed} shapes, only {available} defined")]
    TooFewShapes { needed: usize, available: usize },
    #[error("{what} must be finite, got {value}")]
    NonFinite { what: &'static str, value: f32 },
}

pub type FxResult<T> = Result<T, FxError>;

pub(crate) fn ensure_positive(what: &'static str, value: f32) -> FxResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(FxError::NonPositive { what, value })
    }
}

pub(crate) fn ensure_unit(what: &'static str, value: f32) -> FxResult<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(FxError::OutOfUnitRange { what, value })
    }
}

pub(crate) fn ensure_finite(what: &'static str, value: f32) -> FxResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(FxError::NonFinite { what, value })
    }
}

pub(crate) fn ensure_points(what: &'static str, count: usize) -> FxResult<()> {
    if count == 0 {
        Err(FxError::EmptyCloud { what })
    } else {
        Ok(())
    }
}
