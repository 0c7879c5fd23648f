//! Explicit figure descriptions.
//!
//! Everything a chart needs besides its data lives here, so rendering has no
//! hidden global state.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Size, title, and axes of a figure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FigureConfig {
    pub title: String,
    /// Window size in logical points, `[width, height]`.
    pub size: [f32; 2],
    pub x_axis: AxisConfig,
    pub y_axis: AxisConfig,
    /// Optional second x axis drawn along the top edge.
    pub secondary_x: Option<SecondaryAxis>,
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            size: [600.0, 400.0],
            x_axis: AxisConfig::default(),
            y_axis: AxisConfig::default(),
            secondary_x: None,
        }
    }
}

impl FigureConfig {
    /// Checks the size, axis limits, and tick positions.
    ///
    /// # Errors
    ///
    /// Returns [`FigureError`] describing the first problem found.
    pub fn validate(&self) -> Result<(), FigureError> {
        let [width, height] = self.size;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(FigureError::InvalidSize { width, height });
        }

        self.x_axis.validate("x")?;
        self.y_axis.validate("y")?;

        if let Some(secondary) = &self.secondary_x {
            if let Some(tick) = secondary.ticks.iter().find(|t| !t.position.is_finite()) {
                return Err(FigureError::NonFiniteTick {
                    text: tick.text.clone(),
                });
            }
        }

        Ok(())
    }
}

/// A labelled axis with optional fixed limits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AxisConfig {
    pub label: String,
    /// `[min, max]` shown on the axis; `None` fits the data.
    pub limits: Option<[f64; 2]>,
}

impl AxisConfig {
    #[must_use]
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            limits: None,
        }
    }

    #[must_use]
    pub fn with_limits(mut self, min: f64, max: f64) -> Self {
        self.limits = Some([min, max]);
        self
    }

    fn validate(&self, axis: &'static str) -> Result<(), FigureError> {
        match self.limits {
            Some([min, max]) if !(min.is_finite() && max.is_finite() && min < max) => {
                Err(FigureError::InvalidLimits { axis, min, max })
            }
            _ => Ok(()),
        }
    }
}

/// A secondary axis whose ticks sit at arbitrary primary-axis positions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SecondaryAxis {
    pub label: String,
    pub ticks: Vec<TickLabel>,
}

impl SecondaryAxis {
    #[must_use]
    pub fn new(label: impl Into<String>, ticks: Vec<TickLabel>) -> Self {
        Self {
            label: label.into(),
            ticks,
        }
    }
}

/// One labelled tick on a [`SecondaryAxis`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickLabel {
    /// Position in primary-axis units.
    pub position: f64,
    pub text: String,
}

impl TickLabel {
    #[must_use]
    pub fn new(position: f64, text: impl Into<String>) -> Self {
        Self {
            position,
            text: text.into(),
        }
    }
}

/// Errors from [`FigureConfig::validate`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FigureError {
    #[error("figure size must be positive, got {width} x {height}")]
    InvalidSize { width: f32, height: f32 },

    #[error("{axis} axis limits [{min}, {max}] must be finite and increasing")]
    InvalidLimits {
        axis: &'static str,
        min: f64,
        max: f64,
    },

    #[error("tick {text:?} has a non-finite position")]
    NonFiniteTick { text: String },
}
