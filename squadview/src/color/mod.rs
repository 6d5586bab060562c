//! Luminance-based light/dark classification and lighter/darker variants of
//! hex colors.
//!
//! All operations are fail-soft: bad input yields a safe default and a
//! diagnostic, never an error at the call site.

mod parse;

use std::sync::Arc;

pub use parse::{parse_color, parse_hex6, to_hex, Rgb};

use crate::config::ColorConfig;
use crate::diagnostics::{Diagnostic, Diagnostics};
use crate::error::ColorError;

const SOURCE: &str = "color";

/// Two stops of a background gradient built from a single base color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gradient {
    pub from: String,
    pub to: String,
}

/// Color helpers for templates.
pub struct ColorClassifier {
    config: ColorConfig,
    diagnostics: Arc<dyn Diagnostics>,
}

impl ColorClassifier {
    pub fn new(config: ColorConfig, diagnostics: Arc<dyn Diagnostics>) -> Self {
        Self {
            config,
            diagnostics,
        }
    }

    pub fn config(&self) -> &ColorConfig {
        &self.config
    }

    /// Weighted brightness in `0.0..=1.0` (Rec. 601 luma on the encoded
    /// channels). The weighted sum is exact in integers, so a color sitting
    /// on the threshold compares equal to it.
    pub fn luminance(rgb: Rgb) -> f64 {
        let weighted =
            299 * u32::from(rgb.red) + 587 * u32::from(rgb.green) + 114 * u32::from(rgb.blue);
        f64::from(weighted) / 255_000.0
    }

    /// Whether `color` is light enough to need dark text on top of it.
    /// Unparseable input counts as not light.
    pub fn is_light(&self, color: &str) -> bool {
        match parse_color(color) {
            Ok(rgb) => Self::luminance(rgb) > self.config.light_threshold,
            Err(err) => {
                self.report(&err);
                false
            }
        }
    }

    /// Add the configured shift to every channel, saturating at 255.
    /// Returns `hex_color` unchanged if it is not a 6-digit hex color.
    pub fn lighten(&self, hex_color: &str) -> String {
        self.shift(hex_color, |channel, amount| channel.saturating_add(amount))
    }

    /// Subtract the configured shift from every channel, saturating at 0.
    /// Returns `hex_color` unchanged if it is not a 6-digit hex color.
    pub fn darken(&self, hex_color: &str) -> String {
        self.shift(hex_color, |channel, amount| channel.saturating_sub(amount))
    }

    /// Gradient for a badge background: dark colors fade to a lighter
    /// variant, light colors to a darker one.
    pub fn gradient(&self, color: &str) -> Option<Gradient> {
        let rgb = parse_color(color).map_err(|err| self.report(&err)).ok()?;
        let from = to_hex(rgb);
        let to = if Self::luminance(rgb) > self.config.light_threshold {
            self.darken(&from)
        } else {
            self.lighten(&from)
        };
        Some(Gradient { from, to })
    }

    fn shift(&self, hex_color: &str, op: impl Fn(u8, u8) -> u8) -> String {
        match parse_hex6(hex_color) {
            Ok(rgb) => {
                let amount = self.config.shift;
                to_hex(Rgb::new(
                    op(rgb.red, amount),
                    op(rgb.green, amount),
                    op(rgb.blue, amount),
                ))
            }
            Err(err) => {
                self.report(&err);
                hex_color.to_string()
            }
        }
    }

    fn report(&self, err: &ColorError) {
        let diagnostic = match err {
            ColorError::Empty => Diagnostic::warning(SOURCE, err.to_string()),
            _ => Diagnostic::error(SOURCE, err.to_string()),
        };
        self.diagnostics.report(diagnostic);
    }
}

impl std::fmt::Debug for ColorClassifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColorClassifier")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
