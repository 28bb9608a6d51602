//! # Engine Configuration
//!
//! Process-wide, immutable configuration injected at startup. The engine has
//! exactly one genuine configuration point: the static-head convention for
//! horizontal vessels.
//!
//! Two divergent conventions exist in industry practice for the liquid
//! static head of a horizontal vessel: treat it as zero (head acts along the
//! axis, negligible at the shell crown), or compute it from the full liquid
//! bore (`SG x 62.4 x ID / 144`, worst case). Neither is silently assumed
//! here: the caller selects one, and every affected result carries a warning
//! naming the convention applied so the choice stays visible for
//! domain-expert review.

use serde::{Deserialize, Serialize};

/// Static-head convention for horizontal vessels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HorizontalStaticHead {
    /// No static-head term is added for horizontal vessels.
    #[default]
    Zero,
    /// Static head from a full liquid bore: `SG x 62.4 x ID_in / 144`.
    FullBore,
}

impl HorizontalStaticHead {
    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            HorizontalStaticHead::Zero => "zero static head",
            HorizontalStaticHead::FullBore => "full-bore static head",
        }
    }
}

impl std::fmt::Display for HorizontalStaticHead {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Engine configuration.
///
/// Construct once at service startup and share by reference; the engine
/// never mutates it.
///
/// # Example
///
/// ```rust
/// use vessel_core::config::{EngineConfig, HorizontalStaticHead};
///
/// let config = EngineConfig {
///     horizontal_static_head: HorizontalStaticHead::FullBore,
/// };
/// assert_ne!(config, EngineConfig::default());
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Static-head convention for horizontal vessels
    #[serde(default)]
    pub horizontal_static_head: HorizontalStaticHead,
}
