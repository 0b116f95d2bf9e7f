use serde::{Deserialize, Serialize};

use crate::core::{CategoryFilter, LanguageCode, PriceScaleMode};

/// User-driven chart state.
///
/// `focus_domain` changes only through the brush path, `scale_mode` only
/// through the mode setters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartState {
    pub scale_mode: PriceScaleMode,
    pub active_filter: CategoryFilter,
    pub focus_domain: (f64, f64),
    pub language: LanguageCode,
}
