//! Surface Events
//!
//! Events sent from UI surfaces to the companion. Surfaces report what the user
//! did; the companion decides what it means.

use serde::{Deserialize, Serialize};

/// Events from UI surface to companion
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfaceEvent {
    // ============================================
    // Connection Events
    // ============================================
    /// Surface is ready to render
    Connected {
        /// Surface type identifier
        surface_type: SurfaceType,
    },

    // ============================================
    // User Input Events
    // ============================================
    /// The ingredient text changed
    IngredientsEdited {
        /// Full current text of the input field
        text: String,
    },

    /// User pressed the generate button
    SubmitRequested,

    // ============================================
    // Interaction Events
    // ============================================
    /// User clicked the result panel
    ResultClicked,

    /// User dismissed the visible notification
    NotificationDismissed,

    // ============================================
    // Lifecycle Events
    // ============================================
    /// User requested quit
    QuitRequested,
}

/// Types of UI surfaces
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SurfaceType {
    /// Terminal UI
    #[default]
    Tui,
    /// Headless (testing/automation)
    Headless,
    /// Custom surface type
    Custom(String),
}

impl SurfaceType {
    /// Short name for logs
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Tui => "tui",
            Self::Headless => "headless",
            Self::Custom(name) => name,
        }
    }
}
