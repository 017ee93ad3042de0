//! Application-level messages.
//!
//! Screens and the participate dialog emit these; the app loop applies
//! them. Submissions finish on a background task and report back through
//! the same channel.

use crate::participate::SubmitOutcome;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppMessage {
    // === Lifecycle ===
    /// Periodic tick for animations and toast expiry
    Tick,
    /// Render the UI
    Render,
    /// Terminal resized
    Resize(u16, u16),
    /// Suspend the application (Ctrl+Z)
    Suspend,
    /// Quit the application
    Quit,

    // === Navigation ===
    /// Show the landing page
    ShowLanding,
    /// Show the winners leaderboard
    ShowWinners,

    // === Participation ===
    /// Open the participate modal
    OpenParticipate,
    /// Run a submission of the current form
    Submit,
    /// A submission task finished
    SubmitFinished(SubmitOutcome),
}
