//! UI actions
//!
//! Actions produced by the App state machine for the runtime to execute.

/// Actions produced by the App state machine.
///
/// Controller operations are synchronous, so the App performs them itself;
/// only terminal-side effects are left to the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppAction {
    /// Render the UI.
    Render,

    /// Quit the application.
    Quit,
}
