//! User actions for the TUI application

use netcounter_client::Operation;

/// Actions that can be performed in the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Quit the application
    Quit,
    /// Tick event for animations/timers
    Tick,
    /// Render the UI
    Render,
    /// Run a counter operation against the current address
    Run(Operation),
    /// Go back / close popup / leave address editing
    Back,
    /// Show help popup
    Help,
    /// Start editing the device address
    EditAddress,
    /// Type into the address field
    AddressInput(char),
    /// Backspace in the address field
    AddressBackspace,
    /// Clear the address field
    ClearAddress,
    /// No operation
    None,
}
