//! Event handling for terminal and application events

use std::time::Duration;

use crossterm::event::{self, Event as CrosstermEvent, KeyCode, KeyEvent, KeyModifiers};
use netcounter_client::Operation;
use tokio::sync::mpsc;

use crate::action::Action;

/// Terminal event types
#[derive(Debug, Clone)]
#[allow(dead_code)]
pub enum Event {
    /// Terminal key event
    Key(KeyEvent),
    /// Terminal resize
    Resize(u16, u16),
    /// Tick for animations
    Tick,
}

/// Event handler that polls for terminal events
pub struct EventHandler {
    /// Event sender
    sender: mpsc::UnboundedSender<Event>,
    /// Event receiver
    receiver: mpsc::UnboundedReceiver<Event>,
    /// Tick rate
    tick_rate: Duration,
}

impl EventHandler {
    /// Create a new event handler
    pub fn new(tick_rate: Duration) -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            sender,
            receiver,
            tick_rate,
        }
    }

    /// Start the event loop in a background task
    pub fn start(&self) {
        let sender = self.sender.clone();
        let tick_rate = self.tick_rate;

        tokio::task::spawn_blocking(move || {
            let mut last_tick = std::time::Instant::now();

            loop {
                let timeout = tick_rate
                    .checked_sub(last_tick.elapsed())
                    .unwrap_or(Duration::ZERO);

                if event::poll(timeout).unwrap_or(false) {
                    let forwarded = match event::read() {
                        Ok(CrosstermEvent::Key(key)) => sender.send(Event::Key(key)),
                        Ok(CrosstermEvent::Resize(w, h)) => sender.send(Event::Resize(w, h)),
                        _ => Ok(()),
                    };
                    if forwarded.is_err() {
                        break;
                    }
                }

                if last_tick.elapsed() >= tick_rate {
                    if sender.send(Event::Tick).is_err() {
                        break;
                    }
                    last_tick = std::time::Instant::now();
                }
            }
        });
    }

    /// Receive the next event
    pub async fn next(&mut self) -> Option<Event> {
        self.receiver.recv().await
    }
}

/// Convert a key event to an action
pub fn key_to_action(key: KeyEvent, editing: bool) -> Action {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Action::Quit;
    }

    if editing {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Tab => Action::Back,
            KeyCode::Backspace => Action::AddressBackspace,
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                Action::ClearAddress
            }
            KeyCode::Char(c) => Action::AddressInput(c),
            _ => Action::None,
        }
    } else {
        match key.code {
            KeyCode::Char('q') => Action::Quit,

            // Counter operations
            KeyCode::Char('r') | KeyCode::F(5) => Action::Run(Operation::Refresh),
            KeyCode::Char('+' | '=' | 'k') | KeyCode::Up => Action::Run(Operation::Increment),
            KeyCode::Char('-' | 'j') | KeyCode::Down => Action::Run(Operation::Decrement),

            // Address
            KeyCode::Char('e') | KeyCode::Tab => Action::EditAddress,

            KeyCode::Char('?') => Action::Help,
            KeyCode::Esc => Action::Back,

            _ => Action::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_operation_keys() {
        assert_eq!(
            key_to_action(key(KeyCode::Char('r')), false),
            Action::Run(Operation::Refresh)
        );
        assert_eq!(
            key_to_action(key(KeyCode::Char('+')), false),
            Action::Run(Operation::Increment)
        );
        assert_eq!(
            key_to_action(key(KeyCode::Down), false),
            Action::Run(Operation::Decrement)
        );
    }

    #[test]
    fn test_editing_captures_characters() {
        assert_eq!(
            key_to_action(key(KeyCode::Char('q')), true),
            Action::AddressInput('q')
        );
        assert_eq!(
            key_to_action(key(KeyCode::Char('-')), true),
            Action::AddressInput('-')
        );
        assert_eq!(key_to_action(key(KeyCode::Enter), true), Action::Back);
    }

    #[test]
    fn test_ctrl_c_always_quits() {
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(key_to_action(ctrl_c, true), Action::Quit);
        assert_eq!(key_to_action(ctrl_c, false), Action::Quit);
    }
}
