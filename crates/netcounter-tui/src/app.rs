//! Application state and logic

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{DateTime, Utc};
use netcounter_client::{CounterClient, CounterState, Operation, Status};
use tokio::sync::watch;

use crate::action::Action;

const EVENT_LOG_CAPACITY: usize = 100;

/// Event log entry
#[derive(Debug, Clone)]
pub struct EventLogEntry {
    pub timestamp: DateTime<Utc>,
    pub message: String,
    pub level: EventLevel,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// Application state
pub struct App {
    /// Counter client shared with in-flight operations
    client: Arc<CounterClient>,
    /// State updates published by the client
    updates: watch::Receiver<CounterState>,
    /// Increments and decrements spawned but not yet finished
    mutations: Arc<AtomicUsize>,
    /// Should quit
    should_quit: bool,
    /// Latest client state
    pub state: CounterState,
    /// Address being edited; handed to the client on every operation
    pub address_input: String,
    /// Address field has focus
    pub editing: bool,
    /// Event log
    pub event_log: VecDeque<EventLogEntry>,
    /// Show help popup
    pub show_help: bool,
    /// Tick counter for animations
    pub tick: u64,
}

impl App {
    /// Create a new application
    pub fn new(client: CounterClient) -> Self {
        let updates = client.subscribe();
        let state = client.snapshot();
        Self {
            address_input: state.address.clone(),
            editing: state.address.is_empty(),
            client: Arc::new(client),
            updates,
            mutations: Arc::new(AtomicUsize::new(0)),
            should_quit: false,
            state,
            event_log: VecDeque::with_capacity(EVENT_LOG_CAPACITY),
            show_help: false,
            tick: 0,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Pull the latest client state and log finished operations
    pub fn process_state_changes(&mut self) {
        if !self.updates.has_changed().unwrap_or(false) {
            return;
        }
        let next = self.updates.borrow_and_update().clone();

        if next.status != self.state.status {
            match &next.status {
                // Confirmation read of a pending increment or decrement
                Status::Updated if self.mutations.load(Ordering::Acquire) > 0 => {}
                Status::Updated | Status::Incremented | Status::Decremented => {
                    let value = next.value.as_ref().map_or("--", |v| v.as_str());
                    self.log_event(&format!("{}: {value}", next.status), EventLevel::Success);
                }
                Status::Error(message) => {
                    self.log_event(message, EventLevel::Error);
                }
                _ => {}
            }
        }

        self.state = next;
    }

    /// Log an event
    fn log_event(&mut self, message: &str, level: EventLevel) {
        let entry = EventLogEntry {
            timestamp: Utc::now(),
            message: message.to_string(),
            level,
        };
        self.event_log.push_front(entry);
        if self.event_log.len() > EVENT_LOG_CAPACITY {
            self.event_log.pop_back();
        }
    }

    /// Handle an action
    pub fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => {
                self.should_quit = true;
            }
            Action::Tick => {
                self.tick = self.tick.wrapping_add(1);
            }
            Action::Run(operation) => {
                self.spawn_operation(operation);
            }
            Action::Back => {
                if self.show_help {
                    self.show_help = false;
                } else if self.editing {
                    self.editing = false;
                    self.client.set_address(self.address_input.trim());
                }
            }
            Action::Help => {
                self.show_help = !self.show_help;
            }
            Action::EditAddress => {
                self.editing = true;
            }
            Action::AddressInput(c) => {
                if self.editing {
                    self.address_input.push(c);
                }
            }
            Action::AddressBackspace => {
                if self.editing {
                    self.address_input.pop();
                }
            }
            Action::ClearAddress => {
                self.address_input.clear();
            }
            Action::Render | Action::None => {}
        }
    }

    /// Start an operation without blocking the draw loop
    ///
    /// Overlapping operations are not prevented here; the client's overlap
    /// policy decides.
    fn spawn_operation(&mut self, operation: Operation) {
        let address = self.address_input.trim().to_string();
        if address.is_empty() {
            self.log_event("No device address set (press e)", EventLevel::Warning);
            self.editing = true;
            return;
        }

        self.log_event(&format!("{operation} {address}"), EventLevel::Info);
        let client = Arc::clone(&self.client);
        let mutations = (operation != Operation::Refresh).then(|| {
            self.mutations.fetch_add(1, Ordering::AcqRel);
            Arc::clone(&self.mutations)
        });
        tokio::spawn(async move {
            // Outcome is published through the state channel
            if let Err(e) = client.run(operation, &address).await {
                tracing::debug!(error = %e, "{operation} failed");
            }
            if let Some(mutations) = mutations {
                mutations.fetch_sub(1, Ordering::AcqRel);
            }
        });
    }

    /// Whether an operation is currently running
    pub fn busy(&self) -> bool {
        self.client.in_flight() > 0
    }
}
