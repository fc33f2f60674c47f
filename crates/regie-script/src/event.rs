use regie_core::{ActionListId, ConversationId, GameState, SceneId, VariableId};

use crate::flow::Flow;

/// What kind of script event occurred.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptEventKind {
    // Lists
    /// A list was invoked and claimed its execution.
    ListStarted {
        /// The list.
        list: ActionListId,
    },
    /// A list ran past its end or was halted by an action.
    ListEnded {
        /// The list.
        list: ActionListId,
        /// Whether it handed control back to the player.
        notify: bool,
    },
    /// A list was killed from outside.
    ListKilled {
        /// The list.
        list: ActionListId,
    },

    // Actions
    /// An action ran for the first time.
    ActionStarted {
        /// The owning list.
        list: ActionListId,
        /// Index of the action in the list.
        index: usize,
    },
    /// A waiting action was run again after its delay.
    ActionPolled {
        /// The owning list.
        list: ActionListId,
        /// Index of the action in the list.
        index: usize,
    },
    /// An action finished and chose the next step.
    ActionEnded {
        /// The owning list.
        list: ActionListId,
        /// Index of the action in the list.
        index: usize,
        /// The step it chose.
        flow: Flow,
    },

    // State
    /// The game state changed.
    GameStateChanged {
        /// Previous state.
        from: GameState,
        /// New state.
        to: GameState,
    },
    /// A variable was written by a script.
    VariableChanged {
        /// The variable.
        variable: VariableId,
        /// The stored value.
        value: i32,
    },
    /// The scene changed.
    SceneChanged {
        /// Scene left.
        from: SceneId,
        /// Scene entered.
        to: SceneId,
    },
    /// A list finished in control of the game state and asked for an autosave.
    AutosaveRequested {
        /// The list.
        list: ActionListId,
    },

    // Conversations
    /// A conversation published its options.
    ConversationOpened {
        /// The conversation.
        conversation: ConversationId,
    },
    /// A conversation stopped offering options.
    ConversationClosed {
        /// The conversation.
        conversation: ConversationId,
    },
    /// The player chose an option.
    OptionChosen {
        /// The conversation.
        conversation: ConversationId,
        /// Option index (not slot).
        option: usize,
    },
    /// A timed conversation ran out and picked its default option.
    ConversationTimedOut {
        /// The conversation.
        conversation: ConversationId,
        /// The default option index.
        option: usize,
    },

    // Messages
    /// A message action was delivered.
    MessageSent {
        /// The sending list.
        list: ActionListId,
        /// Human-readable target.
        target: String,
        /// Human-readable message.
        message: String,
    },

    // Custom
    /// A host-defined event.
    Custom {
        /// A label identifying the custom event type.
        label: String,
    },
}

impl ScriptEventKind {
    /// Check whether a given list is involved in this event.
    pub fn involves_list(&self, id: ActionListId) -> bool {
        match self {
            Self::ListStarted { list }
            | Self::ListEnded { list, .. }
            | Self::ListKilled { list }
            | Self::ActionStarted { list, .. }
            | Self::ActionPolled { list, .. }
            | Self::ActionEnded { list, .. }
            | Self::AutosaveRequested { list }
            | Self::MessageSent { list, .. } => *list == id,
            _ => false,
        }
    }

    /// Check whether a given conversation is involved in this event.
    pub fn involves_conversation(&self, id: ConversationId) -> bool {
        match self {
            Self::ConversationOpened { conversation }
            | Self::ConversationClosed { conversation }
            | Self::OptionChosen { conversation, .. }
            | Self::ConversationTimedOut { conversation, .. } => *conversation == id,
            _ => false,
        }
    }
}

/// A record of something that happened while scripts ran.
#[derive(Debug, Clone)]
pub struct ScriptEvent {
    /// The tick when this event occurred.
    pub tick: u64,
    /// Scaled seconds since start when this event occurred.
    pub time: f64,
    /// The specific kind of event that occurred.
    pub kind: ScriptEventKind,
    /// A human-readable description of the event.
    pub description: String,
}

impl ScriptEvent {
    /// Create a new event.
    pub fn new(tick: u64, time: f64, kind: ScriptEventKind, description: impl Into<String>) -> Self {
        Self {
            tick,
            time,
            kind,
            description: description.into(),
        }
    }
}

/// Accumulates events while a director runs.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<ScriptEvent>,
    max_events: usize,
}

impl EventLog {
    /// Create a new event log with the given maximum capacity (0 = unlimited).
    pub fn new(max_events: usize) -> Self {
        Self {
            events: Vec::new(),
            max_events,
        }
    }

    /// Append an event, dropping the oldest events if the log exceeds its capacity.
    pub fn push(&mut self, event: ScriptEvent) {
        self.events.push(event);
        if self.max_events > 0 && self.events.len() > self.max_events {
            let drain_count = self.events.len() - self.max_events;
            self.events.drain(..drain_count);
        }
    }

    /// Return a slice of all recorded events.
    pub fn events(&self) -> &[ScriptEvent] {
        &self.events
    }

    /// Return all events that occurred at the given tick.
    pub fn events_at_tick(&self, tick: u64) -> Vec<&ScriptEvent> {
        self.events.iter().filter(|e| e.tick == tick).collect()
    }

    /// Return all events involving the given list.
    pub fn events_for_list(&self, id: ActionListId) -> Vec<&ScriptEvent> {
        self.events
            .iter()
            .filter(|e| e.kind.involves_list(id))
            .collect()
    }

    /// Return all events involving the given conversation.
    pub fn events_for_conversation(&self, id: ConversationId) -> Vec<&ScriptEvent> {
        self.events
            .iter()
            .filter(|e| e.kind.involves_conversation(id))
            .collect()
    }

    /// Return the number of recorded events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Return `true` if no events have been recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Remove all recorded events.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started(tick: u64, list: u32) -> ScriptEvent {
        ScriptEvent::new(
            tick,
            0.0,
            ScriptEventKind::ListStarted {
                list: ActionListId(list),
            },
            "test",
        )
    }

    #[test]
    fn event_log_push_and_query() {
        let mut log = EventLog::new(0);
        log.push(started(1, 0));
        assert_eq!(log.len(), 1);
        assert_eq!(log.events_at_tick(1).len(), 1);
        assert_eq!(log.events_for_list(ActionListId(0)).len(), 1);
        assert!(log.events_for_list(ActionListId(1)).is_empty());
    }

    #[test]
    fn event_log_max_events_trims() {
        let mut log = EventLog::new(2);
        for i in 0..5 {
            log.push(started(i, 0));
        }
        assert_eq!(log.len(), 2);
        assert_eq!(log.events()[0].tick, 3);
        assert_eq!(log.events()[1].tick, 4);
    }

    #[test]
    fn kinds_know_their_subjects() {
        let kind = ScriptEventKind::ActionEnded {
            list: ActionListId(2),
            index: 0,
            flow: Flow::Continue,
        };
        assert!(kind.involves_list(ActionListId(2)));
        assert!(!kind.involves_conversation(ConversationId(2)));

        let kind = ScriptEventKind::OptionChosen {
            conversation: ConversationId(1),
            option: 3,
        };
        assert!(kind.involves_conversation(ConversationId(1)));
        assert!(!kind.involves_list(ActionListId(1)));

        let kind = ScriptEventKind::GameStateChanged {
            from: GameState::Normal,
            to: GameState::Cutscene,
        };
        assert!(!kind.involves_list(ActionListId(0)));
    }

    #[test]
    fn event_log_clear() {
        let mut log = EventLog::new(0);
        log.push(started(1, 0));
        assert!(!log.is_empty());
        log.clear();
        assert!(log.is_empty());
    }
}
