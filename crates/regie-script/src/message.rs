//! Messages scripts send to lists, conversations, and scene objects.

use std::collections::BTreeMap;
use std::fmt;

use regie_core::{ActionListId, ConversationId, WorldState};
use serde::{Deserialize, Serialize};

/// Who receives a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Target {
    /// The list running the message action.
    Own,
    /// Another action list.
    List(ActionListId),
    /// A conversation.
    Conversation(ConversationId),
    /// A named object in the scene, handled by the stage.
    Object(String),
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Own => write!(f, "own list"),
            Self::List(id) => write!(f, "{id}"),
            Self::Conversation(id) => write!(f, "{id}"),
            Self::Object(name) => write!(f, "object '{name}'"),
        }
    }
}

/// What the receiver is asked to do.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Message {
    /// Enable the receiver.
    TurnOn,
    /// Disable the receiver.
    TurnOff,
    /// Start the receiver.
    Interact,
    /// Stop the receiver.
    Kill,
    /// A named message for a registered handler.
    Custom {
        /// Handler name.
        name: String,
        /// Optional integer argument.
        #[serde(default)]
        value: Option<i32>,
    },
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TurnOn => write!(f, "turn on"),
            Self::TurnOff => write!(f, "turn off"),
            Self::Interact => write!(f, "interact"),
            Self::Kill => write!(f, "kill"),
            Self::Custom { name, value: None } => write!(f, "{name}"),
            Self::Custom {
                name,
                value: Some(v),
            } => write!(f, "{name}({v})"),
        }
    }
}

/// Host callback for a custom message.
pub type MessageHandler = Box<dyn FnMut(&mut WorldState, &Target, Option<i32>)>;

/// Named handlers for custom messages sent to lists and conversations.
#[derive(Default)]
pub struct HandlerRegistry {
    handlers: BTreeMap<String, MessageHandler>,
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("handlers", &self.handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl HandlerRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler, replacing any previous one with the same name.
    pub fn register<F>(&mut self, name: impl Into<String>, handler: F)
    where
        F: FnMut(&mut WorldState, &Target, Option<i32>) + 'static,
    {
        self.handlers.insert(name.into(), Box::new(handler));
    }

    /// Whether a handler is registered under this name.
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Call a handler. Returns `false` when none is registered.
    pub fn dispatch(
        &mut self,
        name: &str,
        world: &mut WorldState,
        target: &Target,
        value: Option<i32>,
    ) -> bool {
        match self.handlers.get_mut(name) {
            Some(handler) => {
                handler(world, target, value);
                true
            }
            None => false,
        }
    }

    /// Registered handler names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use regie_core::{Variable, VariableId, Variables};

    #[test]
    fn messages_deserialize() {
        let msg: Message = serde_json::from_str(r#""interact""#).unwrap();
        assert_eq!(msg, Message::Interact);
        let msg: Message = serde_json::from_str(r#"{"custom": {"name": "ring"}}"#).unwrap();
        assert_eq!(
            msg,
            Message::Custom {
                name: "ring".into(),
                value: None
            }
        );
        let target: Target = serde_json::from_str(r#"{"list": 3}"#).unwrap();
        assert_eq!(target, Target::List(ActionListId(3)));
    }

    #[test]
    fn display_reads_naturally() {
        assert_eq!(Target::Object("door".into()).to_string(), "object 'door'");
        let msg = Message::Custom {
            name: "ring".into(),
            value: Some(2),
        };
        assert_eq!(msg.to_string(), "ring(2)");
    }

    #[test]
    fn registry_dispatches_by_name() {
        let mut registry = HandlerRegistry::new();
        registry.register("add", |world: &mut WorldState, _: &Target, value| {
            let _ = world
                .variables
                .set_value(VariableId(0), value.unwrap_or(1), true);
        });
        let mut world = WorldState::new()
            .with_variables(Variables::new().with(Variable::integer(VariableId(0), "n")));

        assert!(registry.dispatch("add", &mut world, &Target::Own, Some(4)));
        assert!(!registry.dispatch("missing", &mut world, &Target::Own, None));
        assert_eq!(world.variables.value(VariableId(0)), Some(4));
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["add"]);
    }
}
