use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl $name {
            /// Return the raw numeric value.
            pub fn get(self) -> u32 {
                self.0
            }

            /// Return the value as an index into an arena.
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl From<u32> for $name {
            fn from(raw: u32) -> Self {
                Self(raw)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "#{}"), self.0)
            }
        }
    };
}

define_id!(
    /// Identifier of a project-wide variable.
    VariableId,
    "var"
);
define_id!(
    /// Identifier of an inventory item.
    ItemId,
    "item"
);
define_id!(
    /// Number of a scene in the build order.
    SceneId,
    "scene"
);
define_id!(
    /// Identifier of an action list registered with a director.
    ActionListId,
    "list"
);
define_id!(
    /// Identifier of a conversation registered with a director.
    ConversationId,
    "conversation"
);
