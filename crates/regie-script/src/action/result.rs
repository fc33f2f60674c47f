use regie_core::ActionListId;
use serde::{Deserialize, Serialize};

use crate::context::ScriptContext;
use crate::flow::Flow;

/// Authoring-level choice of what happens after an action.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultAction {
    /// Go on to the next action.
    #[default]
    Continue,
    /// End the list.
    Stop,
    /// Go to the action at this index.
    Skip(usize),
    /// Start another list and end this one.
    RunCutscene(Option<ActionListId>),
}

impl ResultAction {
    /// Turn the authoring choice into a flow result, starting the linked list if any.
    ///
    /// A linked list that starts immediately claims the game state itself, so
    /// this list hands off without restoring it. A linked list with a start
    /// delay waits for normal gameplay, so this list must end normally.
    ///
    /// `Skip(0)` reads as "advance", the same as `Continue`.
    pub fn resolve(&self, ctx: &mut ScriptContext<'_>) -> Flow {
        match *self {
            Self::Continue => Flow::Continue,
            Self::Stop => Flow::STOP,
            Self::Skip(0) => Flow::Continue,
            Self::Skip(index) => Flow::Jump(index),
            Self::RunCutscene(Some(list)) => match ctx.trigger_time(list) {
                Some(delay) => {
                    ctx.interact(list);
                    if delay > 0.0 { Flow::STOP } else { Flow::HAND_OFF }
                }
                None => {
                    tracing::warn!("cannot run cutscene {list}: no such list");
                    Flow::Continue
                }
            },
            Self::RunCutscene(None) => {
                tracing::warn!("no cutscene linked to run");
                Flow::Continue
            }
        }
    }

    /// The index this result jumps to, if any.
    pub fn skip_target(&self) -> Option<usize> {
        match self {
            Self::Skip(index) => Some(*index),
            _ => None,
        }
    }

    /// The list this result starts, if any.
    pub fn linked_list(&self) -> Option<ActionListId> {
        match self {
            Self::RunCutscene(list) => *list,
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::testing::TestBed;
    use regie_core::WorldState;

    #[test]
    fn deserializes_from_json() {
        let r: ResultAction = serde_json::from_str(r#""stop""#).unwrap();
        assert_eq!(r, ResultAction::Stop);
        let r: ResultAction = serde_json::from_str(r#"{"skip": 0}"#).unwrap();
        assert_eq!(r, ResultAction::Skip(0));
        let r: ResultAction = serde_json::from_str(r#"{"run_cutscene": 2}"#).unwrap();
        assert_eq!(r.linked_list(), Some(ActionListId(2)));
    }

    #[test]
    fn accessors() {
        assert_eq!(ResultAction::Skip(3).skip_target(), Some(3));
        assert_eq!(ResultAction::Continue.skip_target(), None);
        assert_eq!(ResultAction::RunCutscene(None).linked_list(), None);
    }

    #[test]
    fn skip_zero_resolves_to_continue() {
        let mut bed = TestBed::new(WorldState::default());
        assert_eq!(ResultAction::Skip(0).resolve(&mut bed.ctx()), Flow::Continue);
        assert_eq!(ResultAction::Skip(2).resolve(&mut bed.ctx()), Flow::Jump(2));
        assert_eq!(ResultAction::Stop.resolve(&mut bed.ctx()), Flow::STOP);
    }
}
