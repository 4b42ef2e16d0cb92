//! Tap detection state machine
//!
//! Consumes classified key events in delivery order and yields at most one
//! [`TriggerDecision::Trigger`] per modifier press/release cycle. The
//! detector only observes; events always continue down the hook chain.

use tracing::{debug, trace};

use crate::hotkey::{KeyEvent, KeyTransition};

/// Outcome of feeding one key event to the detector
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerDecision {
    /// Nothing to do
    None,
    /// A clean modifier tap just completed
    Trigger,
}

/// Gesture tracking for the current hold of the modifier
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GestureState {
    /// Modifier is currently held
    pub modifier_down: bool,
    /// A non-modifier key was pressed during this hold
    pub interrupted: bool,
}

/// Pure transition from `(state, event)` to `(state', decision)`
pub fn step(state: GestureState, event: &KeyEvent) -> (GestureState, TriggerDecision) {
    match (event.transition, event.is_modifier) {
        (KeyTransition::Pressed, true) => {
            // Auto-repeat presses arrive while already down and must keep `interrupted`
            if state.modifier_down {
                (state, TriggerDecision::None)
            } else {
                let next = GestureState {
                    modifier_down: true,
                    interrupted: false,
                };
                (next, TriggerDecision::None)
            }
        }
        (KeyTransition::Pressed, false) => {
            let next = GestureState {
                interrupted: state.interrupted || state.modifier_down,
                ..state
            };
            (next, TriggerDecision::None)
        }
        (KeyTransition::Released, true) => {
            let decision = if state.modifier_down && !state.interrupted {
                TriggerDecision::Trigger
            } else {
                TriggerDecision::None
            };
            (GestureState::default(), decision)
        }
        (KeyTransition::Released, false) => (state, TriggerDecision::None),
    }
}

/// Owns the gesture state for one monitoring session
#[derive(Debug, Default)]
pub struct GestureDetector {
    state: GestureState,
}

impl GestureDetector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current state
    pub fn state(&self) -> GestureState {
        self.state
    }

    /// Feed one event and report whether it completed a clean tap
    pub fn handle(&mut self, event: &KeyEvent) -> TriggerDecision {
        let (next, decision) = step(self.state, event);

        if next.interrupted && !self.state.interrupted {
            trace!(vk_code = event.vk_code, "modifier hold interrupted");
        }
        if decision == TriggerDecision::Trigger {
            debug!(vk_code = event.vk_code, "clean modifier tap detected");
        }

        self.state = next;
        decision
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hotkey::vk;
    use crate::hotkey::ModifierKey;

    const ALT: ModifierKey = ModifierKey::Alt;

    fn press(vk_code: u32) -> KeyEvent {
        KeyEvent::pressed(vk_code, ALT)
    }

    fn release(vk_code: u32) -> KeyEvent {
        KeyEvent::released(vk_code, ALT)
    }

    fn run(events: &[KeyEvent]) -> (GestureDetector, Vec<TriggerDecision>) {
        let mut detector = GestureDetector::new();
        let decisions = events.iter().map(|e| detector.handle(e)).collect();
        (detector, decisions)
    }

    #[test]
    fn test_initial_state() {
        let detector = GestureDetector::new();
        assert_eq!(detector.state(), GestureState::default());
    }

    #[test]
    fn test_clean_tap_triggers() {
        let (detector, decisions) = run(&[press(vk::LMENU), release(vk::LMENU)]);
        assert_eq!(decisions, vec![TriggerDecision::None, TriggerDecision::Trigger]);
        assert_eq!(detector.state(), GestureState::default());
    }

    #[test]
    fn test_right_alt_behaves_like_left() {
        let (_, left) = run(&[press(vk::LMENU), release(vk::LMENU)]);
        let (_, right) = run(&[press(vk::RMENU), release(vk::RMENU)]);
        assert_eq!(left, right);
    }

    #[test]
    fn test_mixed_sides_still_one_logical_key() {
        let (_, decisions) = run(&[press(vk::LMENU), release(vk::RMENU)]);
        assert_eq!(decisions.last(), Some(&TriggerDecision::Trigger));
    }

    #[test]
    fn test_alt_tab_does_not_trigger() {
        let (detector, decisions) = run(&[
            press(vk::LMENU),
            press(vk::TAB),
            release(vk::TAB),
            release(vk::LMENU),
        ]);
        assert!(decisions.iter().all(|d| *d == TriggerDecision::None));
        assert_eq!(detector.state(), GestureState::default());
    }

    #[test]
    fn test_key_repeat_keeps_interruption() {
        let (_, decisions) = run(&[
            press(vk::LMENU),
            press(vk::TAB),
            press(vk::LMENU),
            release(vk::LMENU),
        ]);
        assert_eq!(decisions.last(), Some(&TriggerDecision::None));
    }

    #[test]
    fn test_key_repeat_alone_still_triggers() {
        let (_, decisions) = run(&[
            press(vk::LMENU),
            press(vk::LMENU),
            press(vk::LMENU),
            release(vk::LMENU),
        ]);
        assert_eq!(decisions.last(), Some(&TriggerDecision::Trigger));
    }

    #[test]
    fn test_release_without_press_is_harmless() {
        let mut detector = GestureDetector::new();
        assert_eq!(detector.handle(&release(vk::LMENU)), TriggerDecision::None);
        assert_eq!(detector.state(), GestureState::default());
        assert_eq!(detector.handle(&release(vk::LMENU)), TriggerDecision::None);
        assert_eq!(detector.state(), GestureState::default());
    }

    #[test]
    fn test_other_key_release_changes_nothing() {
        let mut detector = GestureDetector::new();
        detector.handle(&press(vk::LMENU));
        let before = detector.state();
        assert_eq!(detector.handle(&release(vk::TAB)), TriggerDecision::None);
        assert_eq!(detector.state(), before);
    }

    #[test]
    fn test_key_pressed_before_modifier_does_not_interrupt() {
        // Tab held first, then a clean Alt tap
        let (_, decisions) = run(&[press(vk::TAB), press(vk::LMENU), release(vk::LMENU)]);
        assert_eq!(decisions.last(), Some(&TriggerDecision::Trigger));
    }

    #[test]
    fn test_state_does_not_leak_across_cycles() {
        let (detector, decisions) = run(&[
            press(vk::LMENU),
            press(vk::TAB),
            release(vk::LMENU),
            press(vk::LMENU),
            release(vk::LMENU),
        ]);
        assert_eq!(decisions[2], TriggerDecision::None);
        assert_eq!(decisions[4], TriggerDecision::Trigger);
        assert_eq!(detector.state(), GestureState::default());
    }

    #[test]
    fn test_step_is_pure() {
        let state = GestureState {
            modifier_down: true,
            interrupted: false,
        };
        let event = release(vk::LMENU);
        assert_eq!(step(state, &event), step(state, &event));
        assert_eq!(step(state, &event), (GestureState::default(), TriggerDecision::Trigger));
    }

    #[test]
    fn test_control_as_modifier() {
        let mut detector = GestureDetector::new();
        let ctrl = ModifierKey::Control;
        detector.handle(&KeyEvent::pressed(vk::LCONTROL, ctrl));
        // Alt is an ordinary key when Control is the modifier
        detector.handle(&KeyEvent::pressed(vk::LMENU, ctrl));
        assert_eq!(
            detector.handle(&KeyEvent::released(vk::LCONTROL, ctrl)),
            TriggerDecision::None
        );
    }
}
