//! One monitoring session: raw hook messages in, language requests out

use crate::gesture::{GestureDetector, TriggerDecision};
use crate::language::{Dispatcher, WindowSystem};

use super::keys::{KeyEvent, ModifierKey};

/// Detector and dispatcher for one installed hook
#[cfg_attr(not(windows), allow(dead_code))]
pub struct HookSession<S> {
    modifier: ModifierKey,
    detector: GestureDetector,
    dispatcher: Dispatcher<S>,
}

#[cfg_attr(not(windows), allow(dead_code))]
impl<S: WindowSystem> HookSession<S> {
    pub fn new(modifier: ModifierKey, system: S) -> Self {
        Self {
            modifier,
            detector: GestureDetector::new(),
            dispatcher: Dispatcher::new(system),
        }
    }

    /// Handle one hook message; dispatches on a clean modifier tap
    pub fn on_key(&mut self, message: u32, vk_code: u32) -> TriggerDecision {
        let Some(event) = KeyEvent::classify(message, vk_code, self.modifier) else {
            return TriggerDecision::None;
        };
        let decision = self.detector.handle(&event);
        if decision == TriggerDecision::Trigger {
            self.dispatcher.dispatch();
        }
        decision
    }
}
