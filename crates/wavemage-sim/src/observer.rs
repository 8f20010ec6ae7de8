//! Event observers. Listeners receive every event after the tick that
//! produced it; the simulation never depends on their types.

use wavemage_core::events::GameEvent;

pub trait GameEventListener: Send {
    fn on_event(&mut self, event: &GameEvent);
}

impl<F> GameEventListener for F
where
    F: FnMut(&GameEvent) + Send,
{
    fn on_event(&mut self, event: &GameEvent) {
        self(event)
    }
}
