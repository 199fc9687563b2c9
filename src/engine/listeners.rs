//! Observer registry for engine notifications.
//!
//! Handlers run synchronously, in registration order, on the thread that
//! drives the engine.

use std::fmt;
use std::str::FromStr;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use super::state::{Direction, RotationState};

/// The four notifications an engine emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Start,
    Progress,
    Stop,
    ChangeDirection,
}

impl EventKind {
    pub const ALL: [EventKind; 4] = [
        EventKind::Start,
        EventKind::Progress,
        EventKind::Stop,
        EventKind::ChangeDirection,
    ];

    /// Wire name, e.g. `rotate.progress`.
    pub fn name(self) -> &'static str {
        match self {
            EventKind::Start => "rotate.start",
            EventKind::Progress => "rotate.progress",
            EventKind::Stop => "rotate.stop",
            EventKind::ChangeDirection => "rotate.changeDirection",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventKind::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| format!("unknown rotation event `{s}`"))
    }
}

/// A notification as delivered to handlers.
#[derive(Debug, Clone, Copy)]
pub enum RotateEvent<'a> {
    Start(&'a RotationState),
    Progress(&'a RotationState),
    Stop(&'a RotationState),
    /// Carries the new direction rather than the state.
    ChangeDirection(Direction),
}

impl RotateEvent<'_> {
    pub fn kind(&self) -> EventKind {
        match self {
            RotateEvent::Start(_) => EventKind::Start,
            RotateEvent::Progress(_) => EventKind::Progress,
            RotateEvent::Stop(_) => EventKind::Stop,
            RotateEvent::ChangeDirection(_) => EventKind::ChangeDirection,
        }
    }

    /// The state snapshot, for every kind except direction changes.
    pub fn state(&self) -> Option<&RotationState> {
        match *self {
            RotateEvent::Start(state) | RotateEvent::Progress(state) | RotateEvent::Stop(state) => {
                Some(state)
            }
            RotateEvent::ChangeDirection(_) => None,
        }
    }
}

pub type Handler = Box<dyn FnMut(&RotateEvent<'_>) + Send + Sync>;

/// Identifies one registration; pass it back to `off` to remove it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

#[derive(Default)]
pub struct Listeners {
    next_id: u64,
    handlers: FxHashMap<EventKind, SmallVec<[(ListenerId, Handler); 2]>>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on(&mut self, kind: EventKind, handler: Handler) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.handlers.entry(kind).or_default().push((id, handler));
        id
    }

    /// Remove the registration matching both `kind` and `id`.
    ///
    /// Returns whether anything was removed; unknown pairs are a no-op.
    pub fn off(&mut self, kind: EventKind, id: ListenerId) -> bool {
        let Some(list) = self.handlers.get_mut(&kind) else {
            return false;
        };
        let before = list.len();
        list.retain(|(listener, _)| *listener != id);
        before != list.len()
    }

    pub fn trigger(&mut self, event: &RotateEvent<'_>) {
        if let Some(list) = self.handlers.get_mut(&event.kind()) {
            for (_, handler) in list.iter_mut() {
                handler(event);
            }
        }
    }

    pub fn count(&self, kind: EventKind) -> usize {
        self.handlers.get(&kind).map_or(0, |list| list.len())
    }
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for kind in EventKind::ALL {
            map.entry(&kind.name(), &self.count(kind));
        }
        map.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn recorder(log: &Arc<Mutex<Vec<String>>>, tag: &'static str) -> Handler {
        let log = log.clone();
        Box::new(move |event: &RotateEvent<'_>| {
            log.lock().unwrap().push(format!("{tag}:{}", event.kind()));
        })
    }

    #[test]
    fn test_event_kind_names_round_trip() {
        for kind in EventKind::ALL {
            assert_eq!(kind.name().parse::<EventKind>().unwrap(), kind);
        }
        assert!("rotate.spin".parse::<EventKind>().is_err());
        assert_eq!(EventKind::ChangeDirection.to_string(), "rotate.changeDirection");
    }

    #[test]
    fn test_trigger_runs_matching_handlers_in_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut listeners = Listeners::new();
        listeners.on(EventKind::ChangeDirection, recorder(&log, "a"));
        listeners.on(EventKind::Stop, recorder(&log, "b"));
        listeners.on(EventKind::ChangeDirection, recorder(&log, "c"));

        listeners.trigger(&RotateEvent::ChangeDirection(Direction::CounterClockwise));

        assert_eq!(
            *log.lock().unwrap(),
            vec!["a:rotate.changeDirection", "c:rotate.changeDirection"]
        );
    }

    #[test]
    fn test_trigger_without_listeners_is_silent() {
        let mut listeners = Listeners::new();
        listeners.trigger(&RotateEvent::ChangeDirection(Direction::Clockwise));
        assert_eq!(listeners.count(EventKind::ChangeDirection), 0);
    }

    #[test]
    fn test_off_removes_only_exact_registration() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut listeners = Listeners::new();
        let a = listeners.on(EventKind::ChangeDirection, recorder(&log, "a"));
        listeners.on(EventKind::ChangeDirection, recorder(&log, "b"));

        // right id, wrong kind
        assert!(!listeners.off(EventKind::Start, a));
        assert!(listeners.off(EventKind::ChangeDirection, a));
        // already gone
        assert!(!listeners.off(EventKind::ChangeDirection, a));

        listeners.trigger(&RotateEvent::ChangeDirection(Direction::Clockwise));
        assert_eq!(*log.lock().unwrap(), vec!["b:rotate.changeDirection"]);
    }

    #[test]
    fn test_change_direction_carries_no_state() {
        let event = RotateEvent::ChangeDirection(Direction::Clockwise);
        assert!(event.state().is_none());
        assert_eq!(event.kind(), EventKind::ChangeDirection);
    }
}
