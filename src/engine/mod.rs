//! The rotation engine.
//!
//! A [`RotationEngine`] turns pointer samples collected during a drag gesture
//! into a filtered angle, optionally quantized to fixed steps, with decaying
//! momentum after release. It is driven one frame at a time: the host either
//! calls [`RotationEngine::tick`] from its own frame loop or hands a
//! [`FrameScheduler`] to [`RotationEngine::run`].
//!
//! Per frame:
//! 1. follow the latest pointer sample (while a gesture is active)
//! 2. derive the visible angle from the virtual angle
//! 3. advance the virtual angle by the momentum speed (after release)
//! 4. decay the speed, emitting `rotate.stop` when it comes to rest
//! 5. notify progress (and direction changes) when the angle moved enough
//!
//! Submodules:
//! - [`angle`] – wraparound-safe angle math
//! - [`listeners`] – `on`/`off`/`trigger` registry and event types
//! - [`options`] – construction options and validation
//! - [`pointer`] – pointer samples and DOM-shaped pointer events
//! - [`scheduler`] – frame sources and the loop start/stop handle
//! - [`state`] – the state record handed to listeners

pub mod angle;
pub mod listeners;
pub mod options;
pub mod pointer;
pub mod scheduler;
pub mod state;

use log::{debug, info, trace};

use crate::components::tween::Easing;
use crate::error::OptionsError;

use self::angle::{normalize, pointer_angle, quantize_ceil, shortest_arc, wrapped_delta};
use self::listeners::{EventKind, ListenerId, Listeners, RotateEvent};
use self::options::RotationOptions;
use self::pointer::{PointerEvent, PointerSample};
use self::scheduler::{FrameScheduler, LoopHandle};
use self::state::{Direction, RotationState};

#[derive(Debug)]
pub struct RotationEngine {
    state: RotationState,
    easing: Easing,
    listeners: Listeners,
    frame_loop: LoopHandle,
}

impl RotationEngine {
    /// Validate `options` and build an engine whose frame loop is running.
    pub fn new(options: RotationOptions) -> Result<Self, OptionsError> {
        let easing = options.validate()?;
        let mut state = RotationState::from_options(&options);
        state.angle = visible_angle(&state, options.angle);
        state.last_applied_angle = state.angle;

        info!(
            "Rotation engine: pivot=({}, {}), angle={}, step={}, inertia={}, transition={}ms {:?}",
            state.cx, state.cy, state.angle, state.step, state.inertia, state.step_transition_time, easing
        );

        Ok(RotationEngine {
            state,
            easing,
            listeners: Listeners::new(),
            frame_loop: LoopHandle::new(true),
        })
    }

    pub fn state(&self) -> &RotationState {
        &self.state
    }

    /// The visible angle.
    pub fn angle(&self) -> f64 {
        self.state.angle
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    // ==================== GESTURE ====================

    /// Pointer went down: start a gesture with fresh anchors.
    pub fn begin_gesture(&mut self) {
        self.state.active = true;
        self.state.speed = 0.0;
        self.state.last_mouse_angle = None;
        self.state.last_element_angle = None;
        self.state.last_pointer = None;
        self.state.mouse_diff = 0.0;

        debug!("Gesture started at {:.2}", self.state.angle);
        self.listeners.trigger(&RotateEvent::Start(&self.state));
    }

    /// Record the latest pointer position. Ignored outside a gesture.
    ///
    /// The angle itself is recomputed on the next frame.
    pub fn sample_pointer(&mut self, position: impl Into<PointerSample>) {
        if self.state.active {
            self.state.last_pointer = Some(position.into());
        }
    }

    /// Record a mouse/touch event; events without coordinates are dropped.
    pub fn sample_event(&mut self, event: &PointerEvent) {
        match event.position() {
            Some(position) => self.sample_pointer(position),
            None => trace!("Ignoring pointer event without coordinates"),
        }
    }

    /// Pointer went up. Momentum, if any, carries on in later frames.
    pub fn end_gesture(&mut self) {
        self.state.active = false;

        debug!(
            "Gesture ended at {:.2}, speed {:.3}",
            self.state.angle, self.state.speed
        );
        self.listeners.trigger(&RotateEvent::Stop(&self.state));
    }

    /// Jump to `value` and notify listeners.
    ///
    /// The value becomes the new virtual angle; the visible angle is its
    /// normalized or quantized form. An explicit jump is not a step of the
    /// gesture: it notifies even while a step transition is pending and
    /// neither starts nor shortens that transition.
    pub fn set_angle(&mut self, value: f64) {
        self.state.virtual_angle = value;
        self.state.angle = visible_angle(&self.state, value);
        let delta = self.pending_delta();
        self.notify_rotation(delta);
        self.state.last_applied_angle = self.state.angle;
    }

    // ==================== FRAME LOOP ====================

    /// Advance one frame stamped `now` (milliseconds).
    ///
    /// Returns `false` without touching the state when the loop is stopped.
    pub fn tick(&mut self, now: f64) -> bool {
        if !self.frame_loop.is_running() {
            return false;
        }

        self.expire_transition(now);

        if self.state.active {
            if let Some(pointer) = self.state.last_pointer {
                self.follow_pointer(pointer);
            }
        }

        self.state.angle = visible_angle(&self.state, self.state.virtual_angle);
        self.apply_speed();
        self.apply_inertia();

        let delta = self.pending_delta();
        if delta.abs() >= self.state.minimal_angle_change && !self.state.transiting {
            self.notify_rotation(delta);
            self.block_transition(now);
            self.state.last_applied_angle = self.state.angle;
        }

        self.state.frame += 1;
        true
    }

    /// Tick on every frame `scheduler` produces until the loop is stopped or
    /// the scheduler runs dry. Returns the number of frames processed.
    pub fn run(&mut self, scheduler: &mut impl FrameScheduler) -> u64 {
        let mut frames = 0;
        while self.frame_loop.is_running() {
            let Some(now) = scheduler.next_frame() else {
                break;
            };
            if self.tick(now) {
                frames += 1;
            }
        }
        frames
    }

    pub fn start(&self) {
        self.frame_loop.start();
    }

    pub fn stop(&self) {
        self.frame_loop.stop();
    }

    pub fn is_running(&self) -> bool {
        self.frame_loop.is_running()
    }

    /// A handle that can stop or restart this engine's loop from elsewhere,
    /// e.g. from inside a listener.
    pub fn loop_handle(&self) -> LoopHandle {
        self.frame_loop.clone()
    }

    // ==================== LISTENERS ====================

    pub fn on<F>(&mut self, kind: EventKind, handler: F) -> ListenerId
    where
        F: FnMut(&RotateEvent<'_>) + Send + Sync + 'static,
    {
        self.listeners.on(kind, Box::new(handler))
    }

    pub fn off(&mut self, kind: EventKind, id: ListenerId) -> bool {
        self.listeners.off(kind, id)
    }

    // ==================== FRAME STEPS ====================

    fn follow_pointer(&mut self, pointer: PointerSample) {
        let state = &mut self.state;
        let mouse_angle = pointer_angle(pointer.x, pointer.y, state.cx, state.cy);

        let (anchor_element, last_mouse) = match (state.last_element_angle, state.last_mouse_angle) {
            (Some(element), Some(mouse)) => (element, mouse),
            _ => {
                state.last_element_angle = Some(state.virtual_angle);
                state.last_mouse_angle = Some(mouse_angle);
                (state.virtual_angle, mouse_angle)
            }
        };

        let delta = shortest_arc(mouse_angle, last_mouse);
        let before = state.virtual_angle;

        if state.is_eager() {
            state.mouse_diff = delta;
            state.virtual_angle = anchor_element + delta;
            state.last_element_angle = Some(state.virtual_angle);
            state.speed = delta;
        } else {
            state.mouse_diff += delta;
            state.virtual_angle = anchor_element + state.mouse_diff;
            state.speed = shortest_arc(state.virtual_angle, before);
        }
        state.last_mouse_angle = Some(mouse_angle);
    }

    fn apply_speed(&mut self) {
        let state = &mut self.state;
        if state.inertia > 0.0 && state.speed != 0.0 && !state.active {
            state.virtual_angle += state.speed;
        }
    }

    fn apply_inertia(&mut self) {
        if self.state.inertia <= 0.0 {
            return;
        }

        if self.state.speed.abs() >= self.state.minimal_speed {
            self.state.speed *= self.state.inertia;

            if !self.state.active && self.state.speed.abs() < self.state.minimal_speed {
                self.state.speed = 0.0;
                debug!("Momentum exhausted at {:.2}", self.state.angle);
                self.listeners.trigger(&RotateEvent::Stop(&self.state));
            }
        } else if self.state.speed != 0.0 {
            self.state.speed = 0.0;
        }
    }

    /// Rotation since the last notification. Continuous angles are compared
    /// the short way round so the 0/360 seam is not read as a jump.
    fn pending_delta(&self) -> f64 {
        if self.state.is_stepped() {
            self.state.angle - self.state.last_applied_angle
        } else {
            wrapped_delta(self.state.angle, self.state.last_applied_angle)
        }
    }

    fn notify_rotation(&mut self, delta: f64) {
        if let Some(direction) = Direction::of(delta) {
            if direction != self.state.direction {
                self.state.direction = direction;
                debug!("Direction changed to {}", direction.value());
                self.listeners
                    .trigger(&RotateEvent::ChangeDirection(direction));
            }
        }

        trace!(
            "Angle {:.2} (virtual {:.2}), speed {:.3}",
            self.state.angle, self.state.virtual_angle, self.state.speed
        );
        self.listeners.trigger(&RotateEvent::Progress(&self.state));
    }

    fn block_transition(&mut self, now: f64) {
        if self.state.is_stepped() && self.state.is_eager() {
            self.state.transiting = true;
            self.state.transition_ends_at = Some(now + self.state.step_transition_time);
        }
    }

    fn expire_transition(&mut self, now: f64) {
        if let Some(ends_at) = self.state.transition_ends_at {
            if now >= ends_at {
                self.state.transiting = false;
                self.state.transition_ends_at = None;
            }
        }
    }
}

fn visible_angle(state: &RotationState, virtual_angle: f64) -> f64 {
    if state.is_stepped() {
        quantize_ceil(virtual_angle, state.step)
    } else {
        normalize(virtual_angle)
    }
}
