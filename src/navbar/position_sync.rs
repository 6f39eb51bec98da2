//! Scrubber position and its synchronization with the viewer
//!
//! The scrubber raises the same "committed" notification whether the user
//! released the handle or the value was set in code. [`PositionSync`]
//! tells the two apart so that a page change coming from the viewer moves
//! the handle without commanding the viewer to jump again.

use log::{debug, warn};

use crate::error::NavbarError;

/// Notification raised by the [`PositionControl`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent {
    /// Value moved while the handle is held
    Slide(usize),
    /// Value committed: handle released, or value set in code
    Change(usize),
}

/// Linear slider over `[0, max]` with a "min" range fill
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionControl {
    max: usize,
    value: usize,
    held: bool,
}

impl PositionControl {
    /// Control over `[0, total - 1]` starting at `current`
    pub fn new(total: usize, current: usize) -> Result<Self, NavbarError> {
        if total == 0 {
            return Err(NavbarError::InvalidLeafCount { total });
        }
        let max = total - 1;
        Ok(Self {
            max,
            value: current.min(max),
            held: false,
        })
    }

    pub fn min(&self) -> usize {
        0
    }

    pub fn max(&self) -> usize {
        self.max
    }

    pub fn value(&self) -> usize {
        self.value
    }

    pub fn is_held(&self) -> bool {
        self.held
    }

    pub fn clamp(&self, value: usize) -> usize {
        if value > self.max {
            warn!("Slider value {value} out of range, clamping to {}", self.max);
        }
        value.min(self.max)
    }

    /// Moves the held handle
    pub fn slide_to(&mut self, value: usize) -> ControlEvent {
        self.held = true;
        self.value = self.clamp(value);
        ControlEvent::Slide(self.value)
    }

    /// Lets go of the handle; commits only if it was held
    pub fn release(&mut self) -> Option<ControlEvent> {
        if !self.held {
            return None;
        }
        self.held = false;
        Some(ControlEvent::Change(self.value))
    }

    /// Sets the value from code. Always raises a `Change`, even when the
    /// value is unchanged.
    pub fn set_value(&mut self, value: usize) -> ControlEvent {
        self.value = self.clamp(value);
        ControlEvent::Change(self.value)
    }

    /// Fraction of the track that is filled, 0.0 for a single-leaf document
    pub fn ratio(&self) -> f64 {
        if self.max == 0 {
            0.0
        } else {
            self.value as f64 / self.max as f64
        }
    }

    /// Nearest value for a position along the track
    pub fn value_at_ratio(&self, ratio: f64) -> usize {
        let ratio = if ratio.is_finite() {
            ratio.clamp(0.0, 1.0)
        } else {
            0.0
        };
        (ratio * self.max as f64).round() as usize
    }

    fn mirror(&mut self, value: usize) {
        self.value = self.clamp(value);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SyncState {
    #[default]
    Idle,
    /// User is holding the handle
    Dragging,
    /// The next commit is the echo of a programmatic update
    SuppressPending,
}

/// What the navbar has to do after a control notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Refresh the label only
    Preview(usize),
    /// Refresh the label and navigate the viewer
    Navigate(usize),
    /// Refresh the label; echo of our own update, viewer untouched
    Swallowed(usize),
}

impl SyncOutcome {
    /// Leaf whose label should be shown
    pub fn index(&self) -> usize {
        match *self {
            Self::Preview(i) | Self::Navigate(i) | Self::Swallowed(i) => i,
        }
    }

    pub fn navigation(&self) -> Option<usize> {
        match *self {
            Self::Navigate(i) => Some(i),
            _ => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PositionSync {
    control: PositionControl,
    state: SyncState,
}

impl PositionSync {
    pub fn initialize(total: usize, current: usize) -> Result<Self, NavbarError> {
        Ok(Self {
            control: PositionControl::new(total, current)?,
            state: SyncState::Idle,
        })
    }

    pub fn control(&self) -> &PositionControl {
        &self.control
    }

    pub fn state(&self) -> SyncState {
        self.state
    }

    pub fn value(&self) -> usize {
        self.control.value()
    }

    /// Routes a control notification to its handler
    pub fn handle(&mut self, event: ControlEvent) -> SyncOutcome {
        match event {
            ControlEvent::Slide(value) => self.on_dragging(value),
            ControlEvent::Change(value) => self.on_drag_committed(value),
        }
    }

    /// In-progress drag: label refresh only
    pub fn on_dragging(&mut self, value: usize) -> SyncOutcome {
        self.control.mirror(value);
        if self.state == SyncState::Idle {
            self.state = SyncState::Dragging;
        }
        SyncOutcome::Preview(self.control.value())
    }

    /// Committed value. Swallowed if it echoes a programmatic update,
    /// otherwise the viewer must navigate to it.
    pub fn on_drag_committed(&mut self, value: usize) -> SyncOutcome {
        self.control.mirror(value);
        let value = self.control.value();
        let previous = std::mem::take(&mut self.state);
        if previous == SyncState::SuppressPending {
            debug!("Swallowed slider echo at leaf {value}");
            SyncOutcome::Swallowed(value)
        } else {
            debug!("Slider committed to leaf {value}");
            SyncOutcome::Navigate(value)
        }
    }

    /// The viewer moved on its own. The control raises its commit echo
    /// synchronously and it is consumed here, so the state is back to
    /// `Idle` on return.
    pub fn set_index_programmatically(&mut self, value: usize) -> SyncOutcome {
        self.state = SyncState::SuppressPending;
        let echo = self.control.set_value(value);
        self.handle(echo)
    }

    /// User moved the handle to `value`
    pub fn drag_to(&mut self, value: usize) -> SyncOutcome {
        let event = self.control.slide_to(value);
        self.handle(event)
    }

    /// User let go of the handle
    pub fn release(&mut self) -> Option<SyncOutcome> {
        let event = self.control.release()?;
        Some(self.handle(event))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_leaves_is_a_configuration_error() {
        let err = PositionSync::initialize(0, 0).unwrap_err();
        assert!(matches!(err, NavbarError::InvalidLeafCount { total: 0 }));
    }

    #[test]
    fn test_initialize_sets_range_and_value() {
        let sync = PositionSync::initialize(10, 3).unwrap();
        assert_eq!(sync.control().min(), 0);
        assert_eq!(sync.control().max(), 9);
        assert_eq!(sync.value(), 3);
        assert_eq!(sync.state(), SyncState::Idle);
    }

    #[test]
    fn test_initial_value_is_clamped() {
        let sync = PositionSync::initialize(4, 10).unwrap();
        assert_eq!(sync.value(), 3);
    }

    #[test]
    fn test_programmatic_update_is_swallowed() {
        let mut sync = PositionSync::initialize(10, 0).unwrap();
        let outcome = sync.set_index_programmatically(6);
        assert_eq!(outcome, SyncOutcome::Swallowed(6));
        assert_eq!(outcome.navigation(), None);
        assert_eq!(sync.value(), 6);
        assert_eq!(sync.state(), SyncState::Idle);
    }

    #[test]
    fn test_suppress_does_not_leak_to_next_commit() {
        let mut sync = PositionSync::initialize(10, 0).unwrap();
        sync.set_index_programmatically(2);
        sync.set_index_programmatically(3);
        assert_eq!(sync.on_drag_committed(5), SyncOutcome::Navigate(5));
    }

    #[test]
    fn test_drag_previews_then_navigates_on_release() {
        let mut sync = PositionSync::initialize(10, 0).unwrap();
        assert_eq!(sync.drag_to(3), SyncOutcome::Preview(3));
        assert_eq!(sync.state(), SyncState::Dragging);
        assert_eq!(sync.drag_to(4), SyncOutcome::Preview(4));
        assert_eq!(sync.release(), Some(SyncOutcome::Navigate(4)));
        assert_eq!(sync.state(), SyncState::Idle);
        assert_eq!(sync.release(), None);
    }

    #[test]
    fn test_stray_commit_counts_as_user_input() {
        let mut sync = PositionSync::initialize(10, 0).unwrap();
        assert_eq!(sync.on_drag_committed(7), SyncOutcome::Navigate(7));
    }

    #[test]
    fn test_programmatic_update_during_drag() {
        let mut sync = PositionSync::initialize(10, 0).unwrap();
        sync.drag_to(2);
        assert_eq!(sync.set_index_programmatically(8), SyncOutcome::Swallowed(8));
        assert_eq!(sync.state(), SyncState::Idle);
        // The handle is still held; letting go commits the programmatic value
        assert_eq!(sync.release(), Some(SyncOutcome::Navigate(8)));
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let mut sync = PositionSync::initialize(5, 0).unwrap();
        assert_eq!(sync.set_index_programmatically(99), SyncOutcome::Swallowed(4));
        assert_eq!(sync.drag_to(50), SyncOutcome::Preview(4));
    }

    #[test]
    fn test_ratio_mapping() {
        let control = PositionControl::new(11, 5).unwrap();
        assert!((control.ratio() - 0.5).abs() < f64::EPSILON);
        assert_eq!(control.value_at_ratio(0.0), 0);
        assert_eq!(control.value_at_ratio(1.0), 10);
        assert_eq!(control.value_at_ratio(0.34), 3);
        assert_eq!(control.value_at_ratio(7.0), 10);
        assert_eq!(control.value_at_ratio(f64::NAN), 0);

        let single = PositionControl::new(1, 0).unwrap();
        assert_eq!(single.ratio(), 0.0);
        assert_eq!(single.value_at_ratio(0.9), 0);
    }
}
