//! Application-wide state shared between screens

extern crate alloc;

use alloc::rc::Rc;
use core::cell::Cell;

/// Receiver state that outlives individual screens.
///
/// Owned by the [`ScreenManager`](crate::screens::ScreenManager), which is the
/// only writer. Screens get a [`MuteView`] and read it every frame, so a mute
/// toggled on one screen shows up on the next.
#[derive(Debug, Default)]
pub struct SharedRadioState {
    muted: Rc<Cell<bool>>,
}

impl SharedRadioState {
    pub fn new(muted: bool) -> Self {
        Self {
            muted: Rc::new(Cell::new(muted)),
        }
    }

    pub fn is_muted(&self) -> bool {
        self.muted.get()
    }

    pub fn set_muted(&mut self, muted: bool) {
        self.muted.set(muted);
    }

    /// Read-only handle on the mute flag for a screen.
    pub fn mute_view(&self) -> MuteView {
        MuteView(Rc::clone(&self.muted))
    }
}

/// Read-only view of [`SharedRadioState`]'s mute flag
#[derive(Debug, Clone)]
pub struct MuteView(Rc<Cell<bool>>);

impl MuteView {
    pub fn is_muted(&self) -> bool {
        self.0.get()
    }
}
