// src/ui/components/button_bar.rs
//! Button bar: an id-addressed strip of buttons laid out along one axis
//!
//! Every button occupies the same fixed item size. Visible buttons are packed
//! from the bar's origin with a fixed gap between neighbours; hidden buttons
//! keep their place in the order but take no space. Any structural change
//! (add, remove, show, hide) re-flows the whole bar from scratch. Bars hold a
//! handful of buttons, so the O(n) pass is cheaper than getting incremental
//! patching right.
//!
//! # Examples
//! ```ignore
//! let mut bar = ButtonBar::<8>::new(
//!     Rectangle::new(Point::new(250, 8), Size::new(65, 200)),
//!     [
//!         ButtonSpec::toggleable(MUTE, "Mute"),
//!         ButtonSpec::pushable(SEEK_UP, "Seek+"),
//!     ],
//!     Size::new(60, 32),
//!     4,
//!     Axis::Vertical,
//! );
//!
//! bar.set_button_visible(SEEK_UP, false).ok();
//! ```

use embedded_graphics::Drawable as EgDrawable;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{PrimitiveStyle, Rectangle};
use heapless::Vec;
use log::{debug, warn};
use thiserror_no_std::Error;

use crate::config::ButtonBarConfig;
use crate::ui::colors::ButtonPalette;
use crate::ui::components::button::{BarButton, ButtonSpec, ButtonState};
use crate::ui::core::{DirtyRegion, Drawable, TouchEvent, TouchPoint, TouchResult, Touchable};

/// Layout axis of a bar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Top to bottom
    Vertical,
    /// Left to right
    Horizontal,
}

/// Rejected bar mutation. All variants are recoverable; the bar is unchanged.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonBarError {
    #[error("no button with id {0}")]
    NotFound(u8),
    #[error("button bar has no room for another button")]
    CapacityExceeded,
    #[error("button id {0} is already in use")]
    DuplicateId(u8),
}

/// Container that owns up to `N` buttons and positions them along an [`Axis`]
pub struct ButtonBar<const N: usize> {
    bounds: Rectangle,
    item_size: Size,
    gap: u32,
    axis: Axis,
    buttons: Vec<BarButton, N>,
    palette: ButtonPalette,
    /// Pixels vacated by removed, hidden or moved buttons
    vacated: Option<DirtyRegion>,
    dirty: bool,
}

impl<const N: usize> ButtonBar<N> {
    /// Build a bar from `specs`, in order.
    ///
    /// Specs that would end past the bar's bounds along the layout axis are
    /// skipped, as are duplicate ids and anything beyond the capacity `N`.
    /// The bar holds as many buttons as its space allows.
    pub fn new<I>(bounds: Rectangle, specs: I, item_size: Size, gap: u32, axis: Axis) -> Self
    where
        I: IntoIterator<Item = ButtonSpec>,
    {
        let mut bar = Self {
            bounds,
            item_size,
            gap,
            axis,
            buttons: Vec::new(),
            palette: ButtonPalette::default(),
            vacated: None,
            dirty: true,
        };

        for spec in specs {
            let id = spec.id;
            if bar.contains_id(id) {
                warn!("Button bar: skipping duplicate id {}", id);
                continue;
            }
            if !bar.fits(bar.buttons.len() + 1) || bar.buttons.is_full() {
                debug!("Button bar: no room for button {} ({})", id, spec.label);
                continue;
            }

            let slot = bar.slot(bar.buttons.len());
            bar.buttons.push(BarButton::from_spec(spec, slot)).ok();
        }

        debug!(
            "Button bar: created {} buttons along {:?}",
            bar.buttons.len(),
            axis
        );
        bar
    }

    /// Build a bar using item size and gap from configuration.
    pub fn from_config<I>(bounds: Rectangle, specs: I, config: &ButtonBarConfig, axis: Axis) -> Self
    where
        I: IntoIterator<Item = ButtonSpec>,
    {
        Self::new(bounds, specs, config.item_size(), config.gap, axis)
    }

    /// Apply a palette to the bar and every button it owns.
    pub fn with_palette(mut self, palette: ButtonPalette) -> Self {
        self.palette = palette;
        for button in &mut self.buttons {
            button.set_palette(palette);
        }
        self.dirty = true;
        self
    }

    /// Append a button after the last existing one.
    pub fn add_button(&mut self, spec: ButtonSpec) -> Result<(), ButtonBarError> {
        let id = spec.id;
        if self.contains_id(id) {
            warn!("Button bar: add rejected, id {} already present", id);
            return Err(ButtonBarError::DuplicateId(id));
        }
        if self.buttons.is_full() || !self.fits(self.buttons.len() + 1) {
            warn!("Button bar: add rejected, no room for button {}", id);
            return Err(ButtonBarError::CapacityExceeded);
        }

        let button =
            BarButton::from_spec(spec, self.slot(self.visible_count())).with_palette(self.palette);
        self.buttons
            .push(button)
            .map_err(|_| ButtonBarError::CapacityExceeded)?;

        debug!("Button bar: added button {}", id);
        self.relayout();
        Ok(())
    }

    /// Drop the button with `id` and close the gap it leaves.
    pub fn remove_button(&mut self, id: u8) -> Result<(), ButtonBarError> {
        let index = self.index_of(id).ok_or_else(|| {
            warn!("Button bar: remove rejected, id {} not found", id);
            ButtonBarError::NotFound(id)
        })?;

        let removed = self.buttons.remove(index);
        self.vacate(removed.bounds());
        debug!("Button bar: removed button {} from slot {}", id, index);

        self.relayout();
        Ok(())
    }

    /// Show or hide a button. Hidden buttons are disabled and take no space.
    pub fn set_button_visible(&mut self, id: u8, visible: bool) -> Result<(), ButtonBarError> {
        let index = self.index_of(id).ok_or_else(|| {
            warn!("Button bar: visibility change rejected, id {} not found", id);
            ButtonBarError::NotFound(id)
        })?;

        let origin = self.bounds.top_left;
        let old_bounds = self.buttons[index].bounds();
        if visible {
            self.buttons[index].show();
        } else {
            self.buttons[index].hide(origin);
            self.vacate(old_bounds);
        }

        self.relayout();
        Ok(())
    }

    pub fn set_button_state(&mut self, id: u8, state: ButtonState) -> Result<(), ButtonBarError> {
        match self.button_mut(id) {
            Some(button) => {
                button.set_state(state);
                Ok(())
            }
            None => {
                warn!("Button bar: state change rejected, id {} not found", id);
                Err(ButtonBarError::NotFound(id))
            }
        }
    }

    /// State of the button with `id`, or `Disabled` when there is no such button.
    pub fn button_state(&self, id: u8) -> ButtonState {
        self.button(id)
            .map(BarButton::state)
            .unwrap_or(ButtonState::Disabled)
    }

    pub fn button(&self, id: u8) -> Option<&BarButton> {
        self.buttons.iter().find(|b| b.id() == id)
    }

    pub fn button_mut(&mut self, id: u8) -> Option<&mut BarButton> {
        self.buttons.iter_mut().find(|b| b.id() == id)
    }

    /// Recompute the position of every visible button from the bar's origin.
    ///
    /// Safe to call redundantly: buttons already in place are left untouched
    /// and nothing is marked for redraw.
    pub fn relayout(&mut self) {
        let origin = self.bounds.top_left;
        let mut slot_index = 0;
        let mut vacated = self.vacated;

        for index in 0..self.buttons.len() {
            let target = if self.buttons[index].is_visible() {
                let slot = self.slot(slot_index);
                slot_index += 1;
                slot
            } else {
                Rectangle::new(origin, Size::zero())
            };

            let button = &mut self.buttons[index];
            let current = button.bounds();
            if current != target {
                match vacated.as_mut() {
                    Some(region) => region.expand_to_include(current),
                    None if current.size != Size::zero() => {
                        vacated = Some(DirtyRegion::new(current))
                    }
                    None => {}
                }
                button.set_bounds(target);
            }
        }

        self.vacated = vacated;
    }

    /// Ids in display order, hidden buttons included
    pub fn ids(&self) -> impl Iterator<Item = u8> + '_ {
        self.buttons.iter().map(BarButton::id)
    }

    pub fn len(&self) -> usize {
        self.buttons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buttons.is_empty()
    }

    pub fn visible_count(&self) -> usize {
        self.buttons.iter().filter(|b| b.is_visible()).count()
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn item_size(&self) -> Size {
        self.item_size
    }

    pub fn gap(&self) -> u32 {
        self.gap
    }

    fn contains_id(&self, id: u8) -> bool {
        self.index_of(id).is_some()
    }

    fn index_of(&self, id: u8) -> Option<usize> {
        self.buttons.iter().position(|b| b.id() == id)
    }

    fn item_extent(&self) -> u32 {
        match self.axis {
            Axis::Vertical => self.item_size.height,
            Axis::Horizontal => self.item_size.width,
        }
    }

    fn bounds_extent(&self) -> u32 {
        match self.axis {
            Axis::Vertical => self.bounds.size.height,
            Axis::Horizontal => self.bounds.size.width,
        }
    }

    /// Space `count` buttons need along the axis: `count*extent + (count-1)*gap`
    fn required_extent(&self, count: usize) -> u32 {
        if count == 0 {
            return 0;
        }
        let count = count as u32;
        count * self.item_extent() + (count - 1) * self.gap
    }

    fn fits(&self, count: usize) -> bool {
        self.required_extent(count) <= self.bounds_extent()
    }

    /// Rectangle of the `index`-th visible slot
    fn slot(&self, index: usize) -> Rectangle {
        let step = (self.item_extent() + self.gap) as i32 * index as i32;
        let offset = match self.axis {
            Axis::Vertical => Point::new(0, step),
            Axis::Horizontal => Point::new(step, 0),
        };
        Rectangle::new(self.bounds.top_left + offset, self.item_size)
    }

    fn vacate(&mut self, area: Rectangle) {
        if area.size == Size::zero() {
            return;
        }
        match self.vacated.as_mut() {
            Some(region) => region.expand_to_include(area),
            None => self.vacated = Some(DirtyRegion::new(area)),
        }
    }
}

impl<const N: usize> Drawable for ButtonBar<N> {
    fn draw<D: DrawTarget<Color = Rgb565>>(&self, display: &mut D) -> Result<(), D::Error> {
        let background = PrimitiveStyle::with_fill(self.palette.background);

        if self.dirty {
            self.bounds.into_styled(background).draw(display)?;
            for button in self.buttons.iter().filter(|b| b.is_visible()) {
                button.draw(display)?;
            }
            return Ok(());
        }

        let cleared = self.vacated.map(|region| region.bounds);
        if let Some(area) = cleared {
            area.into_styled(background).draw(display)?;
        }

        for button in self.buttons.iter().filter(|b| b.is_visible()) {
            let overlaps_cleared = cleared
                .map(|area| area.intersection(&button.bounds()).size != Size::zero())
                .unwrap_or(false);
            if button.is_dirty() || overlaps_cleared {
                button.draw(display)?;
            }
        }

        Ok(())
    }

    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn is_dirty(&self) -> bool {
        self.dirty
            || self.vacated.is_some()
            || self.buttons.iter().any(|b| b.is_visible() && b.is_dirty())
    }

    fn mark_clean(&mut self) {
        self.dirty = false;
        self.vacated = None;
        for button in &mut self.buttons {
            button.mark_clean();
        }
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn dirty_region(&self) -> Option<DirtyRegion> {
        if self.dirty {
            return Some(DirtyRegion::new(self.bounds));
        }

        let mut region = self.vacated;
        for button in &self.buttons {
            if let Some(dirty) = button.dirty_region() {
                match region.as_mut() {
                    Some(r) => r.expand_to_include(dirty.bounds),
                    None => region = Some(dirty),
                }
            }
        }
        region
    }
}

impl<const N: usize> Touchable for ButtonBar<N> {
    fn contains_point(&self, point: TouchPoint) -> bool {
        self.bounds.contains(point.to_point())
    }

    fn handle_touch(&mut self, event: TouchEvent) -> TouchResult {
        for button in &mut self.buttons {
            match button.handle_touch(event) {
                TouchResult::NotHandled => continue,
                result => return result,
            }
        }
        TouchResult::NotHandled
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::RecordingDisplay;
    use crate::ui::core::Action;
    use alloc::vec::Vec as StdVec;

    const LABELS: [&str; 8] = [
        "Mute", "AGC", "Seek+", "Seek-", "Scan", "RDS", "Band", "Memo",
    ];

    fn specs(ids: &[u8]) -> StdVec<ButtonSpec> {
        ids.iter()
            .map(|&id| ButtonSpec::pushable(id, LABELS[id as usize % LABELS.len()]))
            .collect()
    }

    /// Bar from the tuner's right-hand column: 60x32 items, 4px gap, 200px tall
    fn column_bar(ids: &[u8]) -> ButtonBar<8> {
        ButtonBar::new(
            Rectangle::new(Point::new(250, 80), Size::new(65, 200)),
            specs(ids),
            Size::new(60, 32),
            4,
            Axis::Vertical,
        )
    }

    fn visible_origins<const N: usize>(bar: &ButtonBar<N>) -> StdVec<Point> {
        bar.buttons
            .iter()
            .filter(|b| b.is_visible())
            .map(|b| b.bounds().top_left)
            .collect()
    }

    fn assert_packed<const N: usize>(bar: &ButtonBar<N>) {
        let origins = visible_origins(bar);
        if let Some(first) = origins.first() {
            assert_eq!(*first, bar.bounds.top_left);
        }
        let step = match bar.axis {
            Axis::Vertical => Point::new(0, (bar.item_size.height + bar.gap) as i32),
            Axis::Horizontal => Point::new((bar.item_size.width + bar.gap) as i32, 0),
        };
        for pair in origins.windows(2) {
            assert_eq!(pair[1], pair[0] + step);
        }
    }

    #[test]
    fn construction_truncates_to_available_space() {
        let bar = column_bar(&[0, 1, 2, 3, 4, 5, 6, 7]);

        // 5*32 + 4*4 = 176 fits in 200; a sixth button would need 212
        assert_eq!(bar.len(), 5);
        assert_eq!(bar.ids().collect::<StdVec<_>>(), [0, 1, 2, 3, 4]);
        assert_packed(&bar);
    }

    #[test]
    fn construction_accepts_exactly_k_items() {
        // Bounds sized for exactly 3 items: 3*20 + 2*5 = 70
        let bar: ButtonBar<8> = ButtonBar::new(
            Rectangle::new(Point::new(0, 200), Size::new(70, 30)),
            specs(&[1, 2, 3, 4]),
            Size::new(20, 30),
            5,
            Axis::Horizontal,
        );

        assert_eq!(bar.len(), 3);
        assert_packed(&bar);
    }

    #[test]
    fn construction_skips_duplicate_ids() {
        let bar = column_bar(&[1, 1, 2]);
        assert_eq!(bar.ids().collect::<StdVec<_>>(), [1, 2]);
    }

    #[test]
    fn duplicate_add_fails_and_leaves_bar_untouched() {
        let mut bar = column_bar(&[1, 2]);
        let before = visible_origins(&bar);

        assert_eq!(
            bar.add_button(ButtonSpec::toggleable(2, "Again")),
            Err(ButtonBarError::DuplicateId(2))
        );
        assert_eq!(bar.len(), 2);
        assert_eq!(bar.button(2).map(BarButton::label), Some("Seek+"));
        assert_eq!(visible_origins(&bar), before);
    }

    #[test]
    fn add_appends_after_last_item() {
        let mut bar = column_bar(&[1, 2]);
        bar.mark_clean();

        bar.add_button(ButtonSpec::pushable(9, "Memo")).unwrap();

        assert_eq!(bar.ids().collect::<StdVec<_>>(), [1, 2, 9]);
        assert_eq!(
            bar.button(9).unwrap().bounds().top_left,
            Point::new(250, 80 + 2 * 36)
        );
        // Only the new button's region needs drawing
        let region = bar.dirty_region().unwrap();
        assert_eq!(region.bounds, bar.button(9).unwrap().bounds());
        assert_packed(&bar);
    }

    #[test]
    fn add_beyond_extent_is_rejected() {
        let mut bar = column_bar(&[0, 1, 2, 3, 4]);

        assert_eq!(
            bar.add_button(ButtonSpec::pushable(20, "Band")),
            Err(ButtonBarError::CapacityExceeded)
        );
        assert_eq!(bar.len(), 5);
    }

    #[test]
    fn add_counts_hidden_buttons_towards_capacity() {
        let mut bar = column_bar(&[0, 1, 2, 3, 4]);
        bar.set_button_visible(1, false).unwrap();

        assert_eq!(
            bar.add_button(ButtonSpec::pushable(20, "Band")),
            Err(ButtonBarError::CapacityExceeded)
        );
    }

    #[test]
    fn add_respects_static_capacity() {
        let mut bar: ButtonBar<2> = ButtonBar::new(
            Rectangle::new(Point::zero(), Size::new(60, 500)),
            specs(&[1, 2]),
            Size::new(60, 32),
            4,
            Axis::Vertical,
        );

        assert_eq!(
            bar.add_button(ButtonSpec::pushable(3, "Scan")),
            Err(ButtonBarError::CapacityExceeded)
        );
    }

    #[test]
    fn remove_reflows_following_items() {
        let mut bar = column_bar(&[10, 12, 14, 16, 18]);
        let before = visible_origins(&bar);

        bar.remove_button(14).unwrap();

        let after = visible_origins(&bar);
        assert_eq!(bar.ids().collect::<StdVec<_>>(), [10, 12, 16, 18]);
        assert_eq!(after[..2], before[..2]);
        // Items 4 and 5 move up by item height + gap
        assert_eq!(after[2], before[3] - Point::new(0, 36));
        assert_eq!(after[3], before[4] - Point::new(0, 36));
        assert_packed(&bar);
    }

    #[test]
    fn remove_missing_id_reports_not_found() {
        let mut bar = column_bar(&[1, 2]);
        assert_eq!(bar.remove_button(7), Err(ButtonBarError::NotFound(7)));
        assert_eq!(bar.len(), 2);
    }

    #[test]
    fn remove_then_add_reuses_the_id() {
        let mut bar = column_bar(&[1, 2, 3]);
        bar.remove_button(2).unwrap();
        bar.add_button(ButtonSpec::pushable(2, "AGC")).unwrap();

        let mut ids: StdVec<u8> = bar.ids().collect();
        assert_eq!(ids, [1, 3, 2]);
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), bar.len());
    }

    #[test]
    fn hidden_button_leaves_no_hole() {
        let mut bar = column_bar(&[1, 2, 3]);

        bar.set_button_visible(2, false).unwrap();

        assert_eq!(bar.len(), 3);
        assert_eq!(bar.visible_count(), 2);
        assert_eq!(bar.button_state(2), ButtonState::Disabled);
        assert_eq!(bar.button(2).unwrap().bounds().size, Size::zero());
        assert_eq!(
            bar.button(3).unwrap().bounds().top_left,
            Point::new(250, 80 + 36)
        );
        assert_packed(&bar);
    }

    #[test]
    fn hiding_twice_is_the_same_as_once() {
        let mut once = column_bar(&[1, 2, 3]);
        let mut twice = column_bar(&[1, 2, 3]);

        once.set_button_visible(2, false).unwrap();
        twice.set_button_visible(2, false).unwrap();
        twice.set_button_visible(2, false).unwrap();

        assert_eq!(visible_origins(&once), visible_origins(&twice));
        assert_eq!(once.button_state(2), twice.button_state(2));
    }

    #[test]
    fn showing_restores_slot_and_state() {
        let mut bar = column_bar(&[1, 2, 3]);
        bar.set_button_state(2, ButtonState::On).unwrap();
        let original = visible_origins(&bar);

        bar.set_button_visible(2, false).unwrap();
        bar.set_button_visible(2, true).unwrap();

        assert_eq!(visible_origins(&bar), original);
        assert_eq!(bar.button_state(2), ButtonState::On);
        assert_packed(&bar);
    }

    #[test]
    fn state_set_while_hidden_applies_on_show() {
        let mut bar = column_bar(&[1, 2]);
        bar.set_button_visible(1, false).unwrap();
        bar.set_button_state(1, ButtonState::On).unwrap();
        assert_eq!(bar.button_state(1), ButtonState::Disabled);

        bar.set_button_visible(1, true).unwrap();
        assert_eq!(bar.button_state(1), ButtonState::On);
    }

    #[test]
    fn visibility_on_missing_id_reports_not_found() {
        let mut bar = column_bar(&[1]);
        assert_eq!(
            bar.set_button_visible(5, true),
            Err(ButtonBarError::NotFound(5))
        );
    }

    #[test]
    fn state_query_on_missing_id_is_disabled() {
        let bar = column_bar(&[1]);
        assert_eq!(bar.button_state(42), ButtonState::Disabled);
        assert!(bar.button(42).is_none());
    }

    #[test]
    fn relayout_is_idempotent() {
        let mut bar = column_bar(&[1, 2, 3, 4]);
        bar.remove_button(2).unwrap();
        bar.mark_clean();

        let before = visible_origins(&bar);
        bar.relayout();
        bar.relayout();

        assert_eq!(visible_origins(&bar), before);
        assert!(!bar.is_dirty());
    }

    #[test]
    fn random_mutations_keep_ids_unique_and_layout_packed() {
        let mut bar = column_bar(&[]);
        // Small deterministic LCG so the sequence is reproducible
        let mut seed: u32 = 0x1234_5678;
        let mut next = || {
            seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            (seed >> 16) as u8
        };

        for _ in 0..500 {
            let id = next() % 8;
            match next() % 4 {
                0 | 1 => {
                    bar.add_button(ButtonSpec::pushable(id, "X")).ok();
                }
                2 => {
                    bar.remove_button(id).ok();
                }
                _ => {
                    let visible = next() % 2 == 0;
                    bar.set_button_visible(id, visible).ok();
                }
            }

            let mut ids: StdVec<u8> = bar.ids().collect();
            let len = ids.len();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), len);
            assert_packed(&bar);
            assert!(bar.len() <= 5);
        }
    }

    #[test]
    fn horizontal_bar_lays_out_left_to_right() {
        let bar: ButtonBar<4> = ButtonBar::new(
            Rectangle::new(Point::new(4, 200), Size::new(312, 36)),
            specs(&[1, 2, 3]),
            Size::new(70, 32),
            8,
            Axis::Horizontal,
        );

        assert_eq!(
            visible_origins(&bar),
            [Point::new(4, 200), Point::new(82, 200), Point::new(160, 200)]
        );
    }

    #[test]
    fn touch_is_routed_to_the_button_under_the_finger() {
        let spec = ButtonSpec::toggleable(7, "Mute")
            .with_handler(|event| Some(Action::SetMute(event.state == ButtonState::On)));
        let mut bar: ButtonBar<4> = ButtonBar::new(
            Rectangle::new(Point::new(250, 80), Size::new(65, 200)),
            [ButtonSpec::pushable(1, "Seek+"), spec],
            Size::new(60, 32),
            4,
            Axis::Vertical,
        );

        let second = TouchPoint::new(260, 80 + 36 + 5);
        assert_eq!(
            bar.handle_touch(TouchEvent::Press(second)),
            TouchResult::Action(Action::SetMute(true))
        );
        assert_eq!(bar.button_state(7), ButtonState::On);
        assert_eq!(bar.button_state(1), ButtonState::Off);
    }

    #[test]
    fn hidden_buttons_do_not_receive_touches() {
        let mut bar = column_bar(&[1, 2]);
        bar.set_button_visible(1, false).unwrap();

        // The first slot is now occupied by button 2
        let first_slot = TouchPoint::new(260, 85);
        bar.handle_touch(TouchEvent::Press(first_slot));
        assert_eq!(bar.button_state(2), ButtonState::On);
        assert_eq!(bar.button_state(1), ButtonState::Disabled);
    }

    #[test]
    fn removal_clears_vacated_pixels() {
        let mut bar = column_bar(&[1, 2, 3]);
        let mut display = RecordingDisplay::new();
        bar.draw(&mut display).unwrap();
        bar.mark_clean();

        let last_slot = bar.button(3).unwrap().bounds();
        bar.remove_button(2).unwrap();
        display.reset_counts();
        bar.draw(&mut display).unwrap();
        bar.mark_clean();

        // Button 3 moved up, so its old slot must be background again
        assert!(!display.has_ink(last_slot, bar.palette.background));
        assert!(!bar.is_dirty());
    }

    #[test]
    fn clean_bar_draws_nothing() {
        let mut bar = column_bar(&[1, 2, 3]);
        let mut display = RecordingDisplay::new();
        bar.draw(&mut display).unwrap();
        bar.mark_clean();

        display.reset_counts();
        bar.draw(&mut display).unwrap();
        assert_eq!(display.total_calls(), 0);
    }
}
