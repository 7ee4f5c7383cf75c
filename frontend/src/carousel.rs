//! Carousel position engine for the gift registry.
//!
//! Pure view-state machine: given the active index, the order cards were
//! first visited, and the live drag offset, it classifies every card into a
//! position class and emits the visual transform for that class. It holds no
//! gift data and never touches the DOM, so it is driven by a hook and unit
//! tested natively.

/// Horizontal displacement, in pixels, past which a released drag resolves
/// into a navigation.
pub const SWIPE_DISTANCE_PX: f64 = 50.0;

/// Release velocity, in pixels per second, past which a released drag
/// resolves into a navigation even without the distance threshold.
pub const SWIPE_VELOCITY: f64 = 300.0;

/// How long a navigation animation is considered in flight. Navigation is
/// rejected until the owning controller calls [`CarouselState::settle`].
pub const SETTLE_MS: u32 = 300;

/// Pixel span that maps a drag to the full [-1, 1] offset range; also the
/// distance the active card tracks the pointer at full deflection.
pub const DRAG_SPAN_PX: f64 = 200.0;

const STACK_BASE_PX: f64 = 280.0;
const STACK_STEP_PX: f64 = 50.0;
const STACK_DRAG_BLEED_PX: f64 = 100.0;
const OFFSCREEN_PX: f64 = 600.0;

/// Where a card sits relative to the active one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardPosition {
    /// Front and center; the only interactive card.
    Active,
    /// Already seen, fanned out to the left, most recently left first.
    ViewedLeft,
    /// Not yet seen, fanned out to the right in list order.
    UnviewedRight,
    /// Off-screen fly-out state for cards in neither stack.
    Hidden,
}

/// Per-card visual transform emitted by the engine.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardTransform {
    pub x: f64,
    pub scale: f64,
    pub z_index: i32,
    pub opacity: f64,
    pub rotate_y: f64,
    pub brightness: f64,
}

/// The whole carousel view state as one value.
///
/// Owned by a single controller and handed by reference to the pure
/// classification/transform functions below; nothing here is global.
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselState {
    current: usize,
    /// Indices in first-visit order. Append-only; seeded with index 0.
    viewed: Vec<usize>,
    /// In-progress gesture offset as a fraction of [`DRAG_SPAN_PX`], in [-1, 1].
    drag_x: f64,
    animating: bool,
}

impl Default for CarouselState {
    fn default() -> Self {
        Self {
            current: 0,
            viewed: vec![0],
            drag_x: 0.0,
            animating: false,
        }
    }
}

impl CarouselState {
    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn viewed_cards(&self) -> &[usize] {
        &self.viewed
    }

    pub fn drag_offset(&self) -> f64 {
        self.drag_x
    }

    pub fn is_animating(&self) -> bool {
        self.animating
    }

    /// Move to the next card, wrapping at the end of the list. Rejected
    /// while a transition is in flight or when the list is empty.
    pub fn advance(&mut self, len: usize) -> bool {
        if self.animating || len == 0 {
            return false;
        }
        self.move_to((self.current + 1) % len)
    }

    /// Move to the previous card, wrapping at the start of the list.
    pub fn retreat(&mut self, len: usize) -> bool {
        if self.animating || len == 0 {
            return false;
        }
        self.move_to((self.current + len - 1) % len)
    }

    fn move_to(&mut self, index: usize) -> bool {
        self.current = index;
        if !self.viewed.contains(&index) {
            self.viewed.push(index);
        }
        self.animating = true;
        true
    }

    /// Release the in-flight guard once the transition animation has run
    /// its [`SETTLE_MS`] course.
    pub fn settle(&mut self) {
        self.animating = false;
    }

    /// Track an in-progress gesture. `offset_px` is the raw pointer
    /// displacement; the stored offset is the clamped fraction of
    /// [`DRAG_SPAN_PX`].
    pub fn drag_to(&mut self, offset_px: f64) {
        self.drag_x = (offset_px / DRAG_SPAN_PX).clamp(-1.0, 1.0);
    }

    /// Resolve a completed gesture. A swipe past either threshold navigates
    /// (positive displacement/velocity → previous card); anything below
    /// both thresholds is discarded, leaving the state exactly as it was
    /// before the gesture began. Returns whether a transition started.
    pub fn end_drag(&mut self, offset_px: f64, velocity: f64, len: usize) -> bool {
        self.drag_x = 0.0;
        if len == 0 || !swipe_triggers(offset_px, velocity) {
            return false;
        }
        if offset_px > 0.0 || velocity > 0.0 {
            self.retreat(len)
        } else {
            self.advance(len)
        }
    }

    /// Position class for `index` under the current state.
    pub fn position_of(&self, index: usize) -> CardPosition {
        if index == self.current {
            return CardPosition::Active;
        }
        let visit = self.visit_order(index);
        let current_visit = self
            .visit_order(self.current)
            .expect("current index is always in the viewed history");
        match visit {
            None => CardPosition::UnviewedRight,
            Some(v) if v < current_visit => CardPosition::ViewedLeft,
            Some(_) => CardPosition::Hidden,
        }
    }

    /// Visual transform for `index` under the current state.
    pub fn transform_of(&self, index: usize) -> CardTransform {
        match self.position_of(index) {
            CardPosition::Active => CardTransform {
                x: self.drag_x * DRAG_SPAN_PX,
                scale: 1.0,
                z_index: 40,
                opacity: 1.0,
                rotate_y: 0.0,
                brightness: 1.0,
            },
            CardPosition::ViewedLeft => {
                // Fan out by recency: the card left most recently sits
                // nearest the active one.
                let current_visit = self.visit_order(self.current).unwrap_or(0);
                let visit = self.visit_order(index).unwrap_or(0);
                let rank = (current_visit - visit - 1) as f64;
                CardTransform {
                    x: -(STACK_BASE_PX + rank * STACK_STEP_PX)
                        + self.drag_x * STACK_DRAG_BLEED_PX,
                    scale: 0.85,
                    z_index: 30 - rank as i32,
                    opacity: 0.7,
                    rotate_y: -8.0,
                    brightness: 0.6,
                }
            }
            CardPosition::UnviewedRight => {
                // Fan out in list order among the not-yet-seen cards.
                let rank = (0..index)
                    .filter(|i| !self.viewed.contains(i))
                    .count() as f64;
                CardTransform {
                    x: STACK_BASE_PX + rank * STACK_STEP_PX + self.drag_x * STACK_DRAG_BLEED_PX,
                    scale: 0.85,
                    z_index: 20 - rank as i32,
                    opacity: 0.7,
                    rotate_y: 8.0,
                    brightness: 0.6,
                }
            }
            CardPosition::Hidden => CardTransform {
                x: if index < self.current {
                    -OFFSCREEN_PX
                } else {
                    OFFSCREEN_PX
                },
                scale: 0.7,
                z_index: 0,
                opacity: 0.0,
                rotate_y: 0.0,
                brightness: 1.0,
            },
        }
    }

    fn visit_order(&self, index: usize) -> Option<usize> {
        self.viewed.iter().position(|&i| i == index)
    }
}

/// Whether a released gesture clears either swipe threshold.
pub fn swipe_triggers(offset_px: f64, velocity: f64) -> bool {
    offset_px.abs() > SWIPE_DISTANCE_PX || velocity.abs() > SWIPE_VELOCITY
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settled(state: &mut CarouselState) {
        state.settle();
    }

    #[test]
    fn test_advance_then_retreat_round_trips() {
        let mut state = CarouselState::default();
        assert!(state.advance(4));
        settled(&mut state);
        assert!(state.retreat(4));
        settled(&mut state);

        assert_eq!(state.current_index(), 0);
        // the round-tripped index appears exactly once
        assert_eq!(state.viewed_cards(), &[0, 1]);
    }

    #[test]
    fn test_navigation_wraps_modulo_len() {
        let mut state = CarouselState::default();
        assert!(state.retreat(3));
        settled(&mut state);
        assert_eq!(state.current_index(), 2);

        assert!(state.advance(3));
        settled(&mut state);
        assert_eq!(state.current_index(), 0);
    }

    #[test]
    fn test_navigation_rejected_while_animating_or_empty() {
        let mut state = CarouselState::default();
        assert!(!state.advance(0));
        assert!(!state.retreat(0));

        assert!(state.advance(5));
        // guard still held: second advance is a no-op
        assert!(!state.advance(5));
        assert_eq!(state.current_index(), 1);

        settled(&mut state);
        assert!(state.advance(5));
        assert_eq!(state.current_index(), 2);
    }

    #[test]
    fn test_viewed_history_is_append_only_and_deduplicated() {
        let mut state = CarouselState::default();
        for _ in 0..3 {
            state.advance(3);
            settled(&mut state);
        }
        // wrapped back to 0; no duplicate entry
        assert_eq!(state.current_index(), 0);
        assert_eq!(state.viewed_cards(), &[0, 1, 2]);
    }

    #[test]
    fn test_discarded_gesture_restores_state_exactly() {
        let mut state = CarouselState::default();
        state.advance(4);
        settled(&mut state);
        let before = state.clone();

        state.drag_to(30.0);
        assert!(state.drag_offset() > 0.0);
        assert!(!state.end_drag(30.0, 120.0, 4));
        assert_eq!(state, before);
    }

    #[test]
    fn test_swipe_resolves_by_distance_or_velocity() {
        assert!(!swipe_triggers(50.0, 300.0));
        assert!(swipe_triggers(51.0, 0.0));
        assert!(swipe_triggers(0.0, 301.0));
        assert!(swipe_triggers(-51.0, 0.0));

        // distance swipe left → next card
        let mut state = CarouselState::default();
        assert!(state.end_drag(-80.0, 0.0, 3));
        assert_eq!(state.current_index(), 1);
        assert_eq!(state.drag_offset(), 0.0);
        settled(&mut state);

        // velocity swipe right → previous card
        assert!(state.end_drag(10.0, 400.0, 3));
        assert_eq!(state.current_index(), 0);
    }

    #[test]
    fn test_drag_offset_clamped_to_unit_range() {
        let mut state = CarouselState::default();
        state.drag_to(1000.0);
        assert_eq!(state.drag_offset(), 1.0);
        state.drag_to(-1000.0);
        assert_eq!(state.drag_offset(), -1.0);
        state.drag_to(100.0);
        assert_eq!(state.drag_offset(), 0.5);
    }

    #[test]
    fn test_position_classes() {
        let mut state = CarouselState::default();
        for _ in 0..2 {
            state.advance(5);
            settled(&mut state);
        }
        state.retreat(5);
        settled(&mut state);
        // visited 0, 1, 2 then back to 1
        assert_eq!(state.current_index(), 1);
        assert_eq!(state.position_of(1), CardPosition::Active);
        assert_eq!(state.position_of(0), CardPosition::ViewedLeft);
        assert_eq!(state.position_of(2), CardPosition::Hidden);
        assert_eq!(state.position_of(3), CardPosition::UnviewedRight);
        assert_eq!(state.position_of(4), CardPosition::UnviewedRight);
    }

    #[test]
    fn test_viewed_left_stack_orders_most_recent_first() {
        let mut state = CarouselState::default();
        for _ in 0..3 {
            state.advance(4);
            settled(&mut state);
        }
        // history 0,1,2,3 with 3 active: 2 left most recently
        let near = state.transform_of(2);
        let mid = state.transform_of(1);
        let far = state.transform_of(0);
        assert_eq!(near.x, -280.0);
        assert_eq!(mid.x, -330.0);
        assert_eq!(far.x, -380.0);
        assert!(near.z_index > mid.z_index && mid.z_index > far.z_index);
    }

    #[test]
    fn test_right_stack_fans_out_in_list_order() {
        let state = CarouselState::default();
        let first = state.transform_of(1);
        let second = state.transform_of(2);
        assert_eq!(first.x, 280.0);
        assert_eq!(second.x, 330.0);
        assert_eq!(first.rotate_y, 8.0);
        assert!(first.z_index > second.z_index);
    }

    #[test]
    fn test_active_card_tracks_drag() {
        let mut state = CarouselState::default();
        state.drag_to(100.0);
        let active = state.transform_of(0);
        assert_eq!(active.x, 100.0);
        // stacked cards bleed at half rate
        let stacked = state.transform_of(1);
        assert_eq!(stacked.x, 280.0 + 50.0);
    }

    #[test]
    fn test_hidden_cards_fly_offscreen() {
        let mut state = CarouselState::default();
        state.advance(3);
        settled(&mut state);
        state.retreat(3);
        settled(&mut state);
        // index 1 viewed after current 0 → hidden to the right
        let hidden = state.transform_of(1);
        assert_eq!(hidden.x, 600.0);
        assert_eq!(hidden.opacity, 0.0);
        assert_eq!(hidden.scale, 0.7);
    }
}
