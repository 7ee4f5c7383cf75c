use std::rc::Rc;

use gloo::timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::carousel::{swipe_triggers, CarouselState, SETTLE_MS};

pub enum CarouselAction {
    Advance { len: usize },
    Retreat { len: usize },
    Drag { offset_px: f64 },
    EndDrag { offset_px: f64, velocity: f64, len: usize },
    Settle,
}

impl Reducible for CarouselState {
    type Action = CarouselAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            CarouselAction::Advance { len } => {
                next.advance(len);
            }
            CarouselAction::Retreat { len } => {
                next.retreat(len);
            }
            CarouselAction::Drag { offset_px } => next.drag_to(offset_px),
            CarouselAction::EndDrag {
                offset_px,
                velocity,
                len,
            } => {
                next.end_drag(offset_px, velocity, len);
            }
            CarouselAction::Settle => next.settle(),
        }
        Rc::new(next)
    }
}

#[derive(Clone, PartialEq)]
pub struct CarouselActions {
    pub next: Callback<()>,
    pub prev: Callback<()>,
    /// Live pointer displacement in pixels.
    pub drag: Callback<f64>,
    /// Final displacement and release velocity of a completed gesture.
    pub end_drag: Callback<(f64, f64)>,
}

pub struct UseCarouselResult {
    pub state: CarouselState,
    pub actions: CarouselActions,
}

/// Owns the carousel view state; every accepted navigation schedules the
/// settle that releases the animation guard after its 300 ms run.
#[hook]
pub fn use_carousel(len: usize) -> UseCarouselResult {
    let state = use_reducer_eq(CarouselState::default);

    let next = {
        let state = state.clone();
        Callback::from(move |_| {
            if state.is_animating() || len == 0 {
                return;
            }
            state.dispatch(CarouselAction::Advance { len });
            schedule_settle(state.clone());
        })
    };

    let prev = {
        let state = state.clone();
        Callback::from(move |_| {
            if state.is_animating() || len == 0 {
                return;
            }
            state.dispatch(CarouselAction::Retreat { len });
            schedule_settle(state.clone());
        })
    };

    let drag = {
        let state = state.clone();
        Callback::from(move |offset_px: f64| {
            state.dispatch(CarouselAction::Drag { offset_px });
        })
    };

    let end_drag = {
        let state = state.clone();
        Callback::from(move |(offset_px, velocity): (f64, f64)| {
            if len == 0 {
                return;
            }
            let navigates = swipe_triggers(offset_px, velocity) && !state.is_animating();
            state.dispatch(CarouselAction::EndDrag {
                offset_px,
                velocity,
                len,
            });
            if navigates {
                schedule_settle(state.clone());
            }
        })
    };

    UseCarouselResult {
        state: (*state).clone(),
        actions: CarouselActions {
            next,
            prev,
            drag,
            end_drag,
        },
    }
}

fn schedule_settle(state: UseReducerHandle<CarouselState>) {
    spawn_local(async move {
        TimeoutFuture::new(SETTLE_MS).await;
        state.dispatch(CarouselAction::Settle);
    });
}
