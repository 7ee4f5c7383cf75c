use shared::GiftItem;
use yew::prelude::*;

use crate::carousel::{CardPosition, CarouselState};
use crate::components::gift_card::GiftCard;
use crate::hooks::use_carousel::CarouselActions;

#[derive(Properties, PartialEq)]
pub struct GiftCarouselProps {
    pub gifts: Vec<GiftItem>,
    pub state: CarouselState,
    pub actions: CarouselActions,
    pub on_contribute: Callback<GiftItem>,
}

/// Live pointer-gesture bookkeeping. The engine only sees displacement
/// and release velocity.
#[derive(Default)]
struct DragTracker {
    start_x: f64,
    last_x: f64,
    started_at: f64,
    down: bool,
}

/// The registry carousel: arrows, drag gestures on the active card, and
/// one [`GiftCard`] per entry positioned by the engine.
#[function_component(GiftCarousel)]
pub fn gift_carousel(props: &GiftCarouselProps) -> Html {
    let tracker = use_mut_ref(DragTracker::default);

    let len = props.gifts.len();
    let nav_disabled = len < 2 || props.state.is_animating();

    let prev = {
        let prev = props.actions.prev.clone();
        Callback::from(move |_: MouseEvent| prev.emit(()))
    };
    let next = {
        let next = props.actions.next.clone();
        Callback::from(move |_: MouseEvent| next.emit(()))
    };

    let on_pointer_down = {
        let tracker = tracker.clone();
        Callback::from(move |e: PointerEvent| {
            e.prevent_default();
            let mut t = tracker.borrow_mut();
            t.start_x = e.client_x() as f64;
            t.last_x = t.start_x;
            t.started_at = js_sys::Date::now();
            t.down = true;
        })
    };

    let on_pointer_move = {
        let tracker = tracker.clone();
        let drag = props.actions.drag.clone();
        Callback::from(move |e: PointerEvent| {
            let mut t = tracker.borrow_mut();
            if !t.down {
                return;
            }
            t.last_x = e.client_x() as f64;
            drag.emit(t.last_x - t.start_x);
        })
    };

    let release = {
        let tracker = tracker.clone();
        let end_drag = props.actions.end_drag.clone();
        move || {
            let mut t = tracker.borrow_mut();
            if !t.down {
                return;
            }
            t.down = false;
            let offset = t.last_x - t.start_x;
            let elapsed_s = ((js_sys::Date::now() - t.started_at) / 1000.0).max(0.001);
            end_drag.emit((offset, offset / elapsed_s));
        }
    };
    let on_pointer_up = {
        let release = release.clone();
        Callback::from(move |e: PointerEvent| {
            e.prevent_default();
            release();
        })
    };
    let on_pointer_cancel = Callback::from(move |_: PointerEvent| release());

    html! {
        <div class="carousel">
            <button
                type="button"
                class="carousel-arrow left"
                title="previous"
                onclick={prev}
                disabled={nav_disabled}
            >
                {"‹"}
            </button>
            <button
                type="button"
                class="carousel-arrow right"
                title="next"
                onclick={next}
                disabled={nav_disabled}
            >
                {"›"}
            </button>

            <div class="carousel-track">
                {for props.gifts.iter().enumerate().map(|(index, gift)| {
                    let position = props.state.position_of(index);
                    let transform = props.state.transform_of(index);
                    let draggable = position == CardPosition::Active && !gift.is_completed;

                    html! {
                        <div
                            key={gift.id.clone()}
                            class={classes!("card-slot", draggable.then_some("draggable"))}
                            onpointerdown={draggable.then_some(on_pointer_down.clone())}
                            onpointermove={draggable.then_some(on_pointer_move.clone())}
                            onpointerup={draggable.then_some(on_pointer_up.clone())}
                            onpointercancel={draggable.then_some(on_pointer_cancel.clone())}
                            onpointerleave={draggable.then_some(on_pointer_cancel.clone())}
                        >
                            <GiftCard
                                gift={gift.clone()}
                                {position}
                                {transform}
                                on_contribute={props.on_contribute.clone()}
                            />
                        </div>
                    }
                })}
            </div>

            <div class="carousel-dots">
                {for (0..len).map(|index| {
                    let viewed = props.state.viewed_cards().contains(&index);
                    html! {
                        <span class={classes!(
                            "dot",
                            (index == props.state.current_index()).then_some("active"),
                            viewed.then_some("viewed"),
                        )}></span>
                    }
                })}
            </div>
        </div>
    }
}
