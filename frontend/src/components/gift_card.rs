use shared::{format_minor, GiftItem};
use yew::prelude::*;

use crate::carousel::{CardPosition, CardTransform};

#[derive(Properties, PartialEq)]
pub struct GiftCardProps {
    pub gift: GiftItem,
    pub position: CardPosition,
    pub transform: CardTransform,
    pub on_contribute: Callback<GiftItem>,
}

/// One registry card. The engine decides where it sits and how it looks;
/// this component only renders the transform it was handed.
#[function_component(GiftCard)]
pub fn gift_card(props: &GiftCardProps) -> Html {
    let gift = &props.gift;
    let t = &props.transform;
    let active = props.position == CardPosition::Active;

    let style = format!(
        "transform: translateX({:.1}px) scale({:.2}) rotateY({:.0}deg); \
         z-index: {}; opacity: {:.2}; filter: brightness({:.2});",
        t.x, t.scale, t.rotate_y, t.z_index, t.opacity, t.brightness
    );

    let position_class = match props.position {
        CardPosition::Active => "active",
        CardPosition::ViewedLeft => "viewed-left",
        CardPosition::UnviewedRight => "unviewed-right",
        CardPosition::Hidden => "hidden",
    };
    let class = classes!(
        "gift-card",
        position_class,
        gift.is_completed.then_some("completed")
    );

    let contribute = {
        let gift = gift.clone();
        let on_contribute = props.on_contribute.clone();
        Callback::from(move |_| on_contribute.emit(gift.clone()))
    };

    html! {
        <div class={class} style={style}>
            {if gift.is_completed {
                html! { <div class="funded-badge">{"Fully Funded"}</div> }
            } else {
                html! {}
            }}

            <h3 class="gift-title">{&gift.title}</h3>
            <div class="gift-image">
                <img src={gift.image_url.clone()} alt={gift.title.clone()} draggable="false" />
            </div>
            <p class="gift-description">{&gift.description}</p>

            <div class="gift-progress">
                <div class="progress-labels">
                    <span>{"Progress"}</span>
                    <span>{format!("{:.0}%", gift.progress)}</span>
                </div>
                <div class="progress-track">
                    <div
                        class="progress-fill"
                        style={format!("width: {:.0}%;", gift.progress.clamp(0.0, 100.0))}
                    ></div>
                </div>
                <div class="progress-labels">
                    <span>{format!("{} contributed", format_minor(gift.raised_amount))}</span>
                    <span>{format!("Goal: {}", format_minor(gift.amount))}</span>
                </div>
            </div>

            {if active {
                html! {
                    <button
                        type="button"
                        class="btn btn-primary contribute-btn"
                        onclick={contribute}
                        disabled={gift.is_completed}
                    >
                        {if gift.is_completed { "Fully Funded" } else { "Contribute" }}
                    </button>
                }
            } else {
                html! {}
            }}
        </div>
    }
}
