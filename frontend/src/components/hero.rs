use chrono::NaiveDate;
use gloo::timers::callback::Interval;
use yew::prelude::*;

/// Couple imagery shown on the landing page, rotated on a fixed cadence.
const HERO_IMAGES: [&str; 3] = [
    "/images/couple-1.jpg",
    "/images/couple-2.jpg",
    "/images/couple-3.jpg",
];

const IMAGE_ROTATION_MS: u32 = 5_000;

/// The big day.
const WEDDING_DATE: &str = "2026-12-12";

#[derive(Properties, PartialEq)]
pub struct HeroProps {
    pub on_save_seat: Callback<()>,
    pub on_gift_couple: Callback<()>,
    pub on_invitation: Callback<()>,
}

#[function_component(Hero)]
pub fn hero(props: &HeroProps) -> Html {
    let current_image = use_state_eq(|| 0usize);
    let tick = use_mut_ref(|| 0usize);

    {
        let current_image = current_image.clone();
        let tick = tick.clone();
        use_effect_with((), move |_| {
            let interval = Interval::new(IMAGE_ROTATION_MS, move || {
                let next = (*tick.borrow() + 1) % HERO_IMAGES.len();
                *tick.borrow_mut() = next;
                current_image.set(next);
            });
            move || drop(interval)
        });
    }

    let pick_image = {
        let current_image = current_image.clone();
        let tick = tick.clone();
        move |index: usize| {
            let current_image = current_image.clone();
            let tick = tick.clone();
            Callback::from(move |_| {
                *tick.borrow_mut() = index;
                current_image.set(index);
            })
        }
    };

    let save_seat = {
        let cb = props.on_save_seat.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let gift_couple = {
        let cb = props.on_gift_couple.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let invitation = {
        let cb = props.on_invitation.clone();
        Callback::from(move |_| cb.emit(()))
    };

    html! {
        <section class="hero">
            <div class="hero-text">
                <p class="hero-eyebrow">{"We're getting married"}</p>
                <h1>{"Amara & Tobi"}</h1>
                <p class="hero-date">{"December 12, 2026 · Lagos"}</p>
                {countdown_line()}
                <div class="hero-actions">
                    <button type="button" class="btn btn-primary" onclick={save_seat}>
                        {"Save Your Seat"}
                    </button>
                    <button type="button" class="btn btn-secondary" onclick={gift_couple}>
                        {"Gift the Couple"}
                    </button>
                    <button type="button" class="btn btn-ghost" onclick={invitation}>
                        {"Get Invitation Card"}
                    </button>
                </div>
            </div>
            <div class="hero-gallery">
                <img
                    class="hero-image"
                    src={HERO_IMAGES[*current_image]}
                    alt="The couple"
                />
                <div class="hero-dots">
                    {for HERO_IMAGES.iter().enumerate().map(|(index, _)| {
                        html! {
                            <button
                                type="button"
                                class={classes!("dot", (index == *current_image).then_some("active"))}
                                onclick={pick_image(index)}
                                title={format!("photo {}", index + 1)}
                            ></button>
                        }
                    })}
                </div>
            </div>
        </section>
    }
}

fn countdown_line() -> Html {
    let Ok(wedding) = NaiveDate::parse_from_str(WEDDING_DATE, "%Y-%m-%d") else {
        return html! {};
    };
    let today = chrono::Utc::now().date_naive();
    let days = (wedding - today).num_days();
    let text = match days {
        d if d > 1 => format!("{d} days to go"),
        1 => "Tomorrow!".to_string(),
        0 => "Today is the day!".to_string(),
        _ => "Happily married".to_string(),
    };
    html! { <p class="hero-countdown">{text}</p> }
}
