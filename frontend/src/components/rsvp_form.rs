use shared::SaveSeatRequest;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::hooks::use_notices::NoticesHandle;
use crate::services::api::ApiClient;
use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct RsvpPageProps {
    pub api: ApiClient,
    pub notices: NoticesHandle,
    pub on_back: Callback<()>,
    /// Navigate to the invitation-card page with a freshly issued code.
    pub on_view_invitation: Callback<String>,
}

/// "Save a seat" RSVP page. A successful registration shows the guest's
/// invitation code with a path straight to their card.
#[function_component(RsvpPage)]
pub fn rsvp_page(props: &RsvpPageProps) -> Html {
    let name = use_state_eq(String::new);
    let phone = use_state_eq(String::new);
    let representing = use_state_eq(|| "bride".to_string());
    let extra = use_state_eq(|| "0".to_string());
    let submitting = use_state_eq(|| false);
    let invitation_code = use_state_eq(|| Option::<String>::None);

    let on_name_change = {
        let name = name.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            name.set(input.value());
        })
    };
    let on_phone_change = {
        let phone = phone.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            phone.set(input.value());
        })
    };
    let on_representing_change = {
        let representing = representing.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            representing.set(select.value());
        })
    };
    let on_extra_change = {
        let extra = extra.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            extra.set(select.value());
        })
    };

    let on_submit = {
        let api = props.api.clone();
        let notices = props.notices.clone();
        let name = name.clone();
        let phone = phone.clone();
        let representing = representing.clone();
        let extra = extra.clone();
        let submitting = submitting.clone();
        let invitation_code = invitation_code.clone();

        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            if name.trim().is_empty() || phone.trim().is_empty() {
                notices.error("Please fill in your name and phone number");
                return;
            }

            let request = SaveSeatRequest {
                name: name.trim().to_string(),
                phone: phone.trim().to_string(),
                representing: (*representing).clone(),
                extra: (*extra).clone(),
            };

            let api = api.clone();
            let notices = notices.clone();
            let name = name.clone();
            let phone = phone.clone();
            let representing = representing.clone();
            let extra = extra.clone();
            let submitting = submitting.clone();
            let invitation_code = invitation_code.clone();

            spawn_local(async move {
                submitting.set(true);
                match api.save_seat(&request).await {
                    Ok(guest) => {
                        Logger::info_with_component(
                            "rsvp",
                            &format!("seat saved, code {}", guest.invitation_code),
                        );
                        invitation_code.set(Some(guest.invitation_code));
                        name.set(String::new());
                        phone.set(String::new());
                        representing.set("bride".to_string());
                        extra.set("0".to_string());
                    }
                    Err(err) => {
                        notices.error(format!("Failed to save your seat: {err:#}"));
                    }
                }
                submitting.set(false);
            });
        })
    };

    let back = {
        let on_back = props.on_back.clone();
        Callback::from(move |_| on_back.emit(()))
    };

    let close_modal = {
        let invitation_code = invitation_code.clone();
        Callback::from(move |_| invitation_code.set(None))
    };
    let view_invitation = {
        let invitation_code = invitation_code.clone();
        let on_view_invitation = props.on_view_invitation.clone();
        Callback::from(move |_| {
            if let Some(code) = (*invitation_code).clone() {
                on_view_invitation.emit(code);
            }
        })
    };

    html! {
        <section class="rsvp-page">
            <button type="button" class="back-link" onclick={back}>{"‹ Back to Home"}</button>

            <div class="rsvp-card">
                <h1>{"Save Your Seat"}</h1>
                <p class="rsvp-subtitle">{"Join us in celebrating our special day"}</p>

                <form class="rsvp-form" onsubmit={on_submit}>
                    <div class="form-group">
                        <label for="rsvp-name">{"Full Name"}</label>
                        <input
                            type="text"
                            id="rsvp-name"
                            placeholder="Enter your full name"
                            value={(*name).clone()}
                            onchange={on_name_change}
                            disabled={*submitting}
                        />
                    </div>

                    <div class="form-group">
                        <label for="rsvp-phone">{"Phone Number"}</label>
                        <input
                            type="tel"
                            id="rsvp-phone"
                            placeholder="08123456789"
                            value={(*phone).clone()}
                            onchange={on_phone_change}
                            disabled={*submitting}
                        />
                    </div>

                    <div class="form-group">
                        <label for="rsvp-representing">{"You are a guest of"}</label>
                        <select
                            id="rsvp-representing"
                            title="guest of"
                            onchange={on_representing_change}
                            disabled={*submitting}
                        >
                            <option value="bride" selected={*representing == "bride"}>{"The Bride"}</option>
                            <option value="groom" selected={*representing == "groom"}>{"The Groom"}</option>
                            <option value="both" selected={*representing == "both"}>{"Both"}</option>
                            <option value="friend" selected={*representing == "friend"}>{"Friend of the Couple"}</option>
                        </select>
                    </div>

                    <div class="form-group">
                        <label for="rsvp-extra">{"Bringing a plus one?"}</label>
                        <select
                            id="rsvp-extra"
                            title="plus one"
                            onchange={on_extra_change}
                            disabled={*submitting}
                        >
                            <option value="0" selected={*extra == "0"}>{"Just me"}</option>
                            <option value="1" selected={*extra == "1"}>{"Yes, one guest"}</option>
                        </select>
                    </div>

                    <button type="submit" class="btn btn-primary" disabled={*submitting}>
                        {if *submitting { "Saving your seat..." } else { "Save My Seat" }}
                    </button>
                </form>
            </div>

            {if let Some(code) = (*invitation_code).clone() {
                html! {
                    <div class="modal-backdrop">
                        <div class="modal rsvp-success-modal">
                            <div class="modal-header">
                                <div class="success-check">{"✓"}</div>
                                <h2>{"Your seat is saved!"}</h2>
                                <p>{"We can't wait to celebrate with you"}</p>
                            </div>
                            <div class="modal-body">
                                <p>{"Keep your invitation code; you'll need it to pick up your access card."}</p>
                                <div class="transaction-box">
                                    <code>{code}</code>
                                </div>
                                <button type="button" class="btn btn-primary" onclick={view_invitation}>
                                    {"View Invitation Card"}
                                </button>
                                <button type="button" class="btn btn-ghost" onclick={close_modal}>
                                    {"Close"}
                                </button>
                            </div>
                        </div>
                    </div>
                }
            } else {
                html! {}
            }}
        </section>
    }
}
