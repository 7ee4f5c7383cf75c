use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys::{HtmlAnchorElement, HtmlInputElement};
use yew::prelude::*;

use crate::hooks::use_notices::NoticesHandle;
use crate::services::api::ApiClient;
use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct InvitationCardPageProps {
    pub api: ApiClient,
    pub notices: NoticesHandle,
    /// Code handed over by the RSVP flow; the URL `?code=` parameter is
    /// the fallback.
    pub initial_code: Option<String>,
    pub on_back: Callback<()>,
}

#[derive(Clone, PartialEq)]
enum CardPhase {
    NeedsCode,
    Loading,
    Ready {
        image_url: String,
        filename: String,
        guest_name: Option<String>,
    },
    Failed {
        message: String,
    },
}

/// Invitation-card retrieval page: turns an invitation code into a
/// downloadable access-card image.
#[function_component(InvitationCardPage)]
pub fn invitation_card_page(props: &InvitationCardPageProps) -> Html {
    let phase = use_state_eq(|| CardPhase::Loading);
    let code_input = use_state_eq(String::new);

    let generate = {
        let api = props.api.clone();
        let notices = props.notices.clone();
        let phase = phase.clone();
        Callback::from(move |code: String| {
            let api = api.clone();
            let notices = notices.clone();
            let phase = phase.clone();
            spawn_local(async move {
                phase.set(CardPhase::Loading);
                match api.generate_access_card(&code).await {
                    Ok(card) => {
                        let Some(image_url) = object_url_for_png(&card.bytes) else {
                            phase.set(CardPhase::Failed {
                                message: "Could not display the invitation card".to_string(),
                            });
                            return;
                        };
                        // best-effort lookup for a personal greeting
                        let guest_name = match api.guest_by_code(&code).await {
                            Ok(guest) if !guest.name.is_empty() => Some(guest.name),
                            Ok(_) => None,
                            Err(err) => {
                                Logger::debug_with_component(
                                    "invitation-card",
                                    &format!("guest lookup failed: {err:#}"),
                                );
                                None
                            }
                        };
                        notices.success("Invitation card generated successfully!");
                        phase.set(CardPhase::Ready {
                            image_url,
                            filename: card.filename,
                            guest_name,
                        });
                    }
                    Err(err) => {
                        notices.error("Failed to generate invitation card");
                        phase.set(CardPhase::Failed {
                            message: format!("{err:#}"),
                        });
                    }
                }
            });
        })
    };

    {
        let generate = generate.clone();
        let phase = phase.clone();
        let initial_code = props.initial_code.clone();
        use_effect_with((), move |_| {
            match initial_code.or_else(code_from_url) {
                Some(code) => generate.emit(code),
                None => phase.set(CardPhase::NeedsCode),
            }
            || ()
        });
    }

    let on_code_change = {
        let code_input = code_input.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            code_input.set(input.value());
        })
    };
    let submit_code = {
        let generate = generate.clone();
        let code_input = code_input.clone();
        let notices = props.notices.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            let code = code_input.trim().to_string();
            if code.is_empty() {
                notices.error("Please enter your invitation code");
                return;
            }
            generate.emit(code);
        })
    };

    let download = {
        let phase = phase.clone();
        let notices = props.notices.clone();
        Callback::from(move |_| {
            let CardPhase::Ready {
                image_url,
                filename,
                ..
            } = &*phase
            else {
                return;
            };
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let Ok(anchor) = document
                .create_element("a")
                .map(|element| element.unchecked_into::<HtmlAnchorElement>())
            else {
                return;
            };
            anchor.set_href(image_url);
            anchor.set_download(filename);
            anchor.click();
            notices.success("Invitation card downloaded!");
        })
    };

    let back = {
        let on_back = props.on_back.clone();
        Callback::from(move |_| on_back.emit(()))
    };

    html! {
        <section class="invitation-page">
            <button type="button" class="back-link" onclick={back}>{"‹ Back to Home"}</button>

            {match &*phase {
                CardPhase::Loading => html! {
                    <div class="invitation-status">
                        <div class="spinner"></div>
                        <p>{"Generating your invitation card..."}</p>
                    </div>
                },
                CardPhase::NeedsCode => html! {
                    <div class="invitation-card-box">
                        <h1>{"Your Invitation Card"}</h1>
                        <p>{"Enter the invitation code from your RSVP to pick up your card."}</p>
                        <form class="code-form" onsubmit={submit_code}>
                            <input
                                type="text"
                                placeholder="Invitation code"
                                value={(*code_input).clone()}
                                onchange={on_code_change}
                            />
                            <button type="submit" class="btn btn-primary">{"Get My Card"}</button>
                        </form>
                    </div>
                },
                CardPhase::Failed { message } => html! {
                    <div class="invitation-card-box error">
                        <h1>{"Something went wrong"}</h1>
                        <p>{message}</p>
                        <form class="code-form" onsubmit={submit_code.clone()}>
                            <input
                                type="text"
                                placeholder="Invitation code"
                                value={(*code_input).clone()}
                                onchange={on_code_change.clone()}
                            />
                            <button type="submit" class="btn btn-primary">{"Try Again"}</button>
                        </form>
                    </div>
                },
                CardPhase::Ready { image_url, guest_name, .. } => html! {
                    <div class="invitation-card-box">
                        {match guest_name {
                            Some(name) => html! { <h1>{format!("Welcome, {name}!")}</h1> },
                            None => html! { <h1>{"Your Invitation Card"}</h1> },
                        }}
                        <img class="invitation-image" src={image_url.clone()} alt="Invitation card" />
                        <button type="button" class="btn btn-primary" onclick={download}>
                            {"Download Card"}
                        </button>
                    </div>
                },
            }}
        </section>
    }
}

/// Read `?code=` from the current location.
fn code_from_url() -> Option<String> {
    let search = web_sys::window()?.location().search().ok()?;
    if search.is_empty() {
        return None;
    }
    let params = web_sys::UrlSearchParams::new_with_str(&search).ok()?;
    params.get("code").filter(|code| !code.is_empty())
}

/// Wrap raw PNG bytes in a blob object URL the `<img>` tag can show.
fn object_url_for_png(bytes: &[u8]) -> Option<String> {
    let parts = js_sys::Array::new();
    parts.push(&js_sys::Uint8Array::from(bytes).buffer());
    let options = web_sys::BlobPropertyBag::new();
    options.set_type("image/png");
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options).ok()?;
    web_sys::Url::create_object_url_with_blob(&blob).ok()
}
