mod carousel;
mod catalog;
mod components;
mod contribution;
mod hooks;
mod services;

use yew::prelude::*;

use components::gift_registry::GiftRegistryPage;
use components::hero::Hero;
use components::invitation_card::InvitationCardPage;
use components::notices::NoticeStack;
use components::rsvp_form::RsvpPage;
use hooks::use_notices::use_notices;
use services::api::ApiClient;

#[derive(Clone, PartialEq)]
enum Page {
    Home,
    GiftRegistry,
    SaveSeat,
    Invitation { code: Option<String> },
}

#[function_component(App)]
fn app() -> Html {
    let page = use_state_eq(|| Page::Home);
    let notices = use_notices();
    let api = use_memo((), |_| ApiClient::new());

    let goto = |target: Page| {
        let page = page.clone();
        Callback::from(move |_| page.set(target.clone()))
    };
    let go_home = goto(Page::Home);
    let go_gifts = goto(Page::GiftRegistry);
    let go_save_seat = goto(Page::SaveSeat);
    let go_invitation = goto(Page::Invitation { code: None });

    let view_invitation = {
        let page = page.clone();
        Callback::from(move |code: String| {
            page.set(Page::Invitation { code: Some(code) });
        })
    };

    html! {
        <>
            <NoticeStack notices={notices.items()} />
            {match &*page {
                Page::Home => html! {
                    <Hero
                        on_save_seat={go_save_seat.clone()}
                        on_gift_couple={go_gifts.clone()}
                        on_invitation={go_invitation.clone()}
                    />
                },
                Page::GiftRegistry => html! {
                    <GiftRegistryPage
                        api={(*api).clone()}
                        notices={notices.clone()}
                        on_back={go_home.clone()}
                    />
                },
                Page::SaveSeat => html! {
                    <RsvpPage
                        api={(*api).clone()}
                        notices={notices.clone()}
                        on_back={go_home.clone()}
                        on_view_invitation={view_invitation.clone()}
                    />
                },
                Page::Invitation { code } => html! {
                    <InvitationCardPage
                        api={(*api).clone()}
                        notices={notices.clone()}
                        initial_code={code.clone()}
                        on_back={go_home.clone()}
                    />
                },
            }}
        </>
    }
}

fn main() {
    yew::Renderer::<App>::new().render();
}
