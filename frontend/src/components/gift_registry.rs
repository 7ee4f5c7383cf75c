use yew::prelude::*;

use crate::components::contribute_form::ContributeFormModal;
use crate::components::gift_carousel::GiftCarousel;
use crate::components::payment_overlay::PaymentOverlay;
use crate::components::success_modal::SuccessModal;
use crate::contribution::WorkflowState;
use crate::hooks::use_carousel::use_carousel;
use crate::hooks::use_contribution::use_contribution;
use crate::hooks::use_gifts::use_gifts;
use crate::hooks::use_notices::NoticesHandle;
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct GiftRegistryPageProps {
    pub api: ApiClient,
    pub notices: NoticesHandle,
    pub on_back: Callback<()>,
}

/// The gift registry page: catalog store, carousel and contribution
/// workflow wired together.
#[function_component(GiftRegistryPage)]
pub fn gift_registry_page(props: &GiftRegistryPageProps) -> Html {
    let gifts = use_gifts(&props.api);
    let carousel = use_carousel(gifts.state.catalog.len());
    let contribution =
        use_contribution(&props.api, &gifts.state, &gifts.actions, &props.notices);

    let back = {
        let on_back = props.on_back.clone();
        Callback::from(move |_| on_back.emit(()))
    };

    if gifts.state.loading && gifts.state.catalog.is_empty() {
        return html! {
            <section class="gift-page">
                <div class="page-status">{"Loading gifts..."}</div>
            </section>
        };
    }
    if gifts.state.catalog.is_empty() {
        return html! {
            <section class="gift-page">
                <div class="page-status">{"No gifts available at the moment."}</div>
            </section>
        };
    }

    let workflow = &contribution.workflow;
    let selected_gift = workflow
        .gift_id()
        .and_then(|id| gifts.state.catalog.find(id))
        .cloned();
    let count = gifts.state.catalog.len();

    html! {
        <section class="gift-page">
            <button type="button" class="back-link" onclick={back}>{"‹ Back to Home"}</button>

            <header class="gift-header">
                <span class="gift-eyebrow">{"Gift Registry"}</span>
                <h1>{"Gift The Couple"}</h1>
                <p>{format!("{count} gift{} available", if count == 1 { "" } else { "s" })}</p>
            </header>

            <GiftCarousel
                gifts={gifts.state.catalog.gifts().to_vec()}
                state={carousel.state.clone()}
                actions={carousel.actions.clone()}
                on_contribute={contribution.actions.select.clone()}
            />

            {match (workflow.form(), selected_gift) {
                (Some(form), Some(gift)) => html! {
                    <ContributeFormModal
                        {gift}
                        form={form.clone()}
                        submitting={workflow.is_submitting()}
                        on_edit={contribution.actions.edit.clone()}
                        on_submit={contribution.actions.submit.clone()}
                        on_close={contribution.actions.cancel.clone()}
                    />
                },
                _ => html! {},
            }}

            {if workflow.is_processing_payment() {
                html! { <PaymentOverlay /> }
            } else {
                html! {}
            }}

            {if let WorkflowState::Settled { transaction_no } = workflow.state() {
                html! {
                    <SuccessModal
                        transaction_no={transaction_no.clone()}
                        on_close={contribution.actions.dismiss.clone()}
                    />
                }
            } else {
                html! {}
            }}
        </section>
    }
}
