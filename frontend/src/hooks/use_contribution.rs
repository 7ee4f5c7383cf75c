use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use shared::GiftItem;

use crate::contribution::{ContributionWorkflow, FormEdit};
use crate::hooks::use_gifts::{GiftsState, UseGiftsActions};
use crate::hooks::use_notices::NoticesHandle;
use crate::services::api::ApiClient;
use crate::services::logging::Logger;
use crate::services::payment::{self, PaymentOutcome};

#[derive(Clone, PartialEq)]
pub struct ContributionActions {
    pub select: Callback<GiftItem>,
    pub cancel: Callback<()>,
    pub edit: Callback<FormEdit>,
    pub submit: Callback<()>,
    pub dismiss: Callback<()>,
}

pub struct UseContributionResult {
    pub workflow: ContributionWorkflow,
    pub actions: ContributionActions,
}

/// Drives the contribution workflow machine.
///
/// The submit flow is one linear async driver that owns its machine clone
/// end to end: validate → create contribution → checkout session →
/// confirm → optimistic patch → reconcile refresh. Every intermediate
/// state lands in the yew handle so the UI tracks it; late callbacks are
/// already guarded inside the machine.
#[hook]
pub fn use_contribution(
    api: &ApiClient,
    gifts: &GiftsState,
    gift_actions: &UseGiftsActions,
    notices: &NoticesHandle,
) -> UseContributionResult {
    let workflow = use_state_eq(ContributionWorkflow::default);

    let select = {
        let workflow = workflow.clone();
        let notices = notices.clone();
        Callback::from(move |gift: GiftItem| {
            let mut machine = (*workflow).clone();
            match machine.select(&gift) {
                Ok(()) => workflow.set(machine),
                Err(err) => notices.error(err.to_string()),
            }
        })
    };

    let cancel = {
        let workflow = workflow.clone();
        Callback::from(move |_| {
            let mut machine = (*workflow).clone();
            machine.cancel();
            workflow.set(machine);
        })
    };

    let edit = {
        let workflow = workflow.clone();
        Callback::from(move |field: FormEdit| {
            let mut machine = (*workflow).clone();
            machine.edit_form(field);
            workflow.set(machine);
        })
    };

    let dismiss = {
        let workflow = workflow.clone();
        Callback::from(move |_| {
            let mut machine = (*workflow).clone();
            machine.dismiss();
            workflow.set(machine);
        })
    };

    let submit = {
        let api = api.clone();
        let workflow = workflow.clone();
        let notices = notices.clone();
        let catalog = gifts.catalog.clone();
        let gift_actions = gift_actions.clone();

        Callback::from(move |_| {
            let Some(gift) = workflow
                .gift_id()
                .and_then(|id| catalog.find(id))
                .cloned()
            else {
                return;
            };

            let mut machine = (*workflow).clone();
            let request = match machine.begin_submit(&gift) {
                Ok(request) => request,
                Err(err) => {
                    notices.error(err.to_string());
                    return;
                }
            };
            workflow.set(machine.clone());

            let api = api.clone();
            let workflow = workflow.clone();
            let notices = notices.clone();
            let gift_actions = gift_actions.clone();

            spawn_local(async move {
                match api.contribute(&gift.id, &request).await {
                    Err(err) => {
                        machine.submit_failed();
                        workflow.set(machine);
                        notices.error(format!("{err:#}"));
                    }
                    Ok(receipt) => {
                        let Some(config) = machine.submit_succeeded(
                            &gift.title,
                            &receipt.transaction_no,
                            payment::PUBLIC_KEY,
                        ) else {
                            return;
                        };
                        workflow.set(machine.clone());
                        notices.success("Redirecting to payment...");

                        let session = match payment::launch(&config) {
                            Ok(session) => session,
                            Err(err) => {
                                Logger::error_with_component(
                                    "contribution",
                                    &format!("checkout launch failed: {err:#}"),
                                );
                                machine.payment_cancelled();
                                workflow.set(machine);
                                notices.error("Unable to open the payment window");
                                return;
                            }
                        };

                        match session.outcome().await {
                            PaymentOutcome::Cancelled => {
                                machine.payment_cancelled();
                                workflow.set(machine);
                                notices.info("Payment was cancelled.");
                            }
                            PaymentOutcome::Completed { reference } => {
                                machine.payment_succeeded(&reference);
                                workflow.set(machine.clone());

                                match api.confirm(&reference).await {
                                    Ok(()) => {
                                        let Some(confirmed) = machine.confirm_succeeded() else {
                                            return;
                                        };
                                        workflow.set(machine);
                                        Logger::info_with_component(
                                            "contribution",
                                            &format!(
                                                "contribution {} confirmed",
                                                confirmed.transaction_no
                                            ),
                                        );
                                        gift_actions.apply_contribution.emit((
                                            confirmed.gift_id.clone(),
                                            confirmed.amount_minor,
                                        ));
                                        notices.success(format!(
                                            "Thank you for your generous contribution! \
                                             You've helped fund {}.",
                                            confirmed.gift_title
                                        ));
                                        // reconcile with server-authoritative
                                        // totals; never blocks the notice
                                        gift_actions.refresh.emit(());
                                    }
                                    Err(err) => {
                                        machine.confirm_failed();
                                        workflow.set(machine);
                                        Logger::error_with_component(
                                            "contribution",
                                            &format!("confirmation failed: {err:#}"),
                                        );
                                        notices.error(format!(
                                            "Payment completed but confirmation failed: {err:#}"
                                        ));
                                    }
                                }
                            }
                        }
                    }
                }
            });
        })
    };

    UseContributionResult {
        workflow: (*workflow).clone(),
        actions: ContributionActions {
            select,
            cancel,
            edit,
            submit,
            dismiss,
        },
    }
}
