use gloo::timers::future::TimeoutFuture;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use yew::prelude::*;

use crate::services::logging::Logger;

#[derive(Properties, PartialEq)]
pub struct SuccessModalProps {
    pub transaction_no: String,
    pub on_close: Callback<()>,
}

/// Post-settlement modal: shows the transaction number with a copy
/// action so the guest can keep it for reference.
#[function_component(SuccessModal)]
pub fn success_modal(props: &SuccessModalProps) -> Html {
    let copied = use_state_eq(|| false);

    let copy = {
        let transaction_no = props.transaction_no.clone();
        let copied = copied.clone();
        Callback::from(move |_| {
            let transaction_no = transaction_no.clone();
            let copied = copied.clone();
            spawn_local(async move {
                let Some(window) = web_sys::window() else {
                    return;
                };
                let promise = window.navigator().clipboard().write_text(&transaction_no);
                match JsFuture::from(promise).await {
                    Ok(_) => {
                        copied.set(true);
                        TimeoutFuture::new(2_000).await;
                        copied.set(false);
                    }
                    Err(_) => {
                        Logger::warn_with_component(
                            "success-modal",
                            "failed to copy transaction number",
                        );
                    }
                }
            });
        })
    };

    let close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_| on_close.emit(()))
    };

    html! {
        <div class="modal-backdrop">
            <div class="modal success-modal">
                <div class="modal-header">
                    <div class="success-check">{"✓"}</div>
                    <h2>{"Contribution Confirmed!"}</h2>
                    <p>{"Thank you for your generosity"}</p>
                </div>
                <div class="modal-body">
                    <p>
                        {"Your contribution has been successfully processed. \
                          Please save your transaction number for reference."}
                    </p>
                    <div class="transaction-box">
                        <code>{&props.transaction_no}</code>
                        <button type="button" onclick={copy}>
                            {if *copied { "Copied!" } else { "Copy" }}
                        </button>
                    </div>
                    <button type="button" class="btn btn-primary" onclick={close}>
                        {"Continue Browsing"}
                    </button>
                </div>
            </div>
        </div>
    }
}
