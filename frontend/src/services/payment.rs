//! Payment boundary: the external inline checkout widget, wrapped as a
//! one-shot session future.
//!
//! The widget is loaded by `index.html` and exposes `PaystackPop.setup`.
//! We hand it a configuration and observe its lifecycle through two
//! callbacks; exactly one of them resolves the session, exactly once.
//! Nothing here controls the widget once it is open.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::{anyhow, Context, Result};
use futures::channel::oneshot;
use js_sys::Reflect;
use wasm_bindgen::prelude::*;

use crate::contribution::PaymentConfig;

/// Checkout public key, injected at build time.
pub const PUBLIC_KEY: &str = match option_env!("PAYSTACK_PUBLIC_KEY") {
    Some(key) => key,
    None => "pk_test_placeholder",
};

#[wasm_bindgen]
extern "C" {
    type PaystackHandler;

    #[wasm_bindgen(js_namespace = PaystackPop, js_name = setup, catch)]
    fn paystack_setup(options: &JsValue) -> std::result::Result<PaystackHandler, JsValue>;

    #[wasm_bindgen(method, js_name = openIframe)]
    fn open_iframe(this: &PaystackHandler);
}

/// How a payment session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentOutcome {
    /// The widget reported success, carrying the payment reference.
    Completed { reference: String },
    /// The widget was closed without completing. Not an error.
    Cancelled,
}

/// A launched checkout, resolved by awaiting [`PaymentSession::outcome`].
pub struct PaymentSession {
    receiver: oneshot::Receiver<PaymentOutcome>,
}

impl PaymentSession {
    /// Wait for the widget to finish. A torn-down channel counts as a
    /// cancellation so the workflow always reaches a stable state.
    pub async fn outcome(self) -> PaymentOutcome {
        self.receiver.await.unwrap_or(PaymentOutcome::Cancelled)
    }
}

/// Open the checkout widget for `config`.
pub fn launch(config: &PaymentConfig) -> Result<PaymentSession> {
    let options = js_sys::JSON::parse(
        &serde_json::to_string(config).context("failed to serialize checkout options")?,
    )
    .map_err(|_| anyhow!("failed to build checkout options"))?;

    let (sender, receiver) = oneshot::channel();
    let sender = Rc::new(RefCell::new(Some(sender)));

    let on_success = {
        let sender = sender.clone();
        Closure::<dyn FnMut(JsValue)>::new(move |response: JsValue| {
            let reference = Reflect::get(&response, &JsValue::from_str("reference"))
                .ok()
                .and_then(|value| value.as_string())
                .unwrap_or_default();
            if let Some(sender) = sender.borrow_mut().take() {
                let _ = sender.send(PaymentOutcome::Completed { reference });
            }
        })
    };
    let on_close = {
        let sender = sender.clone();
        Closure::<dyn FnMut()>::new(move || {
            if let Some(sender) = sender.borrow_mut().take() {
                let _ = sender.send(PaymentOutcome::Cancelled);
            }
        })
    };

    // The options object owns the callbacks from here on; their lifetime
    // is tied to the widget holding them.
    Reflect::set(
        &options,
        &JsValue::from_str("callback"),
        &on_success.into_js_value(),
    )
    .map_err(|_| anyhow!("failed to attach success callback"))?;
    Reflect::set(
        &options,
        &JsValue::from_str("onClose"),
        &on_close.into_js_value(),
    )
    .map_err(|_| anyhow!("failed to attach close callback"))?;

    let handler = paystack_setup(&options)
        .map_err(|_| anyhow!("checkout script is not available"))?;
    handler.open_iframe();

    Ok(PaymentSession { receiver })
}
