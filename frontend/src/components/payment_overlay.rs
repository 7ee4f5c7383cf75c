use yew::prelude::*;

/// Full-screen overlay shown while the checkout widget is active or the
/// confirmation call is in flight.
#[function_component(PaymentOverlay)]
pub fn payment_overlay() -> Html {
    html! {
        <div class="payment-overlay">
            <div class="payment-overlay-card">
                <div class="spinner"></div>
                <h3>{"Processing Payment"}</h3>
                <p>{"Please complete the payment in the checkout window..."}</p>
            </div>
        </div>
    }
}
