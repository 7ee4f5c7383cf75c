use shared::{format_major, format_minor, GiftItem, Representing};
use web_sys::{HtmlInputElement, HtmlSelectElement};
use yew::prelude::*;

use crate::contribution::{suggested_amounts, ContributeForm, FormEdit};

#[derive(Properties, PartialEq)]
pub struct ContributeFormModalProps {
    pub gift: GiftItem,
    pub form: ContributeForm,
    pub submitting: bool,
    pub on_edit: Callback<FormEdit>,
    pub on_submit: Callback<()>,
    pub on_close: Callback<()>,
}

/// Modal form for funding the selected gift. All validation runs in the
/// workflow on submit; the form only collects input.
#[function_component(ContributeFormModal)]
pub fn contribute_form_modal(props: &ContributeFormModalProps) -> Html {
    let gift = &props.gift;
    let form = &props.form;
    // custom-amount text lives here; a quick-pick clears it
    let custom_amount = use_state_eq(String::new);

    let edit_text = |make: fn(String) -> FormEdit| {
        let on_edit = props.on_edit.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            on_edit.emit(make(input.value()));
        })
    };
    let on_name_change = edit_text(FormEdit::Name);
    let on_email_change = edit_text(FormEdit::Email);
    let on_phone_change = edit_text(FormEdit::Phone);

    let on_representing_change = {
        let on_edit = props.on_edit.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            on_edit.emit(FormEdit::Representing(Representing::from_label(
                &select.value(),
            )));
        })
    };

    let pick_amount = |amount: i64| {
        let on_edit = props.on_edit.clone();
        let custom_amount = custom_amount.clone();
        Callback::from(move |_| {
            custom_amount.set(String::new());
            on_edit.emit(FormEdit::Amount(amount));
        })
    };

    let on_custom_amount_change = {
        let on_edit = props.on_edit.clone();
        let custom_amount = custom_amount.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let raw = input.value();
            let amount = raw
                .chars()
                .filter(char::is_ascii_digit)
                .collect::<String>()
                .parse::<i64>()
                .unwrap_or(0);
            custom_amount.set(raw);
            on_edit.emit(FormEdit::Amount(amount));
        })
    };

    let on_submit = {
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(());
        })
    };
    let on_close = {
        let on_close = props.on_close.clone();
        Callback::from(move |_| on_close.emit(()))
    };

    html! {
        <div class="modal-backdrop">
            <div class="modal contribute-modal">
                <div class="modal-header">
                    <h2>{"Contribute to Gift"}</h2>
                    <p class="gift-name">{&gift.title}</p>
                    <p class="gift-raised">
                        {format!(
                            "{} raised of {}",
                            format_minor(gift.raised_amount),
                            format_minor(gift.amount)
                        )}
                    </p>
                    <button type="button" class="modal-close" title="close" onclick={on_close}>
                        {"×"}
                    </button>
                </div>

                <form class="contribute-form" onsubmit={on_submit}>
                    <div class="form-group">
                        <label for="contribute-name">{"Full Name"}</label>
                        <input
                            type="text"
                            id="contribute-name"
                            placeholder="Enter your full name"
                            value={form.name.clone()}
                            onchange={on_name_change}
                            disabled={props.submitting}
                        />
                    </div>

                    <div class="form-group">
                        <label for="contribute-email">{"Email Address"}</label>
                        <input
                            type="email"
                            id="contribute-email"
                            placeholder="Enter your email address"
                            value={form.email.clone()}
                            onchange={on_email_change}
                            disabled={props.submitting}
                        />
                    </div>

                    <div class="form-group">
                        <label for="contribute-phone">{"Phone Number"}</label>
                        <input
                            type="tel"
                            id="contribute-phone"
                            placeholder="08123456789"
                            value={form.phone.clone()}
                            onchange={on_phone_change}
                            disabled={props.submitting}
                        />
                    </div>

                    <div class="form-group">
                        <label for="contribute-representing">{"Representing"}</label>
                        <select
                            id="contribute-representing"
                            title="representing"
                            onchange={on_representing_change}
                            disabled={props.submitting}
                        >
                            <option value="" selected={form.representing.is_none()} disabled={true}>
                                {"Select who you're representing"}
                            </option>
                            {for Representing::ALL.iter().map(|r| html! {
                                <option
                                    value={r.label()}
                                    selected={form.representing == Some(*r)}
                                >
                                    {r.label()}
                                </option>
                            })}
                        </select>
                    </div>

                    <div class="form-group">
                        <label>{"Contribution Amount"}</label>
                        <div class="amount-grid">
                            {for suggested_amounts(gift).into_iter().map(|amount| {
                                let selected = form.amount == amount && custom_amount.is_empty();
                                html! {
                                    <button
                                        type="button"
                                        class={classes!("amount-pick", selected.then_some("selected"))}
                                        onclick={pick_amount(amount)}
                                        disabled={props.submitting}
                                    >
                                        {format_major(amount)}
                                    </button>
                                }
                            })}
                        </div>
                        <input
                            type="text"
                            class="custom-amount"
                            placeholder="Enter custom amount"
                            value={(*custom_amount).clone()}
                            onchange={on_custom_amount_change}
                            disabled={props.submitting}
                        />
                        <div class="amount-hints">
                            {if let Some(min) = gift.min_per_guest {
                                html! { <div>{format!("Minimum: {}", format_minor(min))}</div> }
                            } else {
                                html! {}
                            }}
                            {if let Some(max) = gift.max_per_guest {
                                html! { <div>{format!("Maximum: {}", format_minor(max))}</div> }
                            } else {
                                html! {}
                            }}
                            <div>{format!("Remaining: {}", format_minor(gift.remaining_amount()))}</div>
                        </div>
                    </div>

                    <button
                        type="submit"
                        class="btn btn-primary submit-btn"
                        disabled={props.submitting || form.amount <= 0}
                    >
                        {if props.submitting {
                            "Processing...".to_string()
                        } else {
                            format!("Contribute {}", format_major(form.amount))
                        }}
                    </button>
                </form>
            </div>
        </div>
    }
}
