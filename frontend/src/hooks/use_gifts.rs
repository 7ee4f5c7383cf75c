use std::rc::Rc;

use shared::GiftItem;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::catalog::GiftCatalog;
use crate::services::api::ApiClient;
use crate::services::logging::Logger;

pub enum CatalogAction {
    /// Atomic wholesale replacement from a successful fetch.
    Replace(Vec<GiftItem>),
    /// One-shot optimistic patch after a confirmed contribution.
    Patch { gift_id: String, amount_minor: i64 },
}

impl Reducible for GiftCatalog {
    type Action = CatalogAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            CatalogAction::Replace(gifts) => next.replace(gifts),
            CatalogAction::Patch {
                gift_id,
                amount_minor,
            } => {
                // a miss means a refresh replaced the entry; reconciliation
                // is already on its way
                let _ = next.apply_contribution(&gift_id, amount_minor);
            }
        }
        Rc::new(next)
    }
}

#[derive(Clone, PartialEq)]
pub struct GiftsState {
    pub catalog: GiftCatalog,
    pub loading: bool,
}

#[derive(Clone, PartialEq)]
pub struct UseGiftsActions {
    pub refresh: Callback<()>,
    pub apply_contribution: Callback<(String, i64)>,
}

pub struct UseGiftsResult {
    pub state: GiftsState,
    pub actions: UseGiftsActions,
}

/// Gift catalog store hook: loads on mount, refreshes on demand, and
/// applies optimistic patches. A failed refresh keeps the previous list
/// and logs; it never surfaces a broken catalog.
#[hook]
pub fn use_gifts(api: &ApiClient) -> UseGiftsResult {
    let catalog = use_reducer_eq(GiftCatalog::default);
    let loading = use_state_eq(|| true);

    let refresh = {
        let api = api.clone();
        let catalog = catalog.clone();
        let loading = loading.clone();

        use_callback((), move |_, _| {
            let api = api.clone();
            let catalog = catalog.clone();
            let loading = loading.clone();

            spawn_local(async move {
                loading.set(true);
                match api.fetch_gifts().await {
                    Ok(gifts) => catalog.dispatch(CatalogAction::Replace(gifts)),
                    Err(err) => {
                        Logger::error_with_component(
                            "gifts",
                            &format!("Failed to fetch gifts: {err:#}"),
                        );
                    }
                }
                loading.set(false);
            });
        })
    };

    let apply_contribution = {
        let catalog = catalog.clone();
        use_callback((), move |(gift_id, amount_minor): (String, i64), _| {
            catalog.dispatch(CatalogAction::Patch {
                gift_id,
                amount_minor,
            });
        })
    };

    // initial load
    {
        let refresh = refresh.clone();
        use_effect_with((), move |_| {
            refresh.emit(());
            || ()
        });
    }

    UseGiftsResult {
        state: GiftsState {
            catalog: (*catalog).clone(),
            loading: *loading,
        },
        actions: UseGiftsActions {
            refresh,
            apply_contribution,
        },
    }
}
