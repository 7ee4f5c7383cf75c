use yew::prelude::*;

use crate::hooks::use_notices::{Notice, NoticeLevel};

#[derive(Properties, PartialEq)]
pub struct NoticeStackProps {
    pub notices: Vec<Notice>,
}

/// Floating stack of transient notices; entries expire on their own.
#[function_component(NoticeStack)]
pub fn notice_stack(props: &NoticeStackProps) -> Html {
    html! {
        <div class="notice-stack">
            {for props.notices.iter().map(|notice| {
                let class = match notice.level {
                    NoticeLevel::Success => "notice success",
                    NoticeLevel::Error => "notice error",
                    NoticeLevel::Info => "notice info",
                };
                html! {
                    <div key={notice.id.to_string()} class={class}>
                        {&notice.text}
                    </div>
                }
            })}
        </div>
    }
}
