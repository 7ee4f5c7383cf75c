use std::cell::RefCell;
use std::rc::Rc;

use gloo::timers::future::TimeoutFuture;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

/// How long a notice stays on screen.
pub const NOTICE_TTL_MS: u32 = 5_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Error,
    Info,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notice {
    pub id: u64,
    pub level: NoticeLevel,
    pub text: String,
}

#[derive(PartialEq, Default)]
struct NoticeBoard {
    items: Vec<Notice>,
}

enum NoticeAction {
    Push(Notice),
    Expire(u64),
}

impl Reducible for NoticeBoard {
    type Action = NoticeAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut items = self.items.clone();
        match action {
            NoticeAction::Push(notice) => items.push(notice),
            NoticeAction::Expire(id) => items.retain(|n| n.id != id),
        }
        Rc::new(Self { items })
    }
}

/// Notice stack shared across pages. Cloneable; pushing from async flows
/// is safe because removal is dispatched against the live board.
#[derive(Clone, PartialEq)]
pub struct NoticesHandle {
    board: UseReducerHandle<NoticeBoard>,
    next_id: Rc<RefCell<u64>>,
}

impl NoticesHandle {
    pub fn items(&self) -> Vec<Notice> {
        self.board.items.clone()
    }

    pub fn success(&self, text: impl Into<String>) {
        self.push(NoticeLevel::Success, text.into());
    }

    pub fn error(&self, text: impl Into<String>) {
        self.push(NoticeLevel::Error, text.into());
    }

    pub fn info(&self, text: impl Into<String>) {
        self.push(NoticeLevel::Info, text.into());
    }

    fn push(&self, level: NoticeLevel, text: String) {
        let id = {
            let mut next = self.next_id.borrow_mut();
            *next += 1;
            *next
        };
        self.board.dispatch(NoticeAction::Push(Notice { id, level, text }));

        let board = self.board.clone();
        spawn_local(async move {
            TimeoutFuture::new(NOTICE_TTL_MS).await;
            board.dispatch(NoticeAction::Expire(id));
        });
    }
}

#[hook]
pub fn use_notices() -> NoticesHandle {
    let board = use_reducer_eq(NoticeBoard::default);
    let next_id = use_mut_ref(|| 0u64);
    NoticesHandle { board, next_id }
}
