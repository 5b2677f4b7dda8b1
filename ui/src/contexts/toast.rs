//! Transient notices shown over every page.
//!
//! Store failures come in two kinds. One that signing in would fix stays
//! on screen with a sign-in link; anything else is an ordinary error that
//! dismisses itself.

use std::rc::Rc;

use stores::StoreError;
use uuid::Uuid;
use yew::prelude::*;

const DISMISS_AFTER_MS: u32 = 5000;
/// Older notices are dropped once this many are showing.
const MAX_VISIBLE: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Error,
    Success,
    Info,
}

/// A next step offered under the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FollowUp {
    SignIn,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Toast {
    pub id: Uuid,
    pub message: String,
    pub tone: Tone,
    pub follow_up: Option<FollowUp>,
    /// `None` keeps the toast until it is closed.
    pub dismiss_after: Option<u32>,
}

impl Toast {
    pub fn new(tone: Tone, message: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            message: message.into(),
            tone,
            follow_up: None,
            dismiss_after: Some(DISMISS_AFTER_MS),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Tone::Error, message)
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(Tone::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(Tone::Info, message)
    }

    pub fn sticky(mut self) -> Self {
        self.dismiss_after = None;
        self
    }

    pub fn from_store_error(error: &StoreError) -> Self {
        let toast = Self::error(error.to_string());
        if error.needs_sign_in() {
            Self {
                follow_up: Some(FollowUp::SignIn),
                ..toast
            }
            .sticky()
        } else {
            toast
        }
    }

    fn repeats(&self, other: &Toast) -> bool {
        self.tone == other.tone && self.message == other.message
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ToastState {
    /// Oldest first.
    pub toasts: Vec<Toast>,
}

pub enum ToastCommand {
    Show(Toast),
    Dismiss(Uuid),
}

impl Reducible for ToastState {
    type Action = ToastCommand;

    fn reduce(self: Rc<Self>, command: ToastCommand) -> Rc<Self> {
        let mut toasts = self.toasts.clone();
        match command {
            ToastCommand::Show(toast) => {
                // A repeated message replaces its earlier copy.
                toasts.retain(|t| !t.repeats(&toast));
                toasts.push(toast);
                let overflow = toasts.len().saturating_sub(MAX_VISIBLE);
                toasts.drain(..overflow);
            }
            ToastCommand::Dismiss(id) => toasts.retain(|t| t.id != id),
        }
        Rc::new(ToastState { toasts })
    }
}

pub type ToastContext = UseReducerHandle<ToastState>;

#[derive(Properties, PartialEq)]
pub struct ToastProviderProps {
    pub children: Children,
}

#[function_component]
pub fn ToastProvider(props: &ToastProviderProps) -> Html {
    let state = use_reducer(ToastState::default);

    html! {
        <ContextProvider<ToastContext> context={state}>
            {props.children.clone()}
        </ContextProvider<ToastContext>>
    }
}

#[derive(Clone)]
pub struct ToastHandle {
    context: ToastContext,
}

impl ToastHandle {
    pub fn show(&self, toast: Toast) {
        let id = toast.id;
        let dismiss_after = toast.dismiss_after;
        self.context.dispatch(ToastCommand::Show(toast));

        if let Some(ms) = dismiss_after {
            let context = self.context.clone();
            yew::platform::spawn_local(async move {
                gloo_timers::future::TimeoutFuture::new(ms).await;
                context.dispatch(ToastCommand::Dismiss(id));
            });
        }
    }

    pub fn error(&self, message: impl Into<String>) {
        self.show(Toast::error(message));
    }

    pub fn success(&self, message: impl Into<String>) {
        self.show(Toast::success(message));
    }

    pub fn info(&self, message: impl Into<String>) {
        self.show(Toast::info(message));
    }

    /// Report a failed store action.
    pub fn store_error(&self, error: &StoreError) {
        self.show(Toast::from_store_error(error));
    }

    pub fn dismiss(&self, id: Uuid) {
        self.context.dispatch(ToastCommand::Dismiss(id));
    }
}

#[hook]
pub fn use_toast() -> ToastHandle {
    let context = use_context::<ToastContext>()
        .expect("use_toast must be used within a ToastProvider");
    ToastHandle { context }
}
