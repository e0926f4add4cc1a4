use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// How long a toast stays on screen before auto-dismissing.
const TOAST_LIFETIME_MS: u32 = 4_000;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastLevel {
    Success,
    Error,
}

#[derive(Clone, Debug)]
struct ToastEntry {
    id: u64,
    level: ToastLevel,
    message: String,
}

/// Centralized toast notifications, provided once via context.
///
/// Entries auto-dismiss after [`TOAST_LIFETIME_MS`]; clicking a toast
/// dismisses it immediately.
#[derive(Clone, Copy)]
pub struct ToastService {
    toasts: RwSignal<Vec<ToastEntry>>,
    next_id: RwSignal<u64>,
}

impl ToastService {
    pub fn new() -> Self {
        Self {
            toasts: RwSignal::new(Vec::new()),
            next_id: RwSignal::new(1),
        }
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(ToastLevel::Success, message.into());
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(ToastLevel::Error, message.into());
    }

    fn push(&self, level: ToastLevel, message: String) {
        let id = self.next_id.get_untracked();
        self.next_id.set(id + 1);
        self.toasts.update(|t| {
            t.push(ToastEntry { id, level, message });
        });

        let svc = *self;
        spawn_local(async move {
            TimeoutFuture::new(TOAST_LIFETIME_MS).await;
            svc.dismiss(id);
        });
    }

    fn dismiss(&self, id: u64) {
        self.toasts.update(|t| t.retain(|e| e.id != id));
    }
}

impl Default for ToastService {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders the toast stack. Mount once, near the app root.
#[component]
pub fn ToastHost() -> impl IntoView {
    let svc = use_context::<ToastService>().expect("ToastService not found in context");

    view! {
        <div class="toast-stack">
            <For
                each=move || svc.toasts.get()
                key=|entry| entry.id
                children=move |entry| {
                    let class = match entry.level {
                        ToastLevel::Success => "toast toast--success",
                        ToastLevel::Error => "toast toast--error",
                    };
                    let id = entry.id;
                    view! {
                        <div class=class on:click=move |_| svc.dismiss(id)>
                            {entry.message.clone()}
                        </div>
                    }
                }
            />
        </div>
    }
}
