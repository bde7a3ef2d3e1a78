//! 登录卡片
//!
//! 首页左右各一张：捐赠方与接收方。两张卡片走同一个登录流程，
//! 登录成功后由路由守卫自动跳到工作台。

use crate::auth::{sign_in, use_auth};
use crate::web::router::use_router;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 卡片面向的角色
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum PanelKind {
    Donation,
    Receiving,
}

impl PanelKind {
    fn title(&self) -> &'static str {
        match self {
            PanelKind::Donation => "Donation",
            PanelKind::Receiving => "Receiving",
        }
    }

    fn id_prefix(&self) -> &'static str {
        match self {
            PanelKind::Donation => "donation",
            PanelKind::Receiving => "receiving",
        }
    }
}

#[component]
pub fn LoginPanel(kind: PanelKind) -> impl IntoView {
    let auth = use_auth();
    let router = use_router();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if email.get().is_empty() || password.get().is_empty() {
            set_error_msg.set(Some("Please fill in all fields".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        spawn_local(async move {
            // 登录成功后守卫会自动跳转，这里只处理失败
            if let Err(e) = sign_in(&auth, email.get_untracked(), password.get_untracked()).await {
                set_error_msg.set(Some(e));
            }
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="flex flex-col items-center justify-center h-full w-full p-4">
            <div class="w-full max-w-md bg-[#202042]/85 text-white border-none shadow-lg rounded-[20px]">
                <div class="p-8">
                    <div class="mb-8">
                        <p class="text-xl font-normal">"For"<br /></p>
                        <h2 class="text-3xl font-bold font-serif">{kind.title()}</h2>
                    </div>

                    <form on:submit=on_submit class="space-y-6">
                        <Show when=move || error_msg.get().is_some()>
                            <div class="bg-red-500/20 border border-red-500 rounded-lg px-4 py-2 text-sm">
                                {move || error_msg.get().unwrap()}
                            </div>
                        </Show>

                        <div class="space-y-2">
                            <label
                                for=format!("{}-email", kind.id_prefix())
                                class="block text-xs font-light tracking-wide uppercase"
                            >
                                "EMAIL"
                            </label>
                            <input
                                id=format!("{}-email", kind.id_prefix())
                                type="email"
                                placeholder="Enter your email"
                                on:input=move |ev| set_email.set(event_target_value(&ev))
                                prop:value=email
                                class="w-full bg-[#3A3A5C] border-none text-white placeholder:text-gray-400 rounded-md h-10 px-3"
                            />
                        </div>

                        <div class="space-y-2">
                            <label
                                for=format!("{}-password", kind.id_prefix())
                                class="block text-xs font-light tracking-wide uppercase"
                            >
                                "PASSWORD"
                            </label>
                            <input
                                id=format!("{}-password", kind.id_prefix())
                                type="password"
                                placeholder="Enter your password"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="w-full bg-[#3A3A5C] border-none text-white placeholder:text-gray-400 rounded-md h-10 px-3"
                            />
                        </div>

                        <div class="text-center flex">
                            <a
                                class="text-sm text-[#AABAF7] hover:underline cursor-pointer"
                                on:click=move |_| router.navigate("/register")
                            >
                                "Don't Have an Account?"
                            </a>
                        </div>

                        <button
                            type="submit"
                            disabled=move || is_submitting.get()
                            class="w-full bg-[#2CAAB4] hover:bg-[#2CAAB4]/80 text-white font-bold rounded-full py-2 disabled:opacity-50"
                        >
                            {move || if is_submitting.get() { "SIGNING IN..." } else { "SUBMIT" }}
                        </button>

                        <div class="text-center flex justify-end items-center">
                            <a
                                class="text-sm text-[#AABAF7] hover:underline cursor-pointer"
                                on:click=move |_| router.navigate("/password-recovery")
                            >
                                "Forgot Password?"
                            </a>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
