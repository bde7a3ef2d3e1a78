//! 找回密码页面
//!
//! 提交后始终展示同一句确认文案，不暴露邮箱是否注册过。

use crate::auth::use_auth;
use crate::web::router::use_router;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::background_circles::BackgroundCircles;

#[component]
pub fn PasswordRecoveryPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();

    let (email, set_email) = signal(String::new());
    let (submitted, set_submitted) = signal(false);
    let (is_submitting, set_is_submitting) = signal(false);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if email.get().is_empty() {
            return;
        }

        set_is_submitting.set(true);
        spawn_local(async move {
            let client = auth.state.get_untracked().client.clone();
            let _ = client.recover_password(&email.get_untracked()).await;
            set_submitted.set(true);
            set_is_submitting.set(false);
        });
    };

    view! {
        <div class="w-screen min-h-screen bg-[#0B0B39] overflow-hidden relative">
            <BackgroundCircles />

            <div class="relative z-10 w-full min-h-screen flex items-center justify-center p-4">
                <div class="w-full max-w-md bg-[#202042]/85 text-white border-none shadow-lg rounded-[20px]">
                    <div class="p-8">
                        <div class="mb-8">
                            <p class="text-xl font-normal">"Recover Password For"<br /></p>
                            <h2 class="text-3xl font-bold font-serif">"Account"</h2>
                        </div>

                        <Show
                            when=move || !submitted.get()
                            fallback=move || {
                                view! {
                                    <div class="space-y-6">
                                        <div class="bg-[#3A3A5C]/50 p-4 rounded-lg">
                                            <p class="text-center text-white">
                                                "If an account exists with the email "
                                                <span class="font-semibold">{move || email.get()}</span>
                                                ", you will receive a password reset link shortly."
                                            </p>
                                        </div>
                                        <button
                                            class="w-full bg-[#2CAAB4] hover:bg-[#2CAAB4]/80 text-white font-bold rounded-full py-2"
                                            on:click=move |_| router.navigate("/")
                                        >
                                            "BACK TO LOGIN"
                                        </button>
                                    </div>
                                }
                            }
                        >
                            <form on:submit=on_submit class="space-y-6">
                                <div class="space-y-2">
                                    <p class="text-sm text-gray-300 mb-4">
                                        "Enter your email address and we'll send you a link to reset your password."
                                    </p>
                                    <label for="email" class="block text-xs font-light tracking-wide uppercase">
                                        "EMAIL"
                                    </label>
                                    <input
                                        id="email"
                                        type="email"
                                        placeholder="Enter your email"
                                        required
                                        on:input=move |ev| set_email.set(event_target_value(&ev))
                                        prop:value=email
                                        class="w-full bg-[#3A3A5C] border-none text-white placeholder:text-gray-400 rounded-md h-10 px-3"
                                    />
                                </div>

                                <div class="text-center flex">
                                    <a
                                        class="text-sm text-[#AABAF7] hover:underline cursor-pointer"
                                        on:click=move |_| router.navigate("/")
                                    >
                                        "Back to Login"
                                    </a>
                                </div>

                                <button
                                    type="submit"
                                    disabled=move || is_submitting.get()
                                    class="w-full bg-[#2CAAB4] hover:bg-[#2CAAB4]/80 text-white font-bold rounded-full py-2 disabled:opacity-50"
                                >
                                    "SEND RESET LINK"
                                </button>
                            </form>
                        </Show>
                    </div>
                </div>
            </div>
        </div>
    }
}
