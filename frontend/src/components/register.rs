//! 注册页面

use crate::auth::{sign_up, use_auth};
use crate::web::router::use_router;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::background_circles::BackgroundCircles;

#[component]
pub fn RegisterPage() -> impl IntoView {
    let auth = use_auth();
    let router = use_router();

    let (username, set_username) = signal(String::new());
    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (confirm_password, set_confirm_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        if username.get().is_empty() || email.get().is_empty() || password.get().is_empty() {
            set_error_msg.set(Some("Please fill in all fields".to_string()));
            return;
        }
        if password.get() != confirm_password.get() {
            set_error_msg.set(Some("Passwords do not match".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        spawn_local(async move {
            // 注册成功即已登录，守卫自动跳转到工作台
            if let Err(e) = sign_up(
                &auth,
                username.get_untracked(),
                email.get_untracked(),
                password.get_untracked(),
            )
            .await
            {
                set_error_msg.set(Some(e));
            }
            set_is_submitting.set(false);
        });
    };

    let field = |id: &'static str,
                 label: &'static str,
                 input_type: &'static str,
                 placeholder: &'static str,
                 value: ReadSignal<String>,
                 setter: WriteSignal<String>| {
        view! {
            <div class="space-y-2">
                <label for=id class="block text-xs font-light tracking-wide uppercase">
                    {label}
                </label>
                <input
                    id=id
                    type=input_type
                    placeholder=placeholder
                    on:input=move |ev| setter.set(event_target_value(&ev))
                    prop:value=value
                    class="w-full bg-[#3A3A5C] border-none text-white placeholder:text-gray-400 rounded-md h-10 px-3"
                />
            </div>
        }
    };

    view! {
        <div class="w-screen min-h-screen bg-[#0B0B39] overflow-hidden relative">
            <BackgroundCircles />

            <div class="relative z-10 w-full min-h-screen flex items-center justify-center p-4">
                <div class="w-full max-w-md bg-[#202042]/85 text-white border-none shadow-lg rounded-[20px]">
                    <div class="p-8">
                        <div class="mb-8">
                            <p class="text-xl font-normal">"Register For"<br /></p>
                            <h2 class="text-3xl font-bold font-serif">"Account"</h2>
                        </div>

                        <form on:submit=on_submit class="space-y-6">
                            <Show when=move || error_msg.get().is_some()>
                                <div class="bg-red-500/20 border border-red-500 rounded-lg px-4 py-2 text-sm">
                                    {move || error_msg.get().unwrap()}
                                </div>
                            </Show>

                            {field("username", "USERNAME", "text", "Choose a username", username, set_username)}
                            {field("email", "EMAIL", "email", "Enter your email", email, set_email)}
                            {field("password", "PASSWORD", "password", "Create a password", password, set_password)}
                            {field(
                                "confirm-password",
                                "CONFIRM PASSWORD",
                                "password",
                                "Confirm your password",
                                confirm_password,
                                set_confirm_password,
                            )}

                            <div class="text-center flex">
                                <a
                                    class="text-sm text-[#AABAF7] hover:underline cursor-pointer"
                                    on:click=move |_| router.navigate("/")
                                >
                                    "Already Have an Account?"
                                </a>
                            </div>

                            <button
                                type="submit"
                                disabled=move || is_submitting.get()
                                class="w-full bg-[#2CAAB4] hover:bg-[#2CAAB4]/80 text-white font-bold rounded-full py-2 disabled:opacity-50"
                            >
                                {move || if is_submitting.get() { "REGISTERING..." } else { "REGISTER" }}
                            </button>
                        </form>
                    </div>
                </div>
            </div>
        </div>
    }
}
