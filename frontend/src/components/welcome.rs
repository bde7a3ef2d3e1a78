//! 工作台页面
//!
//! 登录后的单页工作台：捐赠表单与领取流程共用一个分页卡片，
//! 下方是实时的可领取捐赠和当前用户的请求列表。

mod dialogs;
mod donation_form;

use crate::auth::{sign_out, use_auth};
use crate::components::icons::{ChevronLeft, ChevronRight, LogOut, Upload};
use crate::hooks::{use_donations, use_requests};
use crate::web::Interval;
use crate::workflow::adapter::LiveDonationGateway;
use crate::workflow::donate::submit_donation;
use crate::workflow::receive::ReceiveFlow;
use dialogs::ReceiveDialogs;
use donation_form::DonationFormState;
use leptos::prelude::*;
use leptos::task::spawn_local;
use web_sys::HtmlInputElement;

/// 接收方可勾选的食品条目
const AVAILABLE_FOOD_ITEMS: [&str; 5] = [
    "Fresh Vegetables",
    "Canned Goods",
    "Bread & Bakery Items",
    "Dairy Products",
    "Fruits",
];

/// 领取分页右侧轮播的展示图
const AVAILABLE_IMAGES: [&str; 5] = [
    "https://images.unsplash.com/photo-1542838132-92c53300491e?w=400&q=80",
    "https://images.unsplash.com/photo-1414235077428-338989a2e8c0?w=400&q=80",
    "https://images.unsplash.com/photo-1593113598332-cd288d649433?w=400&q=80",
    "https://images.unsplash.com/photo-1498837167922-ddd27525d352?w=400&q=80",
    "https://images.unsplash.com/photo-1571091718767-18b5b1457add?w=400&q=80",
];

struct Story {
    title: &'static str,
    description: &'static str,
    image: &'static str,
}

const FEATURED_STORIES: [Story; 3] = [
    Story {
        title: "Fresh Produce Donation",
        description: "Local farmers donated fresh vegetables to community food bank",
        image: "https://images.unsplash.com/photo-1542838132-92c53300491e?w=400&q=80",
    },
    Story {
        title: "Restaurant Partnership",
        description: "Downtown restaurants join our mission to reduce food waste",
        image: "https://images.unsplash.com/photo-1414235077428-338989a2e8c0?w=400&q=80",
    },
    Story {
        title: "Community Impact",
        description: "Over 1000 meals distributed this month to families in need",
        image: "https://images.unsplash.com/photo-1593113598332-cd288d649433?w=400&q=80",
    },
];

#[derive(Clone, Copy, PartialEq, Eq)]
enum Tab {
    Donation,
    Receive,
}

#[component]
pub fn WelcomePage() -> impl IntoView {
    let auth = use_auth();
    let donations = use_donations();
    let requests = use_requests();

    let (active_tab, set_active_tab) = signal(Tab::Donation);
    let (current_slide, set_current_slide) = signal(0usize);
    let (image_slide, set_image_slide) = signal(0usize);
    let (is_submitting, set_is_submitting) = signal(false);
    // 消息内容, 是否出错
    let (notification, set_notification) = signal(Option::<(String, bool)>::None);

    let form = DonationFormState::new();
    let flow = RwSignal::new(ReceiveFlow::new());

    // 轮播定时器，组件卸载时一并取消
    let story_timer = Interval::new(5000, move || {
        set_current_slide.update(|s| *s = (*s + 1) % FEATURED_STORIES.len());
    });
    let image_timer = Interval::new(3000, move || {
        set_image_slide.update(|s| *s = (*s + 1) % AVAILABLE_IMAGES.len());
    });
    let story_timer = send_wrapper::SendWrapper::new(story_timer);
    let image_timer = send_wrapper::SendWrapper::new(image_timer);
    on_cleanup(move || {
        drop(story_timer);
        drop(image_timer);
    });

    // 3秒后清除通知
    Effect::new(move |_| {
        if notification.get().is_some() {
            set_timeout(
                move || set_notification.set(None),
                std::time::Duration::from_secs(3),
            );
        }
    });

    // 流程状态机产生的提示统一走通知条
    Effect::new(move |_| {
        if !flow.with(|f| f.has_notice()) {
            return;
        }
        if let Some(message) = flow.try_update(|f| f.take_notice()).flatten() {
            let is_err = message.starts_with("Error") || message.starts_with("Please");
            set_notification.set(Some((message, is_err)));
        }
    });

    let signed_in = move || auth.state.read().is_authenticated();
    let display_name = move || {
        let state = auth.state.get();
        state
            .profile
            .as_ref()
            .and_then(|p| p.full_name.clone())
            .or_else(|| state.user.as_ref().and_then(|u| u.email.clone()))
            .unwrap_or_default()
    };

    let on_proof_change = move |ev: leptos::ev::Event| {
        let input: HtmlInputElement = event_target(&ev);
        if let Some(file) = input.files().and_then(|files| files.get(0)) {
            form.set_proof(file);
        }
    };

    let on_donation_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        set_is_submitting.set(true);

        spawn_local(async move {
            let state = auth.state.get_untracked();
            let gateway = LiveDonationGateway {
                client: state.client.clone(),
                donations,
            };
            let user_id = state.user.as_ref().map(|u| u.id.clone());
            let now_ms = js_sys::Date::now() as u64;

            let result = submit_donation(
                &gateway,
                user_id.as_deref(),
                &form.to_form_data(),
                form.to_proof().as_ref(),
                now_ms,
            )
            .await;

            match result {
                Ok(()) => {
                    set_notification
                        .set(Some(("Donation submitted successfully!".to_string(), false)));
                    form.reset();
                }
                Err(e) => set_notification.set(Some((e, true))),
            }
            set_is_submitting.set(false);
        });
    };

    let on_receive_submit = move |_| {
        flow.update(|f| f.begin(auth.state.get_untracked().is_authenticated()));
    };

    let on_sign_out = move |_| {
        spawn_local(async move {
            // 登出后守卫自动回到登录页
            sign_out(&auth).await;
        });
    };

    let next_slide = move |_| set_current_slide.update(|s| *s = (*s + 1) % FEATURED_STORIES.len());
    let prev_slide = move |_| {
        set_current_slide
            .update(|s| *s = (*s + FEATURED_STORIES.len() - 1) % FEATURED_STORIES.len())
    };

    let tab_class = move |tab: Tab| {
        if active_tab.get() == tab {
            "px-8 py-3 rounded-full font-medium bg-gradient-to-r from-teal-500 to-teal-600 text-white shadow-lg"
        } else {
            "px-8 py-3 rounded-full font-medium bg-gray-600 text-gray-300 hover:bg-gray-500"
        }
    };

    view! {
        <div class="min-h-screen bg-[#0f1419] text-white overflow-x-hidden">
            // 通知提示条
            <Show when=move || notification.get().is_some()>
                <div class="fixed top-4 right-4 z-50">
                    <div class=move || {
                        let (_, is_err) = notification.get().unwrap();
                        if is_err {
                            "bg-red-500/90 text-white px-6 py-3 rounded-lg shadow-lg whitespace-pre-line"
                        } else {
                            "bg-teal-500/90 text-white px-6 py-3 rounded-lg shadow-lg whitespace-pre-line"
                        }
                    }>
                        <span>{move || notification.get().unwrap().0}</span>
                    </div>
                </div>
            </Show>

            // 顶部导航
            <nav class="flex items-center justify-between px-8 py-6 relative z-40">
                <div class="text-2xl font-bold">
                    <span class="text-white">"food"</span>
                    <span class="text-orange-500">"waste"</span>
                </div>
                <div class="flex items-center space-x-8">
                    <a href="#hero" class="text-gray-300 hover:text-white font-medium">"Home"</a>
                    <a href="#donation" class="text-gray-300 hover:text-white font-medium">"Donate"</a>
                    <a href="#about" class="text-gray-300 hover:text-white font-medium">"About Us"</a>
                    <Show when=signed_in>
                        <div class="text-teal-400 font-medium">"Welcome, " {display_name}</div>
                    </Show>
                    <button
                        on:click=on_sign_out
                        class="flex items-center gap-2 text-gray-300 hover:text-white font-medium"
                    >
                        <LogOut attr:class="h-4 w-4" />
                        "Sign Out"
                    </button>
                </div>
            </nav>

            // 首屏
            <section id="hero" class="relative px-8 py-20 max-w-7xl mx-auto">
                <div class="flex flex-col lg:flex-row items-center justify-between gap-12">
                    <div class="lg:w-1/2">
                        <h1 class="text-5xl lg:text-6xl font-bold leading-tight mb-8">
                            "WELCOME TO"
                            <br />
                            <span class="text-transparent bg-clip-text bg-gradient-to-r from-orange-400 to-orange-600">
                                "FOOD DONATION"
                            </span>
                            <br />
                            "AND MANAGEMENT SYSTEM"
                        </h1>
                        <p class="text-gray-400 text-lg mb-8 leading-relaxed">
                            "Join us in our mission to reduce food waste and help those in need through our innovative donation platform."
                        </p>
                        <a
                            href="#donation"
                            class="inline-block bg-gradient-to-r from-teal-500 to-teal-600 hover:from-teal-600 hover:to-teal-700 text-white px-8 py-4 rounded-lg font-semibold text-lg shadow-lg"
                        >
                            "Get Started"
                        </a>
                    </div>
                    <div class="lg:w-1/2">
                        <img
                            src="https://images.unsplash.com/photo-1593113598332-cd288d649433?w=600&q=80"
                            alt="Food donation"
                            class="w-full max-w-lg h-auto rounded-2xl mx-auto shadow-2xl"
                        />
                    </div>
                </div>
            </section>

            // 可领取捐赠（实时数据）
            <section class="px-8 py-20 bg-gradient-to-b from-[#0f1419] to-[#1a1f2e]">
                <div class="max-w-7xl mx-auto">
                    <h2 class="text-4xl font-bold mb-4 text-white text-center">"Featured Donations"</h2>
                    <div class="w-24 h-1 bg-gradient-to-r from-teal-400 to-teal-600 mx-auto mb-16 rounded-full"></div>

                    <Show when=move || donations.loading.get() && donations.donations.read().is_empty()>
                        <p class="text-center text-gray-400">"Loading donations..."</p>
                    </Show>
                    <Show when=move || !donations.loading.get() && donations.donations.read().is_empty()>
                        <p class="text-center text-gray-400">"No donations available right now. Be the first to donate!"</p>
                    </Show>

                    <div class="grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-8">
                        <For
                            each=move || donations.donations.get()
                            key=|d| d.donation.id.clone()
                            children=move |entry| {
                                let donation = entry.donation;
                                let donor = entry.donor;
                                view! {
                                    <div class="bg-[#2a2f3e] rounded-2xl overflow-hidden shadow-xl">
                                        {donation.image_url.clone().map(|url| view! {
                                            <img src=url alt=donation.title.clone() class="w-full h-48 object-cover" />
                                        })}
                                        <div class="p-6">
                                            <h4 class="text-xl font-bold text-white mb-2">{donation.title.clone()}</h4>
                                            <p class="text-teal-400 text-sm mb-1">
                                                {donation.food_type.clone()} " · " {donation.quantity.clone()}
                                            </p>
                                            <p class="text-gray-400 text-sm mb-2">{donation.pickup_address.clone()}</p>
                                            {donor.map(|d| view! {
                                                <p class="text-gray-500 text-xs">
                                                    "Donated by " {d.full_name.unwrap_or_else(|| "Anonymous".to_string())}
                                                    {d.phone.map(|p| format!(" · {}", p))}
                                                </p>
                                            })}
                                        </div>
                                    </div>
                                }
                            }
                        />
                    </div>
                </div>
            </section>

            // 精选故事轮播
            <section class="px-8 py-16 bg-[#1a1f2e]">
                <div class="max-w-7xl mx-auto">
                    <h3 class="text-3xl font-bold text-center mb-12 text-white">"Featured Stories"</h3>
                    <div class="relative">
                        <div class="overflow-hidden rounded-2xl">
                            {move || {
                                let story = &FEATURED_STORIES[current_slide.get()];
                                view! {
                                    <div class="flex flex-col lg:flex-row bg-[#2a2f3e] rounded-2xl overflow-hidden shadow-xl">
                                        <div class="lg:w-1/2">
                                            <img src=story.image alt=story.title class="w-full h-64 lg:h-full object-cover" />
                                        </div>
                                        <div class="lg:w-1/2 p-8 flex flex-col justify-center">
                                            <h4 class="text-2xl font-bold text-white mb-4">{story.title}</h4>
                                            <p class="text-gray-300 mb-6 leading-relaxed">{story.description}</p>
                                        </div>
                                    </div>
                                }
                            }}
                        </div>
                        <button
                            on:click=prev_slide
                            class="absolute left-4 top-1/2 -translate-y-1/2 bg-black/50 hover:bg-black/70 text-white p-3 rounded-full"
                        >
                            <ChevronLeft attr:class="h-6 w-6" />
                        </button>
                        <button
                            on:click=next_slide
                            class="absolute right-4 top-1/2 -translate-y-1/2 bg-black/50 hover:bg-black/70 text-white p-3 rounded-full"
                        >
                            <ChevronRight attr:class="h-6 w-6" />
                        </button>
                    </div>
                </div>
            </section>

            // 捐赠 / 领取分页卡片
            <section id="donation" class="px-8 py-20 bg-gradient-to-b from-[#1a1f2e] to-[#0f1419]">
                <div class="max-w-7xl mx-auto">
                    <h2 class="text-4xl font-bold text-center mb-4 text-white">"Make a Difference Today"</h2>
                    <div class="w-24 h-1 bg-gradient-to-r from-teal-400 to-teal-600 mx-auto mb-16 rounded-full"></div>

                    <div class="bg-[#2a2f3e] rounded-3xl p-8 shadow-2xl">
                        <div class="flex space-x-4 mb-8">
                            <button class=move || tab_class(Tab::Donation) on:click=move |_| set_active_tab.set(Tab::Donation)>
                                "Donation"
                            </button>
                            <button class=move || tab_class(Tab::Receive) on:click=move |_| set_active_tab.set(Tab::Receive)>
                                "Receive"
                            </button>
                        </div>

                        <Show
                            when=move || active_tab.get() == Tab::Donation
                            fallback=move || view! {
                                <div class="flex flex-col lg:flex-row gap-12">
                                    <div class="lg:w-1/2 space-y-6">
                                        <div>
                                            <h3 class="text-white font-medium text-lg mb-4">"AVAILABLE FOOD ITEMS:"</h3>
                                            <div class="space-y-3">
                                                {AVAILABLE_FOOD_ITEMS
                                                    .iter()
                                                    .enumerate()
                                                    .map(|(index, item)| view! {
                                                        <div class="flex items-center space-x-3">
                                                            <input
                                                                type="checkbox"
                                                                id=format!("item-{}", index)
                                                                prop:checked=move || flow.read().is_selected(item)
                                                                on:change=move |_| flow.update(|f| f.toggle_item(item))
                                                                class="w-5 h-5 text-teal-600 bg-[#3a3f4e] border-gray-600 rounded"
                                                            />
                                                            <label
                                                                for=format!("item-{}", index)
                                                                class="text-white font-medium cursor-pointer hover:text-teal-400"
                                                            >
                                                                {*item}
                                                            </label>
                                                        </div>
                                                    })
                                                    .collect_view()}
                                            </div>
                                        </div>
                                        <div>
                                            <h3 class="text-white font-medium text-lg mb-2">"SELECTED FOOD QUANTITY:"</h3>
                                            <p class="text-teal-400 font-semibold text-xl">
                                                {move || flow.read().selected_items().len()} " items selected"
                                            </p>
                                        </div>
                                        <button
                                            on:click=on_receive_submit
                                            disabled=move || !signed_in()
                                            class="bg-gradient-to-r from-teal-500 to-teal-600 hover:from-teal-600 hover:to-teal-700 text-white px-12 py-4 rounded-lg font-semibold text-lg mt-8 w-full shadow-lg disabled:opacity-50 disabled:cursor-not-allowed"
                                        >
                                            {move || if signed_in() { "SUBMIT" } else { "Login to Submit" }}
                                        </button>
                                    </div>
                                    <div class="lg:w-1/2">
                                        <div class="bg-gray-300 h-80 rounded-2xl flex items-center justify-center overflow-hidden relative">
                                            <img
                                                src=move || AVAILABLE_IMAGES[image_slide.get()]
                                                alt="Available food item"
                                                class="w-full h-full object-cover"
                                            />
                                        </div>
                                    </div>
                                </div>
                            }
                        >
                            <div class="flex flex-col lg:flex-row gap-12">
                                <div class="lg:w-1/2 space-y-6">
                                    <form on:submit=on_donation_submit>
                                        <div class="mb-6">
                                            <label class="block mb-3 text-white font-medium">"Donation Title *"</label>
                                            <input
                                                required
                                                placeholder="e.g., Fresh vegetables from restaurant"
                                                on:input=move |ev| form.title.set(event_target_value(&ev))
                                                prop:value=form.title
                                                class="w-full bg-[#3a3f4e] border border-gray-600 text-white h-12 rounded-lg px-3"
                                            />
                                        </div>
                                        <div class="mb-6">
                                            <label class="block mb-3 text-white font-medium">"Type of Items *"</label>
                                            <input
                                                required
                                                placeholder="e.g., Fresh vegetables, Canned goods"
                                                on:input=move |ev| form.food_type.set(event_target_value(&ev))
                                                prop:value=form.food_type
                                                class="w-full bg-[#3a3f4e] border border-gray-600 text-white h-12 rounded-lg px-3"
                                            />
                                        </div>
                                        <div class="mb-6">
                                            <label class="block mb-3 text-white font-medium">"Quantity of food *"</label>
                                            <input
                                                required
                                                placeholder="e.g., 10 kg, 50 portions"
                                                on:input=move |ev| form.quantity.set(event_target_value(&ev))
                                                prop:value=form.quantity
                                                class="w-full bg-[#3a3f4e] border border-gray-600 text-white h-12 rounded-lg px-3"
                                            />
                                        </div>
                                        <div class="mb-6">
                                            <label class="block mb-3 text-white font-medium">"Pickup Address *"</label>
                                            <textarea
                                                required
                                                placeholder="Enter your full address"
                                                on:input=move |ev| form.address.set(event_target_value(&ev))
                                                prop:value=form.address
                                                class="w-full bg-[#3a3f4e] border border-gray-600 text-white h-24 rounded-lg resize-none px-3 py-2"
                                            ></textarea>
                                        </div>
                                        <div class="mb-6">
                                            <label class="block mb-3 text-white font-medium">"Description"</label>
                                            <textarea
                                                placeholder="Additional details about the food donation"
                                                on:input=move |ev| form.description.set(event_target_value(&ev))
                                                prop:value=form.description
                                                class="w-full bg-[#3a3f4e] border border-gray-600 text-white h-24 rounded-lg resize-none px-3 py-2"
                                            ></textarea>
                                        </div>
                                        <div class="mb-6">
                                            <label class="block mb-3 text-white font-medium">
                                                "Proof* "
                                                <span class="text-sm text-gray-400">
                                                    "(Please provide an image of food for security purpose)"
                                                </span>
                                            </label>
                                            <input
                                                type="file"
                                                id="proof"
                                                class="hidden"
                                                accept="image/*"
                                                on:change=on_proof_change
                                            />
                                            <label
                                                for="proof"
                                                class="cursor-pointer bg-gray-600 hover:bg-gray-500 text-white px-6 py-3 rounded-lg inline-flex items-center justify-center gap-2 font-medium"
                                            >
                                                <Upload attr:class="h-5 w-5" />
                                                "Click to upload or drag and drop"
                                            </label>
                                        </div>
                                        <button
                                            type="submit"
                                            disabled=move || is_submitting.get() || !signed_in()
                                            class="bg-gradient-to-r from-teal-500 to-teal-600 hover:from-teal-600 hover:to-teal-700 text-white px-12 py-4 rounded-lg font-semibold text-lg mt-8 w-full shadow-lg disabled:opacity-50 disabled:cursor-not-allowed"
                                        >
                                            {move || {
                                                if is_submitting.get() {
                                                    "Submitting..."
                                                } else if !signed_in() {
                                                    "Login to Submit"
                                                } else {
                                                    "Submit Donation"
                                                }
                                            }}
                                        </button>
                                    </form>
                                </div>
                                <div class="lg:w-1/2">
                                    <div class="bg-[#3a3f4e] h-80 rounded-2xl flex items-center justify-center border-2 border-dashed border-gray-500">
                                        {move || match form.preview_url.get() {
                                            Some(url) => view! {
                                                <img src=url alt="Uploaded food" class="max-w-full max-h-full object-contain rounded-lg" />
                                            }.into_any(),
                                            None => view! {
                                                <div class="text-center">
                                                    <p class="text-gray-400 font-medium">"Image Preview"</p>
                                                    <p class="text-gray-500 text-sm mt-2">"No image uploaded"</p>
                                                </div>
                                            }.into_any(),
                                        }}
                                    </div>
                                </div>
                            </div>
                        </Show>
                    </div>
                </div>
            </section>

            // 当前用户的请求
            <section class="px-8 py-20 bg-[#0f1419]">
                <div class="max-w-7xl mx-auto">
                    <h2 class="text-4xl font-bold text-center mb-4 text-white">"My Requests"</h2>
                    <div class="w-24 h-1 bg-gradient-to-r from-teal-400 to-teal-600 mx-auto mb-16 rounded-full"></div>

                    <Show when=move || requests.requests.read().is_empty()>
                        <p class="text-center text-gray-400">"You haven't made any requests yet."</p>
                    </Show>

                    <div class="space-y-4 max-w-3xl mx-auto">
                        <For
                            each=move || requests.requests.get()
                            key=|r| r.request.id.clone()
                            children=move |entry| {
                                let request = entry.request;
                                view! {
                                    <div class="bg-[#2a2f3e] rounded-2xl p-6 shadow-xl flex items-center justify-between">
                                        <div>
                                            <p class="text-white font-semibold mb-1">
                                                {request.requested_items.join(", ")}
                                            </p>
                                            <p class="text-gray-400 text-sm mb-1">
                                                "Deliver to: " {request.delivery_address.clone()}
                                            </p>
                                            {entry.donation.map(|d| view! {
                                                <p class="text-gray-500 text-xs">
                                                    "From donation: " {d.title} " (" {d.food_type} ")"
                                                </p>
                                            })}
                                        </div>
                                        <div class="text-right">
                                            <span class="inline-block bg-teal-500/20 text-teal-400 px-3 py-1 rounded-full text-sm font-medium">
                                                {request.status.as_str()}
                                            </span>
                                            {request.payment_amount.map(|amount| view! {
                                                <p class="text-gray-400 text-sm mt-2">{format!("₹{:.2}", amount)}</p>
                                            })}
                                        </div>
                                    </div>
                                }
                            }
                        />
                    </div>
                </div>
            </section>

            // 关于我们
            <section id="about" class="px-8 py-20 bg-gradient-to-b from-[#0f1419] to-[#1a1f2e]">
                <div class="max-w-6xl mx-auto text-center">
                    <h2 class="text-4xl font-bold mb-4 text-white">"ABOUT US"</h2>
                    <div class="w-24 h-1 bg-gradient-to-r from-teal-400 to-teal-600 mx-auto mb-16 rounded-full"></div>
                    <div class="bg-[#1a1f2e] rounded-3xl p-12 shadow-2xl">
                        <p class="text-gray-300 leading-relaxed text-lg">
                            "A food wastage management and donation web app serves as a vital bridge between surplus food and those in need. The platform enables restaurants, supermarkets, and households to donate excess food instead of discarding it, ensuring that edible food reaches charitable organizations, shelters, and individuals facing food insecurity."
                        </p>
                    </div>
                </div>
            </section>

            <ReceiveDialogs flow=flow requests=requests />
        </div>
    }
}
