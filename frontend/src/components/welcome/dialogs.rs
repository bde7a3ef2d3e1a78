//! 领取流程的弹窗组
//!
//! 四个 `<dialog>` 各对应流程的一个步骤，开合状态由流程状态机驱动。
//! 按钮点击只是把事件转交给状态机，再把新状态写回信号。

use crate::auth::use_auth;
use crate::components::icons::{CreditCard, MapPin, Navigation};
use crate::hooks::UseRequests;
use crate::workflow::adapter::{DemoDispatch, DispatchGateway, LiveRequestGateway};
use crate::workflow::receive::{ReceiveFlow, ReceiveStep, ReceiverDetails};
use foodbridge_shared::fee;
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 让 `<dialog>` 跟随某个布尔信号开合
fn sync_dialog(dialog_ref: NodeRef<leptos::html::Dialog>, open: impl Fn() -> bool + 'static) {
    Effect::new(move |_| {
        if let Some(dialog) = dialog_ref.get() {
            if open() {
                if !dialog.open() {
                    let _ = dialog.show_modal();
                }
            } else if dialog.open() {
                dialog.close();
            }
        }
    });
}

#[component]
pub fn ReceiveDialogs(flow: RwSignal<ReceiveFlow>, requests: UseRequests) -> impl IntoView {
    view! {
        <ServiceDialog flow=flow requests=requests />
        <DetailsDialog flow=flow />
        <PaymentDialog flow=flow requests=requests />
        <TrackingDialog flow=flow />
    }
}

#[component]
fn ServiceDialog(flow: RwSignal<ReceiveFlow>, requests: UseRequests) -> impl IntoView {
    let auth = use_auth();
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();
    let (loading, set_loading) = signal(false);
    sync_dialog(dialog_ref, move || {
        flow.read().step() == ReceiveStep::ServiceChoice
    });

    let on_self_service = move |_| {
        set_loading.set(true);
        spawn_local(async move {
            let gateway = LiveRequestGateway { requests };
            let profile_address = auth
                .state
                .get_untracked()
                .profile
                .as_ref()
                .and_then(|p| p.address.clone());

            let mut current = flow.get_untracked();
            current
                .choose_self_service(&gateway, &DemoDispatch, profile_address.as_deref())
                .await;
            flow.set(current);
            set_loading.set(false);
        });
    };

    let on_platform_service = move |_| {
        flow.update(|f| f.choose_platform_service());
    };

    // 程序化 close() 也会触发 close 事件，只有停留在本步骤时才算用户取消
    let on_cancel = move |_| {
        flow.update(|f| {
            if f.step() == ReceiveStep::ServiceChoice {
                f.cancel();
            }
        });
    };

    view! {
        <dialog
            class="bg-[#2a2f3e] border border-gray-600 text-white rounded-2xl p-8 max-w-md w-full backdrop:bg-black/60"
            node_ref=dialog_ref
            on:close=on_cancel
        >
            <h3 class="text-xl font-bold text-center mb-6">"Choose Service Type"</h3>
            <div class="space-y-4">
                <button
                    on:click=on_self_service
                    disabled=move || loading.get()
                    class="w-full bg-gradient-to-r from-blue-500 to-blue-600 hover:from-blue-600 hover:to-blue-700 text-white py-4 rounded-lg font-semibold text-lg flex items-center justify-center gap-3 disabled:opacity-50"
                >
                    <Navigation attr:class="h-5 w-5" />
                    {move || if loading.get() { "Submitting..." } else { "Self Service (Free)" }}
                </button>
                <button
                    on:click=on_platform_service
                    class="w-full bg-gradient-to-r from-teal-500 to-teal-600 hover:from-teal-600 hover:to-teal-700 text-white py-4 rounded-lg font-semibold text-lg flex items-center justify-center gap-3"
                >
                    <MapPin attr:class="h-5 w-5" />
                    "Platform Service (₹50)"
                </button>
            </div>
            <p class="text-gray-400 text-sm text-center mt-4">
                "Self Service: Navigate to donation location yourself"
                <br />
                "Platform Service: We'll deliver to your location"
            </p>
        </dialog>
    }
}

#[component]
fn DetailsDialog(flow: RwSignal<ReceiveFlow>) -> impl IntoView {
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();
    sync_dialog(dialog_ref, move || {
        flow.read().step() == ReceiveStep::DetailsForm
    });

    let (name, set_name) = signal(String::new());
    let (mobile, set_mobile) = signal(String::new());
    let (address, set_address) = signal(String::new());

    // 打开表单的瞬间与流程持有的收货信息对齐（上一单成功后已被清空），
    // 校验失败导致的流程更新不会重刷，用户输入得以保留
    Effect::new(move |was_open: Option<bool>| {
        let open = flow.read().step() == ReceiveStep::DetailsForm;
        if open && was_open != Some(true) {
            let details = flow.with_untracked(|f| f.details().clone());
            set_name.set(details.name);
            set_mobile.set(details.mobile);
            set_address.set(details.address);
        }
        open
    });

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        flow.update(|f| {
            f.submit_details(ReceiverDetails {
                name: name.get_untracked(),
                mobile: mobile.get_untracked(),
                address: address.get_untracked(),
            })
        });
    };

    let on_cancel = move |_| {
        flow.update(|f| {
            if f.step() == ReceiveStep::DetailsForm {
                f.cancel();
            }
        });
    };

    view! {
        <dialog
            class="bg-[#2a2f3e] border border-gray-600 text-white rounded-2xl p-8 max-w-md w-full backdrop:bg-black/60"
            node_ref=dialog_ref
            on:close=on_cancel
        >
            <h3 class="text-xl font-bold text-center mb-6">"Enter Your Details"</h3>
            <form on:submit=on_submit class="space-y-4">
                <div>
                    <label class="text-white font-medium mb-2 block">"Full Name *"</label>
                    <input
                        required
                        placeholder="Enter your full name"
                        on:input=move |ev| set_name.set(event_target_value(&ev))
                        prop:value=name
                        class="w-full bg-[#3a3f4e] border border-gray-600 text-white h-12 rounded-lg px-3"
                    />
                </div>
                <div>
                    <label class="text-white font-medium mb-2 block">"Mobile Number *"</label>
                    <input
                        required
                        type="tel"
                        placeholder="Enter your mobile number"
                        on:input=move |ev| set_mobile.set(event_target_value(&ev))
                        prop:value=mobile
                        class="w-full bg-[#3a3f4e] border border-gray-600 text-white h-12 rounded-lg px-3"
                    />
                </div>
                <div>
                    <label class="text-white font-medium mb-2 block">"Delivery Address *"</label>
                    <textarea
                        required
                        placeholder="Enter your complete delivery address"
                        on:input=move |ev| set_address.set(event_target_value(&ev))
                        prop:value=address
                        class="w-full bg-[#3a3f4e] border border-gray-600 text-white h-24 rounded-lg resize-none px-3 py-2"
                    ></textarea>
                </div>
                <button
                    type="submit"
                    class="w-full bg-gradient-to-r from-teal-500 to-teal-600 hover:from-teal-600 hover:to-teal-700 text-white py-4 rounded-lg font-semibold text-lg"
                >
                    "Proceed to Payment"
                </button>
            </form>
        </dialog>
    }
}

#[component]
fn PaymentDialog(flow: RwSignal<ReceiveFlow>, requests: UseRequests) -> impl IntoView {
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();
    let (loading, set_loading) = signal(false);
    sync_dialog(dialog_ref, move || {
        flow.read().step() == ReceiveStep::Payment
    });

    let quote = fee::platform_quote();
    let pay_label = format!("Pay ₹{:.2}", quote.total);

    let on_pay = move |_| {
        set_loading.set(true);
        spawn_local(async move {
            let gateway = LiveRequestGateway { requests };
            let mut current = flow.get_untracked();
            current.confirm_payment(&gateway).await;
            flow.set(current);
            set_loading.set(false);
        });
    };

    let on_cancel = move |_| {
        flow.update(|f| {
            if f.step() == ReceiveStep::Payment {
                f.cancel();
            }
        });
    };

    view! {
        <dialog
            class="bg-[#2a2f3e] border border-gray-600 text-white rounded-2xl p-8 max-w-md w-full backdrop:bg-black/60"
            node_ref=dialog_ref
            on:close=on_cancel
        >
            <h3 class="text-xl font-bold text-center mb-6 flex items-center justify-center gap-2">
                <CreditCard attr:class="h-6 w-6" />
                "Payment"
            </h3>
            <div class="space-y-6">
                <div class="bg-[#3a3f4e] p-4 rounded-lg">
                    <h4 class="font-semibold mb-2">"Order Summary"</h4>
                    <div class="flex justify-between text-sm text-gray-300 mb-1">
                        <span>"Platform Service Fee"</span>
                        <span>{format!("₹{:.2}", quote.base_fee)}</span>
                    </div>
                    <div class="flex justify-between text-sm text-gray-300 mb-1">
                        <span>"GST (18%)"</span>
                        <span>{format!("₹{:.2}", quote.gst)}</span>
                    </div>
                    <hr class="border-gray-600 my-2" />
                    <div class="flex justify-between font-semibold">
                        <span>"Total Amount"</span>
                        <span>{format!("₹{:.2}", quote.total)}</span>
                    </div>
                </div>
                <div class="space-y-3">
                    <p class="text-white font-medium">"Payment Method"</p>
                    <div class="grid grid-cols-2 gap-3">
                        <button class="bg-[#3a3f4e] hover:bg-[#4a4f5e] text-white py-3 border border-gray-600 rounded-lg">"UPI"</button>
                        <button class="bg-[#3a3f4e] hover:bg-[#4a4f5e] text-white py-3 border border-gray-600 rounded-lg">"Card"</button>
                    </div>
                </div>
                <button
                    on:click=on_pay
                    disabled=move || loading.get()
                    class="w-full bg-gradient-to-r from-green-500 to-green-600 hover:from-green-600 hover:to-green-700 text-white py-4 rounded-lg font-semibold text-lg disabled:opacity-50"
                >
                    {move || if loading.get() { "Processing...".to_string() } else { pay_label.clone() }}
                </button>
            </div>
        </dialog>
    }
}

#[component]
fn TrackingDialog(flow: RwSignal<ReceiveFlow>) -> impl IntoView {
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();
    sync_dialog(dialog_ref, move || {
        flow.read().step() == ReceiveStep::Tracking
    });

    let snapshot = DemoDispatch.tracking_snapshot();
    let on_close = move |_: leptos::web_sys::Event| {
        flow.update(|f| {
            if f.step() == ReceiveStep::Tracking {
                f.close_tracking();
            }
        });
    };

    view! {
        <dialog
            class="bg-[#2a2f3e] border border-gray-600 text-white rounded-2xl p-8 max-w-2xl w-full backdrop:bg-black/60"
            node_ref=dialog_ref
            on:close=on_close
        >
            <h3 class="text-xl font-bold text-center mb-6">"Delivery Tracking"</h3>
            <div class="space-y-6">
                <div class="bg-[#3a3f4e] p-4 rounded-lg">
                    <h4 class="font-semibold mb-3 text-teal-400">"Delivery Status"</h4>
                    <div class="space-y-2 text-sm">
                        <div class="flex justify-between">
                            <span>"Delivery Boy:"</span>
                            <span class="text-teal-400">{snapshot.courier_name.clone()}</span>
                        </div>
                        <div class="flex justify-between">
                            <span>"Contact:"</span>
                            <span class="text-teal-400">{snapshot.courier_phone.clone()}</span>
                        </div>
                        <div class="flex justify-between">
                            <span>"Distance from Donation Location:"</span>
                            <span class="text-teal-400">{format!("{} km", snapshot.distance_km)}</span>
                        </div>
                        <div class="flex justify-between">
                            <span>"Estimated Pickup Time:"</span>
                            <span class="text-teal-400">{format!("{} minutes", snapshot.pickup_eta_minutes)}</span>
                        </div>
                        <div class="flex justify-between">
                            <span>"Estimated Delivery Time:"</span>
                            <span class="text-teal-400">{format!("{} minutes", snapshot.delivery_eta_minutes)}</span>
                        </div>
                    </div>
                </div>
                <div class="bg-gray-300 h-64 rounded-lg flex items-center justify-center relative overflow-hidden">
                    <div class="absolute inset-0 bg-gradient-to-br from-blue-100 to-green-100"></div>
                    <div class="relative z-10 text-center text-gray-700">
                        <MapPin attr:class="h-12 w-12 mx-auto mb-2 text-red-500" />
                        <p class="font-semibold">"Live Tracking Map"</p>
                        <p class="text-sm">"Delivery boy is on the way"</p>
                    </div>
                </div>
                <button
                    on:click=move |ev: leptos::web_sys::MouseEvent| on_close(ev.into())
                    class="w-full bg-gradient-to-r from-teal-500 to-teal-600 hover:from-teal-600 hover:to-teal-700 text-white py-3 rounded-lg font-semibold"
                >
                    "Close Tracking"
                </button>
            </div>
        </dialog>
    }
}
