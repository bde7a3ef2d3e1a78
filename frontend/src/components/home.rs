//! 登录首页：左右分屏的捐赠 / 接收登录卡片

use super::background_circles::BackgroundCircles;
use super::login_panel::{LoginPanel, PanelKind};
use leptos::prelude::*;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="w-screen h-screen bg-[#0B0B39] overflow-hidden relative">
            <BackgroundCircles />

            <div class="relative z-10 w-full h-full flex flex-col md:flex-row">
                <div class="flex-1 p-4 flex items-center justify-center">
                    <LoginPanel kind=PanelKind::Donation />
                </div>
                <div class="flex-1 p-4 flex items-center justify-center">
                    <LoginPanel kind=PanelKind::Receiving />
                </div>
            </div>
        </div>
    }
}
