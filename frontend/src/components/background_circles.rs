//! 登录页的漂浮圆圈背景

use leptos::prelude::*;

struct Circle {
    x: f64,
    y: f64,
    size: f64,
    opacity: f64,
    /// 错开每个圆圈的浮动动画
    delay_s: f64,
}

fn viewport() -> (f64, f64) {
    let Some(window) = web_sys::window() else {
        return (1280.0, 800.0);
    };
    let width = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(1280.0);
    let height = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(800.0);
    (width, height)
}

fn generate_circles(count: usize) -> Vec<Circle> {
    let (width, height) = viewport();
    (0..count)
        .map(|i| Circle {
            x: js_sys::Math::random() * width,
            y: js_sys::Math::random() * height,
            size: 100.0 + js_sys::Math::random() * 300.0,
            opacity: 0.1 + js_sys::Math::random() * 0.2,
            delay_s: i as f64 * 0.4,
        })
        .collect()
}

/// 固定定位的背景层，圆圈位置随机，用 CSS 动画缓慢浮动
#[component]
pub fn BackgroundCircles(#[prop(default = 15)] count: usize) -> impl IntoView {
    let circles = generate_circles(count);

    view! {
        <div class="fixed inset-0 overflow-hidden pointer-events-none z-0 bg-[#0B0B39]">
            {circles
                .into_iter()
                .map(|c| {
                    view! {
                        <div
                            class="absolute rounded-full animate-pulse"
                            style=format!(
                                "left: {}px; top: {}px; width: {}px; height: {}px; \
                                 background-color: #005A8D; opacity: {}; \
                                 transform: translate(-50%, -50%); \
                                 animation-duration: 6s; animation-delay: {}s;",
                                c.x, c.y, c.size, c.size, c.opacity, c.delay_s,
                            )
                        ></div>
                    }
                })
                .collect_view()}
        </div>
    }
}
