//! CircuitAI 前端应用
//!
//! 采用 Context-Driven 的架构：
//! - `auth`: 会话状态（由核心库的 AuthService 写入）
//! - `web::gate`: 导航门宿主，决定挂载哪个子树
//! - `web::router`: 子树内部的路由与浏览器历史
//! - `components`: UI 组件层

mod auth;
mod components {
    pub mod area;
    pub mod loading;
    pub mod login;
}

use crate::auth::AuthContext;
use crate::components::area::AreaShell;
use crate::components::loading::LoadingScreen;
use crate::components::login::LoginPage;

use circuitai::Subtree;
use leptos::prelude::*;

// 原生 Web API 封装模块
pub(crate) mod web {
    pub mod gate;
    pub mod router;
    mod storage;

    pub use storage::BrowserStorage;
}

use web::gate::{GateHandle, provide_gate};
use web::router::{provide_router, take_id_token_from_fragment};

/// 子树匹配函数
fn subtree_view(subtree: Option<Subtree>) -> AnyView {
    match subtree {
        None | Some(Subtree::Loading) => view! { <LoadingScreen /> }.into_any(),
        Some(Subtree::Public) => view! { <LoginPage /> }.into_any(),
        Some(area) => view! { <AreaShell subtree=area /> }.into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    // 1. 创建认证上下文
    let auth_ctx = AuthContext::new();
    provide_context(auth_ctx);

    // 2. 导航门订阅会话存储
    let GateHandle { mounted, state } = provide_gate(auth_ctx.store());

    // 3. 路由器只跟随导航门状态
    provide_router(state);

    // 4. Google 回跳带回的 id_token 优先；否则静默恢复上次的会话
    match take_id_token_from_fragment() {
        Some(id_token) => auth_ctx.google_login(id_token, |_| {}),
        None => auth_ctx.restore(),
    }

    move || subtree_view(mounted.get())
}
