//! 路由服务模块 - 浏览器适配
//!
//! 封装了 web_sys 的 History API，所有对 window.history 的操作都集中在此模块。
//! 守卫逻辑由核心库的 [`circuitai::Router`] 决定，这里只负责同步浏览器地址栏。

use circuitai::{AppRoute, GateState, Navigation, Router as CoreRouter};
use leptos::prelude::*;
use wasm_bindgen::prelude::*;

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

fn with_history(f: impl FnOnce(&web_sys::History)) {
    if let Some(history) = web_sys::window().and_then(|w| w.history().ok()) {
        f(&history);
    }
}

fn push_history_state(path: &str) {
    with_history(|h| {
        let _ = h.push_state_with_url(&JsValue::NULL, "", Some(path));
    });
}

fn replace_history_state(path: &str) {
    with_history(|h| {
        let _ = h.replace_state_with_url(&JsValue::NULL, "", Some(path));
    });
}

fn id_token_from_fragment(hash: &str) -> Option<&str> {
    hash.trim_start_matches('#')
        .split('&')
        .find_map(|pair| pair.strip_prefix("id_token="))
        .filter(|token| !token.is_empty())
}

/// 取出 Google 回跳片段中的 `id_token`，并从地址栏移除片段
pub fn take_id_token_from_fragment() -> Option<String> {
    let hash = web_sys::window()?.location().hash().ok()?;
    let raw = id_token_from_fragment(&hash)?;
    let token = js_sys::decode_uri_component(raw).ok().map(String::from)?;
    replace_history_state(&current_path());
    Some(token)
}

/// 路由器服务
///
/// 通过注入的导航门状态信号与认证系统解耦。
#[derive(Clone, Copy)]
pub struct RouterService {
    core: StoredValue<CoreRouter>,
    current_route: RwSignal<Option<AppRoute>>,
    gate_state: Signal<GateState>,
}

impl RouterService {
    fn new(gate_state: Signal<GateState>) -> Self {
        Self {
            core: StoredValue::new(CoreRouter::new()),
            current_route: RwSignal::new(None),
            gate_state,
        }
    }

    /// 当前路由；会话未确定时为 `None`
    pub fn current_route(&self) -> Signal<Option<AppRoute>> {
        self.current_route.into()
    }

    pub fn navigate_to(&self, route: AppRoute) {
        let nav = self.core.try_update_value(|r| r.navigate_to(route, true));
        self.apply(nav, true);
    }

    /// 后退；已在子树首页时什么都不做
    pub fn back(&self) {
        let moved = self.core.try_update_value(|r| r.back()).unwrap_or(false);
        if moved {
            with_history(|h| {
                let _ = h.back();
            });
            self.publish();
        }
    }

    fn apply(&self, nav: Option<Navigation>, push: bool) {
        match nav {
            Some(Navigation::Redirected { requested, to }) => {
                web_sys::console::log_1(
                    &format!("[Router] {requested} not available. Redirecting to {to}.").into(),
                );
                if push {
                    push_history_state(&to.to_path());
                } else {
                    replace_history_state(&to.to_path());
                }
            }
            Some(Navigation::Entered(route)) => {
                if push {
                    push_history_state(&route.to_path());
                } else {
                    replace_history_state(&route.to_path());
                }
            }
            Some(Navigation::Blocked) | None => {}
        }
        self.publish();
    }

    fn publish(&self) {
        let current = self.core.with_value(|r| r.current().cloned());
        self.current_route.set(current);
    }

    /// 导航门切换子树时重置路由；地址栏中的路径若属于新子树则保留
    fn setup_gate_sync(&self) {
        let this = *self;
        Effect::new(move |_| {
            let state = this.gate_state.get();
            let reset = this
                .core
                .try_update_value(|r| r.sync(&state))
                .unwrap_or(false);
            if !reset {
                return;
            }
            web_sys::console::log_1(&format!("[Router] gate is now {state}").into());
            let nav = this.core.try_update_value(|r| r.replace(&current_path()));
            this.apply(nav, false);
        });
    }

    /// 浏览器后退/前进按钮
    fn init_popstate_listener(&self) {
        let this = *self;
        let closure = Closure::<dyn Fn()>::new(move || {
            let nav = this.core.try_update_value(|r| r.replace(&current_path()));
            this.apply(nav, false);
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }
}

/// 提供路由服务到 Context 并初始化
pub fn provide_router(gate_state: Signal<GateState>) -> RouterService {
    let router = RouterService::new(gate_state);
    router.init_popstate_listener();
    router.setup_gate_sync();
    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

#[cfg(test)]
mod tests {
    use super::id_token_from_fragment;

    #[test]
    fn test_id_token_from_fragment() {
        assert_eq!(
            id_token_from_fragment("#state=x&id_token=eyJ.abc.def&authuser=0"),
            Some("eyJ.abc.def")
        );
        assert_eq!(id_token_from_fragment("#id_token="), None);
        assert_eq!(id_token_from_fragment("#access_token=zzz"), None);
        assert_eq!(id_token_from_fragment(""), None);
    }
}
