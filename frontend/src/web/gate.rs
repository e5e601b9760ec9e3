//! 导航门的 Leptos 宿主
//!
//! 核心库决定挂载哪个子树，这里把结果写进信号，由 `GateOutlet` 渲染。

use circuitai::{GateState, NavigationGate, Session, SessionStore, Subtree, SubtreeHost};
use leptos::prelude::*;

/// 把挂载 / 卸载写入信号
pub struct SignalHost {
    mounted: RwSignal<Option<Subtree>>,
}

impl SubtreeHost for SignalHost {
    fn mount(&mut self, subtree: Subtree) {
        web_sys::console::log_1(&format!("[Gate] mount {subtree}").into());
        self.mounted.set(Some(subtree));
    }

    fn unmount(&mut self, subtree: Subtree) {
        web_sys::console::log_1(&format!("[Gate] unmount {subtree}").into());
        self.mounted.set(None);
    }
}

/// 已挂载子树与门状态的只读视图
#[derive(Clone, Copy)]
pub struct GateHandle {
    pub mounted: Signal<Option<Subtree>>,
    pub state: Signal<GateState>,
}

fn state_of(subtree: Option<Subtree>) -> GateState {
    match subtree {
        None | Some(Subtree::Loading) => GateState::Pending,
        Some(Subtree::Public) => GateState::Unauthenticated,
        Some(other) => other
            .role()
            .map(GateState::Authenticated)
            .unwrap_or(GateState::Pending),
    }
}

/// 创建导航门并绑定到会话存储
///
/// 绑定随当前 Owner 一起释放，释放时取消订阅。
pub fn provide_gate(store: Option<SessionStore>) -> GateHandle {
    let mounted = RwSignal::new(None);
    let gate = NavigationGate::new(SignalHost { mounted });

    match store {
        Some(store) => {
            StoredValue::new_local(gate.bind(store));
        }
        None => {
            // 客户端初始化失败时只能展示登录页
            let mut gate = gate;
            gate.apply(&Session::unauthenticated());
            StoredValue::new_local(gate);
        }
    }

    let handle = GateHandle {
        mounted: mounted.into(),
        state: Signal::derive(move || state_of(mounted.get())),
    };
    provide_context(handle);
    handle
}

