//! 认证模块
//!
//! 把核心库的 [`AuthService`] 接入 Leptos 的响应式系统。
//! 会话只由服务写入；组件通过 `session` 信号读取。

use crate::web::BrowserStorage;
use circuitai::{AuthService, ClientConfig, ReqwestHttpClient, Session, SessionStore, UserRole};
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::future::Future;
use std::rc::Rc;

type Service = AuthService<ReqwestHttpClient, BrowserStorage>;

/// 构建期注入的后端地址
fn client_config() -> ClientConfig {
    ClientConfig::from_lookup(|key| match key {
        circuitai::config::ENV_API_URL => option_env!("CIRCUITAI_API_URL").map(String::from),
        circuitai::config::ENV_REQUEST_TIMEOUT_SECS => {
            option_env!("CIRCUITAI_REQUEST_TIMEOUT_SECS").map(String::from)
        }
        _ => None,
    })
}

/// Google 隐式授权地址；构建时未配置 client id 则为 `None`
pub fn google_sign_in_url() -> Option<String> {
    let client_id = option_env!("CIRCUITAI_GOOGLE_CLIENT_ID")?;
    let origin = web_sys::window()?.location().origin().ok()?;
    let nonce = uuid::Uuid::new_v4().simple().to_string();
    Some(format!(
        "https://accounts.google.com/o/oauth2/v2/auth?client_id={}&redirect_uri={}&response_type=id_token&scope={}&nonce={nonce}",
        js_sys::encode_uri_component(client_id),
        js_sys::encode_uri_component(&origin),
        js_sys::encode_uri_component("openid email profile"),
    ))
}

/// 认证上下文
#[derive(Clone, Copy)]
pub struct AuthContext {
    service: StoredValue<Option<Rc<Service>>, LocalStorage>,
    /// 当前会话（只读）
    pub session: ReadSignal<Session>,
    /// 最近一次失败的描述
    pub error: RwSignal<Option<String>>,
}

impl AuthContext {
    /// 创建上下文，并把会话变化同步到信号
    pub fn new() -> Self {
        let (session, set_session) = signal(Session::pending());
        let error = RwSignal::new(None);

        let service = match Service::from_config(&client_config(), BrowserStorage) {
            Ok(service) => {
                service
                    .store()
                    .subscribe(move |s: &Session| set_session.set(s.clone()));
                Some(Rc::new(service))
            }
            Err(e) => {
                web_sys::console::error_1(&format!("[Auth] client init failed: {e}").into());
                set_session.set(Session::unauthenticated());
                error.set(Some(e.to_string()));
                None
            }
        };

        Self {
            service: StoredValue::new_local(service),
            session,
            error,
        }
    }

    fn service(&self) -> Option<Rc<Service>> {
        self.service.get_value()
    }

    /// 会话存储，供导航门订阅
    pub fn store(&self) -> Option<SessionStore> {
        self.service().map(|s| s.store().clone())
    }

    /// 启动时静默恢复
    pub fn restore(&self) {
        let Some(service) = self.service() else {
            return;
        };
        spawn_local(async move {
            let session = service.restore().await;
            web_sys::console::log_1(
                &format!("[Auth] session restored: {:?}", session.status()).into(),
            );
        });
    }

    /// 登录；`on_done` 在请求结束后调用
    pub fn login(&self, email: String, password: String, on_done: impl FnOnce(bool) + 'static) {
        self.exchange(on_done, move |service| async move {
            service.login(&email, &password).await.is_ok()
        });
    }

    /// 注册新账号，角色固定为学生
    pub fn signup(
        &self,
        full_name: String,
        email: String,
        password: String,
        on_done: impl FnOnce(bool) + 'static,
    ) {
        self.exchange(on_done, move |service| async move {
            service
                .signup(&email, &password, &full_name, UserRole::Student)
                .await
                .is_ok()
        });
    }

    /// 用 Google 返回的 id_token 登录
    pub fn google_login(&self, id_token: String, on_done: impl FnOnce(bool) + 'static) {
        self.exchange(on_done, move |service| async move {
            service.google_login(&id_token).await.is_ok()
        });
    }

    /// 重新拉取当前用户资料，角色变化会让导航门切换子树
    pub fn refresh_user(&self) {
        let Some(service) = self.service() else {
            return;
        };
        spawn_local(async move {
            if let Err(e) = service.refresh_user().await {
                web_sys::console::warn_1(&format!("[Auth] refresh: {e}").into());
            }
        });
    }

    fn exchange<F, Fut>(&self, on_done: impl FnOnce(bool) + 'static, run: F)
    where
        F: FnOnce(Rc<Service>) -> Fut + 'static,
        Fut: Future<Output = bool> + 'static,
    {
        let Some(service) = self.service() else {
            on_done(false);
            return;
        };
        let error = self.error;
        error.set(None);
        spawn_local(async move {
            let ok = run(service.clone()).await;
            error.set(service.last_error());
            on_done(ok);
        });
    }

    /// 登出：本地状态立即清除，远端失败只记录
    pub fn logout(&self) {
        let Some(service) = self.service() else {
            return;
        };
        spawn_local(async move {
            if let Err(e) = service.logout().await {
                web_sys::console::warn_1(&format!("[Auth] logout: {e}").into());
            }
        });
    }

    pub fn clear_error(&self) {
        if let Some(service) = self.service() {
            service.clear_error();
        }
        self.error.set(None);
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}
