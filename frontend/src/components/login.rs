use crate::auth::{google_sign_in_url, use_auth};
use leptos::prelude::*;

#[component]
pub fn LoginPage() -> impl IntoView {
    let auth = use_auth();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (full_name, set_full_name) = signal(String::new());
    let (is_signup, set_is_signup) = signal(false);
    let (is_submitting, set_is_submitting) = signal(false);
    let (form_error, set_form_error) = signal(Option::<String>::None);

    // 表单校验错误优先，其次是服务端错误
    let error_msg = move || form_error.get().or_else(|| auth.error.get());

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let signup = is_signup.get();
        if email.get().is_empty()
            || password.get().is_empty()
            || (signup && full_name.get().trim().is_empty())
        {
            set_form_error.set(Some("Please fill in all fields".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_form_error.set(None);

        // 成功后导航门会切换到角色子树，这里不需要手动跳转
        let done = move |_: bool| set_is_submitting.set(false);
        if signup {
            auth.signup(full_name.get(), email.get(), password.get(), done);
        } else {
            auth.login(email.get(), password.get(), done);
        }
    };

    let toggle_mode = move |_| {
        auth.clear_error();
        set_form_error.set(None);
        set_is_signup.update(|s| *s = !*s);
    };

    let google_url = google_sign_in_url();

    view! {
        <div class="hero min-h-screen bg-base-200">
            <div class="hero-content flex-col w-full max-w-md">
                <div class="text-center mb-4">
                    <h1 class="text-3xl font-bold">"CircuitAI"</h1>
                    <p class="text-base-content/70">
                        {move || if is_signup.get() {
                            "Create a student account"
                        } else {
                            "Sign in to your course account"
                        }}
                    </p>
                </div>

                <div class="card shrink-0 w-full shadow-2xl bg-base-100">
                    <form class="card-body" on:submit=on_submit>
                        <Show when=move || error_msg().is_some()>
                            <div role="alert" class="alert alert-error text-sm py-2">
                                <span>{move || error_msg().unwrap_or_default()}</span>
                            </div>
                        </Show>

                        <Show when=move || is_signup.get()>
                            <div class="form-control">
                                <label class="label" for="full-name">
                                    <span class="label-text">"Full name"</span>
                                </label>
                                <input
                                    id="full-name"
                                    type="text"
                                    on:input=move |ev| set_full_name.set(event_target_value(&ev))
                                    prop:value=full_name
                                    class="input input-bordered"
                                />
                            </div>
                        </Show>

                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"Email"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                placeholder="you@najah.edu"
                                on:input=move |ev| {
                                    auth.clear_error();
                                    set_email.set(event_target_value(&ev));
                                }
                                prop:value=email
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control">
                            <label class="label" for="password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                placeholder="••••••••"
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                                prop:value=password
                                class="input input-bordered"
                                required
                            />
                        </div>
                        <div class="form-control mt-6">
                            <button class="btn btn-primary" disabled=move || is_submitting.get()>
                                {move || match (is_submitting.get(), is_signup.get()) {
                                    (true, _) => view! { <span class="loading loading-spinner"></span> "Please wait..." }.into_any(),
                                    (false, true) => "Sign up".into_any(),
                                    (false, false) => "Sign in".into_any(),
                                }}
                            </button>
                        </div>
                        {google_url.map(|url| view! {
                            <div class="divider">"or"</div>
                            <a class="btn btn-outline" href=url>"Continue with Google"</a>
                        })}
                        <button type="button" class="btn btn-link btn-sm" on:click=toggle_mode>
                            {move || if is_signup.get() {
                                "Already have an account? Sign in"
                            } else {
                                "No account yet? Sign up"
                            }}
                        </button>
                    </form>
                </div>
            </div>
        </div>
    }
}
