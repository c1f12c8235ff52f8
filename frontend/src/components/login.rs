use crate::auth::{login, use_session};
use crate::messages::use_messages;
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn LoginPage() -> impl IntoView {
    let session_ctx = use_session();
    let messages = use_messages();

    let (email, set_email) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (is_submitting, set_is_submitting) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    // 登录成功后会话信号变化，路由服务自动离开登录页
    let on_submit = move |ev: web_sys::SubmitEvent| {
        ev.prevent_default();
        if email.get().is_empty() || password.get().is_empty() {
            set_error_msg.set(Some("Please fill in all fields".to_string()));
            return;
        }

        set_is_submitting.set(true);
        set_error_msg.set(None);

        spawn_local(async move {
            if let Err(e) = login(&session_ctx, email.get_untracked(), password.get_untracked()).await
            {
                // 页面可能已卸载，迟到的结果直接丢弃
                if let Some(msg) = messages.try_with_value(|catalog| catalog.describe(&e)) {
                    set_error_msg.try_set(Some(msg));
                }
            }
            set_is_submitting.try_set(false);
        });
    };

    view! {
        <div class="login-page">
            <h2>"Log in"</h2>
            <form on:submit=on_submit>
                <Show when=move || error_msg.get().is_some()>
                    <div role="alert" class="alert alert-danger">
                        {move || error_msg.get().unwrap_or_default()}
                    </div>
                </Show>

                <div class="form-group">
                    <label for="email">"Email"</label>
                    <input
                        id="email"
                        type="email"
                        class="form-control"
                        on:input=move |ev| set_email.set(event_target_value(&ev))
                        prop:value=email
                        required
                    />
                </div>
                <div class="form-group">
                    <label for="password">"Password"</label>
                    <input
                        id="password"
                        type="password"
                        class="form-control"
                        on:input=move |ev| set_password.set(event_target_value(&ev))
                        prop:value=password
                        required
                    />
                </div>
                <button class="btn btn-light" type="submit" disabled=move || is_submitting.get()>
                    {move || if is_submitting.get() { "Logging in..." } else { "Log in" }}
                </button>
            </form>
        </div>
    }
}
