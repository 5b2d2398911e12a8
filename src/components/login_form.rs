use crate::api::login;
use crate::locale;
use crate::models::account::AdminSession;
use leptos::ev::SubmitEvent;
use leptos::logging::error;
use leptos::*;

#[component]
pub fn LoginForm(on_login: Callback<AdminSession>) -> impl IntoView {
    let (username, set_username) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (message, set_message) = create_signal(None::<&'static str>);

    let login_action = create_action(|(username, password): &(String, String)| {
        let (username, password) = (username.clone(), password.clone());
        async move { login(username, password).await }
    });

    create_effect(move |_| match login_action.value().get() {
        Some(Ok(Some(session))) => on_login.call(session),
        Some(Ok(None)) => set_message.set(Some(locale::ERR_LOGIN)),
        Some(Err(e)) => {
            error!("Login request failed: {}", e);
            set_message.set(Some(locale::ERR_API));
        }
        None => {}
    });

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        set_message.set(None);
        login_action.dispatch((username.get_untracked(), password.get_untracked()));
    };

    view! {
        <div class="card login-card">
            <h2>{locale::LOGIN_TITLE}</h2>
            <form on:submit=on_submit>
                <label for="username">{locale::USERNAME}</label>
                <input
                    id="username"
                    type="text"
                    autocomplete="username"
                    prop:value=move || username.get()
                    on:input=move |ev| set_username.set(event_target_value(&ev))
                />
                <label for="password">{locale::PASSWORD}</label>
                <input
                    id="password"
                    type="password"
                    autocomplete="current-password"
                    prop:value=move || password.get()
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                />
                {move || message.get().map(|m| view! { <p class="error">{m}</p> })}
                <button type="submit" class="primary wide" disabled=move || login_action.pending().get()>
                    {move || if login_action.pending().get() { locale::LOGGING_IN } else { locale::LOGIN_BUTTON }}
                </button>
            </form>
        </div>
    }
}
