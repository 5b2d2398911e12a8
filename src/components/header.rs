use crate::api::logout;
use crate::app::AdminContext;
use crate::locale;
use leptos::logging::error;
use leptos::*;
use leptos_router::{use_navigate, NavigateOptions, A};

#[component]
pub fn Header(
    #[prop(into)] dark: Signal<bool>,
    on_toggle_theme: Callback<()>,
) -> impl IntoView {
    let admin = expect_context::<AdminContext>();
    let navigate = use_navigate();

    let logout_action = create_action(move |_: &()| async move {
        if let Err(e) = logout().await {
            error!("Failed to log out: {}", e);
        }
        admin.refresh();
    });

    create_effect(move |_| {
        if logout_action.value().get().is_some() {
            navigate("/", NavigateOptions::default());
        }
    });

    view! {
        <header class="app-header">
            <h1>{locale::APP_TITLE}</h1>
            <nav>
                <A href="/" exact=true>{locale::PARENT_VIEW}</A>
                <A href="/admin">{locale::ADMIN_VIEW}</A>
                {move || admin.current().map(|session| view! {
                    <span class="who">{session.username}</span>
                    <button class="secondary" on:click=move |_| logout_action.dispatch(())>
                        {locale::LOGOUT}
                    </button>
                })}
                <button class="theme-toggle" on:click=move |_| on_toggle_theme.call(())>
                    {move || if dark.get() { "☀" } else { "☾" }}
                </button>
            </nav>
        </header>
    }
}
