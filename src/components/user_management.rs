use crate::api::{add_admin, delete_admin, list_admins};
use crate::app::AdminContext;
use crate::components::confirm;
use crate::error::user_message;
use crate::locale;
use crate::models::account::AdminSummary;
use crate::validation::validate_new_admin;
use leptos::ev::SubmitEvent;
use leptos::logging::error;
use leptos::*;

/// Outcome shown under the add form.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Notice {
    Success(&'static str),
    Failure(&'static str),
}

#[component]
pub fn UserManagement() -> impl IntoView {
    let admins = create_resource(|| (), |_| async move { list_admins().await });
    let (username, set_username) = create_signal(String::new());
    let (password, set_password) = create_signal(String::new());
    let (notice, set_notice) = create_signal(None::<Notice>);

    let add = create_action(move |(username, password): &(String, String)| {
        let (username, password) = (username.clone(), password.clone());
        async move {
            match add_admin(username, password).await {
                Ok(()) => {
                    set_username.set(String::new());
                    set_password.set(String::new());
                    set_notice.set(Some(Notice::Success(locale::USER_ADDED)));
                    admins.refetch();
                }
                Err(e) => {
                    error!("Failed to add admin: {}", e);
                    set_notice.set(Some(Notice::Failure(user_message(&e))));
                }
            }
        }
    });

    let remove = create_action(move |id: &String| {
        let id = id.clone();
        async move {
            match delete_admin(id).await {
                Ok(()) => {
                    set_notice.set(Some(Notice::Success(locale::USER_DELETED)));
                    admins.refetch();
                }
                Err(e) => {
                    error!("Failed to delete admin: {}", e);
                    set_notice.set(Some(Notice::Failure(user_message(&e))));
                }
            }
        }
    });

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let (u, p) = (username.get_untracked(), password.get_untracked());
        // only the super-admin reaches this panel, so the session name is the reserved one
        let reserved = use_context::<AdminContext>()
            .and_then(|admin| untrack(move || admin.current()))
            .map(|session| session.username)
            .unwrap_or_default();
        match validate_new_admin(&u, &p, &reserved) {
            Ok(name) => add.dispatch((name.to_string(), p)),
            Err(msg) => set_notice.set(Some(Notice::Failure(msg))),
        }
    };

    let row = move |admin: AdminSummary| {
        let id = admin.id.clone();
        view! {
            <li class="admin-row">
                <span>{admin.username}</span>
                <button
                    class="danger"
                    on:click=move |_| {
                        if confirm(locale::DELETE_ADMIN_CONFIRMATION) {
                            remove.dispatch(id.clone());
                        }
                    }
                >
                    {locale::DELETE_ADMIN_BUTTON}
                </button>
            </li>
        }
    };

    view! {
        <section class="card user-management">
            <h3>{locale::USER_MANAGEMENT_TITLE}</h3>
            <form class="inline-form" on:submit=on_submit>
                <input
                    type="text"
                    placeholder=locale::NEW_USERNAME
                    prop:value=move || username.get()
                    on:input=move |ev| set_username.set(event_target_value(&ev))
                />
                <input
                    type="password"
                    placeholder=locale::NEW_PASSWORD
                    prop:value=move || password.get()
                    on:input=move |ev| set_password.set(event_target_value(&ev))
                />
                <button type="submit" class="primary" disabled=move || add.pending().get()>
                    {locale::ADD_ADMIN_BUTTON}
                </button>
            </form>
            {move || notice.get().map(|n| match n {
                Notice::Success(m) => view! { <p class="success">{m}</p> },
                Notice::Failure(m) => view! { <p class="error">{m}</p> },
            })}
            <Transition fallback=move || view! { <p>{locale::LOADING}</p> }>
                {move || admins.get().map(|result| match result {
                    Ok(list) if list.is_empty() => {
                        view! { <p class="muted">{locale::NO_ADMINS}</p> }.into_view()
                    }
                    Ok(list) => view! {
                        <ul class="admin-list">{list.into_iter().map(row).collect_view()}</ul>
                    }.into_view(),
                    Err(e) => {
                        error!("Failed to load admins: {}", e);
                        view! { <p class="error">{locale::ERR_API}</p> }.into_view()
                    }
                })}
            </Transition>
        </section>
    }
}
