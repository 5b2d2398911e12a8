use crate::api::change_password;
use crate::locale;
use crate::validation::validate_password_change;
use leptos::ev::SubmitEvent;
use leptos::logging::error;
use leptos::*;

/// Password change dialog for secondary admins.
#[component]
pub fn ChangePasswordModal(on_close: Callback<()>, on_success: Callback<()>) -> impl IntoView {
    let (new_password, set_new_password) = create_signal(String::new());
    let (confirmation, set_confirmation) = create_signal(String::new());
    let (message, set_message) = create_signal(None::<&'static str>);

    let save = create_action(|(password, confirmation): &(String, String)| {
        let (password, confirmation) = (password.clone(), confirmation.clone());
        async move { change_password(password, confirmation).await }
    });

    create_effect(move |_| match save.value().get() {
        Some(Ok(())) => {
            on_success.call(());
            on_close.call(());
        }
        Some(Err(e)) => {
            error!("Failed to update password: {}", e);
            set_message.set(Some(locale::ERR_PASSWORD_UPDATE));
        }
        None => {}
    });

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let (password, confirm) = (new_password.get_untracked(), confirmation.get_untracked());
        match validate_password_change(&password, &confirm) {
            Ok(()) => {
                set_message.set(None);
                save.dispatch((password, confirm));
            }
            Err(msg) => set_message.set(Some(msg)),
        }
    };

    view! {
        <div class="modal-backdrop">
            <div class="card modal" role="dialog">
                <h3>{locale::CHANGE_PASSWORD_BUTTON}</h3>
                <form on:submit=on_submit>
                    <label for="new-password">{locale::NEW_PASSWORD}</label>
                    <input
                        id="new-password"
                        type="password"
                        required=true
                        prop:value=move || new_password.get()
                        on:input=move |ev| set_new_password.set(event_target_value(&ev))
                    />
                    <label for="confirm-password">{locale::CONFIRM_PASSWORD}</label>
                    <input
                        id="confirm-password"
                        type="password"
                        required=true
                        prop:value=move || confirmation.get()
                        on:input=move |ev| set_confirmation.set(event_target_value(&ev))
                    />
                    {move || message.get().map(|m| view! { <p class="error">{m}</p> })}
                    <div class="modal-actions">
                        <button type="button" class="secondary" on:click=move |_| on_close.call(())>
                            {locale::CANCEL}
                        </button>
                        <button type="submit" class="primary" disabled=move || save.pending().get()>
                            {move || if save.pending().get() { locale::SAVING } else { locale::SAVE_PASSWORD_BUTTON }}
                        </button>
                    </div>
                </form>
            </div>
        </div>
    }
}
