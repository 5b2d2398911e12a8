use crate::api::{delete_ip_log, list_ip_logs};
use crate::components::confirm;
use crate::dashboard::format_local;
use crate::locale;
use crate::models::ip_log::IpLog;
use leptos::logging::error;
use leptos::*;

/// Rejected duplicate submissions, newest first. Super-admin only.
#[component]
pub fn IpMonitoring(#[prop(into)] utc_offset_hours: Signal<i32>) -> impl IntoView {
    let logs = create_resource(|| (), |_| async move { list_ip_logs().await });

    let remove = create_action(move |id: &String| {
        let id = id.clone();
        async move {
            match delete_ip_log(id).await {
                Ok(()) => logs.refetch(),
                Err(e) => error!("Failed to delete IP log: {}", e),
            }
        }
    });

    let row = move |log: IpLog| {
        let id = log.id.clone();
        view! {
            <li class="ip-log">
                <div>
                    <strong>{log.ip_address}</strong>
                    <span>{format!(" · {} {}", locale::CLASS_PREFIX, log.class_name)}</span>
                    <p class="muted">{format_local(&log.timestamp, utc_offset_hours.get())}</p>
                </div>
                <button
                    class="icon-button danger"
                    aria-label=locale::DELETE
                    on:click=move |_| {
                        if confirm(locale::DELETE_IP_LOG_CONFIRMATION) {
                            remove.dispatch(id.clone());
                        }
                    }
                >
                    "✕"
                </button>
            </li>
        }
    };

    view! {
        <section class="card ip-monitoring">
            <h3>{locale::IP_MONITORING_TITLE}</h3>
            <Transition fallback=move || view! { <p>{locale::LOADING}</p> }>
                {move || logs.get().map(|result| match result {
                    Ok(entries) if entries.is_empty() => {
                        view! { <p class="muted">{locale::NO_IP_LOGS}</p> }.into_view()
                    }
                    Ok(entries) => view! {
                        <ul class="ip-log-list">
                            {entries.into_iter().map(row).collect_view()}
                        </ul>
                    }.into_view(),
                    Err(e) => {
                        error!("Failed to load IP logs: {}", e);
                        view! { <p class="error">{locale::ERR_API}</p> }.into_view()
                    }
                })}
            </Transition>
        </section>
    }
}
