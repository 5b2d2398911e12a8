/// Admin area: class filter, charts, export and the review list.
/// Super-admins also get reset, deletion, account management and IP monitoring.
use crate::api::{delete_all_reviews, delete_review, list_reviews};
use crate::components::change_password::ChangePasswordModal;
use crate::components::confirm;
use crate::components::ip_monitoring::IpMonitoring;
use crate::components::review_card::ReviewCard;
use crate::components::review_chart::{ClassSummaryChart, ItemDetailCharts};
use crate::components::user_management::UserManagement;
use crate::dashboard::{distinct_classes, filter_reviews, tally, tally_by_class, ClassFilter};
use crate::error::user_message;
use crate::locale;
use crate::models::account::AdminSession;
use leptos::logging::error;
use leptos::*;

#[component]
pub fn AdminDashboard(session: AdminSession) -> impl IntoView {
    let is_superadmin = session.is_superadmin();
    let (filter, set_filter) = create_signal(ClassFilter::All);
    let (show_password_modal, set_show_password_modal) = create_signal(false);
    let (notice, set_notice) = create_signal(None::<&'static str>);

    let listing = create_resource(|| (), |_| async move { list_reviews().await });

    let all_reviews = create_memo(move |_| {
        listing
            .get()
            .and_then(|r| r.ok())
            .map(|l| l.reviews)
            .unwrap_or_default()
    });
    let utc_offset = move || {
        listing
            .get()
            .and_then(|r| r.ok())
            .map(|l| l.utc_offset_hours)
            .unwrap_or(0)
    };
    let filtered = create_memo(move |_| all_reviews.with(|all| filter_reviews(all, &filter.get())));
    let classes = create_memo(move |_| all_reviews.with(|all| distinct_classes(all)));

    let export_href = move || {
        format!(
            "/admin/export.csv?class={}",
            urlencoding::encode(filter.get().as_query())
        )
    };

    let reset = create_action(move |_: &()| async move {
        match delete_all_reviews().await {
            Ok(_) => listing.refetch(),
            Err(e) => {
                error!("Failed to delete all reviews: {}", e);
                set_notice.set(Some(user_message(&e)));
            }
        }
    });

    let remove = create_action(move |id: &String| {
        let id = id.clone();
        async move {
            match delete_review(id).await {
                Ok(()) => listing.refetch(),
                Err(e) => {
                    error!("Failed to delete review: {}", e);
                    set_notice.set(Some(user_message(&e)));
                }
            }
        }
    });
    let on_delete = Callback::new(move |id: String| {
        if confirm(locale::DELETE_REVIEW_CONFIRMATION) {
            remove.dispatch(id);
        }
    });

    let scope_label = move || match filter.get() {
        ClassFilter::All => locale::ALL_CLASSES.to_string(),
        ClassFilter::Class(name) => format!("{} {}", locale::CLASS_PREFIX, name),
    };

    let charts = move || {
        let all = all_reviews.get();
        if all.is_empty() {
            return None;
        }
        let content = match filter.get() {
            ClassFilter::All => view! {
                <h3 class="center">{format!("{} - {}", locale::OVERVIEW_CHART_TITLE, locale::ALL_CLASSES)}</h3>
                <div class="chart-grid">
                    {tally_by_class(&all)
                        .into_iter()
                        .map(|(class_name, tallies)| view! {
                            <ClassSummaryChart class_name=class_name tallies=tallies/>
                        })
                        .collect_view()}
                </div>
            }
            .into_view(),
            ClassFilter::Class(_) => view! {
                <div class="chart-grid">
                    <ItemDetailCharts tallies=tally(&filtered.get())/>
                </div>
            }
            .into_view(),
        };
        Some(view! { <section class="charts">{content}</section> })
    };

    let review_list = move || {
        let reviews = filtered.get();
        if reviews.is_empty() {
            let message = match filter.get() {
                ClassFilter::Class(name) if !all_reviews.with(Vec::is_empty) => {
                    format!("{} {}.", locale::NO_REVIEWS_FOR_CLASS, name)
                }
                _ => locale::NO_REVIEWS.to_string(),
            };
            return view! { <p class="muted center">{message}</p> }.into_view();
        }
        let offset = utc_offset();
        view! {
            <div class="review-grid">
                {reviews
                    .into_iter()
                    .map(|review| view! {
                        <ReviewCard
                            review=review
                            utc_offset_hours=offset
                            can_delete=is_superadmin
                            on_delete=on_delete
                        />
                    })
                    .collect_view()}
            </div>
        }
        .into_view()
    };

    view! {
        <div class="dashboard">
            <Show when=move || show_password_modal.get()>
                <ChangePasswordModal
                    on_close=Callback::new(move |_: ()| set_show_password_modal.set(false))
                    on_success=Callback::new(move |_: ()| set_notice.set(Some(locale::PASSWORD_CHANGED)))
                />
            </Show>

            <h2 class="center">{locale::DASHBOARD_TITLE}</h2>

            <div class="card toolbar">
                <div class="total">
                    <span>{move || format!("{} ({}):", locale::TOTAL_REVIEWS, scope_label())}</span>
                    <strong>{move || filtered.with(Vec::len)}</strong>
                </div>
                <div class="actions">
                    <select
                        prop:value=move || filter.get().as_query().to_string()
                        on:change=move |ev| set_filter.set(ClassFilter::from_query(&event_target_value(&ev)))
                    >
                        <option value=crate::dashboard::ALL_CLASSES_QUERY>{locale::ALL_CLASSES}</option>
                        {move || classes
                            .get()
                            .into_iter()
                            .map(|c| view! { <option value=c.clone()>{c}</option> })
                            .collect_view()}
                    </select>
                    <a
                        class="button success"
                        class:disabled=move || filtered.with(Vec::is_empty)
                        href=export_href
                        download=""
                    >
                        {locale::EXPORT_BUTTON}
                    </a>
                    {(!is_superadmin).then(|| view! {
                        <button class="primary" on:click=move |_| set_show_password_modal.set(true)>
                            {locale::CHANGE_PASSWORD_BUTTON}
                        </button>
                    })}
                    {is_superadmin.then(|| view! {
                        <button
                            class="danger"
                            disabled=move || reset.pending().get()
                            on:click=move |_| {
                                if confirm(locale::RESET_CONFIRMATION) {
                                    reset.dispatch(());
                                }
                            }
                        >
                            {locale::RESET_BUTTON}
                        </button>
                    })}
                </div>
            </div>
            {move || notice.get().map(|m| view! { <p class="notice center">{m}</p> })}

            <Transition fallback=move || view! { <p class="loading">{locale::LOADING}</p> }>
                {move || listing.get().map(|result| match result {
                    Ok(_) => view! { {charts} {review_list} }.into_view(),
                    Err(e) => {
                        error!("Failed to load reviews: {}", e);
                        view! { <p class="error center">{user_message(&e)}</p> }.into_view()
                    }
                })}
            </Transition>

            {is_superadmin.then(|| view! {
                <UserManagement/>
                <IpMonitoring utc_offset_hours=Signal::derive(utc_offset)/>
            })}
        </div>
    }
}
