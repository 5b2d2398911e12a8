/// Parent-facing survey form.
/// Checks the connection on mount, then collects class, per-item ratings and a comment.
use crate::api::{reviewed_classes, submit_review, verify_connection};
use crate::catalog;
use crate::error::{error_code, CODE_RATE_LIMITED};
use crate::geo::GeoVerdict;
use crate::locale;
use crate::models::review::{NewReview, RatingLevel};
use crate::validation::{validate_review, FormErrors};
use gloo_timers::future::sleep;
use leptos::ev::SubmitEvent;
use leptos::logging::error;
use leptos::*;
use std::collections::BTreeMap;
use std::time::Duration;

type ConnectionCheck = Option<Result<GeoVerdict, ServerFnError>>;

/// The address to submit with, present only once the connection check passed.
fn cleared_ip(check: &ConnectionCheck) -> Option<String> {
    match check {
        Some(Ok(verdict)) if verdict.is_allowed() => verdict.ip().map(str::to_string),
        _ => None,
    }
}

#[component]
fn RatingRow(
    item: String,
    ratings: ReadSignal<BTreeMap<String, RatingLevel>>,
    set_ratings: WriteSignal<BTreeMap<String, RatingLevel>>,
    #[prop(into)] disabled: Signal<bool>,
) -> impl IntoView {
    let label = item.clone();
    let button = move |level: RatingLevel| {
        let item = item.clone();
        let item_for_click = item.clone();
        let class = move || {
            let chosen = ratings.with(|r| r.get(&item) == Some(&level));
            match (level, chosen) {
                (RatingLevel::Satisfied, true) => "rating-btn satisfied selected",
                (RatingLevel::Satisfied, false) => "rating-btn satisfied",
                (RatingLevel::Unsatisfied, true) => "rating-btn unsatisfied selected",
                (RatingLevel::Unsatisfied, false) => "rating-btn unsatisfied",
            }
        };
        view! {
            <button
                type="button"
                class=class
                disabled=move || disabled.get()
                on:click=move |_| set_ratings.update(|r| {
                    r.insert(item_for_click.clone(), level);
                })
            >
                {level.label()}
            </button>
        }
    };

    view! {
        <div class="rating-row">
            <span class="rating-item">{label}</span>
            <div class="rating-buttons">
                {button(RatingLevel::Unsatisfied)}
                {button(RatingLevel::Satisfied)}
            </div>
        </div>
    }
}

#[component]
pub fn FeedbackForm() -> impl IntoView {
    let (class_name, set_class_name) = create_signal(String::new());
    let (ratings, set_ratings) = create_signal(BTreeMap::<String, RatingLevel>::new());
    let (comment, set_comment) = create_signal(String::new());
    let (errors, set_errors) = create_signal(FormErrors::default());
    let (api_error, set_api_error) = create_signal(None::<&'static str>);
    let (submitted, set_submitted) = create_signal(false);

    // Browser-only: the check must see the parent's connection, not the render
    let verdict = create_local_resource(|| (), |_| async move { verify_connection().await });
    let reviewed = create_local_resource(
        move || submitted.get(),
        |_| async move { reviewed_classes().await.unwrap_or_default() },
    );

    let items = create_memo(move |_| catalog::rating_items(&class_name.get()));

    let gate_message = move || match verdict.get() {
        Some(Ok(v)) => v.message(),
        Some(Err(e)) => {
            error!("IP verification failed: {}", e);
            Some(locale::ERR_UNVERIFIED)
        }
        None => None,
    };
    let gate_open = move || matches!(verdict.get(), Some(Ok(v)) if v.is_allowed());

    let submit = create_action(move |review: &NewReview| {
        let review = review.clone();
        async move { submit_review(review).await }
    });

    let verifying = move || verdict.loading().get();
    let locked = move || submit.pending().get() || verifying() || !gate_open();

    create_effect(move |_| match submit.value().get() {
        Some(Ok(())) => {
            set_class_name.set(String::new());
            set_ratings.set(BTreeMap::new());
            set_comment.set(String::new());
            set_submitted.set(true);
            spawn_local(async move {
                sleep(Duration::from_secs(5)).await;
                set_submitted.set(false);
            });
        }
        Some(Err(e)) => {
            error!("Submission failed: {}", e);
            if error_code(&e) == Some(CODE_RATE_LIMITED) {
                set_errors.set(FormErrors {
                    class: Some(locale::ERR_IP_LIMIT),
                    ..Default::default()
                });
            } else {
                set_api_error.set(Some(locale::ERR_API));
            }
        }
        None => {}
    });

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        set_errors.set(FormErrors::default());
        set_api_error.set(None);

        let cleared = untrack(move || cleared_ip(&verdict.get()));
        let review = NewReview {
            class_name: class_name.get_untracked(),
            ratings: ratings.get_untracked(),
            comment: comment.get_untracked(),
            ip_address: cleared.clone().unwrap_or_default(),
        };
        match validate_review(&review) {
            Ok(()) if cleared.is_some() => submit.dispatch(review),
            Ok(()) => {}
            Err(found) => set_errors.set(found),
        }
    };

    let class_options = catalog::classes()
        .map(|class| {
            let done = move || {
                reviewed
                    .get()
                    .map(|classes| classes.iter().any(|c| c == class))
                    .unwrap_or(false)
            };
            view! {
                <option value=class>
                    {class}
                    {move || if done() { locale::ALREADY_REVIEWED_SUFFIX } else { "" }}
                </option>
            }
        })
        .collect_view();

    view! {
        <div class="form-page">
            <div class="card">
                <h2 class="form-title">{locale::FORM_TITLE}</h2>
                <p class="form-description">{locale::FORM_DESCRIPTION}</p>
                <p class="hotline">{locale::HOTLINE}</p>

                <Show when=move || submitted.get()>
                    <div class="banner success" role="alert">
                        <p>{locale::SUCCESS_MESSAGE}</p>
                    </div>
                </Show>
                {move || gate_message().map(|message| view! {
                    <div class="banner error" role="alert">
                        <p>{message}</p>
                        <button class="link-button" on:click=move |_| verdict.refetch()>
                            {locale::RETRY_CONNECTION}
                        </button>
                    </div>
                })}
                {move || api_error.get().map(|message| view! { <p class="error center">{message}</p> })}

                <form on:submit=on_submit class="feedback-form">
                    <div class="section">
                        <label for="class-select">
                            {locale::CLASS_SELECT_LABEL} <span class="required">"*"</span>
                        </label>
                        <select
                            id="class-select"
                            prop:value=move || class_name.get()
                            disabled=locked
                            on:change=move |ev| {
                                set_class_name.set(event_target_value(&ev));
                                set_ratings.set(BTreeMap::new());
                                set_errors.update(|e| e.rating = None);
                            }
                        >
                            <option value="" disabled=true>{locale::CLASS_SELECT_PLACEHOLDER}</option>
                            {class_options}
                        </select>
                        {move || errors.get().class.map(|message| view! { <p class="error">{message}</p> })}
                    </div>

                    <Show when=move || !items.get().is_empty()>
                        <div class="section ratings">
                            <label>{locale::SATISFACTION_TITLE} <span class="required">"*"</span></label>
                            <For
                                each=move || items.get()
                                key=|item| item.clone()
                                children=move |item: String| view! {
                                    <RatingRow
                                        item=item
                                        ratings=ratings
                                        set_ratings=set_ratings
                                        disabled=Signal::derive(locked)
                                    />
                                }
                            />
                            {move || errors.get().rating.map(|message| view! { <p class="error">{message}</p> })}
                        </div>
                    </Show>

                    <div class="section">
                        <label for="comment">
                            {locale::OTHER_COMMENTS_TITLE} <span class="required">"*"</span>
                        </label>
                        <textarea
                            id="comment"
                            rows="4"
                            placeholder=locale::COMMENT_PLACEHOLDER
                            prop:value=move || comment.get()
                            disabled=locked
                            on:input=move |ev| set_comment.set(event_target_value(&ev))
                        ></textarea>
                        {move || errors.get().comment.map(|message| view! { <p class="error">{message}</p> })}
                    </div>

                    <button type="submit" class="primary wide" disabled=locked>
                        {move || {
                            if verifying() {
                                locale::VERIFYING_CONNECTION
                            } else if submit.pending().get() {
                                locale::SUBMITTING
                            } else {
                                locale::SUBMIT_BUTTON
                            }
                        }}
                    </button>
                </form>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::BlockReason;

    #[test]
    fn only_an_allowed_connection_yields_an_address() {
        let allowed: ConnectionCheck = Some(Ok(GeoVerdict::Allowed { ip: "113.161.1.2".into() }));
        assert_eq!(cleared_ip(&allowed), Some("113.161.1.2".to_string()));

        let blocked: ConnectionCheck = Some(Ok(GeoVerdict::Blocked {
            ip: "203.0.113.9".into(),
            reason: BlockReason::Vpn,
        }));
        assert_eq!(cleared_ip(&blocked), None);

        let failed: ConnectionCheck = Some(Err(ServerFnError::ServerError("down".into())));
        assert_eq!(cleared_ip(&failed), None);
        assert_eq!(cleared_ip(&None), None);
    }
}
