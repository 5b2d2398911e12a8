use crate::catalog;
use crate::dashboard::format_local;
use crate::locale;
use crate::models::review::{RatingLevel, Review};
use leptos::*;

#[component]
pub fn ReviewCard(
    review: Review,
    utc_offset_hours: i32,
    can_delete: bool,
    on_delete: Callback<String>,
) -> impl IntoView {
    let id = review.id.clone();
    let submitted = format_local(&review.submitted_at, utc_offset_hours);
    let ratings = catalog::ordered_items(&review.class_name, review.ratings.keys())
        .into_iter()
        .filter_map(|item| {
            let level = *review.ratings.get(&item)?;
            let class = match level {
                RatingLevel::Satisfied => "rating-value satisfied",
                RatingLevel::Unsatisfied => "rating-value unsatisfied",
            };
            Some(view! {
                <li>
                    <span class="rating-item">{item}</span>
                    <span class=class>{level.label()}</span>
                </li>
            })
        })
        .collect_view();

    let delete_button = can_delete.then(|| {
        view! {
            <button
                class="icon-button danger"
                aria-label=locale::DELETE
                on:click=move |_| on_delete.call(id.clone())
            >
                "✕"
            </button>
        }
    });
    let comment = review.comment;
    let comment = (!comment.trim().is_empty())
        .then(|| view! { <blockquote class="comment">{comment}</blockquote> });

    view! {
        <article class="card review-card">
            <header>
                <h4>{format!("{} {}", locale::CLASS_PREFIX, review.class_name)}</h4>
                <time>{submitted}</time>
                {delete_button}
            </header>
            <ul class="rating-list">{ratings}</ul>
            {comment}
            <footer class="muted">{format!("IP: {}", review.ip_address)}</footer>
        </article>
    }
}
