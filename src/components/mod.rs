pub mod admin_dashboard;
pub mod change_password;
pub mod feedback_form;
pub mod header;
pub mod ip_monitoring;
pub mod login_form;
pub mod review_card;
pub mod review_chart;
pub mod user_management;

/// Browser confirmation dialog. Declines when the dialog cannot be shown.
pub fn confirm(message: &str) -> bool {
    leptos::window()
        .confirm_with_message(message)
        .unwrap_or(false)
}
