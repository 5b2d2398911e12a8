/// Application shell: the parent survey at `/` and the admin area at `/admin`.
use crate::api::current_admin;
use crate::components::{
    admin_dashboard::AdminDashboard, feedback_form::FeedbackForm, header::Header,
    login_form::LoginForm,
};
use crate::locale;
use crate::models::account::AdminSession;
use leptos::*;
use leptos_meta::*;
use leptos_router::*;

/// Who is logged in, as last reported by the server.
/// Login and logout refetch it rather than setting it locally.
#[derive(Clone, Copy)]
pub struct AdminContext {
    pub session: Resource<(), Result<Option<AdminSession>, ServerFnError>>,
}

impl AdminContext {
    pub fn current(&self) -> Option<AdminSession> {
        self.session.get().and_then(|r| r.ok()).flatten()
    }

    pub fn refresh(&self) {
        self.session.refetch();
    }
}

#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = create_resource(|| (), |_| async move { current_admin().await });
    provide_context(AdminContext { session });

    let (dark, set_dark) = create_signal(false);

    view! {
        <Stylesheet id="leptos" href="/pkg/class-feedback.css"/>
        <Link rel="icon" type_="image/svg+xml" href="/assets/favicon.svg"/>
        <Title text=locale::APP_TITLE/>
        <Router>
            <div class=move || if dark.get() { "app dark" } else { "app light" }>
                <Header
                    dark=dark
                    on_toggle_theme=Callback::new(move |_: ()| set_dark.update(|d| *d = !*d))
                />
                <main>
                    <Routes>
                        <Route path="/" view=FeedbackForm/>
                        <Route path="/admin" view=AdminPage/>
                    </Routes>
                </main>
            </div>
        </Router>
    }
}

#[component]
fn AdminPage() -> impl IntoView {
    let admin = expect_context::<AdminContext>();

    view! {
        <Suspense fallback=move || view! { <p class="loading">{locale::LOADING}</p> }>
            {move || admin.session.get().map(|_| match admin.current() {
                Some(session) => view! { <AdminDashboard session=session/> }.into_view(),
                None => view! {
                    <LoginForm on_login=Callback::new(move |_: AdminSession| admin.refresh())/>
                }.into_view(),
            })}
        </Suspense>
    }
}
