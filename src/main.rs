#[cfg(feature = "ssr")]
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    use actix_files::Files;
    use actix_web::*;
    use class_feedback::api::export_reviews_csv;
    use class_feedback::app::App as FeedbackApp;
    use class_feedback::config::AppConfig;
    use class_feedback::db::Database;
    use class_feedback::state::AppState;
    use leptos::logging::log;
    use leptos::*;
    use leptos_actix::{generate_route_list, LeptosRoutes};
    use std::io::{Error, ErrorKind};

    let config = AppConfig::load();

    // Initialize the database
    let db = Database::new(&config.db_path).map_err(|e| Error::new(ErrorKind::Other, e))?;
    db.create_schema()
        .await
        .map_err(|e| Error::new(ErrorKind::Other, e))?;
    log!("[DB] Schema ready at {}", config.db_path);

    let state = web::Data::new(AppState::new(db, config));

    // Load configuration
    let conf = get_configuration(None)
        .await
        .map_err(|e| Error::new(ErrorKind::Other, e.to_string()))?;
    let addr = conf.leptos_options.site_addr;

    // Generate the list of routes in your Leptos App
    let routes = generate_route_list(FeedbackApp);
    log!("listening on http://{}", &addr);

    HttpServer::new(move || {
        let leptos_options = &conf.leptos_options;
        let site_root = &leptos_options.site_root;

        App::new()
            .app_data(state.clone())
            // Plain handler: the download is a file, not a server function reply
            .route("/admin/export.csv", web::get().to(export_reviews_csv))
            // Register server functions
            .route("/api/{tail:.*}", leptos_actix::handle_server_fns())
            // Serve JS/WASM/CSS from `pkg`
            .service(Files::new("/pkg", format!("{site_root}/pkg")))
            // Serve other assets from the `assets` directory
            .service(Files::new("/assets", site_root))
            // Register Leptos routes
            .leptos_routes(leptos_options.to_owned(), routes.to_owned(), FeedbackApp)
            .app_data(web::Data::new(leptos_options.to_owned()))
    })
    .bind(&addr)?
    .run()
    .await
}

#[cfg(not(any(feature = "ssr", feature = "csr")))]
pub fn main() {
    // no client-side main function
    // see lib.rs for hydration function instead
}

#[cfg(all(not(feature = "ssr"), feature = "csr"))]
pub fn main() {
    // to run: `trunk serve --open --features csr`
    use class_feedback::app::App;

    console_error_panic_hook::set_once();

    leptos::mount_to_body(App);
}
