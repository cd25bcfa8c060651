use std::sync::Arc;

use actix_cors::Cors;
use actix_web::middleware::Logger;
use actix_web::{web, App, HttpServer};
use tracing::info;

use crate::api_json::handlers::*;
use crate::catalog::Catalog;
use crate::store::StudentStore;

/// Registra todas las rutas de la API. Se usa tanto en `run_server` como en los tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/programs", web::get().to(list_programs_handler))
        .route("/programs/{id}", web::get().to(get_program_handler))
        .route("/programs/{id}/electives", web::get().to(program_electives_handler))
        .route("/courses/{code}", web::get().to(get_course_handler))
        .route("/prerequisites/check", web::post().to(check_prerequisites_handler))
        .route("/prerequisites/{code}", web::get().to(get_prerequisites_handler))
        .route("/progress", web::post().to(progress_handler))
        .route("/plan", web::post().to(plan_handler))
        .route("/students", web::post().to(save_student_handler))
        .route("/students/{email}", web::get().to(get_student_handler))
        .route("/students/{email}", web::delete().to(delete_student_handler))
        .route("/students/{email}/export.csv", web::get().to(export_csv_handler))
        .route("/students/{email}/report", web::get().to(report_handler))
        .route("/students/{email}/summary", web::get().to(summary_handler))
        .route("/graduation-terms", web::get().to(graduation_terms_handler))
        .route("/help", web::get().to(help_handler));
}

pub async fn run_server(bind_addr: &str, catalog: Arc<Catalog>, store: StudentStore) -> std::io::Result<()> {
    let catalog = web::Data::from(catalog);
    let store = web::Data::new(store);
    info!(bind = bind_addr, students = %store.path().display(), "starting advising server");

    HttpServer::new(move || {
        App::new()
            .wrap(Cors::permissive())
            .wrap(Logger::default())
            .app_data(catalog.clone())
            .app_data(store.clone())
            .configure(configure)
    })
    .bind(bind_addr)?
    .run()
    .await
}
