use actix_web::http::header;
use actix_web::{web, HttpResponse, Responder};
use chrono::Local;
use serde::Deserialize;
use serde_json::json;

use super::error_response;
use crate::api_json::{resolve_course_with_resolver, title_to_code};
use crate::catalog::Catalog;
use crate::models::StudentRecord;
use crate::report::{advising_summary, export_csv, export_filename, render_text_report, AdvisingStep};
use crate::store::StudentStore;

fn load_student(store: &StudentStore, email: &str) -> Result<StudentRecord, HttpResponse> {
    match store.get(email) {
        Ok(Some(record)) => Ok(record),
        Ok(None) => Err(HttpResponse::NotFound().json(json!({"error": format!("no student with email `{email}`")}))),
        Err(e) => Err(error_response(&e)),
    }
}

/// POST /students: guarda (o reemplaza por email) el registro del estudiante.
pub async fn save_student_handler(
    catalog: web::Data<Catalog>,
    store: web::Data<StudentStore>,
    body: web::Json<StudentRecord>,
) -> impl Responder {
    let mut student = body.into_inner();
    if student.email.trim().is_empty() {
        return HttpResponse::BadRequest().json(json!({"error": "email is required"}));
    }

    // normalizar cursos y restablecer la exclusión aprobados/planificados
    let resolver = |title: &str| title_to_code(&catalog, title);
    let completed: Vec<String> = std::mem::take(&mut student.completed_courses)
        .into_iter()
        .map(|c| resolve_course_with_resolver(c, &resolver))
        .collect();
    let planned: Vec<String> = std::mem::take(&mut student.planned_courses)
        .into_iter()
        .map(|c| resolve_course_with_resolver(c, &resolver))
        .collect();
    for code in &completed {
        if !student.is_completed(code) {
            student.toggle_completed(code);
        }
    }
    student.set_planned(planned.into_iter().filter(|c| !completed.contains(c)));

    match store.upsert(student) {
        Ok(count) => HttpResponse::Ok().json(json!({"status": "ok", "count": count})),
        Err(e) => error_response(&e),
    }
}

pub async fn get_student_handler(store: web::Data<StudentStore>, path: web::Path<String>) -> impl Responder {
    match load_student(&store, &path) {
        Ok(record) => HttpResponse::Ok().json(record),
        Err(resp) => resp,
    }
}

pub async fn delete_student_handler(store: web::Data<StudentStore>, path: web::Path<String>) -> impl Responder {
    match store.remove(&path) {
        Ok(true) => HttpResponse::Ok().json(json!({"status": "ok"})),
        Ok(false) => HttpResponse::NotFound().json(json!({"error": format!("no student with email `{}`", path.as_str())})),
        Err(e) => error_response(&e),
    }
}

/// GET /students/{email}/export.csv
pub async fn export_csv_handler(store: web::Data<StudentStore>, path: web::Path<String>) -> impl Responder {
    let record = match load_student(&store, &path) {
        Ok(r) => r,
        Err(resp) => return resp,
    };
    let filename = export_filename(record.program, &record.name, Local::now().date_naive(), "csv");
    HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((header::CONTENT_DISPOSITION, format!("attachment; filename=\"{filename}\"")))
        .body(export_csv(&record))
}

/// GET /students/{email}/report
pub async fn report_handler(
    catalog: web::Data<Catalog>,
    store: web::Data<StudentStore>,
    path: web::Path<String>,
) -> impl Responder {
    let record = match load_student(&store, &path) {
        Ok(r) => r,
        Err(resp) => return resp,
    };
    let today = Local::now().date_naive();
    match render_text_report(&catalog, &record, today) {
        Some(text) => {
            let filename = export_filename(record.program, &record.name, today, "txt");
            HttpResponse::Ok()
                .content_type("text/plain; charset=utf-8")
                .insert_header((header::CONTENT_DISPOSITION, format!("inline; filename=\"{filename}\"")))
                .body(text)
        }
        None => HttpResponse::BadRequest().json(json!({"error": "student has not chosen a program"})),
    }
}

#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    #[serde(default)]
    pub step: AdvisingStep,
}

/// GET /students/{email}/summary?step=semester
pub async fn summary_handler(
    catalog: web::Data<Catalog>,
    store: web::Data<StudentStore>,
    path: web::Path<String>,
    query: web::Query<SummaryQuery>,
) -> impl Responder {
    let record = match load_student(&store, &path) {
        Ok(r) => r,
        Err(resp) => return resp,
    };
    match advising_summary(&catalog, &record, query.step) {
        Some(text) => HttpResponse::Ok().content_type("text/plain; charset=utf-8").body(text),
        None => HttpResponse::BadRequest().json(json!({"error": "student has not chosen a program"})),
    }
}
