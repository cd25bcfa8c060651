use actix_web::{web, HttpResponse, Responder};
use serde_json::json;

use super::parse_program;
use crate::catalog::{codes, Catalog};

pub async fn list_programs_handler(catalog: web::Data<Catalog>) -> impl Responder {
    let programs: Vec<_> = catalog
        .programs()
        .into_iter()
        .map(|(id, p)| {
            json!({
                "id": id,
                "name": p.name,
                "description": p.description,
                "totalHours": p.total_hours,
                "maxLowerDivision": p.max_lower_division,
            })
        })
        .collect();
    HttpResponse::Ok().json(programs)
}

pub async fn get_program_handler(catalog: web::Data<Catalog>, path: web::Path<String>) -> impl Responder {
    let id = match parse_program(&path) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    HttpResponse::Ok().json(json!({"id": id, "program": catalog.program(id)}))
}

pub async fn program_electives_handler(catalog: web::Data<Catalog>, path: web::Path<String>) -> impl Responder {
    let id = match parse_program(&path) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    let electives = catalog.elective_courses(id);
    HttpResponse::Ok().json(json!({"program": id, "count": electives.len(), "courses": electives}))
}

// Acepta "ENGL 30133" y variantes como "engl30133"
fn lookup_code(raw: &str) -> String {
    codes::normalize_code(raw).unwrap_or_else(|| raw.trim().to_string())
}

pub async fn get_course_handler(catalog: web::Data<Catalog>, path: web::Path<String>) -> impl Responder {
    let code = lookup_code(&path);
    match catalog.course(&code) {
        Some(course) => HttpResponse::Ok().json(course),
        None => HttpResponse::NotFound().json(json!({"error": format!("course `{code}` not found")})),
    }
}

pub async fn get_prerequisites_handler(catalog: web::Data<Catalog>, path: web::Path<String>) -> impl Responder {
    let code = lookup_code(&path);
    // sin entrada no es error: el curso no tiene prerequisitos
    HttpResponse::Ok().json(json!({"course": code, "entry": catalog.prerequisites(&code)}))
}
