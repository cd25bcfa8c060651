use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;
use serde_json::json;

use crate::algorithm::terms::{DEFAULT_GRADUATION_CHOICES, DEFAULT_GRADUATION_START_YEAR};
use crate::algorithm::graduation_terms;
use crate::api_json::PlanRequest;

#[derive(Debug, Deserialize)]
pub struct GraduationTermsQuery {
    pub start_year: Option<i32>,
    pub count: Option<usize>,
}

/// GET /graduation-terms: opciones de semestre de graduación (`label`/`value`).
pub async fn graduation_terms_handler(query: web::Query<GraduationTermsQuery>) -> impl Responder {
    let start = query.start_year.unwrap_or(DEFAULT_GRADUATION_START_YEAR);
    let count = query.count.unwrap_or(DEFAULT_GRADUATION_CHOICES).min(30);
    let terms: Vec<_> = graduation_terms(start, count)
        .into_iter()
        .map(|t| json!({"label": t.to_string(), "value": t.to_string()}))
        .collect();
    HttpResponse::Ok().json(terms)
}

pub async fn help_handler() -> impl Responder {
    let example = PlanRequest {
        program: "english".to_string(),
        completed: vec!["ENGL 10803".to_string(), "ENGL 20803".to_string(), "ENGL 20503".to_string()],
        planned: vec!["ENGL 30133".to_string(), "Intro to Literary Theory".to_string()],
        expected_graduation: Some("Spring 2028".to_string()),
        name: Some("Jane Doe".to_string()),
    };

    let help = json!({
        "description": "Degree-progress advising API for English department majors. POST /plan returns progress, remaining categories and a suggested semester plan; course entries may be codes (\"ENGL 30133\", \"ENGL30133\") or catalog titles.",
        "post_example": example,
        "programs": ["english", "writing", "creativeWriting"],
        "routes": [
            "GET /programs",
            "GET /programs/{id}",
            "GET /programs/{id}/electives",
            "GET /courses/{code}",
            "GET /prerequisites/{code}",
            "POST /progress",
            "POST /prerequisites/check",
            "POST /plan",
            "POST /students",
            "GET /students/{email}",
            "DELETE /students/{email}",
            "GET /students/{email}/export.csv",
            "GET /students/{email}/report",
            "GET /students/{email}/summary?step=semester",
            "GET /graduation-terms?start_year=2026&count=9",
            "GET /help"
        ],
        "note": "Prerequisites are counted as met when satisfied by completed or planned courses. Lower-division limits are advisory only."
    });

    HttpResponse::Ok().json(help)
}
