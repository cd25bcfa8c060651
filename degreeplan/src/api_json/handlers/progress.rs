use actix_web::{web, HttpResponse, Responder};
use serde::Serialize;
use serde_json::json;
use tracing::debug;

use super::parse_program;
use crate::algorithm::{
    check_prerequisites, compute_progress, compute_projected_progress, generate_semester_plan,
    get_lower_division_hours, get_remaining_categories,
};
use crate::api_json::{resolve_course_with_resolver, resolve_courses, title_to_code, PlanRequest, PrerequisiteCheckRequest};
use crate::catalog::Catalog;
use crate::models::{DegreeProgress, ProgramId, RemainingCategory, SemesterPlan};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressResponse {
    pub program: ProgramId,
    pub progress: DegreeProgress,
    pub projected: DegreeProgress,
    pub lower_division_hours: u32,
    pub max_lower_division: Option<u32>,
    pub lower_division_warning: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanResponse {
    #[serde(flatten)]
    pub progress: ProgressResponse,
    pub name: Option<String>,
    pub expected_graduation: Option<String>,
    pub remaining: Vec<RemainingCategory>,
    pub semester_plan: Vec<SemesterPlan>,
}

fn progress_response(catalog: &Catalog, id: ProgramId, req: &PlanRequest) -> ProgressResponse {
    let all: Vec<&String> = req.completed.iter().chain(req.planned.iter()).collect();
    let lower = get_lower_division_hours(catalog, &all, id);
    let max = catalog.program(id).max_lower_division;
    ProgressResponse {
        program: id,
        progress: compute_progress(catalog, id, &req.completed),
        projected: compute_projected_progress(catalog, id, &req.completed, &req.planned),
        lower_division_hours: lower,
        max_lower_division: max,
        lower_division_warning: max.is_some_and(|m| lower >= m),
    }
}

/// POST /progress: avance actual y proyectado.
pub async fn progress_handler(catalog: web::Data<Catalog>, body: web::Json<PlanRequest>) -> impl Responder {
    let req = resolve_courses(body.into_inner(), &catalog);
    let id = match parse_program(&req.program) {
        Ok(id) => id,
        Err(resp) => return resp,
    };
    HttpResponse::Ok().json(progress_response(&catalog, id, &req))
}

/// POST /plan: avance, categorías pendientes y plan semestral.
pub async fn plan_handler(catalog: web::Data<Catalog>, body: web::Json<PlanRequest>) -> impl Responder {
    let req = resolve_courses(body.into_inner(), &catalog);
    let id = match parse_program(&req.program) {
        Ok(id) => id,
        Err(resp) => return resp,
    };

    let remaining = get_remaining_categories(&catalog, id, &req.completed, &req.planned);
    let semester_plan = match req.expected_graduation.as_deref() {
        Some(grad) => generate_semester_plan(grad, &remaining),
        None => Vec::new(),
    };
    debug!(program = %id, remaining = remaining.len(), semesters = semester_plan.len(), "plan request");

    HttpResponse::Ok().json(PlanResponse {
        progress: progress_response(&catalog, id, &req),
        name: req.name,
        expected_graduation: req.expected_graduation,
        remaining,
        semester_plan,
    })
}

/// POST /prerequisites/check
pub async fn check_prerequisites_handler(
    catalog: web::Data<Catalog>,
    body: web::Json<PrerequisiteCheckRequest>,
) -> impl Responder {
    let req = body.into_inner();
    if req.course.trim().is_empty() {
        return HttpResponse::BadRequest().json(json!({"error": "course is required"}));
    }
    let resolver = |title: &str| title_to_code(&catalog, title);
    let course = resolve_course_with_resolver(req.course, &resolver);
    let completed: Vec<String> = req.completed.into_iter().map(|c| resolve_course_with_resolver(c, &resolver)).collect();
    let planned: Vec<String> = req.planned.into_iter().map(|c| resolve_course_with_resolver(c, &resolver)).collect();

    let check = check_prerequisites(&catalog, &course, &completed, &planned);
    HttpResponse::Ok().json(json!({
        "course": course,
        "met": check.met,
        "unmetGroups": check.unmet_groups,
        "entry": check.entry,
    }))
}
