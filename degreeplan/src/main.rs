// --- Asesoría de avance de carrera (departamento de inglés) - binario principal ---

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use degreeplan::catalog::{self, derive, import, Catalog};
use degreeplan::config::Settings;
use degreeplan::models::CatalogCourse;
use degreeplan::report;
use degreeplan::store::StudentStore;

#[derive(Debug, Parser)]
#[command(name = "degreeplan", version, about = "Degree-progress advising for English department majors")]
struct Cli {
    /// Directorio con courses.json, programs.json y prerequisites.json
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Levanta la API HTTP (por defecto)
    Serve {
        #[arg(long)]
        bind: Option<String>,
        #[arg(long)]
        students_file: Option<PathBuf>,
    },
    /// Carga y valida el catálogo, y termina
    Check,
    /// Reconstruye la tabla de prerrequisitos a partir de las descripciones
    DerivePrerequisites {
        /// Lista de cursos a leer (por defecto courses.json del directorio de datos)
        #[arg(long)]
        courses: Option<PathBuf>,
        /// Escribe el JSON aquí en vez de stdout
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Convierte la planilla del catálogo de registro en courses.json
    ImportCatalog {
        input: PathBuf,
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
    /// Imprime el reporte de texto de un plan exportado en CSV
    Report { csv: PathBuf },
}

fn init_tracing(filter: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn write_output(output: Option<&Path>, text: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), "output written");
        }
        None => println!("{text}"),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut settings = Settings::from_env();
    if let Some(dir) = cli.data_dir {
        settings.data_dir = Some(dir);
    }
    init_tracing(&settings.log_filter);

    match cli.command.unwrap_or(Command::Serve { bind: None, students_file: None }) {
        Command::Serve { bind, students_file } => {
            if let Some(bind) = bind {
                settings.bind_addr = bind;
            }
            if let Some(file) = students_file {
                settings.students_file = file;
            }
            let catalog = catalog::init_shared(&settings.resolved_data_dir()).context("loading catalog")?;
            let store = StudentStore::new(&settings.students_file);
            degreeplan::run_server(&settings.bind_addr, catalog, store).await?;
        }
        Command::Check => {
            let dir = settings.resolved_data_dir();
            let catalog = Catalog::load(&dir).with_context(|| format!("validating {}", dir.display()))?;
            for (id, program) in catalog.programs() {
                println!(
                    "{id}: {} ({} hours, {} categories, {} elective courses)",
                    program.name,
                    program.total_hours,
                    program.requirements.len(),
                    catalog.elective_courses(id).len()
                );
            }
            println!("{} courses, {} prerequisite entries: OK", catalog.courses().len(), catalog.prerequisite_table().len());
        }
        Command::DerivePrerequisites { courses, output } => {
            let path = courses.unwrap_or_else(|| settings.resolved_data_dir().join(catalog::io::COURSES_FILE));
            let list: Vec<CatalogCourse> = catalog::io::read_json(&path)?;
            let derived = derive::derive_prerequisites(&list);
            for (code, text) in &derived.unmatched {
                warn!(code = %code, text = %text, "unmatched prerequisite text");
            }
            write_output(output.as_deref(), &serde_json::to_string_pretty(&derived.entries)?)?;
        }
        Command::ImportCatalog { input, output } => {
            let courses = import::import_courses(&input)?;
            if courses.is_empty() {
                bail!("no department courses found in {}", input.display());
            }
            write_output(output.as_deref(), &serde_json::to_string_pretty(&courses)?)?;
        }
        Command::Report { csv } => {
            let text = fs::read_to_string(&csv).with_context(|| format!("reading {}", csv.display()))?;
            let record = report::import_csv(&text)?;
            let catalog = catalog::init_shared(&settings.resolved_data_dir())?;
            let today = chrono::Local::now().date_naive();
            match report::render_text_report(&catalog, &record, today) {
                Some(report) => println!("{report}"),
                None => bail!("{} has no program selected", csv.display()),
            }
        }
    }
    Ok(())
}
