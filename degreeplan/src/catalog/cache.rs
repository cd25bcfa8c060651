//! Catálogo compartido del proceso.
//!
//! `shared()` carga el catálogo una sola vez (directorio resuelto por
//! `get_datafiles_dir`) y entrega clones de `Arc`; después de la carga es
//! sólo lectura, así que no hace falta bloqueo alguno para consultarlo.

use std::path::Path;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use super::{get_datafiles_dir, Catalog};
use crate::error::Result;

static SHARED: OnceLock<Arc<Catalog>> = OnceLock::new();

// Serializa la primera carga para no leer los archivos dos veces en paralelo
static INIT_LOCK: Mutex<()> = Mutex::new(());

/// Devuelve el catálogo compartido, cargándolo desde disco en la primera llamada.
pub fn shared() -> Result<Arc<Catalog>> {
    if let Some(existing) = SHARED.get() {
        return Ok(Arc::clone(existing));
    }
    init_shared(&get_datafiles_dir())
}

/// Carga el catálogo desde `dir` si todavía no hay uno compartido.
/// Si ya estaba cargado, devuelve el existente e ignora `dir`.
pub fn init_shared(dir: &Path) -> Result<Arc<Catalog>> {
    let _guard = INIT_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
    if let Some(existing) = SHARED.get() {
        return Ok(Arc::clone(existing));
    }
    let catalog = Arc::new(Catalog::load(dir)?);
    Ok(Arc::clone(SHARED.get_or_init(|| catalog)))
}
