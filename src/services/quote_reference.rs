//! Referencias legibles de presupuesto: `PW-<año>-<NNNN>`
//!
//! El espacio es pequeño (9000 valores por año), así que las colisiones
//! son posibles; la restricción UNIQUE de la tabla es la garantía real.

use chrono::{Datelike, Utc};
use rand::Rng;

pub const REFERENCE_PREFIX: &str = "PW";

/// Intentos de inserción antes de rendirse ante colisiones
pub const MAX_REFERENCE_ATTEMPTS: usize = 5;

/// Genera una referencia para el año actual
pub fn generate_reference() -> String {
    generate_reference_with(Utc::now().year(), &mut rand::thread_rng())
}

/// Genera una referencia para `year` usando el generador dado
pub fn generate_reference_with<R: Rng + ?Sized>(year: i32, rng: &mut R) -> String {
    let number: u16 = rng.gen_range(1000..=9999);
    format!("{}-{}-{}", REFERENCE_PREFIX, year, number)
}
