//! Reply texts shown to hotel guests.

use paraiso_core::types::FaqRecord;

use crate::menu::MenuCatalog;

pub const FAREWELL: &str =
    "👋 ¡Gracias por visitar el Hotel Paraíso Azul! Esperamos verte pronto.";
pub const INVALID_OPTION: &str = "Opción no válida. Intenta de nuevo.";
pub const SUBMENU_PROMPT: &str =
    "Por favor, selecciona un número válido o escribe 'menu' para regresar.";
pub const NOT_UNDERSTOOD: &str =
    "No entendí tu solicitud. Escribe 'menu' para ver las opciones disponibles.";
pub const NO_INFORMATION: &str = "No hay información disponible para esta sección.";

/// Greeting plus the numbered main-menu options.
pub fn main_menu(catalog: &MenuCatalog) -> String {
    let mut text = String::from("🏖️ *Bienvenido al Hotel Paraíso Azul*\n\n");
    text.push_str("Selecciona una opción:\n");
    for entry in catalog.entries() {
        text.push_str(&format!("{}. {}\n", entry.key, entry.name));
    }
    text.push_str("\nEscribe el número de la opción o 'salir' para terminar.");
    text
}

/// Numbered question list for one intent, or [`NO_INFORMATION`] when empty.
pub fn submenu(intent: &str, items: &[FaqRecord]) -> String {
    if items.is_empty() {
        return NO_INFORMATION.to_string();
    }
    let mut text = format!(
        "Has seleccionado '{}'. Estas son las opciones disponibles:\n",
        intent
    );
    for (idx, item) in items.iter().enumerate() {
        text.push_str(&format!("{}. {}\n", idx + 1, item.question));
    }
    text.push_str(
        "\nEscribe el número de la pregunta para ver la respuesta o 'menu' para regresar al inicio.",
    );
    text
}
