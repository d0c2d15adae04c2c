//! Fixed main-menu catalog.

use serde::Serialize;

/// One numbered option of the main menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuEntry {
    pub key: &'static str,
    pub name: &'static str,
    pub intent: &'static str,
}

static HOTEL_MENU: [MenuEntry; 8] = [
    MenuEntry {
        key: "1",
        name: "Reservas y precios",
        intent: "reserva_info",
    },
    MenuEntry {
        key: "2",
        name: "Habitaciones",
        intent: "habitacion_info",
    },
    MenuEntry {
        key: "3",
        name: "Servicios del hotel",
        intent: "servicios_info",
    },
    MenuEntry {
        key: "4",
        name: "Check-in / Check-out",
        intent: "checkin_info",
    },
    MenuEntry {
        key: "5",
        name: "Ubicación y contacto",
        intent: "ubicacion_info",
    },
    MenuEntry {
        key: "6",
        name: "Promociones y políticas",
        intent: "promociones_info",
    },
    MenuEntry {
        key: "7",
        name: "Actividades y alrededores",
        intent: "sugerencias",
    },
    MenuEntry {
        key: "8",
        name: "Reportar un problema",
        intent: "quejas",
    },
];

/// Ordered set of main-menu options. Not derived from the dataset.
#[derive(Debug, Clone)]
pub struct MenuCatalog {
    entries: &'static [MenuEntry],
}

impl MenuCatalog {
    /// The eight-option hotel menu.
    pub fn hotel() -> Self {
        Self {
            entries: &HOTEL_MENU,
        }
    }

    /// Resolve an exact key such as `"3"`.
    pub fn get(&self, key: &str) -> Option<&MenuEntry> {
        self.entries.iter().find(|e| e.key == key)
    }

    pub fn entries(&self) -> impl Iterator<Item = &MenuEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MenuCatalog {
    fn default() -> Self {
        Self::hotel()
    }
}
