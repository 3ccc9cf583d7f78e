//! User-facing wording for each [`NetworkErrorKind`].

use std::{fmt, str::FromStr};

use super::error::NetworkErrorKind;

/// Title and body shown to the user for one error kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorMessage {
    pub title: String,
    pub message: String,
}

impl ErrorMessage {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Languages with a built-in catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    English,
    Spanish,
}

impl Locale {
    pub fn as_str(&self) -> &'static str {
        match self {
            Locale::English => "en",
            Locale::Spanish => "es",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" | "english" => Ok(Locale::English),
            "es" | "spanish" | "español" => Ok(Locale::Spanish),
            _ => Err(format!("unsupported locale: {s}")),
        }
    }
}

/// A complete set of messages, one per error kind.
///
/// Start from a built-in locale and override individual entries with
/// [`with_message`](Self::with_message).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageCatalog {
    locale: Locale,
    entries: [ErrorMessage; 8],
}

impl MessageCatalog {
    /// Built-in catalog for `locale`.
    pub fn new(locale: Locale) -> Self {
        let table = match locale {
            Locale::English => ENGLISH,
            Locale::Spanish => SPANISH,
        };
        Self {
            locale,
            entries: table.map(|(title, message)| ErrorMessage::new(title, message)),
        }
    }

    pub fn english() -> Self {
        Self::new(Locale::English)
    }

    pub fn spanish() -> Self {
        Self::new(Locale::Spanish)
    }

    /// Replace the wording for `kind`.
    pub fn with_message(mut self, kind: NetworkErrorKind, message: ErrorMessage) -> Self {
        self.entries[kind.index()] = message;
        self
    }

    pub fn locale(&self) -> Locale {
        self.locale
    }

    pub fn message(&self, kind: NetworkErrorKind) -> &ErrorMessage {
        &self.entries[kind.index()]
    }
}

impl Default for MessageCatalog {
    fn default() -> Self {
        Self::english()
    }
}

// Rows follow the order of `NetworkErrorKind::ALL`.
const ENGLISH: [(&str, &str); 8] = [
    (
        "No connection",
        "You appear to be offline. Check your internet connection and try again.",
    ),
    (
        "Request timed out",
        "The server took too long to respond. Please try again.",
    ),
    (
        "Server error",
        "Something went wrong on our end. Please try again in a moment.",
    ),
    ("Session expired", "Please sign in again to continue."),
    (
        "Access denied",
        "You don't have permission to access this content.",
    ),
    ("Not found", "The requested content could not be found."),
    (
        "Too many requests",
        "You're doing that too often. Please wait a moment and try again.",
    ),
    (
        "Unexpected error",
        "Something unexpected happened. Please try again.",
    ),
];

const SPANISH: [(&str, &str); 8] = [
    (
        "Sin conexión",
        "Parece que no tienes conexión. Comprueba tu conexión a internet e inténtalo de nuevo.",
    ),
    (
        "Tiempo de espera agotado",
        "El servidor tardó demasiado en responder. Inténtalo de nuevo.",
    ),
    (
        "Error del servidor",
        "Algo salió mal en nuestro servidor. Inténtalo de nuevo en unos momentos.",
    ),
    ("Sesión caducada", "Vuelve a iniciar sesión para continuar."),
    (
        "Acceso denegado",
        "No tienes permiso para acceder a este contenido.",
    ),
    ("No encontrado", "No se encontró el contenido solicitado."),
    (
        "Demasiadas solicitudes",
        "Lo estás haciendo con demasiada frecuencia. Espera un momento e inténtalo de nuevo.",
    ),
    (
        "Error inesperado",
        "Ocurrió algo inesperado. Inténtalo de nuevo.",
    ),
];
