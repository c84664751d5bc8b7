/*
 * Responsibility
 * - validation message の言語切り替え
 * - Locale は Config (APP_LOCALE) で決め、AppState 経由で services に渡す
 */
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Locale {
    #[default]
    Es,
    En,
}

impl FromStr for Locale {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "es" | "es-ar" | "es-es" => Ok(Self::Es),
            "en" | "en-us" | "en-gb" => Ok(Self::En),
            _ => Err(()),
        }
    }
}

impl Locale {
    pub fn required(&self, field: &str) -> String {
        match self {
            Locale::Es => format!("El campo {field} es obligatorio"),
            Locale::En => format!("{field} is required"),
        }
    }

    pub fn invalid_image(&self) -> &'static str {
        match self {
            Locale::Es => "La imagen no es válida",
            Locale::En => "The image is not valid",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_locales() {
        assert_eq!("ES".parse::<Locale>(), Ok(Locale::Es));
        assert_eq!(" en-US ".parse::<Locale>(), Ok(Locale::En));
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn required_message_names_the_field() {
        assert_eq!(Locale::En.required("title"), "title is required");
        assert!(Locale::Es.required("title").contains("title"));
    }
}
