//! Topic slugs and artifact names
//!
//! The topic typed by the user ends up in file names (`cheat_sheat_<slug>.pdf`), so it is
//! folded into a stable ASCII token: accents are decomposed and dropped, everything outside
//! `[a-z0-9]` collapses into one separator.

use serde::Deserialize;
use std::fmt;
use unicode_normalization::UnicodeNormalization;

/// Slug of a topic with nothing usable in it
pub const DEFAULT_SLUG: &str = "tema";

/// Default artifact name prefix
pub const DEFAULT_PREFIX: &str = "cheat_sheat";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Separator {
    #[default]
    Underscore,
    Hyphen,
}

impl Separator {
    pub fn as_char(self) -> char {
        match self {
            Separator::Underscore => '_',
            Separator::Hyphen => '-',
        }
    }
}

/// A filesystem-safe topic identifier, never empty
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Slug(String);

impl Slug {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Slug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Slug {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

pub fn slugify(topic: &str) -> Slug {
    slugify_with(topic, Separator::default())
}

pub fn slugify_with(topic: &str, separator: Separator) -> Slug {
    let sep = separator.as_char();
    let mut slug = String::with_capacity(topic.len());
    let mut pending = false;
    for c in topic.nfkd().filter(char::is_ascii) {
        let c = c.to_ascii_lowercase();
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending && !slug.is_empty() {
                slug.push(sep);
            }
            pending = false;
            slug.push(c);
        } else {
            pending = true;
        }
    }
    if slug.is_empty() {
        return Slug(DEFAULT_SLUG.to_string());
    }
    Slug(slug)
}

/// File names of the artifacts produced for one topic
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactNames {
    pub slug: Slug,
    /// `<prefix>_<slug>.tex`
    pub source: String,
    /// `<prefix>_<slug>.pdf`
    pub pdf: String,
}

impl ArtifactNames {
    pub fn for_topic(prefix: &str, topic: &str) -> Self {
        Self::for_slug(prefix, slugify(topic))
    }

    pub fn for_slug(prefix: &str, slug: Slug) -> Self {
        let stem = format!("{prefix}_{slug}");
        ArtifactNames {
            source: format!("{stem}.tex"),
            pdf: format!("{stem}.pdf"),
            slug,
        }
    }

    /// Name for an arbitrary extension, e.g. `md`
    pub fn with_extension(&self, extension: &str) -> String {
        let stem = self.source.trim_end_matches(".tex");
        format!("{stem}.{extension}")
    }
}

/// `"area bajo la curva.pdf"` → `"Area_Bajo_La_Curva.pdf"`
///
/// Whitespace runs become `_`, each `_`-separated word is capitalized, the extension is
/// kept verbatim. Leading dots do not start an extension.
pub fn title_case_filename(name: &str) -> String {
    let (stem, extension) = match name.rfind('.') {
        Some(idx) if idx > 0 => name.split_at(idx),
        _ => (name, ""),
    };
    let joined = stem.split_whitespace().collect::<Vec<_>>().join("_");
    let words: Vec<String> = joined
        .split('_')
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect();
    format!("{}{}", words.join("_"), extension)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Área Bajo la Curva!", "area_bajo_la_curva")]
    #[case("Vectores", "vectores")]
    #[case("  Límites  y   Continuidad ", "limites_y_continuidad")]
    #[case("Ecuación de 2º grado", "ecuacion_de_2o_grado")]
    #[case("__x__", "x")]
    #[case("", "tema")]
    #[case("¿¡!?", "tema")]
    #[case("日本語", "tema")]
    fn test_slugify(#[case] topic: &str, #[case] expected: &str) {
        assert_eq!(slugify(topic).as_str(), expected);
    }

    #[test]
    fn test_hyphen_separator() {
        assert_eq!(
            slugify_with("Área Bajo la Curva", Separator::Hyphen).as_str(),
            "area-bajo-la-curva"
        );
    }

    #[test]
    fn test_artifact_names() {
        let names = ArtifactNames::for_topic(DEFAULT_PREFIX, "Integrales Dobles");
        assert_eq!(names.source, "cheat_sheat_integrales_dobles.tex");
        assert_eq!(names.pdf, "cheat_sheat_integrales_dobles.pdf");
        assert_eq!(names.with_extension("md"), "cheat_sheat_integrales_dobles.md");
    }

    #[rstest]
    #[case("area bajo la curva.pdf", "Area_Bajo_La_Curva.pdf")]
    #[case("resumen final.pdf", "Resumen_Final.pdf")]
    #[case("sub folder", "Sub_Folder")]
    #[case("  MUCHO   espacio .tex", "Mucho_Espacio.tex")]
    #[case(".hidden file", ".hidden_File")]
    fn test_title_case_filename(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(title_case_filename(name), expected);
    }
}
