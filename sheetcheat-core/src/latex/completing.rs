//! Document skeleton
//!
//! Generated payloads are usually full documents, but sometimes the service only answers
//! with the body. [`complete`] wraps such a fragment into the fixed skeleton the cheat
//! sheets are compiled with. Anything that already carries `\begin{document}` is left
//! alone, malformed or not.

use crate::latex::document::{BEGIN_DOCUMENT, END_DOCUMENT};
use serde::Deserialize;

/// The knobs of the fixed preamble
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Skeleton {
    /// babel language option
    pub language: String,
}

impl Default for Skeleton {
    fn default() -> Self {
        Skeleton {
            language: "spanish".to_string(),
        }
    }
}

impl Skeleton {
    pub fn new(language: impl Into<String>) -> Self {
        Skeleton {
            language: language.into(),
        }
    }

    /// The preamble lines, ending with a newline
    pub fn preamble(&self) -> String {
        let babel = if self.language == "spanish" {
            "\\usepackage[spanish, es-tabla]{babel}\n".to_string()
        } else {
            format!("\\usepackage[{}]{{babel}}\n", self.language)
        };
        let mut preamble = String::from("\\documentclass[11pt]{article}\n");
        preamble.push_str(&babel);
        preamble.push_str(concat!(
            "\\usepackage[utf8]{inputenc}\n",
            "\\usepackage[T1]{fontenc}\n",
            "\\usepackage{lmodern}\n",
            "\\usepackage{amsmath,amssymb,amsthm,mathtools}\n",
            "\\usepackage[a4paper,margin=2.0cm]{geometry}\n",
            "\\usepackage{enumitem}\n",
            "\\usepackage{xcolor}\n",
            "\\usepackage{tcolorbox}\n",
            "\\usepackage{graphicx}\n",
            "\\usepackage{hyperref}\n",
            "\\usepackage{microtype}\n",
            "\\tcbset{colback=gray!3,colframe=black!50,boxrule=0.5pt,arc=2pt}\n",
        ));
        preamble
    }
}

/// Wrap a bare fragment with the default skeleton
pub fn complete(fragment: &str) -> String {
    complete_with(fragment, &Skeleton::default())
}

/// Wrap a bare fragment with the given skeleton
pub fn complete_with(fragment: &str, skeleton: &Skeleton) -> String {
    if fragment.contains(BEGIN_DOCUMENT) {
        return fragment.to_string();
    }
    format!(
        "{}\n{BEGIN_DOCUMENT}\n{fragment}\n{END_DOCUMENT}\n",
        skeleton.preamble()
    )
}
