//! Whole-document previews

use sheetcheat_babel::{to_markdown, FormatRegistry};
use sheetcheat_core::latex::{Document, DocumentLoader};

const VECTORES: &str = r"\documentclass{article}
\title{Sheet Cheat: Vectores}
\begin{document}
\maketitle
\section{Producto punto}
El \textbf{producto punto} de $u$ y $v$:
\[ u \cdot v = |u||v|\cos\theta \]
\begin{itemize}
  \item Conmutativo
  \item Distributivo
\end{itemize}
\begin{tcolorbox}[title=Ojo]
Si $u \cdot v = 0$ son ortogonales.
\end{tcolorbox}
\vspace{1em}
\begin{center}\scriptsize Generado con Sheet Cheat\end{center}
\end{document}
";

#[test]
fn test_complete_document_preview() {
    let markdown = to_markdown(&Document::new(VECTORES)).unwrap();
    // blank quote lines carry a trailing space
    let markdown: String = markdown.lines().map(|line| format!("{}\n", line.trim_end())).collect();
    insta::assert_snapshot!(markdown, @r###"
    ### Sheet Cheat: Vectores

    ### Producto punto

    El **producto punto** de $u$ y $v$:

    $$
    u \cdot v = |u||v|\cos\theta
    $$

    - ▸ Conmutativo
    - ▸ Distributivo

    > **Ojo**
    >
    > Si $u \cdot v = 0$ son ortogonales.

    Generado con Sheet Cheat
    "###);
}

#[test]
fn test_preamble_never_shows() {
    let markdown = to_markdown(&Document::new(VECTORES)).unwrap();
    assert!(!markdown.contains("documentclass"));
    assert!(!markdown.contains("\\maketitle"));
    assert!(!markdown.contains("\\vspace"));
}

#[test]
fn test_normalized_response_preview() {
    let raw = "COOR-BO-ZY\n```latex\n\\section{Límites}\n\\begin{enumerate}\n\\item Sustituir\n\\end{enumerate}\nSea \\[ \\int_0^1 x^2 \\]\n```";
    let doc = DocumentLoader::from_string(raw).normalize("Límites").unwrap();
    let markdown = to_markdown(&doc).unwrap();

    assert!(markdown.starts_with("### Sheet Cheat: Límites\n"));
    assert!(markdown.contains("### Límites"));
    assert!(markdown.contains("1.  Sustituir"));
    assert!(markdown.contains("$$\n\\int_0^1 x^2\\,dx\n$$"));
    assert!(markdown.trim_end().ends_with("Generado con Sheet Cheat"));
    assert!(!markdown.contains("\\usepackage"));
    assert!(!markdown.contains("\\author"));
}

#[test]
fn test_registry_serializes_markdown() {
    let registry = FormatRegistry::with_defaults();
    let doc = Document::new("\\section{A}\n\\emph{b} \\url{https://example.org}");
    assert_eq!(
        registry.serialize(&doc, "markdown").unwrap(),
        "### A\n\n*b* <https://example.org>\n"
    );
}

#[test]
fn test_fragment_without_root() {
    let markdown = to_markdown(&Document::new("Texto suelto \\\\ con salto")).unwrap();
    assert_eq!(markdown, "Texto suelto\\\ncon salto\n");
}

#[test]
fn test_prose_is_escaped() {
    let markdown = to_markdown(&Document::new("# de raíces\n1. el primer caso")).unwrap();
    assert_eq!(markdown, "\\# de raíces\n1\\. el primer caso\n");
}
