//! List conversion: steps, numbering, lettering and leftovers

use rstest::rstest;
use sheetcheat_babel::to_markdown;
use sheetcheat_core::latex::Document;

fn preview(source: &str) -> String {
    to_markdown(&Document::new(source)).unwrap()
}

#[test]
fn test_nested_enumerate_is_lettered() {
    let source = "\\begin{enumerate}
\\item Derivar
\\begin{enumerate}
\\item Regla del producto
\\item Regla de la cadena
\\end{enumerate}
\\item Integrar
\\end{enumerate}";
    insta::assert_snapshot!(preview(source), @r###"
    1.  Derivar
        - **a)** Regla del producto
        - **b)** Regla de la cadena
    2.  Integrar
    "###);
}

#[test]
fn test_only_first_enumerate_is_numbered() {
    let markdown = preview(
        "\\begin{enumerate}\\item uno\\end{enumerate}\n\n\\begin{enumerate}\\item dos\\end{enumerate}",
    );
    assert_eq!(markdown, "1.  uno\n\n- **a)** dos\n");
}

#[test]
fn test_letters_continue_after_z() {
    let items: String = (1..=28).map(|n| format!("\\item p{n}\n")).collect();
    let source = format!(
        "\\begin{{enumerate}}\\item uno\\end{{enumerate}}\n\\begin{{enumerate}}\n{items}\\end{{enumerate}}"
    );
    let markdown = preview(&source);
    assert!(markdown.contains("- **z)** p26\n"));
    assert!(markdown.contains("- **aa)** p27\n"));
    assert!(markdown.contains("- **ab)** p28\n"));
}

#[test]
fn test_steps_with_nested_math() {
    let markdown = preview("\\begin{itemize}\\item Sea\n\\[x^2\\]\n\\item Fin\\end{itemize}");
    assert_eq!(markdown, "- ▸ Sea\n  $$\n  x^2\n  $$\n- ▸ Fin\n");
}

#[test]
fn test_list_without_items_keeps_its_text() {
    let markdown = preview("\\begin{itemize}\nTexto importante sin item\n\\end{itemize}");
    assert_eq!(markdown, "Texto importante sin item\n");
}

#[rstest]
#[case("\\begin{itemize}\\item a", "• a\n")]
#[case("\\item suelto", "• suelto\n")]
#[case("antes\\end{enumerate}después", "antes\ndespués\n")]
#[case("\\begin{enumerate}\\begin{itemize}\\item x\\end{enumerate}", "1.  x\n")]
fn test_leftover_list_markers(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(preview(source), expected);
}

#[rstest]
#[case("\\begin{tcolorbox} abierto")]
#[case("$$ sin cerrar")]
#[case("\\textbf{")]
#[case("\\")]
#[case("\\begin{")]
#[case("\\item[")]
#[case("\\section")]
#[case("\\begin{itemize}\\begin{enumerate}\\item ñ\\end{itemize}")]
#[case("% solo comentario")]
fn test_malformed_input_never_panics(#[case] source: &str) {
    let markdown = preview(source);
    for directive in ["\\item", "\\begin{itemize}", "\\end{itemize}", "\\begin{enumerate}", "\\end{enumerate}"] {
        assert!(!markdown.contains(directive), "{directive} leaked from {source:?}: {markdown:?}");
    }
}
