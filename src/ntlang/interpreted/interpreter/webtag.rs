use std::collections::HashMap;

use either::Either;
use lazy_static::lazy_static;

use crate::ntlang::interpreted::interpreter::value::Value;

lazy_static! {
    // NT tag names to their output tag names. Unknown tags pass through.
    static ref TAG_NAMES: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("bloco", "div");
        m.insert("texto", "p");
        m.insert("titulo", "h1");
        m.insert("legenda", "span");
        m.insert("botao", "button");
        m.insert("lista", "ul");
        m.insert("item", "li");
        m
    };

    // NT color names to concrete CSS colors. Unknown names pass through.
    static ref COLOR_NAMES: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("azul", "#2196F3");
        m.insert("vermelho", "#F44336");
        m.insert("verde", "#4CAF50");
        m.insert("amarelo", "#FFEB3B");
        m.insert("laranja", "#FF9800");
        m.insert("roxo", "#9C27B0");
        m.insert("rosa", "#E91E63");
        m.insert("preto", "#000000");
        m.insert("branco", "#FFFFFF");
        m.insert("cinza", "#9E9E9E");
        m
    };

    // Recognized style properties, in the fixed order they are emitted in.
    static ref STYLE_PROPS: Vec<(&'static str, &'static str)> = vec![
        ("fundo", "background-color"),
        ("cor", "color"),
        ("tamanho", "font-size"),
        ("largura", "width"),
        ("altura", "height"),
    ];
}

const SIZE_KEYS: [&str; 3] = ["tamanho", "largura", "altura"];

pub fn translate_tag(name: &str) -> &str {
    TAG_NAMES.get(name).copied().unwrap_or(name)
}

pub fn translate_color(name: &str) -> &str {
    COLOR_NAMES.get(name).copied().unwrap_or(name)
}

/// An evaluated property value: either a bare word (an identifier that named
/// no live variable, e.g. a color name) or an ordinary runtime value.
pub type PropValue = Either<String, Value>;

/// Composes the rendered markup of one tag from its already-evaluated
/// pieces. Children arrive already rendered, in source order.
pub fn compose(tag: &str, props: &[(String, PropValue)], children: &[String]) -> String {
    let output_tag = translate_tag(tag);
    let style = compose_style(props);
    if style.is_empty() {
        format!("<{}>{}</{}>", output_tag, children.concat(), output_tag)
    } else {
        format!("<{} style=\"{}\">{}</{}>", output_tag, style, children.concat(), output_tag)
    }
}

fn compose_style(props: &[(String, PropValue)]) -> String {
    let mut style = String::new();
    for &(key, css_prop) in STYLE_PROPS.iter() {
        if let Some((_, value)) = props.iter().find(|(k, _)| k.as_str() == key) {
            style.push_str(format!("{}: {}; ", css_prop, css_value(key, value)).as_ref());
        }
    }
    style
}

fn css_value(key: &str, value: &PropValue) -> String {
    match value {
        Either::Left(word) => translate_color(word).to_owned(),
        Either::Right(v) =>
            if SIZE_KEYS.contains(&key) && v.is_numeric() {
                // CSS wants a dot separator, so stringify() does not apply.
                match v {
                    Value::Inteiro(n) => format!("{}px", n),
                    Value::Real(r) => format!("{}px", r),
                    _ => unreachable!("is_numeric covers exactly these variants"),
                }
            } else {
                v.stringify()
            },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tag_and_color_translate() {
        let props = vec![("fundo".to_owned(), Either::Left("azul".to_owned()))];
        assert_eq!(
            compose("bloco", &props, &[]),
            "<div style=\"background-color: #2196F3; \"></div>",
        );
    }

    #[test]
    fn unknown_tag_and_color_pass_through() {
        let props = vec![("cor".to_owned(), Either::Left("magenta".to_owned()))];
        assert_eq!(
            compose("painel", &props, &[]),
            "<painel style=\"color: magenta; \"></painel>",
        );
    }

    #[test]
    fn style_keys_follow_table_order() {
        let props = vec![
            ("tamanho".to_owned(), Either::Right(Value::Inteiro(12))),
            ("fundo".to_owned(), Either::Left("preto".to_owned())),
        ];
        assert_eq!(
            compose("texto", &props, &[]),
            "<p style=\"background-color: #000000; font-size: 12px; \"></p>",
        );
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let props = vec![("brilho".to_owned(), Either::Right(Value::Inteiro(3)))];
        assert_eq!(compose("bloco", &props, &[]), "<div></div>");
    }

    #[test]
    fn children_concatenate_in_order() {
        assert_eq!(
            compose("lista", &[], &["<li>um</li>".to_owned(), "<li>dois</li>".to_owned()]),
            "<ul><li>um</li><li>dois</li></ul>",
        );
    }
}
