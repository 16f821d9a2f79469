//! The subset of CSS selectors the page script uses: type, `#id`, `.class`,
//! `[attr]`, `[attr="value"]`, descendant combinators and selector lists.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,
    #[error("unexpected character '{found}' in selector '{selector}'")]
    Unexpected { selector: String, found: char },
    #[error("unterminated attribute selector in '{0}'")]
    UnterminatedAttribute(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttrMatch {
    pub name: String,
    pub value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Compound {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
    pub attrs: Vec<AttrMatch>,
}

/// Compounds joined by descendant combinators, outermost first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Complex(pub Vec<Compound>);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList(pub Vec<Complex>);

impl SelectorList {
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let mut list = Vec::new();
        for part in split_outside_brackets(input, |c| c == ',') {
            let compounds = split_outside_brackets(part, char::is_whitespace)
                .into_iter()
                .filter(|chunk| !chunk.is_empty())
                .map(|chunk| parse_compound(chunk, input))
                .collect::<Result<Vec<_>, _>>()?;
            if compounds.is_empty() {
                return Err(SelectorError::Empty);
            }
            list.push(Complex(compounds));
        }
        Ok(Self(list))
    }
}

fn split_outside_brackets(input: &str, is_separator: impl Fn(char) -> bool) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut start = 0;

    for (idx, c) in input.char_indices() {
        match (quote, c) {
            (Some(q), _) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(c),
            (None, '[') => depth += 1,
            (None, ']') => depth = depth.saturating_sub(1),
            (None, _) if depth == 0 && is_separator(c) => {
                parts.push(input[start..idx].trim());
                start = idx + c.len_utf8();
            }
            _ => {}
        }
    }
    parts.push(input[start..].trim());
    parts
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn take_ident(chars: &[char], pos: &mut usize) -> String {
    let start = *pos;
    while *pos < chars.len() && is_ident_char(chars[*pos]) {
        *pos += 1;
    }
    chars[start..*pos].iter().collect()
}

fn parse_compound(chunk: &str, selector: &str) -> Result<Compound, SelectorError> {
    let chars: Vec<char> = chunk.chars().collect();
    let mut compound = Compound::default();
    let mut pos = 0;

    if chars.first() == Some(&'*') {
        pos = 1;
    } else {
        let tag = take_ident(&chars, &mut pos);
        if !tag.is_empty() {
            compound.tag = Some(tag.to_ascii_lowercase());
        }
    }

    while pos < chars.len() {
        let marker = chars[pos];
        pos += 1;
        match marker {
            '#' => compound.id = Some(take_ident(&chars, &mut pos)),
            '.' => compound.classes.push(take_ident(&chars, &mut pos)),
            '[' => {
                let close = chars[pos..]
                    .iter()
                    .position(|c| *c == ']')
                    .ok_or_else(|| SelectorError::UnterminatedAttribute(selector.to_string()))?;
                let body: String = chars[pos..pos + close].iter().collect();
                pos += close + 1;
                compound.attrs.push(parse_attr(&body));
            }
            found => {
                return Err(SelectorError::Unexpected {
                    selector: selector.to_string(),
                    found,
                })
            }
        }
    }

    Ok(compound)
}

fn parse_attr(body: &str) -> AttrMatch {
    match body.split_once('=') {
        Some((name, value)) => AttrMatch {
            name: name.trim().to_string(),
            value: Some(value.trim().trim_matches(|c| c == '"' || c == '\'').to_string()),
        },
        None => AttrMatch {
            name: body.trim().to_string(),
            value: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_lists_descendants_and_attributes() {
        let list = SelectorList::parse(r#".nav-link, #contact-form button[type="submit"]"#)
            .expect("parse");
        assert_eq!(list.0.len(), 2);

        let Complex(first) = &list.0[0];
        assert_eq!(first[0].classes, vec!["nav-link".to_string()]);

        let Complex(second) = &list.0[1];
        assert_eq!(second.len(), 2);
        assert_eq!(second[0].id.as_deref(), Some("contact-form"));
        assert_eq!(second[1].tag.as_deref(), Some("button"));
        assert_eq!(
            second[1].attrs,
            vec![AttrMatch {
                name: "type".into(),
                value: Some("submit".into()),
            }]
        );
    }

    #[test]
    fn rejects_unsupported_syntax() {
        assert!(matches!(
            SelectorList::parse("div > p"),
            Err(SelectorError::Unexpected { found: '>', .. })
        ));
        assert_eq!(
            SelectorList::parse("img[data-src"),
            Err(SelectorError::UnterminatedAttribute("img[data-src".into()))
        );
        assert_eq!(SelectorList::parse(" , "), Err(SelectorError::Empty));
    }
}
