//! Lexical primitives shared by the grammar rules
//!
//! Primitives consume their own trailing horizontal padding (spaces and
//! tabs); quoted strings leave padding to their callers. Newlines separate
//! diagram elements and are never folded inside a rule, which keeps each
//! transition line-scoped.

use chumsky::prelude::*;

use crate::ast::PSEUDOSTATE;

/// Optional spaces and tabs
pub fn inline_whitespace<'src>(
) -> impl Parser<'src, &'src str, (), extra::Err<Rich<'src, char>>> + Clone {
    just(' ').or(just('\t')).repeated().ignored()
}

/// Optional whitespace including newlines, for the gaps between elements
pub fn optional_whitespace<'src>(
) -> impl Parser<'src, &'src str, (), extra::Err<Rich<'src, char>>> + Clone {
    one_of(" \t\n\r").repeated().ignored()
}

/// A single punctuation character plus its trailing horizontal padding
pub fn symbol<'src>(
    c: char,
) -> impl Parser<'src, &'src str, char, extra::Err<Rich<'src, char>>> + Clone {
    just(c).then_ignore(inline_whitespace())
}

/// A letter followed by letters and digits
pub fn identifier<'src>(
) -> impl Parser<'src, &'src str, String, extra::Err<Rich<'src, char>>> + Clone {
    any()
        .filter(|c: &char| c.is_alphabetic())
        .then(
            any()
                .filter(|c: &char| c.is_alphanumeric())
                .repeated()
                .collect::<String>(),
        )
        .map(|(first, rest)| format!("{}{}", first, rest))
        .then_ignore(inline_whitespace())
        .labelled("identifier")
}

/// A double-quoted run of letters, digits, and spaces
pub fn quoted_string<'src>(
) -> impl Parser<'src, &'src str, String, extra::Err<Rich<'src, char>>> + Clone {
    just('"')
        .ignore_then(
            any()
                .filter(|c: &char| c.is_alphanumeric() || *c == ' ')
                .repeated()
                .collect::<String>(),
        )
        .then_ignore(just('"'))
        .labelled("quoted string")
}

/// The `[*]` pseudostate marker
pub fn pseudostate<'src>(
) -> impl Parser<'src, &'src str, String, extra::Err<Rich<'src, char>>> + Clone {
    just(PSEUDOSTATE)
        .to(PSEUDOSTATE.to_string())
        .then_ignore(inline_whitespace())
}

/// A transition arrow, normalized to `->`
///
/// Accepts the plain `-`/`--` shafts and every direction qualifier in both
/// long and short spelling. Qualifiers are ordered longest first so a short
/// form never claims the prefix of a longer one.
pub fn arrow<'src>(
) -> impl Parser<'src, &'src str, &'static str, extra::Err<Rich<'src, char>>> + Clone {
    let qualifier = just("-up-")
        .or(just("-down-"))
        .or(just("-left-"))
        .or(just("-right-"))
        .or(just("-u-"))
        .or(just("-d-"))
        .or(just("-l-"))
        .or(just("-r-"))
        .or(just("--"))
        .or(just("-"));

    qualifier
        .then(just('>'))
        .to("->")
        .then_ignore(inline_whitespace())
        .labelled("arrow")
}

/// Collapse a spaced sentence into PascalCase
///
/// The first letter of every word is upcased; the rest of each word keeps
/// its casing.
pub fn dehumanize(sentence: &str) -> String {
    sentence
        .split(' ')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect()
}

/// A run of letters, digits, and spaces, dehumanized to PascalCase
pub fn dehumanized_sentence<'src>(
) -> impl Parser<'src, &'src str, String, extra::Err<Rich<'src, char>>> + Clone {
    inline_whitespace()
        .ignore_then(
            any()
                .filter(|c: &char| c.is_alphanumeric() || *c == ' ')
                .repeated()
                .collect::<String>(),
        )
        .then_ignore(inline_whitespace())
        .map(|sentence| dehumanize(&sentence))
}

/// An identifier with an optional `()` suffix, which is discarded
pub fn method_reference<'src>(
) -> impl Parser<'src, &'src str, String, extra::Err<Rich<'src, char>>> + Clone {
    identifier()
        .then_ignore(just("()").or_not())
        .then_ignore(inline_whitespace())
}

/// A method name in either spelling: `MethodName()` or `Method Name`
///
/// A dehumanized sentence also matches a bare identifier, so one rule with
/// an optional discarded `()` covers every spelling the grammar accepts.
pub fn friendly_method_reference<'src>(
) -> impl Parser<'src, &'src str, String, extra::Err<Rich<'src, char>>> + Clone {
    dehumanized_sentence()
        .then_ignore(just("()").or_not())
        .then_ignore(inline_whitespace())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_all<'src, T>(
        parser: impl Parser<'src, &'src str, T, extra::Err<Rich<'src, char>>>,
        input: &'src str,
    ) -> Result<T, Vec<Rich<'src, char>>> {
        parser.then_ignore(end()).parse(input).into_result()
    }

    #[test]
    fn test_identifier_simple() {
        assert_eq!(parse_all(identifier(), "Alpha").unwrap(), "Alpha");
    }

    #[test]
    fn test_identifier_with_digits() {
        assert_eq!(parse_all(identifier(), "Alpha2Beta").unwrap(), "Alpha2Beta");
    }

    #[test]
    fn test_identifier_consumes_trailing_padding() {
        assert_eq!(parse_all(identifier(), "Alpha  \t").unwrap(), "Alpha");
    }

    #[test]
    fn test_identifier_rejects_leading_digit() {
        assert!(parse_all(identifier(), "2Alpha").is_err());
    }

    #[test]
    fn test_identifier_does_not_consume_newline() {
        assert!(parse_all(identifier(), "Alpha\n").is_err());
    }

    #[test]
    fn test_quoted_string() {
        assert_eq!(
            parse_all(quoted_string(), "\"Longer Name\"").unwrap(),
            "Longer Name"
        );
    }

    #[test]
    fn test_quoted_string_rejects_punctuation() {
        assert!(parse_all(quoted_string(), "\"no-dashes\"").is_err());
    }

    #[test]
    fn test_pseudostate() {
        assert_eq!(parse_all(pseudostate(), "[*] ").unwrap(), "[*]");
    }

    #[test]
    fn test_all_arrow_forms_normalize() {
        let arrows = [
            "->", "-->", "-u->", "-d->", "-l->", "-r->", "-up->", "-down->", "-left->", "-right->",
        ];
        for input in arrows {
            let result = parse_all(arrow(), input).unwrap();
            assert_eq!(result, "->", "failed on {}", input);
        }
    }

    #[test]
    fn test_arrow_rejects_missing_head() {
        assert!(parse_all(arrow(), "--").is_err());
        assert!(parse_all(arrow(), "-up-").is_err());
    }

    #[test]
    fn test_dehumanize_sentence() {
        assert_eq!(
            dehumanize("A really long method name"),
            "AReallyLongMethodName"
        );
        assert_eq!(dehumanize("Method Name"), "MethodName");
        assert_eq!(dehumanize("already"), "Already");
    }

    #[test]
    fn test_dehumanize_keeps_inner_casing() {
        assert_eq!(dehumanize("enable LED driver"), "EnableLEDDriver");
    }

    #[test]
    fn test_dehumanize_collapses_repeated_spaces() {
        assert_eq!(dehumanize("  spaced   out  "), "SpacedOut");
    }

    #[test]
    fn test_dehumanized_sentence_parser() {
        assert_eq!(
            parse_all(dehumanized_sentence(), "A really long method name").unwrap(),
            "AReallyLongMethodName"
        );
    }

    #[test]
    fn test_method_reference_with_parens() {
        assert_eq!(
            parse_all(method_reference(), "MethodName()").unwrap(),
            "MethodName"
        );
    }

    #[test]
    fn test_method_reference_without_parens() {
        assert_eq!(
            parse_all(method_reference(), "MethodName").unwrap(),
            "MethodName"
        );
    }

    #[test]
    fn test_friendly_method_reference_forms() {
        let friendly = |input| parse_all(friendly_method_reference(), input).unwrap();
        assert_eq!(friendly("MethodName()"), "MethodName");
        assert_eq!(friendly("MethodName"), "MethodName");
        assert_eq!(friendly("Method Name"), "MethodName");
        assert_eq!(
            friendly("A really long method name"),
            "AReallyLongMethodName"
        );
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn identifier_roundtrips(name in "[a-zA-Z][a-zA-Z0-9]{0,12}") {
                let parsed = parse_all(identifier(), name.as_str()).unwrap();
                prop_assert_eq!(parsed, name);
            }

            #[test]
            fn dehumanized_output_has_no_spaces(sentence in "[a-zA-Z0-9 ]{0,24}") {
                prop_assert!(!dehumanize(&sentence).contains(' '));
            }

            #[test]
            fn dehumanize_is_stable(sentence in "[a-zA-Z0-9 ]{0,24}") {
                let once = dehumanize(&sentence);
                prop_assert_eq!(dehumanize(&once), once.clone());
            }

            #[test]
            fn arrow_padding_is_ignored(padding in "[ \t]{0,4}") {
                let input = format!("-->{}", padding);
                let parsed = parse_all(arrow(), input.as_str()).unwrap();
                prop_assert_eq!(parsed, "->");
            }
        }
    }
}
