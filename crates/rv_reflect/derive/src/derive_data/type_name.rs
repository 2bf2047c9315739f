//! Normalization of parsed types into registry type-name strings.
//!
//! Path qualifiers are stripped to the last segment and whitespace is
//! removed, so `std::vec::Vec< f32 >` and `Vec<f32>` name the same entry.

use proc_macro2::TokenStream;
use quote::ToTokens;

/// The known ordered-collection type.
const SEQUENCE_IDENT: &str = "Vec";

/// Renders a type as its normalized registry name.
pub(crate) fn normalized_type_name(ty: &syn::Type) -> String {
    match ty {
        syn::Type::Path(type_path) => path_name(type_path),
        syn::Type::Reference(reference) => normalized_type_name(&reference.elem),
        other => compact(other.to_token_stream()),
    }
}

fn path_name(type_path: &syn::TypePath) -> String {
    let Some(segment) = type_path.path.segments.last() else {
        return compact(type_path.to_token_stream());
    };

    let mut name = segment.ident.to_string();
    if let syn::PathArguments::AngleBracketed(arguments) = &segment.arguments {
        name.push('<');
        let mut first = true;
        for argument in &arguments.args {
            if !first {
                name.push(',');
            }
            first = false;
            match argument {
                syn::GenericArgument::Type(inner) => name.push_str(&normalized_type_name(inner)),
                other => name.push_str(&compact(other.to_token_stream())),
            }
        }
        name.push('>');
    }
    name
}

fn compact(tokens: TokenStream) -> String {
    tokens
        .to_string()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// Whether the type is the known ordered collection.
pub(crate) fn is_sequence(ty: &syn::Type) -> bool {
    sequence_element(ty).is_some()
}

/// Returns the element type of `Vec<T>`, or `None` for anything else.
pub(crate) fn sequence_element(ty: &syn::Type) -> Option<&syn::Type> {
    let syn::Type::Path(type_path) = ty else {
        return None;
    };
    let segment = type_path.path.segments.last()?;
    if segment.ident != SEQUENCE_IDENT {
        return None;
    }
    let syn::PathArguments::AngleBracketed(arguments) = &segment.arguments else {
        return None;
    };
    arguments.args.iter().find_map(|argument| match argument {
        syn::GenericArgument::Type(inner) => Some(inner),
        _ => None,
    })
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use super::{is_sequence, normalized_type_name, sequence_element};

    fn parse(source: &str) -> syn::Type {
        syn::parse_str(source).unwrap()
    }

    #[test]
    fn qualifiers_and_whitespace_are_stripped() {
        assert_eq!(normalized_type_name(&parse("std::string::String")), "String");
        assert_eq!(normalized_type_name(&parse("Vec< f32 >")), "Vec<f32>");
        assert_eq!(
            normalized_type_name(&parse("std::vec::Vec<crate::Point>")),
            "Vec<Point>"
        );
    }

    #[test]
    fn sequences_are_detected() {
        assert!(is_sequence(&parse("Vec<u8>")));
        assert!(!is_sequence(&parse("String")));

        let binding = parse("Vec<Point>");
        let element = sequence_element(&binding).unwrap();
        assert_eq!(normalized_type_name(element), "Point");
    }
}
