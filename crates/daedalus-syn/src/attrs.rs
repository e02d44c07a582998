//! Parameter-attribute parsing.
//!
//! Maps the attributes a handler author writes on a parameter
//! (`#[query("limit")]`, `#[body(decoder = MyDecoder)]`, `#[safe]`, ...)
//! into normalized [`MetadataEntry`] values. Attributes whose name is not
//! recognized are skipped: other macros' attributes are not this crate's
//! concern.

use daedalus_core::{well_known, MetadataEntry, TypeRef};
use syn::{punctuated::Punctuated, Attribute, Expr, ExprLit, Lit, Meta, Token};

use crate::convert::path_type_ref;
use crate::error::FrontendError;

/// Parsed attribute arguments: an optional wire name and decoder.
#[derive(Default)]
struct Payload {
    name: Option<String>,
    decoder: Option<TypeRef>,
}

/// Converts one attribute into a metadata entry.
///
/// Returns `Ok(None)` for unrecognized attributes, `Err` when a recognized
/// attribute is malformed (the declaration cannot be built at all, which
/// is a frontend failure rather than a resolver diagnostic).
pub(crate) fn metadata_entry(
    attr: &Attribute,
    parameter: &str,
) -> Result<Option<MetadataEntry>, FrontendError> {
    let Some(ident) = attr.path().get_ident() else {
        return Ok(None);
    };
    let attribute = ident.to_string();

    let entry = match attribute.as_str() {
        "safe" => {
            require_bare(attr, &attribute, parameter)?;
            MetadataEntry::Safe
        }
        "unsafe_log" => {
            require_bare(attr, &attribute, parameter)?;
            MetadataEntry::Unsafe
        }
        "body" => {
            let payload = parse_payload(attr, &attribute, parameter)?;
            reject_name(&payload, &attribute, parameter)?;
            MetadataEntry::Body {
                decoder: payload.decoder.unwrap_or_else(well_known::json_body_decoder),
            }
        }
        "path_param" => {
            let payload = parse_payload(attr, &attribute, parameter)?;
            reject_name(&payload, &attribute, parameter)?;
            MetadataEntry::PathParam {
                decoder: payload.decoder.unwrap_or_else(well_known::default_decoder),
            }
        }
        "path_multi" => {
            let payload = parse_payload(attr, &attribute, parameter)?;
            reject_name(&payload, &attribute, parameter)?;
            MetadataEntry::PathMultiParam {
                decoder: payload.decoder.unwrap_or_else(well_known::default_decoder),
            }
        }
        "query" => {
            let (name, decoder) = named_payload(attr, &attribute, parameter)?;
            MetadataEntry::QueryParam { name, decoder }
        }
        "header" => {
            let (name, decoder) = named_payload(attr, &attribute, parameter)?;
            MetadataEntry::Header { name, decoder }
        }
        "cookie" => {
            let (name, decoder) = named_payload(attr, &attribute, parameter)?;
            MetadataEntry::Cookie { name, decoder }
        }
        _ => return Ok(None),
    };
    Ok(Some(entry))
}

/// Parses a source attribute that requires a wire name.
fn named_payload(
    attr: &Attribute,
    attribute: &str,
    parameter: &str,
) -> Result<(String, TypeRef), FrontendError> {
    let payload = parse_payload(attr, attribute, parameter)?;
    let name = payload.name.ok_or_else(|| FrontendError::MalformedAttribute {
        attribute: attribute.to_string(),
        parameter: parameter.to_string(),
        message: "a wire name is required".to_string(),
    })?;
    Ok((
        name,
        payload.decoder.unwrap_or_else(well_known::default_decoder),
    ))
}

fn require_bare(attr: &Attribute, attribute: &str, parameter: &str) -> Result<(), FrontendError> {
    match &attr.meta {
        Meta::Path(_) => Ok(()),
        _ => Err(FrontendError::MalformedAttribute {
            attribute: attribute.to_string(),
            parameter: parameter.to_string(),
            message: "this attribute takes no arguments".to_string(),
        }),
    }
}

fn reject_name(payload: &Payload, attribute: &str, parameter: &str) -> Result<(), FrontendError> {
    if payload.name.is_some() {
        return Err(FrontendError::MalformedAttribute {
            attribute: attribute.to_string(),
            parameter: parameter.to_string(),
            message: "this attribute does not take a wire name".to_string(),
        });
    }
    Ok(())
}

fn parse_payload(
    attr: &Attribute,
    attribute: &str,
    parameter: &str,
) -> Result<Payload, FrontendError> {
    let malformed = |message: String| FrontendError::MalformedAttribute {
        attribute: attribute.to_string(),
        parameter: parameter.to_string(),
        message,
    };

    let list = match &attr.meta {
        Meta::Path(_) => return Ok(Payload::default()),
        Meta::List(list) => list,
        Meta::NameValue(_) => {
            return Err(malformed("expected parenthesized arguments".to_string()))
        }
    };

    // Shorthand: #[query("limit")] names the wire key directly.
    if let Ok(lit) = list.parse_args::<syn::LitStr>() {
        return Ok(Payload {
            name: Some(lit.value()),
            decoder: None,
        });
    }

    let metas = list
        .parse_args_with(Punctuated::<Meta, Token![,]>::parse_terminated)
        .map_err(|e| malformed(e.to_string()))?;

    let mut payload = Payload::default();
    for meta in metas {
        let Meta::NameValue(nv) = meta else {
            return Err(malformed("expected `key = value` arguments".to_string()));
        };
        let key = nv
            .path
            .get_ident()
            .ok_or_else(|| malformed("expected identifier key".to_string()))?
            .to_string();
        match key.as_str() {
            "name" => match &nv.value {
                Expr::Lit(ExprLit {
                    lit: Lit::Str(s), ..
                }) => payload.name = Some(s.value()),
                _ => return Err(malformed("`name` expects a string literal".to_string())),
            },
            "decoder" => match &nv.value {
                Expr::Path(expr_path) => {
                    payload.decoder = Some(path_type_ref(&expr_path.path).ok_or_else(|| {
                        malformed("`decoder` expects a plain type path".to_string())
                    })?);
                }
                _ => return Err(malformed("`decoder` expects a type path".to_string())),
            },
            other => return Err(malformed(format!("unknown argument `{other}`"))),
        }
    }
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    fn entry(attr: Attribute) -> Result<Option<MetadataEntry>, FrontendError> {
        metadata_entry(&attr, "param")
    }

    #[test]
    fn bare_markers() {
        assert_eq!(
            entry(parse_quote!(#[safe])).unwrap(),
            Some(MetadataEntry::Safe)
        );
        assert_eq!(
            entry(parse_quote!(#[unsafe_log])).unwrap(),
            Some(MetadataEntry::Unsafe)
        );
    }

    #[test]
    fn query_shorthand_and_longhand_agree() {
        let short = entry(parse_quote!(#[query("limit")])).unwrap();
        let long = entry(parse_quote!(#[query(name = "limit")])).unwrap();
        assert_eq!(short, long);
        assert_eq!(
            short,
            Some(MetadataEntry::QueryParam {
                name: "limit".to_string(),
                decoder: well_known::default_decoder(),
            })
        );
    }

    #[test]
    fn decoder_override() {
        let parsed = entry(parse_quote!(#[header(name = "X-Id", decoder = MyDecoder)])).unwrap();
        assert_eq!(
            parsed,
            Some(MetadataEntry::Header {
                name: "X-Id".to_string(),
                decoder: TypeRef::named("MyDecoder"),
            })
        );
    }

    #[test]
    fn body_defaults_to_json_decoder() {
        assert_eq!(
            entry(parse_quote!(#[body])).unwrap(),
            Some(MetadataEntry::Body {
                decoder: well_known::json_body_decoder(),
            })
        );
    }

    #[test]
    fn unrecognized_attributes_are_skipped() {
        assert_eq!(entry(parse_quote!(#[allow(dead_code)])).unwrap(), None);
        assert_eq!(entry(parse_quote!(#[serde(rename = "x")])).unwrap(), None);
    }

    #[test]
    fn wire_name_is_required_for_keyed_sources() {
        let err = entry(parse_quote!(#[cookie])).unwrap_err();
        assert!(err.to_string().contains("wire name is required"));
    }

    #[test]
    fn safe_rejects_arguments() {
        let err = entry(parse_quote!(#[safe(true)])).unwrap_err();
        assert!(err.to_string().contains("takes no arguments"));
    }

    #[test]
    fn path_param_rejects_wire_name() {
        let err = entry(parse_quote!(#[path_param(name = "id")])).unwrap_err();
        assert!(err.to_string().contains("does not take a wire name"));
    }
}
