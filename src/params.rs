//! Parameter Decoder: turns the flat, index-keyed DataTables parameter
//! encoding into the structured [`GridRequest`] model.
//!
//! Only names whose bracket-tokenized head is `column`/`columns` or
//! `order` are consumed here; every other parameter (`sql`, `draw`,
//! `start`, `length`, `search[value]`, ...) passes through for the
//! reserved-scalar extraction below. Decoding is a pure function of the
//! input map: iteration order never affects the result because everything
//! collects into per-index `BTreeMap`s.

use crate::errors::GridError;
use crate::models::{GridRequest, SortDirection};
use std::collections::HashMap;

/// Reserved name carrying the global search term.
pub const GLOBAL_SEARCH_PARAM: &str = "search[value]";

/// Lenient `draw` parse, defaulting to 0. Kept separate from [`decode`]
/// so failure paths can still echo the client's draw counter.
#[must_use]
pub fn draw_param(params: &HashMap<String, String>) -> i64 {
    params
        .get("draw")
        .and_then(|value| value.parse().ok())
        .unwrap_or(0)
}

/// Decode the full parameter mapping into a [`GridRequest`].
///
/// # Errors
///
/// Returns [`GridError::MalformedParameter`] for a `column`/`order` name
/// that does not tokenize to an index plus one or two segments, a
/// two-segment column parameter whose first segment is not `search`, or a
/// non-numeric `start`, `length` or `order[<i>][column]` value.
pub fn decode(params: &HashMap<String, String>) -> Result<GridRequest, GridError> {
    let mut request = GridRequest {
        draw: draw_param(params),
        ..GridRequest::default()
    };

    for (name, value) in params {
        let mut tokens = name.split(['[', ']']).filter(|token| !token.is_empty());
        match tokens.next() {
            Some("column" | "columns") => decode_column(&mut request, name, tokens, value)?,
            Some("order") => decode_order(&mut request, name, tokens, value)?,
            _ => {}
        }
    }

    request.start = match present(params, "start") {
        Some(value) => Some(digits("start", value)?),
        None => None,
    };
    request.length = match present(params, "length") {
        Some(value) => Some(digits("length", value)?),
        None => None,
    };
    request.global_search = present(params, GLOBAL_SEARCH_PARAM).map(str::to_owned);

    Ok(request)
}

/// Empty string values count as absent, as they do in the wire protocol.
fn present<'a>(params: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    params
        .get(name)
        .map(String::as_str)
        .filter(|value| !value.is_empty())
}

fn digits(name: &str, value: &str) -> Result<u64, GridError> {
    if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
        return Err(GridError::malformed(name));
    }
    value.parse().map_err(|_| GridError::malformed(name))
}

fn index_token(name: &str, token: Option<&str>) -> Result<usize, GridError> {
    token
        .filter(|t| !t.is_empty() && t.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|t| t.parse().ok())
        .ok_or_else(|| GridError::malformed(name))
}

fn decode_column<'a>(
    request: &mut GridRequest,
    name: &str,
    mut tokens: impl Iterator<Item = &'a str>,
    value: &str,
) -> Result<(), GridError> {
    let index = index_token(name, tokens.next())?;
    let flag = tokens.next().ok_or_else(|| GridError::malformed(name))?;
    let option = tokens.next();
    if tokens.next().is_some() {
        return Err(GridError::malformed(name));
    }

    let column = request.columns.entry(index).or_default();
    match (flag, option) {
        ("data", None) => column.data = Some(value.to_owned()),
        // Boolean flags fail closed: anything but the literal "true"
        // leaves the permission off.
        ("orderable", None) => column.orderable = value == "true",
        ("searchable", None) => column.searchable = value == "true",
        ("search", Some("value")) => column.search = Some(value.to_owned()),
        // search[regex] and friends are not supported
        ("search", Some(_)) => {}
        // name and other client-side hints
        (_, None) => {}
        (_, Some(_)) => return Err(GridError::malformed(name)),
    }
    Ok(())
}

fn decode_order<'a>(
    request: &mut GridRequest,
    name: &str,
    mut tokens: impl Iterator<Item = &'a str>,
    value: &str,
) -> Result<(), GridError> {
    let index = index_token(name, tokens.next())?;
    let flag = tokens.next().ok_or_else(|| GridError::malformed(name))?;
    if tokens.next().is_some() {
        return Err(GridError::malformed(name));
    }

    let rule = request.orderings.entry(index).or_default();
    match flag {
        "column" => {
            let target = digits(name, value)?;
            rule.column =
                Some(usize::try_from(target).map_err(|_| GridError::malformed(name))?);
        }
        "dir" => rule.dir = SortDirection::parse(value),
        // DataTables 2 also sends order[<i>][name]
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SortDirection;

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect()
    }

    #[test]
    fn test_decode_columns_and_orderings() {
        let request = decode(&params(&[
            ("columns[0][data]", "name"),
            ("columns[0][orderable]", "true"),
            ("columns[0][searchable]", "true"),
            ("columns[0][search][value]", "Cleo"),
            ("columns[2][orderable]", "true"),
            ("order[0][column]", "2"),
            ("order[0][dir]", "desc"),
            ("order[1][column]", "0"),
            ("draw", "5"),
        ]))
        .unwrap();

        assert_eq!(request.draw, 5);
        let first = &request.columns[&0];
        assert_eq!(first.data.as_deref(), Some("name"));
        assert!(first.orderable && first.searchable);
        assert_eq!(first.search.as_deref(), Some("Cleo"));
        assert!(request.columns[&2].orderable);
        assert_eq!(request.columns[&2].data, None);

        assert_eq!(request.orderings[&0].column, Some(2));
        assert_eq!(request.orderings[&0].dir, SortDirection::Desc);
        assert_eq!(request.orderings[&1].column, Some(0));
        assert_eq!(request.orderings[&1].dir, SortDirection::Asc);
    }

    #[test]
    fn test_singular_column_prefix_accepted() {
        let request = decode(&params(&[("column[1][data]", "age")])).unwrap();
        assert_eq!(request.columns[&1].data.as_deref(), Some("age"));
    }

    #[test]
    fn test_boolean_flags_fail_closed() {
        let request = decode(&params(&[
            ("columns[0][orderable]", "yes"),
            ("columns[0][searchable]", "TRUE"),
        ]))
        .unwrap();
        assert!(!request.columns[&0].orderable);
        assert!(!request.columns[&0].searchable);
    }

    #[test]
    fn test_unrelated_parameters_pass_through() {
        let request = decode(&params(&[
            ("sql", "select * from dogs"),
            ("search[value]", "Pan"),
            ("search[regex]", "false"),
            ("start", "4"),
            ("length", "10"),
        ]))
        .unwrap();
        assert!(request.columns.is_empty());
        assert!(request.orderings.is_empty());
        assert_eq!(request.global_search.as_deref(), Some("Pan"));
        assert_eq!(request.start, Some(4));
        assert_eq!(request.length, Some(10));
    }

    #[test]
    fn test_empty_scalars_count_as_absent() {
        let request = decode(&params(&[
            ("start", ""),
            ("length", ""),
            ("search[value]", ""),
        ]))
        .unwrap();
        assert_eq!(request.start, None);
        assert_eq!(request.length, None);
        assert_eq!(request.global_search, None);
    }

    #[test]
    fn test_malformed_names_rejected() {
        for name in [
            "columns[x][data]",
            "columns[0]",
            "columns[0][search][value][extra]",
            "columns[0][data][oops]",
            "order[][column]",
        ] {
            let err = decode(&params(&[(name, "v")])).unwrap_err();
            assert_eq!(err, GridError::malformed(name), "{name}");
        }
    }

    #[test]
    fn test_non_numeric_integers_rejected() {
        assert_eq!(
            decode(&params(&[("start", "abc")])).unwrap_err(),
            GridError::malformed("start")
        );
        assert_eq!(
            decode(&params(&[("length", "-1")])).unwrap_err(),
            GridError::malformed("length")
        );
        assert_eq!(
            decode(&params(&[("order[0][column]", "1; drop table dogs")])).unwrap_err(),
            GridError::malformed("order[0][column]")
        );
    }

    #[test]
    fn test_unknown_flags_ignored() {
        let request = decode(&params(&[
            ("columns[0][name]", "display"),
            ("columns[0][search][regex]", "true"),
            ("order[0][name]", "whatever"),
        ]))
        .unwrap();
        assert_eq!(request.columns[&0], crate::models::ColumnSpec::default());
        assert_eq!(request.orderings[&0].column, None);
    }

    #[test]
    fn test_draw_defaults_to_zero() {
        assert_eq!(draw_param(&params(&[])), 0);
        assert_eq!(draw_param(&params(&[("draw", "not a number")])), 0);
        assert_eq!(draw_param(&params(&[("draw", "12")])), 12);
    }
}
