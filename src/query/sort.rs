//! ORDER BY builder with orderability validation.

use crate::errors::GridError;
use crate::models::{ColumnSpec, OrderingRule};
use std::collections::BTreeMap;

/// Build the ORDER BY term list, rules in ascending sequence-index order
/// (lower index = higher precedence). Every rule must resolve to a column
/// declared orderable; a rule targeting an unknown column sees the
/// defaulted attributes and fails the same check.
///
/// A column without a `data` expression orders by its 1-based position in
/// the projection, which is how ordering-by-index requests resolve.
pub(crate) fn order_clause(
    columns: &BTreeMap<usize, ColumnSpec>,
    orderings: &BTreeMap<usize, OrderingRule>,
) -> Result<Option<String>, GridError> {
    let mut terms = Vec::with_capacity(orderings.len());

    for (index, rule) in orderings {
        let target = rule
            .column
            .ok_or_else(|| GridError::malformed(format!("order[{index}][column]")))?;
        match columns.get(&target) {
            Some(column) if column.orderable => {
                let expression = column
                    .data
                    .as_deref()
                    .filter(|data| !data.is_empty())
                    .map_or_else(|| (target + 1).to_string(), str::to_owned);
                terms.push(format!("{expression} {}", rule.dir.as_sql()));
            }
            _ => return Err(GridError::InvalidOrderColumn { column: target }),
        }
    }

    Ok(if terms.is_empty() {
        None
    } else {
        Some(terms.join(", "))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SortDirection;

    fn orderable(data: Option<&str>) -> ColumnSpec {
        ColumnSpec {
            data: data.map(str::to_owned),
            orderable: true,
            ..ColumnSpec::default()
        }
    }

    fn rule(column: usize, dir: SortDirection) -> OrderingRule {
        OrderingRule {
            column: Some(column),
            dir,
        }
    }

    #[test]
    fn test_precedence_follows_sequence_index() {
        let columns = BTreeMap::from([
            (0, orderable(Some("id"))),
            (2, orderable(Some("age"))),
        ]);
        let orderings = BTreeMap::from([
            (1, rule(0, SortDirection::Asc)),
            (0, rule(2, SortDirection::Desc)),
        ]);
        assert_eq!(
            order_clause(&columns, &orderings).unwrap().as_deref(),
            Some("age desc, id asc")
        );
    }

    #[test]
    fn test_column_without_data_orders_by_position() {
        let columns = BTreeMap::from([(2, orderable(None))]);
        let orderings = BTreeMap::from([(0, rule(2, SortDirection::Asc))]);
        assert_eq!(
            order_clause(&columns, &orderings).unwrap().as_deref(),
            Some("3 asc")
        );
    }

    #[test]
    fn test_non_orderable_column_is_rejected() {
        let columns = BTreeMap::from([(0, ColumnSpec::default())]);
        let orderings = BTreeMap::from([(0, rule(0, SortDirection::Asc))]);
        assert_eq!(
            order_clause(&columns, &orderings).unwrap_err(),
            GridError::InvalidOrderColumn { column: 0 }
        );
    }

    #[test]
    fn test_unknown_column_is_rejected() {
        let orderings = BTreeMap::from([(0, rule(9, SortDirection::Asc))]);
        assert_eq!(
            order_clause(&BTreeMap::new(), &orderings).unwrap_err(),
            GridError::InvalidOrderColumn { column: 9 }
        );
    }

    #[test]
    fn test_rule_without_column_is_malformed() {
        let orderings = BTreeMap::from([(3, OrderingRule::default())]);
        assert_eq!(
            order_clause(&BTreeMap::new(), &orderings).unwrap_err(),
            GridError::malformed("order[3][column]")
        );
    }

    #[test]
    fn test_no_rules_no_clause() {
        assert_eq!(order_clause(&BTreeMap::new(), &BTreeMap::new()).unwrap(), None);
    }
}
