//! The keyed-lookup ("populate") path.
//!
//! Populate moves through four states: *unvalidated* → *querying* →
//! *empty-result* | *populated*. The transition out of *unvalidated* is
//! guarded twice: the record's populate key must name a declared column
//! holding a usable value, and every caller-supplied modifier must pass the
//! whitelist. Either guard failing is reported through the context's error
//! reporter as fatal and surfaced as a validation error before any statement
//! reaches the store.

use sea_query::{Expr, ExprTrait, Order, PostgresQueryBuilder, Query, Value, Values};

use crate::error::{ErrorReport, RecordError};
use crate::query::ident;
use crate::record::Record;
use crate::store::StoreContext;
use crate::value::{DateTimeField, FieldValue};

const OPERATION: &str = "populate";

/// A validated, typed select modifier.
///
/// Callers supply modifiers as string pairs (the whitelist protocol), but
/// values are parsed here rather than appended verbatim: `limit` must be an
/// unsigned integer, `order by` must name a declared column with an optional
/// `asc`/`desc` direction.
enum Modifier {
    Limit(u64),
    OrderBy(String, Order),
}

/// Report a fatal validation failure and produce the error to return.
#[track_caller]
fn fatal(record: &Record, ctx: &StoreContext<'_>, message: String) -> RecordError {
    let caller = std::panic::Location::caller();
    let location = format!("{}:{}", caller.file(), caller.line());
    ctx.reporter.report(ErrorReport {
        message: &message,
        type_name: record.descriptor().type_name,
        operation: OPERATION,
        location: &location,
        fatal: true,
    });
    RecordError::Validation {
        operation: OPERATION,
        message,
    }
}

/// Validate the populate key: it must be set on the instance, name a declared
/// column, and hold a non-empty, non-null, bindable value.
fn validate_key<'a>(
    record: &'a Record,
    ctx: &StoreContext<'_>,
) -> Result<(&'a str, &'a FieldValue), RecordError> {
    let key = match record.populate_key() {
        Some(key) if !key.is_empty() => key,
        _ => {
            return Err(fatal(
                record,
                ctx,
                "populate key is empty, null, or not set".to_string(),
            ))
        }
    };
    if !record.columns().contains(key) {
        return Err(fatal(
            record,
            ctx,
            format!("populate key {key} does not name a declared column"),
        ));
    }
    match record.get(key) {
        Some(value) if !value.is_unusable_key() => Ok((key, value)),
        _ => Err(fatal(
            record,
            ctx,
            format!("populate key field {key} is empty, null, or not set"),
        )),
    }
}

/// Validate the caller-supplied modifier map against the whitelist.
fn validate_modifiers(
    record: &Record,
    modifiers: &[(&str, &str)],
    ctx: &StoreContext<'_>,
) -> Result<Vec<Modifier>, RecordError> {
    let mut validated = Vec::with_capacity(modifiers.len());
    for (key, value) in modifiers {
        if value.trim().is_empty() {
            return Err(fatal(
                record,
                ctx,
                "select modifier value cannot be not set, empty, or null".to_string(),
            ));
        }
        match key.to_ascii_lowercase().as_str() {
            "limit" => {
                let limit = value.trim().parse::<u64>().map_err(|_| {
                    fatal(record, ctx, format!("limit modifier is not a number: {value}"))
                })?;
                validated.push(Modifier::Limit(limit));
            }
            "order by" => {
                let mut parts = value.split_whitespace();
                // Non-empty checked above.
                let column = parts.next().unwrap_or_default().to_string();
                let order = match parts.next().map(str::to_ascii_lowercase).as_deref() {
                    None | Some("asc") => Order::Asc,
                    Some("desc") => Order::Desc,
                    Some(other) => {
                        return Err(fatal(
                            record,
                            ctx,
                            format!("order by direction is not recognized: {other}"),
                        ))
                    }
                };
                if parts.next().is_some() || !record.columns().contains(&column) {
                    return Err(fatal(
                        record,
                        ctx,
                        format!("order by does not name a declared column: {value}"),
                    ));
                }
                validated.push(Modifier::OrderBy(column, order));
            }
            _ => {
                return Err(fatal(
                    record,
                    ctx,
                    format!("invalid select modifier found in populate parameters: {key}"),
                ))
            }
        }
    }
    Ok(validated)
}

/// Key values bind as parameters; the `Now` sentinel and nested records get
/// the same representation the insert path uses.
fn key_value(value: &FieldValue) -> Value {
    match value {
        FieldValue::Text(text) => text.clone().into(),
        FieldValue::Integer(number) => (*number).into(),
        FieldValue::Float(number) => (*number).into(),
        FieldValue::Boolean(flag) => (*flag).into(),
        FieldValue::Object(Some(object)) => object.clone().into(),
        FieldValue::DateTime(DateTimeField::At(moment)) => (*moment).into(),
        FieldValue::Nested(record) => record.id().into(),
        // Unusable keys are rejected before this point; the sentinel has no
        // bindable value and compares against nothing.
        _ => Value::BigInt(None),
    }
}

/// Build the populate SELECT for a validated key and modifier set.
fn build(record: &Record, key: &str, modifiers: &[Modifier]) -> (String, Values) {
    let mut statement = Query::select();
    for name in record.columns().names() {
        statement.column(ident(name));
    }
    statement.from(ident(record.table_name()));
    let value = record.get(key).map(key_value).unwrap_or(Value::BigInt(None));
    statement.and_where(Expr::col(ident(key)).eq(value));
    for modifier in modifiers {
        match modifier {
            Modifier::Limit(limit) => {
                statement.limit(*limit);
            }
            Modifier::OrderBy(column, order) => {
                statement.order_by(ident(column), order.clone());
            }
        }
    }
    statement.build(PostgresQueryBuilder)
}

/// Run the populate path end to end.
pub(crate) fn run(
    source: &mut Record,
    target: &mut Record,
    modifiers: &[(&str, &str)],
    ctx: &StoreContext<'_>,
) -> Result<bool, RecordError> {
    log::debug!("populate: starting for type {}", source.descriptor().type_name);
    let (key, _) = validate_key(source, ctx)?;
    let key = key.to_string();
    let validated = validate_modifiers(source, modifiers, ctx)?;

    let (sql, values) = build(source, &key, &validated);
    let rows = ctx.client.select(&sql, &values)?;
    let Some(row) = rows.first() else {
        log::debug!("populate: no rows matched key {key}");
        return Ok(false);
    };

    // First row wins, even when several matched. The whole row is coerced
    // before anything is applied: a bad column leaves both records untouched.
    let mut onto_target = Vec::new();
    let mut onto_source = Vec::new();
    for (column, value) in row.iter() {
        if column == "created" {
            if let Some(coerced) = source.coerce_store_value(column, value)? {
                onto_source.push((column.to_string(), coerced));
            }
        } else if let Some(coerced) = target.coerce_store_value(column, value)? {
            onto_target.push((column.to_string(), coerced));
        }
    }
    for (column, coerced) in onto_target {
        target.set(&column, coerced)?;
    }
    for (column, coerced) in onto_source {
        source.set(&column, coerced)?;
    }
    log::debug!("populate: finished for type {}", source.descriptor().type_name);
    Ok(true)
}
