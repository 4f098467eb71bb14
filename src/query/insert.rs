//! Insert statement assembly.

use sea_query::{Expr, PostgresQueryBuilder, Query, Values};

use crate::error::RecordError;
use crate::query::ident;
use crate::record::Record;
use crate::session::Session;
use crate::store::StoreContext;

/// Build the INSERT for a record's current values.
///
/// The `id` column is skipped (identity is store-assigned) and collection
/// fields never reach column metadata. Two column-name overrides apply
/// regardless of the field's in-memory value: `created` is written as the
/// store-side `NOW()` and `user_id` is written as the session's owning-user
/// id. Every other column binds the field's value.
pub(crate) fn build(record: &Record, session: &Session) -> Result<(String, Values), RecordError> {
    let mut columns = Vec::new();
    let mut values = Vec::new();
    for (name, kind) in record.columns().iter() {
        if name == "id" {
            continue;
        }
        columns.push(ident(name));
        let expr = match name {
            "created" => Expr::cust("NOW()"),
            "user_id" => Expr::val(session.user_id()),
            _ => record
                .get(name)
                .map(|value| value.to_store_expr(kind))
                .unwrap_or_else(|| Expr::val(sea_query::Value::BigInt(None))),
        };
        values.push(expr);
    }

    let mut statement = Query::insert();
    statement
        .into_table(ident(record.table_name()))
        .columns(columns);
    statement
        .values(values)
        .map_err(|error| RecordError::QueryBuild(error.to_string()))?;
    Ok(statement.build(PostgresQueryBuilder))
}

/// Assemble, submit, and write the generated key back into `id`.
pub(crate) fn run(record: &mut Record, ctx: &StoreContext<'_>) -> Result<i64, RecordError> {
    let (sql, values) = build(record, ctx.session)?;
    let generated_id = ctx.client.insert(&sql, &values)?;
    record.set_id(generated_id);
    log::debug!(
        "insert: table={} generated_id={generated_id}",
        record.table_name()
    );
    Ok(generated_id)
}
