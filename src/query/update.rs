//! Full-row update statement assembly.

use sea_query::{Expr, ExprTrait, PostgresQueryBuilder, Query, Values};

use crate::error::RecordError;
use crate::query::ident;
use crate::record::Record;
use crate::store::StoreContext;

/// Build the UPDATE for a record's current values.
///
/// Every declared column is covered, `id` included; that is harmless since
/// the WHERE clause pins the row by the current `id`. Values go through the
/// same binding path the insert uses; there is no second
/// escaping routine here.
pub(crate) fn build(record: &Record) -> (String, Values) {
    let mut statement = Query::update();
    statement.table(ident(record.table_name()));
    for (name, kind) in record.columns().iter() {
        let expr = record
            .get(name)
            .map(|value| value.to_store_expr(kind))
            .unwrap_or_else(|| Expr::val(sea_query::Value::BigInt(None)));
        statement.value(ident(name), expr);
    }
    statement.and_where(Expr::col(ident("id")).eq(record.id()));
    statement.build(PostgresQueryBuilder)
}

/// Assemble and submit. Overwrites no local state; the record's values are
/// only pushed outward.
pub(crate) fn run(record: &Record, ctx: &StoreContext<'_>) -> Result<(), RecordError> {
    let (sql, values) = build(record);
    ctx.client.write(&sql, &values)?;
    log::debug!("update: table={} id={}", record.table_name(), record.id());
    Ok(())
}
