use std::collections::HashMap;

use chrono::NaiveTime;
use diesel::prelude::*;

use crate::{
    domain::sale::{
        NewSale as DomainNewSale, Sale as DomainSale, SaleListQuery, SalesPage,
        format_invoice_number, invoice_day_prefix, parse_invoice_sequence,
    },
    models::sale::{
        NewSale as DbNewSale, NewSaleItem as DbNewSaleItem, Sale as DbSale, SaleItem as DbSaleItem,
    },
    repository::{DieselRepository, SaleReader, SaleWriter, item::decrement_stock},
    repository::errors::{RepositoryError, RepositoryResult},
};

impl SaleReader for DieselRepository {
    fn get_sale_by_id(&self, id: i32, store_id: i32) -> RepositoryResult<Option<DomainSale>> {
        use crate::schema::{sale_items, sales};

        let mut conn = self.conn()?;
        let sale = sales::table
            .filter(sales::id.eq(id))
            .filter(sales::store_id.eq(store_id))
            .first::<DbSale>(&mut conn)
            .optional()?;

        let Some(sale) = sale else {
            return Ok(None);
        };

        let items = sale_items::table
            .filter(sale_items::sale_id.eq(sale.id))
            .order(sale_items::id.asc())
            .load::<DbSaleItem>(&mut conn)?;

        Ok(Some(DomainSale::from((sale, items))))
    }

    fn list_sales(&self, query: SaleListQuery) -> RepositoryResult<SalesPage> {
        use crate::schema::{sale_items, sales};

        let mut conn = self.conn()?;

        let SaleListQuery {
            store_id,
            date,
            pagination,
        } = query;

        let day_bounds = date.map(|day| {
            let start = day.and_time(NaiveTime::MIN);
            let end = day.succ_opt().map(|next| next.and_time(NaiveTime::MIN));
            (start, end)
        });

        let mut count_query = sales::table
            .filter(sales::store_id.eq(store_id))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some((start, end)) = day_bounds {
            count_query = count_query.filter(sales::created_at.ge(start));
            if let Some(end) = end {
                count_query = count_query.filter(sales::created_at.lt(end));
            }
        }

        let total = count_query.count().get_result::<i64>(&mut conn)? as usize;

        let mut revenue_query = sales::table
            .filter(sales::store_id.eq(store_id))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some((start, end)) = day_bounds {
            revenue_query = revenue_query.filter(sales::created_at.ge(start));
            if let Some(end) = end {
                revenue_query = revenue_query.filter(sales::created_at.lt(end));
            }
        }

        let revenue_cents = revenue_query
            .select(diesel::dsl::sum(sales::total_cents))
            .get_result::<Option<i64>>(&mut conn)?
            .unwrap_or(0);

        let mut rows = sales::table
            .filter(sales::store_id.eq(store_id))
            .into_boxed::<diesel::sqlite::Sqlite>();

        if let Some((start, end)) = day_bounds {
            rows = rows.filter(sales::created_at.ge(start));
            if let Some(end) = end {
                rows = rows.filter(sales::created_at.lt(end));
            }
        }

        rows = rows.order((sales::created_at.desc(), sales::id.desc()));

        if let Some(pagination) = &pagination {
            rows = rows.offset(pagination.offset).limit(pagination.limit);
        }

        let db_sales = rows.load::<DbSale>(&mut conn)?;
        if db_sales.is_empty() {
            return Ok(SalesPage {
                total,
                revenue_cents,
                sales: Vec::new(),
            });
        }

        let sale_ids: Vec<i32> = db_sales.iter().map(|sale| sale.id).collect();

        let line_rows = sale_items::table
            .filter(sale_items::sale_id.eq_any(&sale_ids))
            .order(sale_items::id.asc())
            .load::<DbSaleItem>(&mut conn)?;

        let mut lines_by_sale: HashMap<i32, Vec<DbSaleItem>> = HashMap::new();
        for line in line_rows {
            lines_by_sale.entry(line.sale_id).or_default().push(line);
        }

        let sales = db_sales
            .into_iter()
            .map(|sale| {
                let sale_id = sale.id;
                let lines = lines_by_sale.remove(&sale_id).unwrap_or_default();
                DomainSale::from((sale, lines))
            })
            .collect();

        Ok(SalesPage {
            total,
            revenue_cents,
            sales,
        })
    }
}

impl SaleWriter for DieselRepository {
    fn create_sale(&self, new_sale: &DomainNewSale) -> RepositoryResult<DomainSale> {
        use crate::schema::{sale_items, sales};

        let mut conn = self.conn()?;

        conn.transaction::<DomainSale, RepositoryError, _>(|conn| {
            let today = chrono::Local::now().date_naive();
            let day_pattern = format!("{}%", invoice_day_prefix(today));

            // Same-day max + 1, serialized by the surrounding transaction.
            let latest = sales::table
                .filter(sales::store_id.eq(new_sale.store_id))
                .filter(sales::invoice_number.like(&day_pattern))
                .select(diesel::dsl::max(sales::invoice_number))
                .get_result::<Option<String>>(conn)?;

            let sequence = latest
                .as_deref()
                .and_then(parse_invoice_sequence)
                .unwrap_or(0)
                + 1;
            let invoice_number = format_invoice_number(today, sequence);

            let db_new = DbNewSale {
                store_id: new_sale.store_id,
                invoice_number: invoice_number.as_str(),
                total_cents: new_sale.total_cents(),
            };

            let created = diesel::insert_into(sales::table)
                .values(&db_new)
                .get_result::<DbSale>(conn)?;

            let sale_id = created.id;

            if !new_sale.items.is_empty() {
                let payload: Vec<DbNewSaleItem> = new_sale
                    .items
                    .iter()
                    .map(|line| DbNewSaleItem {
                        sale_id,
                        item_id: line.item_id,
                        name: line.name.as_str(),
                        unit_price_cents: line.unit_price_cents,
                        quantity: line.quantity,
                        total_cents: line.total_cents(),
                    })
                    .collect();

                diesel::insert_into(sale_items::table)
                    .values(&payload)
                    .execute(conn)?;
            }

            for line in &new_sale.items {
                if let Some(item_id) = line.item_id {
                    decrement_stock(conn, item_id, new_sale.store_id, line.quantity)?;
                }
            }

            let lines = sale_items::table
                .filter(sale_items::sale_id.eq(sale_id))
                .order(sale_items::id.asc())
                .load::<DbSaleItem>(conn)?;

            Ok(DomainSale::from((created, lines)))
        })
    }
}
