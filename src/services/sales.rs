use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use crate::domain::auth::CurrentUser;
use crate::domain::sale::{NewSale, NewSaleItem, Sale, SaleListQuery, SalesPage};
use crate::forms::sales::CreateSaleForm;
use crate::repository::{ItemReader, SaleReader, SaleWriter, StoreReader};
use crate::services::stores::resolve_selected_store;
use crate::services::{ServiceError, ServiceResult};

/// Query parameters accepted by the sales list endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct SalesQuery {
    /// Calendar-day filter (`YYYY-MM-DD`).
    pub date: Option<NaiveDate>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// List the sales of the admin-selected store with the aggregate revenue
/// over the matching set.
pub fn list_sales<R>(
    repo: &R,
    user: &CurrentUser,
    store_id: i32,
    query: SalesQuery,
) -> ServiceResult<SalesPage>
where
    R: StoreReader + SaleReader + ?Sized,
{
    let store = resolve_selected_store(repo, user, store_id)?;

    let limit = query.limit.unwrap_or(crate::pagination::DEFAULT_PAGE_SIZE);
    let mut list_query = SaleListQuery::new(store.id).paginate(limit, query.offset.unwrap_or(0));
    if let Some(date) = query.date {
        list_query = list_query.date(date);
    }

    repo.list_sales(list_query).map_err(ServiceError::from)
}

/// Record a sale in the admin-selected store.
///
/// Lines referencing an item inherit the item's name unless one is given;
/// the invoice number and the clamped stock decrements are applied by the
/// repository inside one transaction.
pub fn create_sale<R>(
    repo: &R,
    user: &CurrentUser,
    store_id: i32,
    form: CreateSaleForm,
) -> ServiceResult<Sale>
where
    R: StoreReader + ItemReader + SaleWriter + ?Sized,
{
    form.validate()
        .map_err(|err| ServiceError::Form(err.to_string()))?;

    let store = resolve_selected_store(repo, user, store_id)?;

    let mut lines = Vec::with_capacity(form.items.len());
    for line in form.items {
        let name = match (line.item_id, line.name) {
            (Some(item_id), provided) => {
                let item = repo
                    .get_item_by_id(item_id, store.id)
                    .map_err(ServiceError::from)?
                    .ok_or(ServiceError::NotFound)?;
                provided.unwrap_or(item.name)
            }
            (None, Some(name)) => name,
            (None, None) => {
                return Err(ServiceError::Form(
                    "each line needs an item reference or a name".to_string(),
                ));
            }
        };

        let mut new_line = NewSaleItem::new(name, line.unit_price_cents, line.quantity);
        if let Some(item_id) = line.item_id {
            new_line = new_line.with_item_id(item_id);
        }
        lines.push(new_line);
    }

    let new_sale = NewSale::new(store.id, lines);

    repo.create_sale(&new_sale).map_err(ServiceError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    use crate::domain::item::{Item, ItemListQuery};
    use crate::domain::store::{Store, StoreListQuery};
    use crate::domain::user::UserRole;
    use crate::forms::sales::SaleLineForm;
    use crate::repository::errors::RepositoryResult;
    use crate::repository::mock::{MockItemReader, MockSaleWriter, MockStoreReader};

    fn fixed_datetime() -> NaiveDateTime {
        match NaiveDate::from_ymd_opt(2026, 1, 1) {
            Some(date) => date.and_hms_opt(0, 0, 0).unwrap_or_default(),
            None => NaiveDateTime::default(),
        }
    }

    struct MockRepo {
        stores: MockStoreReader,
        items: MockItemReader,
        sales: MockSaleWriter,
    }

    impl MockRepo {
        fn new() -> Self {
            Self {
                stores: MockStoreReader::new(),
                items: MockItemReader::new(),
                sales: MockSaleWriter::new(),
            }
        }
    }

    impl StoreReader for MockRepo {
        fn get_store_by_id(&self, id: i32) -> RepositoryResult<Option<Store>> {
            self.stores.get_store_by_id(id)
        }

        fn get_store_by_slug(&self, slug: &str) -> RepositoryResult<Option<Store>> {
            self.stores.get_store_by_slug(slug)
        }

        fn get_default_store(&self) -> RepositoryResult<Option<Store>> {
            self.stores.get_default_store()
        }

        fn list_stores(&self, query: StoreListQuery) -> RepositoryResult<(usize, Vec<Store>)> {
            self.stores.list_stores(query)
        }
    }

    impl ItemReader for MockRepo {
        fn get_item_by_id(&self, id: i32, store_id: i32) -> RepositoryResult<Option<Item>> {
            self.items.get_item_by_id(id, store_id)
        }

        fn list_items(&self, query: ItemListQuery) -> RepositoryResult<(usize, Vec<Item>)> {
            self.items.list_items(query)
        }
    }

    impl SaleWriter for MockRepo {
        fn create_sale(&self, new_sale: &NewSale) -> RepositoryResult<Sale> {
            self.sales.create_sale(new_sale)
        }
    }

    fn sample_store(id: i32) -> Store {
        Store {
            id,
            name: format!("Store {id}"),
            slug: format!("store-{id}"),
            is_default: false,
            is_active: true,
            invoice_name: None,
            invoice_address: None,
            invoice_phone: None,
            created_at: fixed_datetime(),
            updated_at: fixed_datetime(),
        }
    }

    fn sample_item(id: i32, store_id: i32, name: &str) -> Item {
        Item {
            id,
            store_id,
            category_id: None,
            product_id: None,
            name: name.to_string(),
            description: None,
            price_cents: 100,
            stock: 5,
            image_url: None,
            created_at: fixed_datetime(),
            updated_at: fixed_datetime(),
        }
    }

    fn member_of(store_ids: Vec<i32>) -> CurrentUser {
        CurrentUser {
            id: 1,
            email: "user@example.com".to_string(),
            name: "Tester".to_string(),
            role: UserRole::User,
            store_ids,
        }
    }

    #[test]
    fn create_sale_sums_line_totals() {
        let mut repo = MockRepo::new();
        let user = member_of(vec![2]);

        repo.stores
            .expect_get_store_by_id()
            .times(1)
            .returning(|id| Ok(Some(sample_store(id))));
        repo.items
            .expect_get_item_by_id()
            .times(1)
            .returning(|id, store_id| Ok(Some(sample_item(id, store_id, "Espresso"))));
        repo.sales
            .expect_create_sale()
            .times(1)
            .withf(|new_sale| {
                assert_eq!(new_sale.store_id, 2);
                assert_eq!(new_sale.total_cents(), 250);
                assert_eq!(new_sale.items[0].name, "Espresso");
                assert_eq!(new_sale.items[1].name, "Delivery");
                true
            })
            .returning(|new_sale| {
                Ok(Sale {
                    id: 1,
                    store_id: new_sale.store_id,
                    invoice_number: "INV-20260101-001".to_string(),
                    total_cents: new_sale.total_cents(),
                    items: Vec::new(),
                    created_at: fixed_datetime(),
                })
            });

        let form = CreateSaleForm {
            items: vec![
                SaleLineForm {
                    item_id: Some(4),
                    name: None,
                    unit_price_cents: 100,
                    quantity: 2,
                },
                SaleLineForm {
                    item_id: None,
                    name: Some("Delivery".to_string()),
                    unit_price_cents: 50,
                    quantity: 1,
                },
            ],
        };

        let sale = create_sale(&repo, &user, 2, form).expect("expected success");

        assert_eq!(sale.total_cents, 250);
    }

    #[test]
    fn create_sale_rejects_unknown_item() {
        let mut repo = MockRepo::new();
        let user = member_of(vec![2]);

        repo.stores
            .expect_get_store_by_id()
            .times(1)
            .returning(|id| Ok(Some(sample_store(id))));
        repo.items
            .expect_get_item_by_id()
            .times(1)
            .returning(|_, _| Ok(None));
        repo.sales.expect_create_sale().times(0);

        let form = CreateSaleForm {
            items: vec![SaleLineForm {
                item_id: Some(4),
                name: None,
                unit_price_cents: 100,
                quantity: 1,
            }],
        };

        let result = create_sale(&repo, &user, 2, form);

        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[test]
    fn create_sale_rejects_empty_line_identity() {
        let mut repo = MockRepo::new();
        let user = member_of(vec![2]);

        repo.stores
            .expect_get_store_by_id()
            .times(1)
            .returning(|id| Ok(Some(sample_store(id))));

        let form = CreateSaleForm {
            items: vec![SaleLineForm {
                item_id: None,
                name: None,
                unit_price_cents: 100,
                quantity: 1,
            }],
        };

        let result = create_sale(&repo, &user, 2, form);

        assert!(matches!(result, Err(ServiceError::Form(_))));
    }
}
