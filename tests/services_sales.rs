use chrono::Local;

use resto_admin::domain::auth::CurrentUser;
use resto_admin::domain::item::NewItem;
use resto_admin::domain::sale::invoice_day_prefix;
use resto_admin::domain::store::NewStore;
use resto_admin::domain::user::UserRole;
use resto_admin::forms::sales::{CreateSaleForm, SaleLineForm};
use resto_admin::repository::{DieselRepository, ItemReader, ItemWriter, StoreWriter};
use resto_admin::services::sales::{SalesQuery, create_sale, list_sales};
use resto_admin::services::ServiceError;

mod common;

fn member_of(store_ids: Vec<i32>) -> CurrentUser {
    CurrentUser {
        id: 1,
        email: "cashier@example.com".to_string(),
        name: "Cashier".to_string(),
        role: UserRole::User,
        store_ids,
    }
}

fn line(item_id: Option<i32>, name: Option<&str>, unit_price_cents: i32, quantity: i32) -> SaleLineForm {
    SaleLineForm {
        item_id,
        name: name.map(str::to_string),
        unit_price_cents,
        quantity,
    }
}

#[test]
fn create_sale_computes_totals_and_invoice_sequence() {
    let test_db = common::TestDb::new("service_sale_totals.db");
    let repo = DieselRepository::new(test_db.pool());

    let store = repo.create_store(&NewStore::new("First", "first")).unwrap();
    let espresso = repo
        .create_item(&NewItem::new(store.id, "Espresso", 100).with_stock(5))
        .unwrap();
    let user = member_of(vec![store.id]);

    let form = CreateSaleForm {
        items: vec![
            line(Some(espresso.id), None, 100, 2),
            line(None, Some("Delivery"), 50, 1),
        ],
    };

    let sale = create_sale(&repo, &user, store.id, form).expect("sale creation succeeds");

    let prefix = invoice_day_prefix(Local::now().date_naive());
    assert_eq!(sale.total_cents, 250);
    assert_eq!(sale.invoice_number, format!("{prefix}001"));
    assert_eq!(sale.items[0].name, "Espresso");

    let second = create_sale(
        &repo,
        &user,
        store.id,
        CreateSaleForm {
            items: vec![line(Some(espresso.id), None, 100, 1)],
        },
    )
    .expect("second sale succeeds");
    assert_eq!(second.invoice_number, format!("{prefix}002"));

    let remaining = repo
        .get_item_by_id(espresso.id, store.id)
        .unwrap()
        .expect("item exists");
    assert_eq!(remaining.stock, 2);

    let page = list_sales(&repo, &user, store.id, SalesQuery::default())
        .expect("listing succeeds");
    assert_eq!(page.total, 2);
    assert_eq!(page.revenue_cents, 350);
}

#[test]
fn create_sale_requires_store_membership() {
    let test_db = common::TestDb::new("service_sale_membership.db");
    let repo = DieselRepository::new(test_db.pool());

    let store = repo.create_store(&NewStore::new("First", "first")).unwrap();
    let outsider = member_of(vec![store.id + 100]);

    let form = CreateSaleForm {
        items: vec![line(None, Some("Tea"), 80, 1)],
    };

    let result = create_sale(&repo, &outsider, store.id, form);

    assert!(matches!(result, Err(ServiceError::Forbidden)));
}

#[test]
fn create_sale_rejects_items_from_other_stores() {
    let test_db = common::TestDb::new("service_sale_cross_store.db");
    let repo = DieselRepository::new(test_db.pool());

    let first = repo.create_store(&NewStore::new("First", "first")).unwrap();
    let second = repo
        .create_store(&NewStore::new("Second", "second"))
        .unwrap();
    let foreign_item = repo
        .create_item(&NewItem::new(second.id, "Espresso", 100).with_stock(5))
        .unwrap();
    let user = member_of(vec![first.id]);

    let form = CreateSaleForm {
        items: vec![line(Some(foreign_item.id), None, 100, 1)],
    };

    let result = create_sale(&repo, &user, first.id, form);

    assert!(matches!(result, Err(ServiceError::NotFound)));
}
