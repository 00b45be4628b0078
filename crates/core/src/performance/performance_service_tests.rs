use chrono::NaiveDate;

use crate::errors::Error;
use crate::ledger::{
    Account, AccountTransaction, AccountTransactionKind, AssetClass, Category, Client,
    ConsumerPriceIndex, Portfolio, PortfolioTransaction, PortfolioTransactionKind, Security,
};
use crate::performance::performance_service::{IndexService, IndexServiceTrait};
use crate::performance::reporting_period::ReportingPeriod;
use crate::performance::WarningCollector;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn period(start: NaiveDate, end: NaiveDate) -> ReportingPeriod {
    ReportingPeriod::FromTo(start, end)
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-12,
        "expected {} but was {}",
        expected,
        actual
    );
}

fn funded_account(name: &str, amount: i64, day: NaiveDate) -> Account {
    let mut account = Account::new(name, "USD");
    account.add_transaction(AccountTransaction::new(
        day,
        AccountTransactionKind::Deposit,
        amount,
    ));
    account
}

#[test]
fn account_index_covers_only_that_account() {
    let mut client = Client::new();
    client
        .accounts
        .push(funded_account("A", 1_000_00, date(2024, 2, 1)));
    client
        .accounts
        .push(funded_account("B", 9_000_00, date(2024, 2, 1)));
    let account_id = client.accounts[0].id.clone();

    let service = IndexService::default();
    let mut warnings = WarningCollector::new();
    let index = service
        .for_account(
            &client,
            &account_id,
            &period(date(2024, 3, 1), date(2024, 3, 3)),
            &mut warnings,
        )
        .unwrap();

    assert!(index.totals().iter().all(|t| *t == 1_000_00));
    assert!(index.delta().iter().all(|d| *d == 0.0));
}

#[test]
fn unknown_ids_are_rejected_before_computation() {
    let client = Client::new();
    let service = IndexService::default();
    let mut warnings = WarningCollector::new();
    let reporting = period(date(2024, 3, 1), date(2024, 3, 3));

    assert!(matches!(
        service.for_account(&client, "missing", &reporting, &mut warnings),
        Err(Error::NotFound(_))
    ));
    assert!(matches!(
        service.for_portfolio(&client, "missing", &reporting, &mut warnings),
        Err(Error::NotFound(_))
    ));
    assert!(matches!(
        service.for_investment(&client, "missing", &reporting, &mut warnings),
        Err(Error::NotFound(_))
    ));
}

#[test]
fn transfers_into_a_single_account_scope_are_external() {
    let mut client = Client::new();
    let mut account = funded_account("A", 1_000_00, date(2024, 2, 1));
    account.add_transaction(AccountTransaction::new(
        date(2024, 3, 2),
        AccountTransactionKind::TransferIn,
        200_00,
    ));
    client.accounts.push(account);
    let account_id = client.accounts[0].id.clone();

    let service = IndexService::default();
    let mut warnings = WarningCollector::new();
    let index = service
        .for_account(
            &client,
            &account_id,
            &period(date(2024, 3, 1), date(2024, 3, 3)),
            &mut warnings,
        )
        .unwrap();

    assert_eq!(index.totals()[0], 1_000_00);
    assert_eq!(index.totals()[1], 1_200_00);
    assert_eq!(index.transferals()[1], 200_00);
    assert_close(index.delta()[1], 0.0);
}

#[test]
fn portfolio_index_tracks_only_that_portfolios_holdings() {
    let mut client = Client::new();
    let mut security = Security::new("ACME", AssetClass::Equity);
    security.add_price(date(2024, 3, 1), 10_00);
    security.add_price(date(2024, 3, 2), 11_00);
    let security_id = security.id.clone();
    client.securities.push(security);

    let mut main = Portfolio::new("Main");
    main.add_transaction(PortfolioTransaction::new(
        date(2024, 2, 1),
        PortfolioTransactionKind::Buy,
        security_id.clone(),
        10,
        100_00,
    ));
    client.portfolios.push(main);

    let mut other = Portfolio::new("Other");
    other.add_transaction(PortfolioTransaction::new(
        date(2024, 2, 1),
        PortfolioTransactionKind::Buy,
        security_id,
        90,
        900_00,
    ));
    client.portfolios.push(other);

    let portfolio_id = client.portfolios[0].id.clone();
    let service = IndexService::default();
    let mut warnings = WarningCollector::new();
    let index = service
        .for_portfolio(
            &client,
            &portfolio_id,
            &period(date(2024, 3, 1), date(2024, 3, 2)),
            &mut warnings,
        )
        .unwrap();

    assert_eq!(index.totals()[0], 10 * 10_00);
    assert_eq!(index.totals()[1], 10 * 11_00);
    assert_close(index.delta()[1], 0.1);
}

#[test]
fn investment_index_absorbs_the_buy_as_a_flow() {
    let mut client = Client::new();
    let mut security = Security::new("ACME", AssetClass::Equity);
    security.add_price(date(2024, 3, 1), 10_00);
    security.add_price(date(2024, 3, 3), 11_00);
    let security_id = security.id.clone();
    client.securities.push(security);

    let mut portfolio = Portfolio::new("Main");
    portfolio.add_transaction(PortfolioTransaction::new(
        date(2024, 3, 2),
        PortfolioTransactionKind::Buy,
        security_id.clone(),
        10,
        100_00,
    ));
    client.portfolios.push(portfolio);

    let service = IndexService::default();
    let mut warnings = WarningCollector::new();
    let index = service
        .for_investment(
            &client,
            &security_id,
            &period(date(2024, 3, 1), date(2024, 3, 3)),
            &mut warnings,
        )
        .unwrap();

    // nothing held on day zero
    assert_eq!(index.totals()[0], 0);
    // the buy enters the scope as an external flow, not as gain
    assert_eq!(index.totals()[1], 100_00);
    assert_eq!(index.transferals()[1], 100_00);
    assert_close(index.delta()[1], 0.0);
    assert!(warnings.is_empty());

    // the price move is performance
    assert_close(index.delta()[2], 0.1);
    assert_close(index.accumulated()[2], 0.1);
    assert_eq!(index.first_data_point(), Some(date(2024, 3, 2)));
}

#[test]
fn cash_asset_class_covers_all_accounts() {
    let mut client = Client::new();
    client
        .accounts
        .push(funded_account("A", 1_000_00, date(2024, 2, 1)));
    client
        .accounts
        .push(funded_account("B", 500_00, date(2024, 2, 1)));

    let mut equity = Security::new("ACME", AssetClass::Equity);
    equity.add_price(date(2024, 3, 1), 10_00);
    let equity_id = equity.id.clone();
    client.securities.push(equity);

    let mut portfolio = Portfolio::new("Main");
    portfolio.add_transaction(PortfolioTransaction::new(
        date(2024, 2, 1),
        PortfolioTransactionKind::Buy,
        equity_id,
        10,
        100_00,
    ));
    client.portfolios.push(portfolio);

    let service = IndexService::default();
    let reporting = period(date(2024, 3, 1), date(2024, 3, 2));

    let mut warnings = WarningCollector::new();
    let cash = service
        .for_asset_class(&client, AssetClass::Cash, &reporting, &mut warnings)
        .unwrap();
    assert!(cash.totals().iter().all(|t| *t == 1_500_00));

    let equity = service
        .for_asset_class(&client, AssetClass::Equity, &reporting, &mut warnings)
        .unwrap();
    assert!(equity.totals().iter().all(|t| *t == 100_00));
}

#[test]
fn category_with_both_trade_legs_cancels_the_flow() {
    let mut client = Client::new();
    let mut security = Security::new("ACME", AssetClass::Equity);
    security.add_price(date(2024, 3, 1), 10_00);
    let security_id = security.id.clone();
    client.securities.push(security);

    let mut account = funded_account("A", 1_000_00, date(2024, 2, 1));
    account.add_transaction(
        AccountTransaction::new(date(2024, 3, 2), AccountTransactionKind::Buy, 100_00)
            .with_security(security_id.clone()),
    );
    client.accounts.push(account);

    let mut portfolio = Portfolio::new("Main");
    portfolio.add_transaction(PortfolioTransaction::new(
        date(2024, 3, 2),
        PortfolioTransactionKind::Buy,
        security_id.clone(),
        10,
        100_00,
    ));
    client.portfolios.push(portfolio);

    let mut category = Category::new("All of it");
    category.add_account(client.accounts[0].id.clone());
    category.add_security(security_id);

    let service = IndexService::default();
    let mut warnings = WarningCollector::new();
    let index = service
        .for_category(
            &client,
            &category,
            &period(date(2024, 3, 1), date(2024, 3, 3)),
            &mut warnings,
        )
        .unwrap();

    // cash leg out, security leg in: the scope total and flow both net to zero
    assert!(index.totals().iter().all(|t| *t == 1_000_00));
    assert_eq!(index.transferals()[1], 0);
    assert_close(index.delta()[1], 0.0);
}

#[test]
fn security_index_reuses_the_client_date_axis() {
    let mut client = Client::new();
    client
        .accounts
        .push(funded_account("A", 1_000_00, date(2024, 2, 1)));

    let mut security = Security::new("ACME", AssetClass::Equity);
    security.add_price(date(2024, 3, 2), 10_00);
    security.add_price(date(2024, 3, 4), 11_00);
    let security_id = security.id.clone();
    client.securities.push(security);

    let service = IndexService::default();
    let mut warnings = WarningCollector::new();
    let client_index = service
        .for_client(
            &client,
            &period(date(2024, 3, 1), date(2024, 3, 5)),
            &mut warnings,
        )
        .unwrap();

    let index = service
        .for_security(&client_index, &client, &security_id, &mut warnings)
        .unwrap();

    // identical axis to the source index
    assert_eq!(index.len(), client_index.len());
    assert_eq!(index.dates(), client_index.dates());

    assert_eq!(index.totals(), &[0, 10_00, 10_00, 11_00, 11_00]);
    assert_eq!(index.first_data_point(), Some(date(2024, 3, 2)));
    assert_close(index.delta()[3], 0.1);
    assert_close(index.accumulated()[2], 0.0);
    assert_close(index.accumulated()[4], 0.1);
    assert!(index.transferals().iter().all(|t| *t == 0));
    assert!(warnings.is_empty());

    assert!(matches!(
        service.for_security(&client_index, &client, "missing", &mut warnings),
        Err(Error::NotFound(_))
    ));
}

#[test]
fn security_without_quotes_warns_and_stays_flat() {
    let mut client = Client::new();
    client
        .accounts
        .push(funded_account("A", 1_000_00, date(2024, 2, 1)));
    let security = Security::new("UNQUOTED", AssetClass::Equity);
    let security_id = security.id.clone();
    client.securities.push(security);

    let service = IndexService::default();
    let mut warnings = WarningCollector::new();
    let client_index = service
        .for_client(
            &client,
            &period(date(2024, 3, 1), date(2024, 3, 3)),
            &mut warnings,
        )
        .unwrap();

    let index = service
        .for_security(&client_index, &client, &security_id, &mut warnings)
        .unwrap();

    assert_eq!(warnings.len(), 1);
    assert!(index.totals().iter().all(|t| *t == 0));
    assert!(index.accumulated().iter().all(|a| *a == 0.0));
}

#[test]
fn consumer_price_index_follows_monthly_levels() {
    let mut client = Client::new();
    client
        .accounts
        .push(funded_account("A", 1_000_00, date(2024, 1, 1)));
    client.consumer_price_index = vec![
        ConsumerPriceIndex {
            year: 2024,
            month: 2,
            index: 10_000,
        },
        ConsumerPriceIndex {
            year: 2024,
            month: 3,
            index: 10_100,
        },
    ];

    let service = IndexService::default();
    let mut warnings = WarningCollector::new();
    let client_index = service
        .for_client(
            &client,
            &period(date(2024, 2, 28), date(2024, 3, 2)),
            &mut warnings,
        )
        .unwrap();

    let index = service
        .for_consumer_price_index(&client_index, &client, &mut warnings)
        .unwrap();

    assert_eq!(index.dates(), client_index.dates());
    assert_eq!(index.totals(), &[10_000, 10_000, 10_100, 10_100]);
    assert_close(index.delta()[2], 0.01);
    assert_close(index.accumulated()[3], 0.01);
    assert!(warnings.is_empty());
}

#[test]
fn consumer_price_index_without_data_warns() {
    let mut client = Client::new();
    client
        .accounts
        .push(funded_account("A", 1_000_00, date(2024, 1, 1)));

    let service = IndexService::default();
    let mut warnings = WarningCollector::new();
    let client_index = service
        .for_client(
            &client,
            &period(date(2024, 3, 1), date(2024, 3, 2)),
            &mut warnings,
        )
        .unwrap();

    let index = service
        .for_consumer_price_index(&client_index, &client, &mut warnings)
        .unwrap();

    assert_eq!(warnings.len(), 1);
    assert!(index.totals().iter().all(|t| *t == 0));
}

#[test]
fn index_serializes_with_camel_case_fields() {
    let mut client = Client::new();
    client
        .accounts
        .push(funded_account("A", 1_000_00, date(2024, 2, 1)));

    let service = IndexService::default();
    let mut warnings = WarningCollector::new();
    let index = service
        .for_client(
            &client,
            &period(date(2024, 3, 1), date(2024, 3, 2)),
            &mut warnings,
        )
        .unwrap();

    let json = serde_json::to_value(&index).unwrap();
    assert!(json.get("deltaUnit").is_some());
    assert!(json.get("transferals").is_some());
    assert_eq!(json["totals"].as_array().unwrap().len(), 2);
}
