//! Scope-dispatch factory for performance indices.

use std::sync::Arc;

use log::debug;

use crate::errors::{Error, Result};
use crate::ledger::{AssetClass, Category, Client};
use crate::performance::performance_model::{PerformanceIndex, WarningCollector};
use crate::performance::reporting_period::ReportingPeriod;
use crate::performance::scope::ScopeView;
use crate::performance::{client_index, derived_index, nav_index};
use crate::snapshot::{LedgerSnapshotService, SnapshotValuationTrait};

/// Routes a scope request to the engine computing it. Every operation
/// returns a fully computed, immutable index; diagnostic conditions land in
/// the warnings collector, never in the error channel.
pub trait IndexServiceTrait: Send + Sync {
    /// Cash-flow-adjusted index over the whole client.
    fn for_client(
        &self,
        client: &Client,
        period: &ReportingPeriod,
        warnings: &mut WarningCollector,
    ) -> Result<PerformanceIndex>;

    /// Virtual-share (true time-weighted) index over the whole client.
    fn for_net_asset_value(
        &self,
        client: &Client,
        period: &ReportingPeriod,
        warnings: &mut WarningCollector,
    ) -> Result<PerformanceIndex>;

    /// Index of a single account, expressed as a degenerate category.
    fn for_account(
        &self,
        client: &Client,
        account_id: &str,
        period: &ReportingPeriod,
        warnings: &mut WarningCollector,
    ) -> Result<PerformanceIndex>;

    /// Index of a single portfolio's holdings.
    fn for_portfolio(
        &self,
        client: &Client,
        portfolio_id: &str,
        period: &ReportingPeriod,
        warnings: &mut WarningCollector,
    ) -> Result<PerformanceIndex>;

    /// Index of a user-defined category scope.
    fn for_category(
        &self,
        client: &Client,
        category: &Category,
        period: &ReportingPeriod,
        warnings: &mut WarningCollector,
    ) -> Result<PerformanceIndex>;

    /// Index of every security of an asset class; the cash class also
    /// covers all accounts.
    fn for_asset_class(
        &self,
        client: &Client,
        asset_class: AssetClass,
        period: &ReportingPeriod,
        warnings: &mut WarningCollector,
    ) -> Result<PerformanceIndex>;

    /// Index of a single security position, expressed as a degenerate
    /// category.
    fn for_investment(
        &self,
        client: &Client,
        security_id: &str,
        period: &ReportingPeriod,
        warnings: &mut WarningCollector,
    ) -> Result<PerformanceIndex>;

    /// Security benchmark derived from an already-computed client index's
    /// date axis.
    fn for_security(
        &self,
        client_index: &PerformanceIndex,
        client: &Client,
        security_id: &str,
        warnings: &mut WarningCollector,
    ) -> Result<PerformanceIndex>;

    /// Inflation benchmark derived from an already-computed client index's
    /// date axis.
    fn for_consumer_price_index(
        &self,
        client_index: &PerformanceIndex,
        client: &Client,
        warnings: &mut WarningCollector,
    ) -> Result<PerformanceIndex>;
}

pub struct IndexService {
    snapshot: Arc<dyn SnapshotValuationTrait>,
}

impl IndexService {
    pub fn new(snapshot: Arc<dyn SnapshotValuationTrait>) -> Self {
        Self { snapshot }
    }
}

impl Default for IndexService {
    fn default() -> Self {
        Self::new(Arc::new(LedgerSnapshotService::new()))
    }
}

impl IndexServiceTrait for IndexService {
    fn for_client(
        &self,
        client: &Client,
        period: &ReportingPeriod,
        warnings: &mut WarningCollector,
    ) -> Result<PerformanceIndex> {
        let interval = period.resolve()?;
        debug!("Calculating client index over {:?}", interval);
        let view = ScopeView::client(client);
        let policy = client_index::client_policy();
        Ok(client_index::calculate(
            &view,
            interval,
            &policy,
            |date| self.snapshot.valuation(client, date),
            warnings,
        ))
    }

    fn for_net_asset_value(
        &self,
        client: &Client,
        period: &ReportingPeriod,
        warnings: &mut WarningCollector,
    ) -> Result<PerformanceIndex> {
        let interval = period.resolve()?;
        debug!("Calculating net-asset-value index over {:?}", interval);
        let view = ScopeView::client(client);
        Ok(nav_index::calculate(
            &view,
            interval,
            client.settings.taxes_are_performance_relevant,
            |date| self.snapshot.valuation(client, date),
            warnings,
        ))
    }

    fn for_account(
        &self,
        client: &Client,
        account_id: &str,
        period: &ReportingPeriod,
        warnings: &mut WarningCollector,
    ) -> Result<PerformanceIndex> {
        let account = client
            .account(account_id)
            .ok_or_else(|| Error::NotFound(format!("Account {}", account_id)))?;

        let mut category = Category::new(account.name.clone());
        category.add_account(account.id.clone());
        self.for_category(client, &category, period, warnings)
    }

    fn for_portfolio(
        &self,
        client: &Client,
        portfolio_id: &str,
        period: &ReportingPeriod,
        warnings: &mut WarningCollector,
    ) -> Result<PerformanceIndex> {
        let portfolio = client
            .portfolio(portfolio_id)
            .ok_or_else(|| Error::NotFound(format!("Portfolio {}", portfolio_id)))?;

        let interval = period.resolve()?;
        let view = ScopeView::portfolio(portfolio);
        let policy = client_index::scoped_policy();
        Ok(client_index::calculate(
            &view,
            interval,
            &policy,
            |date| self.snapshot.portfolio_valuation(client, portfolio, date),
            warnings,
        ))
    }

    fn for_category(
        &self,
        client: &Client,
        category: &Category,
        period: &ReportingPeriod,
        warnings: &mut WarningCollector,
    ) -> Result<PerformanceIndex> {
        let interval = period.resolve()?;
        let view = ScopeView::category(client, category);
        let policy = client_index::scoped_policy();
        Ok(client_index::calculate(
            &view,
            interval,
            &policy,
            |date| self.snapshot.category_valuation(client, category, date),
            warnings,
        ))
    }

    fn for_asset_class(
        &self,
        client: &Client,
        asset_class: AssetClass,
        period: &ReportingPeriod,
        warnings: &mut WarningCollector,
    ) -> Result<PerformanceIndex> {
        let mut category = Category::new(asset_class.to_string());

        if asset_class == AssetClass::Cash {
            for account in &client.accounts {
                category.add_account(account.id.clone());
            }
        }

        for security in &client.securities {
            if security.asset_class == asset_class {
                category.add_security(security.id.clone());
            }
        }

        self.for_category(client, &category, period, warnings)
    }

    fn for_investment(
        &self,
        client: &Client,
        security_id: &str,
        period: &ReportingPeriod,
        warnings: &mut WarningCollector,
    ) -> Result<PerformanceIndex> {
        let security = client
            .security(security_id)
            .ok_or_else(|| Error::NotFound(format!("Security {}", security_id)))?;

        let mut category = Category::new(security.name.clone());
        category.add_security(security.id.clone());
        self.for_category(client, &category, period, warnings)
    }

    fn for_security(
        &self,
        client_index: &PerformanceIndex,
        client: &Client,
        security_id: &str,
        warnings: &mut WarningCollector,
    ) -> Result<PerformanceIndex> {
        let security = client
            .security(security_id)
            .ok_or_else(|| Error::NotFound(format!("Security {}", security_id)))?;

        Ok(derived_index::calculate_security(
            client_index,
            security,
            warnings,
        ))
    }

    fn for_consumer_price_index(
        &self,
        client_index: &PerformanceIndex,
        client: &Client,
        warnings: &mut WarningCollector,
    ) -> Result<PerformanceIndex> {
        Ok(derived_index::calculate_consumer_price_index(
            client_index,
            client,
            warnings,
        ))
    }
}
