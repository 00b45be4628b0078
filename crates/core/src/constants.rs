/// Decimal places of the smallest currency unit relative to the major unit.
/// Monetary series are carried as `i64` in the smallest unit (e.g. cents).
pub const MONEY_DECIMAL_PLACES: u32 = 2;

/// Decimal places used when rendering percentages for display/export.
pub const PERCENT_DISPLAY_PRECISION: usize = 2;

/// Consumer-price-index levels are stored scaled by 10^2 (106.30 -> 10630).
pub const CPI_DECIMAL_PLACES: u32 = 2;

/// Unit price the virtual-share engine starts from on day zero.
pub const BASE_UNIT_PRICE: f64 = 1.0;
