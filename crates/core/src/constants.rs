/// Decimal places of the ledger's native unit (1 native = 10^18 wei)
pub const NATIVE_DECIMALS: u32 = 18;

/// Decimal precision for fiat display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Default number of campaigns fetched per catalog page
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Default gas ceilings per contract call
pub const DEFAULT_DONATION_GAS_LIMIT: u64 = 300_000;
pub const DEFAULT_WITHDRAW_GAS_LIMIT: u64 = 150_000;
pub const DEFAULT_BENEFICIARY_GAS_LIMIT: u64 = 100_000;

/// How long a success notification stays visible
pub const DEFAULT_NOTIFICATION_TTL_MS: u64 = 5_500;

/// Age after which a fetched exchange rate is reported as stale
pub const DEFAULT_RATE_MAX_AGE_SECS: u64 = 300;

/// Characters kept in a card's description preview
pub const DESCRIPTION_PREVIEW_CHARS: usize = 50;

pub const WITHDRAW_SUCCESS_MESSAGE: &str = "Funds Withdrawn!";
pub const BENEFICIARY_SUCCESS_MESSAGE: &str = "Fundraiser beneficiary has been changed!";
